//! # Drawing Primitives
//!
//! Composite shapes built from the surface's rectangles, circles, lines and
//! text. None of these know about pages or the cursor: they paint at the
//! origin they are given and return.

use crate::font::{Font, FontContext};
use crate::style::Color;
use crate::surface::{DrawOp, Stroke, Surface};

pub fn rect(surface: &mut Surface, x: f64, y: f64, width: f64, height: f64, fill: Color) {
    surface.draw(DrawOp::Rect {
        x,
        y,
        width,
        height,
        radius: 0.0,
        fill: Some(fill),
        stroke: None,
    });
}

#[allow(clippy::too_many_arguments)]
pub fn rounded_rect(
    surface: &mut Surface,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    radius: f64,
    fill: Option<Color>,
    stroke: Option<Stroke>,
) {
    let radius = radius.min(width / 2.0).min(height / 2.0).max(0.0);
    surface.draw(DrawOp::Rect {
        x,
        y,
        width,
        height,
        radius,
        fill,
        stroke,
    });
}

pub fn circle(surface: &mut Surface, cx: f64, cy: f64, r: f64, fill: Color) {
    surface.draw(DrawOp::Circle {
        cx,
        cy,
        r,
        fill: Some(fill),
        stroke: None,
    });
}

pub fn line(surface: &mut Surface, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke) {
    surface.draw(DrawOp::Line {
        x1,
        y1,
        x2,
        y2,
        stroke,
    });
}

/// A horizontal hairline.
pub fn divider(surface: &mut Surface, x: f64, y: f64, width: f64, color: Color) {
    line(surface, x, y, x + width, y, Stroke::new(color, 0.75));
}

/// Left-aligned text with its baseline at `y`.
pub fn text(
    surface: &mut Surface,
    x: f64,
    y: f64,
    text: impl Into<String>,
    font: Font,
    size: f64,
    color: Color,
) {
    surface.draw(DrawOp::Text {
        x,
        y,
        text: text.into(),
        font,
        size,
        color,
    });
}

/// Text centered horizontally on `cx`.
#[allow(clippy::too_many_arguments)]
pub fn centered_text(
    surface: &mut Surface,
    fonts: &FontContext,
    cx: f64,
    y: f64,
    content: &str,
    font: Font,
    size: f64,
    color: Color,
) {
    let w = fonts.measure_string(content, font, size);
    text(surface, cx - w / 2.0, y, content, font, size, color);
}

/// Text right-aligned against `right`.
#[allow(clippy::too_many_arguments)]
pub fn right_text(
    surface: &mut Surface,
    fonts: &FontContext,
    right: f64,
    y: f64,
    content: &str,
    font: Font,
    size: f64,
    color: Color,
) {
    let w = fonts.measure_string(content, font, size);
    text(surface, right - w, y, content, font, size, color);
}

/// How card backgrounds look. Borrowed from [`crate::config`] by the
/// layout engine.
#[derive(Debug, Clone, Copy)]
pub struct CardStyle {
    pub radius: f64,
    pub accent_width: f64,
    pub background: Color,
    pub border: Color,
}

/// White rounded card with a thin border and a colored bar down its left
/// edge.
pub fn card_background(
    surface: &mut Surface,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    accent: Color,
    style: &CardStyle,
) {
    rounded_rect(
        surface,
        x,
        y,
        width,
        height,
        style.radius,
        Some(style.background),
        Some(Stroke::new(style.border, 0.75)),
    );
    rounded_rect(
        surface,
        x,
        y,
        style.accent_width,
        height,
        style.accent_width / 2.0,
        Some(accent),
        None,
    );
}

/// A two-tone pill: solid cap holding the label, tinted body holding the
/// value.
#[derive(Debug, Clone, Copy)]
pub struct Badge<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub color: Color,
    pub size: f64,
}

impl Badge<'_> {
    fn padding(&self) -> f64 {
        self.size * 0.6
    }

    pub fn height(&self) -> f64 {
        self.size * 2.0
    }

    pub fn width(&self, fonts: &FontContext) -> f64 {
        let pad = self.padding();
        fonts.measure_string(self.label, Font::Bold, self.size)
            + fonts.measure_string(self.value, Font::Bold, self.size)
            + pad * 4.0
    }
}

/// Paint a badge with its top-left at (x, y) and return its width.
pub fn badge(surface: &mut Surface, fonts: &FontContext, x: f64, y: f64, badge: &Badge<'_>) -> f64 {
    let pad = badge.padding();
    let h = badge.height();
    let total = badge.width(fonts);
    let cap = fonts.measure_string(badge.label, Font::Bold, badge.size) + pad * 2.0;
    let baseline = y + h / 2.0 + badge.size * 0.35;

    rounded_rect(surface, x, y, total, h, h / 2.0, Some(badge.color.tint(0.85)), None);
    rounded_rect(surface, x, y, cap, h, h / 2.0, Some(badge.color), None);
    text(surface, x + pad, baseline, badge.label, Font::Bold, badge.size, Color::WHITE);
    text(
        surface,
        x + cap + pad,
        baseline,
        badge.value,
        Font::Bold,
        badge.size,
        badge.color,
    );
    total
}

/// A yellow rear number plate with the registration centered on it.
#[allow(clippy::too_many_arguments)]
pub fn number_plate(
    surface: &mut Surface,
    fonts: &FontContext,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    registration: &str,
    plate: Color,
    ink: Color,
) {
    rounded_rect(
        surface,
        x,
        y,
        width,
        height,
        height * 0.12,
        Some(plate),
        Some(Stroke::new(ink, 1.25)),
    );

    let mut size = height * 0.6;
    let max = width * 0.86;
    let measured = fonts.measure_string(registration, Font::Bold, size);
    if measured > max {
        size *= max / measured;
    }
    centered_text(
        surface,
        fonts,
        x + width / 2.0,
        y + height / 2.0 + size * 0.36,
        registration,
        Font::Bold,
        size,
        ink,
    );
}

/// Horizontal bar filled to `fraction` over a light track.
pub fn meter(
    surface: &mut Surface,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    fraction: f64,
    color: Color,
) {
    let fraction = fraction.clamp(0.0, 1.0);
    rounded_rect(surface, x, y, width, height, height / 2.0, Some(color.tint(0.8)), None);
    if fraction > 0.0 {
        rounded_rect(
            surface,
            x,
            y,
            (width * fraction).max(height),
            height,
            height / 2.0,
            Some(color),
            None,
        );
    }
}

/// A labelled figure in a bordered box: small caption on top, large value
/// below it.
#[allow(clippy::too_many_arguments)]
pub fn tile(
    surface: &mut Surface,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    label: &str,
    value: &str,
    color: Color,
    border: Color,
) {
    rounded_rect(
        surface,
        x,
        y,
        width,
        height,
        4.0,
        Some(color.tint(0.92)),
        Some(Stroke::new(border, 0.75)),
    );
    text(surface, x + 10.0, y + 16.0, label, Font::Regular, 8.0, color);
    text(surface, x + 10.0, y + height - 12.0, value, Font::Bold, 15.0, color);
}

/// Path data for a ring segment starting at twelve o'clock and running
/// clockwise through `fraction` of a full turn. A full ring is written as
/// two half arcs, since an arc whose endpoints coincide draws nothing.
pub fn gauge_path(cx: f64, cy: f64, r: f64, fraction: f64) -> Option<String> {
    let fraction = fraction.clamp(0.0, 1.0);
    if fraction <= 0.0 {
        return None;
    }
    let top = (cx, cy - r);
    if fraction >= 0.999 {
        return Some(format!(
            "M{:.3} {:.3}A{r:.3} {r:.3} 0 1 1 {:.3} {:.3}A{r:.3} {r:.3} 0 1 1 {:.3} {:.3}",
            top.0,
            top.1,
            cx,
            cy + r,
            top.0,
            top.1,
        ));
    }
    // Clockwise on the page is increasing angle with y pointing down.
    let angle = -std::f64::consts::FRAC_PI_2 + fraction * std::f64::consts::TAU;
    let end = (cx + r * angle.cos(), cy + r * angle.sin());
    let large = u8::from(fraction > 0.5);
    Some(format!(
        "M{:.3} {:.3}A{r:.3} {r:.3} 0 {large} 1 {:.3} {:.3}",
        top.0, top.1, end.0, end.1,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> Surface {
        let mut s = Surface::new(300.0, 300.0);
        s.add_page(Color::WHITE);
        s
    }

    #[test]
    fn radius_is_clamped_to_the_box() {
        let mut s = surface();
        rounded_rect(&mut s, 0.0, 0.0, 10.0, 4.0, 9.0, None, None);
        match s.pages()[0].body[0] {
            DrawOp::Rect { radius, .. } => assert_eq!(radius, 2.0),
            ref other => panic!("expected a rect, got {other:?}"),
        }
    }

    #[test]
    fn card_is_background_then_accent() {
        let mut s = surface();
        let style = CardStyle {
            radius: 5.0,
            accent_width: 4.0,
            background: Color::WHITE,
            border: Color::BLACK,
        };
        card_background(&mut s, 10.0, 20.0, 100.0, 50.0, Color::rgb(1.0, 0.0, 0.0), &style);
        let body = &s.pages()[0].body;
        assert_eq!(body.len(), 2);
        assert!(matches!(body[0], DrawOp::Rect { width, radius, stroke: Some(_), .. } if width == 100.0 && radius == 5.0));
        assert!(matches!(body[1], DrawOp::Rect { width, stroke: None, .. } if width == 4.0));
    }

    #[test]
    fn badge_width_matches_what_is_painted() {
        let mut s = surface();
        let fonts = FontContext::new();
        let b = Badge {
            label: "MOT",
            value: "Valid",
            color: Color::rgb(0.0, 0.6, 0.2),
            size: 8.0,
        };
        let w = badge(&mut s, &fonts, 0.0, 0.0, &b);
        assert!((w - b.width(&fonts)).abs() < 1e-9);
        match &s.pages()[0].body[0] {
            DrawOp::Rect { width, height, .. } => {
                assert!((width - w).abs() < 1e-9);
                assert_eq!(*height, 16.0);
            }
            other => panic!("expected a rect, got {other:?}"),
        }
        assert_eq!(s.pages()[0].body.len(), 4);
    }

    #[test]
    fn long_registration_shrinks_to_fit() {
        let mut s = surface();
        let fonts = FontContext::new();
        number_plate(
            &mut s,
            &fonts,
            0.0,
            0.0,
            60.0,
            30.0,
            "WWWWWWWWWW",
            Color::WHITE,
            Color::BLACK,
        );
        match &s.pages()[0].body[1] {
            DrawOp::Text { text, font, size, .. } => {
                assert!(fonts.measure_string(text, *font, *size) <= 60.0 * 0.86 + 1e-9);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn gauge_path_ends_where_expected() {
        use crate::path::{interpret, PathCommand};

        let d = gauge_path(50.0, 50.0, 20.0, 0.25).unwrap();
        let out = interpret(&d);
        assert_eq!(out.error, None);
        // A quarter turn clockwise from the top ends at three o'clock.
        let Some(&PathCommand::CurveTo(_, _, _, _, x, y)) = out.commands.last() else {
            panic!("expected a curve");
        };
        assert!((x - 70.0).abs() < 1e-3 && (y - 50.0).abs() < 1e-3);
        assert_eq!(out.commands.len(), 2);
    }

    #[test]
    fn full_gauge_is_a_closed_ring() {
        use crate::path::interpret;

        let out = interpret(&gauge_path(0.0, 0.0, 10.0, 1.0).unwrap());
        assert_eq!(out.error, None);
        // Two half arcs of two quarter segments each.
        assert_eq!(out.commands.len(), 5);
        assert_eq!(gauge_path(0.0, 0.0, 10.0, 0.0), None);
    }

    #[test]
    fn empty_meter_draws_only_the_track() {
        let mut s = surface();
        meter(&mut s, 0.0, 0.0, 100.0, 6.0, 0.0, Color::BLACK);
        assert_eq!(s.pages()[0].body.len(), 1);
    }
}
