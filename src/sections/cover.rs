//! The cover page. Always drawn, always followed by a page break.

use crate::draw::{self, Badge};
use crate::font::Font;
use crate::format;
use crate::icons::Icon;
use crate::layout::{Canvas, Cursor};
use crate::model::Report;
use crate::style::Color;
use crate::surface::descent;

/// Offset of the last line of text from the top of the cover, at full size.
const LAST_BASELINE: f64 = 408.0;
const NOTE_SIZE: f64 = 9.0;

/// Height of the cover at full size, down to the last line's descenders.
pub(crate) fn natural_height() -> f64 {
    LAST_BASELINE + descent(NOTE_SIZE)
}

/// Drawn at full size when the page has room for it, otherwise scaled down
/// as a whole until it fits above the footer band.
pub fn render(canvas: &mut Canvas, report: &Report, cursor: Cursor) -> Cursor {
    let page = canvas.page();
    let palette = canvas.palette();
    let fonts = canvas.fonts();
    let brand = canvas.brand().clone();
    let left = page.margin_left;
    let width = page.content_width();
    let center = left + width / 2.0;
    let vehicle = report.vehicle.clone().unwrap_or_default();

    let k = (canvas.remaining(cursor) / natural_height()).min(1.0);
    let v = |n: f64| n * k;
    if k < 1.0 {
        tracing::debug!(scale = k, "cover scaled to fit the page");
    }

    // Brand banner.
    let mut y = cursor.y();
    draw::rounded_rect(canvas.surface(), left, y, width, v(64.0), v(6.0), Some(palette.brand), None);
    canvas.icon(Icon::Shield, left + v(16.0), y + v(18.0), v(28.0), Color::WHITE);
    draw::text(
        canvas.surface(),
        left + v(54.0),
        y + v(30.0),
        brand.name.as_str(),
        Font::Bold,
        v(18.0),
        Color::WHITE,
    );
    draw::text(
        canvas.surface(),
        left + v(54.0),
        y + v(46.0),
        brand.report_title.as_str(),
        Font::Regular,
        v(10.0),
        Color::WHITE,
    );
    y += v(110.0);

    // Vehicle identity.
    canvas.icon(Icon::Car, center - v(32.0), y, v(64.0), palette.brand);
    y += v(84.0);
    let registration = format::or_dash(vehicle.registration.as_deref());
    draw::number_plate(
        canvas.surface(),
        &fonts,
        center - v(120.0),
        y,
        v(240.0),
        v(56.0),
        &registration.to_uppercase(),
        palette.plate,
        palette.plate_ink,
    );
    y += v(92.0);

    let title = vehicle
        .title()
        .map(|t| format::title_case(&t))
        .unwrap_or_else(|| format::PLACEHOLDER.to_string());
    draw::centered_text(canvas.surface(), &fonts, center, y, &title, Font::Bold, v(22.0), palette.ink);
    y += v(22.0);

    let subtitle: Vec<String> = [
        vehicle.year_of_manufacture.map(|year| year.to_string()),
        vehicle.colour.as_deref().map(format::title_case),
        vehicle.fuel_type.as_deref().map(format::title_case),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !subtitle.is_empty() {
        draw::centered_text(
            canvas.surface(),
            &fonts,
            center,
            y,
            &subtitle.join(" \u{00B7} "),
            Font::Regular,
            v(11.0),
            palette.muted,
        );
    }
    y += v(36.0);

    // Status badges.
    let mut badges = Vec::new();
    if let Some(status) = vehicle.mot_status.as_deref() {
        let ok = status.to_ascii_lowercase().contains("valid");
        badges.push(("MOT", status.to_string(), if ok { palette.good } else { palette.bad }));
    }
    if let Some(status) = vehicle.tax_status.as_deref() {
        let ok = status.eq_ignore_ascii_case("taxed") || status.eq_ignore_ascii_case("sorn");
        badges.push(("TAX", status.to_string(), if ok { palette.good } else { palette.bad }));
    }
    if let Some(score) = report.health_score.as_ref().and_then(|h| h.score) {
        badges.push(("HEALTH", format!("{}/100", score), palette.info));
    }
    if !badges.is_empty() {
        let gap = v(10.0);
        let built: Vec<Badge<'_>> = badges
            .iter()
            .map(|(label, value, color)| Badge {
                label,
                value,
                color: *color,
                size: v(9.0),
            })
            .collect();
        let total: f64 = built.iter().map(|b| b.width(&fonts)).sum::<f64>()
            + gap * (built.len() as f64 - 1.0);
        let mut x = center - total / 2.0;
        for b in &built {
            x += draw::badge(canvas.surface(), &fonts, x, y, b) + gap;
        }
    }
    y += v(48.0);

    // Generation date and a short note on what follows.
    if let Some(date) = report.generated_on.as_deref() {
        draw::centered_text(
            canvas.surface(),
            &fonts,
            center,
            y,
            &format!("Report generated {}", format::date(Some(date))),
            Font::Regular,
            v(NOTE_SIZE),
            palette.muted,
        );
    }
    y += v(16.0);
    draw::centered_text(
        canvas.surface(),
        &fonts,
        center,
        y,
        &format!("Prepared by {} \u{00B7} {}", brand.name, brand.website),
        Font::Regular,
        v(NOTE_SIZE),
        palette.muted,
    );

    canvas.new_page()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::model::Vehicle;
    use crate::surface::DrawOp;

    #[test]
    fn cover_always_ends_the_page() {
        let mut canvas = Canvas::new(RenderConfig::default());
        let cursor = canvas.start();
        let next = render(&mut canvas, &Report::default(), cursor);
        assert_eq!(next.page(), 1);
        assert_eq!(next.y(), canvas.page().page_top());
    }

    #[test]
    fn plate_shows_the_registration_or_a_dash() {
        let report = Report {
            vehicle: Some(Vehicle {
                registration: Some("ab12 cde".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let mut canvas = Canvas::new(RenderConfig::default());
        let cursor = canvas.start();
        render(&mut canvas, &report, cursor);
        let has = |s: &mut Canvas, needle: &str| {
            s.surface().pages()[0]
                .body
                .iter()
                .any(|op| matches!(op, DrawOp::Text { text, .. } if text == needle))
        };
        assert!(has(&mut canvas, "AB12 CDE"));

        let mut canvas = Canvas::new(RenderConfig::default());
        let cursor = canvas.start();
        render(&mut canvas, &Report::default(), cursor);
        assert!(has(&mut canvas, format::PLACEHOLDER));
    }

    fn full_cover() -> Report {
        Report {
            vehicle: Some(Vehicle {
                registration: Some("AB12 CDE".into()),
                make: Some("FORD".into()),
                colour: Some("BLUE".into()),
                mot_status: Some("Valid".into()),
                tax_status: Some("Taxed".into()),
                ..Default::default()
            }),
            generated_on: Some("2026-03-09".into()),
            ..Default::default()
        }
    }

    fn assert_cover_fits(config: RenderConfig) {
        let mut canvas = Canvas::new(config);
        let cursor = canvas.start();
        render(&mut canvas, &full_cover(), cursor);
        let usable = canvas.page().usable_height();
        for op in &canvas.surface().pages()[0].body {
            assert!(op.bottom() <= usable + 1e-6, "{op:?} reaches {}", op.bottom());
        }
    }

    #[test]
    fn cover_fits_above_the_footer() {
        assert_cover_fits(RenderConfig::default());
    }

    #[test]
    fn cover_shrinks_onto_a_short_page() {
        let config = RenderConfig::from_json(r#"{ "page": { "height": 420 } }"#).unwrap();
        assert!(config.page.usable_height() < config.page.margin_top + natural_height());
        assert_cover_fits(config);
    }

    #[test]
    fn cover_keeps_full_size_when_it_fits() {
        let mut canvas = Canvas::new(RenderConfig::default());
        let cursor = canvas.start();
        render(&mut canvas, &full_cover(), cursor);
        let title = canvas.surface().pages()[0].body.iter().find_map(|op| match op {
            DrawOp::Text { text, size, .. } if text == "Ford" => Some(*size),
            _ => None,
        });
        assert_eq!(title, Some(22.0));
    }
}
