use crate::draw::{self, Badge};
use crate::font::Font;
use crate::icons::Icon;
use crate::layout::{Canvas, Cursor};
use crate::model::{HealthScore, Report, ScoreCategory};
use crate::style::Color;
use crate::surface::{DrawOp, Stroke};
use crate::text;

const PANEL_HEIGHT: f64 = 110.0;
const RING_RADIUS: f64 = 36.0;
const RING_WIDTH: f64 = 8.0;
const SUMMARY_LINES: usize = 4;

fn has_content(health: &HealthScore) -> bool {
    health.score.is_some() || health.summary.is_some() || !health.categories.is_empty()
}

/// Status colour for a score out of `max`.
fn score_color(canvas: &Canvas, score: u8, max: u8) -> Color {
    let palette = canvas.palette();
    let ratio = f64::from(score) / f64::from(max.max(1));
    if ratio >= 0.75 {
        palette.good
    } else if ratio >= 0.5 {
        palette.warn
    } else {
        palette.bad
    }
}

pub fn render(canvas: &mut Canvas, report: &Report, cursor: Cursor) -> Cursor {
    let Some(health) = report.health_score.as_ref().filter(|h| has_content(h)) else {
        return cursor;
    };

    let cursor = canvas.section_header(cursor, "Vehicle health score", Icon::Activity, PANEL_HEIGHT);
    let cursor = panel(canvas, health, cursor);
    let mut cursor = cursor;
    for category in &health.categories {
        cursor = category_row(canvas, category, cursor);
    }
    canvas.section_gap(cursor)
}

/// Score ring with the grade and summary beside it.
fn panel(canvas: &mut Canvas, health: &HealthScore, cursor: Cursor) -> Cursor {
    let cursor = canvas.check_page_break(cursor, PANEL_HEIGHT);
    let page = canvas.page();
    let palette = canvas.palette();
    let sp = canvas.spacing();
    let fonts = canvas.fonts();
    let y = cursor.y();
    let cx = page.margin_left + 10.0 + RING_RADIUS;
    let cy = y + 52.0;

    canvas.surface().draw(DrawOp::Circle {
        cx,
        cy,
        r: RING_RADIUS,
        fill: None,
        stroke: Some(Stroke::new(palette.border, RING_WIDTH)),
    });
    let score_text = match health.score {
        Some(score) => {
            let color = score_color(canvas, score, 100);
            let fraction = f64::from(score.min(100)) / 100.0;
            if let Some(d) = draw::gauge_path(cx, cy, RING_RADIUS, fraction) {
                canvas.path(&d, Stroke::new(color, RING_WIDTH));
            }
            score.to_string()
        }
        None => crate::format::PLACEHOLDER.to_string(),
    };
    draw::centered_text(canvas.surface(), &fonts, cx, cy + 6.0, &score_text, Font::Bold, 20.0, palette.ink);
    draw::centered_text(canvas.surface(), &fonts, cx, cy + 18.0, "out of 100", Font::Regular, 7.0, palette.muted);

    let text_x = cx + RING_RADIUS + 24.0;
    let text_width = page.margin_left + page.content_width() - text_x;
    let mut line_y = y + 14.0;
    if let Some(grade) = health.grade.as_deref() {
        let color = health
            .score
            .map(|s| score_color(canvas, s, 100))
            .unwrap_or(palette.info);
        let badge = Badge {
            label: "GRADE",
            value: grade,
            color,
            size: 9.0,
        };
        draw::badge(canvas.surface(), &fonts, text_x, line_y, &badge);
        line_y += badge.height() + 8.0;
    }

    if let Some(summary) = health.summary.as_deref() {
        let mut lines = text::wrap(&fonts, summary, Font::Regular, sp.body_size, text_width);
        if lines.len() > SUMMARY_LINES {
            lines.truncate(SUMMARY_LINES);
            if let Some(last) = lines.last_mut() {
                *last = text::fit(&fonts, &format!("{last}\u{2026}"), Font::Regular, sp.body_size, text_width);
            }
        }
        for line in lines {
            line_y += sp.line_height;
            draw::text(canvas.surface(), text_x, line_y, line, Font::Regular, sp.body_size, palette.ink);
        }
    }

    cursor.advance(PANEL_HEIGHT + sp.card_gap)
}

/// Name, "score/max", a meter and an optional note.
fn category_row(canvas: &mut Canvas, category: &ScoreCategory, cursor: Cursor) -> Cursor {
    let height = if category.note.is_some() { 36.0 } else { 26.0 };
    let cursor = canvas.check_page_break(cursor, height);
    let page = canvas.page();
    let palette = canvas.palette();
    let sp = canvas.spacing();
    let fonts = canvas.fonts();
    let left = page.margin_left;
    let width = page.content_width();
    let y = cursor.y();

    let max = category.max.unwrap_or(100);
    let (figure, fraction, color) = match category.score {
        Some(score) => (
            format!("{score}/{max}"),
            f64::from(score) / f64::from(max.max(1)),
            score_color(canvas, score, max),
        ),
        None => (crate::format::PLACEHOLDER.to_string(), 0.0, palette.muted),
    };

    let name = text::fit(&fonts, &category.name, Font::Bold, sp.body_size, width - 60.0);
    draw::text(canvas.surface(), left, y + 10.0, name, Font::Bold, sp.body_size, palette.ink);
    draw::right_text(canvas.surface(), &fonts, left + width, y + 10.0, &figure, Font::Bold, sp.body_size, color);
    draw::meter(canvas.surface(), left, y + 15.0, width, 6.0, fraction, color);
    if let Some(note) = category.note.as_deref() {
        let note = text::fit(&fonts, note, Font::Regular, sp.small_size, width);
        draw::text(canvas.surface(), left, y + 31.0, note, Font::Regular, sp.small_size, palette.muted);
    }
    cursor.advance(height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::path::PathCommand;

    fn report(score: Option<u8>) -> Report {
        Report {
            health_score: Some(HealthScore {
                score,
                grade: Some("B".into()),
                summary: Some("Generally sound with a few recurring advisories. ".repeat(12)),
                categories: vec![
                    ScoreCategory {
                        name: "MOT history".into(),
                        score: Some(18),
                        max: Some(25),
                        note: Some("Two failures in ten years".into()),
                    },
                    ScoreCategory {
                        name: "Mileage".into(),
                        score: None,
                        max: None,
                        note: None,
                    },
                ],
            }),
            ..Default::default()
        }
    }

    #[test]
    fn omitted_when_empty() {
        let mut canvas = Canvas::new(RenderConfig::default());
        let cursor = canvas.start();
        let empty = Report {
            health_score: Some(HealthScore::default()),
            ..Default::default()
        };
        assert_eq!(render(&mut canvas, &empty, cursor), cursor);
        assert_eq!(render(&mut canvas, &Report::default(), cursor), cursor);
    }

    #[test]
    fn ring_is_drawn_through_the_path_interpreter() {
        let mut canvas = Canvas::new(RenderConfig::default());
        let cursor = canvas.start();
        render(&mut canvas, &report(Some(75)), cursor);
        let arcs: Vec<&DrawOp> = canvas.surface().pages()[0]
            .body
            .iter()
            .filter(|op| matches!(op, DrawOp::Path { stroke, .. } if stroke.width == RING_WIDTH))
            .collect();
        assert_eq!(arcs.len(), 1);
        // Three quarters of a turn is three cubic segments.
        match arcs[0] {
            DrawOp::Path { commands, .. } => {
                let curves = commands
                    .iter()
                    .filter(|c| matches!(c, PathCommand::CurveTo(..)))
                    .count();
                assert_eq!(curves, 3);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn missing_score_draws_no_arc() {
        let mut canvas = Canvas::new(RenderConfig::default());
        let cursor = canvas.start();
        render(&mut canvas, &report(None), cursor);
        let body = &canvas.surface().pages()[0].body;
        assert!(!body
            .iter()
            .any(|op| matches!(op, DrawOp::Path { stroke, .. } if stroke.width == RING_WIDTH)));
        assert!(body
            .iter()
            .any(|op| matches!(op, DrawOp::Text { text, .. } if text == crate::format::PLACEHOLDER)));
    }

    #[test]
    fn long_summary_stays_inside_the_panel() {
        let mut canvas = Canvas::new(RenderConfig::default());
        let cursor = canvas.start();
        render(&mut canvas, &report(Some(40)), cursor);
        let sp = canvas.spacing();
        let panel_bottom = cursor.y() + sp.header_height + PANEL_HEIGHT;
        let summary: Vec<&DrawOp> = canvas.surface().pages()[0]
            .body
            .iter()
            .filter(|op| {
                matches!(op, DrawOp::Text { font: Font::Regular, size, .. } if *size == sp.body_size)
            })
            .collect();
        assert_eq!(summary.len(), SUMMARY_LINES);
        assert!(summary.iter().all(|op| op.bottom() <= panel_bottom));
    }
}
