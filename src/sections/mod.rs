//! # Page Renderers
//!
//! One module per report section. Every renderer has the same shape,
//! `fn(&mut Canvas, &Report, Cursor) -> Cursor`, and returns the cursor it
//! was given when the report has nothing for it to show.
//!
//! [`layout_report`] runs them in a fixed order and then stamps the footer
//! of every page, which has to wait until the page count is known.

mod advisories;
mod checklist;
mod costs;
mod cover;
mod details;
mod disclaimer;
mod emissions;
mod health;
mod history;
mod insights;
mod mileage;
mod negotiation;
mod readiness;
mod recalls;
mod valuation;

use crate::config::RenderConfig;
use crate::draw;
use crate::font::Font;
use crate::format;
use crate::layout::{Canvas, Cursor};
use crate::model::{MotTest, Report, TrafficLight};
use crate::style::Color;
use crate::surface::{DrawOp, Stroke, Surface};

type Renderer = fn(&mut Canvas, &Report, Cursor) -> Cursor;

/// Everything after the cover, in document order.
const SECTIONS: &[(&str, Renderer)] = &[
    ("vehicle details", details::render),
    ("health score", health::render),
    ("mot readiness", readiness::render),
    ("recalls", recalls::render),
    ("emissions zones", emissions::render),
    ("valuation", valuation::render),
    ("running costs", costs::render),
    ("negotiation", negotiation::render),
    ("key facts", insights::render),
    ("mileage", mileage::render_table),
    ("mot history", history::render),
    ("mileage warnings", mileage::render_warnings),
    ("recurring advisories", advisories::render),
    ("checklists", checklist::render),
    ("disclaimer", disclaimer::render),
];

/// Lay the whole report out onto pages, footers included.
pub fn layout_report(report: &Report, config: &RenderConfig) -> Surface {
    let mut canvas = Canvas::new(config.clone());
    let mut cursor = canvas.start();
    cursor = cover::render(&mut canvas, report, cursor);

    for (name, render) in SECTIONS {
        let next = render(&mut canvas, report, cursor);
        if next == cursor {
            tracing::debug!(section = name, "section omitted");
        } else {
            tracing::debug!(section = name, page = next.page(), "section rendered");
        }
        cursor = next;
    }

    stamp_footers(&mut canvas);
    canvas.into_surface()
}

/// Draw "Page X of N" and the branding into every page's footer band.
fn stamp_footers(canvas: &mut Canvas) {
    let page = canvas.page();
    let palette = canvas.palette();
    let size = canvas.spacing().small_size;
    let fonts = canvas.fonts();
    let brand = canvas.brand().name.clone();
    let website = canvas.brand().website.clone();
    let total = canvas.page_count();

    let rule_y = page.usable_height() + 10.0;
    let baseline = rule_y + 16.0;
    let left = page.margin_left;
    let right = page.width - page.margin_right;

    for index in 0..total {
        let label = format!("Page {} of {}", index + 1, total);
        let ops = [
            DrawOp::Line {
                x1: left,
                y1: rule_y,
                x2: right,
                y2: rule_y,
                stroke: Stroke::new(palette.border, 0.75),
            },
            DrawOp::Text {
                x: left,
                y: baseline,
                text: brand.clone(),
                font: Font::Bold,
                size,
                color: palette.brand,
            },
            DrawOp::Text {
                x: (left + right - fonts.measure_string(&website, Font::Regular, size)) / 2.0,
                y: baseline,
                text: website.clone(),
                font: Font::Regular,
                size,
                color: palette.muted,
            },
            DrawOp::Text {
                x: right - fonts.measure_string(&label, Font::Regular, size),
                y: baseline,
                text: label,
                font: Font::Regular,
                size,
                color: palette.muted,
            },
        ];
        let surface = canvas.surface();
        for op in ops {
            surface.draw_footer(index, op);
        }
    }
}

/// MOT tests newest first. Tests without a readable date keep their input
/// order after all dated ones.
pub(crate) fn sorted_tests(report: &Report) -> Vec<&MotTest> {
    let mut tests: Vec<&MotTest> = report.mot_tests.iter().collect();
    tests.sort_by_key(|t| {
        std::cmp::Reverse(t.completed_date.as_deref().and_then(format::parse_date))
    });
    tests
}

pub(crate) fn traffic_color(canvas: &Canvas, light: TrafficLight) -> Color {
    let palette = canvas.palette();
    match light {
        TrafficLight::Green => palette.good,
        TrafficLight::Amber => palette.warn,
        TrafficLight::Red => palette.bad,
    }
}

/// Muted small print across the content width.
pub(crate) fn note(canvas: &mut Canvas, cursor: Cursor, content: &str) -> Cursor {
    let page = canvas.page();
    let sp = canvas.spacing();
    let muted = canvas.palette().muted;
    canvas.paragraph(
        cursor,
        page.margin_left,
        page.content_width(),
        content,
        Font::Regular,
        sp.small_size,
        muted,
    )
}

/// A row of equal-width tiles across the content width.
pub(crate) fn tiles(canvas: &mut Canvas, cursor: Cursor, tiles: &[(&str, String, Color)]) -> Cursor {
    if tiles.is_empty() {
        return cursor;
    }
    let page = canvas.page();
    let border = canvas.palette().border;
    let gap = canvas.spacing().column_gap;
    let height = 52.0;
    let cursor = canvas.check_page_break(cursor, height);
    let n = tiles.len() as f64;
    let width = (page.content_width() - gap * (n - 1.0)) / n;

    for (i, (label, value, color)) in tiles.iter().enumerate() {
        let x = page.margin_left + i as f64 * (width + gap);
        draw::tile(canvas.surface(), x, cursor.y(), width, height, label, value, *color, border);
    }
    cursor.advance(height + canvas.spacing().card_gap)
}
