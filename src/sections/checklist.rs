use crate::draw;
use crate::font::Font;
use crate::icons::Icon;
use crate::layout::{Canvas, Cursor};
use crate::model::{Report, TrafficLight};
use crate::surface::{DrawOp, Stroke};
use crate::text;

use super::advisories;

const BOX: f64 = 10.0;

const BASE: &[&str] = &[
    "Check the V5C logbook matches the registration, VIN and seller's address",
    "Compare the VIN on the windscreen, door pillar and logbook",
    "Look over the service history with receipts and stamps",
    "Confirm the mileage on the dashboard against the last MOT reading",
    "Start the engine from cold and listen for knocks or rattles",
    "Check every tyre for tread depth, cracking and uneven wear",
    "Test all lights, wipers, windows and the air conditioning",
    "Take a test drive of at least 20 minutes including a faster road",
];

/// Checks specific to this vehicle, from recurring advisories and the
/// amber or red MOT readiness risks.
pub(crate) fn vehicle_items(report: &Report) -> Vec<String> {
    let mut items: Vec<String> = advisories::recurring(report)
        .into_iter()
        .map(|r| format!("Ask whether \"{}\" has been fixed (noted at {} MOTs)", r.text, r.count))
        .collect();
    if let Some(readiness) = report.mot_readiness.as_ref() {
        for risk in &readiness.risks {
            if matches!(risk.likelihood, Some(TrafficLight::Amber | TrafficLight::Red)) {
                let item = match risk.description.as_deref() {
                    Some(d) => format!("Inspect {}: {}", risk.category.to_lowercase(), d),
                    None => format!("Inspect {} before the next MOT", risk.category.to_lowercase()),
                };
                items.push(item);
            }
        }
    }
    items
}

fn subheading(canvas: &mut Canvas, cursor: Cursor, title: &str) -> Cursor {
    let sp = canvas.spacing();
    let ink = canvas.palette().ink;
    let x = canvas.page().margin_left;
    let height = sp.card_title_height + 4.0;
    // Keep the heading with its first row.
    let cursor = canvas.check_page_break(cursor, height + sp.line_height + 6.0);
    draw::text(canvas.surface(), x, cursor.y() + sp.card_title_size, title, Font::Bold, sp.card_title_size, ink);
    cursor.advance(height)
}

fn row(canvas: &mut Canvas, cursor: Cursor, item: &str) -> Cursor {
    let page = canvas.page();
    let sp = canvas.spacing();
    let palette = canvas.palette();
    let fonts = canvas.fonts();
    let x = page.margin_left;
    let text_x = x + BOX + 8.0;
    let lines = text::wrap(&fonts, item, Font::Regular, sp.body_size, page.content_width() - BOX - 8.0);
    let height = lines.len().max(1) as f64 * sp.line_height + 6.0;

    let cursor = canvas.check_page_break(cursor, height);
    let y = cursor.y();
    canvas.surface().draw(DrawOp::Rect {
        x,
        y: y + 1.0,
        width: BOX,
        height: BOX,
        radius: 2.0,
        fill: None,
        stroke: Some(Stroke::new(palette.muted, 1.0)),
    });
    for (i, line) in lines.into_iter().enumerate() {
        draw::text(
            canvas.surface(),
            text_x,
            y + sp.body_size + i as f64 * sp.line_height,
            line,
            Font::Regular,
            sp.body_size,
            palette.ink,
        );
    }
    cursor.advance(height)
}

pub fn render(canvas: &mut Canvas, report: &Report, cursor: Cursor) -> Cursor {
    if report.mot_tests.is_empty() && report.mot_readiness.is_none() {
        return cursor;
    }
    let sp = canvas.spacing();
    let mut cursor = canvas.section_header(cursor, "Buyer's checklist", Icon::ListChecks, sp.line_height * 3.0);

    cursor = subheading(canvas, cursor, "Before you buy");
    for item in BASE {
        cursor = row(canvas, cursor, item);
    }

    let specific = vehicle_items(report);
    if !specific.is_empty() {
        cursor = subheading(canvas, cursor.advance(6.0), "For this vehicle");
        for item in &specific {
            cursor = row(canvas, cursor, item);
        }
    }
    canvas.section_gap(cursor)
}
