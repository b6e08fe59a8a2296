use crate::format;
use crate::icons::Icon;
use crate::layout::{Canvas, Card, Cursor};
use crate::model::{Negotiation, Report};

use super::tiles;

fn has_content(n: &Negotiation) -> bool {
    n.opening_offer.is_some() || n.target_price.is_some() || n.walk_away.is_some() || !n.points.is_empty()
}

pub fn render(canvas: &mut Canvas, report: &Report, cursor: Cursor) -> Cursor {
    let Some(guide) = report.negotiation.as_ref().filter(|n| has_content(n)) else {
        return cursor;
    };
    let palette = canvas.palette();

    let cursor = canvas.section_header(cursor, "Negotiation guide", Icon::MessageSquare, 60.0);
    let mut cursor = cursor;
    if guide.opening_offer.is_some() || guide.target_price.is_some() || guide.walk_away.is_some() {
        cursor = tiles(
            canvas,
            cursor,
            &[
                ("Opening offer", format::money_or_dash(guide.opening_offer), palette.good),
                ("Target price", format::money_or_dash(guide.target_price), palette.brand),
                ("Walk away above", format::money_or_dash(guide.walk_away), palette.bad),
            ],
        );
    }
    if !guide.points.is_empty() {
        let card = Card::new(palette.info, "Talking points")
            .icon(Icon::MessageSquare)
            .lines(guide.points.iter().map(|p| format!("\u{2022} {p}")));
        cursor = canvas.card(cursor, &card);
    }
    canvas.section_gap(cursor)
}
