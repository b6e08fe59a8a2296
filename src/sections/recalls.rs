use crate::format;
use crate::icons::Icon;
use crate::layout::{Canvas, Card, Cursor};
use crate::model::{Recall, Report};

fn recall_card(canvas: &Canvas, recall: &Recall) -> Card {
    let palette = canvas.palette();
    // Unknown completion counts as outstanding.
    let outstanding = recall.outstanding.unwrap_or(true);
    let accent = if outstanding { palette.bad } else { palette.good };
    let title = recall.title.as_deref().unwrap_or("Manufacturer recall");

    let mut card = Card::new(accent, title).icon(Icon::AlertTriangle);
    if let Some(description) = recall.description.as_deref() {
        card = card.line(description);
    }
    if let Some(remedy) = recall.remedy.as_deref() {
        card = card.line(format!("Remedy: {remedy}"));
    }
    card.line(format!(
        "Issued {} \u{00B7} Ref {} \u{00B7} {}",
        format::date(recall.date.as_deref()),
        format::or_dash(recall.reference.as_deref()),
        if outstanding { "Outstanding" } else { "Completed" },
    ))
}

pub fn render(canvas: &mut Canvas, report: &Report, cursor: Cursor) -> Cursor {
    let Some(recalls) = report.recalls.as_ref() else {
        return cursor;
    };
    let cards: Vec<Card> = if recalls.is_empty() {
        vec![Card::new(canvas.palette().good, "No recalls found")
            .icon(Icon::CheckCircle)
            .line("No manufacturer safety recalls are recorded for this vehicle.")]
    } else {
        recalls.iter().map(|r| recall_card(canvas, r)).collect()
    };

    let first = canvas.measure_card(&cards[0], canvas.page().content_width());
    let mut cursor = canvas.section_header(cursor, "Safety recalls", Icon::AlertTriangle, first);
    for card in &cards {
        cursor = canvas.card(cursor, card);
    }
    canvas.section_gap(cursor)
}
