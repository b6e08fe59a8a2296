use crate::font::Font;
use crate::format;
use crate::icons::Icon;
use crate::layout::{Canvas, Cursor};
use crate::model::Report;

use super::note;

/// Always rendered, so every report ends with it.
pub fn render(canvas: &mut Canvas, report: &Report, cursor: Cursor) -> Cursor {
    let page = canvas.page();
    let sp = canvas.spacing();
    let ink = canvas.palette().ink;
    let paragraphs = canvas.brand().disclaimer.clone();

    let mut cursor = canvas.section_header(cursor, "Important information", Icon::Info, sp.line_height * 3.0);
    for paragraph in &paragraphs {
        cursor = canvas.paragraph(
            cursor,
            page.margin_left,
            page.content_width(),
            paragraph,
            Font::Regular,
            sp.body_size,
            ink,
        );
        cursor = cursor.advance(sp.card_gap);
    }

    let stamp = match report.generated_on.as_deref() {
        Some(date) => format!("Report generated on {}.", format::date(Some(date))),
        None => "Generation date not recorded.".to_string(),
    };
    let cursor = note(canvas, cursor, &stamp);
    canvas.section_gap(cursor)
}
