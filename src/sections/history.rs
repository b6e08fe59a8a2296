//! MOT history as a vertical timeline: one card per test, newest first,
//! hung off a rail with a coloured node per card.

use crate::format;
use crate::icons::Icon;
use crate::layout::{Canvas, Card, Cursor, Fit};
use crate::model::{ItemKind, MotItem, MotTest, Report, TestResult};
use crate::style::Color;
use crate::surface::{DrawOp, Stroke};

use super::sorted_tests;

const RAIL_WIDTH: f64 = 22.0;
const NODE_RADIUS: f64 = 5.0;

fn item_line(item: &MotItem) -> String {
    let text = format::or_dash(Some(&item.text));
    let label = match (item.kind, item.dangerous) {
        (_, true) => "Dangerous",
        (ItemKind::Advisory, false) => "Advisory",
        (ItemKind::Defect, false) => "Defect",
        (ItemKind::Comment, false) => "Note",
        (ItemKind::Unknown, false) => return text,
    };
    format!("{label}: {text}")
}

pub(crate) fn test_card(canvas: &Canvas, test: &MotTest) -> Card {
    let palette = canvas.palette();
    let (accent, result) = match test.test_result {
        Some(TestResult::Pass) => (palette.good, "Pass"),
        Some(TestResult::Fail) => (palette.bad, "Fail"),
        Some(TestResult::Unknown) | None => (palette.muted, format::PLACEHOLDER),
    };
    let mileage = test
        .odometer_value
        .map(|v| format::distance(v, test.odometer_unit.as_deref()))
        .unwrap_or_else(|| format::PLACEHOLDER.to_string());

    let mut card = Card::new(
        accent,
        format!("{} \u{00B7} {}", format::date(test.completed_date.as_deref()), result),
    )
    .line(format!(
        "Mileage: {} \u{00B7} Test number: {}",
        mileage,
        format::or_dash(test.test_number.as_deref())
    ));
    if test.expiry_date.is_some() {
        card = card.line(format!("Expires: {}", format::date(test.expiry_date.as_deref())));
    }
    card.lines(test.items.iter().map(item_line))
}

pub fn render(canvas: &mut Canvas, report: &Report, cursor: Cursor) -> Cursor {
    let tests = sorted_tests(report);
    if tests.is_empty() {
        return cursor;
    }
    let page = canvas.page();
    let sp = canvas.spacing();
    let rail = page.margin_left + NODE_RADIUS + 2.0;
    let x = page.margin_left + RAIL_WIDTH;
    let width = page.content_width() - RAIL_WIDTH;
    let rail_color = canvas.palette().border;

    let cards: Vec<Card> = tests.iter().map(|t| test_card(canvas, t)).collect();
    let first = canvas.measure_card(&cards[0], width);
    let mut cursor = canvas.section_header(cursor, "MOT history", Icon::Clock, first);

    for card in &cards {
        let height = canvas.measure_card(card, width);
        cursor = canvas.check_page_break(cursor, height);
        let top = cursor.y();

        // The rail never runs past the usable area of the current page.
        let rail_end = (top + height + sp.card_gap).min(page.usable_height());
        canvas.surface().draw(DrawOp::Line {
            x1: rail,
            y1: top,
            x2: rail,
            y2: rail_end,
            stroke: Stroke::new(rail_color, 2.0),
        });
        canvas.surface().draw(DrawOp::Circle {
            cx: rail,
            cy: top + sp.card_padding + NODE_RADIUS,
            r: NODE_RADIUS,
            fill: Some(card.accent),
            stroke: Some(Stroke::new(Color::WHITE, 1.5)),
        });

        let (next, _) = canvas.draw_card(cursor, x, width, card, Fit::Reserved);
        cursor = next.advance(sp.card_gap);
    }
    canvas.section_gap(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;

    fn test_with_advisories(year: u32, n: usize) -> MotTest {
        MotTest {
            completed_date: Some(format!("{year}-05-01")),
            test_result: Some(if year % 3 == 0 { TestResult::Fail } else { TestResult::Pass }),
            odometer_value: Some(year * 10),
            test_number: Some(format!("T{year}")),
            items: (0..n)
                .map(|i| MotItem {
                    text: format!("Advisory {i}: tyre worn close to legal limit on the outer edge"),
                    kind: ItemKind::Advisory,
                    dangerous: false,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn dangerous_items_are_labelled_as_such() {
        let item = MotItem {
            text: " Brake hose leaking ".into(),
            kind: ItemKind::Defect,
            dangerous: true,
        };
        assert_eq!(item_line(&item), "Dangerous: Brake hose leaking");
    }

    #[test]
    fn untyped_items_show_their_text_and_empty_text_a_placeholder() {
        let untyped = MotItem {
            text: "Tyre worn".into(),
            ..Default::default()
        };
        assert_eq!(item_line(&untyped), "Tyre worn");
        let empty = MotItem {
            kind: ItemKind::Advisory,
            ..Default::default()
        };
        assert_eq!(item_line(&empty), format!("Advisory: {}", format::PLACEHOLDER));
    }

    #[test]
    fn unrecognised_result_is_a_placeholder() {
        let canvas = Canvas::new(RenderConfig::default());
        let test = MotTest {
            completed_date: Some("2021-05-01".into()),
            test_result: Some(TestResult::Unknown),
            ..Default::default()
        };
        let card = test_card(&canvas, &test);
        assert_eq!(card.title, format!("1 May 2021 \u{00B7} {}", format::PLACEHOLDER));
        assert_eq!(card.accent, canvas.palette().muted);
    }

    #[test]
    fn card_title_carries_date_and_result() {
        let canvas = Canvas::new(RenderConfig::default());
        let card = test_card(&canvas, &test_with_advisories(2021, 1));
        assert_eq!(card.title, "1 May 2021 \u{00B7} Pass");
        assert_eq!(card.accent, canvas.palette().good);
        assert_eq!(card.lines.len(), 2);
    }

    #[test]
    fn long_history_breaks_only_between_cards() {
        let report = Report {
            mot_tests: (1980..2020).map(|y| test_with_advisories(y, 3)).collect(),
            ..Default::default()
        };
        let mut canvas = Canvas::new(RenderConfig::default());
        let cursor = canvas.start();
        let after = render(&mut canvas, &report, cursor);
        assert!(after.page() >= 2);

        let usable = canvas.page().usable_height();
        let radius = canvas.spacing().card_radius;
        let mut cards = 0;
        for page in canvas.surface().pages() {
            for op in &page.body {
                assert!(op.bottom() <= usable + 1e-6);
                if matches!(op, DrawOp::Rect { radius: r, stroke: Some(_), .. } if *r == radius) {
                    cards += 1;
                }
            }
        }
        assert_eq!(cards, 40);
    }

    #[test]
    fn oversized_first_test_moves_with_its_header() {
        let report = Report {
            mot_tests: vec![test_with_advisories(2020, 300)],
            ..Default::default()
        };
        let mut canvas = Canvas::new(RenderConfig::default());
        let cursor = canvas.start();
        let cursor = canvas.card(cursor, &Card::new(Color::BLACK, "Earlier section").line("x"));
        render(&mut canvas, &report, cursor);

        assert_eq!(canvas.page_count(), 2);
        let radius = canvas.spacing().card_radius;
        let usable = canvas.page().usable_height();
        let second = &canvas.surface().pages()[1].body;
        assert!(second
            .iter()
            .any(|op| matches!(op, DrawOp::Text { text, .. } if text == "MOT history")));
        assert!(second
            .iter()
            .any(|op| matches!(op, DrawOp::Rect { radius: r, stroke: Some(_), .. } if *r == radius)));
        assert!(second.iter().all(|op| op.bottom() <= usable + 1e-6));
    }

    #[test]
    fn one_node_per_test() {
        let report = Report {
            mot_tests: vec![test_with_advisories(2020, 0), test_with_advisories(2021, 2)],
            ..Default::default()
        };
        let mut canvas = Canvas::new(RenderConfig::default());
        let cursor = canvas.start();
        render(&mut canvas, &report, cursor);
        let nodes = canvas.surface().pages()[0]
            .body
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { r, .. } if *r == NODE_RADIUS))
            .count();
        assert_eq!(nodes, 2);
    }
}
