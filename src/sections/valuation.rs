use crate::format;
use crate::icons::Icon;
use crate::layout::{Canvas, Cursor};
use crate::model::{MarketSummary, Report, Valuation};

use super::{note, tiles};

fn has_content(v: &Valuation) -> bool {
    v.trade.is_some()
        || v.low.is_some()
        || v.mid.is_some()
        || v.high.is_some()
        || v.market.is_some()
}

fn market_pairs(market: &MarketSummary) -> Vec<(String, String)> {
    vec![
        (
            "Similar listings".to_string(),
            market
                .listings
                .map(|n| format::number(n.into()))
                .unwrap_or_else(|| format::PLACEHOLDER.to_string()),
        ),
        ("Average price".to_string(), format::money_or_dash(market.average_price)),
        (
            "Average mileage".to_string(),
            market
                .average_mileage
                .map(|m| format::distance(m, None))
                .unwrap_or_else(|| format::PLACEHOLDER.to_string()),
        ),
        (
            "Average days to sell".to_string(),
            market
                .average_days_to_sell
                .map(|d| d.to_string())
                .unwrap_or_else(|| format::PLACEHOLDER.to_string()),
        ),
    ]
}

pub fn render(canvas: &mut Canvas, report: &Report, cursor: Cursor) -> Cursor {
    let Some(valuation) = report.valuation.as_ref().filter(|v| has_content(v)) else {
        return cursor;
    };
    let palette = canvas.palette();

    let cursor = canvas.section_header(cursor, "Valuation", Icon::Pound, 60.0);
    let mut cursor = tiles(
        canvas,
        cursor,
        &[
            ("Trade-in", format::money_or_dash(valuation.trade), palette.muted),
            (
                "Private sale",
                format::money_range(valuation.low, valuation.high),
                palette.brand,
            ),
            ("Typical price", format::money_or_dash(valuation.mid), palette.good),
        ],
    );

    if let Some(confidence) = valuation.confidence.as_deref() {
        cursor = note(
            canvas,
            cursor,
            &format!("Confidence: {}", format::title_case(&confidence.to_uppercase())),
        );
    }
    if let Some(market) = valuation.market.as_ref() {
        cursor = canvas.key_values(cursor, &market_pairs(market));
    }
    if let Some(text) = valuation.note.as_deref() {
        cursor = note(canvas, cursor.advance(4.0), text);
    }
    canvas.section_gap(cursor)
}
