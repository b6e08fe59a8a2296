use crate::draw::{self, Badge};
use crate::font::Font;
use crate::format;
use crate::icons::Icon;
use crate::layout::{Canvas, Card, Cursor};
use crate::model::{MotReadiness, Report, RiskItem, TrafficLight};

use super::traffic_color;

fn status_label(light: TrafficLight) -> &'static str {
    match light {
        TrafficLight::Green => "Low risk",
        TrafficLight::Amber => "Some risk",
        TrafficLight::Red => "High risk",
    }
}

fn likelihood_label(light: TrafficLight) -> &'static str {
    match light {
        TrafficLight::Green => "Unlikely",
        TrafficLight::Amber => "Possible",
        TrafficLight::Red => "Likely",
    }
}

fn has_content(r: &MotReadiness) -> bool {
    r.status.is_some() || r.score.is_some() || r.summary.is_some() || !r.risks.is_empty()
}

pub(crate) fn risk_card(canvas: &Canvas, risk: &RiskItem) -> Card {
    let accent = risk
        .likelihood
        .map(|l| traffic_color(canvas, l))
        .unwrap_or(canvas.palette().muted);
    let mut card = Card::new(accent, format::or_dash(Some(risk.category.as_str()))).icon(Icon::Wrench);
    if let Some(description) = risk.description.as_deref() {
        card = card.line(description);
    }
    card.line(format!(
        "Likely cost: {}",
        format::money_range(risk.cost_min, risk.cost_max)
    ))
    .line(format!(
        "Chance of failure: {}",
        risk.likelihood.map(likelihood_label).unwrap_or(format::PLACEHOLDER)
    ))
}

pub fn render(canvas: &mut Canvas, report: &Report, cursor: Cursor) -> Cursor {
    let Some(readiness) = report.mot_readiness.as_ref().filter(|r| has_content(r)) else {
        return cursor;
    };
    let page = canvas.page();
    let sp = canvas.spacing();
    let palette = canvas.palette();
    let fonts = canvas.fonts();

    let cards: Vec<Card> = readiness.risks.iter().map(|r| risk_card(canvas, r)).collect();
    let has_lead = readiness.status.is_some() || readiness.score.is_some() || readiness.summary.is_some();
    let first = match cards.first() {
        Some(card) if !has_lead => canvas.measure_card(card, page.content_width()),
        _ => 40.0,
    };
    let mut cursor = canvas.section_header(cursor, "MOT readiness", Icon::ListChecks, first);

    if readiness.status.is_some() || readiness.score.is_some() {
        let color = readiness
            .status
            .map(|s| traffic_color(canvas, s))
            .unwrap_or(palette.info);
        let label = readiness.status.map(status_label).unwrap_or(format::PLACEHOLDER);
        let score = readiness
            .score
            .map(|s| format!("{s}/100"))
            .unwrap_or_else(|| format::PLACEHOLDER.to_string());
        let badge = Badge {
            label: "NEXT MOT",
            value: label,
            color,
            size: 9.0,
        };
        cursor = canvas.check_page_break(cursor, badge.height());
        let width = draw::badge(canvas.surface(), &fonts, page.margin_left, cursor.y(), &badge);
        draw::text(
            canvas.surface(),
            page.margin_left + width + 12.0,
            cursor.y() + badge.height() / 2.0 + sp.body_size * 0.35,
            format!("Readiness score {score}"),
            Font::Bold,
            sp.body_size,
            palette.ink,
        );
        cursor = cursor.advance(badge.height() + sp.card_gap);
    }

    if let Some(summary) = readiness.summary.as_deref() {
        cursor = canvas.paragraph(
            cursor,
            page.margin_left,
            page.content_width(),
            summary,
            Font::Regular,
            sp.body_size,
            palette.ink,
        );
        cursor = cursor.advance(sp.card_gap);
    }

    for card in &cards {
        cursor = canvas.card(cursor, card);
    }
    canvas.section_gap(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::surface::DrawOp;

    fn risk(category: &str, likelihood: Option<TrafficLight>) -> RiskItem {
        RiskItem {
            category: category.into(),
            description: Some("Brake discs corroded".into()),
            likelihood,
            cost_min: Some(120.0),
            cost_max: Some(300.0),
        }
    }

    #[test]
    fn accent_follows_likelihood() {
        let canvas = Canvas::new(RenderConfig::default());
        let palette = canvas.palette();
        assert_eq!(risk_card(&canvas, &risk("Brakes", Some(TrafficLight::Red))).accent, palette.bad);
        assert_eq!(risk_card(&canvas, &risk("Tyres", Some(TrafficLight::Amber))).accent, palette.warn);
        assert_eq!(risk_card(&canvas, &risk("Lights", None)).accent, palette.muted);
    }

    #[test]
    fn risk_card_lines() {
        let canvas = Canvas::new(RenderConfig::default());
        let card = risk_card(&canvas, &risk("Brakes", Some(TrafficLight::Red)));
        assert_eq!(
            card.lines,
            vec![
                "Brake discs corroded".to_string(),
                "Likely cost: \u{00A3}120 \u{2013} \u{00A3}300".to_string(),
                "Chance of failure: Likely".to_string(),
            ]
        );
    }

    #[test]
    fn renders_status_and_one_card_per_risk() {
        let report = Report {
            mot_readiness: Some(MotReadiness {
                status: Some(TrafficLight::Amber),
                score: Some(64),
                summary: Some("Two areas need attention before the next test.".into()),
                risks: vec![risk("Brakes", Some(TrafficLight::Red)), risk("Tyres", None)],
            }),
            ..Default::default()
        };
        let mut canvas = Canvas::new(RenderConfig::default());
        let cursor = canvas.start();
        render(&mut canvas, &report, cursor);
        let radius = canvas.spacing().card_radius;
        let body = &canvas.surface().pages()[0].body;
        let cards = body
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { radius: r, stroke: Some(_), .. } if *r == radius))
            .count();
        assert_eq!(cards, 2);
        assert!(body
            .iter()
            .any(|op| matches!(op, DrawOp::Text { text, .. } if text == "Some risk")));
        assert!(body
            .iter()
            .any(|op| matches!(op, DrawOp::Text { text, .. } if text == "Readiness score 64/100")));
    }

    #[test]
    fn omitted_when_empty() {
        let report = Report {
            mot_readiness: Some(MotReadiness::default()),
            ..Default::default()
        };
        let mut canvas = Canvas::new(RenderConfig::default());
        let cursor = canvas.start();
        assert_eq!(render(&mut canvas, &report, cursor), cursor);
    }
}
