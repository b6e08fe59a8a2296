//! Key facts: short independent cards laid out two to a row.

use crate::format;
use crate::icons::Icon;
use crate::layout::{Canvas, Card, Cursor};
use crate::model::{ColourPopularity, Dimensions, Rarity, Report, RoadTax, SafetyRating, TyreSpec};

fn road_tax(canvas: &Canvas, tax: &RoadTax) -> Card {
    let mut card = Card::new(canvas.palette().brand, "Road tax")
        .icon(Icon::FileText)
        .line(format!("Band: {}", format::or_dash(tax.band.as_deref())))
        .line(format!("12 months: {}", format::money_or_dash(tax.annual)))
        .line(format!("6 months: {}", format::money_or_dash(tax.six_month)));
    if let Some(note) = tax.note.as_deref() {
        card = card.line(note);
    }
    card
}

fn safety(canvas: &Canvas, rating: &SafetyRating) -> Card {
    let stars = match rating.stars {
        Some(n) => format!("{} of 5 stars", n.min(5)),
        None => format::PLACEHOLDER.to_string(),
    };
    let pct = |v: Option<u8>| {
        v.map(|v| format::percent(f64::from(v)))
            .unwrap_or_else(|| format::PLACEHOLDER.to_string())
    };
    let mut card = Card::new(canvas.palette().good, "Euro NCAP safety")
        .icon(Icon::Star)
        .line(format!("Rating: {stars}"));
    if let Some(year) = rating.year_tested {
        card = card.line(format!("Tested in {year}"));
    }
    card.line(format!("Adult occupant: {}", pct(rating.adult_occupant)))
        .line(format!("Child occupant: {}", pct(rating.child_occupant)))
        .line(format!("Pedestrian: {}", pct(rating.pedestrian)))
        .line(format!("Safety assist: {}", pct(rating.safety_assist)))
}

fn rarity(canvas: &Canvas, rarity: &Rarity) -> Card {
    let count = |v: Option<u32>| {
        v.map(|n| format::number(n.into()))
            .unwrap_or_else(|| format::PLACEHOLDER.to_string())
    };
    let mut card = Card::new(canvas.palette().info, "Rarity").icon(Icon::Gem);
    if let Some(label) = rarity.label.as_deref() {
        card = card.line(label);
    }
    card.line(format!("Registered in the UK: {}", count(rarity.registered_count)))
        .line(format!("Licensed and on the road: {}", count(rarity.on_road)))
}

fn colour(canvas: &Canvas, popularity: &ColourPopularity) -> Card {
    let mut card = Card::new(canvas.palette().warn, "Colour popularity")
        .icon(Icon::Palette)
        .line(format!(
            "Colour: {}",
            popularity
                .colour
                .as_deref()
                .map(format::title_case)
                .unwrap_or_else(|| format::PLACEHOLDER.to_string())
        ));
    if let Some(share) = popularity.share_percent {
        card = card.line(format!("{} of this model are this colour", format::percent(share)));
    }
    if let Some(rank) = popularity.rank {
        card = card.line(format!("Ranked #{rank} by popularity"));
    }
    card
}

fn tyres(canvas: &Canvas, tyres: &TyreSpec) -> Card {
    Card::new(canvas.palette().muted, "Tyres")
        .icon(Icon::Tyre)
        .line(format!("Front: {}", format::or_dash(tyres.front.as_deref())))
        .line(format!("Rear: {}", format::or_dash(tyres.rear.as_deref())))
        .line(format!(
            "Pressures: {} front, {} rear",
            format::or_dash(tyres.pressure_front.as_deref()),
            format::or_dash(tyres.pressure_rear.as_deref())
        ))
}

fn dimensions(canvas: &Canvas, d: &Dimensions) -> Card {
    let mm = |v: Option<u32>| {
        v.map(|v| format!("{} mm", format::number(v.into())))
            .unwrap_or_else(|| format::PLACEHOLDER.to_string())
    };
    Card::new(canvas.palette().brand, "Dimensions")
        .icon(Icon::Ruler)
        .line(format!("Length: {}", mm(d.length_mm)))
        .line(format!("Width: {}", mm(d.width_mm)))
        .line(format!("Height: {}", mm(d.height_mm)))
        .line(format!("Wheelbase: {}", mm(d.wheelbase_mm)))
        .line(format!(
            "Kerb weight: {}",
            d.kerb_weight_kg
                .map(|kg| format!("{} kg", format::number(kg.into())))
                .unwrap_or_else(|| format::PLACEHOLDER.to_string())
        ))
        .line(format!(
            "Boot: {}",
            d.boot_litres
                .map(|l| format!("{l} litres"))
                .unwrap_or_else(|| format::PLACEHOLDER.to_string())
        ))
}

fn cards(canvas: &Canvas, report: &Report) -> Vec<Card> {
    let mut cards = Vec::new();
    if let Some(tax) = &report.road_tax {
        cards.push(road_tax(canvas, tax));
    }
    if let Some(rating) = &report.safety_rating {
        cards.push(safety(canvas, rating));
    }
    if let Some(r) = &report.rarity {
        cards.push(rarity(canvas, r));
    }
    if let Some(c) = &report.colour_popularity {
        cards.push(colour(canvas, c));
    }
    if let Some(t) = &report.tyres {
        cards.push(tyres(canvas, t));
    }
    if let Some(d) = &report.dimensions {
        cards.push(dimensions(canvas, d));
    }
    cards
}

pub fn render(canvas: &mut Canvas, report: &Report, cursor: Cursor) -> Cursor {
    let cards = cards(canvas, report);
    let Some(first) = cards.first() else {
        return cursor;
    };
    let page = canvas.page();
    let width = (page.content_width() - canvas.spacing().column_gap) / 2.0;
    let first_height = canvas.measure_card(first, width);

    let cursor = canvas.section_header(cursor, "Key facts", Icon::Info, first_height);
    let cursor = canvas.place_in_columns(cursor, &cards);
    canvas.section_gap(cursor)
}
