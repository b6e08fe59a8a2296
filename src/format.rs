//! Display formatting for report values.
//!
//! Every scalar the renderer prints goes through one of these helpers, so a
//! missing value is always the same placeholder glyph and never an empty
//! string.

use chrono::NaiveDate;

/// Rendered in place of any absent value.
pub const PLACEHOLDER: &str = "\u{2014}";

pub fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// `12345.6` -> `"£12,346"`.
pub fn money(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}\u{00A3}{}", sign, group_thousands(rounded.abs() as u64))
}

pub fn money_or_dash(value: Option<f64>) -> String {
    value.map(money).unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// `£120 – £300`, collapsing to one figure when both bounds agree.
pub fn money_range(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(a), Some(b)) if (a - b).abs() < 0.5 => money(a),
        (Some(a), Some(b)) => format!("{} \u{2013} {}", money(a), money(b)),
        (Some(a), None) => format!("from {}", money(a)),
        (None, Some(b)) => format!("up to {}", money(b)),
        (None, None) => PLACEHOLDER.to_string(),
    }
}

pub fn number(value: u64) -> String {
    group_thousands(value)
}

/// `45123, Some("km")` -> `"45,123 km"`; miles when the unit is absent.
pub fn distance(value: u32, unit: Option<&str>) -> String {
    let unit = match unit.map(|u| u.trim().to_ascii_lowercase()) {
        Some(u) if u.starts_with("km") => "km",
        _ => "mi",
    };
    format!("{} {}", group_thousands(value as u64), unit)
}

pub fn percent(value: f64) -> String {
    if (value - value.round()).abs() < 0.05 {
        format!("{:.0}%", value)
    } else {
        format!("{:.1}%", value)
    }
}

/// Parse the date part of an ISO date or date-time string.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// `"2023-04-01"` -> `"1 Apr 2023"`. Unparseable input is shown as given.
pub fn date(value: Option<&str>) -> String {
    match value {
        Some(raw) => match parse_date(raw) {
            Some(d) => d.format("%-d %b %Y").to_string(),
            None => or_dash(Some(raw)),
        },
        None => PLACEHOLDER.to_string(),
    }
}

/// Capitalise an all-caps registry value: `"PETROL"` -> `"Petrol"`.
/// Mixed-case input is left alone.
pub fn title_case(value: &str) -> String {
    if value.chars().any(|c| c.is_lowercase()) {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len());
    let mut word_start = true;
    for ch in value.chars() {
        if word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        word_start = !ch.is_alphanumeric();
    }
    out
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
