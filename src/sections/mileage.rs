//! Odometer readings: the mileage table and the warnings derived from it.

use chrono::NaiveDate;

use crate::format;
use crate::icons::Icon;
use crate::layout::table::{Cell, Column, Table};
use crate::layout::{Canvas, Card, Cursor};
use crate::model::{MotTest, Report, TestResult};

use super::sorted_tests;

/// Longest interval between tests before it is called out.
const MAX_GAP_DAYS: i64 = 730;

fn is_km(unit: Option<&str>) -> bool {
    unit.map(|u| u.trim().to_ascii_lowercase().starts_with("km"))
        .unwrap_or(false)
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum MileageWarning {
    Decrease {
        from: (NaiveDate, u32),
        to: (NaiveDate, u32),
        unit: Option<String>,
    },
    Gap {
        from: NaiveDate,
        to: NaiveDate,
    },
}

/// Dated tests oldest first.
fn chronological(report: &Report) -> Vec<(NaiveDate, &MotTest)> {
    let mut dated: Vec<(NaiveDate, &MotTest)> = report
        .mot_tests
        .iter()
        .filter_map(|t| Some((format::parse_date(t.completed_date.as_deref()?)?, t)))
        .collect();
    dated.sort_by_key(|(date, _)| *date);
    dated
}

pub(crate) fn warnings(report: &Report) -> Vec<MileageWarning> {
    let dated = chronological(report);
    let mut out = Vec::new();

    for pair in dated.windows(2) {
        let (a_date, _) = pair[0];
        let (b_date, _) = pair[1];
        if (b_date - a_date).num_days() > MAX_GAP_DAYS {
            out.push(MileageWarning::Gap {
                from: a_date,
                to: b_date,
            });
        }
    }

    // Consecutive readings in different units are not compared.
    let readings: Vec<(NaiveDate, u32, &MotTest)> = dated
        .iter()
        .filter_map(|(d, t)| Some((*d, t.odometer_value?, *t)))
        .collect();
    for pair in readings.windows(2) {
        let (a_date, a_value, a) = pair[0];
        let (b_date, b_value, b) = pair[1];
        let same_unit = is_km(a.odometer_unit.as_deref()) == is_km(b.odometer_unit.as_deref());
        if same_unit && b_value < a_value {
            out.push(MileageWarning::Decrease {
                from: (a_date, a_value),
                to: (b_date, b_value),
                unit: b.odometer_unit.clone(),
            });
        }
    }
    out
}

fn day(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

fn warning_card(canvas: &Canvas, warning: &MileageWarning) -> Card {
    let palette = canvas.palette();
    match warning {
        MileageWarning::Decrease { from, to, unit } => Card::new(palette.bad, "Mileage went down")
            .icon(Icon::TrendingDown)
            .line(format!(
                "{} was recorded on {}, lower than the {} recorded on {}.",
                format::distance(to.1, unit.as_deref()),
                day(to.0),
                format::distance(from.1, unit.as_deref()),
                day(from.0),
            ))
            .line("This can indicate a replaced instrument cluster or a clocked odometer. Ask the seller for an explanation."),
        MileageWarning::Gap { from, to } => {
            let months = (*to - *from).num_days() / 30;
            Card::new(palette.warn, "Gap in MOT history")
                .icon(Icon::Calendar)
                .line(format!(
                    "No MOT test is recorded between {} and {} ({} months).",
                    day(*from),
                    day(*to),
                    months
                ))
                .line("The vehicle may have been off the road or kept in storage. Mileage over this period cannot be verified.")
        }
    }
}

/// Readings newest first with the change since the previous reading.
pub fn render_table(canvas: &mut Canvas, report: &Report, cursor: Cursor) -> Cursor {
    let tests: Vec<&MotTest> = sorted_tests(report)
        .into_iter()
        .filter(|t| t.odometer_value.is_some())
        .collect();
    if tests.is_empty() {
        return cursor;
    }
    let palette = canvas.palette();
    let row = canvas.spacing().row_height;

    let mut table = Table::new(vec![
        Column::new("Date", 2.0),
        Column::new("Mileage", 2.0).right(),
        Column::new("Change", 2.0).right(),
        Column::new("Result", 1.5),
    ]);
    for (i, test) in tests.iter().enumerate() {
        let value = test.odometer_value.unwrap_or_default();
        let unit = test.odometer_unit.as_deref();
        let change = match tests.get(i + 1) {
            Some(older) if is_km(older.odometer_unit.as_deref()) == is_km(unit) => {
                let previous = older.odometer_value.unwrap_or_default();
                if value >= previous {
                    Cell::from(format!("+{}", format::number(u64::from(value - previous))))
                } else {
                    Cell::colored(
                        format!("-{}", format::number(u64::from(previous - value))),
                        palette.bad,
                    )
                    .bold()
                }
            }
            _ => Cell::from(format::PLACEHOLDER),
        };
        let result = match test.test_result {
            Some(TestResult::Pass) => Cell::colored("Pass", palette.good),
            Some(TestResult::Fail) => Cell::colored("Fail", palette.bad),
            Some(TestResult::Unknown) | None => Cell::from(format::PLACEHOLDER),
        };
        table.row(vec![
            format::date(test.completed_date.as_deref()).into(),
            format::distance(value, unit).into(),
            change,
            result,
        ]);
    }

    let cursor = canvas.section_header(cursor, "Mileage history", Icon::Gauge, row * 2.0);
    let cursor = canvas.table(cursor, &table);
    canvas.section_gap(cursor)
}

/// Odometer decreases and long gaps between tests. With two or more dated
/// tests and nothing to flag, a single all-clear card is shown.
pub fn render_warnings(canvas: &mut Canvas, report: &Report, cursor: Cursor) -> Cursor {
    let found = warnings(report);
    let dated = chronological(report).len();
    if found.is_empty() && dated < 2 {
        return cursor;
    }

    let cards: Vec<Card> = if found.is_empty() {
        vec![Card::new(canvas.palette().good, "No mileage anomalies")
            .icon(Icon::CheckCircle)
            .line(format!(
                "Readings across {dated} MOT tests rise steadily with no long gaps between tests."
            ))]
    } else {
        found.iter().map(|w| warning_card(canvas, w)).collect()
    };

    let width = canvas.page().content_width();
    let first = canvas.measure_card(&cards[0], width);
    let mut cursor = canvas.section_header(cursor, "Mileage checks", Icon::AlertTriangle, first);
    for card in &cards {
        cursor = canvas.card(cursor, card);
    }
    canvas.section_gap(cursor)
}
