use std::collections::{BTreeSet, HashMap};

use chrono::Datelike;

use crate::format;
use crate::icons::Icon;
use crate::layout::table::{Cell, Column, Table};
use crate::layout::{Canvas, Cursor};
use crate::model::{ItemKind, Report};

use super::note;

/// An advisory seen in more than one test.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Recurring {
    pub text: String,
    pub count: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
}

/// Lowercase, whitespace collapsed, trailing punctuation removed.
fn normalise(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_end_matches(|c: char| c.is_ascii_punctuation())
        .to_lowercase()
}

/// Advisories recorded in two or more distinct tests, most frequent first.
pub(crate) fn recurring(report: &Report) -> Vec<Recurring> {
    struct Seen {
        text: String,
        tests: BTreeSet<usize>,
        years: BTreeSet<i32>,
    }

    let mut seen: HashMap<String, Seen> = HashMap::new();
    for (index, test) in report.mot_tests.iter().enumerate() {
        let year = test
            .completed_date
            .as_deref()
            .and_then(format::parse_date)
            .map(|d| d.year());
        for item in test.items.iter().filter(|i| i.kind == ItemKind::Advisory) {
            let key = normalise(&item.text);
            if key.is_empty() {
                continue;
            }
            let entry = seen.entry(key).or_insert_with(|| Seen {
                text: item.text.split_whitespace().collect::<Vec<_>>().join(" "),
                tests: BTreeSet::new(),
                years: BTreeSet::new(),
            });
            entry.tests.insert(index);
            entry.years.extend(year);
        }
    }

    let mut out: Vec<Recurring> = seen
        .into_values()
        .filter(|s| s.tests.len() >= 2)
        .map(|s| Recurring {
            text: s.text,
            count: s.tests.len(),
            first_year: s.years.first().copied(),
            last_year: s.years.last().copied(),
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.text.cmp(&b.text)));
    out
}

pub fn render(canvas: &mut Canvas, report: &Report, cursor: Cursor) -> Cursor {
    let items = recurring(report);
    if items.is_empty() {
        return cursor;
    }
    let row = canvas.spacing().row_height;
    let year = |y: Option<i32>| {
        y.map(|y| y.to_string())
            .unwrap_or_else(|| format::PLACEHOLDER.to_string())
    };

    let mut table = Table::new(vec![
        Column::new("Advisory", 6.0),
        Column::new("Times", 1.0).right(),
        Column::new("First", 1.2).right(),
        Column::new("Last", 1.2).right(),
    ]);
    for item in &items {
        table.row(vec![
            item.text.as_str().into(),
            Cell::from(item.count.to_string()).bold(),
            year(item.first_year).into(),
            year(item.last_year).into(),
        ]);
    }

    let cursor = canvas.section_header(cursor, "Recurring advisories", Icon::Wrench, row * 2.0);
    let cursor = note(
        canvas,
        cursor,
        "Advisories noted at more than one MOT often point to wear that has not been put right.",
    );
    let cursor = canvas.table(cursor.advance(4.0), &table);
    canvas.section_gap(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MotItem, MotTest};

    fn test(date: &str, advisories: &[&str]) -> MotTest {
        MotTest {
            completed_date: Some(date.into()),
            items: advisories
                .iter()
                .map(|t| MotItem {
                    text: t.to_string(),
                    kind: ItemKind::Advisory,
                    dangerous: false,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn normalisation_ignores_case_spacing_and_full_stops() {
        assert_eq!(normalise("  Brake pipe  CORRODED. "), "brake pipe corroded");
        assert_eq!(normalise("..."), "");
    }

    #[test]
    fn counts_distinct_tests_only() {
        let report = Report {
            mot_tests: vec![
                test("2019-01-01", &["Tyre worn", "tyre worn."]),
                test("2021-01-01", &["Oil leak"]),
            ],
            ..Default::default()
        };
        assert!(recurring(&report).is_empty());
    }

    #[test]
    fn most_frequent_first_with_year_span() {
        let report = Report {
            mot_tests: vec![
                test("2018-03-01", &["Oil leak", "Tyre worn"]),
                test("2020-03-01", &["oil leak.", "Tyre worn", "Wiper blade"]),
                test("2022-03-01", &["Tyre worn"]),
                test("2023-03-01", &["OIL LEAK", "Wiper blade"]),
            ],
            ..Default::default()
        };
        let found = recurring(&report);
        let summary: Vec<(&str, usize)> = found.iter().map(|r| (r.text.as_str(), r.count)).collect();
        assert_eq!(summary, vec![("Oil leak", 3), ("Tyre worn", 3), ("Wiper blade", 2)]);
        assert_eq!(found[0].first_year, Some(2018));
        assert_eq!(found[0].last_year, Some(2023));
    }

    #[test]
    fn defects_do_not_count() {
        let mut t1 = test("2020-01-01", &[]);
        let mut t2 = test("2021-01-01", &[]);
        for t in [&mut t1, &mut t2] {
            t.items.push(MotItem {
                text: "Headlamp aim".into(),
                kind: ItemKind::Defect,
                dangerous: false,
            });
        }
        let report = Report {
            mot_tests: vec![t1, t2],
            ..Default::default()
        };
        assert!(recurring(&report).is_empty());
    }
}
