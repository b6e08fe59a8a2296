use crate::format;
use crate::icons::Icon;
use crate::layout::table::{Cell, Column, Table};
use crate::layout::{Canvas, Cursor};
use crate::model::{Report, RunningCosts};

use super::{note, tiles};

/// The stated total, or the sum of the itemised figures when it is absent.
fn annual_total(costs: &RunningCosts) -> Option<f64> {
    costs.annual_total.or_else(|| {
        let known: Vec<f64> = costs.items.iter().filter_map(|i| i.annual).collect();
        (!known.is_empty()).then(|| known.iter().sum())
    })
}

pub fn render(canvas: &mut Canvas, report: &Report, cursor: Cursor) -> Cursor {
    let Some(costs) = report.running_costs.as_ref() else {
        return cursor;
    };
    let total = annual_total(costs);
    if total.is_none() && costs.items.is_empty() {
        return cursor;
    }
    let palette = canvas.palette();

    let cursor = canvas.section_header(cursor, "Running costs", Icon::Fuel, 60.0);
    let mut cursor = tiles(
        canvas,
        cursor,
        &[
            ("Estimated per year", format::money_or_dash(total), palette.brand),
            ("Per month", format::money_or_dash(total.map(|t| t / 12.0)), palette.info),
        ],
    );

    if !costs.items.is_empty() {
        let mut table = Table::new(vec![
            Column::new("Cost", 2.0),
            Column::new("Per year", 1.0).right(),
            Column::new("Per month", 1.0).right(),
            Column::new("Notes", 3.0),
        ]);
        for item in &costs.items {
            table.row(vec![
                Cell::from(format::or_dash(Some(item.label.as_str()))),
                format::money_or_dash(item.annual).into(),
                format::money_or_dash(item.annual.map(|a| a / 12.0)).into(),
                format::or_dash(item.note.as_deref()).into(),
            ]);
        }
        cursor = canvas.table(cursor, &table);
    }
    if let Some(assumptions) = costs.assumptions.as_deref() {
        cursor = note(canvas, cursor.advance(6.0), assumptions);
    }
    canvas.section_gap(cursor)
}
