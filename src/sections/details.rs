use crate::format;
use crate::icons::Icon;
use crate::layout::{Canvas, Cursor};
use crate::model::{Report, Vehicle};

/// Registry facts as label/value pairs. Absent values show the placeholder
/// as long as at least one value is present.
fn facts(v: &Vehicle) -> Vec<(&'static str, Option<String>)> {
    vec![
        ("Registration", v.registration.as_ref().map(|r| r.to_uppercase())),
        ("Make", v.make.as_deref().map(format::title_case)),
        ("Model", v.model.as_deref().map(format::title_case)),
        ("Colour", v.colour.as_deref().map(format::title_case)),
        ("Fuel type", v.fuel_type.as_deref().map(format::title_case)),
        ("Year", v.year_of_manufacture.map(|y| y.to_string())),
        (
            "Engine",
            v.engine_capacity.map(|cc| format!("{} cc", format::number(cc as u64))),
        ),
        ("CO2 emissions", v.co2_emissions.map(|g| format!("{g} g/km"))),
        ("Euro status", v.euro_status.clone()),
        ("Body type", v.body_type.as_deref().map(format::title_case)),
        ("Transmission", v.transmission.as_deref().map(format::title_case)),
        ("First registered", v.first_registered.as_deref().map(|d| format::date(Some(d)))),
        ("Tax status", v.tax_status.clone()),
        ("Tax due", v.tax_due_date.as_deref().map(|d| format::date(Some(d)))),
        ("MOT status", v.mot_status.clone()),
        ("MOT expiry", v.mot_expiry_date.as_deref().map(|d| format::date(Some(d)))),
        (
            "Marked for export",
            v.marked_for_export
                .map(|e| if e { "Yes" } else { "No" }.to_string()),
        ),
        ("Last V5C issued", v.date_of_last_v5c.as_deref().map(|d| format::date(Some(d)))),
    ]
}

pub fn render(canvas: &mut Canvas, report: &Report, cursor: Cursor) -> Cursor {
    let Some(vehicle) = report.vehicle.as_ref() else {
        return cursor;
    };
    let facts = facts(vehicle);
    if facts.iter().all(|(_, v)| v.is_none()) {
        return cursor;
    }

    let pairs: Vec<(String, String)> = facts
        .into_iter()
        .map(|(label, value)| (label.to_string(), format::or_dash(value.as_deref())))
        .collect();
    let row = canvas.spacing().row_height;
    let cursor = canvas.section_header(cursor, "Vehicle details", Icon::Car, row * 2.0);
    let cursor = canvas.key_values(cursor, &pairs);
    canvas.section_gap(cursor)
}
