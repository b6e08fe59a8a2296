use crate::draw::{self, Badge};
use crate::font::Font;
use crate::format;
use crate::icons::Icon;
use crate::layout::table::{Cell, Column, Table};
use crate::layout::{Canvas, Cursor};
use crate::model::{ComplianceStatus, Report};

fn status_label(status: ComplianceStatus) -> &'static str {
    match status {
        ComplianceStatus::Compliant => "Compliant",
        ComplianceStatus::NonCompliant => "Not compliant",
        ComplianceStatus::Exempt => "Exempt",
        ComplianceStatus::Unknown => "Unknown",
    }
}

pub fn render(canvas: &mut Canvas, report: &Report, cursor: Cursor) -> Cursor {
    let Some(emissions) = report.emissions_zones.as_ref() else {
        return cursor;
    };
    if emissions.status.is_none() && emissions.summary.is_none() && emissions.zones.is_empty() {
        return cursor;
    }
    let page = canvas.page();
    let sp = canvas.spacing();
    let palette = canvas.palette();
    let fonts = canvas.fonts();

    let mut cursor = canvas.section_header(cursor, "Clean air zones", Icon::Leaf, 40.0);

    if let Some(status) = emissions.status {
        let color = match status {
            ComplianceStatus::Compliant | ComplianceStatus::Exempt => palette.good,
            ComplianceStatus::NonCompliant => palette.bad,
            ComplianceStatus::Unknown => palette.muted,
        };
        let badge = Badge {
            label: "ULEZ / CAZ",
            value: status_label(status),
            color,
            size: 9.0,
        };
        cursor = canvas.check_page_break(cursor, badge.height());
        draw::badge(canvas.surface(), &fonts, page.margin_left, cursor.y(), &badge);
        cursor = cursor.advance(badge.height() + sp.card_gap);
    }

    if let Some(summary) = emissions.summary.as_deref() {
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

    if !emissions.zones.is_empty() {
        let mut table = Table::new(vec![
            Column::new("Zone", 3.0),
            Column::new("Status", 2.0),
            Column::new("Daily charge", 1.5).right(),
        ]);
        for zone in &emissions.zones {
            let status = match zone.compliant {
                Some(true) => Cell::colored("Compliant", palette.good),
                Some(false) => Cell::colored("Charge applies", palette.bad),
                None => Cell::from(format::PLACEHOLDER),
            };
            let charge = match (zone.compliant, zone.daily_charge) {
                (Some(true), _) => "None".to_string(),
                (_, charge) => format::money_or_dash(charge),
            };
            table.row(vec![Cell::from(format::or_dash(Some(zone.name.as_str()))), status, charge.into()]);
        }
        cursor = canvas.table(cursor, &table);
    }
    canvas.section_gap(cursor)
}
