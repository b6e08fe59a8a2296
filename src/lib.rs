//! # Vehicle Report
//!
//! Renders a vehicle history report as a fixed-size, multi-page PDF.
//!
//! The page is the unit of layout. Every section asks the layout engine for
//! room before it draws, so content is never sliced across a page boundary
//! after the fact: a card either fits where the cursor is, or the cursor
//! moves to the top of a fresh page first.
//!
//! ## Architecture
//!
//! ```text
//! Report (JSON)
//!       ↓
//!   [model]     - Report input, every field optional
//!       ↓
//!   [sections]  - One renderer per section, run in a fixed order
//!       ↓
//!   [layout]    - Cursor, page breaks, cards, columns, tables
//!       ↓
//!   [draw]      - Badges, plates, cards, meters, tiles
//!   [icons]     - Icon registry, drawn through [path]
//!       ↓
//!   [surface]   - Recorded draw ops per page, plus a footer layer
//!       ↓
//!   [pdf]       - Serialize to PDF bytes
//! ```
//!
//! Rendering cannot fail. A report with nothing in it still produces a
//! cover page and the closing disclaimer.

pub mod config;
pub mod draw;
pub mod error;
pub mod font;
pub mod format;
pub mod icons;
pub mod layout;
pub mod model;
pub mod path;
pub mod pdf;
pub mod sections;
pub mod style;
pub mod surface;
pub mod text;

pub use config::RenderConfig;
pub use error::ReportError;
pub use model::Report;
pub use sections::layout_report;

use pdf::{DocumentInfo, PdfWriter};

/// Render a report to PDF bytes.
pub fn render(report: &Report, config: &RenderConfig) -> Vec<u8> {
    let surface = layout_report(report, config);
    tracing::debug!(pages = surface.page_count(), "layout complete");
    PdfWriter::new().write(&surface, &document_info(report, config))
}

/// Render a report given as JSON, with the default configuration.
pub fn render_json(json: &str) -> Result<Vec<u8>, ReportError> {
    let report: Report = serde_json::from_str(json)?;
    Ok(render(&report, &RenderConfig::default()))
}

fn document_info(report: &Report, config: &RenderConfig) -> DocumentInfo {
    let vehicle = report.vehicle.as_ref();
    let title = match vehicle.and_then(|v| v.registration.as_deref()) {
        Some(reg) => format!("{} {}", config.brand.report_title, reg.to_uppercase()),
        None => config.brand.report_title.clone(),
    };
    DocumentInfo {
        title: Some(title),
        author: Some(config.brand.name.clone()),
        subject: vehicle
            .and_then(|v| v.title())
            .map(|t| format::title_case(&t)),
    }
}
