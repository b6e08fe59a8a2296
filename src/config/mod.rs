//! # Render Configuration
//!
//! Every number and color the renderer uses lives here, imported once by
//! the layout engine and the section renderers. The geometry is expressed in
//! PDF points (1/72 inch) with the origin at the top-left of the page and y
//! growing downward; the PDF writer flips to bottom-left on output.
//!
//! All structs are `serde(default)`, so an options file only needs to name
//! the values it overrides:
//!
//! ```json
//! { "brand": { "name": "PlateCheck" }, "page": { "footerBand": 50 } }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::style::Color;

/// The complete render configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    pub page: PageGeometry,
    pub spacing: Spacing,
    pub palette: Palette,
    pub brand: Branding,
}

impl RenderConfig {
    /// Parse a (possibly partial) options document.
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Page size and the fixed bands reserved on every page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    /// Height of the footer band stamped by the footer pass. Body content
    /// never extends into it.
    pub footer_band: f64,
    /// Extra space below the top margin on pages created by a page break.
    pub post_break_padding: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        // A4
        Self {
            width: 595.28,
            height: 841.89,
            margin_left: 40.0,
            margin_right: 40.0,
            margin_top: 40.0,
            footer_band: 44.0,
            post_break_padding: 10.0,
        }
    }
}

impl PageGeometry {
    /// The lowest y any body content may reach.
    pub fn usable_height(&self) -> f64 {
        self.height - self.footer_band
    }

    /// Where the cursor lands on a freshly broken page.
    pub fn page_top(&self) -> f64 {
        self.margin_top + self.post_break_padding
    }

    /// The tallest card that still fits on an empty page.
    pub fn max_card_height(&self) -> f64 {
        self.usable_height() - self.page_top()
    }

    pub fn content_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Spacing {
    /// Vertical gap left after every section.
    pub section_gap: f64,
    /// Title size of section headers.
    pub header_size: f64,
    /// Space a section header occupies including its divider.
    pub header_height: f64,
    pub body_size: f64,
    pub small_size: f64,
    pub line_height: f64,
    pub card_padding: f64,
    pub card_title_size: f64,
    pub card_title_height: f64,
    /// Width of the colored bar on the left edge of a card.
    pub accent_width: f64,
    /// Horizontal space reserved for the accent bar before text starts.
    pub accent_padding: f64,
    pub card_radius: f64,
    pub card_gap: f64,
    pub column_gap: f64,
    pub row_height: f64,
    pub stroke_width: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            section_gap: 18.0,
            header_size: 14.0,
            header_height: 30.0,
            body_size: 9.5,
            small_size: 8.0,
            line_height: 13.0,
            card_padding: 9.0,
            card_title_size: 10.5,
            card_title_height: 16.0,
            accent_width: 4.0,
            accent_padding: 16.0,
            card_radius: 5.0,
            card_gap: 8.0,
            column_gap: 12.0,
            row_height: 18.0,
            stroke_width: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Palette {
    pub brand: Color,
    pub ink: Color,
    pub muted: Color,
    pub border: Color,
    pub card_background: Color,
    pub page_background: Color,
    pub table_stripe: Color,
    pub good: Color,
    pub warn: Color,
    pub bad: Color,
    pub info: Color,
    pub plate: Color,
    pub plate_ink: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            brand: Color::hex("#1d4ed8"),
            ink: Color::hex("#111827"),
            muted: Color::hex("#6b7280"),
            border: Color::hex("#e5e7eb"),
            card_background: Color::hex("#ffffff"),
            page_background: Color::hex("#f9fafb"),
            table_stripe: Color::hex("#f3f4f6"),
            good: Color::hex("#16a34a"),
            warn: Color::hex("#d97706"),
            bad: Color::hex("#dc2626"),
            info: Color::hex("#2563eb"),
            plate: Color::hex("#facc15"),
            plate_ink: Color::hex("#111111"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Branding {
    pub name: String,
    pub website: String,
    pub report_title: String,
    /// Appended as the last line of a card whose content was truncated.
    pub continuation: String,
    pub disclaimer: Vec<String>,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            name: "VehicleCheck".to_string(),
            website: "www.vehiclecheck.example".to_string(),
            report_title: "Vehicle History Report".to_string(),
            continuation: "See full details in your online report".to_string(),
            disclaimer: vec![
                "This report is compiled from official MOT records, vehicle registration data and third-party market sources available at the time of generation. We do not inspect the vehicle and cannot guarantee that every record is complete or free from error.".to_string(),
                "Valuations, running-cost estimates, MOT readiness scores and negotiation guidance are statistical estimates intended to help you make an informed decision. They are not offers to buy or sell and should not replace an independent inspection by a qualified mechanic.".to_string(),
                "Always check the V5C registration document, service history and the seller's identity before paying. If anything in this report does not match what you are told, ask questions before you buy.".to_string(),
            ],
        }
    }
}
