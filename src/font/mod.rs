//! # Font Management
//!
//! The report uses two of the 14 standard PDF fonts, Helvetica and
//! Helvetica-Bold. Neither needs embedding, so all we carry is their
//! advance widths for measuring and wrapping text.

pub mod metrics;

pub use metrics::StandardFontMetrics;

/// The two faces the report draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    /// The PDF base font name.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }

    /// Resource name used inside content streams (`/F0`, `/F1`).
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Regular => "F0",
            Font::Bold => "F1",
        }
    }

    pub fn metrics(&self) -> &'static StandardFontMetrics {
        match self {
            Font::Regular => &metrics::HELVETICA,
            Font::Bold => &metrics::HELVETICA_BOLD,
        }
    }
}

/// Text measurement shared by layout and drawing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontContext;

impl FontContext {
    pub fn new() -> Self {
        Self
    }

    /// Get the advance width of a single character in points.
    pub fn char_width(&self, ch: char, font: Font, font_size: f64) -> f64 {
        font.metrics().char_width(ch, font_size)
    }

    /// Measure the width of a string in points.
    pub fn measure_string(&self, text: &str, font: Font, font_size: f64) -> f64 {
        font.metrics().measure_string(text, font_size, 0.0)
    }
}
