//! # Icon Registry
//!
//! Every icon in the report is a list of stroked shapes on a 24x24 grid.
//! Outlines are written as path data and go through the interpreter;
//! simple circles, lines and rectangles map straight onto surface
//! primitives. The table is a `match`, so adding an icon without shapes
//! fails to compile.

pub mod render;

pub use render::IconRenderer;

/// The unit grid icons are authored on.
pub const GRID: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Path(&'static str),
    Circle { cx: f64, cy: f64, r: f64 },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Rect { x: f64, y: f64, w: f64, h: f64, rx: f64 },
}

use Shape::{Circle, Line, Path, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Activity,
    AlertTriangle,
    Calendar,
    Car,
    CheckCircle,
    Clock,
    FileText,
    Fuel,
    Gauge,
    Gem,
    Info,
    Leaf,
    ListChecks,
    MessageSquare,
    Palette,
    Pound,
    Ruler,
    Shield,
    Star,
    TrendingDown,
    TrendingUp,
    Tyre,
    Wind,
    Wrench,
    XCircle,
}

impl Icon {
    pub const ALL: [Icon; 25] = [
        Icon::Activity,
        Icon::AlertTriangle,
        Icon::Calendar,
        Icon::Car,
        Icon::CheckCircle,
        Icon::Clock,
        Icon::FileText,
        Icon::Fuel,
        Icon::Gauge,
        Icon::Gem,
        Icon::Info,
        Icon::Leaf,
        Icon::ListChecks,
        Icon::MessageSquare,
        Icon::Palette,
        Icon::Pound,
        Icon::Ruler,
        Icon::Shield,
        Icon::Star,
        Icon::TrendingDown,
        Icon::TrendingUp,
        Icon::Tyre,
        Icon::Wind,
        Icon::Wrench,
        Icon::XCircle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Icon::Activity => "activity",
            Icon::AlertTriangle => "alert-triangle",
            Icon::Calendar => "calendar",
            Icon::Car => "car",
            Icon::CheckCircle => "check-circle",
            Icon::Clock => "clock",
            Icon::FileText => "file-text",
            Icon::Fuel => "fuel",
            Icon::Gauge => "gauge",
            Icon::Gem => "gem",
            Icon::Info => "info",
            Icon::Leaf => "leaf",
            Icon::ListChecks => "list-checks",
            Icon::MessageSquare => "message-square",
            Icon::Palette => "palette",
            Icon::Pound => "pound",
            Icon::Ruler => "ruler",
            Icon::Shield => "shield",
            Icon::Star => "star",
            Icon::TrendingDown => "trending-down",
            Icon::TrendingUp => "trending-up",
            Icon::Tyre => "tyre",
            Icon::Wind => "wind",
            Icon::Wrench => "wrench",
            Icon::XCircle => "x-circle",
        }
    }

    pub fn shapes(&self) -> &'static [Shape] {
        match self {
            Icon::Activity => &[Path("M22 12h-4l-3 9L9 3l-3 9H2")],
            Icon::AlertTriangle => &[
                Path("m21.73 18-8-14a2 2 0 0 0-3.48 0l-8 14A2 2 0 0 0 4 21h16a2 2 0 0 0 1.73-3Z"),
                Path("M12 9v4"),
                Path("M12 17h.01"),
            ],
            Icon::Calendar => &[
                Rect { x: 3.0, y: 4.0, w: 18.0, h: 18.0, rx: 2.0 },
                Path("M16 2v4"),
                Path("M8 2v4"),
                Path("M3 10h18"),
            ],
            Icon::Car => &[
                Path("M19 17h2c.6 0 1-.4 1-1v-3c0-.9-.7-1.7-1.5-1.9C18.7 10.6 16 10 16 10s-1.3-1.4-2.2-2.3c-.5-.4-1.1-.7-1.8-.7H5c-.6 0-1.1.4-1.4.9l-1.4 2.9A3.7 3.7 0 0 0 2 12v4c0 .6.4 1 1 1h2"),
                Circle { cx: 7.0, cy: 17.0, r: 2.0 },
                Path("M9 17h6"),
                Circle { cx: 17.0, cy: 17.0, r: 2.0 },
            ],
            Icon::CheckCircle => &[Circle { cx: 12.0, cy: 12.0, r: 10.0 }, Path("m9 12 2 2 4-4")],
            Icon::Clock => &[Circle { cx: 12.0, cy: 12.0, r: 10.0 }, Path("M12 6v6l4 2")],
            Icon::FileText => &[
                Path("M15 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V7Z"),
                Path("M14 2v4a2 2 0 0 0 2 2h4"),
                Path("M10 9H8"),
                Path("M16 13H8"),
                Path("M16 17H8"),
            ],
            Icon::Fuel => &[
                Line { x1: 3.0, y1: 22.0, x2: 15.0, y2: 22.0 },
                Line { x1: 4.0, y1: 9.0, x2: 14.0, y2: 9.0 },
                Path("M14 22V4a2 2 0 0 0-2-2H6a2 2 0 0 0-2 2v18"),
                Path("M14 13h2a2 2 0 0 1 2 2v2a2 2 0 0 0 4 0V9.83a2 2 0 0 0-.59-1.42L18 5"),
            ],
            Icon::Gauge => &[Path("m12 14 4-4"), Path("M3.34 19a10 10 0 1 1 17.32 0")],
            Icon::Gem => &[
                Path("M6 3h12l4 6-10 13L2 9Z"),
                Path("M11 3 8 9l4 13 4-13-3-6"),
                Path("M2 9h20"),
            ],
            Icon::Info => &[
                Circle { cx: 12.0, cy: 12.0, r: 10.0 },
                Path("M12 16v-4"),
                Path("M12 8h.01"),
            ],
            Icon::Leaf => &[
                Path("M11 20A7 7 0 0 1 9.8 6.1C15.5 5 17 4.48 19 2c1 2 2 4.18 2 8 0 5.5-4.78 10-10 10Z"),
                Path("M2 21c0-3 1.85-5.36 5.08-6C9.5 14.52 12 13 13 12"),
            ],
            Icon::ListChecks => &[
                Path("m3 17 2 2 4-4"),
                Path("m3 7 2 2 4-4"),
                Path("M13 6h8"),
                Path("M13 12h8"),
                Path("M13 18h8"),
            ],
            Icon::MessageSquare => {
                &[Path("M21 15a2 2 0 0 1-2 2H7l-4 4V5a2 2 0 0 1 2-2h14a2 2 0 0 1 2 2z")]
            }
            Icon::Palette => &[
                Circle { cx: 13.5, cy: 6.5, r: 0.5 },
                Circle { cx: 17.5, cy: 10.5, r: 0.5 },
                Circle { cx: 8.5, cy: 7.5, r: 0.5 },
                Circle { cx: 6.5, cy: 12.5, r: 0.5 },
                Path("M12 2C6.5 2 2 6.5 2 12s4.5 10 10 10c.93 0 1.65-.75 1.65-1.69 0-.44-.18-.84-.44-1.13-.29-.29-.44-.65-.44-1.13a1.64 1.64 0 0 1 1.67-1.67h2c3.05 0 5.55-2.5 5.55-5.55C21.97 6.01 17.46 2 12 2z"),
            ],
            Icon::Pound => &[
                Path("M18 7c0-5.333-8-5.333-8 0"),
                Path("M10 7v14"),
                Path("M6 21h12"),
                Path("M6 13h10"),
            ],
            Icon::Ruler => &[
                Path("M21.3 15.3a2.4 2.4 0 0 1 0 3.4l-2.6 2.6a2.4 2.4 0 0 1-3.4 0L2.7 8.7a2.41 2.41 0 0 1 0-3.4l2.6-2.6a2.41 2.41 0 0 1 3.4 0Z"),
                Path("m14.5 12.5 2-2"),
                Path("m11.5 9.5 2-2"),
                Path("m8.5 6.5 2-2"),
                Path("m17.5 15.5 2-2"),
            ],
            Icon::Shield => &[Path("M20 13c0 5-3.5 7.5-7.66 8.95a1 1 0 0 1-.67-.01C7.5 20.5 4 18 4 13V6a1 1 0 0 1 1-1c2 0 4.5-1.2 6.24-2.72a1.17 1.17 0 0 1 1.52 0C14.51 3.81 17 5 19 5a1 1 0 0 1 1 1z")],
            Icon::Star => &[Path("M12 2l3.09 6.26L22 9.27l-5 4.87 1.18 6.88L12 17.77l-6.18 3.25L7 14.14 2 9.27l6.91-1.01L12 2z")],
            Icon::TrendingDown => &[Path("M22 17 13.5 8.5 8.5 13.5 2 7"), Path("M16 17h6v-6")],
            Icon::TrendingUp => &[Path("M22 7 13.5 15.5 8.5 10.5 2 17"), Path("M16 7h6v6")],
            Icon::Tyre => &[
                Circle { cx: 12.0, cy: 12.0, r: 10.0 },
                Circle { cx: 12.0, cy: 12.0, r: 4.0 },
                Path("M12 2v6"),
                Path("M12 16v6"),
                Path("M2 12h6"),
                Path("M16 12h6"),
            ],
            Icon::Wind => &[
                Path("M2 8q2.5-3 5 0t5 0 5 0 5 0"),
                Path("M2 14q2.5-3 5 0t5 0 5 0 5 0"),
                Path("M2 20q2.5-3 5 0t5 0"),
            ],
            Icon::Wrench => &[Path("M14.7 6.3a1 1 0 0 0 0 1.4l1.6 1.6a1 1 0 0 0 1.4 0l3.77-3.77a6 6 0 0 1-7.94 7.94l-6.91 6.91a2.12 2.12 0 0 1-3-3l6.91-6.91a6 6 0 0 1 7.94-7.94l-3.76 3.76z")],
            Icon::XCircle => &[
                Circle { cx: 12.0, cy: 12.0, r: 10.0 },
                Path("m15 9-6 6"),
                Path("m9 9 6 6"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{interpret, PathCommand};

    #[test]
    fn names_are_unique() {
        let mut names: Vec<&str> = Icon::ALL.iter().map(|icon| icon.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Icon::ALL.len());
    }

    #[test]
    fn every_outline_interprets_cleanly() {
        for icon in Icon::ALL {
            for shape in icon.shapes() {
                if let Shape::Path(d) = shape {
                    let out = interpret(d);
                    assert_eq!(out.error, None, "{} {d}", icon.name());
                    assert!(!out.commands.is_empty(), "{}", icon.name());
                }
            }
        }
    }

    #[test]
    fn outlines_stay_near_the_grid() {
        // Control points may overshoot a little, endpoints may not.
        for icon in Icon::ALL {
            for shape in icon.shapes() {
                let Shape::Path(d) = shape else { continue };
                for cmd in interpret(d).commands {
                    let end = match cmd {
                        PathCommand::MoveTo(x, y) | PathCommand::LineTo(x, y) => (x, y),
                        PathCommand::CurveTo(_, _, _, _, x, y) => (x, y),
                        PathCommand::ClosePath => continue,
                    };
                    assert!(
                        (0.0..=GRID).contains(&end.0) && (0.0..=GRID).contains(&end.1),
                        "{} leaves the grid at {end:?}",
                        icon.name()
                    );
                }
            }
        }
    }
}
