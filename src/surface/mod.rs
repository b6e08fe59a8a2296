//! # Drawing Surface
//!
//! An append-only list of pages, each holding the draw operations emitted
//! for it in order. Coordinates are in points with the origin at the top
//! left of the page and y growing downward; the PDF writer flips them.
//!
//! Body content only ever lands on the newest page. Footers live in a
//! separate layer that is written once, after every page exists, because
//! each one needs the final page count.

use crate::font::Font;
use crate::path::PathCommand;
use crate::style::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A rectangle, rounded when `radius > 0`.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Stroke,
    },
    /// A path in page coordinates, stroked with round caps and joins.
    Path {
        commands: Vec<PathCommand>,
        stroke: Stroke,
    },
    /// One line of text; `y` is the baseline.
    Text {
        x: f64,
        y: f64,
        text: String,
        font: Font,
        size: f64,
        color: Color,
    },
}

impl DrawOp {
    /// Lowest y the operation's geometry reaches. For paths this is taken
    /// over the control points, which bound the curve.
    pub fn bottom(&self) -> f64 {
        match self {
            DrawOp::Rect { y, height, .. } => y + height,
            DrawOp::Circle { cy, r, .. } => cy + r,
            DrawOp::Line { y1, y2, .. } => y1.max(*y2),
            DrawOp::Path { commands, .. } => commands
                .iter()
                .filter_map(|c| match *c {
                    PathCommand::MoveTo(_, y) | PathCommand::LineTo(_, y) => Some(y),
                    PathCommand::CurveTo(_, y1, _, y2, _, y) => Some(y1.max(y2).max(y)),
                    PathCommand::ClosePath => None,
                })
                .fold(f64::NEG_INFINITY, f64::max),
            DrawOp::Text { y, size, .. } => y + descent(*size),
        }
    }
}

/// Space below the baseline reserved for descenders.
pub fn descent(size: f64) -> f64 {
    size * 0.25
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub background: Color,
    pub body: Vec<DrawOp>,
    pub footer: Vec<DrawOp>,
}

#[derive(Debug, Clone)]
pub struct Surface {
    width: f64,
    height: f64,
    pages: Vec<Page>,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            pages: Vec::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Append a blank page and return its index.
    pub fn add_page(&mut self, background: Color) -> usize {
        self.pages.push(Page {
            background,
            body: Vec::new(),
            footer: Vec::new(),
        });
        self.pages.len() - 1
    }

    /// Paint onto the newest page.
    pub fn draw(&mut self, op: DrawOp) {
        match self.pages.last_mut() {
            Some(page) => page.body.push(op),
            None => tracing::warn!("draw call before the first page was created"),
        }
    }

    /// Paint into the footer layer of an existing page.
    pub fn draw_footer(&mut self, index: usize, op: DrawOp) {
        match self.pages.get_mut(index) {
            Some(page) => page.footer.push(op),
            None => tracing::warn!(index, "footer for a page that does not exist"),
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
