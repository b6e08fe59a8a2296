use crate::path::PathCache;
use crate::style::Color;
use crate::surface::{DrawOp, Stroke, Surface};

use super::{Icon, Shape, GRID};

/// Draws registry icons at any size. Owns the interpreted-path cache, so
/// one renderer should live for the whole document.
#[derive(Debug)]
pub struct IconRenderer {
    paths: PathCache,
    stroke_width: f64,
}

impl IconRenderer {
    /// `stroke_width` is in grid units and scales with the icon.
    pub fn new(stroke_width: f64) -> Self {
        Self {
            paths: PathCache::new(),
            stroke_width,
        }
    }

    /// Draw `icon` with its top-left corner at (x, y), `size` points square.
    pub fn draw(&self, surface: &mut Surface, icon: Icon, x: f64, y: f64, size: f64, color: Color) {
        let scale = size / GRID;
        let stroke = Stroke::new(color, self.stroke_width * scale);

        for shape in icon.shapes() {
            let op = match *shape {
                Shape::Path(d) => {
                    let commands: Vec<_> = self
                        .paths
                        .get(d)
                        .iter()
                        .map(|c| c.transformed(scale, x, y))
                        .collect();
                    if commands.is_empty() {
                        tracing::debug!(icon = icon.name(), "icon path draws nothing");
                        continue;
                    }
                    DrawOp::Path { commands, stroke }
                }
                Shape::Circle { cx, cy, r } => DrawOp::Circle {
                    cx: x + cx * scale,
                    cy: y + cy * scale,
                    r: r * scale,
                    fill: None,
                    stroke: Some(stroke),
                },
                Shape::Line { x1, y1, x2, y2 } => DrawOp::Line {
                    x1: x + x1 * scale,
                    y1: y + y1 * scale,
                    x2: x + x2 * scale,
                    y2: y + y2 * scale,
                    stroke,
                },
                Shape::Rect { x: rx0, y: ry0, w, h, rx } => DrawOp::Rect {
                    x: x + rx0 * scale,
                    y: y + ry0 * scale,
                    width: w * scale,
                    height: h * scale,
                    radius: rx * scale,
                    fill: None,
                    stroke: Some(stroke),
                },
            };
            surface.draw(op);
        }
    }

    /// The interpreted-path cache, shared with non-icon path drawing.
    pub fn paths(&self) -> &PathCache {
        &self.paths
    }
}
