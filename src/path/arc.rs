//! Elliptical arc to cubic Bézier conversion.
//!
//! Follows the endpoint-to-center conversion of the SVG implementation
//! notes (F.6.5 / F.6.6), then approximates the arc with one cubic per
//! quarter turn or less using the `k = 4/3 * tan(Δ/4)` control distance.

use std::f64::consts::{FRAC_PI_2, PI};

/// One cubic segment: first control point, second control point, endpoint.
pub type CubicSegment = [f64; 6];

/// An arc as written in path data: from the current point to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub rx: f64,
    pub ry: f64,
    /// x-axis rotation in degrees.
    pub rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

/// Convert one elliptical arc into cubic segments.
///
/// A zero radius collapses to one straight "curve" whose control points
/// sit on the two endpoints. Coincident endpoints produce no segments.
pub fn arc_to_cubics(arc: &ArcParams) -> Vec<CubicSegment> {
    let (x0, y0) = arc.from;
    let (x1, y1) = arc.to;

    if x0 == x1 && y0 == y1 {
        return Vec::new();
    }

    let mut rx = arc.rx.abs();
    let mut ry = arc.ry.abs();
    if rx == 0.0 || ry == 0.0 {
        return vec![[x0, y0, x1, y1, x1, y1]];
    }

    let (sin_phi, cos_phi) = arc.rotation.to_radians().sin_cos();

    // Endpoints in the ellipse frame, relative to the chord midpoint.
    let dx2 = (x0 - x1) / 2.0;
    let dy2 = (y0 - y1) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    // Scale radii up uniformly when they cannot span the chord.
    let x1p2 = x1p * x1p;
    let y1p2 = y1p * y1p;
    let lambda = x1p2 / (rx * rx) + y1p2 / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    // Center in the ellipse frame.
    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let num = rx2 * ry2 - rx2 * y1p2 - ry2 * x1p2;
    let den = rx2 * y1p2 + ry2 * x1p2;
    let coef = if den == 0.0 {
        0.0
    } else {
        let sign = if arc.large_arc == arc.sweep { -1.0 } else { 1.0 };
        sign * (num / den).max(0.0).sqrt()
    };
    let cxp = coef * (rx * y1p / ry);
    let cyp = coef * (-ry * x1p / rx);

    // Back to user space.
    let cx = cos_phi * cxp - sin_phi * cyp + (x0 + x1) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (y0 + y1) / 2.0;

    let ux = (x1p - cxp) / rx;
    let uy = (y1p - cyp) / ry;
    let vx = (-x1p - cxp) / rx;
    let vy = (-y1p - cyp) / ry;

    let theta1 = vector_angle(1.0, 0.0, ux, uy);
    let mut dtheta = vector_angle(ux, uy, vx, vy);
    if !arc.sweep && dtheta > 0.0 {
        dtheta -= 2.0 * PI;
    } else if arc.sweep && dtheta < 0.0 {
        dtheta += 2.0 * PI;
    }

    // The epsilon keeps an exact quarter turn from rounding into two pieces.
    let count = ((dtheta.abs() / FRAC_PI_2) - 1e-9).ceil().max(1.0) as usize;
    let delta = dtheta / count as f64;

    let ellipse = Ellipse {
        cx,
        cy,
        rx,
        ry,
        sin_phi,
        cos_phi,
    };

    let mut segments = Vec::with_capacity(count);
    let mut t1 = theta1;
    for i in 0..count {
        let t2 = if i + 1 == count { theta1 + dtheta } else { t1 + delta };
        segments.push(ellipse.segment(t1, t2));
        t1 = t2;
    }

    // Land exactly on the requested endpoint.
    if let Some(last) = segments.last_mut() {
        last[4] = x1;
        last[5] = y1;
    }

    segments
}

/// The signed angle from vector u to vector v.
fn vector_angle(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
    let dot = ux * vx + uy * vy;
    let det = ux * vy - uy * vx;
    det.atan2(dot)
}

struct Ellipse {
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    sin_phi: f64,
    cos_phi: f64,
}

impl Ellipse {
    /// Cubic approximation of the arc between parametric angles t1 and t2.
    fn segment(&self, t1: f64, t2: f64) -> CubicSegment {
        let k = (4.0 / 3.0) * ((t2 - t1) / 4.0).tan();
        let (s1, c1) = t1.sin_cos();
        let (s2, c2) = t2.sin_cos();

        let (c1x, c1y) = self.map(c1 - k * s1, s1 + k * c1);
        let (c2x, c2y) = self.map(c2 + k * s2, s2 - k * c2);
        let (ex, ey) = self.map(c2, s2);
        [c1x, c1y, c2x, c2y, ex, ey]
    }

    /// Unit circle -> ellipse -> rotate -> translate.
    fn map(&self, x: f64, y: f64) -> (f64, f64) {
        let x = self.rx * x;
        let y = self.ry * y;
        (
            self.cx + self.cos_phi * x - self.sin_phi * y,
            self.cy + self.sin_phi * x + self.cos_phi * y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubic_at(p0: (f64, f64), seg: &CubicSegment, t: f64) -> (f64, f64) {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        (
            a * p0.0 + b * seg[0] + c * seg[2] + d * seg[4],
            a * p0.1 + b * seg[1] + c * seg[3] + d * seg[5],
        )
    }

    fn quarter() -> ArcParams {
        ArcParams {
            from: (10.0, 0.0),
            to: (0.0, 10.0),
            rx: 10.0,
            ry: 10.0,
            rotation: 0.0,
            large_arc: false,
            sweep: true,
        }
    }

    #[test]
    fn quarter_circle_is_one_segment() {
        let segs = arc_to_cubics(&quarter());
        assert_eq!(segs.len(), 1);
        assert!((segs[0][4] - 0.0).abs() <= 1e-6);
        assert!((segs[0][5] - 10.0).abs() <= 1e-6);
    }

    #[test]
    fn quarter_circle_midpoint_stays_on_the_circle() {
        let segs = arc_to_cubics(&quarter());
        let (mx, my) = cubic_at((10.0, 0.0), &segs[0], 0.5);
        let radial = (mx * mx + my * my).sqrt();
        assert!((radial - 10.0).abs() < 0.005 * 10.0, "radial distance {radial}");
    }

    #[test]
    fn quarter_circle_first_control_point_is_tangent() {
        let segs = arc_to_cubics(&quarter());
        // Tangent at (10, 0) on a circle centered at the origin is vertical.
        assert!((segs[0][0] - 10.0).abs() < 1e-9);
        assert!(segs[0][1] > 0.0);
    }

    #[test]
    fn three_quarter_sweep_is_three_segments() {
        let arc = ArcParams {
            from: (10.0, 0.0),
            to: (0.0, -10.0),
            rx: 10.0,
            ry: 10.0,
            rotation: 0.0,
            large_arc: true,
            sweep: true,
        };
        let segs = arc_to_cubics(&arc);
        assert_eq!(segs.len(), 3);
        // Each piece ends on the circle.
        for seg in &segs {
            let r = (seg[4] * seg[4] + seg[5] * seg[5]).sqrt();
            assert!((r - 10.0).abs() < 1e-6);
        }
        assert!((segs[2][4] - 0.0).abs() < 1e-6);
        assert!((segs[2][5] + 10.0).abs() < 1e-6);
    }

    #[test]
    fn ten_degree_sweep_is_one_segment() {
        let a = 10f64.to_radians();
        let arc = ArcParams {
            from: (10.0, 0.0),
            to: (10.0 * a.cos(), 10.0 * a.sin()),
            rx: 10.0,
            ry: 10.0,
            rotation: 0.0,
            large_arc: false,
            sweep: true,
        };
        assert_eq!(arc_to_cubics(&arc).len(), 1);
    }

    #[test]
    fn sweep_flag_picks_the_direction() {
        let mut arc = quarter();
        arc.sweep = false;
        // Small arc the other way round goes through the far center (10, 10).
        let segs = arc_to_cubics(&arc);
        assert_eq!(segs.len(), 1);
        let (mx, my) = cubic_at(arc.from, &segs[0], 0.5);
        let d = ((mx - 10.0).powi(2) + (my - 10.0).powi(2)).sqrt();
        assert!((d - 10.0).abs() < 0.05);
    }

    #[test]
    fn undersized_radii_are_scaled_up() {
        let arc = ArcParams {
            from: (0.0, 0.0),
            to: (20.0, 0.0),
            rx: 5.0,
            ry: 5.0,
            rotation: 0.0,
            large_arc: false,
            sweep: true,
        };
        let segs = arc_to_cubics(&arc);
        // Radius becomes 10, a half circle: two quarter pieces.
        assert_eq!(segs.len(), 2);
        let (mx, my) = (segs[0][4], segs[0][5]);
        assert!((mx - 10.0).abs() < 1e-6);
        assert!((my.abs() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn rotated_ellipse_ends_on_target() {
        let arc = ArcParams {
            from: (3.0, 4.0),
            to: (17.0, 9.0),
            rx: 12.0,
            ry: 6.0,
            rotation: 30.0,
            large_arc: true,
            sweep: false,
        };
        let segs = arc_to_cubics(&arc);
        assert!(!segs.is_empty());
        let last = segs.last().unwrap();
        assert!((last[4] - 17.0).abs() <= 1e-6);
        assert!((last[5] - 9.0).abs() <= 1e-6);
    }

    #[test]
    fn zero_radius_is_a_straight_line() {
        let mut arc = quarter();
        arc.rx = 0.0;
        let segs = arc_to_cubics(&arc);
        assert_eq!(segs, vec![[10.0, 0.0, 0.0, 10.0, 0.0, 10.0]]);
    }

    #[test]
    fn coincident_endpoints_draw_nothing() {
        let mut arc = quarter();
        arc.to = arc.from;
        assert!(arc_to_cubics(&arc).is_empty());
    }
}
