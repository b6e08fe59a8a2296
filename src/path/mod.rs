//! # Path Interpreter
//!
//! Executes path data (`M L H V C S Q T A Z`, absolute and relative) into a
//! flat list of absolute move/line/cubic/close commands. Quadratics are
//! raised to cubics and arcs are converted by [`arc::arc_to_cubics`], so
//! the drawing side only ever has to deal with four command kinds.
//!
//! Interpretation stops at the first token it cannot make sense of. The
//! commands produced up to that point are kept, which means a damaged icon
//! draws partially instead of not at all.

pub mod arc;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use arc::ArcParams;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    CurveTo(f64, f64, f64, f64, f64, f64),
    ClosePath,
}

impl PathCommand {
    /// Scale about the origin, then translate.
    pub fn transformed(self, scale: f64, dx: f64, dy: f64) -> Self {
        let p = |x: f64, y: f64| (x * scale + dx, y * scale + dy);
        match self {
            PathCommand::MoveTo(x, y) => {
                let (x, y) = p(x, y);
                PathCommand::MoveTo(x, y)
            }
            PathCommand::LineTo(x, y) => {
                let (x, y) = p(x, y);
                PathCommand::LineTo(x, y)
            }
            PathCommand::CurveTo(x1, y1, x2, y2, x, y) => {
                let (x1, y1) = p(x1, y1);
                let (x2, y2) = p(x2, y2);
                let (x, y) = p(x, y);
                PathCommand::CurveTo(x1, y1, x2, y2, x, y)
            }
            PathCommand::ClosePath => PathCommand::ClosePath,
        }
    }
}

/// Where and why interpretation stopped early.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("malformed path data at byte {offset}: {reason}")]
pub struct PathError {
    pub offset: usize,
    pub reason: &'static str,
}

/// Result of interpreting one path string.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpreted {
    pub commands: Vec<PathCommand>,
    pub error: Option<PathError>,
}

/// Interpret path data without caching.
pub fn interpret(d: &str) -> Interpreted {
    let mut state = State::default();
    let mut lexer = Lexer::new(d);

    let error = loop {
        lexer.skip_separators();
        if lexer.at_end() {
            break None;
        }
        let offset = lexer.pos;
        let Some(cmd) = lexer.command() else {
            break Some(PathError {
                offset,
                reason: "expected a command letter",
            });
        };
        if let Err(e) = state.run(cmd, &mut lexer) {
            break Some(e);
        }
    };

    Interpreted {
        commands: state.commands,
        error,
    }
}

/// Interpreted paths keyed by their source text.
///
/// Icons are authored once and drawn many times at different sizes, and
/// scaling happens after interpretation, so the key is just the string.
#[derive(Debug, Default)]
pub struct PathCache {
    entries: RefCell<HashMap<String, Rc<[PathCommand]>>>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, d: &str) -> Rc<[PathCommand]> {
        if let Some(hit) = self.entries.borrow().get(d) {
            tracing::trace!(path = d, "path cache hit");
            return Rc::clone(hit);
        }

        let Interpreted { commands, error } = interpret(d);
        if let Some(e) = error {
            tracing::warn!(path = d, kept = commands.len(), "{e}");
        }
        let commands: Rc<[PathCommand]> = commands.into();
        self.entries
            .borrow_mut()
            .insert(d.to_string(), Rc::clone(&commands));
        commands
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[derive(Default)]
struct State {
    commands: Vec<PathCommand>,
    cur: (f64, f64),
    start: (f64, f64),
    /// Second control point of the previous C/S, for reflecting into S.
    last_cubic: Option<(f64, f64)>,
    /// Control point of the previous Q/T, for reflecting into T.
    last_quad: Option<(f64, f64)>,
}

impl State {
    fn run(&mut self, cmd: char, lexer: &mut Lexer<'_>) -> Result<(), PathError> {
        let relative = cmd.is_ascii_lowercase();
        let upper = cmd.to_ascii_uppercase();

        if upper == 'Z' {
            self.commands.push(PathCommand::ClosePath);
            self.cur = self.start;
            self.last_cubic = None;
            self.last_quad = None;
            return Ok(());
        }

        // The first argument set is mandatory; further sets repeat the command.
        let mut first = true;
        loop {
            if !first {
                lexer.skip_separators();
                if !lexer.at_number() {
                    return Ok(());
                }
            }
            self.step(upper, relative, first, lexer)?;
            first = false;
        }
    }

    fn step(
        &mut self,
        cmd: char,
        relative: bool,
        first: bool,
        lexer: &mut Lexer<'_>,
    ) -> Result<(), PathError> {
        let (ox, oy) = if relative { self.cur } else { (0.0, 0.0) };
        let mut cubic_ctrl = None;
        let mut quad_ctrl = None;

        match cmd {
            'M' => {
                let (x, y) = lexer.pair()?;
                let p = (ox + x, oy + y);
                if first {
                    self.commands.push(PathCommand::MoveTo(p.0, p.1));
                    self.start = p;
                } else {
                    self.commands.push(PathCommand::LineTo(p.0, p.1));
                }
                self.cur = p;
            }
            'L' => {
                let (x, y) = lexer.pair()?;
                self.line_to(ox + x, oy + y);
            }
            'H' => {
                let x = lexer.number()?;
                self.line_to(ox + x, self.cur.1);
            }
            'V' => {
                let y = lexer.number()?;
                self.line_to(self.cur.0, oy + y);
            }
            'C' => {
                let (x1, y1) = lexer.pair()?;
                let (x2, y2) = lexer.pair()?;
                let (x, y) = lexer.pair()?;
                let c2 = (ox + x2, oy + y2);
                self.curve_to((ox + x1, oy + y1), c2, (ox + x, oy + y));
                cubic_ctrl = Some(c2);
            }
            'S' => {
                let (x2, y2) = lexer.pair()?;
                let (x, y) = lexer.pair()?;
                let c1 = reflect(self.last_cubic, self.cur);
                let c2 = (ox + x2, oy + y2);
                self.curve_to(c1, c2, (ox + x, oy + y));
                cubic_ctrl = Some(c2);
            }
            'Q' => {
                let (qx, qy) = lexer.pair()?;
                let (x, y) = lexer.pair()?;
                let q = (ox + qx, oy + qy);
                self.quad_to(q, (ox + x, oy + y));
                quad_ctrl = Some(q);
            }
            'T' => {
                let (x, y) = lexer.pair()?;
                let q = reflect(self.last_quad, self.cur);
                self.quad_to(q, (ox + x, oy + y));
                quad_ctrl = Some(q);
            }
            'A' => {
                let rx = lexer.number()?;
                let ry = lexer.number()?;
                let rotation = lexer.number()?;
                let large_arc = lexer.flag()?;
                let sweep = lexer.flag()?;
                let (x, y) = lexer.pair()?;
                let to = (ox + x, oy + y);
                let segments = arc::arc_to_cubics(&ArcParams {
                    from: self.cur,
                    to,
                    rx,
                    ry,
                    rotation,
                    large_arc,
                    sweep,
                });
                for [x1, y1, x2, y2, x, y] in segments {
                    self.commands.push(PathCommand::CurveTo(x1, y1, x2, y2, x, y));
                }
                self.cur = to;
            }
            _ => return Err(lexer.fail("unsupported command")),
        }

        self.last_cubic = cubic_ctrl;
        self.last_quad = quad_ctrl;
        Ok(())
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::LineTo(x, y));
        self.cur = (x, y);
    }

    fn curve_to(&mut self, c1: (f64, f64), c2: (f64, f64), end: (f64, f64)) {
        self.commands
            .push(PathCommand::CurveTo(c1.0, c1.1, c2.0, c2.1, end.0, end.1));
        self.cur = end;
    }

    /// Raise a quadratic to the equivalent cubic: each cubic control point
    /// sits two thirds of the way from an endpoint to the quadratic one.
    fn quad_to(&mut self, q: (f64, f64), end: (f64, f64)) {
        let (x0, y0) = self.cur;
        let c1 = (x0 + 2.0 / 3.0 * (q.0 - x0), y0 + 2.0 / 3.0 * (q.1 - y0));
        let c2 = (end.0 + 2.0 / 3.0 * (q.0 - end.0), end.1 + 2.0 / 3.0 * (q.1 - end.1));
        self.curve_to(c1, c2, end);
    }
}

/// Mirror a previous control point through the current point. Without one,
/// the current point itself is the control point.
fn reflect(ctrl: Option<(f64, f64)>, cur: (f64, f64)) -> (f64, f64) {
    match ctrl {
        Some((cx, cy)) => (2.0 * cur.0 - cx, 2.0 * cur.1 - cy),
        None => cur,
    }
}

struct Lexer<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(d: &'a str) -> Self {
        Self {
            bytes: d.as_bytes(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_separators(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn command(&mut self) -> Option<char> {
        let b = self.peek()?;
        if b"MmLlHhVvCcSsQqTtAaZz".contains(&b) {
            self.pos += 1;
            Some(b as char)
        } else {
            None
        }
    }

    fn at_number(&self) -> bool {
        matches!(self.peek(), Some(b'0'..=b'9' | b'.' | b'-' | b'+'))
    }

    fn fail(&self, reason: &'static str) -> PathError {
        PathError {
            offset: self.pos,
            reason,
        }
    }

    fn pair(&mut self) -> Result<(f64, f64), PathError> {
        let x = self.number()?;
        let y = self.number()?;
        Ok((x, y))
    }

    /// `[+-]? digits? ('.' digits?)? ([eE] [+-]? digits)?` with at least one
    /// mantissa digit. `1.5.5` lexes as `1.5` then `.5`; `3-4` as `3` then `-4`.
    fn number(&mut self) -> Result<f64, PathError> {
        self.skip_separators();
        let start = self.pos;
        let mut end = self.pos;

        if matches!(self.bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let int_start = end;
        while matches!(self.bytes.get(end), Some(b'0'..=b'9')) {
            end += 1;
        }
        let mut digits = end - int_start;
        if self.bytes.get(end) == Some(&b'.') {
            end += 1;
            let frac_start = end;
            while matches!(self.bytes.get(end), Some(b'0'..=b'9')) {
                end += 1;
            }
            digits += end - frac_start;
        }
        if digits == 0 {
            return Err(self.fail("expected a number"));
        }
        if matches!(self.bytes.get(end), Some(b'e' | b'E')) {
            let mut exp = end + 1;
            if matches!(self.bytes.get(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            let exp_digits = exp;
            while matches!(self.bytes.get(exp), Some(b'0'..=b'9')) {
                exp += 1;
            }
            if exp > exp_digits {
                end = exp;
            }
        }

        let text = std::str::from_utf8(&self.bytes[start..end])
            .map_err(|_| self.fail("invalid number"))?;
        let value = text.parse::<f64>().map_err(|_| self.fail("invalid number"))?;
        self.pos = end;
        Ok(value)
    }

    /// Arc flags are a single `0` or `1` and may be written without separators.
    fn flag(&mut self) -> Result<bool, PathError> {
        self.skip_separators();
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(self.fail("expected an arc flag")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmds(d: &str) -> Vec<PathCommand> {
        let out = interpret(d);
        assert_eq!(out.error, None, "{d}");
        out.commands
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn absolute_move_and_lines() {
        assert_eq!(
            cmds("M 2 3 L 10 3 L 10 8 Z"),
            vec![
                PathCommand::MoveTo(2.0, 3.0),
                PathCommand::LineTo(10.0, 3.0),
                PathCommand::LineTo(10.0, 8.0),
                PathCommand::ClosePath,
            ]
        );
    }

    #[test]
    fn relative_commands_resolve_to_absolute() {
        assert_eq!(
            cmds("m5 5 l3 0 h2 v-4"),
            vec![
                PathCommand::MoveTo(5.0, 5.0),
                PathCommand::LineTo(8.0, 5.0),
                PathCommand::LineTo(10.0, 5.0),
                PathCommand::LineTo(10.0, 1.0),
            ]
        );
    }

    #[test]
    fn extra_move_pairs_are_lines() {
        assert_eq!(
            cmds("M1,1 2,2 3,3"),
            vec![
                PathCommand::MoveTo(1.0, 1.0),
                PathCommand::LineTo(2.0, 2.0),
                PathCommand::LineTo(3.0, 3.0),
            ]
        );
    }

    #[test]
    fn close_returns_to_subpath_start() {
        let out = cmds("M4 4 L8 4 Z l1 1");
        assert_eq!(out[3], PathCommand::LineTo(5.0, 5.0));
    }

    #[test]
    fn compact_numbers() {
        assert_eq!(
            cmds("M.5.5L1-1"),
            vec![PathCommand::MoveTo(0.5, 0.5), PathCommand::LineTo(1.0, -1.0)]
        );
        assert_eq!(cmds("M1e1 2E-1")[0], PathCommand::MoveTo(10.0, 0.2));
    }

    #[test]
    fn smooth_cubic_reflects_previous_control() {
        let out = cmds("M0 0 C0 10 10 10 10 0 S20 -10 20 0");
        match out[2] {
            PathCommand::CurveTo(x1, y1, x2, y2, x, y) => {
                assert!(close(x1, 10.0) && close(y1, -10.0));
                assert!(close(x2, 20.0) && close(y2, -10.0));
                assert!(close(x, 20.0) && close(y, 0.0));
            }
            other => panic!("expected a curve, got {other:?}"),
        }
    }

    #[test]
    fn smooth_cubic_without_predecessor_uses_current_point() {
        let out = cmds("M3 3 S5 5 7 3");
        assert_eq!(out[1], PathCommand::CurveTo(3.0, 3.0, 5.0, 5.0, 7.0, 3.0));
    }

    #[test]
    fn quadratic_matches_its_cubic_at_midpoint() {
        let out = cmds("M0 0 Q10 20 20 0");
        let PathCommand::CurveTo(x1, y1, x2, y2, x, y) = out[1] else {
            panic!("expected a curve");
        };
        // Cubic at t = 0.5.
        let cx = 0.125 * 0.0 + 0.375 * x1 + 0.375 * x2 + 0.125 * x;
        let cy = 0.125 * 0.0 + 0.375 * y1 + 0.375 * y2 + 0.125 * y;
        // Quadratic at t = 0.5.
        let qx = 0.25 * 0.0 + 0.5 * 10.0 + 0.25 * 20.0;
        let qy = 0.25 * 0.0 + 0.5 * 20.0 + 0.25 * 0.0;
        assert!((cx - qx).abs() < 1e-9);
        assert!((cy - qy).abs() < 1e-9);
    }

    #[test]
    fn smooth_quadratic_reflects_control() {
        // First control (5, 10); reflected through (10, 0) gives (15, -10).
        let out = cmds("M0 0 Q5 10 10 0 T20 0");
        let PathCommand::CurveTo(x1, y1, _, _, _, _) = out[2] else {
            panic!("expected a curve");
        };
        assert!(close(x1, 10.0 + 2.0 / 3.0 * 5.0));
        assert!(close(y1, 2.0 / 3.0 * -10.0));
    }

    #[test]
    fn arc_with_compact_flags() {
        let out = cmds("M10 12a2 2 0 01-4 0");
        assert_eq!(out.len(), 3);
        let PathCommand::CurveTo(_, _, _, _, x, y) = out[2] else {
            panic!("expected a curve");
        };
        assert!(close(x, 6.0) && close(y, 12.0));
    }

    #[test]
    fn full_circle_from_two_arcs() {
        let out = cmds("M2 12a10 10 0 1 0 20 0a10 10 0 1 0-20 0");
        assert_eq!(out.len(), 5);
        let Some(&PathCommand::CurveTo(_, _, _, _, x, y)) = out.last() else {
            panic!("expected a curve");
        };
        assert!(close(x, 2.0) && close(y, 12.0));
    }

    #[test]
    fn malformed_input_keeps_earlier_commands() {
        let out = interpret("M1 1 L2 2 L3 # L4 4");
        assert_eq!(
            out.commands,
            vec![PathCommand::MoveTo(1.0, 1.0), PathCommand::LineTo(2.0, 2.0)]
        );
        assert!(out.error.is_some());
    }

    #[test]
    fn unknown_command_stops() {
        let out = interpret("M0 0 X 5 5");
        assert_eq!(out.commands, vec![PathCommand::MoveTo(0.0, 0.0)]);
        assert_eq!(out.error.map(|e| e.offset), Some(5));
    }

    #[test]
    fn garbage_yields_nothing() {
        let out = interpret("not a path");
        assert!(out.commands.is_empty());
        assert!(out.error.is_some());
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let out = interpret("   ");
        assert!(out.commands.is_empty());
        assert_eq!(out.error, None);
    }

    #[test]
    fn cache_hit_is_identical() {
        let cache = PathCache::new();
        let d = "M12 2a10 10 0 1 0 0 20 10 10 0 1 0 0-20z";
        let a = cache.get(d);
        let b = cache.get(d);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(&*a, &*b);
        assert_eq!(&*a, interpret(d).commands.as_slice());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn transform_scales_then_translates() {
        let c = PathCommand::CurveTo(1.0, 2.0, 3.0, 4.0, 5.0, 6.0).transformed(2.0, 10.0, 20.0);
        assert_eq!(c, PathCommand::CurveTo(12.0, 24.0, 16.0, 28.0, 20.0, 32.0));
        assert_eq!(PathCommand::ClosePath.transformed(3.0, 1.0, 1.0), PathCommand::ClosePath);
    }
}
