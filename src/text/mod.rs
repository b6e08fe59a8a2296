//! # Text Layout
//!
//! Line breaking and single-line fitting. Both are pure functions over the
//! font metrics so that measuring a block and drawing it always agree on
//! where the lines fall: the card, table and paragraph code call
//! [`wrap`] once and use the result for both passes.
//!
//! Break opportunities come from UAX#14 via `unicode-linebreak`. A word
//! wider than the line is split between characters as a last resort.

use unicode_linebreak::{linebreaks, BreakOpportunity};

use crate::font::{Font, FontContext};

const ELLIPSIS: char = '\u{2026}';

/// Break `text` into lines no wider than `max_width`.
///
/// Explicit newlines always break. An empty input yields a single empty
/// line, so callers can count lines without special-casing.
pub fn wrap(ctx: &FontContext, text: &str, font: Font, size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut start = 0;

    for (offset, opportunity) in linebreaks(text) {
        let segment = &text[start..offset];
        start = offset;

        let mandatory = matches!(opportunity, BreakOpportunity::Mandatory);
        let segment = if mandatory {
            segment.trim_end_matches(['\n', '\r'])
        } else {
            segment
        };

        let candidate = format!("{}{}", current, segment);
        if ctx.measure_string(candidate.trim_end(), font, size) <= max_width {
            current = candidate;
        } else {
            if !current.trim_end().is_empty() {
                lines.push(current.trim_end().to_string());
            }
            current = String::new();
            if ctx.measure_string(segment.trim_end(), font, size) <= max_width {
                current.push_str(segment);
            } else {
                // A single word wider than the line: split it by chars.
                for ch in segment.chars() {
                    let mut next = current.clone();
                    next.push(ch);
                    if ctx.measure_string(next.trim_end(), font, size) > max_width
                        && !current.is_empty()
                    {
                        lines.push(current.trim_end().to_string());
                        current = ch.to_string();
                    } else {
                        current = next;
                    }
                }
            }
        }

        // linebreaks() reports the end of text as a mandatory break too.
        if mandatory && offset < text.len() {
            lines.push(current.trim_end().to_string());
            current = String::new();
        }
    }

    let tail = current.trim_end();
    if !tail.is_empty() || lines.is_empty() {
        lines.push(tail.to_string());
    }

    lines
}

/// Fit `text` onto one line of `max_width`, replacing the overflow with an
/// ellipsis. Text that already fits is returned unchanged.
pub fn fit(ctx: &FontContext, text: &str, font: Font, size: f64, max_width: f64) -> String {
    if ctx.measure_string(text, font, size) <= max_width {
        return text.to_string();
    }

    let budget = max_width - ctx.char_width(ELLIPSIS, font, size);
    let mut out = String::new();
    let mut width = 0.0;
    for ch in text.chars() {
        let w = ctx.char_width(ch, font, size);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }

    let mut out = out.trim_end().to_string();
    out.push(ELLIPSIS);
    out
}
