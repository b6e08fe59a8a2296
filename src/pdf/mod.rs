//! # PDF Serializer
//!
//! Takes the finished [`Surface`] and writes a PDF 1.7 file.
//!
//! This is a from-scratch writer. The report only ever needs two of the
//! standard fonts, solid fills, strokes and cubic paths, so the subset of
//! the format involved is small.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- catalog
//! 2 0 obj ... endobj  <- page tree
//! 3 0 obj ... endobj  <- fonts, then a content stream and page per page
//! ...
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Layout works with the origin at the top-left and y growing downward.
//! Every y coordinate is flipped here, and nowhere else.

use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::font::Font;
use crate::path::PathCommand;
use crate::style::Color;
use crate::surface::{DrawOp, Page, Stroke, Surface};

/// Bezier control distance for a quarter circle.
const KAPPA: f64 = 0.5522847498;

/// Document information dictionary entries.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
}

pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
}

struct PdfObject {
    data: Vec<u8>,
}

impl PdfBuilder {
    fn add(&mut self, data: Vec<u8>) -> usize {
        self.objects.push(PdfObject { data });
        self.objects.len() - 1
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Serialize every page of `surface` into a PDF byte vector.
    pub fn write(&self, surface: &Surface, info: &DocumentInfo) -> Vec<u8> {
        // 0 = placeholder (PDF objects are 1-indexed)
        // 1 = Catalog
        // 2 = Pages (page tree root)
        let mut builder = PdfBuilder {
            objects: vec![PdfObject { data: vec![] }, PdfObject { data: vec![] }, PdfObject { data: vec![] }],
        };

        let fonts: Vec<(Font, usize)> = [Font::Regular, Font::Bold]
            .into_iter()
            .map(|font| {
                let dict = format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    font.pdf_name()
                );
                (font, builder.add(dict.into_bytes()))
            })
            .collect();
        let font_resources: String = fonts
            .iter()
            .map(|(font, id)| format!("/{} {} 0 R", font.resource_name(), id))
            .collect::<Vec<_>>()
            .join(" ");

        let mut page_obj_ids: Vec<usize> = Vec::new();
        for page in surface.pages() {
            let content = self.build_content_stream(page, surface.width(), surface.height());
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let mut content_data: Vec<u8> = Vec::new();
            let _ = write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            let content_obj_id = builder.add(content_data);

            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << /Font << {} >> >> >>",
                surface.width(),
                surface.height(),
                content_obj_id,
                font_resources
            );
            page_obj_ids.push(builder.add(page_dict.into_bytes()));
        }

        builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        let mut dict = String::from("<< ");
        if let Some(ref title) = info.title {
            let _ = write!(dict, "/Title ({}) ", Self::encode_text(title));
        }
        if let Some(ref author) = info.author {
            let _ = write!(dict, "/Author ({}) ", Self::encode_text(author));
        }
        if let Some(ref subject) = info.subject {
            let _ = write!(dict, "/Subject ({}) ", Self::encode_text(subject));
        }
        let _ = write!(
            dict,
            "/Producer (vehicle-report {}) >>",
            env!("CARGO_PKG_VERSION")
        );
        let info_obj_id = builder.add(dict.into_bytes());

        tracing::debug!(
            pages = page_obj_ids.len(),
            objects = builder.objects.len() - 1,
            "serialized pdf"
        );
        self.serialize(&builder, info_obj_id)
    }

    /// Background, then body, then footer, in recorded order.
    fn build_content_stream(&self, page: &Page, width: f64, height: f64) -> String {
        let mut stream = String::new();
        let _ = write!(stream, "1 J\n1 j\n");

        let bg = page.background;
        let _ = write!(
            stream,
            "q\n{:.3} {:.3} {:.3} rg\n0 0 {:.2} {:.2} re\nf\nQ\n",
            bg.r, bg.g, bg.b, width, height
        );

        for op in page.body.iter().chain(&page.footer) {
            self.write_op(&mut stream, op, height);
        }
        stream
    }

    fn write_op(&self, stream: &mut String, op: &DrawOp, page_height: f64) {
        match op {
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                radius,
                fill,
                stroke,
            } => {
                let Some(paint) = Self::begin_paint(stream, *fill, *stroke) else {
                    return;
                };
                let py = page_height - y - height;
                if *radius > 0.0 {
                    Self::write_rounded_rect(stream, *x, py, *width, *height, *radius);
                } else {
                    let _ = write!(stream, "{:.2} {:.2} {:.2} {:.2} re\n", x, py, width, height);
                }
                let _ = write!(stream, "{}\nQ\n", paint);
            }

            DrawOp::Circle {
                cx,
                cy,
                r,
                fill,
                stroke,
            } => {
                let Some(paint) = Self::begin_paint(stream, *fill, *stroke) else {
                    return;
                };
                Self::write_circle(stream, *cx, page_height - cy, *r);
                let _ = write!(stream, "{}\nQ\n", paint);
            }

            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                stroke,
            } => {
                let _ = Self::begin_paint(stream, None, Some(*stroke));
                let _ = write!(
                    stream,
                    "{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
                    x1,
                    page_height - y1,
                    x2,
                    page_height - y2
                );
            }

            DrawOp::Path { commands, stroke } => {
                if commands.is_empty() {
                    return;
                }
                let _ = Self::begin_paint(stream, None, Some(*stroke));
                for command in commands {
                    match *command {
                        PathCommand::MoveTo(x, y) => {
                            let _ = write!(stream, "{:.3} {:.3} m\n", x, page_height - y);
                        }
                        PathCommand::LineTo(x, y) => {
                            let _ = write!(stream, "{:.3} {:.3} l\n", x, page_height - y);
                        }
                        PathCommand::CurveTo(x1, y1, x2, y2, x, y) => {
                            let _ = write!(
                                stream,
                                "{:.3} {:.3} {:.3} {:.3} {:.3} {:.3} c\n",
                                x1,
                                page_height - y1,
                                x2,
                                page_height - y2,
                                x,
                                page_height - y
                            );
                        }
                        PathCommand::ClosePath => {
                            let _ = write!(stream, "h\n");
                        }
                    }
                }
                let _ = write!(stream, "S\nQ\n");
            }

            DrawOp::Text {
                x,
                y,
                text,
                font,
                size,
                color,
            } => {
                if text.is_empty() {
                    return;
                }
                let _ = write!(
                    stream,
                    "BT\n{:.3} {:.3} {:.3} rg\n/{} {:.1} Tf\n{:.2} {:.2} Td\n({}) Tj\nET\n",
                    color.r,
                    color.g,
                    color.b,
                    font.resource_name(),
                    size,
                    x,
                    page_height - y,
                    Self::encode_text(text)
                );
            }
        }
    }

    /// Open a graphics state with the given paint and return the painting
    /// operator to close the path with. `None` when there is nothing to paint.
    fn begin_paint(stream: &mut String, fill: Option<Color>, stroke: Option<Stroke>) -> Option<&'static str> {
        let stroke = stroke.filter(|s| s.width > 0.0);
        let op = match (fill, stroke) {
            (Some(_), Some(_)) => "B",
            (Some(_), None) => "f",
            (None, Some(_)) => "S",
            (None, None) => return None,
        };
        let _ = write!(stream, "q\n");
        if let Some(c) = fill {
            let _ = write!(stream, "{:.3} {:.3} {:.3} rg\n", c.r, c.g, c.b);
        }
        if let Some(s) = stroke {
            let _ = write!(
                stream,
                "{:.3} {:.3} {:.3} RG\n{:.2} w\n",
                s.color.r, s.color.g, s.color.b, s.width
            );
        }
        Some(op)
    }

    /// Rounded rectangle path with (x, y) at its bottom-left corner.
    fn write_rounded_rect(stream: &mut String, x: f64, y: f64, w: f64, h: f64, r: f64) {
        let r = r.min(w / 2.0).min(h / 2.0);
        let k = r * KAPPA;

        let _ = write!(stream, "{:.2} {:.2} m\n", x + r, y);
        let _ = write!(stream, "{:.2} {:.2} l\n", x + w - r, y);
        let _ = write!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
            x + w - r + k,
            y,
            x + w,
            y + r - k,
            x + w,
            y + r
        );
        let _ = write!(stream, "{:.2} {:.2} l\n", x + w, y + h - r);
        let _ = write!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
            x + w,
            y + h - r + k,
            x + w - r + k,
            y + h,
            x + w - r,
            y + h
        );
        let _ = write!(stream, "{:.2} {:.2} l\n", x + r, y + h);
        let _ = write!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
            x + r - k,
            y + h,
            x,
            y + h - r + k,
            x,
            y + h - r
        );
        let _ = write!(stream, "{:.2} {:.2} l\n", x, y + r);
        let _ = write!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
            x,
            y + r - k,
            x + r - k,
            y,
            x + r,
            y
        );
        let _ = write!(stream, "h\n");
    }

    /// Four quarter-circle cubics starting at the rightmost point.
    fn write_circle(stream: &mut String, cx: f64, cy: f64, r: f64) {
        let k = r * KAPPA;
        let _ = write!(stream, "{:.2} {:.2} m\n", cx + r, cy);
        let quarters = [
            (cx + r, cy + k, cx + k, cy + r, cx, cy + r),
            (cx - k, cy + r, cx - r, cy + k, cx - r, cy),
            (cx - r, cy - k, cx - k, cy - r, cx, cy - r),
            (cx + k, cy - r, cx + r, cy - k, cx + r, cy),
        ];
        for (x1, y1, x2, y2, x, y) in quarters {
            let _ = write!(
                stream,
                "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
                x1, y1, x2, y2, x, y
            );
        }
        let _ = write!(stream, "h\n");
    }

    /// Encode text as the body of a PDF literal string in WinAnsiEncoding.
    /// Characters outside the encoding become `?`.
    fn encode_text(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for ch in s.chars() {
            let b = Self::unicode_to_winansi(ch).unwrap_or(b'?');
            match b {
                b'\\' => out.push_str("\\\\"),
                b'(' => out.push_str("\\("),
                b')' => out.push_str("\\)"),
                0x20..=0x7E => out.push(b as char),
                _ => {
                    // Octal escape for bytes outside ASCII printable range
                    let _ = write!(out, "\\{:03o}", b);
                }
            }
        }
        out
    }

    /// Map a Unicode codepoint to a WinAnsiEncoding byte value.
    ///
    /// WinAnsiEncoding is based on Windows-1252. Most codepoints in
    /// 0x20..=0x7E and 0xA0..=0xFF map directly. The 0x80..=0x9F range
    /// contains special mappings for smart quotes, bullets, dashes, etc.
    pub(crate) fn unicode_to_winansi(ch: char) -> Option<u8> {
        let cp = ch as u32;
        if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
            return Some(cp as u8);
        }
        match cp {
            0x20AC => Some(0x80), // Euro sign
            0x201A => Some(0x82), // Single low-9 quotation mark
            0x0192 => Some(0x83), // Latin small letter f with hook
            0x201E => Some(0x84), // Double low-9 quotation mark
            0x2026 => Some(0x85), // Horizontal ellipsis
            0x2020 => Some(0x86), // Dagger
            0x2021 => Some(0x87), // Double dagger
            0x02C6 => Some(0x88), // Modifier letter circumflex accent
            0x2030 => Some(0x89), // Per mille sign
            0x0160 => Some(0x8A), // Latin capital letter S with caron
            0x2039 => Some(0x8B), // Single left-pointing angle quotation
            0x0152 => Some(0x8C), // Latin capital ligature OE
            0x017D => Some(0x8E), // Latin capital letter Z with caron
            0x2018 => Some(0x91), // Left single quotation mark
            0x2019 => Some(0x92), // Right single quotation mark
            0x201C => Some(0x93), // Left double quotation mark
            0x201D => Some(0x94), // Right double quotation mark
            0x2022 => Some(0x95), // Bullet
            0x2013 => Some(0x96), // En dash
            0x2014 => Some(0x97), // Em dash
            0x02DC => Some(0x98), // Small tilde
            0x2122 => Some(0x99), // Trade mark sign
            0x0161 => Some(0x9A), // Latin small letter s with caron
            0x203A => Some(0x9B), // Single right-pointing angle quotation
            0x0153 => Some(0x9C), // Latin small ligature oe
            0x017E => Some(0x9E), // Latin small letter z with caron
            0x0178 => Some(0x9F), // Latin capital letter Y with diaeresis
            _ => None,
        }
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_obj_id: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let _ = write!(output, "{} 0 obj\n", i);
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            let _ = write!(output, "{:010} 00000 n \n", offset);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            info_obj_id,
            xref_offset
        );
        output
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniz_oxide::inflate::decompress_to_vec_zlib;

    fn surface_with(ops: Vec<DrawOp>) -> Surface {
        let mut s = Surface::new(595.28, 841.89);
        s.add_page(Color::WHITE);
        for op in ops {
            s.draw(op);
        }
        s
    }

    /// Inflate every content stream in `pdf`, in object order.
    fn content_streams(pdf: &[u8]) -> Vec<String> {
        let mut out = Vec::new();
        let mut rest = pdf;
        while let Some(start) = find(rest, b"stream\n") {
            let body = &rest[start + 7..];
            let Some(end) = find(body, b"\nendstream") else {
                break;
            };
            let inflated = decompress_to_vec_zlib(&body[..end]).expect("valid zlib stream");
            out.push(String::from_utf8_lossy(&inflated).into_owned());
            rest = &body[end..];
        }
        out
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn test_encode_text() {
        assert_eq!(PdfWriter::encode_text("Hello (World)"), "Hello \\(World\\)");
        assert_eq!(PdfWriter::encode_text("back\\slash"), "back\\\\slash");
        assert_eq!(PdfWriter::encode_text("\u{00A3}5 \u{2014}"), "\\2435 \\227");
        assert_eq!(PdfWriter::encode_text("\u{2605}"), "?");
    }

    #[test]
    fn test_document_structure() {
        let bytes = PdfWriter::new().write(&surface_with(vec![]), &DocumentInfo::default());
        let text = String::from_utf8_lossy(&bytes);
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(text.ends_with("%%EOF\n"));
        assert!(text.contains("xref"));
        assert!(text.contains("/Count 1"));
        assert!(text.contains("/BaseFont /Helvetica /Encoding /WinAnsiEncoding"));
        assert!(text.contains("/BaseFont /Helvetica-Bold"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let bytes = PdfWriter::new().write(&surface_with(vec![]), &DocumentInfo::default());
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let xref = text.find("xref\n").unwrap();
        let entries: Vec<usize> = text[xref..]
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with(" n "))
            .map(|l| l[..10].parse().unwrap())
            .collect();
        assert!(!entries.is_empty());
        for (i, offset) in entries.iter().enumerate() {
            assert!(text[*offset..].starts_with(&format!("{} 0 obj", i + 1)));
        }
    }

    #[test]
    fn test_metadata_in_pdf() {
        let info = DocumentInfo {
            title: Some("Vehicle report AB12 CDE".to_string()),
            author: Some("VehicleCheck".to_string()),
            subject: None,
        };
        let bytes = PdfWriter::new().write(&surface_with(vec![]), &info);
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Title (Vehicle report AB12 CDE)"));
        assert!(text.contains("/Author (VehicleCheck)"));
        assert!(text.contains("/Producer (vehicle-report"));
    }

    #[test]
    fn test_y_axis_is_flipped() {
        let s = surface_with(vec![
            DrawOp::Text {
                x: 40.0,
                y: 100.0,
                text: "Bold".into(),
                font: Font::Bold,
                size: 10.0,
                color: Color::BLACK,
            },
            DrawOp::Line {
                x1: 0.0,
                y1: 41.89,
                x2: 10.0,
                y2: 41.89,
                stroke: Stroke::new(Color::BLACK, 1.0),
            },
        ]);
        let bytes = PdfWriter::new().write(&s, &DocumentInfo::default());
        let streams = content_streams(&bytes);
        assert_eq!(streams.len(), 1);
        assert!(streams[0].contains("/F1 10.0 Tf\n40.00 741.89 Td\n(Bold) Tj"));
        assert!(streams[0].contains("0.00 800.00 m\n10.00 800.00 l\nS"));
    }

    #[test]
    fn test_fill_and_stroke_paint_together() {
        let s = surface_with(vec![DrawOp::Rect {
            x: 10.0,
            y: 10.0,
            width: 50.0,
            height: 20.0,
            radius: 4.0,
            fill: Some(Color::WHITE),
            stroke: Some(Stroke::new(Color::BLACK, 0.75)),
        }]);
        let bytes = PdfWriter::new().write(&s, &DocumentInfo::default());
        let stream = &content_streams(&bytes)[0];
        assert!(stream.contains("0.75 w\n"));
        assert!(stream.contains("h\nB\nQ\n"));
        assert_eq!(stream.matches(" c\n").count(), 4);
    }

    #[test]
    fn test_footer_is_written_after_body() {
        let mut s = surface_with(vec![DrawOp::Text {
            x: 0.0,
            y: 10.0,
            text: "body".into(),
            font: Font::Regular,
            size: 9.0,
            color: Color::BLACK,
        }]);
        s.draw_footer(
            0,
            DrawOp::Text {
                x: 0.0,
                y: 820.0,
                text: "Page 1 of 1".into(),
                font: Font::Regular,
                size: 8.0,
                color: Color::BLACK,
            },
        );
        let bytes = PdfWriter::new().write(&s, &DocumentInfo::default());
        let stream = &content_streams(&bytes)[0];
        let body = stream.find("(body)").unwrap();
        let footer = stream.find("(Page 1 of 1)").unwrap();
        assert!(body < footer);
    }
}
