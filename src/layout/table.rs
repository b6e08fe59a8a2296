//! Paginated tables. Rows never split; the header row is repeated at the
//! top of every page the table continues onto. Cell text is cut to one
//! line with an ellipsis.

use super::{Canvas, Cursor};
use crate::draw;
use crate::font::Font;
use crate::style::Color;
use crate::text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub title: String,
    /// Share of the table width; shares are normalised over all columns.
    pub share: f64,
    pub align: Align,
}

impl Column {
    pub fn new(title: impl Into<String>, share: f64) -> Self {
        Self {
            title: title.into(),
            share,
            align: Align::Left,
        }
    }

    pub fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub color: Option<Color>,
    pub bold: bool,
}

impl Cell {
    pub fn colored(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self {
            text,
            color: None,
            bold: false,
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::from(text.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<Cell>) {
        self.rows.push(cells);
    }

    /// Column widths for a table `width` points wide.
    pub fn widths(&self, width: f64) -> Vec<f64> {
        let total: f64 = self.columns.iter().map(|c| c.share.max(0.0)).sum();
        if total <= 0.0 {
            let n = self.columns.len().max(1) as f64;
            return vec![width / n; self.columns.len()];
        }
        self.columns
            .iter()
            .map(|c| width * c.share.max(0.0) / total)
            .collect()
    }
}

impl Canvas {
    /// Draw `table` across the content width. Returns the cursor below the
    /// last row.
    pub fn table(&mut self, cursor: Cursor, table: &Table) -> Cursor {
        let page = self.page();
        let row_height = self.spacing().row_height;
        let widths = table.widths(page.content_width());

        // A header always comes with at least one row under it.
        let mut cursor = self.check_page_break(cursor, row_height * 2.0);
        cursor = self.table_header(cursor, table, &widths);

        for (i, row) in table.rows.iter().enumerate() {
            let next = self.check_page_break(cursor, row_height);
            if next.page() != cursor.page() {
                cursor = self.table_header(next, table, &widths);
            }
            self.table_row(cursor, table, &widths, row, i % 2 == 1);
            cursor = cursor.advance(row_height);
        }
        cursor
    }

    /// Label/value pairs laid out two to a row, each row checked for room.
    pub fn key_values(&mut self, cursor: Cursor, pairs: &[(String, String)]) -> Cursor {
        let page = self.page();
        let sp = self.spacing();
        let palette = self.palette();
        let fonts = self.fonts();
        let gap = sp.column_gap;
        let half = (page.content_width() - gap) / 2.0;
        let label_width = half * 0.42;
        let value_width = half - label_width - 4.0;
        let size = sp.body_size;

        let mut cursor = cursor;
        for row in pairs.chunks(2) {
            cursor = self.check_page_break(cursor, sp.row_height);
            let baseline = cursor.y() + sp.row_height / 2.0 + size * 0.35;
            for (i, (label, value)) in row.iter().enumerate() {
                let x = page.margin_left + i as f64 * (half + gap);
                let label = text::fit(&fonts, label, Font::Regular, sp.small_size, label_width);
                let value = text::fit(&fonts, value, Font::Bold, size, value_width);
                draw::text(self.surface(), x, baseline, label, Font::Regular, sp.small_size, palette.muted);
                draw::text(self.surface(), x + label_width, baseline, value, Font::Bold, size, palette.ink);
            }
            draw::divider(
                self.surface(),
                page.margin_left,
                cursor.y() + sp.row_height,
                page.content_width(),
                palette.border,
            );
            cursor = cursor.advance(sp.row_height);
        }
        cursor
    }

    fn table_header(&mut self, cursor: Cursor, table: &Table, widths: &[f64]) -> Cursor {
        let page = self.page();
        let sp = self.spacing();
        let palette = self.palette();
        draw::rect(
            self.surface(),
            page.margin_left,
            cursor.y(),
            page.content_width(),
            sp.row_height,
            palette.brand,
        );
        let cells: Vec<Cell> = table
            .columns
            .iter()
            .map(|c| Cell::colored(c.title.as_str(), Color::WHITE).bold())
            .collect();
        self.cells(cursor, table, widths, &cells);
        cursor.advance(sp.row_height)
    }

    fn table_row(&mut self, cursor: Cursor, table: &Table, widths: &[f64], row: &[Cell], striped: bool) {
        let page = self.page();
        let sp = self.spacing();
        let stripe = self.palette().table_stripe;
        if striped {
            draw::rect(
                self.surface(),
                page.margin_left,
                cursor.y(),
                page.content_width(),
                sp.row_height,
                stripe,
            );
        }
        self.cells(cursor, table, widths, row);
    }

    fn cells(&mut self, cursor: Cursor, table: &Table, widths: &[f64], cells: &[Cell]) {
        let page = self.page();
        let sp = self.spacing();
        let ink = self.palette().ink;
        let fonts = self.fonts();
        let size = sp.small_size + 0.5;
        let pad = 5.0;
        let baseline = cursor.y() + sp.row_height / 2.0 + size * 0.35;

        let mut x = page.margin_left;
        for ((column, width), cell) in table.columns.iter().zip(widths).zip(cells) {
            let font = if cell.bold { Font::Bold } else { Font::Regular };
            let inner = (width - 2.0 * pad).max(1.0);
            let content = text::fit(&fonts, &cell.text, font, size, inner);
            let color = cell.color.unwrap_or(ink);
            match column.align {
                Align::Left => draw::text(self.surface(), x + pad, baseline, content, font, size, color),
                Align::Right => draw::right_text(
                    self.surface(),
                    &fonts,
                    x + width - pad,
                    baseline,
                    &content,
                    font,
                    size,
                    color,
                ),
            }
            x += width;
        }
    }
}
