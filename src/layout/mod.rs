//! # Page Layout
//!
//! The report is laid out top to bottom on fixed-size pages. All layout
//! state is a [`Cursor`]: which page we are on and how far down it we are.
//! A cursor is a plain value. Every layout call takes one and returns the
//! next, so two sections can never disagree about where the page ends.
//!
//! [`Canvas::check_page_break`] is the one place pages get created. Before
//! anything is painted, the caller asks for the height it is about to use;
//! if that would run into the footer band a fresh page is started and the
//! returned cursor points at its top.
//!
//! Cards are measured and drawn through the same [`wrap_card`] call, so the
//! height used for the page-break check is exactly the height painted. A
//! card too tall for an empty page is cut down to what fits, ending in the
//! configured continuation line.

pub mod columns;
pub mod table;

use crate::config::{Branding, PageGeometry, Palette, RenderConfig, Spacing};
use crate::draw::{self, CardStyle};
use crate::font::{Font, FontContext};
use crate::icons::{Icon, IconRenderer};
use crate::style::Color;
use crate::surface::{DrawOp, Stroke, Surface};
use crate::text;

/// Position in the document: a page index and a y offset on that page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    page: usize,
    y: f64,
}

impl Cursor {
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn advance(self, dy: f64) -> Cursor {
        Cursor {
            page: self.page,
            y: self.y + dy,
        }
    }

    /// Same page, different offset.
    pub fn at(self, y: f64) -> Cursor {
        Cursor { page: self.page, y }
    }
}

/// A titled block of text lines with a colored accent bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub accent: Color,
    pub title: String,
    pub icon: Option<Icon>,
    pub lines: Vec<String>,
}

impl Card {
    pub fn new(accent: Color, title: impl Into<String>) -> Self {
        Self {
            accent,
            title: title.into(),
            icon: None,
            lines: Vec::new(),
        }
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }
}

/// A card after wrapping: exactly what will be painted.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedCard {
    pub title: String,
    pub lines: Vec<String>,
    pub truncated: bool,
    pub height: f64,
}

/// Wrap a card's title and body for `width` and work out its height,
/// truncating so the result never exceeds `max_height`.
pub fn wrap_card(
    fonts: &FontContext,
    spacing: &Spacing,
    continuation: &str,
    max_height: f64,
    card: &Card,
    width: f64,
) -> WrappedCard {
    let text_width = card_text_width(spacing, width);
    let title_width = if card.icon.is_some() {
        text_width - title_icon_size(spacing) - TITLE_ICON_GAP
    } else {
        text_width
    };

    let title = text::fit(fonts, &card.title, Font::Bold, spacing.card_title_size, title_width);
    let mut lines: Vec<String> = card
        .lines
        .iter()
        .flat_map(|line| text::wrap(fonts, line, Font::Regular, spacing.body_size, text_width))
        .collect();

    let head = 2.0 * spacing.card_padding
        + if card.title.is_empty() {
            0.0
        } else {
            spacing.card_title_height
        };
    let height_for = |n: usize| head + n as f64 * spacing.line_height;

    let mut truncated = false;
    if height_for(lines.len()) > max_height {
        // Largest prefix that still leaves room for the continuation line.
        let mut keep = lines.len();
        while keep > 0 && height_for(keep + 1) > max_height {
            keep -= 1;
        }
        lines.truncate(keep);
        lines.push(text::fit(
            fonts,
            continuation,
            Font::Regular,
            spacing.body_size,
            text_width,
        ));
        truncated = true;
    }

    WrappedCard {
        title,
        height: height_for(lines.len()),
        lines,
        truncated,
    }
}

/// Space between a card's title icon and its title.
const TITLE_ICON_GAP: f64 = 4.0;

fn title_icon_size(spacing: &Spacing) -> f64 {
    spacing.card_title_size + 1.0
}

/// Width available to card text once the accent bar and padding are taken.
pub fn card_text_width(spacing: &Spacing, width: f64) -> f64 {
    (width - spacing.accent_padding - spacing.card_padding).max(1.0)
}

/// Whether a card draw has already been fitted onto the page by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Break the page first if the card does not fit.
    Check,
    /// The caller reserved the space; paint where the cursor is.
    Reserved,
}

/// Owns the drawing surface, the page configuration and everything that is
/// shared across sections while a document is being built.
#[derive(Debug)]
pub struct Canvas {
    surface: Surface,
    fonts: FontContext,
    icons: IconRenderer,
    config: RenderConfig,
}

impl Canvas {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            surface: Surface::new(config.page.width, config.page.height),
            fonts: FontContext::new(),
            icons: IconRenderer::new(config.spacing.stroke_width),
            config,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn page(&self) -> PageGeometry {
        self.config.page
    }

    pub fn spacing(&self) -> Spacing {
        self.config.spacing
    }

    pub fn palette(&self) -> Palette {
        self.config.palette
    }

    pub fn brand(&self) -> &Branding {
        &self.config.brand
    }

    pub fn fonts(&self) -> FontContext {
        self.fonts
    }

    pub fn surface(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn page_count(&self) -> usize {
        self.surface.page_count()
    }

    pub fn into_surface(self) -> Surface {
        self.surface
    }

    /// Open the first page. Content starts at the plain top margin.
    pub fn start(&mut self) -> Cursor {
        let page = self.surface.add_page(self.config.palette.page_background);
        Cursor {
            page,
            y: self.config.page.margin_top,
        }
    }

    /// Unconditionally start a new page.
    pub fn new_page(&mut self) -> Cursor {
        let page = self.surface.add_page(self.config.palette.page_background);
        tracing::debug!(page, "page break");
        Cursor {
            page,
            y: self.config.page.page_top(),
        }
    }

    /// Return `cursor` if `needed` more points fit above the footer band,
    /// otherwise the top of a new page. A cursor already at the top of an
    /// empty page is returned as is, since a new page has no more room.
    pub fn check_page_break(&mut self, cursor: Cursor, needed: f64) -> Cursor {
        if cursor.y + needed <= self.config.page.usable_height() || self.at_fresh_page(cursor) {
            cursor
        } else {
            self.new_page()
        }
    }

    fn at_fresh_page(&self, cursor: Cursor) -> bool {
        cursor.y <= self.config.page.page_top()
            && self
                .surface
                .pages()
                .last()
                .map_or(true, |page| page.body.is_empty())
    }

    /// The tallest card: one that still fits below a section header on a
    /// fresh page.
    pub fn max_card_height(&self) -> f64 {
        self.config.page.max_card_height() - self.config.spacing.header_height
    }

    /// Room left on the current page below `cursor`.
    pub fn remaining(&self, cursor: Cursor) -> f64 {
        (self.config.page.usable_height() - cursor.y).max(0.0)
    }

    pub fn icon(&mut self, icon: Icon, x: f64, y: f64, size: f64, color: Color) {
        self.icons.draw(&mut self.surface, icon, x, y, size, color);
    }

    /// Stroke path data given in page coordinates.
    pub fn path(&mut self, d: &str, stroke: Stroke) {
        let commands = self.icons.paths().get(d).to_vec();
        if !commands.is_empty() {
            self.surface.draw(DrawOp::Path { commands, stroke });
        }
    }

    /// Section title with an icon and a divider. Breaks first unless the
    /// header and `min_content` points of what follows fit together.
    pub fn section_header(
        &mut self,
        cursor: Cursor,
        title: &str,
        icon: Icon,
        min_content: f64,
    ) -> Cursor {
        let sp = self.config.spacing;
        let page = self.config.page;
        let palette = self.config.palette;
        let min_content = min_content.min(self.max_card_height());
        let cursor = self.check_page_break(cursor, sp.header_height + min_content);

        let y = cursor.y;
        let icon_size = sp.header_size + 2.0;
        self.icon(icon, page.margin_left, y, icon_size, palette.brand);
        draw::text(
            &mut self.surface,
            page.margin_left + icon_size + 6.0,
            y + sp.header_size,
            title,
            Font::Bold,
            sp.header_size,
            palette.ink,
        );
        draw::divider(
            &mut self.surface,
            page.margin_left,
            y + sp.header_height - 6.0,
            page.content_width(),
            palette.border,
        );
        cursor.advance(sp.header_height)
    }

    /// Space between sections.
    pub fn section_gap(&self, cursor: Cursor) -> Cursor {
        cursor.advance(self.config.spacing.section_gap)
    }

    pub fn wrap_card(&self, card: &Card, width: f64) -> WrappedCard {
        wrap_card(
            &self.fonts,
            &self.config.spacing,
            &self.config.brand.continuation,
            self.max_card_height(),
            card,
            width,
        )
    }

    /// Height `card` will occupy at `width`. Paints nothing.
    pub fn measure_card(&self, card: &Card, width: f64) -> f64 {
        self.wrap_card(card, width).height
    }

    /// Paint `card` at `x`, returning the cursor below it and its height.
    pub fn draw_card(
        &mut self,
        cursor: Cursor,
        x: f64,
        width: f64,
        card: &Card,
        fit: Fit,
    ) -> (Cursor, f64) {
        let wrapped = self.wrap_card(card, width);
        let cursor = match fit {
            Fit::Check => self.check_page_break(cursor, wrapped.height),
            Fit::Reserved => cursor,
        };
        self.paint_card(cursor.y, x, width, card, &wrapped);
        (cursor.advance(wrapped.height), wrapped.height)
    }

    fn paint_card(&mut self, y: f64, x: f64, width: f64, card: &Card, wrapped: &WrappedCard) {
        let sp = self.config.spacing;
        let palette = self.config.palette;
        let style = CardStyle {
            radius: sp.card_radius,
            accent_width: sp.accent_width,
            background: palette.card_background,
            border: palette.border,
        };
        draw::card_background(&mut self.surface, x, y, width, wrapped.height, card.accent, &style);

        let text_x = x + sp.accent_padding;
        let mut top = y + sp.card_padding;
        if !card.title.is_empty() {
            let mut title_x = text_x;
            if let Some(icon) = card.icon {
                let size = title_icon_size(&sp);
                self.icon(icon, text_x, top, size, card.accent);
                title_x += size + TITLE_ICON_GAP;
            }
            draw::text(
                &mut self.surface,
                title_x,
                top + sp.card_title_size,
                wrapped.title.as_str(),
                Font::Bold,
                sp.card_title_size,
                palette.ink,
            );
            top += sp.card_title_height;
        }

        let last = wrapped.lines.len().saturating_sub(1);
        for (i, line) in wrapped.lines.iter().enumerate() {
            let color = if wrapped.truncated && i == last {
                palette.muted
            } else {
                palette.ink
            };
            draw::text(
                &mut self.surface,
                text_x,
                top + i as f64 * sp.line_height + sp.body_size,
                line.as_str(),
                Font::Regular,
                sp.body_size,
                color,
            );
        }
    }

    /// Full-width card at the left margin, followed by the card gap.
    pub fn card(&mut self, cursor: Cursor, card: &Card) -> Cursor {
        let page = self.config.page;
        let (cursor, _) = self.draw_card(cursor, page.margin_left, page.content_width(), card, Fit::Check);
        cursor.advance(self.config.spacing.card_gap)
    }

    /// Wrapped running text, checked for room line by line.
    #[allow(clippy::too_many_arguments)]
    pub fn paragraph(
        &mut self,
        cursor: Cursor,
        x: f64,
        width: f64,
        content: &str,
        font: Font,
        size: f64,
        color: Color,
    ) -> Cursor {
        let line_height = size * 1.4;
        let mut cursor = cursor;
        for line in text::wrap(&self.fonts, content, font, size, width) {
            cursor = self.check_page_break(cursor, line_height);
            draw::text(&mut self.surface, x, cursor.y + size, line, font, size, color);
            cursor = cursor.advance(line_height);
        }
        cursor
    }
}
