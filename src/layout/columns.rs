//! Two-column card placement.
//!
//! Cards go into whichever column is currently shorter, the left one on a
//! tie. When the chosen column has no room left, both columns restart
//! together at the top of a new page, so a page break never leaves one
//! column behind on the previous page.

use super::{Canvas, Card, Cursor, Fit};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnArea {
    /// Where both columns start on the current page.
    pub start_y: f64,
    /// Where both columns restart after a page break.
    pub page_top: f64,
    /// Lowest y a card may reach.
    pub usable: f64,
    /// Vertical space after each card.
    pub gap: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub side: Side,
    pub y: f64,
    /// A new page has to be started before this card.
    pub new_page: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnPlan {
    pub placements: Vec<Placement>,
    pub page_breaks: usize,
    pub left: f64,
    pub right: f64,
}

impl ColumnPlan {
    /// Below the taller column.
    pub fn final_y(&self) -> f64 {
        self.left.max(self.right)
    }
}

/// Decide where each card of the given heights goes. Pure.
pub fn plan_columns(heights: &[f64], area: &ColumnArea) -> ColumnPlan {
    let mut left = area.start_y;
    let mut right = area.start_y;
    let mut page_breaks = 0;
    let mut placements = Vec::with_capacity(heights.len());

    for &h in heights {
        let (mut side, mut y) = if right < left {
            (Side::Right, right)
        } else {
            (Side::Left, left)
        };

        let new_page = y + h > area.usable;
        if new_page {
            page_breaks += 1;
            left = area.page_top;
            right = area.page_top;
            side = Side::Left;
            y = area.page_top;
        }

        match side {
            Side::Left => left = y + h + area.gap,
            Side::Right => right = y + h + area.gap,
        }
        placements.push(Placement { side, y, new_page });
    }

    ColumnPlan {
        placements,
        page_breaks,
        left,
        right,
    }
}

impl Canvas {
    /// Lay `cards` out in two columns across the content width, starting at
    /// `cursor`, and return the cursor below the taller column.
    pub fn place_in_columns(&mut self, cursor: Cursor, cards: &[Card]) -> Cursor {
        if cards.is_empty() {
            return cursor;
        }

        let page = self.page();
        let sp = self.spacing();
        let width = (page.content_width() - sp.column_gap) / 2.0;
        let heights: Vec<f64> = cards.iter().map(|c| self.measure_card(c, width)).collect();

        let plan = plan_columns(
            &heights,
            &ColumnArea {
                start_y: cursor.y(),
                page_top: page.page_top(),
                usable: page.usable_height(),
                gap: sp.card_gap,
            },
        );
        tracing::debug!(
            cards = cards.len(),
            page_breaks = plan.page_breaks,
            "placed cards in columns"
        );

        let mut cursor = cursor;
        for (card, placement) in cards.iter().zip(&plan.placements) {
            if placement.new_page {
                cursor = self.new_page();
            }
            let x = match placement.side {
                Side::Left => page.margin_left,
                Side::Right => page.margin_left + width + sp.column_gap,
            };
            self.draw_card(cursor.at(placement.y), x, width, card, Fit::Reserved);
        }

        cursor.at(plan.final_y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::style::Color;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn area() -> ColumnArea {
        ColumnArea {
            start_y: 40.0,
            page_top: 40.0,
            usable: 400.0,
            gap: 10.0,
        }
    }

    #[test]
    fn shorter_column_first_ties_left() {
        let plan = plan_columns(&[50.0, 30.0, 10.0], &area());
        let sides: Vec<Side> = plan.placements.iter().map(|p| p.side).collect();
        assert_eq!(sides, vec![Side::Left, Side::Right, Side::Right]);
        assert_eq!(plan.left, 100.0);
        assert_eq!(plan.right, 100.0);
        assert_eq!(plan.final_y(), 100.0);
    }

    #[test]
    fn nine_cards_with_room_for_six_break_once_before_the_seventh() {
        let heights = [100.0, 120.0, 90.0, 110.0, 100.0, 95.0, 80.0, 100.0, 90.0];
        let plan = plan_columns(&heights, &area());
        assert_eq!(plan.page_breaks, 1);
        let breaks: Vec<usize> = plan
            .placements
            .iter()
            .enumerate()
            .filter(|(_, p)| p.new_page)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(breaks, vec![6]);
        // The card after the break opens the left column at the top.
        assert_eq!(plan.placements[6].side, Side::Left);
        assert_eq!(plan.placements[6].y, 40.0);
        // The right column was reset too.
        assert_eq!(plan.placements[7].side, Side::Right);
        assert_eq!(plan.placements[7].y, 40.0);
    }

    #[test]
    fn nothing_crosses_the_usable_height() {
        let heights = [100.0, 120.0, 90.0, 110.0, 100.0, 95.0, 80.0, 100.0, 90.0];
        let plan = plan_columns(&heights, &area());
        for (p, h) in plan.placements.iter().zip(heights) {
            assert!(p.y + h <= area().usable);
        }
    }

    #[test]
    fn imbalance_is_bounded_by_the_largest_card() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let n = rng.gen_range(1..30);
            let heights: Vec<f64> = (0..n).map(|_| rng.gen_range(20.0..300.0)).collect();
            let plan = plan_columns(&heights, &area());
            let largest = heights.iter().cloned().fold(0.0, f64::max);
            // Each column offset includes the gap after its last card.
            assert!(
                (plan.left - plan.right).abs() <= largest + area().gap + 1e-9,
                "{heights:?}"
            );
        }
    }

    #[test]
    fn canvas_places_cards_on_both_sides() {
        let mut canvas = Canvas::new(RenderConfig::default());
        let cursor = canvas.start();
        let cards: Vec<Card> = (0..4)
            .map(|i| Card::new(Color::BLACK, format!("Card {i}")).line("Body"))
            .collect();
        let after = canvas.place_in_columns(cursor, &cards);
        assert_eq!(after.page(), 0);
        assert!(after.y() > cursor.y());

        let page = canvas.page();
        let radius = canvas.spacing().card_radius;
        let xs: Vec<f64> = canvas.surface().pages()[0]
            .body
            .iter()
            .filter_map(|op| match op {
                crate::surface::DrawOp::Rect { x, radius: r, .. } if *r == radius => Some(*x),
                _ => None,
            })
            .collect();
        assert_eq!(xs.len(), 4);
        assert!(xs.iter().any(|x| *x == page.margin_left));
        assert!(xs.iter().any(|x| *x > page.margin_left));
    }

    #[test]
    fn empty_input_leaves_cursor_alone() {
        let mut canvas = Canvas::new(RenderConfig::default());
        let cursor = canvas.start();
        assert_eq!(canvas.place_in_columns(cursor, &[]), cursor);
    }
}
