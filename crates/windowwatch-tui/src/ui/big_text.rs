//! Block-digit rendering for the countdown cards.

use ratatui::prelude::*;
use ratatui::widgets::Widget;

pub const GLYPH_HEIGHT: u16 = 5;
const GLYPH_WIDTH: u16 = 3;
const SPACING: u16 = 1;

const DIGITS: [[&str; 5]; 10] = [
    ["###", "# #", "# #", "# #", "###"],
    [" # ", "## ", " # ", " # ", "###"],
    ["###", "  #", "###", "#  ", "###"],
    ["###", "  #", "###", "  #", "###"],
    ["# #", "# #", "###", "  #", "  #"],
    ["###", "#  ", "###", "  #", "###"],
    ["###", "#  ", "###", "# #", "###"],
    ["###", "  #", "  #", "  #", "  #"],
    ["###", "# #", "###", "# #", "###"],
    ["###", "# #", "###", "  #", "###"],
];

pub struct BigText<'a> {
    text: &'a str,
    style: Style,
}

impl<'a> BigText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Columns needed to draw `text`.
    pub fn width(text: &str) -> u16 {
        let count = text.chars().count() as u16;
        (count * (GLYPH_WIDTH + SPACING)).saturating_sub(SPACING)
    }
}

impl Widget for BigText<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut x = area.left();

        for ch in self.text.chars() {
            if x + GLYPH_WIDTH > area.right() {
                break;
            }

            // Anything that is not a digit renders as blank space.
            if let Some(rows) = ch.to_digit(10).map(|d| DIGITS[d as usize]) {
                for (dy, row) in rows.iter().enumerate().take(area.height as usize) {
                    for (dx, _) in row.char_indices().filter(|(_, c)| *c == '#') {
                        if let Some(cell) = buf.cell_mut((x + dx as u16, area.top() + dy as u16)) {
                            cell.set_style(self.style).set_symbol("█");
                        }
                    }
                }
            }

            x += GLYPH_WIDTH + SPACING;
        }
    }
}
