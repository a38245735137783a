//! Cell-level drawing clipped to a region and to the viewport.
//!
//! Layout regions use signed coordinates and may hang past the terminal
//! edges when it is too small. Every write here is bounds-checked, so a
//! component can draw its whole region and whatever is off-screen is simply
//! dropped.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::symbols::border;
use unicode_width::UnicodeWidthChar;

use crate::core::layout::Region;

pub struct Surface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    region: Region,
}

impl<'a> Surface<'a> {
    /// `area` is the viewport; `region` is relative to its top-left corner.
    pub fn new(buf: &'a mut Buffer, area: Rect, region: Region) -> Self {
        Self { buf, area, region }
    }

    /// Writes `symbol` at (`row`, `col`) inside the region. Returns whether
    /// the cell was on screen.
    pub fn put(&mut self, row: i32, col: i32, symbol: &str, style: Style) -> bool {
        let Some(position) = self.position(row, col) else {
            return false;
        };
        match self.buf.cell_mut(position) {
            Some(cell) => {
                cell.set_symbol(symbol).set_style(style);
                true
            }
            None => false,
        }
    }

    /// Paints `width` blank cells starting at (`row`, `col`).
    pub fn fill(&mut self, row: i32, col: i32, width: u16, style: Style) {
        for offset in 0..i32::from(width) {
            self.put(row, col + offset, " ", style);
        }
    }

    /// Blanks the whole region.
    pub fn clear(&mut self, style: Style) {
        for row in 0..i32::from(self.region.height) {
            self.fill(row, 0, self.region.width, style);
        }
    }

    /// Writes `text` starting at (`row`, `col`), one cell per column of
    /// display width.
    pub fn text(&mut self, row: i32, col: i32, text: &str, style: Style) {
        let mut col = col;
        let mut symbol = [0u8; 4];
        for c in text.chars() {
            let width = c.width().unwrap_or(0) as i32;
            if width == 0 {
                continue;
            }
            self.put(row, col, c.encode_utf8(&mut symbol), style);
            col += width;
        }
    }

    /// Draws a single-line border along the region's edges.
    pub fn border(&mut self, style: Style) {
        let set = border::PLAIN;
        let bottom = i32::from(self.region.height) - 1;
        let right = i32::from(self.region.width) - 1;
        if bottom < 1 || right < 1 {
            return;
        }
        for col in 1..right {
            self.put(0, col, set.horizontal_top, style);
            self.put(bottom, col, set.horizontal_bottom, style);
        }
        for row in 1..bottom {
            self.put(row, 0, set.vertical_left, style);
            self.put(row, right, set.vertical_right, style);
        }
        self.put(0, 0, set.top_left, style);
        self.put(0, right, set.top_right, style);
        self.put(bottom, 0, set.bottom_left, style);
        self.put(bottom, right, set.bottom_right, style);
    }

    /// Maps a region-relative cell to a buffer position, or `None` if it
    /// falls outside the region or the viewport.
    fn position(&self, row: i32, col: i32) -> Option<Position> {
        let inside_region = (0..i32::from(self.region.height)).contains(&row)
            && (0..i32::from(self.region.width)).contains(&col);
        if !inside_region {
            return None;
        }
        let y = self.region.row + row;
        let x = self.region.col + col;
        let inside_area = (0..i32::from(self.area.height)).contains(&y)
            && (0..i32::from(self.area.width)).contains(&x);
        if !inside_area {
            return None;
        }
        Some(Position::new(
            self.area.x + u16::try_from(x).ok()?,
            self.area.y + u16::try_from(y).ok()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn region(row: i32, col: i32, width: u16, height: u16) -> Region {
        Region {
            row,
            col,
            width,
            height,
        }
    }

    #[test]
    fn test_put_translates_into_region() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        let mut surface = Surface::new(&mut buf, area, region(1, 2, 4, 3));
        assert!(surface.put(1, 1, "x", Style::default()));
        assert_eq!(buf[(3, 2)].symbol(), "x");
    }

    #[test]
    fn test_put_outside_region_is_dropped() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        let mut surface = Surface::new(&mut buf, area, region(0, 0, 2, 2));
        assert!(!surface.put(0, 2, "x", Style::default()));
        assert!(!surface.put(-1, 0, "x", Style::default()));
    }

    #[test]
    fn test_put_off_screen_is_dropped() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        let mut surface = Surface::new(&mut buf, area, region(3, -4, 20, 7));
        assert!(!surface.put(0, 0, "x", Style::default()));
        assert!(!surface.put(2, 5, "x", Style::default()));
        assert!(surface.put(0, 4, "x", Style::default()));
        assert_eq!(buf[(0, 3)].symbol(), "x");
    }

    #[test]
    fn test_fill_sets_background() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        let mut surface = Surface::new(&mut buf, area, region(0, 0, 10, 5));
        surface.fill(1, 2, 3, Style::default().bg(Color::Blue));
        assert_eq!(buf[(2, 1)].bg, Color::Blue);
        assert_eq!(buf[(4, 1)].bg, Color::Blue);
        assert_eq!(buf[(5, 1)].bg, Color::Reset);
    }

    #[test]
    fn test_border_corners() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        let mut surface = Surface::new(&mut buf, area, region(1, 1, 5, 3));
        surface.border(Style::default());
        assert_eq!(buf[(1, 1)].symbol(), "┌");
        assert_eq!(buf[(5, 1)].symbol(), "┐");
        assert_eq!(buf[(1, 3)].symbol(), "└");
        assert_eq!(buf[(5, 3)].symbol(), "┘");
        assert_eq!(buf[(3, 1)].symbol(), "─");
        assert_eq!(buf[(1, 2)].symbol(), "│");
    }

    #[test]
    fn test_text_clipped_on_the_left() {
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        let mut surface = Surface::new(&mut buf, area, region(0, -2, 8, 1));
        surface.text(0, 0, "abcdef", Style::default());
        assert_eq!(buf[(0, 0)].symbol(), "c");
        assert_eq!(buf[(3, 0)].symbol(), "f");
    }
}
