//! # ClockFace Component
//!
//! Paints the big digits. Each digit is a 5x3 glyph scaled to 5x6 terminal
//! cells; filled cells get the ink colour as background, empty cells the
//! terminal default.
//!
//! ```text
//! col: 1      8         16  20     27         35  39     46
//!      ██████ ██████    ██  ██████ ██████     ██  ██████ ██████
//!      MM     MM        :   SS     SS         :   extra pair
//! ```
//!
//! The extra pair and its colon only appear with the wide footprint.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::core::countdown::DisplayDigits;
use crate::core::glyph::{CELL_WIDTH, Glyph};
use crate::core::layout::{NORMAL_WIDTH, Region};
use crate::core::options::InkColor;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::surface::Surface;

/// Row of the top glyph cell inside the clock region.
const DIGIT_ROW: i32 = 1;
/// Left column of each digit: minutes, seconds, extra pair.
const MINUTE_COLS: [i32; 2] = [1, 8];
const SECOND_COLS: [i32; 2] = [20, 27];
const EXTRA_COLS: [i32; 2] = [39, 46];
const COLON_COL: i32 = 16;
const EXTRA_COLON_COL: i32 = NORMAL_WIDTH as i32;
const COLON_ROWS: [i32; 2] = [2, 4];

pub struct ClockFace {
    pub region: Region,
    pub digits: DisplayDigits,
    pub with_seconds: bool,
    pub colon_lit: bool,
    pub color: InkColor,
    pub bold: bool,
    pub boxed: bool,
}

impl ClockFace {
    pub fn from_app(app: &App) -> Self {
        Self {
            region: app.layout.clock().region(),
            digits: app.countdown.digits(),
            with_seconds: app.layout.with_seconds(),
            colon_lit: app.separator_lit(),
            color: app.options.color,
            bold: app.options.bold,
            boxed: app.options.boxed,
        }
    }

    fn ink(&self) -> Style {
        Style::default().bg(ink_color(self.color, self.bold))
    }

    fn paint_digit(&self, surface: &mut Surface, digit: u8, left: i32) {
        let ink = self.ink();
        let paper = Style::reset();
        for (row, col, filled) in Glyph::for_digit(digit).cells() {
            let style = if filled { ink } else { paper };
            surface.fill(
                DIGIT_ROW + i32::from(row),
                left + i32::from(col * CELL_WIDTH),
                CELL_WIDTH,
                style,
            );
        }
    }

    fn paint_colon(&self, surface: &mut Surface, col: i32, lit: bool) {
        let style = if lit { self.ink() } else { Style::reset() };
        for row in COLON_ROWS {
            surface.fill(row, col, CELL_WIDTH, style);
        }
    }
}

impl Component for ClockFace {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut surface = Surface::new(frame.buffer_mut(), area, self.region);

        for (digit, left) in self.digits.minutes.into_iter().zip(MINUTE_COLS) {
            self.paint_digit(&mut surface, digit, left);
        }
        self.paint_colon(&mut surface, COLON_COL, self.colon_lit);
        for (digit, left) in self.digits.seconds.into_iter().zip(SECOND_COLS) {
            self.paint_digit(&mut surface, digit, left);
        }

        if self.with_seconds {
            self.paint_colon(&mut surface, EXTRA_COLON_COL, true);
            for (digit, left) in self.digits.extra.into_iter().zip(EXTRA_COLS) {
                self.paint_digit(&mut surface, digit, left);
            }
        }

        if self.boxed {
            surface.border(Style::default());
        }
    }
}

/// Terminal colour for an ink index; bold picks the bright variant.
pub fn ink_color(color: InkColor, bold: bool) -> Color {
    match (color.index(), bold) {
        (0, false) => Color::Black,
        (1, false) => Color::Red,
        (2, false) => Color::Green,
        (3, false) => Color::Yellow,
        (4, false) => Color::Blue,
        (5, false) => Color::Magenta,
        (6, false) => Color::Cyan,
        (_, false) => Color::Gray,
        (0, true) => Color::DarkGray,
        (1, true) => Color::LightRed,
        (2, true) => Color::LightGreen,
        (3, true) => Color::LightYellow,
        (4, true) => Color::LightBlue,
        (5, true) => Color::LightMagenta,
        (6, true) => Color::LightCyan,
        (_, true) => Color::White,
    }
}

/// Foreground style for text drawn in ink.
pub fn ink_text_style(color: InkColor, bold: bool) -> Style {
    let style = Style::default().fg(ink_color(color, bold));
    if bold {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::Viewport;
    use crate::test_support::{at, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    fn draw(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                ClockFace::from_app(app).render(f, area);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn test_paints_full_duration() {
        // 25:00 at the top-left corner
        let buffer = draw(&test_app(), 80, 24);

        // "2", top row all filled
        assert_eq!(buffer[(1, 1)].bg, Color::Red);
        assert_eq!(buffer[(6, 1)].bg, Color::Red);
        // "2", second row only the right column
        assert_eq!(buffer[(1, 2)].bg, Color::Reset);
        assert_eq!(buffer[(5, 2)].bg, Color::Red);
        // "5", second row only the left column
        assert_eq!(buffer[(8, 2)].bg, Color::Red);
        assert_eq!(buffer[(12, 2)].bg, Color::Reset);
        // "0" in the seconds, hollow middle
        assert_eq!(buffer[(20, 3)].bg, Color::Red);
        assert_eq!(buffer[(22, 3)].bg, Color::Reset);
    }

    #[test]
    fn test_colon_painted() {
        let buffer = draw(&test_app(), 80, 24);
        assert_eq!(buffer[(16, 2)].bg, Color::Red);
        assert_eq!(buffer[(17, 4)].bg, Color::Red);
        assert_eq!(buffer[(16, 3)].bg, Color::Reset);
    }

    #[test]
    fn test_blinking_colon_goes_dark_on_even_seconds() {
        let mut app = test_app();
        app.options.blink = true;
        app.step_at(at(2));
        let buffer = draw(&app, 80, 24);
        assert_eq!(buffer[(16, 2)].bg, Color::Reset);

        app.step_at(at(3));
        let buffer = draw(&app, 80, 24);
        assert_eq!(buffer[(16, 2)].bg, Color::Red);
    }

    #[test]
    fn test_follows_layout_and_colour() {
        let mut app = test_app();
        app.layout.move_and_resize(5, 10, NORMAL_WIDTH, 7);
        app.options.color = InkColor::new(2).unwrap();
        let buffer = draw(&app, 80, 24);
        assert_eq!(buffer[(11, 6)].bg, Color::Green);
        assert_eq!(buffer[(1, 1)].bg, Color::Reset);
    }

    #[test]
    fn test_bold_uses_bright_ink() {
        let mut app = test_app();
        app.options.bold = true;
        let buffer = draw(&app, 80, 24);
        assert_eq!(buffer[(1, 1)].bg, Color::LightRed);
    }

    #[test]
    fn test_extra_pair_only_with_wide_footprint() {
        let mut app = test_app();
        let buffer = draw(&app, 80, 24);
        assert_eq!(buffer[(39, 1)].bg, Color::Reset);

        app.layout.toggle_seconds_width();
        let buffer = draw(&app, 80, 24);
        // extra pair shows "00"
        assert_eq!(buffer[(39, 1)].bg, Color::Red);
        assert_eq!(buffer[(35, 2)].bg, Color::Red);
    }

    #[test]
    fn test_box_outlines_region() {
        let mut app = test_app();
        app.options.boxed = true;
        let buffer = draw(&app, 80, 24);
        assert_eq!(buffer[(0, 0)].symbol(), "┌");
        assert_eq!(buffer[(34, 0)].symbol(), "┐");
        assert_eq!(buffer[(0, 6)].symbol(), "└");
    }

    #[test]
    fn test_tiny_viewport_draws_without_overflow() {
        let mut app = test_app();
        app.resize(Viewport::new(3, 12));
        app.options.boxed = true;
        let buffer = draw(&app, 12, 3);
        assert_eq!(buffer.area, Rect::new(0, 0, 12, 3));
        assert_eq!(buffer[(1, 1)].bg, Color::Red);
    }

    #[test]
    fn test_ink_colour_table() {
        let white = InkColor::new(7).unwrap();
        assert_eq!(ink_color(white, false), Color::Gray);
        assert_eq!(ink_color(white, true), Color::White);
        assert_eq!(ink_color(InkColor::default(), false), Color::Red);
    }
}
