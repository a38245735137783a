//! # DateStrip Component
//!
//! The small strip straddling the bottom edge of the clock. Its rectangle
//! comes straight from the layout, which keeps it centred under the clock;
//! this component only blanks it, optionally boxes it, and writes the text
//! on its middle row.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::core::layout::{DATE_HEIGHT, Region};
use crate::core::options::InkColor;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::clock_face::ink_text_style;
use crate::tui::components::surface::Surface;

pub struct DateStrip {
    pub region: Region,
    pub text: String,
    pub color: InkColor,
    pub bold: bool,
    pub boxed: bool,
}

impl DateStrip {
    pub fn from_app(app: &App) -> Self {
        Self {
            region: app.layout.date(),
            text: app.date_text().to_string(),
            color: app.options.color,
            bold: app.options.bold,
            boxed: app.options.boxed,
        }
    }
}

impl Component for DateStrip {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut surface = Surface::new(frame.buffer_mut(), area, self.region);
        surface.clear(Style::reset());
        if self.boxed {
            surface.border(Style::default());
        }
        surface.text(
            i32::from(DATE_HEIGHT / 2),
            1,
            &self.text,
            ink_text_style(self.color, self.bold),
        );
    }
}
