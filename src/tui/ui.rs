use ratatui::Frame;

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{ClockFace, DateStrip};

/// Paints one frame. The date strip goes last since it overlaps the
/// clock's bottom row.
pub fn draw_ui(frame: &mut Frame, app: &App) {
    let area = frame.area();
    ClockFace::from_app(app).render(frame, area);
    if app.options.show_date {
        DateStrip::from_app(app).render(frame, area);
    }
}
