//! # Application State
//!
//! Everything the clock knows, in one value owned by the event loop and
//! passed by reference to whoever needs it.
//!
//! ```text
//! App
//! ├── countdown: Countdown    // start time, duration, remaining
//! ├── layout: Layout          // clock + date rectangles, placement
//! ├── options: Options        // colour, bold, box, blink, delay, ...
//! ├── now: DateTime<Utc>      // wall clock as of the last step
//! └── date_text: String       // formatted date strip
//! ```
//!
//! Key-driven changes go through `update(state, action)` in action.rs.
//! Time-driven changes go through [`App::step_at`].

use chrono::{DateTime, Local, Utc};
use log::warn;
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

use crate::core::config::ResolvedConfig;
use crate::core::countdown::{Countdown, Tick};
use crate::core::layout::{Layout, Viewport};
use crate::core::options::Options;

pub struct App {
    pub countdown: Countdown,
    pub layout: Layout,
    pub options: Options,
    now: DateTime<Utc>,
    date_text: String,
}

impl App {
    /// Builds the state for a fresh session starting now.
    pub fn from_config(config: &ResolvedConfig, viewport: Viewport) -> Self {
        let now = Utc::now();
        Self::from_parts(
            Countdown::start_at(config.minutes, now),
            Layout::new(viewport, config.show_seconds, config.placement),
            config.options.clone(),
            now,
        )
    }

    pub fn from_parts(
        countdown: Countdown,
        layout: Layout,
        options: Options,
        now: DateTime<Utc>,
    ) -> Self {
        let mut app = Self {
            countdown,
            layout,
            options,
            now,
            date_text: String::new(),
        };
        app.refresh_date();
        app
    }

    /// One pass of the clock: bounce, count down, reformat the date.
    pub fn step_at(&mut self, now: DateTime<Utc>) -> Tick {
        self.now = now;
        self.layout.rebound();
        let tick = self.countdown.tick_at(now);
        self.refresh_date();
        tick
    }

    /// Re-fits the geometry to a resized terminal.
    pub fn resize(&mut self, viewport: Viewport) {
        self.layout.fit_viewport(viewport);
    }

    /// Reformats the date strip and lets the layout re-centre it.
    pub fn refresh_date(&mut self) {
        self.date_text = self.format_date();
        self.layout
            .set_date_width(u16::try_from(self.date_text.width()).unwrap_or(u16::MAX));
    }

    pub fn date_text(&self) -> &str {
        &self.date_text
    }

    /// Whether the colon is drawn in ink this frame. Blinking alternates on
    /// the parity of the wall-clock second.
    pub fn separator_lit(&self) -> bool {
        !self.options.blink || self.now.timestamp() % 2 != 0
    }

    fn format_date(&self) -> String {
        let mut text = String::new();
        let result = if self.options.utc {
            write_date(&mut text, &self.now, &self.options)
        } else {
            write_date(&mut text, &self.now.with_timezone(&Local), &self.options)
        };
        if result.is_err() {
            warn!("Could not format date with {:?}", self.options.date_format);
            text.clear();
        }
        text
    }
}

fn write_date<Tz>(text: &mut String, now: &DateTime<Tz>, options: &Options) -> std::fmt::Result
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    write!(text, "{}", now.format(&options.date_format))?;
    if options.twelve_hour {
        write!(text, " [{}]", now.format("%p"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::Placement;
    use crate::test_support::{at, test_app};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.countdown.configured_minutes(), 25);
        assert_eq!(app.layout.placement(), Placement::Free);
        assert_eq!(app.date_text().len(), 10);
    }

    #[test]
    fn test_step_counts_down() {
        let mut app = test_app();
        assert_eq!(app.step_at(at(1)), Tick::Running);
        assert_eq!(app.countdown.digits().to_string(), "24:59");
    }

    #[test]
    fn test_step_rebounds() {
        let mut app = test_app();
        app.layout.toggle_rebound();
        app.step_at(at(1));
        assert_eq!((app.layout.clock().row, app.layout.clock().col), (1, 1));
    }

    #[test]
    fn test_utc_date_text() {
        let mut app = test_app();
        app.options.utc = true;
        app.options.date_format = "%Y-%m-%d %H:%M".to_string();
        app.refresh_date();
        assert_eq!(app.date_text(), "2023-11-14 22:13");
    }

    #[test]
    fn test_date_width_follows_text() {
        let mut app = test_app();
        app.options.date_format = "%A".to_string();
        app.options.utc = true;
        app.refresh_date();
        assert_eq!(app.date_text(), "Tuesday");
        assert_eq!(app.layout.date().width, 7 + 2);
    }

    #[test]
    fn test_separator_blinks_on_second_parity() {
        let mut app = test_app();
        app.options.blink = true;
        app.step_at(at(0));
        let first = app.separator_lit();
        app.step_at(at(1));
        assert_ne!(app.separator_lit(), first);
    }

    #[test]
    fn test_separator_steady_without_blink() {
        let mut app = test_app();
        app.step_at(at(0));
        assert!(app.separator_lit());
        app.step_at(at(1));
        assert!(app.separator_lit());
    }

    #[test]
    fn test_resize_refits_layout() {
        let mut app = test_app();
        app.resize(Viewport::new(3, 20));
        assert_eq!(app.layout.clock().height, 3);
        assert_eq!(app.layout.clock().width, 20);
    }
}
