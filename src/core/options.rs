//! # Display Options
//!
//! The flat option set toggled by keys and startup flags. Placement
//! (free / centred / rebounding) and the seconds footprint are not here:
//! both change geometry, so they live with the
//! [`Layout`](crate::core::layout::Layout).

use std::time::Duration;

/// Default redraw delay when nothing is pressed.
pub const DEFAULT_DELAY_SECS: u64 = 1;
/// Upper bound (exclusive) for the whole-second delay.
pub const MAX_DELAY_SECS: u64 = 100;
/// Upper bound (exclusive) for the nanosecond delay.
pub const MAX_DELAY_NANOS: u32 = 1_000_000_000;

/// One of the eight basic terminal colours, by index.
///
/// ```text
/// 0 black  1 red  2 green  3 yellow  4 blue  5 magenta  6 cyan  7 white
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkColor(u8);

impl InkColor {
    pub const RED: InkColor = InkColor(1);

    /// Returns `None` outside `0..=7`.
    pub fn new(index: u8) -> Option<Self> {
        (index < 8).then_some(Self(index))
    }

    /// Maps an ASCII digit key to a colour.
    pub fn from_key(c: char) -> Option<Self> {
        c.to_digit(10).and_then(|d| Self::new(d as u8))
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

impl Default for InkColor {
    fn default() -> Self {
        Self::RED
    }
}

/// Pause between redraws while no key is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delay {
    pub secs: u64,
    pub nanos: u32,
}

impl Delay {
    pub fn as_duration(self) -> Duration {
        Duration::new(self.secs, self.nanos)
    }
}

impl Default for Delay {
    fn default() -> Self {
        Self {
            secs: DEFAULT_DELAY_SECS,
            nanos: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub show_date: bool,
    pub bold: bool,
    pub blink: bool,
    pub boxed: bool,
    pub twelve_hour: bool,
    pub utc: bool,
    pub no_quit: bool,
    pub screensaver: bool,
    pub color: InkColor,
    pub delay: Delay,
    pub date_format: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            show_date: false,
            bold: false,
            blink: false,
            boxed: false,
            twelve_hour: false,
            utc: false,
            no_quit: false,
            screensaver: false,
            color: InkColor::default(),
            delay: Delay::default(),
            date_format: String::from("%F"),
        }
    }
}
