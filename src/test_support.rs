//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use chrono::{DateTime, TimeDelta, Utc};

use crate::core::countdown::Countdown;
use crate::core::layout::{Layout, Placement, Viewport};
use crate::core::options::Options;
use crate::core::state::App;

/// A fixed start instant: 2023-11-14 22:13:20 UTC, a Tuesday.
pub fn epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// `secs` seconds after (or before, if negative) [`epoch`].
pub fn at(secs: i64) -> DateTime<Utc> {
    epoch() + TimeDelta::seconds(secs)
}

/// Creates a 25-minute App on an 80x24 terminal, started at [`epoch`].
pub fn test_app() -> App {
    App::from_parts(
        Countdown::start_at(25, epoch()),
        Layout::new(Viewport::new(24, 80), false, Placement::Free),
        Options::default(),
        epoch(),
    )
}
