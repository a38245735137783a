//! # Countdown Model
//!
//! Tracks how much of the session is left at one-second granularity.
//!
//! ```text
//! remaining = max(0, minutes * 60 - (now - start))
//! ```
//!
//! The wall clock can jump. Two rules keep the display sane:
//!
//! - `now` before `start` counts as zero elapsed, so `remaining` never
//!   exceeds the configured duration.
//! - `remaining` is carried between ticks and only ever goes down. A clock
//!   stepped backwards freezes the display until real time catches up,
//!   instead of counting up again.
//!
//! Reaching zero yields [`Tick::Expired`] exactly once. Every tick after that
//! yields [`Tick::Finished`].

use chrono::{DateTime, Utc};
use log::{info, trace};

/// Largest value a two-digit display field can show.
pub const MAX_FIELD: u64 = 99;

/// The digits shown for one frame.
///
/// The "hour" pair of a wall clock shows remaining minutes here and the
/// "minute" pair shows remaining seconds. `extra` feeds the optional third
/// pair and holds whole minutes elapsed since the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayDigits {
    pub minutes: [u8; 2],
    pub seconds: [u8; 2],
    pub extra: [u8; 2],
}

impl DisplayDigits {
    fn from_seconds(remaining: u64, elapsed: u64) -> Self {
        Self {
            minutes: split((remaining / 60).min(MAX_FIELD)),
            seconds: split(remaining % 60),
            extra: split((elapsed / 60).min(MAX_FIELD)),
        }
    }
}

impl std::fmt::Display for DisplayDigits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}:{}{}",
            self.minutes[0], self.minutes[1], self.seconds[0], self.seconds[1]
        )
    }
}

fn split(value: u64) -> [u8; 2] {
    [(value / 10 % 10) as u8, (value % 10) as u8]
}

/// Result of one [`Countdown::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Time is still left.
    Running,
    /// Remaining time reached zero on this tick.
    Expired,
    /// Remaining time reached zero on an earlier tick.
    Finished,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    start: DateTime<Utc>,
    minutes: u32,
    /// Smallest remaining value observed so far.
    remaining: u64,
    elapsed: u64,
    expired: bool,
    digits: DisplayDigits,
}

impl Countdown {
    /// Starts a countdown of `minutes` at the current wall-clock time.
    pub fn start(minutes: u32) -> Self {
        Self::start_at(minutes, Utc::now())
    }

    pub fn start_at(minutes: u32, start: DateTime<Utc>) -> Self {
        let total = u64::from(minutes) * 60;
        Self {
            start,
            minutes,
            remaining: total,
            elapsed: 0,
            expired: false,
            digits: DisplayDigits::from_seconds(total, 0),
        }
    }

    pub fn tick(&mut self) -> Tick {
        self.tick_at(Utc::now())
    }

    /// Recomputes the remaining time against `now`.
    pub fn tick_at(&mut self, now: DateTime<Utc>) -> Tick {
        let elapsed = u64::try_from((now - self.start).num_seconds()).unwrap_or(0);
        let fresh = self.total_seconds().saturating_sub(elapsed);

        if fresh > self.remaining {
            trace!("Clock stepped back, holding at {}s", self.remaining);
        } else {
            self.remaining = fresh;
            self.elapsed = elapsed.min(self.total_seconds());
        }
        self.digits = DisplayDigits::from_seconds(self.remaining, self.elapsed);
        trace!("Tick: {} left", self.digits);

        if self.remaining > 0 {
            Tick::Running
        } else if self.expired {
            Tick::Finished
        } else {
            self.expired = true;
            info!("Countdown of {} minutes expired", self.minutes);
            Tick::Expired
        }
    }

    pub fn digits(&self) -> DisplayDigits {
        self.digits
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining
    }

    pub fn configured_minutes(&self) -> u32 {
        self.minutes
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    fn total_seconds(&self) -> u64 {
        u64::from(self.minutes) * 60
    }
}
