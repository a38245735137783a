//! Pomoclock library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Which kind of session to time. Work is the default and has no
/// command-line spelling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Session {
    #[default]
    #[value(skip)]
    Work,
    Short,
    Long,
}

impl Session {
    pub fn label(self) -> &'static str {
        match self {
            Session::Work => "work",
            Session::Short => "short break",
            Session::Long => "long break",
        }
    }
}
