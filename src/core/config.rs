//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → CLI flags.
//!
//! Config lives at `~/.pomoclock/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use chrono::format::{Item, StrftimeItems};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::Session;
use crate::core::countdown::MAX_FIELD;
use crate::core::layout::Placement;
use crate::core::options::{
    DEFAULT_DELAY_SECS, Delay, InkColor, MAX_DELAY_NANOS, MAX_DELAY_SECS, Options,
};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PomoConfig {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TimerConfig {
    pub work_minutes: Option<u32>,
    pub short_break_minutes: Option<u32>,
    pub long_break_minutes: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub color: Option<u8>,
    pub bold: Option<bool>,
    pub boxed: Option<bool>,
    pub center: Option<bool>,
    pub rebound: Option<bool>,
    pub blink: Option<bool>,
    pub seconds: Option<bool>,
    pub date: Option<bool>,
    pub date_format: Option<String>,
    pub utc: Option<bool>,
    pub twelve_hour: Option<bool>,
    pub no_quit: Option<bool>,
    pub screensaver: Option<bool>,
    pub delay_secs: Option<u64>,
    pub delay_nanos: Option<u32>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_SHORT_BREAK_MINUTES: u32 = 5;
pub const DEFAULT_LONG_BREAK_MINUTES: u32 = 10;
pub const DEFAULT_DATE_FORMAT: &str = "%F";

// ============================================================================
// CLI Overrides
// ============================================================================

/// Values taken from the command line. Switches can only turn things on;
/// `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub session: Session,
    pub color: Option<u8>,
    pub bold: bool,
    pub boxed: bool,
    pub center: bool,
    pub rebound: bool,
    pub blink: bool,
    pub seconds: bool,
    pub date: bool,
    pub date_format: Option<String>,
    pub utc: bool,
    pub twelve_hour: bool,
    pub no_quit: bool,
    pub screensaver: bool,
    pub delay_secs: Option<u64>,
    pub delay_nanos: Option<u32>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub session: Session,
    pub minutes: u32,
    pub placement: Placement,
    pub show_seconds: bool,
    pub options: Options,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.pomoclock`, where the config and the log file live.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".pomoclock"))
}

/// Returns the path to `~/.pomoclock/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.pomoclock/config.toml`.
pub fn load_config() -> Result<PomoConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(PomoConfig::default())
        }
    }
}

/// Load config from `path`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PomoConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<PomoConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(PomoConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PomoConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Pomoclock Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → CLI flags.

# [timer]
# work_minutes = 25                  # no argument
# short_break_minutes = 5            # `pomoclock short`
# long_break_minutes = 10            # `pomoclock long`

# [display]
# color = 1                          # 0 black, 1 red, 2 green, 3 yellow,
#                                    # 4 blue, 5 magenta, 6 cyan, 7 white
# bold = false
# boxed = false
# center = false
# rebound = false                    # bounce around the terminal
# blink = false                      # blink the colon once a second
# seconds = false                    # show elapsed minutes as a third pair
# date = false
# date_format = "%F"                 # strftime syntax
# utc = false
# twelve_hour = false                # append [AM]/[PM] to the date
# no_quit = false
# screensaver = false                # any key quits
# delay_secs = 1                     # 0-99
# delay_nanos = 0                    # 0-999999999
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → CLI.
pub fn resolve(config: &PomoConfig, cli: &CliOverrides) -> ResolvedConfig {
    let timer = &config.timer;
    let display = &config.display;

    let minutes = match cli.session {
        Session::Work => timer.work_minutes.unwrap_or(DEFAULT_WORK_MINUTES),
        Session::Short => timer
            .short_break_minutes
            .unwrap_or(DEFAULT_SHORT_BREAK_MINUTES),
        Session::Long => timer
            .long_break_minutes
            .unwrap_or(DEFAULT_LONG_BREAK_MINUTES),
    };
    let minutes = clamp_minutes(minutes);

    // Colour: CLI → config → default
    let color = cli
        .color
        .or(display.color)
        .and_then(|index| {
            let color = InkColor::new(index);
            if color.is_none() {
                warn!("Colour {} out of range 0-7, using default", index);
            }
            color
        })
        .unwrap_or_default();

    let delay = Delay {
        secs: match cli.delay_secs.or(display.delay_secs) {
            Some(secs) if secs < MAX_DELAY_SECS => secs,
            Some(secs) => {
                warn!("delay_secs {} out of range 0-99, using default", secs);
                DEFAULT_DELAY_SECS
            }
            None => DEFAULT_DELAY_SECS,
        },
        nanos: match cli.delay_nanos.or(display.delay_nanos) {
            Some(nanos) if nanos < MAX_DELAY_NANOS => nanos,
            Some(nanos) => {
                warn!("delay_nanos {} out of range, using 0", nanos);
                0
            }
            None => 0,
        },
    };

    let date_format = cli
        .date_format
        .clone()
        .or_else(|| display.date_format.clone())
        .filter(|format| {
            let valid = is_valid_date_format(format);
            if !valid {
                warn!("Invalid date format {:?}, using default", format);
            }
            valid
        })
        .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());

    // Centring wins over rebounding when both are asked for.
    let placement = if cli.center || display.center.unwrap_or(false) {
        Placement::Centered
    } else if cli.rebound || display.rebound.unwrap_or(false) {
        Placement::Rebounding
    } else {
        Placement::Free
    };

    let flag = |cli: bool, file: Option<bool>| cli || file.unwrap_or(false);

    ResolvedConfig {
        session: cli.session,
        minutes,
        placement,
        show_seconds: flag(cli.seconds, display.seconds),
        options: Options {
            show_date: flag(cli.date, display.date),
            bold: flag(cli.bold, display.bold),
            blink: flag(cli.blink, display.blink),
            boxed: flag(cli.boxed, display.boxed),
            twelve_hour: flag(cli.twelve_hour, display.twelve_hour),
            utc: flag(cli.utc, display.utc),
            no_quit: flag(cli.no_quit, display.no_quit),
            screensaver: flag(cli.screensaver, display.screensaver),
            color,
            delay,
            date_format,
        },
    }
}

/// The minutes field is two digits wide.
fn clamp_minutes(minutes: u32) -> u32 {
    let max = MAX_FIELD as u32;
    if minutes > max {
        warn!("{} minutes does not fit the display, using {}", minutes, max);
        max
    } else {
        minutes
    }
}

/// Whether chrono understands every specifier in `format`.
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
