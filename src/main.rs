use clap::Parser;
use pomoclock::Session;
use pomoclock::core::config::{self, CliOverrides};
use pomoclock::tui::{self, Outcome, target};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "pomoclock",
    about = "Seven-segment pomodoro countdown for the terminal",
    disable_version_flag = true
)]
struct Args {
    /// Show box
    #[arg(short = 'x', long = "box")]
    boxed: bool,

    /// Set the timer at the center of the terminal
    #[arg(short = 'c', long)]
    center: bool,

    /// Set the clock color
    #[arg(short = 'C', long, value_name = "0-7", value_parser = clap::value_parser!(u8).range(0..8))]
    color: Option<u8>,

    /// Use bold colors
    #[arg(short = 'b', long)]
    bold: bool,

    /// Display the timer on the specified terminal
    #[arg(short = 'T', long, value_name = "TTY")]
    tty: Option<PathBuf>,

    /// Rebound the timer off the terminal edges
    #[arg(short = 'r', long)]
    rebound: bool,

    /// Don't quit on keypress
    #[arg(short = 'n', long)]
    no_quit: bool,

    /// Enable blinking colon
    #[arg(short = 'B', long)]
    blink: bool,

    /// Quit on any keypress
    #[arg(short = 's', long)]
    screensaver: bool,

    /// Show elapsed minutes as a third digit pair
    #[arg(short = 'S', long)]
    seconds: bool,

    /// Show the date under the timer
    #[arg(short = 'D', long)]
    date: bool,

    /// Date format (strftime syntax)
    #[arg(short = 'f', long, value_name = "FORMAT")]
    format: Option<String>,

    /// Format the date in UTC
    #[arg(short = 'u', long)]
    utc: bool,

    /// Append [AM]/[PM] to the date
    #[arg(short = 't', long)]
    twelve_hour: bool,

    /// Delay between two redraws, in seconds
    #[arg(short = 'd', long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(0..100))]
    delay: Option<u64>,

    /// Additional delay between two redraws, in nanoseconds
    #[arg(short = 'a', long, value_name = "NANOSECONDS", value_parser = clap::value_parser!(u32).range(0..1_000_000_000))]
    nsdelay: Option<u32>,

    /// Show version
    #[arg(short = 'v', long)]
    version: bool,

    /// Show some info about pomoclock
    #[arg(short = 'i', long)]
    info: bool,

    /// Take a five (short) or ten (long) minute break instead of working
    #[arg(value_enum)]
    session: Option<Session>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            session: self.session.unwrap_or_default(),
            color: self.color,
            bold: self.bold,
            boxed: self.boxed,
            center: self.center,
            rebound: self.rebound,
            blink: self.blink,
            seconds: self.seconds,
            date: self.date,
            date_format: self.format.clone(),
            utc: self.utc,
            twelve_hour: self.twelve_hour,
            no_quit: self.no_quit,
            screensaver: self.screensaver,
            delay_secs: self.delay,
            delay_nanos: self.nsdelay,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.version {
        println!("pomoclock {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }
    if args.info {
        println!(
            "pomoclock {}: a seven-segment pomodoro countdown in the tradition of tty-clock",
            env!("CARGO_PKG_VERSION")
        );
        return ExitCode::SUCCESS;
    }

    // Initialize file logger - writes to ~/.pomoclock/pomoclock.log
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Some(dir) = config::config_dir()
        && fs::create_dir_all(&dir).is_ok()
        && let Ok(log_file) = File::create(dir.join("pomoclock.log"))
    {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let target = match args.tty.as_deref().map(target::open_target).transpose() {
        Ok(target) => target,
        Err(e) => {
            eprintln!("pomoclock: error: {e}.");
            return ExitCode::FAILURE;
        }
    };

    let file_config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("pomoclock: error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let resolved = config::resolve(&file_config, &args.overrides());

    log::info!(
        "Pomoclock starting: {} session of {} minutes",
        resolved.session.label(),
        resolved.minutes
    );

    match tui::run(&resolved, target) {
        Ok(Outcome::Expired) => {
            println!("Time ended!");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Quit) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Terminal error: {}", e);
            eprintln!("pomoclock: error: {e}");
            ExitCode::FAILURE
        }
    }
}
