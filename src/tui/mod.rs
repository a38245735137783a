//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, runs the clock loop, and
//! translates keyboard events into core `Key` values.
//!
//! This is the only module that knows about ratatui, crossterm and signals.
//!
//! ## Loop
//!
//! One thread, one loop. Each pass:
//!
//! 1. Leave if a stop was requested (SIGTERM, SIGINT, Ctrl+C).
//! 2. Re-fit geometry if the terminal was resized (SIGWINCH, a crossterm
//!    resize event, or a new window size on the `-T` device).
//! 3. Bounce, count down, reformat the date (`App::step_at`). Expiry ends
//!    the loop.
//! 4. Draw.
//! 5. Wait up to the configured delay for one key and dispatch it.
//!
//! Steps 1 to 4 are [`run_pass`]. Signal handlers only flip atomic flags;
//! all real work happens here, on the next pass.
//!
//! With `-T` the device replaces the controlling terminal entirely: the
//! layout is sized from it, it goes into raw mode, and keys are read from
//! it.

mod component;
pub mod components;
pub mod event;
pub mod target;
pub mod ui;

use chrono::{DateTime, Utc};
use log::info;
use std::fs::File;
use std::io::{Write, stdout};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::Rect;
use ratatui::{Terminal, TerminalOptions};

use crate::core::action::{Effect, handle_key};
use crate::core::config::ResolvedConfig;
use crate::core::countdown::Tick;
use crate::core::layout::Viewport;
use crate::core::state::App;
use crate::tui::event::{TuiEvent, poll_device_timeout, poll_event_timeout};
use crate::tui::target::RawMode;

/// How the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The user quit, or a stop signal arrived.
    Quit,
    /// The countdown reached zero.
    Expired,
}

type Output = Box<dyn Write + Send>;
type ClockTerminal = Terminal<CrosstermBackend<Output>>;

/// Where frames go: the alternate target if one was given, else stdout.
fn output(target: Option<&File>) -> std::io::Result<Output> {
    let out: Output = match target {
        Some(file) => Box::new(file.try_clone()?),
        None => Box::new(stdout()),
    };
    Ok(out)
}

fn area_of(viewport: Viewport) -> Rect {
    Rect::new(0, 0, viewport.cols, viewport.rows)
}

/// Size of the terminal being drawn to.
fn screen_size(terminal: &ClockTerminal, target: Option<&File>) -> std::io::Result<Viewport> {
    match target {
        Some(device) => target::window_size(device),
        None => terminal
            .size()
            .map(|size| Viewport::new(size.height, size.width)),
    }
}

struct TerminalModeGuard {
    out: Output,
    /// Set when drawing to a `-T` device, which is raw instead of the
    /// controlling terminal.
    device: Option<RawMode>,
}

impl TerminalModeGuard {
    fn new(out: Output, target: Option<&File>) -> std::io::Result<Self> {
        let device = match target {
            Some(file) => Some(RawMode::enter(file)?),
            None => {
                enable_raw_mode()?;
                None
            }
        };
        let mut guard = Self { out, device };
        execute!(guard.out, EnterAlternateScreen, Hide)?;
        info!("Terminal modes enabled (raw, alternate screen, hidden cursor)");
        Ok(guard)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        if self.device.is_none() {
            let _ = disable_raw_mode();
        }
    }
}

/// Flags raised by signal handlers and consumed by the loop.
#[derive(Clone, Default)]
pub struct SignalFlags {
    pub stop: Arc<AtomicBool>,
    pub resize: Arc<AtomicBool>,
}

impl SignalFlags {
    #[cfg(unix)]
    fn register() -> std::io::Result<Self> {
        use signal_hook::consts::{SIGINT, SIGTERM, SIGWINCH};
        use signal_hook::flag;

        let flags = Self::default();
        flag::register(SIGTERM, Arc::clone(&flags.stop))?;
        flag::register(SIGINT, Arc::clone(&flags.stop))?;
        flag::register(SIGWINCH, Arc::clone(&flags.resize))?;
        Ok(flags)
    }

    #[cfg(not(unix))]
    fn register() -> std::io::Result<Self> {
        Ok(Self::default())
    }
}

/// Puts the terminal back before the default panic report is printed.
fn install_panic_hook(target: Option<&File>) {
    let target = target.and_then(|file| file.try_clone().ok());
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = match target.as_ref() {
            Some(file) => {
                let mut out: &File = file;
                execute!(out, Show, LeaveAlternateScreen)
            }
            None => execute!(stdout(), Show, LeaveAlternateScreen),
        };
        let _ = disable_raw_mode();
        previous(panic_info);
    }));
}

/// What one pass of the loop decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Continue,
    Done(Outcome),
}

/// One pass of the clock loop, up to and including the draw: stop check,
/// resize, step, draw. `screen_size` is asked for the new size only when a
/// resize is pending.
pub fn run_pass<B, S>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    signals: &SignalFlags,
    now: DateTime<Utc>,
    screen_size: S,
) -> Result<Pass, B::Error>
where
    B: Backend,
    S: FnOnce(&Terminal<B>) -> Result<Viewport, B::Error>,
{
    if signals.stop.load(Ordering::Relaxed) {
        info!("Stop requested");
        return Ok(Pass::Done(Outcome::Quit));
    }

    if signals.resize.swap(false, Ordering::Relaxed) {
        let viewport = screen_size(terminal)?;
        info!("Terminal resized to {}x{}", viewport.cols, viewport.rows);
        terminal.resize(area_of(viewport))?;
        app.resize(viewport);
    }

    match app.step_at(now) {
        Tick::Running => {}
        Tick::Expired | Tick::Finished => return Ok(Pass::Done(Outcome::Expired)),
    }

    terminal.draw(|f| ui::draw_ui(f, app))?;
    Ok(Pass::Continue)
}

pub fn run(config: &ResolvedConfig, target: Option<File>) -> std::io::Result<Outcome> {
    let signals = SignalFlags::register()?;
    install_panic_hook(target.as_ref());

    let backend = CrosstermBackend::new(output(target.as_ref())?);
    let mut terminal = match target.as_ref() {
        Some(device) => {
            let viewport = target::window_size(device)?;
            info!(
                "Drawing to target device of {}x{}",
                viewport.cols, viewport.rows
            );
            Terminal::with_options(
                backend,
                TerminalOptions {
                    viewport: ratatui::Viewport::Fixed(area_of(viewport)),
                },
            )?
        }
        None => Terminal::new(backend)?,
    };
    let _terminal_mode_guard = TerminalModeGuard::new(output(target.as_ref())?, target.as_ref())?;
    let viewport = screen_size(&terminal, target.as_ref())?;
    // Clears too, without the cursor query `clear()` makes of the
    // controlling terminal
    terminal.resize(area_of(viewport))?;
    let mut app = App::from_config(config, viewport);
    info!(
        "Clock started: {} minutes on a {}x{} terminal",
        config.minutes, viewport.cols, viewport.rows
    );

    loop {
        // SIGWINCH only follows the controlling terminal, so watch the
        // device's size directly.
        if let Some(device) = target.as_ref()
            && target::window_size(device)? != app.layout.viewport()
        {
            signals.resize.store(true, Ordering::Relaxed);
        }

        let pass = run_pass(&mut terminal, &mut app, &signals, Utc::now(), |terminal| {
            screen_size(terminal, target.as_ref())
        })?;
        if let Pass::Done(outcome) = pass {
            return Ok(outcome);
        }

        let delay = app.options.delay.as_duration();
        let event = match target.as_ref() {
            Some(device) => poll_device_timeout(device, delay)?,
            None => poll_event_timeout(delay)?,
        };
        match event {
            Some(TuiEvent::Key(key)) => {
                if handle_key(&mut app, key) == Effect::Quit {
                    info!("Quit requested");
                    return Ok(Outcome::Quit);
                }
            }
            Some(TuiEvent::Interrupt) => signals.stop.store(true, Ordering::Relaxed),
            Some(TuiEvent::Resize) => signals.resize.store(true, Ordering::Relaxed),
            None => {}
        }
    }
}
