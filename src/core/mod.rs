//! # Core Clock Logic
//!
//! This module contains the countdown, geometry and key handling.
//! It knows nothing about any specific terminal library.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Glyphs (digit cells) │
//!                    │  • Countdown (time)     │
//!                    │  • Layout (geometry)    │
//!                    │  • Action (keys)        │
//!                    │                         │
//!                    │  No I/O. No UI.         │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct: all clock state in one place
//! - [`action`]: The `Action` enum: everything a key can do
//! - [`countdown`]: Remaining time and expiry
//! - [`layout`]: Clock and date rectangles, centring and rebounding
//! - [`glyph`]: Seven-segment digit shapes
//! - [`options`]: Display toggles, colour and redraw delay
//! - [`config`]: Config file and CLI resolution

pub mod action;
pub mod config;
pub mod countdown;
pub mod glyph;
pub mod layout;
pub mod options;
pub mod state;
