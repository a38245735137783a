//! # TUI Components
//!
//! The pieces painted each frame.
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! - `ClockFace`: the big seven-segment digits and the colon
//! - `DateStrip`: the date text under the clock
//!
//! Both are built from `App` with `from_app()` and hold copies of what they
//! draw, so rendering cannot touch clock state.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── clock_face.rs   (digits + colon + border)
//! ├── date_strip.rs   (date text + border)
//! └── surface.rs      (clipped cell drawing shared by both)
//! ```

pub mod clock_face;
pub mod date_strip;
pub mod surface;

pub use clock_face::ClockFace;
pub use date_strip::DateStrip;
