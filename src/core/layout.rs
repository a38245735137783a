//! # Layout Engine
//!
//! Owns where the clock face and the date strip sit on screen.
//!
//! ```text
//!  col                 col + width/2
//!   ┌───────────────────────┼───────────────────────┐  row
//!   │   ██████  ██████      ┆    ██████  ██████     │
//!   │       ██  ██      ██  ┆        ██      ██     │
//!   │   ██████  ██████      ┆    ██████  ██████     │
//!   │   ██          ██  ██  ┆    ██          ██     │
//!   │   ██████  ██████      ┆    ██████  ██████     │
//!   │               ┌───────┼───────┐               │
//!   └───────────────┤  2026-10-17   ├───────────────┘  row + height - 1
//!                   └───────────────┘
//! ```
//!
//! Every geometry change goes through [`Layout::move_and_resize`], which is
//! the only place the clock rectangle is written and which always rebuilds
//! the date rectangle from it. The date strip therefore stays centred under
//! the clock whatever moved it.
//!
//! Coordinates are signed so that a date strip wider than the clock can hang
//! off the left edge without losing its centring; drawing clips it.

use log::debug;

/// Rows taken by the clock face, border included.
pub const CLOCK_HEIGHT: u16 = 7;
/// Clock width showing `MM:SS`.
pub const NORMAL_WIDTH: u16 = 35;
/// Clock width with the extra digit pair.
pub const SECONDS_WIDTH: u16 = 54;
/// Rows taken by the date strip, border included.
pub const DATE_HEIGHT: u16 = 3;

/// Visible terminal extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub rows: u16,
    pub cols: u16,
}

impl Viewport {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }
}

/// How the clock is positioned. Centred and rebounding exclude each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Stays where it was put; arrow keys move it.
    #[default]
    Free,
    /// Pinned to the middle of the viewport.
    Centered,
    /// Drifts diagonally and bounces off the edges.
    Rebounding,
}

/// A screen rectangle. `row`/`col` may be negative for the date strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub row: i32,
    pub col: i32,
    pub width: u16,
    pub height: u16,
}

impl Region {
    /// Column of the horizontal midpoint.
    pub fn mid_col(&self) -> i32 {
        self.col + i32::from(self.width / 2)
    }
}

/// The clock rectangle plus its rebound velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub row: i32,
    pub col: i32,
    pub width: u16,
    pub height: u16,
    pub row_velocity: i32,
    pub col_velocity: i32,
}

impl Geometry {
    pub fn region(&self) -> Region {
        Region {
            row: self.row,
            col: self.col,
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Layout {
    viewport: Viewport,
    placement: Placement,
    with_seconds: bool,
    clock: Geometry,
    date: Region,
    date_width: u16,
}

impl Layout {
    /// Places the clock at the top-left corner of `viewport`, or in its
    /// middle when `placement` is [`Placement::Centered`].
    pub fn new(viewport: Viewport, with_seconds: bool, placement: Placement) -> Self {
        let mut layout = Self {
            viewport,
            placement,
            with_seconds,
            clock: Geometry {
                row: 0,
                col: 0,
                width: 0,
                height: 0,
                row_velocity: 1,
                col_velocity: 1,
            },
            date: Region {
                row: 0,
                col: 0,
                width: 0,
                height: DATE_HEIGHT,
            },
            date_width: 0,
        };
        layout.fit_viewport(viewport);
        layout
    }

    pub fn clock(&self) -> Geometry {
        self.clock
    }

    pub fn date(&self) -> Region {
        self.date
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn with_seconds(&self) -> bool {
        self.with_seconds
    }

    /// Relocates and resizes the clock, then rebuilds the date strip under
    /// it. Position is clamped to be non-negative and size to the viewport.
    pub fn move_and_resize(&mut self, row: i32, col: i32, width: u16, height: u16) {
        self.clock.row = row.max(0);
        self.clock.col = col.max(0);
        self.clock.width = width.min(self.viewport.cols);
        self.clock.height = height.min(self.viewport.rows);

        self.date = Region {
            row: self.clock.row + i32::from(self.clock.height) - 1,
            col: self.clock.col + i32::from(self.clock.width / 2)
                - i32::from(self.date_width / 2)
                - 1,
            width: self.date_width.saturating_add(2),
            height: DATE_HEIGHT,
        };
        debug!(
            "Clock at ({}, {}) {}x{}, date at ({}, {}) {}x{}",
            self.clock.row,
            self.clock.col,
            self.clock.width,
            self.clock.height,
            self.date.row,
            self.date.col,
            self.date.width,
            self.date.height
        );
    }

    /// Advances one step along the velocity vector, bouncing off the edges.
    /// Does nothing unless the placement is [`Placement::Rebounding`].
    pub fn rebound(&mut self) {
        if self.placement != Placement::Rebounding {
            return;
        }
        let Geometry { row, col, .. } = self.clock;

        if row < 1 {
            self.clock.row_velocity = 1;
        }
        if row > self.max_row() {
            self.clock.row_velocity = -1;
        }
        if col < 1 {
            self.clock.col_velocity = 1;
        }
        if col > self.max_col() {
            self.clock.col_velocity = -1;
        }

        self.move_and_resize(
            row + self.clock.row_velocity,
            col + self.clock.col_velocity,
            self.clock.width,
            self.clock.height,
        );
    }

    /// Pins the clock to the middle of the viewport. Stops rebounding.
    pub fn center(&mut self) {
        self.placement = Placement::Centered;
        let row = i32::from(self.viewport.rows / 2) - i32::from(self.clock.height / 2);
        let col = i32::from(self.viewport.cols / 2) - i32::from(self.clock.width / 2);
        self.move_and_resize(row, col, self.clock.width, self.clock.height);
    }

    /// Centres the clock, or releases it in place if it already was.
    pub fn toggle_center(&mut self) {
        if self.placement == Placement::Centered {
            self.placement = Placement::Free;
        } else {
            self.center();
        }
        debug!("Placement now {:?}", self.placement);
    }

    /// Starts rebounding (releasing a centred clock), or stops it.
    pub fn toggle_rebound(&mut self) {
        self.placement = match self.placement {
            Placement::Rebounding => Placement::Free,
            Placement::Free | Placement::Centered => Placement::Rebounding,
        };
        debug!("Placement now {:?}", self.placement);
    }

    /// Switches between the `MM:SS` and the wider footprint, pulling the
    /// clock left if the new width would run off the right edge. Returns
    /// whether the wide footprint is now active.
    pub fn toggle_seconds_width(&mut self) -> bool {
        self.with_seconds = !self.with_seconds;
        let width = self.footprint();
        let limit = i32::from(self.viewport.cols) - i32::from(width) - 1;
        let col = self.clock.col.min(limit);

        self.move_and_resize(self.clock.row, col, width, self.clock.height);
        if self.placement == Placement::Centered {
            self.center();
        }
        self.with_seconds
    }

    /// Moves the clock one cell. Refused while centred or when the move
    /// would leave the viewport. Returns whether it moved.
    pub fn nudge(&mut self, d_row: i32, d_col: i32) -> bool {
        if self.placement == Placement::Centered {
            return false;
        }
        let Geometry { row, col, .. } = self.clock;
        let allowed = match (d_row.signum(), d_col.signum()) {
            (-1, 0) => row >= 1,
            (1, 0) => row <= self.max_row(),
            (0, -1) => col >= 1,
            (0, 1) => col <= self.max_col(),
            _ => false,
        };
        if allowed {
            self.move_and_resize(
                row + d_row.signum(),
                col + d_col.signum(),
                self.clock.width,
                self.clock.height,
            );
        }
        allowed
    }

    /// Records the display width of the date text and re-centres the
    /// strip if it changed.
    pub fn set_date_width(&mut self, date_width: u16) {
        if date_width != self.date_width {
            self.date_width = date_width;
            let Geometry {
                row,
                col,
                width,
                height,
                ..
            } = self.clock;
            self.move_and_resize(row, col, width, height);
        }
    }

    /// Re-fits the clock after the terminal changed size: restores the
    /// footprint as far as it fits and pulls the clock back inside.
    pub fn fit_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let width = self.footprint().min(viewport.cols);
        let height = CLOCK_HEIGHT.min(viewport.rows);
        if width < self.footprint() || height < CLOCK_HEIGHT {
            debug!(
                "Viewport {}x{} too small, clock clamped to {}x{}",
                viewport.cols, viewport.rows, width, height
            );
        }

        let row = self.clock.row.min(self.max_row_for(height));
        let col = self.clock.col.min(self.max_col_for(width));
        self.move_and_resize(row, col, width, height);

        if self.placement == Placement::Centered {
            self.center();
        }
    }

    fn footprint(&self) -> u16 {
        if self.with_seconds {
            SECONDS_WIDTH
        } else {
            NORMAL_WIDTH
        }
    }

    /// Last row the clock may start on with room left for the date strip.
    fn max_row(&self) -> i32 {
        self.max_row_for(self.clock.height)
    }

    fn max_col(&self) -> i32 {
        self.max_col_for(self.clock.width)
    }

    fn max_row_for(&self, height: u16) -> i32 {
        i32::from(self.viewport.rows) - i32::from(height) - i32::from(DATE_HEIGHT)
    }

    fn max_col_for(&self, width: u16) -> i32 {
        i32::from(self.viewport.cols) - i32::from(width) - 1
    }
}
