//! Pointer mapping and press-and-hold gestures
//!
//! Everything here is presentation state. The engine never sees pixels or
//! key durations, only the cell or command they resolve to.

use tictactoe_core::board::SIZE;

/// Input gathered for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Pointer pressed this frame, in board pixels
    pub click: Option<(i32, i32)>,
    /// Pointer moved this frame without a press
    pub cursor: Option<(i32, i32)>,
    /// Reset key held during this frame
    pub reset_down: bool,
    /// Quit key held during this frame
    pub quit_down: bool,
}

/// Maps board pixels to `(col, row)` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerMapper {
    cell_size: u32,
}

impl PointerMapper {
    pub fn new(cell_size: u32) -> Self {
        Self { cell_size }
    }

    /// Cell under the pixel `(x, y)`, or `None` outside the board
    pub fn cell_at(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || self.cell_size == 0 {
            return None;
        }
        let cell = i64::from(self.cell_size);
        let col = i64::from(x) / cell;
        let row = i64::from(y) / cell;
        if col < SIZE as i64 && row < SIZE as i64 {
            Some((col as usize, row as usize))
        } else {
            None
        }
    }
}

/// A key that must be held for `threshold` consecutive frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldGesture {
    threshold: u32,
    held: u32,
}

impl HoldGesture {
    pub fn new(threshold: u32) -> Self {
        Self { threshold, held: 0 }
    }

    /// Advance one frame; returns `true` on the frame the hold completes
    ///
    /// Fires once per continuous hold. Releasing the key starts over.
    pub fn update(&mut self, down: bool) -> bool {
        if down {
            self.held = self.held.saturating_add(1);
            self.held == self.threshold
        } else {
            self.held = 0;
            false
        }
    }

    /// Frames the key has been held so far
    pub fn held(&self) -> u32 {
        self.held
    }

    /// Whether a hold indicator should be drawn
    pub fn is_visible(&self) -> bool {
        self.held > 1
    }

    /// Fraction of the hold completed, in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.threshold == 0 {
            return 1.0;
        }
        self.held.min(self.threshold) as f32 / self.threshold as f32
    }
}
