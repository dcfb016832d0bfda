//! Side panel drag-resize.
//!

use tracing::trace;

/// Narrowest panel (px).
pub const MIN_WIDTH: u32 = 300;
/// Widest panel (px).
pub const MAX_WIDTH: u32 = 800;
/// Initial width (px).
pub const DEF_WIDTH: u32 = 400;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Sidebar {
    width: u32,
    resizing: bool,
}

impl Default for Sidebar {
    fn default() -> Self {
        Sidebar::new(DEF_WIDTH)
    }
}

impl Sidebar {
    pub fn new(width: u32) -> Self {
        Sidebar {
            width: width.clamp(MIN_WIDTH, MAX_WIDTH),
            resizing: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn is_resizing(&self) -> bool {
        self.resizing
    }

    pub fn start(&mut self) {
        self.resizing = true;
    }

    /// Pointer moved, `width` is what the panel would be.  Ignored unless resizing.
    ///
    pub fn drag(&mut self, width: f64) {
        if self.resizing {
            self.width = width.round().clamp(MIN_WIDTH as f64, MAX_WIDTH as f64) as u32;
        }
    }

    /// Drag is over, returns the width to persist if we were resizing.
    ///
    pub fn end(&mut self) -> Option<u32> {
        if !self.resizing {
            return None;
        }
        self.resizing = false;
        trace!("sidebar width {}", self.width);
        Some(self.width)
    }
}
