//! Drawing commands
//!
//! The whole UI is drawn with five primitives. Commands own their text so
//! a list can be built first and executed later.

use embedded_graphics::pixelcolor::Rgb565;
use heapless::{String, Vec};
use tamara_core::layout::Rect;

/// Longest text a single command carries
pub const TEXT_LEN: usize = 24;

/// Most commands a single render can emit
pub const MAX_COMMANDS: usize = 40;

/// Commands for one render pass
pub type CommandList = Vec<DrawCommand, MAX_COMMANDS>;

/// Which point of the text box `(x, y)` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Anchor {
    TopLeft,
    TopCenter,
    MiddleCenter,
    BottomLeft,
}

/// Text size class
///
/// Backends pick the closest font they have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextSize {
    /// Version string, captions
    Small,
    /// Buttons, labels
    Medium,
    /// Headings
    Large,
    /// Duration value
    Huge,
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole screen
    Clear(Rgb565),
    /// Fill a rectangle with square corners
    ClearRegion { rect: Rect, color: Rgb565 },
    /// Fill a rectangle with rounded corners
    FillRoundRect {
        rect: Rect,
        radius: u32,
        color: Rgb565,
    },
    /// Fill a circle
    FillCircle {
        x: i32,
        y: i32,
        radius: u32,
        color: Rgb565,
    },
    /// Draw text, transparent background
    Text {
        text: String<TEXT_LEN>,
        x: i32,
        y: i32,
        anchor: Anchor,
        size: TextSize,
        color: Rgb565,
    },
}
