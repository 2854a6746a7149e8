//! Display backend trait
//!
//! Defines the interface for different display types.

use embedded_graphics::pixelcolor::Rgb565;
use tamara_core::layout::Rect;

use crate::command::{Anchor, DrawCommand, TextSize};

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
    /// Command list or text buffer full
    BufferOverflow,
}

/// Display backend trait
///
/// Provides a hardware-agnostic interface for rendering to displays.
/// Coordinates are screen pixels in landscape orientation.
pub trait DisplayBackend {
    /// Fill the entire display
    fn clear(&mut self, color: Rgb565) -> Result<(), DisplayError>;

    /// Fill a rectangle with square corners
    fn fill_rect(&mut self, rect: Rect, color: Rgb565) -> Result<(), DisplayError>;

    /// Fill a rectangle with rounded corners
    fn fill_round_rect(
        &mut self,
        rect: Rect,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), DisplayError>;

    /// Fill a circle centered on `(x, y)`
    fn fill_circle(
        &mut self,
        x: i32,
        y: i32,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), DisplayError>;

    /// Draw text with its `anchor` point at `(x, y)`
    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        anchor: Anchor,
        size: TextSize,
        color: Rgb565,
    ) -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    ///
    /// For displays with internal buffers, this sends the buffer to the hardware.
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Get the display dimensions in pixels
    fn dimensions(&self) -> (u16, u16);

    /// Check if the display is ready
    fn is_ready(&self) -> bool;

    /// Execute one drawing command
    fn execute(&mut self, command: &DrawCommand) -> Result<(), DisplayError> {
        if !self.is_ready() {
            return Err(DisplayError::NotInitialized);
        }

        match command {
            DrawCommand::Clear(color) => self.clear(*color),
            DrawCommand::ClearRegion { rect, color } => self.fill_rect(*rect, *color),
            DrawCommand::FillRoundRect {
                rect,
                radius,
                color,
            } => self.fill_round_rect(*rect, *radius, *color),
            DrawCommand::FillCircle {
                x,
                y,
                radius,
                color,
            } => self.fill_circle(*x, *y, *radius, *color),
            DrawCommand::Text {
                text,
                x,
                y,
                anchor,
                size,
                color,
            } => self.draw_text(text, *x, *y, *anchor, *size, *color),
        }
    }

    /// Execute a list of commands in order, then flush
    fn execute_all(&mut self, commands: &[DrawCommand]) -> Result<(), DisplayError> {
        for command in commands {
            self.execute(command)?;
        }
        self.flush()
    }
}
