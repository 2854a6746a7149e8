//! `embedded-graphics` backend
//!
//! Runs drawing commands against any RGB565 `DrawTarget`, which covers
//! the SPI panel driver as well as in-memory targets in tests.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_9X15_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};
use tamara_core::layout::Rect;

use crate::backend::{DisplayBackend, DisplayError};
use crate::command::{Anchor, TextSize};

/// Display backend for an `embedded-graphics` draw target
pub struct GraphicsBackend<D> {
    target: D,
}

impl<D> GraphicsBackend<D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    /// Wrap a draw target
    pub fn new(target: D) -> Self {
        Self { target }
    }

    /// Access the underlying target
    pub fn target(&self) -> &D {
        &self.target
    }

    /// Release the underlying target
    pub fn release(self) -> D {
        self.target
    }
}

fn to_rectangle(rect: Rect) -> Result<Rectangle, DisplayError> {
    if rect.width < 0 || rect.height < 0 {
        return Err(DisplayError::InvalidCoordinates);
    }
    Ok(Rectangle::new(
        Point::new(rect.x, rect.y),
        Size::new(rect.width as u32, rect.height as u32),
    ))
}

fn font(size: TextSize) -> &'static MonoFont<'static> {
    match size {
        TextSize::Small => &FONT_6X10,
        TextSize::Medium => &FONT_9X15_BOLD,
        // Largest ASCII mono font available
        TextSize::Large | TextSize::Huge => &FONT_10X20,
    }
}

fn text_style(anchor: Anchor) -> TextStyle {
    let (alignment, baseline) = match anchor {
        Anchor::TopLeft => (Alignment::Left, Baseline::Top),
        Anchor::TopCenter => (Alignment::Center, Baseline::Top),
        Anchor::MiddleCenter => (Alignment::Center, Baseline::Middle),
        Anchor::BottomLeft => (Alignment::Left, Baseline::Bottom),
    };
    TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(baseline)
        .build()
}

impl<D> DisplayBackend for GraphicsBackend<D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    fn clear(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        self.target
            .clear(color)
            .map_err(|_| DisplayError::Communication)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb565) -> Result<(), DisplayError> {
        let area = to_rectangle(rect)?;
        self.target
            .fill_solid(&area, color)
            .map_err(|_| DisplayError::Communication)
    }

    fn fill_round_rect(
        &mut self,
        rect: Rect,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        let area = to_rectangle(rect)?;
        RoundedRectangle::with_equal_corners(area, Size::new(radius, radius))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn fill_circle(
        &mut self,
        x: i32,
        y: i32,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        Circle::with_center(Point::new(x, y), radius * 2 + 1)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        anchor: Anchor,
        size: TextSize,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        let character_style = MonoTextStyle::new(font(size), color);
        Text::with_text_style(text, Point::new(x, y), character_style, text_style(anchor))
            .draw(&mut self.target)
            .map(|_| ())
            .map_err(|_| DisplayError::Communication)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        // Pixels go straight to the target
        Ok(())
    }

    fn dimensions(&self) -> (u16, u16) {
        let size = self.target.size();
        (size.width as u16, size.height as u16)
    }

    fn is_ready(&self) -> bool {
        true
    }
}
