//! XPT2046 resistive touch controller
//!
//! A touch counts only if the pressure is above the calibrated threshold
//! and two consecutive X/Y samples agree, which filters the jitter of a
//! finger landing or lifting. Raw readings are mapped to screen pixels
//! with the calibration record and clamped to the screen.

use embedded_hal::spi::{Operation, SpiDevice};
use tamara_core::config::TouchCalibration;
use tamara_core::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
use tamara_core::traits::{TouchPoint, TouchSource};

/// Control bytes: start bit, channel, 12-bit differential, power-down between
const CMD_X: u8 = 0xD0;
const CMD_Y: u8 = 0x90;
const CMD_Z1: u8 = 0xB0;
const CMD_Z2: u8 = 0xC0;

/// Full-scale 12-bit reading
const RAW_MAX: i32 = 4095;

/// Largest raw difference between two samples of the same touch
pub const MAX_JITTER: u16 = 20;

/// Touch controller errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError {
    /// SPI transfer failed
    Spi,
}

/// XPT2046 driver
pub struct Xpt2046<SPI> {
    spi: SPI,
    calibration: TouchCalibration,
}

impl<SPI: SpiDevice> Xpt2046<SPI> {
    /// Create a driver with the given calibration
    pub fn new(spi: SPI, calibration: TouchCalibration) -> Self {
        Self { spi, calibration }
    }

    /// Active calibration
    pub fn calibration(&self) -> &TouchCalibration {
        &self.calibration
    }

    fn read_channel(&mut self, command: u8) -> Result<u16, TouchError> {
        let mut buf = [command, 0, 0];
        self.spi
            .transaction(&mut [Operation::TransferInPlace(&mut buf)])
            .map_err(|_| TouchError::Spi)?;
        Ok((u16::from_be_bytes([buf[1], buf[2]]) >> 3) & 0x0FFF)
    }

    /// Touch pressure, 0 when nothing is pressed
    pub fn pressure(&mut self) -> Result<u16, TouchError> {
        let z1 = self.read_channel(CMD_Z1)? as i32;
        let z2 = self.read_channel(CMD_Z2)? as i32;
        let z = RAW_MAX + z1 - z2;
        // z1 == z2 means an open panel
        if z == RAW_MAX {
            return Ok(0);
        }
        Ok(z.clamp(0, u16::MAX as i32) as u16)
    }

    fn pressed(&mut self) -> Result<bool, TouchError> {
        Ok(self.pressure()? > self.calibration.pressure_threshold)
    }

    fn sample(&mut self) -> Result<(u16, u16), TouchError> {
        let x = self.read_channel(CMD_X)?;
        let y = self.read_channel(CMD_Y)?;
        Ok((x, y))
    }

    /// Read a stable raw sample
    ///
    /// Returns `None` if the panel is not pressed or the two samples
    /// disagree by more than [`MAX_JITTER`].
    pub fn read_raw(&mut self) -> Result<Option<(u16, u16)>, TouchError> {
        if !self.pressed()? {
            return Ok(None);
        }
        let (x1, y1) = self.sample()?;

        if !self.pressed()? {
            return Ok(None);
        }
        let (x2, y2) = self.sample()?;

        if x1.abs_diff(x2) > MAX_JITTER || y1.abs_diff(y2) > MAX_JITTER {
            return Ok(None);
        }
        Ok(Some((x1, y1)))
    }

    /// Read a touch in screen coordinates
    pub fn read(&mut self) -> Result<Option<TouchPoint>, TouchError> {
        Ok(self
            .read_raw()?
            .map(|(x, y)| map_to_screen(&self.calibration, x, y)))
    }
}

/// Map a raw sample to screen pixels
///
/// `(raw - offset) * extent / span` per axis, after the optional axis
/// swap, then mirrored and clamped to the screen.
pub fn map_to_screen(calibration: &TouchCalibration, raw_x: u16, raw_y: u16) -> TouchPoint {
    let (a, b) = if calibration.swap_xy {
        (raw_y, raw_x)
    } else {
        (raw_x, raw_y)
    };

    let x_span = calibration.x_span.max(1) as i32;
    let y_span = calibration.y_span.max(1) as i32;
    let mut x = (a as i32 - calibration.x_offset as i32) * SCREEN_WIDTH / x_span;
    let mut y = (b as i32 - calibration.y_offset as i32) * SCREEN_HEIGHT / y_span;

    if calibration.invert_x {
        x = SCREEN_WIDTH - x;
    }
    if calibration.invert_y {
        y = SCREEN_HEIGHT - y;
    }

    TouchPoint::new(x.clamp(0, SCREEN_WIDTH - 1), y.clamp(0, SCREEN_HEIGHT - 1))
}

impl<SPI: SpiDevice> TouchSource for Xpt2046<SPI> {
    /// A failed SPI transfer reads as "no contact"
    fn poll(&mut self) -> Option<TouchPoint> {
        self.read().ok().flatten()
    }
}
