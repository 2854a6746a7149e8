//! RGB565 colour palette
//!
//! The panel takes 16-bit 5-6-5 pixels. `rgb` truncates 8-bit channels the
//! same way the reference hardware does, so colours match bit for bit.

use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::Rgb565;

/// Convert 8-bit RGB to RGB565 (`r>>3`, `g>>2`, `b>>3`)
pub const fn rgb(red: u8, green: u8, blue: u8) -> Rgb565 {
    Rgb565::new(red >> 3, green >> 2, blue >> 3)
}

/// Build a colour from a packed 5-6-5 value
pub fn from_raw(raw: u16) -> Rgb565 {
    Rgb565::from(RawU16::new(raw))
}

/// Packed 5-6-5 value of a colour
pub fn to_raw(color: Rgb565) -> u16 {
    RawU16::from(color).into_inner()
}

pub const BLACK: Rgb565 = Rgb565::new(0, 0, 0);
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);
pub const RED: Rgb565 = Rgb565::new(31, 0, 0);
/// 0xFD20
pub const ORANGE: Rgb565 = Rgb565::new(31, 41, 0);
/// 0x7BEF
pub const DARKGREY: Rgb565 = Rgb565::new(15, 31, 15);

/// Center panel background
pub const PANEL: Rgb565 = rgb(10, 10, 10);
/// Confirm / increment / selected chip
pub const GO_GREEN: Rgb565 = rgb(15, 209, 20);
/// Unselected chip and progress track
pub const IDLE_GREY: Rgb565 = rgb(30, 30, 30);
/// Firing frame border
pub const FRAME_GREY: Rgb565 = rgb(40, 40, 40);
/// Secondary labels
pub const LABEL_GREY: Rgb565 = rgb(200, 200, 200);
/// Unit suffix
pub const UNIT_GREY: Rgb565 = rgb(150, 150, 150);

/// Charge state of one training station, shown as a Home tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChargeStatus {
    Disconnected,
    Charging,
    #[default]
    Charged,
    Armed,
}

impl ChargeStatus {
    /// Tile colour
    pub const fn color(self) -> Rgb565 {
        match self {
            ChargeStatus::Charged => rgb(73, 160, 76),
            ChargeStatus::Charging => rgb(185, 160, 50),
            ChargeStatus::Disconnected => rgb(75, 75, 75),
            ChargeStatus::Armed => RED,
        }
    }
}
