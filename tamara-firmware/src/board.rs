//! Board wiring for the RP2040 controller
//!
//! Concrete peripheral types and the build-time board configuration.

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::{SPI0, SPI1};
use embassy_rp::spi::{Blocking, Spi};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use tamara_core::config::{BoardConfig, ControlConfig, OutputConfig, TouchCalibration};
use tamara_display::GraphicsBackend;
use tamara_drivers::display::St7796;
use tamara_drivers::output::GpioOutputs;
use tamara_drivers::touch::Xpt2046;

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));

/// Display SPI clock (Hz)
pub const DISPLAY_SPI_HZ: u32 = 40_000_000;

/// Touch SPI clock (Hz); the XPT2046 tops out near 2.5 MHz
pub const TOUCH_SPI_HZ: u32 = 2_000_000;

/// Splash screen hold time before the control loop starts (ms)
pub const SPLASH_MS: u64 = 2000;

/// Output stage on GP2/GP3
pub type OutputStage = GpioOutputs<Output<'static>, Output<'static>>;

/// TFT panel on SPI0
pub type Panel = St7796<
    ExclusiveDevice<Spi<'static, SPI0, Blocking>, Output<'static>, NoDelay>,
    Output<'static>,
    Output<'static>,
>;

/// Drawing backend over the panel
pub type Display = GraphicsBackend<Panel>;

/// Touch controller on SPI1
pub type Touch = Xpt2046<ExclusiveDevice<Spi<'static, SPI1, Blocking>, Output<'static>, NoDelay>>;
