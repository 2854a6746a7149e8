//! Tamara - Initiator Training Device Firmware
//!
//! Main firmware binary for the RP2040 touchscreen controller. The operator
//! picks output 1 or 2 and a duration on the panel; the selected output is
//! energized for that long and then de-energized.

#![no_std]
#![no_main]

use core::convert::Infallible;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::{self, Spi};
use embassy_time::{Delay, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use {defmt_rtt as _, panic_probe as _};

use tamara_display::{DisplayBackend, GraphicsBackend, Renderer};
use tamara_drivers::display::St7796;
use tamara_drivers::output::GpioOutputs;
use tamara_drivers::touch::Xpt2046;

use crate::board::{BOARD, DISPLAY_SPI_HZ, SPLASH_MS, TOUCH_SPI_HZ};

mod board;
mod tasks;

/// Unwrap a result that cannot fail
fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => match e {},
    }
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tamara firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Outputs first: both pins at their de-energized level before anything
    // else on the board comes up
    let idle = if BOARD.outputs.active_low {
        Level::High
    } else {
        Level::Low
    };
    let out1 = Output::new(p.PIN_2, idle);
    let out2 = Output::new(p.PIN_3, idle);
    let outputs = GpioOutputs::new(out1, out2, BOARD.outputs.active_low);
    info!("Outputs initialized (active_low={})", BOARD.outputs.active_low);

    // Aux contact: pulled up, pressed pulls LOW
    let aux = Input::new(p.PIN_6, Pull::Up);

    // Backlight
    let _backlight = Output::new(p.PIN_22, Level::High);

    // Display on SPI0
    let mut display_config = spi::Config::default();
    display_config.frequency = DISPLAY_SPI_HZ;
    let display_bus = Spi::new_blocking(p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, display_config);
    let display_cs = Output::new(p.PIN_17, Level::High);
    let display_spi = infallible(ExclusiveDevice::new_no_delay(display_bus, display_cs));
    let dc = Output::new(p.PIN_20, Level::Low);
    let rst = Output::new(p.PIN_21, Level::High);

    let mut panel = St7796::new(display_spi, dc, rst);
    match panel.init(&mut Delay) {
        Ok(()) => info!("Display initialized"),
        Err(e) => error!("Display init failed: {}", e),
    }
    let mut display = GraphicsBackend::new(panel);

    // Touch on SPI1
    let mut touch_config = spi::Config::default();
    touch_config.frequency = TOUCH_SPI_HZ;
    let touch_bus = Spi::new_blocking(p.SPI1, p.PIN_10, p.PIN_11, p.PIN_12, touch_config);
    let touch_cs = Output::new(p.PIN_13, Level::High);
    let touch_spi = infallible(ExclusiveDevice::new_no_delay(touch_bus, touch_cs));
    let touch = Xpt2046::new(touch_spi, BOARD.touch);
    info!("Touch initialized");

    // Splash, then the static overlay. Nothing can fire until the control
    // task is running.
    let renderer = Renderer::new();
    let boot = Renderer::splash().and_then(|list| display.execute_all(&list));
    if let Err(e) = boot {
        warn!("Splash failed: {}", e);
    }
    Timer::after_millis(SPLASH_MS).await;

    let overlay = Renderer::overlay().and_then(|list| display.execute_all(&list));
    if let Err(e) = overlay {
        warn!("Overlay failed: {}", e);
    }

    spawner
        .spawn(tasks::control_task(outputs, touch, aux, display, renderer))
        .unwrap();

    info!("Control task spawned, firmware running");

    // Main task has nothing else to do; the backlight pin lives here
    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
