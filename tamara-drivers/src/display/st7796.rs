//! ST7796 TFT panel driver
//!
//! 480x320 landscape, 16-bit RGB565 over SPI with a separate D/C line.
//! Writes go straight to panel RAM; there is no framebuffer.

use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

/// Panel width in landscape orientation
pub const WIDTH: u16 = 480;

/// Panel height in landscape orientation
pub const HEIGHT: u16 = 320;

/// Pixels per SPI write when streaming a solid fill
const FILL_CHUNK: usize = 64;

// Command set
const SWRESET: u8 = 0x01;
const SLPOUT: u8 = 0x11;
const DISPON: u8 = 0x29;
const CASET: u8 = 0x2A;
const RASET: u8 = 0x2B;
const RAMWR: u8 = 0x2C;
const MADCTL: u8 = 0x36;
const COLMOD: u8 = 0x3A;
const CSCON: u8 = 0xF0;

/// MADCTL: row/column exchange (landscape) + BGR panel
const MADCTL_LANDSCAPE: u8 = 0x28;

/// COLMOD: 16 bits per pixel
const COLMOD_RGB565: u8 = 0x55;

/// Vendor init sequence after sleep-out: (command, data, delay ms)
const INIT_SEQUENCE: &[(u8, &[u8], u32)] = &[
    (CSCON, &[0xC3], 0),
    (CSCON, &[0x96], 0),
    (MADCTL, &[MADCTL_LANDSCAPE], 0),
    (COLMOD, &[COLMOD_RGB565], 0),
    (0xB4, &[0x01], 0),
    (0xB6, &[0x80, 0x02, 0x3B], 0),
    (0xE8, &[0x40, 0x8A, 0x00, 0x00, 0x29, 0x19, 0xA5, 0x33], 0),
    (0xC1, &[0x06], 0),
    (0xC2, &[0xA7], 0),
    (0xC5, &[0x18], 120),
    (
        0xE0,
        &[0xF0, 0x09, 0x0B, 0x06, 0x04, 0x15, 0x2F, 0x54, 0x42, 0x3C, 0x17, 0x14, 0x18, 0x1B],
        0,
    ),
    (
        0xE1,
        &[0xE0, 0x09, 0x0B, 0x06, 0x04, 0x03, 0x2B, 0x43, 0x42, 0x3B, 0x16, 0x14, 0x17, 0x1B],
        120,
    ),
    (CSCON, &[0x3C], 0),
    (CSCON, &[0x69], 0),
];

/// Panel driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum St7796Error {
    /// SPI transfer failed
    Spi,
    /// D/C or reset pin could not be driven
    Pin,
}

/// ST7796 driver
pub struct St7796<SPI, DC, RST> {
    spi: SPI,
    dc: DC,
    rst: RST,
}

impl<SPI, DC, RST> St7796<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a new driver. Call [`init`](Self::init) before drawing.
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self { spi, dc, rst }
    }

    fn command(&mut self, command: u8) -> Result<(), St7796Error> {
        self.dc.set_low().map_err(|_| St7796Error::Pin)?;
        self.spi.write(&[command]).map_err(|_| St7796Error::Spi)
    }

    fn data(&mut self, data: &[u8]) -> Result<(), St7796Error> {
        self.dc.set_high().map_err(|_| St7796Error::Pin)?;
        self.spi.write(data).map_err(|_| St7796Error::Spi)
    }

    fn command_data(&mut self, command: u8, data: &[u8]) -> Result<(), St7796Error> {
        self.command(command)?;
        if !data.is_empty() {
            self.data(data)?;
        }
        Ok(())
    }

    fn hardware_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), St7796Error> {
        self.rst.set_high().map_err(|_| St7796Error::Pin)?;
        delay.delay_ms(5);
        self.rst.set_low().map_err(|_| St7796Error::Pin)?;
        delay.delay_ms(20);
        self.rst.set_high().map_err(|_| St7796Error::Pin)?;
        delay.delay_ms(150);
        Ok(())
    }

    /// Reset and configure the panel for landscape RGB565
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), St7796Error> {
        self.hardware_reset(delay)?;

        self.command(SWRESET)?;
        delay.delay_ms(120);
        self.command(SLPOUT)?;
        delay.delay_ms(120);

        for &(command, data, wait_ms) in INIT_SEQUENCE {
            self.command_data(command, data)?;
            if wait_ms > 0 {
                delay.delay_ms(wait_ms);
            }
        }

        self.command(DISPON)?;
        delay.delay_ms(20);
        Ok(())
    }

    /// Set the RAM window and start a pixel write
    ///
    /// Bounds are inclusive.
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), St7796Error> {
        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();
        self.command_data(CASET, &[x0h, x0l, x1h, x1l])?;
        self.command_data(RASET, &[y0h, y0l, y1h, y1l])?;
        self.command(RAMWR)
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }
}

fn pixel_bytes(color: Rgb565) -> [u8; 2] {
    RawU16::from(color).into_inner().to_be_bytes()
}

impl<SPI, DC, RST> DrawTarget for St7796<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    type Color = Rgb565;
    type Error = St7796Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, color) in pixels {
            if !bounds.contains(point) {
                continue;
            }
            let (x, y) = (point.x as u16, point.y as u16);
            self.set_window(x, y, x, y)?;
            self.data(&pixel_bytes(color))?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        self.set_window(
            area.top_left.x as u16,
            area.top_left.y as u16,
            bottom_right.x as u16,
            bottom_right.y as u16,
        )?;

        let [hi, lo] = pixel_bytes(color);
        let mut chunk = [0u8; FILL_CHUNK * 2];
        for pair in chunk.chunks_exact_mut(2) {
            pair[0] = hi;
            pair[1] = lo;
        }

        let mut remaining = (area.size.width * area.size.height) as usize;
        while remaining > 0 {
            let count = remaining.min(FILL_CHUNK);
            self.data(&chunk[..count * 2])?;
            remaining -= count;
        }
        Ok(())
    }
}

impl<SPI, DC, RST> OriginDimensions for St7796<SPI, DC, RST> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::{Cell, RefCell};
    use core::convert::Infallible;
    use embedded_hal::spi::Operation;

    /// One byte on the bus, tagged with the D/C level
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Byte {
        Command(u8),
        Data(u8),
    }

    type Log = RefCell<heapless::Vec<Byte, 2048>>;

    struct MockSpi<'a> {
        dc: &'a Cell<bool>,
        log: &'a Log,
    }

    impl embedded_hal::spi::ErrorType for MockSpi<'_> {
        type Error = Infallible;
    }

    impl SpiDevice for MockSpi<'_> {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
            let mut log = self.log.borrow_mut();
            for op in operations.iter() {
                if let Operation::Write(bytes) = op {
                    for &b in bytes.iter() {
                        let entry = if self.dc.get() {
                            Byte::Data(b)
                        } else {
                            Byte::Command(b)
                        };
                        // Large fills overflow the log; the head is enough
                        let _ = log.push(entry);
                    }
                }
            }
            Ok(())
        }
    }

    struct MockDc<'a>(&'a Cell<bool>);

    impl embedded_hal::digital::ErrorType for MockDc<'_> {
        type Error = Infallible;
    }

    impl OutputPin for MockDc<'_> {
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0.set(true);
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0.set(false);
            Ok(())
        }
    }

    struct MockRst {
        toggles: u32,
    }

    impl embedded_hal::digital::ErrorType for MockRst {
        type Error = Infallible;
    }

    impl OutputPin for MockRst {
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.toggles += 1;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.toggles += 1;
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn commands(log: &Log) -> heapless::Vec<u8, 64> {
        log.borrow()
            .iter()
            .filter_map(|b| match b {
                Byte::Command(c) => Some(*c),
                Byte::Data(_) => None,
            })
            .take(64)
            .collect()
    }

    /// Data bytes following the first occurrence of `command`
    fn data_after(log: &Log, command: u8) -> heapless::Vec<u8, 16> {
        log.borrow()
            .iter()
            .skip_while(|b| **b != Byte::Command(command))
            .skip(1)
            .take_while(|b| matches!(b, Byte::Data(_)))
            .filter_map(|b| match b {
                Byte::Data(d) => Some(*d),
                Byte::Command(_) => None,
            })
            .take(16)
            .collect()
    }

    fn panel<'a>(dc: &'a Cell<bool>, log: &'a Log) -> St7796<MockSpi<'a>, MockDc<'a>, MockRst> {
        St7796::new(MockSpi { dc, log }, MockDc(dc), MockRst { toggles: 0 })
    }

    #[test]
    fn test_init_sequence() {
        let dc = Cell::new(false);
        let log = Log::default();
        let mut panel = panel(&dc, &log);

        panel.init(&mut NoDelay).unwrap();

        let cmds = commands(&log);
        assert_eq!(cmds[0], SWRESET);
        assert_eq!(cmds[1], SLPOUT);
        assert_eq!(cmds.last(), Some(&DISPON));
        assert_eq!(data_after(&log, MADCTL).as_slice(), &[MADCTL_LANDSCAPE]);
        assert_eq!(data_after(&log, COLMOD).as_slice(), &[COLMOD_RGB565]);

        let (_, _, rst) = panel.release();
        assert_eq!(rst.toggles, 3);
    }

    #[test]
    fn test_fill_solid_window() {
        let dc = Cell::new(false);
        let log = Log::default();
        let mut panel = panel(&dc, &log);

        panel
            .fill_solid(&Rectangle::new(Point::new(300, 10), Size::new(10, 5)), Rgb565::RED)
            .unwrap();

        assert_eq!(commands(&log).as_slice(), &[CASET, RASET, RAMWR]);
        // 300 = 0x012C, 309 = 0x0135
        assert_eq!(data_after(&log, CASET).as_slice(), &[0x01, 0x2C, 0x01, 0x35]);
        assert_eq!(data_after(&log, RASET).as_slice(), &[0x00, 0x0A, 0x00, 0x0E]);

        let pixels: heapless::Vec<u8, 128> = log
            .borrow()
            .iter()
            .skip_while(|b| **b != Byte::Command(RAMWR))
            .skip(1)
            .filter_map(|b| match b {
                Byte::Data(d) => Some(*d),
                Byte::Command(_) => None,
            })
            .collect();
        assert_eq!(pixels.len(), 100);
        assert!(pixels.chunks(2).all(|p| p == &[0xF8, 0x00]));
    }

    #[test]
    fn test_fill_clipped_to_panel() {
        let dc = Cell::new(false);
        let log = Log::default();
        let mut panel = panel(&dc, &log);

        panel
            .fill_solid(&Rectangle::new(Point::new(475, 318), Size::new(20, 20)), Rgb565::WHITE)
            .unwrap();
        // 475..=479, 318..=319
        assert_eq!(data_after(&log, CASET).as_slice(), &[0x01, 0xDB, 0x01, 0xDF]);
        assert_eq!(data_after(&log, RASET).as_slice(), &[0x01, 0x3E, 0x01, 0x3F]);
    }

    #[test]
    fn test_fill_outside_panel_is_noop() {
        let dc = Cell::new(false);
        let log = Log::default();
        let mut panel = panel(&dc, &log);

        panel
            .fill_solid(&Rectangle::new(Point::new(600, 10), Size::new(10, 10)), Rgb565::WHITE)
            .unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_out_of_bounds_pixels_ignored() {
        let dc = Cell::new(false);
        let log = Log::default();
        let mut panel = panel(&dc, &log);

        panel
            .draw_iter([
                Pixel(Point::new(-1, 0), Rgb565::WHITE),
                Pixel(Point::new(480, 0), Rgb565::WHITE),
                Pixel(Point::new(0, 320), Rgb565::WHITE),
            ])
            .unwrap();
        assert!(log.borrow().is_empty());

        panel
            .draw_iter([Pixel(Point::new(1, 1), Rgb565::BLUE)])
            .unwrap();
        assert_eq!(commands(&log).as_slice(), &[CASET, RASET, RAMWR]);
    }
}
