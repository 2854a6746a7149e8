//! GPIO output stage
//!
//! Drives the two firing channels from GPIO pins (directly or via
//! SSR/MOSFET).

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use tamara_core::traits::{Channel, Level, OutputDriver};

/// Drive a pin whose writes cannot fail
fn drive<P: OutputPin<Error = Infallible>>(pin: &mut P, high: bool) {
    let result = if high { pin.set_high() } else { pin.set_low() };
    match result {
        Ok(()) => {}
        Err(e) => match e {},
    }
}

/// Two-channel GPIO output stage
///
/// Pins must be infallible so a LOW write can never be lost. Both
/// channels can be configured active-high (default) or active-low.
pub struct GpioOutputs<P1, P2> {
    out1: P1,
    out2: P2,
    /// If true, channel HIGH = pin LOW
    active_low: bool,
    /// Current logical level per channel
    levels: [Level; 2],
}

impl<P1, P2> GpioOutputs<P1, P2>
where
    P1: OutputPin<Error = Infallible>,
    P2: OutputPin<Error = Infallible>,
{
    /// Create the output stage
    ///
    /// # Arguments
    /// - `out1`, `out2`: Pins for channel 1 and 2
    /// - `active_low`: If true, a channel is energized when its pin is LOW
    pub fn new(out1: P1, out2: P2, active_low: bool) -> Self {
        let mut outputs = Self {
            out1,
            out2,
            active_low,
            levels: [Level::Low; 2],
        };
        // Ensure both channels start de-energized
        outputs.all_low();
        outputs
    }

    /// Create an active-high output stage
    pub fn new_active_high(out1: P1, out2: P2) -> Self {
        Self::new(out1, out2, false)
    }

    /// Create an active-low output stage
    pub fn new_active_low(out1: P1, out2: P2) -> Self {
        Self::new(out1, out2, true)
    }

    /// Current logical level of a channel
    pub fn level(&self, channel: Channel) -> Level {
        self.levels[channel.index()]
    }

    /// Release the pins
    pub fn release(self) -> (P1, P2) {
        (self.out1, self.out2)
    }
}

impl<P1, P2> OutputDriver for GpioOutputs<P1, P2>
where
    P1: OutputPin<Error = Infallible>,
    P2: OutputPin<Error = Infallible>,
{
    fn set(&mut self, channel: Channel, level: Level) {
        self.levels[channel.index()] = level;

        // Normal: HIGH -> pin high. Active-low: HIGH -> pin low
        let pin_high = level.is_high() != self.active_low;
        match channel {
            Channel::One => drive(&mut self.out1, pin_high),
            Channel::Two => drive(&mut self.out2, pin_high),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorType;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
        writes: u32,
    }

    impl MockPin {
        fn new(high: bool) -> Self {
            Self { high, writes: 0 }
        }
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_active_high_outputs() {
        let mut outputs = GpioOutputs::new_active_high(MockPin::new(true), MockPin::new(true));

        // Initially both off
        assert!(!outputs.out1.high);
        assert!(!outputs.out2.high);

        outputs.set(Channel::One, Level::High);
        assert!(outputs.out1.high);
        assert!(!outputs.out2.high);
        assert_eq!(outputs.level(Channel::One), Level::High);

        outputs.set(Channel::One, Level::Low);
        assert!(!outputs.out1.high);
        assert_eq!(outputs.level(Channel::One), Level::Low);
    }

    #[test]
    fn test_active_low_outputs() {
        let mut outputs = GpioOutputs::new_active_low(MockPin::new(false), MockPin::new(false));

        // Initially off (pins high for active-low)
        assert!(outputs.out1.high);
        assert!(outputs.out2.high);

        // Energize channel 2 (pin goes low)
        outputs.set(Channel::Two, Level::High);
        assert!(!outputs.out2.high);
        assert!(outputs.out1.high);

        outputs.all_low();
        assert!(outputs.out1.high);
        assert!(outputs.out2.high);
    }

    #[test]
    fn test_one_write_per_set() {
        let mut outputs = GpioOutputs::new_active_high(MockPin::new(false), MockPin::new(false));
        let (w1, w2) = (outputs.out1.writes, outputs.out2.writes);

        outputs.set(Channel::Two, Level::High);
        assert_eq!(outputs.out1.writes, w1);
        assert_eq!(outputs.out2.writes, w2 + 1);
    }

    #[test]
    fn test_output_driver_trait() {
        let mut outputs = GpioOutputs::new_active_high(MockPin::new(false), MockPin::new(false));

        // Use trait method through concrete type
        fn fire<O: OutputDriver>(o: &mut O) {
            o.set(Channel::One, Level::High);
            o.all_low();
        }

        fire(&mut outputs);
        let (out1, out2) = outputs.release();
        assert!(!out1.high);
        assert!(!out2.high);
    }
}
