//! Output channel driver trait

use crate::config::ConfigError;

/// One of the two mutually exclusive electrical outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Output 1
    One,
    /// Output 2
    Two,
}

impl Channel {
    /// Both channels, in numeric order
    pub const ALL: [Channel; 2] = [Channel::One, Channel::Two];

    /// Convert an operator-facing output number (1 or 2)
    ///
    /// Any other value is rejected rather than clamped.
    pub fn from_number(n: u8) -> Result<Self, ConfigError> {
        match n {
            1 => Ok(Channel::One),
            2 => Ok(Channel::Two),
            other => Err(ConfigError::InvalidChannel(other)),
        }
    }

    /// Operator-facing output number
    pub const fn number(self) -> u8 {
        match self {
            Channel::One => 1,
            Channel::Two => 2,
        }
    }

    /// Zero-based index, for per-channel arrays
    pub const fn index(self) -> usize {
        match self {
            Channel::One => 0,
            Channel::Two => 1,
        }
    }

    /// The channel that must be LOW while this one is HIGH
    pub const fn other(self) -> Self {
        match self {
            Channel::One => Channel::Two,
            Channel::Two => Channel::One,
        }
    }
}

/// Electrical level of an output channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Energized
    High,
    /// De-energized
    Low,
}

impl Level {
    /// Check if this level energizes the output
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

/// Trait for the output stage
///
/// Implementations drive the pins (directly, or via SSR/MOSFET). Writes
/// must take effect before `set` returns and cannot fail: an output that
/// silently stays HIGH is a hazard.
///
/// Only [`FiringController`](crate::firing::FiringController) calls this.
pub trait OutputDriver {
    /// Drive a channel to the given level
    fn set(&mut self, channel: Channel, level: Level);

    /// Drive both channels LOW
    fn all_low(&mut self) {
        for channel in Channel::ALL {
            self.set(channel, Level::Low);
        }
    }
}

impl<T: OutputDriver + ?Sized> OutputDriver for &mut T {
    fn set(&mut self, channel: Channel, level: Level) {
        (**self).set(channel, level)
    }
}
