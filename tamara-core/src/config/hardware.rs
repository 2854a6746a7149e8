//! Board configuration types
//!
//! These types describe the board-level tunables: loop period, output
//! polarity and touch calibration. The firmware build script parses
//! `board.toml` into [`BoardConfig`] and embeds it as a constant.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Nominal control loop period (ms)
pub const DEFAULT_TICK_PERIOD_MS: u16 = 50;

/// Shortest supported loop period (ms)
pub const MIN_TICK_PERIOD_MS: u16 = 10;

/// Longest supported loop period (ms)
///
/// The loop period bounds firing overshoot, so it is capped.
pub const MAX_TICK_PERIOD_MS: u16 = 100;

/// Control loop settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlConfig {
    /// Loop period in milliseconds
    pub tick_period_ms: u16,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
        }
    }
}

/// Output stage settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputConfig {
    /// Outputs are energized by driving the pin LOW
    pub active_low: bool,
}

/// Resistive touch calibration
///
/// Same shape as the calibration record of the reference hardware:
/// raw offsets and spans per axis plus orientation flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchCalibration {
    /// Raw reading at the left edge
    pub x_offset: u16,
    /// Raw counts across the screen width
    pub x_span: u16,
    /// Raw reading at the top edge
    pub y_offset: u16,
    /// Raw counts across the screen height
    pub y_span: u16,
    /// Raw X drives screen Y and vice versa
    pub swap_xy: bool,
    /// Mirror the screen X axis
    pub invert_x: bool,
    /// Mirror the screen Y axis
    pub invert_y: bool,
    /// Minimum pressure for a touch to count
    pub pressure_threshold: u16,
}

impl Default for TouchCalibration {
    fn default() -> Self {
        Self {
            x_offset: 390,
            x_span: 3358,
            y_offset: 318,
            y_span: 3329,
            swap_xy: true,
            invert_x: true,
            invert_y: true,
            pressure_threshold: 600,
        }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    pub control: ControlConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub outputs: OutputConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub touch: TouchCalibration,
}

impl BoardConfig {
    /// Check the configuration for values the firmware cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        let period = self.control.tick_period_ms;
        if !(MIN_TICK_PERIOD_MS..=MAX_TICK_PERIOD_MS).contains(&period) {
            return Err(ConfigError::InvalidTickPeriod(period));
        }

        if self.touch.x_span == 0 || self.touch.y_span == 0 {
            return Err(ConfigError::InvalidCalibration);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(BoardConfig::default().validate(), Ok(()));
        assert_eq!(BoardConfig::default().control.tick_period_ms, 50);
    }

    #[test]
    fn test_tick_period_bounds() {
        let mut config = BoardConfig::default();

        config.control.tick_period_ms = 5;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTickPeriod(5)));

        config.control.tick_period_ms = 250;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTickPeriod(250)));

        config.control.tick_period_ms = MAX_TICK_PERIOD_MS;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_zero_span_rejected() {
        let mut config = BoardConfig::default();
        config.touch.y_span = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidCalibration));
    }
}
