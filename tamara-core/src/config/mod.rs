//! Configuration types
//!
//! Two layers:
//! - [`FiringConfig`]: operator settings edited on the touchscreen. Never
//!   persisted; every power cycle starts from the defaults.
//! - [`BoardConfig`]: board tunables fixed at build time from `board.toml`.

pub mod firing;
pub mod hardware;

pub use firing::*;
pub use hardware::*;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Output number outside {1, 2}
    InvalidChannel(u8),
    /// Loop period outside the supported range (ms)
    InvalidTickPeriod(u16),
    /// Touch calibration has a zero span
    InvalidCalibration,
}
