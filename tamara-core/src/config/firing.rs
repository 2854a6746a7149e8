//! Operator firing configuration
//!
//! Holds the configured duration and selected output. Every mutator
//! clamps, so there is no externally observable invalid state.

use crate::traits::Channel;

/// Shortest allowed firing duration (ms)
pub const MIN_DURATION_MS: u32 = 100;

/// Longest allowed firing duration (ms)
pub const MAX_DURATION_MS: u32 = 10_000;

/// Increment/decrement step (ms)
pub const DURATION_STEP_MS: u32 = 100;

/// Duration after power-on (ms)
pub const DEFAULT_DURATION_MS: u32 = 1000;

/// Output after power-on
pub const DEFAULT_OUTPUT: Channel = Channel::One;

/// Clamp a requested duration into the allowed range
///
/// Values between steps are rounded down to the step grid.
pub fn clamp_duration(duration_ms: u32) -> u32 {
    let clamped = duration_ms.clamp(MIN_DURATION_MS, MAX_DURATION_MS);
    clamped - clamped % DURATION_STEP_MS
}

/// Operator-editable firing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FiringConfig {
    duration_ms: u32,
    selected_output: Channel,
}

impl Default for FiringConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FiringConfig {
    /// Create the power-on configuration (1000 ms, output 1)
    pub const fn new() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            selected_output: DEFAULT_OUTPUT,
        }
    }

    /// Configured firing duration in milliseconds
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Selected output channel
    pub fn selected_output(&self) -> Channel {
        self.selected_output
    }

    /// Lengthen by one step, saturating at the maximum
    pub fn increment(&mut self) {
        self.duration_ms = (self.duration_ms + DURATION_STEP_MS).min(MAX_DURATION_MS);
    }

    /// Shorten by one step, saturating at the minimum
    pub fn decrement(&mut self) {
        self.duration_ms = self
            .duration_ms
            .saturating_sub(DURATION_STEP_MS)
            .max(MIN_DURATION_MS);
    }

    /// Select the output to fire
    ///
    /// Takes a typed channel, so out-of-range numbers are rejected
    /// earlier by [`Channel::from_number`].
    pub fn select_output(&mut self, channel: Channel) {
        self.selected_output = channel;
    }

    /// Set the duration directly, clamping silently
    pub fn set_duration_ms(&mut self, duration_ms: u32) {
        self.duration_ms = clamp_duration(duration_ms);
    }
}
