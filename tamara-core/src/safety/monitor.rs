//! Tick monitor implementation
//!
//! Tracks loop intervals and measured firing overshoot. Diagnostic only:
//! nothing here changes how a session is ended.

use crate::firing::FiringReport;

/// Interval multiple (of the tick period) treated as an overrun
pub const OVERRUN_FACTOR: u32 = 2;

/// Kinds of detected fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    /// Loop iteration took far longer than the tick period
    TickOverrun {
        /// Measured interval (ms)
        interval_ms: u32,
    },
}

/// Safety condition status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SafetyStatus {
    /// All conditions normal
    Ok,
    /// Condition violated
    Fault(FaultKind),
}

/// Control loop cadence monitor
#[derive(Debug, Clone)]
pub struct TickMonitor {
    /// Nominal loop period (ms)
    period_ms: u32,
    /// Timestamp of the previous tick
    last_tick_ms: Option<u32>,
    /// Longest interval seen between ticks
    max_interval_ms: u32,
    /// Number of overruns seen
    overruns: u32,
    /// Largest firing overshoot seen
    worst_overshoot_ms: u32,
}

impl TickMonitor {
    /// Create a monitor for the given loop period
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_tick_ms: None,
            max_interval_ms: 0,
            overruns: 0,
            worst_overshoot_ms: 0,
        }
    }

    /// Record a loop iteration
    ///
    /// The first call only establishes the baseline.
    pub fn record_tick(&mut self, now_ms: u32) -> SafetyStatus {
        let Some(last) = self.last_tick_ms.replace(now_ms) else {
            return SafetyStatus::Ok;
        };

        let interval_ms = now_ms.wrapping_sub(last);
        self.max_interval_ms = self.max_interval_ms.max(interval_ms);

        if interval_ms > self.period_ms.saturating_mul(OVERRUN_FACTOR) {
            self.overruns = self.overruns.saturating_add(1);
            warn!(
                "Tick overrun: {} ms (period {} ms)",
                interval_ms,
                self.period_ms
            );
            return SafetyStatus::Fault(FaultKind::TickOverrun { interval_ms });
        }

        SafetyStatus::Ok
    }

    /// Record a finished firing session
    pub fn record_firing(&mut self, report: &FiringReport) {
        let overshoot = report.overshoot_ms();
        if overshoot > self.period_ms {
            warn!("Firing overshoot {} ms exceeds one tick", overshoot);
        }
        self.worst_overshoot_ms = self.worst_overshoot_ms.max(overshoot);
    }

    /// Nominal loop period (ms)
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Longest interval seen between ticks
    pub fn max_interval_ms(&self) -> u32 {
        self.max_interval_ms
    }

    /// Number of overruns seen
    pub fn overruns(&self) -> u32 {
        self.overruns
    }

    /// Largest firing overshoot seen
    pub fn worst_overshoot_ms(&self) -> u32 {
        self.worst_overshoot_ms
    }
}
