//! Safety monitoring
//!
//! Watches the control loop cadence. A late tick stretches a firing by
//! the same amount, so overruns are reported and logged.

pub mod monitor;

pub use monitor::{FaultKind, SafetyStatus, TickMonitor};
