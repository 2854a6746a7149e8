//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod output;
pub mod touch;

pub use output::{Channel, Level, OutputDriver};
pub use touch::{TouchPoint, TouchSource};
