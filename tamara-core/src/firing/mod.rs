//! Timed firing sessions
//!
//! The firing controller is the only component allowed to drive the
//! output stage. A session is cut off by the first `tick` at or past its
//! deadline, so the energized time lies in
//! `[duration, duration + tick period]`.
//!
//! A session ending on a tick frees the controller for that same tick.
//! With FIRE held down the state machine starts the next session
//! immediately, so the output can go LOW and back HIGH with no visible
//! gap. Holding FIRE keeps re-arming; releasing it is what stops a chain.

pub mod controller;

pub use controller::{FiringController, FiringError, FiringReport, FiringSession};
