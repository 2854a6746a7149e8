//! Board-agnostic core logic for the initiator training device
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Capability traits (output driver, touch source)
//! - Operator configuration (firing duration, selected output)
//! - Screen state machine and touch hit-region mapping
//! - Timed firing sessions
//! - Tick safety monitoring
//! - Board configuration type definitions
//!
//! Everything here runs inside one cooperative control loop. Nothing
//! blocks, and nothing is shared between threads.

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod firing;
pub mod input;
pub mod layout;
pub mod safety;
pub mod state;
pub mod traits;

pub use controller::{RedrawPlan, ScreenStateMachine, View};
