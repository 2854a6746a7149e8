//! Operator input handling
//!
//! Turns raw samples into something the controller can act on:
//! - [`mapper`]: touch point + screen → [`UiCommand`](crate::state::UiCommand)
//! - [`aux`]: edge detection for the auxiliary contact

pub mod aux;
pub mod mapper;

pub use aux::{AuxContact, ContactEdge, ContactState};
pub use mapper::map_touch;
