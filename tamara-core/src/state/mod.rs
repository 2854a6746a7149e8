//! Screen state machine
//!
//! Defines which screen is current and how commands move between them.
//! The machine is explicit, finite, and deterministic.

pub mod events;
pub mod screen;

pub use events::{Event, UiCommand};
pub use screen::Screen;
