//! Display abstraction and renderer for Tamara
//!
//! This crate provides:
//! - `DrawCommand`, the small vocabulary the UI is drawn with
//! - `DisplayBackend` trait for executing commands on a panel
//! - `GraphicsBackend`, a backend for any `embedded-graphics` RGB565 target
//! - `Renderer`, which turns a redraw plan and a view snapshot into commands
//! - The RGB565 colour palette
//!
//! # Architecture
//!
//! The controller in `tamara-core` decides *what* changed on each tick. The
//! renderer decides *which pixels* that means, as a bounded list of
//! commands. The backend decides *how* to put them on the glass. Neither
//! the renderer nor the backend ever calls back into the controller.

#![no_std]

pub mod backend;
pub mod color;
pub mod command;
pub mod graphics;
pub mod renderer;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use color::{rgb, ChargeStatus};
pub use command::{Anchor, CommandList, DrawCommand, TextSize};
pub use graphics::GraphicsBackend;
pub use renderer::Renderer;
