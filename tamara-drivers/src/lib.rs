//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tamara-core, written against `embedded-hal` 1.0 so they run on any
//! HAL and can be tested with mock pins and SPI devices:
//!
//! - Output stage (two GPIO channels, either polarity)
//! - Touch controller (XPT2046 resistive)
//! - TFT panel (ST7796, 480x320 RGB565)

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod output;
pub mod touch;
