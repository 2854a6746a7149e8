//! Touch input trait

/// A touch sample in display-pixel coordinates
///
/// Coordinates are signed so hit-regions can express "left of x" bounds
/// without special cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    pub x: i32,
    pub y: i32,
}

impl TouchPoint {
    /// Create a new touch point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Trait for touchscreen sampling
///
/// Calibration and raw sampling are the implementation's business; the
/// controller only sees screen-space points.
pub trait TouchSource {
    /// Sample the touchscreen once
    ///
    /// Must not block. Returns `None` immediately if nothing is pressed.
    fn poll(&mut self) -> Option<TouchPoint>;
}

impl<T: TouchSource + ?Sized> TouchSource for &mut T {
    fn poll(&mut self) -> Option<TouchPoint> {
        (**self).poll()
    }
}
