//! LED strip driver boundary.
//!
//! Bring-up (RMT channel, clock divider, GPIO) belongs to the board; it hands
//! the scheduler a ready strip implementing [`LedStrip`].

use crate::color::Rgb;

/// Trait for abstracting an addressable LED strip.
///
/// `set_pixel` only stages a value; nothing reaches the LEDs until
/// `refresh` transmits the staged frame.
pub trait LedStrip {
    /// Driver failure, logged by the scheduler and otherwise ignored.
    type Error: core::fmt::Debug;

    /// Stages `color` for the LED at `index`.
    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), Self::Error>;

    /// Transmits the staged frame, waiting at most `timeout_ms`.
    fn refresh(&mut self, timeout_ms: u32) -> Result<(), Self::Error>;

    /// Turns every LED off, waiting at most `timeout_ms`.
    fn clear(&mut self, timeout_ms: u32) -> Result<(), Self::Error>;
}

impl<S: LedStrip + ?Sized> LedStrip for &mut S {
    type Error = S::Error;

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), Self::Error> {
        (**self).set_pixel(index, color)
    }

    fn refresh(&mut self, timeout_ms: u32) -> Result<(), Self::Error> {
        (**self).refresh(timeout_ms)
    }

    fn clear(&mut self, timeout_ms: u32) -> Result<(), Self::Error> {
        (**self).clear(timeout_ms)
    }
}
