//! Blink requests carried from the console to the scheduler.

use crate::key::KeyIndex;

/// Instruction to flash one key for a bounded time.
///
/// `Display` renders the console form, `blink [row][col] secs`, which
/// [`parse`](crate::parser::parse) reads back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkRequest {
    pub key: KeyIndex,
    pub duration_seconds: u8,
}

impl BlinkRequest {
    /// Creates a request.
    pub const fn new(key: KeyIndex, duration_seconds: u8) -> Self {
        Self {
            key,
            duration_seconds,
        }
    }

    /// Returns true for a zero-length request, which ends any running blink.
    pub const fn is_cancel(&self) -> bool {
        self.duration_seconds == 0
    }
}

impl core::fmt::Display for BlinkRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "blink [{}][{}] {}",
            self.key.row(),
            self.key.col(),
            self.duration_seconds
        )
    }
}
