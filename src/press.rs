//! Lock-free hand-off of key presses to the scheduler.
//!
//! The matrix scanner calls [`KeyPressLatch::press`] from whatever context it
//! runs in; the scheduler drains the latch at the top of every tick. A bit per
//! key means a press never waits on the LED refresh and several presses of
//! the same key between two ticks collapse into one.

use portable_atomic::{AtomicU16, Ordering};

use crate::config::KEY_COUNT;
use crate::key::KeyIndex;

const _: () = assert!(KEY_COUNT <= u16::BITS as usize);

/// Per-key press flags shared between the scanner and the scheduler.
#[derive(Debug)]
pub struct KeyPressLatch {
    pending: AtomicU16,
}

impl KeyPressLatch {
    pub const fn new() -> Self {
        Self {
            pending: AtomicU16::new(0),
        }
    }

    /// Records a press of `key`.
    pub fn press(&self, key: KeyIndex) {
        self.pending.fetch_or(1 << key.get(), Ordering::AcqRel);
    }

    /// Returns true if any press is waiting to be applied.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire) != 0
    }

    /// Takes every recorded press, clearing the latch.
    pub fn take(&self) -> PressedKeys {
        PressedKeys(self.pending.swap(0, Ordering::AcqRel))
    }
}

impl Default for KeyPressLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of latched presses, iterated in strip order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressedKeys(u16);

impl PressedKeys {
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, key: KeyIndex) -> bool {
        self.0 & (1 << key.get()) != 0
    }
}

impl Iterator for PressedKeys {
    type Item = KeyIndex;

    fn next(&mut self) -> Option<KeyIndex> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        KeyIndex::new(bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(index: u8) -> KeyIndex {
        KeyIndex::new(index).unwrap()
    }

    #[test]
    fn take_drains_in_strip_order() {
        let latch = KeyPressLatch::new();
        latch.press(key(9));
        latch.press(key(0));
        latch.press(key(9));
        assert!(latch.is_pending());

        let pressed = latch.take();
        assert!(pressed.contains(key(0)));
        let mut order = pressed.map(KeyIndex::get);
        assert_eq!(order.next(), Some(0));
        assert_eq!(order.next(), Some(9));
        assert_eq!(order.next(), None);

        assert!(!latch.is_pending());
        assert!(latch.take().is_empty());
    }

    #[test]
    fn last_key_fits_in_latch() {
        let latch = KeyPressLatch::new();
        latch.press(key(15));
        assert_eq!(latch.take().next(), Some(key(15)));
    }
}
