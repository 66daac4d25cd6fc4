//! Bounded key addressing for the fixed 4×4 layout.

use crate::config::{COLUMNS, KEY_COUNT, ROWS};

/// Position of a key LED in the strip, `row * COLUMNS + col`.
///
/// A `KeyIndex` is always below [`KEY_COUNT`], so tables indexed by it can
/// never be written out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyIndex(u8);

impl KeyIndex {
    /// Returns the key at strip position `index`, or `None` past the last key.
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < KEY_COUNT {
            Some(KeyIndex(index))
        } else {
            None
        }
    }

    /// Returns the key at matrix position (`row`, `col`).
    pub const fn from_position(row: u8, col: u8) -> Option<Self> {
        if row < ROWS && col < COLUMNS {
            Some(KeyIndex(row * COLUMNS + col))
        } else {
            None
        }
    }

    /// Strip position of this key.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Strip position as a table index.
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    pub const fn row(self) -> u8 {
        self.0 / COLUMNS
    }

    pub const fn col(self) -> u8 {
        self.0 % COLUMNS
    }

    /// Iterates every key in strip order.
    pub fn all() -> impl Iterator<Item = KeyIndex> {
        (0..KEY_COUNT as u8).map(KeyIndex)
    }
}

impl From<KeyIndex> for usize {
    fn from(key: KeyIndex) -> Self {
        key.as_usize()
    }
}

impl TryFrom<usize> for KeyIndex {
    type Error = KeyOutOfRange;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        u8::try_from(index)
            .ok()
            .and_then(KeyIndex::new)
            .ok_or(KeyOutOfRange(index))
    }
}

/// A strip position at or beyond [`KEY_COUNT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyOutOfRange(pub usize);

impl core::fmt::Display for KeyOutOfRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "key index {} exceeds key count of {}", self.0, KEY_COUNT)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for KeyOutOfRange {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_maps_row_major() {
        let key = KeyIndex::from_position(1, 2).unwrap();
        assert_eq!(key.get(), 6);
        assert_eq!((key.row(), key.col()), (1, 2));
        assert_eq!(KeyIndex::from_position(3, 3).unwrap().get(), 15);
    }

    #[test]
    fn out_of_range_positions_are_rejected() {
        assert_eq!(KeyIndex::from_position(4, 0), None);
        assert_eq!(KeyIndex::from_position(0, 4), None);
        assert_eq!(KeyIndex::new(16), None);
        assert_eq!(KeyIndex::try_from(300usize), Err(KeyOutOfRange(300)));
    }

    #[test]
    fn all_covers_every_key_once() {
        assert_eq!(KeyIndex::all().count(), KEY_COUNT);
        assert!(KeyIndex::all().enumerate().all(|(i, key)| key.as_usize() == i));
    }
}
