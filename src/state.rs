//! Per-key illumination table.
//!
//! Each slot keeps a base [`Hsv`] color and the RGB value currently shown.
//! The shown value normally tracks the base color; the blink scheduler can
//! override it with [`KeyIllumination::set_key_rgb`] and later hand control
//! back with [`KeyIllumination::restore`].

use crate::color::{Hsv, Rgb};
use crate::config::KEY_COUNT;
use crate::key::KeyIndex;

#[derive(Debug, Clone, Copy, PartialEq)]
struct KeySlot {
    color: Hsv,
    shown: Rgb,
    overridden: bool,
}

impl KeySlot {
    fn new(color: Hsv) -> Self {
        Self {
            color,
            shown: color.to_rgb(),
            overridden: false,
        }
    }

    fn sync(&mut self) {
        if !self.overridden {
            self.shown = self.color.to_rgb();
        }
    }
}

/// What every key currently shows.
#[derive(Debug, Clone)]
pub struct KeyIllumination {
    slots: [KeySlot; KEY_COUNT],
}

impl KeyIllumination {
    /// Creates a table with every key set to `default_color`.
    pub fn new(default_color: Hsv) -> Self {
        Self {
            slots: [KeySlot::new(default_color); KEY_COUNT],
        }
    }

    /// Raises the key's value to full brightness.
    ///
    /// Hue and saturation are left alone. If the key is under an RGB
    /// override, only the base color changes and shows after [`restore`].
    ///
    /// [`restore`]: KeyIllumination::restore
    pub fn set_key_pressed(&mut self, key: KeyIndex) {
        let slot = &mut self.slots[key.as_usize()];
        slot.color = slot.color.at_full_value();
        slot.sync();
    }

    /// Replaces the key's base color.
    pub fn set_key_hsv(&mut self, key: KeyIndex, color: Hsv) {
        let slot = &mut self.slots[key.as_usize()];
        slot.color = color;
        slot.sync();
    }

    /// Shows `color` on the key regardless of its base color.
    pub fn set_key_rgb(&mut self, key: KeyIndex, color: Rgb) {
        let slot = &mut self.slots[key.as_usize()];
        slot.shown = color;
        slot.overridden = true;
    }

    /// Drops any RGB override and shows the base color again.
    pub fn restore(&mut self, key: KeyIndex) {
        let slot = &mut self.slots[key.as_usize()];
        slot.overridden = false;
        slot.sync();
    }

    /// Base color of the key.
    pub fn hsv(&self, key: KeyIndex) -> Hsv {
        self.slots[key.as_usize()].color
    }

    /// Color the key currently shows.
    pub fn rgb(&self, key: KeyIndex) -> Rgb {
        self.slots[key.as_usize()].shown
    }

    /// Returns true while an RGB override is active on the key.
    pub fn is_overridden(&self, key: KeyIndex) -> bool {
        self.slots[key.as_usize()].overridden
    }

    /// Shown colors in strip order.
    pub fn frame(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.slots.iter().map(|slot| slot.shown)
    }
}
