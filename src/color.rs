//! Integer HSV to RGB conversion.
//!
//! Keys are described with perceptual HSV triples (degrees and percentages)
//! and rendered to 8-bit channels with the integer hexagon decomposition the
//! firmware has always used. `max = v * 2.55` is evaluated as `v * 255 / 100`,
//! which truncates to the same value for every `v` in `0..=100`, so the output
//! is bit-identical to the float reference without touching the FPU.

use palette::Srgb;

/// 8-bit device color, as written to the LED strip.
pub type Rgb = Srgb<u8>;

/// All channels off.
pub const COLOR_OFF: Rgb = Srgb::new(0, 0, 0);

/// Full-scale white.
pub const WHITE: Rgb = Srgb::new(255, 255, 255);

/// Perceptual key color.
///
/// Hue is in degrees and may exceed 360; it is reduced modulo 360 when the
/// color is rendered. Saturation and value are percentages and are clamped to
/// `0..=100` on conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hsv {
    pub hue: u16,
    pub saturation: u8,
    pub value: u8,
}

impl Hsv {
    /// Maximum saturation/value percentage.
    pub const MAX_PERCENT: u8 = 100;

    pub const fn new(hue: u16, saturation: u8, value: u8) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Returns the same hue and saturation at full brightness.
    pub const fn at_full_value(self) -> Self {
        Self {
            value: Self::MAX_PERCENT,
            ..self
        }
    }

    /// Renders this color to device channels.
    #[inline]
    pub fn to_rgb(self) -> Rgb {
        hsv_to_rgb(
            u32::from(self.hue),
            u32::from(self.saturation),
            u32::from(self.value),
        )
    }
}

impl From<Hsv> for Rgb {
    fn from(hsv: Hsv) -> Self {
        hsv.to_rgb()
    }
}

/// Converts hue (degrees), saturation and value (percent) to 8-bit RGB.
///
/// `h` is taken modulo 360. `s` and `v` above 100 are clamped to 100.
pub fn hsv_to_rgb(h: u32, s: u32, v: u32) -> Rgb {
    let h = h % 360;
    let s = s.min(100);
    let v = v.min(100);

    let max = v * 255 / 100;
    let min = max * (100 - s) / 100;

    let sector = h / 60;
    let fractional = h % 60;
    let adjustment = (max - min) * fractional / 60;

    let (r, g, b) = match sector {
        0 => (max, min + adjustment, min),
        1 => (max - adjustment, max, min),
        2 => (min, max, min + adjustment),
        3 => (min, max - adjustment, max),
        4 => (min + adjustment, min, max),
        _ => (max, min, max - adjustment),
    };

    // every branch stays within min..=max, and max <= 255
    Srgb::new(channel(r), channel(g), channel(b))
}

#[inline]
fn channel(value: u32) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}
