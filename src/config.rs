//! Layout constants and runtime configuration.
//!
//! The key layout and buffer sizes are fixed at compile time; timing and
//! colors are carried in [`IlluminationConfig`] so a board can tune them
//! without touching the scheduler.

use crate::color::{Hsv, Rgb};
use crate::time::TimeDuration;
use palette::Srgb;

/// Key matrix rows.
pub const ROWS: u8 = 4;

/// Key matrix columns.
pub const COLUMNS: u8 = 4;

/// Number of addressable key LEDs (`ROWS * COLUMNS`).
pub const KEY_COUNT: usize = ROWS as usize * COLUMNS as usize;

/// Pending blink requests the command queue can hold.
pub const QUEUE_CAPACITY: usize = 16;

/// Longest blink a two-digit console command may request (seconds).
pub const MAX_BLINK_SECONDS: u8 = 30;

/// Console line buffer size (bytes, terminator excluded).
pub const LINE_CAPACITY: usize = 32;

/// Timeout handed to the strip driver on `refresh` and `clear` (ms).
pub const DEFAULT_DRIVER_TIMEOUT_MS: u32 = 100;

/// Scheduler tick period (ms).
pub const DEFAULT_TICK_PERIOD_MS: u64 = 20;

/// Toggle interval per requested blink second (ms).
pub const DEFAULT_TOGGLE_UNIT_MS: u64 = 100;

/// Color written for the "on" phase of a blink.
pub const DEFAULT_BLINK_COLOR: Rgb = Srgb::new(100, 100, 100);

/// Color every key starts with: cyan hue, fully saturated, dark.
pub const DEFAULT_KEY_COLOR: Hsv = Hsv::new(180, 100, 0);

/// How long a blinking key holds each phase before toggling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TogglePeriod<D> {
    /// The same interval for every request.
    Fixed(D),

    /// `duration_seconds` times the given unit.
    ///
    /// With a 100 ms unit a 5 second blink toggles every 500 ms.
    ScaledByDuration(D),
}

impl<D: TimeDuration> TogglePeriod<D> {
    /// Interval between toggles for a request of `duration_seconds`.
    pub fn interval_for(&self, duration_seconds: u8) -> D {
        match *self {
            TogglePeriod::Fixed(interval) => interval,
            TogglePeriod::ScaledByDuration(unit) => {
                unit.saturating_mul(u64::from(duration_seconds))
            }
        }
    }
}

/// Runtime tuning for the blink scheduler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IlluminationConfig<D> {
    /// Sleep between scheduler ticks.
    pub tick_period: D,

    /// Toggle cadence of blinking keys.
    pub toggle_period: TogglePeriod<D>,

    /// Color of the "on" blink phase.
    pub blink_color: Rgb,

    /// Base color of every key at start-up.
    pub default_color: Hsv,

    /// Timeout passed to the strip driver (ms).
    pub driver_timeout_ms: u32,
}

impl<D: TimeDuration> IlluminationConfig<D> {
    /// Sets the tick period.
    pub fn with_tick_period(mut self, tick_period: D) -> Self {
        self.tick_period = tick_period;
        self
    }

    /// Sets the toggle cadence.
    pub fn with_toggle_period(mut self, toggle_period: TogglePeriod<D>) -> Self {
        self.toggle_period = toggle_period;
        self
    }

    /// Sets the "on" blink color.
    pub fn with_blink_color(mut self, blink_color: Rgb) -> Self {
        self.blink_color = blink_color;
        self
    }

    /// Sets the start-up key color.
    pub fn with_default_color(mut self, default_color: Hsv) -> Self {
        self.default_color = default_color;
        self
    }

    /// Sets the driver timeout.
    pub fn with_driver_timeout_ms(mut self, driver_timeout_ms: u32) -> Self {
        self.driver_timeout_ms = driver_timeout_ms;
        self
    }
}

impl<D: TimeDuration> Default for IlluminationConfig<D> {
    fn default() -> Self {
        Self {
            tick_period: D::from_millis(DEFAULT_TICK_PERIOD_MS),
            toggle_period: TogglePeriod::ScaledByDuration(D::from_millis(DEFAULT_TOGGLE_UNIT_MS)),
            blink_color: DEFAULT_BLINK_COLOR,
            default_color: DEFAULT_KEY_COLOR,
            driver_timeout_ms: DEFAULT_DRIVER_TIMEOUT_MS,
        }
    }
}
