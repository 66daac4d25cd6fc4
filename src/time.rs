//! Time abstraction traits for platform-agnostic timing.
//!
//! The scheduler only ever asks two things of a clock: "what time is it" and
//! "how many milliseconds lie between two instants". Adapters for
//! `embassy-time` (feature `embassy`) and `std::time` (feature `std`) live at
//! the bottom of this module.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Creates duration from whole seconds.
    fn from_secs(secs: u64) -> Self {
        Self::from_millis(secs.saturating_mul(1000))
    }

    /// Multiplies the duration by an integer factor, saturating at `u64::MAX` ms.
    fn saturating_mul(self, factor: u64) -> Self {
        Self::from_millis(self.as_millis().saturating_mul(factor))
    }
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

#[cfg(feature = "embassy")]
mod embassy_impls {
    use super::{TimeDuration, TimeInstant, TimeSource};
    use embassy_time::{Duration, Instant};

    impl TimeDuration for Duration {
        const ZERO: Self = Duration::from_ticks(0);

        fn as_millis(&self) -> u64 {
            Duration::as_millis(self)
        }

        fn from_millis(millis: u64) -> Self {
            Duration::from_millis(millis)
        }
    }

    impl TimeInstant for Instant {
        type Duration = Duration;

        fn duration_since(&self, earlier: Self) -> Duration {
            self.saturating_duration_since(earlier)
        }
    }

    /// Clock backed by the embassy time driver.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct EmbassyClock;

    impl TimeSource<Instant> for EmbassyClock {
        fn now(&self) -> Instant {
            Instant::now()
        }
    }
}

#[cfg(feature = "embassy")]
pub use embassy_impls::EmbassyClock;

#[cfg(feature = "std")]
mod std_impls {
    use super::{TimeDuration, TimeInstant, TimeSource};
    use std::time::{Duration, Instant};

    impl TimeDuration for Duration {
        const ZERO: Self = Duration::ZERO;

        fn as_millis(&self) -> u64 {
            u64::try_from(Duration::as_millis(self)).unwrap_or(u64::MAX)
        }

        fn from_millis(millis: u64) -> Self {
            Duration::from_millis(millis)
        }
    }

    impl TimeInstant for Instant {
        type Duration = Duration;

        fn duration_since(&self, earlier: Self) -> Duration {
            self.saturating_duration_since(earlier)
        }
    }

    /// Monotonic clock backed by `std::time::Instant`.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct StdClock;

    impl TimeSource<Instant> for StdClock {
        fn now(&self) -> Instant {
            Instant::now()
        }
    }
}

#[cfg(feature = "std")]
pub use std_impls::StdClock;
