//! Shared test infrastructure for key-illumination integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;

use key_illumination::{
    COLOR_OFF, KEY_COUNT, LedStrip, Rgb, TimeDuration, TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, millis: u64) {
        self.current_time.set(TestInstant(millis));
    }

    pub fn millis(&self) -> u64 {
        self.current_time.get().0
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock LED strip
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockStripError {
    Timeout,
}

/// Mock strip that stages pixels and records every refreshed frame
pub struct MockStrip {
    staged: [Rgb; KEY_COUNT],
    shown: [Rgb; KEY_COUNT],
    refreshes: usize,
    clears: usize,
    last_timeout_ms: Option<u32>,
    failing_refreshes: Cell<usize>,
}

impl MockStrip {
    pub fn new() -> Self {
        Self {
            staged: [COLOR_OFF; KEY_COUNT],
            shown: [COLOR_OFF; KEY_COUNT],
            refreshes: 0,
            clears: 0,
            last_timeout_ms: None,
            failing_refreshes: Cell::new(0),
        }
    }

    /// The last frame successfully transmitted
    pub fn shown(&self, index: usize) -> Rgb {
        self.shown[index]
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes
    }

    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Timeout passed to the most recent `refresh` or `clear`
    pub fn last_timeout_ms(&self) -> Option<u32> {
        self.last_timeout_ms
    }

    /// Make the next `count` refresh calls fail
    pub fn fail_next_refreshes(&self, count: usize) {
        self.failing_refreshes.set(count);
    }
}

impl LedStrip for MockStrip {
    type Error = MockStripError;

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), Self::Error> {
        self.staged[index] = color;
        Ok(())
    }

    fn refresh(&mut self, timeout_ms: u32) -> Result<(), Self::Error> {
        self.last_timeout_ms = Some(timeout_ms);
        let failing = self.failing_refreshes.get();
        if failing > 0 {
            self.failing_refreshes.set(failing - 1);
            return Err(MockStripError::Timeout);
        }
        self.shown = self.staged;
        self.refreshes += 1;
        Ok(())
    }

    fn clear(&mut self, timeout_ms: u32) -> Result<(), Self::Error> {
        self.last_timeout_ms = Some(timeout_ms);
        self.staged = [COLOR_OFF; KEY_COUNT];
        self.shown = [COLOR_OFF; KEY_COUNT];
        self.clears += 1;
        Ok(())
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Scheduler tick period used throughout the tests (ms)
pub const TICK_MS: u64 = 20;

pub fn key(index: u8) -> key_illumination::KeyIndex {
    key_illumination::KeyIndex::new(index).unwrap()
}
