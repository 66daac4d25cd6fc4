//! Per-key blink scheduler.
//!
//! Provides [`BlinkScheduler`], which owns the key illumination table and the
//! LED strip, and advances every key's blink timer once per tick. Each tick
//! runs in a fixed order:
//!
//! 1. latched key presses are applied,
//! 2. at most one [`BlinkRequest`] is taken from the [`CommandQueue`],
//! 3. every blinking key is expired or toggled,
//! 4. the whole frame is pushed to the strip with a single refresh.
//!
//! A request and an expiry landing on the same tick therefore show up in the
//! same frame.

use defmt_or_log as log;
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::color::{COLOR_OFF, Hsv};
use crate::command::BlinkRequest;
use crate::config::{IlluminationConfig, KEY_COUNT};
use crate::driver::LedStrip;
use crate::key::KeyIndex;
use crate::press::KeyPressLatch;
use crate::queue::CommandQueue;
use crate::state::KeyIllumination;
use crate::time::{TimeDuration, TimeInstant, TimeSource};

/// Blink status of a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkState {
    /// Not blinking. The key shows its base color.
    Idle,
    /// Blinking; `lit` is the current toggle phase.
    Blinking { lit: bool },
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickSummary {
    /// Request taken from the queue this tick.
    pub consumed: Option<BlinkRequest>,
    /// Keys whose press was applied.
    pub presses: usize,
    /// Keys that flipped phase.
    pub toggled: usize,
    /// Keys whose blink ended.
    pub expired: usize,
    /// False if the driver rejected the frame.
    pub frame_pushed: bool,
}

enum BlinkSlot<I: TimeInstant> {
    Idle,
    Blinking {
        started: I,
        last_toggle: I,
        lifetime: I::Duration,
        interval: I::Duration,
        lit: bool,
    },
}

enum Transition {
    Toggled,
    Expired,
}

/// Drives blink effects on every key of the strip.
///
/// # Type Parameters
/// * `'a` - Lifetime of the shared clock, queue and press latch
/// * `I` - Time instant type
/// * `S` - LED strip driver
/// * `T` - Time source implementation type
/// * `M` - Mutex flavour of the command queue
pub struct BlinkScheduler<'a, I, S, T, M>
where
    I: TimeInstant,
    S: LedStrip,
    T: TimeSource<I>,
    M: RawMutex,
{
    strip: S,
    time_source: &'a T,
    queue: &'a CommandQueue<M>,
    presses: &'a KeyPressLatch,
    config: IlluminationConfig<I::Duration>,
    keys: KeyIllumination,
    slots: [BlinkSlot<I>; KEY_COUNT],
}

impl<'a, I, S, T, M> BlinkScheduler<'a, I, S, T, M>
where
    I: TimeInstant,
    S: LedStrip,
    T: TimeSource<I>,
    M: RawMutex,
{
    /// Creates a scheduler with every key idle at the configured default color.
    ///
    /// The strip is cleared first; a failing clear is logged and the
    /// scheduler starts anyway, the first tick overwrites every pixel.
    pub fn new(
        mut strip: S,
        time_source: &'a T,
        queue: &'a CommandQueue<M>,
        presses: &'a KeyPressLatch,
        config: IlluminationConfig<I::Duration>,
    ) -> Self {
        if let Err(err) = strip.clear(config.driver_timeout_ms) {
            log::warn!(
                "clearing key LEDs failed: {:?}",
                defmt_or_log::Debug2Format(&err)
            );
        }

        Self {
            strip,
            time_source,
            queue,
            presses,
            keys: KeyIllumination::new(config.default_color),
            slots: core::array::from_fn(|_| BlinkSlot::Idle),
            config,
        }
    }

    /// Runs one scheduler iteration at the current time.
    pub fn tick(&mut self) -> TickSummary {
        let now = self.time_source.now();
        let mut summary = TickSummary::default();

        for key in self.presses.take() {
            self.keys.set_key_pressed(key);
            summary.presses += 1;
        }

        if let Some(request) = self.queue.poll() {
            self.start_blink(request, now);
            summary.consumed = Some(request);
        }

        for key in KeyIndex::all() {
            match self.advance(key, now) {
                Some(Transition::Toggled) => summary.toggled += 1,
                Some(Transition::Expired) => summary.expired += 1,
                None => {}
            }
        }

        summary.frame_pushed = self.push_frame().is_ok();
        summary
    }

    /// Ticks forever, sleeping `tick_period` between iterations.
    pub async fn run<D: embedded_hal_async::delay::DelayNs>(&mut self, delay: &mut D) -> ! {
        let period_ms = self.tick_period_ms();
        log::info!("blink scheduler running, tick every {} ms", period_ms);
        loop {
            self.tick();
            delay.delay_ms(period_ms).await;
        }
    }

    /// Blocking variant of [`run`](BlinkScheduler::run) for threaded hosts.
    pub fn run_blocking<D: embedded_hal::delay::DelayNs>(&mut self, delay: &mut D) -> ! {
        let period_ms = self.tick_period_ms();
        log::info!("blink scheduler running, tick every {} ms", period_ms);
        loop {
            self.tick();
            delay.delay_ms(period_ms);
        }
    }

    fn tick_period_ms(&self) -> u32 {
        u32::try_from(self.config.tick_period.as_millis()).unwrap_or(u32::MAX)
    }

    fn start_blink(&mut self, request: BlinkRequest, now: I) {
        let key = request.key;
        let index = key.as_usize();

        if request.is_cancel() {
            log::debug!("blink on key {} cancelled", key.get());
            self.slots[index] = BlinkSlot::Idle;
            self.keys.restore(key);
            return;
        }

        log::info!(
            "blinking key {} for {} s",
            key.get(),
            request.duration_seconds
        );
        self.slots[index] = BlinkSlot::Blinking {
            started: now,
            last_toggle: now,
            lifetime: I::Duration::from_secs(u64::from(request.duration_seconds)),
            interval: self.config.toggle_period.interval_for(request.duration_seconds),
            lit: false,
        };
        self.keys.set_key_rgb(key, COLOR_OFF);
    }

    fn advance(&mut self, key: KeyIndex, now: I) -> Option<Transition> {
        let index = key.as_usize();
        let BlinkSlot::Blinking {
            started,
            last_toggle,
            lifetime,
            interval,
            lit,
        } = self.slots[index]
        else {
            return None;
        };

        if now.duration_since(started).as_millis() > lifetime.as_millis() {
            log::debug!("blink on key {} expired", key.get());
            self.slots[index] = BlinkSlot::Idle;
            self.keys.restore(key);
            return Some(Transition::Expired);
        }

        if now.duration_since(last_toggle).as_millis() > interval.as_millis() {
            let lit = !lit;
            self.slots[index] = BlinkSlot::Blinking {
                started,
                last_toggle: now,
                lifetime,
                interval,
                lit,
            };
            let color = if lit { self.config.blink_color } else { COLOR_OFF };
            self.keys.set_key_rgb(key, color);
            return Some(Transition::Toggled);
        }

        None
    }

    fn push_frame(&mut self) -> Result<(), S::Error> {
        for (index, color) in self.keys.frame().enumerate() {
            self.strip.set_pixel(index, color).inspect_err(|err| {
                log::warn!(
                    "staging key LED {} failed: {:?}",
                    index,
                    defmt_or_log::Debug2Format(err)
                );
            })?;
        }

        self.strip
            .refresh(self.config.driver_timeout_ms)
            .inspect_err(|err| {
                log::warn!(
                    "key LED refresh failed: {:?}",
                    defmt_or_log::Debug2Format(err)
                );
            })
    }

    /// Replaces a key's base color.
    pub fn set_key_hsv(&mut self, key: KeyIndex, color: Hsv) {
        self.keys.set_key_hsv(key, color);
    }

    /// Blink status of `key`.
    pub fn blink_state(&self, key: KeyIndex) -> BlinkState {
        match self.slots[key.as_usize()] {
            BlinkSlot::Idle => BlinkState::Idle,
            BlinkSlot::Blinking { lit, .. } => BlinkState::Blinking { lit },
        }
    }

    /// Number of keys currently blinking.
    pub fn active_blinks(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, BlinkSlot::Blinking { .. }))
            .count()
    }

    /// The illumination table.
    pub fn keys(&self) -> &KeyIllumination {
        &self.keys
    }

    pub fn config(&self) -> &IlluminationConfig<I::Duration> {
        &self.config
    }

    /// The strip driver.
    pub fn strip(&self) -> &S {
        &self.strip
    }

    /// Consumes the scheduler, returning the strip driver.
    pub fn into_strip(self) -> S {
        self.strip
    }
}
