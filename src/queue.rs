//! Bounded queue feeding blink requests to the scheduler.
//!
//! Producers (console parser, direct triggers) never block: a full queue
//! hands the request back as [`QueueFull`]. The scheduler polls once per
//! tick; async consumers can await [`CommandQueue::receive`] instead.

use defmt_or_log as log;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, TrySendError};

use crate::command::BlinkRequest;
use crate::config::QUEUE_CAPACITY;

/// The queue already holds [`QUEUE_CAPACITY`] requests.
///
/// Carries the rejected request so the caller can retry or report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueFull(pub BlinkRequest);

impl core::fmt::Display for QueueFull {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "command queue full ({} pending), dropped request for key {}",
            QUEUE_CAPACITY,
            self.0.key.get()
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for QueueFull {}

/// FIFO of pending blink requests, shareable across contexts.
///
/// `M` selects the mutex used by the underlying channel:
/// `CriticalSectionRawMutex` when producers run in interrupts or other
/// threads, `ThreadModeRawMutex` or `NoopRawMutex` for single-context use.
pub struct CommandQueue<M: RawMutex> {
    channel: Channel<M, BlinkRequest, QUEUE_CAPACITY>,
}

impl<M: RawMutex> CommandQueue<M> {
    /// Creates an empty queue. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Enqueues `request` without blocking.
    pub fn submit(&self, request: BlinkRequest) -> Result<(), QueueFull> {
        self.channel.try_send(request).map_err(|err| match err {
            TrySendError::Full(rejected) => {
                log::warn!(
                    "command queue full, dropping blink for key {}",
                    rejected.key.get()
                );
                QueueFull(rejected)
            }
        })
    }

    /// Dequeues the oldest request, if any.
    pub fn poll(&self) -> Option<BlinkRequest> {
        self.channel.try_receive().ok()
    }

    /// Waits for the next request.
    pub async fn receive(&self) -> BlinkRequest {
        self.channel.receive().await
    }

    /// Number of pending requests.
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.channel.is_full()
    }

    /// Maximum number of pending requests.
    pub const fn capacity(&self) -> usize {
        QUEUE_CAPACITY
    }
}

impl<M: RawMutex> Default for CommandQueue<M> {
    fn default() -> Self {
        Self::new()
    }
}
