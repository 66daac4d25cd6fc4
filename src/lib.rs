#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Hsv` / `hsv_to_rgb`**: Integer hue/saturation/value to 8-bit RGB conversion
//! - **`KeyIndex`**: A key position that is always inside the 4×4 layout
//! - **`KeyIllumination`**: Base color and shown color of every key
//! - **`BlinkScheduler`**: Periodic loop that times blinks and pushes frames to the strip
//! - **`CommandQueue`**: Bounded FIFO of `BlinkRequest`s from the console to the scheduler
//! - **`parse`**: Strict decoder for `blink [row][col] secs` console lines
//! - **`Console`**: Line assembler plus parse-and-submit, answering `OK` / `ERROR` / `QUEUE FULL`
//! - **`KeyPressLatch`**: Lock-free hand-off of key presses to the scheduler
//! - **`LedStrip`**: Trait to implement for your LED strip driver
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Colors are `Srgb<u8>` values; the strip driver receives them unchanged.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod color;
pub mod command;
pub mod config;
pub mod console;
pub mod driver;
pub mod key;
pub mod parser;
pub mod press;
pub mod queue;
pub mod scheduler;
pub mod state;
pub mod time;

pub use color::{COLOR_OFF, Hsv, Rgb, WHITE, hsv_to_rgb};
pub use command::BlinkRequest;
pub use config::{IlluminationConfig, KEY_COUNT, TogglePeriod};
pub use console::{Console, CommandResponse, LineAssembler, LineOverflow, submit_line};
pub use driver::LedStrip;
pub use key::{KeyIndex, KeyOutOfRange};
pub use parser::{ParseError, parse};
pub use press::{KeyPressLatch, PressedKeys};
pub use queue::{CommandQueue, QueueFull};
pub use scheduler::{BlinkScheduler, BlinkState, TickSummary};
pub use state::KeyIllumination;
pub use time::{TimeDuration, TimeInstant, TimeSource};

#[cfg(feature = "embassy")]
pub use time::EmbassyClock;
#[cfg(feature = "std")]
pub use time::StdClock;
