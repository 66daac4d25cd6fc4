//! Operator console front-end.
//!
//! [`LineAssembler`] turns a byte stream into terminator-stripped lines and
//! [`submit_line`] parses one line and queues the resulting request. The
//! [`Console`] wrapper glues both together for a read loop that just hands
//! over bytes and prints whatever response comes back.

use defmt_or_log as log;
use embassy_sync::blocking_mutex::raw::RawMutex;
use heapless::Vec;

use crate::config::LINE_CAPACITY;
use crate::parser::parse;
use crate::queue::CommandQueue;

/// Reply printed to the operator after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandResponse {
    /// Request parsed and queued.
    Ok,
    /// Line did not match the grammar or overflowed the buffer.
    Error,
    /// Request parsed but the queue had no room.
    QueueFull,
}

impl CommandResponse {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CommandResponse::Ok => "OK",
            CommandResponse::Error => "ERROR",
            CommandResponse::QueueFull => "QUEUE FULL",
        }
    }
}

impl core::fmt::Display for CommandResponse {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses `line` and queues the request it describes.
pub fn submit_line<M: RawMutex>(queue: &CommandQueue<M>, line: &[u8]) -> CommandResponse {
    let request = match parse(line) {
        Ok(request) => request,
        Err(_) => {
            log::debug!("rejected console line of {} bytes", line.len());
            return CommandResponse::Error;
        }
    };

    match queue.submit(request) {
        Ok(()) => CommandResponse::Ok,
        Err(_) => CommandResponse::QueueFull,
    }
}

/// A line grew past the assembler's buffer before its terminator arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineOverflow;

impl core::fmt::Display for LineOverflow {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "console line longer than {} bytes", LINE_CAPACITY)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LineOverflow {}

/// Accumulates console bytes until `\n`.
///
/// A `\r` right before the terminator is dropped. Once a line overflows, the
/// rest of it is discarded and the terminator yields [`LineOverflow`].
#[derive(Debug, Default)]
pub struct LineAssembler<const N: usize = LINE_CAPACITY> {
    buffer: Vec<u8, N>,
    overflowed: bool,
}

impl<const N: usize> LineAssembler<N> {
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Feeds one byte; returns the finished line on `\n`.
    pub fn push(&mut self, byte: u8) -> Option<Result<Vec<u8, N>, LineOverflow>> {
        if byte != b'\n' {
            if !self.overflowed && self.buffer.push(byte).is_err() {
                self.overflowed = true;
            }
            return None;
        }

        let overflowed = core::mem::replace(&mut self.overflowed, false);
        let mut line = core::mem::take(&mut self.buffer);
        if overflowed {
            return Some(Err(LineOverflow));
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(Ok(line))
    }

    /// Bytes buffered for the current line.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Drops the partial line.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }
}

/// Byte-at-a-time console bound to a command queue.
pub struct Console<'q, M: RawMutex, const N: usize = LINE_CAPACITY> {
    queue: &'q CommandQueue<M>,
    assembler: LineAssembler<N>,
}

impl<'q, M: RawMutex, const N: usize> Console<'q, M, N> {
    pub fn new(queue: &'q CommandQueue<M>) -> Self {
        Self {
            queue,
            assembler: LineAssembler::new(),
        }
    }

    /// Feeds one byte; returns the response once a line completes.
    pub fn push_byte(&mut self, byte: u8) -> Option<CommandResponse> {
        let response = match self.assembler.push(byte)? {
            Ok(line) => submit_line(self.queue, &line),
            Err(LineOverflow) => {
                log::debug!("console line overflowed {} bytes", N);
                CommandResponse::Error
            }
        };
        Some(response)
    }

    /// Feeds a chunk of bytes, calling `respond` for every completed line.
    pub fn push_bytes(&mut self, bytes: &[u8], mut respond: impl FnMut(CommandResponse)) {
        for &byte in bytes {
            if let Some(response) = self.push_byte(byte) {
                respond(response);
            }
        }
    }
}
