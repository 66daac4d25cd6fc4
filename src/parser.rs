//! Console command grammar.
//!
//! Exactly one form is accepted:
//!
//! ```text
//! blink [R][C] S
//! blink [R][C] SS
//! ```
//!
//! with `R` and `C` single digits `0`-`3` and `SS` at most 30. The line is
//! matched byte by byte in a single pass; there is no whitespace folding and
//! no partial result.

use crate::command::BlinkRequest;
use crate::config::{COLUMNS, MAX_BLINK_SECONDS, ROWS};
use crate::key::KeyIndex;

const PREFIX: &[u8] = b"blink [";
const SEPARATOR: &[u8] = b"][";
const SUFFIX: &[u8] = b"] ";

/// Console parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// The line does not match `blink [R][C] S`.
    InvalidSyntax,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::InvalidSyntax => {
                write!(f, "expected `blink [row][col] seconds`")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// Byte cursor over one console line.
struct Cursor<'a> {
    rest: &'a [u8],
}

impl<'a> Cursor<'a> {
    fn literal(&mut self, expected: &[u8]) -> Result<(), ParseError> {
        self.rest = self
            .rest
            .strip_prefix(expected)
            .ok_or(ParseError::InvalidSyntax)?;
        Ok(())
    }

    fn coordinate(&mut self, limit: u8) -> Result<u8, ParseError> {
        let (&byte, rest) = self.rest.split_first().ok_or(ParseError::InvalidSyntax)?;
        let value = digit(byte)?;
        if value >= limit {
            return Err(ParseError::InvalidSyntax);
        }
        self.rest = rest;
        Ok(value)
    }

    fn seconds(&mut self) -> Result<u8, ParseError> {
        match self.rest {
            &[units] => {
                self.rest = &[];
                digit(units)
            }
            &[tens, units] => {
                let value = digit(tens)? * 10 + digit(units)?;
                if value > MAX_BLINK_SECONDS {
                    return Err(ParseError::InvalidSyntax);
                }
                self.rest = &[];
                Ok(value)
            }
            _ => Err(ParseError::InvalidSyntax),
        }
    }
}

#[inline]
fn digit(byte: u8) -> Result<u8, ParseError> {
    if byte.is_ascii_digit() {
        Ok(byte - b'0')
    } else {
        Err(ParseError::InvalidSyntax)
    }
}

/// Decodes one terminator-stripped console line.
pub fn parse(line: &[u8]) -> Result<BlinkRequest, ParseError> {
    let mut cursor = Cursor { rest: line };

    cursor.literal(PREFIX)?;
    let row = cursor.coordinate(ROWS)?;
    cursor.literal(SEPARATOR)?;
    let col = cursor.coordinate(COLUMNS)?;
    cursor.literal(SUFFIX)?;
    let duration_seconds = cursor.seconds()?;

    let key = KeyIndex::from_position(row, col).ok_or(ParseError::InvalidSyntax)?;
    Ok(BlinkRequest::new(key, duration_seconds))
}

impl TryFrom<&[u8]> for BlinkRequest {
    type Error = ParseError;

    fn try_from(line: &[u8]) -> Result<Self, Self::Error> {
        parse(line)
    }
}

impl core::str::FromStr for BlinkRequest {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        parse(line.as_bytes())
    }
}
