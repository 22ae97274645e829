//! Bounded ASCII text
//!
//! Text fields carry a fixed byte cap. Oversize or non-ASCII input is
//! rejected, never truncated.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reasons a string fails bounded-text validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum TextError {
    /// Text was empty where content is required
    #[error("text must not be empty")]
    Empty,
    /// Text exceeded the byte cap
    #[error("text is {len} bytes, limit is {max}")]
    TooLong {
        /// Actual length
        len: usize,
        /// Configured cap
        max: usize,
    },
    /// Text contained a non-ASCII or control character
    #[error("text contains non-printable-ASCII byte at offset {offset}")]
    NotAscii {
        /// Byte offset of the first offending character
        offset: usize,
    },
}

/// ASCII string that passed a length cap at construction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundedAscii(String);

impl BoundedAscii {
    /// Validate `value` against `max_len`. Empty text is allowed.
    pub fn new(value: impl Into<String>, max_len: usize) -> Result<Self, TextError> {
        let value = value.into();
        if value.len() > max_len {
            return Err(TextError::TooLong {
                len: value.len(),
                max: max_len,
            });
        }
        // Printable ASCII plus tab, newline and carriage return.
        if let Some(offset) = value
            .bytes()
            .position(|b| !(b.is_ascii_graphic() || matches!(b, b' ' | b'\t' | b'\n' | b'\r')))
        {
            return Err(TextError::NotAscii { offset });
        }
        Ok(Self(value))
    }

    /// Validate `value` against `max_len`, rejecting empty text
    pub fn non_empty(value: impl Into<String>, max_len: usize) -> Result<Self, TextError> {
        let value = value.into();
        if value.is_empty() {
            return Err(TextError::Empty);
        }
        Self::new(value, max_len)
    }

    /// Borrow the text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the text is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BoundedAscii {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BoundedAscii {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
