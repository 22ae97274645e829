//! Core identifier types used by the grade review ledger
//!
//! Principals identify callers; they are bound by the execution environment
//! and never read from call payloads. Review and assignment ids are plain
//! unsigned integers wrapped so they cannot be mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a principal in bytes.
pub const MAX_PRINCIPAL_LEN: usize = 128;

/// Errors produced when parsing a principal
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrincipalIdError {
    /// Principal string was empty
    #[error("principal must not be empty")]
    Empty,
    /// Principal string exceeded `MAX_PRINCIPAL_LEN`
    #[error("principal is {len} bytes, limit is {MAX_PRINCIPAL_LEN}")]
    TooLong {
        /// Length of the rejected principal
        len: usize,
    },
    /// Principal contained a character outside `[A-Za-z0-9._-]`
    #[error("principal contains invalid character {ch:?}")]
    InvalidCharacter {
        /// Offending character
        ch: char,
    },
}

/// Verified identity of a caller.
///
/// Standard principals look like `ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM`,
/// contract principals append `.contract-name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PrincipalId(String);

impl PrincipalId {
    /// Create a principal, validating its shape
    pub fn new(id: impl Into<String>) -> Result<Self, PrincipalIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(PrincipalIdError::Empty);
        }
        if id.len() > MAX_PRINCIPAL_LEN {
            return Err(PrincipalIdError::TooLong { len: id.len() });
        }
        if let Some(ch) = id
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')))
        {
            return Err(PrincipalIdError::InvalidCharacter { ch });
        }
        Ok(Self(id))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PrincipalId {
    type Err = PrincipalIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PrincipalId {
    type Error = PrincipalIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PrincipalId> for String {
    fn from(id: PrincipalId) -> Self {
        id.0
    }
}

/// Ledger-assigned review identifier.
///
/// Ids start at 1; 0 never names a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReviewId(pub u64);

impl ReviewId {
    /// The first id ever assigned
    pub const FIRST: ReviewId = ReviewId(1);

    /// Create a review id
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Get the id that follows this one, or `None` on overflow
    pub fn checked_next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "review-{}", self.0)
    }
}

impl From<u64> for ReviewId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ReviewId> for u64 {
    fn from(id: ReviewId) -> Self {
        id.0
    }
}

/// Caller-supplied assignment identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssignmentId(pub u64);

impl AssignmentId {
    /// Create an assignment id
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "assignment-{}", self.0)
    }
}

impl From<u64> for AssignmentId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
