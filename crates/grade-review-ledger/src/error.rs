//! Ledger error codes
//!
//! Every rejected call maps to one stable numeric code. The numbers are part
//! of the external interface and must never be renumbered.

use crate::record::ReviewStatus;
use grade_review_core::{AssignmentId, PrincipalId, ReviewId, TextError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable numeric error codes returned inside `(err u<code>)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
#[repr(u32)]
pub enum ErrorCode {
    /// Caller is not the configured reviewer
    NotAuthorized = 200,
    /// Referenced review does not exist
    ReviewNotFound = 201,
    /// Referenced review has already been decided
    ReviewNotPending = 202,
    /// Status code is not a terminal status
    InvalidStatus = 203,
    /// Grade out of range, or supplied where none is allowed
    InvalidGrade = 204,
    /// Assignment id out of range
    InvalidAssignmentId = 205,
    /// Reason text empty, oversize or not ASCII
    InvalidReason = 206,
    /// Feedback text oversize or not ASCII
    InvalidFeedback = 207,
    /// No further review ids can be assigned
    ReviewIdsExhausted = 208,
}

impl ErrorCode {
    /// All codes in numeric order
    pub const ALL: [ErrorCode; 9] = [
        ErrorCode::NotAuthorized,
        ErrorCode::ReviewNotFound,
        ErrorCode::ReviewNotPending,
        ErrorCode::InvalidStatus,
        ErrorCode::InvalidGrade,
        ErrorCode::InvalidAssignmentId,
        ErrorCode::InvalidReason,
        ErrorCode::InvalidFeedback,
        ErrorCode::ReviewIdsExhausted,
    ];

    /// Numeric wire value
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Decode a wire value
    pub fn from_u32(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_u32() == code)
    }

    /// Constant name as consumers know it
    pub fn name(self) -> &'static str {
        match self {
            ErrorCode::NotAuthorized => "ERR-NOT-AUTHORIZED",
            ErrorCode::ReviewNotFound => "ERR-REVIEW-NOT-FOUND",
            ErrorCode::ReviewNotPending => "ERR-REVIEW-NOT-PENDING",
            ErrorCode::InvalidStatus => "ERR-INVALID-STATUS",
            ErrorCode::InvalidGrade => "ERR-INVALID-GRADE",
            ErrorCode::InvalidAssignmentId => "ERR-INVALID-ASSIGNMENT-ID",
            ErrorCode::InvalidReason => "ERR-INVALID-REASON",
            ErrorCode::InvalidFeedback => "ERR-INVALID-FEEDBACK",
            ErrorCode::ReviewIdsExhausted => "ERR-REVIEW-IDS-EXHAUSTED",
        }
    }
}

impl From<ErrorCode> for u32 {
    fn from(code: ErrorCode) -> Self {
        code.as_u32()
    }
}

impl TryFrom<u32> for ErrorCode {
    type Error = String;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::from_u32(code).ok_or_else(|| format!("unknown error code {code}"))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (u{})", self.name(), self.as_u32())
    }
}

/// Rejection of a ledger operation. State is untouched whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum LedgerError {
    /// Caller is not the configured reviewer
    #[error("{caller} is not authorized to respond to reviews")]
    NotAuthorized {
        /// Principal that attempted the call
        caller: PrincipalId,
    },

    /// No review with this id
    #[error("{review_id} does not exist")]
    ReviewNotFound {
        /// Requested id
        review_id: ReviewId,
    },

    /// Review already reached a terminal status
    #[error("{review_id} is already {status}")]
    ReviewNotPending {
        /// Requested id
        review_id: ReviewId,
        /// Its current status
        status: ReviewStatus,
    },

    /// Status code is not APPROVED or REJECTED
    #[error("status code {code} is not a terminal review status")]
    InvalidStatus {
        /// Code as received
        code: u64,
    },

    /// Grade rejected
    #[error("invalid grade: {message}")]
    InvalidGrade {
        /// What was wrong with it
        message: String,
    },

    /// Assignment id outside `[1, max]`
    #[error("{assignment_id} is outside the valid range 1..={max}")]
    InvalidAssignmentId {
        /// Id as received
        assignment_id: AssignmentId,
        /// Configured upper bound
        max: u64,
    },

    /// Reason text rejected
    #[error("invalid reason: {0}")]
    InvalidReason(TextError),

    /// Feedback text rejected
    #[error("invalid feedback: {0}")]
    InvalidFeedback(TextError),

    /// The id counter reached `u64::MAX`
    #[error("review id space exhausted")]
    ReviewIdsExhausted,
}

impl LedgerError {
    /// Create a not-authorized error
    pub fn not_authorized(caller: &PrincipalId) -> Self {
        Self::NotAuthorized {
            caller: caller.clone(),
        }
    }

    /// Create an invalid grade error
    pub fn invalid_grade(message: impl Into<String>) -> Self {
        Self::InvalidGrade {
            message: message.into(),
        }
    }

    /// Stable code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::NotAuthorized { .. } => ErrorCode::NotAuthorized,
            LedgerError::ReviewNotFound { .. } => ErrorCode::ReviewNotFound,
            LedgerError::ReviewNotPending { .. } => ErrorCode::ReviewNotPending,
            LedgerError::InvalidStatus { .. } => ErrorCode::InvalidStatus,
            LedgerError::InvalidGrade { .. } => ErrorCode::InvalidGrade,
            LedgerError::InvalidAssignmentId { .. } => ErrorCode::InvalidAssignmentId,
            LedgerError::InvalidReason(_) => ErrorCode::InvalidReason,
            LedgerError::InvalidFeedback(_) => ErrorCode::InvalidFeedback,
            LedgerError::ReviewIdsExhausted => ErrorCode::ReviewIdsExhausted,
        }
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
