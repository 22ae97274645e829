//! Review records and their status
//!
//! # Lifecycle
//!
//! ```text
//! PENDING ──respond(APPROVED)──▶ APPROVED
//!    │
//!    └────respond(REJECTED)──▶ REJECTED
//! ```
//!
//! Both outcomes are terminal. Records are never deleted.

use grade_review_core::{AssignmentId, BlockHeight, BoundedAscii, PrincipalId, ReviewId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a review request.
///
/// Wire encoding: 1 = PENDING, 2 = APPROVED, 3 = REJECTED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    /// Awaiting a reviewer decision
    Pending,
    /// Dispute upheld
    Approved,
    /// Dispute dismissed
    Rejected,
}

impl ReviewStatus {
    /// Wire code
    pub fn code(self) -> u64 {
        match self {
            ReviewStatus::Pending => 1,
            ReviewStatus::Approved => 2,
            ReviewStatus::Rejected => 3,
        }
    }

    /// Decode a wire code
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(ReviewStatus::Pending),
            2 => Some(ReviewStatus::Approved),
            3 => Some(ReviewStatus::Rejected),
            _ => None,
        }
    }

    /// Whether no further transition is defined
    pub fn is_terminal(self) -> bool {
        !matches!(self, ReviewStatus::Pending)
    }

    /// Upper-case name shown to users
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewStatus::Pending => "PENDING",
            ReviewStatus::Approved => "APPROVED",
            ReviewStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reviewer's decision; the only statuses a response may set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Uphold the dispute
    Approved,
    /// Dismiss the dispute
    Rejected,
}

impl Verdict {
    /// Decode a wire status code. PENDING and unknown codes yield `None`.
    pub fn from_status_code(code: u64) -> Option<Self> {
        match ReviewStatus::from_code(code)? {
            ReviewStatus::Approved => Some(Verdict::Approved),
            ReviewStatus::Rejected => Some(Verdict::Rejected),
            ReviewStatus::Pending => None,
        }
    }

    /// Status the record ends in
    pub fn status(self) -> ReviewStatus {
        match self {
            Verdict::Approved => ReviewStatus::Approved,
            Verdict::Rejected => ReviewStatus::Rejected,
        }
    }
}

/// One grade dispute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Ledger-assigned id
    pub review_id: ReviewId,
    /// Disputed assignment
    pub assignment_id: AssignmentId,
    /// Principal that filed the request
    pub student_id: PrincipalId,
    /// Grade being disputed
    pub original_grade: u64,
    /// Student's explanation
    pub reason: BoundedAscii,
    /// Current status
    pub status: ReviewStatus,
    /// Reviewer's comment, set at the decision
    pub reviewer_feedback: Option<BoundedAscii>,
    /// Replacement grade, set only on approval
    pub new_grade: Option<u64>,
    /// Height of the block that filed the request
    pub requested_at: BlockHeight,
    /// Height of the block that decided it
    pub reviewed_at: Option<BlockHeight>,
}

impl ReviewRecord {
    /// Whether the record still awaits a decision
    pub fn is_pending(&self) -> bool {
        self.status == ReviewStatus::Pending
    }

    /// Grade in effect after the review: the override if approved with one,
    /// otherwise the original
    pub fn effective_grade(&self) -> u64 {
        match (self.status, self.new_grade) {
            (ReviewStatus::Approved, Some(grade)) => grade,
            _ => self.original_grade,
        }
    }

    /// Presentation view for front ends
    pub fn view(&self) -> ReviewView {
        ReviewView {
            review_id: self.review_id.value(),
            assignment_id: self.assignment_id.value(),
            student_id: self.student_id.to_string(),
            original_grade: self.original_grade,
            reason: self.reason.to_string(),
            status: self.status,
            reviewer_feedback: self.reviewer_feedback.as_ref().map(ToString::to_string),
            new_grade: self.new_grade,
            requested_at: self.requested_at.value(),
            reviewed_at: self.reviewed_at.map(|h| h.value()),
        }
    }
}

/// Flat, camelCase rendering of a record, shaped like the front end's
/// `GradeReview` type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    /// Review id
    pub review_id: u64,
    /// Assignment id
    pub assignment_id: u64,
    /// Student principal
    pub student_id: String,
    /// Disputed grade
    pub original_grade: u64,
    /// Student's explanation
    pub reason: String,
    /// `PENDING`, `APPROVED` or `REJECTED`
    pub status: ReviewStatus,
    /// Reviewer comment
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reviewer_feedback: Option<String>,
    /// Replacement grade
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub new_grade: Option<u64>,
    /// Filing block height
    pub requested_at: u64,
    /// Decision block height
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reviewed_at: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_record() -> ReviewRecord {
        ReviewRecord {
            review_id: ReviewId(1),
            assignment_id: AssignmentId(1),
            student_id: PrincipalId::new("ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG").unwrap(),
            original_grade: 85,
            reason: BoundedAscii::new("Grade calculation error", 256).unwrap(),
            status: ReviewStatus::Pending,
            reviewer_feedback: None,
            new_grade: None,
            requested_at: BlockHeight(2),
            reviewed_at: None,
        }
    }

    #[test]
    fn test_status_codes() {
        for status in [
            ReviewStatus::Pending,
            ReviewStatus::Approved,
            ReviewStatus::Rejected,
        ] {
            assert_eq!(ReviewStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(ReviewStatus::from_code(0), None);
        assert_eq!(ReviewStatus::from_code(4), None);
        assert!(!ReviewStatus::Pending.is_terminal());
        assert!(ReviewStatus::Approved.is_terminal());
    }

    #[test]
    fn test_verdict_excludes_pending() {
        assert_eq!(Verdict::from_status_code(1), None);
        assert_eq!(Verdict::from_status_code(2), Some(Verdict::Approved));
        assert_eq!(Verdict::from_status_code(3), Some(Verdict::Rejected));
        assert_eq!(Verdict::from_status_code(u64::MAX), None);
    }

    #[test]
    fn test_effective_grade() {
        let mut record = pending_record();
        assert_eq!(record.effective_grade(), 85);

        record.status = ReviewStatus::Approved;
        record.new_grade = Some(90);
        assert_eq!(record.effective_grade(), 90);

        record.new_grade = None;
        assert_eq!(record.effective_grade(), 85);
    }

    #[test]
    fn test_view_matches_front_end_shape() {
        let json = serde_json::to_value(pending_record().view()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "reviewId": 1,
                "assignmentId": 1,
                "studentId": "ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG",
                "originalGrade": 85,
                "reason": "Grade calculation error",
                "status": "PENDING",
                "requestedAt": 2
            })
        );
    }
}
