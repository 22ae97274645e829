//! Review facts
//!
//! Every successful ledger operation produces exactly one fact. The ordered
//! fact log is the audit trail: reducing it from an empty state reproduces
//! the ledger state on every replica.

use crate::record::Verdict;
use grade_review_core::{AssignmentId, BlockHeight, BoundedAscii, PrincipalId, ReviewId};
use serde::{Deserialize, Serialize};

/// Type identifier for review facts
pub const REVIEW_FACT_TYPE_ID: &str = "grade-review/v1";

/// State changes recorded by the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewFact {
    /// A student filed a review request
    Requested {
        /// Id assigned by the ledger
        review_id: ReviewId,
        /// Disputed assignment
        assignment_id: AssignmentId,
        /// Filing principal
        student_id: PrincipalId,
        /// Disputed grade
        original_grade: u64,
        /// Student's explanation
        reason: BoundedAscii,
        /// Filing block height
        requested_at: BlockHeight,
    },

    /// The reviewer decided a pending request
    Responded {
        /// Decided review
        review_id: ReviewId,
        /// Principal that decided it
        reviewer: PrincipalId,
        /// Outcome
        verdict: Verdict,
        /// Reviewer comment
        feedback: BoundedAscii,
        /// Replacement grade
        new_grade: Option<u64>,
        /// Decision block height
        reviewed_at: BlockHeight,
    },
}

impl ReviewFact {
    /// Review this fact refers to
    pub fn review_id(&self) -> ReviewId {
        match self {
            ReviewFact::Requested { review_id, .. } => *review_id,
            ReviewFact::Responded { review_id, .. } => *review_id,
        }
    }

    /// Block height the fact was recorded at
    pub fn height(&self) -> BlockHeight {
        match self {
            ReviewFact::Requested { requested_at, .. } => *requested_at,
            ReviewFact::Responded { reviewed_at, .. } => *reviewed_at,
        }
    }

    /// Principal whose call produced the fact
    pub fn principal(&self) -> &PrincipalId {
        match self {
            ReviewFact::Requested { student_id, .. } => student_id,
            ReviewFact::Responded { reviewer, .. } => reviewer,
        }
    }

    /// Fact type name for journal keying
    pub fn fact_type(&self) -> &'static str {
        match self {
            ReviewFact::Requested { .. } => "review_requested",
            ReviewFact::Responded { .. } => "review_responded",
        }
    }

    /// Whether the fact moves a review to a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReviewFact::Responded { .. })
    }
}

/// Persisted fact log, tagged with the fact type id it was written under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactLog {
    /// `REVIEW_FACT_TYPE_ID` at the time of writing
    pub type_id: String,
    /// Facts in commit order
    pub facts: Vec<ReviewFact>,
}

impl FactLog {
    /// Tag `facts` with the current type id
    pub fn new(facts: Vec<ReviewFact>) -> Self {
        Self {
            type_id: REVIEW_FACT_TYPE_ID.to_string(),
            facts,
        }
    }

    /// Whether the log was written under the current type id
    pub fn is_current(&self) -> bool {
        self.type_id == REVIEW_FACT_TYPE_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(id: &str) -> PrincipalId {
        PrincipalId::new(id).unwrap()
    }

    #[test]
    fn test_fact_accessors() {
        let requested = ReviewFact::Requested {
            review_id: ReviewId(4),
            assignment_id: AssignmentId(12),
            student_id: principal("ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG"),
            original_grade: 70,
            reason: BoundedAscii::new("Missing rubric points", 256).unwrap(),
            requested_at: BlockHeight(9),
        };
        assert_eq!(requested.review_id(), ReviewId(4));
        assert_eq!(requested.height(), BlockHeight(9));
        assert_eq!(requested.fact_type(), "review_requested");
        assert_eq!(
            requested.principal().as_str(),
            "ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG"
        );
        assert!(!requested.is_terminal());

        let responded = ReviewFact::Responded {
            review_id: ReviewId(4),
            reviewer: principal("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"),
            verdict: Verdict::Rejected,
            feedback: BoundedAscii::new("Rubric applied correctly", 256).unwrap(),
            new_grade: None,
            reviewed_at: BlockHeight(11),
        };
        assert_eq!(responded.height(), BlockHeight(11));
        assert_eq!(responded.fact_type(), "review_responded");
        assert!(responded.is_terminal());

        let log = FactLog::new(vec![requested, responded]);
        assert!(log.is_current());
        assert_eq!(log.facts.len(), 2);
    }
}
