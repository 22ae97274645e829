//! Public call surface
//!
//! `ContractCall` names the two state-changing entry points the way clients
//! address them (`request-grade-review`, `respond-to-review`) and carries
//! their raw arguments. Dispatch binds the sender from the transaction
//! context, never from the payload.

use crate::envelope::Envelope;
use crate::error::LedgerResult;
use crate::ledger::{CallContext, ReviewLedger};
use grade_review_core::{AssignmentId, ReviewId};
use serde::{Deserialize, Serialize};

/// Deployed program name
pub const CONTRACT_NAME: &str = "grade-review";

/// A state-changing call with its arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "function", rename_all = "kebab-case")]
pub enum ContractCall {
    /// File a review request as the sender
    RequestGradeReview {
        /// Disputed assignment
        assignment_id: AssignmentId,
        /// Grade being disputed
        original_grade: u64,
        /// Student's explanation
        reason: String,
    },

    /// Decide a pending review as the reviewer
    RespondToReview {
        /// Review to decide
        review_id: ReviewId,
        /// Wire status code
        status: u64,
        /// Reviewer comment
        #[serde(default)]
        feedback: String,
        /// Replacement grade
        #[serde(default, skip_serializing_if = "Option::is_none")]
        new_grade: Option<u64>,
    },
}

impl ContractCall {
    /// Client-facing function name
    pub fn function_name(&self) -> &'static str {
        match self {
            ContractCall::RequestGradeReview { .. } => "request-grade-review",
            ContractCall::RespondToReview { .. } => "respond-to-review",
        }
    }

    /// Execute against `ledger` in `ctx`
    pub fn dispatch(&self, ledger: &mut ReviewLedger, ctx: &CallContext) -> LedgerResult<ReviewId> {
        match self {
            ContractCall::RequestGradeReview {
                assignment_id,
                original_grade,
                reason,
            } => ledger.request_grade_review(ctx, *assignment_id, *original_grade, reason),
            ContractCall::RespondToReview {
                review_id,
                status,
                feedback,
                new_grade,
            } => ledger.respond_to_review(ctx, *review_id, *status, feedback, *new_grade),
        }
    }

    /// Execute and wrap the outcome for the caller
    pub fn execute(&self, ledger: &mut ReviewLedger, ctx: &CallContext) -> Envelope {
        Envelope::from(self.dispatch(ledger, ctx))
    }
}
