//! The grade review ledger program
//!
//! `ReviewLedger` owns the record table, the id counter and the fact log.
//! Its two operations are synchronous total functions of
//! (state, caller, block height, inputs): each either commits one fact or
//! returns a `LedgerError` and leaves everything as it was.
//!
//! # Example
//!
//! ```rust
//! use grade_review_core::{AssignmentId, BlockHeight, LedgerConfig, PrincipalId, ReviewId};
//! use grade_review_ledger::{CallContext, ReviewLedger, ReviewStatus};
//!
//! let reviewer = PrincipalId::new("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM").unwrap();
//! let student = PrincipalId::new("ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG").unwrap();
//! let mut ledger = ReviewLedger::new(LedgerConfig::new(reviewer.clone()));
//!
//! let as_student = CallContext::new(student, BlockHeight(2));
//! let id = ledger
//!     .request_grade_review(&as_student, AssignmentId(1), 85, "Grade calculation error")
//!     .unwrap();
//! assert_eq!(id, ReviewId(1));
//!
//! let as_reviewer = CallContext::new(reviewer, BlockHeight(3));
//! ledger
//!     .respond_to_review(&as_reviewer, id, 2, "Grade updated", Some(90))
//!     .unwrap();
//! assert_eq!(ledger.get_review(id).unwrap().status, ReviewStatus::Approved);
//! ```

use crate::error::{LedgerError, LedgerResult};
use crate::fact::ReviewFact;
use crate::record::{ReviewRecord, Verdict};
use crate::reduction::{reduce, ReductionError};
use crate::state::LedgerState;
use crate::validation;
use grade_review_core::serialization::SerializationError;
use grade_review_core::{AssignmentId, BlockHeight, Hash32, LedgerConfig, PrincipalId, ReviewId};

/// Invocation context bound by the execution environment.
///
/// The sender is the verified principal of the transaction; it is never
/// taken from call arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    /// Verified caller
    pub sender: PrincipalId,
    /// Height of the block including the call
    pub block_height: BlockHeight,
}

impl CallContext {
    /// Create a context
    pub fn new(sender: PrincipalId, block_height: BlockHeight) -> Self {
        Self {
            sender,
            block_height,
        }
    }
}

/// Replicated grade review state machine
#[derive(Debug, Clone)]
pub struct ReviewLedger {
    config: LedgerConfig,
    state: LedgerState,
    facts: Vec<ReviewFact>,
}

impl ReviewLedger {
    /// Empty ledger governed by `config`
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            state: LedgerState::new(),
            facts: Vec::new(),
        }
    }

    /// Rebuild a ledger from its fact log
    pub fn replay(config: LedgerConfig, facts: Vec<ReviewFact>) -> Result<Self, ReductionError> {
        let state = reduce(&config, &facts)?;
        Ok(Self {
            config,
            state,
            facts,
        })
    }

    /// File a dispute for `assignment_id` as the calling student.
    ///
    /// Returns the newly assigned review id.
    pub fn request_grade_review(
        &mut self,
        ctx: &CallContext,
        assignment_id: AssignmentId,
        original_grade: u64,
        reason: &str,
    ) -> LedgerResult<ReviewId> {
        validation::assignment(&self.config, assignment_id)?;
        validation::grade(&self.config, original_grade)?;
        let reason = validation::reason(&self.config, reason)?;
        let review_id = self
            .state
            .next_review_id()
            .ok_or(LedgerError::ReviewIdsExhausted)?;

        self.commit(ReviewFact::Requested {
            review_id,
            assignment_id,
            student_id: ctx.sender.clone(),
            original_grade,
            reason,
            requested_at: ctx.block_height,
        })?;
        Ok(review_id)
    }

    /// Decide a pending review. Only the configured reviewer may call this.
    ///
    /// `status` is the wire code (2 = APPROVED, 3 = REJECTED).
    pub fn respond_to_review(
        &mut self,
        ctx: &CallContext,
        review_id: ReviewId,
        status: u64,
        feedback: &str,
        new_grade: Option<u64>,
    ) -> LedgerResult<ReviewId> {
        validation::reviewer(&self.config, &ctx.sender)?;
        let verdict =
            Verdict::from_status_code(status).ok_or(LedgerError::InvalidStatus { code: status })?;
        let feedback = validation::feedback(&self.config, feedback)?;
        validation::new_grade(&self.config, verdict, new_grade)?;

        self.commit(ReviewFact::Responded {
            review_id,
            reviewer: ctx.sender.clone(),
            verdict,
            feedback,
            new_grade,
            reviewed_at: ctx.block_height,
        })?;
        Ok(review_id)
    }

    fn commit(&mut self, fact: ReviewFact) -> LedgerResult<()> {
        self.state.check(&fact, &self.config)?;
        self.state.apply(fact.clone());
        self.facts.push(fact);
        Ok(())
    }

    /// Read a record
    pub fn get_review(&self, review_id: ReviewId) -> Option<&ReviewRecord> {
        self.state.get(review_id)
    }

    /// Number of reviews ever filed (equal to the last assigned id)
    pub fn review_count(&self) -> u64 {
        self.state.last_review_id()
    }

    /// A student's reviews in id order
    pub fn reviews_by_student<'a>(
        &'a self,
        student: &'a PrincipalId,
    ) -> impl Iterator<Item = &'a ReviewRecord> + 'a {
        self.state.records_by_student(student)
    }

    /// Deployment parameters
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Current state
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Ordered log of committed facts
    pub fn facts(&self) -> &[ReviewFact] {
        &self.facts
    }

    /// Canonical state commitment
    pub fn commitment(&self) -> Result<Hash32, SerializationError> {
        self.state.commitment()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::record::ReviewStatus;

    fn reviewer() -> PrincipalId {
        PrincipalId::new("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM").unwrap()
    }

    fn student() -> PrincipalId {
        PrincipalId::new("ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG").unwrap()
    }

    fn ledger() -> ReviewLedger {
        ReviewLedger::new(LedgerConfig::new(reviewer()))
    }

    fn as_student(height: u64) -> CallContext {
        CallContext::new(student(), BlockHeight(height))
    }

    fn as_reviewer(height: u64) -> CallContext {
        CallContext::new(reviewer(), BlockHeight(height))
    }

    fn code<T: std::fmt::Debug>(result: LedgerResult<T>) -> u32 {
        result.unwrap_err().code().as_u32()
    }

    #[test]
    fn test_request_round_trip() {
        let mut ledger = ledger();
        let id = ledger
            .request_grade_review(&as_student(2), AssignmentId(1), 85, "Grade calculation error")
            .unwrap();
        assert_eq!(id, ReviewId(1));

        let record = ledger.get_review(id).unwrap();
        assert_eq!(record.status, ReviewStatus::Pending);
        assert_eq!(record.assignment_id, AssignmentId(1));
        assert_eq!(record.student_id, student());
        assert_eq!(record.original_grade, 85);
        assert_eq!(record.reason.as_str(), "Grade calculation error");
        assert_eq!(record.requested_at, BlockHeight(2));
        assert_eq!(record.reviewed_at, None);
        assert_eq!(record.reviewer_feedback, None);
        assert_eq!(record.new_grade, None);
        assert_eq!(ledger.facts().len(), 1);
    }

    #[test]
    fn test_request_validation_order() {
        let mut ledger = ledger();
        let ctx = as_student(2);
        // Assignment is checked before grade and reason.
        assert_eq!(
            code(ledger.request_grade_review(&ctx, AssignmentId(1_000_001), 500, "")),
            205
        );
        assert_eq!(
            code(ledger.request_grade_review(&ctx, AssignmentId(1), 500, "")),
            204
        );
        assert_eq!(code(ledger.request_grade_review(&ctx, AssignmentId(1), 85, "")), 206);
        assert_eq!(ledger.review_count(), 0);
        assert!(ledger.facts().is_empty());
    }

    #[test]
    fn test_reviewer_may_also_file() {
        let mut ledger = ledger();
        let id = ledger
            .request_grade_review(&as_reviewer(2), AssignmentId(9), 40, "Self audit")
            .unwrap();
        assert_eq!(ledger.get_review(id).unwrap().student_id, reviewer());
    }

    #[test]
    fn test_authorization_checked_first() {
        let mut ledger = ledger();
        // Invalid status, oversize grade and a missing record: still 200.
        assert_eq!(
            code(ledger.respond_to_review(&as_student(3), ReviewId(42), 9, "x", Some(1000))),
            200
        );
    }

    #[test]
    fn test_response_validation() {
        let mut ledger = ledger();
        let id = ledger
            .request_grade_review(&as_student(2), AssignmentId(1), 85, "Grade calculation error")
            .unwrap();
        let ctx = as_reviewer(3);

        assert_eq!(code(ledger.respond_to_review(&ctx, id, 1, "", None)), 203);
        assert_eq!(code(ledger.respond_to_review(&ctx, id, 0, "", None)), 203);
        assert_eq!(
            code(ledger.respond_to_review(&ctx, id, 2, &"f".repeat(257), None)),
            207
        );
        assert_eq!(code(ledger.respond_to_review(&ctx, id, 2, "", Some(101))), 204);
        assert_eq!(code(ledger.respond_to_review(&ctx, id, 3, "", Some(90))), 204);
        assert_eq!(
            code(ledger.respond_to_review(&ctx, ReviewId(2), 2, "", None)),
            201
        );
        assert!(ledger.get_review(id).unwrap().is_pending());
        assert_eq!(ledger.facts().len(), 1);
    }

    #[test]
    fn test_decision_is_terminal() {
        let mut ledger = ledger();
        let id = ledger
            .request_grade_review(&as_student(2), AssignmentId(1), 85, "Grade calculation error")
            .unwrap();
        ledger
            .respond_to_review(&as_reviewer(3), id, 3, "Rubric applied correctly", None)
            .unwrap();
        let decided = ledger.get_review(id).unwrap().clone();
        assert_eq!(decided.status, ReviewStatus::Rejected);
        assert_eq!(decided.reviewed_at, Some(BlockHeight(3)));

        let err = ledger
            .respond_to_review(&as_reviewer(4), id, 2, "Changed my mind", Some(95))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ReviewNotPending);
        assert_eq!(ledger.get_review(id), Some(&decided));
    }

    #[test]
    fn test_exhausted_ids_reject_requests() {
        let mut ledger = ledger();
        ledger
            .request_grade_review(&as_student(2), AssignmentId(1), 85, "Grade calculation error")
            .unwrap();
        ledger.state.set_last_review_id(u64::MAX);
        let before = ledger.state().clone();

        let err = ledger
            .request_grade_review(&as_student(3), AssignmentId(2), 70, "Recount")
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ReviewIdsExhausted);
        assert_eq!(err.code().as_u32(), 208);
        assert_eq!(ledger.facts().len(), 1);
        assert_eq!(ledger.state(), &before);
    }

    #[test]
    fn test_replay_reproduces_state() {
        let mut ledger = ledger();
        for assignment in 1..=3 {
            ledger
                .request_grade_review(&as_student(2), AssignmentId(assignment), 70, "Recount")
                .unwrap();
        }
        ledger
            .respond_to_review(&as_reviewer(3), ReviewId(2), 2, "Recounted", Some(75))
            .unwrap();

        let replica =
            ReviewLedger::replay(ledger.config().clone(), ledger.facts().to_vec()).unwrap();
        assert_eq!(replica.state(), ledger.state());
        assert_eq!(replica.commitment().unwrap(), ledger.commitment().unwrap());
    }
}
