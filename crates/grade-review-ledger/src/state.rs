//! Ledger state: the append-only record table and the id counter
//!
//! State changes only through `check` followed by `apply`. `check` is pure
//! and decides whether a fact is admissible; `apply` performs the mutation
//! and cannot fail, so an operation either commits entirely or not at all.

use crate::error::{LedgerError, LedgerResult};
use crate::fact::ReviewFact;
use crate::record::{ReviewRecord, ReviewStatus};
use crate::validation;
use grade_review_core::serialization::{hash_canonical, SerializationError};
use grade_review_core::{Hash32, LedgerConfig, PrincipalId, ReviewId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Domain label mixed into state commitments
const COMMITMENT_DOMAIN: &str = "grade-review/state/v1";

/// Every review record plus the last assigned id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerState {
    records: BTreeMap<ReviewId, ReviewRecord>,
    last_review_id: u64,
}

#[derive(Serialize)]
struct CommitmentView<'a> {
    domain: &'static str,
    last_review_id: u64,
    records: Vec<&'a ReviewRecord>,
}

impl LedgerState {
    /// Empty ledger, counter at 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a record
    pub fn get(&self, review_id: ReviewId) -> Option<&ReviewRecord> {
        self.records.get(&review_id)
    }

    /// All records in id order
    pub fn records(&self) -> impl Iterator<Item = &ReviewRecord> {
        self.records.values()
    }

    /// Records filed by `student`, in id order
    pub fn records_by_student<'a>(
        &'a self,
        student: &'a PrincipalId,
    ) -> impl Iterator<Item = &'a ReviewRecord> + 'a {
        self.records
            .values()
            .filter(move |record| &record.student_id == student)
    }

    /// Last assigned id; 0 when nothing was filed yet
    pub fn last_review_id(&self) -> u64 {
        self.last_review_id
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record exists
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next request will receive
    pub fn next_review_id(&self) -> Option<ReviewId> {
        ReviewId(self.last_review_id).checked_next()
    }

    /// Decide whether `fact` may be applied to this state under `config`.
    ///
    /// Checks run in the order callers observe errors: authorization, input
    /// bounds, then record state.
    pub fn check(&self, fact: &ReviewFact, config: &LedgerConfig) -> LedgerResult<()> {
        match fact {
            ReviewFact::Requested {
                assignment_id,
                original_grade,
                reason,
                ..
            } => {
                validation::assignment(config, *assignment_id)?;
                validation::grade(config, *original_grade)?;
                validation::reason(config, reason.as_str())?;
                Ok(())
            }
            ReviewFact::Responded {
                review_id,
                reviewer,
                verdict,
                feedback,
                new_grade,
                ..
            } => {
                validation::reviewer(config, reviewer)?;
                validation::feedback(config, feedback.as_str())?;
                validation::new_grade(config, *verdict, *new_grade)?;

                let record = self
                    .records
                    .get(review_id)
                    .ok_or(LedgerError::ReviewNotFound {
                        review_id: *review_id,
                    })?;
                if record.status != ReviewStatus::Pending {
                    return Err(LedgerError::ReviewNotPending {
                        review_id: *review_id,
                        status: record.status,
                    });
                }
                Ok(())
            }
        }
    }

    /// Apply a fact that passed `check`. Request ids must be `next_review_id`.
    pub(crate) fn apply(&mut self, fact: ReviewFact) {
        match fact {
            ReviewFact::Requested {
                review_id,
                assignment_id,
                student_id,
                original_grade,
                reason,
                requested_at,
            } => {
                debug_assert_eq!(Some(review_id), self.next_review_id());
                tracing::debug!(
                    %review_id,
                    %assignment_id,
                    %student_id,
                    %requested_at,
                    "review requested"
                );
                self.last_review_id = review_id.value();
                self.records.insert(
                    review_id,
                    ReviewRecord {
                        review_id,
                        assignment_id,
                        student_id,
                        original_grade,
                        reason,
                        status: ReviewStatus::Pending,
                        reviewer_feedback: None,
                        new_grade: None,
                        requested_at,
                        reviewed_at: None,
                    },
                );
            }
            ReviewFact::Responded {
                review_id,
                verdict,
                feedback,
                new_grade,
                reviewed_at,
                ..
            } => {
                if let Some(record) = self.records.get_mut(&review_id) {
                    record.status = verdict.status();
                    record.reviewer_feedback = Some(feedback);
                    record.new_grade = new_grade;
                    record.reviewed_at = Some(reviewed_at);
                    tracing::debug!(
                        %review_id,
                        status = %record.status,
                        %reviewed_at,
                        "review decided"
                    );
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn set_last_review_id(&mut self, last_review_id: u64) {
        self.last_review_id = last_review_id;
    }

    /// Canonical hash of the full state.
    ///
    /// Equal states give equal commitments on every replica.
    pub fn commitment(&self) -> Result<Hash32, SerializationError> {
        hash_canonical(&CommitmentView {
            domain: COMMITMENT_DOMAIN,
            last_review_id: self.last_review_id,
            records: self.records.values().collect(),
        })
    }
}
