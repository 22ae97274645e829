//! Input validation shared by live calls and fact replay

use crate::error::{LedgerError, LedgerResult};
use crate::record::Verdict;
use grade_review_core::{AssignmentId, BoundedAscii, LedgerConfig, PrincipalId};

pub(crate) fn reviewer(config: &LedgerConfig, caller: &PrincipalId) -> LedgerResult<()> {
    if caller == &config.reviewer {
        Ok(())
    } else {
        Err(LedgerError::not_authorized(caller))
    }
}

pub(crate) fn assignment(config: &LedgerConfig, assignment_id: AssignmentId) -> LedgerResult<()> {
    if (1..=config.max_assignment_id).contains(&assignment_id.value()) {
        Ok(())
    } else {
        Err(LedgerError::InvalidAssignmentId {
            assignment_id,
            max: config.max_assignment_id,
        })
    }
}

pub(crate) fn grade(config: &LedgerConfig, grade: u64) -> LedgerResult<()> {
    if grade <= config.max_grade {
        Ok(())
    } else {
        Err(LedgerError::invalid_grade(format!(
            "{grade} exceeds the maximum of {}",
            config.max_grade
        )))
    }
}

/// A replacement grade is only recorded on approval.
pub(crate) fn new_grade(
    config: &LedgerConfig,
    verdict: Verdict,
    new_grade: Option<u64>,
) -> LedgerResult<()> {
    match (verdict, new_grade) {
        (_, None) => Ok(()),
        (Verdict::Approved, Some(value)) => grade(config, value),
        (Verdict::Rejected, Some(value)) => Err(LedgerError::invalid_grade(format!(
            "a rejected review cannot carry a new grade (got {value})"
        ))),
    }
}

pub(crate) fn reason(config: &LedgerConfig, text: &str) -> LedgerResult<BoundedAscii> {
    BoundedAscii::non_empty(text, config.max_reason_len).map_err(LedgerError::InvalidReason)
}

pub(crate) fn feedback(config: &LedgerConfig, text: &str) -> LedgerResult<BoundedAscii> {
    BoundedAscii::new(text, config.max_feedback_len).map_err(LedgerError::InvalidFeedback)
}
