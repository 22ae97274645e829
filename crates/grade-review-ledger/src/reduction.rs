//! Deterministic reduction of a fact log into ledger state
//!
//! ## Required Properties:
//!
//! - **Deterministic**: the same log under the same config always yields the
//!   same state (and therefore the same commitment)
//! - **Strict**: a log that the live ledger could not have produced is
//!   rejected rather than partially applied
//!
//! A log is admissible when request ids run 1, 2, 3, ... in order, block
//! heights never decrease, and every fact passes the same checks the live
//! operations enforce.

use crate::error::LedgerError;
use crate::fact::ReviewFact;
use crate::state::LedgerState;
use grade_review_core::{BlockHeight, LedgerConfig, ReviewId};
use thiserror::Error;

/// Reasons a fact log cannot be reduced
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReductionError {
    /// A request fact skipped or reused an id
    #[error("fact {index}: found {found}, expected the id after {last_review_id}")]
    OutOfOrder {
        /// Position in the log
        index: usize,
        /// Last id assigned before this fact
        last_review_id: u64,
        /// Id the fact carries
        found: ReviewId,
    },

    /// A fact is stamped earlier than its predecessor
    #[error("fact {index}: recorded at {height}, after a fact at {previous}")]
    HeightRegression {
        /// Position in the log
        index: usize,
        /// Height of this fact
        height: BlockHeight,
        /// Height of the previous fact
        previous: BlockHeight,
    },

    /// A fact failed the ledger's admission checks
    #[error("fact {index} ({fact_type}) rejected: {source}")]
    Rejected {
        /// Position in the log
        index: usize,
        /// Fact type name
        fact_type: &'static str,
        /// Ledger error the live operation would have returned
        #[source]
        source: LedgerError,
    },
}

/// Reduce a fact log to ledger state
pub fn reduce(config: &LedgerConfig, facts: &[ReviewFact]) -> Result<LedgerState, ReductionError> {
    let mut state = LedgerState::new();
    let mut previous: Option<BlockHeight> = None;

    for (index, fact) in facts.iter().enumerate() {
        let height = fact.height();
        if let Some(previous) = previous {
            if height < previous {
                return Err(ReductionError::HeightRegression {
                    index,
                    height,
                    previous,
                });
            }
        }

        if let ReviewFact::Requested { review_id, .. } = fact {
            if state.next_review_id() != Some(*review_id) {
                return Err(ReductionError::OutOfOrder {
                    index,
                    last_review_id: state.last_review_id(),
                    found: *review_id,
                });
            }
        }

        state
            .check(fact, config)
            .map_err(|source| ReductionError::Rejected {
                index,
                fact_type: fact.fact_type(),
                source,
            })?;
        state.apply(fact.clone());
        previous = Some(height);
    }

    tracing::trace!(
        facts = facts.len(),
        last_review_id = state.last_review_id(),
        "reduced fact log"
    );
    Ok(state)
}
