//! Grade review ledger
//!
//! A deterministic, replicated state machine that accepts grade review
//! requests from students, lets one configured reviewer decide them, and
//! reports every failure with a stable numeric code.
//!
//! # Architecture
//!
//! - **Ledger**: `ReviewLedger` runs the two operations atomically
//! - **Facts**: every committed operation is recorded as a `ReviewFact`
//! - **Reduction**: `reduce` rebuilds state from a fact log
//! - **Boundary**: `ContractCall` and `Envelope` carry calls and results in
//!   their wire form; `Chain` orders calls into blocks

#![forbid(unsafe_code)]

// Core modules
mod validation;

pub mod error;
pub mod fact;
pub mod record;
pub mod reduction;
pub mod state;

// Operations and boundary
pub mod call;
pub mod chain;
pub mod envelope;
pub mod ledger;

pub use call::{ContractCall, CONTRACT_NAME};
pub use chain::{Block, Chain, Transaction, TxReceipt};
pub use envelope::{Envelope, EnvelopeParseError};
pub use error::{ErrorCode, LedgerError, LedgerResult};
pub use fact::{FactLog, ReviewFact, REVIEW_FACT_TYPE_ID};
pub use ledger::{CallContext, ReviewLedger};
pub use record::{ReviewRecord, ReviewStatus, ReviewView, Verdict};
pub use reduction::{reduce, ReductionError};
pub use state::LedgerState;
