//! Property test strategies for ledger inputs
//!
//! Strategies deliberately mix valid and invalid inputs so that failing calls
//! are interleaved with successful ones.

use proptest::prelude::*;

// Re-export proptest for convenience
pub use proptest;

use crate::builders::Tx;
use crate::fixtures::Accounts;
use grade_review_ledger::Transaction;

/// Printable ASCII reason text, sometimes empty
pub fn arb_reason() -> impl Strategy<Value = String> {
    prop_oneof![
        9 => "[ -~]{1,40}",
        1 => Just(String::new()),
    ]
}

/// Assignment ids, mostly in range, with both out-of-range edges
pub fn arb_assignment_id() -> impl Strategy<Value = u64> {
    prop_oneof![
        8 => 1u64..=1_000_000,
        1 => Just(0u64),
        1 => 1_000_001u64..=u64::MAX,
    ]
}

/// Grades around the default maximum of 100
pub fn arb_grade() -> impl Strategy<Value = u64> {
    prop_oneof![
        9 => 0u64..=100,
        1 => 101u64..=1_000,
    ]
}

/// Wire status codes, including invalid ones
pub fn arb_status() -> impl Strategy<Value = u64> {
    prop_oneof![
        4 => Just(2u64),
        4 => Just(3u64),
        1 => Just(1u64),
        1 => 4u64..=10,
    ]
}

/// One scripted call. `wallet` 0 is the deployer (the reviewer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOp {
    /// `request-grade-review`
    Request {
        /// Sender index into the devnet accounts
        wallet: usize,
        /// Assignment id
        assignment_id: u64,
        /// Disputed grade
        original_grade: u64,
        /// Reason text
        reason: String,
    },
    /// `respond-to-review`
    Respond {
        /// Sender index into the devnet accounts
        wallet: usize,
        /// Target review
        review_id: u64,
        /// Wire status
        status: u64,
        /// Feedback text
        feedback: String,
        /// Replacement grade
        new_grade: Option<u64>,
    },
}

impl ScriptOp {
    /// Turn the op into a transaction from its account
    pub fn to_transaction(&self, accounts: &Accounts) -> Transaction {
        let sender = |wallet: usize| account(accounts, wallet);
        match self {
            ScriptOp::Request {
                wallet,
                assignment_id,
                original_grade,
                reason,
            } => Tx::request_grade_review(sender(*wallet), *assignment_id, *original_grade, reason),
            ScriptOp::Respond {
                wallet,
                review_id,
                status,
                feedback,
                new_grade,
            } => Tx::respond_to_review(sender(*wallet), *review_id, *status, feedback, *new_grade),
        }
    }
}

fn account(accounts: &Accounts, wallet: usize) -> &grade_review_core::PrincipalId {
    if wallet == 0 {
        &accounts.deployer().address
    } else {
        &accounts.wallet(wallet).address
    }
}

/// Request calls from any of the first three wallets
pub fn arb_request() -> impl Strategy<Value = ScriptOp> {
    (1usize..=3, arb_assignment_id(), arb_grade(), arb_reason()).prop_map(
        |(wallet, assignment_id, original_grade, reason)| ScriptOp::Request {
            wallet,
            assignment_id,
            original_grade,
            reason,
        },
    )
}

/// Response calls, mostly from the reviewer
pub fn arb_respond() -> impl Strategy<Value = ScriptOp> {
    (
        prop_oneof![3 => Just(0usize), 1 => 1usize..=3],
        1u64..=12,
        arb_status(),
        "[ -~]{0,24}",
        proptest::option::of(arb_grade()),
    )
        .prop_map(
            |(wallet, review_id, status, feedback, new_grade)| ScriptOp::Respond {
                wallet,
                review_id,
                status,
                feedback,
                new_grade,
            },
        )
}

/// Any scripted call
pub fn arb_script_op() -> impl Strategy<Value = ScriptOp> {
    prop_oneof![
        3 => arb_request(),
        2 => arb_respond(),
    ]
}

/// A sequence of blocks of scripted calls
pub fn arb_blocks() -> impl Strategy<Value = Vec<Vec<ScriptOp>>> {
    proptest::collection::vec(proptest::collection::vec(arb_script_op(), 0..5), 1..8)
}
