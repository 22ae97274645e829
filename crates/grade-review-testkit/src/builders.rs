//! Transaction builders
//!
//! `Tx::contract_call` takes the contract name, function name and positional
//! arguments the way devnet test scripts write them, and produces a ledger
//! `Transaction`. Malformed calls panic: they are bugs in the test.

use grade_review_core::{AssignmentId, PrincipalId, ReviewId};
use grade_review_ledger::{ContractCall, Transaction, CONTRACT_NAME};

/// Positional call argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArg {
    /// Unsigned integer
    Uint(u64),
    /// ASCII string
    Ascii(String),
    /// Present optional
    Some(Box<CallArg>),
    /// Absent optional
    None,
}

/// Argument constructors
pub mod types {
    use super::CallArg;

    /// `uN`
    pub fn uint(value: u64) -> CallArg {
        CallArg::Uint(value)
    }

    /// ASCII string literal
    pub fn ascii(value: impl Into<String>) -> CallArg {
        CallArg::Ascii(value.into())
    }

    /// `(some ...)`
    pub fn some(value: CallArg) -> CallArg {
        CallArg::Some(Box::new(value))
    }

    /// `none`
    pub fn none() -> CallArg {
        CallArg::None
    }
}

impl CallArg {
    fn uint(&self, position: usize) -> u64 {
        match self {
            CallArg::Uint(value) => *value,
            other => panic!("argument {position}: expected uint, got {other:?}"),
        }
    }

    fn ascii(&self, position: usize) -> String {
        match self {
            CallArg::Ascii(value) => value.clone(),
            other => panic!("argument {position}: expected ascii, got {other:?}"),
        }
    }

    fn optional_uint(&self, position: usize) -> Option<u64> {
        match self {
            CallArg::Some(inner) => Some(inner.uint(position)),
            CallArg::None => None,
            other => panic!("argument {position}: expected optional uint, got {other:?}"),
        }
    }
}

/// Transaction builder
pub struct Tx;

impl Tx {
    /// Build a call from positional arguments
    pub fn contract_call(
        contract: &str,
        function: &str,
        args: Vec<CallArg>,
        sender: &PrincipalId,
    ) -> Transaction {
        assert_eq!(contract, CONTRACT_NAME, "unknown contract");
        let call = match (function, args.as_slice()) {
            ("request-grade-review", [assignment, grade, reason]) => {
                ContractCall::RequestGradeReview {
                    assignment_id: AssignmentId(assignment.uint(0)),
                    original_grade: grade.uint(1),
                    reason: reason.ascii(2),
                }
            }
            ("respond-to-review", [review, status, feedback, new_grade]) => {
                ContractCall::RespondToReview {
                    review_id: ReviewId(review.uint(0)),
                    status: status.uint(1),
                    feedback: feedback.ascii(2),
                    new_grade: new_grade.optional_uint(3),
                }
            }
            (function, args) => panic!("no function {function} taking {} arguments", args.len()),
        };
        Transaction::new(sender.clone(), call)
    }

    /// `request-grade-review` from `sender`
    pub fn request_grade_review(
        sender: &PrincipalId,
        assignment_id: u64,
        original_grade: u64,
        reason: &str,
    ) -> Transaction {
        Transaction::new(
            sender.clone(),
            ContractCall::RequestGradeReview {
                assignment_id: AssignmentId(assignment_id),
                original_grade,
                reason: reason.to_string(),
            },
        )
    }

    /// `respond-to-review` from `sender`
    pub fn respond_to_review(
        sender: &PrincipalId,
        review_id: u64,
        status: u64,
        feedback: &str,
        new_grade: Option<u64>,
    ) -> Transaction {
        Transaction::new(
            sender.clone(),
            ContractCall::RespondToReview {
                review_id: ReviewId(review_id),
                status,
                feedback: feedback.to_string(),
                new_grade,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Accounts;

    #[test]
    fn test_positional_call_matches_named_builder() {
        let accounts = Accounts::devnet();
        let sender = &accounts.wallet(1).address;
        let positional = Tx::contract_call(
            "grade-review",
            "respond-to-review",
            vec![
                types::uint(1),
                types::uint(2),
                types::ascii("Grade updated"),
                types::some(types::uint(90)),
            ],
            sender,
        );
        assert_eq!(
            positional,
            Tx::respond_to_review(sender, 1, 2, "Grade updated", Some(90))
        );
    }

    #[test]
    #[should_panic(expected = "expected uint")]
    fn test_wrong_argument_type_panics() {
        let accounts = Accounts::devnet();
        Tx::contract_call(
            "grade-review",
            "request-grade-review",
            vec![types::ascii("1"), types::uint(85), types::ascii("x")],
            &accounts.wallet(1).address,
        );
    }
}
