//! Property tests for ledger semantics.

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs)]

use grade_review_core::{AssignmentId, BlockHeight, ReviewId};
use grade_review_ledger::{Block, Chain, Envelope, ErrorCode, ReviewLedger, ReviewStatus};
use grade_review_testkit::strategies::{arb_blocks, arb_grade, arb_reason, ScriptOp};
use grade_review_testkit::{Accounts, Tx};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn run(accounts: &Accounts, blocks: &[Vec<ScriptOp>]) -> (Chain, Vec<(ScriptOp, Envelope)>) {
    let mut chain = Chain::new(accounts.ledger_config());
    let mut outcomes = Vec::new();
    for ops in blocks {
        let txs = ops.iter().map(|op| op.to_transaction(accounts)).collect();
        let Block { receipts, .. } = chain.mine_block(txs);
        assert_eq!(receipts.len(), ops.len());
        outcomes.extend(ops.iter().cloned().zip(receipts.into_iter().map(|r| r.result)));
    }
    (chain, outcomes)
}

proptest! {
    #[test]
    fn review_ids_are_dense_and_increasing(blocks in arb_blocks()) {
        let accounts = Accounts::devnet();
        let (chain, outcomes) = run(&accounts, &blocks);

        let assigned: Vec<u64> = outcomes
            .iter()
            .filter(|(op, _)| matches!(op, ScriptOp::Request { .. }))
            .filter_map(|(_, envelope)| envelope.ok_value())
            .collect();
        let expected: Vec<u64> = (1..=assigned.len() as u64).collect();
        prop_assert_eq!(&assigned, &expected);
        prop_assert_eq!(chain.ledger().review_count(), assigned.len() as u64);
        prop_assert_eq!(chain.ledger().state().len(), assigned.len());
    }

    #[test]
    fn failed_requests_create_nothing(blocks in arb_blocks()) {
        let accounts = Accounts::devnet();
        let (chain, outcomes) = run(&accounts, &blocks);

        let mut created = 0usize;
        for (op, envelope) in &outcomes {
            if let ScriptOp::Request { assignment_id, .. } = op {
                if *assignment_id == 0 || *assignment_id > 1_000_000 {
                    prop_assert_eq!(envelope.error_code(), Some(ErrorCode::InvalidAssignmentId));
                }
                if envelope.is_ok() {
                    created += 1;
                }
            }
        }
        prop_assert_eq!(chain.ledger().state().len(), created);
    }

    #[test]
    fn reviews_transition_at_most_once(blocks in arb_blocks()) {
        let accounts = Accounts::devnet();
        let (chain, outcomes) = run(&accounts, &blocks);

        let mut decisions: BTreeMap<u64, usize> = BTreeMap::new();
        for (op, envelope) in &outcomes {
            if let (ScriptOp::Respond { .. }, Envelope::Ok(review_id)) = (op, envelope) {
                *decisions.entry(*review_id).or_default() += 1;
            }
        }
        for record in chain.ledger().state().records() {
            let count = decisions.get(&record.review_id.value()).copied().unwrap_or(0);
            if record.is_pending() {
                prop_assert_eq!(count, 0);
                prop_assert_eq!(record.reviewed_at, None);
                prop_assert_eq!(record.reviewer_feedback.as_ref(), None);
                prop_assert_eq!(record.new_grade, None);
            } else {
                prop_assert_eq!(count, 1);
                prop_assert!(record.reviewed_at.unwrap() >= record.requested_at);
            }
            if record.status == ReviewStatus::Rejected {
                prop_assert_eq!(record.new_grade, None);
            }
        }
    }

    #[test]
    fn only_reviewer_changes_status(blocks in arb_blocks()) {
        let accounts = Accounts::devnet();
        let (_, outcomes) = run(&accounts, &blocks);

        for (op, envelope) in &outcomes {
            if let ScriptOp::Respond { wallet, .. } = op {
                if *wallet != 0 {
                    prop_assert_eq!(*envelope, Envelope::Err(200));
                }
            }
        }
    }

    #[test]
    fn replay_reproduces_state_and_commitment(blocks in arb_blocks()) {
        let accounts = Accounts::devnet();
        let (chain, _) = run(&accounts, &blocks);
        let ledger = chain.ledger();

        let replica = ReviewLedger::replay(ledger.config().clone(), ledger.facts().to_vec()).unwrap();
        prop_assert_eq!(replica.state(), ledger.state());
        prop_assert_eq!(replica.commitment().unwrap(), ledger.commitment().unwrap());

        // A second run of the same script lands on the same commitment.
        let (again, _) = run(&accounts, &blocks);
        prop_assert_eq!(again.ledger().commitment().unwrap(), ledger.commitment().unwrap());
    }

    #[test]
    fn created_record_reads_back(
        wallet in 1usize..=8,
        assignment in 1u64..=1_000_000,
        grade in arb_grade().prop_filter("in range", |g| *g <= 100),
        reason in arb_reason().prop_filter("non-empty", |r| !r.is_empty()),
        idle in 0u64..20,
    ) {
        let accounts = Accounts::devnet();
        let sender = &accounts.wallet(wallet).address;
        let mut chain = Chain::new(accounts.ledger_config());
        chain.advance_blocks(idle);

        let block = chain.mine_block(vec![Tx::request_grade_review(sender, assignment, grade, &reason)]);
        prop_assert_eq!(block.receipts[0].result, Envelope::Ok(1));

        let record = chain.ledger().get_review(ReviewId(1)).unwrap();
        prop_assert_eq!(record.status, ReviewStatus::Pending);
        prop_assert_eq!(&record.student_id, sender);
        prop_assert_eq!(record.assignment_id, AssignmentId(assignment));
        prop_assert_eq!(record.original_grade, grade);
        prop_assert_eq!(record.reason.as_str(), reason.as_str());
        prop_assert_eq!(record.requested_at, BlockHeight(2 + idle));
        prop_assert_eq!(record.reviewed_at, None);
    }
}
