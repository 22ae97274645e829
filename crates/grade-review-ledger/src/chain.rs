//! Block producer
//!
//! `Chain` orders submissions into blocks. Mining a block advances the height
//! by one and then runs the block's transactions against the ledger in
//! inclusion order; every transaction gets a receipt, failed ones included.

use crate::call::ContractCall;
use crate::envelope::Envelope;
use crate::ledger::{CallContext, ReviewLedger};
use grade_review_core::{BlockHeight, LedgerConfig, PrincipalId};
use serde::{Deserialize, Serialize};

/// A signed submission: verified sender plus call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Principal the transaction is attributed to
    pub sender: PrincipalId,
    /// Call to execute
    pub call: ContractCall,
}

impl Transaction {
    /// Create a transaction
    pub fn new(sender: PrincipalId, call: ContractCall) -> Self {
        Self { sender, call }
    }
}

/// Outcome of one transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Position within its block
    pub index: usize,
    /// Sender of the transaction
    pub sender: PrincipalId,
    /// Function that was called
    pub function: String,
    /// Result envelope
    pub result: Envelope,
}

/// A mined block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Height of this block
    pub height: BlockHeight,
    /// One receipt per transaction, in inclusion order
    pub receipts: Vec<TxReceipt>,
}

/// Single-ledger chain starting at the genesis height
#[derive(Debug, Clone)]
pub struct Chain {
    height: BlockHeight,
    ledger: ReviewLedger,
}

impl Chain {
    /// Chain at genesis with an empty ledger
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_ledger(ReviewLedger::new(config))
    }

    /// Chain at genesis over an existing ledger
    pub fn with_ledger(ledger: ReviewLedger) -> Self {
        Self {
            height: BlockHeight::GENESIS,
            ledger,
        }
    }

    /// Height of the last mined block
    pub fn height(&self) -> BlockHeight {
        self.height
    }

    /// Ledger view
    pub fn ledger(&self) -> &ReviewLedger {
        &self.ledger
    }

    /// Consume the chain, keeping the ledger
    pub fn into_ledger(self) -> ReviewLedger {
        self.ledger
    }

    /// Mine a block holding `transactions`
    pub fn mine_block(&mut self, transactions: Vec<Transaction>) -> Block {
        self.height = self.height.next();
        let height = self.height;

        let receipts = transactions
            .into_iter()
            .enumerate()
            .map(|(index, tx)| {
                let ctx = CallContext::new(tx.sender.clone(), height);
                let result = tx.call.execute(&mut self.ledger, &ctx);
                tracing::debug!(
                    %height,
                    index,
                    sender = %tx.sender,
                    function = tx.call.function_name(),
                    %result,
                    "executed transaction"
                );
                TxReceipt {
                    index,
                    sender: tx.sender,
                    function: tx.call.function_name().to_string(),
                    result,
                }
            })
            .collect();

        Block { height, receipts }
    }

    /// Mine `count` empty blocks and return the new height
    pub fn advance_blocks(&mut self, count: u64) -> BlockHeight {
        for _ in 0..count {
            self.mine_block(Vec::new());
        }
        self.height
    }
}
