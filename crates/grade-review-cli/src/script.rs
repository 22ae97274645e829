// Script files: blocks of transactions in JSON
//
// {
//   "blocks": [
//     [ { "sender": "ST1SJ3...", "call": { "function": "request-grade-review",
//         "assignment_id": 1, "original_grade": 85, "reason": "..." } } ]
//   ]
// }

use anyhow::Context;
use grade_review_core::LedgerConfig;
use grade_review_ledger::{Block, Chain, Transaction};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ordered blocks to mine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub blocks: Vec<Vec<Transaction>>,
}

impl Script {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing script {}", path.display()))
    }

    /// Mine every block on a fresh chain
    pub fn execute(&self, config: LedgerConfig) -> (Chain, Vec<Block>) {
        let mut chain = Chain::new(config);
        let blocks = self
            .blocks
            .iter()
            .map(|txs| chain.mine_block(txs.clone()))
            .collect();
        tracing::info!(
            blocks = self.blocks.len(),
            reviews = chain.ledger().review_count(),
            "script executed"
        );
        (chain, blocks)
    }
}
