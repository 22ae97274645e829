pub mod check_config;
pub mod replay;
pub mod show;
pub mod verify;

use anyhow::Context;
use grade_review_core::LedgerConfig;
use std::path::Path;

/// Load, env-merge and validate a ledger config
pub fn load_config(path: &Path) -> anyhow::Result<LedgerConfig> {
    LedgerConfig::load(path).with_context(|| format!("loading config {}", path.display()))
}
