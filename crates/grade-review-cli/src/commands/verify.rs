// Rebuild state from a persisted fact log

use super::load_config;
use anyhow::{bail, Context};
use grade_review_core::serialization;
use grade_review_ledger::{FactLog, ReviewLedger, REVIEW_FACT_TYPE_ID};
use std::io::Write;
use std::path::Path;

/// Reduce the fact log at `facts_path` and print the resulting commitment
pub fn run(config_path: &Path, facts_path: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let bytes = std::fs::read(facts_path)
        .with_context(|| format!("reading fact log {}", facts_path.display()))?;
    let log: FactLog = serialization::from_slice(&bytes)?;
    if !log.is_current() {
        bail!(
            "fact log type {:?} does not match {REVIEW_FACT_TYPE_ID:?}",
            log.type_id
        );
    }
    let count = log.facts.len();
    let ledger = ReviewLedger::replay(config, log.facts).context("fact log does not reduce")?;

    writeln!(out, "facts: {count}")?;
    writeln!(out, "reviews: {}", ledger.review_count())?;
    writeln!(out, "commitment: {}", ledger.commitment()?)?;
    Ok(())
}
