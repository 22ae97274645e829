// Replay a script and report receipts

use super::load_config;
use crate::script::Script;
use anyhow::Context;
use grade_review_core::serialization;
use grade_review_ledger::FactLog;
use std::io::Write;
use std::path::Path;

/// Execute `script_path` and print one line per receipt plus the commitment
pub fn run(
    config_path: &Path,
    script_path: &Path,
    facts_out: Option<&Path>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let script = Script::load(script_path)?;
    let (chain, blocks) = script.execute(config);

    for block in &blocks {
        for receipt in &block.receipts {
            writeln!(
                out,
                "{} #{} {} {} {}",
                block.height, receipt.index, receipt.sender, receipt.function, receipt.result
            )?;
        }
    }

    let ledger = chain.ledger();
    writeln!(out, "reviews: {}", ledger.review_count())?;
    writeln!(out, "commitment: {}", ledger.commitment()?)?;

    if let Some(path) = facts_out {
        let bytes = serialization::to_vec(&FactLog::new(ledger.facts().to_vec()))?;
        std::fs::write(path, bytes)
            .with_context(|| format!("writing fact log {}", path.display()))?;
        tracing::info!(facts = ledger.facts().len(), path = %path.display(), "wrote fact log");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::tests::{script_json, write_config, write_file, student};

    #[test]
    fn test_replay_prints_receipts() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let script = write_file(dir.path(), "script.json", &script_json());

        let mut out = Vec::new();
        run(&config, &script, None, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        let student = student();

        assert_eq!(
            lines[0],
            format!("block-2 #0 {student} request-grade-review (ok u1)")
        );
        assert!(lines[1].ends_with("respond-to-review (err u200)"));
        assert!(lines[2].ends_with("(err u205)"));
        assert!(lines[3].starts_with("block-3 #0"));
        assert!(lines[3].ends_with("(ok u1)"));
        assert_eq!(lines[4], "reviews: 1");
        assert!(lines[5].starts_with("commitment: "));
        assert_eq!(lines[5].len(), "commitment: ".len() + 64);
    }

    #[test]
    fn test_replay_requires_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_file(dir.path(), "bad.toml", "reviewer = \"\"\n");
        let script = write_file(dir.path(), "script.json", &script_json());
        let mut out = Vec::new();
        assert!(run(&config, &script, None, &mut out).is_err());
    }
}
