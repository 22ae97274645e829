// Print reviews as front-end JSON

use super::load_config;
use crate::script::Script;
use anyhow::{bail, Context};
use grade_review_core::{PrincipalId, ReviewId};
use grade_review_ledger::ReviewView;
use std::io::Write;
use std::path::Path;

/// Which reviews to print
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// One review by id
    Review(u64),
    /// Every review filed by a principal
    Student(String),
    /// Every review
    All,
}

/// Execute the script, then print the selected reviews as pretty JSON
pub fn run(
    config_path: &Path,
    script_path: &Path,
    target: &Target,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let (chain, _) = Script::load(script_path)?.execute(config);
    let ledger = chain.ledger();

    match target {
        Target::Review(id) => {
            let Some(record) = ledger.get_review(ReviewId(*id)) else {
                bail!("review {} not found", ReviewId(*id));
            };
            serde_json::to_writer_pretty(&mut *out, &record.view())?;
        }
        Target::Student(student) => {
            let student: PrincipalId = student
                .parse()
                .with_context(|| format!("invalid principal {student:?}"))?;
            let views: Vec<ReviewView> =
                ledger.reviews_by_student(&student).map(|r| r.view()).collect();
            serde_json::to_writer_pretty(&mut *out, &views)?;
        }
        Target::All => {
            let views: Vec<ReviewView> = ledger.state().records().map(|r| r.view()).collect();
            serde_json::to_writer_pretty(&mut *out, &views)?;
        }
    }
    writeln!(out)?;
    Ok(())
}
