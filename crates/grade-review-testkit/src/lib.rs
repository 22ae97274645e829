//! Grade Review Testing Infrastructure
//!
//! Common test setup shared by the ledger and CLI test suites: deterministic
//! account fixtures, a transaction builder shaped like the devnet test
//! harness, proptest strategies and one-time tracing initialization.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
//!
//! # Usage
//!
//! ```rust
//! use grade_review_testkit::{types, Accounts, Tx};
//! use grade_review_ledger::Chain;
//!
//! let accounts = Accounts::devnet();
//! let mut chain = Chain::new(accounts.ledger_config());
//! let block = chain.mine_block(vec![Tx::contract_call(
//!     "grade-review",
//!     "request-grade-review",
//!     vec![types::uint(1), types::uint(85), types::ascii("Grade calculation error")],
//!     &accounts.wallet(1).address,
//! )]);
//! assert_eq!(block.receipts[0].result.to_string(), "(ok u1)");
//! ```

pub mod builders;
pub mod fixtures;
pub mod strategies;

pub use builders::{types, CallArg, Tx};
pub use fixtures::{Account, Accounts};

use once_cell::sync::OnceCell;

static TRACING: OnceCell<()> = OnceCell::new();

/// Install a test-writer subscriber once per process.
///
/// Honors `RUST_LOG`; defaults to `debug` for the ledger crates.
pub fn init_test_tracing() {
    TRACING.get_or_init(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("grade_review_ledger=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
