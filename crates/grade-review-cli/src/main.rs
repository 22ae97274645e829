//! CLI for replaying scripts and inspecting ledger state

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod script;

#[derive(Parser)]
#[command(name = "grade-review")]
#[command(about = "Grade review ledger - replay, inspect and verify", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a JSON script of blocks and print every receipt
    Replay {
        /// Ledger config file (TOML)
        #[arg(short, long, default_value = "grade-review.toml")]
        config: PathBuf,

        /// Script file (JSON)
        script: PathBuf,

        /// Write the resulting fact log (DAG-CBOR) here
        #[arg(long)]
        facts_out: Option<PathBuf>,
    },

    /// Execute a script and print reviews as JSON
    Show {
        /// Ledger config file (TOML)
        #[arg(short, long, default_value = "grade-review.toml")]
        config: PathBuf,

        /// Script file (JSON)
        script: PathBuf,

        /// Review to print
        #[arg(short, long, conflicts_with = "student")]
        review_id: Option<u64>,

        /// Print every review filed by this principal
        #[arg(short, long)]
        student: Option<String>,
    },

    /// Rebuild state from a fact log and print its commitment
    VerifyFacts {
        /// Ledger config file (TOML)
        #[arg(short, long, default_value = "grade-review.toml")]
        config: PathBuf,

        /// Fact log written by `replay --facts-out`
        facts: PathBuf,
    },

    /// Validate a config file and print the resolved settings
    CheckConfig {
        /// Ledger config file (TOML)
        #[arg(default_value = "grade-review.toml")]
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
        .with_writer(std::io::stderr)
        .init();

    let mut out = std::io::stdout().lock();
    match cli.command {
        Commands::Replay {
            config,
            script,
            facts_out,
        } => {
            commands::replay::run(&config, &script, facts_out.as_deref(), &mut out)?;
        }
        Commands::Show {
            config,
            script,
            review_id,
            student,
        } => {
            let target = match (review_id, student) {
                (_, Some(student)) => commands::show::Target::Student(student),
                (Some(id), None) => commands::show::Target::Review(id),
                (None, None) => commands::show::Target::All,
            };
            commands::show::run(&config, &script, &target, &mut out)?;
        }
        Commands::VerifyFacts { config, facts } => {
            commands::verify::run(&config, &facts, &mut out)?;
        }
        Commands::CheckConfig { config } => {
            commands::check_config::run(&config, &mut out)?;
        }
    }

    Ok(())
}
