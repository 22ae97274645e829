//! Grade Review Core - shared primitives for the grade review ledger
//!
//! This crate holds the small, pure building blocks the ledger program is
//! assembled from. Nothing here touches ledger state.
//!
//! # Modules
//!
//! - `identifiers`: principals, review ids and assignment ids
//! - `time`: block heights used as the ledger's logical clock
//! - `text`: bounded ASCII text validation
//! - `config`: ledger configuration (TOML file, environment overrides, validation)
//! - `serialization`: canonical DAG-CBOR encoding and content hashing

#![forbid(unsafe_code)]

/// Principal and record identifiers
pub mod identifiers;

/// Logical time
pub mod time;

/// Bounded ASCII text
pub mod text;

/// Ledger configuration
pub mod config;

/// Canonical encoding and hashing
pub mod serialization;

pub use config::{ConfigError, LedgerConfig};
pub use identifiers::{AssignmentId, PrincipalId, PrincipalIdError, ReviewId};
pub use serialization::{Hash32, SerializationError};
pub use text::{BoundedAscii, TextError};
pub use time::BlockHeight;
