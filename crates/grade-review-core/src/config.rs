//! Ledger configuration
//!
//! The reviewer principal and the input bounds are fixed per ledger
//! deployment. They come from a TOML file, may be overridden from
//! `GRADE_REVIEW_*` environment variables, and are validated before a ledger
//! is built from them.

use crate::identifiers::PrincipalId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Default upper bound for assignment ids
pub const DEFAULT_MAX_ASSIGNMENT_ID: u64 = 1_000_000;
/// Default upper bound for grades
pub const DEFAULT_MAX_GRADE: u64 = 100;
/// Default byte cap for dispute reasons
pub const DEFAULT_MAX_REASON_LEN: usize = 256;
/// Default byte cap for reviewer feedback
pub const DEFAULT_MAX_FEEDBACK_LEN: usize = 256;
/// Largest text cap a deployment may configure
pub const TEXT_CAP_LIMIT: usize = 4096;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "GRADE_REVIEW_";

/// A single failed validation rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Value is out of acceptable range
    OutOfRange {
        /// Offending field
        field: &'static str,
        /// Inclusive lower bound
        min: u64,
        /// Inclusive upper bound
        max: u64,
        /// Value found
        actual: u64,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::OutOfRange {
                field,
                min,
                max,
                actual,
            } => write!(
                f,
                "Field '{field}' must be between {min} and {max} (got {actual})"
            ),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {path}: {message}")]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        message: String,
    },

    /// Config text was not valid TOML for `LedgerConfig`
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// An environment override had an unusable value
    #[error("Invalid environment override {key}: {message}")]
    Env {
        /// Variable name
        key: String,
        /// What was wrong with it
        message: String,
    },

    /// One or more validation rules failed
    #[error("Invalid config: {}", join_issues(.0))]
    Invalid(Vec<ValidationIssue>),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Per-deployment ledger parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    /// The single principal allowed to respond to reviews
    pub reviewer: PrincipalId,
    /// Largest accepted assignment id (ids start at 1)
    #[serde(default = "default_max_assignment_id")]
    pub max_assignment_id: u64,
    /// Largest accepted grade, for both original and new grades
    #[serde(default = "default_max_grade")]
    pub max_grade: u64,
    /// Byte cap on dispute reasons
    #[serde(default = "default_max_reason_len")]
    pub max_reason_len: usize,
    /// Byte cap on reviewer feedback
    #[serde(default = "default_max_feedback_len")]
    pub max_feedback_len: usize,
}

fn default_max_assignment_id() -> u64 {
    DEFAULT_MAX_ASSIGNMENT_ID
}

fn default_max_grade() -> u64 {
    DEFAULT_MAX_GRADE
}

fn default_max_reason_len() -> usize {
    DEFAULT_MAX_REASON_LEN
}

fn default_max_feedback_len() -> usize {
    DEFAULT_MAX_FEEDBACK_LEN
}

impl LedgerConfig {
    /// Default bounds with the given reviewer
    pub fn new(reviewer: PrincipalId) -> Self {
        Self {
            reviewer,
            max_assignment_id: DEFAULT_MAX_ASSIGNMENT_ID,
            max_grade: DEFAULT_MAX_GRADE,
            max_reason_len: DEFAULT_MAX_REASON_LEN,
            max_feedback_len: DEFAULT_MAX_FEEDBACK_LEN,
        }
    }

    /// Parse from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Load a file, apply environment overrides and validate
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from_file(path)?;
        config.merge_with_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `GRADE_REVIEW_*` overrides from the process environment
    pub fn merge_with_env(&mut self) -> Result<(), ConfigError> {
        self.merge_with_vars(std::env::vars())
    }

    /// Apply `GRADE_REVIEW_*` overrides from an arbitrary key/value source.
    ///
    /// Keys without the prefix are skipped; unknown prefixed keys are ignored.
    pub fn merge_with_vars<I, K, V>(&mut self, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let key = key.as_ref();
            let Some(field) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.as_ref();
            match field {
                "REVIEWER" => {
                    self.reviewer = PrincipalId::new(value).map_err(|e| ConfigError::Env {
                        key: key.to_string(),
                        message: e.to_string(),
                    })?;
                }
                "MAX_ASSIGNMENT_ID" => self.max_assignment_id = parse_env(key, value)?,
                "MAX_GRADE" => self.max_grade = parse_env(key, value)?,
                "MAX_REASON_LEN" => self.max_reason_len = parse_env(key, value)?,
                "MAX_FEEDBACK_LEN" => self.max_feedback_len = parse_env(key, value)?,
                _ => {
                    tracing::debug!(key, "ignoring unknown environment override");
                    continue;
                }
            }
            tracing::debug!(key, "applied environment override");
        }
        Ok(())
    }

    /// Validate bounds, reporting every failed rule at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut issues = Vec::new();
        check_range(
            &mut issues,
            "max_assignment_id",
            self.max_assignment_id,
            1,
            u64::MAX,
        );
        check_range(&mut issues, "max_grade", self.max_grade, 1, u64::MAX);
        check_range(
            &mut issues,
            "max_reason_len",
            self.max_reason_len as u64,
            1,
            TEXT_CAP_LIMIT as u64,
        );
        check_range(
            &mut issues,
            "max_feedback_len",
            self.max_feedback_len as u64,
            1,
            TEXT_CAP_LIMIT as u64,
        );

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(issues))
        }
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

fn check_range(
    issues: &mut Vec<ValidationIssue>,
    field: &'static str,
    actual: u64,
    min: u64,
    max: u64,
) {
    if actual < min || actual > max {
        issues.push(ValidationIssue::OutOfRange {
            field,
            min,
            max,
            actual,
        });
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Env {
        key: key.to_string(),
        message: e.to_string(),
    })
}
