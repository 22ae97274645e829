//! Response envelope
//!
//! Results cross the boundary as `(ok u<value>)` or `(err u<code>)`. The text
//! form is consumed verbatim by existing clients and tests.

use crate::error::{ErrorCode, LedgerResult};
use grade_review_core::ReviewId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of a contract call as seen by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Envelope {
    /// Success carrying an unsigned value
    Ok(u64),
    /// Failure carrying a numeric error code
    Err(u32),
}

/// Errors from parsing the text form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeParseError {
    /// Not wrapped in parentheses or missing the space separator
    #[error("malformed envelope: {0:?}")]
    Malformed(String),
    /// Tag other than `ok` or `err`
    #[error("unknown envelope tag {0:?}")]
    UnknownTag(String),
    /// Value not of the form `u<digits>`
    #[error("invalid uint literal {0:?}")]
    InvalidUint(String),
}

impl Envelope {
    /// Whether the call succeeded
    pub fn is_ok(&self) -> bool {
        matches!(self, Envelope::Ok(_))
    }

    /// Success value, if any
    pub fn ok_value(&self) -> Option<u64> {
        match self {
            Envelope::Ok(value) => Some(*value),
            Envelope::Err(_) => None,
        }
    }

    /// Raw error code, if any
    pub fn err_code(&self) -> Option<u32> {
        match self {
            Envelope::Ok(_) => None,
            Envelope::Err(code) => Some(*code),
        }
    }

    /// Error code decoded into the ledger's code table
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.err_code().and_then(ErrorCode::from_u32)
    }
}

impl From<&LedgerResult<ReviewId>> for Envelope {
    fn from(result: &LedgerResult<ReviewId>) -> Self {
        match result {
            Ok(review_id) => Envelope::Ok(review_id.value()),
            Err(err) => Envelope::Err(err.code().as_u32()),
        }
    }
}

impl From<LedgerResult<ReviewId>> for Envelope {
    fn from(result: LedgerResult<ReviewId>) -> Self {
        Envelope::from(&result)
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Envelope::Ok(value) => write!(f, "(ok u{value})"),
            Envelope::Err(code) => write!(f, "(err u{code})"),
        }
    }
}

fn parse_uint<T: FromStr>(literal: &str) -> Result<T, EnvelopeParseError> {
    literal
        .strip_prefix('u')
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| EnvelopeParseError::InvalidUint(literal.to_string()))
}

impl FromStr for Envelope {
    type Err = EnvelopeParseError;

    fn from_str(s: &str) -> Result<Self, EnvelopeParseError> {
        let inner = s
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| EnvelopeParseError::Malformed(s.to_string()))?;
        let (tag, value) = inner
            .split_once(' ')
            .ok_or_else(|| EnvelopeParseError::Malformed(s.to_string()))?;
        match tag {
            "ok" => Ok(Envelope::Ok(parse_uint(value)?)),
            "err" => Ok(Envelope::Err(parse_uint(value)?)),
            other => Err(EnvelopeParseError::UnknownTag(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use grade_review_core::PrincipalId;

    #[test]
    fn test_text_form_is_exact() {
        assert_eq!(Envelope::Ok(1).to_string(), "(ok u1)");
        assert_eq!(Envelope::Err(200).to_string(), "(err u200)");
        assert_eq!(Envelope::Err(205).to_string(), "(err u205)");
    }

    #[test]
    fn test_from_ledger_result() {
        let ok: LedgerResult<ReviewId> = Ok(ReviewId(1));
        assert_eq!(Envelope::from(ok), Envelope::Ok(1));

        let caller = PrincipalId::new("ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG").unwrap();
        let err: LedgerResult<ReviewId> = Err(LedgerError::not_authorized(&caller));
        let envelope = Envelope::from(&err);
        assert_eq!(envelope, Envelope::Err(200));
        assert_eq!(envelope.error_code(), Some(ErrorCode::NotAuthorized));
        assert_eq!(envelope.ok_value(), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("(ok u1)".parse::<Envelope>().unwrap(), Envelope::Ok(1));
        assert_eq!("(err u205)".parse::<Envelope>().unwrap(), Envelope::Err(205));
        assert!(matches!(
            "ok u1".parse::<Envelope>(),
            Err(EnvelopeParseError::Malformed(_))
        ));
        assert!(matches!(
            "(some u1)".parse::<Envelope>(),
            Err(EnvelopeParseError::UnknownTag(_))
        ));
        assert!(matches!(
            "(ok 1)".parse::<Envelope>(),
            Err(EnvelopeParseError::InvalidUint(_))
        ));
        assert!(matches!(
            "(ok u+1)".parse::<Envelope>(),
            Err(EnvelopeParseError::InvalidUint(_))
        ));
    }

    #[test]
    fn test_json_shape() {
        assert_eq!(
            serde_json::to_string(&Envelope::Err(200)).unwrap(),
            r#"{"err":200}"#
        );
    }
}
