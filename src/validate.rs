//! Query parameter validation
//!
//! Turns the raw `number` query value into a signed integer the classifier
//! can work with:
//! - `parse_number`: Accept `-?[0-9]+` within the safe integer range
//!
//! # Examples
//!
//! ```
//! use number_classifier::validate::{parse_number, ValidationError};
//!
//! assert_eq!(parse_number(Some("-42")), Ok(-42));
//! assert!(matches!(
//!     parse_number(Some("4.2")),
//!     Err(ValidationError::InvalidInput { .. })
//! ));
//! assert!(matches!(
//!     parse_number(Some("9007199254740992")),
//!     Err(ValidationError::UnsafeInteger { .. })
//! ));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::error::ErrorCode;

/// Largest magnitude that survives a round trip through an IEEE-754 double
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Optional minus sign followed by ASCII digits, nothing else
static INTEGER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+$").expect("Valid regex pattern"));

/// Why a raw query value was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Parameter absent or not a plain decimal integer
    #[error("{}", describe_invalid(.raw))]
    InvalidInput { raw: Option<String> },

    /// Well-formed integer outside `±MAX_SAFE_INTEGER`
    #[error("'{raw}' is outside the safe integer range")]
    UnsafeInteger { raw: String },
}

fn describe_invalid(raw: &Option<String>) -> String {
    match raw {
        Some(raw) => format!("'{raw}' is not a valid integer"),
        None => "missing required parameter 'number'".to_string(),
    }
}

impl ValidationError {
    /// The value the client sent, if any
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { raw } => raw.as_deref(),
            Self::UnsafeInteger { raw } => Some(raw),
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            Self::InvalidInput { raw: None } => ErrorCode::VALIDATION_REQUIRED_FIELD,
            Self::InvalidInput { raw: Some(_) } => ErrorCode::VALIDATION_PATTERN_MISMATCH,
            Self::UnsafeInteger { .. } => ErrorCode::VALIDATION_OUT_OF_RANGE,
        }
    }
}

/// Pure: Validate the raw `number` parameter
///
/// Leading zeros are accepted and `-0` yields `0`. Anything `i64` cannot hold
/// is by definition outside the safe range and reported as `UnsafeInteger`.
pub fn parse_number(raw: Option<&str>) -> Result<i64, ValidationError> {
    let Some(raw) = raw else {
        return Err(ValidationError::InvalidInput { raw: None });
    };

    if !INTEGER_REGEX.is_match(raw) {
        return Err(ValidationError::InvalidInput {
            raw: Some(raw.to_string()),
        });
    }

    let unsafe_integer = || ValidationError::UnsafeInteger {
        raw: raw.to_string(),
    };

    // The pattern guarantees the only possible parse failure is overflow
    let value: i64 = raw.parse().map_err(|_| unsafe_integer())?;
    if value.unsigned_abs() > MAX_SAFE_INTEGER as u64 {
        return Err(unsafe_integer());
    }

    Ok(value)
}
