//! Error types for extractor construction.
//!
//! Extraction itself is total and never surfaces errors; the variants here
//! can only occur while compiling a platform's selector profile.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ExtractError {
    #[error("invalid CSS selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("no selector in the '{field}' list compiled: {}", errors.join(", "))]
    SelectorListInvalid { field: String, errors: Vec<String> },
}

impl ExtractError {
    pub fn invalid_selector(selector: &str, reason: &str) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Every entry of the `field` selector list failed to compile.
    pub fn selector_list_invalid(field: &str, errors: Vec<String>) -> Self {
        Self::SelectorListInvalid {
            field: field.to_string(),
            errors,
        }
    }
}

pub type ExtractResult<T> = Result<T, ExtractError>;
