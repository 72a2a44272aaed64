//! Structured error types for formkit.
//!
//! The layout engine itself never fails: bad delegate values are clamped.
//! Errors come from reading layout requests, from query parsing, and from
//! command-line misuse.

use serde_json::error::Category;
use thiserror::Error;

use crate::query::QueryParserError;

/// The unified error type returned by the crate's top-level functions.
#[derive(Debug, Error)]
pub enum FormKitError {
    /// JSON input failed to parse as a layout request.
    #[error("Failed to parse layout request: {source}{}", hint_suffix(.hint))]
    Parse {
        source: serde_json::Error,
        hint: String,
    },

    #[error(transparent)]
    Query(#[from] QueryParserError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for FormKitError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            Category::Data => format!(
                "The JSON is valid but doesn't match the layout request schema. Expected a numeric `viewportWidth`, an optional `config` and a `form` with `sections` (line {}, column {}).",
                e.line(),
                e.column()
            ),
            Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            Category::Io => String::new(),
        };
        FormKitError::Parse { source: e, hint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_carries_hint() {
        let err = serde_json::from_str::<serde_json::Value>("{ \"a\": 1, }").unwrap_err();
        let err = FormKitError::from(err);
        let message = err.to_string();
        assert!(message.starts_with("Failed to parse layout request"));
        assert!(message.contains("Hint: Check for trailing commas"));
    }

    #[test]
    fn test_schema_error_names_request_fields() {
        let err = serde_json::from_str::<crate::model::LayoutRequest>(r#"{ "form": {} }"#)
            .unwrap_err();
        let message = FormKitError::from(err).to_string();
        assert!(message.contains("`viewportWidth`"));
        assert!(message.contains("`sections`"));
        assert!(message.contains("line 1"));
    }

    #[test]
    fn test_query_error_is_transparent() {
        let err: FormKitError = QueryParserError::TypeNotFound {
            token: "??".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Unidentified value '??' found. Refer to search help.");
    }
}
