//! Error values produced by the parser and by the attribute coercion layer.

use thiserror::Error;

/// An error that aborted parsing. The location is the line and column of the
/// offending token, both 1-based. Errors that have no source location (such
/// as a file that could not be opened) carry 0 for both.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("parse error{}: {message}", location_prefix(.line, .col))]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub col: usize,
}

fn location_prefix(line: &usize, col: &usize) -> String {
    if *line == 0 && *col == 0 {
        return String::new();
    }
    format!(" at {}:{}", line, col)
}

impl ParseError {
    pub fn new(message: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            message: message.into(),
            line,
            col,
        }
    }

    /// Creates an error that does not point into the source text.
    pub fn unlocated(message: impl Into<String>) -> Self {
        Self::new(message, 0, 0)
    }

    pub fn has_location(&self) -> bool {
        self.line != 0 || self.col != 0
    }
}

/// Raised when a recognized attribute key receives a value that can't be
/// converted into the type of its field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttrError {
    #[error("invalid value \"{value}\" for attribute \"{key}\": expected a number")]
    InvalidNumber { key: String, value: String },

    #[error("invalid value \"{value}\" for attribute \"{key}\": expected a boolean")]
    InvalidBool { key: String, value: String },
}

#[test]
fn test_parse_error_display() {
    let err = ParseError::new("expected '{'", 3, 14);
    assert_eq!(err.to_string(), "parse error at 3:14: expected '{'");
    assert!(err.has_location());

    let err = ParseError::unlocated("failed to open file \"x.dot\"");
    assert_eq!(err.to_string(), "parse error: failed to open file \"x.dot\"");
    assert!(!err.has_location());
}

#[test]
fn test_attr_error_display() {
    let err = AttrError::InvalidNumber {
        key: "fontsize".to_string(),
        value: "big".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "invalid value \"big\" for attribute \"fontsize\": expected a number"
    );
}
