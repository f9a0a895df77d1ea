//! Error types for the editor

use protoedit_parser::{DeclKind, ParseError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// No declaration of the requested kind and name in scope. Nothing was changed.
    #[error("{kind} {name:?} not found")]
    NotFound { kind: DeclKind, name: String },

    /// The text failed to parse, either on session creation or after an edit.
    #[error("Grammar error: {source}")]
    Grammar {
        source: ParseError,
        /// Rendered report with source context, without colour codes
        diagnostic: String,
    },

    /// The resolved declaration cannot take appended content.
    #[error("Cannot append into a {0} declaration")]
    UnsupportedTarget(DeclKind),
}

impl EditorError {
    pub fn not_found(kind: DeclKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn grammar(text: &str, filename: &str, source: ParseError) -> Self {
        let diagnostic = protoedit_parser::format_error_plain(text, filename, &source);
        Self::Grammar { source, diagnostic }
    }

    /// Rendered diagnostic for grammar errors.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            EditorError::Grammar { diagnostic, .. } => Some(diagnostic),
            _ => None,
        }
    }
}
