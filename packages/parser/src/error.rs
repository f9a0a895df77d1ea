//! Error types for the protobuf parser

use crate::ast::Span;
use thiserror::Error;

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Parse error with location and context
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token at {span}: expected {expected}, found {found}")]
    UnexpectedToken {
        span: Span,
        expected: String,
        found: String,
    },

    #[error("Unexpected end of file at {pos}: expected {expected}")]
    UnexpectedEof { pos: usize, expected: String },

    #[error("Invalid syntax at {span}: {message}")]
    InvalidSyntax { span: Span, message: String },

    #[error("Lexer error at {span}: unrecognized input")]
    LexError { span: Span },
}

impl ParseError {
    pub fn unexpected_token(span: Span, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedToken {
            span,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn unexpected_eof(pos: usize, expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            pos,
            expected: expected.into(),
        }
    }

    pub fn invalid_syntax(span: Span, message: impl Into<String>) -> Self {
        Self::InvalidSyntax {
            span,
            message: message.into(),
        }
    }

    pub fn lexer_error(span: Span) -> Self {
        Self::LexError { span }
    }

    /// Byte range the error points at.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::UnexpectedEof { pos, .. } => Span::new(*pos, *pos),
            ParseError::InvalidSyntax { span, .. } => *span,
            ParseError::LexError { span } => *span,
        }
    }
}

/// Pretty-print an error with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub fn format_error(source: &str, filename: &str, error: &ParseError) -> String {
    render_error(source, filename, error, true)
}

/// Same report as [`format_error`] without ANSI colour codes
#[cfg(feature = "pretty-errors")]
pub fn format_error_plain(source: &str, filename: &str, error: &ParseError) -> String {
    render_error(source, filename, error, false)
}

#[cfg(feature = "pretty-errors")]
fn render_error(source: &str, filename: &str, error: &ParseError, color: bool) -> String {
    use ariadne::{Color, Config, Label, Report, ReportKind, Source};

    let span = error.span();
    // ariadne needs a non-empty label range to draw an arrow
    let end = if span.end > span.start {
        span.end
    } else {
        (span.start + 1).min(source.len())
    };
    let start = span.start.min(end);

    // ariadne counts chars, spans count bytes
    let start = char_index(source, start);
    let end = char_index(source, end);

    let mut output = Vec::new();
    let report = Report::build(ReportKind::Error, filename, start)
        .with_config(Config::default().with_color(color))
        .with_message(error.to_string())
        .with_label(
            Label::new((filename, start..end))
                .with_color(Color::Red)
                .with_message(match error {
                    ParseError::UnexpectedToken { expected, .. } => format!("expected {}", expected),
                    ParseError::UnexpectedEof { expected, .. } => format!("expected {}", expected),
                    ParseError::InvalidSyntax { message, .. } => message.clone(),
                    ParseError::LexError { .. } => "unrecognized input".to_string(),
                }),
        )
        .finish();

    if report
        .write((filename, Source::from(source)), &mut output)
        .is_err()
    {
        return error.to_string();
    }

    String::from_utf8(output).unwrap_or_else(|_| error.to_string())
}

/// Char index of byte `offset`, rounding down to a char boundary.
#[cfg(feature = "pretty-errors")]
fn char_index(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    source[..offset].chars().count()
}
