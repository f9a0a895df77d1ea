//! # Edit Session
//!
//! Owns one document and applies append operations to it in call order.
//!
//! Each container append runs the same pipeline:
//!
//! ```text
//! locate ─▶ depth ─▶ detect indent ─▶ normalize ─▶ splice ─▶ reparse
//! ```
//!
//! The reparse result replaces the current snapshot only if it succeeds. A
//! snippet that breaks the grammar is rejected with the parser's diagnostic
//! and the session keeps the text it had before the call.

use crate::document::Document;
use crate::indent::detect_indent_or;
use crate::locator::resolve;
use crate::normalize::normalize;
use crate::splice::{append_to_end, insert_before_close};
use crate::{EditorError, EditorOptions};
use protoedit_parser::{DeclKind, ProtoFile};
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// Editing session over a single .proto document
#[derive(Debug, Clone)]
pub struct EditSession {
    document: Document,
    options: EditorOptions,
}

impl EditSession {
    /// Start a session with default options. Fails if `source` does not parse.
    pub fn new(source: impl Into<String>) -> Result<Self, EditorError> {
        Self::with_options(source, EditorOptions::default())
    }

    pub fn with_options(source: impl Into<String>, options: EditorOptions) -> Result<Self, EditorError> {
        let document = Document::parse(source.into(), &options.filename)?;
        debug!(
            filename = %options.filename,
            declarations = document.file().root.children.len(),
            "Opened edit session"
        );

        Ok(Self { document, options })
    }

    /// Append `content` at the end of the top-level service `name`.
    pub fn append_to_service(&mut self, name: &str, content: &str) -> Result<(), EditorError> {
        self.append_to(DeclKind::Service, name, content)
    }

    /// Append `content` at the end of the first message named `name`, at any depth.
    pub fn append_to_message(&mut self, name: &str, content: &str) -> Result<(), EditorError> {
        self.append_to(DeclKind::Message, name, content)
    }

    /// Append `content` at the end of the first enum named `name`, at any depth.
    pub fn append_to_enum(&mut self, name: &str, content: &str) -> Result<(), EditorError> {
        self.append_to(DeclKind::Enum, name, content)
    }

    /// Append `content` right before the closing brace of the `kind` container
    /// named `name`, re-indented to match the document.
    #[instrument(level = "debug", skip(self, content), fields(version = self.document.version()))]
    pub fn append_to(&mut self, kind: DeclKind, name: &str, content: &str) -> Result<(), EditorError> {
        let source = self.document.source();
        let target = resolve(self.document.file(), kind, name)?;

        let unit = detect_indent_or(source, &self.options.fallback_indent);
        let normalized = normalize(content, target.depth, &unit);
        debug!(depth = target.depth, offset = target.offset, unit = ?unit, "Resolved insertion target");

        if normalized.is_empty() {
            debug!("Snippet is blank, nothing to insert");
            return Ok(());
        }

        let text = insert_before_close(source, &target, &unit, &normalized);
        self.commit(text)
    }

    /// Append top-level `content` at the end of the file.
    #[instrument(level = "debug", skip(self, content), fields(version = self.document.version()))]
    pub fn append_to_file(&mut self, content: &str) -> Result<(), EditorError> {
        if content.trim().is_empty() {
            debug!("Snippet is blank, nothing to insert");
            return Ok(());
        }

        let text = append_to_end(self.document.source(), content);
        self.commit(text)
    }

    /// Reparse edited text and swap it in, or keep the current snapshot.
    fn commit(&mut self, text: String) -> Result<(), EditorError> {
        match self.document.next(text, &self.options.filename) {
            Ok(next) => {
                info!(
                    version = next.version(),
                    bytes = next.source().len(),
                    "Applied edit"
                );
                self.document = next;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Edit produced an unparsable document, rolled back");
                Err(err)
            }
        }
    }

    /// Current document text
    pub fn source(&self) -> &str {
        self.document.source()
    }

    /// Structural view of the current text
    pub fn structure(&self) -> &ProtoFile {
        self.document.file()
    }

    /// Number of edits applied so far
    pub fn version(&self) -> u64 {
        self.document.version()
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn into_source(self) -> String {
        self.document.into_source()
    }
}

impl fmt::Display for EditSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source())
    }
}
