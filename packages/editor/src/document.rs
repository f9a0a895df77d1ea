//! # Document Snapshot
//!
//! A document is the text of a .proto file paired with the structural
//! view parsed from exactly that text. The pair is never patched: an edit
//! produces new text, the new text is parsed, and only a successful parse
//! yields the next snapshot.
//!
//! ```text
//! text v0 ──parse──▶ view v0
//!    │ splice
//!    ▼
//! text v1 ──parse──▶ view v1   (v0 discarded)
//! ```

use crate::EditorError;
use protoedit_parser::{parse, ProtoFile};

/// Text and structural view of one version of a document
#[derive(Debug, Clone)]
pub struct Document {
    source: String,
    file: ProtoFile,
    version: u64,
}

impl Document {
    /// Parse `source` into version 0 of a document.
    pub fn parse(source: String, filename: &str) -> Result<Self, EditorError> {
        let file = parse(&source).map_err(|e| EditorError::grammar(&source, filename, e))?;

        Ok(Self {
            source,
            file,
            version: 0,
        })
    }

    /// Parse edited text into the next version. `self` is left untouched on failure.
    pub fn next(&self, source: String, filename: &str) -> Result<Self, EditorError> {
        let file = parse(&source).map_err(|e| EditorError::grammar(&source, filename, e))?;

        Ok(Self {
            source,
            file,
            version: self.version + 1,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn file(&self) -> &ProtoFile {
        &self.file
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn into_source(self) -> String {
        self.source
    }
}
