//! # Protoedit Editor
//!
//! Appends declarations to .proto files without disturbing anything else in
//! them: comments, blank lines and formatting outside the inserted text come
//! back byte for byte.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: .proto text → structural view       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - locate the target container              │
//! │  - compute nesting depth                    │
//! │  - detect indent unit, normalize snippet    │
//! │  - splice text before the closing brace     │
//! │  - reparse, or roll back on grammar errors  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use protoedit_editor::EditSession;
//!
//! let mut session = EditSession::new("syntax = \"proto3\";\nmessage Foo {}").unwrap();
//! session.append_to_message("Foo", "string name = 1;").unwrap();
//!
//! assert_eq!(
//!     session.source(),
//!     "syntax = \"proto3\";\nmessage Foo {\n  string name = 1;\n}"
//! );
//! ```

mod depth;
mod document;
mod errors;
mod indent;
mod locator;
mod normalize;
mod options;
mod session;
mod splice;

pub use depth::nesting_depth;
pub use document::Document;
pub use errors::EditorError;
pub use indent::{detect_indent, detect_indent_or};
pub use locator::{find, resolve, InsertionTarget};
pub use normalize::normalize;
pub use options::{EditorOptions, DEFAULT_FILENAME, DEFAULT_INDENT};
pub use session::EditSession;
pub use splice::{append_to_end, insert_before_close, line_ending, splice};

// Re-export parser types for convenience
pub use protoedit_parser::{DeclKind, Declaration, ProtoFile};
