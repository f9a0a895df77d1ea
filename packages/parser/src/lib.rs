//! # Protoedit Parser
//!
//! Turns .proto text into a structural view: a tree of container
//! declarations (`message`, `service`, `enum`, and the implicit file root)
//! where every node carries the byte offsets of its delimiters.
//!
//! The tree only describes the text it was parsed from. Any edit to the
//! text invalidates it; parse again to get fresh offsets.

pub mod ast;
pub mod error;
pub mod parser;
pub mod tokenizer;

pub use ast::{DeclKind, Declaration, Member, MemberKind, ProtoFile, Span};
#[cfg(feature = "pretty-errors")]
pub use error::{format_error, format_error_plain};
pub use error::{ParseError, ParseResult};
pub use parser::{parse, Parser};
pub use tokenizer::{tokenize, Token};
