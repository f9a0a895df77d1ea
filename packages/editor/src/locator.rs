//! Resolves a `(kind, name)` request to a declaration in the structural view.
//!
//! Services are looked up among the file's direct children only, since the
//! grammar never nests them. Messages and enums are searched in pre-order
//! through the whole tree; with duplicate names the first match wins.

use crate::depth::nesting_depth;
use crate::EditorError;
use protoedit_parser::{DeclKind, Declaration, ProtoFile};

/// Find the declaration of `kind` named `name`.
pub fn find<'a>(file: &'a ProtoFile, kind: DeclKind, name: &str) -> Result<&'a Declaration, EditorError> {
    let found = match kind {
        DeclKind::File => Some(&file.root),
        DeclKind::Service => file.root.child(DeclKind::Service, name),
        DeclKind::Message | DeclKind::Enum => file
            .root
            .find_first(|decl| decl.kind == kind && decl.name == name),
    };

    found.ok_or_else(|| EditorError::not_found(kind, name))
}

/// A container resolved for one append: where content goes and how deep it nests.
#[derive(Debug, Clone, Copy)]
pub struct InsertionTarget<'a> {
    pub decl: &'a Declaration,
    /// Nesting depth of content placed inside `decl`
    pub depth: usize,
    /// Offset of `decl`'s closing delimiter
    pub offset: usize,
}

impl<'a> InsertionTarget<'a> {
    /// Compute the target for appending inside `decl`.
    pub fn new(file: &'a ProtoFile, decl: &'a Declaration) -> Result<Self, EditorError> {
        match decl.kind {
            DeclKind::Message | DeclKind::Service | DeclKind::Enum => {}
            DeclKind::File => return Err(EditorError::UnsupportedTarget(decl.kind)),
        }

        let depth = nesting_depth(&file.root, decl).ok_or_else(|| EditorError::not_found(decl.kind, &decl.name))?;

        Ok(Self {
            decl,
            depth: depth + 1,
            offset: decl.close,
        })
    }
}

/// Locate `kind`/`name` and compute its insertion target.
pub fn resolve<'a>(file: &'a ProtoFile, kind: DeclKind, name: &str) -> Result<InsertionTarget<'a>, EditorError> {
    let decl = find(file, kind, name)?;
    InsertionTarget::new(file, decl)
}
