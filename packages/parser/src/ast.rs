use serde::{Deserialize, Serialize};
use std::fmt;

/// Span information for source location tracking (byte offsets, end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Root of a parsed .proto file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtoFile {
    /// Value of the `syntax` statement, quotes stripped
    pub syntax: Option<String>,
    /// Value of the `edition` statement, quotes stripped
    pub edition: Option<String>,
    /// Dotted package name
    pub package: Option<String>,
    /// Implicit file-level container spanning the whole text
    pub root: Declaration,
}

impl ProtoFile {
    /// An empty file spanning `len` bytes.
    pub fn new(len: usize) -> Self {
        Self {
            syntax: None,
            edition: None,
            package: None,
            root: Declaration::file(len),
        }
    }

    /// Names of all `import` statements in source order.
    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.root
            .members
            .iter()
            .filter(|m| m.kind == MemberKind::Import)
            .map(|m| m.name.as_str())
    }
}

/// Container kinds. Only these carry a body that content can be appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    File,
    Message,
    Service,
    Enum,
}

impl DeclKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclKind::File => "file",
            DeclKind::Message => "message",
            DeclKind::Service => "service",
            DeclKind::Enum => "enum",
        }
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named container in the document: message, service, enum, or the file root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclKind,
    /// Identifier; empty for the file root
    pub name: String,
    /// From the leading keyword through the closing brace
    pub span: Span,
    /// Offset of the opening `{` (0 for the file root)
    pub open: usize,
    /// Offset of the closing `}` (text length for the file root)
    pub close: usize,
    /// Non-container elements in source order
    pub members: Vec<Member>,
    /// Nested containers in source order
    pub children: Vec<Declaration>,
}

impl Declaration {
    pub fn new(kind: DeclKind, name: impl Into<String>, span: Span, open: usize, close: usize) -> Self {
        Self {
            kind,
            name: name.into(),
            span,
            open,
            close,
            members: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn file(len: usize) -> Self {
        Self::new(DeclKind::File, "", Span::new(0, len), 0, len)
    }

    /// Byte range strictly between the delimiters.
    pub fn body(&self) -> Span {
        match self.kind {
            DeclKind::File => Span::new(self.open, self.close),
            _ => Span::new(self.open + 1, self.close),
        }
    }

    /// Pre-order depth-first walk. The callback receives each declaration
    /// together with the number of containers enclosing it.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Declaration, usize)) {
        self.walk_at(0, f);
    }

    fn walk_at<'a>(&'a self, depth: usize, f: &mut impl FnMut(&'a Declaration, usize)) {
        f(self, depth);
        let child_depth = match self.kind {
            DeclKind::File => depth,
            _ => depth + 1,
        };
        for child in &self.children {
            child.walk_at(child_depth, f);
        }
    }

    /// First declaration in pre-order matching `predicate`, with its depth.
    pub fn find_first_with_depth(&self, predicate: impl Fn(&Declaration) -> bool) -> Option<(&Declaration, usize)> {
        self.find_at(0, &predicate)
    }

    fn find_at(&self, depth: usize, predicate: &impl Fn(&Declaration) -> bool) -> Option<(&Declaration, usize)> {
        if predicate(self) {
            return Some((self, depth));
        }
        let child_depth = match self.kind {
            DeclKind::File => depth,
            _ => depth + 1,
        };
        self.children
            .iter()
            .find_map(|child| child.find_at(child_depth, predicate))
    }

    /// First declaration in pre-order matching `predicate`.
    pub fn find_first(&self, predicate: impl Fn(&Declaration) -> bool) -> Option<&Declaration> {
        self.find_first_with_depth(predicate).map(|(decl, _)| decl)
    }

    /// Direct child of the given kind and name.
    pub fn child(&self, kind: DeclKind, name: &str) -> Option<&Declaration> {
        self.children
            .iter()
            .find(|c| c.kind == kind && c.name == name)
    }

    /// Named member (field, enum value, rpc, ...) of this declaration.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Non-container element kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Syntax,
    Edition,
    Package,
    Import,
    Option,
    Field,
    MapField,
    Oneof,
    EnumValue,
    Rpc,
    Reserved,
    Extensions,
    Extend,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Syntax => "syntax",
            MemberKind::Edition => "edition",
            MemberKind::Package => "package",
            MemberKind::Import => "import",
            MemberKind::Option => "option",
            MemberKind::Field => "field",
            MemberKind::MapField => "map_field",
            MemberKind::Oneof => "oneof",
            MemberKind::EnumValue => "enum_value",
            MemberKind::Rpc => "rpc",
            MemberKind::Reserved => "reserved",
            MemberKind::Extensions => "extensions",
            MemberKind::Extend => "extend",
        }
    }
}

/// A non-container element with its position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub kind: MemberKind,
    /// Field/value/rpc/oneof name, option name, import path, or extendee
    pub name: String,
    pub span: Span,
}

impl Member {
    pub fn new(kind: MemberKind, name: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            name: name.into(),
            span,
        }
    }
}
