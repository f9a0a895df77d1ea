use serde::{Deserialize, Serialize};

/// Indent unit used when the document has no indented line to learn from.
pub const DEFAULT_INDENT: &str = "  ";

/// Name reported in diagnostics when none is configured.
pub const DEFAULT_FILENAME: &str = "input.proto";

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorOptions {
    /// Indent unit for documents without any indented line
    #[serde(default = "default_indent")]
    pub fallback_indent: String,

    /// File name shown in grammar diagnostics
    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_indent() -> String {
    DEFAULT_INDENT.to_string()
}

fn default_filename() -> String {
    DEFAULT_FILENAME.to_string()
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            fallback_indent: default_indent(),
            filename: default_filename(),
        }
    }
}

impl EditorOptions {
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_fallback_indent(mut self, indent: impl Into<String>) -> Self {
        self.fallback_indent = indent.into();
        self
    }
}
