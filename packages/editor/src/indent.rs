/// Infer the indent unit of `text`.
///
/// The first line that starts with whitespace and has content decides: a
/// leading tab means one tab per level, leading spaces mean that exact run
/// of spaces per level. Returns `None` when no line is indented.
pub fn detect_indent(text: &str) -> Option<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .find_map(|line| match line.as_bytes().first() {
            Some(b'\t') => Some("\t".to_string()),
            Some(b' ') => {
                let run = line.len() - line.trim_start_matches(' ').len();
                Some(" ".repeat(run))
            }
            _ => None,
        })
}

/// Like [`detect_indent`], falling back to `fallback` for unindented text.
pub fn detect_indent_or(text: &str, fallback: &str) -> String {
    detect_indent(text).unwrap_or_else(|| fallback.to_string())
}
