//! Byte-exact insertion into document text.
//!
//! Every function here returns new text that equals the input with exactly
//! one contiguous run of bytes inserted. Nothing before or after the
//! insertion point is modified.

use crate::locator::InsertionTarget;

/// Insert `content` at byte `offset`.
pub fn splice(text: &str, offset: usize, content: &str) -> String {
    let mut out = String::with_capacity(text.len() + content.len());
    out.push_str(&text[..offset]);
    out.push_str(content);
    out.push_str(&text[offset..]);
    out
}

fn is_horizontal_space(s: &str) -> bool {
    s.bytes().all(|b| b == b' ' || b == b'\t')
}

/// Line terminator of `text`, taken from its first line break.
pub fn line_ending(text: &str) -> &'static str {
    match text.find('\n') {
        Some(i) if text[..i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// Rejoin the lines of `content` with `newline`.
fn with_line_ending(content: &str, newline: &str) -> String {
    content.lines().collect::<Vec<_>>().join(newline)
}

/// Insert already-normalized `content` at the end of the target's body.
///
/// Layouts handled:
/// - closing brace alone on its line: content goes on new lines above that
///   line, separated from the previous element by a blank line
/// - closing brace alone on its line with nothing else in the body: the
///   blank separator line is left out on purpose, so `{\n}` becomes a
///   plain block instead of one opening with an empty line
/// - closing brace sharing a line with other text, including the empty
///   inline body `{}`: content goes on its own line and the brace moves to
///   a new line indented to the container's level
///
/// Inserted line breaks follow the document's own line ending.
pub fn insert_before_close(text: &str, target: &InsertionTarget<'_>, unit: &str, content: &str) -> String {
    let close = target.offset;
    let open = target.decl.open;
    let nl = line_ending(text);
    let content = with_line_ending(content, nl);
    let line_start = text[..close].rfind('\n').map_or(0, |i| i + 1);

    if line_start > open && is_horizontal_space(&text[line_start..close]) {
        let body_is_empty = text[open + 1..line_start].trim().is_empty();
        let insertion = if body_is_empty {
            format!("{}{}", content, nl)
        } else {
            format!("{}{}{}", nl, content, nl)
        };
        return splice(text, line_start, &insertion);
    }

    let closing_indent = unit.repeat(target.depth.saturating_sub(1));
    splice(text, close, &format!("{}{}{}{}", nl, content, nl, closing_indent))
}

/// Append top-level `content` after everything else in `text`.
///
/// The document is given a trailing newline if it lacks one, then a blank
/// line, then the trimmed content and a final newline, all in the
/// document's line ending.
pub fn append_to_end(text: &str, content: &str) -> String {
    let nl = line_ending(text);
    let content = with_line_ending(content.trim(), nl);

    let mut insertion = String::with_capacity(content.len() + 3 * nl.len());
    if !text.is_empty() {
        if !text.ends_with('\n') {
            insertion.push_str(nl);
        }
        insertion.push_str(nl);
    }
    insertion.push_str(&content);
    insertion.push_str(nl);

    splice(text, text.len(), &insertion)
}
