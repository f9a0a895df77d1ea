/// Re-indent `snippet` so every non-blank line starts with exactly `depth`
/// copies of `unit`.
///
/// Leading and trailing blank lines are dropped. Blank lines in between are
/// kept as they are. Whatever indentation the caller used is discarded, so
/// relative indentation inside the snippet does not survive.
pub fn normalize(snippet: &str, depth: usize, unit: &str) -> String {
    let lines: Vec<&str> = snippet.lines().collect();
    let is_blank = |line: &&str| line.trim().is_empty();

    let (first, last) = match (
        lines.iter().position(|l| !is_blank(l)),
        lines.iter().rposition(|l| !is_blank(l)),
    ) {
        (Some(first), Some(last)) => (first, last),
        _ => return String::new(),
    };

    let indent = unit.repeat(depth);

    lines[first..=last]
        .iter()
        .map(|line| {
            if is_blank(line) {
                line.to_string()
            } else {
                format!("{}{}", indent, line.trim_start_matches([' ', '\t']))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
