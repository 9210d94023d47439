//! Diagram whitespace normalization.
//!
//! Diagrams nested in list items or written with a consistent indent carry
//! leading whitespace that mermaid would otherwise see. Normalization keeps
//! the relative structure and removes only what all lines share.

use crate::error::RenderError;

/// Normalize the raw content of a diagram block.
///
/// - Line endings (`\r\n`, lone `\r`) become `\n`
/// - Leading and trailing blank lines are dropped
/// - The smallest indentation among non-blank lines is removed from every line
/// - Blank lines inside the diagram become empty
///
/// Indentation counts raw space and tab characters; a tab is one character
/// and is not expanded. The result has no trailing newline.
///
/// # Examples
///
/// ```
/// use rw_mermaid::normalize_diagram;
///
/// let diagram = "\n    graph TD\n      A --> B\n      B --> C\n    \n";
/// assert_eq!(normalize_diagram(diagram), "graph TD\n  A --> B\n  B --> C");
/// assert_eq!(normalize_diagram("   \n\t\n"), "");
/// ```
#[must_use]
pub fn normalize_diagram(content: &str) -> String {
    let unified = content.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = unified.split('\n').collect();

    let Some(first) = lines.iter().position(|line| !is_blank(line)) else {
        return String::new();
    };
    // A non-blank line exists, so `rposition` finds one too.
    let last = lines.iter().rposition(|line| !is_blank(line)).unwrap_or(first);
    let lines = &lines[first..=last];

    let width = lines
        .iter()
        .filter(|line| !is_blank(line))
        .map(|line| indent_width(line))
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            if is_blank(line) {
                ""
            } else {
                // Indentation is ASCII, so the byte offset is a char boundary.
                &line[width.min(line.len())..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalize diagram content given as raw bytes.
///
/// Fails with [`RenderError::InvalidInput`] if the bytes are not UTF-8.
pub fn normalize_diagram_from_utf8(content: &[u8]) -> Result<String, RenderError> {
    let content = std::str::from_utf8(content)?;
    Ok(normalize_diagram(content))
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Number of leading space and tab characters.
fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}
