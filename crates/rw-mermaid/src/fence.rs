//! Fenced diagram block detection.
//!
//! Finds ```` ```mermaid ```` blocks in raw markdown text without parsing the
//! rest of the document. A block is closed only by a ```` ``` ```` line at the
//! same indentation as its opening fence, so fences nested in list items keep
//! working and a closer at a different depth is treated as content.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::RenderError;
use crate::options::{DEFAULT_MARKER, validate_marker};

/// Locator for the default `mermaid` marker.
static DEFAULT_LOCATOR: LazyLock<FenceLocator> =
    LazyLock::new(|| FenceLocator::with_valid_marker(DEFAULT_MARKER));

/// A fenced block found in a document.
///
/// Borrows from the scanned document; `span` indexes into the same text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockMatch<'a> {
    /// Whitespace before the opening fence, reused for the closing fence.
    pub indent: &'a str,
    /// Annotation after the marker on the opening line (e.g. `{init: ...}`).
    pub info: &'a str,
    /// Text between the fence lines, line endings as found.
    pub content: &'a str,
    /// Byte range from the opening fence's indentation to the end of the
    /// closing fence line, excluding its line break.
    pub span: Range<usize>,
}

/// Scans documents for fenced blocks tagged with a marker keyword.
///
/// The opening fence is ```` ``` ```` directly followed by the marker. Anything
/// after the marker on that line is recognized as [`BlockMatch::info`] and does
/// not affect matching. The closing fence is ```` ``` ```` at exactly the
/// opening indentation, optionally followed by spaces or tabs, and nothing else
/// on the line.
///
/// # Example
///
/// ```
/// use rw_mermaid::FenceLocator;
///
/// let locator = FenceLocator::new("plantuml").unwrap();
/// let blocks = locator.find("```plantuml\n@startuml\nA -> B\n@enduml\n```\n");
///
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].content, "@startuml\nA -> B\n@enduml");
/// ```
#[derive(Debug, Clone)]
pub struct FenceLocator {
    marker: String,
    opening: Regex,
}

impl FenceLocator {
    /// Create a locator for the given marker keyword.
    pub fn new(marker: &str) -> Result<Self, RenderError> {
        validate_marker(marker)?;
        Ok(Self::with_valid_marker(marker))
    }

    /// Build the opening-fence regex for an already validated marker.
    ///
    /// CRLF mode makes `^` match after `\r` as well as `\n`, but never between
    /// the two bytes of `\r\n`.
    pub(crate) fn with_valid_marker(marker: &str) -> Self {
        let pattern = format!(r"(?mR)^([ \t]*)```{}([^\r\n]*)\r?\n", regex::escape(marker));
        Self {
            marker: marker.to_owned(),
            opening: Regex::new(&pattern).unwrap(),
        }
    }

    /// Marker keyword this locator matches.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Find all blocks in document order.
    ///
    /// Matches never overlap. A candidate opening fence without a closing
    /// fence at its indentation is skipped and scanning continues on the next
    /// line.
    #[must_use]
    pub fn find<'a>(&self, document: &'a str) -> Vec<BlockMatch<'a>> {
        let mut blocks = Vec::new();
        let mut pos = 0;

        while let Some(caps) = self.opening.captures_at(document, pos) {
            let (Some(whole), Some(indent), Some(info)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                break;
            };

            match find_closing_fence(document, whole.end(), indent.as_str()) {
                Some(closing) => {
                    blocks.push(BlockMatch {
                        indent: indent.as_str(),
                        info: info.as_str(),
                        content: &document[whole.end()..closing.content_end],
                        span: whole.start()..closing.end,
                    });
                    pos = closing.end;
                }
                // Fence lines start with ASCII, so one byte on is a char boundary.
                None => pos = whole.start() + 1,
            }
        }

        blocks
    }
}

/// Find all `mermaid` blocks in document order.
///
/// # Example
///
/// ```
/// use rw_mermaid::find_blocks;
///
/// let doc = "- Item\n  ```mermaid\n  graph TD\n  ```\n";
/// let blocks = find_blocks(doc);
///
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].indent, "  ");
/// assert_eq!(blocks[0].content, "  graph TD");
/// assert_eq!(&doc[blocks[0].span.clone()], "  ```mermaid\n  graph TD\n  ```");
/// ```
#[must_use]
pub fn find_blocks(document: &str) -> Vec<BlockMatch<'_>> {
    DEFAULT_LOCATOR.find(document)
}

/// Position of a closing fence relative to the document.
struct ClosingFence {
    /// End of the block content (start of the line break before the closer).
    content_end: usize,
    /// End of the closing fence and its trailing whitespace.
    end: usize,
}

/// Find the nearest closing fence at `indent` after `content_start`.
///
/// The closer must be preceded by a line break at or after `content_start`;
/// a `\r` directly before that `\n` belongs to the break, not the content.
fn find_closing_fence(document: &str, content_start: usize, indent: &str) -> Option<ClosingFence> {
    let bytes = document.as_bytes();
    let mut search = content_start;

    while let Some(offset) = document[search..].find('\n') {
        let newline = search + offset;
        let line = &document[newline + 1..];

        if let Some(rest) = line.strip_prefix(indent).and_then(|r| r.strip_prefix("```")) {
            let trailing = rest.trim_start_matches([' ', '\t']);
            if trailing.is_empty() || trailing.starts_with(['\n', '\r']) {
                let content_end = if newline > content_start && bytes[newline - 1] == b'\r' {
                    newline - 1
                } else {
                    newline
                };
                return Some(ClosingFence {
                    content_end,
                    end: document.len() - trailing.len(),
                });
            }
        }

        search = newline + 1;
    }

    None
}
