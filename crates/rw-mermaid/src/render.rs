//! Rendering of mermaid blocks into HTML containers.
//!
//! Each matched fence is replaced by the wrapper element; all text outside
//! the matched spans is copied through unchanged.

use std::sync::LazyLock;

use crate::error::RenderError;
use crate::fence::{BlockMatch, FenceLocator};
use crate::normalize::normalize_diagram;
use crate::options::RenderOptions;

/// Renderer with the default options (`<div class="mermaid">`).
static DEFAULT_RENDERER: LazyLock<MermaidRenderer> =
    LazyLock::new(|| MermaidRenderer::with_valid_options(RenderOptions::default()));

/// Replaces fenced diagram blocks with wrapper elements.
///
/// Immutable after construction; one renderer can serve any number of
/// documents from any number of threads.
///
/// # Example
///
/// ```
/// use rw_mermaid::{MermaidRenderer, RenderOptions};
///
/// let renderer = MermaidRenderer::new(RenderOptions {
///     wrapper_tag: "pre".to_owned(),
///     class_name: Some("diagram".to_owned()),
///     ..RenderOptions::default()
/// })
/// .unwrap();
///
/// let html = renderer.render("```mermaid\n  graph LR\n    A --> B\n```");
/// assert_eq!(html, "<pre class=\"diagram\">\ngraph LR\n  A --> B\n</pre>");
/// ```
#[derive(Debug, Clone)]
pub struct MermaidRenderer {
    options: RenderOptions,
    locator: FenceLocator,
    /// Opening tag including the class attribute.
    open_tag: String,
    close_tag: String,
}

impl MermaidRenderer {
    /// Create a renderer, validating the wrapper tag and marker.
    pub fn new(options: RenderOptions) -> Result<Self, RenderError> {
        options.validate()?;
        Ok(Self::with_valid_options(options))
    }

    fn with_valid_options(options: RenderOptions) -> Self {
        Self {
            locator: FenceLocator::with_valid_marker(&options.marker),
            open_tag: open_tag(&options),
            close_tag: format!("</{}>", options.wrapper_tag),
            options,
        }
    }

    /// Options this renderer was built with.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Find the blocks this renderer would replace.
    #[must_use]
    pub fn blocks<'a>(&self, document: &'a str) -> Vec<BlockMatch<'a>> {
        self.locator.find(document)
    }

    /// Replace every block in `document` with its rendered element.
    ///
    /// Documents without blocks are returned unchanged.
    #[must_use]
    pub fn render(&self, document: &str) -> String {
        let blocks = self.locator.find(document);
        if blocks.is_empty() {
            return document.to_owned();
        }

        let mut output = String::with_capacity(document.len());
        let mut last = 0;

        for block in &blocks {
            output.push_str(&document[last..block.span.start]);
            self.push_element(&mut output, block);
            last = block.span.end;
        }
        output.push_str(&document[last..]);

        tracing::debug!(
            marker = %self.locator.marker(),
            blocks = blocks.len(),
            "Rendered diagram blocks"
        );

        output
    }

    /// Append the wrapper element for one block.
    fn push_element(&self, output: &mut String, block: &BlockMatch<'_>) {
        let diagram = normalize_diagram(block.content);

        tracing::trace!(
            start = block.span.start,
            end = block.span.end,
            lines = diagram.lines().count(),
            "Rendering diagram block"
        );

        output.push_str(block.indent);
        output.push_str(&self.open_tag);
        output.push('\n');
        if !diagram.is_empty() {
            output.push_str(&diagram);
            output.push('\n');
        }
        output.push_str(block.indent);
        output.push_str(&self.close_tag);
    }
}

impl Default for MermaidRenderer {
    fn default() -> Self {
        DEFAULT_RENDERER.clone()
    }
}

/// Render all `mermaid` blocks as `<div class="mermaid">` elements.
///
/// # Examples
///
/// ```
/// use rw_mermaid::render_blocks;
///
/// let markdown = "- Item\n  ```mermaid\n  graph TD\n      A --> B\n  ```\n  After.";
///
/// assert_eq!(
///     render_blocks(markdown),
///     "- Item\n  <div class=\"mermaid\">\ngraph TD\n    A --> B\n  </div>\n  After."
/// );
/// ```
#[must_use]
pub fn render_blocks(document: &str) -> String {
    DEFAULT_RENDERER.render(document)
}

/// Render all blocks using custom options.
///
/// Fails if the options do not validate.
pub fn render_blocks_with(document: &str, options: &RenderOptions) -> Result<String, RenderError> {
    let renderer = MermaidRenderer::new(options.clone())?;
    Ok(renderer.render(document))
}

/// Render all blocks in a document given as raw bytes.
///
/// Fails with [`RenderError::InvalidInput`] before any processing if the bytes
/// are not UTF-8.
pub fn render_blocks_from_utf8(
    document: &[u8],
    options: &RenderOptions,
) -> Result<String, RenderError> {
    let document = std::str::from_utf8(document)?;
    render_blocks_with(document, options)
}

/// Build the opening tag with an optional, escaped class attribute.
fn open_tag(options: &RenderOptions) -> String {
    match options.effective_class_name() {
        Some(class) => format!("<{} class=\"{}\">", options.wrapper_tag, escape_attr(class)),
        None => format!("<{}>", options.wrapper_tag),
    }
}

/// Escape a value for use inside a double-quoted HTML attribute.
fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    static_assertions::assert_impl_all!(super::MermaidRenderer: Send, Sync);

    use pretty_assertions::assert_eq;

    use super::*;

    fn options(wrapper_tag: &str, class_name: Option<&str>) -> RenderOptions {
        RenderOptions {
            wrapper_tag: wrapper_tag.to_owned(),
            class_name: class_name.map(str::to_owned),
            ..RenderOptions::default()
        }
    }

    #[test]
    fn test_pass_through_without_blocks() {
        let markdown = "# Title\n\nParagraph.\n";

        assert_eq!(render_blocks(markdown), markdown);
    }

    #[test]
    fn test_pass_through_other_languages() {
        let markdown = "```rust\nfn main() {}\n```\n\n```\nplain\n```\n";

        assert_eq!(render_blocks(markdown), markdown);
    }

    #[test]
    fn test_single_block() {
        let markdown = "Diagram example:\n\n```mermaid\n    graph TD\n      A --> B\n      B --> C\n```\nDone.";

        assert_eq!(
            render_blocks(markdown),
            "Diagram example:\n\n<div class=\"mermaid\">\ngraph TD\n  A --> B\n  B --> C\n</div>\nDone."
        );
    }

    #[test]
    fn test_empty_block_renders_empty_element() {
        assert_eq!(
            render_blocks("```mermaid\n   \n```"),
            "<div class=\"mermaid\">\n</div>"
        );
    }

    #[test]
    fn test_indented_empty_block() {
        assert_eq!(
            render_blocks("  ```mermaid\n\n  ```"),
            "  <div class=\"mermaid\">\n  </div>"
        );
    }

    #[test]
    fn test_unclosed_block_untouched() {
        let markdown = "```mermaid\ngraph TD\n  A --> B\n";

        assert_eq!(render_blocks(markdown), markdown);
    }

    #[test]
    fn test_custom_tag_and_class() {
        let html = render_blocks_with(
            "```mermaid\ngraph TD\n```",
            &options("section", Some("diagram mermaid")),
        )
        .unwrap();

        assert_eq!(html, "<section class=\"diagram mermaid\">\ngraph TD\n</section>");
    }

    #[test]
    fn test_class_attribute_omitted() {
        for class_name in [None, Some("")] {
            let html =
                render_blocks_with("```mermaid\ngraph TD\n```", &options("div", class_name))
                    .unwrap();

            assert_eq!(html, "<div>\ngraph TD\n</div>");
        }
    }

    #[test]
    fn test_class_attribute_is_escaped() {
        let html = render_blocks_with(
            "```mermaid\ngraph TD\n```",
            &options("div", Some("a\"b<c>&'")),
        )
        .unwrap();

        assert_eq!(
            html,
            "<div class=\"a&quot;b&lt;c&gt;&amp;&#x27;\">\ngraph TD\n</div>"
        );
    }

    #[test]
    fn test_invalid_tag_rejected() {
        let result = render_blocks_with("```mermaid\nA\n```", &options("<script>", None));

        assert!(matches!(result, Err(RenderError::InvalidTagName(_))));
    }

    #[test]
    fn test_custom_marker() {
        let options = RenderOptions {
            marker: "kroki-mermaid".to_owned(),
            ..RenderOptions::default()
        };
        let renderer = MermaidRenderer::new(options).unwrap();

        let html = renderer.render("```kroki-mermaid\nA\n```\n```mermaid\nB\n```");

        assert_eq!(html, "<div class=\"mermaid\">\nA\n</div>\n```mermaid\nB\n```");
        assert_eq!(renderer.options().marker, "kroki-mermaid");
    }

    #[test]
    fn test_blocks_matches_render() {
        let renderer = MermaidRenderer::default();
        let markdown = "```mermaid\nA\n```\n\n```mermaid\nB\n```";

        assert_eq!(renderer.blocks(markdown).len(), 2);
        assert_eq!(
            renderer.render(markdown),
            "<div class=\"mermaid\">\nA\n</div>\n\n<div class=\"mermaid\">\nB\n</div>"
        );
    }

    #[test]
    fn test_render_is_repeatable() {
        let renderer = MermaidRenderer::default();
        let markdown = "```mermaid\nA\n```";

        assert_eq!(renderer.render(markdown), renderer.render(markdown));
    }

    #[test]
    fn test_from_utf8_rejects_invalid_bytes() {
        let result = render_blocks_from_utf8(&[0xC3, 0x28], &RenderOptions::default());

        assert!(matches!(result, Err(RenderError::InvalidInput(_))));
    }

    #[test]
    fn test_from_utf8() {
        let html =
            render_blocks_from_utf8(b"```mermaid\n  A\n```", &RenderOptions::default()).unwrap();

        assert_eq!(html, "<div class=\"mermaid\">\nA\n</div>");
    }
}
