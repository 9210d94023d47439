//! Mermaid fence rewriting for markdown documents.
//!
//! This crate finds fenced ```` ```mermaid ```` blocks in raw markdown text,
//! strips the indentation shared by the diagram lines, and replaces each block
//! with an HTML container that a client-side renderer picks up:
//!
//! ````text
//! ```mermaid                 <div class="mermaid">
//!     graph TD          =>   graph TD
//!       A --> B                A --> B
//! ```                        </div>
//! ````
//!
//! The rest of the document is left untouched byte for byte. Markdown outside
//! the fences is not parsed.
//!
//! # Architecture
//!
//! - [`fence`]: Block locator (`FenceLocator`, `BlockMatch`)
//! - [`normalize`]: Diagram whitespace normalization
//! - `render`: `MermaidRenderer` splicing rendered elements into the document
//! - `options`: `RenderOptions` (wrapper tag, class name, fence marker)
//!
//! # Example
//!
//! ```
//! use rw_mermaid::render_blocks;
//!
//! let markdown = "Intro\n\n```mermaid\n    graph TD\n      A --> B\n```\n";
//! let html = render_blocks(markdown);
//!
//! assert_eq!(
//!     html,
//!     "Intro\n\n<div class=\"mermaid\">\ngraph TD\n  A --> B\n</div>\n"
//! );
//! ```

mod error;
pub mod fence;
pub mod normalize;
mod options;
mod render;

pub use error::RenderError;
pub use fence::{BlockMatch, FenceLocator, find_blocks};
pub use normalize::{normalize_diagram, normalize_diagram_from_utf8};
pub use options::RenderOptions;
pub use render::{MermaidRenderer, render_blocks, render_blocks_from_utf8, render_blocks_with};
