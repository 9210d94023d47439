//! Rendering configuration.

use crate::error::RenderError;

/// Default wrapper element name.
const DEFAULT_WRAPPER_TAG: &str = "div";

/// Default class attribute value (picked up by mermaid.js).
const DEFAULT_CLASS_NAME: &str = "mermaid";

/// Default fence marker keyword.
pub(crate) const DEFAULT_MARKER: &str = "mermaid";

/// Configuration for [`MermaidRenderer`](crate::MermaidRenderer).
///
/// With the `serde` feature enabled, the options can be read from a host
/// configuration file. Missing fields fall back to the defaults.
///
/// # Example
///
/// ```
/// use rw_mermaid::{RenderOptions, render_blocks_with};
///
/// let options = RenderOptions {
///     wrapper_tag: "pre".to_owned(),
///     class_name: None,
///     ..RenderOptions::default()
/// };
///
/// let html = render_blocks_with("```mermaid\ngraph LR\n```", &options).unwrap();
/// assert_eq!(html, "<pre>\ngraph LR\n</pre>");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct RenderOptions {
    /// Element name of the emitted wrapper (default: `div`).
    pub wrapper_tag: String,
    /// Class attribute value. `None` or an empty string omits the attribute.
    pub class_name: Option<String>,
    /// Keyword following the opening backticks (default: `mermaid`).
    pub marker: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            wrapper_tag: DEFAULT_WRAPPER_TAG.to_owned(),
            class_name: Some(DEFAULT_CLASS_NAME.to_owned()),
            marker: DEFAULT_MARKER.to_owned(),
        }
    }
}

impl RenderOptions {
    /// Check that the wrapper tag and marker can be used.
    pub fn validate(&self) -> Result<(), RenderError> {
        if !is_valid_tag_name(&self.wrapper_tag) {
            return Err(RenderError::InvalidTagName(self.wrapper_tag.clone()));
        }
        validate_marker(&self.marker)
    }

    /// Class name to emit, treating an empty string as absent.
    pub(crate) fn effective_class_name(&self) -> Option<&str> {
        self.class_name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Check a fence marker keyword.
pub(crate) fn validate_marker(marker: &str) -> Result<(), RenderError> {
    if marker.is_empty() || marker.chars().any(|c| c.is_whitespace() || c == '`') {
        return Err(RenderError::InvalidMarker(marker.to_owned()));
    }
    Ok(())
}

/// Element names start with an ASCII letter followed by letters, digits or `-`
/// (custom elements such as `rw-diagram` included).
fn is_valid_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        _ => false,
    }
}
