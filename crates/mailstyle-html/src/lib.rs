//! mailstyle HTML element scanner
//!
//! Single-pass, offset-preserving scan of a well-formed HTML fragment.
//! No tree is built: each element carries a by-value snapshot of its open
//! ancestors, which is all combinator matching needs, plus the exact byte
//! span of its opening tag for later in-place rewriting.

use std::collections::HashMap;

mod scanner;

pub use scanner::scan;

/// Tags that can never have children (the standard HTML void-element set).
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link",
    "meta", "param", "source", "track", "wbr",
];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| tag.eq_ignore_ascii_case(v))
}

/// One scanned opening tag.
#[derive(Debug, Clone)]
pub struct ScannedElement {
    /// Tag name, lowercased.
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Attribute map; names lowercased, bare attributes store "".
    pub attrs: HashMap<String, String>,
    /// Pre-existing `style` attribute value.
    pub existing_style: Option<String>,
    /// Open ancestors at scan time, outermost first.
    pub ancestors: Vec<AncestorInfo>,
    /// Byte offset of `<` in the source string.
    pub start: usize,
    /// Exact byte length of the opening tag, `<` through `>` inclusive.
    pub raw_len: usize,
    /// Byte span of the existing `style` attribute within the opening tag
    /// (name through value, quoting included), relative to `start`. A bare
    /// valueless `style` spans just its name.
    pub style_span: Option<(usize, usize)>,
}

/// By-value ancestor snapshot, enough for selector matching.
#[derive(Debug, Clone)]
pub struct AncestorInfo {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: HashMap<String, String>,
}
