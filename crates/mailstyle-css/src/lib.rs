//! mailstyle CSS rule extraction & specificity
//!
//! Flat rule model for style inlining: selectors stay strings, declaration
//! blocks stay raw text. Source order is the one invariant the cascade
//! depends on, so extraction preserves it through group expansion.

mod parser;
mod specificity;

pub use parser::CssParser;
pub use specificity::Specificity;

/// Parse a CSS stylesheet into a flat, ordered rule list
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    CssParser::new().parse(css)
}

/// Parsed stylesheet
#[derive(Debug, Default)]
pub struct Stylesheet {
    pub rules: Vec<CssRule>,
}

impl Stylesheet {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// One selector with its raw declaration block.
///
/// Grouped selectors (`h1, p { ... }`) expand to one rule per branch; the
/// branches occupy consecutive positions so source order survives for
/// tie-breaking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    pub selector: String,
    /// Semicolon-delimited declarations, untouched.
    pub declarations: String,
}

/// CSS structural error
///
/// Never escapes the public API: extraction recovers by dropping the
/// incomplete trailing rule and keeping everything already extracted.
#[derive(Debug, thiserror::Error)]
pub enum CssError {
    #[error("unterminated block starting at byte {at}")]
    UnterminatedBlock { at: usize },
}
