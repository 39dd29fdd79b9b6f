//! Selector specificity.
//!
//! The (ids, classes, types) triple the cascade ranks competing rules by.
//! Per CSS, `classes` also counts attribute selectors and pseudo-classes.
//! This is pure string analysis, sufficient for flat email selectors: no
//! `:not()` argument descent, no pseudo-element distinction.

/// Specificity triple, compared lexicographically: ids, then classes, then
/// types. Equal triples must be tie-broken by rule source order (caller's
/// job). Field order carries the derived `Ord`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
    pub ids: u32,
    pub classes: u32,
    pub types: u32,
}

impl Specificity {
    /// Compute the specificity of one selector string, combinators included.
    pub fn of(selector: &str) -> Self {
        let bytes = selector.as_bytes();
        let mut ids = 0;
        let mut classes = 0;
        let mut idx = 0;

        while idx < bytes.len() {
            match bytes[idx] {
                b'#' => {
                    ids += 1;
                    idx += 1;
                }
                b'.' => {
                    classes += 1;
                    idx += 1;
                }
                b'[' => {
                    classes += 1;
                    idx = match selector[idx..].find(']') {
                        Some(close) => idx + close + 1,
                        None => bytes.len(),
                    };
                }
                b':' => {
                    classes += 1;
                    idx += 1;
                    // A `::` run counts once.
                    if bytes.get(idx) == Some(&b':') {
                        idx += 1;
                    }
                }
                _ => idx += 1,
            }
        }

        // A compound segment contributes one type count when a bare type
        // name leads it; `*` and segments led by id/class/attr/pseudo
        // tokens contribute nothing.
        let mut types = 0;
        for segment in
            selector.split(|c: char| c.is_whitespace() || matches!(c, '>' | '+' | '~'))
        {
            let leading = segment
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
                .unwrap_or(segment.len());
            if leading > 0 {
                types += 1;
            }
        }

        Self { ids, classes, types }
    }
}
