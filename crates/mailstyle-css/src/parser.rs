//! CSS rule extractor.
//!
//! Tokenizes stylesheet text into an ordered (selector, declarations) list.
//! Comments are stripped before structural parsing; at-rules are skipped as
//! opaque brace-balanced blocks, so nothing inside them is ever inlined.

use crate::{CssError, CssRule, Stylesheet};

/// Extracts flat rules from CSS source text.
pub struct CssParser;

impl CssParser {
    pub fn new() -> Self {
        Self
    }

    /// Extract all rules in source order.
    ///
    /// Never fails: an unterminated trailing block stops extraction at
    /// end-of-string and everything already extracted is kept.
    pub fn parse(&self, css: &str) -> Stylesheet {
        let source = strip_comments(css);
        let mut rules = Vec::new();
        if let Err(err) = extract_rules(&source, &mut rules) {
            tracing::debug!("rule extraction stopped early: {err}");
        }
        tracing::debug!("extracted {} rules", rules.len());
        Stylesheet { rules }
    }
}

impl Default for CssParser {
    fn default() -> Self {
        Self::new()
    }
}

fn extract_rules(source: &str, rules: &mut Vec<CssRule>) -> Result<(), CssError> {
    let bytes = source.as_bytes();
    let mut idx = 0;

    while idx < bytes.len() {
        let byte = bytes[idx];

        // Stray separators between rules are not structural.
        if byte.is_ascii_whitespace() || byte == b';' || byte == b'}' {
            idx += 1;
            continue;
        }

        if byte == b'@' {
            idx = skip_at_rule(source, idx)?;
            continue;
        }

        let open = match source[idx..].find('{') {
            Some(offset) => idx + offset,
            None => return Err(CssError::UnterminatedBlock { at: idx }),
        };
        let after_close = skip_block(source, open)?;
        let body = source[open + 1..after_close - 1].trim();

        if !body.is_empty() {
            for selector in split_grouped(&source[idx..open]) {
                let selector = selector.trim();
                if selector.is_empty() {
                    continue;
                }
                rules.push(CssRule {
                    selector: selector.to_string(),
                    declarations: body.to_string(),
                });
            }
        }

        idx = after_close;
    }

    Ok(())
}

/// Skip an at-rule starting at `idx` (the `@`).
///
/// Statement at-rules (`@import ...;`) end at the first semicolon; block
/// at-rules (`@media { ... }`) consume the whole brace-balanced block,
/// regardless of nesting depth.
fn skip_at_rule(source: &str, idx: usize) -> Result<usize, CssError> {
    let bytes = source.as_bytes();
    let mut cursor = idx;

    while cursor < bytes.len() {
        match bytes[cursor] {
            b';' => return Ok(cursor + 1),
            b'{' => return skip_block(source, cursor),
            _ => cursor += 1,
        }
    }

    Err(CssError::UnterminatedBlock { at: idx })
}

/// Skip a brace-balanced block; returns the index just past the closing `}`.
fn skip_block(source: &str, open: usize) -> Result<usize, CssError> {
    let bytes = source.as_bytes();
    let mut depth = 0usize;
    let mut cursor = open;

    while cursor < bytes.len() {
        match bytes[cursor] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(cursor + 1);
                }
            }
            _ => {}
        }
        cursor += 1;
    }

    Err(CssError::UnterminatedBlock { at: open })
}

/// Split a selector list on top-level commas.
///
/// Commas inside `[...]` or `(...)` (attribute values, `:nth-child(2n, 3)`)
/// do not split.
fn split_grouped(selectors: &str) -> Vec<&str> {
    let bytes = selectors.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, byte) in bytes.iter().enumerate() {
        match byte {
            b'[' | b'(' => depth += 1,
            b']' | b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                parts.push(&selectors[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&selectors[start..]);

    parts
}

/// Strip `/* ... */` comments anywhere in the source.
fn strip_comments(css: &str) -> String {
    let bytes = css.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut idx = 0;

    while idx < bytes.len() {
        if bytes[idx] == b'/' && bytes.get(idx + 1) == Some(&b'*') {
            // An unterminated comment swallows the rest of the input.
            match css[idx + 2..].find("*/") {
                Some(end) => idx += 2 + end + 2,
                None => break,
            }
            continue;
        }
        out.push(bytes[idx]);
        idx += 1;
    }

    // Only ASCII-delimited ranges were removed, so this never fails.
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_rules() {
        let sheet = CssParser::new().parse("p { color: red; } .card { padding: 8px; }");
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.rules[0].selector, "p");
        assert_eq!(sheet.rules[0].declarations, "color: red;");
        assert_eq!(sheet.rules[1].selector, ".card");
    }

    #[test]
    fn test_grouped_selectors_expand_in_order() {
        let sheet = CssParser::new().parse("h1, p { margin: 0; } div { color: blue; }");
        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.rules[0].selector, "h1");
        assert_eq!(sheet.rules[1].selector, "p");
        assert_eq!(sheet.rules[1].declarations, "margin: 0;");
        assert_eq!(sheet.rules[2].selector, "div");
    }

    #[test]
    fn test_at_rule_block_skipped_wholesale() {
        let css = "@media screen { p { color: red; } .x { color: blue; } } a { color: green; }";
        let sheet = CssParser::new().parse(css);
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.rules[0].selector, "a");
    }

    #[test]
    fn test_nested_at_rule_blocks() {
        let css = "@media print { @media (min-width: 10px) { p { color: red; } } } b { x: y; }";
        let sheet = CssParser::new().parse(css);
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.rules[0].selector, "b");
    }

    #[test]
    fn test_statement_at_rule_skips_to_semicolon() {
        let sheet = CssParser::new().parse("@import url(\"base.css\"); p { color: red; }");
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.rules[0].selector, "p");
    }

    #[test]
    fn test_comments_stripped() {
        let css = "/* lead */ p /* mid */ { color: /* inline */ red; } /* tail */";
        let sheet = CssParser::new().parse(css);
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.rules[0].selector, "p");
        assert!(sheet.rules[0].declarations.contains("red"));
    }

    #[test]
    fn test_empty_selector_or_body_dropped() {
        let sheet = CssParser::new().parse("{ color: red; } p {   } , { x: y; }");
        assert_eq!(sheet.len(), 0);
    }

    #[test]
    fn test_unterminated_block_drops_trailing_rule() {
        let sheet = CssParser::new().parse("p { color: red; } div { color: blue;");
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.rules[0].selector, "p");
    }

    #[test]
    fn test_group_comma_inside_parens_not_split() {
        let sheet = CssParser::new().parse("li:nth-child(2n, 3), p { margin: 0; }");
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.rules[0].selector, "li:nth-child(2n, 3)");
        assert_eq!(sheet.rules[1].selector, "p");
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(CssParser::new().parse("").is_empty());
        assert!(CssParser::new().parse("   \n\t  ").is_empty());
    }
}
