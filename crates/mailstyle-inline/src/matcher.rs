//! Selector matching against scanned elements.
//!
//! Handles compound selectors (type, `#id`, `.class`, `[attr]`,
//! `:pseudo-class`, `*`), the child combinator `>`, and the descendant
//! combinator (whitespace). Pseudo-classes are consumed syntactically and
//! treated as always matching: interactive states have no meaning once
//! styles are inlined. Anything the matcher cannot interpret is a
//! non-match for that selector, never an error.

use std::collections::HashMap;

use mailstyle_html::{AncestorInfo, ScannedElement};

/// Borrowed view over anything a compound selector can match.
#[derive(Clone, Copy)]
struct ElementView<'a> {
    tag: &'a str,
    id: Option<&'a str>,
    classes: &'a [String],
    attrs: &'a HashMap<String, String>,
}

impl<'a> From<&'a ScannedElement> for ElementView<'a> {
    fn from(element: &'a ScannedElement) -> Self {
        Self {
            tag: &element.tag,
            id: element.id.as_deref(),
            classes: &element.classes,
            attrs: &element.attrs,
        }
    }
}

impl<'a> From<&'a AncestorInfo> for ElementView<'a> {
    fn from(ancestor: &'a AncestorInfo) -> Self {
        Self {
            tag: &ancestor.tag,
            id: ancestor.id.as_deref(),
            classes: &ancestor.classes,
            attrs: &ancestor.attrs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

/// Does `selector` match `element`?
pub fn selector_matches(selector: &str, element: &ScannedElement) -> bool {
    let segments = split_segments(selector);
    let Some(((last_comb, last), rest)) = segments.split_last() else {
        return false;
    };
    if !matches_compound(last, element.into()) {
        return false;
    }

    // Walk the remaining segments right-to-left against the ancestor
    // chain, nearest ancestor first. Each matched ancestor is consumed so
    // two segments can never be satisfied by the same one.
    let mut ancestors = element.ancestors.iter().rev();
    let mut pending = *last_comb;

    for (comb, compound) in rest.iter().rev() {
        match pending {
            Combinator::Child => {
                // Strict immediate-parent relationship.
                let Some(parent) = ancestors.next() else {
                    return false;
                };
                if !matches_compound(compound, parent.into()) {
                    return false;
                }
            }
            Combinator::Descendant => {
                let mut found = false;
                for ancestor in ancestors.by_ref() {
                    if matches_compound(compound, ancestor.into()) {
                        found = true;
                        break;
                    }
                }
                if !found {
                    return false;
                }
            }
        }
        pending = *comb;
    }

    true
}

/// Split a selector into compound segments, each tagged with the
/// combinator joining it to the segment on its left (the first segment's
/// tag is meaningless). `[...]` and `(...)` never split.
fn split_segments(selector: &str) -> Vec<(Combinator, String)> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut joining = Combinator::Descendant;
    let mut pending: Option<Combinator> = None;
    let mut depth = 0usize;

    for ch in selector.chars() {
        if depth > 0 {
            match ch {
                '[' | '(' => depth += 1,
                ']' | ')' => depth -= 1,
                _ => {}
            }
            current.push(ch);
            continue;
        }
        match ch {
            '[' | '(' => {
                depth += 1;
                current.push(ch);
            }
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    pending = Some(pending.unwrap_or(Combinator::Descendant));
                }
            }
            '>' => {
                pending = Some(Combinator::Child);
            }
            _ => {
                if let Some(comb) = pending.take() {
                    if current.is_empty() {
                        // `> p` has nothing on the combinator's left.
                        return Vec::new();
                    }
                    segments.push((joining, std::mem::take(&mut current)));
                    joining = comb;
                }
                current.push(ch);
            }
        }
    }
    if pending == Some(Combinator::Child) {
        // Trailing `p >` has nothing on the combinator's right.
        return Vec::new();
    }
    if !current.is_empty() {
        segments.push((joining, current));
    }

    segments
}

/// Match one compound selector (no combinators) against a view.
///
/// Consumes tokens left to right; any unrecognized leading character is an
/// immediate non-match; full consumption is a match.
fn matches_compound(compound: &str, el: ElementView<'_>) -> bool {
    let mut rest = compound;

    // Optional leading type name, compared case-insensitively.
    let type_len = ident_len(rest);
    if type_len > 0 {
        if !rest[..type_len].eq_ignore_ascii_case(el.tag) {
            return false;
        }
        rest = &rest[type_len..];
    }

    while !rest.is_empty() {
        let bytes = rest.as_bytes();
        match bytes[0] {
            b'*' => {
                rest = &rest[1..];
            }
            b'#' => {
                let len = ident_len(&rest[1..]);
                if len == 0 || el.id != Some(&rest[1..1 + len]) {
                    return false;
                }
                rest = &rest[1 + len..];
            }
            b'.' => {
                let len = ident_len(&rest[1..]);
                let class = &rest[1..1 + len];
                if len == 0 || !el.classes.iter().any(|c| c == class) {
                    return false;
                }
                rest = &rest[1 + len..];
            }
            b'[' => {
                let Some(close) = rest.find(']') else {
                    return false;
                };
                if !matches_attribute(&rest[1..close], el) {
                    return false;
                }
                rest = &rest[close + 1..];
            }
            b':' => {
                // Pseudo-class: consumed, always treated as matching.
                rest = &rest[1..];
                if rest.as_bytes().first() == Some(&b':') {
                    rest = &rest[1..];
                }
                let len = ident_len(rest);
                if len == 0 {
                    return false;
                }
                rest = &rest[len..];
                if rest.as_bytes().first() == Some(&b'(') {
                    let Some(after) = skip_parens(rest) else {
                        return false;
                    };
                    rest = &rest[after..];
                }
            }
            _ => return false,
        }
    }

    true
}

/// Match `[attr]` / `[attr=value]` contents (between the brackets).
///
/// Exact-match semantics only: an operator suffix on the attribute name
/// (`~=`, `^=`, `$=`, `*=`, `|=`) is stripped and the value compared
/// exactly, quotes removed.
fn matches_attribute(inner: &str, el: ElementView<'_>) -> bool {
    match inner.split_once('=') {
        Some((name, value)) => {
            let name = name.trim().trim_end_matches(['~', '^', '$', '*', '|']).trim();
            let value = strip_quotes(value.trim());
            el.attrs.get(&name.to_ascii_lowercase()).map(String::as_str) == Some(value)
        }
        None => el.attrs.contains_key(&inner.trim().to_ascii_lowercase()),
    }
}

fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Byte length of the leading identifier run.
fn ident_len(s: &str) -> usize {
    s.find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(s.len())
}

/// Bytes to skip past a balanced `(...)` group at the start of `s`.
fn skip_parens(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in s.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}
