//! Single-pass element scanner.
//!
//! Recognizes every opening and closing tag in one left-to-right pass,
//! maintaining a stack of currently-open elements. The input is trusted
//! serializer output, so there is no tag-soup recovery beyond tolerating
//! stray closing tags.

use std::collections::HashMap;

use crate::{AncestorInfo, ScannedElement, is_void_element};

/// Scan an HTML fragment into an ordered element list.
pub fn scan(html: &str) -> Vec<ScannedElement> {
    let bytes = html.as_bytes();
    let mut elements = Vec::new();
    let mut stack: Vec<AncestorInfo> = Vec::new();
    let mut idx = 0;

    while idx < bytes.len() {
        if bytes[idx] != b'<' {
            idx += 1;
            continue;
        }

        let rest = &html[idx..];

        if rest.starts_with("<!--") {
            idx = match rest[4..].find("-->") {
                Some(end) => idx + 4 + end + 3,
                None => bytes.len(),
            };
            continue;
        }

        // Doctype and processing instructions carry no elements.
        if rest.starts_with("<!") || rest.starts_with("<?") {
            idx = match rest.find('>') {
                Some(end) => idx + end + 1,
                None => bytes.len(),
            };
            continue;
        }

        if rest.starts_with("</") {
            let end = match rest.find('>') {
                Some(end) => idx + end,
                None => break,
            };
            let name = html[idx + 2..end].trim().to_ascii_lowercase();
            // Search from the top for the first same-named entry; a stray
            // or duplicate close that matches nothing is simply ignored.
            if let Some(pos) = stack.iter().rposition(|open| open.tag == name) {
                stack.remove(pos);
            }
            idx = end + 1;
            continue;
        }

        if !bytes.get(idx + 1).is_some_and(|b| b.is_ascii_alphabetic()) {
            // A bare '<' in text content.
            idx += 1;
            continue;
        }

        let Some(end) = find_tag_end(html, idx) else {
            break;
        };
        let raw = &html[idx..=end];
        let element = parse_opening_tag(raw, idx, &stack);
        let self_closing = raw.ends_with("/>");
        let tag = element.tag.clone();

        if !self_closing && !is_void_element(&tag) {
            stack.push(AncestorInfo {
                tag: element.tag.clone(),
                id: element.id.clone(),
                classes: element.classes.clone(),
                attrs: element.attrs.clone(),
            });
        }
        elements.push(element);
        idx = end + 1;

        // Raw-text elements: nothing inside is markup, jump straight to
        // the closing tag and let the normal path pop the stack.
        if !self_closing && (tag == "script" || tag == "style") {
            idx = find_close_tag(html, idx, &tag);
        }
    }

    tracing::debug!("scanned {} elements", elements.len());
    elements
}

/// Index of the `>` that ends the tag opened at `start`, skipping quoted
/// attribute values.
fn find_tag_end(html: &str, start: usize) -> Option<usize> {
    let bytes = html.as_bytes();
    let mut idx = start + 1;
    let mut quote: Option<u8> = None;

    while idx < bytes.len() {
        let byte = bytes[idx];
        match quote {
            Some(q) => {
                if byte == q {
                    quote = None;
                }
            }
            None => match byte {
                b'"' | b'\'' => quote = Some(byte),
                b'>' => return Some(idx),
                _ => {}
            },
        }
        idx += 1;
    }

    None
}

/// Byte offset of the `</tag` closing a raw-text element, or end of input.
fn find_close_tag(html: &str, from: usize, tag: &str) -> usize {
    let bytes = html.as_bytes();
    let mut idx = from;

    while idx + 1 < bytes.len() {
        if bytes[idx] == b'<' && bytes[idx + 1] == b'/' {
            let name_start = idx + 2;
            let name_end = name_start + tag.len();
            if name_end <= bytes.len() && html[name_start..name_end].eq_ignore_ascii_case(tag) {
                return idx;
            }
        }
        idx += 1;
    }

    html.len()
}

/// Parse one opening tag (`raw` spans `<` through `>`) into an element,
/// snapshotting the current ancestor stack by value.
fn parse_opening_tag(raw: &str, start: usize, stack: &[AncestorInfo]) -> ScannedElement {
    let bytes = raw.as_bytes();

    let mut idx = 1;
    let name_start = idx;
    while idx < bytes.len()
        && (bytes[idx].is_ascii_alphanumeric() || bytes[idx] == b'-' || bytes[idx] == b':')
    {
        idx += 1;
    }
    let tag = raw[name_start..idx].to_ascii_lowercase();

    let mut attrs: HashMap<String, String> = HashMap::new();
    let mut style_span: Option<(usize, usize)> = None;

    while idx < bytes.len() {
        while idx < bytes.len() && bytes[idx].is_ascii_whitespace() {
            idx += 1;
        }
        if idx >= bytes.len() || bytes[idx] == b'>' {
            break;
        }
        if bytes[idx] == b'/' {
            idx += 1;
            continue;
        }

        let attr_start = idx;
        while idx < bytes.len()
            && !bytes[idx].is_ascii_whitespace()
            && !matches!(bytes[idx], b'=' | b'>' | b'/')
        {
            idx += 1;
        }
        let name = raw[attr_start..idx].to_ascii_lowercase();
        let name_end = idx;
        if name.is_empty() {
            idx += 1;
            continue;
        }

        while idx < bytes.len() && bytes[idx].is_ascii_whitespace() {
            idx += 1;
        }

        if bytes.get(idx) == Some(&b'=') {
            idx += 1;
            while idx < bytes.len() && bytes[idx].is_ascii_whitespace() {
                idx += 1;
            }
            let value_start = idx;
            let value = if matches!(bytes.get(idx), Some(&b'"') | Some(&b'\'')) {
                let quote = bytes[idx];
                idx += 1;
                let inner_start = idx;
                while idx < bytes.len() && bytes[idx] != quote {
                    idx += 1;
                }
                let inner = raw[inner_start..idx].to_string();
                if idx < bytes.len() {
                    idx += 1;
                }
                inner
            } else {
                while idx < bytes.len()
                    && !bytes[idx].is_ascii_whitespace()
                    && bytes[idx] != b'>'
                    && !(bytes[idx] == b'/' && bytes.get(idx + 1) == Some(&b'>'))
                {
                    idx += 1;
                }
                raw[value_start..idx].to_string()
            };
            if name == "style" {
                // Span covers the whole attribute, name through value with
                // its quoting, so a rewrite replaces it in one splice.
                style_span = Some((attr_start, idx));
            }
            attrs.insert(name, value);
        } else {
            // Attribute present with no value. A bare `style` still gets a
            // span so a rewrite replaces it instead of adding a second one.
            if name == "style" {
                style_span = Some((attr_start, name_end));
            }
            attrs.insert(name, String::new());
        }
    }

    let id = attrs.get("id").cloned();
    let classes = attrs
        .get("class")
        .map(|value| value.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();
    let existing_style = style_span.and_then(|_| attrs.get("style").cloned());

    ScannedElement {
        tag,
        id,
        classes,
        attrs,
        existing_style,
        ancestors: stack.to_vec(),
        start,
        raw_len: raw.len(),
        style_span,
    }
}
