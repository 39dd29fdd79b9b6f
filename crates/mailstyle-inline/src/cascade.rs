//! Cascade resolution and in-place rewriting.
//!
//! Matching produces pure data first (per-element `MatchedStyle` lists);
//! splices are then applied against the one original string from the last
//! element to the first, so every still-unprocessed offset stays valid.

use mailstyle_css::{Specificity, Stylesheet};
use mailstyle_html::ScannedElement;

use crate::matcher::selector_matches;

/// One rule matching one element. `order` is the rule's source position,
/// used only to break specificity ties.
#[derive(Debug, Clone)]
struct MatchedStyle<'a> {
    declarations: &'a str,
    specificity: Specificity,
    order: usize,
}

pub(crate) fn apply(html: &str, stylesheet: &Stylesheet, elements: &[ScannedElement]) -> String {
    let mut matched: Vec<Vec<MatchedStyle<'_>>> = vec![Vec::new(); elements.len()];

    for (order, rule) in stylesheet.rules.iter().enumerate() {
        let specificity = Specificity::of(&rule.selector);
        for (i, element) in elements.iter().enumerate() {
            if selector_matches(&rule.selector, element) {
                matched[i].push(MatchedStyle {
                    declarations: &rule.declarations,
                    specificity,
                    order,
                });
            }
        }
    }

    tracing::debug!(
        "matched {} rule/element pairs over {} rules x {} elements",
        matched.iter().map(Vec::len).sum::<usize>(),
        stylesheet.len(),
        elements.len(),
    );

    // Splice back to front; elements are in ascending start order.
    let mut output = html.to_string();
    for i in (0..elements.len()).rev() {
        let styles = &mut matched[i];
        if styles.is_empty() {
            // Untouched, including any pre-existing style attribute.
            continue;
        }
        // Stable sort: ties keep source order, and later folds win.
        styles.sort_by(|a, b| {
            a.specificity
                .cmp(&b.specificity)
                .then(a.order.cmp(&b.order))
        });

        let element = &elements[i];
        let mut merged = DeclarationMap::default();
        for style in styles.iter() {
            merged.fold_block(style.declarations);
        }
        // The element's own inline declarations always win.
        if let Some(existing) = &element.existing_style {
            merged.fold_block(existing);
        }
        if merged.is_empty() {
            continue;
        }

        splice(&mut output, element, &merged.serialize());
    }

    output
}

/// Key-unique property map with deterministic (first-assignment) ordering.
/// Later folds overwrite earlier values for the same property.
#[derive(Debug, Default)]
struct DeclarationMap {
    entries: Vec<(String, String)>,
}

impl DeclarationMap {
    /// Fold one semicolon-delimited declaration block into the map.
    /// Empty or malformed fragments are skipped, never errors.
    fn fold_block(&mut self, block: &str) {
        for fragment in block.split(';') {
            let Some((name, value)) = fragment.split_once(':') else {
                continue;
            };
            let (name, value) = (name.trim(), value.trim());
            if name.is_empty() || value.is_empty() {
                continue;
            }
            // Property names are case-insensitive; custom properties are not.
            let key = if name.starts_with("--") {
                name.to_string()
            } else {
                name.to_ascii_lowercase()
            };
            self.set(key, value);
        }
    }

    fn set(&mut self, name: String, value: &str) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((name, value.to_string())),
        }
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn serialize(&self) -> String {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect();
        parts.join("; ")
    }
}

/// Splice the resolved style value into one element's opening tag.
fn splice(output: &mut String, element: &ScannedElement, value: &str) {
    let start = element.start;
    let end = start + element.raw_len;
    // The value lands in a double-quoted attribute; inner double quotes
    // (`font-family: "Helvetica Neue"`) must not terminate it early.
    let value = value.replace('"', "&quot;");

    match element.style_span {
        // Replace the existing attribute wholesale, whatever its quoting.
        Some((from, to)) => {
            output.replace_range(start + from..start + to, &format!("style=\"{value}\""));
        }
        // Insert a new attribute just before the tag's closing `>`
        // (before the `/` of a self-close).
        None => {
            let insert_at = if output[start..end].ends_with("/>") {
                end - 2
            } else {
                end - 1
            };
            output.insert_str(insert_at, &format!(" style=\"{value}\""));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_map_overwrites() {
        let mut map = DeclarationMap::default();
        map.fold_block("color: red; margin: 0");
        map.fold_block("color: blue");
        assert_eq!(map.serialize(), "color: blue; margin: 0");
    }

    #[test]
    fn test_declaration_map_skips_malformed() {
        let mut map = DeclarationMap::default();
        map.fold_block("color red; : nope; padding: ; ; font-size: 12px;");
        assert_eq!(map.serialize(), "font-size: 12px");
    }

    #[test]
    fn test_property_names_case_folded() {
        let mut map = DeclarationMap::default();
        map.fold_block("COLOR: red");
        map.fold_block("color: blue");
        assert_eq!(map.serialize(), "color: blue");
    }

    #[test]
    fn test_custom_properties_keep_case() {
        let mut map = DeclarationMap::default();
        map.fold_block("--Brand: #f60");
        assert_eq!(map.serialize(), "--Brand: #f60");
    }
}
