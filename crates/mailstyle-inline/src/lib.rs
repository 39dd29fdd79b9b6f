//! mailstyle inline engine
//!
//! CSS text + HTML text -> HTML text with the cascade resolved into
//! per-element `style` attributes. Email clients ignore `<style>` blocks,
//! so every declaration the cascade would apply is rewritten onto the
//! element itself, ranked by specificity and source order.
//!
//! The transform is pure and synchronous: each call allocates its own rule
//! list, element list, and accumulators, so concurrent callers need no
//! locking. It never panics on malformed CSS — a selector the matcher
//! cannot interpret is a non-match for that rule only, and the output is
//! byte-identical to the input outside the rewritten `style` attributes.

mod cascade;
mod matcher;

pub use matcher::selector_matches;

/// Inline `css` into `html`, returning the rewritten HTML.
///
/// Empty or whitespace-only CSS is a no-op. Pre-existing inline styles
/// always win over computed declarations on the same property.
pub fn inline(html: &str, css: &str) -> String {
    if css.trim().is_empty() {
        return html.to_string();
    }

    let stylesheet = mailstyle_css::parse_stylesheet(css);
    if stylesheet.is_empty() {
        return html.to_string();
    }

    let elements = mailstyle_html::scan(html);
    if elements.is_empty() {
        return html.to_string();
    }

    cascade::apply(html, &stylesheet, &elements)
}
