//! Edge case tests for mailstyle-html
//!
//! Rare markup shapes the scanner must survive without corrupting offsets.

use mailstyle_html::{is_void_element, scan};

// ============================================================================
// EMPTY AND MINIMAL INPUT
// ============================================================================

#[test]
fn test_scan_empty() {
    assert!(scan("").is_empty());
    assert!(scan("plain text only").is_empty());
}

#[test]
fn test_scan_bare_angle_bracket_in_text() {
    let elements = scan("<p>1 < 2 and 3 > 2</p>");
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].tag, "p");
}

// ============================================================================
// COMMENTS AND DOCTYPE
// ============================================================================

#[test]
fn test_comment_with_tags_inside() {
    let elements = scan("<!-- <div>not real</div> --><p>x</p>");
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].tag, "p");
}

#[test]
fn test_doctype_skipped() {
    let elements = scan("<!DOCTYPE html><p>x</p>");
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].start, 15);
}

#[test]
fn test_unterminated_comment_swallows_rest() {
    let elements = scan("<p>x</p><!-- open forever <div>");
    assert_eq!(elements.len(), 1);
}

// ============================================================================
// RAW-TEXT ELEMENTS
// ============================================================================

#[test]
fn test_script_content_not_scanned() {
    let html = "<script>if (a < b) { document.write(\"<div>\"); }</script><p>x</p>";
    let elements = scan(html);
    let tags: Vec<&str> = elements.iter().map(|e| e.tag.as_str()).collect();
    assert_eq!(tags, vec!["script", "p"]);
}

#[test]
fn test_style_content_not_scanned() {
    let html = "<style>p > a { color: red; }</style><a href=\"#\">x</a>";
    let elements = scan(html);
    let tags: Vec<&str> = elements.iter().map(|e| e.tag.as_str()).collect();
    assert_eq!(tags, vec!["style", "a"]);
    // The <a> is not a descendant of <style>.
    assert!(elements[1].ancestors.is_empty());
}

// ============================================================================
// VOID AND SELF-CLOSING ELEMENTS
// ============================================================================

#[test]
fn test_void_element_table() {
    for tag in ["br", "hr", "img", "input", "meta", "link"] {
        assert!(is_void_element(tag), "{tag} should be void");
    }
    assert!(is_void_element("IMG"));
    assert!(!is_void_element("div"));
}

#[test]
fn test_void_elements_scanned_but_never_containers() {
    let elements = scan("<td><br><img src=\"x.png\" /><span>y</span></td>");
    let span = elements.iter().find(|e| e.tag == "span").unwrap();
    let chain: Vec<&str> = span.ancestors.iter().map(|a| a.tag.as_str()).collect();
    assert_eq!(chain, vec!["td"]);
    assert!(elements.iter().any(|e| e.tag == "br"));
    assert!(elements.iter().any(|e| e.tag == "img"));
}

// ============================================================================
// STACK TOLERANCE
// ============================================================================

#[test]
fn test_duplicate_closes_ignored() {
    let elements = scan("<div><p>a</p></p></p><em>b</em></div>");
    let em = elements.iter().find(|e| e.tag == "em").unwrap();
    let chain: Vec<&str> = em.ancestors.iter().map(|a| a.tag.as_str()).collect();
    assert_eq!(chain, vec!["div"]);
}

#[test]
fn test_orphan_close_at_start() {
    let elements = scan("</div><p>x</p>");
    assert_eq!(elements.len(), 1);
    assert!(elements[0].ancestors.is_empty());
}

#[test]
fn test_close_pops_nearest_open() {
    // </div> closes the inner div, not the outer one.
    let elements = scan("<div id=\"outer\"><div id=\"inner\"><p>a</p></div><p class=\"b\">c</p></div>");
    let second = elements.iter().find(|e| e.classes.contains(&"b".to_string())).unwrap();
    assert_eq!(second.ancestors.len(), 1);
    assert_eq!(second.ancestors[0].id.as_deref(), Some("outer"));
}

// ============================================================================
// ATTRIBUTES
// ============================================================================

#[test]
fn test_quoted_gt_inside_attribute() {
    let html = "<a title=\"a > b\" href=\"#\">x</a>";
    let elements = scan(html);
    assert_eq!(elements.len(), 1);
    let e = &elements[0];
    assert_eq!(&html[e.start..e.start + e.raw_len], "<a title=\"a > b\" href=\"#\">");
    assert_eq!(e.attrs.get("title").map(String::as_str), Some("a > b"));
}

#[test]
fn test_single_quoted_style() {
    let html = "<p style='color: red'>x</p>";
    let elements = scan(html);
    let e = &elements[0];
    assert_eq!(e.existing_style.as_deref(), Some("color: red"));
    let (from, to) = e.style_span.unwrap();
    assert_eq!(&html[e.start + from..e.start + to], "style='color: red'");
}

#[test]
fn test_attribute_names_lowercased() {
    let elements = scan("<P CLASS=\"Hero\" ID=\"Top\">x</P>");
    let e = &elements[0];
    assert_eq!(e.tag, "p");
    assert_eq!(e.classes, vec!["Hero"]);
    assert_eq!(e.id.as_deref(), Some("Top"));
}

// ============================================================================
// STRESS
// ============================================================================

#[test]
fn test_deeply_nested() {
    let mut html = String::new();
    for _ in 0..200 {
        html.push_str("<div>");
    }
    html.push_str("<p>deep</p>");
    for _ in 0..200 {
        html.push_str("</div>");
    }
    let elements = scan(&html);
    let p = elements.iter().find(|e| e.tag == "p").unwrap();
    assert_eq!(p.ancestors.len(), 200);
}

#[test]
fn test_many_siblings_share_no_state() {
    let mut html = "<ul>".to_string();
    for i in 0..500 {
        html.push_str(&format!("<li id=\"i{i}\">{i}</li>"));
    }
    html.push_str("</ul>");
    let elements = scan(&html);
    assert_eq!(elements.len(), 501);
    for element in elements.iter().skip(1) {
        assert_eq!(element.ancestors.len(), 1);
        assert_eq!(element.ancestors[0].tag, "ul");
    }
}
