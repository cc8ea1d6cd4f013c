// src/core/html.rs
//! Small helpers on top of `scraper` for the markup quirks the polling pages have.

use scraper::node::Node;
use scraper::ElementRef;

use super::sanitize::normalize_ws;

/// True when the element's `class` attribute is exactly `class` (whitespace-normalized).
/// Token order matters: `"type hide-mobile single first"` does not match
/// `"type hide-mobile single first last"`.
pub fn has_exact_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value()
        .attr("class")
        .is_some_and(|c| normalize_ws(c) == class)
}

/// First descendant `<tag>` whose class attribute is exactly `class`, in document order.
pub fn find_exact_class<'a>(root: ElementRef<'a>, tag: &str, class: &str) -> Option<ElementRef<'a>> {
    root.descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == tag && has_exact_class(*el, class))
}

/// Concatenated text of all descendants, untouched.
pub fn raw_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Descendant text with whitespace collapsed and trimmed.
pub fn clean_text(el: ElementRef<'_>) -> String {
    normalize_ws(&raw_text(el))
}

/// Descendant text where every `<br>` becomes `sep`.
pub fn text_with_breaks(el: ElementRef<'_>, sep: &str) -> String {
    let mut out = s!();
    for node in el.descendants() {
        match node.value() {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) if e.name() == "br" => out.push_str(sep),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn root(frag: &Html) -> ElementRef<'_> {
        frag.root_element()
    }

    #[test]
    fn exact_class_does_not_match_superset() {
        let frag = Html::parse_fragment(
            r#"<table><tr>
                 <td class="type hide-mobile single first last">U.S. House</td>
               </tr></table>"#,
        );
        assert!(find_exact_class(root(&frag), "td", "type hide-mobile single first").is_none());
        let td = find_exact_class(root(&frag), "td", "type hide-mobile single first last").unwrap();
        assert_eq!(clean_text(td), "U.S. House");
    }

    #[test]
    fn breaks_become_separator() {
        let frag = Html::parse_fragment(
            r#"<table><tr><td class="dates hide-desktop">Sep 28-30<br><span>Maine</span><br>800 LV</td></tr></table>"#,
        );
        let td = find_exact_class(root(&frag), "td", "dates hide-desktop").unwrap();
        assert_eq!(text_with_breaks(td, ", "), "Sep 28-30, Maine, 800 LV");
    }
}
