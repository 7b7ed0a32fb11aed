use std::fmt::Write;

use super::{AttrValue, Element, NodeKind, VNode};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Attribute carrying pre-rendered markup for the element body.
pub(crate) const INNER_HTML: &str = "innerHTML";

/// Serializes a node tree to HTML, expanding components on the way.
///
/// Listeners have no markup form and are dropped. `false` boolean attributes
/// are omitted, `true` ones are written without a value.
pub fn to_html(node: &VNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

fn write_node(out: &mut String, node: &VNode) {
    match node {
        VNode::Empty => {}
        VNode::Text(text) => out.push_str(&escape(text, false)),
        VNode::Element(element) => match &element.kind {
            NodeKind::Component(component) => write_node(out, &component.render(element)),
            NodeKind::Tag(tag) => write_element(out, tag, element),
        },
    }
}

fn write_element(out: &mut String, tag: &str, element: &Element) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in &element.attributes {
        if name == INNER_HTML {
            continue;
        }
        match value {
            AttrValue::Bool(false) => {}
            AttrValue::Bool(true) => {
                let _ = write!(out, " {name}");
            }
            other => {
                let _ = write!(out, " {name}=\"{}\"", escape(&other.to_text(), true));
            }
        }
    }
    out.push('>');
    if VOID_ELEMENTS.contains(&tag) {
        return;
    }
    if let Some(inner) = element.text_attr(INNER_HTML) {
        out.push_str(inner);
    } else {
        for child in &element.children {
            write_node(out, child);
        }
    }
    let _ = write!(out, "</{tag}>");
}

fn escape(raw: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_boolean_and_void_elements() {
        let node: VNode = Element::tag("input")
            .attr("name", "q")
            .flag("required", true)
            .attr("disabled", false)
            .into();
        assert_eq!(to_html(&node), "<input name=\"q\" required>");
    }

    #[test]
    fn escapes_text_and_attributes() {
        let node: VNode = Element::tag("option")
            .attr("value", "a\"b")
            .child("<tom & jerry>")
            .into();
        assert_eq!(
            to_html(&node),
            "<option value=\"a&quot;b\">&lt;tom &amp; jerry&gt;</option>"
        );
    }

    #[test]
    fn inner_html_replaces_children() {
        let node: VNode = Element::tag("div")
            .attr(INNER_HTML, "<p>a</p>\n")
            .child("ignored")
            .into();
        assert_eq!(to_html(&node), "<div><p>a</p>\n</div>");
    }
}
