//! HTML serialization of rendered nodes

use crate::render::{Element, Node};
use std::borrow::Cow;

/// Elements that never carry children or a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Serialize a node tree to HTML
pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Serialize a sequence of sibling nodes, one per line
pub fn nodes_to_html(nodes: &[Node]) -> String {
    nodes.iter().map(to_html).collect::<Vec<_>>().join("\n")
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&escape(text)),
        Node::Element(element) => write_element(element, out),
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(element.tag());

    if !element.class_list().is_empty() {
        out.push_str(" class=\"");
        out.push_str(&escape(&element.class_list().join(" ")));
        out.push('"');
    }

    for (name, value) in element.attrs() {
        out.push(' ');
        out.push_str(name);
        if let Some(value) = value {
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&element.tag()) {
        return;
    }

    for child in element.child_nodes() {
        write_node(child, out);
    }

    out.push_str("</");
    out.push_str(element.tag());
    out.push('>');
}

/// Escape text and attribute values
pub fn escape(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }

    let mut escaped = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
