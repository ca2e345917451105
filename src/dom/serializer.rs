use crate::dom::model::{Element, Fragment, Node};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

// The parser drops one newline right after these start tags.
const LEADING_NEWLINE_ELEMENTS: &[&str] = &["pre", "textarea", "listing"];

/// Text inside these is written back verbatim, as browsers do for innerHTML.
pub const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

impl Fragment {
    /// Serialize the fragment back to an HTML string.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            write_node(node, None, &mut out);
        }
        out
    }
}

fn write_node(node: &Node, parent_tag: Option<&str>, out: &mut String) {
    match node {
        Node::Text(value) => {
            if parent_tag.is_some_and(|tag| RAW_TEXT_ELEMENTS.contains(&tag)) {
                out.push_str(value);
            } else {
                escape_text(value, out);
            }
        }
        Node::Element(element) => write_element(element, out),
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in &element.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_attr(value, out);
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&element.tag.as_str()) {
        return;
    }
    if LEADING_NEWLINE_ELEMENTS.contains(&element.tag.as_str())
        && matches!(element.children.first(), Some(Node::Text(value)) if value.starts_with('\n'))
    {
        out.push('\n');
    }

    for child in &element.children {
        write_node(child, Some(&element.tag), out);
    }
    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

fn escape_text(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}
