use scraper::{ElementRef, Html, node::Node as HtmlNode};

use crate::dom::model::{Element, Fragment, Node};

/// Parse an HTML snippet the way a `<template>`'s `innerHTML` setter would.
///
/// Never fails: html5ever recovers from malformed markup. Comments, doctypes
/// and processing instructions are dropped.
pub fn parse_fragment(html: &str) -> Fragment {
    let document = Html::parse_fragment(html);
    let root = document.root_element();
    Fragment::new(convert_children(root))
}

fn convert_children(parent: ElementRef<'_>) -> Vec<Node> {
    let mut nodes = Vec::new();
    for child in parent.children() {
        match child.value() {
            HtmlNode::Text(text) => nodes.push(Node::Text(String::from(&**text))),
            HtmlNode::Element(element) => {
                let Some(child_ref) = ElementRef::wrap(child) else {
                    continue;
                };
                nodes.push(Node::Element(Element {
                    tag: element.name().to_ascii_lowercase(),
                    attrs: element
                        .attrs()
                        .map(|(name, value)| (name.to_string(), value.to_string()))
                        .collect(),
                    children: convert_children(child_ref),
                }));
            }
            _ => {}
        }
    }
    nodes
}
