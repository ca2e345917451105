use std::slice;

use crate::dom::{Fragment, Node, RAW_TEXT_ELEMENTS};

/// Inline and block code. Their text is never translated.
pub const CODE_TAGS: &[&str] = &["code", "pre"];

/// Code regions plus every raw-text element. Serialization writes raw text
/// verbatim, so a translated value there would be reparsed as markup.
/// Applies to every descendant, not only direct children.
pub fn is_excluded_tag(tag: &str) -> bool {
    CODE_TAGS
        .iter()
        .chain(RAW_TEXT_ELEMENTS)
        .any(|excluded| excluded.eq_ignore_ascii_case(tag))
}

/// The single acceptance predicate shared by extraction and reassembly.
pub fn accepts(value: &str, in_excluded_region: bool) -> bool {
    !in_excluded_region && !value.trim().is_empty()
}

/// One text leaf as seen by the pre-order walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaf<'a> {
    pub value: &'a str,
    pub in_excluded_region: bool,
}

impl Leaf<'_> {
    pub fn is_accepted(&self) -> bool {
        accepts(self.value, self.in_excluded_region)
    }
}

/// Depth-first, pre-order iterator over every text leaf of a fragment.
///
/// Cheap to recreate, so callers can restart the walk at will.
pub struct TextLeaves<'a> {
    stack: Vec<(slice::Iter<'a, Node>, bool)>,
}

impl<'a> TextLeaves<'a> {
    pub fn new(fragment: &'a Fragment) -> Self {
        Self {
            stack: vec![(fragment.children.iter(), false)],
        }
    }
}

impl<'a> Iterator for TextLeaves<'a> {
    type Item = Leaf<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (iter, excluded) = self.stack.last_mut()?;
            let excluded = *excluded;
            match iter.next() {
                None => {
                    self.stack.pop();
                }
                Some(Node::Text(value)) => {
                    return Some(Leaf {
                        value,
                        in_excluded_region: excluded,
                    });
                }
                Some(Node::Element(element)) => {
                    let child_excluded = excluded || is_excluded_tag(&element.tag);
                    self.stack.push((element.children.iter(), child_excluded));
                }
            }
        }
    }
}

/// Visit every accepted leaf mutably, numbering them exactly as
/// [`TextLeaves`] filtered by [`Leaf::is_accepted`] would.
pub fn for_each_accepted_leaf_mut<F>(fragment: &mut Fragment, mut visit: F)
where
    F: FnMut(usize, &mut String),
{
    let mut index = 0;
    walk_mut(&mut fragment.children, false, &mut index, &mut visit);
}

fn walk_mut<F>(nodes: &mut [Node], excluded: bool, index: &mut usize, visit: &mut F)
where
    F: FnMut(usize, &mut String),
{
    for node in nodes {
        match node {
            Node::Text(value) => {
                if accepts(value.as_str(), excluded) {
                    visit(*index, value);
                    *index += 1;
                }
            }
            Node::Element(element) => {
                let child_excluded = excluded || is_excluded_tag(&element.tag);
                walk_mut(&mut element.children, child_excluded, index, visit);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment;

    #[test]
    fn test_leaves_in_document_order() {
        let fragment = parse_fragment("<p>a<b>b</b>c</p><p>d</p>");
        let values: Vec<&str> = TextLeaves::new(&fragment).map(|leaf| leaf.value).collect();
        assert_eq!(values, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_excluded_region_is_inherited() {
        let fragment = parse_fragment("<pre><span>inner</span></pre><p>outer</p>");
        let leaves: Vec<Leaf> = TextLeaves::new(&fragment).collect();
        assert!(leaves[0].in_excluded_region);
        assert!(!leaves[1].in_excluded_region);
    }

    #[test]
    fn test_raw_text_elements_are_excluded() {
        for tag in RAW_TEXT_ELEMENTS {
            let fragment = parse_fragment(&format!("<div>before<{tag}>inside</{tag}></div>"));
            let accepted: Vec<&str> = TextLeaves::new(&fragment)
                .filter(Leaf::is_accepted)
                .map(|leaf| leaf.value)
                .collect();
            assert_eq!(accepted, vec!["before"], "tag {tag}");
        }
    }

    #[test]
    fn test_mutable_walk_matches_iterator() {
        let mut fragment = parse_fragment("<p>one <code>x</code> two</p>\n<ul><li>three</li></ul>");
        let accepted: Vec<String> = TextLeaves::new(&fragment)
            .filter(Leaf::is_accepted)
            .map(|leaf| leaf.value.to_string())
            .collect();

        let mut visited = Vec::new();
        for_each_accepted_leaf_mut(&mut fragment, |index, value| {
            visited.push((index, value.clone()));
        });

        assert_eq!(visited.len(), accepted.len());
        for (position, (index, value)) in visited.iter().enumerate() {
            assert_eq!(*index, position);
            assert_eq!(value, &accepted[position]);
        }
    }
}
