use crate::dom::parse_fragment;
use crate::extractor::{extract, unit_values};

const ARTICLE: &str = include_str!("fixtures/article.html");

#[test]
fn test_extract_article_fixture() {
    let fragment = parse_fragment(ARTICLE);
    let values = unit_values(&extract(&fragment));

    assert_eq!(
        values,
        vec![
            "Getting started",
            "Install the tool with ",
            " and run it.",
            "Fast ",
            "and",
            " small",
            "Read the docs",
            "Quote of the day",
        ]
    );
}

#[test]
fn test_indices_are_contiguous() {
    let fragment = parse_fragment(ARTICLE);
    for (position, unit) in extract(&fragment).iter().enumerate() {
        assert_eq!(unit.index, position);
        assert!(!unit.skip);
    }
}

#[test]
fn test_code_script_and_style_never_extracted() {
    let fragment = parse_fragment(ARTICLE);
    let values = unit_values(&extract(&fragment));

    for forbidden in ["cargo install", "verso --help", "tracking", "color: red"] {
        assert!(
            values.iter().all(|value| !value.contains(forbidden)),
            "{forbidden} leaked into units"
        );
    }
}

#[test]
fn test_whitespace_only_leaves_skipped() {
    let fragment = parse_fragment("<p>  </p>\n\t<p>\u{a0}</p><p>text</p>");
    assert_eq!(unit_values(&extract(&fragment)), vec!["text"]);
}

#[test]
fn test_extract_is_restartable() {
    let fragment = parse_fragment(ARTICLE);
    assert_eq!(extract(&fragment), extract(&fragment));
}

#[test]
fn test_attributes_are_not_units() {
    let fragment = parse_fragment(r#"<a href="https://example.com" title="Tooltip">Link</a>"#);
    assert_eq!(unit_values(&extract(&fragment)), vec!["Link"]);
}

#[test]
fn test_empty_fragment() {
    assert!(extract(&parse_fragment("")).is_empty());
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use crate::reassembler::reassemble;
    use crate::sanitizer::{SanitizationPolicy, sanitize};
    use proptest::prelude::*;

    fn markup() -> impl Strategy<Value = String> {
        let tag = prop::sample::select(vec![
            "p", "div", "span", "b", "code", "pre", "script", "style", "a", "table", "li",
        ]);
        let text = "[0-9 .,<>&]{0,12}";
        prop::collection::vec((tag, text, any::<bool>()), 0..8).prop_map(|parts| {
            parts
                .into_iter()
                .map(|(tag, text, onclick)| {
                    let attr = if onclick { r#" onclick="x()""# } else { "" };
                    format!("<{tag}{attr}>{text}</{tag}>")
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_extract_never_panics(html in ".*") {
            let _ = extract(&parse_fragment(&html));
        }

        #[test]
        fn test_identity_reassembly_matches_sanitize(html in markup()) {
            let policy = SanitizationPolicy::standard();
            let fragment = parse_fragment(&html);
            let units = extract(&fragment);
            let output = reassemble(&fragment, &units, &unit_values(&units), &policy).unwrap();
            prop_assert_eq!(output, sanitize(&fragment.to_html(), &policy));
        }

        #[test]
        fn test_sanitized_output_has_no_handlers_or_script_links(
            html in markup(),
            scheme in prop::sample::select(vec!["javascript:", " JavaScript:", "vbscript:", "data:"]),
        ) {
            let policy = SanitizationPolicy::standard();
            let input = format!(r#"{html}<a href="{scheme}alert(1)" onmouseover="y()">x</a>"#);
            let output = sanitize(&input, &policy);
            prop_assert!(!output.contains("onclick"));
            prop_assert!(!output.contains("onmouseover"));
            prop_assert!(!output.contains("href"));
            prop_assert!(output.contains(r#"target="_blank""#));
        }

        #[test]
        fn test_units_count_matches_accepted_leaves(html in markup()) {
            let fragment = parse_fragment(&html);
            let units = extract(&fragment);
            for (position, unit) in units.iter().enumerate() {
                prop_assert_eq!(unit.index, position);
                prop_assert!(!unit.value.trim().is_empty());
            }
        }
    }
}
