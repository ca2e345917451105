use tracing::debug;

use crate::{
    dom::Fragment,
    extractor::{TextUnit, for_each_accepted_leaf_mut},
    sanitizer::{SanitizationPolicy, sanitize},
    translator::TranslateError,
};

/// Write `translated` back into the leaves `units` were extracted from and
/// return the sanitized HTML.
///
/// `translated[i]` replaces the leaf addressed by `units[i].index`. Units
/// flagged `skip`, and leaves never extracted, keep their original text.
pub fn reassemble(
    fragment: &Fragment,
    units: &[TextUnit],
    translated: &[String],
    policy: &SanitizationPolicy,
) -> Result<String, TranslateError> {
    if translated.len() != units.len() {
        return Err(TranslateError::MismatchedResponse {
            expected: units.len(),
            got: translated.len(),
        });
    }

    let mut replacements: Vec<Option<&str>> = Vec::new();
    for (unit, value) in units.iter().zip(translated) {
        if unit.skip {
            continue;
        }
        if replacements.len() <= unit.index {
            replacements.resize(unit.index + 1, None);
        }
        replacements[unit.index] = Some(value.as_str());
    }

    let mut output = fragment.clone();
    let mut replaced = 0usize;
    for_each_accepted_leaf_mut(&mut output, |index, leaf| {
        if let Some(Some(value)) = replacements.get(index) {
            leaf.clear();
            leaf.push_str(value);
            replaced += 1;
        }
    });
    debug!(replaced, units = units.len(), "reassembled fragment");

    Ok(sanitize(&output.to_html(), policy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dom::parse_fragment,
        extractor::{extract, unit_values},
    };

    fn policy() -> SanitizationPolicy {
        SanitizationPolicy::standard()
    }

    #[test]
    fn test_reassemble_replaces_in_order() {
        let fragment = parse_fragment("<p>Hello <b>world</b></p><pre>code</pre><p>Bye</p>");
        let units = extract(&fragment);
        let translated = vec![
            "Xin chào ".to_string(),
            "thế giới".to_string(),
            "Tạm biệt".to_string(),
        ];

        let html = reassemble(&fragment, &units, &translated, &policy()).unwrap();
        assert_eq!(
            html,
            "<p>Xin chào <b>thế giới</b></p><pre>code</pre><p>Tạm biệt</p>"
        );
    }

    #[test]
    fn test_identity_translation_is_noop() {
        let inputs = [
            "<p>Plain paragraph</p>",
            r#"<div onclick="x()"><a href="javascript:void(0)">link</a> and <code>code</code></div>"#,
            "<ul><li>one</li><li>two <em>three</em></li></ul>\n<section>wrapped</section>",
            "text <script>var a = 1 < 2;</script> tail",
        ];
        for input in inputs {
            let fragment = parse_fragment(input);
            let units = extract(&fragment);
            let html = reassemble(&fragment, &units, &unit_values(&units), &policy()).unwrap();
            assert_eq!(html, sanitize(&fragment.to_html(), &policy()), "input: {input}");
        }
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let fragment = parse_fragment("<p>a</p><p>b</p>");
        let units = extract(&fragment);
        let err = reassemble(&fragment, &units, &["x".to_string()], &policy()).unwrap_err();
        assert_eq!(
            err,
            TranslateError::MismatchedResponse {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_markup_in_translation_is_escaped() {
        let fragment = parse_fragment("<p>Hi</p>");
        let units = extract(&fragment);
        let translated = vec![r#"<img src=x onerror="alert(1)">"#.to_string()];

        let html = reassemble(&fragment, &units, &translated, &policy()).unwrap();
        assert_eq!(html, r#"<p>&lt;img src=x onerror="alert(1)"&gt;</p>"#);
    }

    #[test]
    fn test_raw_text_regions_cannot_carry_markup() {
        let fragment = parse_fragment("<div>Hi <xmp>raw</xmp></div>");
        let units = extract(&fragment);
        assert_eq!(unit_values(&units), vec!["Hi ".to_string()]);

        let translated = vec![r#"</xmp><a href="https://evil.example">click</a>"#.to_string()];
        let html = reassemble(&fragment, &units, &translated, &policy()).unwrap();
        assert!(!html.contains("<a"), "{html}");
        assert!(html.starts_with("<div>&lt;/xmp&gt;&lt;a href="), "{html}");
    }

    #[test]
    fn test_skipped_units_untouched() {
        let fragment = parse_fragment("<p>keep</p><p>change</p>");
        let mut units = extract(&fragment);
        units[0].skip = true;
        let translated = vec!["ignored".to_string(), "changed".to_string()];

        let html = reassemble(&fragment, &units, &translated, &policy()).unwrap();
        assert_eq!(html, "<p>keep</p><p>changed</p>");
    }

    #[test]
    fn test_source_fragment_is_not_mutated() {
        let fragment = parse_fragment("<p>original</p>");
        let units = extract(&fragment);
        reassemble(&fragment, &units, &["new".to_string()], &policy()).unwrap();
        assert_eq!(fragment.to_html(), "<p>original</p>");
    }
}
