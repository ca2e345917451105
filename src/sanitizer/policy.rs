use std::collections::{HashMap, HashSet};

use ammonia::{Builder, UrlRelative};

const ALLOWED_TAGS: &[&str] = &[
    "div", "p", "span", "br", "strong", "b", "em", "i", "u", "code", "pre", "ul", "ol", "li", "h1",
    "h2", "h3", "h4", "h5", "h6", "a", "blockquote",
];

const LINK_TAG: &str = "a";
const LINK_ATTRS: &[&str] = &["href", "title", "rel", "target"];
const DEFAULT_ATTRS: &[&str] = &["dir", "lang"];

const LINK_TARGET: &str = "_blank";
const LINK_REL: &str = "noreferrer noopener";

const EVENT_HANDLER_PREFIX: &str = "on";
// Anything else with a scheme, `javascript:` and `data:` included, loses its href.
const URL_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Whitelist describing which tags and attributes survive sanitization.
///
/// Build it once (usually [`SanitizationPolicy::standard`]) and share it. The
/// ammonia [`Builder`] is derived from it on demand through
/// [`SanitizationPolicy::builder`].
#[derive(Debug, Clone)]
pub struct SanitizationPolicy {
    allowed_tags: HashSet<String>,
    allowed_attrs_by_tag: HashMap<String, HashSet<String>>,
    default_attrs: HashSet<String>,
    strip_rules: AttributeStripRules,
    link_target: String,
    link_rel: String,
}

/// Rules that remove attributes regardless of the whitelist.
#[derive(Debug, Clone)]
pub struct AttributeStripRules {
    event_handler_prefix: String,
    url_schemes: HashSet<String>,
}

impl SanitizationPolicy {
    /// The policy every rendering surface uses.
    pub fn standard() -> Self {
        let mut allowed_attrs_by_tag = HashMap::new();
        allowed_attrs_by_tag.insert(LINK_TAG.to_string(), to_set(LINK_ATTRS));

        Self {
            allowed_tags: to_set(ALLOWED_TAGS),
            allowed_attrs_by_tag,
            default_attrs: to_set(DEFAULT_ATTRS),
            strip_rules: AttributeStripRules {
                event_handler_prefix: EVENT_HANDLER_PREFIX.to_string(),
                url_schemes: to_set(URL_SCHEMES),
            },
            link_target: LINK_TARGET.to_string(),
            link_rel: LINK_REL.to_string(),
        }
    }

    /// An ammonia builder enforcing this policy.
    ///
    /// Disallowed elements are unwrapped, script and style included: their
    /// text survives as escaped, inert text.
    pub fn builder(&self) -> Builder<'_> {
        let tag_attributes = self
            .allowed_tags
            .iter()
            .map(|tag| (tag.as_str(), self.passthrough_attrs(tag)))
            .collect();

        let mut builder = Builder::empty();
        builder
            .tags(self.allowed_tags.iter().map(String::as_str).collect())
            .clean_content_tags(HashSet::new())
            .generic_attributes(HashSet::new())
            .tag_attributes(tag_attributes)
            .url_schemes(self.strip_rules.url_schemes.iter().map(String::as_str).collect())
            .url_relative(UrlRelative::PassThrough)
            .set_tag_attribute_value(LINK_TAG, "target", self.link_target.as_str())
            .link_rel(Some(self.link_rel.as_str()))
            .strip_comments(true);
        builder
    }

    fn passthrough_attrs(&self, tag: &str) -> HashSet<&str> {
        self.allowed_attrs_by_tag
            .get(tag)
            .unwrap_or(&self.default_attrs)
            .iter()
            .map(String::as_str)
            .filter(|attr| !self.strip_rules.is_event_handler(attr))
            .filter(|attr| !(tag == LINK_TAG && matches!(*attr, "target" | "rel")))
            .collect()
    }
}

impl Default for SanitizationPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl AttributeStripRules {
    pub fn is_event_handler(&self, attr: &str) -> bool {
        attr.to_ascii_lowercase()
            .starts_with(&self.event_handler_prefix)
    }
}

fn to_set(values: &[&str]) -> HashSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}
