pub mod policy;

pub use policy::{AttributeStripRules, SanitizationPolicy};

/// Re-render arbitrary HTML through the whitelist in `policy`.
///
/// This is the only path translated content takes into a rendering surface.
/// Disallowed elements are unwrapped so their text is never lost; the call
/// cannot fail.
pub fn sanitize(html: &str, policy: &SanitizationPolicy) -> String {
    policy.builder().clean(html).to_string()
}
