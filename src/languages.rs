//! Language and model catalogs offered to callers.

use serde::Serialize;

pub const AUTO_DETECT: &str = "auto";
pub const DEFAULT_SOURCE_LANG: &str = AUTO_DETECT;
pub const DEFAULT_TARGET_LANG: &str = "vi";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Fallbacks used by [`swap_languages`] when one side is `auto`.
const SWAP_SOURCE_FALLBACK: &str = "en";
const SWAP_TARGET_FALLBACK: &str = "vi";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Model {
    pub id: &'static str,
    pub name: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language { code: AUTO_DETECT, name: "Detect language" },
    Language { code: "en", name: "English" },
    Language { code: "vi", name: "Vietnamese" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "ko", name: "Korean" },
    Language { code: "zh", name: "Chinese" },
    Language { code: "fr", name: "French" },
    Language { code: "de", name: "German" },
    Language { code: "es", name: "Spanish" },
    Language { code: "pt", name: "Portuguese" },
];

pub const MODELS: &[Model] = &[
    Model { id: "gemini-2.5-pro", name: "Gemini 2.5 Pro" },
    Model { id: "gemini-2.5-flash", name: "Gemini 2.5 Flash" },
    Model { id: "gemini-2.5-flash-lite", name: "Gemini 2.5 Flash-Lite" },
    Model { id: "gemini-2.0-flash", name: "Gemini 2.0 Flash" },
    Model { id: "gemini-2.0-flash-lite", name: "Gemini 2.0 Flash-Lite" },
];

/// Display name for `code`, or the code itself when it is not in the catalog.
pub fn language_name(code: &str) -> &str {
    LANGUAGES
        .iter()
        .find(|lang| lang.code == code)
        .map_or(code, |lang| lang.name)
}

pub fn is_known_language(code: &str) -> bool {
    LANGUAGES.iter().any(|lang| lang.code == code)
}

/// `auto` is only meaningful as a source, so it never becomes the target.
pub fn is_valid_target(code: &str) -> bool {
    code != AUTO_DETECT && is_known_language(code)
}

pub fn is_known_model(id: &str) -> bool {
    MODELS.iter().any(|model| model.id == id)
}

/// Exchange source and target. `auto` cannot become a target, so an `auto`
/// source turns into the default target and vice versa.
pub fn swap_languages(source: &str, target: &str) -> (String, String) {
    let new_source = if target == AUTO_DETECT {
        SWAP_SOURCE_FALLBACK
    } else {
        target
    };
    let new_target = if source == AUTO_DETECT {
        SWAP_TARGET_FALLBACK
    } else {
        source
    };
    (new_source.to_string(), new_target.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_name_lookup() {
        assert_eq!(language_name("ja"), "Japanese");
        assert_eq!(language_name("auto"), "Detect language");
        assert_eq!(language_name("tlh"), "tlh");
    }

    #[test]
    fn test_swap_languages() {
        assert_eq!(swap_languages("en", "vi"), ("vi".to_string(), "en".to_string()));
        assert_eq!(swap_languages("auto", "fr"), ("fr".to_string(), "vi".to_string()));
        assert_eq!(swap_languages("de", "auto"), ("en".to_string(), "de".to_string()));
    }

    #[test]
    fn test_defaults_are_in_catalog() {
        assert!(is_known_language(DEFAULT_SOURCE_LANG));
        assert!(is_valid_target(DEFAULT_TARGET_LANG));
        assert!(is_known_model(DEFAULT_MODEL));
        assert!(!is_valid_target(AUTO_DETECT));
    }
}
