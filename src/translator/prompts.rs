//! Prompt templates sent to the completion service.

use crate::languages::AUTO_DETECT;

fn source_sentence(source_lang: &str, scope: &str) -> String {
    if source_lang == AUTO_DETECT {
        format!("Detect the source language from the entire {scope}.")
    } else {
        format!("The source language is {source_lang}.")
    }
}

/// Batched request: the units travel as one JSON array and must come back as
/// an array of the same length and order.
pub fn chunk_prompt(units: &[String], source_lang: &str, target_lang: &str) -> String {
    let input = serde_json::Value::from(units.to_vec()).to_string();
    format!(
        "{source}\n\
         Translate each array item into {target_lang}. Return ONLY a valid JSON array of strings (same length, same order).\n\
         Rules:\n\
         - Translate only human language; keep numbers, URLs, code, and emojis unchanged.\n\
         - Do not add or remove items.\n\
         - Do not add quotes, backticks, or explanations.\n\
         Input: {input}",
        source = source_sentence(source_lang, "set"),
    )
}

/// Whole-fragment request used when no text units could be extracted.
pub fn html_prompt(html: &str, source_lang: &str, target_lang: &str) -> String {
    format!(
        "{source}\n\
         You will be given an HTML fragment. Translate ONLY human-visible text nodes into {target_lang}, \
         while preserving the original HTML structure and all tags and attributes.\n\
         Strict rules:\n\
         - Do not add, remove, or reorder HTML tags.\n\
         - Keep attributes (including classes and ids) unchanged.\n\
         - Preserve inline formatting (e.g., <strong>, <em>, <code>, <a>, lists, headings, line breaks).\n\
         - Keep URLs and code content unchanged unless they contain human language to translate.\n\
         - Return ONLY the translated HTML fragment, no explanations, no code fences.\n\
         HTML:\n{html}",
        source = source_sentence(source_lang, "HTML fragment"),
    )
}

/// Passage request for plain text; the answer is rendered as Markdown.
pub fn text_prompt(text: &str, source_lang: &str, target_lang: &str) -> String {
    format!(
        "You are a senior professional translator. {source} \
         Translate the entire passage into {target_lang} with strict respect to context and discourse.\n\
         Requirements:\n\
         - Preserve meaning, intent, tone, and register; do not translate word-by-word.\n\
         - Use the full passage for context; resolve pronouns and references and keep terminology consistent.\n\
         - Prefer natural, idiomatic {target_lang}.\n\
         - Keep numbers, URLs, code snippets, emoji, and product names unchanged when appropriate.\n\
         - Preserve inline formatting, punctuation, line breaks, and paragraph structure.\n\
         - If the text includes lists or headings, keep their structure.\n\
         Output only the translated text, with no explanations or quotation marks.\n\
         Text:\n{text}",
        source = source_sentence(source_lang, "passage"),
    )
}
