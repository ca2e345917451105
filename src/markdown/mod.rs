//! Minimal Markdown to HTML conversion for plain-text translations.
//!
//! Passes run in a fixed order and code is captured before anything else so
//! later passes never see its content. The output is always sanitized.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::sanitizer::{SanitizationPolicy, sanitize};

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';

static FENCED_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{1,6})[ \t]+(.*)$").unwrap());
static BLOCKQUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^&gt;[ \t]?(.*)$").unwrap());
static BULLET_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*+]\s+(.*)").unwrap());
static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\.\s+(.*)").unwrap());
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\((https?://[^)\s]+)\)").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());
static INLINE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{E000}(CODEINLINE|LINK)(\\d+)\u{E001}").unwrap());
static BLOCK_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{E000}CODEBLOCK(\\d+)\u{E001}").unwrap());

const BLOCK_PREFIXES: [&str; 5] = ["<h", "<ul", "<ol", "<pre", "<blockquote"];

#[derive(Default)]
struct Stash {
    blocks: Vec<String>,
    inline: Vec<String>,
    links: Vec<String>,
}

fn placeholder(kind: &str, index: usize) -> String {
    format!("{OPEN}{kind}{index}{CLOSE}")
}

/// Render model output as sanitized HTML.
pub fn render(markdown: &str, policy: &SanitizationPolicy) -> String {
    sanitize(&to_html(markdown), policy)
}

fn to_html(markdown: &str) -> String {
    let normalized = markdown
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace([OPEN, CLOSE], "");
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return String::new();
    }
    let mut stash = Stash::default();

    let text = FENCED_CODE.replace_all(normalized, |caps: &Captures| {
        let code = strip_info_string(&caps[1]);
        stash
            .blocks
            .push(format!("<pre><code>{}</code></pre>", escape_html(code)));
        placeholder("CODEBLOCK", stash.blocks.len() - 1)
    });

    let text = INLINE_CODE.replace_all(&text, |caps: &Captures| {
        stash
            .inline
            .push(format!("<code>{}</code>", escape_html(&caps[1])));
        placeholder("CODEINLINE", stash.inline.len() - 1)
    });

    let text = escape_html(&text);

    let text = HEADING.replace_all(&text, |caps: &Captures| {
        let level = caps[1].len();
        format!("<h{level}>{}</h{level}>", &caps[2])
    });

    let text = BLOCKQUOTE.replace_all(&text, "<blockquote>$1</blockquote>");

    let text = convert_lists(&text);

    let text = LINK.replace_all(&text, |caps: &Captures| {
        stash.links.push(format!(
            r#"<a href="{}" target="_blank" rel="noreferrer noopener">"#,
            &caps[2]
        ));
        format!("{}{}</a>", placeholder("LINK", stash.links.len() - 1), &caps[1])
    });

    let text = BOLD.replace_all(&text, "<strong>$1</strong>");
    let text = emphasize(&text, '*');
    let text = emphasize(&text, '_');

    let text = BLANK_LINES
        .split(&text)
        .filter(|chunk| !chunk.trim().is_empty())
        .map(wrap_paragraph)
        .collect::<Vec<_>>()
        .join("\n");

    let text = INLINE_PLACEHOLDER.replace_all(&text, |caps: &Captures| {
        let stored = match &caps[1] {
            "LINK" => &stash.links,
            _ => &stash.inline,
        };
        lookup(stored, &caps[2])
    });
    BLOCK_PLACEHOLDER
        .replace_all(&text, |caps: &Captures| lookup(&stash.blocks, &caps[1]))
        .into_owned()
}

fn lookup(stored: &[String], index: &str) -> String {
    index
        .parse::<usize>()
        .ok()
        .and_then(|i| stored.get(i))
        .cloned()
        .unwrap_or_default()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Drop the newline after the opening fence, and a language tag such as
/// `rust` when one sits alone on that line.
fn strip_info_string(code: &str) -> &str {
    let code = match code.split_once('\n') {
        Some((first, rest)) if !first.chars().any(char::is_whitespace) => rest,
        _ => code,
    };
    code.strip_suffix('\n').unwrap_or(code)
}

#[derive(Clone, Copy, PartialEq)]
enum ListKind {
    Bullet,
    Numbered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Bullet => "ul",
            ListKind::Numbered => "ol",
        }
    }
}

/// Line-by-line list grouping. Lists are emitted as their own blank-line
/// separated block so the paragraph pass leaves them alone.
fn convert_lists(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut open: Option<ListKind> = None;

    for line in text.split('\n') {
        let item = BULLET_ITEM
            .captures(line)
            .map(|caps| (ListKind::Bullet, caps))
            .or_else(|| NUMBERED_ITEM.captures(line).map(|caps| (ListKind::Numbered, caps)));

        match item {
            Some((kind, caps)) => {
                if open != Some(kind) {
                    if let Some(previous) = open.take() {
                        out.push(format!("</{}>", previous.tag()));
                    }
                    if out.last().is_some_and(|l| !l.is_empty()) {
                        out.push(String::new());
                    }
                    out.push(format!("<{}>", kind.tag()));
                    open = Some(kind);
                }
                out.push(format!("<li>{}</li>", &caps[1]));
            }
            None => {
                if let Some(previous) = open.take() {
                    out.push(format!("</{}>", previous.tag()));
                    if !line.is_empty() {
                        out.push(String::new());
                    }
                }
                out.push(line.to_string());
            }
        }
    }
    if let Some(previous) = open {
        out.push(format!("</{}>", previous.tag()));
    }
    out.join("\n")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Wrap `delim`-delimited runs in `<em>`. A run must open at the start of the
/// text or after a non-word character, close before a non-word character or
/// the end, hold at least one character and stay on one line.
fn emphasize(text: &str, delim: char) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let opens = c == delim && (i == 0 || !is_word_char(chars[i - 1]));
        if opens && let Some(close) = find_closing(&chars, i, delim) {
            out.push_str("<em>");
            out.extend(&chars[i + 1..close]);
            out.push_str("</em>");
            i = close + 1;
            continue;
        }
        out.push(c);
        i += 1;
    }
    out
}

fn find_closing(chars: &[char], open: usize, delim: char) -> Option<usize> {
    let mut j = open + 2;
    while j < chars.len() {
        if chars[j - 1] == '\n' {
            return None;
        }
        if chars[j] == '\n' {
            return None;
        }
        if chars[j] == delim && chars.get(j + 1).is_none_or(|&next| !is_word_char(next)) {
            return Some(j);
        }
        j += 1;
    }
    None
}

fn wrap_paragraph(chunk: &str) -> String {
    let head = chunk.trim_start();
    let is_block = BLOCK_PREFIXES.iter().any(|prefix| head.starts_with(prefix))
        || head.starts_with(&format!("{OPEN}CODEBLOCK"));
    if is_block {
        chunk.to_string()
    } else {
        format!("<p>{}</p>", chunk.replace('\n', "<br>"))
    }
}
