//! Deterministic cleanup of model output.
//!
//! `clean` removes markup the model sometimes emits around plain-text email
//! (HTML tags, encoded entities, a wrapping code fence) and normalizes
//! whitespace. It is idempotent: `clean(&clean(x)) == clean(x)`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static BREAK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(?:p|div|li|h[1-6]|tr)\s*>").expect("invalid break tag regex")
});

/// HTML elements the model wraps email text in; anything else in angle brackets is content.
const HTML_ELEMENTS: &str = "a|abbr|article|b|blockquote|body|br|code|div|em|font|h[1-6]|head|hr|html|i|li|mark|ol|p|pre|section|small|span|strong|sub|sup|table|tbody|td|tfoot|th|thead|tr|u|ul";

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"(?is)<!--.*?-->|</?(?:{HTML_ELEMENTS})(?:\s+[a-z_:][-a-z0-9_:.]*\s*=\s*(?:"[^"<>]*"|'[^'<>]*'|[^\s"'<>=`]+))*\s*/?>"#
    ))
    .expect("invalid markup tag regex")
});

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z]+);").expect("invalid entity regex")
});

static HORIZONTAL_WS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("invalid whitespace regex"));

static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("invalid blank line regex"));

const FENCE: &str = "```";

/// Clean raw model output into plain email text.
pub fn clean(raw: &str) -> String {
    let mut current = normalize_line_endings(raw);
    loop {
        let next = strip_markup_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    normalize_whitespace(&current)
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// One round of fence removal, tag removal, and entity decoding.
///
/// Every substitution shortens the text, so repeating until nothing changes terminates.
fn strip_markup_pass(text: &str) -> String {
    let unfenced = strip_wrapping_fence(text);
    let with_breaks = BREAK_TAG_RE.replace_all(unfenced, "\n");
    let untagged = TAG_RE.replace_all(&with_breaks, "");
    decode_entities(&untagged)
}

fn strip_wrapping_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.len() < FENCE.len() * 2 || !trimmed.starts_with(FENCE) || !trimmed.ends_with(FENCE)
    {
        return text;
    }
    let Some(first_newline) = trimmed.find('\n') else {
        return text;
    };
    let closing = trimmed.len() - FENCE.len();
    if first_newline >= closing {
        return text;
    }
    &trimmed[first_newline + 1..closing]
}

fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures<'_>| {
            decode_entity(&caps[1]).map(String::from).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(name: &str) -> Option<char> {
    let decoded = match name {
        "lt" => '<',
        "gt" => '>',
        "amp" => '&',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        _ => {
            let numeric = name.strip_prefix('#')?;
            let code = match numeric.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => numeric.parse::<u32>().ok()?,
            };
            char::from_u32(code)?
        }
    };
    if decoded.is_control() && decoded != '\n' && decoded != '\t' {
        return None;
    }
    Some(decoded)
}

fn normalize_whitespace(text: &str) -> String {
    let text = normalize_line_endings(text);
    let lines: Vec<String> = text
        .split('\n')
        .map(|line| HORIZONTAL_WS_RE.replace_all(line, " ").trim_end().to_string())
        .collect();
    let joined = lines.join("\n");
    BLANK_RUN_RE.replace_all(&joined, "\n\n").trim().to_string()
}
