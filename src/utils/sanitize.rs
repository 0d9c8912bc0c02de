//! Plain-text sanitization for values persisted into attachment metadata

use regex::Regex;
use std::sync::LazyLock;

static SCRIPT_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)[^>]*?>.*?</(script|style)>").expect("valid regex")
});
static TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static OCTETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[a-fA-F0-9]{2}").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Reduce arbitrary input to a single trimmed line of plain text.
///
/// Markup is removed (script and style blocks including their contents),
/// percent-encoded octets are dropped, and every run of whitespace including
/// line breaks collapses to one space.
pub fn sanitize_text_field(input: &str) -> String {
    let mut text = input.to_string();

    if text.contains('<') {
        text = SCRIPT_STYLE.replace_all(&text, "").into_owned();
        text = TAGS.replace_all(&text, "").into_owned();
    }

    text = OCTETS.replace_all(&text, "").into_owned();
    text = WHITESPACE.replace_all(&text, " ").into_owned();

    text.trim().to_string()
}

/// Mask a credential for display or logging
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    } else {
        "***".to_string()
    }
}
