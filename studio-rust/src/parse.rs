//! Response parsing: fenced JSON payloads and sentinel-delimited text.

use crate::{StudioError, StudioResult};
use serde::de::DeserializeOwned;

pub const HASHTAGS: &str = "###HASHTAGS###";
pub const IMAGE_PROMPT: &str = "###IMAGEPROMPT###";
pub const PRIMARY_TEXT: &str = "###PRIMARYTEXT###";
pub const BODY: &str = "###BODY###";
pub const MESSAGE: &str = "###MESSAGE###";
pub const TITLE: &str = "###TITLE###";
pub const TAGS: &str = "###TAGS###";
pub const CTA: &str = "###CTA###";
pub const FB_IMAGE_PROMPT: &str = "###FB_IMAGE_PROMPT###";
pub const FB_HASHTAGS: &str = "###FB_HASHTAGS###";
pub const ARTICLE_TITLE: &str = "###ARTICLE_TITLE###";
pub const ARTICLE_BODY: &str = "###ARTICLE_BODY###";
pub const ARTICLE_CTA: &str = "###ARTICLE_CTA###";

/// Remove a surrounding Markdown code fence, with or without a language tag.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`, `JSON`, ...) on the opening line.
    let rest = match rest.find('\n') {
        Some(newline) if rest[..newline].chars().all(|c| c.is_ascii_alphanumeric()) => {
            &rest[newline + 1..]
        }
        _ => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse a JSON payload, failing with an [`StudioError::InvalidFormat`]
/// naming `context`.
pub fn parse_json<T: DeserializeOwned>(text: &str, context: &str) -> StudioResult<T> {
    serde_json::from_str(strip_code_fence(text)).map_err(|error| {
        tracing::warn!(context, %error, "failed to parse JSON response");
        StudioError::invalid_format(context)
    })
}

/// Split `text` into `sentinels.len() + 1` trimmed fields.
///
/// Field `i + 1` follows `sentinels[i]`. Splitting runs from the last
/// sentinel backwards, so a missing sentinel leaves its field empty. Text
/// after a repeated sentinel is discarded.
pub fn split_sections(text: &str, sentinels: &[&str]) -> Vec<String> {
    let mut fields = vec![String::new(); sentinels.len() + 1];
    let mut head = text;
    for (index, sentinel) in sentinels.iter().enumerate().rev() {
        let mut parts = head.split(sentinel);
        let before = parts.next().unwrap_or_default();
        if let Some(after) = parts.next() {
            fields[index + 1] = after.trim().to_string();
            head = before;
        }
    }
    fields[0] = head.trim().to_string();
    fields
}

/// Split on whichever sentinel comes next, in any order, padding the result
/// to `count` fields.
pub fn split_on_any(text: &str, sentinels: &[&str], count: usize) -> Vec<String> {
    let mut fields = Vec::with_capacity(count);
    let mut rest = text;
    loop {
        let next = sentinels
            .iter()
            .filter_map(|sentinel| rest.find(sentinel).map(|at| (at, sentinel.len())))
            .min_by_key(|(at, _)| *at);
        match next {
            Some((at, len)) => {
                fields.push(rest[..at].trim().to_string());
                rest = &rest[at + len..];
            }
            None => {
                fields.push(rest.trim().to_string());
                break;
            }
        }
    }
    if fields.len() < count {
        fields.resize(count, String::new());
    }
    fields
}

/// Whitespace-separated tokens starting with `#`.
pub fn hashtags(segment: &str) -> Vec<String> {
    segment
        .split_whitespace()
        .filter(|token| token.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Candidate titles separated by [`TITLE`].
pub fn split_titles(text: &str) -> Vec<String> {
    text.split(TITLE)
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .collect()
}

/// Comma-separated tags.
pub fn split_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn splits_ad_response() {
        let fields = split_sections(
            "Headline Text###PRIMARYTEXT###Body text###IMAGEPROMPT###A futuristic city###HASHTAGS###  #Ethical #AI",
            &[PRIMARY_TEXT, IMAGE_PROMPT, HASHTAGS],
        );
        assert_eq!(
            fields,
            vec!["Headline Text", "Body text", "A futuristic city", "#Ethical #AI"]
        );
        assert_eq!(hashtags(&fields[3]), vec!["#Ethical", "#AI"]);
    }

    #[test]
    fn missing_trailing_section_is_empty() {
        let fields = split_sections("Title###BODY###Body only", &[BODY, IMAGE_PROMPT, HASHTAGS]);
        assert_eq!(fields, vec!["Title", "Body only", "", ""]);

        let fields = split_sections("Just text", &[HASHTAGS]);
        assert_eq!(fields, vec!["Just text", ""]);
    }

    #[test]
    fn repeated_sentinel_discards_tail() {
        let fields = split_sections("Caption###HASHTAGS####a###HASHTAGS####b", &[HASHTAGS]);
        assert_eq!(fields, vec!["Caption", "#a"]);
    }

    #[test]
    fn splits_on_any_sentinel_and_pads() {
        let fields = split_on_any(
            "Caption###FB_IMAGE_PROMPT###A sunrise###FB_HASHTAGS####dawn",
            &[FB_IMAGE_PROMPT, FB_HASHTAGS, ARTICLE_TITLE, ARTICLE_BODY, ARTICLE_CTA],
            6,
        );
        assert_eq!(fields, vec!["Caption", "A sunrise", "#dawn", "", "", ""]);
    }

    #[test]
    fn hashtags_ignore_plain_words() {
        assert_eq!(hashtags(" #one two\n#three #"), vec!["#one", "#three", "#"]);
    }

    #[test]
    fn titles_and_tags() {
        assert_eq!(
            split_titles("First###TITLE### Second ###TITLE###\n"),
            vec!["First", "Second"]
        );
        assert_eq!(split_tags("seo, rust ,, web"), vec!["seo", "rust", "web"]);
    }

    #[test]
    fn parses_fenced_json() {
        let value: Value = parse_json("```json\n{\"a\": 1}\n```", "test").unwrap();
        assert_eq!(value, json!({"a": 1}));
        let value: Value = parse_json("```\n[1, 2]\n```", "test").unwrap();
        assert_eq!(value, json!([1, 2]));
        let value: Value = parse_json("  {\"a\": 2}  ", "test").unwrap();
        assert_eq!(value, json!({"a": 2}));
    }

    #[test]
    fn invalid_json_names_context() {
        let error = parse_json::<Value>("```json\n{not json\n```", "strategy plan").unwrap_err();
        assert!(matches!(error, StudioError::InvalidFormat { .. }));
        assert!(error.to_string().contains("strategy plan"));

        let error = parse_json::<Value>("nope", "voice dialog").unwrap_err();
        assert!(error.to_string().contains("voice dialog"));
    }
}
