//! Brand alignment review of generated content.

use super::{prompts, schemas};
use crate::{content::BrandAlignment, parse, StudioConfig, StudioError, StudioResult};
use genai_sdk::{Content, ContentRequest, ContentResponse};

pub const REVIEW_CONTEXT: &str = "brand alignment review";

/// Request scoring `text` against the configured brand guide.
pub fn build_review_request(text: &str, config: &StudioConfig) -> StudioResult<ContentRequest> {
    if text.trim().is_empty() {
        return Err(StudioError::validation(
            "There is no text to review for this content.",
        ));
    }
    Ok(
        ContentRequest::new(config.text_model.clone(), vec![Content::user_text(text)])
            .system_instruction(prompts::brand_review(&config.brand_context))
            .json_schema(schemas::brand_alignment()),
    )
}

pub fn parse_review(response: &ContentResponse) -> StudioResult<BrandAlignment> {
    let mut alignment: BrandAlignment = parse::parse_json(&response.text, REVIEW_CONTEXT)?;
    alignment.score = alignment.score.clamp(0.0, 100.0);
    Ok(alignment)
}

/// One-shot rewrite of a video prompt.
pub fn build_video_prompt_enhancement(
    prompt: &str,
    config: &StudioConfig,
) -> StudioResult<ContentRequest> {
    if prompt.trim().is_empty() {
        return Err(StudioError::validation("Please enter a video prompt to enhance."));
    }
    Ok(
        ContentRequest::new(config.text_model.clone(), vec![Content::user_text(prompt)])
            .system_instruction(prompts::VIDEO_PROMPT_ENHANCER),
    )
}

/// System instruction of a brand chat.
pub fn brand_chat_instruction(config: &StudioConfig) -> String {
    prompts::brand_chat(&config.brand_context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_not_reviewed() {
        let error = build_review_request("  ", &StudioConfig::default()).unwrap_err();
        assert!(matches!(error, StudioError::Validation(_)));
    }

    #[test]
    fn review_embeds_brand_guide() {
        let config = StudioConfig::builder().brand_context("Be kind.").build();
        let request = build_review_request("Hello", &config).unwrap();
        let system = request.config.system_instruction.unwrap();
        assert!(system.contains("<brand_guide>\nBe kind.\n</brand_guide>"));
        assert_eq!(
            request.config.response_mime_type.as_deref(),
            Some("application/json")
        );
    }

    #[test]
    fn parses_and_clamps_score() {
        let alignment = parse_review(&ContentResponse::from_text(
            r#"{"score": 140, "rationale": "Great", "suggestions": ["Shorter"]}"#,
        ))
        .unwrap();
        assert!((alignment.score - 100.0).abs() < f64::EPSILON);
        assert_eq!(alignment.suggestions, vec!["Shorter"]);
    }
}
