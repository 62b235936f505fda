//! The generation strategy table: one entry per strategy-backed content
//! type, each a pair of pure functions building the request and parsing the
//! response.

mod ads;
mod articles;
mod insights;
mod messaging;
mod prompts;
pub mod review;
mod schemas;
mod social;

pub use insights::{AudienceSnapshot, DailyMetric, PageSummary, PageTotals, TopPost};

use crate::{parse, ContentType, GeneratedContent, GenerationInput, StudioConfig, StudioError, StudioResult};
use genai_sdk::{Content, ContentRequest, ContentResponse, InputPart};

/// Build the request for an input. Pure: validation failures surface here,
/// before any network call.
pub type BuildParams = fn(&GenerationInput, &StudioConfig) -> StudioResult<ContentRequest>;

/// Turn a model response into typed content.
pub type ParseResponse =
    fn(&ContentResponse, &GenerationInput, &StudioConfig) -> StudioResult<GeneratedContent>;

/// Project content to plain text for brand review.
pub type ExtractReviewText = fn(&GeneratedContent) -> String;

pub struct GenerationStrategy {
    pub content_type: ContentType,
    pub build_params: BuildParams,
    pub parse_response: ParseResponse,
    /// Always generate a single result regardless of the requested count.
    pub disable_variations: bool,
    /// Present for content that supports brand review.
    pub extract_text_for_review: Option<ExtractReviewText>,
}

impl GenerationStrategy {
    /// Number of concurrent generations to run for `requested` variations.
    pub fn variation_count(&self, requested: usize, max: usize) -> usize {
        if self.disable_variations {
            1
        } else {
            requested.clamp(1, max.max(1))
        }
    }
}

impl std::fmt::Debug for GenerationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationStrategy")
            .field("content_type", &self.content_type)
            .field("disable_variations", &self.disable_variations)
            .field("reviewable", &self.extract_text_for_review.is_some())
            .finish_non_exhaustive()
    }
}

/// Look up the strategy for `content_type`. Flows driven outside the table
/// (video generation, brand chat) are [`StudioError::Unsupported`].
pub fn strategy_for(content_type: ContentType) -> StudioResult<&'static GenerationStrategy> {
    let strategy = match content_type {
        ContentType::Text => &social::TEXT,
        ContentType::Guided => &social::GUIDED,
        ContentType::GroundedText => &social::GROUNDED_TEXT,
        ContentType::Video => &social::VIDEO,
        ContentType::Image => &social::IMAGE,
        ContentType::Analysis => &social::ANALYSIS,
        ContentType::EngagementBooster => &social::ENGAGEMENT_BOOSTER,
        ContentType::PostEngagementStrategist => &social::POST_ENGAGEMENT_STRATEGIST,
        ContentType::Ad => &ads::AD,
        ContentType::AllianceAd => &ads::ALLIANCE_AD,
        ContentType::GoogleBusinessPost => &ads::GOOGLE_BUSINESS_POST,
        ContentType::Blog => &articles::BLOG,
        ContentType::Prototype => &articles::PROTOTYPE,
        ContentType::MonetizedArticleCampaign => &articles::MONETIZED_ARTICLE_CAMPAIGN,
        ContentType::SeoBlogPost => &articles::SEO_BLOG_POST,
        ContentType::EmailSubject => &articles::EMAIL_SUBJECT,
        ContentType::EmailBody => &articles::EMAIL_BODY,
        ContentType::Strategy => &insights::STRATEGY,
        ContentType::VoiceDialog => &insights::VOICE_DIALOG,
        ContentType::CommentAnalysis => &insights::COMMENT_ANALYSIS,
        ContentType::PagePerformance => &insights::PAGE_PERFORMANCE,
        ContentType::BrandKit => &insights::BRAND_KIT,
        ContentType::AutomatedResponder => &messaging::AUTOMATED_RESPONDER,
        ContentType::WhatsappAutoResponder => &messaging::WHATSAPP_AUTO_RESPONDER,
        ContentType::VideoGeneration | ContentType::BrandChat => {
            return Err(StudioError::Unsupported(content_type));
        }
    };
    Ok(strategy)
}

/// A single-turn text request with the shared model and temperature.
fn text_request(
    input: &GenerationInput,
    config: &StudioConfig,
    system_instruction: String,
    prompt: String,
) -> ContentRequest {
    request(input, config, system_instruction, vec![InputPart::text(prompt)])
}

fn request(
    input: &GenerationInput,
    config: &StudioConfig,
    system_instruction: String,
    parts: Vec<InputPart>,
) -> ContentRequest {
    ContentRequest::new(config.text_model.clone(), vec![Content::user(parts)])
        .system_instruction(system_instruction)
        .temperature(input.temperature)
}

fn require(value: &str, message: &str) -> StudioResult<()> {
    if value.trim().is_empty() {
        Err(StudioError::validation(message))
    } else {
        Ok(())
    }
}

/// [`parse::split_sections`] into a fixed-size array.
fn sections<const N: usize>(text: &str, sentinels: &[&str]) -> [String; N] {
    let mut fields = parse::split_sections(text, sentinels).into_iter();
    std::array::from_fn(|_| fields.next().unwrap_or_default())
}

fn with_auto_link(prompt: String, input: &GenerationInput) -> String {
    if input.auto_link_keywords {
        format!("{prompt}\n\n{}", prompts::AUTO_LINK_INSTRUCTION)
    } else {
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_strategy_type_has_an_entry() {
        for content_type in ContentType::ALL {
            match strategy_for(content_type) {
                Ok(strategy) => assert_eq!(strategy.content_type, content_type),
                Err(StudioError::Unsupported(unsupported)) => {
                    assert!(!content_type.has_strategy());
                    assert_eq!(unsupported, content_type);
                }
                Err(error) => panic!("unexpected error for {content_type}: {error}"),
            }
        }
    }

    #[test]
    fn variation_count_is_clamped() {
        let text = strategy_for(ContentType::Text).unwrap();
        assert_eq!(text.variation_count(0, 4), 1);
        assert_eq!(text.variation_count(3, 4), 3);
        assert_eq!(text.variation_count(9, 4), 4);

        let seo = strategy_for(ContentType::SeoBlogPost).unwrap();
        assert_eq!(seo.variation_count(4, 4), 1);
    }
}
