use crate::StudioError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Selects which generation flow applies to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Text,
    Guided,
    GroundedText,
    Video,
    Image,
    Analysis,
    Strategy,
    Ad,
    AllianceAd,
    VoiceDialog,
    CommentAnalysis,
    PagePerformance,
    GoogleBusinessPost,
    Blog,
    Prototype,
    MonetizedArticleCampaign,
    SeoBlogPost,
    BrandKit,
    EngagementBooster,
    AutomatedResponder,
    WhatsappAutoResponder,
    PostEngagementStrategist,
    EmailSubject,
    EmailBody,
    /// Long-running video rendering. Driven by a video job, not a strategy.
    VideoGeneration,
    /// Multi-turn chat. Driven by a chat session, not a strategy.
    BrandChat,
}

impl ContentType {
    pub const ALL: [Self; 26] = [
        Self::Text,
        Self::Guided,
        Self::GroundedText,
        Self::Video,
        Self::Image,
        Self::Analysis,
        Self::Strategy,
        Self::Ad,
        Self::AllianceAd,
        Self::VoiceDialog,
        Self::CommentAnalysis,
        Self::PagePerformance,
        Self::GoogleBusinessPost,
        Self::Blog,
        Self::Prototype,
        Self::MonetizedArticleCampaign,
        Self::SeoBlogPost,
        Self::BrandKit,
        Self::EngagementBooster,
        Self::AutomatedResponder,
        Self::WhatsappAutoResponder,
        Self::PostEngagementStrategist,
        Self::EmailSubject,
        Self::EmailBody,
        Self::VideoGeneration,
        Self::BrandChat,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Guided => "guided",
            Self::GroundedText => "grounded_text",
            Self::Video => "video",
            Self::Image => "image",
            Self::Analysis => "analysis",
            Self::Strategy => "strategy",
            Self::Ad => "ad",
            Self::AllianceAd => "alliance_ad",
            Self::VoiceDialog => "voice_dialog",
            Self::CommentAnalysis => "comment_analysis",
            Self::PagePerformance => "page_performance",
            Self::GoogleBusinessPost => "google_business_post",
            Self::Blog => "blog",
            Self::Prototype => "prototype",
            Self::MonetizedArticleCampaign => "monetized_article_campaign",
            Self::SeoBlogPost => "seo_blog_post",
            Self::BrandKit => "brand_kit",
            Self::EngagementBooster => "engagement_booster",
            Self::AutomatedResponder => "automated_responder",
            Self::WhatsappAutoResponder => "whatsapp_auto_responder",
            Self::PostEngagementStrategist => "post_engagement_strategist",
            Self::EmailSubject => "email_subject",
            Self::EmailBody => "email_body",
            Self::VideoGeneration => "video_generation",
            Self::BrandChat => "brand_chat",
        }
    }

    /// Whether requests of this type go through the strategy table.
    #[must_use]
    pub fn has_strategy(self) -> bool {
        !matches!(self, Self::VideoGeneration | Self::BrandChat)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|content_type| content_type.as_str() == s)
            .ok_or_else(|| StudioError::validation(format!("Unknown content type: {s}")))
    }
}

/// Flavor of a text post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    #[default]
    #[serde(rename = "Social Media")]
    SocialMedia,
    Accessibility,
    Marketing,
    /// Answer a question about an attached image.
    #[serde(rename = "Visual Q&A")]
    VisualQa,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_form_matches_serde_tag() {
        for content_type in ContentType::ALL {
            let value = serde_json::to_value(content_type).unwrap();
            assert_eq!(value, serde_json::json!(content_type.as_str()));
            assert_eq!(content_type.as_str().parse::<ContentType>().unwrap(), content_type);
        }
    }

    #[test]
    fn unknown_type_is_a_validation_error() {
        assert!(matches!(
            "gantt".parse::<ContentType>(),
            Err(StudioError::Validation(_))
        ));
    }
}
