use crate::{ContentType, TaskType};
use genai_sdk::InlineData;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidedPostInput {
    pub monetization_feature: String,
    pub target_audience: String,
    pub key_tip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdCreativeInput {
    pub product_or_service: String,
    pub target_audience: String,
    pub call_to_action: String,
    pub required_keywords: String,
    pub banned_words: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllianceAdInput {
    pub keystone: String,
    pub core_message: String,
    pub target_audience: String,
    pub call_to_action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceDialogInput {
    pub dialog_type: String,
    pub scenario: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleBusinessPostInput {
    pub business_name: String,
    pub post_goal: String,
    pub key_info: String,
    pub call_to_action: String,
}

/// Inputs shared by the AMP prototype and the monetized article campaign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleInput {
    pub product_or_service: String,
    pub article_goal: String,
    pub target_audience: String,
    pub key_points: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoBlogInput {
    pub topic: String,
    pub keyword: String,
    pub audience: String,
    pub tone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandVoiceInput {
    pub mission_statement: String,
    pub core_values: String,
    pub target_audience_persona: String,
    pub brand_voice_tone: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementMode {
    #[default]
    Hooks,
    Rewrite,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementBoosterInput {
    pub mode: EngagementMode,
    pub topic: String,
    pub text_to_rewrite: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatedResponderInput {
    pub goal: String,
    pub platform: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsAppResponderInput {
    pub goal: String,
    pub business_info: String,
    pub tone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSubjectInput {
    pub campaign_type: String,
    pub key_info: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailBodyInput {
    pub campaign_type: String,
    pub target_audience: String,
    pub key_points: String,
    pub tone: String,
}

/// Everything a strategy may read when building a request.
///
/// Only the fields relevant to `content_type` are consulted; the rest keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationInput {
    pub content_type: ContentType,
    pub topic: String,
    pub url: String,
    pub task: TaskType,
    pub input_image: Option<InlineData>,
    pub comments_text: String,
    pub num_variations: usize,
    pub temperature: f64,
    pub auto_link_keywords: bool,
    /// Set for the second SEO stage.
    pub selected_title: Option<String>,
    pub guided: GuidedPostInput,
    pub ad: AdCreativeInput,
    pub alliance_ad: AllianceAdInput,
    pub voice_dialog: VoiceDialogInput,
    pub google_business_post: GoogleBusinessPostInput,
    pub article: ArticleInput,
    pub seo_blog: SeoBlogInput,
    pub brand_voice: BrandVoiceInput,
    pub engagement_booster: EngagementBoosterInput,
    pub automated_responder: AutomatedResponderInput,
    pub whatsapp_responder: WhatsAppResponderInput,
    pub email_subject: EmailSubjectInput,
    pub email_body: EmailBodyInput,
}

impl Default for GenerationInput {
    fn default() -> Self {
        Self::new(ContentType::Text)
    }
}

impl GenerationInput {
    /// Creates an input for `content_type` with the defaults:
    /// - `task`: Social Media
    /// - `num_variations`: 1
    /// - `temperature`: 0.7
    /// - `auto_link_keywords`: false
    pub fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            topic: String::new(),
            url: String::new(),
            task: TaskType::default(),
            input_image: None,
            comments_text: String::new(),
            num_variations: 1,
            temperature: 0.7,
            auto_link_keywords: false,
            selected_title: None,
            guided: GuidedPostInput::default(),
            ad: AdCreativeInput::default(),
            alliance_ad: AllianceAdInput::default(),
            voice_dialog: VoiceDialogInput::default(),
            google_business_post: GoogleBusinessPostInput::default(),
            article: ArticleInput::default(),
            seo_blog: SeoBlogInput::default(),
            brand_voice: BrandVoiceInput::default(),
            engagement_booster: EngagementBoosterInput::default(),
            automated_responder: AutomatedResponderInput::default(),
            whatsapp_responder: WhatsAppResponderInput::default(),
            email_subject: EmailSubjectInput::default(),
            email_body: EmailBodyInput::default(),
        }
    }

    #[must_use]
    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    #[must_use]
    pub fn task(mut self, task: TaskType) -> Self {
        self.task = task;
        self
    }

    #[must_use]
    pub fn image(mut self, image: InlineData) -> Self {
        self.input_image = Some(image);
        self
    }

    #[must_use]
    pub fn comments(mut self, comments: impl Into<String>) -> Self {
        self.comments_text = comments.into();
        self
    }

    #[must_use]
    pub fn variations(mut self, count: usize) -> Self {
        self.num_variations = count;
        self
    }

    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn auto_link_keywords(mut self, enabled: bool) -> Self {
        self.auto_link_keywords = enabled;
        self
    }

    #[must_use]
    pub fn selected_title(mut self, title: impl Into<String>) -> Self {
        self.selected_title = Some(title.into());
        self
    }

    #[must_use]
    pub fn guided(mut self, guided: GuidedPostInput) -> Self {
        self.guided = guided;
        self
    }

    #[must_use]
    pub fn ad(mut self, ad: AdCreativeInput) -> Self {
        self.ad = ad;
        self
    }

    #[must_use]
    pub fn alliance_ad(mut self, alliance_ad: AllianceAdInput) -> Self {
        self.alliance_ad = alliance_ad;
        self
    }

    #[must_use]
    pub fn voice_dialog(mut self, voice_dialog: VoiceDialogInput) -> Self {
        self.voice_dialog = voice_dialog;
        self
    }

    #[must_use]
    pub fn google_business_post(mut self, post: GoogleBusinessPostInput) -> Self {
        self.google_business_post = post;
        self
    }

    #[must_use]
    pub fn article(mut self, article: ArticleInput) -> Self {
        self.article = article;
        self
    }

    #[must_use]
    pub fn seo_blog(mut self, seo_blog: SeoBlogInput) -> Self {
        self.seo_blog = seo_blog;
        self
    }

    #[must_use]
    pub fn brand_voice(mut self, brand_voice: BrandVoiceInput) -> Self {
        self.brand_voice = brand_voice;
        self
    }

    #[must_use]
    pub fn engagement_booster(mut self, booster: EngagementBoosterInput) -> Self {
        self.engagement_booster = booster;
        self
    }

    #[must_use]
    pub fn automated_responder(mut self, responder: AutomatedResponderInput) -> Self {
        self.automated_responder = responder;
        self
    }

    #[must_use]
    pub fn whatsapp_responder(mut self, responder: WhatsAppResponderInput) -> Self {
        self.whatsapp_responder = responder;
        self
    }

    #[must_use]
    pub fn email_subject(mut self, email: EmailSubjectInput) -> Self {
        self.email_subject = email;
        self
    }

    #[must_use]
    pub fn email_body(mut self, email: EmailBodyInput) -> Self {
        self.email_body = email;
        self
    }

    /// The user-facing prompt recorded in history.
    pub fn prompt_summary(&self) -> String {
        let summary = match self.content_type {
            ContentType::Guided => &self.guided.monetization_feature,
            ContentType::Ad => &self.ad.product_or_service,
            ContentType::AllianceAd => &self.alliance_ad.core_message,
            ContentType::VoiceDialog => &self.voice_dialog.scenario,
            ContentType::CommentAnalysis => &self.comments_text,
            ContentType::GoogleBusinessPost => &self.google_business_post.business_name,
            ContentType::Prototype | ContentType::MonetizedArticleCampaign => {
                &self.article.product_or_service
            }
            ContentType::SeoBlogPost => match &self.selected_title {
                Some(title) => title,
                None => &self.seo_blog.topic,
            },
            ContentType::BrandKit => &self.brand_voice.mission_statement,
            ContentType::EngagementBooster => match self.engagement_booster.mode {
                EngagementMode::Hooks => &self.engagement_booster.topic,
                EngagementMode::Rewrite => &self.engagement_booster.text_to_rewrite,
            },
            ContentType::AutomatedResponder => &self.automated_responder.goal,
            ContentType::WhatsappAutoResponder => &self.whatsapp_responder.goal,
            ContentType::EmailSubject => &self.email_subject.campaign_type,
            ContentType::EmailBody => &self.email_body.campaign_type,
            ContentType::Strategy => return "Content strategy plan".to_string(),
            ContentType::PagePerformance => return "Page performance analysis".to_string(),
            _ => &self.topic,
        };
        summary.trim().to_string()
    }
}
