//! Typed results of a generation, one variant per content type.

use crate::{input::SeoBlogInput, keystone::Ally, ContentType};
use genai_sdk::Source;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle of a sub-flow (image generation, brand review).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Verdict of a brand alignment review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandAlignment {
    /// 0 to 100.
    pub score: f64,
    pub rationale: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandReview {
    pub status: Status,
    pub alignment: Option<BrandAlignment>,
    pub error: Option<String>,
}

/// The image attached to image-bearing content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "data_url", rename_all = "snake_case")]
pub enum ImageSlot {
    #[default]
    Empty,
    /// A prompt is available and the image can be generated.
    PromptReady,
    /// Generated or attached image as a data URL.
    Ready(String),
}

impl ImageSlot {
    pub fn data_url(&self) -> Option<&str> {
        match self {
            Self::Ready(url) => Some(url),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SafetyAnalysis {
    pub is_safe: bool,
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VqaResult {
    pub question: String,
    pub answer: String,
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextPost {
    pub caption: String,
    pub hashtags: Vec<String>,
    /// Attached input image as a data URL.
    pub image: Option<String>,
    pub safety_analysis: SafetyAnalysis,
    pub vqa_result: Option<VqaResult>,
    pub review: BrandReview,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidedPost {
    pub content: String,
    pub hashtags: Vec<String>,
    pub monetization_feature: String,
    pub review: BrandReview,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundedPost {
    pub content: String,
    pub hashtags: Vec<String>,
    pub sources: Vec<Source>,
    pub review: BrandReview,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoScript {
    pub title: String,
    pub message: String,
    pub hashtags: Vec<String>,
    pub review: BrandReview,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePost {
    pub caption: String,
    pub hashtags: Vec<String>,
    pub image_prompt: String,
    pub image: ImageSlot,
    pub review: BrandReview,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisPost {
    pub content: String,
    pub hashtags: Vec<String>,
    pub source_url: String,
    pub sources: Vec<Source>,
    pub review: BrandReview,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyPlan {
    /// The plan as returned by the model.
    pub strategy: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdCreative {
    pub headline: String,
    pub primary_text: String,
    pub call_to_action: String,
    pub hashtags: Vec<String>,
    pub image_prompt: String,
    pub image: ImageSlot,
    pub review: BrandReview,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllianceAd {
    pub headline: String,
    pub primary_text: String,
    pub call_to_action: String,
    pub hashtags: Vec<String>,
    pub image_prompt: String,
    pub image: ImageSlot,
    pub ally: Option<Ally>,
    pub keystone: String,
    pub review: BrandReview,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogLine {
    pub speaker: String,
    pub line: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceDialog {
    pub dialog_type: String,
    pub scenario: String,
    pub dialog: Vec<DialogLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentInsights {
    pub overall_sentiment: String,
    pub sentiment_score: f64,
    pub key_themes: Vec<String>,
    pub frequent_questions: Vec<String>,
    pub actionable_insights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentAnalysis {
    pub analysis: CommentInsights,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageInsights {
    pub strategic_summary: String,
    pub recommendations: Vec<String>,
    pub top_post_insight: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagePerformance {
    pub analysis: PageInsights,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleBusinessPost {
    pub business_name: String,
    pub post_content: String,
    pub call_to_action: String,
    pub image_prompt: String,
    pub image: ImageSlot,
    pub review: BrandReview,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogPost {
    pub title: String,
    pub body: String,
    pub hashtags: Vec<String>,
    pub image_prompt: String,
    pub image: ImageSlot,
    pub review: BrandReview,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmpArticle {
    pub title: String,
    pub amp_body: String,
    pub cta_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmpPrototype {
    pub article: AmpArticle,
    pub review: BrandReview,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignPost {
    pub caption: String,
    pub hashtags: Vec<String>,
    pub image_prompt: String,
    pub image: ImageSlot,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonetizedCampaign {
    pub fb_post: CampaignPost,
    pub amp_article: AmpArticle,
    pub review: BrandReview,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeoStage {
    #[default]
    Titles,
    Article,
}

/// A two-stage SEO article. Stage `titles` offers candidate titles; stage
/// `article` holds the article written for the selected one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoBlogPost {
    pub stage: SeoStage,
    pub user_input: SeoBlogInput,
    pub titles: Vec<String>,
    pub sources: Vec<Source>,
    pub selected_title: Option<String>,
    pub meta_description: String,
    pub tags: Vec<String>,
    pub body: String,
    pub review: BrandReview,
}

impl SeoBlogPost {
    /// Move to the `article` stage using a freshly generated article,
    /// keeping this post's titles and sources.
    pub fn advance(&mut self, article: Self) {
        self.stage = SeoStage::Article;
        self.selected_title = article.selected_title;
        self.meta_description = article.meta_description;
        self.tags = article.tags;
        self.body = article.body;
        self.review = BrandReview::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrandVoiceProfile {
    pub brand_summary: String,
    pub core_keywords: Vec<String>,
    pub persona_in_a_nutshell: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandKit {
    pub analysis: BrandVoiceProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EngagementBoost {
    Hooks { topic: String, hooks: Vec<String> },
    Rewrite { original: String, rewritten: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementBooster {
    pub boost: EngagementBoost,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickReply {
    pub label: String,
    pub response: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponderFlow {
    pub welcome_message: String,
    pub quick_replies: Vec<QuickReply>,
    pub fallback_message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomatedResponder {
    pub flow: ResponderFlow,
    pub review: BrandReview,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonQuestion {
    pub question_pattern: String,
    pub response: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhatsAppFlow {
    pub system_prompt: String,
    pub welcome_message: String,
    pub common_questions: Vec<CommonQuestion>,
    pub fallback_message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhatsAppResponder {
    pub flow: WhatsAppFlow,
    pub review: BrandReview,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedComment {
    pub username: String,
    pub comment: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestedReply {
    #[serde(rename = "type")]
    pub kind: String,
    pub reply: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoostStrategy {
    pub recommendation: String,
    pub simulated_outcome: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngagementStrategy {
    pub simulated_comments: Vec<SimulatedComment>,
    pub suggested_replies: Vec<SuggestedReply>,
    pub boost_strategy: BoostStrategy,
    pub follow_up_post_idea: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostEngagementPlan {
    pub base_post: TextPost,
    pub engagement_strategy: EngagementStrategy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailSubject {
    pub subject: String,
    pub review: BrandReview,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailBody {
    pub html_body: String,
    pub review: BrandReview,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    #[default]
    PromptReady,
    Generating,
    Polling,
    Success,
    Error,
}

/// A rendered (or rendering) video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedVideo {
    pub prompt: String,
    pub input_image: Option<String>,
    pub status: VideoStatus,
    pub status_message: String,
    pub progress: f64,
    pub operation_name: Option<String>,
    pub video_url: Option<String>,
}

/// One generated result. The `type` tag always equals
/// [`content_type`](Self::content_type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneratedContent {
    Text(TextPost),
    Guided(GuidedPost),
    GroundedText(GroundedPost),
    Video(VideoScript),
    Image(ImagePost),
    Analysis(AnalysisPost),
    Strategy(StrategyPlan),
    Ad(AdCreative),
    AllianceAd(AllianceAd),
    VoiceDialog(VoiceDialog),
    CommentAnalysis(CommentAnalysis),
    PagePerformance(PagePerformance),
    GoogleBusinessPost(GoogleBusinessPost),
    Blog(BlogPost),
    Prototype(AmpPrototype),
    MonetizedArticleCampaign(MonetizedCampaign),
    SeoBlogPost(SeoBlogPost),
    BrandKit(BrandKit),
    EngagementBooster(EngagementBooster),
    AutomatedResponder(AutomatedResponder),
    WhatsappAutoResponder(WhatsAppResponder),
    PostEngagementStrategist(PostEngagementPlan),
    EmailSubject(EmailSubject),
    EmailBody(EmailBody),
    VideoGeneration(GeneratedVideo),
}

impl GeneratedContent {
    pub fn content_type(&self) -> ContentType {
        match self {
            Self::Text(_) => ContentType::Text,
            Self::Guided(_) => ContentType::Guided,
            Self::GroundedText(_) => ContentType::GroundedText,
            Self::Video(_) => ContentType::Video,
            Self::Image(_) => ContentType::Image,
            Self::Analysis(_) => ContentType::Analysis,
            Self::Strategy(_) => ContentType::Strategy,
            Self::Ad(_) => ContentType::Ad,
            Self::AllianceAd(_) => ContentType::AllianceAd,
            Self::VoiceDialog(_) => ContentType::VoiceDialog,
            Self::CommentAnalysis(_) => ContentType::CommentAnalysis,
            Self::PagePerformance(_) => ContentType::PagePerformance,
            Self::GoogleBusinessPost(_) => ContentType::GoogleBusinessPost,
            Self::Blog(_) => ContentType::Blog,
            Self::Prototype(_) => ContentType::Prototype,
            Self::MonetizedArticleCampaign(_) => ContentType::MonetizedArticleCampaign,
            Self::SeoBlogPost(_) => ContentType::SeoBlogPost,
            Self::BrandKit(_) => ContentType::BrandKit,
            Self::EngagementBooster(_) => ContentType::EngagementBooster,
            Self::AutomatedResponder(_) => ContentType::AutomatedResponder,
            Self::WhatsappAutoResponder(_) => ContentType::WhatsappAutoResponder,
            Self::PostEngagementStrategist(_) => ContentType::PostEngagementStrategist,
            Self::EmailSubject(_) => ContentType::EmailSubject,
            Self::EmailBody(_) => ContentType::EmailBody,
            Self::VideoGeneration(_) => ContentType::VideoGeneration,
        }
    }

    /// The brand review slot, for content that can be reviewed.
    pub fn review(&self) -> Option<&BrandReview> {
        match self {
            Self::Text(post) => Some(&post.review),
            Self::Guided(post) => Some(&post.review),
            Self::GroundedText(post) => Some(&post.review),
            Self::Video(script) => Some(&script.review),
            Self::Image(post) => Some(&post.review),
            Self::Analysis(post) => Some(&post.review),
            Self::Ad(ad) => Some(&ad.review),
            Self::AllianceAd(ad) => Some(&ad.review),
            Self::GoogleBusinessPost(post) => Some(&post.review),
            Self::Blog(post) => Some(&post.review),
            Self::Prototype(prototype) => Some(&prototype.review),
            Self::MonetizedArticleCampaign(campaign) => Some(&campaign.review),
            Self::SeoBlogPost(post) => Some(&post.review),
            Self::AutomatedResponder(responder) => Some(&responder.review),
            Self::WhatsappAutoResponder(responder) => Some(&responder.review),
            Self::EmailSubject(email) => Some(&email.review),
            Self::EmailBody(email) => Some(&email.review),
            _ => None,
        }
    }

    pub fn review_mut(&mut self) -> Option<&mut BrandReview> {
        match self {
            Self::Text(post) => Some(&mut post.review),
            Self::Guided(post) => Some(&mut post.review),
            Self::GroundedText(post) => Some(&mut post.review),
            Self::Video(script) => Some(&mut script.review),
            Self::Image(post) => Some(&mut post.review),
            Self::Analysis(post) => Some(&mut post.review),
            Self::Ad(ad) => Some(&mut ad.review),
            Self::AllianceAd(ad) => Some(&mut ad.review),
            Self::GoogleBusinessPost(post) => Some(&mut post.review),
            Self::Blog(post) => Some(&mut post.review),
            Self::Prototype(prototype) => Some(&mut prototype.review),
            Self::MonetizedArticleCampaign(campaign) => Some(&mut campaign.review),
            Self::SeoBlogPost(post) => Some(&mut post.review),
            Self::AutomatedResponder(responder) => Some(&mut responder.review),
            Self::WhatsappAutoResponder(responder) => Some(&mut responder.review),
            Self::EmailSubject(email) => Some(&mut email.review),
            Self::EmailBody(email) => Some(&mut email.review),
            _ => None,
        }
    }

    /// The editable image prompt and image slot of image-bearing content.
    pub fn image_parts_mut(&mut self) -> Option<(&mut String, &mut ImageSlot)> {
        match self {
            Self::Image(post) => Some((&mut post.image_prompt, &mut post.image)),
            Self::Ad(ad) => Some((&mut ad.image_prompt, &mut ad.image)),
            Self::AllianceAd(ad) => Some((&mut ad.image_prompt, &mut ad.image)),
            Self::GoogleBusinessPost(post) => Some((&mut post.image_prompt, &mut post.image)),
            Self::Blog(post) => Some((&mut post.image_prompt, &mut post.image)),
            Self::MonetizedArticleCampaign(campaign) => Some((
                &mut campaign.fb_post.image_prompt,
                &mut campaign.fb_post.image,
            )),
            _ => None,
        }
    }

    pub fn image_prompt(&self) -> Option<&str> {
        match self {
            Self::Image(post) => Some(&post.image_prompt),
            Self::Ad(ad) => Some(&ad.image_prompt),
            Self::AllianceAd(ad) => Some(&ad.image_prompt),
            Self::GoogleBusinessPost(post) => Some(&post.image_prompt),
            Self::Blog(post) => Some(&post.image_prompt),
            Self::MonetizedArticleCampaign(campaign) => Some(&campaign.fb_post.image_prompt),
            _ => None,
        }
    }

    pub fn image(&self) -> Option<&ImageSlot> {
        match self {
            Self::Image(post) => Some(&post.image),
            Self::Ad(ad) => Some(&ad.image),
            Self::AllianceAd(ad) => Some(&ad.image),
            Self::GoogleBusinessPost(post) => Some(&post.image),
            Self::Blog(post) => Some(&post.image),
            Self::MonetizedArticleCampaign(campaign) => Some(&campaign.fb_post.image),
            _ => None,
        }
    }

    /// Plain-text projection used for brand review and history previews.
    /// Empty when the content has nothing reviewable.
    pub fn review_text(&self) -> String {
        match self {
            Self::Text(post) => match &post.vqa_result {
                Some(vqa) => format!("{}\n\n{}", vqa.question, vqa.answer),
                None => post.caption.clone(),
            },
            Self::Guided(post) => post.content.clone(),
            Self::GroundedText(post) => post.content.clone(),
            Self::Analysis(post) => post.content.clone(),
            Self::Video(script) => format!("{}\n\n{}", script.title, script.message),
            Self::Image(post) => post.caption.clone(),
            Self::Ad(ad) => format!("Headline: {}\n\n{}", ad.headline, ad.primary_text),
            Self::AllianceAd(ad) => format!("Headline: {}\n\n{}", ad.headline, ad.primary_text),
            Self::GoogleBusinessPost(post) => post.post_content.clone(),
            Self::Blog(post) => format!("Title: {}\n\n{}", post.title, post.body),
            Self::Prototype(prototype) => format!(
                "Title: {}\n\n{}",
                prototype.article.title, prototype.article.amp_body
            ),
            Self::MonetizedArticleCampaign(campaign) => format!(
                "Facebook Post: {}\n\nArticle: {}\n{}",
                campaign.fb_post.caption, campaign.amp_article.title, campaign.amp_article.amp_body
            ),
            Self::SeoBlogPost(post) => match (&post.stage, &post.selected_title) {
                (SeoStage::Article, Some(title)) => format!("Title: {title}\n\n{}", post.body),
                _ => String::new(),
            },
            Self::AutomatedResponder(responder) => {
                let flow = &responder.flow;
                let mut text = format!(
                    "Welcome: {}\nFallback: {}\n",
                    flow.welcome_message, flow.fallback_message
                );
                for reply in &flow.quick_replies {
                    text.push_str(&format!("Reply for \"{}\": {}\n", reply.label, reply.response));
                }
                text
            }
            Self::WhatsappAutoResponder(responder) => {
                let flow = &responder.flow;
                let mut text = format!(
                    "Welcome: {}\nFallback: {}\n",
                    flow.welcome_message, flow.fallback_message
                );
                for question in &flow.common_questions {
                    text.push_str(&format!(
                        "Reply for \"{}\": {}\n",
                        question.question_pattern, question.response
                    ));
                }
                text
            }
            Self::EmailSubject(email) => email.subject.clone(),
            Self::EmailBody(email) => email.html_body.clone(),
            Self::Strategy(_)
            | Self::VoiceDialog(_)
            | Self::CommentAnalysis(_)
            | Self::PagePerformance(_)
            | Self::BrandKit(_)
            | Self::EngagementBooster(_)
            | Self::PostEngagementStrategist(_)
            | Self::VideoGeneration(_) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_type_tag() {
        let content = GeneratedContent::Text(TextPost {
            caption: "The future is bright".to_string(),
            hashtags: vec!["#AI".to_string()],
            ..TextPost::default()
        });
        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(value["type"], json!("text"));
        assert_eq!(value["caption"], json!("The future is bright"));

        let back: GeneratedContent = serde_json::from_value(value).unwrap();
        assert_eq!(back, content);
    }

    #[test]
    fn image_slot_serializes_adjacently() {
        let slot = ImageSlot::Ready("data:image/jpeg;base64,AA==".to_string());
        assert_eq!(
            serde_json::to_value(&slot).unwrap(),
            json!({"state": "ready", "data_url": "data:image/jpeg;base64,AA=="})
        );
        assert_eq!(
            serde_json::to_value(ImageSlot::PromptReady).unwrap(),
            json!({"state": "prompt_ready"})
        );
    }

    #[test]
    fn visual_answers_are_reviewed_as_question_and_answer() {
        let content = GeneratedContent::Text(TextPost {
            caption: "Unused".to_string(),
            vqa_result: Some(VqaResult {
                question: "What is on the desk?".to_string(),
                answer: "A laptop.".to_string(),
                reasoning: String::new(),
            }),
            ..TextPost::default()
        });
        assert_eq!(content.review_text(), "What is on the desk?\n\nA laptop.");
    }

    #[test]
    fn seo_review_text_only_for_articles() {
        let mut post = SeoBlogPost {
            titles: vec!["A".to_string(), "B".to_string()],
            body: "Body".to_string(),
            ..SeoBlogPost::default()
        };
        assert_eq!(GeneratedContent::SeoBlogPost(post.clone()).review_text(), "");

        post.advance(SeoBlogPost {
            selected_title: Some("B".to_string()),
            body: "Article body".to_string(),
            ..SeoBlogPost::default()
        });
        assert_eq!(post.stage, SeoStage::Article);
        assert_eq!(post.titles, vec!["A", "B"]);
        assert_eq!(
            GeneratedContent::SeoBlogPost(post).review_text(),
            "Title: B\n\nArticle body"
        );
    }

    #[test]
    fn responder_review_text_lists_replies() {
        let content = GeneratedContent::AutomatedResponder(AutomatedResponder {
            flow: ResponderFlow {
                welcome_message: "Hi!".to_string(),
                quick_replies: vec![QuickReply {
                    label: "Pricing".to_string(),
                    response: "From $5".to_string(),
                }],
                fallback_message: "A human will reply soon.".to_string(),
            },
            review: BrandReview::default(),
        });
        assert_eq!(
            content.review_text(),
            "Welcome: Hi!\nFallback: A human will reply soon.\nReply for \"Pricing\": From $5\n"
        );
    }
}
