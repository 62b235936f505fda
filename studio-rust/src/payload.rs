//! JSON handed to the publishing automation webhook. Delivery is left to
//! the caller.

use crate::content::{DialogLine, GeneratedContent, ImageSlot};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub caption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<String>>,
    /// Image bytes, base64 without the data URL prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// RFC 3339 UTC timestamp with milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy_data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_dialog: Option<Vec<DialogLine>>,
    pub post_type_identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gmb_post_details: Option<BusinessPostDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amp_article_details: Option<AmpArticleDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_blog_details: Option<SeoBlogDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_details: Option<EmailDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessPostDetails {
    pub business_name: String,
    pub call_to_action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmpArticleDetails {
    pub title: String,
    pub amp_body: String,
    pub cta_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoBlogDetails {
    pub title: String,
    pub meta_description: String,
    pub tags: Vec<String>,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,
}

impl WebhookPayload {
    pub fn from_content(content: &GeneratedContent, schedule: Option<DateTime<Utc>>) -> Self {
        let mut payload = Self {
            post_type_identifier: content.content_type().as_str().to_string(),
            schedule_time: schedule.map(|time| time.to_rfc3339_opts(SecondsFormat::Millis, true)),
            ..Self::default()
        };

        match content {
            GeneratedContent::Text(post) => {
                payload.caption = post.caption.clone();
                payload.hashtags = Some(post.hashtags.clone());
                payload.image_base64 = post.image.as_deref().and_then(base64_of);
            }
            GeneratedContent::Guided(post) => {
                payload.caption = post.content.clone();
                payload.hashtags = Some(post.hashtags.clone());
            }
            GeneratedContent::GroundedText(post) => {
                payload.caption = post.content.clone();
                payload.hashtags = Some(post.hashtags.clone());
            }
            GeneratedContent::Analysis(post) => {
                payload.caption = post.content.clone();
                payload.hashtags = Some(post.hashtags.clone());
            }
            GeneratedContent::Video(script) => {
                payload.caption = format!("{}\n\n{}", script.title, script.message);
                payload.hashtags = Some(script.hashtags.clone());
            }
            GeneratedContent::Image(post) => {
                payload.caption = post.caption.clone();
                payload.hashtags = Some(post.hashtags.clone());
                payload.image_base64 = slot_base64(&post.image);
            }
            GeneratedContent::Strategy(plan) => {
                payload.caption = "AI-Generated Content Strategy Plan".to_string();
                payload.strategy_data = Some(plan.strategy.clone());
            }
            GeneratedContent::VideoGeneration(video) => {
                payload.caption = format!("Video generated with prompt: \"{}\"", video.prompt);
                payload.video_url = video.video_url.clone();
            }
            GeneratedContent::VoiceDialog(dialog) => {
                payload.caption = format!(
                    "Voice Dialog for \"{}\": {}",
                    dialog.dialog_type, dialog.scenario
                );
                payload.voice_dialog = Some(dialog.dialog.clone());
            }
            GeneratedContent::Ad(ad) => {
                payload.caption = format!("{}\n\n{}", ad.headline, ad.primary_text);
                payload.hashtags = Some(ad.hashtags.clone());
                payload.image_base64 = slot_base64(&ad.image);
            }
            GeneratedContent::AllianceAd(ad) => {
                payload.caption = format!("{}\n\n{}", ad.headline, ad.primary_text);
                payload.hashtags = Some(ad.hashtags.clone());
                payload.image_base64 = slot_base64(&ad.image);
            }
            GeneratedContent::GoogleBusinessPost(post) => {
                payload.caption = post.post_content.clone();
                payload.image_base64 = slot_base64(&post.image);
                payload.gmb_post_details = Some(BusinessPostDetails {
                    business_name: post.business_name.clone(),
                    call_to_action: post.call_to_action.clone(),
                });
            }
            GeneratedContent::Blog(post) => {
                payload.caption = format!("{}\n\n{}", post.title, post.body);
                payload.hashtags = Some(post.hashtags.clone());
                payload.image_base64 = slot_base64(&post.image);
            }
            GeneratedContent::Prototype(prototype) => {
                payload.caption = prototype.article.title.clone();
                payload.amp_article_details = Some(AmpArticleDetails {
                    title: prototype.article.title.clone(),
                    amp_body: prototype.article.amp_body.clone(),
                    cta_text: prototype.article.cta_text.clone(),
                });
            }
            GeneratedContent::MonetizedArticleCampaign(campaign) => {
                payload.caption = campaign.fb_post.caption.clone();
                payload.hashtags = Some(campaign.fb_post.hashtags.clone());
                payload.image_base64 = slot_base64(&campaign.fb_post.image);
                payload.amp_article_details = Some(AmpArticleDetails {
                    title: campaign.amp_article.title.clone(),
                    amp_body: campaign.amp_article.amp_body.clone(),
                    cta_text: campaign.amp_article.cta_text.clone(),
                });
            }
            GeneratedContent::SeoBlogPost(post) => {
                let title = post.selected_title.clone().unwrap_or_default();
                payload.caption = title.clone();
                payload.hashtags = Some(post.tags.clone());
                payload.seo_blog_details = Some(SeoBlogDetails {
                    title,
                    meta_description: post.meta_description.clone(),
                    tags: post.tags.clone(),
                    body: post.body.clone(),
                });
            }
            GeneratedContent::EmailSubject(email) => {
                payload.caption = email.subject.clone();
                payload.email_details = Some(EmailDetails {
                    subject: Some(email.subject.clone()),
                    html_body: None,
                });
            }
            GeneratedContent::EmailBody(email) => {
                payload.email_details = Some(EmailDetails {
                    subject: None,
                    html_body: Some(email.html_body.clone()),
                });
            }
            GeneratedContent::EngagementBooster(_)
            | GeneratedContent::CommentAnalysis(_)
            | GeneratedContent::PagePerformance(_)
            | GeneratedContent::BrandKit(_)
            | GeneratedContent::AutomatedResponder(_)
            | GeneratedContent::WhatsappAutoResponder(_)
            | GeneratedContent::PostEngagementStrategist(_) => {
                payload.caption = content.review_text();
            }
        }
        payload
    }
}

fn slot_base64(slot: &ImageSlot) -> Option<String> {
    slot.data_url().and_then(base64_of)
}

/// The payload of a base64 image data URL.
fn base64_of(data_url: &str) -> Option<String> {
    let rest = data_url.strip_prefix("data:image/")?;
    let (header, data) = rest.split_once(',')?;
    header.ends_with(";base64").then(|| data.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ImagePost, StrategyPlan, VoiceDialog};
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn image_post_carries_base64_and_schedule() {
        let content = GeneratedContent::Image(ImagePost {
            caption: "Sunrise".to_string(),
            hashtags: vec!["#morning".to_string()],
            image: ImageSlot::Ready("data:image/jpeg;base64,QUJD".to_string()),
            ..ImagePost::default()
        });
        let schedule = Utc.with_ymd_and_hms(2025, 9, 1, 14, 30, 0).unwrap();
        let value = serde_json::to_value(WebhookPayload::from_content(&content, Some(schedule))).unwrap();
        assert_eq!(
            value,
            json!({
                "caption": "Sunrise",
                "hashtags": ["#morning"],
                "imageBase64": "QUJD",
                "scheduleTime": "2025-09-01T14:30:00.000Z",
                "postTypeIdentifier": "image",
            })
        );
    }

    #[test]
    fn strategy_and_dialog_use_fixed_captions() {
        let strategy = GeneratedContent::Strategy(StrategyPlan {
            strategy: json!({"goal": "grow"}),
        });
        let payload = WebhookPayload::from_content(&strategy, None);
        assert_eq!(payload.caption, "AI-Generated Content Strategy Plan");
        assert_eq!(payload.strategy_data, Some(json!({"goal": "grow"})));
        assert!(payload.schedule_time.is_none());

        let dialog = GeneratedContent::VoiceDialog(VoiceDialog {
            dialog_type: "Support".to_string(),
            scenario: "Refund request".to_string(),
            dialog: vec![DialogLine {
                speaker: "User".to_string(),
                line: "Hi".to_string(),
            }],
        });
        let payload = WebhookPayload::from_content(&dialog, None);
        assert_eq!(payload.caption, "Voice Dialog for \"Support\": Refund request");
        assert_eq!(payload.voice_dialog.map(|lines| lines.len()), Some(1));
    }

    #[test]
    fn ignores_non_base64_urls() {
        assert_eq!(base64_of("https://example.com/a.jpg"), None);
        assert_eq!(base64_of("data:image/png;base64,AAAA").as_deref(), Some("AAAA"));
    }
}
