use super::{prompts, require, schemas, text_request, GenerationStrategy};
use crate::{
    content::{
        BrandKit, BrandVoiceProfile, CommentAnalysis, CommentInsights, DialogLine, PageInsights,
        PagePerformance, StrategyPlan, VoiceDialog,
    },
    parse, ContentType, GeneratedContent, GenerationInput, StudioConfig, StudioError,
    StudioResult,
};
use chrono::NaiveDate;
use genai_sdk::{ContentRequest, ContentResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub static STRATEGY: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::Strategy,
    build_params: build_strategy,
    parse_response: parse_strategy,
    disable_variations: false,
    extract_text_for_review: None,
};

pub static VOICE_DIALOG: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::VoiceDialog,
    build_params: build_voice_dialog,
    parse_response: parse_voice_dialog,
    disable_variations: false,
    extract_text_for_review: None,
};

pub static COMMENT_ANALYSIS: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::CommentAnalysis,
    build_params: build_comment_analysis,
    parse_response: parse_comment_analysis,
    disable_variations: true,
    extract_text_for_review: None,
};

pub static PAGE_PERFORMANCE: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::PagePerformance,
    build_params: build_page_performance,
    parse_response: parse_page_performance,
    disable_variations: true,
    extract_text_for_review: None,
};

pub static BRAND_KIT: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::BrandKit,
    build_params: build_brand_kit,
    parse_response: parse_brand_kit,
    disable_variations: true,
    extract_text_for_review: None,
};

fn build_strategy(input: &GenerationInput, config: &StudioConfig) -> StudioResult<ContentRequest> {
    let prompt = "Generate a comprehensive content strategy plan.".to_string();
    Ok(
        text_request(input, config, prompts::STRATEGY.to_string(), prompt)
            .json_schema(schemas::strategy()),
    )
}

fn parse_strategy(
    response: &ContentResponse,
    _: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let strategy: Value = parse::parse_json(&response.text, "strategy plan")?;
    Ok(GeneratedContent::Strategy(StrategyPlan { strategy }))
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct DialogPayload {
    dialog: Vec<DialogLine>,
}

fn build_voice_dialog(
    input: &GenerationInput,
    config: &StudioConfig,
) -> StudioResult<ContentRequest> {
    let dialog = &input.voice_dialog;
    require(&dialog.scenario, "Please describe the scenario.")?;
    let prompt = format!(
        "Dialog type: \"{}\". Scenario: \"{}\"",
        dialog.dialog_type, dialog.scenario
    );
    Ok(
        text_request(input, config, prompts::VOICE_DIALOG.to_string(), prompt)
            .json_schema(schemas::voice_dialog()),
    )
}

fn parse_voice_dialog(
    response: &ContentResponse,
    input: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let payload: DialogPayload = parse::parse_json(&response.text, "voice dialog")?;
    Ok(GeneratedContent::VoiceDialog(VoiceDialog {
        dialog_type: input.voice_dialog.dialog_type.clone(),
        scenario: input.voice_dialog.scenario.clone(),
        dialog: payload.dialog,
    }))
}

fn build_comment_analysis(
    input: &GenerationInput,
    config: &StudioConfig,
) -> StudioResult<ContentRequest> {
    require(&input.comments_text, "Please paste some comments to analyze.")?;
    let prompt = format!(
        "Analyze the following block of comments:\n\n{}",
        input.comments_text
    );
    Ok(
        text_request(input, config, prompts::COMMENT_ANALYSIS.to_string(), prompt)
            .json_schema(schemas::comment_analysis()),
    )
}

fn parse_comment_analysis(
    response: &ContentResponse,
    _: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let analysis: CommentInsights = parse::parse_json(&response.text, "comment analysis")?;
    Ok(GeneratedContent::CommentAnalysis(CommentAnalysis { analysis }))
}

/// One day of page metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMetric {
    pub date: NaiveDate,
    pub impressions: u64,
    pub interactions: u64,
    pub net_follows: i64,
    pub shares: u64,
    pub reactions: u64,
    pub reach: u64,
    pub views: u64,
}

impl DailyMetric {
    /// The sample series shipped with the studio.
    pub fn bundled() -> Vec<Self> {
        // (month, day, impressions, interactions, net follows, shares, reactions, reach, views)
        const AUGUST_2025: [(u32, u32, u64, u64, i64, u64, u64, u64, u64); 29] = [
            (8, 2, 7, 1, 0, 1, 0, 2, 7),
            (8, 3, 16, 0, 0, 0, 0, 4, 15),
            (8, 4, 1, 0, 0, 0, 0, 1, 1),
            (8, 5, 13, 2, 0, 2, 0, 2, 33),
            (8, 6, 11, 0, 0, 0, 0, 1, 20),
            (8, 7, 14, 1, 0, 1, 0, 2, 18),
            (8, 8, 0, 0, 0, 0, 0, 0, 0),
            (8, 9, 0, 0, 0, 0, 0, 0, 0),
            (8, 10, 4, 1, 0, 1, 0, 1, 9),
            (8, 11, 20, 0, 0, 0, 0, 2, 33),
            (8, 12, 28, 0, 0, 0, 0, 2, 43),
            (8, 13, 8, 0, 0, 0, 0, 2, 14),
            (8, 14, 39, 1, 0, 1, 0, 2, 51),
            (8, 15, 1, 1, 0, 1, 0, 1, 1),
            (8, 16, 11, 0, 7, 0, 0, 4, 20),
            (8, 17, 69, 4, 2, 3, 1, 4, 117),
            (8, 18, 18, 0, 1, 0, 0, 1, 19),
            (8, 19, 1, 0, 1, 0, 0, 1, 1),
            (8, 20, 5, 1, 0, 0, 1, 2, 9),
            (8, 21, 66, 1, 4, 1, 0, 12, 89),
            (8, 22, 25, 0, 1, 0, 0, 15, 23),
            (8, 23, 18, 0, 2, 0, 0, 5, 21),
            (8, 24, 84, 1, 0, 1, 0, 25, 75),
            (8, 25, 45, 1, 1, 1, 0, 22, 40),
            (8, 26, 51, 0, 0, 0, 0, 10, 38),
            (8, 27, 16, 0, 1, 0, 0, 8, 0),
            (8, 28, 3, 0, 0, 0, 0, 2, 0),
            (8, 29, 23, 0, 0, 0, 0, 3, 24),
            (8, 30, 30, 1, 0, 1, 0, 8, 23),
        ];
        AUGUST_2025
            .iter()
            .filter_map(
                |&(month, day, impressions, interactions, net_follows, shares, reactions, reach, views)| {
                    Some(Self {
                        date: NaiveDate::from_ymd_opt(2025, month, day)?,
                        impressions,
                        interactions,
                        net_follows,
                        shares,
                        reactions,
                        reach,
                        views,
                    })
                },
            )
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageTotals {
    pub reach: u64,
    pub engagement: u64,
    pub followers_growth: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPost {
    #[serde(rename = "type")]
    pub kind: String,
    pub reach: u64,
    pub engagement_rate: f64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudienceSnapshot {
    pub top_country: String,
    pub top_age_range: String,
}

/// Aggregate sent to the model for page performance analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSummary {
    pub metrics: PageTotals,
    pub top_post: TopPost,
    pub audience: AudienceSnapshot,
}

impl PageSummary {
    /// Totals over the series and the day with the most views. Ties keep
    /// the earliest day. `None` for an empty series.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_metrics(metrics: &[DailyMetric]) -> Option<Self> {
        let first = metrics.first()?;
        let top = metrics
            .iter()
            .fold(first, |top, day| if day.views > top.views { day } else { top });

        let totals = PageTotals {
            reach: metrics.iter().map(|day| day.reach).sum(),
            engagement: metrics.iter().map(|day| day.interactions).sum(),
            followers_growth: metrics.iter().map(|day| day.net_follows).sum(),
        };
        let engagement_rate = if top.views > 0 {
            top.interactions as f64 / top.views as f64
        } else {
            0.0
        };

        Some(Self {
            metrics: totals,
            top_post: TopPost {
                kind: "Video".to_string(),
                reach: top.reach,
                engagement_rate,
                title: format!("Highlight from {}", top.date.format("%-m/%-d/%Y")),
            },
            audience: AudienceSnapshot {
                top_country: "United States".to_string(),
                top_age_range: "25-34".to_string(),
            },
        })
    }
}

fn build_page_performance(
    input: &GenerationInput,
    config: &StudioConfig,
) -> StudioResult<ContentRequest> {
    let summary = PageSummary::from_metrics(&config.page_metrics)
        .ok_or_else(|| StudioError::validation("No page performance data is available."))?;
    let payload = serde_json::to_string_pretty(&summary)
        .map_err(|error| StudioError::Invariant(format!("page summary: {error}")))?;
    let prompt = format!("Analyze the following page performance data: {payload}");
    Ok(
        text_request(input, config, prompts::page_performance(), prompt)
            .json_schema(schemas::page_performance()),
    )
}

fn parse_page_performance(
    response: &ContentResponse,
    _: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let analysis: PageInsights = parse::parse_json(&response.text, "page performance analysis")?;
    Ok(GeneratedContent::PagePerformance(PagePerformance { analysis }))
}

fn build_brand_kit(input: &GenerationInput, config: &StudioConfig) -> StudioResult<ContentRequest> {
    let voice = &input.brand_voice;
    require(&voice.mission_statement, "Please enter a mission statement.")?;
    let prompt = format!(
        "Mission Statement: \"{}\"\nCore Values: \"{}\"\nTarget Audience Persona: \"{}\"\n\
         Brand Voice Tone: \"{}\"",
        voice.mission_statement,
        voice.core_values,
        voice.target_audience_persona,
        voice.brand_voice_tone
    );
    Ok(
        text_request(input, config, prompts::BRAND_VOICE.to_string(), prompt)
            .json_schema(schemas::brand_voice()),
    )
}

fn parse_brand_kit(
    response: &ContentResponse,
    _: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let analysis: BrandVoiceProfile = parse::parse_json(&response.text, "brand voice analysis")?;
    Ok(GeneratedContent::BrandKit(BrandKit { analysis }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summarizes_bundled_metrics() {
        let summary = PageSummary::from_metrics(&DailyMetric::bundled()).unwrap();
        assert_eq!(
            summary.metrics,
            PageTotals {
                reach: 144,
                engagement: 16,
                followers_growth: 20,
            }
        );
        assert_eq!(summary.top_post.title, "Highlight from 8/17/2025");
        assert_eq!(summary.top_post.reach, 4);
        assert!((summary.top_post.engagement_rate - 4.0 / 117.0).abs() < 1e-12);

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["top_post"]["type"], json!("Video"));
        assert_eq!(value["audience"]["top_age_range"], json!("25-34"));
    }

    #[test]
    fn empty_metrics_fail_validation() {
        let config = StudioConfig::builder().page_metrics(Vec::new()).build();
        let input = GenerationInput::new(ContentType::PagePerformance);
        assert!(matches!(
            build_page_performance(&input, &config),
            Err(StudioError::Validation(_))
        ));
    }

    #[test]
    fn comment_analysis_reads_snake_case() {
        let response = ContentResponse::from_text(
            r#"```json
{"overall_sentiment":"Mixed","sentiment_score":0.1,"key_themes":["price"]}
```"#,
        );
        let content = parse_comment_analysis(
            &response,
            &GenerationInput::new(ContentType::CommentAnalysis),
            &StudioConfig::default(),
        )
        .unwrap();
        let GeneratedContent::CommentAnalysis(CommentAnalysis { analysis }) = content else {
            panic!("expected a comment analysis");
        };
        assert_eq!(analysis.overall_sentiment, "Mixed");
        assert_eq!(analysis.key_themes, vec!["price"]);
        assert!(analysis.frequent_questions.is_empty());
    }

    #[test]
    fn invalid_dialog_names_context() {
        let input = GenerationInput::new(ContentType::VoiceDialog);
        let error = parse_voice_dialog(
            &ContentResponse::from_text("not json"),
            &input,
            &StudioConfig::default(),
        )
        .unwrap_err();
        assert!(error.to_string().contains("voice dialog"));
    }
}
