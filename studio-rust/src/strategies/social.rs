use super::{prompts, request, require, schemas, sections, text_request, GenerationStrategy};
use crate::{
    content::{
        AnalysisPost, EngagementBoost, EngagementBooster, EngagementStrategy, GroundedPost,
        GuidedPost, ImagePost, ImageSlot, PostEngagementPlan, SafetyAnalysis, TextPost,
        VideoScript, VqaResult,
    },
    input::EngagementMode,
    parse::{self, HASHTAGS, IMAGE_PROMPT, MESSAGE},
    ContentType, GeneratedContent, GenerationInput, StudioConfig, StudioError, StudioResult,
    TaskType,
};
use genai_sdk::{ContentRequest, ContentResponse, InputPart, ToolOption};
use serde::Deserialize;

pub static TEXT: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::Text,
    build_params: build_text,
    parse_response: parse_text,
    disable_variations: false,
    extract_text_for_review: Some(GeneratedContent::review_text),
};

pub static GUIDED: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::Guided,
    build_params: build_guided,
    parse_response: parse_guided,
    disable_variations: false,
    extract_text_for_review: Some(GeneratedContent::review_text),
};

pub static GROUNDED_TEXT: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::GroundedText,
    build_params: build_grounded,
    parse_response: parse_grounded,
    disable_variations: false,
    extract_text_for_review: Some(GeneratedContent::review_text),
};

pub static VIDEO: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::Video,
    build_params: build_video,
    parse_response: parse_video,
    disable_variations: false,
    extract_text_for_review: Some(GeneratedContent::review_text),
};

pub static IMAGE: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::Image,
    build_params: build_image,
    parse_response: parse_image,
    disable_variations: false,
    extract_text_for_review: Some(GeneratedContent::review_text),
};

pub static ANALYSIS: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::Analysis,
    build_params: build_analysis,
    parse_response: parse_analysis,
    disable_variations: false,
    extract_text_for_review: Some(GeneratedContent::review_text),
};

pub static ENGAGEMENT_BOOSTER: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::EngagementBooster,
    build_params: build_engagement_booster,
    parse_response: parse_engagement_booster,
    disable_variations: false,
    extract_text_for_review: None,
};

pub static POST_ENGAGEMENT_STRATEGIST: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::PostEngagementStrategist,
    build_params: build_post_engagement_strategist,
    parse_response: parse_post_engagement_strategist,
    disable_variations: true,
    extract_text_for_review: None,
};

/// Caption payload returned by text-post schemas.
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct TextPayload {
    caption: String,
    hashtags: Vec<String>,
    safety_analysis: SafetyAnalysis,
}

impl TextPayload {
    fn into_post(self, image: Option<String>) -> TextPost {
        TextPost {
            caption: self.caption,
            hashtags: self.hashtags,
            image,
            safety_analysis: self.safety_analysis,
            ..TextPost::default()
        }
    }
}

fn build_text(input: &GenerationInput, config: &StudioConfig) -> StudioResult<ContentRequest> {
    let system_instruction = prompts::text(input.task);

    if input.task == TaskType::VisualQa {
        let Some(image) = &input.input_image else {
            return Err(StudioError::validation("Visual Q&A requires an image."));
        };
        require(&input.topic, "Please enter a question about the image.")?;
        let parts = vec![
            image.clone().into(),
            InputPart::text(format!("My question is: \"{}\"", input.topic)),
        ];
        return Ok(request(input, config, system_instruction, parts).json_schema(schemas::vqa()));
    }

    if input.input_image.is_none() {
        require(&input.topic, "Please enter a topic or upload an image.")?;
    }
    let mut parts = Vec::with_capacity(2);
    if let Some(image) = &input.input_image {
        parts.push(image.clone().into());
    }
    parts.push(InputPart::text(format!("The topic is: \"{}\"", input.topic)));
    Ok(request(input, config, system_instruction, parts).json_schema(schemas::text_post()))
}

fn parse_text(
    response: &ContentResponse,
    input: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let image = input.input_image.as_ref().map(genai_sdk::InlineData::to_data_url);

    if input.task == TaskType::VisualQa {
        let vqa: VqaResult = parse::parse_json(&response.text, "text post")?;
        return Ok(GeneratedContent::Text(TextPost {
            caption: vqa.answer.clone(),
            hashtags: Vec::new(),
            image,
            safety_analysis: SafetyAnalysis {
                is_safe: true,
                reasoning: "Visual Q&A response.".to_string(),
            },
            vqa_result: Some(vqa),
            ..TextPost::default()
        }));
    }

    let payload: TextPayload = parse::parse_json(&response.text, "text post")?;
    Ok(GeneratedContent::Text(payload.into_post(image)))
}

fn build_guided(input: &GenerationInput, config: &StudioConfig) -> StudioResult<ContentRequest> {
    let guided = &input.guided;
    require(&guided.monetization_feature, "Please choose a monetization feature.")?;
    let prompt = format!(
        "Monetization Feature: \"{}\"\nTarget Audience: \"{}\"\nKey Tip/CTA: \"{}\"",
        guided.monetization_feature, guided.target_audience, guided.key_tip
    );
    Ok(text_request(input, config, prompts::guided(), prompt))
}

fn parse_guided(
    response: &ContentResponse,
    input: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let [content, hashtags] = sections::<2>(&response.text, &[HASHTAGS]);
    Ok(GeneratedContent::Guided(GuidedPost {
        content,
        hashtags: parse::hashtags(&hashtags),
        monetization_feature: input.guided.monetization_feature.clone(),
        ..GuidedPost::default()
    }))
}

fn build_grounded(input: &GenerationInput, config: &StudioConfig) -> StudioResult<ContentRequest> {
    require(&input.topic, "Please enter a topic.")?;
    let prompt = format!(
        "Using the available search results, generate a fact-checked post about: {}",
        input.topic
    );
    Ok(text_request(input, config, prompts::grounded(), prompt).tool(ToolOption::GoogleSearch))
}

fn parse_grounded(
    response: &ContentResponse,
    _: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let [content, hashtags] = sections::<2>(&response.text, &[HASHTAGS]);
    Ok(GeneratedContent::GroundedText(GroundedPost {
        content,
        hashtags: parse::hashtags(&hashtags),
        sources: response.sources.clone(),
        ..GroundedPost::default()
    }))
}

fn build_video(input: &GenerationInput, config: &StudioConfig) -> StudioResult<ContentRequest> {
    require(&input.topic, "Please enter a topic.")?;
    let prompt = format!("Generate a video script about: {}", input.topic);
    Ok(text_request(input, config, prompts::video(), prompt))
}

fn parse_video(
    response: &ContentResponse,
    _: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let [title, message, hashtags] = sections::<3>(&response.text, &[MESSAGE, HASHTAGS]);
    Ok(GeneratedContent::Video(VideoScript {
        title,
        message,
        hashtags: parse::hashtags(&hashtags),
        ..VideoScript::default()
    }))
}

fn build_image(input: &GenerationInput, config: &StudioConfig) -> StudioResult<ContentRequest> {
    require(&input.topic, "Please enter a topic.")?;
    let prompt = format!(
        "Generate a caption and image prompt for a post about: {}",
        input.topic
    );
    Ok(text_request(input, config, prompts::image(), prompt))
}

fn parse_image(
    response: &ContentResponse,
    _: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let [caption, image_prompt, hashtags] =
        sections::<3>(&response.text, &[IMAGE_PROMPT, HASHTAGS]);
    Ok(GeneratedContent::Image(ImagePost {
        caption,
        hashtags: parse::hashtags(&hashtags),
        image_prompt,
        image: ImageSlot::PromptReady,
        ..ImagePost::default()
    }))
}

fn build_analysis(input: &GenerationInput, config: &StudioConfig) -> StudioResult<ContentRequest> {
    require(&input.url, "Please enter a URL to analyze.")?;
    let prompt = format!(
        "Based on the content from the URL {}, fulfill this prompt: {}",
        input.url, input.topic
    );
    Ok(text_request(input, config, prompts::analysis(), prompt).tool(ToolOption::GoogleSearch))
}

fn parse_analysis(
    response: &ContentResponse,
    input: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let [content, hashtags] = sections::<2>(&response.text, &[HASHTAGS]);
    Ok(GeneratedContent::Analysis(AnalysisPost {
        content,
        hashtags: parse::hashtags(&hashtags),
        source_url: input.url.clone(),
        sources: response.sources.clone(),
        ..AnalysisPost::default()
    }))
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct HooksPayload {
    hooks: Vec<String>,
}

fn build_engagement_booster(
    input: &GenerationInput,
    config: &StudioConfig,
) -> StudioResult<ContentRequest> {
    let booster = &input.engagement_booster;
    match booster.mode {
        EngagementMode::Hooks => {
            require(&booster.topic, "Please enter a topic.")?;
            let prompt = format!("Generate viral hooks for the topic: {}", booster.topic);
            Ok(text_request(input, config, prompts::engagement_hooks(), prompt)
                .json_schema(schemas::engagement_hooks()))
        }
        EngagementMode::Rewrite => {
            require(&booster.text_to_rewrite, "Please enter the text to rewrite.")?;
            let prompt = format!(
                "Rewrite the following text for high engagement:\n\n{}",
                booster.text_to_rewrite
            );
            Ok(text_request(input, config, prompts::engagement_rewrite(), prompt))
        }
    }
}

fn parse_engagement_booster(
    response: &ContentResponse,
    input: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let booster = &input.engagement_booster;
    let boost = match booster.mode {
        EngagementMode::Hooks => {
            let payload: HooksPayload = parse::parse_json(&response.text, "viral hooks")?;
            EngagementBoost::Hooks {
                topic: booster.topic.clone(),
                hooks: payload.hooks,
            }
        }
        EngagementMode::Rewrite => EngagementBoost::Rewrite {
            original: booster.text_to_rewrite.clone(),
            rewritten: response.text.trim().to_string(),
        },
    };
    Ok(GeneratedContent::EngagementBooster(EngagementBooster { boost }))
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct PostEngagementPayload {
    base_post: TextPayload,
    engagement_strategy: EngagementStrategy,
}

fn build_post_engagement_strategist(
    input: &GenerationInput,
    config: &StudioConfig,
) -> StudioResult<ContentRequest> {
    require(&input.topic, "Please enter a topic.")?;
    let prompt = format!(
        "Generate a post and engagement strategy for the topic: \"{}\"",
        input.topic
    );
    Ok(
        text_request(input, config, prompts::post_engagement_strategist(), prompt)
            .json_schema(schemas::post_engagement_strategist()),
    )
}

fn parse_post_engagement_strategist(
    response: &ContentResponse,
    _: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let payload: PostEngagementPayload =
        parse::parse_json(&response.text, "post and engagement strategy")?;
    Ok(GeneratedContent::PostEngagementStrategist(PostEngagementPlan {
        base_post: payload.base_post.into_post(None),
        engagement_strategy: payload.engagement_strategy,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use genai_sdk::InlineData;

    fn config() -> StudioConfig {
        StudioConfig::default()
    }

    #[test]
    fn visual_qa_requires_an_image() {
        let input = GenerationInput::new(ContentType::Text)
            .topic("What is this?")
            .task(TaskType::VisualQa);
        let error = build_text(&input, &config()).unwrap_err();
        assert_eq!(error.to_string(), "Visual Q&A requires an image.");
    }

    #[test]
    fn visual_qa_sends_image_first() {
        let image = InlineData::from_bytes("image/png", b"png");
        let input = GenerationInput::new(ContentType::Text)
            .topic("What is this?")
            .task(TaskType::VisualQa)
            .image(image.clone());
        let request = build_text(&input, &config()).unwrap();
        assert_eq!(
            request.contents[0].parts,
            vec![
                InputPart::InlineData(image),
                InputPart::text("My question is: \"What is this?\"")
            ]
        );
        assert_eq!(request.config.response_schema, Some(schemas::vqa()));

        let response = ContentResponse::from_text(
            r#"{"question":"What is this?","answer":"A cat","reasoning":"Whiskers"}"#,
        );
        let GeneratedContent::Text(post) = parse_text(&response, &input, &config()).unwrap()
        else {
            panic!("expected a text post");
        };
        assert_eq!(post.caption, "A cat");
        assert!(post.hashtags.is_empty());
        assert_eq!(post.safety_analysis.reasoning, "Visual Q&A response.");
        assert_eq!(post.vqa_result.unwrap().reasoning, "Whiskers");
        assert_eq!(post.image.as_deref(), Some("data:image/png;base64,cG5n"));
    }

    #[test]
    fn video_script_without_message() {
        let response = ContentResponse::from_text("Only a title");
        let content = parse_video(&response, &GenerationInput::default(), &config()).unwrap();
        assert_eq!(
            content,
            GeneratedContent::Video(VideoScript {
                title: "Only a title".to_string(),
                ..VideoScript::default()
            })
        );
    }

    #[test]
    fn grounded_keeps_sources_and_search_tool() {
        let input = GenerationInput::new(ContentType::GroundedText).topic("solar sails");
        let request = build_grounded(&input, &config()).unwrap();
        assert_eq!(request.config.tools, vec![ToolOption::GoogleSearch]);

        let source = genai_sdk::Source {
            uri: "https://example.com".to_string(),
            title: "Example".to_string(),
        };
        let response = ContentResponse::from_text("Post body###HASHTAGS### #space")
            .with_sources(vec![source.clone()]);
        let GeneratedContent::GroundedText(post) =
            parse_grounded(&response, &input, &config()).unwrap()
        else {
            panic!("expected a grounded post");
        };
        assert_eq!(post.content, "Post body");
        assert_eq!(post.hashtags, vec!["#space"]);
        assert_eq!(post.sources, vec![source]);
    }

    #[test]
    fn rewrite_mode_is_plain_text() {
        let input = GenerationInput::new(ContentType::EngagementBooster).engagement_booster(
            crate::input::EngagementBoosterInput {
                mode: EngagementMode::Rewrite,
                text_to_rewrite: "Buy our stuff".to_string(),
                ..Default::default()
            },
        );
        let request = build_engagement_booster(&input, &config()).unwrap();
        assert!(request.config.response_schema.is_none());

        let response = ContentResponse::from_text("  You deserve better stuff.  ");
        let content = parse_engagement_booster(&response, &input, &config()).unwrap();
        assert_eq!(
            content,
            GeneratedContent::EngagementBooster(EngagementBooster {
                boost: EngagementBoost::Rewrite {
                    original: "Buy our stuff".to_string(),
                    rewritten: "You deserve better stuff.".to_string(),
                }
            })
        );
    }
}
