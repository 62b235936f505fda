use super::{prompts, require, sections, text_request, GenerationStrategy};
use crate::{
    content::{AdCreative, AllianceAd, GoogleBusinessPost, ImageSlot},
    keystone::Keystone,
    parse::{self, HASHTAGS, IMAGE_PROMPT, PRIMARY_TEXT},
    ContentType, GeneratedContent, GenerationInput, StudioConfig, StudioResult,
};
use genai_sdk::{ContentRequest, ContentResponse};

pub static AD: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::Ad,
    build_params: build_ad,
    parse_response: parse_ad,
    disable_variations: false,
    extract_text_for_review: Some(GeneratedContent::review_text),
};

pub static ALLIANCE_AD: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::AllianceAd,
    build_params: build_alliance_ad,
    parse_response: parse_alliance_ad,
    disable_variations: false,
    extract_text_for_review: Some(GeneratedContent::review_text),
};

pub static GOOGLE_BUSINESS_POST: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::GoogleBusinessPost,
    build_params: build_google_business_post,
    parse_response: parse_google_business_post,
    disable_variations: false,
    extract_text_for_review: Some(GeneratedContent::review_text),
};

/// Headline, primary text, image prompt and hashtags of an ad response.
fn ad_sections(text: &str) -> [String; 4] {
    sections::<4>(text, &[PRIMARY_TEXT, IMAGE_PROMPT, HASHTAGS])
}

fn build_ad(input: &GenerationInput, config: &StudioConfig) -> StudioResult<ContentRequest> {
    let ad = &input.ad;
    require(&ad.product_or_service, "Please describe the product or service.")?;
    let prompt = format!(
        "Product/Service: \"{}\"\nTarget Audience: \"{}\"\nCall to Action: \"{}\"\n\
         Required Keywords: {}\nBanned Words: {}",
        ad.product_or_service,
        ad.target_audience,
        ad.call_to_action,
        ad.required_keywords,
        ad.banned_words
    );
    Ok(text_request(input, config, prompts::ad(), prompt))
}

fn parse_ad(
    response: &ContentResponse,
    input: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let [headline, primary_text, image_prompt, hashtags] = ad_sections(&response.text);
    Ok(GeneratedContent::Ad(AdCreative {
        headline,
        primary_text,
        call_to_action: input.ad.call_to_action.clone(),
        hashtags: parse::hashtags(&hashtags),
        image_prompt,
        image: ImageSlot::PromptReady,
        ..AdCreative::default()
    }))
}

fn build_alliance_ad(
    input: &GenerationInput,
    config: &StudioConfig,
) -> StudioResult<ContentRequest> {
    let alliance = &input.alliance_ad;
    let keystone = Keystone::parse(&alliance.keystone, &config.partners)?;
    let prompt = format!(
        "Core Message: \"{}\"\nTarget Audience: \"{}\"\nCall to Action: \"{}\"",
        alliance.core_message, alliance.target_audience, alliance.call_to_action
    );
    Ok(text_request(
        input,
        config,
        prompts::alliance_ad(&keystone.ally),
        prompt,
    ))
}

fn parse_alliance_ad(
    response: &ContentResponse,
    input: &GenerationInput,
    config: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let alliance = &input.alliance_ad;
    let keystone = Keystone::parse(&alliance.keystone, &config.partners)?;
    let [headline, primary_text, image_prompt, hashtags] = ad_sections(&response.text);
    Ok(GeneratedContent::AllianceAd(AllianceAd {
        headline,
        primary_text,
        call_to_action: alliance.call_to_action.clone(),
        hashtags: parse::hashtags(&hashtags),
        image_prompt,
        image: ImageSlot::PromptReady,
        ally: Some(keystone.ally),
        keystone: alliance.keystone.trim().to_string(),
        ..AllianceAd::default()
    }))
}

fn build_google_business_post(
    input: &GenerationInput,
    config: &StudioConfig,
) -> StudioResult<ContentRequest> {
    let post = &input.google_business_post;
    require(&post.business_name, "Please enter the business name.")?;
    let prompt = format!(
        "Business Name: \"{}\"\nPost Goal: \"{}\"\nKey Information: \"{}\"\nCall to Action: \"{}\"",
        post.business_name, post.post_goal, post.key_info, post.call_to_action
    );
    Ok(text_request(input, config, prompts::google_business_post(), prompt))
}

fn parse_google_business_post(
    response: &ContentResponse,
    input: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let post = &input.google_business_post;
    let [post_content, image_prompt] = sections::<2>(&response.text, &[IMAGE_PROMPT]);
    Ok(GeneratedContent::GoogleBusinessPost(GoogleBusinessPost {
        business_name: post.business_name.clone(),
        post_content,
        call_to_action: post.call_to_action.clone(),
        image_prompt,
        image: ImageSlot::PromptReady,
        ..GoogleBusinessPost::default()
    }))
}
