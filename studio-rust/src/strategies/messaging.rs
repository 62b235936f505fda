use super::{prompts, require, schemas, text_request, GenerationStrategy};
use crate::{
    content::{AutomatedResponder, ResponderFlow, WhatsAppFlow, WhatsAppResponder},
    parse, ContentType, GeneratedContent, GenerationInput, StudioConfig, StudioResult,
};
use genai_sdk::{ContentRequest, ContentResponse};

pub static AUTOMATED_RESPONDER: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::AutomatedResponder,
    build_params: build_automated_responder,
    parse_response: parse_automated_responder,
    disable_variations: false,
    extract_text_for_review: Some(GeneratedContent::review_text),
};

pub static WHATSAPP_AUTO_RESPONDER: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::WhatsappAutoResponder,
    build_params: build_whatsapp_responder,
    parse_response: parse_whatsapp_responder,
    disable_variations: false,
    extract_text_for_review: Some(GeneratedContent::review_text),
};

fn build_automated_responder(
    input: &GenerationInput,
    config: &StudioConfig,
) -> StudioResult<ContentRequest> {
    let responder = &input.automated_responder;
    require(&responder.goal, "Please describe the goal of the flow.")?;
    let prompt = format!(
        "Goal: \"{}\"\nPlatform: \"{}\"",
        responder.goal, responder.platform
    );
    Ok(
        text_request(input, config, prompts::automated_responder(), prompt)
            .json_schema(schemas::automated_responder()),
    )
}

fn parse_automated_responder(
    response: &ContentResponse,
    _: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let flow: ResponderFlow = parse::parse_json(&response.text, "automated responder flow")?;
    Ok(GeneratedContent::AutomatedResponder(AutomatedResponder {
        flow,
        ..AutomatedResponder::default()
    }))
}

fn build_whatsapp_responder(
    input: &GenerationInput,
    config: &StudioConfig,
) -> StudioResult<ContentRequest> {
    let responder = &input.whatsapp_responder;
    require(&responder.goal, "Please describe the goal of the responder.")?;
    let prompt = format!(
        "Goal: \"{}\"\nBusiness Info: \"{}\"\nTone: \"{}\"",
        responder.goal, responder.business_info, responder.tone
    );
    Ok(
        text_request(input, config, prompts::whatsapp_responder(), prompt)
            .json_schema(schemas::whatsapp_responder()),
    )
}

fn parse_whatsapp_responder(
    response: &ContentResponse,
    _: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let flow: WhatsAppFlow = parse::parse_json(&response.text, "WhatsApp auto-responder flow")?;
    Ok(GeneratedContent::WhatsappAutoResponder(WhatsAppResponder {
        flow,
        ..WhatsAppResponder::default()
    }))
}
