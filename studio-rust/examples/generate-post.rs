use content_studio::{
    input::AdCreativeInput, ContentType, FileHistoryStore, GeneratedContent, GenerationInput,
    GenerationSession, StudioConfig, WebhookPayload,
};
use dotenvy::dotenv;
use genai_sdk::{gemini::GeminiModelOptions, AspectRatio, GenAiClient};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = GenAiClient::gemini(GeminiModelOptions {
        api_key: std::env::var("GOOGLE_API_KEY")
            .expect("GOOGLE_API_KEY environment variable must be set"),
        ..Default::default()
    });
    let config = Arc::new(StudioConfig::default());
    let history = Arc::new(FileHistoryStore::in_dir(
        std::env::temp_dir(),
        config.history_limit,
    ));
    let session = GenerationSession::new(client, config, history);

    let input = GenerationInput::new(ContentType::Ad)
        .ad(AdCreativeInput {
            product_or_service: "A solar-powered camping lantern".to_string(),
            target_audience: "weekend hikers".to_string(),
            call_to_action: "Shop Now".to_string(),
            ..AdCreativeInput::default()
        })
        .variations(2);

    let variations = session.generate(input).await.expect("failed to generate ads");
    for (index, content) in variations.iter().enumerate() {
        if let GeneratedContent::Ad(ad) = content {
            println!("#{} {}\n{}\n{}\n", index + 1, ad.headline, ad.primary_text, ad.hashtags.join(" "));
        }
    }

    let review = session.review(0).await.expect("failed to review ad");
    if let Some(alignment) = review.alignment {
        println!("Brand score: {:.0}\n{}", alignment.score, alignment.rationale);
    }

    session
        .generate_image(0, AspectRatio::Square)
        .await
        .expect("failed to generate image");

    let state = session.snapshot().await;
    if let Some(content) = state.current() {
        let payload = WebhookPayload::from_content(content, None);
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("payload serializes")
        );
    }
}
