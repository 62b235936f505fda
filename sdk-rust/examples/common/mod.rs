use genai_sdk::{gemini::GeminiModelOptions, GenAiClient};

pub fn get_client() -> GenAiClient {
    GenAiClient::gemini(GeminiModelOptions {
        api_key: std::env::var("GOOGLE_API_KEY")
            .expect("GOOGLE_API_KEY environment variable must be set"),
        ..Default::default()
    })
}
