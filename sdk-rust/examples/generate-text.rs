use dotenvy::dotenv;
use genai_sdk::{Content, ContentRequest, ToolOption};

mod common;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let client = common::get_client();

    let response = client
        .generate_content(
            ContentRequest::new(
                "gemini-2.5-flash",
                vec![Content::user_text(
                    "What changed in social media algorithms this year?",
                )],
            )
            .system_instruction("Answer in three short bullet points.")
            .temperature(0.4)
            .tool(ToolOption::GoogleSearch),
        )
        .await
        .expect("failed to generate content");

    println!("{}", response.text);
    for source in &response.sources {
        println!("- {} ({})", source.title, source.uri);
    }
    if let Some(usage) = &response.usage {
        println!("{usage:#?}");
    }
}
