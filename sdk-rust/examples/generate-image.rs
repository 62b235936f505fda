use dotenvy::dotenv;
use genai_sdk::{AspectRatio, ImageRequest};

mod common;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let client = common::get_client();

    let image = client
        .generate_image(ImageRequest::new(
            "imagen-3.0-generate-002",
            "A sunset over the ocean, watercolor",
            AspectRatio::Widescreen,
        ))
        .await
        .expect("failed to generate image");

    println!("{} ({} base64 chars)", image.mime_type, image.image_bytes.len());
}
