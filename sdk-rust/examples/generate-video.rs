use dotenvy::dotenv;
use genai_sdk::VideoRequest;
use std::time::Duration;

mod common;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let client = common::get_client();

    let mut operation = client
        .generate_videos(VideoRequest {
            model: "veo-2.0-generate-001".to_string(),
            prompt: "A paper boat drifting down a rainy street".to_string(),
            image: None,
        })
        .await
        .expect("failed to start video generation");

    while !operation.done {
        tokio::time::sleep(Duration::from_secs(10)).await;
        operation = client
            .get_videos_operation(&operation)
            .await
            .expect("failed to poll video operation");
        println!("progress: {:?}", operation.progress_percentage);
    }

    let uri = operation.video_uri.expect("finished without a video");
    println!("{}", client.download_url(&uri));
}
