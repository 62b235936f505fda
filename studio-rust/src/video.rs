//! Long-running video generation as a stream of progress snapshots.

use crate::{
    content::{GeneratedVideo, VideoStatus},
    StudioConfig, StudioError, StudioResult,
};
use futures::Stream;
use genai_sdk::{GenAiClient, InlineData, VideoOperation, VideoRequest};
use std::{pin::Pin, time::Duration};
use tracing::{debug, info_span};
use tracing_futures::Instrument;

pub type VideoStream = Pin<Box<dyn Stream<Item = StudioResult<GeneratedVideo>> + Send>>;

pub const INITIATING_MESSAGE: &str = "Initiating video generation...";
pub const WAITING_MESSAGE: &str = "Video request received. Waiting for processing to start...";
pub const READY_MESSAGE: &str = "Video ready!";

fn progress_message(progress: f64) -> String {
    format!("Processing video: {progress:.0}% complete.")
}

/// Start a video job for `prompt`, optionally animating `image`.
///
/// The stream yields a snapshot when the request is submitted, one per poll
/// tick while the operation runs, and a final `Success` snapshot carrying
/// the download URL. It ends with an error when the operation fails. Polling
/// waits `config.video_poll_interval` between ticks and has no upper bound.
pub fn start_video(
    client: GenAiClient,
    config: &StudioConfig,
    prompt: &str,
    image: Option<InlineData>,
) -> StudioResult<VideoStream> {
    let prompt = prompt.trim().to_string();
    if prompt.is_empty() {
        return Err(StudioError::validation("Please enter a prompt for the video."));
    }
    let request = VideoRequest {
        model: config.video_model.clone(),
        prompt: prompt.clone(),
        image,
    };
    let span = info_span!("content_studio.video", model = %request.model);
    let stream = poll_video(client, request, prompt, config.video_poll_interval);
    Ok(Box::pin(stream.instrument(span)))
}

fn poll_video(
    client: GenAiClient,
    request: VideoRequest,
    prompt: String,
    interval: Duration,
) -> impl Stream<Item = StudioResult<GeneratedVideo>> + Send {
    async_stream::try_stream! {
        let mut video = GeneratedVideo {
            prompt,
            input_image: request.image.as_ref().map(InlineData::to_data_url),
            status: VideoStatus::Generating,
            status_message: INITIATING_MESSAGE.to_string(),
            ..GeneratedVideo::default()
        };
        yield video.clone();

        let mut operation = client.generate_videos(request).await?;
        video.operation_name = Some(operation.name.clone());
        video.status = VideoStatus::Polling;
        video.status_message = WAITING_MESSAGE.to_string();
        yield video.clone();

        while !operation.done {
            tokio::time::sleep(interval).await;
            operation = client.get_videos_operation(&operation).await?;
            debug!(operation = %operation.name, done = operation.done, "polled video operation");
            if let Some(progress) = operation.progress_percentage {
                video.progress = progress.clamp(0.0, 100.0);
                video.status_message = progress_message(video.progress);
            }
            if !operation.done {
                yield video.clone();
            }
        }

        let uri = video_uri(&operation)?;
        video.video_url = Some(client.download_url(&uri));
        video.progress = 100.0;
        video.status = VideoStatus::Success;
        video.status_message = READY_MESSAGE.to_string();
        yield video;
    }
}

fn video_uri(operation: &VideoOperation) -> StudioResult<String> {
    operation.video_uri.clone().ok_or_else(|| {
        StudioError::Invariant(format!(
            "video operation {} finished without a video",
            operation.name
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_progress_without_decimals() {
        assert_eq!(progress_message(42.6), "Processing video: 43% complete.");
    }

    #[test]
    fn rejects_empty_prompt() {
        let client = GenAiClient::new(std::sync::Arc::new(
            genai_sdk::genai_sdk_test::MockGenerativeModel::new(),
        ));
        let result = start_video(client, &StudioConfig::default(), "   ", None);
        assert!(matches!(result, Err(StudioError::Validation(_))));
    }
}
