use crate::{
    ContentRequest, ContentResponse, GeneratedImage, GenerativeModelResult, ImageRequest,
    VideoOperation, VideoRequest,
};

/// A provider able to generate text, images and videos.
#[async_trait::async_trait]
pub trait GenerativeModel: Send + Sync {
    fn provider(&self) -> &'static str;
    async fn generate_content(&self, request: ContentRequest)
        -> GenerativeModelResult<ContentResponse>;
    /// May return an empty list when the provider filtered every image.
    async fn generate_image(&self, request: ImageRequest)
        -> GenerativeModelResult<Vec<GeneratedImage>>;
    /// Start a long-running video generation.
    async fn generate_videos(&self, request: VideoRequest) -> GenerativeModelResult<VideoOperation>;
    /// Refresh the state of a video generation started by
    /// [`generate_videos`](Self::generate_videos).
    async fn get_videos_operation(
        &self,
        operation: &VideoOperation,
    ) -> GenerativeModelResult<VideoOperation>;
    /// URL from which a generated video can be downloaded by the caller.
    fn download_url(&self, uri: &str) -> String;
}
