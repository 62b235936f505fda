use crate::{
    gemini::{GeminiModel, GeminiModelOptions},
    opentelemetry::{ApiSpan, GENERATE_CONTENT, GENERATE_IMAGE, GENERATE_VIDEOS, GET_VIDEOS_OPERATION},
    retry::{with_retries, RetryPolicy},
    ApiError, ContentRequest, ContentResponse, ErrorKind, GeneratedImage, GenerativeModel,
    GenerativeModelError, ImageRequest, VideoOperation, VideoRequest,
};
use std::sync::Arc;

pub type ApiResult<T> = Result<T, ApiError>;

/// Wraps a [`GenerativeModel`] with retries, response validation and error
/// normalization. Every failure surfaces as an [`ApiError`] tagged with the
/// operation that produced it.
#[derive(Clone)]
pub struct GenAiClient {
    model: Arc<dyn GenerativeModel>,
    retry_policy: RetryPolicy<GenerativeModelError>,
}

impl GenAiClient {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            model,
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Client backed by the Gemini API.
    #[must_use]
    pub fn gemini(options: GeminiModelOptions) -> Self {
        Self::new(Arc::new(GeminiModel::new(options)))
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy<GenerativeModelError>) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn retry_policy(&self) -> &RetryPolicy<GenerativeModelError> {
        &self.retry_policy
    }

    pub async fn generate_content(&self, request: ContentRequest) -> ApiResult<ContentResponse> {
        let mut span = ApiSpan::new(
            self.model.provider(),
            GENERATE_CONTENT,
            &request.model,
            request.config.temperature,
        );
        let result = span
            .instrument_future(with_retries(&self.retry_policy, || {
                self.model.generate_content(request.clone())
            }))
            .await
            .map_err(|error| normalize(&error, GENERATE_CONTENT))
            .and_then(|response| {
                if response.text.trim().is_empty() {
                    Err(ApiError::new(
                        ErrorKind::Parse,
                        "Content generation failed, the model returned an empty response.",
                        GENERATE_CONTENT,
                    ))
                } else {
                    Ok(response)
                }
            });
        span.on_usage(result.as_ref().ok().and_then(|response| response.usage.as_ref()));
        finish(span, result)
    }

    /// Generate a single image. Fails when the provider returned none.
    pub async fn generate_image(&self, request: ImageRequest) -> ApiResult<GeneratedImage> {
        let span = ApiSpan::new(self.model.provider(), GENERATE_IMAGE, &request.model, None);
        let result = span
            .instrument_future(with_retries(&self.retry_policy, || {
                self.model.generate_image(request.clone())
            }))
            .await
            .map_err(|error| normalize(&error, GENERATE_IMAGE))
            .and_then(|images| {
                images.into_iter().next().ok_or_else(|| {
                    ApiError::new(
                        ErrorKind::Unknown,
                        "Image generation failed, no images were returned. This could be due \
                         to safety filters or a temporary issue.",
                        GENERATE_IMAGE,
                    )
                })
            });
        finish(span, result)
    }

    /// Start a video generation. Poll it with
    /// [`get_videos_operation`](Self::get_videos_operation).
    pub async fn generate_videos(&self, request: VideoRequest) -> ApiResult<VideoOperation> {
        let span = ApiSpan::new(self.model.provider(), GENERATE_VIDEOS, &request.model, None);
        let result = span
            .instrument_future(with_retries(&self.retry_policy, || {
                self.model.generate_videos(request.clone())
            }))
            .await
            .map_err(|error| normalize(&error, GENERATE_VIDEOS))
            .and_then(|operation| {
                if operation.name.is_empty() {
                    Err(ApiError::new(
                        ErrorKind::Parse,
                        "Video generation did not return an operation to follow.",
                        GENERATE_VIDEOS,
                    ))
                } else {
                    check_operation(operation, GENERATE_VIDEOS)
                }
            });
        finish(span, result)
    }

    /// Refresh a video operation. A finished operation carrying an error, or
    /// finished without a video, is reported as a failure.
    pub async fn get_videos_operation(&self, operation: &VideoOperation) -> ApiResult<VideoOperation> {
        let span = ApiSpan::new(self.model.provider(), GET_VIDEOS_OPERATION, "", None);
        let result = span
            .instrument_future(with_retries(&self.retry_policy, || {
                self.model.get_videos_operation(operation)
            }))
            .await
            .map_err(|error| normalize(&error, GET_VIDEOS_OPERATION))
            .and_then(|operation| check_operation(operation, GET_VIDEOS_OPERATION));
        finish(span, result)
    }

    /// URL the caller can fetch a finished video from.
    pub fn download_url(&self, uri: &str) -> String {
        self.model.download_url(uri)
    }
}

fn check_operation(operation: VideoOperation, context: &str) -> ApiResult<VideoOperation> {
    if !operation.done {
        return Ok(operation);
    }
    if let Some(message) = &operation.error {
        let mut error =
            ApiError::from_model_error(&GenerativeModelError::OperationFailed(message.clone()), context);
        error.message = format!("Video operation failed with an error: {message}");
        tracing::error!(context, kind = ?error.kind, "video operation failed");
        return Err(error);
    }
    if operation.video_uri.is_none() {
        return Err(ApiError::new(
            ErrorKind::Parse,
            "Video generation completed, but no video URI was found.",
            context,
        ));
    }
    Ok(operation)
}

fn normalize(error: &GenerativeModelError, context: &str) -> ApiError {
    let api_error = ApiError::from_model_error(error, context);
    tracing::error!(context, kind = ?api_error.kind, error = %error, "API call failed");
    api_error
}

fn finish<T>(mut span: ApiSpan, result: ApiResult<T>) -> ApiResult<T> {
    if let Err(error) = &result {
        span.on_error(error);
    }
    span.on_end();
    result
}
