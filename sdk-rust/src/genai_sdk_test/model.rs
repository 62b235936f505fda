use std::{collections::VecDeque, sync::Mutex};

use crate::{
    ContentRequest, ContentResponse, GeneratedImage, GenerativeModel, GenerativeModelError,
    GenerativeModelResult, ImageRequest, VideoOperation, VideoRequest,
};

/// Result for a mocked call.
/// It can either be a value or an error to return.
pub enum MockResult<T> {
    Value(T),
    Error(GenerativeModelError),
}

impl<T> MockResult<T> {
    /// Construct a result that yields the provided error.
    pub fn error(error: GenerativeModelError) -> Self {
        Self::Error(error)
    }

    fn into_result(self) -> GenerativeModelResult<T> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Error(error) => Err(error),
        }
    }
}

impl<T> From<GenerativeModelResult<T>> for MockResult<T> {
    fn from(result: GenerativeModelResult<T>) -> Self {
        match result {
            Ok(value) => Self::Value(value),
            Err(error) => Self::Error(error),
        }
    }
}

impl From<ContentResponse> for MockResult<ContentResponse> {
    fn from(response: ContentResponse) -> Self {
        Self::Value(response)
    }
}

impl From<&str> for MockResult<ContentResponse> {
    fn from(text: &str) -> Self {
        Self::Value(ContentResponse::from_text(text))
    }
}

impl From<GeneratedImage> for MockResult<Vec<GeneratedImage>> {
    fn from(image: GeneratedImage) -> Self {
        Self::Value(vec![image])
    }
}

impl From<Vec<GeneratedImage>> for MockResult<Vec<GeneratedImage>> {
    fn from(images: Vec<GeneratedImage>) -> Self {
        Self::Value(images)
    }
}

impl From<VideoOperation> for MockResult<VideoOperation> {
    fn from(operation: VideoOperation) -> Self {
        Self::Value(operation)
    }
}

#[derive(Default)]
struct MockGenerativeModelState {
    mocked_content_results: VecDeque<MockResult<ContentResponse>>,
    mocked_image_results: VecDeque<MockResult<Vec<GeneratedImage>>>,
    mocked_video_results: VecDeque<MockResult<VideoOperation>>,
    mocked_poll_results: VecDeque<MockResult<VideoOperation>>,
    tracked_content_requests: Vec<ContentRequest>,
    tracked_image_requests: Vec<ImageRequest>,
    tracked_video_requests: Vec<VideoRequest>,
    tracked_polls: Vec<VideoOperation>,
}

impl MockGenerativeModelState {
    fn reset(&mut self) {
        self.tracked_content_requests.clear();
        self.tracked_image_requests.clear();
        self.tracked_video_requests.clear();
        self.tracked_polls.clear();
    }

    fn restore(&mut self) {
        self.mocked_content_results.clear();
        self.mocked_image_results.clear();
        self.mocked_video_results.clear();
        self.mocked_poll_results.clear();
        self.reset();
    }
}

/// A mock generative model for testing that tracks requests and yields
/// predefined outputs in the order they were enqueued.
pub struct MockGenerativeModel {
    provider: &'static str,
    api_key: String,
    state: Mutex<MockGenerativeModelState>,
}

impl Default for MockGenerativeModel {
    fn default() -> Self {
        Self {
            provider: "mock",
            api_key: "mock-key".to_string(),
            state: Mutex::new(MockGenerativeModelState::default()),
        }
    }
}

impl MockGenerativeModel {
    /// Construct a new mock model instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the provider identifier returned by the mock.
    pub fn set_provider(&mut self, provider: &'static str) {
        self.provider = provider;
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut MockGenerativeModelState) -> R) -> R {
        let mut state = self.state.lock().expect("mock state poisoned");
        f(&mut state)
    }

    /// Enqueue a mocked `generate_content` result.
    pub fn enqueue_content<R>(&self, result: R) -> &Self
    where
        R: Into<MockResult<ContentResponse>>,
    {
        self.with_state(|state| state.mocked_content_results.push_back(result.into()));
        self
    }

    /// Enqueue a mocked `generate_image` result.
    pub fn enqueue_image<R>(&self, result: R) -> &Self
    where
        R: Into<MockResult<Vec<GeneratedImage>>>,
    {
        self.with_state(|state| state.mocked_image_results.push_back(result.into()));
        self
    }

    /// Enqueue a mocked `generate_videos` result.
    pub fn enqueue_video<R>(&self, result: R) -> &Self
    where
        R: Into<MockResult<VideoOperation>>,
    {
        self.with_state(|state| state.mocked_video_results.push_back(result.into()));
        self
    }

    /// Enqueue a mocked `get_videos_operation` result.
    pub fn enqueue_poll<R>(&self, result: R) -> &Self
    where
        R: Into<MockResult<VideoOperation>>,
    {
        self.with_state(|state| state.mocked_poll_results.push_back(result.into()));
        self
    }

    pub fn tracked_content_requests(&self) -> Vec<ContentRequest> {
        self.with_state(|state| state.tracked_content_requests.clone())
    }

    pub fn tracked_image_requests(&self) -> Vec<ImageRequest> {
        self.with_state(|state| state.tracked_image_requests.clone())
    }

    pub fn tracked_video_requests(&self) -> Vec<VideoRequest> {
        self.with_state(|state| state.tracked_video_requests.clone())
    }

    pub fn tracked_polls(&self) -> Vec<VideoOperation> {
        self.with_state(|state| state.tracked_polls.clone())
    }

    /// Reset tracked requests without touching enqueued results.
    pub fn reset(&self) {
        self.with_state(MockGenerativeModelState::reset);
    }

    /// Clear both tracked requests and enqueued results.
    pub fn restore(&self) {
        self.with_state(MockGenerativeModelState::restore);
    }

    fn exhausted(&self, method: &str) -> GenerativeModelError {
        GenerativeModelError::Invariant(
            self.provider,
            format!("no mocked {method} results available"),
        )
    }
}

#[async_trait::async_trait]
impl GenerativeModel for MockGenerativeModel {
    fn provider(&self) -> &'static str {
        self.provider
    }

    async fn generate_content(
        &self,
        request: ContentRequest,
    ) -> GenerativeModelResult<ContentResponse> {
        let result = self.with_state(|state| {
            state.tracked_content_requests.push(request);
            state.mocked_content_results.pop_front()
        });
        result
            .ok_or_else(|| self.exhausted("generate_content"))?
            .into_result()
    }

    async fn generate_image(
        &self,
        request: ImageRequest,
    ) -> GenerativeModelResult<Vec<GeneratedImage>> {
        let result = self.with_state(|state| {
            state.tracked_image_requests.push(request);
            state.mocked_image_results.pop_front()
        });
        result
            .ok_or_else(|| self.exhausted("generate_image"))?
            .into_result()
    }

    async fn generate_videos(&self, request: VideoRequest) -> GenerativeModelResult<VideoOperation> {
        let result = self.with_state(|state| {
            state.tracked_video_requests.push(request);
            state.mocked_video_results.pop_front()
        });
        result
            .ok_or_else(|| self.exhausted("generate_videos"))?
            .into_result()
    }

    async fn get_videos_operation(
        &self,
        operation: &VideoOperation,
    ) -> GenerativeModelResult<VideoOperation> {
        let result = self.with_state(|state| {
            state.tracked_polls.push(operation.clone());
            state.mocked_poll_results.pop_front()
        });
        result
            .ok_or_else(|| self.exhausted("get_videos_operation"))?
            .into_result()
    }

    fn download_url(&self, uri: &str) -> String {
        let separator = if uri.contains('?') { '&' } else { '?' };
        format!("{uri}{separator}key={}", self.api_key)
    }
}
