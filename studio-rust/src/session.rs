use crate::{
    chat::BrandChat,
    content::{BrandReview, GeneratedVideo, ImageSlot, Status, VideoStatus},
    history::{HistoryItem, HistoryStore, MemoryHistoryStore},
    strategies::{review, strategy_for},
    video::{self, VideoStream},
    ContentType, GeneratedContent, GenerationInput, StudioConfig, StudioError, StudioResult,
};
use futures::{future::try_join_all, lock::Mutex, StreamExt};
use genai_sdk::{AspectRatio, GenAiClient, ImageRequest, InlineData};
use std::sync::Arc;
use tracing::{debug, info_span, warn};
use tracing_futures::Instrument;

/// Observable state of a [`GenerationSession`].
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub status: Status,
    pub error: Option<String>,
    pub variations: Vec<GeneratedContent>,
    pub current_index: usize,
    pub image_status: Status,
    pub image_error: Option<String>,
    pub video: Option<GeneratedVideo>,
    pub last_input: Option<GenerationInput>,
    request_id: u64,
}

impl SessionState {
    pub fn current(&self) -> Option<&GeneratedContent> {
        self.variations.get(self.current_index)
    }
}

/// Coordinates generations for one user: runs variations, tracks loading
/// and error state, drives the image, review and video sub-flows, and
/// records successes in the history log.
///
/// Cloning is cheap and clones share state.
#[derive(Clone)]
pub struct GenerationSession {
    client: GenAiClient,
    config: Arc<StudioConfig>,
    history: Arc<dyn HistoryStore>,
    state: Arc<Mutex<SessionState>>,
}

impl GenerationSession {
    pub fn new(
        client: GenAiClient,
        config: Arc<StudioConfig>,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            client,
            config,
            history,
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    /// Session with an in-memory history capped at `config.history_limit`.
    pub fn in_memory(client: GenAiClient, config: Arc<StudioConfig>) -> Self {
        let history = Arc::new(MemoryHistoryStore::new(config.history_limit));
        Self::new(client, config, history)
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    /// Generate content for `input`.
    ///
    /// Request parameters are built once, then the requested number of
    /// variations run concurrently. Any failure fails the whole request.
    /// Results keep issuance order. A request superseded by a newer one
    /// still returns its result but leaves the session state alone.
    pub async fn generate(&self, input: GenerationInput) -> StudioResult<Vec<GeneratedContent>> {
        let span = info_span!("content_studio.generate", content_type = %input.content_type);
        let request_id = self.begin(&input).await;

        let result = self.run_variations(&input).instrument(span).await;

        let mut state = self.state.lock().await;
        let current = state.request_id == request_id;
        if !current {
            debug!(request_id, "discarding superseded generation");
        }
        match &result {
            Ok(variations) => {
                if current {
                    state.status = Status::Success;
                    state.variations.clone_from(variations);
                    state.current_index = 0;
                }
                drop(state);
                self.record(HistoryItem::new(
                    input.prompt_summary(),
                    input.content_type,
                    variations.clone(),
                ));
            }
            Err(error) => {
                if current {
                    state.status = Status::Error;
                    state.error = Some(error.to_string());
                }
            }
        }
        result
    }

    async fn begin(&self, input: &GenerationInput) -> u64 {
        let mut state = self.state.lock().await;
        state.request_id += 1;
        state.status = Status::Loading;
        state.error = None;
        state.variations.clear();
        state.current_index = 0;
        state.image_status = Status::Idle;
        state.image_error = None;
        state.last_input = Some(input.clone());
        state.request_id
    }

    async fn run_variations(&self, input: &GenerationInput) -> StudioResult<Vec<GeneratedContent>> {
        let strategy = strategy_for(input.content_type)?;
        let request = (strategy.build_params)(input, &self.config)?;
        let count = strategy.variation_count(input.num_variations, self.config.max_variations);
        debug!(count, model = %request.model, "generating variations");

        let generations = (0..count).map(|_| {
            let request = request.clone();
            async move {
                let response = self.client.generate_content(request).await?;
                (strategy.parse_response)(&response, input, &self.config)
            }
        });
        try_join_all(generations).await
    }

    fn record(&self, item: HistoryItem) {
        if let Err(error) = self.history.append(item) {
            warn!(%error, "failed to save history");
        }
    }

    pub fn history(&self) -> StudioResult<Vec<HistoryItem>> {
        Ok(self.history.list()?)
    }

    pub fn clear_history(&self) -> StudioResult<()> {
        Ok(self.history.clear()?)
    }

    pub async fn select_variation(&self, index: usize) -> StudioResult<()> {
        let mut state = self.state.lock().await;
        if index >= state.variations.len() {
            return Err(StudioError::validation(format!(
                "There is no variation {} to select.",
                index + 1
            )));
        }
        state.current_index = index;
        Ok(())
    }

    /// Edit the image prompt of the variation at `index`.
    pub async fn set_image_prompt(&self, index: usize, prompt: &str) -> StudioResult<()> {
        let mut state = self.state.lock().await;
        let (image_prompt, slot) = image_parts(&mut state.variations, index)?;
        *image_prompt = prompt.to_string();
        if *slot == ImageSlot::Empty && !prompt.trim().is_empty() {
            *slot = ImageSlot::PromptReady;
        }
        Ok(())
    }

    /// Render the image prompt of the variation at `index` and attach the
    /// image to it. Returns the image as a data URL.
    pub async fn generate_image(&self, index: usize, aspect_ratio: AspectRatio) -> StudioResult<String> {
        let (request_id, prompt) = {
            let mut state = self.state.lock().await;
            let (prompt, _) = image_parts(&mut state.variations, index)?;
            let prompt = prompt.trim().to_string();
            if prompt.is_empty() {
                return Err(StudioError::validation("Please provide an image prompt."));
            }
            state.image_status = Status::Loading;
            state.image_error = None;
            (state.request_id, prompt)
        };

        let span = info_span!("content_studio.image", aspect_ratio = aspect_ratio.as_str());
        let request = ImageRequest::new(self.config.image_model.clone(), prompt, aspect_ratio);
        let result = self.client.generate_image(request).instrument(span).await;

        let mut state = self.state.lock().await;
        if state.request_id != request_id {
            return Ok(result?.data_url());
        }
        match result {
            Ok(image) => {
                let data_url = image.data_url();
                if let Ok((_, slot)) = image_parts(&mut state.variations, index) {
                    *slot = ImageSlot::Ready(data_url.clone());
                }
                state.image_status = Status::Success;
                Ok(data_url)
            }
            Err(error) => {
                state.image_status = Status::Error;
                state.image_error = Some(error.message.clone());
                Err(error.into())
            }
        }
    }

    /// Score the variation at `index` against the brand guide and attach the
    /// verdict to it.
    pub async fn review(&self, index: usize) -> StudioResult<BrandReview> {
        let (request_id, content_type, request) = {
            let mut state = self.state.lock().await;
            let content = state.variations.get_mut(index).ok_or_else(|| {
                StudioError::validation("There is no generated content to review.")
            })?;
            let content_type = content.content_type();
            let extract = strategy_for(content_type)?
                .extract_text_for_review
                .ok_or_else(|| {
                    StudioError::validation("Brand review is not available for this content.")
                })?;
            let request = review::build_review_request(&extract(content), &self.config)?;
            let slot = content
                .review_mut()
                .ok_or_else(|| StudioError::Invariant(format!("{content_type} has no review slot")))?;
            *slot = BrandReview {
                status: Status::Loading,
                ..BrandReview::default()
            };
            (state.request_id, content_type, request)
        };

        let span = info_span!("content_studio.review", %content_type);
        let result = async {
            let response = self.client.generate_content(request).await?;
            review::parse_review(&response)
        }
        .instrument(span)
        .await;

        let outcome = match &result {
            Ok(alignment) => BrandReview {
                status: Status::Success,
                alignment: Some(alignment.clone()),
                error: None,
            },
            Err(error) => BrandReview {
                status: Status::Error,
                alignment: None,
                error: Some(error.to_string()),
            },
        };

        let mut state = self.state.lock().await;
        if state.request_id == request_id {
            if let Some(slot) = state
                .variations
                .get_mut(index)
                .filter(|content| content.content_type() == content_type)
                .and_then(GeneratedContent::review_mut)
            {
                slot.clone_from(&outcome);
            }
        }
        result.map(|_| outcome)
    }

    /// Second stage of an SEO blog post: write the article for `title` and
    /// advance the current variation to the article stage.
    pub async fn select_seo_title(&self, title: &str) -> StudioResult<GeneratedContent> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StudioError::validation("Please select a title."));
        }

        let (request_id, index, input) = {
            let mut state = self.state.lock().await;
            let index = state.current_index;
            let Some(GeneratedContent::SeoBlogPost(post)) = state.variations.get(index) else {
                return Err(StudioError::validation(
                    "Generate SEO title ideas before selecting a title.",
                ));
            };
            let mut input = state
                .last_input
                .clone()
                .filter(|input| input.content_type == ContentType::SeoBlogPost)
                .unwrap_or_else(|| GenerationInput::new(ContentType::SeoBlogPost));
            input.seo_blog = post.user_input.clone();
            input.selected_title = Some(title.to_string());
            input.num_variations = 1;

            state.request_id += 1;
            state.status = Status::Loading;
            state.error = None;
            (state.request_id, index, input)
        };

        let span = info_span!("content_studio.generate", content_type = %input.content_type);
        let result = self.run_variations(&input).instrument(span).await;

        let mut state = self.state.lock().await;
        let current = state.request_id == request_id;
        let article = result.and_then(|mut variations| match variations.pop() {
            Some(GeneratedContent::SeoBlogPost(article)) => Ok(article),
            _ => Err(StudioError::Invariant(
                "SEO article generation returned no article".to_string(),
            )),
        });
        let article = match article {
            Ok(article) => article,
            Err(error) => {
                if current {
                    state.status = Status::Error;
                    state.error = Some(error.to_string());
                }
                return Err(error);
            }
        };

        let mut advanced = match state.variations.get(index) {
            Some(GeneratedContent::SeoBlogPost(post)) => post.clone(),
            _ => article.clone(),
        };
        advanced.advance(article);
        let advanced = GeneratedContent::SeoBlogPost(advanced);
        if current {
            if let Some(slot) = state.variations.get_mut(index) {
                *slot = advanced.clone();
            }
            state.status = Status::Success;
        }
        drop(state);

        self.record(HistoryItem::new(
            title,
            ContentType::SeoBlogPost,
            vec![advanced.clone()],
        ));
        Ok(advanced)
    }

    /// Rewrite a video prompt to be more cinematic.
    pub async fn enhance_video_prompt(&self, prompt: &str) -> StudioResult<String> {
        let request = review::build_video_prompt_enhancement(prompt, &self.config)?;
        let response = self
            .client
            .generate_content(request)
            .instrument(info_span!("content_studio.enhance_video_prompt"))
            .await?;
        Ok(response.text.trim().to_string())
    }

    /// Start a video job. Each progress snapshot is mirrored into
    /// [`SessionState::video`]; a finished video is recorded in history.
    pub fn generate_video(&self, prompt: &str, image: Option<InlineData>) -> StudioResult<VideoStream> {
        let mut inner = video::start_video(self.client.clone(), &self.config, prompt, image)?;
        let session = self.clone();

        let stream = async_stream::try_stream! {
            while let Some(snapshot) = inner.next().await {
                if let Err(error) = &snapshot {
                    session.fail_video(error).await;
                }
                let snapshot = snapshot?;
                session.state.lock().await.video = Some(snapshot.clone());
                if snapshot.status == VideoStatus::Success {
                    session.record(HistoryItem::new(
                        snapshot.prompt.clone(),
                        ContentType::VideoGeneration,
                        vec![GeneratedContent::VideoGeneration(snapshot.clone())],
                    ));
                }
                yield snapshot;
            }
        };
        Ok(boxed(stream))
    }

    async fn fail_video(&self, error: &StudioError) {
        let mut state = self.state.lock().await;
        if let Some(video) = state.video.as_mut() {
            video.status = VideoStatus::Error;
            video.status_message = error.to_string();
        }
    }

    /// A fresh brand chat using this session's client and configuration.
    pub fn brand_chat(&self) -> BrandChat {
        BrandChat::new(self.client.clone(), &self.config)
    }
}

fn boxed<S>(stream: S) -> VideoStream
where
    S: futures::Stream<Item = StudioResult<GeneratedVideo>> + Send + 'static,
{
    Box::pin(stream)
}

fn image_parts(
    variations: &mut [GeneratedContent],
    index: usize,
) -> StudioResult<(&mut String, &mut ImageSlot)> {
    variations
        .get_mut(index)
        .ok_or_else(|| StudioError::validation("There is no generated content for an image."))?
        .image_parts_mut()
        .ok_or_else(|| StudioError::validation("This content does not have an image."))
}
