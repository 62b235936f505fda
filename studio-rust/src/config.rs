use crate::{keystone::PartnerRegistry, strategies::DailyMetric};
use std::time::Duration;

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-3.0-generate-002";
pub const DEFAULT_VIDEO_MODEL: &str = "veo-2.0-generate-001";
pub const DEFAULT_HISTORY_LIMIT: usize = 50;
pub const DEFAULT_MAX_VARIATIONS: usize = 4;
pub const DEFAULT_VIDEO_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Brand guide used for brand review and brand chat when none is configured.
pub const DEFAULT_BRAND_CONTEXT: &str = "\
Brand: GIX Studio.
Mission: help small creators publish honest, useful content that earns trust.
Voice: clear, upbeat and practical. Confident without hype. Plain words over jargon.
Audience: independent creators and small business owners, 25 to 45, busy and skeptical of gimmicks.
Values: transparency, craft, community.
Do: lead with a concrete benefit, keep sentences short, use at most three hashtags.
Don't: make unverifiable claims, use fear-based urgency, or write in all caps.";

/// Settings shared by every generation in a studio session.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub text_model: String,
    pub image_model: String,
    pub video_model: String,
    pub brand_context: String,
    pub partners: PartnerRegistry,
    /// Series summarized by the page performance analysis.
    pub page_metrics: Vec<DailyMetric>,
    pub history_limit: usize,
    pub max_variations: usize,
    pub video_poll_interval: Duration,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            video_model: DEFAULT_VIDEO_MODEL.to_string(),
            brand_context: DEFAULT_BRAND_CONTEXT.to_string(),
            partners: PartnerRegistry::builtin(),
            page_metrics: DailyMetric::bundled(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            max_variations: DEFAULT_MAX_VARIATIONS,
            video_poll_interval: DEFAULT_VIDEO_POLL_INTERVAL,
        }
    }
}

impl StudioConfig {
    /// Start from the defaults:
    /// - `text_model`: `gemini-2.5-flash`
    /// - `image_model`: `imagen-3.0-generate-002`
    /// - `video_model`: `veo-2.0-generate-001`
    /// - `brand_context`: [`DEFAULT_BRAND_CONTEXT`]
    /// - `partners`: [`PartnerRegistry::builtin`]
    /// - `page_metrics`: [`DailyMetric::bundled`]
    /// - `history_limit`: 50
    /// - `max_variations`: 4
    /// - `video_poll_interval`: 10 seconds
    pub fn builder() -> StudioConfigBuilder {
        StudioConfigBuilder {
            config: Self::default(),
        }
    }
}

pub struct StudioConfigBuilder {
    config: StudioConfig,
}

impl StudioConfigBuilder {
    #[must_use]
    pub fn text_model(mut self, model: impl Into<String>) -> Self {
        self.config.text_model = model.into();
        self
    }

    #[must_use]
    pub fn image_model(mut self, model: impl Into<String>) -> Self {
        self.config.image_model = model.into();
        self
    }

    #[must_use]
    pub fn video_model(mut self, model: impl Into<String>) -> Self {
        self.config.video_model = model.into();
        self
    }

    #[must_use]
    pub fn brand_context(mut self, brand_context: impl Into<String>) -> Self {
        self.config.brand_context = brand_context.into();
        self
    }

    #[must_use]
    pub fn partners(mut self, partners: PartnerRegistry) -> Self {
        self.config.partners = partners;
        self
    }

    #[must_use]
    pub fn page_metrics(mut self, metrics: Vec<DailyMetric>) -> Self {
        self.config.page_metrics = metrics;
        self
    }

    /// Number of history entries kept. Clamped to at least 1.
    #[must_use]
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit.max(1);
        self
    }

    /// Upper bound on variations per request. Clamped to at least 1.
    #[must_use]
    pub fn max_variations(mut self, max: usize) -> Self {
        self.config.max_variations = max.max(1);
        self
    }

    #[must_use]
    pub fn video_poll_interval(mut self, interval: Duration) -> Self {
        self.config.video_poll_interval = interval;
        self
    }

    pub fn build(self) -> StudioConfig {
        self.config
    }
}
