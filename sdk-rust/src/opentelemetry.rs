use crate::{ApiError, ModelUsage};
use opentelemetry::trace::Status;
use std::time::Instant;
use tracing::{info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub const GENERATE_CONTENT: &str = "generateContent";
pub const GENERATE_IMAGE: &str = "generateImage";
pub const GENERATE_VIDEOS: &str = "generateVideos";
pub const GET_VIDEOS_OPERATION: &str = "getVideosOperation";

pub struct ApiSpan {
    span: Span,
    usage: Option<ModelUsage>,
    start_time: Instant,
    temperature: Option<f64>,
    ended: bool,
}

impl ApiSpan {
    pub fn new(provider: &str, operation: &str, model_id: &str, temperature: Option<f64>) -> Self {
        let span = match operation {
            GENERATE_IMAGE => info_span!("genai_sdk.generate_image"),
            GENERATE_VIDEOS => info_span!("genai_sdk.generate_videos"),
            GET_VIDEOS_OPERATION => info_span!("genai_sdk.get_videos_operation"),
            _ => info_span!("genai_sdk.generate_content"),
        };
        span.set_attribute("gen_ai.operation.name", operation.to_string());
        span.set_attribute("gen_ai.provider.name", provider.to_string());
        if !model_id.is_empty() {
            span.set_attribute("gen_ai.request.model", model_id.to_string());
        }

        Self {
            span,
            usage: None,
            start_time: Instant::now(),
            temperature,
            ended: false,
        }
    }

    pub async fn instrument_future<F>(&self, future: F) -> F::Output
    where
        F: std::future::Future,
    {
        future.instrument(self.span.clone()).await
    }

    pub fn on_usage(&mut self, usage: Option<&ModelUsage>) {
        if let Some(usage) = usage {
            self.usage = Some(usage.clone());
        }
    }

    pub fn on_error(&mut self, error: &ApiError) {
        self.span
            .set_attribute("exception.message", error.message.clone());
        self.span
            .set_attribute("error.type", format!("{:?}", error.kind));
        self.span.set_status(Status::error(error.message.clone()));
    }

    pub fn on_end(&mut self) {
        if self.ended {
            return;
        }
        self.ended = true;

        if let Some(usage) = &self.usage {
            self.span
                .set_attribute("gen_ai.usage.input_tokens", i64::from(usage.input_tokens));
            self.span
                .set_attribute("gen_ai.usage.output_tokens", i64::from(usage.output_tokens));
        }
        if let Some(temperature) = self.temperature {
            self.span
                .set_attribute("gen_ai.request.temperature", temperature);
        }
        self.span.set_attribute(
            "genai_sdk.duration_seconds",
            self.start_time.elapsed().as_secs_f64(),
        );
    }
}

impl Drop for ApiSpan {
    fn drop(&mut self) {
        self.on_end();
    }
}
