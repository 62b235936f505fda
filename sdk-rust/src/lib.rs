mod client;
mod client_utils;
mod errors;
pub mod gemini;
pub mod genai_sdk_test;
mod generative_model;
mod opentelemetry;
mod retry;
mod types;

pub use client::{ApiResult, GenAiClient};
pub use errors::*;
pub use generative_model::GenerativeModel;
pub use retry::{with_retries, RetryClass, RetryPolicy};
pub use types::*;
