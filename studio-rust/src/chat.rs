use crate::{strategies::review, StudioConfig, StudioError, StudioResult};
use genai_sdk::{Content, ContentRequest, GenAiClient};
use tracing::info_span;
use tracing_futures::Instrument;

/// A multi-turn conversation grounded in the brand context. Turns are kept
/// in memory only and never recorded in history.
pub struct BrandChat {
    client: GenAiClient,
    model: String,
    system_instruction: String,
    messages: Vec<Content>,
}

impl BrandChat {
    pub fn new(client: GenAiClient, config: &StudioConfig) -> Self {
        Self {
            client,
            model: config.text_model.clone(),
            system_instruction: review::brand_chat_instruction(config),
            messages: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[Content] {
        &self.messages
    }

    /// Send a user message and return the reply. On failure the user message
    /// is dropped so the conversation can be retried.
    pub async fn send(&mut self, message: &str) -> StudioResult<String> {
        let message = message.trim();
        if message.is_empty() {
            return Err(StudioError::validation("Please enter a message."));
        }
        self.messages.push(Content::user_text(message));

        let request = ContentRequest::new(self.model.clone(), self.messages.clone())
            .system_instruction(self.system_instruction.clone());
        let span = info_span!("content_studio.brand_chat", turns = self.messages.len());
        match self.client.generate_content(request).instrument(span).await {
            Ok(response) => {
                let reply = response.text.trim().to_string();
                self.messages.push(Content::model_text(reply.clone()));
                Ok(reply)
            }
            Err(error) => {
                self.messages.pop();
                Err(error.into())
            }
        }
    }

    pub fn reset(&mut self) {
        self.messages.clear();
    }
}
