use crate::{GenerativeModelError, GenerativeModelResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Media sent inline with a prompt, base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineData {
    pub mime_type: String,
    /// The base64-encoded media data.
    pub data: String,
}

impl InlineData {
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Parse a `data:<mime>;base64,<payload>` URL as produced by browsers
    /// and by [`GeneratedImage::data_url`].
    pub fn from_data_url(url: &str) -> GenerativeModelResult<Self> {
        let invalid = || GenerativeModelError::InvalidInput("Invalid image data URL".to_string());
        let rest = url.trim().strip_prefix("data:").ok_or_else(invalid)?;
        let (header, payload) = rest.split_once(',').ok_or_else(invalid)?;
        let mime_type = header.strip_suffix(";base64").ok_or_else(invalid)?;
        if mime_type.is_empty() {
            return Err(invalid());
        }
        let data: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        STANDARD.decode(&data).map_err(|error| {
            GenerativeModelError::InvalidInput(format!("Invalid base64 image data: {error}"))
        })?;
        Ok(Self {
            mime_type: mime_type.to_string(),
            data,
        })
    }

    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputPart {
    Text { text: String },
    InlineData(InlineData),
}

impl InputPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

impl From<InlineData> for InputPart {
    fn from(value: InlineData) -> Self {
        Self::InlineData(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<InputPart>,
}

impl Content {
    #[must_use]
    pub fn user(parts: Vec<InputPart>) -> Self {
        Self {
            role: Role::User,
            parts,
        }
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Self::user(vec![InputPart::text(text)])
    }

    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![InputPart::text(text)],
        }
    }

    /// Concatenated text of all text parts.
    #[must_use]
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                InputPart::Text { text } => Some(text.as_str()),
                InputPart::InlineData(_) => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolOption {
    /// Let the model ground its answer with web search.
    GoogleSearch,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    /// JSON schema the response must conform to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolOption>,
}

/// A request for text content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRequest {
    pub model: String,
    pub contents: Vec<Content>,
    #[serde(default)]
    pub config: GenerationConfig,
}

impl ContentRequest {
    pub fn new(model: impl Into<String>, contents: Vec<Content>) -> Self {
        Self {
            model: model.into(),
            contents,
            config: GenerationConfig::default(),
        }
    }

    #[must_use]
    pub fn system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.config.system_instruction = Some(instruction.into());
        self
    }

    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Ask for a JSON response conforming to `schema`.
    #[must_use]
    pub fn json_schema(mut self, schema: Value) -> Self {
        self.config.response_mime_type = Some("application/json".to_string());
        self.config.response_schema = Some(schema);
        self
    }

    #[must_use]
    pub fn tool(mut self, tool: ToolOption) -> Self {
        if !self.config.tools.contains(&tool) {
            self.config.tools.push(tool);
        }
        self
    }
}

/// A web page cited by a grounded response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentResponse {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<ModelUsage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl ContentResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sources(mut self, sources: Vec<Source>) -> Self {
        self.sources = sources;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Widescreen,
    #[serde(rename = "9:16")]
    Vertical,
    #[serde(rename = "4:3")]
    Landscape,
    #[serde(rename = "3:4")]
    Portrait,
}

impl AspectRatio {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Widescreen => "16:9",
            Self::Vertical => "9:16",
            Self::Landscape => "4:3",
            Self::Portrait => "3:4",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
    pub mime_type: String,
}

impl ImageRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, aspect_ratio: AspectRatio) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            aspect_ratio,
            mime_type: "image/jpeg".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// The base64-encoded image.
    pub image_bytes: String,
    pub mime_type: String,
}

impl GeneratedImage {
    #[must_use]
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.image_bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRequest {
    pub model: String,
    pub prompt: String,
    /// Optional first frame to animate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<InlineData>,
}

/// Handle on a long-running video generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoOperation {
    pub name: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_uri: Option<String>,
}

impl VideoOperation {
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_data_url_and_strips_line_breaks() {
        let inline = InlineData::from_data_url("data:image/png;base64,aGVs\nbG8=").unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, "aGVsbG8=");
        assert_eq!(inline.to_data_url(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn rejects_data_url_without_base64_marker() {
        let result = InlineData::from_data_url("data:image/png,hello");
        assert!(matches!(result, Err(GenerativeModelError::InvalidInput(_))));
        assert!(InlineData::from_data_url("data:image/png;base64,@@@").is_err());
    }

    #[test]
    fn aspect_ratio_serializes_as_ratio_string() {
        let value = serde_json::to_value(AspectRatio::Widescreen).unwrap();
        assert_eq!(value, serde_json::json!("16:9"));
        assert_eq!(AspectRatio::Portrait.as_str(), "3:4");
    }

    #[test]
    fn json_schema_sets_mime_type() {
        let request = ContentRequest::new("m", vec![Content::user_text("hi")])
            .json_schema(serde_json::json!({ "type": "OBJECT" }))
            .tool(ToolOption::GoogleSearch)
            .tool(ToolOption::GoogleSearch);
        assert_eq!(
            request.config.response_mime_type.as_deref(),
            Some("application/json")
        );
        assert_eq!(request.config.tools, vec![ToolOption::GoogleSearch]);
    }
}
