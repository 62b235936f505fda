use super::api::{
    Blob, Content as GeminiContent, GenerateContentParameters, GenerateContentResponse,
    GenerationConfig as GeminiGenerationConfig, GoogleSearch, ImageInstance, ImageOutputOptions,
    ImageParameters, Operation, Part as GeminiPart, PredictImageRequest, PredictImageResponse,
    PredictVideoRequest, Tool, UsageMetadata, VideoImage, VideoInstance, VideoParameters,
};
use crate::{
    client_utils, Content, ContentRequest, ContentResponse, GeneratedImage, GenerativeModel,
    GenerativeModelError, GenerativeModelResult, ImageRequest, InputPart, ModelUsage, Role,
    Source, ToolOption, VideoOperation, VideoRequest,
};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client,
};
use std::collections::HashMap;

const PROVIDER: &str = "google";
const API_KEY_HEADER: &str = "x-goog-api-key";

const BLOCKING_FINISH_REASONS: &[&str] = &["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII"];

/// Talks to the Gemini API (`generativelanguage.googleapis.com`).
pub struct GeminiModel {
    api_key: String,
    base_url: String,
    client: Client,
    headers: HashMap<String, String>,
}

#[derive(Clone, Default)]
pub struct GeminiModelOptions {
    pub api_key: String,
    pub base_url: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub client: Option<Client>,
}

impl GeminiModel {
    #[must_use]
    pub fn new(options: GeminiModelOptions) -> Self {
        let GeminiModelOptions {
            api_key,
            base_url,
            headers,
            client,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| "https://generativelanguage.googleapis.com/v1beta".to_string())
            .trim_end_matches('/')
            .to_string();
        let client = client.unwrap_or_else(Client::new);
        let headers = headers.unwrap_or_default();

        Self {
            api_key,
            base_url,
            client,
            headers,
        }
    }

    fn request_headers(&self) -> GenerativeModelResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        for (key, value) in &self.headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|error| {
                GenerativeModelError::InvalidInput(format!(
                    "Invalid Gemini header name '{key}': {error}"
                ))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|error| {
                GenerativeModelError::InvalidInput(format!(
                    "Invalid Gemini header value for '{key}': {error}"
                ))
            })?;
            headers.insert(header_name, header_value);
        }

        let mut api_key = HeaderValue::from_str(&self.api_key).map_err(|_| {
            GenerativeModelError::InvalidInput(
                "The Gemini API key is not a valid header value".to_string(),
            )
        })?;
        api_key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, api_key);

        Ok(headers)
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }
}

#[async_trait::async_trait]
impl GenerativeModel for GeminiModel {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn generate_content(
        &self,
        request: ContentRequest,
    ) -> GenerativeModelResult<ContentResponse> {
        let url = self.model_url(&request.model, "generateContent");
        let params = convert_to_generate_content_parameters(request);
        let headers = self.request_headers()?;
        let response: GenerateContentResponse =
            client_utils::send_json(&self.client, &url, &params, headers).await?;
        map_generate_content_response(response)
    }

    async fn generate_image(
        &self,
        request: ImageRequest,
    ) -> GenerativeModelResult<Vec<GeneratedImage>> {
        let url = self.model_url(&request.model, "predict");
        let params = PredictImageRequest {
            instances: vec![ImageInstance {
                prompt: request.prompt,
            }],
            parameters: ImageParameters {
                sample_count: 1,
                aspect_ratio: Some(request.aspect_ratio.as_str().to_string()),
                output_options: Some(ImageOutputOptions {
                    mime_type: Some(request.mime_type.clone()),
                }),
            },
        };
        let headers = self.request_headers()?;
        let response: PredictImageResponse =
            client_utils::send_json(&self.client, &url, &params, headers).await?;
        map_predict_image_response(response, &request.mime_type)
    }

    async fn generate_videos(&self, request: VideoRequest) -> GenerativeModelResult<VideoOperation> {
        let url = self.model_url(&request.model, "predictLongRunning");
        let params = PredictVideoRequest {
            instances: vec![VideoInstance {
                prompt: request.prompt,
                image: request.image.map(|image| VideoImage {
                    bytes_base64_encoded: image.data,
                    mime_type: image.mime_type,
                }),
            }],
            parameters: VideoParameters { sample_count: 1 },
        };
        let headers = self.request_headers()?;
        let operation: Operation =
            client_utils::send_json(&self.client, &url, &params, headers).await?;
        Ok(map_operation(operation))
    }

    async fn get_videos_operation(
        &self,
        operation: &VideoOperation,
    ) -> GenerativeModelResult<VideoOperation> {
        if operation.name.is_empty() {
            return Err(GenerativeModelError::InvalidInput(
                "Video operation has no name".to_string(),
            ));
        }
        let url = format!("{}/{}", self.base_url, operation.name);
        let headers = self.request_headers()?;
        let operation: Operation = client_utils::get_json(&self.client, &url, headers).await?;
        Ok(map_operation(operation))
    }

    fn download_url(&self, uri: &str) -> String {
        let separator = if uri.contains('?') { '&' } else { '?' };
        format!("{uri}{separator}key={}", self.api_key)
    }
}

fn convert_to_generate_content_parameters(request: ContentRequest) -> GenerateContentParameters {
    let ContentRequest {
        contents, config, ..
    } = request;

    let tools = if config.tools.is_empty() {
        None
    } else {
        Some(
            config
                .tools
                .iter()
                .map(|tool| match tool {
                    ToolOption::GoogleSearch => Tool {
                        google_search: Some(GoogleSearch {}),
                    },
                })
                .collect(),
        )
    };

    let generation_config = if config.temperature.is_some()
        || config.response_mime_type.is_some()
        || config.response_schema.is_some()
    {
        Some(GeminiGenerationConfig {
            temperature: config.temperature,
            response_mime_type: config.response_mime_type,
            response_schema: config.response_schema,
        })
    } else {
        None
    };

    GenerateContentParameters {
        contents: contents.into_iter().map(convert_to_gemini_content).collect(),
        tools,
        system_instruction: config.system_instruction.map(|text| GeminiContent {
            parts: Some(vec![GeminiPart {
                text: Some(text),
                ..Default::default()
            }]),
            role: None,
        }),
        generation_config,
    }
}

fn convert_to_gemini_content(content: Content) -> GeminiContent {
    let role = match content.role {
        Role::User => "user",
        Role::Model => "model",
    };
    GeminiContent {
        parts: Some(
            content
                .parts
                .into_iter()
                .map(|part| match part {
                    InputPart::Text { text } => GeminiPart {
                        text: Some(text),
                        ..Default::default()
                    },
                    InputPart::InlineData(inline) => GeminiPart {
                        inline_data: Some(Blob {
                            data: Some(inline.data),
                            mime_type: Some(inline.mime_type),
                        }),
                        ..Default::default()
                    },
                })
                .collect(),
        ),
        role: Some(role.to_string()),
    }
}

fn map_generate_content_response(
    response: GenerateContentResponse,
) -> GenerativeModelResult<ContentResponse> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.clone())
    {
        return Err(GenerativeModelError::SafetyBlocked(reason));
    }

    let candidate = response
        .candidates
        .and_then(|c| c.into_iter().next())
        .ok_or_else(|| {
            GenerativeModelError::Invariant(PROVIDER, "No candidate in response".to_string())
        })?;

    let blocked_by_rating = candidate
        .safety_ratings
        .iter()
        .flatten()
        .any(|rating| rating.blocked == Some(true));
    if let Some(reason) = candidate
        .finish_reason
        .as_deref()
        .filter(|reason| BLOCKING_FINISH_REASONS.contains(reason))
    {
        return Err(GenerativeModelError::SafetyBlocked(reason.to_string()));
    }
    if blocked_by_rating {
        return Err(GenerativeModelError::SafetyBlocked("SAFETY".to_string()));
    }

    let text = candidate
        .content
        .and_then(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|part| part.thought != Some(true))
        .filter_map(|part| part.text)
        .collect::<String>();

    let sources = candidate
        .grounding_metadata
        .and_then(|metadata| metadata.grounding_chunks)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|chunk| chunk.web)
        .filter_map(|web| {
            let uri = web.uri?;
            let title = web.title.unwrap_or_else(|| uri.clone());
            Some(Source { uri, title })
        })
        .collect();

    Ok(ContentResponse {
        text,
        sources,
        usage: response.usage_metadata.as_ref().map(map_usage_metadata),
        finish_reason: candidate.finish_reason,
    })
}

fn map_usage_metadata(usage: &UsageMetadata) -> ModelUsage {
    ModelUsage {
        input_tokens: usage.prompt_token_count.unwrap_or_default(),
        output_tokens: usage.candidates_token_count.unwrap_or_default(),
    }
}

fn map_predict_image_response(
    response: PredictImageResponse,
    requested_mime_type: &str,
) -> GenerativeModelResult<Vec<GeneratedImage>> {
    let predictions = response.predictions.unwrap_or_default();
    let images: Vec<GeneratedImage> = predictions
        .iter()
        .filter_map(|prediction| {
            let bytes = prediction.bytes_base64_encoded.clone()?;
            Some(GeneratedImage {
                image_bytes: bytes,
                mime_type: prediction
                    .mime_type
                    .clone()
                    .unwrap_or_else(|| requested_mime_type.to_string()),
            })
        })
        .collect();

    if images.is_empty() {
        if let Some(reason) = predictions
            .into_iter()
            .find_map(|prediction| prediction.rai_filtered_reason)
        {
            return Err(GenerativeModelError::SafetyBlocked(reason));
        }
    }
    Ok(images)
}

fn map_operation(operation: Operation) -> VideoOperation {
    let error = operation.error.map(|error| match (error.code, error.message) {
        (Some(code), Some(message)) => format!("{message} (code {code})"),
        (None, Some(message)) => message,
        (Some(code), None) => format!("code {code}"),
        (None, None) => "unknown error".to_string(),
    });
    let video_uri = operation
        .response
        .and_then(|response| response.generate_video_response)
        .and_then(|response| response.generated_samples)
        .and_then(|samples| samples.into_iter().find_map(|sample| sample.video?.uri));

    VideoOperation {
        name: operation.name,
        done: operation.done,
        progress_percentage: operation
            .metadata
            .and_then(|metadata| metadata.progress_percentage),
        error,
        video_uri,
    }
}
