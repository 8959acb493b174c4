//! Gemini `generateContent` gateway
//!
//! Requests go out as JSON over a blocking `ureq` agent. Each call runs on
//! tokio's blocking pool so the caller's event loop stays responsive.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::task;
use tracing::{debug, info, warn};

use super::inline::{self, InlineImage};
use super::{prompt, GenerationMode, ImageGateway};
use crate::config::StudioConfig;
use crate::error::{GatewayError, StudioError, StudioResult};
use crate::state::data::{Category, ImageRef};

// ========== Wire format ==========

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl Part {
    fn image(image: InlineImage) -> Self {
        Self {
            inline_data: Some(image),
            text: None,
        }
    }

    fn text(text: impl Into<String>) -> Self {
        Self {
            inline_data: None,
            text: Some(text.into()),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: [&'static str; 2],
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
struct PromptFeedback {
    block_reason: Option<String>,
    block_reason_message: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct ErrorBody {
    message: String,
}

/// Source image for a request, resolved on the blocking pool
enum Input {
    Image(ImageRef),
    Text(String),
}

/// Gateway backed by the Gemini image model
#[derive(Clone)]
pub struct GeminiGateway {
    agent: ureq::Agent,
    endpoint: String,
    api_key: String,
    max_remote_image_bytes: u64,
}

impl std::fmt::Debug for GeminiGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGateway")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl GeminiGateway {
    /// Build a gateway from config. Fails when no API key is configured.
    pub fn new(config: &StudioConfig) -> StudioResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| StudioError::config("no API key configured"))?;

        let mut builder = ureq::AgentBuilder::new();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        info!(model = %config.model, "gemini gateway ready");
        Ok(Self {
            agent: builder.build(),
            endpoint: config.endpoint(),
            api_key,
            max_remote_image_bytes: config.max_remote_image_bytes,
        })
    }

    /// Send one request and extract the returned image
    async fn generate(&self, operation: &'static str, inputs: Vec<Input>) -> StudioResult<ImageRef> {
        let gateway = self.clone();
        debug!(operation, "dispatching generation request");

        let result = task::spawn_blocking(move || gateway.generate_blocking(inputs))
            .await
            .map_err(|e| GatewayError::Transport(format!("Task join error: {}", e)))?;

        match &result {
            Ok(_) => info!(operation, "generation succeeded"),
            Err(e) => warn!(operation, error = %e, "generation failed"),
        }
        result
    }

    fn generate_blocking(&self, inputs: Vec<Input>) -> StudioResult<ImageRef> {
        let mut parts = Vec::with_capacity(inputs.len());
        for input in inputs {
            parts.push(match input {
                Input::Image(image) => Part::image(inline::resolve_blocking(
                    &self.agent,
                    &image,
                    self.max_remote_image_bytes,
                )?),
                Input::Text(text) => Part::text(text),
            });
        }

        let request = GenerateRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_modalities: ["IMAGE", "TEXT"],
            },
        };

        let response = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .set("x-goog-api-key", &self.api_key)
            .send_json(&request)
            .map_err(error_from_ureq)?;

        let body: GenerateResponse = response
            .into_json()
            .map_err(|e| GatewayError::Transport(format!("Malformed response: {}", e)))?;
        extract_image(body)
    }
}

#[async_trait]
impl ImageGateway for GeminiGateway {
    async fn generate_portrait(
        &self,
        photo: &ImageRef,
        mode: GenerationMode,
    ) -> StudioResult<ImageRef> {
        self.generate(
            "portrait",
            vec![
                Input::Image(photo.clone()),
                Input::Text(prompt::portrait(mode).to_string()),
            ],
        )
        .await
    }

    async fn apply_garment(
        &self,
        person: &ImageRef,
        garment: &ImageRef,
        category: Category,
    ) -> StudioResult<ImageRef> {
        self.generate(
            "try-on",
            vec![
                Input::Image(person.clone()),
                Input::Image(garment.clone()),
                Input::Text(prompt::try_on(category).to_string()),
            ],
        )
        .await
    }

    async fn change_pose(&self, base: &ImageRef, pose: &str) -> StudioResult<ImageRef> {
        self.generate(
            "pose",
            vec![Input::Image(base.clone()), Input::Text(prompt::pose_change(pose))],
        )
        .await
    }

    async fn pose_from_reference(
        &self,
        base: &ImageRef,
        reference: &ImageRef,
    ) -> StudioResult<ImageRef> {
        self.generate(
            "pose-reference",
            vec![
                Input::Image(base.clone()),
                Input::Image(reference.clone()),
                Input::Text(prompt::pose_from_reference().to_string()),
            ],
        )
        .await
    }

    async fn recolor(&self, garment: &ImageRef, color: &str) -> StudioResult<ImageRef> {
        self.generate(
            "recolor",
            vec![Input::Image(garment.clone()), Input::Text(prompt::recolor(color))],
        )
        .await
    }
}

/// Classify a model response: first inline image wins
fn extract_image(response: GenerateResponse) -> StudioResult<ImageRef> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.clone())
    {
        let detail = response
            .prompt_feedback
            .and_then(|f| f.block_reason_message)
            .unwrap_or_default();
        return Err(GatewayError::Blocked { reason, detail }.into());
    }

    let image = response
        .candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|content| content.parts.iter())
        .find_map(|part| part.inline_data.as_ref());
    if let Some(image) = image {
        return Ok(image.to_image_ref());
    }

    let first = response.candidates.first();
    if let Some(reason) = first
        .and_then(|c| c.finish_reason.as_deref())
        .filter(|reason| *reason != "STOP")
    {
        return Err(GatewayError::NoImage(format!(
            "Image generation stopped unexpectedly. Reason: {}. This often relates to safety settings.",
            reason
        ))
        .into());
    }

    let text = first
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect::<String>()
        })
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let message = match text {
        Some(text) => format!(
            "The AI model did not return an image. The model responded with text: \"{}\"",
            text
        ),
        None => "The AI model did not return an image. This can happen due to safety filters \
                 or if the request is too complex. Please try a different image."
            .to_string(),
    };
    Err(GatewayError::NoImage(message).into())
}

fn error_from_ureq(err: ureq::Error) -> StudioError {
    match err {
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            error_from_status(code, &body)
        }
        ureq::Error::Transport(transport) => GatewayError::Transport(transport.to_string()).into(),
    }
}

fn error_from_status(code: u16, body: &str) -> StudioError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_default();

    if let Some((_, mime)) = message.split_once("Unsupported MIME type: ") {
        return StudioError::UnsupportedMediaType(mime.trim().to_string());
    }
    if message.contains("Unsupported MIME type") {
        return StudioError::UnsupportedMediaType(String::new());
    }

    let detail = if message.is_empty() { body.trim() } else { message.as_str() };
    GatewayError::Transport(format!("HTTP {}: {}", code, detail)).into()
}
