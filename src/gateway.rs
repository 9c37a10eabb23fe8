//! Translation provider client.
//!
//! One blocking HTTPS call per target file, against Gemini's
//! OpenAI-compatible chat-completions endpoint. Every failure mode is
//! converted into a typed [`GatewayError`] at this boundary; the
//! reconciler logs it and skips the file, so a provider outage never
//! aborts a batch.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chat-completions endpoint the requests are posted to.
pub const ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/chat/completions";

const MAX_TOKENS: u32 = 8192;
const TEMPERATURE: f32 = 0.3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Why a translation request produced no usable text.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport-level failure, including timeouts.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The provider answered with a non-success HTTP status.
    #[error("provider returned HTTP {0}")]
    Status(StatusCode),
    /// The response body was not the expected envelope.
    #[error("malformed response envelope: {0}")]
    Decode(String),
    /// The extracted reply was empty after stripping code fences.
    #[error("provider returned an empty reply")]
    EmptyReply,
}

/// The seam between the reconciler and the outside world.
///
/// Production code uses [`GeminiTranslator`]; tests substitute a canned
/// implementation.
pub trait Translator {
    /// Translate `payload` (a serialized JSON object) according to
    /// `system_prompt`, returning the provider's raw reply text with any
    /// residual code fences already stripped.
    fn translate(&self, system_prompt: &str, payload: &str) -> Result<String, GatewayError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Deserialize)]
struct ChatReplyMessage {
    #[serde(default)]
    content: String,
}

/// Blocking client for the chat-completions endpoint.
pub struct GeminiTranslator {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiTranslator {
    pub fn new(api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_key,
            model,
        }
    }
}

impl Translator for GeminiTranslator {
    fn translate(&self, system_prompt: &str, payload: &str) -> Result<String, GatewayError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: payload,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(GatewayError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status));
        }

        let envelope: ChatResponse = response
            .json()
            .map_err(|err| GatewayError::Decode(err.to_string()))?;

        let content = envelope
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GatewayError::Decode("response contains no choices".to_string()))?;

        let reply = strip_code_fences(&content);
        if reply.is_empty() {
            return Err(GatewayError::EmptyReply);
        }
        Ok(reply.to_string())
    }
}

/// Remove residual markdown code fences the model may emit despite the
/// prompt's instructions.
pub fn strip_code_fences(reply: &str) -> &str {
    let mut text = reply.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}
