// Gemini API streaming client using reqwest-eventsource.
//
// Sends one `streamGenerateContent` request with `alt=sse` and accumulates
// the text parts of every streamed `GenerateContentResponse` chunk. Each
// fragment is also handed to a progress callback as it arrives.

use async_trait::async_trait;
use futures_util::StreamExt;
use inspiroo_core::analysis::AnalysisError;
use inspiroo_core::config::{Config, LlmConfig};
use reqwest_eventsource::{Event, RequestBuilderExt};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Backend seam
// ---------------------------------------------------------------------------

/// Something that turns an instruction plus user text into generated text.
///
/// `on_chunk` receives each streamed fragment; the returned string is the
/// concatenation of all fragments.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(
        &self,
        system: &str,
        user_text: &str,
        schema: &Value,
        on_chunk: &mut (dyn for<'c> FnMut(&'c str) + Send),
    ) -> Result<String, AnalysisError>;
}

// ---------------------------------------------------------------------------
// GeminiClient
// ---------------------------------------------------------------------------

/// Low-level Gemini streaming client.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    api_base_url: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(api_key: String, llm: &LlmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: llm.model.clone(),
            api_base_url: llm.api_base_url.clone(),
            temperature: llm.temperature,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// `{base}/models/{model}:streamGenerateContent?alt=sse`
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.api_base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// JSON body for one generation call.
    pub fn request_body(&self, system: &str, user_text: &str, schema: &Value) -> Value {
        json!({
            "systemInstruction": { "parts": [{ "text": system }] },
            "contents": [{ "role": "user", "parts": [{ "text": user_text }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
                "temperature": self.temperature
            }
        })
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(
        &self,
        system: &str,
        user_text: &str,
        schema: &Value,
        on_chunk: &mut (dyn for<'c> FnMut(&'c str) + Send),
    ) -> Result<String, AnalysisError> {
        if self.api_key.trim().is_empty() {
            return Err(AnalysisError::MissingCredential);
        }

        let request = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(system, user_text, schema));

        let mut es = request
            .eventsource()
            .map_err(|e| AnalysisError::UpstreamFailure {
                message: format!("failed to create event source: {e}"),
            })?;

        info!(model = %self.model, "streaming generation request");
        let mut full_text = String::new();

        while let Some(event) = es.next().await {
            match event {
                Ok(Event::Open) => {
                    debug!("SSE connection opened");
                }
                Ok(Event::Message(msg)) => {
                    if let Some(reason) = parse_block_reason(&msg.data) {
                        warn!(%reason, "prompt blocked upstream");
                        es.close();
                        return Err(AnalysisError::UpstreamFailure {
                            message: format!("prompt blocked: {reason}"),
                        });
                    }
                    match parse_chunk_text(&msg.data) {
                        Some(text) if !text.is_empty() => {
                            full_text.push_str(&text);
                            on_chunk(&text);
                        }
                        _ => debug!("chunk without text"),
                    }
                }
                Err(reqwest_eventsource::Error::StreamEnded) => {
                    debug!(chars = full_text.len(), "stream ended");
                    es.close();
                    break;
                }
                Err(err) => {
                    warn!(?err, "SSE stream error");
                    es.close();
                    return Err(AnalysisError::UpstreamFailure {
                        message: describe_error(err).await,
                    });
                }
            }
        }

        Ok(full_text)
    }
}

// ---------------------------------------------------------------------------
// LlmClient wrapper
// ---------------------------------------------------------------------------

/// Either an active Gemini client or disabled for lack of an API key.
pub enum LlmClient {
    Active(GeminiClient),
    Disabled,
}

impl LlmClient {
    /// `Active` when the config carries a non-blank API key.
    pub fn from_config(config: &Config) -> Self {
        match config.api_key() {
            Some(key) => LlmClient::Active(GeminiClient::new(key.to_string(), &config.llm)),
            None => LlmClient::Disabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, LlmClient::Active(_))
    }
}

#[async_trait]
impl GenerativeBackend for LlmClient {
    async fn generate(
        &self,
        system: &str,
        user_text: &str,
        schema: &Value,
        on_chunk: &mut (dyn for<'c> FnMut(&'c str) + Send),
    ) -> Result<String, AnalysisError> {
        match self {
            LlmClient::Active(client) => client.generate(system, user_text, schema, on_chunk).await,
            LlmClient::Disabled => Err(AnalysisError::MissingCredential),
        }
    }
}

// ---------------------------------------------------------------------------
// SSE JSON parsing helpers
// ---------------------------------------------------------------------------

/// Concatenate `candidates[0].content.parts[*].text` from one streamed chunk.
///
/// Returns `None` when the chunk has no candidate content at all.
pub(crate) fn parse_chunk_text(data: &str) -> Option<String> {
    let v: Value = serde_json::from_str(data).ok()?;
    let parts = v
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    Some(
        parts
            .iter()
            .filter_map(|p| p.get("text").and_then(Value::as_str))
            .collect(),
    )
}

/// `promptFeedback.blockReason`, present when the prompt was refused.
pub(crate) fn parse_block_reason(data: &str) -> Option<String> {
    let v: Value = serde_json::from_str(data).ok()?;
    v.get("promptFeedback")?
        .get("blockReason")?
        .as_str()
        .map(|s| s.to_string())
}

/// `error.message` from a Gemini error body.
pub(crate) fn parse_api_error(body: &str) -> Option<String> {
    let v: Value = serde_json::from_str(body).ok()?;
    v.get("error")?
        .get("message")?
        .as_str()
        .map(|s| s.to_string())
}

/// Human-readable message for an SSE error. Non-2xx responses include the
/// API's own error message when the body carries one.
async fn describe_error(err: reqwest_eventsource::Error) -> String {
    match err {
        reqwest_eventsource::Error::InvalidStatusCode(status, response) => {
            let body = response.text().await.unwrap_or_default();
            match parse_api_error(&body) {
                Some(detail) => format!("API returned status {status}: {detail}"),
                None => format!("API returned status {status}"),
            }
        }
        reqwest_eventsource::Error::InvalidContentType(content_type, _) => {
            format!("unexpected content type {content_type:?}")
        }
        reqwest_eventsource::Error::Transport(e) => format!("Network error: {e}"),
        other => format!("Stream error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
