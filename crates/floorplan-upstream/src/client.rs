//! Blocking client for a messages-style language API.
//!
//! One request per generation, bounded by `timeout_secs`. Transient
//! failures can be retried with exponential backoff, but `max_retries`
//! defaults to 0: by default a failure is reported once, straight away.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::UpstreamError;
use crate::prompt::{user_prompt, SYSTEM_PROMPT};
use crate::source::RoomSource;

const API_VERSION: &str = "2023-06-01";

/// Connection and retry settings for [`MessagesClient`].
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.anthropic.com/v1/messages".to_string(),
            api_key: String::new(),
            model: "claude-3-opus-20240229".to_string(),
            max_tokens: 1000,
            timeout_secs: 60,
            max_retries: 0,
            retry_backoff_ms: 500,
        }
    }
}

impl UpstreamConfig {
    /// Read settings from the environment.
    ///
    /// `ANTHROPIC_API_KEY` is required; `FLOORPLAN_MODEL`,
    /// `FLOORPLAN_ENDPOINT`, `FLOORPLAN_TIMEOUT_SECS` and
    /// `FLOORPLAN_MAX_RETRIES` override the defaults when set and parseable.
    pub fn from_env() -> Result<Self, UpstreamError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(UpstreamError::MissingApiKey)?;

        let mut config = Self {
            api_key,
            ..Default::default()
        };
        if let Ok(model) = std::env::var("FLOORPLAN_MODEL") {
            config.model = model;
        }
        if let Ok(endpoint) = std::env::var("FLOORPLAN_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Some(secs) = env_parse("FLOORPLAN_TIMEOUT_SECS") {
            config.timeout_secs = secs;
        }
        if let Some(retries) = env_parse("FLOORPLAN_MAX_RETRIES") {
            config.max_retries = retries;
        }
        Ok(config)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Concatenated text blocks of a messages response.
fn response_text(body: &str) -> Result<String, UpstreamError> {
    let response: MessagesResponse =
        serde_json::from_str(body).map_err(|e| UpstreamError::BadResponse(e.to_string()))?;
    let text: String = response
        .content
        .into_iter()
        .filter(|b| b.kind == "text")
        .filter_map(|b| b.text)
        .collect();
    if text.is_empty() {
        return Err(UpstreamError::BadResponse(
            "response has no text content".to_string(),
        ));
    }
    Ok(text)
}

/// Room source backed by the messages API.
#[derive(Debug, Clone)]
pub struct MessagesClient {
    config: UpstreamConfig,
    client: Client,
}

impl MessagesClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        if config.api_key.is_empty() {
            return Err(UpstreamError::MissingApiKey);
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    fn send_once(&self, requirements: &str) -> Result<String, UpstreamError> {
        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system: SYSTEM_PROMPT,
            messages: vec![Message {
                role: "user",
                content: user_prompt(requirements),
            }],
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .map_err(classify)?;

        let status = response.status();
        let body = response.text().map_err(classify)?;
        if status.is_success() {
            response_text(&body)
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Err(UpstreamError::Auth(status.as_u16()))
        } else {
            Err(UpstreamError::Status(status.as_u16(), body))
        }
    }
}

fn classify(err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Http(err)
    }
}

/// Run `attempt` until it succeeds, fails permanently, or `max_retries`
/// retries are spent. The delay doubles after each transient failure.
pub(crate) fn with_retry<T>(
    max_retries: u32,
    backoff_ms: u64,
    mut attempt: impl FnMut() -> Result<T, UpstreamError>,
) -> Result<T, UpstreamError> {
    let mut retries: u32 = 0;
    loop {
        match attempt() {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && retries < max_retries => {
                let delay = backoff_ms.saturating_mul(1u64 << retries.min(10));
                log::warn!(
                    "Upstream attempt {} failed ({}), retrying in {}ms",
                    retries + 1,
                    e,
                    delay
                );
                std::thread::sleep(Duration::from_millis(delay));
                retries += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

impl RoomSource for MessagesClient {
    fn fetch(&self, requirements: &str) -> Result<String, UpstreamError> {
        with_retry(self.config.max_retries, self.config.retry_backoff_ms, || {
            self.send_once(requirements)
        })
    }
}
