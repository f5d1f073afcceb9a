//! OpenAI-compatible chat completion client shared by the remote backends.

use std::fmt;

use ap_core::{Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::Config;

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

pub struct ChatClient {
    client: Client,
    provider: &'static str,
    api_key: Option<String>,
    endpoint: Url,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClient")
            .field("client", &"<reqwest::Client>")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint.as_str())
            .field("model", &self.model)
            .finish()
    }
}

impl ChatClient {
    pub fn new(
        provider: &'static str,
        default_url: &str,
        default_model: &str,
        config: &Config,
    ) -> Result<Self> {
        let base = config.model_url.as_deref().unwrap_or(default_url);
        let endpoint = Url::parse(&format!("{}/chat/completions", base.trim_end_matches('/')))
            .map_err(|e| Error::Config(format!("Invalid {} URL '{}': {}", provider, base, e)))?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            provider,
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            endpoint,
            model: config
                .model_name
                .clone()
                .unwrap_or_else(|| default_model.to_string()),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `prompt` as the single user message and return the first choice's text.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::BackendUnavailable(format!("{} API key is required", self.provider))
        })?;

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::BackendUnavailable(format!("{} request failed: {}", self.provider, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::BackendUnavailable(format!(
                "{} API error: {} - {}",
                self.provider, status, body
            )));
        }

        let body = response.json::<ChatResponse>().await.map_err(|e| {
            Error::BackendUnavailable(format!("{} returned malformed JSON: {}", self.provider, e))
        })?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                Error::BackendUnavailable(format!(
                    "Unexpected response format from {} API",
                    self.provider
                ))
            })
    }
}
