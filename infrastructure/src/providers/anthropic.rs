//! Anthropic Messages API adapter

use super::http::{build_client, send_json};
use super::HttpBackendSettings;
use async_trait::async_trait;
use council_application::{BackendError, ModelBackend};
use serde::{Deserialize, Serialize};

const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [UserMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Claude via `POST {base_url}/v1/messages`
pub struct AnthropicBackend {
    client: reqwest::Client,
    settings: HttpBackendSettings,
}

impl AnthropicBackend {
    pub fn new(settings: HttpBackendSettings) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(settings.timeout)?,
            settings,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.settings.base_url.trim_end_matches('/'))
    }
}

fn request_body<'a>(
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    user: &'a str,
) -> MessagesRequest<'a> {
    MessagesRequest {
        model,
        max_tokens,
        system,
        messages: [UserMessage {
            role: "user",
            content: user,
        }],
    }
}

/// Concatenate the text blocks of a response; `None` if there are none
fn response_text(response: MessagesResponse) -> Option<String> {
    let text: Vec<String> = response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text.join(""))
    }
}

#[async_trait]
impl ModelBackend for AnthropicBackend {
    fn label(&self) -> &str {
        &self.settings.label
    }

    async fn invoke(
        &self,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<String, BackendError> {
        let body = request_body(
            &self.settings.model,
            self.settings.max_tokens,
            system_instruction,
            user_message,
        );
        let request = self
            .client
            .post(self.endpoint())
            .header("x-api-key", &self.settings.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body);

        let response: MessagesResponse = send_json(self.label(), request).await?;
        response_text(response)
            .ok_or_else(|| BackendError::malformed(self.label(), "no text content in response"))
    }
}
