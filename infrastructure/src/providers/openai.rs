//! OpenAI Chat Completions adapter

use super::http::{build_client, send_json};
use super::HttpBackendSettings;
use async_trait::async_trait;
use council_application::{BackendError, ModelBackend};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

/// GPT via `POST {base_url}/v1/chat/completions`
pub struct OpenAiBackend {
    client: reqwest::Client,
    settings: HttpBackendSettings,
}

impl OpenAiBackend {
    pub fn new(settings: HttpBackendSettings) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(settings.timeout)?,
            settings,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

fn request_body<'a>(
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    user: &'a str,
) -> ChatRequest<'a> {
    ChatRequest {
        model,
        max_tokens,
        messages: [
            ChatMessage {
                role: "system",
                content: system,
            },
            ChatMessage {
                role: "user",
                content: user,
            },
        ],
    }
}

fn response_text(response: ChatResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
}

#[async_trait]
impl ModelBackend for OpenAiBackend {
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
            .bearer_auth(&self.settings.api_key)
            .json(&body);

        let response: ChatResponse = send_json(self.label(), request).await?;
        response_text(response)
            .ok_or_else(|| BackendError::malformed(self.label(), "no message content in response"))
    }
}
