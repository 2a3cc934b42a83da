use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_OPENAI_BASE_URL;
use crate::error::{DeskmateError, Result};
use crate::interfaces::providers::{ChatProvider, ChatRequest};

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Chat completions over the OpenAI-compatible HTTP API. One POST per call,
/// no retries.
#[derive(Clone)]
pub struct OpenAiChat {
    client: Client,
    base_url: String,
}

impl OpenAiChat {
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn extract_text(response: CompletionResponse) -> Result<String> {
        response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DeskmateError::Serialization("No choices returned".to_string()))?
            .message
            .content
            .ok_or_else(|| DeskmateError::Serialization("Choice has no content".to_string()))
    }
}

impl Default for OpenAiChat {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl ChatProvider for OpenAiChat {
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        let body = CompletionBody {
            model: &request.model,
            messages: request
                .messages
                .iter()
                .map(|message| WireMessage {
                    role: message.role.as_str(),
                    content: &message.content,
                })
                .collect(),
        };

        tracing::debug!(
            model = %request.model,
            messages = body.messages.len(),
            "sending chat completion"
        );
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&request.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DeskmateError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DeskmateError::Http(format!(
                "completion endpoint returned {status}: {detail}"
            )));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| DeskmateError::Serialization(e.to_string()))?;
        Self::extract_text(parsed)
    }
}
