//! Google Gemini `generateContent` adapter.

use crate::assistant::prompts;
use crate::assistant::TextCompletion;
use crate::config::AppConfig;
use crate::error::CompletionError;
use crate::workbench::conversation::{ConversationEntry, Role};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<SecretString>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(CompletionError::MissingApiKey)?;

        debug!(model = %self.model, turns = request.contents.len(), "sending generateContent");
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key.expose_secret())
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api { status, body });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|err| CompletionError::Parse(err.to_string()))?;
        extract_text(body)
    }
}

#[async_trait]
impl TextCompletion for GeminiClient {
    async fn complete(&self, prompt: &str, context: Option<&str>) -> Result<String, CompletionError> {
        self.generate(&completion_request(prompt, context)).await
    }

    async fn converse(
        &self,
        history: &[ConversationEntry],
        context_label: Option<&str>,
        message: &str,
    ) -> Result<String, CompletionError> {
        self.generate(&conversation_request(history, context_label, message))
            .await
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "model",
    }
}

fn completion_request(prompt: &str, context: Option<&str>) -> GenerateRequest {
    GenerateRequest {
        system_instruction: context.map(|text| Content::text(None, text)),
        contents: vec![Content::text(Some("user"), prompt)],
    }
}

fn conversation_request(
    history: &[ConversationEntry],
    context_label: Option<&str>,
    message: &str,
) -> GenerateRequest {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|entry| Content::text(Some(role_name(entry.role)), &entry.text))
        .collect();
    contents.push(Content::text(Some("user"), message));

    GenerateRequest {
        system_instruction: Some(Content::text(
            None,
            &prompts::chat_instruction(context_label),
        )),
        contents,
    }
}

fn extract_text(response: GenerateResponse) -> Result<String, CompletionError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(CompletionError::EmptyResponse);
    }
    Ok(text)
}
