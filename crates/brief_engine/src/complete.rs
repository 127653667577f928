use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ChatMessage, CompletionError, FailureKind, Role};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const SYSTEM_INSTRUCTION: &str =
    "You are an expert legal research assistant. Always be concise and cite sources if possible.";

#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub system_instruction: String,
    pub connect_timeout: Duration,
    /// `None` leaves the whole request unbounded.
    pub request_timeout: Option<Duration>,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 800,
            temperature: 0.2,
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

/// The two-message exchange sent for every prompt: system instruction, then the prompt body.
pub fn build_messages(settings: &CompletionSettings, prompt: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: Role::System,
            content: settings.system_instruction.clone(),
        },
        ChatMessage {
            role: Role::User,
            content: prompt.to_string(),
        },
    ]
}

#[async_trait::async_trait]
pub trait Completer: Send + Sync {
    /// Sends one prompt and returns the first choice's text, trimmed.
    async fn complete(&self, credential: &str, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    error: ProviderError,
}

#[derive(Deserialize)]
struct ProviderError {
    message: String,
}

/// Chat-completion client for OpenAI-compatible endpoints.
#[derive(Debug, Clone)]
pub struct ReqwestCompleter {
    settings: CompletionSettings,
}

impl ReqwestCompleter {
    pub fn new(settings: CompletionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, CompletionError> {
        let mut builder = reqwest::Client::builder().connect_timeout(self.settings.connect_timeout);
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| CompletionError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Completer for ReqwestCompleter {
    async fn complete(&self, credential: &str, prompt: &str) -> Result<String, CompletionError> {
        let client = self.build_client()?;
        let body = ChatRequest {
            model: &self.settings.model,
            messages: build_messages(&self.settings, prompt),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let response = client
            .post(&self.settings.endpoint)
            .bearer_auth(credential)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            return Err(status_error(status.as_u16(), &bytes));
        }

        let parsed: ChatResponse = serde_json::from_slice(&bytes)
            .map_err(|err| CompletionError::new(FailureKind::MalformedResponse, err.to_string()))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                CompletionError::new(
                    FailureKind::MalformedResponse,
                    "response contained no message content",
                )
            })?;

        Ok(content.trim().to_string())
    }
}

fn status_error(code: u16, body: &[u8]) -> CompletionError {
    let kind = match code {
        401 | 403 => FailureKind::Unauthorized,
        429 => FailureKind::QuotaExceeded,
        other => FailureKind::HttpStatus(other),
    };
    let message = serde_json::from_slice::<ProviderErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_default();
    CompletionError::new(kind, message)
}

fn map_reqwest_error(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        return CompletionError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return CompletionError::new(FailureKind::MalformedResponse, err.to_string());
    }
    CompletionError::new(FailureKind::Network, err.to_string())
}
