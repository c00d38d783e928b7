use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_duration_secs, env_or_default, env_required};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{CompletionRequest, LanguageModel};
use crate::error::{AssistantError, AssistantResult};

pub const DEFAULT_BASE_URL: &str = "https://llm.api.cloud.yandex.net";
pub const DEFAULT_MODEL: &str = "yandexgpt-lite";

/// YandexGPT configuration
#[derive(Debug, Clone, PartialEq)]
pub struct YandexGptConfig {
    pub api_key: String,
    pub folder_id: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl YandexGptConfig {
    pub fn new(api_key: impl Into<String>, folder_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            folder_id: folder_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.6,
            max_tokens: 2000,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// `gpt://<folder>/<model>`
    pub fn model_uri(&self) -> String {
        format!("gpt://{}/{}", self.folder_id, self.model)
    }
}

impl FromEnv for YandexGptConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(
            env_required("YANDEX_API_KEY")?,
            env_required("YANDEX_FOLDER_ID")?,
        );
        config.base_url = env_or_default("YANDEX_GPT_URL", DEFAULT_BASE_URL);
        config.model = env_or_default("YANDEX_GPT_MODEL", DEFAULT_MODEL);
        config.timeout = env_duration_secs("COLLABORATOR_TIMEOUT_SECS", 30)?;
        Ok(config)
    }
}

/// YandexGPT foundation models client
#[derive(Debug, Clone)]
pub struct YandexGptClient {
    client: Client,
    config: YandexGptConfig,
}

impl YandexGptClient {
    pub fn new(config: YandexGptConfig) -> AssistantResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn build_request<'a>(&'a self, request: &'a CompletionRequest) -> ApiRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system_prompt) = &request.system_prompt {
            messages.push(ApiMessage {
                role: "system",
                text: system_prompt,
            });
        }
        messages.push(ApiMessage {
            role: "user",
            text: &request.prompt,
        });

        ApiRequest {
            model_uri: self.config.model_uri(),
            completion_options: CompletionOptions {
                stream: false,
                temperature: self.config.temperature,
                max_tokens: self.config.max_tokens,
            },
            messages,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    model_uri: String,
    completion_options: CompletionOptions,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompletionOptions {
    stream: bool,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    result: ApiResult,
}

#[derive(Debug, Deserialize)]
struct ApiResult {
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    message: AlternativeMessage,
}

#[derive(Debug, Deserialize)]
struct AlternativeMessage {
    text: String,
}

#[async_trait]
impl LanguageModel for YandexGptClient {
    async fn complete(&self, request: CompletionRequest) -> AssistantResult<String> {
        let body = self.build_request(&request);

        let response = self
            .client
            .post(format!(
                "{}/foundationModels/v1/completion",
                self.config.base_url.trim_end_matches('/')
            ))
            .header("Authorization", format!("Api-Key {}", self.config.api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AssistantError::LanguageModelApi {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let text = response.text().await?;
        let parsed: ApiResponse = serde_json::from_str(&text)
            .map_err(|e| AssistantError::LanguageModel(format!("malformed response: {}", e)))?;

        parsed
            .result
            .alternatives
            .into_iter()
            .next()
            .map(|alternative| alternative.message.text)
            .ok_or_else(|| AssistantError::LanguageModel("No alternatives returned".to_string()))
    }
}
