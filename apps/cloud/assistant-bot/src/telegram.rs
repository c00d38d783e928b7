//! Telegram Bot API transport
//!
//! Long-polls `getUpdates`, hands each text message to the dispatcher on its
//! own task and sends the reply back with `sendMessage`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use core_config::{ConfigError, FromEnv, env_duration_secs, env_or_default, env_required};
use domain_assistant::{Dispatcher, InboundMessage, LanguageModel};
use domain_cloud_resources::InventoryClient;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Telegram's limit on message length, in characters
pub const MESSAGE_LIMIT: usize = 4096;

const RETRY_DELAY: Duration = Duration::from_secs(5);

pub type TelegramResult<T> = Result<T, TelegramError>;

#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telegram API error ({status}): {description}")]
    Api { status: u16, description: String },
}

#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub api_url: String,
    pub poll_timeout: Duration,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("poll_timeout", &self.poll_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl FromEnv for TelegramConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bot_token: env_required("TELEGRAM_BOT_TOKEN")?,
            api_url: env_or_default("TELEGRAM_API_URL", DEFAULT_API_URL),
            poll_timeout: env_duration_secs("TELEGRAM_POLL_TIMEOUT_SECS", 30)?,
            request_timeout: env_duration_secs("COLLABORATOR_TIMEOUT_SECS", 30)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

impl Update {
    /// Chat id and text, if this update is a text message
    pub fn text_message(&self) -> Option<(i64, &str)> {
        let message = self.message.as_ref()?;
        Some((message.chat.id, message.text.as_deref()?))
    }
}

#[derive(Debug, Serialize)]
struct GetUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
    allowed_updates: [&'static str; 1],
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
}

/// Minimal Bot API client
pub struct TelegramClient {
    client: Client,
    config: TelegramConfig,
}

impl TelegramClient {
    pub fn new(config: TelegramConfig) -> TelegramResult<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client, config })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_url.trim_end_matches('/'),
            self.config.bot_token,
            method
        )
    }

    async fn call<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
        timeout: Duration,
    ) -> TelegramResult<T> {
        let response = self
            .client
            .post(self.method_url(method))
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        let payload: ApiResponse<T> = response.json().await.map_err(reqwest::Error::without_url)?;

        match payload {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse { description, .. } => Err(TelegramError::Api {
                status: status.as_u16(),
                description: description.unwrap_or_else(|| "no description".to_string()),
            }),
        }
    }

    /// Long-poll for updates after `offset`
    pub async fn get_updates(&self, offset: Option<i64>) -> TelegramResult<Vec<Update>> {
        let body = GetUpdates {
            offset,
            timeout: self.config.poll_timeout.as_secs(),
            allowed_updates: ["message"],
        };
        // The server holds the request for up to `poll_timeout`
        let timeout = self.config.poll_timeout + self.config.request_timeout;
        self.call("getUpdates", &body, timeout).await
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> TelegramResult<()> {
        let _: serde_json::Value = self
            .call(
                "sendMessage",
                &SendMessage { chat_id, text },
                self.config.request_timeout,
            )
            .await?;
        Ok(())
    }

    /// Send a reply, split into several messages when it is too long
    pub async fn send_reply(&self, chat_id: i64, text: &str) -> TelegramResult<()> {
        let chunks = split_message(text, MESSAGE_LIMIT);
        if chunks.is_empty() {
            warn!(chat_id, "Skipping empty reply");
        }
        for chunk in chunks {
            self.send_message(chat_id, &chunk).await?;
        }
        Ok(())
    }
}

/// Split text into chunks of at most `limit` characters, breaking after a
/// newline where possible. Concatenating the chunks gives back `text`.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();

        if current_len + line_len > limit && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len > limit {
            for ch in line.chars() {
                if current_len == limit {
                    chunks.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                current.push(ch);
                current_len += 1;
            }
        } else {
            current.push_str(line);
            current_len += line_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Poll until `shutdown` resolves, then wait for in-flight replies
pub async fn run_polling<L, C>(
    client: Arc<TelegramClient>,
    dispatcher: Arc<Dispatcher<L, C>>,
    shutdown: impl Future<Output = ()>,
) where
    L: LanguageModel + 'static,
    C: InventoryClient + 'static,
{
    tokio::pin!(shutdown);
    let mut offset = None;
    let mut in_flight = JoinSet::new();

    info!("Telegram long polling started");
    loop {
        while in_flight.try_join_next().is_some() {}

        let updates = tokio::select! {
            _ = &mut shutdown => break,
            updates = client.get_updates(offset) => updates,
        };

        let updates = match updates {
            Ok(updates) => updates,
            Err(e) => {
                error!(error = %e, "Failed to fetch updates");
                tokio::select! {
                    _ = &mut shutdown => break,
                    _ = tokio::time::sleep(RETRY_DELAY) => continue,
                }
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);
            let Some((chat_id, text)) = update.text_message() else {
                debug!(update_id = update.update_id, "Ignoring non-text update");
                continue;
            };

            let message = InboundMessage::from_text(text);
            let client = client.clone();
            let dispatcher = dispatcher.clone();
            in_flight.spawn(async move {
                let reply = dispatcher.handle(&message).await;
                if let Err(e) = client.send_reply(chat_id, &reply).await {
                    error!(chat_id, error = %e, "Failed to send reply");
                }
            });
        }
    }

    info!(in_flight = in_flight.len(), "Stopping Telegram polling");
    while in_flight.join_next().await.is_some() {}
}
