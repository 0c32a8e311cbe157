//! Telegram Bot API client.
//!
//! Only the handful of methods the bot needs: `getUpdates`, `sendMessage`,
//! `sendPhoto` and `answerCallbackQuery`.

#![allow(missing_docs)]

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use feedcat_common::config::TelegramConfig;
use feedcat_common::{AppError, AppResult};
use feedcat_core::ChatId;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};
use url::Url;

use crate::event::{Event, Sender};
use crate::messenger::{Content, Messenger, OutboundMessage, ParseMode, PhotoSource, ReplyMarkup};
use crate::polling::UpdateSource;

/// Envelope every Bot API method returns.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i32>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the envelope, turning `ok: false` into a transport error.
    pub fn into_result(self, method: &str) -> AppResult<T> {
        if !self.ok {
            let description = self.description.unwrap_or_else(|| "no description".to_string());
            return Err(AppError::Transport(match self.error_code {
                Some(code) => format!("{method} failed ({code}): {description}"),
                None => format!("{method} failed: {description}"),
            }));
        }
        self.result
            .ok_or_else(|| AppError::Transport(format!("{method} returned no result")))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
}

impl User {
    fn to_sender(&self) -> Sender {
        Sender::new(self.id, &self.first_name, self.last_name.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

impl Update {
    /// Convert into an event, dropping updates the bot does not react to.
    ///
    /// Messages need a text and an author. Button presses are always kept so
    /// that they get answered; without the originating message the chat is
    /// the private chat with the presser.
    #[must_use]
    pub fn into_event(self) -> Option<Event> {
        if let Some(query) = self.callback_query {
            let chat_id = query.message.as_ref().map_or(query.from.id, |m| m.chat.id);
            return Some(Event::Callback {
                id: query.id,
                chat_id,
                sender: query.from.to_sender(),
                data: query.data.unwrap_or_default(),
            });
        }

        let message = self.message?;
        let sender = message.from.as_ref()?.to_sender();
        Some(Event::Message {
            chat_id: message.chat.id,
            sender,
            text: message.text?,
        })
    }
}

/// Bot API client.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    /// `<api_url>/bot<token>/`; never logged.
    base: Url,
    poll_timeout_secs: u64,
}

impl TelegramClient {
    /// Create a client from configuration.
    pub fn new(config: &TelegramConfig) -> AppResult<Self> {
        if config.token.trim().is_empty() {
            return Err(AppError::Config("telegram.token is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.poll_timeout_secs + 10))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(transport_error)?;

        let base = Url::parse(&format!(
            "{}/bot{}/",
            config.api_url.trim_end_matches('/'),
            config.token
        ))
        .map_err(|e| AppError::Config(format!("invalid Bot API URL: {e}")))?;

        Ok(Self {
            client,
            base,
            poll_timeout_secs: config.poll_timeout_secs,
        })
    }

    fn endpoint(&self, method: &str) -> AppResult<Url> {
        self.base
            .join(method)
            .map_err(|e| AppError::Internal(format!("invalid Bot API method {method}: {e}")))
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: &Value) -> AppResult<T> {
        let response = self
            .client
            .post(self.endpoint(method)?)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        Self::decode(method, response).await
    }

    async fn call_multipart<T: DeserializeOwned>(&self, method: &str, form: Form) -> AppResult<T> {
        let response = self
            .client
            .post(self.endpoint(method)?)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        Self::decode(method, response).await
    }

    async fn decode<T: DeserializeOwned>(method: &str, response: reqwest::Response) -> AppResult<T> {
        let status = response.status();
        let envelope: ApiResponse<T> = response.json().await.map_err(|e| {
            AppError::Transport(format!("{method} returned {status}: {}", e.without_url()))
        })?;
        envelope.into_result(method)
    }

    /// Long-poll for updates after `offset`.
    pub async fn get_updates(&self, offset: Option<i64>) -> AppResult<Vec<Update>> {
        let body = json!({
            "offset": offset,
            "timeout": self.poll_timeout_secs,
            "allowed_updates": ["message", "callback_query"],
        });
        self.call("getUpdates", &body).await
    }

    async fn upload_photo(&self, fields: Map<String, Value>, path: &Path) -> AppResult<()> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::Internal(format!("failed to read {}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .map_or_else(|| "card.png".to_string(), |name| name.to_string_lossy().into_owned());

        let mut form = Form::new().part("photo", Part::bytes(bytes).file_name(file_name));
        for (key, value) in fields {
            let value = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            form = form.text(key, value);
        }

        self.call_multipart::<Message>("sendPhoto", form).await?;
        Ok(())
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send(&self, chat_id: ChatId, message: OutboundMessage) -> AppResult<()> {
        let OutboundMessage {
            content,
            parse_mode,
            markup,
        } = message;
        let mut fields = message_fields(chat_id, parse_mode, markup.as_ref());

        match content {
            Content::Text(text) => {
                fields.insert("text".to_string(), Value::String(text));
                self.call::<Message>("sendMessage", &Value::Object(fields))
                    .await?;
            }
            Content::Photo { source, caption } => {
                if let Some(caption) = caption {
                    fields.insert("caption".to_string(), Value::String(caption));
                }
                match source {
                    PhotoSource::Url(url) => {
                        fields.insert("photo".to_string(), Value::String(url));
                        self.call::<Message>("sendPhoto", &Value::Object(fields))
                            .await?;
                    }
                    PhotoSource::File(path) => self.upload_photo(fields, &path).await?,
                }
            }
        }

        debug!(chat_id = chat_id, "Message delivered");
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, notice: Option<&str>) -> AppResult<()> {
        let mut body = json!({ "callback_query_id": callback_id });
        if let Some(text) = notice {
            body["text"] = Value::String(text.to_string());
        }

        let answered: bool = self.call("answerCallbackQuery", &body).await?;
        if !answered {
            warn!(callback_id = %callback_id, "Callback query was not acknowledged");
        }
        Ok(())
    }
}

#[async_trait]
impl UpdateSource for TelegramClient {
    async fn fetch(&self, offset: Option<i64>) -> AppResult<Vec<Update>> {
        self.get_updates(offset).await
    }
}

/// Fields shared by `sendMessage` and `sendPhoto`.
fn message_fields(
    chat_id: ChatId,
    parse_mode: Option<ParseMode>,
    markup: Option<&ReplyMarkup>,
) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("chat_id".to_string(), json!(chat_id));
    if let Some(mode) = parse_mode {
        fields.insert("parse_mode".to_string(), json!(mode.as_str()));
    }
    if let Some(markup) = markup {
        fields.insert("reply_markup".to_string(), markup_json(markup));
    }
    fields
}

fn markup_json(markup: &ReplyMarkup) -> Value {
    match markup {
        ReplyMarkup::Inline(rows) => {
            let rows: Vec<Vec<Value>> = rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|button| json!({ "text": button.text, "callback_data": button.payload }))
                        .collect()
                })
                .collect();
            json!({ "inline_keyboard": rows })
        }
        ReplyMarkup::Keyboard { rows, resize } => {
            let rows: Vec<Vec<Value>> = rows
                .iter()
                .map(|row| row.iter().map(|label| json!({ "text": label })).collect())
                .collect();
            json!({ "keyboard": rows, "resize_keyboard": resize })
        }
    }
}

/// Request errors carry the URL, and the URL carries the token.
fn transport_error(err: reqwest::Error) -> AppError {
    AppError::Transport(err.without_url().to_string())
}
