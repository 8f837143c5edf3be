//! Telegram Bot API transport
//!
//! A thin adapter between Telegram long polling and the dialog layer. All
//! conversation logic lives in [`crate::dialog`]; this module only fetches
//! updates, renders keyboards, and sends replies.

mod types;

pub use types::{ApiResult, Chat, KeyboardButton, Message, ReplyKeyboardMarkup, Update, User};

use crate::client::ScoreApi;
use crate::dialog::{DialogHandler, Keyboard};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Server-side hold on `getUpdates` long polls.
const POLL_TIMEOUT_SECS: u64 = 30;

/// Backoff after a failed `getUpdates` call.
const FETCH_RETRY_DELAY: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("telegram request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("telegram API error: {0}")]
    Api(String),
}

pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("https://api.telegram.org/bot{token}"),
        }
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    /// Long-poll for updates. `timeout_secs` is the server-side hold, the
    /// HTTP client itself carries no timeout.
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let response = self
            .http
            .get(self.url("getUpdates"))
            .query(&[
                ("offset", offset.to_string()),
                ("timeout", timeout_secs.to_string()),
            ])
            .send()
            .await?;
        unwrap_envelope(response.json::<ApiResult<Vec<Update>>>().await?)
    }

    /// Send an HTML-formatted message, optionally swapping the chat's
    /// reply keyboard.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<(), TelegramError> {
        let body = SendMessage {
            chat_id,
            text,
            parse_mode: "HTML",
            reply_markup: keyboard.map(render_keyboard),
        };
        let response = self.http.post(self.url("sendMessage")).json(&body).send().await?;
        unwrap_envelope::<Message>(response.json().await?)?;
        Ok(())
    }

    /// Drop any configured webhook so long polling receives the updates.
    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<(), TelegramError> {
        let response = self
            .http
            .post(self.url("deleteWebhook"))
            .query(&[("drop_pending_updates", drop_pending_updates.to_string())])
            .send()
            .await?;
        unwrap_envelope::<bool>(response.json().await?)?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<ReplyKeyboardMarkup>,
}

fn unwrap_envelope<T>(envelope: ApiResult<T>) -> Result<T, TelegramError> {
    if envelope.ok {
        envelope
            .result
            .ok_or_else(|| TelegramError::Api("ok response without result".to_string()))
    } else {
        Err(TelegramError::Api(
            envelope
                .description
                .unwrap_or_else(|| "unknown error".to_string()),
        ))
    }
}

fn render_keyboard(keyboard: Keyboard) -> ReplyKeyboardMarkup {
    ReplyKeyboardMarkup {
        keyboard: keyboard
            .rows()
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|text| KeyboardButton {
                        text: text.to_string(),
                    })
                    .collect()
            })
            .collect(),
        resize_keyboard: true,
    }
}

/// Drive the dialog from Telegram long polling, forever.
///
/// Dialog and send failures are logged and the loop moves on; a failed
/// fetch backs off before retrying. The sender's id keys the session and
/// replies go to the chat the message came from.
pub async fn poll_loop<A: ScoreApi>(client: &TelegramClient, handler: &DialogHandler<A>) {
    let mut offset = 0i64;
    loop {
        let updates = match client.get_updates(offset, POLL_TIMEOUT_SECS).await {
            Ok(updates) => updates,
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch updates");
                tokio::time::sleep(FETCH_RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = update.update_id + 1;
            let Some(message) = update.message else {
                continue;
            };
            let (Some(from), Some(text)) = (message.from, message.text) else {
                continue;
            };

            let chat_id = from.id.to_string();
            let replies = match handler.handle(&chat_id, &text).await {
                Ok(replies) => replies,
                Err(err) => {
                    tracing::error!(%chat_id, error = %err, "dialog turn failed");
                    continue;
                }
            };
            for reply in replies {
                if let Err(err) = client
                    .send_message(message.chat.id, &reply.text, reply.keyboard)
                    .await
                {
                    tracing::error!(%chat_id, error = %err, "failed to send reply");
                }
            }
        }
    }
}
