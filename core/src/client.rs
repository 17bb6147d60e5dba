//! Stateless request builders and response parsers for both remote APIs.
//!
//! # Design
//! `PracticumClient` and `TelegramClient` hold only their endpoint and
//! credentials. Each remote call is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes the
//! `HttpResponse` the host got back. Neither retries; retries happen at
//! cycle granularity in the host loop.

use serde_json::Value;

use crate::error::{ApiError, NotifyError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{SendMessage, TelegramReply};

pub const PRACTICUM_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Client for the homework-review status endpoint.
#[derive(Clone)]
pub struct PracticumClient {
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(endpoint: &str, token: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            token: token.to_string(),
        }
    }

    /// `GET <endpoint>?from_date=<cursor>` with the OAuth header.
    pub fn build_homework_statuses(&self, from_date: i64) -> HttpRequest {
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}{separator}from_date={from_date}", self.endpoint),
            headers: vec![("authorization".to_string(), format!("OAuth {}", self.token))],
            body: None,
        }
    }

    /// Accept only HTTP 200 and return the decoded body without interpreting it.
    pub fn parse_homework_statuses(&self, response: HttpResponse) -> Result<Value, ApiError> {
        if response.status != 200 {
            return Err(ApiError::HttpStatus {
                status: response.status,
                body: response.body,
            });
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Client for the Telegram Bot API, bound to a single chat.
#[derive(Clone)]
pub struct TelegramClient {
    api_url: String,
    token: String,
    chat_id: String,
}

impl TelegramClient {
    pub fn new(api_url: &str, token: &str, chat_id: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            chat_id: chat_id.to_string(),
        }
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    /// `POST <api>/bot<token>/sendMessage` with a JSON body.
    ///
    /// The URL embeds the bot token; hosts must not log it.
    pub fn build_send_message(&self, text: &str) -> Result<HttpRequest, NotifyError> {
        let payload = SendMessage {
            chat_id: self.chat_id.clone(),
            text: text.to_string(),
        };
        let body =
            serde_json::to_string(&payload).map_err(|e| NotifyError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/bot{}/sendMessage", self.api_url, self.token),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// Success is HTTP 200 with `"ok": true`. Anything else is a rejection,
    /// described by Telegram's `description` when the body carries one.
    pub fn parse_send_message(&self, response: HttpResponse) -> Result<(), NotifyError> {
        let reply = serde_json::from_str::<TelegramReply>(&response.body).ok();
        match reply {
            Some(TelegramReply { ok: true, .. }) if response.status == 200 => Ok(()),
            Some(TelegramReply {
                description: Some(description),
                ..
            }) => Err(NotifyError::Rejected {
                status: response.status,
                description,
            }),
            _ => Err(NotifyError::Rejected {
                status: response.status,
                description: response.body,
            }),
        }
    }
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("api_url", &self.api_url)
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}
