//! HTTP transport types exchanged with the host.
//!
//! # Design
//! Both remote APIs the bot talks to (the homework-review endpoint and the
//! Telegram Bot API) are described here as plain data. The core builds an
//! `HttpRequest`, the host performs the round-trip with whatever HTTP stack it
//! owns, and hands back an `HttpResponse` for parsing. Nothing in this crate
//! opens a socket, which is what lets a whole poll cycle be tested as a pure
//! function.

/// HTTP method for a request. The bot only ever reads statuses and posts
/// messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
///
/// `url` is absolute and already carries its query string. Header names are
/// lower-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header value with the given (lower-case) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data, built by the host after
/// executing an `HttpRequest`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}
