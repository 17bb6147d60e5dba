//! Error types for every stage of a poll cycle.
//!
//! # Design
//! Each component returns its own error kind so callers can tell a dead
//! network apart from a malformed payload or an undocumented status. The
//! per-cycle kinds (`ApiError`, `ResponseError`, `RecordError`) fold into
//! `CycleError`, whose `Display` text is what ends up in the chat, so those
//! messages are written in the same language as the verdicts. `ConfigError`
//! and `NotifyError` only ever reach the log.

use thiserror::Error;

/// Required configuration is absent. Fatal at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

/// The homework API could not be reached or answered with something other
/// than a JSON body and HTTP 200.
#[derive(Debug, Error)]
pub enum ApiError {
    /// DNS failure, timeout, connection reset and the like.
    #[error("Ошибка запроса к API: {0}")]
    Transport(String),

    #[error("Ошибка API: код {status}")]
    HttpStatus { status: u16, body: String },

    #[error("Ответ API не является JSON: {0}")]
    Deserialization(String),
}

/// The JSON body does not have the documented shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponseError {
    #[error("Ответ API должен быть словарем.")]
    NotAnObject,

    #[error("Ответ API должен содержать ключ \"homeworks\".")]
    MissingHomeworks,

    #[error("Данные под ключом \"homeworks\" должны быть списком.")]
    HomeworksNotAList,
}

/// A single homework record cannot be turned into a message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("Отсутствует название домашней работы.")]
    MissingName,

    #[error("Отсутствует статус домашней работы.")]
    MissingStatus,

    #[error("Недокументированный статус: {0}")]
    UnknownStatus(String),
}

/// Anything that can go wrong inside one poll cycle.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Delivery of a chat message failed.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("could not encode message: {0}")]
    Serialization(String),

    #[error("telegram rejected the message (HTTP {status}): {description}")]
    Rejected { status: u16, description: String },
}
