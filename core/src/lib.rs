//! I/O-free core of the homework status bot.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values for the
//! homework-review API and the Telegram Bot API, validates and formats
//! homework records, and tracks the state carried between poll cycles. The
//! host (`homework-bot`) executes the HTTP round-trips and sleeps between
//! cycles.
//!
//! # Design
//! - Clients are stateless apart from endpoint and credentials.
//! - Each remote call is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit.
//! - `PollState::process` is the whole cycle logic as a state transition that
//!   returns at most one message for the host to deliver.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod poller;
pub mod response;
pub mod types;

pub use client::{PracticumClient, TelegramClient, PRACTICUM_ENDPOINT, TELEGRAM_API_URL};
pub use config::Secrets;
pub use error::{ApiError, ConfigError, CycleError, NotifyError, RecordError, ResponseError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use poller::{CycleEvent, CycleReport, PollState};
pub use response::{check_response, current_date, parse_status};
pub use types::{HomeworkStatus, SendMessage, TelegramReply};
