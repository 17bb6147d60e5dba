//! One poll cycle as a pure state transition.
//!
//! # Design
//! `PollState` owns the three values that survive between cycles: the
//! `from_date` cursor, the last status message sent and the last error
//! diagnostic sent. `process` takes the API client's result for the current
//! cursor plus the local clock and returns what the host should do about it.
//! It never performs I/O, so every dedup and cursor rule is unit-testable.
//!
//! Only the head of the homework list is reported each cycle. The API lists
//! the most recently updated work first.

use serde_json::Value;

use crate::error::{ApiError, CycleError};
use crate::response::{check_response, current_date, parse_status};

/// Prefix of the diagnostic sent to the chat when a cycle fails.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// What a cycle observed.
#[derive(Debug)]
pub enum CycleEvent {
    /// The response held no homework.
    NoUpdates,
    /// The head record formats to the message that was already sent.
    Unchanged,
    /// The head record formats to a new message.
    StatusChanged,
    Failed(CycleError),
}

/// Outcome of `PollState::process`.
#[derive(Debug)]
pub struct CycleReport {
    pub event: CycleEvent,
    /// Text to deliver to the chat, if any. At most one per cycle.
    pub notification: Option<String>,
    /// Cursor for the next cycle.
    pub cursor: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    cursor: i64,
    last_message: Option<String>,
    last_error: Option<String>,
}

impl PollState {
    pub fn new(cursor: i64) -> Self {
        Self {
            cursor,
            last_message: None,
            last_error: None,
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Apply one cycle's API answer.
    ///
    /// On success the cursor moves to the server's `current_date`, falling
    /// back to `now`, and the remembered error is cleared. On failure the
    /// cursor stays put and the diagnostic is announced only if it differs
    /// from the previous one.
    pub fn process(&mut self, answer: Result<Value, ApiError>, now: i64) -> CycleReport {
        match evaluate(answer) {
            Ok((message, server_cursor)) => {
                self.cursor = server_cursor.unwrap_or(now);
                self.last_error = None;
                let (event, notification) = match message {
                    None => (CycleEvent::NoUpdates, None),
                    Some(message) if self.last_message.as_ref() == Some(&message) => {
                        (CycleEvent::Unchanged, None)
                    }
                    Some(message) => {
                        self.last_message = Some(message.clone());
                        (CycleEvent::StatusChanged, Some(message))
                    }
                };
                CycleReport {
                    event,
                    notification,
                    cursor: self.cursor,
                }
            }
            Err(error) => {
                let diagnostic = failure_message(&error);
                let notification = if self.last_error.as_ref() == Some(&diagnostic) {
                    None
                } else {
                    self.last_error = Some(diagnostic.clone());
                    Some(diagnostic)
                };
                CycleReport {
                    event: CycleEvent::Failed(error),
                    notification,
                    cursor: self.cursor,
                }
            }
        }
    }
}

/// The diagnostic text announced for a failed cycle.
pub fn failure_message(error: &CycleError) -> String {
    format!("{FAILURE_PREFIX}: {error}")
}

/// Validate the answer and format its head record.
fn evaluate(answer: Result<Value, ApiError>) -> Result<(Option<String>, Option<i64>), CycleError> {
    let body = answer?;
    let homeworks = check_response(&body)?;
    let message = homeworks.first().map(parse_status).transpose()?;
    Ok((message, current_date(&body)))
}
