//! Response validation and status formatting.
//!
//! Both functions are pure: they borrow the decoded body and either return a
//! view into it or a typed error.

use serde_json::Value;

use crate::error::{RecordError, ResponseError};
use crate::types::HomeworkStatus;

/// Check that the body is `{"homeworks": [...], ...}` and return the list.
pub fn check_response(response: &Value) -> Result<&[Value], ResponseError> {
    let object = response.as_object().ok_or(ResponseError::NotAnObject)?;
    let homeworks = object
        .get("homeworks")
        .ok_or(ResponseError::MissingHomeworks)?;
    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or(ResponseError::HomeworksNotAList)
}

/// The server-side cursor for the next poll, if the body carries one.
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}

/// Turn one homework record into the chat message announcing its status.
pub fn parse_status(homework: &Value) -> Result<String, RecordError> {
    let name = homework
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or(RecordError::MissingName)?;
    let status = match homework.get("status") {
        None | Some(Value::Null) => return Err(RecordError::MissingStatus),
        Some(Value::String(code)) => code.parse::<HomeworkStatus>()?,
        Some(other) => return Err(RecordError::UnknownStatus(other.to_string())),
    };
    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {}",
        status.verdict()
    ))
}
