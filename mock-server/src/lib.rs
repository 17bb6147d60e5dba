use std::{collections::VecDeque, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const STATUSES_PATH: &str = "/api/user_api/homework_statuses/";

/// A scripted answer for the next status poll.
#[derive(Clone, Debug)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn error(status: u16) -> Self {
        Self {
            status,
            body: json!({"code": "error", "message": "scripted failure"}),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentMessage {
    pub chat_id: String,
    pub text: String,
}

/// Everything the fake services know and everything they were asked.
#[derive(Debug, Default)]
pub struct Backend {
    pub practicum_token: String,
    pub telegram_token: String,
    /// Served front to back; an empty queue answers with no homework.
    pub replies: VecDeque<Reply>,
    /// `from_date` of every authorised poll, in order.
    pub polls: Vec<i64>,
    pub messages: Vec<SentMessage>,
    /// Answer `sendMessage` with "chat not found" instead of delivering.
    pub reject_messages: bool,
}

pub type Db = Arc<RwLock<Backend>>;

pub fn new_db(practicum_token: &str, telegram_token: &str) -> Db {
    Arc::new(RwLock::new(Backend {
        practicum_token: practicum_token.to_string(),
        telegram_token: telegram_token.to_string(),
        ..Backend::default()
    }))
}

pub fn app(db: Db) -> Router {
    Router::new()
        .route(STATUSES_PATH, get(homework_statuses))
        .route("/{bot}/sendMessage", post(send_message))
        .with_state(db)
}

pub async fn run(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app(db)).await
}

#[derive(Deserialize)]
pub struct StatusQuery {
    pub from_date: i64,
}

async fn homework_statuses(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<StatusQuery>,
) -> (StatusCode, Json<Value>) {
    let mut backend = db.write().await;
    let expected = format!("OAuth {}", backend.practicum_token);
    let authorised = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == expected);
    if !authorised {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "code": "not_authenticated",
                "message": "Учетные данные не были предоставлены.",
                "source": "__response__"
            })),
        );
    }

    backend.polls.push(query.from_date);
    match backend.replies.pop_front() {
        Some(reply) => (
            StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(reply.body),
        ),
        None => (
            StatusCode::OK,
            Json(json!({"homeworks": [], "current_date": query.from_date})),
        ),
    }
}

#[derive(Deserialize)]
pub struct SendMessageBody {
    pub chat_id: Value,
    pub text: String,
}

async fn send_message(
    State(db): State<Db>,
    Path(bot): Path<String>,
    Json(input): Json<SendMessageBody>,
) -> (StatusCode, Json<Value>) {
    let mut backend = db.write().await;
    if bot.strip_prefix("bot") != Some(backend.telegram_token.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"ok": false, "error_code": 401, "description": "Unauthorized"})),
        );
    }
    if backend.reject_messages {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"ok": false, "error_code": 400, "description": "Bad Request: chat not found"})),
        );
    }

    let chat_id = match &input.chat_id {
        Value::String(id) => id.clone(),
        other => other.to_string(),
    };
    backend.messages.push(SentMessage {
        chat_id: chat_id.clone(),
        text: input.text.clone(),
    });
    let message_id = backend.messages.len();
    (
        StatusCode::OK,
        Json(json!({
            "ok": true,
            "result": {"message_id": message_id, "chat": {"id": chat_id}, "text": input.text}
        })),
    )
}
