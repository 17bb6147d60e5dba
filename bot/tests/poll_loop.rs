//! Drive `HomeworkBot` over real HTTP against the mock server.

use std::time::Duration;

use homework_bot::{HomeworkBot, Notifier, UreqTransport};
use homework_core::{CycleEvent, PracticumClient, TelegramClient};
use mock_server::{Db, Reply, STATUSES_PATH};
use serde_json::json;

fn start_server(db: Db) -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, db).await
        })
        .unwrap();
    });
    addr
}

fn bot_for(addr: std::net::SocketAddr, practicum_token: &str) -> HomeworkBot<UreqTransport> {
    HomeworkBot::new(
        PracticumClient::new(&format!("http://{addr}{STATUSES_PATH}"), practicum_token),
        Notifier::new(TelegramClient::new(&format!("http://{addr}"), "t-token", "42")),
        UreqTransport::new(Duration::from_secs(5)),
        1_700_000_000,
    )
}

#[test]
fn status_changes_and_failures_reach_the_chat() {
    let db = mock_server::new_db("p-token", "t-token");
    {
        let mut backend = db.try_write().unwrap();
        backend.replies.push_back(Reply::ok(json!({
            "homeworks": [{"homework_name": "proj1", "status": "approved"}],
            "current_date": 1_700_000_100
        })));
        backend.replies.push_back(Reply::ok(json!({"homeworks": []})));
        backend.replies.push_back(Reply::ok(json!({"homeworks": [{"homework_name": "proj1"}]})));
        backend.replies.push_back(Reply::ok(json!({"homeworks": [{"homework_name": "proj1"}]})));
    }
    let addr = start_server(db.clone());
    let mut bot = bot_for(addr, "p-token");

    let report = bot.run_cycle(1_700_000_500);
    assert!(matches!(report.event, CycleEvent::StatusChanged));
    assert_eq!(bot.state().cursor(), 1_700_000_100);

    let report = bot.run_cycle(1_700_000_600);
    assert!(matches!(report.event, CycleEvent::NoUpdates));
    assert_eq!(bot.state().cursor(), 1_700_000_600);

    bot.run_cycle(1_700_000_700);
    bot.run_cycle(1_700_000_800);

    let backend = db.try_read().unwrap();
    assert_eq!(backend.polls, vec![1_700_000_000, 1_700_000_100, 1_700_000_600, 1_700_000_600]);
    let texts: Vec<&str> = backend.messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Изменился статус проверки работы \"proj1\". Работа проверена: ревьюеру всё понравилось. Ура!",
            "Сбой в работе программы: Отсутствует статус домашней работы.",
        ]
    );
}

#[test]
fn failed_delivery_does_not_break_the_cycle() {
    let db = mock_server::new_db("p-token", "t-token");
    {
        let mut backend = db.try_write().unwrap();
        backend.reject_messages = true;
        backend.replies.push_back(Reply::ok(json!({
            "homeworks": [{"homework_name": "proj1", "status": "rejected"}],
            "current_date": 1_700_000_100
        })));
        backend.replies.push_back(Reply::ok(json!({
            "homeworks": [{"homework_name": "proj1", "status": "rejected"}]
        })));
    }
    let addr = start_server(db.clone());
    let mut bot = bot_for(addr, "p-token");

    let report = bot.run_cycle(1_700_000_500);
    assert!(matches!(report.event, CycleEvent::StatusChanged));
    assert_eq!(bot.state().cursor(), 1_700_000_100);

    // The failed send is not retried on the next cycle.
    let report = bot.run_cycle(1_700_000_600);
    assert!(matches!(report.event, CycleEvent::Unchanged));
    assert!(report.notification.is_none());
    assert!(db.try_read().unwrap().messages.is_empty());
}

#[test]
fn unreachable_api_is_reported_to_chat() {
    let db = mock_server::new_db("p-token", "t-token");
    let addr = start_server(db.clone());

    // Nothing listens on the practicum side of this bot.
    let closed = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead_addr = closed.local_addr().unwrap();
    drop(closed);

    let mut bot = HomeworkBot::new(
        PracticumClient::new(&format!("http://{dead_addr}{STATUSES_PATH}"), "p-token"),
        Notifier::new(TelegramClient::new(&format!("http://{addr}"), "t-token", "42")),
        UreqTransport::new(Duration::from_secs(5)),
        1_700_000_000,
    );
    let report = bot.run_cycle(1_700_000_500);
    assert!(matches!(report.event, CycleEvent::Failed(_)));
    bot.run_cycle(1_700_001_100);

    let backend = db.try_read().unwrap();
    assert_eq!(backend.messages.len(), 1);
    assert!(backend.messages[0]
        .text
        .starts_with("Сбой в работе программы: Ошибка запроса к API:"));
}
