#![allow(deprecated)]
use assert_cmd::Command;
use mock_server::{Db, Reply, STATUSES_PATH};
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

const SECRETS: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

fn bot(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("homework-bot").unwrap();
    cmd.current_dir(dir.path()).env("RUST_LOG", "debug");
    for name in SECRETS {
        cmd.env_remove(name);
    }
    cmd
}

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

#[test]
fn missing_secrets_stop_the_bot() {
    let dir = TempDir::new().unwrap();
    bot(&dir)
        .env("PRACTICUM_TOKEN", "p-token")
        .assert()
        .failure()
        .stdout(predicate::str::contains("TELEGRAM_TOKEN, TELEGRAM_CHAT_ID"));

    let log = std::fs::read_to_string(dir.path().join("bot.log")).unwrap();
    assert!(log.contains("missing required environment variables: TELEGRAM_TOKEN, TELEGRAM_CHAT_ID"));
    assert!(log.contains("ERROR"));
}

#[test]
fn each_secret_is_required() {
    for absent in SECRETS {
        let dir = TempDir::new().unwrap();
        let mut cmd = bot(&dir);
        for name in SECRETS.into_iter().filter(|name| *name != absent) {
            cmd.env(name, "value");
        }
        // Pointing at a closed port proves no request is attempted: the
        // failure must name the variable, not a connection error.
        cmd.args(["--endpoint", "http://127.0.0.1:9/", "--once"])
            .assert()
            .failure()
            .stdout(predicate::str::contains(absent))
            .stdout(predicate::str::contains("Ошибка запроса").not());
    }
}

#[test]
fn once_polls_and_notifies() {
    let db = mock_server::new_db("p-token", "t-token");
    db.try_write().unwrap().replies.push_back(Reply::ok(json!({
        "homeworks": [{"homework_name": "proj1", "status": "reviewing"}]
    })));
    let addr = start_server(db.clone());

    let dir = TempDir::new().unwrap();
    bot(&dir)
        .env("PRACTICUM_TOKEN", "p-token")
        .env("TELEGRAM_TOKEN", "t-token")
        .env("TELEGRAM_CHAT_ID", "42")
        .args([
            "--endpoint",
            &format!("http://{addr}{STATUSES_PATH}"),
            "--telegram-api-url",
            &format!("http://{addr}"),
            "--log-file",
            "custom.log",
            "--once",
        ])
        .assert()
        .success();

    let backend = db.try_read().unwrap();
    assert_eq!(backend.polls.len(), 1);
    assert_eq!(backend.messages.len(), 1);
    assert_eq!(
        backend.messages[0].text,
        "Изменился статус проверки работы \"proj1\". Работа взята на проверку ревьюером."
    );
    let log = std::fs::read_to_string(dir.path().join("custom.log")).unwrap();
    assert!(log.contains("homework status changed"));
    assert!(!dir.path().join("bot.log").exists());
}

#[test]
fn log_file_is_appended() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("bot.log"), "previous run\n").unwrap();
    bot(&dir).assert().failure();

    let log = std::fs::read_to_string(dir.path().join("bot.log")).unwrap();
    assert!(log.starts_with("previous run\n"));
    assert!(log.contains("PRACTICUM_TOKEN"));
}
