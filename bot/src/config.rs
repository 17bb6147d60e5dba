//! Command-line and environment configuration.
//!
//! Secrets come from `homework_core::Secrets`; everything here has a default
//! and can be overridden by a flag or its environment variable.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use homework_core::{PracticumClient, Secrets, TelegramClient, PRACTICUM_ENDPOINT, TELEGRAM_API_URL};

use crate::notifier::Notifier;
use crate::runner::HomeworkBot;
use crate::transport::UreqTransport;

#[derive(Debug, Parser)]
#[command(
    name = "homework-bot",
    version,
    about = "Polls the homework review API and reports status changes to Telegram"
)]
pub struct Cli {
    /// Homework status endpoint
    #[arg(long, env = "PRACTICUM_ENDPOINT", default_value = PRACTICUM_ENDPOINT)]
    pub endpoint: String,

    /// Telegram Bot API base URL
    #[arg(long, env = "TELEGRAM_API_URL", default_value = TELEGRAM_API_URL)]
    pub telegram_api_url: String,

    /// Seconds to wait between polls
    #[arg(
        long,
        env = "RETRY_PERIOD",
        default_value_t = 600,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub retry_period: u64,

    /// Per-request HTTP timeout in seconds
    #[arg(
        long,
        env = "REQUEST_TIMEOUT",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub request_timeout: u64,

    /// Log file, appended to alongside stdout
    #[arg(long, env = "BOT_LOG_FILE", default_value = "bot.log")]
    pub log_file: PathBuf,

    /// Run a single poll cycle and exit
    #[arg(long)]
    pub once: bool,
}

/// Everything the bot needs, fixed for the life of the process.
#[derive(Debug, Clone)]
pub struct Config {
    pub secrets: Secrets,
    pub endpoint: String,
    pub telegram_api_url: String,
    pub retry_period: Duration,
    pub request_timeout: Duration,
    pub once: bool,
}

impl Config {
    pub fn new(cli: &Cli, secrets: Secrets) -> Self {
        Self {
            secrets,
            endpoint: cli.endpoint.clone(),
            telegram_api_url: cli.telegram_api_url.clone(),
            retry_period: Duration::from_secs(cli.retry_period),
            request_timeout: Duration::from_secs(cli.request_timeout),
            once: cli.once,
        }
    }

    pub fn build_bot(&self, cursor: i64) -> HomeworkBot<UreqTransport> {
        let practicum = PracticumClient::new(&self.endpoint, &self.secrets.practicum_token);
        let telegram = TelegramClient::new(
            &self.telegram_api_url,
            &self.secrets.telegram_token,
            &self.secrets.telegram_chat_id,
        );
        HomeworkBot::new(
            practicum,
            Notifier::new(telegram),
            UreqTransport::new(self.request_timeout),
            cursor,
        )
    }
}
