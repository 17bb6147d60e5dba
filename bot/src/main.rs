use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use homework_bot::{logging, Cli, Config};
use homework_core::Secrets;
use tracing::{error, info};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(err) = logging::init(&cli.log_file) {
        eprintln!("homework-bot: {err:#}");
        return ExitCode::FAILURE;
    }

    // Nothing touches the network until all secrets are present.
    let secrets = match Secrets::from_env() {
        Ok(secrets) => secrets,
        Err(err) => {
            error!(fatal = true, "{err}; bot stopped");
            return ExitCode::FAILURE;
        }
    };
    let config = Config::new(&cli, secrets);

    let now = Utc::now().timestamp();
    info!(
        endpoint = %config.endpoint,
        retry_period_secs = config.retry_period.as_secs(),
        from_date = now,
        "homework bot started"
    );
    let mut bot = config.build_bot(now);

    if config.once {
        bot.run_cycle(now);
        return ExitCode::SUCCESS;
    }
    bot.run(config.retry_period)
}
