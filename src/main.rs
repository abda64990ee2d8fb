use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use absence_viewer::api::ApiClient;
use absence_viewer::cli::{self, Cli, Command};
use absence_viewer::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();

    let config = Config::from_env(args.base_url.as_deref())?;

    // Rolling daily log
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("absence-viewer")
        .filename_suffix("log")
        .build(&config.log_dir)
        .with_context(|| format!("cannot open log directory '{}'", config.log_dir))?;
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(base_api = %config.base_api, "Absence viewer starting...");

    let client = ApiClient::from_config(&config).context("build http client")?;
    let command = args.command.unwrap_or_else(Command::list_default);

    let output = cli::execute(command, &client, &config).await?;
    println!("{}", output.text);

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        error!("Command finished with errors");
        Ok(ExitCode::FAILURE)
    }
}
