//! Terminal front end for the to-do list.
//!
//! Reads commands from stdin, prints the page to stdout and logs to stderr.

use std::sync::Arc;

use tasklist::command::run_shell;
use tasklist::config::DEFAULT_LOG_FILTER;
use tasklist::{ClientConfig, TodoEnvironment, TodoListController};
use tasklist_http::HttpTodoApi;
use tokio::io::BufReader;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    let config = ClientConfig::from_env();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(api_url = %config.api_url, "Starting tasklist");

    let api = Arc::new(HttpTodoApi::new(config.api_url.as_str()));
    let mut controller =
        TodoListController::mount_with_config(TodoEnvironment::new(api), config.store_config())
            .await?;

    let stdin = BufReader::new(tokio::io::stdin());
    run_shell(&mut controller, stdin, &mut std::io::stdout()).await?;

    if let Err(error) = controller.unmount().await {
        tracing::warn!(%error, "Unmounted with calls still in flight");
    }
    Ok(())
}
