// codenest: terminal IDE-lite.
// Edit code in several languages and run it on a remote execution service.

mod app;
mod config;
mod error;
mod execution;
mod export;
mod language;
mod paths;
mod state;
mod ui;

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::Config;
use crate::error::Result;
use crate::execution::ExecutionClient;

/// Send tracing output to the log file; the terminal belongs to the UI.
fn init_logging(config: &Config) {
    let Some(path) = paths::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    init_logging(&config);
    tracing::info!(service_url = %config.service_url, "starting codenest");

    let client = ExecutionClient::new(&config.service_url, config.request_timeout())?;
    let client_url = client.execute_url().to_string();
    let mut app = App::new(client, config.export_dir());
    app.console
        .log_info(format!("Execution service: {}", client_url));
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "invalid config, using defaults");
        app.console
            .log_warn(format!("Invalid config, using defaults: {}", e));
    }

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result?;
    Ok(())
}
