mod api;
mod cli;
mod config;
mod contacts;
mod controller;
mod logging;
mod tui;

#[cfg(test)]
mod test_support;

use std::{io, path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::{ArgAction, Parser};
use dotenvy::dotenv;
use tracing::info;

use crate::api::{ContactsApi, ContactsClient};
use crate::config::{AppConfig, CliOverrides};
use crate::controller::ContactsController;
use crate::tui::TuiApp;

#[derive(Parser, Debug, Clone)]
#[command(name = "contacts", version, about = "Manage your contacts with ease (TUI/CLI)")]
struct Cli {
    /// Use plain CLI mode (disable TUI)
    #[arg(long, action = ArgAction::SetTrue)]
    no_tui: bool,

    /// Contacts service base URL (or env CONTACTS_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Color theme (dark, light)
    #[arg(long)]
    theme: Option<String>,

    /// Log level (error,warn,info,debug,trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Log file used while the TUI owns the terminal
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl From<Cli> for CliOverrides {
    fn from(cli: Cli) -> Self {
        Self {
            api_url: cli.api_url,
            theme: cli.theme,
            log_level: cli.log_level,
            log_file: cli.log_file,
            no_tui: cli.no_tui,
        }
    }
}

fn build_controller(cfg: &AppConfig) -> Result<ContactsController> {
    let client = ContactsClient::new(&cfg.api_url)?.with_http_config(&cfg.http)?;
    info!(base=%client.base_url(), "contacts client ready");
    let api: Arc<dyn ContactsApi> = Arc::new(client);
    Ok(ContactsController::new(api))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    let (cfg, report) = AppConfig::from_cli(cli.into())?;

    if cfg.no_tui {
        logging::init_stderr_logging(&cfg.log_level)?;
    } else {
        logging::init_file_logging(&cfg.log_level, &cfg.log_file)?;
    }
    report.log();
    info!(?cfg, "app config");

    let mut controller = build_controller(&cfg)?;

    if cfg.no_tui {
        let stdin = io::stdin();
        cli::run_cli_loop(&mut controller, stdin.lock(), io::stdout()).await
    } else {
        let mut app = TuiApp::new(controller, &cfg.theme);
        app.run()
    }
}
