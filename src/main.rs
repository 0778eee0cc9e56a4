mod action;
mod app;
mod config;
mod data;
mod error;
mod event;
mod feed;
mod images;
mod lifecycle;
mod models;
mod tui;
mod ui;
mod utils;
mod view;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "jetnews", version, about = "The Jetnews home feed in your terminal")]
struct Cli {
    /// Path to a config file (defaults to ~/.config/jetnews/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = "error")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = config::AppConfig::load(cli.config.as_deref())?;

    // Posts and images load before the terminal is taken over, so a bad
    // feed fails on a normal screen.
    let mut app = app::App::new(config, None)?;

    let mut terminal = tui::init()?;

    // Install a panic hook that restores the terminal before printing the panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = tui::restore();
        default_panic(info);
    }));

    let result = app.run(&mut terminal).await;
    tui::restore()?;

    result
}
