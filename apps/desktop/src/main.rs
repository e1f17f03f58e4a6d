use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{HttpBackend, Session};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod config;
mod events;
mod render;

use app::{App, Flow};
use events::AppEvent;
use render::TextCanvas;

#[derive(Parser, Debug)]
#[command(about = "Map a process step by step and analyse its lead time")]
struct Args {
    /// Path to a TOML settings file (defaults to ./vsm.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    process_name: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let (mut settings, config_warning) = config::load_settings(args.config.as_deref());
    if let Some(v) = args.server_url {
        settings.server_url = v;
    }
    if let Some(v) = args.process_name {
        settings.process_name = v;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(std::io::stderr)
        .init();
    if let Some(warning) = config_warning {
        tracing::warn!("{warning}");
    }

    let backend = HttpBackend::new(&settings.server_url)
        .with_context(|| format!("invalid server url '{}'", settings.server_url))?;
    tracing::info!(server_url = backend.server_url(), "analysis backend configured");

    let canvas = TextCanvas::default();
    let session = Session::new(
        settings.process_name.clone(),
        Arc::new(backend),
        Box::new(canvas.clone()),
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let input_tx = tx.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if input_tx.send(AppEvent::Input(line)).is_err() {
                return;
            }
        }
        let _ = input_tx.send(AppEvent::InputClosed);
    });

    let mut app = App::new(session, canvas, tx);
    println!("{}", commands::HELP);
    print!("{}", render::table(&app.session().table()));

    while let Some(event) = rx.recv().await {
        let mut out = String::new();
        let flow = app.handle(event, &mut out);
        print!("{out}");
        if flow == Flow::Quit {
            break;
        }
    }

    Ok(())
}
