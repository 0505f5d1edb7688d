// SPDX-License-Identifier: GPL-3.0-only

//! Virtboard Host
//!
//! Reads input events as JSON lines on stdin, drives the keyboard engine and
//! writes visual deltas as JSON lines on stdout. When stdin closes, the final
//! text buffer is printed as one last JSON object.
//!
//! An event line looks like `{"code": "KeyA", "phase": "down"}`, with an
//! optional `"source": "pointer"`.

use clap::Parser;
use futures::channel::mpsc;
use futures::SinkExt;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use virtboard::app_settings;
use virtboard::config::Config;
use virtboard::edit::{EditBuffer, TextSurface};
use virtboard::input::InputEvent;
use virtboard::keyboard::{InputDispatcher, JsonLinesSurface};
use virtboard::layout::{
    load_builtin_layouts, parse_layout_file, LanguageCode, LayoutTable, ParseError,
};
use virtboard::session::{event_channel, run_session};
use virtboard::storage::FileStore;

#[derive(Parser, Debug)]
#[command(name = "virtboard")]
#[command(about = "On-screen keyboard engine driven by JSON-lines input events")]
struct Cli {
    /// Configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Layout table file; overrides the configured one
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Preference file for the last-used language
    #[arg(long)]
    state: Option<PathBuf>,

    /// Default language when no preference is stored
    #[arg(long)]
    language: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the delta stream.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("virtboard=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!("Starting {}", app_settings::APP_ID);

    let mut config = Config::load_or_default(cli.config.as_deref());
    if let Some(layout) = cli.layout {
        config.layout_path = Some(layout);
    }
    if let Some(state) = cli.state {
        config.state_path = Some(state);
    }
    if let Some(language) = cli.language {
        config.default_language = LanguageCode::from(language);
    }

    let layouts = match load_layouts(&config) {
        Ok(layouts) => layouts,
        Err(e) => {
            tracing::error!("Failed to load layouts: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let store = FileStore::new(config.state_path());
    tracing::debug!("Language preference file: {}", store.path().display());
    let mut dispatcher =
        match InputDispatcher::new(layouts, store, &config.default_language, EditBuffer::new()) {
            Ok(dispatcher) => dispatcher,
            Err(e) => {
                tracing::error!("Failed to start keyboard: {}", e);
                return ExitCode::FAILURE;
            }
        };

    let mut surface = JsonLinesSurface::new(std::io::stdout());
    let initial = dispatcher.glyphs();
    for delta in &initial {
        if let Err(e) = surface.emit(delta) {
            tracing::error!("Failed to write output: {}", e);
            return ExitCode::FAILURE;
        }
    }

    let (tx, rx) = event_channel(app_settings::EVENT_CHANNEL_CAPACITY);
    let reader = tokio::spawn(read_events(tx));

    let handled = run_session(&mut dispatcher, rx, &mut surface).await;
    if let Err(e) = reader.await {
        tracing::warn!("Input reader stopped abnormally: {}", e);
    }
    tracing::info!("Session finished after {} events", handled);

    let text = dispatcher.text();
    let summary = serde_json::json!({
        "text": text.text(),
        "cursor": text.cursor(),
    });
    if let Err(e) = surface.emit(&summary) {
        tracing::error!("Failed to write output: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn load_layouts(config: &Config) -> Result<LayoutTable, ParseError> {
    let result = match &config.layout_path {
        Some(path) => parse_layout_file(path)?,
        None => load_builtin_layouts()?,
    };

    for warning in &result.warnings {
        tracing::warn!("Layout: {}", warning);
    }

    let table = result.into_layout();
    tracing::info!(
        "Loaded layout '{}' with {} languages",
        table.name,
        table.languages.len()
    );
    Ok(table)
}

/// Forwards stdin lines to the session until EOF or the receiver goes away.
async fn read_events(mut tx: mpsc::Sender<InputEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read stdin: {}", e);
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<InputEvent>(line) {
            Ok(event) => {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            Err(e) => tracing::warn!("Skipping malformed event '{}': {}", line, e),
        }
    }
}
