use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use futures::StreamExt;
use note_editor::{
    config::{load_settings, load_settings_from},
    Navigator, NoteEditorController, ScreenState, UiEvent,
};
use storage::Storage;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{broadcast, Notify},
    task::JoinHandle,
};
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::{parse_command, Command, HELP};

#[derive(Parser, Debug)]
#[command(about = "Edit and save a single note from the terminal")]
struct Args {
    #[arg(long, default_value = "sqlite://./data/notes.db")]
    database_url: String,
    /// Settings file; `note_editor.toml` in the working directory if omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print states and snapshots as JSON lines.
    #[arg(long)]
    json: bool,
}

/// Leaving the editor screen ends the session.
#[derive(Default)]
struct SessionNavigator {
    popped: Notify,
}

impl Navigator for SessionNavigator {
    fn pop(&self) {
        info!("leaving note editor screen");
        self.popped.notify_one();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => load_settings_from(path),
        None => load_settings(),
    };
    let storage = Arc::new(
        Storage::new(&args.database_url)
            .await
            .with_context(|| format!("failed to open note store at {}", args.database_url))?,
    );
    storage.health_check().await?;

    let navigator = Arc::new(SessionNavigator::default());
    let mut controller =
        NoteEditorController::with_settings(storage.clone(), navigator.clone(), settings);
    let renderer = spawn_renderer(controller.subscribe_transitions(), args.json);

    controller.handle_event(UiEvent::Started)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = navigator.popped.notified() => break,
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(Command::Event(event)) => {
                        if let Err(err) = controller.handle_event(event) {
                            eprintln!("{err}");
                        }
                    }
                    Ok(Command::Show) => {
                        let snapshot = controller.snapshot();
                        println!("{}", render::render_snapshot(&snapshot, args.json)?);
                    }
                    Ok(Command::Quit) => {
                        let state = controller.current_state();
                        if state.is_busy() {
                            warn!(%state, "quitting with work in flight");
                        }
                        break;
                    }
                    Err(_) if line.trim() == "help" => println!("{HELP}"),
                    Err(hint) => eprintln!("{hint}"),
                }
            }
        }
    }

    controller.teardown().await;
    if let Err(err) = renderer.await {
        warn!(error = %err, "renderer task failed");
    }

    let saved = storage.count_notes().await?;
    info!(saved, "note editor closed");
    Ok(())
}

/// Prints every state transition until the controller goes away.
fn spawn_renderer(rx: broadcast::Receiver<ScreenState>, json: bool) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut transitions = BroadcastStream::new(rx);
        while let Some(item) = transitions.next().await {
            match item {
                Ok(state) => match render::render_state(&state, json) {
                    Ok(line) => println!("{line}"),
                    Err(err) => warn!(error = %err, "failed to render state"),
                },
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    warn!(skipped, "renderer fell behind; some states were not shown");
                }
            }
        }
    })
}
