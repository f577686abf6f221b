use file_browser::app;
use file_browser::app::events::UserEvent;
use file_browser::app::file_dialog::NativeDialogService;
use file_browser::app::state::AppState;
use file_browser::config::preferences::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore,
};
use file_browser::config::AppConfig;
use file_browser::core::SystemLauncher;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Stdout carries the event stream, so logs go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    let preferences: Box<dyn PreferenceStore> = match FilePreferenceStore::open_default() {
        Ok(store) => {
            tracing::info!("Using preferences at {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!("Preferences will not persist this session: {}", e);
            Box::new(MemoryPreferenceStore::default())
        }
    };

    let state = Arc::new(Mutex::new(AppState::new(config, preferences)));
    let dialog_service = NativeDialogService;
    let launcher = SystemLauncher;

    // Every event becomes one JSON line on stdout.
    let (proxy, mut event_rx) = mpsc::unbounded_channel::<UserEvent>();
    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(event) = event_rx.recv().await {
            let line = match app::render_user_event(&event) {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!("Failed to serialize event: {}", e);
                    continue;
                }
            };
            if let Err(e) = write_line(&mut stdout, &line).await {
                tracing::error!("Failed to write event: {}", e);
                break;
            }
        }
    });

    app::commands::initialize(proxy.clone(), state.clone());
    tracing::info!("Application initialized.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(message) = lines.next_line().await? {
        if message.trim().is_empty() {
            continue;
        }
        // Commands are synchronous and may open a modal dialog.
        tokio::task::block_in_place(|| {
            app::handle_ipc_message(
                &message,
                &dialog_service,
                &launcher,
                proxy.clone(),
                state.clone(),
            );
        });
    }

    tracing::info!("Input closed. Shutting down...");
    drop(proxy);
    writer.await?;
    Ok(())
}

async fn write_line(stdout: &mut tokio::io::Stdout, line: &str) -> std::io::Result<()> {
    stdout.write_all(line.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}
