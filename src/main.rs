use anyhow::Context;
use material_browser::app;
use material_browser::config;
use material_browser::core::JsonFileSource;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The config picks the log filter, so a load error is reported once logging is up.
    let (config, config_error) = config::settings::load_config_or_default(None);

    // Initialize logging; stdout is reserved for the rendered tree.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = &config_error {
        tracing::warn!("Failed to load config, using defaults: {:#}", e);
    }

    let materials_path = std::env::args_os()
        .nth(1)
        .map(Into::into)
        .or_else(|| config.materials_file.clone())
        .context("No materials file given and none configured")?;
    tracing::info!("Browsing materials from {:?}", materials_path);

    let source = Arc::new(JsonFileSource::new(materials_path));
    let state = Arc::new(Mutex::new(app::state::AppState::new(config)));
    let (proxy, mut events) = mpsc::unbounded_channel::<app::events::UserEvent>();

    app::tasks::start_material_load(source.clone(), proxy.clone(), state.clone());

    // Each stdin line is one IPC message; the loop ends with the input.
    // The channel closes once the reader and any in-flight load are done.
    let ipc_source = source;
    let ipc_state = state;
    let ipc_proxy = proxy;
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => app::handle_ipc_message(
                    line,
                    ipc_source.clone(),
                    ipc_proxy.clone(),
                    ipc_state.clone(),
                ),
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("Failed to read IPC input: {}", e);
                    break;
                }
            }
        }
        tracing::info!("IPC input closed.");
    });

    let mut stdout = std::io::stdout();
    while let Some(event) = events.recv().await {
        app::handle_user_event(event, &mut stdout)?;
    }

    Ok(())
}

