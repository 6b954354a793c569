//! The stateful browse layer: shared `AppState`, IPC command dispatch and the
//! view model handed to the presentation layer.

pub mod commands;
pub mod events;
pub mod filtering;
pub mod helpers;
pub mod proxy;
pub mod state;
pub mod tasks;
pub mod tree_generator;
pub mod view_model;

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::core::MaterialSource;
use events::{IpcMessage, UserEvent};
use proxy::EventProxy;
use state::AppState;
use tree_generator::TreeGenerator;

/// Dispatches one raw IPC message to its command handler.
///
/// Malformed messages and unknown commands are logged and ignored.
pub fn handle_ipc_message<P, S>(
    message: String,
    source: Arc<S>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) where
    P: EventProxy,
    S: MaterialSource + ?Sized + 'static,
{
    let msg: IpcMessage = match serde_json::from_str(&message) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!("Failed to parse IPC message {:?}: {}", message, e);
            return;
        }
    };

    tracing::debug!("Received IPC command '{}'", msg.command);
    match msg.command.as_str() {
        "initialize" => commands::initialize(proxy, state),
        "updateCriteria" => commands::update_criteria(msg.payload, proxy, state),
        "toggleFolder" => commands::toggle_folder(msg.payload, proxy, state),
        "resetFilters" => commands::reset_filters(proxy, state),
        "reloadMaterials" => commands::reload_materials(source, proxy, state),
        "updateConfig" => commands::update_config(msg.payload, proxy, state),
        "exportConfig" => commands::export_config(msg.payload, proxy, state),
        "importConfig" => commands::import_config(msg.payload, proxy, state),
        _ => tracing::warn!("Unknown command received: {}", msg.command),
    }
}

/// Renders a `UserEvent` for a line-oriented presentation layer.
pub fn handle_user_event<W: Write>(event: UserEvent, out: &mut W) -> io::Result<()> {
    match event {
        UserEvent::StateUpdate(ui_state) => {
            write!(out, "{}", TreeGenerator::generate_tree(&ui_state.tree))?;
            writeln!(out, "{}", ui_state.status_message)?;
            if let Some(last_updated) = &ui_state.last_updated {
                writeln!(out, "Last updated: {}", last_updated)?;
            }
        }
        UserEvent::ShowError(message) => {
            writeln!(out, "error: {}", message)?;
        }
    }
    out.flush()
}
