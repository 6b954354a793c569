//! Contains all the command handlers that are callable from the presentation layer via IPC.
//!
//! Each function in this module corresponds to a specific `IpcMessage::command`.
//! These handlers are responsible for interacting with the `AppState` and the `core`
//! logic, and for sending `UserEvent`s back to the presentation layer.

use super::events::UserEvent;
use super::filtering::{apply_criteria_update, apply_filters};
use super::helpers::{notify, with_state_and_notify};
use super::proxy::EventProxy;
use super::state::AppState;
use super::tasks::start_material_load;
use crate::config::{self, AppConfig};
use crate::core::{CriteriaUpdate, MaterialSource, Selection};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Handles the initial request for state from the presentation layer when it loads.
pub fn initialize<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    let state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");
    notify(&state_guard, &proxy);
}

/// Applies a partial criteria change (`onCriteriaChange`) and re-filters.
pub fn update_criteria<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    match serde_json::from_value::<CriteriaUpdate>(payload.clone()) {
        Ok(update) => with_state_and_notify(&state, &proxy, |s| {
            apply_criteria_update(s, update);
        }),
        Err(e) => tracing::warn!(
            "Failed to deserialize criteria update from payload {:?}: {}",
            payload,
            e
        ),
    }
}

/// Flips the expansion of one folder key (`onToggle`).
///
/// The key is either a `course/branch` key or a full `course/branch/semester` path.
pub fn toggle_folder<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    if let Ok(key) = serde_json::from_value::<String>(payload.clone()) {
        with_state_and_notify(&state, &proxy, |s| {
            let expanded = s.expanded_folders.toggle(&key);
            tracing::debug!("Folder '{}' expanded: {}", key, expanded);
        });
    } else {
        tracing::warn!(
            "Failed to deserialize folder key from payload: {:?}",
            payload
        );
    }
}

/// Clears every filter and collapses the tree.
pub fn reset_filters<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    with_state_and_notify(&state, &proxy, |s| {
        s.reset_view_state();
    });
}

/// Re-fetches the full batch from the material source.
pub fn reload_materials<S, P>(source: Arc<S>, proxy: P, state: Arc<Mutex<AppState>>)
where
    S: MaterialSource + ?Sized + 'static,
    P: EventProxy,
{
    start_material_load(source, proxy, state);
}

/// Replaces the configuration, persists it and re-applies the filters.
pub fn update_config<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let Ok(new_config) = serde_json::from_value::<AppConfig>(payload.clone()) else {
        tracing::warn!(
            "Failed to deserialize AppConfig from payload: {:?}",
            payload
        );
        return;
    };

    with_state_and_notify(&state, &proxy, |s| apply_config(s, new_config));
}

/// Writes the current configuration to the path given as payload.
pub fn export_config<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let Ok(path) = serde_json::from_value::<PathBuf>(payload.clone()) else {
        tracing::warn!("Failed to deserialize export path from payload: {:?}", payload);
        return;
    };

    let state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");
    if let Err(e) = config::settings::export_config(&state_guard.config, &path) {
        tracing::error!("Failed to export config: {}", e);
        proxy.send_event(UserEvent::ShowError(format!(
            "Failed to export config: {e}"
        )));
    }
}

/// Reads a configuration from the path given as payload and applies it.
pub fn import_config<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let Ok(path) = serde_json::from_value::<PathBuf>(payload.clone()) else {
        tracing::warn!("Failed to deserialize import path from payload: {:?}", payload);
        return;
    };

    match config::settings::import_config(&path) {
        Ok(new_config) => with_state_and_notify(&state, &proxy, |s| apply_config(s, new_config)),
        Err(e) => {
            tracing::error!("Failed to import config from {:?}: {}", path, e);
            proxy.send_event(UserEvent::ShowError(format!(
                "Failed to import config: {e}"
            )));
        }
    }
}

/// Installs `new_config`, saves it and re-filters.
///
/// A catalog change can make the chosen branch meaningless; it is then reset
/// the same way a course change would reset it.
fn apply_config(s: &mut AppState, new_config: AppConfig) {
    s.config = new_config;
    if let Err(e) = config::settings::save_config(&s.config, s.config_path.as_deref()) {
        tracing::warn!("Failed to save config on update: {}", e);
    }
    if !s
        .config
        .catalog
        .is_valid_branch(&s.criteria.course, &s.criteria.branch)
    {
        s.criteria.branch = Selection::All;
    }
    apply_filters(s);
}
