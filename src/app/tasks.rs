//! Background tasks that feed material batches into the `AppState`.

use std::sync::{Arc, Mutex};

use super::events::UserEvent;
use super::filtering::apply_filters;
use super::helpers::notify;
use super::proxy::EventProxy;
use super::state::AppState;
use crate::core::MaterialSource;

/// Starts fetching a fresh batch from `source`.
///
/// Any load already in flight is aborted. The task replaces the batch only if
/// no newer load started in the meantime; on failure the previous batch stays
/// and an error event is sent. Must be called from within a Tokio runtime.
pub fn start_material_load<S, P>(source: Arc<S>, proxy: P, state: Arc<Mutex<AppState>>)
where
    S: MaterialSource + ?Sized + 'static,
    P: EventProxy,
{
    let mut state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");
    let generation = state_guard.begin_load();
    notify(&state_guard, &proxy);

    let task_state = state.clone();
    let task_proxy = proxy.clone();
    tracing::info!("Spawning material load (generation {}).", generation);
    let handle = tokio::spawn(async move {
        load_materials_task(source, task_proxy, task_state, generation).await;
    });
    state_guard.load_task = Some(handle);
}

async fn load_materials_task<S, P>(
    source: Arc<S>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
    generation: u64,
) where
    S: MaterialSource + ?Sized,
    P: EventProxy,
{
    let result = source.fetch_approved_materials().await;

    let mut state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");
    if state_guard.load_generation != generation {
        tracing::info!(
            "Discarding stale material batch (generation {}, current {}).",
            generation,
            state_guard.load_generation
        );
        return;
    }

    match result {
        Ok(materials) => {
            tracing::info!("Loaded {} approved materials.", materials.len());
            state_guard.replace_materials(materials);
            apply_filters(&mut state_guard);
        }
        Err(e) => {
            tracing::error!("Error fetching materials: {}", e);
            state_guard.record_load_failure(e.to_string());
            proxy.send_event(UserEvent::ShowError(format!(
                "Error loading materials: {e}. Please try again later."
            )));
        }
    }

    notify(&state_guard, &proxy);
}
