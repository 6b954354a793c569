//! Defines the central, mutable state of the browse view.

use crate::config::AppConfig;
use crate::core::{ExpansionState, FilterCriteria, Material};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tokio::task::JoinHandle;

/// Holds the complete, mutable state of the browse view.
///
/// This struct is wrapped in an `Arc<Mutex<...>>` so that IPC handlers and the
/// background load task can share it. It is created when the view starts and
/// dropped with it; nothing here outlives the process.
pub struct AppState {
    /// The application's configuration settings.
    pub config: AppConfig,
    /// Where config changes are saved; `None` means the platform config file.
    pub config_path: Option<PathBuf>,
    /// The last successfully loaded batch of approved materials.
    pub materials: Vec<Material>,
    /// The materials that pass the current criteria, in batch order.
    pub filtered_materials: Vec<Material>,
    /// The filter predicates currently chosen by the user.
    pub criteria: FilterCriteria,
    /// Folder keys currently shown open in the tree.
    pub expanded_folders: ExpansionState,
    /// `true` while a load task is running.
    pub is_loading: bool,
    /// The message of the most recent failed load, cleared by the next success.
    pub load_error: Option<String>,
    /// When the current batch was received.
    pub last_loaded_at: Option<DateTime<Utc>>,
    /// Incremented for every load; a finishing task only applies its batch if it is still current.
    pub load_generation: u64,
    /// A handle to the currently running load task, allowing it to be aborted.
    pub load_task: Option<JoinHandle<()>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl AppState {
    /// Creates an empty state: no materials, permissive criteria, all folders collapsed.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            config_path: None,
            materials: Vec::new(),
            filtered_materials: Vec::new(),
            criteria: FilterCriteria::default(),
            expanded_folders: ExpansionState::new(),
            is_loading: false,
            load_error: None,
            last_loaded_at: None,
            load_generation: 0,
            load_task: None,
        }
    }

    /// Aborts the current load task, if any, and invalidates its result.
    pub fn cancel_current_load(&mut self) {
        if let Some(handle) = self.load_task.take() {
            tracing::info!("Aborting running material load.");
            handle.abort();
        }
        self.load_generation += 1;
        self.is_loading = false;
    }

    /// Prepares for a new load and returns the generation the load must report back.
    pub fn begin_load(&mut self) -> u64 {
        self.cancel_current_load();
        self.is_loading = true;
        self.load_generation
    }

    /// Replaces the batch with a freshly fetched one.
    ///
    /// Criteria and expansion state are kept; the caller re-applies filters.
    pub fn replace_materials(&mut self, materials: Vec<Material>) {
        self.materials = materials;
        self.load_error = None;
        self.last_loaded_at = Some(Utc::now());
        self.is_loading = false;
        self.load_task = None;
    }

    /// Records a failed load. The previous batch stays in place.
    pub fn record_load_failure(&mut self, message: String) {
        self.load_error = Some(message);
        self.is_loading = false;
        self.load_task = None;
    }

    /// Returns criteria and expansion to their initial state.
    pub fn reset_view_state(&mut self) {
        self.criteria = FilterCriteria::default();
        self.expanded_folders.clear();
        self.filtered_materials = self.materials.clone();
    }
}
