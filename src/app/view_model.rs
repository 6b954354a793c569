//! Responsible for transforming the `AppState` into a `UiState` view model.
//!
//! This module acts as a presentation layer, preparing data specifically for consumption
//! by the UI. It groups the filtered materials into the folder tree, applies the
//! expansion state, and computes the display-related properties.

use crate::core::{
    ExpansionState, FilterCriteria, FilterEngine, FolderGrouper, Material, Selection,
};
use crate::utils::file_detection::{content_type_for, document_kind_label};
use serde::Serialize;

use super::state::AppState;

const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
const UNKNOWN_UPLOADER: &str = "Unknown";

/// A serializable representation of the browse view for the UI.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub criteria: FilterCriteria,
    pub tree: Vec<CourseNode>,
    pub total_materials: usize,
    pub visible_materials_count: usize,
    pub is_loading: bool,
    pub status_message: String,
    /// When the current batch was fetched, if a load has succeeded.
    pub last_updated: Option<String>,
    pub course_options: Vec<String>,
    pub branch_options: Vec<String>,
    pub semester_options: Vec<String>,
    /// The branch filter only makes sense once a course is chosen.
    pub branch_filter_enabled: bool,
}

/// A level-1 node: one course/branch pair.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseNode {
    pub key: String,
    pub course: String,
    pub branch: String,
    pub label: String,
    pub material_count: usize,
    pub is_expanded: bool,
    /// Empty unless the node is expanded.
    pub children: Vec<SemesterNode>,
}

/// A level-2 node: one semester folder.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SemesterNode {
    pub key: String,
    pub label: String,
    pub material_count: usize,
    pub is_expanded: bool,
    /// Empty unless the node is expanded.
    pub materials: Vec<MaterialCard>,
}

/// The display form of a single material.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCard {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub year: Option<String>,
    pub semester: Option<String>,
    pub type_badge: String,
    pub file_name: String,
    pub file_path: String,
    pub file_kind: String,
    pub content_type: String,
    pub uploaded_by: String,
    pub created_on: String,
}

impl MaterialCard {
    pub fn from_material(material: &Material, date_format: &str) -> Self {
        Self {
            id: material.id.clone(),
            title: material.title.clone(),
            description: material.description.clone(),
            subject: material.subject.clone(),
            year: material.year.clone(),
            semester: material.semester.clone(),
            type_badge: material.material_type.badge_label().to_string(),
            file_name: material.file.name.clone(),
            file_path: material.file.path.clone(),
            file_kind: document_kind_label(&material.file.name).to_string(),
            content_type: content_type_for(&material.file.name),
            uploaded_by: material
                .uploaded_by
                .clone()
                .unwrap_or_else(|| UNKNOWN_UPLOADER.to_string()),
            created_on: material.created_at.format(date_format).to_string(),
        }
    }
}

/// Creates the complete `UiState` from the current `AppState`.
pub fn generate_ui_state(state: &AppState) -> UiState {
    let tree = build_tree_nodes(
        &state.filtered_materials,
        &state.expanded_folders,
        &state.config.date_format,
    );

    let status_message = if state.is_loading {
        "Loading...".to_string()
    } else if let Some(error) = &state.load_error {
        format!("Error loading materials: {error}")
    } else if state.filtered_materials.is_empty() {
        "No materials found".to_string()
    } else {
        format!(
            "Showing {} of {} materials",
            state.filtered_materials.len(),
            state.materials.len()
        )
    };

    let last_updated = state.last_loaded_at.map(|loaded_at| {
        loaded_at
            .format(&format!("{} %H:%M UTC", state.config.date_format))
            .to_string()
    });

    let catalog = &state.config.catalog;

    UiState {
        criteria: state.criteria.clone(),
        tree,
        total_materials: state.materials.len(),
        visible_materials_count: state.filtered_materials.len(),
        is_loading: state.is_loading,
        status_message,
        last_updated,
        course_options: catalog.course_names(),
        branch_options: catalog.branches_for(&state.criteria.course).to_vec(),
        semester_options: catalog.semesters.clone(),
        branch_filter_enabled: !matches!(state.criteria.course, Selection::All),
    }
}

/// Filters, groups and renders a batch in one pure step.
///
/// This is the entry point for a presentation layer that keeps its own state
/// instead of an `AppState`.
pub fn render_tree(
    materials: &[Material],
    criteria: &FilterCriteria,
    expansion: &ExpansionState,
) -> Vec<CourseNode> {
    let filtered = FilterEngine::filter_materials(materials, criteria);
    build_tree_nodes(&filtered, expansion, DEFAULT_DATE_FORMAT)
}

/// Builds the two-level `CourseNode` tree from an already filtered batch.
///
/// Children of a collapsed node are not built at all; their expansion keys are
/// left untouched in `expansion`.
fn build_tree_nodes(
    materials: &[Material],
    expansion: &ExpansionState,
    date_format: &str,
) -> Vec<CourseNode> {
    let folders = FolderGrouper::group(materials);

    FolderGrouper::build_tree(&folders)
        .into_iter()
        .map(|group| {
            let key = group.key();
            let is_expanded = expansion.is_expanded(&key);
            let children = if is_expanded {
                group
                    .folders
                    .iter()
                    .map(|folder| {
                        let folder_key = folder.key();
                        let folder_expanded = expansion.is_expanded(&folder_key);
                        SemesterNode {
                            label: folder.label().to_string(),
                            material_count: folder.material_count(),
                            is_expanded: folder_expanded,
                            materials: if folder_expanded {
                                folder
                                    .materials
                                    .iter()
                                    .map(|material| MaterialCard::from_material(material, date_format))
                                    .collect()
                            } else {
                                Vec::new()
                            },
                            key: folder_key,
                        }
                    })
                    .collect()
            } else {
                Vec::new()
            };

            CourseNode {
                course: group.course.to_string(),
                branch: group.branch.to_string(),
                label: format!("{} / {}", group.course, group.branch),
                material_count: group.material_count(),
                is_expanded,
                children,
                key,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::filtering::apply_filters;
    use crate::core::test_support::material;
    use crate::core::MaterialType;
    use chrono::TimeZone;

    fn create_test_materials() -> Vec<Material> {
        vec![
            material("1", Some("B.Tech"), Some("CSE"), Some("3")),
            material("2", Some("B.Tech"), Some("CSE"), Some("5")),
            material("3", Some("B.Tech"), Some("CSE"), Some("3")),
            material("4", None, None, Some("")),
        ]
    }

    #[test]
    fn test_collapsed_tree_has_counts_but_no_children() {
        let tree = render_tree(
            &create_test_materials(),
            &FilterCriteria::default(),
            &ExpansionState::new(),
        );

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].key, "B.Tech/CSE");
        assert_eq!(tree[0].label, "B.Tech / CSE");
        assert_eq!(tree[0].material_count, 3);
        assert!(!tree[0].is_expanded);
        assert!(tree[0].children.is_empty());
        assert_eq!(tree[1].key, "Uncategorized/General");
        assert_eq!(tree[1].material_count, 1);
    }

    #[test]
    fn test_expanding_course_shows_semesters_only() {
        let mut expansion = ExpansionState::new();
        expansion.toggle("B.Tech/CSE");

        let tree = render_tree(&create_test_materials(), &FilterCriteria::default(), &expansion);
        let children = &tree[0].children;

        assert_eq!(children.len(), 2);
        assert_eq!(children[0].key, "B.Tech/CSE/Sem 3");
        assert_eq!(children[0].material_count, 2);
        assert!(children[0].materials.is_empty());
        assert_eq!(children[1].label, "Sem 5");
    }

    #[test]
    fn test_semester_leaves_need_both_levels_expanded() {
        let mut expansion = ExpansionState::new();
        expansion.toggle("B.Tech/CSE/Sem 3");

        // Parent collapsed: the child key is retained but nothing is visible.
        let tree = render_tree(&create_test_materials(), &FilterCriteria::default(), &expansion);
        assert!(tree[0].children.is_empty());

        expansion.toggle("B.Tech/CSE");
        let tree = render_tree(&create_test_materials(), &FilterCriteria::default(), &expansion);
        let leaves: Vec<&str> = tree[0].children[0]
            .materials
            .iter()
            .map(|card| card.id.as_str())
            .collect();
        assert_eq!(leaves, vec!["1", "3"]);
    }

    #[test]
    fn test_collapse_then_expand_restores_children() {
        let mut expansion = ExpansionState::new();
        expansion.toggle("B.Tech/CSE");
        expansion.toggle("B.Tech/CSE/Sem 5");
        let before = render_tree(&create_test_materials(), &FilterCriteria::default(), &expansion);

        expansion.toggle("B.Tech/CSE");
        expansion.toggle("B.Tech/CSE");
        let after = render_tree(&create_test_materials(), &FilterCriteria::default(), &expansion);

        assert_eq!(before, after);
        assert!(after[0].children[1].is_expanded);
    }

    #[test]
    fn test_material_card_display_fields() {
        let mut pyq = material("7", Some("MCA"), Some("General"), Some("2"));
        pyq.material_type = MaterialType::Pyq;
        pyq.uploaded_by = Some("student@example.edu".to_string());
        let card = MaterialCard::from_material(&pyq, "%d/%m/%Y");

        assert_eq!(card.type_badge, "PYQ");
        assert_eq!(card.file_kind, "PDF");
        assert_eq!(card.content_type, "application/pdf");
        assert_eq!(card.uploaded_by, "student@example.edu");
        assert_eq!(card.created_on, "15/01/2024");

        let notes = MaterialCard::from_material(&material("8", None, None, None), "%Y-%m-%d");
        assert_eq!(notes.type_badge, "Notes");
        assert_eq!(notes.uploaded_by, "Unknown");
    }

    #[test]
    fn test_generate_ui_state_status_and_options() {
        let mut state = AppState::default();
        state.materials = create_test_materials();
        apply_filters(&mut state);

        let ui_state = generate_ui_state(&state);
        assert_eq!(ui_state.status_message, "Showing 4 of 4 materials");
        assert_eq!(ui_state.course_options, vec!["B.Tech", "MCA", "MBA"]);
        assert!(ui_state.branch_options.is_empty());
        assert!(!ui_state.branch_filter_enabled);
        assert_eq!(ui_state.semester_options.len(), 8);

        state.criteria.course = Selection::Only("MCA".to_string());
        apply_filters(&mut state);
        let ui_state = generate_ui_state(&state);
        assert_eq!(ui_state.status_message, "No materials found");
        assert_eq!(ui_state.branch_options, vec!["General"]);
        assert!(ui_state.branch_filter_enabled);
        assert!(ui_state.tree.is_empty());
    }

    #[test]
    fn test_generate_ui_state_reports_loading_and_errors() {
        let mut state = AppState::default();
        state.begin_load();
        assert_eq!(generate_ui_state(&state).status_message, "Loading...");

        state.record_load_failure("connection refused".to_string());
        assert_eq!(
            generate_ui_state(&state).status_message,
            "Error loading materials: connection refused"
        );
    }

    #[test]
    fn test_ui_state_serializes_camel_case() {
        let mut state = AppState::default();
        state.materials = create_test_materials();
        apply_filters(&mut state);

        let value = serde_json::to_value(generate_ui_state(&state)).unwrap();
        assert_eq!(value["visibleMaterialsCount"], 4);
        assert_eq!(value["tree"][0]["materialCount"], 3);
        assert_eq!(value["criteria"]["type"], "all");
    }

    #[test]
    fn test_last_updated_appears_after_a_successful_load() {
        let mut state = AppState::default();
        assert_eq!(generate_ui_state(&state).last_updated, None);

        state.begin_load();
        state.replace_materials(create_test_materials());
        state.last_loaded_at = Some(chrono::Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap());

        let ui_state = generate_ui_state(&state);
        assert_eq!(ui_state.last_updated.as_deref(), Some("2024-05-06 07:08 UTC"));
        let value = serde_json::to_value(&ui_state).unwrap();
        assert_eq!(value["lastUpdated"], "2024-05-06 07:08 UTC");
    }
}
