//! This module is responsible for mutating the application state by applying filters.
//!
//! It takes the `AppState` and rebuilds `filtered_materials` from the loaded batch
//! and the current `FilterCriteria`. Cross-field rules between criteria (a branch
//! only makes sense for its course) are enforced here, not in the filter engine.

use crate::app::state::AppState;
use crate::core::{Catalog, CriteriaUpdate, FilterCriteria, FilterEngine, Selection};

/// Applies the current criteria to the loaded batch to generate the visible list.
pub fn apply_filters(state: &mut AppState) {
    state.filtered_materials = FilterEngine::filter_materials(&state.materials, &state.criteria);
    tracing::debug!(
        "Filter pass kept {} of {} materials",
        state.filtered_materials.len(),
        state.materials.len()
    );
}

/// Merges a partial criteria change, enforces the dependent branch rule and re-filters.
pub fn apply_criteria_update(state: &mut AppState, update: CriteriaUpdate) {
    merge_criteria(&mut state.criteria, update, &state.config.catalog);
    apply_filters(state);
}

/// Merges `update` into `criteria`.
///
/// When the course changes, a branch that is not offered for the new course is
/// reset to `All`, so a stale branch never silently empties the result.
fn merge_criteria(criteria: &mut FilterCriteria, update: CriteriaUpdate, catalog: &Catalog) {
    let course_changed = criteria.merge(update);
    if course_changed && !catalog.is_valid_branch(&criteria.course, &criteria.branch) {
        tracing::debug!(
            "Resetting branch {:?} after course changed to {:?}",
            criteria.branch,
            criteria.course
        );
        criteria.branch = Selection::All;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::material;
    use crate::core::MaterialType;

    fn only(value: &str) -> Selection<String> {
        Selection::Only(value.to_string())
    }

    fn create_test_state() -> AppState {
        let mut state = AppState::default();
        state.materials = vec![
            material("1", Some("B.Tech"), Some("CSE"), Some("3")),
            material("2", Some("B.Tech"), Some("ECE"), Some("3")),
            material("3", Some("MBA"), Some("Finance"), Some("1")),
            material("4", None, None, None),
        ];
        apply_filters(&mut state);
        state
    }

    fn visible_ids(state: &AppState) -> Vec<&str> {
        state
            .filtered_materials
            .iter()
            .map(|m| m.id.as_str())
            .collect()
    }

    #[test]
    fn test_apply_filters_with_default_criteria_keeps_all() {
        let state = create_test_state();
        assert_eq!(visible_ids(&state), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_apply_criteria_update_filters_by_course_and_branch() {
        let mut state = create_test_state();
        apply_criteria_update(
            &mut state,
            CriteriaUpdate {
                course: Some(only("B.Tech")),
                branch: Some(only("ECE")),
                ..Default::default()
            },
        );
        assert_eq!(visible_ids(&state), vec!["2"]);
    }

    #[test]
    fn test_course_change_resets_invalid_branch() {
        let mut state = create_test_state();
        state.criteria.course = only("B.Tech");
        state.criteria.branch = only("CSE");

        apply_criteria_update(
            &mut state,
            CriteriaUpdate {
                course: Some(only("MBA")),
                ..Default::default()
            },
        );

        assert_eq!(state.criteria.branch, Selection::All);
        assert_eq!(visible_ids(&state), vec!["3"]);
    }

    #[test]
    fn test_course_change_keeps_branch_offered_by_new_course() {
        let mut state = create_test_state();
        state.criteria.course = only("MBA");

        apply_criteria_update(
            &mut state,
            CriteriaUpdate {
                course: Some(only("B.Tech")),
                branch: Some(only("CSE")),
                ..Default::default()
            },
        );

        assert_eq!(state.criteria.branch, only("CSE"));
        assert_eq!(visible_ids(&state), vec!["1"]);
    }

    #[test]
    fn test_clearing_course_resets_branch() {
        let mut state = create_test_state();
        state.criteria.course = only("B.Tech");
        state.criteria.branch = only("CSE");

        apply_criteria_update(
            &mut state,
            CriteriaUpdate {
                course: Some(Selection::All),
                ..Default::default()
            },
        );

        assert_eq!(state.criteria.branch, Selection::All);
        assert_eq!(visible_ids(&state).len(), 4);
    }

    #[test]
    fn test_branch_only_update_is_not_validated() {
        let mut state = create_test_state();
        state.criteria.course = only("MBA");

        apply_criteria_update(
            &mut state,
            CriteriaUpdate {
                branch: Some(only("CSE")),
                ..Default::default()
            },
        );

        // The engine treats the mismatch as "no results" rather than correcting it.
        assert_eq!(state.criteria.branch, only("CSE"));
        assert!(state.filtered_materials.is_empty());
    }

    #[test]
    fn test_type_filter_with_no_matches() {
        let mut state = create_test_state();
        apply_criteria_update(
            &mut state,
            CriteriaUpdate {
                material_type: Some(Selection::Only(MaterialType::Pyq)),
                ..Default::default()
            },
        );
        assert!(state.filtered_materials.is_empty());
    }
}
