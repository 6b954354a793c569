//! Provides logic for filtering lists of `Material`s against `FilterCriteria`.

use super::{FilterCriteria, Material};
use rayon::prelude::*;

/// A utility struct for filtering material batches.
///
/// This struct is stateless and provides methods as associated functions.
pub struct FilterEngine;

impl FilterEngine {
    /// Returns the materials that satisfy every active predicate, in input order.
    ///
    /// Rayon's ordered collect keeps this a subsequence selection, so applying
    /// the same criteria to the result again yields the result unchanged.
    pub fn filter_materials(materials: &[Material], criteria: &FilterCriteria) -> Vec<Material> {
        materials
            .par_iter()
            .filter(|material| Self::matches_criteria(material, criteria))
            .cloned()
            .collect()
    }

    /// Checks if a single `Material` matches all of the given criteria.
    pub fn matches_criteria(material: &Material, criteria: &FilterCriteria) -> bool {
        if !criteria.query.is_empty() && !Self::matches_query(material, &criteria.query) {
            return false;
        }

        if !criteria
            .material_type
            .matches(Some(&material.material_type))
        {
            return false;
        }

        // Raw field values: categorical filters compare what is stored, no normalisation.
        criteria.course.matches_str(material.course.as_deref())
            && criteria.branch.matches_str(material.branch.as_deref())
            && criteria.semester.matches_str(material.semester.as_deref())
    }

    /// Case-insensitive substring match against title, subject or description.
    fn matches_query(material: &Material, query: &str) -> bool {
        let query_lower = query.to_lowercase();
        material.title.to_lowercase().contains(&query_lower)
            || material.subject.to_lowercase().contains(&query_lower)
            || material
                .description
                .as_ref()
                .is_some_and(|description| description.to_lowercase().contains(&query_lower))
    }
}
