//! Partitions materials into the course/branch → semester folder hierarchy.

use std::collections::HashMap;

use super::{group_key, FolderPath, Material};

/// An insertion-ordered mapping from `FolderPath` to the materials filed under it.
///
/// Folders appear in the order their first material was seen, and each folder
/// keeps its materials in input order. The map only borrows the materials.
#[derive(Debug, Default)]
pub struct FolderMap<'a> {
    entries: Vec<(FolderPath, Vec<&'a Material>)>,
    index: HashMap<FolderPath, usize>,
}

impl<'a> FolderMap<'a> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &FolderPath) -> Option<&[&'a Material]> {
        self.index
            .get(path)
            .map(|&position| self.entries[position].1.as_slice())
    }

    /// Iterates folders in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&FolderPath, &[&'a Material])> {
        self.entries
            .iter()
            .map(|(path, materials)| (path, materials.as_slice()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &FolderPath> {
        self.entries.iter().map(|(path, _)| path)
    }

    /// Total number of materials across all folders.
    pub fn material_count(&self) -> usize {
        self.entries.iter().map(|(_, materials)| materials.len()).sum()
    }

    fn push(&mut self, path: FolderPath, material: &'a Material) {
        if let Some(&position) = self.index.get(&path) {
            self.entries[position].1.push(material);
        } else {
            self.index.insert(path.clone(), self.entries.len());
            self.entries.push((path, vec![material]));
        }
    }
}

/// A level-1 node: every semester folder sharing one course and branch.
#[derive(Debug, Clone)]
pub struct CourseGroup<'t> {
    pub course: &'t str,
    pub branch: &'t str,
    /// Sorted by the full path string.
    pub folders: Vec<SemesterFolder<'t>>,
}

impl CourseGroup<'_> {
    /// The expansion key, `course/branch`.
    pub fn key(&self) -> String {
        group_key(self.course, self.branch)
    }

    /// Sum of the folder sizes, recomputed on every call.
    pub fn material_count(&self) -> usize {
        self.folders.iter().map(SemesterFolder::material_count).sum()
    }
}

/// A level-2 node: one semester folder and its materials.
#[derive(Debug, Clone)]
pub struct SemesterFolder<'t> {
    pub path: &'t FolderPath,
    pub materials: &'t [&'t Material],
}

impl SemesterFolder<'_> {
    /// The expansion key, `course/branch/semester`.
    pub fn key(&self) -> String {
        self.path.key()
    }

    pub fn label(&self) -> &str {
        &self.path.semester
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}

/// A utility struct for building the folder hierarchy.
///
/// This struct is stateless and provides methods as associated functions.
pub struct FolderGrouper;

impl FolderGrouper {
    /// Files every material under its derived `FolderPath`.
    pub fn group(materials: &[Material]) -> FolderMap<'_> {
        let mut folders = FolderMap::default();
        for material in materials {
            folders.push(FolderPath::from_material(material), material);
        }
        folders
    }

    /// Groups the folders of `folders` by their course/branch prefix.
    ///
    /// Level-1 groups keep first-seen order. Within a group, folders are sorted
    /// as plain strings on the full path, so "Sem 10" sorts before "Sem 2".
    pub fn build_tree<'t>(folders: &'t FolderMap<'_>) -> Vec<CourseGroup<'t>> {
        let mut groups: Vec<CourseGroup<'t>> = Vec::new();
        let mut group_index: HashMap<(&'t str, &'t str), usize> = HashMap::new();

        for (path, materials) in folders.iter() {
            let folder = SemesterFolder { path, materials };
            let prefix = (path.course.as_str(), path.branch.as_str());
            match group_index.get(&prefix) {
                Some(&position) => groups[position].folders.push(folder),
                None => {
                    group_index.insert(prefix, groups.len());
                    groups.push(CourseGroup {
                        course: prefix.0,
                        branch: prefix.1,
                        folders: vec![folder],
                    });
                }
            }
        }

        for group in &mut groups {
            group.folders.sort_by_cached_key(SemesterFolder::key);
        }

        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::material;
    use std::collections::HashSet;

    #[test]
    fn test_group_uses_derived_paths() {
        let materials = vec![
            material("1", Some("B.Tech"), Some("CSE"), Some("3")),
            material("2", None, None, None),
        ];
        let folders = FolderGrouper::group(&materials);

        let keys: Vec<String> = folders.paths().map(FolderPath::key).collect();
        assert_eq!(keys, vec!["B.Tech/CSE/Sem 3", "Uncategorized/General/Other"]);
        for (_, members) in folders.iter() {
            assert_eq!(members.len(), 1);
        }
    }

    #[test]
    fn test_group_keeps_input_order_within_folder() {
        let materials = vec![
            material("b", Some("MCA"), Some("General"), Some("2")),
            material("a", Some("MCA"), Some("General"), Some("2")),
            material("c", Some("MCA"), Some("General"), Some("2")),
        ];
        let folders = FolderGrouper::group(&materials);
        let path = FolderPath::from_material(&materials[0]);
        let ids: Vec<&str> = folders
            .get(&path)
            .unwrap()
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_group_is_a_partition() {
        let materials = vec![
            material("1", Some("B.Tech"), Some("CSE"), Some("3")),
            material("2", Some("B.Tech"), Some("ECE"), Some("3")),
            material("3", Some("B.Tech"), Some("CSE"), Some("4")),
            material("4", None, Some("CSE"), None),
            material("5", Some("B.Tech"), Some("CSE"), Some("3")),
        ];
        let folders = FolderGrouper::group(&materials);

        assert_eq!(folders.material_count(), materials.len());
        let seen: HashSet<&str> = folders
            .iter()
            .flat_map(|(_, members)| members.iter().map(|m| m.id.as_str()))
            .collect();
        assert_eq!(seen.len(), materials.len());
    }

    #[test]
    fn test_semesters_sort_as_strings() {
        let materials = vec![
            material("1", Some("B.Tech"), Some("CSE"), Some("2")),
            material("2", Some("B.Tech"), Some("CSE"), Some("10")),
            material("3", Some("B.Tech"), Some("CSE"), Some("1")),
        ];
        let folders = FolderGrouper::group(&materials);
        let tree = FolderGrouper::build_tree(&folders);

        assert_eq!(tree.len(), 1);
        let labels: Vec<&str> = tree[0].folders.iter().map(SemesterFolder::label).collect();
        assert_eq!(labels, vec!["Sem 1", "Sem 10", "Sem 2"]);
    }

    #[test]
    fn test_course_groups_keep_first_seen_order() {
        let materials = vec![
            material("1", Some("MBA"), Some("HR"), Some("1")),
            material("2", Some("B.Tech"), Some("CSE"), Some("3")),
            material("3", Some("MBA"), Some("HR"), Some("2")),
            material("4", Some("B.Tech"), Some("CSE"), Some("5")),
        ];
        let folders = FolderGrouper::group(&materials);
        let tree = FolderGrouper::build_tree(&folders);

        let keys: Vec<String> = tree.iter().map(CourseGroup::key).collect();
        assert_eq!(keys, vec!["MBA/HR", "B.Tech/CSE"]);
        assert_eq!(tree[0].material_count(), 2);
        assert_eq!(tree[1].folders[1].key(), "B.Tech/CSE/Sem 5");
    }

    #[test]
    fn test_other_sorts_before_numbered_semesters() {
        let materials = vec![
            material("1", Some("MCA"), Some("General"), None),
            material("2", Some("MCA"), Some("General"), Some("4")),
        ];
        let folders = FolderGrouper::group(&materials);
        let tree = FolderGrouper::build_tree(&folders);

        let labels: Vec<&str> = tree[0].folders.iter().map(SemesterFolder::label).collect();
        assert_eq!(labels, vec!["Other", "Sem 4"]);
    }

    #[test]
    fn test_empty_input_yields_empty_tree() {
        let folders = FolderGrouper::group(&[]);
        assert!(folders.is_empty());
        assert!(FolderGrouper::build_tree(&folders).is_empty());
    }

    #[test]
    fn test_group_key_matches_folder_paths() {
        let materials = vec![
            material("1", Some("B.Tech"), Some("IT"), Some("7")),
            material("2", None, None, None),
        ];
        let folders = FolderGrouper::group(&materials);
        let tree = FolderGrouper::build_tree(&folders);

        for (group, path) in tree.iter().zip(folders.paths()) {
            assert_eq!(group.key(), path.group_key());
        }
        assert_eq!(tree[1].key(), "Uncategorized/General");
    }
}
