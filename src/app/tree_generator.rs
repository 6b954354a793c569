//! Generates an ASCII representation of the browse tree.

use super::view_model::{CourseNode, MaterialCard, SemesterNode};

const ROOT_LABEL: &str = "📚 Materials";
const EMPTY_MESSAGE: &str = "No materials found";

/// A utility struct for rendering the folder tree as text.
///
/// This struct is stateless and provides methods as associated functions.
pub struct TreeGenerator;

impl TreeGenerator {
    /// Renders the view-model tree, one line per visible node.
    ///
    /// Only what the view model exposes is drawn, so collapsed folders show
    /// their count but no children.
    pub fn generate_tree(tree: &[CourseNode]) -> String {
        if tree.is_empty() {
            return format!("{EMPTY_MESSAGE}\n");
        }

        let mut result = String::new();
        result.push_str(ROOT_LABEL);
        result.push('\n');

        for (i, course) in tree.iter().enumerate() {
            let is_last = i == tree.len() - 1;
            Self::push_line(
                &mut result,
                "",
                is_last,
                &Self::folder_line(
                    course.is_expanded,
                    &course.label,
                    course.material_count,
                    "materials",
                ),
            );
            Self::render_semesters(&mut result, &course.children, &Self::child_prefix("", is_last));
        }

        result
    }

    /// Renders the semester folders of one course node.
    fn render_semesters(result: &mut String, semesters: &[SemesterNode], prefix: &str) {
        for (i, semester) in semesters.iter().enumerate() {
            let is_last = i == semesters.len() - 1;
            Self::push_line(
                result,
                prefix,
                is_last,
                &Self::folder_line(
                    semester.is_expanded,
                    &semester.label,
                    semester.material_count,
                    "files",
                ),
            );
            Self::render_materials(
                result,
                &semester.materials,
                &Self::child_prefix(prefix, is_last),
            );
        }
    }

    fn render_materials(result: &mut String, materials: &[MaterialCard], prefix: &str) {
        for (i, card) in materials.iter().enumerate() {
            let is_last = i == materials.len() - 1;
            let line = format!("📄 {} [{}]", card.title, card.type_badge);
            Self::push_line(result, prefix, is_last, &line);
        }
    }

    fn folder_line(is_expanded: bool, label: &str, count: usize, unit: &str) -> String {
        let marker = if is_expanded { "▾" } else { "▸" };
        format!("{marker} 📁 {label} ({count} {unit})")
    }

    fn push_line(result: &mut String, prefix: &str, is_last: bool, text: &str) {
        let connector = if is_last { "└── " } else { "├── " };
        result.push_str(&format!("{prefix}{connector}{text}\n"));
    }

    fn child_prefix(prefix: &str, is_last: bool) -> String {
        if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        }
    }
}
