//! The known courses, their branches and the semester choices offered as filters.

use serde::{Deserialize, Serialize};

use super::Selection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseOption {
    pub name: String,
    pub branches: Vec<String>,
}

/// The option lists behind the course, branch and semester filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub courses: Vec<CourseOption>,
    pub semesters: Vec<String>,
}

impl Catalog {
    pub fn course_names(&self) -> Vec<String> {
        self.courses.iter().map(|course| course.name.clone()).collect()
    }

    /// Branch options for the selected course. `All` or an unknown course has none.
    pub fn branches_for(&self, course: &Selection<String>) -> &[String] {
        course
            .value()
            .and_then(|name| self.courses.iter().find(|option| &option.name == name))
            .map(|option| option.branches.as_slice())
            .unwrap_or(&[])
    }

    /// `All` is always valid; a specific branch must belong to the course.
    pub fn is_valid_branch(&self, course: &Selection<String>, branch: &Selection<String>) -> bool {
        match branch {
            Selection::All => true,
            Selection::Only(name) => self.branches_for(course).contains(name),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let course = |name: &str, branches: &[&str]| CourseOption {
            name: name.to_string(),
            branches: branches.iter().map(|b| b.to_string()).collect(),
        };

        Self {
            courses: vec![
                course(
                    "B.Tech",
                    &["CSE", "ECE", "Mechanical", "Civil", "EEE", "IT"],
                ),
                course("MCA", &["General"]),
                course("MBA", &["Finance", "Marketing", "HR", "Operations"]),
            ],
            semesters: (1..=8).map(|sem| sem.to_string()).collect(),
        }
    }
}
