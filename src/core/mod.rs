pub mod catalog;
pub mod error;
pub mod expansion;
pub mod grouper;
pub mod search;
pub mod source;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The kind of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    /// Previous year question paper.
    Pyq,
    Notes,
}

impl MaterialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pyq => "pyq",
            Self::Notes => "notes",
        }
    }

    /// The short label shown on a material card.
    pub fn badge_label(&self) -> &'static str {
        match self {
            Self::Pyq => "PYQ",
            Self::Notes => "Notes",
        }
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaterialType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pyq" => Ok(Self::Pyq),
            "notes" => Ok(Self::Notes),
            other => Err(format!("unknown material type '{other}'")),
        }
    }
}

/// Review status of an upload. Only `Approved` rows are ever browsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Reference to the stored document, passed through untouched for downloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    pub path: String,
}

/// A single approved study material record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub course: Option<String>,
    pub branch: Option<String>,
    pub semester: Option<String>,
    pub year: Option<String>,
    pub material_type: MaterialType,
    pub file: FileRef,
    pub uploaded_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Material {
    /// The course, treating an empty string like a missing value.
    pub fn course(&self) -> Option<&str> {
        non_empty(&self.course)
    }

    pub fn branch(&self) -> Option<&str> {
        non_empty(&self.branch)
    }

    pub fn semester(&self) -> Option<&str> {
        non_empty(&self.semester)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// A categorical filter value: either the `"all"` sentinel or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

pub const ALL_SENTINEL: &str = "all";

impl<T: PartialEq> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// `All` accepts anything; `Only(v)` requires a present, equal value.
    pub fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => value == Some(expected),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::All => None,
            Self::Only(value) => Some(value),
        }
    }
}

impl Selection<String> {
    /// Exact, case-sensitive match against an optional string field.
    pub fn matches_str(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => value == Some(expected.as_str()),
        }
    }
}

impl<T: fmt::Display> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str(ALL_SENTINEL),
            Self::Only(value) => serializer.collect_str(value),
        }
    }
}

impl<'de, T> Deserialize<'de> for Selection<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == ALL_SENTINEL {
            return Ok(Self::All);
        }
        raw.parse().map(Self::Only).map_err(de::Error::custom)
    }
}

/// The active set of filter predicates chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub query: String,
    #[serde(rename = "type")]
    pub material_type: Selection<MaterialType>,
    pub course: Selection<String>,
    pub branch: Selection<String>,
    pub semester: Selection<String>,
}

/// A partial change to `FilterCriteria`. Absent fields are left as they are.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CriteriaUpdate {
    pub query: Option<String>,
    #[serde(rename = "type")]
    pub material_type: Option<Selection<MaterialType>>,
    pub course: Option<Selection<String>>,
    pub branch: Option<Selection<String>>,
    pub semester: Option<Selection<String>>,
}

impl FilterCriteria {
    /// Merges `update` into the criteria. Returns `true` if the course changed.
    pub fn merge(&mut self, update: CriteriaUpdate) -> bool {
        let mut course_changed = false;
        if let Some(query) = update.query {
            self.query = query;
        }
        if let Some(material_type) = update.material_type {
            self.material_type = material_type;
        }
        if let Some(course) = update.course {
            course_changed = course != self.course;
            self.course = course;
        }
        if let Some(branch) = update.branch {
            self.branch = branch;
        }
        if let Some(semester) = update.semester {
            self.semester = semester;
        }
        course_changed
    }

    pub fn is_permissive(&self) -> bool {
        self.query.is_empty()
            && self.material_type.is_all()
            && self.course.is_all()
            && self.branch.is_all()
            && self.semester.is_all()
    }
}

/// Joins a course and branch into the expansion key of their level-1 folder.
pub fn group_key(course: &str, branch: &str) -> String {
    format!("{course}/{branch}")
}

pub const UNCATEGORIZED_COURSE: &str = "Uncategorized";
pub const GENERAL_BRANCH: &str = "General";
pub const OTHER_SEMESTER: &str = "Other";

/// The derived three-part grouping key of a material.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FolderPath {
    pub course: String,
    pub branch: String,
    pub semester: String,
}

impl FolderPath {
    pub fn from_material(material: &Material) -> Self {
        Self {
            course: material
                .course()
                .unwrap_or(UNCATEGORIZED_COURSE)
                .to_string(),
            branch: material.branch().unwrap_or(GENERAL_BRANCH).to_string(),
            semester: material
                .semester()
                .map(|sem| format!("Sem {sem}"))
                .unwrap_or_else(|| OTHER_SEMESTER.to_string()),
        }
    }

    /// The level-1 key: `course/branch`.
    pub fn group_key(&self) -> String {
        group_key(&self.course, &self.branch)
    }

    /// The level-2 key: `course/branch/semester`.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FolderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.course, self.branch, self.semester)
    }
}

pub use catalog::Catalog;
pub use error::CoreError;
pub use expansion::ExpansionState;
pub use grouper::{CourseGroup, FolderGrouper, FolderMap, SemesterFolder};
pub use search::FilterEngine;
pub use source::{InMemorySource, JsonFileSource, MaterialSource};

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::TimeZone;

    /// Builds a material with the given categorisation and sensible defaults elsewhere.
    pub fn material(
        id: &str,
        course: Option<&str>,
        branch: Option<&str>,
        semester: Option<&str>,
    ) -> Material {
        Material {
            id: id.to_string(),
            title: format!("Material {id}"),
            description: None,
            subject: "General".to_string(),
            course: course.map(str::to_string),
            branch: branch.map(str::to_string),
            semester: semester.map(str::to_string),
            year: None,
            material_type: MaterialType::Notes,
            file: FileRef {
                name: format!("{id}.pdf"),
                path: format!("uploads/{id}.pdf"),
            },
            uploaded_by: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
        }
    }
}
