//! Supplies material batches to the browse core.
//!
//! A source always returns a full snapshot of approved materials. Rows coming
//! from the hosted table are decoded and validated here, so everything past
//! this module can rely on well-formed `Material`s.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::{CoreError, FileRef, Material, MaterialStatus, MaterialType};
use crate::utils::file_detection::is_accepted_document;

/// Anything that can produce the current batch of approved materials.
#[async_trait]
pub trait MaterialSource: Send + Sync {
    async fn fetch_approved_materials(&self) -> Result<Vec<Material>, CoreError>;
}

/// The uploader profile joined onto a row.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRow {
    pub email: Option<String>,
}

/// One row of the `materials` table, as exported.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialRow {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub year: Option<String>,
    pub semester: Option<String>,
    pub course: Option<String>,
    pub branch: Option<String>,
    pub material_type: MaterialType,
    pub file_name: String,
    pub file_path: String,
    #[serde(default)]
    pub status: MaterialStatus,
    pub created_at: DateTime<Utc>,
    pub profiles: Option<ProfileRow>,
}

impl TryFrom<MaterialRow> for Material {
    type Error = CoreError;

    fn try_from(row: MaterialRow) -> Result<Self, Self::Error> {
        let invalid = |reason: &str| CoreError::InvalidMaterial {
            id: row.id.clone(),
            reason: reason.to_string(),
        };

        if row.id.trim().is_empty() {
            return Err(invalid("id is empty"));
        }
        let title = row.title.ok_or_else(|| invalid("title is missing"))?;
        let subject = row.subject.ok_or_else(|| invalid("subject is missing"))?;

        Ok(Material {
            id: row.id,
            title,
            description: row.description,
            subject,
            course: row.course,
            branch: row.branch,
            semester: row.semester,
            year: row.year,
            material_type: row.material_type,
            file: FileRef {
                name: row.file_name,
                path: row.file_path,
            },
            uploaded_by: row.profiles.and_then(|profile| profile.email),
            created_at: row.created_at,
        })
    }
}

/// Turns exported rows into the approved batch, newest first.
///
/// Each element is decoded on its own: rows that do not parse, fail
/// validation or repeat an id are skipped with a warning rather than failing
/// the whole batch.
pub fn decode_approved_rows(rows: Vec<Value>) -> Vec<Material> {
    let total = rows.len();
    let mut seen_ids = HashSet::new();
    let mut materials: Vec<Material> = Vec::with_capacity(total);

    for (position, value) in rows.into_iter().enumerate() {
        let row = match serde_json::from_value::<MaterialRow>(value) {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!("Skipping unreadable material row #{}: {}", position, e);
                continue;
            }
        };
        if row.status != MaterialStatus::Approved {
            continue;
        }
        match Material::try_from(row) {
            Ok(material) => {
                if !is_accepted_document(&material.file.name) {
                    tracing::warn!(
                        "Material '{}' has an unexpected file type: {}",
                        material.id,
                        material.file.name
                    );
                }
                if seen_ids.insert(material.id.clone()) {
                    materials.push(material);
                } else {
                    tracing::warn!("Skipping duplicate material id '{}'", material.id);
                }
            }
            Err(e) => tracing::warn!("Skipping material row: {}", e),
        }
    }

    // Stable, so rows sharing a timestamp keep their exported order.
    materials.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    tracing::info!(
        "Decoded {} approved materials from {} rows",
        materials.len(),
        total
    );
    materials
}

/// Reads a JSON array of exported rows from a snapshot file.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MaterialSource for JsonFileSource {
    async fn fetch_approved_materials(&self) -> Result<Vec<Material>, CoreError> {
        tracing::info!("Loading materials from {:?}", self.path);
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => CoreError::SourceUnavailable(format!(
                    "no snapshot at {}",
                    self.path.display()
                )),
                _ => CoreError::Io(e, self.path.clone()),
            })?;
        // Only a payload that is not an array at all fails the load.
        let rows: Vec<Value> = serde_json::from_str(&content)?;
        Ok(decode_approved_rows(rows))
    }
}

/// A fixed batch held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    materials: Vec<Material>,
}

impl InMemorySource {
    pub fn new(materials: Vec<Material>) -> Self {
        Self { materials }
    }
}

#[async_trait]
impl MaterialSource for InMemorySource {
    async fn fetch_approved_materials(&self) -> Result<Vec<Material>, CoreError> {
        Ok(self.materials.clone())
    }
}
