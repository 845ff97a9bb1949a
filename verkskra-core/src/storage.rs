//! Persistence port for the project collection, with a JSON-file backend
//! for real use and an in-memory one for tests.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};

use crate::domain::Project;

/// Where the authoritative collection is serialized after each mutation.
pub trait Storage: Send + Sync {
    fn load(&self) -> Result<Vec<Project>>;
    fn save(&self, projects: &[Project]) -> Result<()>;
}

/// Single JSON snapshot on disk.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default snapshot location under the platform data directory.
    pub fn default_path() -> Result<PathBuf> {
        Ok(dirs::data_dir()
            .context("Cannot determine data directory")?
            .join("verkskra")
            .join("verkefni_data.json"))
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Vec<Project>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let projects = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(projects)
    }

    fn save(&self, projects: &[Project]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(projects)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// In-memory storage for tests and ephemeral sessions. Clones share the
/// same snapshot, so a test can keep a handle and inspect what the ledger
/// persisted.
#[derive(Default, Clone)]
pub struct MemoryStorage {
    snapshot: Arc<Mutex<Vec<Project>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Project> {
        self.snapshot.lock().expect("storage lock poisoned").clone()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Vec<Project>> {
        Ok(self.snapshot())
    }

    fn save(&self, projects: &[Project]) -> Result<()> {
        *self.snapshot.lock().expect("storage lock poisoned") = projects.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MaterialEntry, ProjectDraft, WorkEntry};

    fn sample_project() -> Project {
        let mut project = Project::from_draft(ProjectDraft {
            name: "Baðherbergi".to_string(),
            client: "Helga".to_string(),
            address: "Laugavegur 12".to_string(),
            hourly_rate: 3500.0,
        });
        let mut work = WorkEntry::blank();
        work.start = crate::hours::parse_hhmm("08:00");
        work.end = crate::hours::parse_hhmm("12:15");
        work.recompute_hours();
        work.notes = "flísalögn".to_string();
        project.work_entries.push(work);

        let mut material = MaterialEntry::blank();
        material.name = "Flísar".to_string();
        material.quantity = "10 m²".to_string();
        material.amount = 50_000.0;
        project.materials.push(material);
        project
    }

    #[test]
    fn json_file_round_trip_preserves_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("verkefni_data.json"));

        let projects = vec![sample_project()];
        storage.save(&projects).unwrap();
        let reloaded = storage.load().unwrap();
        assert_eq!(reloaded, projects);
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nothing-here.json"));
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verkefni_data.json");
        std::fs::write(&path, "{definitely not json").unwrap();
        assert!(JsonFileStorage::new(path).load().is_err());
    }
}
