//! The ledger store: authoritative ordered collection of projects, with
//! nested entry CRUD and persist-after-mutation semantics.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::domain::{
    MaterialEntry, Project, ProjectDraft, ProjectPatch, WorkEntry,
};
use crate::import::ImportBatch;
use crate::storage::Storage;

#[derive(Error, Debug, PartialEq)]
pub enum LedgerError {
    #[error("a project needs at least a name or a client")]
    EmptyDraft,
}

/// One field update on a work entry. Changing a time recomputes the
/// derived hours; nothing else touches them.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkEntryUpdate {
    Date(NaiveDate),
    Start(Option<NaiveTime>),
    End(Option<NaiveTime>),
    Notes(String),
}

/// One field update on a material entry. `Amount` carries the raw user
/// input and is coerced to a number, 0 when it does not parse.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialUpdate {
    Date(NaiveDate),
    Name(String),
    Quantity(String),
    Amount(String),
}

/// Authoritative collection of projects for the session.
///
/// Every mutation is followed by a full serialization of the collection
/// through the storage port. A failed write is logged and swallowed; the
/// in-memory state stays authoritative. Unknown project or entry ids make
/// update/delete operations silent no-ops.
pub struct Ledger {
    projects: Vec<Project>,
    storage: Box<dyn Storage>,
}

impl Ledger {
    /// Load the persisted collection. A missing or unreadable snapshot
    /// yields an empty ledger rather than an error.
    pub fn open(storage: Box<dyn Storage>) -> Self {
        let projects = match storage.load() {
            Ok(projects) => projects,
            Err(e) => {
                tracing::warn!("could not load ledger snapshot, starting empty: {e}");
                Vec::new()
            }
        };
        Self { projects, storage }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    fn project_mut(&mut self, id: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    fn persist(&self) {
        // An empty collection is never written; deleting the last project
        // leaves the previous snapshot on disk.
        if self.projects.is_empty() {
            return;
        }
        if let Err(e) = self.storage.save(&self.projects) {
            tracing::warn!("could not persist ledger: {e}");
        }
    }

    /// Create a project from a draft. At least one of name/client must be
    /// non-empty.
    pub fn add_project(&mut self, draft: ProjectDraft) -> Result<Project, LedgerError> {
        if draft.name.trim().is_empty() && draft.client.trim().is_empty() {
            return Err(LedgerError::EmptyDraft);
        }
        let project = Project::from_draft(draft);
        self.projects.push(project.clone());
        self.persist();
        Ok(project)
    }

    /// Replace the mutable fields of a project. Returns the updated
    /// project for mirroring, `None` when the id is unknown.
    pub fn update_project(&mut self, id: &str, patch: ProjectPatch) -> Option<Project> {
        let project = self.project_mut(id)?;
        if let Some(name) = patch.name {
            project.name = name;
        }
        if let Some(client) = patch.client {
            project.client = client;
        }
        if let Some(address) = patch.address {
            project.address = address;
        }
        if let Some(hourly_rate) = patch.hourly_rate {
            project.hourly_rate = hourly_rate;
        }
        let updated = project.clone();
        self.persist();
        Some(updated)
    }

    /// Remove a project, returning it so the caller can enumerate its
    /// entries for remote deletion.
    pub fn delete_project(&mut self, id: &str) -> Option<Project> {
        let index = self.projects.iter().position(|p| p.id == id)?;
        let removed = self.projects.remove(index);
        self.persist();
        Some(removed)
    }

    /// Insert a blank work session at the head of the project's entries
    /// (most recent first).
    pub fn add_work_entry(&mut self, project_id: &str) -> Option<WorkEntry> {
        let project = self.project_mut(project_id)?;
        let entry = WorkEntry::blank();
        project.work_entries.insert(0, entry.clone());
        self.persist();
        Some(entry)
    }

    /// Apply one update to a work session, returning the updated entry.
    pub fn update_work_entry(
        &mut self,
        project_id: &str,
        entry_id: &str,
        update: WorkEntryUpdate,
    ) -> Option<WorkEntry> {
        let project = self.project_mut(project_id)?;
        let entry = project.work_entries.iter_mut().find(|e| e.id == entry_id)?;
        match update {
            WorkEntryUpdate::Date(date) => entry.date = date,
            WorkEntryUpdate::Start(start) => {
                entry.start = start;
                entry.recompute_hours();
            }
            WorkEntryUpdate::End(end) => {
                entry.end = end;
                entry.recompute_hours();
            }
            WorkEntryUpdate::Notes(notes) => entry.notes = notes,
        }
        let updated = entry.clone();
        self.persist();
        Some(updated)
    }

    pub fn delete_work_entry(&mut self, project_id: &str, entry_id: &str) -> bool {
        let Some(project) = self.project_mut(project_id) else {
            return false;
        };
        let before = project.work_entries.len();
        project.work_entries.retain(|e| e.id != entry_id);
        let changed = project.work_entries.len() != before;
        if changed {
            self.persist();
        }
        changed
    }

    /// Insert a blank material line at the head of the project's list.
    pub fn add_material(&mut self, project_id: &str) -> Option<MaterialEntry> {
        let project = self.project_mut(project_id)?;
        let material = MaterialEntry::blank();
        project.materials.insert(0, material.clone());
        self.persist();
        Some(material)
    }

    /// Apply one update to a material line, returning the updated entry.
    pub fn update_material(
        &mut self,
        project_id: &str,
        material_id: &str,
        update: MaterialUpdate,
    ) -> Option<MaterialEntry> {
        let project = self.project_mut(project_id)?;
        let material = project.materials.iter_mut().find(|m| m.id == material_id)?;
        match update {
            MaterialUpdate::Date(date) => material.date = date,
            MaterialUpdate::Name(name) => material.name = name,
            MaterialUpdate::Quantity(quantity) => material.quantity = quantity,
            MaterialUpdate::Amount(raw) => {
                material.amount = raw.trim().parse().unwrap_or(0.0);
            }
        }
        let updated = material.clone();
        self.persist();
        Some(updated)
    }

    pub fn delete_material(&mut self, project_id: &str, material_id: &str) -> bool {
        let Some(project) = self.project_mut(project_id) else {
            return false;
        };
        let before = project.materials.len();
        project.materials.retain(|m| m.id != material_id);
        let changed = project.materials.len() != before;
        if changed {
            self.persist();
        }
        changed
    }

    /// Append a reconciled import batch to the target project in one
    /// update. Records are appended as-is, never merged or deduplicated.
    pub fn import(&mut self, project_id: &str, batch: &ImportBatch) -> bool {
        let Some(project) = self.project_mut(project_id) else {
            return false;
        };
        project.materials.extend(batch.materials.iter().cloned());
        project
            .work_entries
            .extend(batch.work_entries.iter().cloned());
        self.persist();
        true
    }

    /// Replace the whole collection (remote pull). Persists immediately.
    pub fn replace_all(&mut self, projects: Vec<Project>) {
        self.projects = projects;
        self.persist();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hours::parse_hhmm;
    use crate::import::parse_import;
    use crate::storage::MemoryStorage;

    fn ledger_with_project() -> (Ledger, MemoryStorage, String) {
        let storage = MemoryStorage::new();
        let mut ledger = Ledger::open(Box::new(storage.clone()));
        let project = ledger
            .add_project(ProjectDraft {
                name: "Eldhús".to_string(),
                client: "Guðrún".to_string(),
                address: "Hverfisgata 3".to_string(),
                hourly_rate: 4000.0,
            })
            .unwrap();
        let id = project.id;
        (ledger, storage, id)
    }

    #[test]
    fn draft_needs_a_name_or_a_client() {
        let mut ledger = Ledger::open(Box::new(MemoryStorage::new()));
        let err = ledger.add_project(ProjectDraft::default()).unwrap_err();
        assert_eq!(err, LedgerError::EmptyDraft);

        let ok = ledger.add_project(ProjectDraft {
            client: "Jón".to_string(),
            ..Default::default()
        });
        assert!(ok.is_ok());
    }

    #[test]
    fn new_project_starts_active_and_empty() {
        let (ledger, _, id) = ledger_with_project();
        let project = ledger.project(&id).unwrap();
        assert_eq!(project.status, "active");
        assert!(project.work_entries.is_empty());
        assert!(project.materials.is_empty());
    }

    #[test]
    fn mutations_are_persisted_through_the_port() {
        let (mut ledger, storage, id) = ledger_with_project();
        ledger.add_work_entry(&id).unwrap();
        let snapshot = storage.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].work_entries.len(), 1);
    }

    #[test]
    fn update_project_replaces_only_given_fields() {
        let (mut ledger, _, id) = ledger_with_project();
        ledger.update_project(
            &id,
            ProjectPatch {
                hourly_rate: Some(4500.0),
                ..Default::default()
            },
        );
        let project = ledger.project(&id).unwrap();
        assert_eq!(project.hourly_rate, 4500.0);
        assert_eq!(project.name, "Eldhús");
    }

    #[test]
    fn unknown_ids_are_silent_no_ops() {
        let (mut ledger, _, id) = ledger_with_project();
        assert!(ledger.update_project("nope", ProjectPatch::default()).is_none());
        assert!(ledger.delete_project("nope").is_none());
        assert!(ledger.add_work_entry("nope").is_none());
        assert!(!ledger.delete_work_entry(&id, "nope"));
        assert!(!ledger.delete_material(&id, "nope"));
        assert_eq!(ledger.projects().len(), 1);
    }

    #[test]
    fn deleting_a_project_removes_it_and_its_entries() {
        let (mut ledger, _, id) = ledger_with_project();
        ledger.add_work_entry(&id).unwrap();
        ledger.add_material(&id).unwrap();

        let removed = ledger.delete_project(&id).unwrap();
        assert_eq!(removed.work_entries.len(), 1);
        assert_eq!(removed.materials.len(), 1);
        assert!(ledger.project(&id).is_none());
    }

    #[test]
    fn new_entries_are_inserted_at_the_head() {
        let (mut ledger, _, id) = ledger_with_project();
        let first = ledger.add_work_entry(&id).unwrap();
        let second = ledger.add_work_entry(&id).unwrap();
        let project = ledger.project(&id).unwrap();
        assert_eq!(project.work_entries[0].id, second.id);
        assert_eq!(project.work_entries[1].id, first.id);
    }

    #[test]
    fn setting_times_recomputes_hours() {
        let (mut ledger, _, id) = ledger_with_project();
        let entry = ledger.add_work_entry(&id).unwrap();

        ledger.update_work_entry(&id, &entry.id, WorkEntryUpdate::Start(parse_hhmm("09:00")));
        let updated = ledger
            .update_work_entry(&id, &entry.id, WorkEntryUpdate::End(parse_hhmm("17:30")))
            .unwrap();
        assert_eq!(updated.hours, 8.5);

        // Clearing a time drops the derived hours back to zero.
        let cleared = ledger
            .update_work_entry(&id, &entry.id, WorkEntryUpdate::End(None))
            .unwrap();
        assert_eq!(cleared.hours, 0.0);
    }

    #[test]
    fn updating_notes_leaves_hours_untouched() {
        let (mut ledger, _, id) = ledger_with_project();
        let entry = ledger.add_work_entry(&id).unwrap();
        ledger.update_work_entry(&id, &entry.id, WorkEntryUpdate::Start(parse_hhmm("08:00")));
        ledger.update_work_entry(&id, &entry.id, WorkEntryUpdate::End(parse_hhmm("16:00")));

        let updated = ledger
            .update_work_entry(
                &id,
                &entry.id,
                WorkEntryUpdate::Notes("múrverk".to_string()),
            )
            .unwrap();
        assert_eq!(updated.hours, 8.0);
        assert_eq!(updated.notes, "múrverk");
    }

    #[test]
    fn material_amount_input_is_coerced() {
        let (mut ledger, _, id) = ledger_with_project();
        let material = ledger.add_material(&id).unwrap();

        let updated = ledger
            .update_material(&id, &material.id, MaterialUpdate::Amount("1250".to_string()))
            .unwrap();
        assert_eq!(updated.amount, 1250.0);

        let garbled = ledger
            .update_material(&id, &material.id, MaterialUpdate::Amount("mikið".to_string()))
            .unwrap();
        assert_eq!(garbled.amount, 0.0);
    }

    #[test]
    fn import_appends_without_touching_existing_entries() {
        let (mut ledger, _, id) = ledger_with_project();
        let existing = ledger.add_work_entry(&id).unwrap();

        let batch = parse_import(
            r#"{"efni":[{"heiti":"Tiles","magn":"10 m2","verd":50000}],
                "vinna":[{"dags":"2024-01-15","stundir":8}]}"#,
        )
        .unwrap();
        assert!(ledger.import(&id, &batch));

        let project = ledger.project(&id).unwrap();
        assert_eq!(project.materials.len(), 1);
        assert_eq!(project.work_entries.len(), 2);
        assert_eq!(project.work_entries[0].id, existing.id);
        assert_eq!(project.work_entries[1].hours, 8.0);
    }

    #[test]
    fn reopening_from_the_same_storage_restores_state() {
        let (mut ledger, storage, id) = ledger_with_project();
        ledger.add_material(&id).unwrap();

        let reopened = Ledger::open(Box::new(storage));
        assert_eq!(reopened.projects(), ledger.projects());
    }
}
