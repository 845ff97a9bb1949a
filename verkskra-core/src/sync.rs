//! Capability interface for the optional remote mirror.

use async_trait::async_trait;

use crate::domain::{MaterialEntry, Project, WorkEntry};

/// Best-effort mirror of ledger mutations to a remote collaborator.
///
/// The ledger never depends on the outcome: a `false` return is logged at
/// most, never retried, and never rolls anything back. Implementations
/// must swallow their own transport failures.
#[async_trait]
pub trait SyncPort: Send + Sync {
    async fn save_project(&self, project: &Project) -> bool;
    async fn update_project(&self, project: &Project) -> bool;
    async fn delete_project(&self, project_id: &str) -> bool;
    async fn save_work_entry(&self, project_id: &str, entry: &WorkEntry) -> bool;
    async fn delete_work_entry(&self, entry_id: &str) -> bool;
    async fn save_material(&self, project_id: &str, material: &MaterialEntry) -> bool;
    async fn delete_material(&self, material_id: &str) -> bool;
}

/// Mirror used when syncing is disabled; every call succeeds without
/// leaving the process.
pub struct NoSync;

#[async_trait]
impl SyncPort for NoSync {
    async fn save_project(&self, _: &Project) -> bool {
        true
    }

    async fn update_project(&self, _: &Project) -> bool {
        true
    }

    async fn delete_project(&self, _: &str) -> bool {
        true
    }

    async fn save_work_entry(&self, _: &str, _: &WorkEntry) -> bool {
        true
    }

    async fn delete_work_entry(&self, _: &str) -> bool {
        true
    }

    async fn save_material(&self, _: &str, _: &MaterialEntry) -> bool {
        true
    }

    async fn delete_material(&self, _: &str) -> bool {
        true
    }
}
