use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MaterialEntry, WorkEntry};

/// A unit of client work tracked independently, with its own hourly rate
/// and entry collections. Entries have no existence outside their project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub client: String,
    pub address: String,
    pub hourly_rate: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub work_entries: Vec<WorkEntry>,
    #[serde(default)]
    pub materials: Vec<MaterialEntry>,
}

impl Project {
    pub fn from_draft(draft: ProjectDraft) -> Self {
        Self {
            id: super::new_id(),
            name: draft.name,
            client: draft.client,
            address: draft.address,
            hourly_rate: draft.hourly_rate,
            status: "active".to_string(),
            created_at: Utc::now(),
            work_entries: Vec::new(),
            materials: Vec::new(),
        }
    }
}

/// Fields supplied when creating a project.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub name: String,
    pub client: String,
    pub address: String,
    pub hourly_rate: f64,
}

/// Mutable project fields; `None` leaves the current value in place.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub client: Option<String>,
    pub address: Option<String>,
    pub hourly_rate: Option<f64>,
}
