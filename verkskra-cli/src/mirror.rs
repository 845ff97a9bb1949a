//! Best-effort mirroring of ledger mutations to the spreadsheet backend,
//! and reassembly of its flat snapshot into nested projects.

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use sheetsync::{AllData, MaterialRecord, ProjectRecord, SheetsClient, WorkEntryRecord};
use verkskra_core::domain::{MaterialEntry, Project, WorkEntry};
use verkskra_core::sync::SyncPort;

/// `SyncPort` implementation over the spreadsheet client. Transport
/// failures are logged and reported as `false`; nothing is retried.
pub struct RemoteMirror {
    client: SheetsClient,
}

impl RemoteMirror {
    pub fn new(client: SheetsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SyncPort for RemoteMirror {
    async fn save_project(&self, project: &Project) -> bool {
        swallow(
            self.client.save_project(&project_record(project)).await,
            "saveProject",
        )
    }

    async fn update_project(&self, project: &Project) -> bool {
        swallow(
            self.client.update_project(&project_record(project)).await,
            "updateProject",
        )
    }

    async fn delete_project(&self, project_id: &str) -> bool {
        swallow(self.client.delete_project(project_id).await, "deleteProject")
    }

    async fn save_work_entry(&self, project_id: &str, entry: &WorkEntry) -> bool {
        swallow(
            self.client
                .save_work_entry(&work_entry_record(project_id, entry))
                .await,
            "saveWorkEntry",
        )
    }

    async fn delete_work_entry(&self, entry_id: &str) -> bool {
        swallow(
            self.client.delete_work_entry(entry_id).await,
            "deleteWorkEntry",
        )
    }

    async fn save_material(&self, project_id: &str, material: &MaterialEntry) -> bool {
        swallow(
            self.client
                .save_material(&material_record(project_id, material))
                .await,
            "saveMaterial",
        )
    }

    async fn delete_material(&self, material_id: &str) -> bool {
        swallow(
            self.client.delete_material(material_id).await,
            "deleteMaterial",
        )
    }
}

fn swallow(result: Result<bool, sheetsync::SheetsError>, action: &str) -> bool {
    match result {
        Ok(success) => {
            if !success {
                tracing::warn!("{action} was not accepted by the spreadsheet");
            }
            success
        }
        Err(e) => {
            tracing::warn!("{action} mirror call failed: {e}");
            false
        }
    }
}

pub fn project_record(project: &Project) -> ProjectRecord {
    ProjectRecord {
        id: project.id.clone(),
        name: project.name.clone(),
        client: project.client.clone(),
        address: project.address.clone(),
        hourly_rate: project.hourly_rate,
        status: project.status.clone(),
        created_at: project.created_at.to_rfc3339(),
    }
}

pub fn work_entry_record(project_id: &str, entry: &WorkEntry) -> WorkEntryRecord {
    WorkEntryRecord {
        id: entry.id.clone(),
        project_id: project_id.to_string(),
        date: entry.date.format("%Y-%m-%d").to_string(),
        start_time: wire_time(entry.start),
        end_time: wire_time(entry.end),
        hours: entry.hours,
        notes: entry.notes.clone(),
    }
}

pub fn material_record(project_id: &str, material: &MaterialEntry) -> MaterialRecord {
    MaterialRecord {
        id: material.id.clone(),
        project_id: project_id.to_string(),
        date: material.date.format("%Y-%m-%d").to_string(),
        name: material.name.clone(),
        quantity: material.quantity.clone(),
        amount: material.amount,
    }
}

/// Reassemble the flat snapshot into nested projects, matching entries to
/// their project by id.
pub fn projects_from_snapshot(data: &AllData) -> Vec<Project> {
    data.projects
        .iter()
        .map(|record| {
            let work_entries = data
                .work_entries
                .iter()
                .filter(|e| e.project_id == record.id)
                .map(work_entry_from_record)
                .collect();
            let materials = data
                .materials
                .iter()
                .filter(|m| m.project_id == record.id)
                .map(material_from_record)
                .collect();
            Project {
                id: record.id.clone(),
                name: record.name.clone(),
                client: record.client.clone(),
                address: record.address.clone(),
                hourly_rate: record.hourly_rate,
                status: record.status.clone(),
                created_at: parse_wire_timestamp(&record.created_at),
                work_entries,
                materials,
            }
        })
        .collect()
}

pub fn work_entry_from_record(record: &WorkEntryRecord) -> WorkEntry {
    WorkEntry {
        id: record.id.clone(),
        date: parse_wire_date(&record.date),
        start: parse_wire_time(&record.start_time),
        end: parse_wire_time(&record.end_time),
        hours: record.hours,
        notes: record.notes.clone(),
    }
}

pub fn material_from_record(record: &MaterialRecord) -> MaterialEntry {
    MaterialEntry {
        id: record.id.clone(),
        date: parse_wire_date(&record.date),
        name: record.name.clone(),
        quantity: record.quantity.clone(),
        amount: record.amount,
    }
}

fn wire_time(time: Option<NaiveTime>) -> String {
    time.map(|t| t.format("%H:%M").to_string()).unwrap_or_default()
}

fn parse_wire_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// The sheet may return a plain `YYYY-MM-DD` or a full ISO timestamp;
/// anything else falls back to today.
fn parse_wire_date(raw: &str) -> NaiveDate {
    let head = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(head.trim(), "%Y-%m-%d")
        .unwrap_or_else(|_| Local::now().date_naive())
}

/// The sheet may return `HH:MM`, an empty cell, or a serial-date ISO
/// string like `1899-12-30T09:46:08.000Z`; only the clock part matters.
fn parse_wire_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let clock = match raw.split_once('T') {
        Some((_, rest)) => rest.get(..5).unwrap_or(rest),
        None => raw,
    };
    verkskra_core::hours::parse_hhmm(clock)
}
