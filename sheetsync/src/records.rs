use serde::{Deserialize, Serialize};

/// Flat project row as stored in the spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub hourly_rate: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: String,
}

/// Flat work-session row; `project_id` links it back to its project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntryRecord {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub hours: f64,
    #[serde(default)]
    pub notes: String,
}

/// Flat material row; `project_id` links it back to its project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRecord {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub amount: f64,
}

/// Full spreadsheet snapshot returned by the `getAll` action.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllData {
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
    #[serde(default)]
    pub work_entries: Vec<WorkEntryRecord>,
    #[serde(default)]
    pub materials: Vec<MaterialRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_use_camel_case_wire_names() {
        let record = WorkEntryRecord {
            id: "w1".to_string(),
            project_id: "p1".to_string(),
            date: "2024-01-15".to_string(),
            start_time: "08:00".to_string(),
            end_time: "16:00".to_string(),
            hours: 8.0,
            notes: String::new(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["projectId"], "p1");
        assert_eq!(json["startTime"], "08:00");
        assert_eq!(json["endTime"], "16:00");
    }

    #[test]
    fn snapshot_tolerates_missing_sections() {
        let data: AllData = serde_json::from_str(r#"{"projects":[]}"#).unwrap();
        assert!(data.work_entries.is_empty());
        assert!(data.materials.is_empty());
    }
}
