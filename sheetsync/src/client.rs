use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::{AllData, MaterialRecord, ProjectRecord, ScriptUrl, WorkEntryRecord};

/// Client for the spreadsheet web app. Every operation is an HTTP GET
/// against the configured script URL; mutating actions answer with a
/// boolean acknowledgement.
pub struct SheetsClient {
    url: ScriptUrl,
}

impl SheetsClient {
    pub fn new(url: ScriptUrl) -> Self {
        Self { url }
    }

    async fn fetch<T: DeserializeOwned>(&self, url: impl AsRef<str>) -> Result<T, SheetsError> {
        let client = reqwest::Client::new();
        tracing::debug!(url = url.as_ref(), "spreadsheet request");

        let resp = client
            .get(url.as_ref())
            .send()
            .await
            .map_err(|e| SheetsError::ResponseError(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SheetsError::Status(resp.status().as_u16()));
        }

        let resp_data = resp.json::<T>().await.map_err(|e| {
            SheetsError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })?;

        Ok(resp_data)
    }

    async fn acknowledge(&self, url: ScriptUrl) -> Result<bool, SheetsError> {
        let response: StatusResponse = self.fetch(url).await?;
        Ok(response.success)
    }

    async fn save<T: Serialize>(&self, action: &str, record: &T) -> Result<bool, SheetsError> {
        let payload = serde_json::to_string(record)
            .map_err(|e| SheetsError::ParsingError(e.to_string()))?;
        self.acknowledge(self.url.with_action(action).with_payload(&payload))
            .await
    }

    /// Fetch the full spreadsheet snapshot.
    pub async fn get_all(&self) -> Result<AllData, SheetsError> {
        self.fetch(self.url.with_action("getAll")).await
    }

    pub async fn save_project(&self, record: &ProjectRecord) -> Result<bool, SheetsError> {
        self.save("saveProject", record).await
    }

    pub async fn update_project(&self, record: &ProjectRecord) -> Result<bool, SheetsError> {
        self.save("updateProject", record).await
    }

    pub async fn save_work_entry(&self, record: &WorkEntryRecord) -> Result<bool, SheetsError> {
        self.save("saveWorkEntry", record).await
    }

    pub async fn save_material(&self, record: &MaterialRecord) -> Result<bool, SheetsError> {
        self.save("saveMaterial", record).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<bool, SheetsError> {
        self.acknowledge(self.url.with_action("deleteProject").with_id(id))
            .await
    }

    pub async fn delete_work_entry(&self, id: &str) -> Result<bool, SheetsError> {
        self.acknowledge(self.url.with_action("deleteWorkEntry").with_id(id))
            .await
    }

    pub async fn delete_material(&self, id: &str) -> Result<bool, SheetsError> {
        self.acknowledge(self.url.with_action("deleteMaterial").with_id(id))
            .await
    }
}

#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

/// Boolean acknowledgement returned by every mutating action.
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
}
