use std::env;

/// Base URL of the spreadsheet web app, with helpers for the query-string
/// protocol it speaks: an `action` parameter selects the operation, save
/// and update actions carry a URL-encoded JSON `payload`, deletes carry an
/// `id`.
#[derive(Debug, Clone)]
pub struct ScriptUrl(String);

impl AsRef<str> for ScriptUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ScriptUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into().trim_end_matches('/').to_string())
    }

    /// Creates a ScriptUrl from the environment variable
    /// `VERKSKRA_SCRIPT_URL`, when set.
    pub fn from_env() -> Option<Self> {
        env::var("VERKSKRA_SCRIPT_URL").ok().map(Self::new)
    }

    /// Select the remote action.
    pub fn with_action(&self, action: &str) -> Self {
        if self.0.contains('?') {
            Self(format!("{}&action={}", self.0, action))
        } else {
            Self(format!("{}?action={}", self.0, action))
        }
    }

    /// Attach a URL-encoded JSON payload parameter.
    pub fn with_payload(&self, json: &str) -> Self {
        Self(format!("{}&payload={}", self.0, urlencoding::encode(json)))
    }

    /// Attach a record id parameter.
    pub fn with_id(&self, id: &str) -> Self {
        Self(format!("{}&id={}", self.0, urlencoding::encode(id)))
    }
}
