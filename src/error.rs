use thiserror::Error;

/// Pipeline-level errors. Stage-local problems (a malformed config key, an odd
/// title) degrade to defaults instead of surfacing here; these variants abort
/// the current run only, never the process.
#[derive(Debug, Error)]
pub enum HubError {
    #[error("network error after {attempts} attempts: {cause}")]
    Network { attempts: u32, cause: String },

    #[error("generation cancelled")]
    Cancelled,

    #[error("extraction error: {0}")]
    Extraction(String),

    #[error("file operation error: {0}")]
    FileOperation(String),
}

impl HubError {
    /// Coarse category for user-facing reporting: network vs extraction vs file.
    pub fn category(&self) -> &'static str {
        match self {
            HubError::Network { .. } | HubError::Cancelled => "network",
            HubError::Extraction(_) => "extraction",
            HubError::FileOperation(_) => "file",
        }
    }
}

impl From<std::io::Error> for HubError {
    fn from(e: std::io::Error) -> Self {
        HubError::FileOperation(e.to_string())
    }
}

impl From<serde_json::Error> for HubError {
    fn from(e: serde_json::Error) -> Self {
        HubError::FileOperation(format!("serialization failed: {}", e))
    }
}
