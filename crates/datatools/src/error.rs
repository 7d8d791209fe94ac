/// Failure of a single lookup
#[derive(thiserror::Error, Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} for url ({url})")]
    Status { status: u16, url: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Credential unavailable: {0}")]
    Credential(String),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
