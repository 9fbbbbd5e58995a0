//! Error types for the esi-connect crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Invalid server address '{0}'")]
    InvalidAddress(String),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("FwESI answered HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Response from {url} is not valid JSON: {reason}")]
    Decode { url: String, reason: String },
}

impl ConnectError {
    /// Convert into the transport-level error, tagging it with the API path
    pub fn into_transport(self, path: &str) -> esi_core_interface::TransportError {
        use esi_core_interface::TransportError;

        match self {
            ConnectError::Request { source, .. } => TransportError::Request {
                path: path.to_string(),
                reason: source.to_string(),
            },
            ConnectError::Status { status, .. } => TransportError::Status {
                path: path.to_string(),
                status,
            },
            ConnectError::Decode { reason, .. } => TransportError::Decode {
                path: path.to_string(),
                reason,
            },
            other => TransportError::Other(other.to_string()),
        }
    }
}
