//! ESI Core Interface: transport abstraction for the FwESI remote-control server
//!
//! FwESI ships an embedded web server (port 2132 by default) that exposes save
//! files and "OperatorActors" under `/api/`. This crate defines the
//! `RemoteTransport` trait the client library talks through, the error type
//! every transport reports, and the JSON shapes exchanged on the wire.
//!
//! # Architecture
//!
//! - **RemoteTransport**: GET/PUT of JSON documents relative to `/api/`
//! - **wire**: serde models of every request and response body
//! - **routes**: the route names and the literal answers the server sends back
//!
//! # Example
//!
//! ```rust,no_run
//! use esi_core_interface::{routes, wire::OperatorActorListDto, RemoteTransport};
//!
//! async fn count_actors<T: RemoteTransport>(transport: &T) -> anyhow::Result<usize> {
//!     let body = transport.get(routes::OPERATOR_ACTORS).await?;
//!     let list: OperatorActorListDto = serde_json::from_value(body)?;
//!     Ok(list.operator_actors.len())
//! }
//! ```

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod wire;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request to '{path}' failed: {reason}")]
    Request { path: String, reason: String },

    #[error("Server answered HTTP {status} for '{path}'")]
    Status { path: String, status: u16 },

    #[error("Invalid response from '{path}': {reason}")]
    Decode { path: String, reason: String },

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Whether repeating the same request could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            TransportError::Request { .. } => true,
            TransportError::Status { status, .. } => *status >= 500,
            TransportError::Decode { .. } | TransportError::Other(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;

/// Route names below `/api/` and the fixed answers FwESI replies with.
pub mod routes {
    /// List of save files (GET) and save loading (PUT)
    pub const SAVE_FILES: &str = "save-files";

    /// Currently loaded scenario
    pub const ACTIVE_SAVE: &str = "save-files/active";

    /// OperatorActor listing (GET) and updates (PUT)
    pub const OPERATOR_ACTORS: &str = "operatoractors";

    /// Body FwESI returns after a successful save load
    pub const SAVE_LOADED_ANSWER: &str = "save file has been loaded";

    /// Body FwESI returns after a successful actor update
    pub const ACTOR_UPDATED_ANSWER: &str = "actor has been updated";
}

/// A JSON request/response channel to the FwESI remote-control server.
///
/// Paths are relative to `/api/` (see [`routes`]). Implementations decode the
/// response body as JSON and hand it back untouched; interpreting it is the
/// caller's job.
///
/// Implementations must be `Send + Sync` so a client can be moved across tasks.
#[async_trait]
pub trait RemoteTransport: Send + Sync {
    /// Fetch `/api/{path}` and decode the body as JSON
    async fn get(&self, path: &str) -> Result<Value>;

    /// Send `body` as JSON to `/api/{path}` and decode the answer
    async fn put(&self, path: &str, body: &Value) -> Result<Value>;

    /// Human-readable address of the server, for logs and error messages
    fn endpoint(&self) -> String;
}

#[async_trait]
impl<T: RemoteTransport + ?Sized> RemoteTransport for Box<T> {
    async fn get(&self, path: &str) -> Result<Value> {
        (**self).get(path).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        (**self).put(path, body).await
    }

    fn endpoint(&self) -> String {
        (**self).endpoint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl RemoteTransport for Echo {
        async fn get(&self, path: &str) -> Result<Value> {
            Ok(Value::String(path.to_string()))
        }

        async fn put(&self, _path: &str, body: &Value) -> Result<Value> {
            Ok(body.clone())
        }

        fn endpoint(&self) -> String {
            "echo".to_string()
        }
    }

    #[tokio::test]
    async fn test_boxed_transport_delegates() {
        let transport: Box<dyn RemoteTransport> = Box::new(Echo);
        let got = transport.get(routes::OPERATOR_ACTORS).await.unwrap();
        assert_eq!(got, Value::String("operatoractors".to_string()));

        let body = serde_json::json!({"absolutePath": "C:/saves/a.sav"});
        assert_eq!(transport.put(routes::SAVE_FILES, &body).await.unwrap(), body);
        assert_eq!(transport.endpoint(), "echo");
    }

    #[test]
    fn test_transient_classification() {
        let request = TransportError::Request {
            path: "save-files".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(request.is_transient());

        let server_error = TransportError::Status {
            path: "operatoractors".to_string(),
            status: 503,
        };
        assert!(server_error.is_transient());

        let not_found = TransportError::Status {
            path: "operatoractors".to_string(),
            status: 404,
        };
        assert!(!not_found.is_transient());

        let decode = TransportError::Decode {
            path: "save-files".to_string(),
            reason: "expected value".to_string(),
        };
        assert!(!decode.is_transient());
    }

    #[test]
    fn test_error_display() {
        let err = TransportError::Status {
            path: "save-files/active".to_string(),
            status: 500,
        };
        assert_eq!(
            err.to_string(),
            "Server answered HTTP 500 for 'save-files/active'"
        );
    }
}
