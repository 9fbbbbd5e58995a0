//! ESI Connect: HTTP connectivity to the FwESI remote-control server
//!
//! FwESI exposes its remote control as a small JSON API on a local web server.
//! This crate implements [`RemoteTransport`](esi_core_interface::RemoteTransport)
//! on top of `reqwest`, so the client library can stay transport-agnostic.
//!
//! # Example
//!
//! ```rust,no_run
//! use esi_connect::{ConnectConfig, HttpTransport};
//! use esi_core_interface::{routes, RemoteTransport};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let transport = HttpTransport::new(&ConnectConfig::default())?;
//!     let active = transport.get(routes::ACTIVE_SAVE).await?;
//!     println!("{active}");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod transport;

pub use error::ConnectError;
pub use transport::{ConnectConfig, HttpTransport, DEFAULT_HOST, DEFAULT_PORT};
