/*!
 * esi-remote - client for the FwESI remote-control server
 *
 * FwESI (Feuerwehr-Einsatz-Simulator) exposes its running scenario over a
 * small HTTP/JSON API. This library wraps it with:
 * - Typed snapshots of saves, the active scenario and operator actors
 * - Filterable lists queried by attribute name
 * - Autocommit or batched commits of actor changes and save loads
 * - Linear ramps for animating numeric properties
 */

pub mod cli_style;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod ramp;
pub mod remote;

#[cfg(test)]
pub mod mock;

// Re-export commonly used types
pub use config::{LogLevel, RemoteConfig};
pub use error::{EsiError, Result};
pub use model::{AttrValue, Attributes, FilterList, OperatorActor, Save};
pub use ramp::LinearRamp;
pub use remote::EsiRemote;

pub use esi_connect::HttpTransport;
pub use esi_core_interface::RemoteTransport;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
