//! HttpTransport: RemoteTransport implementation over reqwest

use async_trait::async_trait;
use esi_core_interface::{RemoteTransport, Result};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, trace};

use crate::error::ConnectError;

/// Host FwESI binds its remote-control server to
pub const DEFAULT_HOST: &str = "http://127.0.0.1";

/// Port FwESI listens on unless reconfigured
pub const DEFAULT_PORT: u16 = 2132;

/// Connection settings for a FwESI instance
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectConfig {
    /// Host with or without scheme (`127.0.0.1` becomes `http://127.0.0.1`)
    pub host: String,

    /// TCP port of the remote-control server
    pub port: u16,

    /// Per-request timeout
    pub timeout: Duration,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: Duration::from_secs(10),
            user_agent: format!("esi-connect/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ConnectConfig {
    /// Base URL without the `/api` suffix, e.g. `http://127.0.0.1:2132`
    pub fn base_url(&self) -> std::result::Result<String, ConnectError> {
        let host = self.host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(ConnectError::InvalidAddress(self.host.clone()));
        }

        let host = if host.contains("://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        };

        Ok(format!("{}:{}", host, self.port))
    }
}

/// JSON-over-HTTP transport to a FwESI remote-control server.
///
/// Cheap to clone: `reqwest::Client` shares its connection pool internally.
///
/// # Example
///
/// ```rust,no_run
/// use esi_connect::{ConnectConfig, HttpTransport};
/// use esi_core_interface::{routes, RemoteTransport};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = ConnectConfig {
///     host: "192.168.0.20".to_string(),
///     ..Default::default()
/// };
/// let transport = HttpTransport::new(&config)?;
/// let saves = transport.get(routes::SAVE_FILES).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport with its own HTTP client
    pub fn new(config: &ConnectConfig) -> std::result::Result<Self, ConnectError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ConnectError::ClientBuild(e.to_string()))?;

        Self::with_client(client, config)
    }

    /// Build a transport around a caller-supplied client (proxies, custom TLS, shared pools)
    pub fn with_client(
        client: Client,
        config: &ConnectConfig,
    ) -> std::result::Result<Self, ConnectError> {
        let base_url = config.base_url()?;
        debug!("FwESI remote endpoint: {}", base_url);
        Ok(Self { client, base_url })
    }

    /// Full URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn decode(url: &str, response: Response) -> std::result::Result<Value, ConnectError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ConnectError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| ConnectError::Request {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_slice(&bytes).map_err(|e| ConnectError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl RemoteTransport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        debug!("GET {}", url);

        let result = async {
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|source| ConnectError::Request {
                    url: url.clone(),
                    source,
                })?;
            Self::decode(&url, response).await
        }
        .await;

        let body = result.map_err(|e| e.into_transport(path))?;
        trace!("GET {} -> {}", url, body);
        Ok(body)
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url(path);
        debug!("PUT {} {}", url, body);

        let result = async {
            let response = self
                .client
                .put(&url)
                .json(body)
                .send()
                .await
                .map_err(|source| ConnectError::Request {
                    url: url.clone(),
                    source,
                })?;
            Self::decode(&url, response).await
        }
        .await;

        let answer = result.map_err(|e| e.into_transport(path))?;
        trace!("PUT {} -> {}", url, answer);
        Ok(answer)
    }

    fn endpoint(&self) -> String {
        self.base_url.clone()
    }
}
