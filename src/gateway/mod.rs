pub mod error;

use crate::gateway::error::{QueryError, api_error, transport_error};
use clap::ValueEnum;
use log::{info, warn};
use reqwest::{Client, StatusCode};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;

pub const DEV_BASE_ADDRESS: &str = "https://uapis.cn/api/v1";
pub const PROD_BASE_ADDRESS: &str = "https://api.unhub.dpdns.org";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Which upstream address the gateway talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    /// The upstream API directly, as the local dev proxy would forward it
    Dev,
    /// The public proxy domain
    #[default]
    Prod,
}

impl Environment {
    pub fn base_address(self) -> &'static str {
        match self {
            Environment::Dev => DEV_BASE_ADDRESS,
            Environment::Prod => PROD_BASE_ADDRESS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_address: String,
    pub timeout: Duration,
    pub content_type: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_address: Environment::default().base_address().to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }
}

/// The single HTTP client every feature query goes through.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    base_address: String,
}

pub type QueryParams = Vec<(&'static str, String)>;

impl GatewayClient {
    pub fn new(config: GatewayConfig) -> Result<Self, QueryError> {
        let client = create_reqwest_client(&config)
            .map_err(|e| QueryError::unknown(format!("Create Reqwest Client Error: {e}")))?;

        info!("Gateway base address: {}", config.base_address);

        Ok(Self {
            client,
            base_address: config.base_address.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get(&self, path: &str, params: &[(&'static str, String)]) -> Result<Value, QueryError> {
        let (_, body) = self.send(path, params, None).await?;
        serde_json::from_slice::<Value>(&body)
            .map_err(|e| QueryError::unknown(format!("Unable to parse json: {e}")))
    }

    /// Reachability check with a one-off timeout. The body is not decoded,
    /// only the 2xx status is returned.
    pub async fn check(&self, path: &str, timeout: Duration) -> Result<StatusCode, QueryError> {
        let (status, _) = self.send(path, &[], Some(timeout)).await?;
        Ok(status)
    }

    async fn send(
        &self,
        path: &str,
        params: &[(&'static str, String)],
        timeout: Option<Duration>,
    ) -> Result<(StatusCode, Vec<u8>), QueryError> {
        let url = format!("{}{path}", self.base_address);
        info!("[API Request] GET {path} {params:?}");

        let mut request = self.client.get(&url).query(params);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let res = match request.send().await {
            Ok(res) => res,
            Err(e) => {
                warn!("[API Response Error] {path}: {e}");
                return Err(transport_error(&e));
            }
        };

        let status = res.status();
        info!("[API Response] {path} {}", status.as_u16());

        let body = res.bytes().await.map_err(|e| transport_error(&e))?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        Ok((status, body.to_vec()))
    }
}

fn create_reqwest_client(config: &GatewayConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&config.content_type) {
        headers.insert(CONTENT_TYPE, value);
    }

    Client::builder()
        .user_agent(concat!("net-toolbox/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .timeout(config.timeout)
        .build()
}
