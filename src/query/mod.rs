pub mod record;
pub mod script;
pub mod validate;

use crate::gateway::error::QueryError;
use crate::gateway::{GatewayClient, QueryParams};
use async_trait::async_trait;
use clap::ValueEnum;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// 单个功能的请求描述: 路径加查询参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub params: QueryParams,
}

impl Endpoint {
    pub fn new(path: &'static str) -> Self {
        Self {
            path,
            params: Vec::new(),
        }
    }

    pub fn param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.params.push((key, value.into()));
        self
    }
}

/// One feature of the toolbox. Validation happens in `endpoint`, so a
/// query that fails there never reaches the gateway.
#[async_trait]
pub trait NetQuery: Send + Sync {
    type Output: Serialize + Send;

    fn name(&self) -> &'static str;

    fn endpoint(&self) -> Result<Endpoint, QueryError>;

    fn decode(&self, body: Value) -> Result<Self::Output, QueryError>;

    /// Shown under the error message when the query fails.
    fn failure_causes(&self) -> &'static [&'static str] {
        &[]
    }

    async fn run(&self, gateway: &GatewayClient) -> Result<Self::Output, QueryError> {
        let endpoint = self.endpoint()?;
        let result = gateway
            .get(endpoint.path, &endpoint.params)
            .await
            .and_then(|body| self.decode(body));

        match &result {
            Ok(_) => info!("{} query succeeded", self.name()),
            Err(e) => warn!("{} query failed, message: {e}", self.name()),
        }
        result
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    #[default]
    Standard,
    Commercial,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WhoisFormat {
    #[default]
    Text,
    Json,
}

impl WhoisFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            WhoisFormat::Text => "text",
            WhoisFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
#[value(rename_all = "UPPER")]
#[allow(clippy::upper_case_acronyms)]
pub enum DnsRecordType {
    #[default]
    A,
    AAAA,
    CNAME,
    MX,
    NS,
    TXT,
}

impl DnsRecordType {
    pub fn as_str(self) -> &'static str {
        match self {
            DnsRecordType::A => "A",
            DnsRecordType::AAAA => "AAAA",
            DnsRecordType::CNAME => "CNAME",
            DnsRecordType::MX => "MX",
            DnsRecordType::NS => "NS",
            DnsRecordType::TXT => "TXT",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortStatus {
    Open,
    Closed,
    Timeout,
    #[serde(other)]
    Unknown,
}

impl Display for DnsRecordType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Display for Protocol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
