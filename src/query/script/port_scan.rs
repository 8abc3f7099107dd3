use crate::gateway::error::QueryError;
use crate::query::record::{PortScanResult, decode_json};
use crate::query::validate::{port, required};
use crate::query::{Endpoint, NetQuery, Protocol};
use async_trait::async_trait;
use serde_json::Value;

/// 端口号保留用户的原始输入, 在 `endpoint` 中校验
#[derive(Debug, Clone)]
pub struct PortScan {
    pub host: String,
    pub port: String,
    pub protocol: Protocol,
}

#[async_trait]
impl NetQuery for PortScan {
    type Output = PortScanResult;

    fn name(&self) -> &'static str {
        "Port Scan"
    }

    fn endpoint(&self) -> Result<Endpoint, QueryError> {
        let host = required(&self.host, "a host")?;
        let port = port(&self.port)?;
        Ok(Endpoint::new("/network/portscan")
            .param("host", host)
            .param("port", port.to_string())
            .param("protocol", self.protocol.as_str()))
    }

    fn decode(&self, body: Value) -> Result<PortScanResult, QueryError> {
        decode_json(body)
    }

    fn failure_causes(&self) -> &'static [&'static str] {
        &[
            "The host could not be resolved",
            "The scanner is temporarily unavailable",
        ]
    }
}
