use crate::gateway::error::QueryError;
use crate::query::record::{PingStat, decode_json};
use crate::query::validate::required;
use crate::query::{Endpoint, NetQuery};
use async_trait::async_trait;
use log::warn;
use serde_json::Value;

/// 从服务端 Ping 指定主机
#[derive(Debug, Clone)]
pub struct Ping {
    pub host: String,
}

/// 从服务端反向 Ping 调用方的公网 IP
#[derive(Debug, Clone, Default)]
pub struct PingMyIp;

fn decode_stat(name: &str, body: Value) -> Result<PingStat, QueryError> {
    let stat = decode_json::<PingStat>(body)?;
    if !stat.is_consistent() {
        warn!(
            "{name}: inconsistent statistics min={} avg={} max={}",
            stat.min, stat.avg, stat.max
        );
    }
    Ok(stat)
}

#[async_trait]
impl NetQuery for Ping {
    type Output = PingStat;

    fn name(&self) -> &'static str {
        "Ping"
    }

    fn endpoint(&self) -> Result<Endpoint, QueryError> {
        let host = required(&self.host, "a target host")?;
        Ok(Endpoint::new("/network/ping").param("host", host))
    }

    fn decode(&self, body: Value) -> Result<PingStat, QueryError> {
        decode_stat(self.name(), body)
    }

    fn failure_causes(&self) -> &'static [&'static str] {
        &[
            "The target host is unreachable",
            "A firewall is dropping the probe",
            "The target blocks ICMP",
        ]
    }
}

#[async_trait]
impl NetQuery for PingMyIp {
    type Output = PingStat;

    fn name(&self) -> &'static str {
        "Ping My IP"
    }

    fn endpoint(&self) -> Result<Endpoint, QueryError> {
        Ok(Endpoint::new("/network/pingmyip"))
    }

    fn decode(&self, body: Value) -> Result<PingStat, QueryError> {
        decode_stat(self.name(), body)
    }

    fn failure_causes(&self) -> &'static [&'static str] {
        &[
            "Your network blocks inbound ICMP",
            "You are behind a NAT that does not answer ping",
        ]
    }
}
