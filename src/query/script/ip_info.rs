use crate::gateway::error::QueryError;
use crate::query::record::{CommercialIp, IpBase, IpRecord, decode_json};
use crate::query::validate::required;
use crate::query::{DataSource, Endpoint, NetQuery};
use async_trait::async_trait;
use serde_json::Value;

const CAUSES: &[&str] = &[
    "The IP address is invalid",
    "The address is a private / intranet IP",
    "The database has no entry for this IP",
];

/// 查询本机公网 IP
#[derive(Debug, Clone, Default)]
pub struct MyIp {
    pub source: DataSource,
}

/// 查询指定 IP 或域名的归属, 域名由服务端解析
#[derive(Debug, Clone)]
pub struct IpInfo {
    pub target: String,
    pub source: DataSource,
}

fn with_source(endpoint: Endpoint, source: DataSource) -> Endpoint {
    match source {
        DataSource::Standard => endpoint,
        DataSource::Commercial => endpoint.param("source", "commercial"),
    }
}

// 形态由请求时选择的数据源决定, 不去探测响应里的字段
fn decode_ip(body: Value, source: DataSource) -> Result<IpRecord, QueryError> {
    match source {
        DataSource::Standard => decode_json::<IpBase>(body).map(IpRecord::Standard),
        DataSource::Commercial => decode_json::<CommercialIp>(body).map(IpRecord::Commercial),
    }
}

#[async_trait]
impl NetQuery for MyIp {
    type Output = IpRecord;

    fn name(&self) -> &'static str {
        "My IP"
    }

    fn endpoint(&self) -> Result<Endpoint, QueryError> {
        Ok(with_source(Endpoint::new("/network/myip"), self.source))
    }

    fn decode(&self, body: Value) -> Result<IpRecord, QueryError> {
        decode_ip(body, self.source)
    }

    fn failure_causes(&self) -> &'static [&'static str] {
        &["The upstream service is temporarily unavailable"]
    }
}

#[async_trait]
impl NetQuery for IpInfo {
    type Output = IpRecord;

    fn name(&self) -> &'static str {
        "IP Info"
    }

    fn endpoint(&self) -> Result<Endpoint, QueryError> {
        let target = required(&self.target, "an IP address or domain")?;
        Ok(with_source(
            Endpoint::new("/network/ipinfo").param("ip", target),
            self.source,
        ))
    }

    fn decode(&self, body: Value) -> Result<IpRecord, QueryError> {
        decode_ip(body, self.source)
    }

    fn failure_causes(&self) -> &'static [&'static str] {
        CAUSES
    }
}
