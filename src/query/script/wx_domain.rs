use crate::gateway::error::QueryError;
use crate::query::record::{WechatBlockResult, decode_json};
use crate::query::validate::required;
use crate::query::{Endpoint, NetQuery};
use async_trait::async_trait;
use serde_json::Value;

/// 微信内访问状态检测
#[derive(Debug, Clone)]
pub struct WxDomain {
    pub domain: String,
}

#[async_trait]
impl NetQuery for WxDomain {
    type Output = WechatBlockResult;

    fn name(&self) -> &'static str {
        "WeChat Domain"
    }

    fn endpoint(&self) -> Result<Endpoint, QueryError> {
        let domain = required(&self.domain, "a domain")?;
        Ok(Endpoint::new("/network/wxdomain").param("domain", domain))
    }

    fn decode(&self, body: Value) -> Result<WechatBlockResult, QueryError> {
        decode_json(body)
    }

    fn failure_causes(&self) -> &'static [&'static str] {
        &[
            "The domain format is invalid",
            "The upstream service is temporarily unavailable",
        ]
    }
}
