use crate::gateway::error::QueryError;
use crate::query::record::{UrlStatus, decode_json};
use crate::query::validate::http_url;
use crate::query::{Endpoint, NetQuery};
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct UrlCheck {
    pub url: String,
}

#[async_trait]
impl NetQuery for UrlCheck {
    type Output = UrlStatus;

    fn name(&self) -> &'static str {
        "URL Status"
    }

    fn endpoint(&self) -> Result<Endpoint, QueryError> {
        let url = http_url(&self.url)?;
        Ok(Endpoint::new("/network/urlstatus").param("url", url))
    }

    fn decode(&self, body: Value) -> Result<UrlStatus, QueryError> {
        decode_json(body)
    }

    fn failure_causes(&self) -> &'static [&'static str] {
        &[
            "The URL is malformed",
            "The target server is unreachable",
            "DNS resolution failed",
        ]
    }
}
