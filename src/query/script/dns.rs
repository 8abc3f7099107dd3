use crate::gateway::error::QueryError;
use crate::query::record::{DnsRecordSet, decode_json};
use crate::query::validate::required;
use crate::query::{DnsRecordType, Endpoint, NetQuery};
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct Dns {
    pub domain: String,
    pub record_type: DnsRecordType,
}

#[async_trait]
impl NetQuery for Dns {
    type Output = DnsRecordSet;

    fn name(&self) -> &'static str {
        "DNS"
    }

    fn endpoint(&self) -> Result<Endpoint, QueryError> {
        let domain = required(&self.domain, "a domain")?;
        Ok(Endpoint::new("/network/dns")
            .param("domain", domain)
            .param("type", self.record_type.as_str()))
    }

    fn decode(&self, body: Value) -> Result<DnsRecordSet, QueryError> {
        let mut set = decode_json::<DnsRecordSet>(body)?;
        if set.record_type.is_none() {
            set.record_type = Some(self.record_type.as_str().to_string());
        }
        Ok(set)
    }

    fn failure_causes(&self) -> &'static [&'static str] {
        &[
            "The domain does not exist",
            "There is no record of this type",
            "The DNS server did not respond",
        ]
    }
}
