use crate::gateway::error::QueryError;
use crate::query::record::{IcpRecord, decode_json};
use crate::query::validate::required;
use crate::query::{Endpoint, NetQuery};
use async_trait::async_trait;
use serde_json::Value;

/// ICP 备案查询, 服务端会从完整 URL 中提取域名
#[derive(Debug, Clone)]
pub struct Icp {
    pub domain: String,
}

#[async_trait]
impl NetQuery for Icp {
    type Output = IcpRecord;

    fn name(&self) -> &'static str {
        "ICP"
    }

    fn endpoint(&self) -> Result<Endpoint, QueryError> {
        let domain = required(&self.domain, "a domain or URL")?;
        Ok(Endpoint::new("/network/icp").param("domain", domain))
    }

    fn decode(&self, body: Value) -> Result<IcpRecord, QueryError> {
        decode_json(body)
    }

    fn failure_causes(&self) -> &'static [&'static str] {
        &[
            "The domain has no ICP registration with the MIIT",
            "The lookup service is temporarily unavailable",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::script::testing::{gateway_for, params};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn full_url_is_passed_through() {
        let endpoint = Icp {
            domain: " https://www.baidu.com ".into(),
        }
        .endpoint()
        .unwrap();
        assert_eq!(endpoint.params, params(&[("domain", "https://www.baidu.com")]));
    }

    #[tokio::test]
    async fn unregistered_domain_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/network/icp"))
            .and(query_param("domain", "example.com"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"code": "200", "domain": "example.com", "msg": "未备案"})),
            )
            .mount(&server)
            .await;

        let record = Icp {
            domain: "example.com".into(),
        }
        .run(&gateway_for(&server))
        .await
        .unwrap();

        assert_eq!(record.domain, "example.com");
        assert!(!record.is_registered());
    }
}
