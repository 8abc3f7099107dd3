use crate::gateway::error::QueryError;
use crate::query::record::{WhoisEnvelope, WhoisRecord, decode_json};
use crate::query::validate::required;
use crate::query::{Endpoint, NetQuery, WhoisFormat};
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct Whois {
    pub domain: String,
    pub format: WhoisFormat,
}

#[async_trait]
impl NetQuery for Whois {
    type Output = WhoisRecord;

    fn name(&self) -> &'static str {
        "WHOIS"
    }

    fn endpoint(&self) -> Result<Endpoint, QueryError> {
        let domain = required(&self.domain, "a domain")?;
        Ok(Endpoint::new("/network/whois")
            .param("domain", domain)
            .param("format", self.format.as_str()))
    }

    fn decode(&self, body: Value) -> Result<WhoisRecord, QueryError> {
        decode_json::<WhoisEnvelope>(body).map(|envelope| envelope.whois)
    }

    fn failure_causes(&self) -> &'static [&'static str] {
        &[
            "The domain is not registered",
            "The registry WHOIS server did not answer",
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
    fn format_defaults_to_text() {
        let endpoint = Whois {
            domain: "example.com".into(),
            format: WhoisFormat::default(),
        }
        .endpoint()
        .unwrap();
        assert_eq!(endpoint.path, "/network/whois");
        assert_eq!(
            endpoint.params,
            params(&[("domain", "example.com"), ("format", "text")])
        );
    }

    #[tokio::test]
    async fn json_format_is_stable_across_queries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/network/whois"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "whois": {
                    "domainName": "example.com",
                    "registrar": "RESERVED-Internet Assigned Numbers Authority",
                    "status": ["clientDeleteProhibited", "clientTransferProhibited"],
                    "nameServers": ["a.iana-servers.net", "b.iana-servers.net"]
                }
            })))
            .expect(2)
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let query = Whois {
            domain: "example.com".into(),
            format: WhoisFormat::Json,
        };
        let first = query.run(&gateway).await.unwrap();
        let second = query.run(&gateway).await.unwrap();

        assert_eq!(first, second);
        let WhoisRecord::Fields(fields) = first else {
            panic!("expected structured whois");
        };
        let keys = fields.keys().cloned().collect::<Vec<_>>();
        assert_eq!(keys, ["domainName", "registrar", "status", "nameServers"]);
    }

    #[tokio::test]
    async fn text_format() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/network/whois"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"whois": "Domain Name: EXAMPLE.COM\nRegistry Domain ID: 2336799_DOMAIN_COM-VRSN"})),
            )
            .mount(&server)
            .await;

        let record = Whois {
            domain: "example.com".into(),
            format: WhoisFormat::Text,
        }
        .run(&gateway_for(&server))
        .await
        .unwrap();

        assert!(matches!(record, WhoisRecord::Text(text) if text.starts_with("Domain Name")));
    }
}
