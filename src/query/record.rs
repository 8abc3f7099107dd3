use crate::gateway::error::QueryError;
use crate::query::{PortStatus, Protocol};
use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

lazy_static! {
    static ref ASN_RE: Regex = Regex::new(r"^(?i:AS)?(\d+)\s*(.*)$").unwrap();
}

pub fn decode_json<T: DeserializeOwned>(body: Value) -> Result<T, QueryError> {
    serde_json::from_value(body).map_err(|e| QueryError::unknown(format!("Unable to parse json: {e}")))
}

/// IP 归属信息, 数据源决定具体形态
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum IpRecord {
    Standard(IpBase),
    Commercial(CommercialIp),
}

impl IpRecord {
    pub fn base(&self) -> &IpBase {
        match self {
            IpRecord::Standard(base) => base,
            IpRecord::Commercial(record) => &record.base,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommercialIp {
    #[serde(flatten)]
    pub base: IpBase,
    #[serde(flatten)]
    pub extra: CommercialFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpBase {
    pub ip: String,
    #[serde(default)]
    pub region: String,
    pub beginip: Option<String>,
    pub endip: Option<String>,
    pub isp: Option<String>,
    pub asn: Option<String>,
    pub llc: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl IpBase {
    /// Splits `AS13335 Cloudflare` style strings into number and name.
    pub fn autonomous_system(&self) -> Option<AS> {
        let raw = self.asn.as_deref()?.trim();
        let caps = ASN_RE.captures(raw)?;
        let number = caps.get(1)?.as_str().parse::<u32>().ok()?;
        let name = caps.get(2).map(|m| m.as_str().trim().to_string()).unwrap_or_default();
        Some(AS { number, name })
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommercialFields {
    pub district: Option<String>,
    pub area_code: Option<String>,
    pub city_code: Option<String>,
    pub zip_code: Option<String>,
    pub time_zone: Option<String>,
    pub scenes: Option<String>,
    pub elevation: Option<String>,
    pub weather_station: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AS {
    pub number: u32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// WHOIS 结果: 原始文本或结构化字段, 二者只会有一个
/// 字段保持上游返回的顺序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WhoisRecord {
    Text(String),
    Fields(Map<String, Value>),
}

/// One structured WHOIS value as a single line: lists joined, null as `N/A`.
pub fn whois_value_text(value: &Value) -> String {
    match value {
        Value::Null => "N/A".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WhoisEnvelope {
    pub whois: WhoisRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IcpRecord {
    pub domain: String,
    pub msg: Option<String>,
    pub nature_name: Option<String>,
    pub service_licence: Option<String>,
    pub unit_name: Option<String>,
}

impl IcpRecord {
    /// 没有备案号即视为未备案
    pub fn is_registered(&self) -> bool {
        self.service_licence
            .as_deref()
            .is_some_and(|licence| !licence.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PingStat {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub ip: String,
    pub location: Option<String>,
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub avg: f64,
    #[serde(default)]
    pub max: f64,
}

impl PingStat {
    pub fn is_consistent(&self) -> bool {
        self.min <= self.avg && self.avg <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecordSet {
    #[serde(default)]
    pub domain: String,
    #[serde(default, rename = "type")]
    pub record_type: Option<String>,
    pub error: Option<String>,
    #[serde(default)]
    pub records: Vec<DnsRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    #[serde(rename = "type", default)]
    pub record_type: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl DnsRecord {
    /// All non-empty field values except `type`, joined by spaces.
    pub fn value_text(&self) -> String {
        self.fields
            .values()
            .filter_map(|value| match value {
                Value::Null => None,
                Value::String(s) if s.is_empty() => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlStatus {
    pub url: String,
    pub status: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortScanResult {
    #[serde(default)]
    pub ip: String,
    pub port: u16,
    pub protocol: Protocol,
    pub port_status: PortStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WechatBlockResult {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default, deserialize_with = "string_or_number")]
    pub status_type: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn asn_with_name() {
        let base = IpBase {
            asn: Some("AS13335 Cloudflare, Inc.".into()),
            ..IpBase::default()
        };
        assert_eq!(
            base.autonomous_system(),
            Some(AS {
                number: 13335,
                name: "Cloudflare, Inc.".into()
            })
        );
    }

    #[test]
    fn asn_bare_number() {
        let base = IpBase {
            asn: Some("AS4134".into()),
            ..IpBase::default()
        };
        assert_eq!(base.autonomous_system().map(|a| a.number), Some(4134));

        let base = IpBase {
            asn: Some("unknown".into()),
            ..IpBase::default()
        };
        assert_eq!(base.autonomous_system(), None);
    }

    #[test]
    fn coordinates_need_both_halves() {
        let base = IpBase {
            latitude: Some(39.9),
            ..IpBase::default()
        };
        assert!(base.coordinates().is_none());
    }

    #[test]
    fn whois_text_and_fields_are_distinct() {
        let text: WhoisEnvelope = decode_json(json!({"whois": "Domain Name: EXAMPLE.COM"})).unwrap();
        assert!(matches!(text.whois, WhoisRecord::Text(_)));

        let fields: WhoisEnvelope = decode_json(json!({
            "whois": {
                "registrar": "Example Registrar",
                "nameServers": ["a.iana-servers.net", "b.iana-servers.net"],
                "dnssec": null
            }
        }))
        .unwrap();
        let WhoisRecord::Fields(map) = fields.whois else {
            panic!("expected fields");
        };
        assert_eq!(whois_value_text(&map["registrar"]), "Example Registrar");
        assert_eq!(
            whois_value_text(&map["nameServers"]),
            "a.iana-servers.net, b.iana-servers.net"
        );
        assert_eq!(whois_value_text(&map["dnssec"]), "N/A");
        assert_eq!(
            map.keys().map(String::as_str).collect::<Vec<_>>(),
            ["registrar", "nameServers", "dnssec"]
        );
    }

    #[test]
    fn icp_without_licence_is_unregistered() {
        let record: IcpRecord = decode_json(json!({"domain": "example.com", "msg": "ok"})).unwrap();
        assert!(!record.is_registered());

        let record: IcpRecord = decode_json(json!({
            "domain": "baidu.com",
            "serviceLicence": "京ICP证030173号",
            "unitName": "北京百度网讯科技有限公司",
            "natureName": "企业"
        }))
        .unwrap();
        assert!(record.is_registered());
        assert_eq!(record.nature_name.as_deref(), Some("企业"));
    }

    #[test]
    fn ping_missing_numbers_default_to_zero() {
        let stat: PingStat = decode_json(json!({"ip": "1.2.3.4"})).unwrap();
        assert_eq!((stat.min, stat.avg, stat.max), (0.0, 0.0, 0.0));
        assert!(stat.is_consistent());

        let stat: PingStat = decode_json(json!({"host": "x", "ip": "1.1.1.1", "min": 5, "avg": 3, "max": 9})).unwrap();
        assert!(!stat.is_consistent());
    }

    #[test]
    fn dns_records_keep_order_and_join_values() {
        let set: DnsRecordSet = decode_json(json!({
            "code": 200,
            "domain": "example.com",
            "records": [
                {"type": "MX", "priority": 10, "exchange": "mx1.example.com"},
                {"type": "MX", "priority": 20, "exchange": "mx2.example.com", "note": ""}
            ]
        }))
        .unwrap();
        assert_eq!(set.records.len(), 2);
        assert_eq!(set.records[0].value_text(), "10 mx1.example.com");
        assert_eq!(set.records[1].value_text(), "20 mx2.example.com");
    }

    #[test]
    fn dns_empty_list_is_valid() {
        let set: DnsRecordSet = decode_json(json!({"domain": "example.com", "records": []})).unwrap();
        assert!(set.records.is_empty());
        assert!(set.error.is_none());
    }

    #[test]
    fn wechat_type_accepts_numbers() {
        let result: WechatBlockResult =
            decode_json(json!({"domain": "qq.com", "title": "正常", "type": 1})).unwrap();
        assert_eq!(result.status_type, "1");
    }

    #[test]
    fn commercial_record_serializes_flat() {
        let record = IpRecord::Commercial(CommercialIp {
            base: IpBase {
                ip: "8.8.8.8".into(),
                region: "US".into(),
                ..IpBase::default()
            },
            extra: CommercialFields {
                time_zone: Some("America/Los_Angeles".into()),
                ..CommercialFields::default()
            },
        });
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["source"], "commercial");
        assert_eq!(value["ip"], "8.8.8.8");
        assert_eq!(value["time_zone"], "America/Los_Angeles");
    }
}
