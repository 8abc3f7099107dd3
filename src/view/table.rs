// 将查询结果渲染为终端表格
use crate::gateway::error::QueryError;
use crate::health::{HealthReport, HealthStatus};
use crate::query::record::{
    DnsRecordSet, IcpRecord, IpRecord, PingStat, PortScanResult, UrlStatus, WechatBlockResult,
    WhoisRecord, whois_value_text,
};
use crate::view::verdict::{LatencyLevel, UrlStatusClass, WechatVerdict};
use prettytable::{Attr, Cell, Row, Table, color, format};

/// Anything a page can show on success.
pub trait Render {
    fn table(&self) -> Table;
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP);
    table
}

fn title_cell(text: &str) -> Cell {
    Cell::new(text)
        .with_style(Attr::ForegroundColor(color::YELLOW))
        .with_style(Attr::Bold)
}

fn value_cell(text: &str, fg: color::Color) -> Cell {
    Cell::new(text).with_style(Attr::ForegroundColor(fg))
}

// 两列 Key / Value 表
fn push_field(table: &mut Table, key: &str, value: &str, fg: color::Color) {
    table.add_row(Row::new(vec![title_cell(key), value_cell(value, fg)]));
}

fn push_optional(table: &mut Table, key: &str, value: Option<&str>, fg: color::Color) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        push_field(table, key, value, fg);
    }
}

impl Render for IpRecord {
    fn table(&self) -> Table {
        let mut table = new_table();
        let base = self.base();

        push_field(&mut table, "IP", &base.ip, color::BRIGHT_BLUE);
        push_field(&mut table, "Region", &base.region, color::GREEN);
        push_optional(&mut table, "ISP", base.isp.as_deref(), color::CYAN);
        push_optional(&mut table, "Owner", base.llc.as_deref(), color::CYAN);

        if let IpRecord::Standard(_) = self {
            push_optional(&mut table, "Range Start", base.beginip.as_deref(), color::BLUE);
            push_optional(&mut table, "Range End", base.endip.as_deref(), color::BLUE);
        }

        match base.autonomous_system() {
            Some(a_s) if a_s.name.is_empty() => {
                push_field(&mut table, "ASN", &a_s.number.to_string(), color::BRIGHT_CYAN);
            }
            Some(a_s) => {
                push_field(&mut table, "ASN", &a_s.number.to_string(), color::BRIGHT_CYAN);
                push_field(&mut table, "AS Name", &a_s.name, color::BRIGHT_CYAN);
            }
            None => push_optional(&mut table, "ASN", base.asn.as_deref(), color::BRIGHT_CYAN),
        }

        if let Some(coordinates) = base.coordinates() {
            push_field(
                &mut table,
                "Lat",
                &format!("{:.6}", coordinates.latitude),
                color::BRIGHT_GREEN,
            );
            push_field(
                &mut table,
                "Lon",
                &format!("{:.6}", coordinates.longitude),
                color::BRIGHT_GREEN,
            );
        }

        if let IpRecord::Commercial(record) = self {
            let extra = &record.extra;
            push_optional(&mut table, "District", extra.district.as_deref(), color::GREEN);
            push_optional(&mut table, "Area Code", extra.area_code.as_deref(), color::GREEN);
            push_optional(&mut table, "City Code", extra.city_code.as_deref(), color::GREEN);
            push_optional(&mut table, "Zip Code", extra.zip_code.as_deref(), color::GREEN);
            push_optional(
                &mut table,
                "Time Zone",
                extra.time_zone.as_deref(),
                color::BRIGHT_MAGENTA,
            );
            push_optional(&mut table, "Scenes", extra.scenes.as_deref(), color::WHITE);
            push_optional(&mut table, "Elevation", extra.elevation.as_deref(), color::WHITE);
            push_optional(
                &mut table,
                "Weather Station",
                extra.weather_station.as_deref(),
                color::WHITE,
            );
        }

        table
    }
}

impl Render for WhoisRecord {
    fn table(&self) -> Table {
        let mut table = new_table();
        match self {
            WhoisRecord::Text(text) => {
                table.set_titles(Row::new(vec![title_cell("WHOIS")]));
                for line in text.lines().filter(|l| !l.trim().is_empty()) {
                    table.add_row(Row::new(vec![value_cell(line, color::WHITE)]));
                }
            }
            WhoisRecord::Fields(fields) => {
                for (key, value) in fields {
                    push_field(&mut table, key, &whois_value_text(value), color::CYAN);
                }
            }
        }
        table
    }
}

impl Render for IcpRecord {
    fn table(&self) -> Table {
        let mut table = new_table();
        push_field(&mut table, "Domain", &self.domain, color::BRIGHT_BLUE);
        if self.is_registered() {
            push_field(&mut table, "Status", "Registered (已备案)", color::GREEN);
        } else {
            push_field(&mut table, "Status", "Not Registered (未备案)", color::RED);
        }
        push_optional(&mut table, "Unit Name", self.unit_name.as_deref(), color::CYAN);
        push_optional(&mut table, "Nature", self.nature_name.as_deref(), color::CYAN);
        push_optional(&mut table, "Licence", self.service_licence.as_deref(), color::GREEN);
        push_optional(&mut table, "Message", self.msg.as_deref(), color::WHITE);
        table
    }
}

impl Render for PingStat {
    fn table(&self) -> Table {
        let mut table = new_table();
        let host = if self.host.is_empty() { &self.ip } else { &self.host };
        push_field(&mut table, "Host", host, color::BRIGHT_BLUE);
        push_field(&mut table, "IP", &self.ip, color::BLUE);
        push_optional(&mut table, "Location", self.location.as_deref(), color::GREEN);

        let level = LatencyLevel::from_ms(self.avg);
        push_field(&mut table, "Min", &format!("{:.2} ms", self.min), color::BRIGHT_WHITE);
        push_field(
            &mut table,
            "Avg",
            &format!("{:.2} ms ({})", self.avg, level.label()),
            level.color(),
        );
        push_field(&mut table, "Max", &format!("{:.2} ms", self.max), color::BRIGHT_WHITE);
        table
    }
}

impl Render for DnsRecordSet {
    fn table(&self) -> Table {
        let mut table = new_table();
        table.set_titles(Row::new(vec![
            title_cell("#"),
            title_cell("Type"),
            title_cell("Value"),
        ]));

        for (index, record) in self.records.iter().enumerate() {
            table.add_row(Row::new(vec![
                value_cell(&(index + 1).to_string(), color::WHITE),
                value_cell(&record.record_type, color::BRIGHT_CYAN),
                value_cell(&record.value_text(), color::GREEN),
            ]));
        }

        if self.records.is_empty() {
            let note = self.error.as_deref().unwrap_or("No records found");
            table.add_row(Row::new(vec![
                Cell::new(""),
                value_cell(self.record_type.as_deref().unwrap_or(""), color::BRIGHT_CYAN),
                value_cell(note, color::YELLOW),
            ]));
        }
        table
    }
}

impl Render for UrlStatus {
    fn table(&self) -> Table {
        let mut table = new_table();
        let class = UrlStatusClass::from_status(self.status);
        push_field(&mut table, "URL", &self.url, color::BRIGHT_BLUE);
        push_field(
            &mut table,
            "Status",
            &format!("{} {}", self.status, class.label()),
            class.color(),
        );
        push_field(&mut table, "Detail", class.description(), class.color());
        table
    }
}

impl Render for PortScanResult {
    fn table(&self) -> Table {
        let mut table = new_table();
        push_field(&mut table, "IP", &self.ip, color::BRIGHT_BLUE);
        push_field(
            &mut table,
            "Port",
            &format!("{} ({})", self.port, self.protocol.as_str().to_uppercase()),
            color::CYAN,
        );
        let status = self.port_status;
        push_field(&mut table, "Status", status.label(), status.color());
        push_field(&mut table, "Detail", status.description(), status.color());
        table
    }
}

impl Render for WechatBlockResult {
    fn table(&self) -> Table {
        let mut table = new_table();
        let verdict = WechatVerdict::classify(&self.status_type, &self.title);
        push_field(&mut table, "Domain", &self.domain, color::BRIGHT_BLUE);
        push_field(&mut table, "Verdict", verdict.label(), verdict.color());
        push_field(
            &mut table,
            "Safe",
            if verdict.is_safe() { "Yes" } else { "No" },
            verdict.color(),
        );
        push_field(&mut table, "Title", &self.title, color::WHITE);
        push_field(&mut table, "Type", &self.status_type, color::WHITE);
        table
    }
}

impl Render for HealthReport {
    fn table(&self) -> Table {
        let mut table = new_table();
        let fg = match self.status {
            HealthStatus::Online => color::GREEN,
            HealthStatus::Degraded => color::YELLOW,
            HealthStatus::Offline => color::RED,
        };
        push_field(&mut table, "Service", self.status.label(), fg);
        push_field(
            &mut table,
            "Response Time",
            &format!("{}ms", self.response_time.as_millis()),
            color::BRIGHT_WHITE,
        );
        table
    }
}

/// 错误面板: 错误信息加可能原因
pub fn error_table(error: &QueryError, causes: &[&str]) -> Table {
    let mut table = new_table();
    push_field(&mut table, "Error", &error.kind().to_string(), color::RED);
    push_field(&mut table, "Message", error.message(), color::RED);
    if let QueryError::Api {
        status, code: Some(code), ..
    } = error
    {
        push_field(&mut table, "Code", &format!("{code} (HTTP {status})"), color::RED);
    }
    if !causes.is_empty() {
        let list = causes
            .iter()
            .map(|cause| format!("• {cause}"))
            .collect::<Vec<_>>()
            .join("\n");
        push_field(&mut table, "Likely Causes", &list, color::YELLOW);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::record::{DnsRecord, IpBase};
    use serde_json::Map;

    #[test]
    fn ping_table_shows_all_three_values() {
        let stat = PingStat {
            host: "example.com".into(),
            ip: "93.184.216.34".into(),
            location: None,
            min: 10.0,
            avg: 25.0,
            max: 60.0,
        };
        let rendered = stat.table().to_string();
        assert!(rendered.contains("10.00 ms"));
        assert!(rendered.contains("25.00 ms (优秀)"));
        assert!(rendered.contains("60.00 ms"));
        assert!(!rendered.contains("Location"));
    }

    #[test]
    fn empty_dns_set_says_so() {
        let set = DnsRecordSet {
            domain: "example.com".into(),
            record_type: Some("TXT".into()),
            error: None,
            records: vec![],
        };
        assert!(set.table().to_string().contains("No records found"));

        let set = DnsRecordSet {
            records: vec![DnsRecord {
                record_type: "TXT".into(),
                fields: Map::from_iter([("value".to_string(), "v=spf1 -all".into())]),
            }],
            ..set
        };
        assert!(set.table().to_string().contains("v=spf1 -all"));
    }

    #[test]
    fn standard_ip_hides_commercial_rows() {
        let record = IpRecord::Standard(IpBase {
            ip: "1.1.1.1".into(),
            region: "Australia".into(),
            asn: Some("AS13335".into()),
            ..IpBase::default()
        });
        let rendered = record.table().to_string();
        assert!(rendered.contains("13335"));
        assert!(!rendered.contains("Time Zone"));
    }

    #[test]
    fn error_panel_lists_causes() {
        let rendered = error_table(
            &QueryError::validation("Please enter a domain"),
            &["The domain does not exist"],
        )
        .to_string();
        assert!(rendered.contains("VALIDATION_ERROR"));
        assert!(rendered.contains("Please enter a domain"));
        assert!(rendered.contains("• The domain does not exist"));
    }
}
