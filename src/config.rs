use crate::gateway::{DEFAULT_TIMEOUT_MS, Environment, GatewayConfig};
use crate::health::PROBE_INTERVAL;
use crate::query::{DataSource, DnsRecordType, Protocol, WhoisFormat};
use clap::{Parser, Subcommand};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "Net-Toolbox", version, about)]
pub struct Config {
    /// Upstream environment
    #[arg(long, value_enum, default_value_t = Environment::Prod)]
    pub env: Environment,

    /// Override the upstream base address
    #[arg(long, env = "NET_TOOLBOX_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout: u64,

    /// Json Output
    #[arg(long, default_value_t = false, global = true)]
    pub json: bool,

    /// No CLS
    #[arg(long, default_value_t = false, global = true)]
    pub no_cls: bool,

    /// No Logger Output
    #[arg(long, default_value_t = false, global = true)]
    pub no_logger: bool,

    /// Show Debug Logs
    #[arg(short, long, default_value_t = false, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show your public IP and its location
    Myip {
        /// Data source
        #[arg(long, value_enum, default_value_t = DataSource::Standard)]
        source: DataSource,
    },
    /// Look up the location of an IP address or domain
    Ipinfo {
        /// IP address or domain
        target: String,
        /// Data source
        #[arg(long, value_enum, default_value_t = DataSource::Standard)]
        source: DataSource,
    },
    /// Domain WHOIS record
    Whois {
        domain: String,
        /// Output format requested from the upstream
        #[arg(long, value_enum, default_value_t = WhoisFormat::Text)]
        format: WhoisFormat,
    },
    /// ICP registration of a domain or URL
    Icp {
        /// Domain or full URL
        domain: String,
    },
    /// Ping a host from the server
    Ping { host: String },
    /// Ping your own public IP from the server
    Pingmyip,
    /// Resolve DNS records
    Dns {
        domain: String,
        /// Record type
        #[arg(short = 't', long = "type", value_enum, default_value_t = DnsRecordType::A)]
        record_type: DnsRecordType,
    },
    /// Check the HTTP status of a URL
    Urlstatus {
        /// Full URL including http:// or https://
        url: String,
    },
    /// Check whether a port is open
    Portscan {
        host: String,
        /// Port number (1-65535)
        port: String,
        #[arg(short, long, value_enum, default_value_t = Protocol::Tcp)]
        protocol: Protocol,
    },
    /// Check whether a domain is blocked inside WeChat
    Wxdomain { domain: String },
    /// Probe the upstream service health
    Health {
        /// Keep probing on an interval
        #[arg(short, long, default_value_t = false)]
        watch: bool,
        /// Seconds between probes
        #[arg(long, default_value_t = PROBE_INTERVAL.as_secs())]
        interval: u64,
        /// Stop after this many probes (watch mode)
        #[arg(long)]
        count: Option<u64>,
    },
}

pub fn default_config(config: Config) -> Config {
    if config.json {
        Config {
            json: true,
            no_cls: true,
            no_logger: true,
            ..config
        }
    } else {
        config
    }
}

impl Config {
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            base_address: self
                .base_url
                .clone()
                .unwrap_or_else(|| self.env.base_address().to_string()),
            timeout: Duration::from_millis(self.timeout),
            ..GatewayConfig::default()
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.no_logger {
            log::LevelFilter::Off
        } else if self.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Info
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{DEV_BASE_ADDRESS, PROD_BASE_ADDRESS};

    #[test]
    fn json_implies_quiet_output() {
        let config = default_config(Config::parse_from(["net-toolbox", "--json", "pingmyip"]));
        assert!(config.no_cls);
        assert!(config.no_logger);
        assert_eq!(config.log_level(), log::LevelFilter::Off);
    }

    #[test]
    fn base_address_selection() {
        let config = Config::parse_from(["net-toolbox", "myip"]);
        assert_eq!(config.gateway_config().base_address, PROD_BASE_ADDRESS);
        assert_eq!(config.gateway_config().timeout, Duration::from_secs(30));

        let config = Config::parse_from(["net-toolbox", "--env", "dev", "myip"]);
        assert_eq!(config.gateway_config().base_address, DEV_BASE_ADDRESS);

        let config =
            Config::parse_from(["net-toolbox", "--base-url", "http://localhost:8787", "myip"]);
        assert_eq!(config.gateway_config().base_address, "http://localhost:8787");
    }

    #[test]
    fn subcommand_defaults() {
        let config = Config::parse_from(["net-toolbox", "dns", "example.com"]);
        assert!(matches!(
            config.command,
            Command::Dns {
                record_type: DnsRecordType::A,
                ..
            }
        ));

        let config = Config::parse_from(["net-toolbox", "dns", "example.com", "-t", "AAAA"]);
        assert!(matches!(
            config.command,
            Command::Dns {
                record_type: DnsRecordType::AAAA,
                ..
            }
        ));

        let config = Config::parse_from(["net-toolbox", "portscan", "example.com", "0"]);
        let Command::Portscan { port, protocol, .. } = config.command else {
            panic!("expected portscan");
        };
        // 端口原样保留, 由查询层校验
        assert_eq!(port, "0");
        assert_eq!(protocol, Protocol::Tcp);
    }
}
