mod config;
mod gateway;
mod health;
mod query;
mod utils;
mod view;

use crate::config::{Command, default_config};
use crate::gateway::GatewayClient;
use crate::gateway::error::QueryError;
use crate::health::{HealthMonitor, HealthReport, HealthStatus};
use crate::query::NetQuery;
use crate::query::script::dns::Dns;
use crate::query::script::icp::Icp;
use crate::query::script::ip_info::{IpInfo, MyIp};
use crate::query::script::ping::{Ping, PingMyIp};
use crate::query::script::port_scan::PortScan;
use crate::query::script::url_status::UrlCheck;
use crate::query::script::whois::Whois;
use crate::query::script::wx_domain::WxDomain;
use crate::utils::term::clear_screen;
use crate::view::table::{Render, error_table};
use crate::view::{Page, PageState, submit};
use clap::Parser;
use log::{error, info};
use serde::Serialize;
use std::process::ExitCode;
use std::time::Duration;

#[tokio::main]
async fn main() -> ExitCode {
    let args = default_config(config::Config::parse());
    if log::set_logger(&utils::logger::CONSOLE_LOGGER).is_ok() {
        log::set_max_level(args.log_level());
    }

    let gateway = match GatewayClient::new(args.gateway_config()) {
        Ok(gateway) => gateway,
        Err(e) => {
            // --json 会关闭日志, 错误只能走 stdout
            if args.json {
                println!("{}", error_json(&e));
            } else {
                error!("{e}");
            }
            return ExitCode::FAILURE;
        }
    };

    if !args.no_cls {
        clear_screen();
    }

    let json = args.json;
    let ok = match args.command.clone() {
        Command::Myip { source } => show(&gateway, &MyIp { source }, json).await,
        Command::Ipinfo { target, source } => {
            show(&gateway, &IpInfo { target, source }, json).await
        }
        Command::Whois { domain, format } => show(&gateway, &Whois { domain, format }, json).await,
        Command::Icp { domain } => show(&gateway, &Icp { domain }, json).await,
        Command::Ping { host } => show(&gateway, &Ping { host }, json).await,
        Command::Pingmyip => show(&gateway, &PingMyIp, json).await,
        Command::Dns {
            domain,
            record_type,
        } => {
            show(
                &gateway,
                &Dns {
                    domain,
                    record_type,
                },
                json,
            )
            .await
        }
        Command::Urlstatus { url } => show(&gateway, &UrlCheck { url }, json).await,
        Command::Portscan {
            host,
            port,
            protocol,
        } => {
            show(
                &gateway,
                &PortScan {
                    host,
                    port,
                    protocol,
                },
                json,
            )
            .await
        }
        Command::Wxdomain { domain } => show(&gateway, &WxDomain { domain }, json).await,
        Command::Health {
            watch,
            interval,
            count,
        } => {
            if watch {
                watch_health(&gateway, Duration::from_secs(interval.max(1)), count, &args).await;
                true
            } else {
                let report = health::probe(&gateway).await;
                print_output(&report, json);
                report.status != HealthStatus::Offline
            }
        }
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Runs one query through a fresh page and prints whatever state it ends in.
async fn show<Q>(gateway: &GatewayClient, query: &Q, json: bool) -> bool
where
    Q: NetQuery,
    Q::Output: Render,
{
    let mut page = Page::new();
    submit(&mut page, gateway, query).await;

    match page.state() {
        PageState::Success(output) => {
            print_output(output, json);
            true
        }
        PageState::Error(e) => {
            if json {
                println!("{}", error_json(e));
            } else {
                error_table(e, query.failure_causes()).printstd();
            }
            false
        }
        PageState::Idle | PageState::Loading => false,
    }
}

fn print_output<T: Serialize + Render>(output: &T, json: bool) {
    if json {
        print_json(output);
    } else {
        output.table().printstd();
    }
}

fn error_json(error: &QueryError) -> String {
    serde_json::to_string_pretty(error).unwrap_or_else(|_| error.to_string())
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => error!("Unable to serialize output: {e}"),
    }
}

async fn watch_health(
    gateway: &GatewayClient,
    interval: Duration,
    count: Option<u64>,
    args: &config::Config,
) {
    let (monitor, mut rx) = HealthMonitor::start(gateway.clone(), interval);
    let mut seen = 0u64;

    loop {
        let report: HealthReport = tokio::select! {
            report = rx.recv() => match report {
                Some(report) => report,
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping health monitor");
                break;
            }
        };

        if !args.no_cls {
            clear_screen();
        }
        print_output(&report, args.json);

        seen += 1;
        if count.is_some_and(|count| seen >= count) {
            break;
        }
    }

    monitor.stop();
}
