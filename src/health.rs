// 服务健康指示器, 与各功能页面的请求互不影响
use crate::gateway::GatewayClient;
use log::{debug, warn};
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub const PROBE_PATH: &str = "/network/myip";
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
pub const PROBE_INTERVAL: Duration = Duration::from_secs(30);
pub const DEGRADED_AFTER: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Online,
    Degraded,
    Offline,
}

impl HealthStatus {
    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Online => "Online",
            HealthStatus::Degraded => "Degraded",
            HealthStatus::Offline => "Offline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub response_time: Duration,
}

pub async fn probe(gateway: &GatewayClient) -> HealthReport {
    probe_with(gateway, PROBE_TIMEOUT, DEGRADED_AFTER).await
}

async fn probe_with(gateway: &GatewayClient, timeout: Duration, degraded_after: Duration) -> HealthReport {
    let time_start = Instant::now();
    let result = gateway.check(PROBE_PATH, timeout).await;
    let elapsed = time_start.elapsed();

    // 只有 200 且足够快才算在线, 其余 2xx 视为降级
    match result {
        Ok(status) if status == StatusCode::OK && elapsed < degraded_after => HealthReport {
            status: HealthStatus::Online,
            response_time: elapsed,
        },
        Ok(_) => HealthReport {
            status: HealthStatus::Degraded,
            response_time: elapsed,
        },
        Err(e) => {
            warn!("Health probe failed: {e}");
            HealthReport {
                status: if e.is_timeout() {
                    HealthStatus::Degraded
                } else {
                    HealthStatus::Offline
                },
                response_time: Duration::ZERO,
            }
        }
    }
}

/// Re-runs the probe on a fixed interval until dropped.
pub struct HealthMonitor {
    handle: JoinHandle<()>,
}

impl HealthMonitor {
    pub fn start(gateway: GatewayClient, interval: Duration) -> (Self, mpsc::Receiver<HealthReport>) {
        let (tx, rx) = mpsc::channel(8);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let report = probe(&gateway).await;
                if tx.send(report).await.is_err() {
                    debug!("Health monitor receiver dropped, stopping");
                    break;
                }
            }
        });

        (Self { handle }, rx)
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
