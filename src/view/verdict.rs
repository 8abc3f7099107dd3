// 结果分级, 只用于展示
use crate::query::PortStatus;
use log::debug;
use prettytable::color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyLevel {
    Excellent,
    Good,
    Fair,
    Slow,
    VerySlow,
}

impl LatencyLevel {
    pub fn from_ms(ms: f64) -> Self {
        if ms < 50.0 {
            LatencyLevel::Excellent
        } else if ms < 100.0 {
            LatencyLevel::Good
        } else if ms < 200.0 {
            LatencyLevel::Fair
        } else if ms < 500.0 {
            LatencyLevel::Slow
        } else {
            LatencyLevel::VerySlow
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LatencyLevel::Excellent => "优秀",
            LatencyLevel::Good => "良好",
            LatencyLevel::Fair => "一般",
            LatencyLevel::Slow => "较慢",
            LatencyLevel::VerySlow => "很慢",
        }
    }

    pub fn color(self) -> color::Color {
        match self {
            LatencyLevel::Excellent => color::GREEN,
            LatencyLevel::Good => color::BRIGHT_GREEN,
            LatencyLevel::Fair => color::YELLOW,
            LatencyLevel::Slow => color::BRIGHT_RED,
            LatencyLevel::VerySlow => color::RED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlStatusClass {
    Success,
    Redirect,
    ClientError,
    ServerError,
    Unknown,
}

impl UrlStatusClass {
    pub fn from_status(status: u16) -> Self {
        match status {
            200..=299 => UrlStatusClass::Success,
            300..=399 => UrlStatusClass::Redirect,
            400..=499 => UrlStatusClass::ClientError,
            500.. => UrlStatusClass::ServerError,
            _ => UrlStatusClass::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UrlStatusClass::Success => "Success",
            UrlStatusClass::Redirect => "Redirect",
            UrlStatusClass::ClientError => "Client Error",
            UrlStatusClass::ServerError => "Server Error",
            UrlStatusClass::Unknown => "Unknown",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            UrlStatusClass::Success => "Request succeeded, the service is up",
            UrlStatusClass::Redirect => "The resource has been redirected",
            UrlStatusClass::ClientError => "Bad request or the resource does not exist",
            UrlStatusClass::ServerError => "The server hit an internal error",
            UrlStatusClass::Unknown => "Unknown status",
        }
    }

    pub fn color(self) -> color::Color {
        match self {
            UrlStatusClass::Success => color::GREEN,
            UrlStatusClass::Redirect => color::BLUE,
            UrlStatusClass::ClientError => color::YELLOW,
            UrlStatusClass::ServerError => color::RED,
            UrlStatusClass::Unknown => color::WHITE,
        }
    }
}

impl PortStatus {
    pub fn label(self) -> &'static str {
        match self {
            PortStatus::Open => "Open",
            PortStatus::Closed => "Closed",
            PortStatus::Timeout => "Timeout",
            PortStatus::Unknown => "Unknown",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PortStatus::Open => "Port is open, the service is reachable",
            PortStatus::Closed => "Port is closed, nothing is listening",
            PortStatus::Timeout => "Connection timed out, possibly filtered by a firewall",
            PortStatus::Unknown => "Unknown status",
        }
    }

    pub fn color(self) -> color::Color {
        match self {
            PortStatus::Open => color::GREEN,
            PortStatus::Closed => color::RED,
            PortStatus::Timeout => color::YELLOW,
            PortStatus::Unknown => color::WHITE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WechatVerdict {
    Normal,
    Risky,
    Blocked,
    Unknown,
}

impl WechatVerdict {
    /// `type` is authoritative when it is a known code; the title is only
    /// matched when it is not.
    pub fn classify(status_type: &str, title: &str) -> Self {
        if status_type.trim() == "1" {
            return WechatVerdict::Normal;
        }

        debug!("WeChat type {status_type:?} not recognised, matching title {title:?}");
        let title = title.to_lowercase();
        let contains_any = |words: &[&str]| words.iter().any(|w| title.contains(w));

        if contains_any(&["正常", "可以访问"]) {
            WechatVerdict::Normal
        } else if contains_any(&["警告", "风险"]) {
            WechatVerdict::Risky
        } else if contains_any(&["封禁", "拦截", "已停止访问"]) {
            WechatVerdict::Blocked
        } else {
            WechatVerdict::Unknown
        }
    }

    pub fn is_safe(self) -> bool {
        self == WechatVerdict::Normal
    }

    pub fn label(self) -> &'static str {
        match self {
            WechatVerdict::Normal => "Accessible",
            WechatVerdict::Risky => "At Risk",
            WechatVerdict::Blocked => "Blocked",
            WechatVerdict::Unknown => "Unknown",
        }
    }

    pub fn color(self) -> color::Color {
        match self {
            WechatVerdict::Normal => color::GREEN,
            WechatVerdict::Risky => color::YELLOW,
            WechatVerdict::Blocked => color::RED,
            WechatVerdict::Unknown => color::WHITE,
        }
    }
}
