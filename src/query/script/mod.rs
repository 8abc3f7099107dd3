pub mod dns;
pub mod icp;
pub mod ip_info;
pub mod ping;
pub mod port_scan;
pub mod url_status;
pub mod whois;
pub mod wx_domain;
