use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::default::{
    DEFAULT_CLIENT_MAX_BODY_SIZE, DEFAULT_EXTERNAL_PORT, DEFAULT_HSTS_MAX_AGE,
};

/// Scheme nginx uses when forwarding to the upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ForwardScheme {
    Http,
    Https,
}

impl ForwardScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForwardScheme::Http => "http",
            ForwardScheme::Https => "https",
        }
    }
}

impl FromStr for ForwardScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(ForwardScheme::Http),
            "https" => Ok(ForwardScheme::Https),
            _ => Err(format!("unsupported scheme: {}", s)),
        }
    }
}

impl fmt::Display for ForwardScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated input for adding a proxy host.
#[derive(Debug, Clone)]
pub struct HostSpec {
    pub fqdn: String,
    pub internal_ip: String,
    pub internal_port: i64,
    pub external_port: i64,
    pub protocol: String,
    pub websockets: bool,
    /// Notification address for LetsEncrypt
    pub email: Option<String>,
    pub client_max_body_size: String,
    pub hsts_max_age: u64,
}

impl HostSpec {
    pub fn new(fqdn: impl Into<String>, internal_ip: impl Into<String>, internal_port: i64) -> Self {
        Self {
            fqdn: fqdn.into(),
            internal_ip: internal_ip.into(),
            internal_port,
            external_port: i64::from(DEFAULT_EXTERNAL_PORT),
            protocol: ForwardScheme::Http.as_str().to_owned(),
            websockets: false,
            email: None,
            client_max_body_size: DEFAULT_CLIENT_MAX_BODY_SIZE.to_owned(),
            hsts_max_age: DEFAULT_HSTS_MAX_AGE,
        }
    }
}

/// Validated parameters of the final HTTPS server block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostConfig {
    pub fqdn: String,
    pub internal_ip: String,
    pub internal_port: u16,
    pub external_port: u16,
    pub forward_scheme: ForwardScheme,
    pub websockets_enabled: bool,
    pub client_max_body_size: String,
    pub hsts_max_age: u64,
}

/// A configured host as shown by `list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostEntry {
    pub fqdn: String,
    pub config_path: PathBuf,
    pub certificate_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_scheme_parses_case_insensitive() {
        assert_eq!("HTTPS".parse::<ForwardScheme>(), Ok(ForwardScheme::Https));
        assert_eq!("http".parse::<ForwardScheme>(), Ok(ForwardScheme::Http));
        assert!("ftp".parse::<ForwardScheme>().is_err());
        assert_eq!(ForwardScheme::Https.to_string(), "https");
    }

    #[test]
    fn host_spec_defaults() {
        let spec = HostSpec::new("a.example.com", "10.0.0.5", 8080);
        assert_eq!(spec.external_port, 443);
        assert_eq!(spec.protocol, "http");
        assert_eq!(spec.client_max_body_size, "100M");
        assert_eq!(spec.hsts_max_age, 31_536_000);
        assert!(!spec.websockets);
    }
}
