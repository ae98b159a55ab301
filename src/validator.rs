use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

use crate::config::default::CONFIG_FILE_SUFFIX;

const FQDN_PATTERN: &str =
    r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$";
const IPV4_PATTERN: &str = r"^(?:[0-9]{1,3}\.){3}[0-9]{1,3}$";

static FQDN_RE: OnceLock<Option<Regex>> = OnceLock::new();
static IPV4_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn regex_match(cell: &'static OnceLock<Option<Regex>>, pattern: &str, value: &str) -> bool {
    cell.get_or_init(|| Regex::new(pattern).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}

/// Check that `name` is a dotted hostname whose last label is alphabetic.
pub fn validate_fqdn(name: &str) -> bool {
    regex_match(&FQDN_RE, FQDN_PATTERN, name)
}

/// Check that `addr` is a dotted-quad IPv4 address.
pub fn validate_ip(addr: &str) -> bool {
    if !regex_match(&IPV4_RE, IPV4_PATTERN, addr) {
        return false;
    }
    addr.split('.')
        .all(|octet| octet.parse::<u16>().is_ok_and(|n| n <= 255))
}

/// Check that `port` is within 1-65535.
pub fn validate_port(port: i64) -> bool {
    (1..=65535).contains(&port)
}

/// Check the forward scheme, case-insensitive.
pub fn validate_protocol(protocol: &str) -> bool {
    matches!(protocol.to_lowercase().as_str(), "http" | "https")
}

/// Check whether a configuration file for `fqdn` exists under `conf_dir`.
pub fn validate_config_exists(fqdn: &str, conf_dir: &Path) -> bool {
    conf_dir
        .join(format!("{}{}", fqdn, CONFIG_FILE_SUFFIX))
        .is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fqdn_accepts_dotted_names() {
        assert!(validate_fqdn("example.com"));
        assert!(validate_fqdn("sub.example.com"));
        assert!(validate_fqdn("api.test.example.com"));
        assert!(validate_fqdn("my-host.example.org"));
    }

    #[test]
    fn fqdn_rejects_malformed_names() {
        assert!(!validate_fqdn("example"));
        assert!(!validate_fqdn("example."));
        assert!(!validate_fqdn(""));
        assert!(!validate_fqdn("192.168.1.1"));
        assert!(!validate_fqdn("-bad.example.com"));
        assert!(!validate_fqdn("bad-.example.com"));
        assert!(!validate_fqdn("example.c"));
    }

    #[test]
    fn fqdn_label_length_limit() {
        let ok = format!("{}.com", "a".repeat(63));
        let too_long = format!("{}.com", "a".repeat(64));
        assert!(validate_fqdn(&ok));
        assert!(!validate_fqdn(&too_long));
    }

    #[test]
    fn ip_accepts_ipv4() {
        assert!(validate_ip("192.168.1.1"));
        assert!(validate_ip("10.0.0.1"));
        assert!(validate_ip("0.0.0.0"));
        assert!(validate_ip("255.255.255.255"));
    }

    #[test]
    fn ip_rejects_invalid() {
        assert!(!validate_ip("256.1.1.1"));
        assert!(!validate_ip("192.168.1"));
        assert!(!validate_ip("192.168.1.1.1"));
        assert!(!validate_ip(""));
        assert!(!validate_ip("example.com"));
        assert!(!validate_ip("::1"));
    }

    #[test]
    fn port_range() {
        assert!(validate_port(1));
        assert!(validate_port(443));
        assert!(validate_port(65535));
        assert!(!validate_port(0));
        assert!(!validate_port(65536));
        assert!(!validate_port(-1));
    }

    #[test]
    fn protocol_is_case_insensitive() {
        for p in ["http", "https", "HTTP", "HTTPS"] {
            assert!(validate_protocol(p), "{p}");
        }
        for p in ["ftp", "", "http://"] {
            assert!(!validate_protocol(p), "{p}");
        }
    }

    #[test]
    fn config_exists_checks_conf_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!validate_config_exists("a.example.com", dir.path()));
        std::fs::write(dir.path().join("a.example.com.conf"), "").unwrap();
        assert!(validate_config_exists("a.example.com", dir.path()));
        assert!(!validate_config_exists("b.example.com", dir.path()));
    }
}
