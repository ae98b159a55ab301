/// Directory holding one virtual-host configuration per FQDN
pub const NGINX_CONF_DIR: &str = "/etc/nginx/conf.d";
/// LetsEncrypt live certificate directory
pub const LETSENCRYPT_LIVE_DIR: &str = "/etc/letsencrypt/live";
/// TLS options shipped by certbot's nginx plugin
pub const LETSENCRYPT_OPTIONS_SSL: &str = "/etc/letsencrypt/options-ssl-nginx.conf";
/// DH parameters shipped by certbot
pub const LETSENCRYPT_SSL_DHPARAM: &str = "/etc/letsencrypt/ssl-dhparams.pem";

/// Suffix of managed configuration files
pub const CONFIG_FILE_SUFFIX: &str = ".conf";
/// Reserved catch-all server, never listed as a managed host
pub const CATCH_ALL_CONFIG: &str = "catch-all.conf";

pub const CERT_FULLCHAIN_FILE: &str = "fullchain.pem";
pub const CERT_PRIVKEY_FILE: &str = "privkey.pem";

/// Default web server control binary
pub const NGINX_BIN: &str = "nginx";
/// Default certificate client binary
pub const CERTBOT_BIN: &str = "certbot";
/// Default service manager binary
pub const SYSTEMCTL_BIN: &str = "systemctl";

pub const DEFAULT_EXTERNAL_PORT: u16 = 443;
pub const DEFAULT_INTERNAL_PORT: u16 = 8080;
pub const DEFAULT_CLIENT_MAX_BODY_SIZE: &str = "100M";
/// One year in seconds
pub const DEFAULT_HSTS_MAX_AGE: u64 = 31_536_000;
