pub mod default;

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use default::*;

/// Default log file, used with `--log-file` when no path is given
pub const DEFAULT_LOG_FILE: &str = "/var/log/nrp.log";

/// Filesystem locations and external binaries used by one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub conf_dir: PathBuf,
    pub live_dir: PathBuf,
    pub ssl_options: PathBuf,
    pub ssl_dhparam: PathBuf,
    /// Replaces the embedded templates when set
    pub template_dir: Option<PathBuf>,
    pub nginx_bin: String,
    pub certbot_bin: String,
    pub systemctl_bin: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            conf_dir: PathBuf::from(NGINX_CONF_DIR),
            live_dir: PathBuf::from(LETSENCRYPT_LIVE_DIR),
            ssl_options: PathBuf::from(LETSENCRYPT_OPTIONS_SSL),
            ssl_dhparam: PathBuf::from(LETSENCRYPT_SSL_DHPARAM),
            template_dir: None,
            nginx_bin: NGINX_BIN.to_owned(),
            certbot_bin: CERTBOT_BIN.to_owned(),
            systemctl_bin: SYSTEMCTL_BIN.to_owned(),
        }
    }
}

impl Settings {
    /// Build settings from the global command-line flags.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            conf_dir: cli.conf_dir.clone(),
            live_dir: cli.live_dir.clone(),
            ssl_options: cli.ssl_options.clone(),
            ssl_dhparam: cli.ssl_dhparam.clone(),
            template_dir: cli.template_dir.clone(),
            nginx_bin: cli.nginx_bin.clone(),
            certbot_bin: cli.certbot_bin.clone(),
            systemctl_bin: cli.systemctl_bin.clone(),
        }
    }

    /// Settings rooted in a scratch directory instead of /etc.
    #[cfg(test)]
    pub fn with_conf_dir(conf_dir: impl Into<PathBuf>) -> Self {
        Self {
            conf_dir: conf_dir.into(),
            ..Self::default()
        }
    }

    /// `{conf_dir}/{fqdn}.conf`
    pub fn config_path(&self, fqdn: &str) -> PathBuf {
        self.conf_dir.join(format!("{}{}", fqdn, CONFIG_FILE_SUFFIX))
    }

    /// `{live_dir}/{fqdn}`
    pub fn certificate_dir(&self, fqdn: &str) -> PathBuf {
        self.live_dir.join(fqdn)
    }

    pub fn fullchain_path(&self, fqdn: &str) -> PathBuf {
        self.certificate_dir(fqdn).join(CERT_FULLCHAIN_FILE)
    }

    pub fn privkey_path(&self, fqdn: &str) -> PathBuf {
        self.certificate_dir(fqdn).join(CERT_PRIVKEY_FILE)
    }

    pub fn conf_dir(&self) -> &Path {
        &self.conf_dir
    }
}
