use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, value_parser};

use crate::config::default::{
    CERTBOT_BIN, DEFAULT_CLIENT_MAX_BODY_SIZE, DEFAULT_EXTERNAL_PORT, DEFAULT_HSTS_MAX_AGE,
    LETSENCRYPT_LIVE_DIR, LETSENCRYPT_OPTIONS_SSL, LETSENCRYPT_SSL_DHPARAM, NGINX_BIN,
    NGINX_CONF_DIR, SYSTEMCTL_BIN,
};

/// nrp - NGINX reverse proxy manager
#[derive(Parser, Debug)]
#[command(author, version, about = "nrp - NGINX reverse proxy manager with LetsEncrypt certificates", long_about = None)]
pub struct Cli {
    /// Global log level
    #[arg(long, global = true, default_value = "info")]
    pub log_level: LogLevel,

    /// Log to file (in addition to stderr)
    #[arg(long, global = true, action = ArgAction::SetTrue, default_value_t = false)]
    pub log_file: bool,

    /// Log file path (default: /var/log/nrp.log)
    #[arg(long, global = true, value_name = "FILE", value_parser = value_parser!(PathBuf))]
    pub log_file_path: Option<PathBuf>,

    /// Suppress non-error logs
    #[arg(long, global = true, action = ArgAction::SetTrue, default_value_t = false)]
    pub quiet: bool,

    /// NGINX virtual-host configuration directory
    #[arg(long, global = true, env = "NRP_CONF_DIR", value_name = "DIR", default_value = NGINX_CONF_DIR)]
    pub conf_dir: PathBuf,

    /// LetsEncrypt live certificate directory
    #[arg(long, global = true, env = "NRP_LIVE_DIR", value_name = "DIR", default_value = LETSENCRYPT_LIVE_DIR)]
    pub live_dir: PathBuf,

    /// TLS options file included by every HTTPS server
    #[arg(long, global = true, env = "NRP_SSL_OPTIONS", value_name = "FILE", default_value = LETSENCRYPT_OPTIONS_SSL)]
    pub ssl_options: PathBuf,

    /// DH parameters file
    #[arg(long, global = true, env = "NRP_SSL_DHPARAM", value_name = "FILE", default_value = LETSENCRYPT_SSL_DHPARAM)]
    pub ssl_dhparam: PathBuf,

    /// Directory with replacement configuration templates
    #[arg(long, global = true, env = "NRP_TEMPLATE_DIR", value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// nginx binary
    #[arg(long, global = true, env = "NRP_NGINX_BIN", default_value = NGINX_BIN, hide = true)]
    pub nginx_bin: String,

    /// certbot binary
    #[arg(long, global = true, env = "NRP_CERTBOT_BIN", default_value = CERTBOT_BIN, hide = true)]
    pub certbot_bin: String,

    /// systemctl binary
    #[arg(long, global = true, env = "NRP_SYSTEMCTL_BIN", default_value = SYSTEMCTL_BIN, hide = true)]
    pub systemctl_bin: String,

    /// Subcommands
    #[command(subcommand)]
    pub command: Command,
}

/// Log level
#[derive(Copy, Clone, Debug, ValueEnum, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    pub fn to_level_filter(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a proxy host with a LetsEncrypt certificate
    #[command(after_help = "Examples:\n  nrp add example.com -i 192.168.1.10 -p 8080\n  nrp add test.example.com -i 192.168.1.20 -p 3000 -e 8443 -s https -w\n  nrp add   (interactive)")]
    Add(AddArgs),

    /// Remove a proxy host
    Remove(RemoveArgs),

    /// Show all configured proxy hosts
    List(ListArgs),

    /// Show NGINX and certificate status
    Status(StatusArgs),

    /// Certificate maintenance
    #[command(subcommand)]
    Cert(CertCommand),
}

/// Add arguments
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Fully qualified domain name (prompted when omitted)
    pub fqdn: Option<String>,

    /// Internal IP address of the upstream server
    #[arg(short = 'i', long)]
    pub internal_ip: Option<String>,

    /// Internal port of the upstream server
    #[arg(short = 'p', long)]
    pub internal_port: Option<i64>,

    /// External port
    #[arg(short = 'e', long, default_value_t = i64::from(DEFAULT_EXTERNAL_PORT))]
    pub external_port: i64,

    /// Forward scheme (http or https)
    #[arg(short = 's', long, default_value = "http")]
    pub protocol: String,

    /// Enable websocket headers
    #[arg(short = 'w', long, action = ArgAction::SetTrue, default_value_t = false)]
    pub websockets: bool,

    /// Email for LetsEncrypt notifications
    #[arg(long)]
    pub email: Option<String>,

    /// Overwrite an existing configuration without asking
    #[arg(short = 'o', long, action = ArgAction::SetTrue, default_value_t = false)]
    pub overwrite: bool,

    /// Maximum request body size
    #[arg(long, default_value = DEFAULT_CLIENT_MAX_BODY_SIZE)]
    pub client_max_body_size: String,

    /// HSTS max-age in seconds
    #[arg(long, default_value_t = DEFAULT_HSTS_MAX_AGE)]
    pub hsts_max_age: u64,
}

/// Remove arguments
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Fully qualified domain name
    pub fqdn: String,

    /// Keep the certificate
    #[arg(long, action = ArgAction::SetTrue, default_value_t = false)]
    pub keep_cert: bool,

    /// Do not ask for confirmation
    #[arg(short = 'y', long, action = ArgAction::SetTrue, default_value_t = false)]
    pub yes: bool,
}

/// List arguments
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print JSON instead of a tree
    #[arg(long, action = ArgAction::SetTrue, default_value_t = false)]
    pub json: bool,
}

/// Status arguments
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Include host and certificate names
    #[arg(short = 'd', long, action = ArgAction::SetTrue, default_value_t = false)]
    pub detailed: bool,

    /// Print JSON instead of a tree
    #[arg(long, action = ArgAction::SetTrue, default_value_t = false)]
    pub json: bool,
}

/// Certificate subcommands
#[derive(Subcommand, Debug)]
pub enum CertCommand {
    /// List certificates known to certbot
    List,

    /// Renew all certificates that are due
    Renew,

    /// Revoke the certificate of a domain
    Revoke(RevokeArgs),
}

#[derive(Args, Debug)]
pub struct RevokeArgs {
    /// Certificate name (the FQDN it was issued for)
    pub fqdn: String,

    /// Do not ask for confirmation
    #[arg(short = 'y', long, action = ArgAction::SetTrue, default_value_t = false)]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_defaults() {
        let cli = Cli::try_parse_from(["nrp", "add", "example.com", "-i", "192.168.1.10", "-p", "8080"]).unwrap();
        match cli.command {
            Command::Add(args) => {
                assert_eq!(args.fqdn.as_deref(), Some("example.com"));
                assert_eq!(args.internal_port, Some(8080));
                assert_eq!(args.external_port, 443);
                assert_eq!(args.protocol, "http");
                assert!(!args.websockets);
                assert!(!args.overwrite);
                assert_eq!(args.client_max_body_size, "100M");
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.conf_dir, PathBuf::from("/etc/nginx/conf.d"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["nrp", "remove", "a.example.com", "--keep-cert", "-y", "--conf-dir", "/tmp/conf"]).unwrap();
        assert_eq!(cli.conf_dir, PathBuf::from("/tmp/conf"));
        assert_eq!(cli.systemctl_bin, "systemctl");
        match cli.command {
            Command::Remove(args) => {
                assert!(args.keep_cert);
                assert!(args.yes);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn binaries_can_be_overridden() {
        let cli = Cli::try_parse_from([
            "nrp", "status", "--systemctl-bin", "/usr/bin/fake-systemctl", "--nginx-bin", "/opt/nginx/sbin/nginx",
        ])
        .unwrap();
        let settings = crate::config::Settings::from_cli(&cli);
        assert_eq!(settings.systemctl_bin, "/usr/bin/fake-systemctl");
        assert_eq!(settings.nginx_bin, "/opt/nginx/sbin/nginx");
        assert_eq!(settings.certbot_bin, "certbot");
    }
}
