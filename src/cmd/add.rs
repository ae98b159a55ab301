use anyhow::Result;
use inquire::validator::Validation;
use inquire::{CustomType, CustomUserError, Text};

use crate::cli::AddArgs;
use crate::config::default::DEFAULT_INTERNAL_PORT;
use crate::config::Settings;
use crate::host::HostSpec;
use crate::validator::{validate_fqdn, validate_ip, validate_port};
use crate::workflow::Provisioner;

use super::common;

/// Create a proxy host, prompting for anything not given on the command line.
pub fn run(settings: &Settings, args: AddArgs) -> Result<()> {
    common::warn_if_unprivileged();

    let fqdn = match args.fqdn {
        Some(fqdn) => fqdn,
        None => Text::new("FQDN (e.g. server.example.com):")
            .with_validator(|input: &str| {
                Ok::<_, CustomUserError>(if validate_fqdn(input) {
                    Validation::Valid
                } else {
                    Validation::Invalid("Invalid FQDN".into())
                })
            })
            .prompt()?,
    };
    if !validate_fqdn(&fqdn) {
        anyhow::bail!("invalid FQDN: {}", fqdn);
    }

    let nginx = common::nginx(settings)?;
    let certbot = common::certbot(settings);

    let mut overwrite = args.overwrite;
    if !overwrite && nginx.config_exists(&fqdn) {
        overwrite = common::confirm(&format!(
            "Configuration for {} already exists. Overwrite?",
            fqdn
        ))?;
        if !overwrite {
            tracing::info!("Aborted.");
            return Ok(());
        }
    }

    let internal_ip = match args.internal_ip {
        Some(ip) => ip,
        None => Text::new("Internal IP address:")
            .with_validator(|input: &str| {
                Ok::<_, CustomUserError>(if validate_ip(input) {
                    Validation::Valid
                } else {
                    Validation::Invalid("Invalid IPv4 address".into())
                })
            })
            .prompt()?,
    };

    let internal_port = match args.internal_port {
        Some(port) => port,
        None => CustomType::<i64>::new("Internal port:")
            .with_default(i64::from(DEFAULT_INTERNAL_PORT))
            .with_error_message("Please type a port number")
            .with_validator(|input: &i64| {
                Ok::<_, CustomUserError>(if validate_port(*input) {
                    Validation::Valid
                } else {
                    Validation::Invalid("Port must be between 1 and 65535".into())
                })
            })
            .prompt()?,
    };

    let mut spec = HostSpec::new(fqdn, internal_ip, internal_port);
    spec.external_port = args.external_port;
    spec.protocol = args.protocol;
    spec.websockets = args.websockets;
    spec.email = args.email;
    spec.client_max_body_size = args.client_max_body_size;
    spec.hsts_max_age = args.hsts_max_age;

    let path = match Provisioner::new(&nginx, &certbot).add(&spec, overwrite) {
        Ok(path) => path,
        Err(e) if e.is_input_error() => anyhow::bail!("{}; nothing was changed", e),
        Err(e) => return Err(e.into()),
    };

    println!();
    println!("Proxy host {} created", spec.fqdn);
    println!("Configuration: {}", path.display());
    println!("Certificate: {}/", settings.certificate_dir(&spec.fqdn).display());
    Ok(())
}
