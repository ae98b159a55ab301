use anyhow::Result;

use crate::cli::RemoveArgs;
use crate::config::Settings;
use crate::validator::validate_fqdn;
use crate::workflow::{CertificateOutcome, Provisioner, RemoveReport};

use super::common;

/// Remove a proxy host after confirmation.
pub fn run(settings: &Settings, args: RemoveArgs) -> Result<()> {
    common::warn_if_unprivileged();

    if !validate_fqdn(&args.fqdn) {
        anyhow::bail!("invalid FQDN: {}", args.fqdn);
    }

    let nginx = common::nginx(settings)?;
    let certbot = common::certbot(settings);
    let provisioner = Provisioner::new(&nginx, &certbot);

    if nginx.config_exists(&args.fqdn) && !args.yes {
        let confirmed = common::confirm(&format!(
            "Do you really want to remove the proxy host {}?",
            args.fqdn
        ))?;
        if !confirmed {
            tracing::info!("Aborted.");
            return Ok(());
        }
    }

    match provisioner.remove(&args.fqdn, args.keep_cert) {
        RemoveReport::InvalidName => anyhow::bail!("invalid FQDN: {}", args.fqdn),
        RemoveReport::NotFound => Ok(()),
        RemoveReport::Removed {
            config_removed,
            reloaded,
            certificate,
        } => {
            if certificate == CertificateOutcome::DeleteFailed {
                tracing::warn!(
                    "The certificate for {} may still exist; remove it with `certbot delete --cert-name {}`",
                    args.fqdn,
                    args.fqdn
                );
            }
            if !config_removed || !reloaded {
                anyhow::bail!("proxy host {} was only partially removed", args.fqdn);
            }
            println!();
            println!("Proxy host {} removed", args.fqdn);
            Ok(())
        }
    }
}
