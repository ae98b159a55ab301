use anyhow::Result;

use crate::certbot::CertbotManager;
use crate::cli::{CertCommand, RevokeArgs};
use crate::config::Settings;
use crate::process::SystemRunner;
use crate::validator::validate_fqdn;

use super::common;

/// Certificate maintenance commands.
pub fn run(settings: &Settings, command: CertCommand) -> Result<()> {
    let certbot = common::certbot(settings);
    match command {
        CertCommand::List => {
            let names = certbot.list();
            if names.is_empty() {
                println!("No certificates found.");
            } else {
                crate::output::cert::print_certificate_tree(&names);
            }
            Ok(())
        }
        CertCommand::Renew => {
            common::warn_if_unprivileged();
            tracing::info!("Renewing certificates...");
            if !certbot.renew() {
                anyhow::bail!("certificate renewal failed");
            }
            tracing::info!("Certificates renewed");
            Ok(())
        }
        CertCommand::Revoke(args) => revoke(&certbot, args),
    }
}

fn revoke(certbot: &CertbotManager<SystemRunner>, args: RevokeArgs) -> Result<()> {
    common::warn_if_unprivileged();
    if !validate_fqdn(&args.fqdn) {
        anyhow::bail!("invalid FQDN: {}", args.fqdn);
    }
    if !args.yes
        && !common::confirm(&format!("Revoke the certificate for {}?", args.fqdn))?
    {
        tracing::info!("Aborted.");
        return Ok(());
    }
    if !certbot.revoke(&args.fqdn) {
        anyhow::bail!("revoking the certificate for {} failed", args.fqdn);
    }
    tracing::info!("Certificate for {} revoked", args.fqdn);
    Ok(())
}
