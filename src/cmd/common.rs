use anyhow::{Context, Result};
use inquire::Confirm;

use crate::certbot::CertbotManager;
use crate::config::Settings;
use crate::nginx::NginxManager;
use crate::process::SystemRunner;
use crate::template::Templates;

/// NGINX manager for the configured directories, driving the real binaries.
pub fn nginx(settings: &Settings) -> Result<NginxManager<SystemRunner>> {
    let templates = Templates::load(settings.template_dir.as_deref())
        .context("failed to load configuration templates")?;
    Ok(NginxManager::new(settings.clone(), templates, SystemRunner))
}

pub fn certbot(settings: &Settings) -> CertbotManager<SystemRunner> {
    CertbotManager::new(settings, SystemRunner)
}

/// Writing to /etc/nginx and talking to certbot normally needs root.
pub fn warn_if_unprivileged() {
    if !privilege::user::privileged() {
        tracing::warn!("Not running as root; writing configurations or reloading NGINX may fail");
    }
}

/// Ask a yes/no question, defaulting to no.
pub fn confirm(message: &str) -> Result<bool> {
    Confirm::new(message)
        .with_default(false)
        .prompt()
        .context("confirmation prompt failed")
}
