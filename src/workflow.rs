use std::path::PathBuf;

use crate::certbot::CertbotManager;
use crate::error::{ProvisionError, ProvisionResult};
use crate::host::{ForwardScheme, HostConfig, HostSpec};
use crate::nginx::NginxManager;
use crate::process::CommandRunner;
use crate::validator::{validate_fqdn, validate_ip, validate_port, validate_protocol};

/// What happened to the certificate during a remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateOutcome {
    Kept,
    Deleted,
    DeleteFailed,
}

/// Per-step outcome of removing a host. Steps do not depend on each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveReport {
    /// The name is not a valid FQDN, so it cannot be a managed host.
    InvalidName,
    NotFound,
    Removed {
        config_removed: bool,
        reloaded: bool,
        certificate: CertificateOutcome,
    },
}

/// Check every input before anything on disk is touched.
pub fn validate_host(spec: &HostSpec) -> ProvisionResult<HostConfig> {
    if !validate_fqdn(&spec.fqdn) {
        return Err(ProvisionError::InvalidFqdn(spec.fqdn.clone()));
    }
    if !validate_ip(&spec.internal_ip) {
        return Err(ProvisionError::InvalidIp(spec.internal_ip.clone()));
    }
    if !validate_port(spec.internal_port) {
        return Err(ProvisionError::InvalidPort(spec.internal_port));
    }
    if !validate_port(spec.external_port) {
        return Err(ProvisionError::InvalidExternalPort(spec.external_port));
    }
    if !validate_protocol(&spec.protocol) {
        return Err(ProvisionError::InvalidProtocol(spec.protocol.clone()));
    }
    let forward_scheme: ForwardScheme = spec
        .protocol
        .parse()
        .map_err(|_| ProvisionError::InvalidProtocol(spec.protocol.clone()))?;
    Ok(HostConfig {
        fqdn: spec.fqdn.clone(),
        internal_ip: spec.internal_ip.clone(),
        internal_port: spec.internal_port as u16,
        external_port: spec.external_port as u16,
        forward_scheme,
        websockets_enabled: spec.websockets,
        client_max_body_size: spec.client_max_body_size.clone(),
        hsts_max_age: spec.hsts_max_age,
    })
}

/// Drives the add and remove lifecycle of a proxy host.
pub struct Provisioner<'a, R> {
    nginx: &'a NginxManager<R>,
    certbot: &'a CertbotManager<R>,
}

impl<'a, R: CommandRunner> Provisioner<'a, R> {
    pub fn new(nginx: &'a NginxManager<R>, certbot: &'a CertbotManager<R>) -> Self {
        Self { nginx, certbot }
    }

    /// Provision a new HTTPS reverse proxy for `spec.fqdn`.
    ///
    /// An existing configuration is only replaced when `overwrite` is set.
    /// Rollback happens only when certificate issuance fails: the temporary
    /// configuration is removed again. Later failures leave the final
    /// configuration on disk for the operator.
    pub fn add(&self, spec: &HostSpec, overwrite: bool) -> ProvisionResult<PathBuf> {
        let host = validate_host(spec)?;
        let fqdn = host.fqdn.as_str();

        if self.nginx.config_exists(fqdn) {
            if !overwrite {
                return Err(ProvisionError::AlreadyExists(fqdn.to_owned()));
            }
            tracing::info!("Replacing existing configuration for {}", fqdn);
            if !self.nginx.remove_config(fqdn) {
                tracing::warn!("Old configuration for {} not removed; it will be overwritten", fqdn);
            }
        }

        tracing::info!("Creating proxy host for {}", fqdn);

        tracing::info!("Writing temporary HTTP configuration...");
        let path = self.nginx.create_temp_config(fqdn, host.external_port)?;
        if !self.nginx.reload() {
            return Err(ProvisionError::TempReloadFailed {
                fqdn: fqdn.to_owned(),
                path,
            });
        }

        tracing::info!("Requesting SSL certificate...");
        if !self.request_certificate(fqdn, spec.email.as_deref()) {
            let leftover = self.rollback(fqdn);
            return Err(ProvisionError::CertificateRequestFailed {
                fqdn: fqdn.to_owned(),
                leftover,
            });
        }

        tracing::info!("Writing final HTTPS configuration...");
        let path = self.nginx.create_config(&host)?;

        if !self.nginx.test() {
            return Err(ProvisionError::ConfigTestFailed { path });
        }
        if !self.nginx.reload() {
            return Err(ProvisionError::ReloadFailed { path });
        }

        tracing::info!("Proxy host {} created", fqdn);
        Ok(path)
    }

    fn request_certificate(&self, fqdn: &str, email: Option<&str>) -> bool {
        let span = tracing::info_span!("certbot");
        crate::output::progress::start_spinner(&span, &format!("Waiting for certbot ({})", fqdn));
        let _enter = span.enter();
        self.certbot.request(fqdn, email)
    }

    /// Remove the temporary configuration again. Returns its path if it is still there.
    fn rollback(&self, fqdn: &str) -> Option<PathBuf> {
        tracing::warn!("Rolling back temporary configuration for {}", fqdn);
        let path = self.nginx.config_path(fqdn);
        let leftover = if self.nginx.remove_config(fqdn) || !path.exists() {
            None
        } else {
            tracing::error!("{} is still on disk", path.display());
            Some(path)
        };
        if !self.nginx.reload() {
            tracing::warn!("Reload after rollback failed");
        }
        leftover
    }

    /// Remove the configuration for `fqdn` and, unless `keep_cert`, its certificate.
    pub fn remove(&self, fqdn: &str, keep_cert: bool) -> RemoveReport {
        if !validate_fqdn(fqdn) {
            tracing::error!("{} is not a valid FQDN", fqdn);
            return RemoveReport::InvalidName;
        }
        if !self.nginx.config_exists(fqdn) {
            tracing::warn!("Configuration for {} not found", fqdn);
            return RemoveReport::NotFound;
        }

        tracing::info!("Removing proxy host {}", fqdn);

        let config_removed = self.nginx.remove_config(fqdn);
        if config_removed {
            tracing::info!("NGINX configuration removed");
        } else {
            tracing::error!("Failed to remove NGINX configuration");
        }

        let reloaded = self.nginx.reload();
        if reloaded {
            tracing::info!("NGINX reloaded");
        } else {
            tracing::error!("Failed to reload NGINX");
        }

        let certificate = if keep_cert {
            CertificateOutcome::Kept
        } else {
            tracing::info!("Removing SSL certificate...");
            if self.certbot.delete(fqdn) {
                tracing::info!("SSL certificate removed");
                CertificateOutcome::Deleted
            } else {
                tracing::warn!("Failed to remove SSL certificate for {}", fqdn);
                CertificateOutcome::DeleteFailed
            }
        };

        RemoveReport::Removed {
            config_removed,
            reloaded,
            certificate,
        }
    }
}
