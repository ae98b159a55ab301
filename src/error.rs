use std::path::{Path, PathBuf};

/// Abort points of the provisioning workflow.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("invalid FQDN: {0}")]
    InvalidFqdn(String),

    #[error("invalid IP address: {0}")]
    InvalidIp(String),

    #[error("invalid internal port: {0}")]
    InvalidPort(i64),

    #[error("invalid external port: {0}")]
    InvalidExternalPort(i64),

    #[error("invalid forward scheme: {0} (expected http or https)")]
    InvalidProtocol(String),

    #[error("configuration for {0} already exists (overwrite not confirmed)")]
    AlreadyExists(String),

    #[error("nginx reload failed after writing the temporary configuration for {fqdn}; {} was left in place and needs manual attention", .path.display())]
    TempReloadFailed { fqdn: String, path: PathBuf },

    #[error("certificate request for {fqdn} failed; {}", rollback_outcome(.leftover.as_deref()))]
    CertificateRequestFailed {
        fqdn: String,
        /// Temporary configuration that could not be removed again
        leftover: Option<PathBuf>,
    },

    #[error("nginx configuration test failed; {} was left on disk for inspection", .path.display())]
    ConfigTestFailed { path: PathBuf },

    #[error("nginx reload failed; {} is written but not active", .path.display())]
    ReloadFailed { path: PathBuf },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

impl ProvisionError {
    /// True for failures detected before anything on disk was touched.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ProvisionError::InvalidFqdn(_)
                | ProvisionError::InvalidIp(_)
                | ProvisionError::InvalidPort(_)
                | ProvisionError::InvalidExternalPort(_)
                | ProvisionError::InvalidProtocol(_)
        )
    }
}

fn rollback_outcome(leftover: Option<&Path>) -> String {
    match leftover {
        Some(path) => format!(
            "removing the temporary configuration failed, delete {} and reload nginx",
            path.display()
        ),
        None => "the temporary configuration was removed".to_owned(),
    }
}

pub type ProvisionResult<T> = Result<T, ProvisionError>;
