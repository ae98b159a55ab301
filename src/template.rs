use std::path::Path;
use tera::{Context, Tera};

use crate::error::{ProvisionError, ProvisionResult};

/// HTTP-only server used while the certificate is being issued
pub const TEMP_HTTP_TEMPLATE: &str = "temp_http.conf";
/// HTTPS proxy listening on 443
pub const STANDARD_TEMPLATE: &str = "nginx_standard.conf";
/// HTTPS proxy listening on any other port
pub const CUSTOM_PORT_TEMPLATE: &str = "nginx_custom_port.conf";

const EMBEDDED: [(&str, &str); 3] = [
    (TEMP_HTTP_TEMPLATE, include_str!("../resources/templates/temp_http.conf")),
    (STANDARD_TEMPLATE, include_str!("../resources/templates/nginx_standard.conf")),
    (CUSTOM_PORT_TEMPLATE, include_str!("../resources/templates/nginx_custom_port.conf")),
];

/// The named nginx configuration templates.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Templates compiled into the binary.
    pub fn embedded() -> ProvisionResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(EMBEDDED.to_vec())?;
        Ok(Self { tera })
    }

    /// Templates read from `dir`, which must contain a file for every name.
    pub fn from_dir(dir: &Path) -> ProvisionResult<Self> {
        let mut sources = Vec::with_capacity(EMBEDDED.len());
        for (name, _) in EMBEDDED {
            let path = dir.join(name);
            let source = std::fs::read_to_string(&path)
                .map_err(|source| ProvisionError::Io { path, source })?;
            sources.push((name, source));
        }
        let mut tera = Tera::default();
        tera.add_raw_templates(sources)?;
        Ok(Self { tera })
    }

    /// Use `dir` when given, the embedded set otherwise.
    pub fn load(dir: Option<&Path>) -> ProvisionResult<Self> {
        match dir {
            Some(dir) => {
                tracing::debug!("Loading templates from {}", dir.display());
                Self::from_dir(dir)
            }
            None => Self::embedded(),
        }
    }

    pub fn render(&self, name: &str, context: &Context) -> ProvisionResult<String> {
        Ok(self.tera.render(name, context)?)
    }
}
