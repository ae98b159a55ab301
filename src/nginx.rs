use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tera::Context;

use crate::config::default::{CATCH_ALL_CONFIG, CONFIG_FILE_SUFFIX};
use crate::config::Settings;
use crate::error::{ProvisionError, ProvisionResult};
use crate::host::{HostConfig, HostEntry};
use crate::process::{run_logged, CommandRunner};
use crate::template::{Templates, CUSTOM_PORT_TEMPLATE, STANDARD_TEMPLATE, TEMP_HTTP_TEMPLATE};

/// Virtual-host configuration files and the nginx control surface.
///
/// Each managed host is exactly one `{fqdn}.conf` file in the configuration
/// directory. Whether that file exists is the only record of the host.
pub struct NginxManager<R> {
    settings: Settings,
    templates: Templates,
    runner: R,
}

impl<R: CommandRunner> NginxManager<R> {
    pub fn new(settings: Settings, templates: Templates, runner: R) -> Self {
        Self {
            settings,
            templates,
            runner,
        }
    }

    pub fn config_path(&self, fqdn: &str) -> PathBuf {
        self.settings.config_path(fqdn)
    }

    pub fn config_exists(&self, fqdn: &str) -> bool {
        crate::validator::validate_config_exists(fqdn, self.settings.conf_dir())
    }

    /// Write the HTTP-only server block that lets certbot reach `fqdn`.
    pub fn create_temp_config(&self, fqdn: &str, external_port: u16) -> ProvisionResult<PathBuf> {
        let mut ctx = Context::new();
        ctx.insert("fqdn", fqdn);
        ctx.insert("external_port", &external_port);
        let content = self.templates.render(TEMP_HTTP_TEMPLATE, &ctx)?;
        self.write_config(fqdn, &content)
    }

    /// Write the final HTTPS proxy configuration, replacing whatever is there.
    pub fn create_config(&self, host: &HostConfig) -> ProvisionResult<PathBuf> {
        let template = if host.external_port == 443 {
            STANDARD_TEMPLATE
        } else {
            CUSTOM_PORT_TEMPLATE
        };
        let mut ctx = Context::from_serialize(host)?;
        ctx.insert("ssl_certificate", &display(&self.settings.fullchain_path(&host.fqdn)));
        ctx.insert("ssl_certificate_key", &display(&self.settings.privkey_path(&host.fqdn)));
        ctx.insert("ssl_options", &display(&self.settings.ssl_options));
        ctx.insert("ssl_dhparam", &display(&self.settings.ssl_dhparam));
        let content = self.templates.render(template, &ctx)?;
        self.write_config(&host.fqdn, &content)
    }

    fn write_config(&self, fqdn: &str, content: &str) -> ProvisionResult<PathBuf> {
        let path = self.config_path(fqdn);
        fs::write(&path, content).map_err(|source| ProvisionError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("Wrote {}", path.display());
        Ok(path)
    }

    /// Delete the configuration file for `fqdn`.
    ///
    /// Returns whether a file was actually removed.
    pub fn remove_config(&self, fqdn: &str) -> bool {
        let path = self.config_path(fqdn);
        match fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => {
                tracing::error!("Failed to remove {}: {}", path.display(), e);
                false
            }
        }
    }

    /// `nginx -t`
    pub fn test(&self) -> bool {
        run_logged(&self.runner, "NGINX configuration test", &self.settings.nginx_bin, &["-t"]).is_some()
    }

    /// `nginx -s reload`
    pub fn reload(&self) -> bool {
        run_logged(&self.runner, "NGINX reload", &self.settings.nginx_bin, &["-s", "reload"]).is_some()
    }

    /// Whether the nginx service is running according to systemd.
    pub fn is_active(&self) -> bool {
        match self.runner.run(&self.settings.systemctl_bin, &["is-active", "nginx"]) {
            Ok(output) => output.success,
            Err(e) => {
                tracing::warn!("Could not query service state: {}", e);
                false
            }
        }
    }

    /// Managed host names, sorted, without the catch-all server.
    pub fn list_configs(&self) -> Vec<String> {
        list_config_names(self.settings.conf_dir())
    }

    pub fn list_entries(&self) -> Vec<HostEntry> {
        self.list_configs()
            .into_iter()
            .map(|fqdn| HostEntry {
                config_path: self.config_path(&fqdn),
                certificate_dir: self.settings.certificate_dir(&fqdn),
                fqdn,
            })
            .collect()
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

fn list_config_names(conf_dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(conf_dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };
    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name != CATCH_ALL_CONFIG)
        .filter_map(|name| name.strip_suffix(CONFIG_FILE_SUFFIX).map(str::to_owned))
        .filter(|stem| !stem.is_empty())
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ForwardScheme;
    use crate::process::testing::ScriptedRunner;

    fn manager<'a>(dir: &Path, runner: &'a ScriptedRunner) -> NginxManager<&'a ScriptedRunner> {
        NginxManager::new(
            Settings::with_conf_dir(dir),
            Templates::embedded().unwrap(),
            runner,
        )
    }

    fn host(port: u16) -> HostConfig {
        HostConfig {
            fqdn: "app.example.com".into(),
            internal_ip: "10.0.0.7".into(),
            internal_port: 3000,
            external_port: port,
            forward_scheme: ForwardScheme::Https,
            websockets_enabled: true,
            client_max_body_size: "100M".into(),
            hsts_max_age: 31_536_000,
        }
    }

    #[test]
    fn list_configs_sorted_without_catch_all() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["zeta.example.com.conf", "catch-all.conf", "alpha.example.com.conf", "notes.txt", "mid.example.com.conf"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("dir.conf")).unwrap();
        let runner = ScriptedRunner::new();
        assert_eq!(
            manager(dir.path(), &runner).list_configs(),
            vec!["alpha.example.com", "mid.example.com", "zeta.example.com"]
        );
    }

    #[test]
    fn list_configs_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::new();
        assert!(manager(&dir.path().join("absent"), &runner).list_configs().is_empty());
    }

    #[test]
    fn temp_config_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::new();
        let nginx = manager(dir.path(), &runner);
        fs::write(dir.path().join("app.example.com.conf"), "old content").unwrap();
        let path = nginx.create_temp_config("app.example.com", 443).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert!(!content.contains("old content"));
        assert!(content.contains("server_name app.example.com;"));
    }

    #[test]
    fn standard_template_for_443() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::new();
        let nginx = manager(dir.path(), &runner);
        let path = nginx.create_config(&host(443)).unwrap();
        assert_eq!(path, dir.path().join("app.example.com.conf"));
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("listen 443 ssl;"));
        assert!(content.contains("return 301 https://$host$request_uri;"));
        assert!(content.contains("proxy_pass https://10.0.0.7:3000;"));
        assert!(content.contains("ssl_certificate /etc/letsencrypt/live/app.example.com/fullchain.pem;"));
        assert!(content.contains("ssl_certificate_key /etc/letsencrypt/live/app.example.com/privkey.pem;"));
        assert!(content.contains("include /etc/letsencrypt/options-ssl-nginx.conf;"));
        assert!(content.contains("ssl_dhparam /etc/letsencrypt/ssl-dhparams.pem;"));
        assert!(content.contains("max-age=31536000"));
        assert!(content.contains("client_max_body_size 100M;"));
        assert!(content.contains("proxy_set_header Upgrade $http_upgrade;"));
    }

    #[test]
    fn custom_port_template_otherwise() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::new();
        let nginx = manager(dir.path(), &runner);
        let mut cfg = host(8443);
        cfg.websockets_enabled = false;
        let content = fs::read_to_string(nginx.create_config(&cfg).unwrap()).unwrap();
        assert!(content.contains("listen 8443 ssl;"));
        assert!(!content.contains("listen 443 ssl;"));
        assert!(!content.contains("Upgrade"));
    }

    #[test]
    fn remove_config_reports_whether_removed() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::new();
        let nginx = manager(dir.path(), &runner);
        assert!(!nginx.remove_config("app.example.com"));
        nginx.create_temp_config("app.example.com", 443).unwrap();
        assert!(nginx.config_exists("app.example.com"));
        assert!(nginx.remove_config("app.example.com"));
        assert!(!nginx.config_exists("app.example.com"));
        assert!(!nginx.remove_config("app.example.com"));
    }

    #[test]
    fn control_commands() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::new();
        runner.fail("nginx -t", "nginx: [emerg] unexpected \"}\"");
        runner.fail("systemctl is-active", "inactive");
        let nginx = manager(dir.path(), &runner);
        assert!(!nginx.test());
        assert!(nginx.reload());
        assert!(!nginx.is_active());
        assert_eq!(
            runner.calls(),
            vec!["nginx -t", "nginx -s reload", "systemctl is-active nginx"]
        );
    }
}
