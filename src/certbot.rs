use crate::config::Settings;
use crate::process::{run_logged, CommandRunner};

const CERT_NAME_MARKER: &str = "Certificate Name:";

/// LetsEncrypt certificate operations through the certbot client.
///
/// Certificates are keyed by name, which is always the FQDN they were
/// requested for.
pub struct CertbotManager<R> {
    bin: String,
    runner: R,
}

impl<R: CommandRunner> CertbotManager<R> {
    pub fn new(settings: &Settings, runner: R) -> Self {
        Self {
            bin: settings.certbot_bin.clone(),
            runner,
        }
    }

    /// Request a certificate for `fqdn` through the running nginx.
    pub fn request(&self, fqdn: &str, email: Option<&str>) -> bool {
        let mut args = vec!["--nginx", "-d", fqdn, "--non-interactive"];
        match email {
            Some(email) => args.extend(["--email", email, "--agree-tos"]),
            None => args.extend(["--register-unsafely-without-email", "--agree-tos"]),
        }
        match run_logged(&self.runner, "Certificate request", &self.bin, &args) {
            Some(output) => {
                let stdout = output.stdout.trim();
                if !stdout.is_empty() {
                    tracing::info!("{}", stdout);
                }
                true
            }
            None => false,
        }
    }

    pub fn revoke(&self, fqdn: &str) -> bool {
        let args = ["revoke", "--cert-name", fqdn, "--non-interactive"];
        run_logged(&self.runner, "Certificate revocation", &self.bin, &args).is_some()
    }

    pub fn delete(&self, fqdn: &str) -> bool {
        let args = ["delete", "--cert-name", fqdn, "--non-interactive"];
        run_logged(&self.runner, "Certificate deletion", &self.bin, &args).is_some()
    }

    /// Names of all certificates known to certbot, in its output order.
    pub fn list(&self) -> Vec<String> {
        match run_logged(&self.runner, "Certificate listing", &self.bin, &["certificates"]) {
            Some(output) => parse_certificate_names(&output.stdout),
            None => Vec::new(),
        }
    }

    /// Renew every certificate that is due.
    pub fn renew(&self) -> bool {
        run_logged(&self.runner, "Certificate renewal", &self.bin, &["renew"]).is_some()
    }
}

/// Extract certificate names from `certbot certificates` output.
///
/// This scrapes human-readable text, so a change in certbot's wording breaks
/// it. Lines without the marker, or with nothing after it, are skipped.
pub fn parse_certificate_names(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.split_once(CERT_NAME_MARKER))
        .map(|(_, name)| name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::testing::ScriptedRunner;
    use crate::process::CommandOutput;

    const LISTING: &str = "\
Saving debug log to /var/log/letsencrypt/letsencrypt.log

- - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - -
Found the following certs:
  Certificate Name: b.example.com
    Serial Number: 3f1a
    Key Type: ECDSA
    Domains: b.example.com
    Expiry Date: 2026-12-01 10:00:00+00:00 (VALID: 42 days)
  Certificate Name: a.example.com
    Domains: a.example.com
  Certificate Name:
  Certificate Name: b.example.com
- - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - -
";

    #[test]
    fn parse_keeps_output_order_and_duplicates() {
        assert_eq!(
            parse_certificate_names(LISTING),
            vec!["b.example.com", "a.example.com", "b.example.com"]
        );
        assert!(parse_certificate_names("No certificates found.\n").is_empty());
    }

    #[test]
    fn request_with_email_agrees_to_terms() {
        let runner = ScriptedRunner::new();
        let certbot = CertbotManager::new(&Settings::default(), &runner);
        assert!(certbot.request("a.example.com", Some("ops@example.com")));
        assert_eq!(
            runner.calls(),
            vec!["certbot --nginx -d a.example.com --non-interactive --email ops@example.com --agree-tos"]
        );
    }

    #[test]
    fn request_without_email_registers_unsafely() {
        let runner = ScriptedRunner::new();
        let certbot = CertbotManager::new(&Settings::default(), &runner);
        assert!(certbot.request("a.example.com", None));
        assert_eq!(
            runner.calls(),
            vec!["certbot --nginx -d a.example.com --non-interactive --register-unsafely-without-email --agree-tos"]
        );
    }

    #[test]
    fn exit_status_becomes_bool() {
        let runner = ScriptedRunner::new();
        runner.fail("certbot --nginx", "challenge failed");
        runner.fail("certbot delete", "no such cert");
        runner.missing("certbot renew");
        let certbot = CertbotManager::new(&Settings::default(), &runner);
        assert!(!certbot.request("a.example.com", None));
        assert!(!certbot.delete("a.example.com"));
        assert!(!certbot.renew());
        assert!(certbot.revoke("a.example.com"));
        assert!(runner
            .calls()
            .contains(&"certbot revoke --cert-name a.example.com --non-interactive".to_owned()));
    }

    #[test]
    fn list_parses_stdout_or_returns_empty() {
        let runner = ScriptedRunner::new();
        runner.respond("certbot certificates", CommandOutput::ok(LISTING));
        let certbot = CertbotManager::new(&Settings::default(), &runner);
        assert_eq!(certbot.list().len(), 3);

        let failing = ScriptedRunner::new();
        failing.fail("certbot certificates", "boom");
        let certbot = CertbotManager::new(&Settings::default(), &failing);
        assert!(certbot.list().is_empty());
    }
}
