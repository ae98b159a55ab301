use anyhow::Result;

use crate::cli::StatusArgs;
use crate::config::Settings;
use crate::output::status::StatusReport;

use super::common;

/// Show NGINX service state, configuration validity and managed hosts.
pub fn run(settings: &Settings, args: StatusArgs) -> Result<()> {
    let nginx = common::nginx(settings)?;

    let hosts = nginx.list_configs();
    let report = StatusReport {
        service_active: nginx.is_active(),
        config_valid: nginx.test(),
        host_count: hosts.len(),
        hosts: args.detailed.then_some(hosts),
        certificates: args
            .detailed
            .then(|| common::certbot(settings).list()),
    };

    if args.json {
        return crate::output::print_json(&report);
    }
    crate::output::status::print_status_tree(&report);
    Ok(())
}
