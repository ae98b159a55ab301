use anyhow::Result;

use crate::cli::ListArgs;
use crate::config::Settings;

use super::common;

/// Show all configured proxy hosts.
pub fn run(settings: &Settings, args: ListArgs) -> Result<()> {
    let nginx = common::nginx(settings)?;
    let entries = nginx.list_entries();

    if args.json {
        return crate::output::print_json(&entries);
    }
    if entries.is_empty() {
        println!("No proxy hosts configured.");
        return Ok(());
    }
    crate::output::host::print_host_tree(&entries);
    Ok(())
}
