pub mod cert;
pub mod host;
pub mod progress;
pub mod status;

use anyhow::Result;
use serde::Serialize;

/// Convert a string into a tree label.
fn tree_label<S: Into<String>>(s: S) -> String {
    s.into()
}

/// Print any serializable value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(data: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}
