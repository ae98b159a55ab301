use serde::Serialize;
use termtree::Tree;

use crate::output::tree_label;

/// Snapshot of the web server and its managed hosts.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub service_active: bool,
    pub config_valid: bool,
    pub host_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificates: Option<Vec<String>>,
}

fn mark(ok: bool, yes: &str, no: &str) -> String {
    if ok {
        format!("✓ {}", yes)
    } else {
        format!("✗ {}", no)
    }
}

/// Print the status report in a tree structure.
pub fn print_status_tree(report: &StatusReport) {
    let mut root = Tree::new(tree_label("NGINX reverse proxy status"));
    root.push(Tree::new(format!(
        "service: {}",
        mark(report.service_active, "active", "inactive")
    )));
    root.push(Tree::new(format!(
        "configuration: {}",
        mark(report.config_valid, "valid", "invalid")
    )));

    let mut hosts_node = Tree::new(format!("hosts: {}", report.host_count));
    if let Some(hosts) = &report.hosts {
        for host in hosts {
            hosts_node.push(Tree::new(host.clone()));
        }
    }
    root.push(hosts_node);

    if let Some(certs) = &report.certificates {
        let mut certs_node = Tree::new(format!("certificates: {}", certs.len()));
        for cert in certs {
            certs_node.push(Tree::new(cert.clone()));
        }
        root.push(certs_node);
    }
    println!("{}", root);
}
