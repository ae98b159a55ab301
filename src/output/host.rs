use termtree::Tree;

use crate::host::HostEntry;
use crate::output::tree_label;

/// Print the configured proxy hosts in a tree structure.
pub fn print_host_tree(entries: &[HostEntry]) {
    let mut root = Tree::new(tree_label(format!("Proxy hosts ({})", entries.len())));
    for entry in entries {
        let mut node = Tree::new(entry.fqdn.clone());
        node.push(Tree::new(format!("config: {}", entry.config_path.display())));
        node.push(Tree::new(format!("certificate: {}/", entry.certificate_dir.display())));
        root.push(node);
    }
    println!("{}", root);
}
