use termtree::Tree;

use crate::output::tree_label;

/// Print certificate names in a tree structure.
pub fn print_certificate_tree(names: &[String]) {
    let mut root = Tree::new(tree_label(format!("Certificates ({})", names.len())));
    for name in names {
        root.push(Tree::new(name.clone()));
    }
    println!("{}", root);
}
