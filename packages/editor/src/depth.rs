use protoedit_parser::Declaration;

/// Number of containers enclosing `target` within the tree rooted at `root`.
///
/// The file root does not count, so a top-level message has depth 0 and the
/// fields inside it sit at depth 1. Returns `None` if `target` is not a node
/// of this tree.
pub fn nesting_depth(root: &Declaration, target: &Declaration) -> Option<usize> {
    root.find_first_with_depth(|decl| std::ptr::eq(decl, target))
        .map(|(_, depth)| depth)
}
