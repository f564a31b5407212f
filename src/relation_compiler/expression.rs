use std::fmt;

use super::tree_builder::RelationNode;

/// Render a relation tree as a compact relation expression.
///
/// - a leaf renders as its name (the bare root renders as `""`)
/// - a single child chains with a dot: `a.b.c`
/// - several children are bracketed in insertion order: `a.[b,c]`
///
/// The root's empty name never contributes a dot, so a root with children
/// `a` and `b` renders as `[a,b]`.
pub fn serialize(node: &RelationNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &RelationNode, out: &mut String) {
    out.push_str(&node.name);
    match node.children.as_slice() {
        [] => {}
        [only] => {
            push_separator(node, out);
            write_node(only, out);
        }
        children => {
            push_separator(node, out);
            out.push('[');
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_node(child, out);
            }
            out.push(']');
        }
    }
}

fn push_separator(node: &RelationNode, out: &mut String) {
    if !node.name.is_empty() {
        out.push('.');
    }
}

impl fmt::Display for RelationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}
