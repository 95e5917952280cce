//! Treeviz formatter for AST nodes

use crate::spl::ast::{AstNode, Node, Program};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// One line per node, children indented under box-drawing connectors
pub fn to_treeviz_str(program: &Program) -> String {
    let mut result = String::new();
    append_children(&mut result, &Node::Program(program).children(), "");
    result
}

fn append_node(result: &mut String, node: Node<'_>, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    let display_label = truncate(&node.display_label(), 40);

    result.push_str(&format!(
        "{}{} {}: {} (line {})\n",
        prefix,
        connector,
        node.node_type(),
        display_label,
        node.line()
    ));

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    append_children(result, &node.children(), &new_prefix);
}

fn append_children(result: &mut String, children: &[Node<'_>], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_node(result, *child, prefix, is_last);
    }
}
