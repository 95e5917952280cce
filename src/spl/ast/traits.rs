//! AST traits - Common interfaces for uniform node access
//!
//! [`AstNode`] gives every node a type tag, a one-line label and its line.
//! [`Node`] is a borrowed view over any node, which is what makes a single
//! traversal possible: [`Node::children`] knows the shape of every variant and
//! [`walk`] is the only depth-first loop in the crate. The analyzer and the tree
//! printer are both built on it.

use super::node::{
    AttributeAccess, Comparison, Condition, Declaration, Expr, Literal, PolicyDef, Program,
    ResourceDef, RoleDef, UserDef,
};

/// Common interface for all AST nodes
pub trait AstNode {
    /// Variant tag, identical to the `"type"` field of the serialized form
    fn node_type(&self) -> &'static str;
    fn display_label(&self) -> String;
    fn line(&self) -> usize;
}

impl AstNode for Program {
    fn node_type(&self) -> &'static str {
        "Program"
    }

    fn display_label(&self) -> String {
        format!("{} declaration(s)", self.declarations.len())
    }

    fn line(&self) -> usize {
        self.line
    }
}

impl AstNode for RoleDef {
    fn node_type(&self) -> &'static str {
        "RoleDef"
    }

    fn display_label(&self) -> String {
        format!("ROLE {}", self.name)
    }

    fn line(&self) -> usize {
        self.line
    }
}

impl AstNode for UserDef {
    fn node_type(&self) -> &'static str {
        "UserDef"
    }

    fn display_label(&self) -> String {
        format!("USER {} (role: {})", self.name, self.role)
    }

    fn line(&self) -> usize {
        self.line
    }
}

impl AstNode for ResourceDef {
    fn node_type(&self) -> &'static str {
        "ResourceDef"
    }

    fn display_label(&self) -> String {
        format!("RESOURCE {} (path: \"{}\")", self.name, self.path)
    }

    fn line(&self) -> usize {
        self.line
    }
}

impl AstNode for PolicyDef {
    fn node_type(&self) -> &'static str {
        "PolicyDef"
    }

    fn display_label(&self) -> String {
        format!("{} ON {}", self.effect, self.resource)
    }

    fn line(&self) -> usize {
        self.line
    }
}

impl AstNode for Declaration {
    fn node_type(&self) -> &'static str {
        match self {
            Declaration::Role(d) => d.node_type(),
            Declaration::User(d) => d.node_type(),
            Declaration::Resource(d) => d.node_type(),
            Declaration::Policy(d) => d.node_type(),
        }
    }

    fn display_label(&self) -> String {
        match self {
            Declaration::Role(d) => d.display_label(),
            Declaration::User(d) => d.display_label(),
            Declaration::Resource(d) => d.display_label(),
            Declaration::Policy(d) => d.display_label(),
        }
    }

    fn line(&self) -> usize {
        Declaration::line(self)
    }
}

impl AstNode for Condition {
    fn node_type(&self) -> &'static str {
        match self {
            Condition::And { .. } => "And",
            Condition::Or { .. } => "Or",
            Condition::Comparison(c) => c.node_type(),
        }
    }

    fn display_label(&self) -> String {
        match self {
            Condition::And { .. } => "AND".to_string(),
            Condition::Or { .. } => "OR".to_string(),
            Condition::Comparison(c) => c.display_label(),
        }
    }

    fn line(&self) -> usize {
        Condition::line(self)
    }
}

impl AstNode for Comparison {
    fn node_type(&self) -> &'static str {
        "Comparison"
    }

    fn display_label(&self) -> String {
        self.op.symbol().to_string()
    }

    fn line(&self) -> usize {
        self.line
    }
}

impl AstNode for Expr {
    fn node_type(&self) -> &'static str {
        match self {
            Expr::Binary { .. } => "ArithmeticExpr",
            Expr::Unary { .. } => "UnaryExpr",
            Expr::Attribute(access) => access.node_type(),
            Expr::Literal(literal) => literal.node_type(),
        }
    }

    fn display_label(&self) -> String {
        match self {
            Expr::Binary { op, .. } => op.symbol().to_string(),
            Expr::Unary { op, .. } => op.symbol().to_string(),
            Expr::Attribute(access) => access.display_label(),
            Expr::Literal(literal) => literal.display_label(),
        }
    }

    fn line(&self) -> usize {
        Expr::line(self)
    }
}

impl AstNode for AttributeAccess {
    fn node_type(&self) -> &'static str {
        "AttributeAccess"
    }

    fn display_label(&self) -> String {
        self.to_string()
    }

    fn line(&self) -> usize {
        self.line
    }
}

impl AstNode for Literal {
    fn node_type(&self) -> &'static str {
        match self {
            Literal::Identifier { .. } => "Identifier",
            Literal::Number { .. } => "Number",
            Literal::String { .. } => "String",
            Literal::Wildcard { .. } => "Wildcard",
        }
    }

    fn display_label(&self) -> String {
        self.to_string()
    }

    fn line(&self) -> usize {
        Literal::line(self)
    }
}

/// Borrowed view of any node in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'a> {
    Program(&'a Program),
    Role(&'a RoleDef),
    User(&'a UserDef),
    Resource(&'a ResourceDef),
    Policy(&'a PolicyDef),
    /// `And` / `Or` combinators; comparisons get their own variant
    Logical(&'a Condition),
    Comparison(&'a Comparison),
    /// Binary and unary arithmetic; leaves get their own variants
    Arithmetic(&'a Expr),
    Attribute(&'a AttributeAccess),
    Literal(&'a Literal),
}

impl<'a> Node<'a> {
    pub fn from_declaration(declaration: &'a Declaration) -> Self {
        match declaration {
            Declaration::Role(d) => Node::Role(d),
            Declaration::User(d) => Node::User(d),
            Declaration::Resource(d) => Node::Resource(d),
            Declaration::Policy(d) => Node::Policy(d),
        }
    }

    pub fn from_condition(condition: &'a Condition) -> Self {
        match condition {
            Condition::Comparison(c) => Node::Comparison(c),
            _ => Node::Logical(condition),
        }
    }

    pub fn from_expr(expr: &'a Expr) -> Self {
        match expr {
            Expr::Attribute(access) => Node::Attribute(access),
            Expr::Literal(literal) => Node::Literal(literal),
            _ => Node::Arithmetic(expr),
        }
    }

    /// Direct children in source order
    pub fn children(&self) -> Vec<Node<'a>> {
        match *self {
            Node::Program(program) => program
                .declarations
                .iter()
                .map(Node::from_declaration)
                .collect(),
            Node::Role(role) => role.actions.items().iter().map(Node::Literal).collect(),
            Node::User(_) | Node::Resource(_) => Vec::new(),
            Node::Policy(policy) => {
                let mut children: Vec<Node<'a>> =
                    policy.actions.items().iter().map(Node::Literal).collect();
                if let Some(condition) = &policy.condition {
                    children.push(Node::from_condition(condition));
                }
                children
            }
            Node::Logical(condition) => match condition {
                Condition::And { left, right, .. } | Condition::Or { left, right, .. } => {
                    vec![Node::from_condition(left), Node::from_condition(right)]
                }
                Condition::Comparison(c) => vec![Node::Comparison(c)],
            },
            Node::Comparison(comparison) => vec![
                Node::from_expr(&comparison.left),
                Node::from_expr(&comparison.right),
            ],
            Node::Arithmetic(expr) => match expr {
                Expr::Binary { left, right, .. } => {
                    vec![Node::from_expr(left), Node::from_expr(right)]
                }
                Expr::Unary { operand, .. } => vec![Node::from_expr(operand)],
                Expr::Attribute(access) => vec![Node::Attribute(access)],
                Expr::Literal(literal) => vec![Node::Literal(literal)],
            },
            Node::Attribute(_) | Node::Literal(_) => Vec::new(),
        }
    }

    fn inner(&self) -> &'a dyn AstNode {
        match *self {
            Node::Program(n) => n,
            Node::Role(n) => n,
            Node::User(n) => n,
            Node::Resource(n) => n,
            Node::Policy(n) => n,
            Node::Logical(n) => n,
            Node::Comparison(n) => n,
            Node::Arithmetic(n) => n,
            Node::Attribute(n) => n,
            Node::Literal(n) => n,
        }
    }
}

impl AstNode for Node<'_> {
    fn node_type(&self) -> &'static str {
        self.inner().node_type()
    }

    fn display_label(&self) -> String {
        self.inner().display_label()
    }

    fn line(&self) -> usize {
        self.inner().line()
    }
}

/// Pre-order depth-first traversal starting at `node`
pub fn walk<'a, F>(node: Node<'a>, visit: &mut F)
where
    F: FnMut(Node<'a>),
{
    visit(node);
    for child in node.children() {
        walk(child, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spl::ast::node::{ActionSet, ArithOp, CompareOp, Effect};

    fn number(value: i64, line: usize) -> Expr {
        Expr::Literal(Literal::Number { value, line })
    }

    fn hour(line: usize) -> Expr {
        Expr::Attribute(AttributeAccess {
            object: "time".to_string(),
            attribute: "hour".to_string(),
            line,
        })
    }

    fn sample() -> Program {
        let comparison = |op, right| {
            Condition::Comparison(Comparison {
                op,
                left: hour(2),
                right,
                line: 2,
            })
        };
        let condition = Condition::and(
            comparison(CompareOp::Ge, number(9, 2)),
            comparison(
                CompareOp::Lt,
                Expr::binary(ArithOp::Add, number(10, 2), number(7, 2)),
            ),
        );
        Program::new(vec![
            Declaration::Role(RoleDef {
                name: "Admin".to_string(),
                actions: ActionSet::wildcard(1),
                line: 1,
            }),
            Declaration::Policy(PolicyDef {
                effect: Effect::Allow,
                actions: ActionSet::wildcard(2),
                resource: "DB".to_string(),
                condition: Some(condition),
                line: 2,
            }),
        ])
    }

    #[test]
    fn test_walk_visits_every_node_in_preorder() {
        let program = sample();
        let mut types = Vec::new();
        walk(Node::Program(&program), &mut |node| types.push(node.node_type()));
        assert_eq!(
            types,
            vec![
                "Program",
                "RoleDef",
                "Wildcard",
                "PolicyDef",
                "Wildcard",
                "And",
                "Comparison",
                "AttributeAccess",
                "Number",
                "Comparison",
                "AttributeAccess",
                "ArithmeticExpr",
                "Number",
                "Number",
            ]
        );
    }

    #[test]
    fn test_node_view_matches_inner_node() {
        let program = sample();
        let policy = Node::from_declaration(&program.declarations[1]);
        assert_eq!(policy.node_type(), "PolicyDef");
        assert_eq!(policy.display_label(), "ALLOW ON DB");
        assert_eq!(policy.line(), 2);
        assert_eq!(policy.children().len(), 2);
    }

    #[test]
    fn test_labels() {
        let program = sample();
        assert_eq!(program.display_label(), "2 declaration(s)");
        assert_eq!(hour(1).display_label(), "time.hour");
        assert_eq!(
            Literal::String {
                value: "/x".to_string(),
                line: 1
            }
            .display_label(),
            "\"/x\""
        );
    }
}
