//! AST node type definitions
//!
//! The tree is a strict ownership tree: every node is owned by exactly one parent
//! and nothing is mutated after the parser builds it. Each node records the line
//! of its leftmost token.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub declarations: Vec<Declaration>,
    /// Line of the first declaration, 0 for an empty program
    pub line: usize,
}

impl Program {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        let line = declarations.first().map_or(0, Declaration::line);
        Self { declarations, line }
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn roles(&self) -> impl Iterator<Item = &RoleDef> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Role(role) => Some(role),
            _ => None,
        })
    }

    pub fn users(&self) -> impl Iterator<Item = &UserDef> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::User(user) => Some(user),
            _ => None,
        })
    }

    pub fn resources(&self) -> impl Iterator<Item = &ResourceDef> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Resource(resource) => Some(resource),
            _ => None,
        })
    }

    pub fn policies(&self) -> impl Iterator<Item = &PolicyDef> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Policy(policy) => Some(policy),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Role(RoleDef),
    User(UserDef),
    Resource(ResourceDef),
    Policy(PolicyDef),
}

impl Declaration {
    pub fn line(&self) -> usize {
        match self {
            Declaration::Role(d) => d.line,
            Declaration::User(d) => d.line,
            Declaration::Resource(d) => d.line,
            Declaration::Policy(d) => d.line,
        }
    }
}

/// `ROLE Admin {can: *}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDef {
    pub name: String,
    pub actions: ActionSet,
    pub line: usize,
}

/// `USER Alice {role: Admin}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDef {
    pub name: String,
    /// Role name, resolved by the analyzer
    pub role: String,
    pub line: usize,
}

/// `RESOURCE DB_Finance {path: "/data/financial"}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDef {
    pub name: String,
    pub path: String,
    pub line: usize,
}

/// `ALLOW action: read ON resource: DB_Finance IF (time.hour >= 9)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDef {
    pub effect: Effect,
    pub actions: ActionSet,
    /// Resource name, resolved by the analyzer
    pub resource: String,
    pub condition: Option<Condition>,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    Allow,
    Deny,
}

impl Effect {
    pub fn as_str(self) -> &'static str {
        match self {
            Effect::Allow => "ALLOW",
            Effect::Deny => "DENY",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "ALLOW" => Some(Effect::Allow),
            "DENY" => Some(Effect::Deny),
            _ => None,
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The actions a role grants or a policy covers.
///
/// Either exactly one [`Literal::Wildcard`], or a non-empty list of identifier and
/// string literals. The constructors refuse anything else, so an `ActionSet` in a
/// tree is always valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSet {
    items: Vec<Literal>,
}

impl ActionSet {
    pub fn wildcard(line: usize) -> Self {
        Self {
            items: vec![Literal::Wildcard { line }],
        }
    }

    /// Explicit action names. `None` when empty or when an item is not a name.
    pub fn named(items: Vec<Literal>) -> Option<Self> {
        let valid = !items.is_empty()
            && items
                .iter()
                .all(|item| matches!(item, Literal::Identifier { .. } | Literal::String { .. }));
        valid.then_some(Self { items })
    }

    /// Accepts either valid shape
    pub fn from_literals(items: Vec<Literal>) -> Option<Self> {
        match items.as_slice() {
            [Literal::Wildcard { .. }] => Some(Self { items }),
            _ => Self::named(items),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.items.as_slice(), [Literal::Wildcard { .. }])
    }

    pub fn items(&self) -> &[Literal] {
        &self.items
    }

    /// Action names in source order; `["*"]` for the wildcard
    pub fn names(&self) -> Vec<&str> {
        self.items
            .iter()
            .map(|item| match item {
                Literal::Identifier { name, .. } => name.as_str(),
                Literal::String { value, .. } => value.as_str(),
                Literal::Wildcard { .. } => "*",
                // unreachable through the constructors
                Literal::Number { .. } => "",
            })
            .collect()
    }
}

impl fmt::Display for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

/// Boolean structure of a policy guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    And {
        left: Box<Condition>,
        right: Box<Condition>,
        line: usize,
    },
    Or {
        left: Box<Condition>,
        right: Box<Condition>,
        line: usize,
    },
    Comparison(Comparison),
}

impl Condition {
    pub fn and(left: Condition, right: Condition) -> Self {
        let line = left.line();
        Condition::And {
            left: Box::new(left),
            right: Box::new(right),
            line,
        }
    }

    pub fn or(left: Condition, right: Condition) -> Self {
        let line = left.line();
        Condition::Or {
            left: Box::new(left),
            right: Box::new(right),
            line,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            Condition::And { line, .. } | Condition::Or { line, .. } => *line,
            Condition::Comparison(c) => c.line,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::And { left, right, .. } => write!(f, "({} AND {})", left, right),
            Condition::Or { left, right, .. } => write!(f, "({} OR {})", left, right),
            Condition::Comparison(c) => write!(f, "{}", c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl CompareOp {
    pub const ALL: [CompareOp; 6] = [
        CompareOp::Eq,
        CompareOp::Ne,
        CompareOp::Lt,
        CompareOp::Gt,
        CompareOp::Le,
        CompareOp::Ge,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub op: CompareOp,
    pub left: Expr,
    pub right: Expr,
    pub line: usize,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op.symbol(), self.right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(ArithOp::Add),
            "-" => Some(ArithOp::Sub),
            "*" => Some(ArithOp::Mul),
            "/" => Some(ArithOp::Div),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Minus,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(UnaryOp::Plus),
            "-" => Some(UnaryOp::Minus),
            _ => None,
        }
    }
}

/// Operand of a comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Binary {
        op: ArithOp,
        left: Box<Expr>,
        right: Box<Expr>,
        line: usize,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        line: usize,
    },
    Attribute(AttributeAccess),
    Literal(Literal),
}

impl Expr {
    pub fn binary(op: ArithOp, left: Expr, right: Expr) -> Self {
        let line = left.line();
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            line,
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr, line: usize) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
            line,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            Expr::Binary { line, .. } | Expr::Unary { line, .. } => *line,
            Expr::Attribute(access) => access.line,
            Expr::Literal(literal) => literal.line(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Binary {
                op, left, right, ..
            } => write!(f, "({} {} {})", left, op.symbol(), right),
            Expr::Unary { op, operand, .. } => write!(f, "{}{}", op.symbol(), operand),
            Expr::Attribute(access) => write!(f, "{}", access),
            Expr::Literal(literal) => write!(f, "{}", literal),
        }
    }
}

/// Dotted attribute reference such as `time.hour`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeAccess {
    pub object: String,
    pub attribute: String,
    pub line: usize,
}

impl fmt::Display for AttributeAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.object, self.attribute)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Identifier { name: String, line: usize },
    Number { value: i64, line: usize },
    String { value: String, line: usize },
    Wildcard { line: usize },
}

impl Literal {
    pub fn line(&self) -> usize {
        match self {
            Literal::Identifier { line, .. }
            | Literal::Number { line, .. }
            | Literal::String { line, .. }
            | Literal::Wildcard { line } => *line,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Identifier { name, .. } => f.write_str(name),
            Literal::Number { value, .. } => write!(f, "{}", value),
            Literal::String { value, .. } => write!(f, "\"{}\"", value),
            Literal::Wildcard { .. } => f.write_str("*"),
        }
    }
}
