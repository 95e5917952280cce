//! Tree <-> generic nested map
//!
//! Every node becomes a JSON object with a `"type"` discriminator, its `"line"`
//! and one entry per attribute:
//!
//! ```text
//! {"type": "RoleDef", "line": 1, "name": "Admin",
//!  "actions": [{"type": "Wildcard", "line": 1}]}
//! ```
//!
//! Sequences are arrays of node objects and an absent condition is `null`. This is
//! the format external tools (risk scanners, pretty-printers) consume, so
//! [`from_value`] accepts exactly what [`to_value`] produces and re-checks the tree
//! invariants on the way in.

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::spl::ast::{
    ActionSet, ArithOp, AttributeAccess, CompareOp, Comparison, Condition, Declaration, Effect,
    Expr, Literal, PolicyDef, Program, ResourceDef, RoleDef, UnaryOp, UserDef,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("{context}: expected an object")]
    NotAnObject { context: String },

    #[error("{context}: missing field '{field}'")]
    MissingField { context: String, field: &'static str },

    #[error("{context}: field '{field}' has the wrong type")]
    WrongType { context: String, field: &'static str },

    #[error("{context}: unknown node type '{found}' (expected {expected})")]
    UnexpectedType {
        context: String,
        expected: &'static str,
        found: String,
    },

    #[error("{context}: unknown operator '{operator}'")]
    UnknownOperator { context: String, operator: String },

    #[error("{context}: action list must be a single wildcard or a non-empty list of names")]
    InvalidActions { context: String },

    #[error("invalid JSON: {0}")]
    Json(String),

    #[error("invalid YAML: {0}")]
    Yaml(String),
}

// ============================================================================
// Encoding
// ============================================================================

pub fn to_value(program: &Program) -> Value {
    json!({
        "type": "Program",
        "line": program.line,
        "declarations": program.declarations.iter().map(declaration_to_value).collect::<Vec<_>>(),
    })
}

pub fn to_json_string(program: &Program) -> String {
    // Serializing a Value cannot fail
    serde_json::to_string_pretty(&to_value(program)).unwrap_or_default()
}

pub fn to_yaml_string(program: &Program) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&to_value(program))
}

fn declaration_to_value(declaration: &Declaration) -> Value {
    match declaration {
        Declaration::Role(role) => json!({
            "type": "RoleDef",
            "line": role.line,
            "name": role.name,
            "actions": actions_to_value(&role.actions),
        }),
        Declaration::User(user) => json!({
            "type": "UserDef",
            "line": user.line,
            "name": user.name,
            "role": user.role,
        }),
        Declaration::Resource(resource) => json!({
            "type": "ResourceDef",
            "line": resource.line,
            "name": resource.name,
            "path": resource.path,
        }),
        Declaration::Policy(policy) => json!({
            "type": "PolicyDef",
            "line": policy.line,
            "effect": policy.effect.as_str(),
            "actions": actions_to_value(&policy.actions),
            "resource": policy.resource,
            "condition": policy.condition.as_ref().map(condition_to_value),
        }),
    }
}

fn actions_to_value(actions: &ActionSet) -> Value {
    Value::Array(actions.items().iter().map(literal_to_value).collect())
}

fn condition_to_value(condition: &Condition) -> Value {
    match condition {
        Condition::And { left, right, line } => json!({
            "type": "And",
            "line": line,
            "left": condition_to_value(left),
            "right": condition_to_value(right),
        }),
        Condition::Or { left, right, line } => json!({
            "type": "Or",
            "line": line,
            "left": condition_to_value(left),
            "right": condition_to_value(right),
        }),
        Condition::Comparison(comparison) => json!({
            "type": "Comparison",
            "line": comparison.line,
            "operator": comparison.op.symbol(),
            "left": expr_to_value(&comparison.left),
            "right": expr_to_value(&comparison.right),
        }),
    }
}

fn expr_to_value(expr: &Expr) -> Value {
    match expr {
        Expr::Binary {
            op,
            left,
            right,
            line,
        } => json!({
            "type": "ArithmeticExpr",
            "line": line,
            "operator": op.symbol(),
            "left": expr_to_value(left),
            "right": expr_to_value(right),
        }),
        Expr::Unary { op, operand, line } => json!({
            "type": "UnaryExpr",
            "line": line,
            "operator": op.symbol(),
            "operand": expr_to_value(operand),
        }),
        Expr::Attribute(access) => json!({
            "type": "AttributeAccess",
            "line": access.line,
            "object": access.object,
            "attribute": access.attribute,
        }),
        Expr::Literal(literal) => literal_to_value(literal),
    }
}

fn literal_to_value(literal: &Literal) -> Value {
    match literal {
        Literal::Identifier { name, line } => {
            json!({ "type": "Identifier", "line": line, "value": name })
        }
        Literal::Number { value, line } => {
            json!({ "type": "Number", "line": line, "value": value })
        }
        Literal::String { value, line } => {
            json!({ "type": "String", "line": line, "value": value })
        }
        Literal::Wildcard { line } => json!({ "type": "Wildcard", "line": line }),
    }
}

// ============================================================================
// Decoding
// ============================================================================

pub fn from_value(value: &Value) -> Result<Program, DecodeError> {
    let node = NodeMap::expect(value, "Program", "program")?;
    let declarations = node
        .array("declarations")?
        .iter()
        .enumerate()
        .map(|(i, item)| declaration_from_value(item, &format!("declarations[{}]", i)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Program::new(declarations))
}

pub fn from_json_str(json: &str) -> Result<Program, DecodeError> {
    let value: Value = serde_json::from_str(json).map_err(|e| DecodeError::Json(e.to_string()))?;
    from_value(&value)
}

pub fn from_yaml_str(yaml: &str) -> Result<Program, DecodeError> {
    let value: Value = serde_yaml::from_str(yaml).map_err(|e| DecodeError::Yaml(e.to_string()))?;
    from_value(&value)
}

fn declaration_from_value(value: &Value, context: &str) -> Result<Declaration, DecodeError> {
    let node = NodeMap::new(value, context)?;
    let line = node.line()?;

    let declaration = match node.node_type()? {
        "RoleDef" => Declaration::Role(RoleDef {
            name: node.string("name")?,
            actions: actions_from_value(&node)?,
            line,
        }),
        "UserDef" => Declaration::User(UserDef {
            name: node.string("name")?,
            role: node.string("role")?,
            line,
        }),
        "ResourceDef" => Declaration::Resource(ResourceDef {
            name: node.string("name")?,
            path: node.string("path")?,
            line,
        }),
        "PolicyDef" => {
            let effect = node.string("effect")?;
            let condition = match node.get("condition")? {
                Value::Null => None,
                other => Some(condition_from_value(other, &node.child("condition"))?),
            };
            Declaration::Policy(PolicyDef {
                effect: Effect::from_keyword(&effect).ok_or_else(|| {
                    DecodeError::UnknownOperator {
                        context: context.to_string(),
                        operator: effect.clone(),
                    }
                })?,
                actions: actions_from_value(&node)?,
                resource: node.string("resource")?,
                condition,
                line,
            })
        }
        other => return Err(node.unexpected("RoleDef, UserDef, ResourceDef or PolicyDef", other)),
    };
    Ok(declaration)
}

fn actions_from_value(node: &NodeMap<'_>) -> Result<ActionSet, DecodeError> {
    let context = node.child("actions");
    let items = node
        .array("actions")?
        .iter()
        .enumerate()
        .map(|(i, item)| literal_from_value(item, &format!("{}[{}]", context, i)))
        .collect::<Result<Vec<_>, _>>()?;
    ActionSet::from_literals(items).ok_or(DecodeError::InvalidActions { context })
}

fn condition_from_value(value: &Value, context: &str) -> Result<Condition, DecodeError> {
    let node = NodeMap::new(value, context)?;
    let line = node.line()?;

    match node.node_type()? {
        "And" | "Or" => {
            let left = Box::new(condition_from_value(node.get("left")?, &node.child("left"))?);
            let right = Box::new(condition_from_value(node.get("right")?, &node.child("right"))?);
            if node.node_type()? == "And" {
                Ok(Condition::And { left, right, line })
            } else {
                Ok(Condition::Or { left, right, line })
            }
        }
        "Comparison" => {
            let operator = node.string("operator")?;
            let op = CompareOp::from_symbol(&operator).ok_or_else(|| node.unknown_operator(&operator))?;
            Ok(Condition::Comparison(Comparison {
                op,
                left: expr_from_value(node.get("left")?, &node.child("left"))?,
                right: expr_from_value(node.get("right")?, &node.child("right"))?,
                line,
            }))
        }
        other => Err(node.unexpected("And, Or or Comparison", other)),
    }
}

fn expr_from_value(value: &Value, context: &str) -> Result<Expr, DecodeError> {
    let node = NodeMap::new(value, context)?;
    let line = node.line()?;

    match node.node_type()? {
        "ArithmeticExpr" => {
            let operator = node.string("operator")?;
            let op = ArithOp::from_symbol(&operator).ok_or_else(|| node.unknown_operator(&operator))?;
            Ok(Expr::Binary {
                op,
                left: Box::new(expr_from_value(node.get("left")?, &node.child("left"))?),
                right: Box::new(expr_from_value(node.get("right")?, &node.child("right"))?),
                line,
            })
        }
        "UnaryExpr" => {
            let operator = node.string("operator")?;
            let op = UnaryOp::from_symbol(&operator).ok_or_else(|| node.unknown_operator(&operator))?;
            Ok(Expr::Unary {
                op,
                operand: Box::new(expr_from_value(node.get("operand")?, &node.child("operand"))?),
                line,
            })
        }
        "AttributeAccess" => Ok(Expr::Attribute(AttributeAccess {
            object: node.string("object")?,
            attribute: node.string("attribute")?,
            line,
        })),
        _ => literal_from_value(value, context).map(Expr::Literal),
    }
}

fn literal_from_value(value: &Value, context: &str) -> Result<Literal, DecodeError> {
    let node = NodeMap::new(value, context)?;
    let line = node.line()?;

    match node.node_type()? {
        "Identifier" => Ok(Literal::Identifier {
            name: node.string("value")?,
            line,
        }),
        "Number" => Ok(Literal::Number {
            value: node.get("value")?.as_i64().ok_or_else(|| node.wrong_type("value"))?,
            line,
        }),
        "String" => Ok(Literal::String {
            value: node.string("value")?,
            line,
        }),
        "Wildcard" => Ok(Literal::Wildcard { line }),
        other => Err(node.unexpected("a literal or expression node", other)),
    }
}

/// A JSON object being decoded, with its path for error messages
struct NodeMap<'v> {
    map: &'v Map<String, Value>,
    context: String,
}

impl<'v> NodeMap<'v> {
    fn new(value: &'v Value, context: &str) -> Result<Self, DecodeError> {
        match value {
            Value::Object(map) => Ok(Self {
                map,
                context: context.to_string(),
            }),
            _ => Err(DecodeError::NotAnObject {
                context: context.to_string(),
            }),
        }
    }

    fn expect(value: &'v Value, expected: &'static str, context: &str) -> Result<Self, DecodeError> {
        let node = Self::new(value, context)?;
        match node.node_type()? {
            found if found == expected => Ok(node),
            found => Err(node.unexpected(expected, found)),
        }
    }

    fn child(&self, field: &str) -> String {
        format!("{}.{}", self.context, field)
    }

    fn get(&self, field: &'static str) -> Result<&'v Value, DecodeError> {
        self.map.get(field).ok_or_else(|| DecodeError::MissingField {
            context: self.context.clone(),
            field,
        })
    }

    fn node_type(&self) -> Result<&'v str, DecodeError> {
        self.get("type")?
            .as_str()
            .ok_or_else(|| self.wrong_type("type"))
    }

    fn line(&self) -> Result<usize, DecodeError> {
        self.get("line")?
            .as_u64()
            .and_then(|line| usize::try_from(line).ok())
            .ok_or_else(|| self.wrong_type("line"))
    }

    fn string(&self, field: &'static str) -> Result<String, DecodeError> {
        self.get(field)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.wrong_type(field))
    }

    fn array(&self, field: &'static str) -> Result<&'v Vec<Value>, DecodeError> {
        self.get(field)?
            .as_array()
            .ok_or_else(|| self.wrong_type(field))
    }

    fn wrong_type(&self, field: &'static str) -> DecodeError {
        DecodeError::WrongType {
            context: self.context.clone(),
            field,
        }
    }

    fn unexpected(&self, expected: &'static str, found: &str) -> DecodeError {
        DecodeError::UnexpectedType {
            context: self.context.clone(),
            expected,
            found: found.to_string(),
        }
    }

    fn unknown_operator(&self, operator: &str) -> DecodeError {
        DecodeError::UnknownOperator {
            context: self.context.clone(),
            operator: operator.to_string(),
        }
    }
}
