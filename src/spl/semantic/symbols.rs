//! Symbol tables for declared names

use super::error::DeclKind;
use std::collections::HashMap;

/// Names of one declaration kind, mapped to the line of their first declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    kind: DeclKind,
    lines: HashMap<String, usize>,
    /// Declaration order, for deterministic iteration
    order: Vec<String>,
}

impl SymbolTable {
    pub fn new(kind: DeclKind) -> Self {
        Self {
            kind,
            lines: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn kind(&self) -> DeclKind {
        self.kind
    }

    /// Record a declaration. If the name is taken, nothing changes and the line of
    /// the earlier declaration is returned.
    pub fn declare(&mut self, name: &str, line: usize) -> Result<(), usize> {
        if let Some(first_line) = self.lines.get(name) {
            return Err(*first_line);
        }
        self.lines.insert(name.to_string(), line);
        self.order.push(name.to_string());
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lines.contains_key(name)
    }

    /// Line of the winning (first) declaration
    pub fn line_of(&self, name: &str) -> Option<usize> {
        self.lines.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// One table per declaration kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbols {
    pub roles: SymbolTable,
    pub users: SymbolTable,
    pub resources: SymbolTable,
}

impl Symbols {
    pub fn table(&self, kind: DeclKind) -> &SymbolTable {
        match kind {
            DeclKind::Role => &self.roles,
            DeclKind::User => &self.users,
            DeclKind::Resource => &self.resources,
        }
    }

    pub(crate) fn table_mut(&mut self, kind: DeclKind) -> &mut SymbolTable {
        match kind {
            DeclKind::Role => &mut self.roles,
            DeclKind::User => &mut self.users,
            DeclKind::Resource => &mut self.resources,
        }
    }
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            roles: SymbolTable::new(DeclKind::Role),
            users: SymbolTable::new(DeclKind::User),
            resources: SymbolTable::new(DeclKind::Resource),
        }
    }
}
