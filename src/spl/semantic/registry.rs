//! Attribute registry
//!
//! Maps every recognized `object.attribute` pair to its semantic category. The
//! built-in set is process-wide, immutable and created on first use; analyzers
//! that need more attributes clone it and insert their own.

use super::error::Category;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, BTreeSet};

static DEFAULT_REGISTRY: Lazy<AttributeRegistry> = Lazy::new(|| {
    let mut registry = AttributeRegistry::empty();
    registry.insert("time", "hour", Category::Numeric);
    registry.insert("time", "minute", Category::Numeric);
    registry.insert("time", "day", Category::Numeric);
    registry.insert("user", "role", Category::Categorical);
    registry.insert("user", "name", Category::Categorical);
    registry.insert("resource", "path", Category::Categorical);
    registry.insert("resource", "name", Category::Categorical);
    registry
});

/// Outcome of looking up an attribute access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Found(Category),
    UnknownNamespace,
    UnknownAttribute,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRegistry {
    namespaces: BTreeMap<String, BTreeMap<String, Category>>,
}

impl AttributeRegistry {
    pub fn empty() -> Self {
        Self {
            namespaces: BTreeMap::new(),
        }
    }

    /// Register (or re-categorize) `object.attribute`
    pub fn insert(&mut self, object: &str, attribute: &str, category: Category) {
        self.namespaces
            .entry(object.to_string())
            .or_default()
            .insert(attribute.to_string(), category);
    }

    pub fn lookup(&self, object: &str, attribute: &str) -> Lookup {
        match self.namespaces.get(object) {
            None => Lookup::UnknownNamespace,
            Some(attributes) => match attributes.get(attribute) {
                Some(category) => Lookup::Found(*category),
                None => Lookup::UnknownAttribute,
            },
        }
    }

    pub fn has_namespace(&self, object: &str) -> bool {
        self.namespaces.contains_key(object)
    }

    pub fn namespaces(&self) -> BTreeSet<&str> {
        self.namespaces.keys().map(String::as_str).collect()
    }

    /// Attribute names of one namespace
    pub fn attributes(&self, object: &str) -> Vec<&str> {
        self.namespaces
            .get(object)
            .map(|attributes| attributes.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl Default for AttributeRegistry {
    fn default() -> Self {
        DEFAULT_REGISTRY.clone()
    }
}
