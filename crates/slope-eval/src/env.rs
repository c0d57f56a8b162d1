//! The single flat variable environment.

use crate::value::Value;
use std::collections::BTreeMap;

/// Name → value bindings for one program run.
///
/// There are no nested scopes: every assignment, including a `liftline`
/// loop variable, writes here and stays visible afterwards.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: BTreeMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite a binding.
    pub fn set(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// All bindings in name order.
    pub fn bindings(&self) -> &BTreeMap<String, Value> {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
