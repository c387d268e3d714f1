//! Variable storage for a single program run
//!
//! The language has exactly one global scope, so the environment is a flat
//! map. Every run creates its own instance.

use crate::parser::ast::Value;
use std::collections::HashMap;

/// Global variable environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    variables: HashMap<String, Value>,
}

impl Environment {
    /// Create an empty environment
    pub fn new() -> Self {
        Environment {
            variables: HashMap::new(),
        }
    }

    /// Bind `name` to `value`, replacing any previous value of any kind
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    /// Get a variable's value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }
}
