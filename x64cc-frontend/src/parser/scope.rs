//! Lexical scopes of the function being parsed
//!
//! Variables live in a per-function arena; each scope maps names to arena
//! indices. Scopes are pushed on block entry and popped on exit, and lookup
//! walks from the innermost scope outward.

use crate::ast::{VarId, Variable};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<HashMap<String, VarId>>,
    locals: Vec<Variable>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a new scope
    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Exit current scope
    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Declare a variable in the innermost scope. Returns `None` if the name
    /// is already declared in that same scope.
    pub fn declare(&mut self, variable: Variable) -> Option<VarId> {
        if self.scopes.is_empty() {
            self.push_scope();
        }
        let scope = self.scopes.last_mut()?;
        if scope.contains_key(&variable.name) {
            return None;
        }

        let id = VarId(self.locals.len());
        scope.insert(variable.name.clone(), id);
        self.locals.push(variable);
        Some(id)
    }

    /// Look up a name, innermost scope first
    pub fn lookup(&self, name: &str) -> Option<VarId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }

    /// Hand over every variable declared since the last call
    pub fn take_locals(&mut self) -> Vec<Variable> {
        std::mem::take(&mut self.locals)
    }
}
