use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::types::lattice::{Type, TYPE_LOOKUP};

use super::type_set::TypeSet;

lazy_static! {
    /// Every built-in type name, bound as a type. Top-level scopes start
    /// as a copy of this one.
    pub static ref GLOBAL_SCOPE: Scope = {
        let mut scope = Scope::default();
        for (name, ty) in TYPE_LOOKUP.iter() {
            scope.declare(name, Binding::TypeName(*ty));
        }
        scope
    };
}

/// What an identifier stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// The identifier names a type.
    TypeName(Type),
    /// The identifier holds a value of one of these shapes.
    Value(TypeSet),
}

/// Identifier bindings of one lexical block. Nested blocks receive their
/// own copy, so nothing declared inside leaks out or into siblings.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    bindings: HashMap<String, Binding>,
}

impl Scope {
    pub fn global() -> Scope {
        GLOBAL_SCOPE.clone()
    }

    pub fn child(&self) -> Scope {
        self.clone()
    }

    pub fn declare(&mut self, name: &str, binding: Binding) {
        self.bindings.insert(name.to_string(), binding);
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }
}
