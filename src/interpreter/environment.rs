use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::object::Object;

/// A single scope frame: local bindings plus an optional enclosing frame.
///
/// Frames are created at program start (no parent) and on every function
/// invocation (parent = the function's captured, definition-time
/// environment). The parent is shared, never owned: closures and active
/// calls keep it alive through the `Rc`, and parent links only ever point
/// outward toward already-existing scopes, so no reference cycle can form.
#[derive(Debug, Default)]
pub struct Environment {
    vars: HashMap<String, Object>,
    parent: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Creates a root frame with no enclosing scope.
    #[must_use]
    pub fn new() -> Self {
        Self { vars: HashMap::new(), parent: None }
    }

    /// Creates a frame enclosed by `parent`.
    #[must_use]
    pub fn with_parent(parent: Rc<RefCell<Environment>>) -> Self {
        Self { vars: HashMap::new(), parent: Some(parent) }
    }

    /// Resolves a name, searching this frame first and then delegating
    /// outward through the chain. Returns `None` once the chain is
    /// exhausted; the evaluator decides what failure that amounts to (it
    /// still gets to try the builtin registry).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Object> {
        if let Some(object) = self.vars.get(name) {
            return Some(object.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.borrow().get(name))
    }

    /// Binds a name in this frame only, never in a parent. Re-binding an
    /// existing local name silently overwrites it; redefinition is
    /// permitted by the language. Returns the bound value.
    pub fn set(&mut self, name: &str, value: Object) -> Object {
        self.vars.insert(name.to_string(), value.clone());
        value
    }
}
