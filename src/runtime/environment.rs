use crate::runtime::{
    builtins::builtins,
    error::{RuntimeError, RuntimeResult},
    value::Value,
};
use std::collections::HashMap;

/// A single flat binding table. Definitions overwrite in place; there are no
/// nested scopes to push or pop.
#[derive(Clone, Debug)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        let mut env = Self::empty();
        for builtin in builtins() {
            env.define(builtin.name, Value::Builtin(builtin));
        }
        env
    }

    /// An environment with nothing bound, not even the operators.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn lookup(&self, name: &str) -> RuntimeResult<Value> {
        self.get(name).ok_or_else(|| RuntimeError::UnboundSymbol {
            name: name.to_string(),
        })
    }

    /// Inserts or overwrites `name` and hands back the stored value.
    pub fn define(&mut self, name: &str, value: Value) -> Value {
        self.bindings.insert(name.to_string(), value.clone());
        value
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::Environment;
    use crate::runtime::{builtins::BUILTINS, error::RuntimeError, value::Value};
    use pretty_assertions::assert_eq;

    #[test]
    fn seeds_every_builtin() {
        let env = Environment::new();
        assert_eq!(env.len(), BUILTINS.len());
        for (name, _) in BUILTINS {
            match env.lookup(name) {
                Ok(Value::Builtin(builtin)) => assert_eq!(builtin.name, *name),
                other => panic!("`{name}` should be a builtin, found {other:?}"),
            }
        }
    }

    #[test]
    fn default_matches_new() {
        assert_eq!(Environment::default().names(), Environment::new().names());
        assert!(Environment::default().contains("+"));
    }

    #[test]
    fn lookup_of_missing_name_fails() {
        let env = Environment::empty();
        assert!(env.is_empty());
        assert_eq!(
            env.lookup("ghost"),
            Err(RuntimeError::UnboundSymbol {
                name: "ghost".into()
            })
        );
    }

    #[test]
    fn define_returns_and_overwrites() {
        let mut env = Environment::new();
        assert_eq!(env.define("x", Value::Number(5.0)), Value::Number(5.0));
        assert_eq!(env.lookup("x"), Ok(Value::Number(5.0)));
        env.define("x", Value::Bool(true));
        assert_eq!(env.lookup("x"), Ok(Value::Bool(true)));
    }

    #[test]
    fn builtins_can_be_shadowed_by_overwrite() {
        let mut env = Environment::new();
        let before = env.len();
        env.define("+", Value::Number(1.0));
        assert_eq!(env.lookup("+"), Ok(Value::Number(1.0)));
        assert_eq!(env.len(), before);
    }

    #[test]
    fn names_are_sorted() {
        let mut env = Environment::empty();
        env.define("b", Value::Nil);
        env.define("a", Value::Nil);
        assert_eq!(env.names(), vec!["a", "b"]);
        assert!(env.contains("a"));
        assert!(!env.contains("c"));
    }
}
