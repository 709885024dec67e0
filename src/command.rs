use crate::env::Environment;
use crate::value::{ParamType, Value};
use anyhow::Result;
use std::collections::HashMap;
use std::rc::Rc;

/// Signature every command handler conforms to.
///
/// Handlers receive the session's variable store mutably (the reserved `set`
/// command writes to it) and the bound argument vector in declaration order.
/// Returning `Some(value)` chains the value into the next pipeline stage, or
/// prints it when the command is last; `None` produces no output.
pub type Handler = dyn Fn(&mut Environment, Vec<Value>) -> Result<Option<Value>>;

/// Declared parameter of a command: a name, an optional type tag, and an
/// optional default. Declaration order is binding order.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    pub ty: Option<ParamType>,
    pub default: Option<Value>,
}

impl ParamSpec {
    /// A required, untyped parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            default: None,
        }
    }

    /// Declare the expected type; supplied values are coerced to it.
    pub fn typed(mut self, ty: ParamType) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Declare a default, making the parameter optional.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// A registered command: its ordered parameter descriptors plus the handler.
pub struct CommandSpec {
    pub params: Vec<ParamSpec>,
    handler: Box<Handler>,
}

impl CommandSpec {
    pub fn new<F>(params: Vec<ParamSpec>, handler: F) -> Self
    where
        F: Fn(&mut Environment, Vec<Value>) -> Result<Option<Value>> + 'static,
    {
        Self {
            params,
            handler: Box::new(handler),
        }
    }

    /// Invoke the handler with already-bound arguments.
    pub fn call(&self, env: &mut Environment, args: Vec<Value>) -> Result<Option<Value>> {
        (self.handler)(env, args)
    }
}

/// Name-to-command mapping with alias support.
///
/// Names are case-sensitive. Re-registering a name silently replaces its
/// spec while keeping the name's original position in the listing, so the
/// help surface shows each name exactly once in first-registration order.
#[derive(Default)]
pub struct Registry {
    commands: HashMap<String, Rc<CommandSpec>>,
    order: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `spec` under `name` and every alias.
    pub fn register(&mut self, name: &str, aliases: &[&str], spec: CommandSpec) {
        let spec = Rc::new(spec);
        self.insert(name, Rc::clone(&spec));
        for alias in aliases {
            self.insert(alias, Rc::clone(&spec));
        }
    }

    fn insert(&mut self, name: &str, spec: Rc<CommandSpec>) {
        if self.commands.insert(name.to_string(), spec).is_none() {
            self.order.push(name.to_string());
        }
    }

    /// Look up a command by exact name.
    pub fn lookup(&self, name: &str) -> Option<Rc<CommandSpec>> {
        self.commands.get(name).cloned()
    }

    /// All registered names (aliases included) in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(text: &str) -> CommandSpec {
        let text = text.to_string();
        CommandSpec::new(Vec::new(), move |_env, _args| {
            Ok(Some(Value::Str(text.clone())))
        })
    }

    #[test]
    fn test_register_and_lookup() {
        let mut reg = Registry::new();
        reg.register("greet", &[], constant("hi"));

        assert!(reg.lookup("greet").is_some());
        assert!(reg.lookup("missing").is_none());
        // case-sensitive
        assert!(reg.lookup("Greet").is_none());
    }

    #[test]
    fn test_aliases_share_one_spec() {
        let mut reg = Registry::new();
        reg.register("greet", &["hello", "hey"], constant("hi"));

        let a = reg.lookup("greet").unwrap();
        let b = reg.lookup("hello").unwrap();
        assert!(Rc::ptr_eq(&a, &b));

        let names: Vec<&str> = reg.names().collect();
        assert_eq!(names, vec!["greet", "hello", "hey"]);
    }

    #[test]
    fn test_reregistration_replaces_and_keeps_position() {
        let mut env = Environment::new();
        let mut reg = Registry::new();
        reg.register("greet", &[], constant("old"));
        reg.register("other", &[], constant("x"));
        reg.register("greet", &[], constant("new"));

        let spec = reg.lookup("greet").unwrap();
        let out = spec.call(&mut env, Vec::new()).unwrap();
        assert_eq!(out, Some(Value::Str("new".into())));

        let names: Vec<&str> = reg.names().collect();
        assert_eq!(names, vec!["greet", "other"]);
    }
}
