use std::{collections::HashMap, fmt, sync::Arc};

use crate::{error::RegistryError, value::Value};

/// A host function callable from expressions as `name(arg, ...)`.
///
/// Returning `Err(message)` surfaces as [`crate::EvalError::FunctionFailed`].
pub type Function = Arc<dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync>;

/// A computed property: given the evaluation scope, produce the value of
/// the path (or path segment) it is registered under.
pub type Property = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Host functions and computed properties consulted during evaluation.
///
/// Compiled expressions never hold on to a registry; they receive one each
/// time they are evaluated. Cloning is cheap and gives an independent
/// snapshot that can be shared with other threads while this one keeps
/// being mutated.
#[derive(Clone, Default)]
pub struct Registry {
    functions: HashMap<String, Function>,
    properties: HashMap<String, Property>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a host function. Fails if `name` is already taken.
    pub fn register_function<F>(&mut self, name: impl Into<String>, function: F) -> Result<(), RegistryError>
    where
        F: Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.functions.contains_key(&name) {
            return Err(RegistryError::FunctionDeclared(name));
        }
        self.functions.insert(name, Arc::new(function));
        Ok(())
    }

    /// Remove a host function. Removing an unknown name is a no-op.
    pub fn unregister_function(&mut self, name: &str) -> bool {
        self.functions.remove(name).is_some()
    }

    /// Register a computed property. Fails if `name` is already taken.
    pub fn register_property<F>(&mut self, name: impl Into<String>, property: F) -> Result<(), RegistryError>
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        let name = name.into();
        if self.properties.contains_key(&name) {
            return Err(RegistryError::PropertyDeclared(name));
        }
        self.properties.insert(name, Arc::new(property));
        Ok(())
    }

    pub fn unregister_property(&mut self, name: &str) -> bool {
        self.properties.remove(name).is_some()
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Registered function names, sorted
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut properties: Vec<&str> = self.properties.keys().map(String::as_str).collect();
        properties.sort_unstable();
        f.debug_struct("Registry")
            .field("functions", &self.function_names())
            .field("properties", &properties)
            .finish()
    }
}
