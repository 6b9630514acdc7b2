use std::{collections::HashMap, fmt::Display};

use tracing::trace;

use crate::{
    ast::types::Value,
    errors::errors::{Error, ErrorImpl},
};

/// Value held by a stored variable.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeValue {
    Scalar(Value),
    List(Vec<RuntimeValue>),
    Dictionary(Vec<(String, RuntimeValue)>),
    /// Needs execution this interpreter does not do (calls, reads, functions)
    Deferred,
}

impl RuntimeValue {
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            RuntimeValue::Scalar(value) => Some(value),
            _ => None,
        }
    }
}

impl Display for RuntimeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeValue::Scalar(value) => write!(f, "{}", value),
            RuntimeValue::List(elements) => {
                write!(f, "[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            RuntimeValue::Dictionary(entries) => {
                write!(f, "{{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            RuntimeValue::Deferred => write!(f, "<deferred>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub value: RuntimeValue,
    pub scope: String,
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{} = {}", self.name, self.scope, self.value)
    }
}

/// Variables grouped by scope tag, then by name.
#[derive(Debug, Default)]
pub struct Environment {
    scopes: HashMap<String, HashMap<String, Variable>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    /// Stores a new variable. A `(name, scope)` pair can only be added once.
    pub fn add_variable(&mut self, name: &str, value: RuntimeValue, scope: &str) -> Result<(), Error> {
        let variables = self.scopes.entry(scope.to_string()).or_default();

        if variables.contains_key(name) {
            return Err(Error::unpositioned(ErrorImpl::VariableExists {
                variable: name.to_string(),
                scope: scope.to_string(),
            }));
        }

        trace!("adding {}@{}", name, scope);
        variables.insert(
            name.to_string(),
            Variable {
                name: name.to_string(),
                value,
                scope: scope.to_string(),
            },
        );
        Ok(())
    }

    pub fn update_variable(&mut self, name: &str, value: RuntimeValue, scope: &str) -> Result<(), Error> {
        match self
            .scopes
            .get_mut(scope)
            .and_then(|variables| variables.get_mut(name))
        {
            Some(variable) => {
                trace!("updating {}@{}", name, scope);
                variable.value = value;
                Ok(())
            }
            None => Err(missing(name, scope)),
        }
    }

    pub fn get_variable(&self, name: &str, scope: &str) -> Result<&Variable, Error> {
        self.scopes
            .get(scope)
            .and_then(|variables| variables.get(name))
            .ok_or_else(|| missing(name, scope))
    }

    /// Variables of `scope`, sorted by name.
    pub fn variables(&self, scope: &str) -> Vec<&Variable> {
        let mut variables: Vec<&Variable> = self
            .scopes
            .get(scope)
            .map(|variables| variables.values().collect())
            .unwrap_or_default();
        variables.sort_by(|a, b| a.name.cmp(&b.name));
        variables
    }
}

fn missing(name: &str, scope: &str) -> Error {
    Error::unpositioned(ErrorImpl::VariableMissing {
        variable: name.to_string(),
        scope: scope.to_string(),
    })
}
