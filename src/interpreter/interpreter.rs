use tracing::{debug, info};

use crate::{
    ast::{
        ast::Node,
        expressions::Expression,
        types::{Operator, Value},
    },
    errors::errors::Error,
    evaluator::evaluator::apply,
    symbols::symbols::GLOBAL_SCOPE,
};

use super::environment::{Environment, RuntimeValue};

pub struct Interpreter {
    environment: Environment,
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new(Environment::new())
    }
}

impl Interpreter {
    pub fn new(environment: Environment) -> Self {
        Interpreter { environment }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn into_environment(self) -> Environment {
        self.environment
    }

    /// Executes the statements of a program in order.
    pub fn run(&mut self, program: &Node) -> Result<(), Error> {
        match program {
            Node::Program(program) => {
                for statement in program.iter() {
                    self.execute(statement)?;
                }
                Ok(())
            }
            other => self.execute(other),
        }
    }

    fn execute(&mut self, node: &Node) -> Result<(), Error> {
        let Node::VariableDeclaration(declaration) = node else {
            debug!("not executed: {}", node.describe());
            return Ok(());
        };

        let value = match declaration.initializer.as_deref() {
            Some(initializer) => self.evaluate(initializer)?,
            None => RuntimeValue::Scalar(Value::Empty),
        };
        let name = declaration.name();

        let stored = if declaration.is_declaration {
            self.environment.add_variable(name, value, GLOBAL_SCOPE)
        } else {
            self.environment.update_variable(name, value, GLOBAL_SCOPE)
        };
        stored.map_err(|error| error.or_at(&declaration.span.start))?;

        let variable = self.environment.get_variable(name, GLOBAL_SCOPE)?;
        info!("{}", variable);
        Ok(())
    }

    /// Evaluates an initializer against the global variables stored so far.
    pub fn evaluate(&self, node: &Node) -> Result<RuntimeValue, Error> {
        match node {
            Node::Literal(literal) => Ok(RuntimeValue::Scalar(literal.value.clone())),
            Node::Identifier(identifier) => self
                .environment
                .get_variable(&identifier.name, GLOBAL_SCOPE)
                .map(|variable| variable.value.clone())
                .map_err(|error| error.or_at(&identifier.span.start)),
            Node::Expression(expression) => self.evaluate_expression(expression),
            Node::List(list) => Ok(RuntimeValue::List(
                list.elements
                    .iter()
                    .map(|element| self.evaluate(element))
                    .collect::<Result<Vec<_>, Error>>()?,
            )),
            Node::Dictionary(dictionary) => {
                let mut entries = Vec::with_capacity(dictionary.len());
                for entry in dictionary.entries.iter() {
                    let Node::DictionaryEntry(entry) = entry else {
                        continue;
                    };
                    let key = match entry.key.as_ref() {
                        Node::Identifier(identifier) => identifier.name.clone(),
                        other => other.describe(),
                    };
                    let value = match entry.value.as_deref() {
                        Some(value) => self.evaluate(value)?,
                        None => RuntimeValue::Scalar(Value::Empty),
                    };
                    entries.push((key, value));
                }
                Ok(RuntimeValue::Dictionary(entries))
            }
            _ => Ok(RuntimeValue::Deferred),
        }
    }

    fn evaluate_expression(&self, expression: &Expression) -> Result<RuntimeValue, Error> {
        let left = match expression.left.as_deref() {
            Some(left) => Some(self.evaluate(left)?),
            None => None,
        };

        if matches!(expression.operator, Operator::Is | Operator::In) {
            let (Some(subject), Node::Literal(type_name)) = (&left, expression.right.as_ref()) else {
                return Ok(RuntimeValue::Deferred);
            };
            return Ok(RuntimeValue::Scalar(Value::Boolean(
                type_name_of(subject) == Some(type_name.value.to_string()),
            )));
        }

        let right = self.evaluate(&expression.right)?;

        let left = match &left {
            Some(RuntimeValue::Scalar(value)) => Some(value),
            Some(_) => return Ok(RuntimeValue::Deferred),
            None => None,
        };
        let Some(right) = right.as_scalar() else {
            return Ok(RuntimeValue::Deferred);
        };

        apply(expression.operator, left, right)
            .map(RuntimeValue::Scalar)
            .map_err(|error| error.or_at(&expression.span.start))
    }
}

/// Name used by `is`/`in` checks for a stored value.
fn type_name_of(value: &RuntimeValue) -> Option<String> {
    let name = match value.as_scalar()? {
        Value::Int(_) => "int",
        Value::Real(_) => "real",
        Value::String(_) => "string",
        Value::Boolean(_) => "bool",
        Value::Empty => "empty",
    };
    Some(name.to_string())
}
