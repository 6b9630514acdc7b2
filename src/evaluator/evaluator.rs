use tracing::trace;

use crate::{
    ast::{
        ast::Node,
        types::{Operator, Value},
    },
    errors::errors::{Error, ErrorImpl},
};

/// Applies `operator` to literal operands.
///
/// `left` is `None` only for the unary `not`, which ignores it entirely.
pub fn apply(operator: Operator, left: Option<&Value>, right: &Value) -> Result<Value, Error> {
    let result = match operator {
        Operator::Not => match right {
            Value::Boolean(value) => Value::Boolean(!value),
            _ => return Err(invalid_operands(operator, left, right)),
        },
        _ => {
            let Some(left) = left else {
                return Err(invalid_operands(operator, None, right));
            };
            apply_binary(operator, left, right)?
        }
    };

    trace!("{:?} {} {} = {}", left, operator, right, result);
    Ok(result)
}

fn apply_binary(operator: Operator, left: &Value, right: &Value) -> Result<Value, Error> {
    match operator {
        Operator::Plus | Operator::Minus | Operator::Multiply | Operator::Divide => {
            arithmetic(operator, left, right)
        }
        Operator::Less
        | Operator::Greater
        | Operator::LessEquals
        | Operator::GreaterEquals
        | Operator::Equals
        | Operator::NotEquals => comparison(operator, left, right),
        Operator::And | Operator::Or | Operator::Xor => match (left, right) {
            (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(match operator {
                Operator::And => *a && *b,
                Operator::Or => *a || *b,
                _ => *a ^ *b,
            })),
            _ => Err(invalid_operands(operator, Some(left), right)),
        },
        Operator::Not | Operator::Is | Operator::In => {
            Err(invalid_operands(operator, Some(left), right))
        }
    }
}

fn arithmetic(operator: Operator, left: &Value, right: &Value) -> Result<Value, Error> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => {
            let result = match operator {
                Operator::Plus => a.checked_add(*b),
                Operator::Minus => a.checked_sub(*b),
                Operator::Multiply => a.checked_mul(*b),
                _ => {
                    if *b == 0 {
                        return Err(Error::unpositioned(ErrorImpl::DivisionByZero));
                    }
                    a.checked_div(*b)
                }
            };

            result.map(Value::Int).ok_or_else(|| {
                Error::unpositioned(ErrorImpl::IntegerOverflow {
                    operator: operator.to_string(),
                })
            })
        }
        (Value::String(a), Value::String(b)) if operator == Operator::Plus => {
            Ok(Value::String(format!("{}{}", a, b)))
        }
        _ => {
            let (Some(a), Some(b)) = (left.as_real(), right.as_real()) else {
                return Err(invalid_operands(operator, Some(left), right));
            };

            let result = match operator {
                Operator::Plus => a + b,
                Operator::Minus => a - b,
                Operator::Multiply => a * b,
                _ => {
                    if b == 0.0 {
                        return Err(Error::unpositioned(ErrorImpl::DivisionByZero));
                    }
                    a / b
                }
            };
            Ok(Value::Real(result))
        }
    }
}

fn comparison(operator: Operator, left: &Value, right: &Value) -> Result<Value, Error> {
    let ordering = match (left, right) {
        (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
        _ => match (left.as_real(), right.as_real()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => return Err(invalid_operands(operator, Some(left), right)),
        },
    };

    // NaN compares unequal to everything
    let Some(ordering) = ordering else {
        return Ok(Value::Boolean(operator == Operator::NotEquals));
    };

    Ok(Value::Boolean(match operator {
        Operator::Less => ordering.is_lt(),
        Operator::Greater => ordering.is_gt(),
        Operator::LessEquals => ordering.is_le(),
        Operator::GreaterEquals => ordering.is_ge(),
        Operator::Equals => ordering.is_eq(),
        _ => ordering.is_ne(),
    }))
}

fn invalid_operands(operator: Operator, left: Option<&Value>, right: &Value) -> Error {
    Error::unpositioned(ErrorImpl::InvalidOperandTypes {
        operator: operator.to_string(),
        left: left
            .map(|value| value.type_tag().to_string())
            .unwrap_or_else(|| String::from("none")),
        right: right.type_tag().to_string(),
    })
}

/// Evaluates a constant subtree (literals joined by operators).
///
/// Errors carry the position of the innermost failing expression.
pub fn evaluate_constant(node: &Node) -> Result<Value, Error> {
    match node {
        Node::Literal(literal) => Ok(literal.value.clone()),
        Node::Expression(expression) => {
            let left = match &expression.left {
                Some(left) => Some(evaluate_constant(left)?),
                None => None,
            };
            let right = evaluate_constant(&expression.right)?;

            apply(expression.operator, left.as_ref(), &right)
                .map_err(|error| error.or_at(&expression.span.start))
        }
        other => Err(Error::unpositioned(ErrorImpl::UnsupportedValueType {
            value: other.describe(),
        })),
    }
}
