//! Value and operator definitions for the AST.
//!
//! This module defines:
//!
//! - `Value`: a resolved literal value (int, real, string, boolean, empty)
//! - `TypeTag`: the type tag attached to literals and declarations
//! - `Operator`: binary and unary operators carried by expression nodes

use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

/// A resolved literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Real(f64),
    String(String),
    Boolean(bool),
    Empty,
}

impl Value {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Int(_) => TypeTag::Int,
            Value::Real(_) => TypeTag::Real,
            Value::String(_) => TypeTag::String,
            Value::Boolean(_) => TypeTag::Boolean,
            Value::Empty => TypeTag::Empty,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Real(_))
    }

    /// Numeric view used for mixed int/real arithmetic and comparisons.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Int(value) => Some(*value as f64),
            Value::Real(value) => Some(*value),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Real(value) => write!(f, "{:?}", value),
            Value::String(value) => write!(f, "{}", value),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Empty => write!(f, "empty"),
        }
    }
}

/// Type tag of literals and declarations.
///
/// The first five tags are the literal types; the rest only ever label
/// declarations whose initializer is not a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Int,
    Real,
    String,
    Boolean,
    Empty,
    List,
    Dictionary,
    Function,
    Expression,
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TypeTag::Int => "int",
            TypeTag::Real => "real",
            TypeTag::String => "string",
            TypeTag::Boolean => "boolean",
            TypeTag::Empty => "empty",
            TypeTag::List => "list",
            TypeTag::Dictionary => "dictionary",
            TypeTag::Function => "function",
            TypeTag::Expression => "expression",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    Equals,
    NotEquals,
    And,
    Or,
    Xor,
    Not,
    Is,
    In,
}

impl Operator {
    pub fn from_token(kind: TokenKind) -> Option<Operator> {
        let operator = match kind {
            TokenKind::Plus => Operator::Plus,
            TokenKind::Dash => Operator::Minus,
            TokenKind::Star => Operator::Multiply,
            TokenKind::Slash => Operator::Divide,
            TokenKind::Less => Operator::Less,
            TokenKind::Greater => Operator::Greater,
            TokenKind::LessEquals => Operator::LessEquals,
            TokenKind::GreaterEquals => Operator::GreaterEquals,
            TokenKind::Equals => Operator::Equals,
            TokenKind::NotEquals => Operator::NotEquals,
            TokenKind::And => Operator::And,
            TokenKind::Or => Operator::Or,
            TokenKind::Xor => Operator::Xor,
            TokenKind::Not => Operator::Not,
            TokenKind::Is => Operator::Is,
            TokenKind::In => Operator::In,
            _ => return None,
        };
        Some(operator)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Less => "<",
            Operator::Greater => ">",
            Operator::LessEquals => "<=",
            Operator::GreaterEquals => ">=",
            Operator::Equals => "=",
            Operator::NotEquals => "/=",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Xor => "xor",
            Operator::Not => "not",
            Operator::Is => "is",
            Operator::In => "in",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
