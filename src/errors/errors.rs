use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    /// Creates an error that has no source location, e.g. from the evaluator.
    pub fn unpositioned(error_impl: ErrorImpl) -> Self {
        Error::new(error_impl, Position::null())
    }

    /// Attaches a position if the error does not carry one yet.
    pub fn or_at(mut self, position: &Position) -> Self {
        if self.position.is_null() {
            self.position = position.clone();
        }
        self
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn category(&self) -> ErrorCategory {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::UnterminatedString => ErrorCategory::Lex,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::ExpectedToken { .. }
            | ErrorImpl::ReturnOutsideFunction
            | ErrorImpl::ElseWithoutIf => ErrorCategory::Syntax,
            ErrorImpl::VariableAlreadyDeclared { .. }
            | ErrorImpl::VariableNotDeclared { .. }
            | ErrorImpl::FunctionAlreadyDeclared { .. }
            | ErrorImpl::IndexOutOfBounds { .. }
            | ErrorImpl::KeyNotFound { .. }
            | ErrorImpl::DuplicateKey { .. }
            | ErrorImpl::NonLiteralIndex { .. }
            | ErrorImpl::NotIndexable { .. } => ErrorCategory::Semantic,
            ErrorImpl::InvalidOperandTypes { .. }
            | ErrorImpl::DivisionByZero
            | ErrorImpl::IntegerOverflow { .. }
            | ErrorImpl::UnsupportedValueType { .. } => ErrorCategory::Evaluation,
            ErrorImpl::VariableExists { .. } | ErrorImpl::VariableMissing { .. } => {
                ErrorCategory::Runtime
            }
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::ElseWithoutIf => "ElseWithoutIf",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::IndexOutOfBounds { .. } => "IndexOutOfBounds",
            ErrorImpl::KeyNotFound { .. } => "KeyNotFound",
            ErrorImpl::DuplicateKey { .. } => "DuplicateKey",
            ErrorImpl::NonLiteralIndex { .. } => "NonLiteralIndex",
            ErrorImpl::NotIndexable { .. } => "NotIndexable",
            ErrorImpl::InvalidOperandTypes { .. } => "InvalidOperandTypes",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::IntegerOverflow { .. } => "IntegerOverflow",
            ErrorImpl::UnsupportedValueType { .. } => "UnsupportedValueType",
            ErrorImpl::VariableExists { .. } => "VariableExists",
            ErrorImpl::VariableMissing { .. } => "VariableMissing",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it malformed or above the integer limit?",
                token
            )),
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("String literal is missing its closing `\"`"))
            }
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::ExpectedToken { expected, found } => {
                ErrorTip::Suggestion(format!("Expected `{}`, found `{}`", expected, found))
            }
            ErrorImpl::ReturnOutsideFunction => {
                ErrorTip::Suggestion(String::from("`return` must be used inside a function"))
            }
            ErrorImpl::ElseWithoutIf => {
                ErrorTip::Suggestion(String::from("`else` must follow the body of an `if`"))
            }
            ErrorImpl::VariableAlreadyDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` already declared", variable))
            }
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Identifier `{}` not declared", variable))
            }
            ErrorImpl::FunctionAlreadyDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` already declared", function))
            }
            ErrorImpl::IndexOutOfBounds { index, collection } => ErrorTip::Suggestion(format!(
                "Index {} out of bounds for `{}`",
                index, collection
            )),
            ErrorImpl::KeyNotFound { key, collection } => ErrorTip::Suggestion(format!(
                "Dictionary `{}` does not contain the key `{}`",
                collection, key
            )),
            ErrorImpl::DuplicateKey { key, collection } => ErrorTip::Suggestion(format!(
                "Key `{}` appears more than once in `{}`",
                key, collection
            )),
            ErrorImpl::NonLiteralIndex { token } => ErrorTip::Suggestion(format!(
                "Index `{}` must be an integer or key literal",
                token
            )),
            ErrorImpl::NotIndexable { variable } => {
                ErrorTip::Suggestion(format!("`{}` is not a list or dictionary literal", variable))
            }
            ErrorImpl::InvalidOperandTypes { operator, left, right } => {
                ErrorTip::Suggestion(format!(
                    "Operator `{}` is not defined for `{}` and `{}`",
                    operator, left, right
                ))
            }
            ErrorImpl::DivisionByZero => ErrorTip::None,
            ErrorImpl::IntegerOverflow { operator } => {
                ErrorTip::Suggestion(format!("Integer overflow while applying `{}`", operator))
            }
            ErrorImpl::UnsupportedValueType { value } => {
                ErrorTip::Suggestion(format!("Cannot evaluate `{}` to a value", value))
            }
            ErrorImpl::VariableExists { variable, scope } => ErrorTip::Suggestion(format!(
                "Variable `{}` already exists in scope `{}`",
                variable, scope
            )),
            ErrorImpl::VariableMissing { variable, scope } => ErrorTip::Suggestion(format!(
                "Variable `{}` not found in scope `{}`",
                variable, scope
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.position.is_null() {
            write!(f, "{}: {}", self.category(), self.internal_error)
        } else {
            write!(
                f,
                "{}: {} [Line: {}, Position: {}]",
                self.category(),
                self.internal_error,
                self.position.line,
                self.position.column
            )
        }
    }
}

impl std::error::Error for Error {}

/// The phase an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lex,
    Syntax,
    Semantic,
    Evaluation,
    Runtime,
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Lex => write!(f, "LexError"),
            ErrorCategory::Syntax => write!(f, "SyntaxError"),
            ErrorCategory::Semantic => write!(f, "SemanticError"),
            ErrorCategory::Evaluation => write!(f, "EvaluationError"),
            ErrorCategory::Runtime => write!(f, "RuntimeError"),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("expected {expected}, found {found:?}")]
    ExpectedToken { expected: String, found: String },
    #[error("return must be used inside the function")]
    ReturnOutsideFunction,
    #[error("else should be used together with if")]
    ElseWithoutIf,
    #[error("variable {variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("identifier not declared: {variable:?}")]
    VariableNotDeclared { variable: String },
    #[error("function {function:?} already declared")]
    FunctionAlreadyDeclared { function: String },
    #[error("index {index} out of bounds for {collection:?}")]
    IndexOutOfBounds { index: i64, collection: String },
    #[error("key {key:?} not found in dictionary {collection:?}")]
    KeyNotFound { key: String, collection: String },
    #[error("duplicate key {key:?} in dictionary {collection:?}")]
    DuplicateKey { key: String, collection: String },
    #[error("index {token:?} is not a literal")]
    NonLiteralIndex { token: String },
    #[error("{variable:?} cannot be indexed")]
    NotIndexable { variable: String },
    #[error("invalid operand types for {operator}: {left} and {right}")]
    InvalidOperandTypes { operator: String, left: String, right: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in {operator}")]
    IntegerOverflow { operator: String },
    #[error("unsupported value type: {value}")]
    UnsupportedValueType { value: String },
    #[error("variable {variable:?} already exists in scope {scope:?}")]
    VariableExists { variable: String, scope: String },
    #[error("variable {variable:?} not found in scope {scope:?}")]
    VariableMissing { variable: String, scope: String },
}
