use crate::Span;

use super::{
    ast::Node,
    statements::Block,
    types::{Operator, Value},
};

/// Identifier
/// A reference to a declared name.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

/// Literal
/// A resolved value; always constant.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: Value,
    pub span: Span,
}

/// Expression
/// Binary operation, or unary `not` when `left` is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub left: Option<Box<Node>>,
    pub operator: Operator,
    pub right: Box<Node>,
    pub span: Span,
}

impl Expression {
    pub fn is_constant(&self) -> bool {
        self.operator != Operator::Not
            && self.left.as_ref().is_some_and(|left| left.is_constant())
            && self.right.is_constant()
    }
}

/// List literal `[a, b, c]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListLiteral {
    pub elements: Block,
    pub name: Option<String>,
    pub span: Span,
}

impl ListLiteral {
    pub fn len(&self) -> usize {
        self.elements.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.statements.is_empty()
    }
}

/// Dictionary literal `{k := v, k2}`.
///
/// `name` is the scope tag its keys were registered under.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryLiteral {
    pub entries: Block,
    pub name: Option<String>,
    pub span: Span,
}

impl DictionaryLiteral {
    pub fn len(&self) -> usize {
        self.entries.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.statements.is_empty()
    }
}

/// A dictionary `key := value` pair, or a single step of an indexing chain
/// where `key` is the indexed expression and `value` the index.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryEntry {
    pub key: Box<Node>,
    pub value: Option<Box<Node>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub callee: Identifier,
    pub arguments: Block,
    pub span: Span,
}
