use std::slice::Iter;

use crate::Span;

use super::{
    ast::Node,
    expressions::Identifier,
    types::TypeTag,
};

/// Root of a parsed source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Node>,
}

impl Program {
    pub fn iter(&self) -> Iter<'_, Node> {
        self.statements.iter()
    }
}

/// Labelled ordered list of nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub label: &'static str,
    pub statements: Vec<Node>,
}

impl Block {
    pub fn new(label: &'static str, statements: Vec<Node>) -> Self {
        Block { label, statements }
    }

    pub fn iter(&self) -> Iter<'_, Node> {
        self.statements.iter()
    }
}

/// `var x := e`, bare `var x`, or plain assignment `x := e`
/// (`is_declaration == false`).
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub name: Identifier,
    pub initializer: Option<Box<Node>>,
    pub type_tag: TypeTag,
    pub is_declaration: bool,
    pub span: Span,
}

impl VariableDeclaration {
    pub fn name(&self) -> &str {
        &self.name.name
    }

    /// Type tag implied by an initializer.
    pub fn tag_for(initializer: Option<&Node>) -> TypeTag {
        match initializer {
            None => TypeTag::Empty,
            Some(Node::Literal(literal)) => literal.value.type_tag(),
            Some(Node::List(_)) => TypeTag::List,
            Some(Node::Dictionary(_)) => TypeTag::Dictionary,
            Some(Node::FunctionDeclaration(_)) => TypeTag::Function,
            Some(_) => TypeTag::Expression,
        }
    }
}

/// Function declaration.
///
/// `header` holds the name `Identifier` followed by the `param` block.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub header: Block,
    pub body: Block,
    pub span: Span,
}

impl FunctionDeclaration {
    pub fn new(name: Identifier, parameters: Vec<Node>, body: Block, span: Span) -> Self {
        FunctionDeclaration {
            header: Block::new(
                "head",
                vec![
                    Node::Identifier(name),
                    Node::Block(Block::new("param", parameters)),
                ],
            ),
            body,
            span,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self.header.statements.first() {
            Some(Node::Identifier(identifier)) => Some(&identifier.name),
            _ => None,
        }
    }

    pub fn parameters(&self) -> Option<&Block> {
        match self.header.statements.get(1) {
            Some(Node::Block(block)) => Some(block),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Box<Node>,
    pub then_body: Block,
    pub else_body: Option<Block>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Box<Node>,
    pub body: Block,
    pub span: Span,
}

/// `for x in start[..end] loop body end`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub variable: Identifier,
    pub start: Box<Node>,
    pub end: Option<Box<Node>>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Box<Node>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub expressions: Block,
    pub span: Span,
}
