use std::fmt::Write;

use crate::{errors::errors::Error, Span};

use super::{
    expressions::{
        DictionaryEntry, DictionaryLiteral, Expression, FunctionCall, Identifier, ListLiteral,
        Literal,
    },
    statements::{
        Block, ForStmt, FunctionDeclaration, IfStmt, PrintStmt, Program, ReturnStmt,
        VariableDeclaration, WhileStmt,
    },
};

/// AST node.
///
/// A closed set of variants; every node owns its children exclusively.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Program(Program),
    VariableDeclaration(VariableDeclaration),
    Identifier(Identifier),
    Literal(Literal),
    Expression(Expression),
    Block(Block),
    FunctionDeclaration(FunctionDeclaration),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Return(ReturnStmt),
    Print(PrintStmt),
    List(ListLiteral),
    Dictionary(DictionaryLiteral),
    DictionaryEntry(DictionaryEntry),
    FunctionCall(FunctionCall),
}

impl Node {
    /// Literals are constant; expressions are constant when not `not` and
    /// both operands are constant. Everything else is not.
    pub fn is_constant(&self) -> bool {
        match self {
            Node::Literal(_) => true,
            Node::Expression(expression) => expression.is_constant(),
            _ => false,
        }
    }

    pub fn span(&self) -> Option<&Span> {
        match self {
            Node::Program(_) | Node::Block(_) => None,
            Node::VariableDeclaration(node) => Some(&node.span),
            Node::Identifier(node) => Some(&node.span),
            Node::Literal(node) => Some(&node.span),
            Node::Expression(node) => Some(&node.span),
            Node::FunctionDeclaration(node) => Some(&node.span),
            Node::If(node) => Some(&node.span),
            Node::While(node) => Some(&node.span),
            Node::For(node) => Some(&node.span),
            Node::Return(node) => Some(&node.span),
            Node::Print(node) => Some(&node.span),
            Node::List(node) => Some(&node.span),
            Node::Dictionary(node) => Some(&node.span),
            Node::DictionaryEntry(node) => Some(&node.span),
            Node::FunctionCall(node) => Some(&node.span),
        }
    }

    /// Direct children in source order. Nodes held by embedded blocks are
    /// listed in place of the block.
    pub fn children(&self) -> Vec<&Node> {
        let mut children = vec![];
        match self {
            Node::Program(program) => children.extend(program.iter()),
            Node::Block(block) => children.extend(block.iter()),
            Node::VariableDeclaration(declaration) => {
                children.extend(declaration.initializer.as_deref())
            }
            Node::Identifier(_) | Node::Literal(_) => {}
            Node::Expression(expression) => {
                children.extend(expression.left.as_deref());
                children.push(&expression.right);
            }
            Node::FunctionDeclaration(function) => {
                children.extend(function.header.iter());
                children.extend(function.body.iter());
            }
            Node::If(if_stmt) => {
                children.push(&if_stmt.condition);
                children.extend(if_stmt.then_body.iter());
                if let Some(else_body) = &if_stmt.else_body {
                    children.extend(else_body.iter());
                }
            }
            Node::While(while_stmt) => {
                children.push(&while_stmt.condition);
                children.extend(while_stmt.body.iter());
            }
            Node::For(for_stmt) => {
                children.push(&for_stmt.start);
                children.extend(for_stmt.end.as_deref());
                children.extend(for_stmt.body.iter());
            }
            Node::Return(return_stmt) => children.push(&return_stmt.value),
            Node::Print(print) => children.extend(print.expressions.iter()),
            Node::List(list) => children.extend(list.elements.iter()),
            Node::Dictionary(dictionary) => children.extend(dictionary.entries.iter()),
            Node::DictionaryEntry(entry) => {
                children.push(&entry.key);
                children.extend(entry.value.as_deref());
            }
            Node::FunctionCall(call) => children.extend(call.arguments.iter()),
        }
        children
    }

    /// Rebuilds the node with every child passed through `f`.
    ///
    /// Child positions are preserved; `f` replaces a child with a new owned
    /// subtree.
    pub fn try_map_children<F>(self, f: &mut F) -> Result<Node, Error>
    where
        F: FnMut(Node) -> Result<Node, Error>,
    {
        let node = match self {
            Node::Program(program) => Node::Program(Program {
                statements: map_nodes(program.statements, f)?,
            }),
            Node::Block(block) => Node::Block(map_block(block, f)?),
            Node::VariableDeclaration(declaration) => {
                Node::VariableDeclaration(VariableDeclaration {
                    initializer: map_optional(declaration.initializer, f)?,
                    ..declaration
                })
            }
            Node::Identifier(_) | Node::Literal(_) => self,
            Node::Expression(expression) => Node::Expression(Expression {
                left: map_optional(expression.left, f)?,
                right: map_boxed(expression.right, f)?,
                ..expression
            }),
            Node::FunctionDeclaration(function) => Node::FunctionDeclaration(FunctionDeclaration {
                header: map_block(function.header, f)?,
                body: map_block(function.body, f)?,
                span: function.span,
            }),
            Node::If(if_stmt) => Node::If(IfStmt {
                condition: map_boxed(if_stmt.condition, f)?,
                then_body: map_block(if_stmt.then_body, f)?,
                else_body: match if_stmt.else_body {
                    Some(block) => Some(map_block(block, f)?),
                    None => None,
                },
                span: if_stmt.span,
            }),
            Node::While(while_stmt) => Node::While(WhileStmt {
                condition: map_boxed(while_stmt.condition, f)?,
                body: map_block(while_stmt.body, f)?,
                span: while_stmt.span,
            }),
            Node::For(for_stmt) => Node::For(ForStmt {
                start: map_boxed(for_stmt.start, f)?,
                end: map_optional(for_stmt.end, f)?,
                body: map_block(for_stmt.body, f)?,
                ..for_stmt
            }),
            Node::Return(return_stmt) => Node::Return(ReturnStmt {
                value: map_boxed(return_stmt.value, f)?,
                span: return_stmt.span,
            }),
            Node::Print(print) => Node::Print(PrintStmt {
                expressions: map_block(print.expressions, f)?,
                span: print.span,
            }),
            Node::List(list) => Node::List(ListLiteral {
                elements: map_block(list.elements, f)?,
                ..list
            }),
            Node::Dictionary(dictionary) => Node::Dictionary(DictionaryLiteral {
                entries: map_block(dictionary.entries, f)?,
                ..dictionary
            }),
            Node::DictionaryEntry(entry) => Node::DictionaryEntry(DictionaryEntry {
                key: map_boxed(entry.key, f)?,
                value: map_optional(entry.value, f)?,
                span: entry.span,
            }),
            Node::FunctionCall(call) => Node::FunctionCall(FunctionCall {
                arguments: map_block(call.arguments, f)?,
                ..call
            }),
        };
        Ok(node)
    }

    /// Keeps only the statements of this node's statement lists for which
    /// `keep` returns true. Fixed child slots are never removed.
    pub fn retain_statements<F>(&mut self, keep: &mut F)
    where
        F: FnMut(&Node) -> bool,
    {
        let mut retain = |statements: &mut Vec<Node>| statements.retain(|node| keep(node));

        match self {
            Node::Program(program) => retain(&mut program.statements),
            Node::Block(block) => retain(&mut block.statements),
            Node::FunctionDeclaration(function) => {
                retain(&mut function.header.statements);
                retain(&mut function.body.statements);
            }
            Node::If(if_stmt) => {
                retain(&mut if_stmt.then_body.statements);
                if let Some(else_body) = &mut if_stmt.else_body {
                    retain(&mut else_body.statements);
                }
            }
            Node::While(while_stmt) => retain(&mut while_stmt.body.statements),
            Node::For(for_stmt) => retain(&mut for_stmt.body.statements),
            _ => {}
        }
    }

    /// Searches this subtree for a function declaration with the given name.
    pub fn find_function(&self, name: &str) -> Option<&FunctionDeclaration> {
        if let Node::FunctionDeclaration(function) = self {
            if function.name() == Some(name) {
                return Some(function);
            }
        }

        if let Node::VariableDeclaration(declaration) = self {
            if declaration.name() == name {
                if let Some(Node::FunctionDeclaration(function)) = declaration.initializer.as_deref()
                {
                    return Some(function);
                }
            }
        }

        self.children()
            .into_iter()
            .find_map(|child| child.find_function(name))
    }

    /// Renders the subtree as an indented tree.
    pub fn tree(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "{}", self.describe());
        write_branches(&mut output, &self.branches(), "");
        output
    }

    /// One-line description used by the tree printer and diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Node::Program(_) => String::from("Program"),
            Node::Block(block) => format!("Block: {}", block.label),
            Node::VariableDeclaration(declaration) => format!(
                "{}: {} | type: {}",
                if declaration.is_declaration { "Variable" } else { "Assignment" },
                declaration.name(),
                declaration.type_tag
            ),
            Node::Identifier(identifier) => format!("Identifier: {}", identifier.name),
            Node::Literal(literal) => format!(
                "Literal: {} | type: {}",
                literal.value,
                literal.value.type_tag()
            ),
            Node::Expression(expression) => format!("Expression: {}", expression.operator),
            Node::FunctionDeclaration(function) => {
                format!("Function: {}", function.name().unwrap_or("<anonymous>"))
            }
            Node::If(_) => String::from("If"),
            Node::While(_) => String::from("While"),
            Node::For(for_stmt) => format!("For: {}", for_stmt.variable.name),
            Node::Return(_) => String::from("Return"),
            Node::Print(_) => String::from("Print"),
            Node::List(list) => format!("List: {} elements", list.len()),
            Node::Dictionary(dictionary) => format!("Dictionary: {} entries", dictionary.len()),
            Node::DictionaryEntry(_) => String::from("Entry"),
            Node::FunctionCall(call) => format!("Call: {}", call.callee.name),
        }
    }

    fn branches(&self) -> Vec<Branch<'_>> {
        let mut branches = vec![];
        match self {
            Node::Program(program) => branches.extend(program.iter().map(Branch::Node)),
            Node::Block(block) => branches.extend(block.iter().map(Branch::Node)),
            Node::FunctionDeclaration(function) => {
                branches.push(Branch::Block(&function.header));
                branches.push(Branch::Block(&function.body));
            }
            Node::If(if_stmt) => {
                branches.push(Branch::Node(&if_stmt.condition));
                branches.push(Branch::Block(&if_stmt.then_body));
                if let Some(else_body) = &if_stmt.else_body {
                    branches.push(Branch::Block(else_body));
                }
            }
            Node::While(while_stmt) => {
                branches.push(Branch::Node(&while_stmt.condition));
                branches.push(Branch::Block(&while_stmt.body));
            }
            Node::For(for_stmt) => {
                branches.push(Branch::Node(&for_stmt.start));
                if let Some(end) = &for_stmt.end {
                    branches.push(Branch::Node(end));
                }
                branches.push(Branch::Block(&for_stmt.body));
            }
            Node::Print(print) => branches.push(Branch::Block(&print.expressions)),
            Node::List(list) => branches.push(Branch::Block(&list.elements)),
            Node::Dictionary(dictionary) => branches.push(Branch::Block(&dictionary.entries)),
            Node::FunctionCall(call) => branches.push(Branch::Block(&call.arguments)),
            _ => branches.extend(self.children().into_iter().map(Branch::Node)),
        }
        branches
    }
}

enum Branch<'a> {
    Node(&'a Node),
    Block(&'a Block),
}

fn write_branches(output: &mut String, branches: &[Branch<'_>], prefix: &str) {
    for (index, branch) in branches.iter().enumerate() {
        let last = index + 1 == branches.len();
        let (connector, extension) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        let child_prefix = format!("{}{}", prefix, extension);

        match branch {
            Branch::Node(node) => {
                let _ = writeln!(output, "{}{}{}", prefix, connector, node.describe());
                write_branches(output, &node.branches(), &child_prefix);
            }
            Branch::Block(block) => {
                let _ = writeln!(output, "{}{}Block: {}", prefix, connector, block.label);
                let nodes: Vec<Branch<'_>> = block.iter().map(Branch::Node).collect();
                write_branches(output, &nodes, &child_prefix);
            }
        }
    }
}

fn map_nodes<F>(nodes: Vec<Node>, f: &mut F) -> Result<Vec<Node>, Error>
where
    F: FnMut(Node) -> Result<Node, Error>,
{
    nodes.into_iter().map(|node| f(node)).collect()
}

fn map_block<F>(block: Block, f: &mut F) -> Result<Block, Error>
where
    F: FnMut(Node) -> Result<Node, Error>,
{
    Ok(Block {
        label: block.label,
        statements: map_nodes(block.statements, f)?,
    })
}

fn map_boxed<F>(node: Box<Node>, f: &mut F) -> Result<Box<Node>, Error>
where
    F: FnMut(Node) -> Result<Node, Error>,
{
    f(*node).map(Box::new)
}

fn map_optional<F>(node: Option<Box<Node>>, f: &mut F) -> Result<Option<Box<Node>>, Error>
where
    F: FnMut(Node) -> Result<Node, Error>,
{
    node.map(|node| map_boxed(node, f)).transpose()
}
