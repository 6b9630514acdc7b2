//! Parser implementation.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! Statements are dispatched through a lookup table; expressions use
//! precedence climbing over a binding power table. Name resolution happens
//! while parsing: the parser owns the symbol table and the flat scope tag,
//! and consults the statements attached so far to resolve calls.

use std::{collections::HashMap, rc::Rc};

use tracing::debug;

use crate::{
    ast::{ast::Node, statements::Program},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    symbols::symbols::{SymbolTable, GLOBAL_SCOPE},
    Position, Span,
};

use super::{
    lookups::{create_token_lookups, BPLookup, BindingPower, StmtHandler, StmtLookup},
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
///
/// Besides the token cursor it carries the program built so far, the
/// symbol table and the current scope tag.
pub struct Parser {
    /// The list of tokens to parse, without comments and ending in `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for operator binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Top-level statements parsed so far
    program: Program,
    symbols: SymbolTable,
    /// Flat scope tag: `"global"` or the function/dictionary being parsed
    scope: String,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// Comment tokens are dropped and a trailing `EOF` is guaranteed.
    pub fn new(tokens: Vec<Token>, file: Rc<String>) -> Self {
        let mut tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|token| token.kind != TokenKind::Comment)
            .collect();

        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(|| Position::new(1, 1, &file));
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                payload: None,
                span: Span {
                    start: end.clone(),
                    end,
                },
            });
        }

        Parser {
            tokens,
            pos: 0,
            stmt_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            program: Program::default(),
            symbols: SymbolTable::new(),
            scope: String::from(GLOBAL_SCOPE),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the kind of the token after the current one.
    pub fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map(|token| token.kind)
            .unwrap_or(TokenKind::EOF)
    }

    /// Advances to the next token and returns the previous token.
    ///
    /// The cursor never moves past `EOF`.
    pub fn advance(&mut self) -> &Token {
        let previous = self.pos;
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[previous]
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() == expected_kind {
            return Ok(self.advance().clone());
        }

        match error {
            Some(error) => Err(error),
            None => {
                let token = self.current_token();
                Err(Error::new(
                    ErrorImpl::ExpectedToken {
                        expected: expected_kind.to_string(),
                        found: token.value.clone(),
                    },
                    token.span.start.clone(),
                ))
            }
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Builds an `UnexpectedToken` error at the current token.
    pub fn unexpected(&self) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
            },
            token.span.start.clone(),
        )
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    /// Span from `start` to the end of the previously consumed token.
    pub fn span_from(&self, start: &Position) -> Span {
        let end = self.tokens[self.pos.saturating_sub(1)].span.end.clone();
        Span {
            start: start.clone(),
            end,
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn is_global_scope(&self) -> bool {
        self.scope == GLOBAL_SCOPE
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    /// Runs `f` with `scope` as the current scope tag.
    ///
    /// The previous tag is restored afterwards, also when `f` fails.
    pub fn with_scope<T, F>(&mut self, scope: &str, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser) -> Result<T, Error>,
    {
        let previous = std::mem::replace(&mut self.scope, scope.to_string());
        debug!("entering scope {} from {}", scope, previous);

        let result = f(self);

        debug!("leaving scope {} for {}", self.scope, previous);
        self.scope = previous;
        result
    }

    /// Whether a function called `name` is declared by the statements
    /// already attached to the program. Functions further down the source
    /// are not visible yet.
    pub fn is_function(&self, name: &str) -> bool {
        self.program
            .iter()
            .any(|statement| statement.find_function(name).is_some())
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a binary operator and its binding power.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower) {
        self.binding_power_lookup.insert(kind, binding_power);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

/// Parses a stream of tokens into a `Program` node.
///
/// Returns the program together with the symbol table built while
/// parsing. Parsing stops at the first error.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<(Node, SymbolTable), Error> {
    let mut parser = Parser::new(tokens, file);
    create_token_lookups(&mut parser);

    while parser.has_tokens() {
        if parser.current_token_kind() == TokenKind::Semicolon {
            parser.advance();
            continue;
        }

        let statement = parse_stmt(&mut parser)?;
        parser.program.statements.push(statement);
    }

    debug!(
        "parsed {} statements, {} symbols",
        parser.program.statements.len(),
        parser.symbols.len()
    );
    parser.symbols.print_table();

    Ok((Node::Program(parser.program), parser.symbols))
}
