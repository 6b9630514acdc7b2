//! Resolution of indexing chains such as `t.a.0`, `l[2]` or `d.length`.
//!
//! Indices must be literal. Each step is checked against the collection the
//! previous step produced: lists by element position, dictionaries through
//! the keys registered in the symbol table under the dictionary's name. A
//! chain ending on a literal value is replaced by that literal.

use tracing::trace;

use crate::{
    ast::{
        ast::Node,
        expressions::{DictionaryEntry, Identifier, Literal},
        types::Value,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind, TokenPayload},
    symbols::symbols::SymbolKind,
    Position, Span,
};

use super::parser::Parser;

#[derive(Debug, Clone, PartialEq)]
enum IndexStep {
    Position(i64),
    Key(String),
    Length,
}

impl IndexStep {
    fn text(&self) -> String {
        match self {
            IndexStep::Position(index) => index.to_string(),
            IndexStep::Key(key) => key.clone(),
            IndexStep::Length => String::from("length"),
        }
    }
}

fn non_literal(token: &Token) -> Error {
    Error::new(
        ErrorImpl::NonLiteralIndex {
            token: token.value.clone(),
        },
        token.span.start.clone(),
    )
}

/// `.name`, `.0`, `.length`, `[0]`, `[-1]`, `["key"]`, `[name]`, `[length]`
fn parse_index_step(parser: &mut Parser) -> Result<(IndexStep, Position), Error> {
    let opener = parser.advance().kind;
    let token = parser.current_token().clone();

    let step = match (&token.kind, &token.payload) {
        (TokenKind::Identifier, _) => IndexStep::Key(token.value.clone()),
        (TokenKind::Integer, Some(TokenPayload::Integer(index))) => IndexStep::Position(*index),
        (TokenKind::Length, _) => IndexStep::Length,
        (TokenKind::String, Some(TokenPayload::String(key))) if opener == TokenKind::OpenBracket => {
            IndexStep::Key(key.clone())
        }
        (TokenKind::Dash, _) if opener == TokenKind::OpenBracket => {
            parser.advance();
            match &parser.current_token().payload {
                Some(TokenPayload::Integer(index)) => IndexStep::Position(-index),
                _ => return Err(non_literal(parser.current_token())),
            }
        }
        _ => return Err(non_literal(&token)),
    };
    parser.advance();

    if opener == TokenKind::OpenBracket && parser.current_token_kind() != TokenKind::CloseBracket {
        return Err(non_literal(parser.current_token()));
    }
    if opener == TokenKind::OpenBracket {
        parser.advance();
    }

    Ok((step, token.span.start))
}

/// Resolves one step against `target`, the node the chain currently points at.
///
/// Returns the node the step selects, `None` when it selects a key without value.
fn resolve_step(
    parser: &Parser,
    target: Option<&Node>,
    collection: &str,
    step: &IndexStep,
    position: &Position,
) -> Result<Option<Node>, Error> {
    let out_of_bounds = |index: i64| {
        Error::new(
            ErrorImpl::IndexOutOfBounds {
                index,
                collection: collection.to_string(),
            },
            position.clone(),
        )
    };
    let length_literal = |length: usize| {
        Node::Literal(Literal {
            value: Value::Int(length as i64),
            span: Span {
                start: position.clone(),
                end: position.clone(),
            },
        })
    };

    match target {
        Some(Node::List(list)) => match step {
            IndexStep::Position(index) => usize::try_from(*index)
                .ok()
                .and_then(|index| list.elements.statements.get(index))
                .map(|element| Some(element.clone()))
                .ok_or_else(|| out_of_bounds(*index)),
            IndexStep::Key(key) => Err(Error::new(
                ErrorImpl::NonLiteralIndex { token: key.clone() },
                position.clone(),
            )),
            IndexStep::Length => Ok(Some(length_literal(list.len()))),
        },
        Some(Node::Dictionary(dictionary)) => {
            if let IndexStep::Length = step {
                return Ok(Some(length_literal(dictionary.len())));
            }

            // Anonymous dictionaries (e.g. inside a list) have no registered keys
            let Some(scope) = &dictionary.name else {
                return resolve_anonymous_entry(dictionary.entries.iter(), collection, step, position);
            };

            match step {
                IndexStep::Key(key) => parser
                    .symbols()
                    .get_symbol(key, scope)
                    .filter(|symbol| symbol.kind == SymbolKind::DictKey)
                    .map(|symbol| symbol.node.clone())
                    .ok_or_else(|| {
                        Error::new(
                            ErrorImpl::KeyNotFound {
                                key: key.clone(),
                                collection: collection.to_string(),
                            },
                            position.clone(),
                        )
                    }),
                IndexStep::Position(index) => {
                    if *index < 0 || *index as usize >= dictionary.len() {
                        return Err(out_of_bounds(*index));
                    }
                    parser
                        .symbols()
                        .get_symbol_by_index(scope, *index as usize)
                        .map(|symbol| symbol.node.clone())
                        .ok_or_else(|| out_of_bounds(*index))
                }
                IndexStep::Length => Ok(Some(length_literal(dictionary.len()))),
            }
        }
        _ => Err(Error::new(
            ErrorImpl::NotIndexable {
                variable: collection.to_string(),
            },
            position.clone(),
        )),
    }
}

fn resolve_anonymous_entry<'a>(
    mut entries: impl Iterator<Item = &'a Node>,
    collection: &str,
    step: &IndexStep,
    position: &Position,
) -> Result<Option<Node>, Error> {
    let value_of = |entry: &Node| match entry {
        Node::DictionaryEntry(entry) => entry.value.as_deref().cloned(),
        _ => None,
    };

    match step {
        IndexStep::Key(key) => entries
            .find(|entry| match entry {
                Node::DictionaryEntry(entry) => {
                    matches!(entry.key.as_ref(), Node::Identifier(identifier) if &identifier.name == key)
                }
                _ => false,
            })
            .map(value_of)
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::KeyNotFound {
                        key: key.clone(),
                        collection: collection.to_string(),
                    },
                    position.clone(),
                )
            }),
        IndexStep::Position(index) => usize::try_from(*index)
            .ok()
            .and_then(|index| entries.nth(index))
            .map(value_of)
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::IndexOutOfBounds {
                        index: *index,
                        collection: collection.to_string(),
                    },
                    position.clone(),
                )
            }),
        IndexStep::Length => Ok(None),
    }
}

/// Parses the indexing steps following the variable `name_token`.
///
/// The variable itself was already resolved and counted as used.
pub fn parse_index_chain(parser: &mut Parser, name_token: &Token) -> Result<Node, Error> {
    let start = name_token.span.start.clone();
    let mut target = parser
        .symbols()
        .get_node(&name_token.value, parser.scope())
        .cloned();
    let mut collection = name_token.value.clone();
    let mut chain = Node::Identifier(Identifier {
        name: name_token.value.clone(),
        span: name_token.span.clone(),
    });

    while matches!(
        parser.current_token_kind(),
        TokenKind::Dot | TokenKind::OpenBracket
    ) {
        let (step, position) = parse_index_step(parser)?;
        target = resolve_step(parser, target.as_ref(), &collection, &step, &position)?;
        trace!("{}[{}] resolved to {:?}", collection, step.text(), target);

        chain = Node::DictionaryEntry(DictionaryEntry {
            key: Box::new(chain),
            value: Some(Box::new(Node::Identifier(Identifier {
                name: step.text(),
                span: Span {
                    start: position.clone(),
                    end: position,
                },
            }))),
            span: parser.span_from(&start),
        });
        collection = format!("{}.{}", collection, step.text());
    }

    match target {
        Some(Node::Literal(literal)) => Ok(Node::Literal(Literal {
            value: literal.value,
            span: parser.span_from(&start),
        })),
        _ => Ok(chain),
    }
}
