use std::collections::HashSet;

use tracing::debug;

use crate::{
    ast::{
        ast::Node,
        expressions::{DictionaryEntry, DictionaryLiteral, Expression, FunctionCall, Identifier, ListLiteral, Literal},
        statements::Block,
        types::{Operator, Value},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind, TokenPayload},
    symbols::symbols::{Symbol, SymbolKind, GLOBAL_SCOPE},
    Position, Span,
};

use super::{index::parse_index_chain, lookups::BindingPower, parser::Parser};

fn binary(left: Option<Node>, operator: Operator, right: Node, start: &Position, parser: &Parser) -> Node {
    Node::Expression(Expression {
        left: left.map(Box::new),
        operator,
        right: Box::new(right),
        span: parser.span_from(start),
    })
}

/// Logical level: comparisons joined by `and`, `or` and `xor`.
pub fn parse_condition(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();

    let mut left = if parser.current_token_kind() == TokenKind::Identifier
        && matches!(parser.peek_kind(), TokenKind::Is | TokenKind::In)
    {
        parse_type_check(parser)?
    } else {
        parse_comparison(parser)?
    };

    while parser.current_token_kind().is_logical() {
        let Some(operator) = Operator::from_token(parser.advance().kind) else {
            return Err(parser.unexpected());
        };
        let right = parse_comparison(parser)?;
        left = binary(Some(left), operator, right, &start, parser);
    }

    Ok(left)
}

/// `not c`, or an arithmetic expression optionally compared to another.
pub fn parse_comparison(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();

    if parser.current_token_kind() == TokenKind::Not {
        parser.advance();
        let operand = parse_comparison(parser)?;
        return Ok(binary(None, Operator::Not, operand, &start, parser));
    }

    let left = parse_expression(parser)?;

    if parser.current_token_kind().is_comparison() {
        let Some(operator) = Operator::from_token(parser.advance().kind) else {
            return Err(parser.unexpected());
        };
        let right = parse_expression(parser)?;
        return Ok(binary(Some(left), operator, right, &start, parser));
    }

    Ok(left)
}

/// `x is int`, `x in string`
fn parse_type_check(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    let name_token = parser.advance().clone();
    let subject = resolve_variable(parser, &name_token)?;

    let Some(operator) = Operator::from_token(parser.advance().kind) else {
        return Err(parser.unexpected());
    };

    let type_token = parser.current_token().clone();
    match type_token.kind {
        TokenKind::IntType
        | TokenKind::RealType
        | TokenKind::BoolType
        | TokenKind::StringType
        | TokenKind::Empty
        | TokenKind::Func => {
            parser.advance();
        }
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: type_token.value.clone(),
                    message: String::from("expected a type name"),
                },
                type_token.span.start.clone(),
            ))
        }
    }

    let type_name = Node::Literal(Literal {
        value: Value::String(type_token.value.to_lowercase()),
        span: type_token.span.clone(),
    });

    Ok(binary(Some(subject), operator, type_name, &start, parser))
}

/// Arithmetic expression. `+ -` bind weaker than `* /`, all left associative.
pub fn parse_expression(parser: &mut Parser) -> Result<Node, Error> {
    parse_binary(parser, BindingPower::Default)
}

fn parse_binary(parser: &mut Parser, min_bp: BindingPower) -> Result<Node, Error> {
    let start = parser.get_position();
    let mut left = parse_primary(parser)?;

    loop {
        let kind = parser.current_token_kind();
        let Some(&bp) = parser.get_bp_lookup().get(&kind) else {
            break;
        };
        if bp <= min_bp {
            break;
        }

        parser.advance();
        let Some(operator) = Operator::from_token(kind) else {
            return Err(parser.unexpected());
        };
        let right = parse_binary(parser, bp)?;
        left = binary(Some(left), operator, right, &start, parser);
    }

    Ok(left)
}

pub fn parse_primary(parser: &mut Parser) -> Result<Node, Error> {
    match parser.current_token_kind() {
        TokenKind::Integer
        | TokenKind::Real
        | TokenKind::String
        | TokenKind::Boolean
        | TokenKind::Empty => {
            let token = parser.advance().clone();
            literal_from(&token)
        }
        TokenKind::Dash => parse_negative_literal(parser),
        TokenKind::OpenParen => {
            parser.advance();
            let inner = parse_condition(parser)?;
            parser.expect(TokenKind::CloseParen)?;
            Ok(inner)
        }
        TokenKind::OpenBracket => parse_list(parser, None),
        TokenKind::OpenCurly => parse_dictionary(parser, None),
        kind if kind.is_read_builtin() => parse_read_call(parser),
        TokenKind::Identifier => parse_identifier_expr(parser),
        _ => Err(parser.unexpected()),
    }
}

fn literal_from(token: &Token) -> Result<Node, Error> {
    let value = match (&token.kind, &token.payload) {
        (TokenKind::Integer, Some(TokenPayload::Integer(value))) => Value::Int(*value),
        (TokenKind::Real, Some(TokenPayload::Real(value))) => Value::Real(*value),
        (TokenKind::String, Some(TokenPayload::String(value))) => Value::String(value.clone()),
        (TokenKind::Boolean, Some(TokenPayload::Boolean(value))) => Value::Boolean(*value),
        (TokenKind::Empty, _) => Value::Empty,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            ))
        }
    };

    Ok(Node::Literal(Literal {
        value,
        span: token.span.clone(),
    }))
}

/// Unary minus is only accepted directly in front of a number.
fn parse_negative_literal(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start.clone();
    let token = parser.current_token().clone();

    let value = match &token.payload {
        Some(TokenPayload::Integer(value)) => Value::Int(-value),
        Some(TokenPayload::Real(value)) => Value::Real(-value),
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: token.value.clone(),
                    message: String::from("unary minus only applies to numeric literals"),
                },
                token.span.start.clone(),
            ))
        }
    };
    parser.advance();

    Ok(Node::Literal(Literal {
        value,
        span: Span {
            start,
            end: token.span.end.clone(),
        },
    }))
}

/// `readInt()`, `readReal()`, `readString()`
fn parse_read_call(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.advance().clone();
    parser.expect(TokenKind::OpenParen)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Node::FunctionCall(FunctionCall {
        callee: Identifier {
            name: token.value.clone(),
            span: token.span.clone(),
        },
        arguments: Block::new("param", vec![]),
        span: parser.span_from(&token.span.start),
    }))
}

/// Resolves a plain variable reference in the current scope and counts the use.
fn resolve_variable(parser: &mut Parser, token: &Token) -> Result<Node, Error> {
    let scope = parser.scope().to_string();
    if !parser.symbols_mut().add_use(&token.value, &scope) {
        return Err(Error::new(
            ErrorImpl::VariableNotDeclared {
                variable: token.value.clone(),
            },
            token.span.start.clone(),
        ));
    }

    Ok(Node::Identifier(Identifier {
        name: token.value.clone(),
        span: token.span.clone(),
    }))
}

fn parse_identifier_expr(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.current_token().clone();

    if parser.is_function(&token.value) {
        return parse_call(parser);
    }

    parser.advance();
    let identifier = resolve_variable(parser, &token)?;

    match parser.current_token_kind() {
        TokenKind::Dot | TokenKind::OpenBracket => parse_index_chain(parser, &token),
        _ => Ok(identifier),
    }
}

fn parse_call(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.advance().clone();
    let scope = parser.scope().to_string();
    if !parser.symbols_mut().add_use(&token.value, &scope)
        && !parser.symbols_mut().add_use(&token.value, GLOBAL_SCOPE)
    {
        debug!(
            "Call to {} at {}:{} has no symbol in {} or {}, use not counted",
            token.value, token.span.start.line, token.span.start.column, scope, GLOBAL_SCOPE
        );
    }

    let mut arguments = Vec::new();
    if parser.current_token_kind() == TokenKind::OpenParen {
        parser.advance();
        while parser.current_token_kind() != TokenKind::CloseParen {
            arguments.push(parse_condition(parser)?);

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else if parser.current_token_kind() != TokenKind::CloseParen {
                return Err(parser.unexpected());
            }
        }
        parser.expect(TokenKind::CloseParen)?;
    }

    Ok(Node::FunctionCall(FunctionCall {
        callee: Identifier {
            name: token.value.clone(),
            span: token.span.clone(),
        },
        arguments: Block::new("param", arguments),
        span: parser.span_from(&token.span.start),
    }))
}

/// Right hand side of `var name := ...` or `name := ...`.
///
/// List and dictionary literals are named after the variable; dictionary
/// keys are registered with the variable name as their scope tag.
pub fn parse_collection_initializer(parser: &mut Parser, name: &str) -> Result<Node, Error> {
    match parser.current_token_kind() {
        TokenKind::OpenBracket => parse_list(parser, Some(name)),
        TokenKind::OpenCurly => parse_dictionary(parser, Some(name)),
        _ => parse_condition(parser),
    }
}

pub fn parse_list(parser: &mut Parser, name: Option<&str>) -> Result<Node, Error> {
    let start = parser.advance().span.start.clone();
    let mut elements = Vec::new();

    while parser.current_token_kind() != TokenKind::CloseBracket {
        elements.push(parse_condition(parser)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseBracket {
            return Err(parser.unexpected());
        }
    }
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Node::List(ListLiteral {
        elements: Block::new("elements", elements),
        name: name.map(String::from),
        span: parser.span_from(&start),
    }))
}

/// `{k := v, k2, ...}`.
///
/// A named dictionary is parsed with its name as scope tag, so its values
/// resolve identifiers in that scope and its keys are registered under it.
/// Anonymous dictionaries register nothing.
pub fn parse_dictionary(parser: &mut Parser, name: Option<&str>) -> Result<Node, Error> {
    match name {
        Some(name) => parser.with_scope(name, |parser| parse_dictionary_entries(parser, Some(name))),
        None => parse_dictionary_entries(parser, None),
    }
}

fn parse_dictionary_entries(parser: &mut Parser, name: Option<&str>) -> Result<Node, Error> {
    let start = parser.advance().span.start.clone();
    let mut entries = Vec::new();
    let mut seen_keys = HashSet::new();

    while parser.current_token_kind() != TokenKind::CloseCurly {
        let key_error = Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("expected dictionary key"),
            },
            parser.get_position(),
        );
        let key = parser.expect_error(TokenKind::Identifier, Some(key_error))?;

        if !seen_keys.insert(key.value.clone()) {
            return Err(Error::new(
                ErrorImpl::DuplicateKey {
                    key: key.value.clone(),
                    collection: name.unwrap_or("dictionary").to_string(),
                },
                key.span.start.clone(),
            ));
        }

        let value = if parser.current_token_kind() == TokenKind::Assignment {
            parser.advance();
            Some(match (name, parser.current_token_kind()) {
                (Some(_), TokenKind::OpenCurly) => parse_dictionary(parser, Some(&key.value))?,
                (Some(_), TokenKind::OpenBracket) => parse_list(parser, Some(&key.value))?,
                _ => parse_condition(parser)?,
            })
        } else {
            None
        };

        if let Some(scope) = name {
            let length = match &value {
                Some(Node::List(list)) => list.len(),
                Some(Node::Dictionary(dictionary)) => dictionary.len(),
                _ => 0,
            };
            parser.symbols_mut().add_symbol(
                Symbol::new(&key.value, SymbolKind::DictKey, scope)
                    .with_index(entries.len())
                    .with_length(length)
                    .with_node(value.clone()),
            );
        }

        entries.push(Node::DictionaryEntry(DictionaryEntry {
            key: Box::new(Node::Identifier(Identifier {
                name: key.value.clone(),
                span: key.span.clone(),
            })),
            value: value.map(Box::new),
            span: parser.span_from(&key.span.start),
        }));

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseCurly {
            return Err(parser.unexpected());
        }
    }
    parser.expect(TokenKind::CloseCurly)?;

    Ok(Node::Dictionary(DictionaryLiteral {
        entries: Block::new("entries", entries),
        name: name.map(String::from),
        span: parser.span_from(&start),
    }))
}
