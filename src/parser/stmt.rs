use tracing::debug;

use crate::{
    ast::{
        ast::Node,
        expressions::Identifier,
        statements::{
            Block, ForStmt, FunctionDeclaration, IfStmt, PrintStmt, ReturnStmt,
            VariableDeclaration, WhileStmt,
        },
        types::TypeTag,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    symbols::symbols::{Symbol, SymbolKind},
    Position,
};

use super::{
    expr::{parse_collection_initializer, parse_condition, parse_expression},
    parser::Parser,
};

pub fn parse_stmt(parser: &mut Parser) -> Result<Node, Error> {
    if let Some(handler) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

/// Consumes the `;` ending a simple statement.
///
/// It may be left out right before `end`, `else` or the end of input.
pub fn end_statement(parser: &mut Parser) -> Result<(), Error> {
    match parser.current_token_kind() {
        TokenKind::Semicolon => {
            parser.advance();
            Ok(())
        }
        TokenKind::End | TokenKind::Else | TokenKind::EOF => Ok(()),
        _ => Err(Error::new(
            ErrorImpl::ExpectedToken {
                expected: String::from(";"),
                found: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
    }
}

/// Parses statements up to (not including) one of `terminators`.
pub fn parse_block_until(
    parser: &mut Parser,
    label: &'static str,
    terminators: &[TokenKind],
) -> Result<Block, Error> {
    let mut statements = Vec::new();

    while !terminators.contains(&parser.current_token_kind()) {
        match parser.current_token_kind() {
            TokenKind::Semicolon => {
                parser.advance();
            }
            TokenKind::EOF => {
                return Err(Error::new(
                    ErrorImpl::ExpectedToken {
                        expected: String::from("end"),
                        found: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                ));
            }
            _ => statements.push(parse_stmt(parser)?),
        }
    }

    Ok(Block::new(label, statements))
}

fn identifier_from(token: &Token) -> Identifier {
    Identifier {
        name: token.value.clone(),
        span: token.span.clone(),
    }
}

fn expect_identifier(parser: &mut Parser, context: &str) -> Result<Token, Error> {
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: format!("expected identifier {}", context),
        },
        parser.get_position(),
    );
    parser.expect_error(TokenKind::Identifier, Some(error))
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let expression = parse_condition(parser)?;
    end_statement(parser)?;
    Ok(expression)
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start.clone();
    let name_token = expect_identifier(parser, "during variable declaration")?;
    let name = name_token.value.clone();

    if parser.symbols().contains(&name, parser.scope()) {
        return Err(Error::new(
            ErrorImpl::VariableAlreadyDeclared { variable: name },
            name_token.span.start.clone(),
        ));
    }

    let initializer = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();

        if parser.current_token_kind() == TokenKind::Func {
            return parse_function_literal(parser, &name_token, &start);
        }

        Some(parse_collection_initializer(parser, &name)?)
    } else {
        None
    };

    let length = match &initializer {
        Some(Node::List(list)) => list.len(),
        Some(Node::Dictionary(dictionary)) => dictionary.len(),
        _ => 0,
    };

    let scope = parser.scope().to_string();
    parser.symbols_mut().add_symbol(
        Symbol::new(&name, SymbolKind::Var, &scope)
            .with_length(length)
            .with_node(initializer.clone()),
    );

    end_statement(parser)?;

    let type_tag = VariableDeclaration::tag_for(initializer.as_ref());
    debug!("declared {} as {} in {}", name, type_tag, scope);

    Ok(Node::VariableDeclaration(VariableDeclaration {
        name: identifier_from(&name_token),
        initializer: initializer.map(Box::new),
        type_tag,
        is_declaration: true,
        span: parser.span_from(&start),
    }))
}

/// `var f := func(...) ...` declares `f` as a function in the enclosing scope.
fn parse_function_literal(
    parser: &mut Parser,
    name_token: &Token,
    start: &Position,
) -> Result<Node, Error> {
    let name = name_token.value.clone();
    let scope = parser.scope().to_string();
    parser
        .symbols_mut()
        .add_symbol(Symbol::new(&name, SymbolKind::Function, &scope));

    let function_start = parser.advance().span.start.clone();
    let function = parse_function_tail(parser, name_token, &function_start)?;

    Ok(Node::VariableDeclaration(VariableDeclaration {
        name: identifier_from(name_token),
        initializer: Some(Box::new(Node::FunctionDeclaration(function))),
        type_tag: TypeTag::Function,
        is_declaration: true,
        span: parser.span_from(start),
    }))
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start.clone();
    let name_token = expect_identifier(parser, "after func")?;
    let name = name_token.value.clone();

    if parser.symbols().contains(&name, parser.scope()) {
        return Err(Error::new(
            ErrorImpl::FunctionAlreadyDeclared { function: name },
            name_token.span.start.clone(),
        ));
    }

    let scope = parser.scope().to_string();
    parser
        .symbols_mut()
        .add_symbol(Symbol::new(&name, SymbolKind::Function, &scope));

    let function = parse_function_tail(parser, &name_token, &start)?;
    Ok(Node::FunctionDeclaration(function))
}

/// Parameters and body, parsed with the function name as scope tag.
fn parse_function_tail(
    parser: &mut Parser,
    name_token: &Token,
    start: &Position,
) -> Result<FunctionDeclaration, Error> {
    let name = name_token.value.clone();

    parser.with_scope(&name, |parser| {
        parser.expect(TokenKind::OpenParen)?;
        let mut parameters = Vec::new();

        while parser.current_token_kind() != TokenKind::CloseParen {
            parameters.push(parse_parameter(parser)?);

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else if parser.current_token_kind() != TokenKind::CloseParen {
                return Err(parser.unexpected());
            }
        }
        parser.expect(TokenKind::CloseParen)?;

        let body = match parser.current_token_kind() {
            TokenKind::Is => {
                parser.advance();
                let body = parse_block_until(parser, "body", &[TokenKind::End])?;
                parser.expect(TokenKind::End)?;
                body
            }
            TokenKind::Arrow => {
                parser.advance();
                Block::new("body", vec![parse_stmt(parser)?])
            }
            _ => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: parser.current_token().value.clone(),
                        message: String::from("expected `is` or `=>` before function body"),
                    },
                    parser.get_position(),
                ))
            }
        };

        Ok(FunctionDeclaration::new(
            identifier_from(name_token),
            parameters,
            body,
            parser.span_from(start),
        ))
    })
}

fn parse_parameter(parser: &mut Parser) -> Result<Node, Error> {
    let name_token = expect_identifier(parser, "in parameter list")?;
    let name = name_token.value.clone();

    if parser.symbols().contains(&name, parser.scope()) {
        return Err(Error::new(
            ErrorImpl::VariableAlreadyDeclared { variable: name },
            name_token.span.start.clone(),
        ));
    }

    let default = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expression(parser)?)
    } else {
        None
    };

    let scope = parser.scope().to_string();
    parser
        .symbols_mut()
        .add_symbol(Symbol::new(&name, SymbolKind::Param, &scope).with_node(default.clone()));

    Ok(Node::VariableDeclaration(VariableDeclaration {
        name: identifier_from(&name_token),
        type_tag: VariableDeclaration::tag_for(default.as_ref()),
        initializer: default.map(Box::new),
        is_declaration: true,
        span: parser.span_from(&name_token.span.start),
    }))
}

pub fn parse_identifier_stmt(parser: &mut Parser) -> Result<Node, Error> {
    if parser.peek_kind() != TokenKind::Assignment {
        return parse_expression_stmt(parser);
    }

    let name_token = parser.advance().clone();
    let name = name_token.value.clone();
    let scope = parser.scope().to_string();

    // Writing to a variable is not a use of it
    if !parser.symbols().contains(&name, &scope) {
        return Err(Error::new(
            ErrorImpl::VariableNotDeclared { variable: name },
            name_token.span.start.clone(),
        ));
    }

    parser.advance();
    let value = parse_collection_initializer(parser, &name)?;
    end_statement(parser)?;

    Ok(Node::VariableDeclaration(VariableDeclaration {
        name: identifier_from(&name_token),
        type_tag: VariableDeclaration::tag_for(Some(&value)),
        initializer: Some(Box::new(value)),
        is_declaration: false,
        span: parser.span_from(&name_token.span.start),
    }))
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start.clone();
    let mut expressions = vec![parse_condition(parser)?];

    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        expressions.push(parse_condition(parser)?);
    }

    end_statement(parser)?;

    Ok(Node::Print(PrintStmt {
        expressions: Block::new("expressions", expressions),
        span: parser.span_from(&start),
    }))
}

/// `if c then ... [else ...] end`; the older `if c then ... end else ... end`
/// form is accepted too.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start.clone();
    let condition = parse_condition(parser)?;
    parser.expect(TokenKind::Then)?;

    let then_body = parse_block_until(parser, "then", &[TokenKind::Else, TokenKind::End])?;

    if parser.current_token_kind() == TokenKind::End {
        parser.advance();
    }

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        let else_body = parse_block_until(parser, "else", &[TokenKind::End])?;
        parser.expect(TokenKind::End)?;
        Some(else_body)
    } else {
        None
    };

    Ok(Node::If(IfStmt {
        condition: Box::new(condition),
        then_body,
        else_body,
        span: parser.span_from(&start),
    }))
}

pub fn parse_else_without_if(parser: &mut Parser) -> Result<Node, Error> {
    Err(Error::new(ErrorImpl::ElseWithoutIf, parser.get_position()))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start.clone();
    let condition = parse_condition(parser)?;
    parser.expect(TokenKind::Loop)?;

    let body = parse_block_until(parser, "body", &[TokenKind::End])?;
    parser.expect(TokenKind::End)?;

    Ok(Node::While(WhileStmt {
        condition: Box::new(condition),
        body,
        span: parser.span_from(&start),
    }))
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.advance().span.start.clone();
    let variable = expect_identifier(parser, "after for")?;
    parser.expect(TokenKind::In)?;

    let range_start = parse_expression(parser)?;
    let range_end = if parser.current_token_kind() == TokenKind::DotDot {
        parser.advance();
        Some(parse_expression(parser)?)
    } else {
        None
    };

    parser.expect(TokenKind::Loop)?;

    // The loop variable is visible in the body, keeping an earlier declaration
    let scope = parser.scope().to_string();
    if !parser.symbols().contains(&variable.value, &scope) {
        parser
            .symbols_mut()
            .add_symbol(Symbol::new(&variable.value, SymbolKind::Var, &scope));
    }

    let body = parse_block_until(parser, "body", &[TokenKind::End])?;
    parser.expect(TokenKind::End)?;

    Ok(Node::For(ForStmt {
        variable: identifier_from(&variable),
        start: Box::new(range_start),
        end: range_end.map(Box::new),
        body,
        span: parser.span_from(&start),
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Node, Error> {
    if parser.is_global_scope() {
        return Err(Error::new(
            ErrorImpl::ReturnOutsideFunction,
            parser.get_position(),
        ));
    }

    let start = parser.advance().span.start.clone();
    let value = parse_condition(parser)?;
    end_statement(parser)?;

    Ok(Node::Return(ReturnStmt {
        value: Box::new(value),
        span: parser.span_from(&start),
    }))
}
