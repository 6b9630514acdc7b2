//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Case-insensitive keywords and identifiers
//! - Numeric literals (integers, reals, index chains)
//! - String literals with escape sequences
//! - Operators and punctuation
//! - Comments
//! - Error cases

use super::{
    lexer::tokenize,
    tokens::{TokenKind, TokenPayload},
};
use crate::errors::errors::ErrorImpl;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.d".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "var if then else end while for in loop func is return print";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Var,
            TokenKind::If,
            TokenKind::Then,
            TokenKind::Else,
            TokenKind::End,
            TokenKind::While,
            TokenKind::For,
            TokenKind::In,
            TokenKind::Loop,
            TokenKind::Func,
            TokenKind::Is,
            TokenKind::Return,
            TokenKind::Print,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_keywords_case_insensitive() {
    assert_eq!(
        kinds("VAR Print ReadInt readREAL READSTRING Length"),
        vec![
            TokenKind::Var,
            TokenKind::Print,
            TokenKind::ReadInt,
            TokenKind::ReadReal,
            TokenKind::ReadString,
            TokenKind::Length,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_type_names_and_logic() {
    assert_eq!(
        kinds("int real bool string empty and or xor not"),
        vec![
            TokenKind::IntType,
            TokenKind::RealType,
            TokenKind::BoolType,
            TokenKind::StringType,
            TokenKind::Empty,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Xor,
            TokenKind::Not,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore CamelCase".to_string();
    let tokens = tokenize(source, Some("test.d".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].identifier(), Some("foo"));
    assert_eq!(tokens[2].identifier(), Some("baz_123"));
    assert_eq!(tokens[3].identifier(), Some("_underscore"));
    assert_eq!(tokens[4].identifier(), Some("CamelCase"));
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_booleans() {
    let source = "true FALSE".to_string();
    let tokens = tokenize(source, Some("test.d".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Boolean);
    assert_eq!(tokens[0].payload, Some(TokenPayload::Boolean(true)));
    assert_eq!(tokens[1].kind, TokenKind::Boolean);
    assert_eq!(tokens[1].payload, Some(TokenPayload::Boolean(false)));
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 2.5 0 100.5".to_string();
    let tokens = tokenize(source, Some("test.d".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].payload, Some(TokenPayload::Integer(42)));
    assert_eq!(tokens[1].kind, TokenKind::Real);
    assert_eq!(tokens[1].payload, Some(TokenPayload::Real(2.5)));
    assert_eq!(tokens[2].kind, TokenKind::Integer);
    assert_eq!(tokens[2].payload, Some(TokenPayload::Integer(0)));
    assert_eq!(tokens[3].kind, TokenKind::Real);
    assert_eq!(tokens[3].value, "100.5");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_malformed_real() {
    let result = tokenize("var x := 1.2.3;".to_string(), Some("test.d".to_string()));

    let error = result.unwrap_err();
    assert!(matches!(error.get_impl(), ErrorImpl::NumberParseError { .. }));
    assert_eq!(error.get_position().column, 10);
}

#[test]
fn test_tokenize_integer_overflow() {
    let result = tokenize("99999999999999999999".to_string(), Some("test.d".to_string()));
    assert!(matches!(
        result.unwrap_err().get_impl(),
        ErrorImpl::NumberParseError { .. }
    ));
}

#[test]
fn test_tokenize_index_chain() {
    let source = "t.0.1".to_string();
    let tokens = tokenize(source, Some("test.d".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].kind, TokenKind::Dot);
    assert_eq!(tokens[2].payload, Some(TokenPayload::Integer(0)));
    assert_eq!(tokens[3].kind, TokenKind::Dot);
    assert_eq!(tokens[4].payload, Some(TokenPayload::Integer(1)));
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_range() {
    assert_eq!(
        kinds("1..10"),
        vec![
            TokenKind::Integer,
            TokenKind::DotDot,
            TokenKind::Integer,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_tokenize_strings() {
    let source = r#""hello" "world" "multiple words""#.to_string();
    let tokens = tokenize(source, Some("test.d".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].payload, Some(TokenPayload::String("hello".to_string())));
    assert_eq!(tokens[0].value, "\"hello\"");
    assert_eq!(
        tokens[2].payload,
        Some(TokenPayload::String("multiple words".to_string()))
    );
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_string_escapes() {
    let source = r#""hello\nworld" "tab\there" "backslash\\" "quote\"test""#.to_string();
    let tokens = tokenize(source, Some("test.d".to_string())).unwrap();

    assert_eq!(tokens[0].payload, Some(TokenPayload::String("hello\nworld".to_string())));
    assert_eq!(tokens[1].payload, Some(TokenPayload::String("tab\there".to_string())));
    assert_eq!(tokens[2].payload, Some(TokenPayload::String("backslash\\".to_string())));
    assert_eq!(tokens[3].payload, Some(TokenPayload::String("quote\"test".to_string())));
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_empty_string() {
    let tokens = tokenize(r#""""#.to_string(), Some("test.d".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].payload, Some(TokenPayload::String(String::new())));
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_unterminated_string() {
    let result = tokenize("print \"oops;".to_string(), Some("test.d".to_string()));

    let error = result.unwrap_err();
    assert!(matches!(error.get_impl(), ErrorImpl::UnterminatedString));
    assert_eq!(error.get_position().column, 7);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / := => = /= < > <= >="),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Assignment,
            TokenKind::Arrow,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } [ ] . , ; : .."),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::DotDot,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let source = "var x := 5 // this is a comment\nvar y := 10".to_string();
    let tokens = tokenize(source, Some("test.d".to_string())).unwrap();

    assert_eq!(tokens[4].kind, TokenKind::Comment);
    assert_eq!(tokens[4].value, "// this is a comment");
    assert_eq!(tokens[5].kind, TokenKind::Var);
    assert_eq!(tokens[6].identifier(), Some("y"));
}

#[test]
fn test_tokenize_simple_program() {
    let source = "var x := 42;".to_string();
    let tokens = tokenize(source, Some("test.d".to_string())).unwrap();

    assert_eq!(tokens.len(), 6); // var, x, :=, 42, ;, EOF
    assert_eq!(tokens[0].kind, TokenKind::Var);
    assert_eq!(tokens[1].identifier(), Some("x"));
    assert_eq!(tokens[2].kind, TokenKind::Assignment);
    assert_eq!(tokens[3].payload, Some(TokenPayload::Integer(42)));
    assert_eq!(tokens[4].kind, TokenKind::Semicolon);
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_positions() {
    let source = "var a := 1;\n  print a;".to_string();
    let tokens = tokenize(source, Some("test.d".to_string())).unwrap();

    assert_eq!(tokens[0].span.line(), 1);
    assert_eq!(tokens[0].span.begin_column(), 1);
    assert_eq!(tokens[2].span.begin_column(), 7);
    assert_eq!(tokens[2].span.end_column(), 9);

    let print = &tokens[5];
    assert_eq!(print.kind, TokenKind::Print);
    assert_eq!(print.span.line(), 2);
    assert_eq!(print.span.begin_column(), 3);
}

#[test]
fn test_tokenize_unrecognized_token() {
    let result = tokenize("var x := @".to_string(), Some("test.d".to_string()));

    let error = result.unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().column, 10);
}

#[test]
fn test_tokenize_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
    assert_eq!(kinds("   \n\t "), vec![TokenKind::EOF]);
}
