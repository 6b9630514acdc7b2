use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    /// Keywords are matched case-insensitively; the key is the lowercase form.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("var", TokenKind::Var);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("end", TokenKind::End);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("in", TokenKind::In);
        map.insert("loop", TokenKind::Loop);
        map.insert("func", TokenKind::Func);
        map.insert("is", TokenKind::Is);
        map.insert("return", TokenKind::Return);
        map.insert("print", TokenKind::Print);
        map.insert("readint", TokenKind::ReadInt);
        map.insert("readreal", TokenKind::ReadReal);
        map.insert("readstring", TokenKind::ReadString);
        map.insert("length", TokenKind::Length);
        map.insert("true", TokenKind::Boolean);
        map.insert("false", TokenKind::Boolean);
        map.insert("empty", TokenKind::Empty);
        map.insert("int", TokenKind::IntType);
        map.insert("real", TokenKind::RealType);
        map.insert("bool", TokenKind::BoolType);
        map.insert("string", TokenKind::StringType);
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("xor", TokenKind::Xor);
        map.insert("not", TokenKind::Not);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Integer,
    Real,
    String,
    Boolean,
    Empty,
    Identifier,
    Comment,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // :=
    Arrow,      // =>
    Equals,     // =
    NotEquals,  // /=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Plus,
    Dash,
    Slash,
    Star,

    Dot,
    DotDot,
    Semicolon,
    Colon,
    Comma,

    // Reserved
    Var,
    If,
    Then,
    Else,
    End,
    While,
    For,
    In,
    Loop,
    Func,
    Is,
    Return,
    Print,
    ReadInt,
    ReadReal,
    ReadString,
    Length,
    IntType,
    RealType,
    BoolType,
    StringType,
    And,
    Or,
    Xor,
    Not,
}

impl TokenKind {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::Less
                | TokenKind::LessEquals
                | TokenKind::Greater
                | TokenKind::GreaterEquals
                | TokenKind::Equals
                | TokenKind::NotEquals
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, TokenKind::And | TokenKind::Or | TokenKind::Xor)
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus | TokenKind::Dash | TokenKind::Star | TokenKind::Slash
        )
    }

    pub fn is_read_builtin(&self) -> bool {
        matches!(
            self,
            TokenKind::ReadInt | TokenKind::ReadReal | TokenKind::ReadString
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Typed value carried by literal and identifier tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenPayload {
    Identifier(String),
    Integer(i64),
    Real(f64),
    String(String),
    Boolean(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub payload: Option<TokenPayload>,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn identifier(&self) -> Option<&str> {
        match &self.payload {
            Some(TokenPayload::Identifier(name)) => Some(name),
            _ => None,
        }
    }

    pub fn debug(&self) {
        match &self.payload {
            Some(payload) => tracing::trace!(
                "{} {:?} [Line:{} pos: {}:{}]",
                self.kind,
                payload,
                self.span.line(),
                self.span.begin_column(),
                self.span.end_column()
            ),
            None => tracing::trace!(
                "{} [Line:{} pos: {}:{}]",
                self.kind,
                self.span.line(),
                self.span.begin_column(),
                self.span.end_column()
            ),
        }
    }
}
