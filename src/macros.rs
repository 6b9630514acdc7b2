//! Lexer helper macros.
//!
//! `MK_TOKEN!` builds a `Token`; `MK_DEFAULT_HANDLER!` builds the pattern
//! handler for operators and delimiters whose text never varies.

/// Builds a `Token` from kind, raw text, span and an optional payload.
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Integer, text, span, Some(TokenPayload::Integer(42)));
/// let arrow = MK_TOKEN!(TokenKind::Arrow, String::from("=>"), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            payload: None,
            span: $span,
        }
    };
    ($kind:expr, $value:expr, $span:expr, $payload:expr) => {
        Token {
            kind: $kind,
            value: $value,
            payload: $payload,
            span: $span,
        }
    };
}

/// Handler for a fixed lexeme: pushes a payload-free token of `$kind` and
/// moves the cursor past `$value`.
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| -> Result<(), Error> {
            let span = lexer.span_for($value.len());
            lexer.push(MK_TOKEN!($kind, String::from($value), span));
            lexer.advance_n($value.len());
            Ok(())
        }
    };
}
