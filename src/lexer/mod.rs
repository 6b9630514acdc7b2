//! Lexical analysis.
//!
//! Converts source text into a stream of tokens for the parser. It handles:
//!
//! - Tokenization of source text using an ordered regex pattern table
//! - Case-insensitive keywords, identifiers, literals and operators
//! - Line and column tracking for error reporting
//! - Comments (emitted as tokens) and whitespace (skipped)

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
