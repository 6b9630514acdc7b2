//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into a tree of `Node`s while filling the symbol table. It handles:
//!
//! - Statement parsing (declarations, assignments, functions, control flow)
//! - Expression parsing with precedence climbing for arithmetic
//! - Conditions (comparisons, `not`, `and`/`or`/`xor`, `is`/`in` type checks)
//! - Literal indexing of lists and dictionaries, resolved while parsing
//!
//! Name resolution is scope-tag based: a name is found only when it was
//! registered under exactly the current tag.

pub mod expr;
pub mod index;
pub mod lookups;
pub mod parser;
pub mod stmt;
