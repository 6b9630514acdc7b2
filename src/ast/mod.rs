//! AST (Abstract Syntax Tree) module
//! Contains all definitions related to the tree the parser builds
//!
//! Submodules:
//! - ast: the `Node` sum type, traversal and the tree printer
//! - expressions: identifier, literal, operator and collection nodes
//! - statements: program, block, declaration and control-flow nodes
//! - types: literal values, type tags and operators
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
