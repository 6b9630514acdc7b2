//! Thin top-level executor.
//!
//! Only variable declarations and assignments of the program root have an
//! effect: their values are stored in the `global` scope of an
//! [`environment::Environment`]. Control flow, function bodies and prints
//! are left unexecuted.

pub mod environment;
pub mod interpreter;

#[cfg(test)]
mod tests;
