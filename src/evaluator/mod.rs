//! Operator and type-promotion engine.
//!
//! Reduces an operator applied to literal operands to a literal result.
//! Used by the optimizer for constant folding and by the interpreter for
//! declaration initializers.

pub mod evaluator;
