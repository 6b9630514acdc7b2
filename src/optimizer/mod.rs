//! Fixed-point optimizer over the parsed tree.
//!
//! Two rewrites alternate until neither changes anything:
//! constant folding of literal-only expressions and removal of variable
//! declarations whose global use count is zero.

pub mod optimizer;

#[cfg(test)]
mod tests;
