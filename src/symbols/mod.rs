//! Scope-tagged symbol table.
//!
//! Symbols are keyed by `(name, scope)` where the scope is a flat tag:
//! `"global"` or the name of the function or dictionary being parsed.
//! A name is visible only under the exact tag it was registered with.

pub mod symbols;

#[cfg(test)]
mod tests;
