use std::{collections::HashMap, fmt::Display};

use tracing::debug;

use crate::ast::ast::Node;

pub const GLOBAL_SCOPE: &str = "global";

/// Composite `(name, scope)` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolKey {
    pub name: String,
    pub scope: String,
}

impl SymbolKey {
    pub fn new(name: &str, scope: &str) -> Self {
        SymbolKey {
            name: name.to_string(),
            scope: scope.to_string(),
        }
    }
}

impl Display for SymbolKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.name, self.scope)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Var,
    Param,
    Function,
    DictKey,
}

impl Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolKind::Var => write!(f, "var"),
            SymbolKind::Param => write!(f, "param"),
            SymbolKind::Function => write!(f, "function"),
            SymbolKind::DictKey => write!(f, "dict_key"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Element count of a list or dictionary initializer, otherwise 0
    pub length: usize,
    pub scope: String,
    /// Position of a dictionary key inside its dictionary
    pub positional_index: Option<usize>,
    /// Declaring node: the initializer of a variable or the value of a key
    pub node: Option<Node>,
    pub use_count: i64,
}

impl Symbol {
    pub fn new(name: &str, kind: SymbolKind, scope: &str) -> Self {
        Symbol {
            name: name.to_string(),
            kind,
            length: 0,
            scope: scope.to_string(),
            positional_index: None,
            node: None,
            use_count: 0,
        }
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.positional_index = Some(index);
        self
    }

    pub fn with_node(mut self, node: Option<Node>) -> Self {
        self.node = node;
        self
    }

    pub fn key(&self) -> SymbolKey {
        SymbolKey::new(&self.name, &self.scope)
    }
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<SymbolKey, Symbol>,
    /// Insertion order, used for deterministic listing and index lookups
    order: Vec<SymbolKey>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Inserts a symbol, replacing any previous symbol with the same key.
    pub fn add_symbol(&mut self, symbol: Symbol) {
        let key = symbol.key();
        debug!(
            "symbol {} registered as {} (length: {}, index: {:?})",
            key, symbol.kind, symbol.length, symbol.positional_index
        );

        if self.symbols.insert(key.clone(), symbol).is_none() {
            self.order.push(key);
        }
    }

    pub fn contains(&self, name: &str, scope: &str) -> bool {
        self.symbols.contains_key(&SymbolKey::new(name, scope))
    }

    pub fn get_symbol(&self, name: &str, scope: &str) -> Option<&Symbol> {
        self.symbols.get(&SymbolKey::new(name, scope))
    }

    /// Counts one use of `(name, scope)`. Returns false if no such symbol.
    pub fn add_use(&mut self, name: &str, scope: &str) -> bool {
        match self.symbols.get_mut(&SymbolKey::new(name, scope)) {
            Some(symbol) => {
                symbol.use_count += 1;
                true
            }
            None => false,
        }
    }

    pub fn get_scope(&self, name: &str, scope: &str) -> Option<&str> {
        self.get_symbol(name, scope).map(|symbol| symbol.scope.as_str())
    }

    pub fn get_node(&self, name: &str, scope: &str) -> Option<&Node> {
        self.get_symbol(name, scope)
            .and_then(|symbol| symbol.node.as_ref())
    }

    pub fn get_length(&self, name: &str, scope: &str) -> Option<usize> {
        self.get_symbol(name, scope).map(|symbol| symbol.length)
    }

    pub fn get_use_count(&self, name: &str, scope: &str) -> Option<i64> {
        self.get_symbol(name, scope).map(|symbol| symbol.use_count)
    }

    /// Reverse lookup: the symbol registered under `scope` at `index`.
    ///
    /// When several match, the most recently registered one wins.
    pub fn get_symbol_by_index(&self, scope: &str, index: usize) -> Option<&Symbol> {
        self.order
            .iter()
            .rev()
            .filter_map(|key| self.symbols.get(key))
            .find(|symbol| symbol.scope == scope && symbol.positional_index == Some(index))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.order.iter().filter_map(|key| self.symbols.get(key))
    }

    pub fn print_table(&self) {
        for symbol in self.iter() {
            debug!(
                "{} | kind: {} | length: {} | uses: {}",
                symbol.key(),
                symbol.kind,
                symbol.length,
                symbol.use_count
            );
        }
    }
}

impl Display for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:<24} {:<10} {:>6} {:>6} {:>6}", "symbol", "kind", "length", "index", "uses")?;
        for symbol in self.iter() {
            let index = symbol
                .positional_index
                .map(|index| index.to_string())
                .unwrap_or_else(|| String::from("-"));
            writeln!(
                f,
                "{:<24} {:<10} {:>6} {:>6} {:>6}",
                symbol.key().to_string(),
                symbol.kind.to_string(),
                symbol.length,
                index,
                symbol.use_count
            )?;
        }
        Ok(())
    }
}
