use super::symbols::{Symbol, SymbolKind, SymbolTable, GLOBAL_SCOPE};

#[test]
fn test_add_and_get_symbol() {
    let mut table = SymbolTable::new();
    table.add_symbol(Symbol::new("x", SymbolKind::Var, GLOBAL_SCOPE).with_length(3));

    let symbol = table.get_symbol("x", GLOBAL_SCOPE).unwrap();
    assert_eq!(symbol.kind, SymbolKind::Var);
    assert_eq!(table.get_length("x", GLOBAL_SCOPE), Some(3));
    assert_eq!(table.get_scope("x", GLOBAL_SCOPE), Some("global"));
    assert_eq!(table.get_use_count("x", GLOBAL_SCOPE), Some(0));
}

#[test]
fn test_scope_tags_are_exact() {
    let mut table = SymbolTable::new();
    table.add_symbol(Symbol::new("x", SymbolKind::Var, GLOBAL_SCOPE));
    table.add_symbol(Symbol::new("x", SymbolKind::Var, "f"));

    assert_eq!(table.len(), 2);
    assert!(table.contains("x", "f"));
    assert!(!table.contains("x", "g"));
}

#[test]
fn test_add_use() {
    let mut table = SymbolTable::new();
    table.add_symbol(Symbol::new("x", SymbolKind::Var, GLOBAL_SCOPE));

    assert!(table.add_use("x", GLOBAL_SCOPE));
    assert!(table.add_use("x", GLOBAL_SCOPE));
    assert!(!table.add_use("x", "f"));
    assert_eq!(table.get_use_count("x", GLOBAL_SCOPE), Some(2));
}

#[test]
fn test_add_symbol_overwrites() {
    let mut table = SymbolTable::new();
    table.add_symbol(Symbol::new("x", SymbolKind::Var, GLOBAL_SCOPE));
    table.add_use("x", GLOBAL_SCOPE);
    table.add_symbol(Symbol::new("x", SymbolKind::Function, GLOBAL_SCOPE));

    assert_eq!(table.len(), 1);
    assert_eq!(table.iter().count(), 1);
    assert_eq!(table.get_symbol("x", GLOBAL_SCOPE).unwrap().kind, SymbolKind::Function);
    assert_eq!(table.get_use_count("x", GLOBAL_SCOPE), Some(0));
}

#[test]
fn test_get_symbol_by_index() {
    let mut table = SymbolTable::new();
    table.add_symbol(Symbol::new("a", SymbolKind::DictKey, "d").with_index(0));
    table.add_symbol(Symbol::new("b", SymbolKind::DictKey, "d").with_index(1));
    table.add_symbol(Symbol::new("c", SymbolKind::DictKey, "other").with_index(1));

    assert_eq!(table.get_symbol_by_index("d", 1).map(|s| s.name.as_str()), Some("b"));
    assert_eq!(table.get_symbol_by_index("other", 1).map(|s| s.name.as_str()), Some("c"));
    assert!(table.get_symbol_by_index("d", 2).is_none());
}

#[test]
fn test_display_lists_symbols_in_order() {
    let mut table = SymbolTable::new();
    table.add_symbol(Symbol::new("b", SymbolKind::Var, GLOBAL_SCOPE));
    table.add_symbol(Symbol::new("a", SymbolKind::Param, "f"));

    let rendered = table.to_string();
    let b = rendered.find("b@global").unwrap();
    let a = rendered.find("a@f").unwrap();
    assert!(b < a);
    assert!(rendered.contains("param"));
}
