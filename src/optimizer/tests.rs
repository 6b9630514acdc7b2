use std::rc::Rc;

use super::optimizer::optimize;
use crate::{
    ast::{
        ast::Node,
        types::{Operator, TypeTag, Value},
    },
    errors::errors::{ErrorCategory, ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::parse,
    symbols::symbols::SymbolTable,
};

fn parse_source(source: &str) -> (Node, SymbolTable) {
    let tokens = tokenize(source.to_string(), Some("test.d".to_string())).unwrap();
    parse(tokens, Rc::new("test.d".to_string())).unwrap()
}

fn optimized(source: &str) -> Node {
    let (program, symbols) = parse_source(source);
    optimize(program, &symbols).unwrap()
}

fn statements(program: &Node) -> &[Node] {
    match program {
        Node::Program(program) => &program.statements,
        other => panic!("expected a program, got {:?}", other),
    }
}

fn initializer(node: &Node) -> &Node {
    match node {
        Node::VariableDeclaration(declaration) => declaration.initializer.as_deref().unwrap(),
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_folds_constant_initializer() {
    let program = optimized("var x := 2 + 3 * 4; print x;");
    let statements = statements(&program);

    let Node::VariableDeclaration(declaration) = &statements[0] else {
        panic!("expected a declaration");
    };
    assert_eq!(declaration.type_tag, TypeTag::Int);

    match initializer(&statements[0]) {
        Node::Literal(literal) => {
            assert_eq!(literal.value, Value::Int(14));
            assert_eq!(literal.span.begin_column(), 10);
        }
        other => panic!("expected a literal, got {:?}", other),
    }
}

#[test]
fn test_folds_constant_subexpressions_only() {
    let program = optimized("var y := 1; var x := y + 2 * 3; print x;");

    let Node::Expression(sum) = initializer(&statements(&program)[1]) else {
        panic!("expected an expression");
    };
    assert_eq!(sum.operator, Operator::Plus);
    assert!(matches!(sum.left.as_deref(), Some(Node::Identifier(_))));
    assert!(matches!(sum.right.as_ref(), Node::Literal(literal) if literal.value == Value::Int(6)));
}

#[test]
fn test_folds_strings_and_reals() {
    let program = optimized("var s := \"a\" + \"b\"; var r := 1 / 2.0; print s, r;");
    let statements = statements(&program);

    assert!(matches!(initializer(&statements[0]), Node::Literal(l) if l.value == Value::String("ab".to_string())));
    assert!(matches!(initializer(&statements[1]), Node::Literal(l) if l.value == Value::Real(0.5)));
}

#[test]
fn test_negation_is_not_folded() {
    let program = optimized("var b := not true; print b;");
    assert!(matches!(initializer(&statements(&program)[0]), Node::Expression(_)));
}

#[test]
fn test_folds_inside_loop_condition() {
    let program = optimized("var n := 0; while n < 2 * 5 loop n := n + 1; end");

    let Node::While(while_stmt) = &statements(&program)[1] else {
        panic!("expected a while loop");
    };
    let Node::Expression(comparison) = while_stmt.condition.as_ref() else {
        panic!("expected a comparison");
    };
    assert!(matches!(comparison.right.as_ref(), Node::Literal(l) if l.value == Value::Int(10)));
}

#[test]
fn test_prunes_unused_declarations() {
    let program = optimized("var a := 1; var b := 2; print b;");
    let statements = statements(&program);

    assert_eq!(statements.len(), 2);
    assert!(matches!(&statements[0], Node::VariableDeclaration(d) if d.name() == "b"));
    assert!(matches!(statements[1], Node::Print(_)));
}

#[test]
fn test_prunes_write_only_variables() {
    let program = optimized("var x := 1; x := 2; var y := 3; y := 4; print y;");
    let statements = statements(&program);

    assert_eq!(statements.len(), 3);
    assert!(statements
        .iter()
        .all(|statement| !matches!(statement, Node::VariableDeclaration(d) if d.name() == "x")));
}

#[test]
fn test_keeps_function_locals() {
    let program = optimized("func f() is var t := 1; return 2; end print f();");

    let Node::FunctionDeclaration(function) = &statements(&program)[0] else {
        panic!("expected a function");
    };
    assert_eq!(function.body.statements.len(), 2);
}

#[test]
fn test_optimization_is_idempotent() {
    let source = "var a := 1; var b := (2 + 3) * 4; var c := b - 1; print c;";
    let (program, symbols) = parse_source(source);

    let once = optimize(program, &symbols).unwrap();
    let twice = optimize(once.clone(), &symbols).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn test_division_by_zero_is_reported_at_expression() {
    let (program, symbols) = parse_source("var x := 1 / 0; print x;");
    let error = optimize(program, &symbols).unwrap_err();

    assert_eq!(error.get_impl(), &ErrorImpl::DivisionByZero);
    assert_eq!(error.get_position().line, 1);
    assert_eq!(error.get_position().column, 10);
}

#[test]
fn test_mismatched_operands_fail() {
    let (program, symbols) = parse_source("var x := 1 + true;");
    let error = optimize(program, &symbols).unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Evaluation);
    assert!(matches!(error.get_impl(), ErrorImpl::InvalidOperandTypes { .. }));
}
