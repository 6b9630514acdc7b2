//! Integration tests for the whole pipeline.
//!
//! These tests drive source text through tokenization, parsing,
//! optimization and top-level execution.

use std::rc::Rc;

use dfront::{
    ast::{ast::Node, types::Value},
    errors::errors::{ErrorCategory, ErrorImpl},
    interpreter::environment::RuntimeValue,
    lexer::lexer::tokenize,
    optimizer::optimizer::optimize,
    parser::parser::parse,
    pipeline::{run_source, PipelineOptions, PipelineOutput},
};

fn run(source: &str) -> PipelineOutput {
    run_source(source, "test.d", &PipelineOptions::default()).unwrap()
}

fn statements(program: &Node) -> &[Node] {
    match program {
        Node::Program(program) => &program.statements,
        other => panic!("expected a program, got {:?}", other),
    }
}

fn global(output: &PipelineOutput, name: &str) -> Option<RuntimeValue> {
    output
        .environment
        .as_ref()
        .expect("program was executed")
        .get_variable(name, "global")
        .ok()
        .map(|variable| variable.value.clone())
}

#[test]
fn test_fold_and_execute() {
    let output = run("var x := 2 + 3 * 4; print x;");

    match &statements(&output.program)[0] {
        Node::VariableDeclaration(declaration) => match declaration.initializer.as_deref() {
            Some(Node::Literal(literal)) => assert_eq!(literal.value, Value::Int(14)),
            other => panic!("expected a folded literal, got {:?}", other),
        },
        other => panic!("expected a declaration, got {:?}", other),
    }
    assert_eq!(global(&output, "x"), Some(RuntimeValue::Scalar(Value::Int(14))));
}

#[test]
fn test_forward_reference_is_rejected() {
    let error = run_source(
        "func f() is g(); end\nfunc g() is return 1; end",
        "test.d",
        &PipelineOptions::default(),
    )
    .unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Semantic);
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::VariableNotDeclared {
            variable: "g".to_string()
        }
    );
    assert_eq!(error.get_position().line, 1);
}

#[test]
fn test_scopes_are_isolated() {
    let options = PipelineOptions::default();

    let error = run_source("func f() is var t := 1; end var y := t;", "test.d", &options).unwrap_err();
    assert!(matches!(error.get_impl(), ErrorImpl::VariableNotDeclared { .. }));

    let error = run_source("var g := 1; func f() is return g; end", "test.d", &options).unwrap_err();
    assert!(matches!(error.get_impl(), ErrorImpl::VariableNotDeclared { .. }));
}

#[test]
fn test_index_bounds() {
    let options = PipelineOptions::default();

    let error = run_source("var a := [1, 2, 3]; var b := a[3];", "test.d", &options).unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::IndexOutOfBounds {
            index: 3,
            collection: "a".to_string()
        }
    );

    let output = run("var a := [1, 2, 3]; var b := a[2]; print b;");
    assert_eq!(global(&output, "b"), Some(RuntimeValue::Scalar(Value::Int(3))));
}

#[test]
fn test_optimizer_is_idempotent() {
    let source = "var a := 1; var b := 2 * (3 + 4); var c := b / 7 + a; print c;";
    let tokens = tokenize(source.to_string(), Some("test.d".to_string())).unwrap();
    let (program, symbols) = parse(tokens, Rc::new("test.d".to_string())).unwrap();

    let once = optimize(program, &symbols).unwrap();
    let twice = optimize(once.clone(), &symbols).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_unused_declarations_are_removed() {
    let output = run("var a := 1; var b := 2; print b;");

    let names: Vec<&str> = statements(&output.program)
        .iter()
        .filter_map(|node| match node {
            Node::VariableDeclaration(declaration) => Some(declaration.name()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["b"]);

    assert_eq!(global(&output, "a"), None);
    assert_eq!(global(&output, "b"), Some(RuntimeValue::Scalar(Value::Int(2))));
}

#[test]
fn test_without_optimization() {
    let options = PipelineOptions {
        optimize: false,
        ..PipelineOptions::default()
    };
    let output = run_source("var a := 1; var b := 2 + 2; print b;", "test.d", &options).unwrap();

    assert_eq!(statements(&output.program).len(), 3);
    assert_eq!(
        output.environment.unwrap().get_variable("b", "global").unwrap().value,
        RuntimeValue::Scalar(Value::Int(4))
    );
}

#[test]
fn test_without_execution() {
    let options = PipelineOptions {
        execute: false,
        ..PipelineOptions::default()
    };
    let output = run_source("var a := 1; print a;", "test.d", &options).unwrap();

    assert!(output.environment.is_none());
    assert_eq!(output.symbols.get_use_count("a", "global"), Some(1));
}

#[test]
fn test_error_categories() {
    let options = PipelineOptions::default();
    let category = |source: &str| run_source(source, "test.d", &options).unwrap_err().category();

    assert_eq!(category("var x := 1.2.3;"), ErrorCategory::Lex);
    assert_eq!(category("var x := ;"), ErrorCategory::Syntax);
    assert_eq!(category("print y;"), ErrorCategory::Semantic);
    assert_eq!(category("var x := 1 / 0; print x;"), ErrorCategory::Evaluation);
}

#[test]
fn test_tree_shows_folded_literal() {
    let output = run("var x := 2 + 3; print x;");
    let tree = output.program.tree();

    assert!(tree.starts_with("Program\n"));
    assert!(tree.contains("Literal: 5 | type: int"));
}

#[test]
fn test_arithmetic_demo() {
    let output = run(include_str!("../demos/arithmetic.d"));

    assert_eq!(global(&output, "unused"), None);
    assert_eq!(global(&output, "width"), Some(RuntimeValue::Scalar(Value::Int(14))));
    assert_eq!(global(&output, "height"), Some(RuntimeValue::Scalar(Value::Int(5))));
    assert_eq!(global(&output, "area"), Some(RuntimeValue::Scalar(Value::Int(70))));
    assert_eq!(global(&output, "ratio"), Some(RuntimeValue::Scalar(Value::Real(3.5))));
}

#[test]
fn test_collections_demo() {
    let output = run(include_str!("../demos/collections.d"));

    assert_eq!(global(&output, "third"), Some(RuntimeValue::Scalar(Value::Int(5))));
    assert_eq!(global(&output, "count"), Some(RuntimeValue::Scalar(Value::Int(4))));
    assert_eq!(global(&output, "height"), Some(RuntimeValue::Scalar(Value::Int(480))));
    assert_eq!(
        global(&output, "first_key"),
        Some(RuntimeValue::Scalar(Value::String("demo".to_string())))
    );
}

#[test]
fn test_functions_demo() {
    let output = run(include_str!("../demos/functions.d"));

    assert_eq!(global(&output, "side"), Some(RuntimeValue::Scalar(Value::Int(4))));
    assert_eq!(global(&output, "result"), Some(RuntimeValue::Deferred));
    assert!(output.program.find_function("square").is_some());
    assert!(output.program.find_function("area").is_some());
}

#[test]
fn test_driver_prints_tree_by_default() {
    let options = PipelineOptions::driver();

    assert!(options.print_tree);
    assert!(options.optimize && options.execute);
    assert!(!PipelineOptions::default().print_tree);
}

#[test]
fn test_loop_variable_is_not_stored() {
    let options = PipelineOptions::default();
    let error = run_source("for i in 1..3 loop end i := 5; print i;", "test.d", &options).unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Runtime);
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::VariableMissing {
            variable: "i".to_string(),
            scope: "global".to_string()
        }
    );
}

#[test]
fn test_write_only_variable_is_removed() {
    let output = run("var x := 1; x := 2; var y := 3; print y;");

    assert_eq!(statements(&output.program).len(), 2);
    assert_eq!(global(&output, "x"), None);
    assert_eq!(global(&output, "y"), Some(RuntimeValue::Scalar(Value::Int(3))));
}
