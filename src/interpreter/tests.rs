use std::rc::Rc;

use super::{
    environment::{Environment, RuntimeValue},
    interpreter::Interpreter,
};
use crate::{
    ast::types::Value,
    errors::errors::{ErrorCategory, ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

fn run(source: &str) -> Result<Environment, crate::errors::errors::Error> {
    let tokens = tokenize(source.to_string(), Some("test.d".to_string()))?;
    let (program, _) = parse(tokens, Rc::new("test.d".to_string()))?;

    let mut interpreter = Interpreter::default();
    interpreter.run(&program)?;
    Ok(interpreter.into_environment())
}

fn global(environment: &Environment, name: &str) -> RuntimeValue {
    environment.get_variable(name, "global").unwrap().value.clone()
}

fn scalar(value: Value) -> RuntimeValue {
    RuntimeValue::Scalar(value)
}

#[test]
fn test_declarations_are_stored() {
    let environment = run("var x := 14; var s := \"hi\"; var e;").unwrap();

    assert_eq!(global(&environment, "x"), scalar(Value::Int(14)));
    assert_eq!(global(&environment, "s"), scalar(Value::String("hi".to_string())));
    assert_eq!(global(&environment, "e"), scalar(Value::Empty));
}

#[test]
fn test_initializers_read_stored_variables() {
    let environment = run("var x := 2; var y := x * 3 + 1;").unwrap();
    assert_eq!(global(&environment, "y"), scalar(Value::Int(7)));
}

#[test]
fn test_assignment_updates() {
    let environment = run("var x := 1; x := x + 1;").unwrap();
    assert_eq!(global(&environment, "x"), scalar(Value::Int(2)));
}

#[test]
fn test_collections_are_flattened() {
    let environment = run("var a := [1, 2 + 1]; var d := {k := 1, j};").unwrap();

    assert_eq!(
        global(&environment, "a"),
        RuntimeValue::List(vec![scalar(Value::Int(1)), scalar(Value::Int(3))])
    );
    assert_eq!(
        global(&environment, "d"),
        RuntimeValue::Dictionary(vec![
            ("k".to_string(), scalar(Value::Int(1))),
            ("j".to_string(), scalar(Value::Empty)),
        ])
    );
    assert_eq!(global(&environment, "a").to_string(), "[1, 3]");
}

#[test]
fn test_calls_are_deferred() {
    let environment = run("func f() is return 1; end var x := f(); var y := x + 1;").unwrap();

    assert_eq!(global(&environment, "x"), RuntimeValue::Deferred);
    assert_eq!(global(&environment, "y"), RuntimeValue::Deferred);
}

#[test]
fn test_control_flow_is_not_executed() {
    let environment = run("var n := 0; while n < 3 loop n := n + 1; end print n;").unwrap();
    assert_eq!(global(&environment, "n"), scalar(Value::Int(0)));
}

#[test]
fn test_type_checks() {
    let environment = run("var x := 1; var t := x is int; var u := x is string;").unwrap();

    assert_eq!(global(&environment, "t"), scalar(Value::Boolean(true)));
    assert_eq!(global(&environment, "u"), scalar(Value::Boolean(false)));
}

#[test]
fn test_runtime_error_position() {
    let error = run("var x := 0; var y := 1 / x;").unwrap_err();

    assert_eq!(error.get_impl(), &ErrorImpl::DivisionByZero);
    assert_eq!(error.get_position().column, 22);
}

#[test]
fn test_environment_add_and_update() {
    let mut environment = Environment::new();
    environment
        .add_variable("x", scalar(Value::Int(1)), "global")
        .unwrap();

    let error = environment
        .add_variable("x", scalar(Value::Int(2)), "global")
        .unwrap_err();
    assert_eq!(error.category(), ErrorCategory::Runtime);
    assert!(matches!(error.get_impl(), ErrorImpl::VariableExists { .. }));

    // Same name in another scope is a different variable
    environment
        .add_variable("x", scalar(Value::Int(3)), "f")
        .unwrap();
    assert_eq!(environment.variables("f").len(), 1);

    environment
        .update_variable("x", scalar(Value::Int(5)), "global")
        .unwrap();
    assert_eq!(
        environment.get_variable("x", "global").unwrap().value,
        scalar(Value::Int(5))
    );
}

#[test]
fn test_environment_missing_variable() {
    let mut environment = Environment::new();

    let error = environment
        .update_variable("y", scalar(Value::Empty), "global")
        .unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::VariableMissing {
            variable: "y".to_string(),
            scope: "global".to_string()
        }
    );
    assert!(environment.get_variable("y", "global").is_err());
}
