use safecalc::{Error, EvalError, ParseError, create_function};

#[test]
fn positional_arguments() {
    let f = create_function("a+b", &["a", "b"]).unwrap();
    assert_eq!(f.call(&[2.0, 3.0]).unwrap(), 5.0);
    assert_eq!(f.call(&[10.0, -4.0]).unwrap(), 6.0);
    assert_eq!(f.params(), &["a", "b"]);
}

#[test]
fn order_follows_params_not_expression() {
    let f = create_function("a - b", &["b", "a"]).unwrap();
    assert_eq!(f.call(&[1.0, 10.0]).unwrap(), 9.0);
}

#[test]
fn missing_trailing_arguments_default_to_zero() {
    let f = create_function("a * 10 + b", &["a", "b"]).unwrap();
    assert_eq!(f.call(&[3.0]).unwrap(), 30.0);
    assert_eq!(f.call(&[]).unwrap(), 0.0);
}

#[test]
fn extra_arguments_are_ignored() {
    let f = create_function("a", &["a"]).unwrap();
    assert_eq!(f.call(&[1.0, 2.0, 3.0]).unwrap(), 1.0);
}

#[test]
fn variable_outside_params_fails() {
    let f = create_function("a + c", &["a", "b"]).unwrap();
    assert_eq!(f.unbound(), vec!["c"]);
    let err = f.call(&[1.0, 2.0]).unwrap_err();
    assert_eq!(err, EvalError::UnknownVariable("c".into()));
}

#[test]
fn repeated_param_binds_last_position() {
    let f = create_function("x", &["x", "x"]).unwrap();
    assert_eq!(f.call(&[1.0, 2.0]).unwrap(), 2.0);
}

#[test]
fn parse_errors_surface_at_creation() {
    let err = create_function("a +", &["a"]).unwrap_err();
    assert_eq!(err, Error::Parse(ParseError::UnexpectedEnd));
}

#[test]
fn owned_param_names() {
    let params = vec!["p".to_string(), "r".to_string(), "n".to_string()];
    let f = create_function("p*r/(1-((1+r)**-n))", &params).unwrap();
    assert_eq!(f.variables(), &["p", "r", "n"]);
    assert!(f.unbound().is_empty());
    let out = f.call(&[10000.0, 0.05 / 12.0, 36.0]).unwrap();
    assert!((out - 299.71).abs() < 1e-2);
}

#[test]
fn amortization_schedule_row_by_row() {
    let payment = create_function("p*r/(1-((1+r)**-n))", &["p", "r", "n"]).unwrap();
    let interest = create_function("balance * r", &["balance", "r"]).unwrap();

    let (principal, rate, months) = (10000.0, 0.05 / 12.0, 36.0);
    let pay = payment.call(&[principal, rate, months]).unwrap();

    let mut balance = principal;
    for _ in 0..36 {
        let i = interest.call(&[balance, rate]).unwrap();
        balance -= pay - i;
    }
    assert!(balance.abs() < 1e-6, "remaining balance {balance}");
}

#[test]
fn into_fn_closure() {
    let f = create_function("max(x, y) - min(x, y)", &["x", "y"])
        .unwrap()
        .into_fn();
    let g = f.clone();
    assert_eq!(f(&[3.0, 8.0]).unwrap(), 5.0);
    assert_eq!(g(&[8.0, 3.0]).unwrap(), 5.0);
}
