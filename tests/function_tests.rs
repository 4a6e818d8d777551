use safecalc::{Arity, Builtin, Error, EvalError, evaluate};

const EPS: f64 = 1e-12;

fn eval(expr: &str) -> f64 {
    evaluate(expr, &()).unwrap()
}

#[test]
fn allowed_functions_evaluate() {
    assert_eq!(eval("sqrt(16)"), 4.0);
    assert_eq!(eval("abs(-3)"), 3.0);
    assert_eq!(eval("ceil(1.2)"), 2.0);
    assert_eq!(eval("floor(-1.2)"), -2.0);
    assert_eq!(eval("exp(0)"), 1.0);
    assert_eq!(eval("pow(2, 10)"), 1024.0);
    assert!((eval("log(exp(2))") - 2.0).abs() < EPS);
    assert!((eval("sin(0) + cos(0)") - 1.0).abs() < EPS);
    assert!((eval("tan(atan(0.5))") - 0.5).abs() < EPS);
    assert!((eval("asin(1) * 2") - std::f64::consts::PI).abs() < EPS);
    assert!((eval("acos(-1)") - std::f64::consts::PI).abs() < EPS);
    assert!((eval("atan2(1, 1) * 4") - std::f64::consts::PI).abs() < EPS);
}

#[test]
fn log_is_natural() {
    assert!((eval("log(2.718281828459045)") - 1.0).abs() < EPS);
}

#[test]
fn round_halves_go_up() {
    assert_eq!(eval("round(2.5)"), 3.0);
    assert_eq!(eval("round(-2.5)"), -2.0);
    assert_eq!(eval("round(2.4999)"), 2.0);
    assert_eq!(eval("round(1234.5678 * 100) / 100"), 1234.57);
}

#[test]
fn max_min_are_variadic() {
    assert_eq!(eval("max(3)"), 3.0);
    assert_eq!(eval("max(1, 9, 4, -2)"), 9.0);
    assert_eq!(eval("min(1, 9, 4, -2)"), -2.0);
    assert!(eval("max(1, 0/0)").is_nan());
}

#[test]
fn random_is_in_unit_interval() {
    for _ in 0..100 {
        let r = eval("random()");
        assert!((0.0..1.0).contains(&r));
    }
}

#[test]
fn nested_calls_and_variables() {
    let vars = [("a", -9.0), ("b", 2.0)];
    assert_eq!(evaluate("max(sqrt(abs(a)), b) * 2", &vars).unwrap(), 6.0);
}

#[test]
fn disallowed_function_is_rejected() {
    let err = evaluate("process(1)", &()).unwrap_err();
    match err {
        Error::Eval(EvalError::FunctionNotAllowed(name)) => assert_eq!(name, "process"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn disallowed_function_is_rejected_before_its_arguments() {
    // the unbound `x` inside would otherwise be reported first
    let err = evaluate("eval(x)", &()).unwrap_err();
    assert_eq!(err, Error::Eval(EvalError::FunctionNotAllowed("eval".into())));
}

#[test]
fn names_are_case_sensitive() {
    let err = evaluate("Sqrt(4)", &()).unwrap_err();
    assert_eq!(err, Error::Eval(EvalError::FunctionNotAllowed("Sqrt".into())));
}

#[test]
fn wrong_arity_is_rejected() {
    let err = evaluate("atan2(1)", &()).unwrap_err();
    match err {
        Error::Eval(EvalError::Arity {
            name,
            expected,
            got,
        }) => {
            assert_eq!(name, "atan2");
            assert_eq!(expected, Arity::Exact(2));
            assert_eq!(got, 1);
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let err = evaluate("sqrt(1, 2)", &()).unwrap_err();
    assert!(matches!(err, Error::Eval(EvalError::Arity { got: 2, .. })));

    let err = evaluate("random(1)", &()).unwrap_err();
    assert!(matches!(err, Error::Eval(EvalError::Arity { got: 1, .. })));

    let err = evaluate("max()", &()).unwrap_err();
    assert!(matches!(
        err,
        Error::Eval(EvalError::Arity {
            expected: Arity::AtLeast(1),
            got: 0,
            ..
        })
    ));
}

#[test]
fn math_prefix_is_stripped() {
    assert_eq!(eval("Math.sqrt(16)"), 4.0);
    let vars = [("x", 2.0)];
    assert_eq!(evaluate("Math.pow(x, 3) + Math.abs(-1)", &vars).unwrap(), 9.0);
}

#[test]
fn allow_list_is_fixed() {
    let names: Vec<&str> = Builtin::ALL.iter().map(|b| b.name()).collect();
    assert_eq!(
        names,
        vec![
            "abs", "acos", "asin", "atan", "atan2", "ceil", "cos", "exp", "floor", "log", "max",
            "min", "pow", "random", "round", "sin", "sqrt", "tan",
        ]
    );
    assert!(Builtin::lookup("process").is_none());
    assert_eq!(Builtin::lookup("atan2").map(Builtin::arity), Some(Arity::Exact(2)));
}
