use safecalc::evaluate;

#[test]
fn pow_basic() {
    assert_eq!(evaluate("2 ** 3", &()).unwrap(), 8.0);
    assert_eq!(evaluate("2 ^ 3", &()).unwrap(), 8.0);
}

#[test]
fn pow_left_associative() {
    // (2**3)**2 = 64, not 2**(3**2) = 512
    assert_eq!(evaluate("2 ** 3 ** 2", &()).unwrap(), 64.0);
    assert_eq!(evaluate("2 ^ 3 ^ 2", &()).unwrap(), 64.0);
    assert_eq!(evaluate("2 ** 3 ^ 2", &()).unwrap(), 64.0);
}

#[test]
fn pow_unary_minus_binds_tighter() {
    // unary is below power in the grammar: -2**2 = (-2)**2
    assert_eq!(evaluate("-2 ** 2", &()).unwrap(), 4.0);
    assert_eq!(evaluate("-(2 ** 2)", &()).unwrap(), -4.0);
}

#[test]
fn pow_negative_exponent() {
    assert_eq!(evaluate("2 ** -1", &()).unwrap(), 0.5);
    assert_eq!(evaluate("2 ** --2", &()).unwrap(), 4.0);
}

#[test]
fn pow_precedence_with_mul() {
    assert_eq!(evaluate("2**3*2", &()).unwrap(), 16.0);
    assert_eq!(evaluate("2*2**3", &()).unwrap(), 16.0);
}

#[test]
fn pow_with_variables() {
    assert_eq!(evaluate("a ^ 2", &[("a", 3.0)]).unwrap(), 9.0);
}

#[test]
fn pow_fractional_exponent() {
    let out = evaluate("9 ** 0.5", &()).unwrap();
    assert!((out - 3.0).abs() < 1e-12);
}

#[test]
fn pow_function_matches_operator() {
    assert_eq!(
        evaluate("pow(1.5, 4)", &()).unwrap(),
        evaluate("1.5 ** 4", &()).unwrap()
    );
}
