//! End-to-end scenarios, each parsed with the need-check flag enabled.

use evalex::{Expression, HostRegistry, Params, Value};
use std::sync::Arc;

#[test]
fn scenario_1_host_function_membership_and_short_circuit() {
    let mut registry = HostRegistry::new();
    registry.register(
        "b",
        Arc::new(|args: &[Value]| {
            Ok(Value::Number(args[0].as_f64().unwrap() + args[1].as_f64().unwrap()))
        }),
    );
    let expr = Expression::new(
        "b(c, d) == a && 100 in ([[b(c, d)], 1, '3', []]) || 1 in []",
        true,
        registry,
    )
    .unwrap();

    let mut params = Params::default();
    params.insert("a".into(), Value::Number(100.0));
    params.insert("c".into(), Value::Number(50.0));
    params.insert("d".into(), Value::Number(50.0));

    assert_eq!(expr.evaluate(&params).unwrap().as_bool(), Some(true));
}

#[test]
fn scenario_2_composed_host_functions() {
    let mut registry = HostRegistry::new();
    registry.register("age", Arc::new(|args: &[Value]| Ok(args[0].clone())));
    // `get` stands in for `ctx.value`; the Value model has no compound
    // object type, so the test param carries the already-projected field.
    registry.register("get", Arc::new(|args: &[Value]| Ok(args[0].clone())));

    let expr = Expression::new("age(get(ctx)) == 1", true, registry).unwrap();

    let mut params = Params::default();
    params.insert("ctx".into(), Value::Number(1.0));

    assert_eq!(expr.evaluate(&params).unwrap().as_bool(), Some(true));
}

#[test]
fn scenario_3_ternary_false_branch() {
    let expr = Expression::new("1 == 2 ? 'yes' : 'no'", true, HostRegistry::new()).unwrap();
    assert_eq!(
        expr.evaluate(&Params::default()).unwrap().as_str(),
        Some("no")
    );
}

#[test]
fn scenario_4_ternary_true_branch() {
    let expr = Expression::new("1 == 1 ? 'yes' : 'no'", true, HostRegistry::new()).unwrap();
    assert_eq!(
        expr.evaluate(&Params::default()).unwrap().as_str(),
        Some("yes")
    );
}

#[test]
fn scenario_5_power_operator() {
    let expr = Expression::new("2**10", true, HostRegistry::new()).unwrap();
    assert_eq!(
        expr.evaluate(&Params::default()).unwrap().as_f64(),
        Some(1024.0)
    );
}

#[test]
fn scenario_6_bitwise_roundtrip() {
    let expr = Expression::new(
        "~0 == -1 && 2 & 1 == 0 && 1 << 1 == 4 >> 1 && 3 &^ 1 == 2",
        true,
        HostRegistry::new(),
    )
    .unwrap();
    assert_eq!(
        expr.evaluate(&Params::default()).unwrap().as_bool(),
        Some(true)
    );
}

#[test]
fn scenario_7_string_concat_and_ordering() {
    let expr =
        Expression::new("'a' + 'b' == 'ab' && 'a' < 'b'", true, HostRegistry::new()).unwrap();
    assert_eq!(
        expr.evaluate(&Params::default()).unwrap().as_bool(),
        Some(true)
    );
}

#[test]
fn scenario_8_missing_variable_is_runtime_error() {
    let expr = Expression::new("x", true, HostRegistry::new()).unwrap();
    assert!(expr.evaluate(&Params::default()).is_err());
}

#[test]
fn scenario_9_mixed_add_is_error_with_and_without_check() {
    let checked = Expression::new("1 + 'a'", true, HostRegistry::new()).unwrap();
    assert!(checked.evaluate(&Params::default()).is_err());

    let unchecked = Expression::new("1 + 'a'", false, HostRegistry::new()).unwrap();
    assert!(unchecked.evaluate(&Params::default()).is_err());
}

#[test]
fn scenario_10_unbalanced_parens_is_syntactic_error() {
    assert!(Expression::new("(", true, HostRegistry::new()).is_err());
}

#[test]
fn deterministic_across_repeated_evaluations() {
    let expr = Expression::new("a * 2", true, HostRegistry::new()).unwrap();
    let mut params = Params::default();
    params.insert("a".into(), Value::Number(21.0));

    let first = expr.evaluate(&params).unwrap().as_f64();
    let second = expr.evaluate(&params).unwrap().as_f64();
    assert_eq!(first, second);
    assert_eq!(first, Some(42.0));
}

#[test]
fn unary_vs_binary_minus_disambiguation() {
    let cases = [
        ("-2", -2.0),
        ("(-2)", -2.0),
        ("1 - 2", -1.0),
        ("1 + -2", -1.0),
    ];
    for (source, expected) in cases {
        let expr = Expression::new(source, true, HostRegistry::new()).unwrap();
        assert_eq!(
            expr.evaluate(&Params::default()).unwrap().as_f64(),
            Some(expected),
            "source: {source}"
        );
    }
}
