//! Property: bitwise/shift operators round-trip integer-valued doubles
//! through signed 64-bit integer semantics.

use evalex_eval::evaluate;
use evalex_lex::Lexer;
use evalex_util::value::{HostRegistry, Params, Value};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

const LIMIT: i64 = 1i64 << 53;

fn eval_number(source: &str, x: f64, y: f64) -> f64 {
    let registry = HostRegistry::new();
    let tokens = Lexer::new(source, &registry).tokenize().unwrap();
    let node = evalex_par::parse(&tokens).unwrap();
    let mut params = Params::default();
    params.insert("x".into(), Value::Number(x));
    params.insert("y".into(), Value::Number(y));
    match evaluate(&node, &params, true).unwrap() {
        Value::Number(n) => n,
        other => panic!("expected number, got {other:?}"),
    }
}

#[quickcheck]
fn bitor_matches_i64(x: i64, y: i64) -> TestResult {
    if x.abs() > LIMIT || y.abs() > LIMIT {
        return TestResult::discard();
    }
    let got = eval_number("x | y", x as f64, y as f64);
    TestResult::from_bool(got == (x | y) as f64)
}

#[quickcheck]
fn bitand_matches_i64(x: i64, y: i64) -> TestResult {
    if x.abs() > LIMIT || y.abs() > LIMIT {
        return TestResult::discard();
    }
    let got = eval_number("x & y", x as f64, y as f64);
    TestResult::from_bool(got == (x & y) as f64)
}

#[quickcheck]
fn bitxor_matches_i64(x: i64, y: i64) -> TestResult {
    if x.abs() > LIMIT || y.abs() > LIMIT {
        return TestResult::discard();
    }
    let got = eval_number("x ^ y", x as f64, y as f64);
    TestResult::from_bool(got == (x ^ y) as f64)
}

#[quickcheck]
fn bitandnot_matches_i64(x: i64, y: i64) -> TestResult {
    if x.abs() > LIMIT || y.abs() > LIMIT {
        return TestResult::discard();
    }
    let got = eval_number("x &^ y", x as f64, y as f64);
    TestResult::from_bool(got == (x & !y) as f64)
}

#[quickcheck]
fn shl_matches_i64(x: i64, shift: u8) -> TestResult {
    if x.abs() > LIMIT {
        return TestResult::discard();
    }
    let shift = (shift % 64) as u32;
    let got = eval_number("x << y", x as f64, shift as f64);
    TestResult::from_bool(got == x.wrapping_shl(shift) as f64)
}

#[quickcheck]
fn shr_matches_i64(x: i64, shift: u8) -> TestResult {
    if x.abs() > LIMIT {
        return TestResult::discard();
    }
    let shift = (shift % 64) as u32;
    let got = eval_number("x >> y", x as f64, shift as f64);
    TestResult::from_bool(got == x.wrapping_shr(shift) as f64)
}
