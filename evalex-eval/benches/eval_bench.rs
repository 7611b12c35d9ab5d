//! Evaluator benchmarks.
//!
//! Run with: `cargo bench --package evalex-eval`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use evalex_eval::evaluate;
use evalex_lex::Lexer;
use evalex_util::value::{HostRegistry, Params};

fn eval_source(source: &str, params: &Params) {
    let registry = HostRegistry::new();
    let tokens = Lexer::new(source, &registry).tokenize().unwrap();
    let node = evalex_par::parse(&tokens).unwrap();
    let _ = evaluate(&node, params, true).unwrap();
}

fn bench_eval_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval_arithmetic");

    let source = "1 + 2 * 3 - 4 / 5 % 6 ** 2";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("arithmetic_expr", |b| {
        let params = Params::default();
        b.iter(|| eval_source(black_box(source), &params))
    });

    group.finish();
}

fn bench_eval_short_circuit(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval_short_circuit");

    group.bench_function("and_short_circuit", |b| {
        let params = Params::default();
        b.iter(|| eval_source(black_box("false && true"), &params))
    });

    group.finish();
}

fn bench_eval_ternary(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval_ternary");

    group.bench_function("ternary_expr", |b| {
        let params = Params::default();
        b.iter(|| eval_source(black_box("1 == 1 ? 'yes' : 'no'"), &params))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_eval_arithmetic,
    bench_eval_short_circuit,
    bench_eval_ternary
);
criterion_main!(benches);
