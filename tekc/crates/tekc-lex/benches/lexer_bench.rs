//! Tokenizer benchmarks.
//!
//! Run with: `cargo bench --package tekc-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tekc_lex::tokenize;

fn token_count(source: &str) -> usize {
    tokenize(source).tokens.len()
}

fn bench_tokenizer_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizer");

    let source = "var total: Int = first + second * 3";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("simple_var", |b| {
        b.iter(|| token_count(black_box("var x = 42")))
    });

    group.bench_function("expression_line", |b| {
        b.iter(|| token_count(black_box(source)))
    });

    group.finish();
}

fn bench_tokenizer_indented(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizer_indented");

    let source = "class Counter\n\tvar count: Int = 0\n\n\tfunction bump(step: Int): Int\n\t\tthis.count = this.count + step\n\t\treturn this.count\n\nvar counter = new Counter()\ncounter.bump(2)\n";

    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("class_with_methods", |b| {
        b.iter(|| token_count(black_box(source)))
    });

    group.finish();
}

fn bench_tokenizer_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizer_operators");

    group.bench_function("multi_word", |b| {
        b.iter(|| token_count(black_box("a is not b and c is less than d or e is greater than f")))
    });

    group.bench_function("strings", |b| {
        b.iter(|| token_count(black_box("log('a message with \\' an escape')")))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_tokenizer_simple,
    bench_tokenizer_indented,
    bench_tokenizer_operators
);
criterion_main!(benches);
