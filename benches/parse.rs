use buildinfo::info::{escape::unescape, parse_build_info};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_parse(c: &mut Criterion) {
    let minimal = "B100\n132000000000000000\n1.2.3";
    let full = "B100\n132000000000000000\n1.2.3\nrelease\\ncandidate\nfeature\\\\build";

    c.bench_function("parse_minimal", |b| {
        b.iter(|| parse_build_info(black_box(minimal)))
    });
    c.bench_function("parse_full", |b| b.iter(|| parse_build_info(black_box(full))));
    c.bench_function("unescape", |b| {
        b.iter(|| unescape(black_box("line\\none\\ttab\\u0041")))
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
