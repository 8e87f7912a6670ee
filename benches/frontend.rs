use std::path::Path;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use mkscribe::fixtures::load_cases;
use mkscribe::{lexer, parser};

fn bench_frontend(c: &mut Criterion) {
    let cases = load_cases(Path::new("tests/scripts")).expect("load fixture cases");

    for case in cases {
        let source = case.read_script().expect("read fixture script");
        let label = &case.name;
        let (tokens, _) = lexer::tokenize(&source);

        c.bench_function(&format!("frontend_tokenize_{label}"), |b| {
            b.iter(|| {
                let out = lexer::tokenize(black_box(&source));
                black_box(out);
            })
        });

        c.bench_function(&format!("frontend_parse_only_{label}"), |b| {
            b.iter(|| {
                let out = parser::parse(black_box(tokens.clone()));
                black_box(out);
            })
        });

        c.bench_function(&format!("frontend_tokenize_parse_{label}"), |b| {
            b.iter(|| {
                let (tokens, _) = lexer::tokenize(black_box(&source));
                let out = parser::parse(tokens);
                black_box(out);
            })
        });
    }
}

criterion_group!(benches, bench_frontend);
criterion_main!(benches);
