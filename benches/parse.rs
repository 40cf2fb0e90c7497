use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dotenv_loader::*;

const CONTENT: &str = r#"
# service
HOST=localhost
PORT=8080
export URL="http://${HOST}:${PORT}/api"
MESSAGE='single ${HOST}'
MULTI="line one
line two\tend"
EMPTY=
NULL
"#;

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("parse", |b| b.iter(|| Dotenv::parse(black_box(CONTENT))));

    c.bench_function("parse_simple", |b| {
        b.iter(|| Dotenv::parse(black_box("A=1")))
    });

    let repository = RepositoryBuilder::create()
        .with_readers(Some(vec![]))
        .with_writers(Some(vec![]))
        .make();
    c.bench_function("validate", |b| {
        b.iter(|| {
            Validator::new(&repository, black_box(&["HOST", "PORT"]), false)
                .and_then(|v| v.is_integer().map(|_| ()))
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
