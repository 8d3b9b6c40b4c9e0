use criterion::{black_box, criterion_group, criterion_main, Criterion};
use minic_lex::{Lexer, TokenKind};
use minic_util::Interner;

const SAMPLE: &str = r#"
#define MAX(a, b) ((a) > (b) ? (a) : (b))

int factorial(int n) {
    if (n <= 1) {
        return 1;
    }
    return n * factorial(n - 1);
}

int main(void) {
    int values[4] = {1, 2, 3, 4};
    int total = 0;
    for (int i = 0; i < 4; i++) {
        total += MAX(values[i], total);
    }
    return total;
}
"#;

fn bench_tokenize_sample(c: &mut Criterion) {
    c.bench_function("tokenize_sample_function", |b| {
        b.iter(|| {
            let mut interner = Interner::new();
            let lexer = Lexer::new(black_box(SAMPLE), &mut interner);
            black_box(lexer.tokenize(TokenKind::Eof).unwrap())
        })
    });
}

criterion_group!(benches, bench_tokenize_sample);
criterion_main!(benches);
