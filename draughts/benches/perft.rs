use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use draughts::*;

fn perft_benchmark(c: &mut Criterion) {
    c.bench_function("International Perft 5", |b| {
        b.iter(|| {
            let mut game = black_box(Game::new(Rules::international()));
            let depth = black_box(5);
            black_box(perft(&mut game, depth))
        });
    });

    c.bench_function("English Perft 6", |b| {
        b.iter(|| {
            let mut game = black_box(Game::new(Rules::english()));
            let depth = black_box(6);
            black_box(perft(&mut game, depth))
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(100).measurement_time(Duration::from_secs(60));
    targets = perft_benchmark
}
criterion_main!(benches);
