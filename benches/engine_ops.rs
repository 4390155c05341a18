use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tilelink::config::Difficulty;
use tilelink::engine::{Board, Point};
use tilelink::generator::{generate, shuffle_board};
use tilelink::path::find_path;
use tilelink::scanner::find_hint;

fn hard_board() -> Board {
    let mut rng = SmallRng::seed_from_u64(12345);
    generate(&Difficulty::Hard.config(), &mut rng).expect("hard preset is valid")
}

fn bench_generate(c: &mut Criterion) {
    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        let mut rng = SmallRng::seed_from_u64(12345);
        c.bench_function(&format!("generate/{}", difficulty), |b| {
            b.iter(|| generate(black_box(&config), &mut rng))
        });
    }
}

fn bench_find_path(c: &mut Criterion) {
    let board = hard_board();
    let far = Point::new(board.rows() - 1, board.cols() - 1);

    // A full board blocks every corner, so the search exhausts all candidates.
    c.bench_function("find_path/opposite_corners_full", |b| {
        b.iter(|| find_path(black_box(&board), Point::new(0, 0), black_box(far)))
    });

    let open = Board::new_empty(board.rows(), board.cols());
    c.bench_function("find_path/opposite_corners_empty", |b| {
        b.iter(|| find_path(black_box(&open), Point::new(0, 0), black_box(far)))
    });
}

fn bench_find_hint(c: &mut Criterion) {
    let board = hard_board();
    c.bench_function("find_hint/hard_full", |b| {
        b.iter(|| find_hint(black_box(&board)))
    });
}

fn bench_shuffle(c: &mut Criterion) {
    let board = hard_board();
    let mut rng = SmallRng::seed_from_u64(7);
    c.bench_function("shuffle_board/hard", |b| {
        b.iter_batched(
            || board.clone(),
            |mut board| {
                shuffle_board(&mut board, &mut rng);
                board
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_generate,
    bench_find_path,
    bench_find_hint,
    bench_shuffle
);
criterion_main!(benches);
