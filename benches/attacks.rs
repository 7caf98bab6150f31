use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fiddler_tables::{
    bishop_attacks, magic::sliding_attacks, queen_attacks, rook_attacks, Bitboard, Direction,
    Square, TABLES,
};

/// Random occupancies shared by every benchmark, so that each one looks up
/// the same positions.
fn occupancies() -> Vec<(Square, Bitboard)> {
    let mut rng = fastrand::Rng::with_seed(0xf1dd1e);
    (0..1024)
        .map(|_| {
            (
                Square::ALL[rng.usize(..64)],
                Bitboard::new(rng.u64(..) & rng.u64(..)),
            )
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    // build the tables before timing anything
    let _ = &*TABLES;
    let positions = occupancies();

    c.bench_function("rook_attacks", |b| {
        b.iter(|| {
            for &(sq, occupancy) in &positions {
                black_box(rook_attacks(sq, occupancy));
            }
        });
    });

    c.bench_function("bishop_attacks", |b| {
        b.iter(|| {
            for &(sq, occupancy) in &positions {
                black_box(bishop_attacks(sq, occupancy));
            }
        });
    });

    c.bench_function("queen_attacks", |b| {
        b.iter(|| {
            for &(sq, occupancy) in &positions {
                black_box(queen_attacks(sq, occupancy));
            }
        });
    });

    c.bench_function("rook_attacks_slow", |b| {
        b.iter(|| {
            for &(sq, occupancy) in &positions {
                black_box(sliding_attacks(sq, &Direction::ROOK_DIRECTIONS, occupancy));
            }
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
