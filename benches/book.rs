//! Criterion benchmarks for the book's hot paths.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use seqbook::{OrderBook, Side};

// ============================================================================
// Helpers
// ============================================================================

/// Deterministic (side, price, size) triples around a 100.00 midpoint.
fn generate_orders(count: usize, seed: u64) -> Vec<(Side, u64, u64)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let side = if rng.gen_bool(0.5) { Side::Bid } else { Side::Ask };
            let tick = rng.gen_range(0..500u64) * 1_000_000;
            let price = match side {
                Side::Bid => 9_500_000_000 + tick,
                Side::Ask => 10_000_000_000 + tick,
            };
            let size = rng.gen_range(1..=100u64) * 1_000_000;
            (side, price, size)
        })
        .collect()
}

/// Build a book holding `count` resting orders.
fn populated_book(count: usize) -> OrderBook {
    let mut book = OrderBook::default();
    for (i, (side, price, size)) in generate_orders(count, 42).into_iter().enumerate() {
        book.apply_open(i as u64 + 1, side, price, size, i as u64 + 1)
            .unwrap();
    }
    book
}

// ============================================================================
// Benchmarks
// ============================================================================

/// Open path: level insert + FIFO append + index registration.
fn bench_open(c: &mut Criterion) {
    let orders = generate_orders(10_000, 42);

    c.bench_function("apply_open_10k", |b| {
        b.iter(|| {
            let mut book = OrderBook::default();
            for (i, (side, price, size)) in orders.iter().enumerate() {
                book.apply_open(i as u64 + 1, *side, *price, *size, i as u64 + 1)
                    .unwrap();
            }
            black_box(book.order_count())
        })
    });
}

/// Full open/done cycle: every order inserted and then cancelled by id.
fn bench_open_done_cycle(c: &mut Criterion) {
    let orders = generate_orders(5_000, 7);

    c.bench_function("open_done_cycle_5k", |b| {
        b.iter(|| {
            let mut book = OrderBook::default();
            let mut sequence = 0u64;
            for (i, (side, price, size)) in orders.iter().enumerate() {
                sequence += 1;
                book.apply_open(i as u64 + 1, *side, *price, *size, sequence)
                    .unwrap();
            }
            for i in 0..orders.len() {
                sequence += 1;
                book.apply_done(i as u64 + 1, sequence).unwrap();
            }
            black_box(book.is_empty())
        })
    });
}

/// Depth traversal over a deep resting book.
fn bench_depth(c: &mut Criterion) {
    let book = populated_book(10_000);

    c.bench_function("depth_50_of_10k", |b| {
        b.iter(|| {
            let bids = book.depth(Side::Bid, 50);
            let asks = book.depth(Side::Ask, 50);
            black_box((bids.len(), asks.len()))
        })
    });
}

/// Best-price queries on a deep book.
fn bench_top_of_book(c: &mut Criterion) {
    let book = populated_book(10_000);

    c.bench_function("top_of_book_10k", |b| {
        b.iter(|| black_box((book.best_bid(), book.best_ask(), book.spread())))
    });
}

/// Digest of a deep book (determinism checks in monitoring).
fn bench_state_digest(c: &mut Criterion) {
    let book = populated_book(10_000);

    c.bench_function("state_digest_10k", |b| {
        b.iter(|| black_box(book.state_digest()))
    });
}

criterion_group!(
    benches,
    bench_open,
    bench_open_done_cycle,
    bench_depth,
    bench_top_of_book,
    bench_state_digest
);
criterion_main!(benches);
