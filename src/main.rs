//! seqbook - Demo Binary
//!
//! Feeds a small scripted session through the sync controller: stream
//! messages buffer, a snapshot lands, backfill completes, live messages
//! apply, and a deliberate sequence gap forces a resync.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use seqbook::types::price::{from_fixed, to_fixed};
use seqbook::{
    BookMessage, SharedBook, Side, Snapshot, SnapshotOrder, SyncConfig, SyncController,
    TracingObserver,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("===========================================");
    println!("  seqbook - L3 book reconstruction");
    println!("===========================================");
    println!();

    let observer = Arc::new(TracingObserver);
    let shared = SharedBook::new(observer.clone());

    let snapshot_wanted = Rc::new(Cell::new(false));
    let flag = snapshot_wanted.clone();
    let mut controller = SyncController::new(
        shared.clone(),
        move || flag.set(true),
        observer,
        SyncConfig {
            snapshot_delay: Duration::ZERO,
            ..SyncConfig::default()
        },
    );

    let px = |s: &str| to_fixed(s).expect("valid demo price");

    // Stream starts ahead of the snapshot; these buffer
    println!("Streaming pre-snapshot messages (buffered)...");
    controller.on_message(BookMessage::Open {
        order_id: 101,
        side: Side::Bid,
        price: px("99.50"),
        size: px("2"),
        sequence: 1001,
    });
    controller.on_message(BookMessage::Open {
        order_id: 102,
        side: Side::Ask,
        price: px("100.50"),
        size: px("1.5"),
        sequence: 1002,
    });
    println!("  state: {:?}, buffered: {}", controller.state(), controller.buffered());

    assert!(snapshot_wanted.get());
    println!();
    println!("Delivering snapshot at sequence 1001...");
    let mut snapshot = Snapshot::new(1001);
    snapshot.bids.push(SnapshotOrder::new(101, px("99.50"), px("2")));
    snapshot.bids.push(SnapshotOrder::new(90, px("99.00"), px("4")));
    snapshot.asks.push(SnapshotOrder::new(91, px("100.25"), px("3")));
    controller.on_snapshot(snapshot);
    println!("  state: {:?}", controller.state());

    println!();
    println!("Applying live messages...");
    controller.on_message(BookMessage::Match {
        maker_id: 91,
        taker_id: 500,
        price: px("100.25"),
        size: px("1"),
        sequence: 1003,
    });
    controller.on_message(BookMessage::Done {
        order_id: 90,
        sequence: 1004,
    });

    println!();
    println!("Book state:");
    println!("  sequence: {}", shared.current_sequence());
    println!("  orders:   {}", shared.order_count());
    for (price, size) in shared.depth(Side::Ask, 5) {
        println!("  ask {} x {}", from_fixed(price), from_fixed(size));
    }
    for (price, size) in shared.depth(Side::Bid, 5) {
        println!("  bid {} x {}", from_fixed(price), from_fixed(size));
    }
    println!("  digest:   {}", hex::encode(shared.state_digest()));

    println!();
    println!("Injecting a sequence gap (1004 -> 1900)...");
    controller.on_message(BookMessage::Done {
        order_id: 102,
        sequence: 1900,
    });
    println!(
        "  state: {:?}, orders: {} (book reset, awaiting fresh snapshot)",
        controller.state(),
        shared.order_count()
    );
}
