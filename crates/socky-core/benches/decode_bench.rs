//! Criterion benchmarks for inbound payload handling.
//!
//! The server broadcasts the whole board on every tick, so decode and render
//! run once per frame for every connected client.
//!
//! Run with:
//! ```bash
//! cargo bench --package socky-core --bench decode_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use socky_core::{BoardSnapshot, InboundMessage};

// ── Payload fixtures ──────────────────────────────────────────────────────────

fn make_grid_string_payload(rows: usize, cols: usize) -> String {
    let row = vec!["·"; cols].join(" ");
    let grid = vec![row; rows].join("\n");
    json!({ "gridString": grid }).to_string()
}

fn make_board_payload(rows: usize, cols: usize, players: usize) -> String {
    let grid: Vec<Vec<&str>> = (0..rows)
        .map(|r| (0..cols).map(|c| if (r + c) % 7 == 0 { "b" } else { "·" }).collect())
        .collect();
    let clients: Vec<_> = (0..players)
        .map(|i| json!({"name": format!("p{i}"), "color": "red", "snake": {"Score": i}}))
        .collect();
    json!({ "type": "state", "grid": grid, "clients": clients }).to_string()
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_decode_grid_string(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_grid_string");
    for (rows, cols) in [(10, 10), (30, 35), (40, 60)] {
        let payload = make_grid_string_payload(rows, cols);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{rows}x{cols}")),
            &payload,
            |b, p| {
                b.iter(|| {
                    let msg = InboundMessage::decode(black_box(p)).unwrap();
                    black_box(msg.grid_string().to_string());
                })
            },
        );
    }
    group.finish();
}

fn bench_render_board(c: &mut Criterion) {
    let payload = make_board_payload(30, 35, 7);
    c.bench_function("decode_and_render_board_30x35", |b| {
        b.iter(|| {
            let msg = InboundMessage::decode(black_box(&payload)).unwrap();
            let snap = BoardSnapshot::from_message(&msg).unwrap();
            black_box(snap.render());
        })
    });
}

criterion_group!(benches, bench_decode_grid_string, bench_render_board);
criterion_main!(benches);
