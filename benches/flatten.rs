//! Benchmark for reading and flattening synthetic drawings.
//!
//! Run with: cargo bench --bench flatten

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dxf_flatten::{DxfReader, FlattenOptions};
use std::fmt::Write;
use std::io::Cursor;

/// A drawing with one block of bulged polylines and arcs, inserted
/// `inserts` times in a grid.
fn generate_drawing(inserts: usize) -> String {
    let mut out = String::new();
    let mut pair = |code: i32, value: &dyn std::fmt::Display| {
        let _ = write!(out, "{code:>3}\n{value}\n");
    };

    pair(0, &"SECTION");
    pair(2, &"BLOCKS");
    pair(0, &"BLOCK");
    pair(2, &"CELL");
    for i in 0..20 {
        let offset = i as f64;
        pair(0, &"LWPOLYLINE");
        pair(8, &"0");
        pair(90, &4);
        pair(70, &1);
        for (x, y, bulge) in [(0.0, 0.0, 0.5), (1.0, 0.0, 0.0), (1.0, 1.0, -0.5), (0.0, 1.0, 0.0)] {
            pair(10, &(x + offset));
            pair(20, &y);
            pair(42, &bulge);
        }
        pair(0, &"ARC");
        pair(8, &"0");
        pair(10, &offset);
        pair(20, &0.0);
        pair(40, &0.5);
        pair(50, &0.0);
        pair(51, &270.0);
    }
    pair(0, &"ENDBLK");
    pair(0, &"ENDSEC");

    pair(0, &"SECTION");
    pair(2, &"ENTITIES");
    for i in 0..inserts {
        pair(0, &"INSERT");
        pair(8, &"0");
        pair(2, &"CELL");
        pair(10, &((i % 50) as f64 * 25.0));
        pair(20, &((i / 50) as f64 * 5.0));
        pair(41, &1.5);
        pair(42, &1.5);
        pair(50, &30.0);
    }
    pair(0, &"ENDSEC");
    pair(0, &"EOF");
    out
}

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");
    for inserts in [10, 100, 1000] {
        let text = generate_drawing(inserts);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(inserts), &text, |b, text| {
            b.iter(|| {
                let doc = DxfReader::new(Cursor::new(text.clone().into_bytes()))
                    .read()
                    .unwrap();
                black_box(doc.entity_count())
            });
        });
    }
    group.finish();
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");
    for inserts in [10, 100, 1000] {
        let text = generate_drawing(inserts);
        let mut doc = DxfReader::new(Cursor::new(text.into_bytes())).read().unwrap();
        group.throughput(Throughput::Elements(inserts as u64 * 40));
        group.bench_function(BenchmarkId::from_parameter(inserts), |b| {
            b.iter(|| {
                let flattened = doc.flatten(&FlattenOptions::default()).unwrap();
                black_box(flattened.items.len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_read, bench_flatten);
criterion_main!(benches);
