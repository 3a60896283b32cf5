// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use galatea::history::History;
use galatea::model::{NodeKind, Point, Sketch};

// Benchmark identity (keep stable):
// - Group name in this file: `history.save_undo`
// - Case IDs (`save_small`, `save_large`, `undo_chain`) must stay stable
//   across refactors so results remain comparable over time.

fn sketch_with_nodes(count: usize) -> Sketch {
    let mut sketch = Sketch::new();
    for i in 0..count {
        let kind = if i % 2 == 0 {
            NodeKind::Material
        } else {
            NodeKind::Activity
        };
        sketch
            .graph_mut()
            .add_node(kind, Point::new((i as f64) * 40.0, (i as f64) * 10.0), None);
    }
    sketch
}

fn benches_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("history.save_undo");

    let small = sketch_with_nodes(10);
    group.throughput(Throughput::Elements(1));
    group.bench_function("save_small", |b| {
        b.iter_batched(
            || History::new(&small),
            |mut history| {
                history.save(black_box(&small));
                black_box(history)
            },
            BatchSize::SmallInput,
        );
    });

    let large = sketch_with_nodes(500);
    group.bench_function("save_large", |b| {
        b.iter_batched(
            || History::new(&large),
            |mut history| {
                history.save(black_box(&large));
                black_box(history)
            },
            BatchSize::SmallInput,
        );
    });

    // Fill past the depth bound, then unwind completely.
    group.bench_function("undo_chain", |b| {
        b.iter_batched(
            || {
                let mut history = History::new(&small);
                for _ in 0..40 {
                    history.save(&small);
                }
                history
            },
            |mut history| {
                while let Some(snapshot) = history.undo() {
                    black_box(&snapshot);
                }
                black_box(history)
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, benches_history);
criterion_main!(benches);
