// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use galatea::generate::build_from_description;
use galatea::model::Graph;

// Benchmark identity (keep stable):
// - Group name in this file: `generate.describe`
// - Case IDs (`movement_chain`, `keyword_short`, `keyword_fanout`) must stay
//   stable across refactors so results remain comparable over time.

const MOVEMENT_CHAIN: &str = "steel is shipped from the mill to the plant via forging, \
     then parts are transported from the plant to the warehouse, \
     then pallets are distributed from the warehouse to the store";

const KEYWORD_SHORT: &str = "raw materials consumed in a bom to produce a finished good";

fn keyword_fanout_text() -> String {
    let mut text = String::new();
    for _ in 0..20 {
        text.push_str("twelve pallets shipped to a dc then storage ");
    }
    text
}

fn benches_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate.describe");

    group.throughput(Throughput::Bytes(MOVEMENT_CHAIN.len() as u64));
    group.bench_function("movement_chain", |b| {
        b.iter_batched(
            Graph::new,
            |mut graph| {
                let report = build_from_description(&mut graph, black_box(MOVEMENT_CHAIN))
                    .expect("movement chain generates");
                black_box((graph, report))
            },
            BatchSize::SmallInput,
        );
    });

    group.throughput(Throughput::Bytes(KEYWORD_SHORT.len() as u64));
    group.bench_function("keyword_short", |b| {
        b.iter_batched(
            Graph::new,
            |mut graph| {
                let report = build_from_description(&mut graph, black_box(KEYWORD_SHORT))
                    .expect("keyword text generates");
                black_box((graph, report))
            },
            BatchSize::SmallInput,
        );
    });

    let fanout = keyword_fanout_text();
    group.throughput(Throughput::Bytes(fanout.len() as u64));
    group.bench_function("keyword_fanout", |b| {
        b.iter_batched(
            Graph::new,
            |mut graph| {
                let report = build_from_description(&mut graph, black_box(fanout.as_str()))
                    .expect("fanout text generates");
                black_box((graph, report))
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, benches_generate);
criterion_main!(benches);
