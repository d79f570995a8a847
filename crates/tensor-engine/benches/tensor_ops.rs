// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for the broadcast arithmetic engine.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use tensor_engine::Tensor;

fn bench_broadcast_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("broadcast_add");
    for &tiles in &[1usize, 8, 64] {
        group.bench_function(BenchmarkId::from_parameter(tiles), |b| {
            b.iter_batched(
                || {
                    (
                        Tensor::fill(1.0, &[tiles, 1024]),
                        Tensor::fill(2.0, &[1024]),
                    )
                },
                |(t, operand)| t.add(&operand),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_scalar_multiply(c: &mut Criterion) {
    c.bench_function("scalar_multiply_64k", |b| {
        b.iter_batched(
            || Tensor::fill(1.0, &[64, 1024]),
            |t| t.multiply_scalar(1.0001),
            BatchSize::SmallInput,
        );
    });
}

fn bench_render(c: &mut Criterion) {
    let t = Tensor::arange(&[4096.0]).reshape(&[16, 16, 16]);
    c.bench_function("render_16x16x16", |b| b.iter(|| t.to_string()));
}

criterion_group!(benches, bench_broadcast_add, bench_scalar_multiply, bench_render);
criterion_main!(benches);
