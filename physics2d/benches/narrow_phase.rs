// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Benchmarks for the narrow-phase collision tests
//!
//! These benchmarks measure:
//! - Cost of each shape pairing, colliding and separated
//! - All-pairs detection over a grid of mixed bodies

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use physics2d::collision::{is_colliding, Contact};
use physics2d::prelude::*;

fn pair(a: Shape, b: Shape, offset: Vec2) -> (RigidBody, RigidBody) {
    (
        RigidBody::new(a, Vec2::ZERO, 1.0),
        RigidBody::new(b, offset, 1.0).with_rotation(0.3),
    )
}

/// Benchmark: single pair tests per shape combination
fn bench_shape_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("shape_pairs");
    let (ha, hb) = (BodyHandle::new(0, 0), BodyHandle::new(1, 0));

    let cases = [
        ("circle_circle", pair(Shape::circle(20.0), Shape::circle(20.0), Vec2::new(30.0, 0.0))),
        ("box_box", pair(Shape::boxed(40.0, 40.0), Shape::boxed(40.0, 40.0), Vec2::new(35.0, 5.0))),
        ("box_circle", pair(Shape::boxed(40.0, 40.0), Shape::circle(20.0), Vec2::new(35.0, 0.0))),
        ("box_box_separated", pair(Shape::boxed(40.0, 40.0), Shape::boxed(40.0, 40.0), Vec2::new(100.0, 0.0))),
    ];

    for (name, (a, b)) in &cases {
        group.bench_function(*name, |bench| {
            let mut contacts = Vec::with_capacity(2);
            bench.iter(|| {
                contacts.clear();
                black_box(is_colliding(ha, black_box(a), hb, black_box(b), &mut contacts));
            });
        });
    }

    group.finish();
}

/// Benchmark: all-pairs detection for growing body counts
fn bench_all_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("all_pairs");

    for side in [4usize, 8, 16].iter() {
        let bodies: Vec<(BodyHandle, RigidBody)> = (0..side * side)
            .map(|i| {
                let position = Vec2::new((i % side) as f64 * 35.0, (i / side) as f64 * 35.0);
                let shape = if i % 2 == 0 {
                    Shape::circle(20.0)
                } else {
                    Shape::boxed(40.0, 40.0)
                };
                (BodyHandle::new(i as u32, 0), RigidBody::new(shape, position, 1.0))
            })
            .collect();

        let pairs = (bodies.len() * (bodies.len() - 1) / 2) as u64;
        group.throughput(Throughput::Elements(pairs));
        group.bench_with_input(BenchmarkId::from_parameter(side * side), &bodies, |bench, bodies| {
            let mut contacts: Vec<Contact> = Vec::new();
            bench.iter(|| {
                contacts.clear();
                for i in 0..bodies.len() {
                    for j in (i + 1)..bodies.len() {
                        let (ha, a) = &bodies[i];
                        let (hb, b) = &bodies[j];
                        is_colliding(*ha, a, *hb, b, &mut contacts);
                    }
                }
                black_box(contacts.len());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_shape_pairs, bench_all_pairs);
criterion_main!(benches);
