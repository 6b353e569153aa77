//! Benchmarks for classified face search.
//!
//! Run with: cargo bench -p scene-query
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p scene-query -- --save-baseline main
//! 2. After changes: cargo bench -p scene-query -- --baseline main

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use nalgebra::{Matrix4, Point3, Vector3};
use scene_query::{QueryConfig, Snapshot, search};
use scene_types::{Classification, ClassifiedFace, FragmentId, MeshFragment};

// =============================================================================
// Test Scene Generation
// =============================================================================

/// A square room of `grid x grid` fragments on a 1 m pitch, each holding a
/// `faces_per_side x faces_per_side` patch of floor faces spaced 2 cm apart.
fn create_room(grid: u32, faces_per_side: u32) -> Snapshot {
    let mut fragments = Vec::new();
    for gx in 0..grid {
        for gz in 0..grid {
            let origin = Vector3::new(f64::from(gx), 0.0, f64::from(gz));
            let mut fragment = MeshFragment::new(
                FragmentId::new(u64::from(gx * grid + gz)),
                Matrix4::new_translation(&origin),
            );
            for i in 0..faces_per_side {
                for j in 0..faces_per_side {
                    let label = Classification::from_raw(u8::try_from((i + j) % 8).unwrap_or(0));
                    fragment.push_face(ClassifiedFace::new(
                        Point3::new(f64::from(i) * 0.02, 0.0, f64::from(j) * 0.02),
                        label,
                    ));
                }
            }
            fragments.push(fragment);
        }
    }
    Snapshot::from_fragments(fragments)
}

// =============================================================================
// Search Benchmarks
// =============================================================================

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("ClassifiedFaceSearch");

    let test_cases = [
        ("room_4x4_2500", create_room(4, 50)),
        ("room_8x8_2500", create_room(8, 50)),
        ("room_8x8_10000", create_room(8, 100)),
    ];
    let config = QueryConfig::default();

    for (name, snapshot) in &test_cases {
        group.throughput(Throughput::Elements(snapshot.face_count() as u64));

        // Lands on a face of the nearest fragment: early exit.
        let hit = Point3::new(1.3, 0.0, 1.3);
        group.bench_with_input(BenchmarkId::new("hit", name), snapshot, |b, snapshot| {
            b.iter(|| search(black_box(&hit), black_box(snapshot), black_box(&config)));
        });

        // Hovers above the floor: every in-range face is examined.
        let miss = Point3::new(1.3, 0.5, 1.3);
        group.bench_with_input(BenchmarkId::new("miss", name), snapshot, |b, snapshot| {
            b.iter(|| search(black_box(&miss), black_box(snapshot), black_box(&config)));
        });
    }

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let index = scene_query::FragmentIndex::new();
    for fragment in create_room(8, 50).iter() {
        index.upsert(MeshFragment::clone(fragment));
    }

    c.bench_function("FragmentIndex::snapshot/64", |b| {
        b.iter(|| black_box(index.snapshot()));
    });
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_search, bench_snapshot);
criterion_main!(benches);
