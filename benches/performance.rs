// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::{Point3, Vector3};
use polystitch::{
    ClassifyOptions, FaceBvh, MeshSet, PointClassifier, PolygonSet, Primitive, StitchOptions,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `n` x `n` unit cubes, touching face to face and welded
fn cube_grid(n: usize) -> PolygonSet {
    let unit = Primitive::cube(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).to_polygons();
    let mut set = PolygonSet::new();
    for i in 0..n {
        for j in 0..n {
            let mut cube = unit.clone();
            cube.translate(&Vector3::new(i as f64, j as f64, 0.0));
            set.merge(&cube);
        }
    }
    set.weld_vertices();
    set
}

/// Cubes placed on a checkerboard so neighbours share only edges
fn checkerboard(n: usize) -> PolygonSet {
    let mut set = PolygonSet::new();
    for i in 0..n {
        for j in 0..n {
            if (i + j) % 2 == 0 {
                let min = Point3::new(i as f64, j as f64, 0.0);
                set.merge(&Primitive::cube(min, min + Vector3::new(1.0, 1.0, 1.0)).to_polygons());
            }
        }
    }
    set.weld_vertices();
    set
}

fn bench_stitch(c: &mut Criterion) {
    let mut group = c.benchmark_group("stitch");

    for n in [4, 8, 16] {
        let grid = cube_grid(n);
        group.bench_with_input(BenchmarkId::new("cube_grid", n), &grid, |b, set| {
            b.iter(|| MeshSet::from_polygons(black_box(set), &StitchOptions::default()).unwrap());
        });
    }

    for n in [4, 8, 16] {
        let board = checkerboard(n);
        group.bench_with_input(BenchmarkId::new("checkerboard", n), &board, |b, set| {
            b.iter(|| MeshSet::from_polygons(black_box(set), &StitchOptions::default()).unwrap());
        });
    }

    let board = checkerboard(8);
    group.bench_function("checkerboard_avoid_cavities", |b| {
        let options = StitchOptions { avoid_cavities: true };
        b.iter(|| MeshSet::from_polygons(black_box(&board), &options).unwrap());
    });

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    let polygons = Primitive::prism(Point3::origin(), 5.0, 10.0, 64).to_polygons();
    let meshes = MeshSet::from_polygons(&polygons, &StitchOptions::default()).unwrap();
    let index = FaceBvh::from_soup(meshes.soup());

    let mut rng = StdRng::seed_from_u64(42);
    let points: Vec<Point3<f64>> = (0..256)
        .map(|_| {
            Point3::new(
                rng.gen_range(-6.0..6.0),
                rng.gen_range(-6.0..6.0),
                rng.gen_range(-1.0..11.0),
            )
        })
        .collect();

    group.bench_function("bvh_build", |b| {
        b.iter(|| FaceBvh::from_soup(black_box(meshes.soup())));
    });

    for (name, even_odd) in [("signed", false), ("even_odd", true)] {
        let options = ClassifyOptions {
            even_odd,
            ..ClassifyOptions::default()
        };
        let classifier = PointClassifier::new(&meshes, &index, options);
        group.bench_function(name, |b| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| {
                for point in &points {
                    let _ = classifier.classify(black_box(point), None, &mut rng);
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_stitch, bench_classify);
criterion_main!(benches);
