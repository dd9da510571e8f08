// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Indexed polygon sets and primitive generators

use super::HalfEdgeSoup;
use crate::error::Result;
use ahash::AHashMap;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Vertex positions plus polygon loops indexing into them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonSet {
    pub vertices: Vec<Point3<f64>>,
    pub polygons: Vec<Vec<usize>>,
}

impl PolygonSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, point: Point3<f64>) -> usize {
        self.vertices.push(point);
        self.vertices.len() - 1
    }

    pub fn add_polygon(&mut self, indices: Vec<usize>) {
        self.polygons.push(indices);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Append another set without sharing any vertices
    pub fn merge(&mut self, other: &PolygonSet) {
        let offset = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        self.polygons.extend(
            other
                .polygons
                .iter()
                .map(|p| p.iter().map(|i| i + offset).collect()),
        );
    }

    /// Move every vertex by `offset`
    pub fn translate(&mut self, offset: &Vector3<f64>) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Reverse every loop, turning outward normals inward
    pub fn inverted(mut self) -> Self {
        for polygon in &mut self.polygons {
            polygon.reverse();
        }
        self
    }

    /// Merge vertices with bit-identical coordinates and remap the loops.
    ///
    /// Returns the number of vertices removed.
    pub fn weld_vertices(&mut self) -> usize {
        let original_count = self.vertices.len();
        let mut slots: AHashMap<[u64; 3], usize> = AHashMap::with_capacity(original_count);
        let mut remap = Vec::with_capacity(original_count);
        let mut welded = Vec::new();

        for v in &self.vertices {
            // +0.0 and -0.0 are the same point
            let key = [v.x + 0.0, v.y + 0.0, v.z + 0.0].map(f64::to_bits);
            let slot = *slots.entry(key).or_insert_with(|| {
                welded.push(*v);
                welded.len() - 1
            });
            remap.push(slot);
        }

        for polygon in &mut self.polygons {
            for index in polygon.iter_mut() {
                *index = remap[*index];
            }
        }
        self.vertices = welded;
        original_count - self.vertices.len()
    }

    /// Build the half-edge soup for these polygons
    pub fn to_soup(&self) -> Result<HalfEdgeSoup> {
        HalfEdgeSoup::from_polygons(self.vertices.clone(), &self.polygons)
    }
}

/// Closed polyhedral primitives with outward-facing counter-clockwise loops
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Cube {
        min: Point3<f64>,
        max: Point3<f64>,
    },
    Prism {
        base_center: Point3<f64>,
        radius: f64,
        height: f64,
        segments: usize,
    },
    Tetrahedron {
        corners: [Point3<f64>; 4],
    },
}

impl Primitive {
    /// Axis-aligned box spanning `min`..`max`
    pub fn cube(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self::Cube { min, max }
    }

    /// Regular prism standing on the z = `base_center.z` plane
    pub fn prism(base_center: Point3<f64>, radius: f64, height: f64, segments: usize) -> Self {
        Self::Prism {
            base_center,
            radius,
            height,
            segments: segments.max(3),
        }
    }

    pub fn tetrahedron(corners: [Point3<f64>; 4]) -> Self {
        Self::Tetrahedron { corners }
    }

    pub fn to_polygons(&self) -> PolygonSet {
        match self {
            Self::Cube { min, max } => cube_polygons(min, max),
            Self::Prism {
                base_center,
                radius,
                height,
                segments,
            } => prism_polygons(base_center, *radius, *height, *segments),
            Self::Tetrahedron { corners } => tetrahedron_polygons(corners),
        }
    }

    pub fn to_soup(&self) -> Result<HalfEdgeSoup> {
        self.to_polygons().to_soup()
    }
}

fn cube_polygons(min: &Point3<f64>, max: &Point3<f64>) -> PolygonSet {
    // Corner (i, j, k) picks min or max per axis; index = i + 2j + 4k
    let vertices = (0..8)
        .map(|c| {
            Point3::new(
                if c & 1 == 0 { min.x } else { max.x },
                if c & 2 == 0 { min.y } else { max.y },
                if c & 4 == 0 { min.z } else { max.z },
            )
        })
        .collect();
    let polygons = vec![
        vec![0, 4, 6, 2], // -x
        vec![1, 3, 7, 5], // +x
        vec![0, 1, 5, 4], // -y
        vec![2, 6, 7, 3], // +y
        vec![0, 2, 3, 1], // -z
        vec![4, 5, 7, 6], // +z
    ];
    PolygonSet { vertices, polygons }
}

fn prism_polygons(base_center: &Point3<f64>, radius: f64, height: f64, segments: usize) -> PolygonSet {
    let mut set = PolygonSet::new();
    for level in [0.0, height] {
        for i in 0..segments {
            let angle = TAU * i as f64 / segments as f64;
            set.add_vertex(base_center + Vector3::new(radius * angle.cos(), radius * angle.sin(), level));
        }
    }
    let bottom = |i: usize| i % segments;
    let top = |i: usize| segments + i % segments;

    set.add_polygon((0..segments).rev().map(bottom).collect());
    set.add_polygon((0..segments).map(top).collect());
    for i in 0..segments {
        set.add_polygon(vec![bottom(i), bottom(i + 1), top(i + 1), top(i)]);
    }
    set
}

fn tetrahedron_polygons(corners: &[Point3<f64>; 4]) -> PolygonSet {
    let [a, b, c, d] = *corners;
    // Orient so that d sits behind the face a-b-c
    let volume = (b - a).cross(&(c - a)).dot(&(d - a));
    let polygons = if volume < 0.0 {
        vec![vec![0, 1, 2], vec![0, 3, 1], vec![1, 3, 2], vec![2, 3, 0]]
    } else {
        vec![vec![0, 2, 1], vec![0, 1, 3], vec![1, 2, 3], vec![2, 0, 3]]
    };
    PolygonSet {
        vertices: corners.to_vec(),
        polygons,
    }
}
