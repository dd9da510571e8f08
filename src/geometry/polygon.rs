// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! 2D point-in-polygon classification

use super::{EPSILON, EPSILON2};
use nalgebra::Point2;

/// Where a 2D point lies relative to a polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonPoint {
    Outside,
    Inside,
    /// Coincides with the vertex at this index
    OnVertex(usize),
    /// Lies on the edge starting at this vertex index
    OnEdge(usize),
}

impl PolygonPoint {
    pub fn is_outside(&self) -> bool {
        matches!(self, PolygonPoint::Outside)
    }
}

/// Classify `p` against a simple polygon given as a vertex loop.
///
/// Vertices are tested first, then edges (within `EPSILON` of the edge's
/// supporting line and inside its padded extent), then the crossing rule.
pub fn point_in_polygon(points: &[Point2<f64>], p: &Point2<f64>) -> PolygonPoint {
    let n = points.len();

    if let Some(i) = points.iter().position(|v| (v - p).norm_squared() < EPSILON2) {
        return PolygonPoint::OnVertex(i);
    }

    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        if a.x.min(b.x) - EPSILON < p.x
            && a.x.max(b.x) + EPSILON > p.x
            && a.y.min(b.y) - EPSILON < p.y
            && a.y.max(b.y) + EPSILON > p.y
            && line_distance_squared(a, b, p) < EPSILON2
        {
            return PolygonPoint::OnEdge(i);
        }
    }

    if crosses_odd(points, p) {
        PolygonPoint::Inside
    } else {
        PolygonPoint::Outside
    }
}

/// Squared distance from `p` to the infinite line through `a` and `b`
fn line_distance_squared(a: &Point2<f64>, b: &Point2<f64>, p: &Point2<f64>) -> f64 {
    let dir = b - a;
    let len2 = dir.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm_squared();
    }
    let cross = dir.x * (p.y - a.y) - dir.y * (p.x - a.x);
    cross * cross / len2
}

fn crosses_odd(points: &[Point2<f64>], p: &Point2<f64>) -> bool {
    let n = points.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = &points[i];
        let b = &points[j];
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
