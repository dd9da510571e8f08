// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - planar predicates, projection and spatial indexing

mod bbox;
mod bvh;
mod plane;
mod polygon;
mod projection;
mod segment;

pub use bbox::BoundingBox;
pub use bvh::{BVHNode, FaceBvh, SpatialIndex};
pub use plane::Plane;
pub use polygon::{point_in_polygon, PolygonPoint};
pub use projection::{Axis, Projection};
pub use segment::{IntersectionClass, LineSegment, PlaneCrossing};

/// Distance below which two geometric quantities are treated as equal
pub const EPSILON: f64 = 1.490_116_119_384_765_6e-8;

/// `EPSILON` squared, for comparisons against squared lengths
pub const EPSILON2: f64 = EPSILON * EPSILON;
