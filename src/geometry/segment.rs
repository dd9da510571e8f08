// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Line segments and segment/plane intersection

use super::{BoundingBox, Plane, EPSILON};
use nalgebra::{Point3, Vector3};

/// How a segment meets a face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntersectionClass {
    /// No contact
    None,
    /// Crosses the interior of the face
    Face,
    /// Passes through one of the face's vertices
    Vertex,
    /// Passes through one of the face's edges
    Edge,
    /// Lies in the face plane or is too short to judge
    Degenerate,
}

/// Result of crossing a segment with a plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaneCrossing {
    None,
    /// Single crossing point
    Point(Point3<f64>),
    /// Both endpoints lie on the plane
    Coplanar,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub v1: Point3<f64>,
    pub v2: Point3<f64>,
}

impl LineSegment {
    pub fn new(v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v1, v2 }
    }

    pub fn direction(&self) -> Vector3<f64> {
        self.v2 - self.v1
    }

    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// A segment shorter than `EPSILON` has no usable direction
    pub fn is_ok(&self) -> bool {
        self.length() >= EPSILON
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points([&self.v1, &self.v2])
    }

    pub fn intersect_plane(&self, plane: &Plane) -> PlaneCrossing {
        let d1 = plane.signed_distance(&self.v1);
        let d2 = plane.signed_distance(&self.v2);
        let on1 = d1.abs() < EPSILON;
        let on2 = d2.abs() < EPSILON;

        match (on1, on2) {
            (true, true) => PlaneCrossing::Coplanar,
            (true, false) => PlaneCrossing::Point(self.v1),
            (false, true) => PlaneCrossing::Point(self.v2),
            (false, false) if (d1 < 0.0) == (d2 < 0.0) => PlaneCrossing::None,
            (false, false) => {
                let t = d1 / (d1 - d2);
                PlaneCrossing::Point(self.v1 + self.direction() * t)
            }
        }
    }
}
