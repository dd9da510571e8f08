// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Axis-aligned projection of planar polygons into 2D
//!
//! A face is projected by dropping the coordinate of the dominant axis of
//! its normal. The remaining two coordinates are ordered so that a loop
//! that is counter-clockwise when seen from the front of the plane stays
//! counter-clockwise in 2D.

use super::Plane;
use nalgebra::{Point2, Point3, Vector3};

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Projection strategy: the dropped axis and the sign of the normal along it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Projection {
    pub axis: Axis,
    pub positive: bool,
}

impl Projection {
    /// Pick the projection for a plane normal
    pub fn for_normal(normal: &Vector3<f64>) -> Self {
        let abs = normal.abs();
        let axis = if abs.x >= abs.y && abs.x >= abs.z {
            Axis::X
        } else if abs.y >= abs.z {
            Axis::Y
        } else {
            Axis::Z
        };
        let component = match axis {
            Axis::X => normal.x,
            Axis::Y => normal.y,
            Axis::Z => normal.z,
        };
        Self {
            axis,
            positive: component >= 0.0,
        }
    }

    pub fn project(&self, p: &Point3<f64>) -> Point2<f64> {
        match (self.axis, self.positive) {
            (Axis::X, true) => Point2::new(p.y, p.z),
            (Axis::X, false) => Point2::new(p.z, p.y),
            (Axis::Y, true) => Point2::new(p.z, p.x),
            (Axis::Y, false) => Point2::new(p.x, p.z),
            (Axis::Z, true) => Point2::new(p.x, p.y),
            (Axis::Z, false) => Point2::new(p.y, p.x),
        }
    }

    /// Lift a projected point back onto `plane`
    pub fn unproject(&self, p: &Point2<f64>, plane: &Plane) -> Point3<f64> {
        let n = &plane.normal;
        let d = plane.d;
        match (self.axis, self.positive) {
            (Axis::X, true) => Point3::new(-(n.y * p.x + n.z * p.y + d) / n.x, p.x, p.y),
            (Axis::X, false) => Point3::new(-(n.y * p.y + n.z * p.x + d) / n.x, p.y, p.x),
            (Axis::Y, true) => Point3::new(p.y, -(n.x * p.y + n.z * p.x + d) / n.y, p.x),
            (Axis::Y, false) => Point3::new(p.x, -(n.x * p.x + n.z * p.y + d) / n.y, p.y),
            (Axis::Z, true) => Point3::new(p.x, p.y, -(n.x * p.x + n.y * p.y + d) / n.z),
            (Axis::Z, false) => Point3::new(p.y, p.x, -(n.x * p.y + n.y * p.x + d) / n.z),
        }
    }
}
