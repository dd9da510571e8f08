// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Supporting planes of polygon faces

use nalgebra::{Point3, Vector3};

/// Plane `normal · p + d = 0` with a unit normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<f64>,
    pub d: f64,
}

impl Plane {
    pub fn from_point_normal(point: &Point3<f64>, normal: &Vector3<f64>) -> Self {
        let normal = normal.normalize();
        Self {
            normal,
            d: -normal.dot(&point.coords),
        }
    }

    /// Fit a plane to a polygon loop with Newell's method.
    ///
    /// Returns `None` when the loop encloses no area.
    pub fn fit(points: &[Point3<f64>]) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }
        let mut normal = Vector3::<f64>::zeros();
        let mut centroid = Vector3::<f64>::zeros();
        for (i, a) in points.iter().enumerate() {
            let b = &points[(i + 1) % points.len()];
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
            centroid += a.coords;
        }
        let length = normal.norm();
        if length <= f64::EPSILON {
            return None;
        }
        centroid /= points.len() as f64;
        Some(Self::from_point_normal(&Point3::from(centroid), &(normal / length)))
    }

    /// Signed distance, positive on the side the normal points to
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        self.normal.dot(&point.coords) + self.d
    }
}
