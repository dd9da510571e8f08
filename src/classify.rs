// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Point-in-mesh classification by random ray casting

use crate::config::ClassifyOptions;
use crate::error::{Error, Result};
use crate::geometry::{IntersectionClass, LineSegment, SpatialIndex, EPSILON};
use crate::mesh::{FaceId, MeshSet};
use nalgebra::{Point3, Vector3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::f64::consts::TAU;
use std::fmt;
use tracing::{trace, warn};

/// Where a point lies relative to the meshes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointClass {
    In,
    Out,
    On,
}

impl fmt::Display for PointClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointClass::In => write!(f, "IN"),
            PointClass::Out => write!(f, "OUT"),
            PointClass::On => write!(f, "ON"),
        }
    }
}

/// Result of classifying one point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub class: PointClass,
    /// Face the point lies on, for [`PointClass::On`]
    pub hit_face: Option<FaceId>,
    /// Rays cast; zero when no ray was needed
    pub attempts: usize,
}

impl Classification {
    fn without_rays(class: PointClass, hit_face: Option<FaceId>) -> Self {
        Self {
            class,
            hit_face,
            attempts: 0,
        }
    }
}

/// Classifies points against a stitched [`MeshSet`] using a face index
pub struct PointClassifier<'a, I: SpatialIndex> {
    mesh_set: &'a MeshSet,
    index: &'a I,
    options: ClassifyOptions,
}

impl<'a, I: SpatialIndex> PointClassifier<'a, I> {
    pub fn new(mesh_set: &'a MeshSet, index: &'a I, options: ClassifyOptions) -> Self {
        Self {
            mesh_set,
            index,
            options,
        }
    }

    pub fn options(&self) -> &ClassifyOptions {
        &self.options
    }

    /// Classify `point`, optionally against one mesh only.
    ///
    /// Rays whose result is ambiguous (through a vertex or edge, lying in a
    /// face plane, or grazing a face under the even-odd rule) are discarded
    /// and another direction is drawn from `rng`, up to `max_ray_attempts`
    /// rays. The rule never changes between attempts.
    pub fn classify<R: Rng + ?Sized>(
        &self,
        point: &Point3<f64>,
        mesh_filter: Option<usize>,
        rng: &mut R,
    ) -> Result<Classification> {
        if let Some(mesh) = mesh_filter {
            self.mesh_set.mesh(mesh)?;
        }

        let bounds = self.index.bounds();
        if !bounds.contains_point(point) {
            let class = if self.mesh_set.is_single_negative() {
                PointClass::In
            } else {
                PointClass::Out
            };
            return Ok(Classification::without_rays(class, None));
        }

        let soup = self.mesh_set.soup();
        if let Some(face) = self
            .index
            .faces_near_point(point)
            .into_iter()
            .find(|&f| self.accepts(f, mesh_filter) && soup.face_contains_point(f, point))
        {
            return Ok(Classification::without_rays(PointClass::On, Some(face)));
        }

        let reach = 2.0 * bounds.diagonal();
        let budget = self.options.max_ray_attempts;
        for attempt in 1..=budget {
            let direction = random_direction(rng);
            let segment = LineSegment::new(*point, point + direction * reach);
            match self.cast(&segment, &direction, mesh_filter, self.options.even_odd) {
                Some(class) => {
                    return Ok(Classification {
                        class,
                        hit_face: None,
                        attempts: attempt,
                    })
                }
                None => trace!(attempt, "Ambiguous ray, retrying"),
            }
        }

        warn!(attempts = budget, "No unambiguous ray found");
        Err(Error::Undecided { attempts: budget })
    }

    fn accepts(&self, face: FaceId, mesh_filter: Option<usize>) -> bool {
        mesh_filter.map_or(true, |mesh| self.mesh_set.mesh_of(face) == mesh)
    }

    /// Classify from one ray; `None` when the ray has to be discarded
    fn cast(
        &self,
        segment: &LineSegment,
        direction: &Vector3<f64>,
        mesh_filter: Option<usize>,
        even_odd: bool,
    ) -> Option<PointClass> {
        let soup = self.mesh_set.soup();
        let mut hits: Vec<(f64, usize)> = Vec::new();
        let mut windings = vec![0i64; self.mesh_set.mesh_count()];

        for face in self.index.faces_along_segment(segment) {
            if !self.accepts(face, mesh_filter) {
                continue;
            }
            let hit = match soup.face_segment_intersection(face, segment) {
                (IntersectionClass::None, _) => continue,
                (IntersectionClass::Face, Some(hit)) => hit,
                _ => return None,
            };
            let facing = direction.dot(&soup.face(face).plane.normal);
            if even_odd && facing.abs() < EPSILON {
                return None;
            }
            let mesh = self.mesh_set.mesh_of(face);
            windings[mesh] += if facing < 0.0 { 1 } else { -1 };
            hits.push(((hit - segment.v1).norm(), mesh));
        }

        if even_odd {
            return Some(if hits.len() % 2 == 1 {
                PointClass::In
            } else {
                PointClass::Out
            });
        }

        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        let class = hits
            .iter()
            .find_map(|&(_, mesh)| match windings[mesh].cmp(&0) {
                Ordering::Less => Some(PointClass::In),
                Ordering::Greater => Some(PointClass::Out),
                Ordering::Equal => None,
            })
            .unwrap_or(PointClass::Out);
        Some(class)
    }
}

/// Uniformly drawn spherical angles mapped to a unit vector
fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vector3<f64> {
    let a1: f64 = rng.gen_range(0.0..TAU);
    let a2: f64 = rng.gen_range(0.0..TAU);
    Vector3::new(a1.sin() * a2.sin(), a1.cos() * a2.sin(), a2.cos())
}
