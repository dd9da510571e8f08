// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Stitched meshes: connected face groups of one soup

use super::{FaceId, HalfEdgeId, HalfEdgeSoup, PolygonSet};
use crate::config::StitchOptions;
use crate::error::{Error, Result};
use crate::geometry::BoundingBox;
use crate::stitch::{stitch, StitchStats};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One connected face group
#[derive(Debug, Clone)]
pub struct Mesh {
    pub id: usize,
    pub faces: Vec<FaceId>,
    /// Half-edges of this mesh left without a reverse
    pub open_edges: Vec<HalfEdgeId>,
    /// Signed enclosed volume; only meaningful when closed
    pub volume: f64,
    /// Closed and inside-out, i.e. it bounds a cavity
    pub is_negative: bool,
}

impl Mesh {
    pub fn is_closed(&self) -> bool {
        self.open_edges.is_empty()
    }

    pub fn summary(&self) -> MeshSummary {
        MeshSummary {
            id: self.id,
            faces: self.faces.len(),
            open_edges: self.open_edges.len(),
            closed: self.is_closed(),
            negative: self.is_negative,
            volume: self.volume,
        }
    }
}

/// Serializable per-mesh line of a [`StitchReport`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshSummary {
    pub id: usize,
    pub faces: usize,
    pub open_edges: usize,
    pub closed: bool,
    pub negative: bool,
    pub volume: f64,
}

/// Outcome of building a [`MeshSet`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StitchReport {
    pub vertices: usize,
    pub faces: usize,
    pub stats: StitchStats,
    pub meshes: Vec<MeshSummary>,
}

impl StitchReport {
    pub fn closed_meshes(&self) -> usize {
        self.meshes.iter().filter(|m| m.closed).count()
    }
}

/// A stitched soup partitioned into meshes
#[derive(Debug, Clone)]
pub struct MeshSet {
    soup: HalfEdgeSoup,
    meshes: Vec<Mesh>,
    face_mesh: Vec<usize>,
    stats: StitchStats,
}

impl MeshSet {
    /// Build, stitch and partition indexed polygons
    pub fn from_polygons(polygons: &PolygonSet, options: &StitchOptions) -> Result<Self> {
        Ok(Self::from_soup(polygons.to_soup()?, options))
    }

    /// Stitch `soup` and partition it by face group
    pub fn from_soup(mut soup: HalfEdgeSoup, options: &StitchOptions) -> Self {
        let outcome = stitch(&mut soup, options);

        let mut meshes: Vec<Mesh> = (0..outcome.group_count())
            .map(|id| Mesh {
                id,
                faces: Vec::with_capacity(outcome.group_sizes[id]),
                open_edges: Vec::new(),
                volume: 0.0,
                is_negative: false,
            })
            .collect();

        for f in soup.face_ids() {
            let mesh = &mut meshes[outcome.face_group[f.0]];
            mesh.faces.push(f);
            mesh.volume += face_volume(&soup, f);
            mesh.open_edges
                .extend(soup.face_edges(f).filter(|&e| soup.rev(e).is_none()));
        }
        for mesh in &mut meshes {
            mesh.is_negative = mesh.is_closed() && mesh.volume < 0.0;
        }

        debug!(
            meshes = meshes.len(),
            closed = meshes.iter().filter(|m| m.is_closed()).count(),
            "Partitioned stitched soup"
        );

        Self {
            soup,
            meshes,
            face_mesh: outcome.face_group,
            stats: outcome.stats,
        }
    }

    pub fn soup(&self) -> &HalfEdgeSoup {
        &self.soup
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn mesh(&self, index: usize) -> Result<&Mesh> {
        self.meshes.get(index).ok_or(Error::UnknownMesh {
            mesh: index,
            mesh_count: self.meshes.len(),
        })
    }

    /// Index of the mesh owning face `f`
    pub fn mesh_of(&self, f: FaceId) -> usize {
        self.face_mesh[f.0]
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.soup.bounding_box()
    }

    /// True when the set is exactly one closed, inside-out mesh
    pub fn is_single_negative(&self) -> bool {
        matches!(self.meshes.as_slice(), [mesh] if mesh.is_negative)
    }

    pub fn stats(&self) -> &StitchStats {
        &self.stats
    }

    pub fn report(&self) -> StitchReport {
        StitchReport {
            vertices: self.soup.vertex_count(),
            faces: self.soup.face_count(),
            stats: self.stats.clone(),
            meshes: self.meshes.iter().map(Mesh::summary).collect(),
        }
    }
}

/// Contribution of one face to the enclosed volume: fan triangles
/// against the origin
fn face_volume(soup: &HalfEdgeSoup, f: FaceId) -> f64 {
    let points = soup.face_points(f);
    let p0 = points[0].coords;
    points[1..]
        .windows(2)
        .map(|w| p0.dot(&w[0].coords.cross(&w[1].coords)))
        .sum::<f64>()
        / 6.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Primitive;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_cube_is_one_closed_mesh() {
        let cube = Primitive::cube(Point3::new(1.0, 1.0, 1.0), Point3::new(3.0, 4.0, 5.0)).to_polygons();
        let set = MeshSet::from_polygons(&cube, &StitchOptions::default()).unwrap();

        assert_eq!(set.mesh_count(), 1);
        let mesh = set.mesh(0).unwrap();
        assert!(mesh.is_closed());
        assert!(!mesh.is_negative);
        assert_relative_eq!(mesh.volume, 24.0, epsilon = 1e-9);
        assert_eq!(set.stats().simple_pairs, 12);
        assert!(matches!(set.mesh(1), Err(Error::UnknownMesh { mesh: 1, mesh_count: 1 })));
    }

    #[test]
    fn test_inverted_cube_is_negative() {
        let cube = Primitive::cube(Point3::origin(), Point3::new(2.0, 2.0, 2.0))
            .to_polygons()
            .inverted();
        let set = MeshSet::from_polygons(&cube, &StitchOptions::default()).unwrap();
        assert!(set.is_single_negative());
        assert_relative_eq!(set.meshes()[0].volume, -8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_disjoint_solids_are_separate_meshes() {
        let mut polygons = Primitive::cube(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).to_polygons();
        polygons.merge(&Primitive::prism(Point3::new(5.0, 0.0, 0.0), 1.0, 2.0, 6).to_polygons());
        let set = MeshSet::from_polygons(&polygons, &StitchOptions::default()).unwrap();

        assert_eq!(set.mesh_count(), 2);
        assert_eq!(set.mesh_of(FaceId(0)), 0);
        assert_eq!(set.mesh_of(FaceId(6)), 1);
        let report = set.report();
        assert_eq!(report.closed_meshes(), 2);
        assert_eq!(report.meshes[1].faces, 8);
        assert_eq!(report.stats.open_half_edges, 0);
    }

    #[test]
    fn test_open_box_is_not_closed() {
        let mut polygons = Primitive::cube(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).to_polygons();
        polygons.polygons.pop();
        let set = MeshSet::from_polygons(&polygons, &StitchOptions::default()).unwrap();

        let mesh = set.mesh(0).unwrap();
        assert_eq!(mesh.open_edges.len(), 4);
        assert!(!mesh.is_closed());
        assert!(!set.is_single_negative());
    }

    #[test]
    fn test_report_serializes() {
        let cube = Primitive::cube(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).to_polygons();
        let set = MeshSet::from_polygons(&cube, &StitchOptions::default()).unwrap();
        let json = serde_json::to_string(&set.report()).unwrap();
        let back: StitchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set.report());
    }
}
