// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! polystitch
//!
//! Turns a soup of planar polygons into connected meshes by pairing their
//! half-edges, including edges shared by more than two faces, and
//! classifies points as inside, outside or on the result by ray casting.

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod stitch;

pub use classify::{Classification, PointClass, PointClassifier};
pub use config::{ClassifyOptions, Config, StitchOptions};
pub use error::{Error, Result};
pub use geometry::{BoundingBox, FaceBvh, SpatialIndex};
pub use mesh::{FaceId, HalfEdgeId, HalfEdgeSoup, Mesh, MeshSet, PolygonSet, Primitive, StitchReport, VertexId};
pub use stitch::{stitch, StitchOutcome, StitchStats};

/// Load a polygon file and stitch it into meshes
pub fn stitch_file(path: impl AsRef<std::path::Path>, options: &StitchOptions) -> anyhow::Result<MeshSet> {
    let polygons = io::load_polygons(path)?;
    Ok(MeshSet::from_polygons(&polygons, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_basic_cube() {
        let cube = Primitive::cube(Point3::origin(), Point3::new(10.0, 10.0, 10.0)).to_polygons();
        let meshes = MeshSet::from_polygons(&cube, &StitchOptions::default()).unwrap();
        assert_eq!(meshes.mesh_count(), 1);
        assert!(meshes.meshes()[0].is_closed());
    }
}
