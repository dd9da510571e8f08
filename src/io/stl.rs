// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL triangles via `stl_io`

use crate::mesh::{MeshSet, PolygonSet};
use anyhow::{Context, Result};
use nalgebra::Point3;
use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;
use stl_io::{Normal, Triangle, Vertex};

/// Read ASCII or binary STL; vertices come back merged by `stl_io` and
/// every triangle becomes a polygon
pub fn parse_stl<R: Read + Seek>(reader: &mut R) -> Result<PolygonSet> {
    let stl = stl_io::read_stl(reader).context("Failed to read STL contents")?;
    let vertices = stl
        .vertices
        .iter()
        .map(|v| Point3::new(v[0] as f64, v[1] as f64, v[2] as f64))
        .collect();
    let polygons = stl.faces.iter().map(|face| face.vertices.to_vec()).collect();
    Ok(PolygonSet { vertices, polygons })
}

/// Load polygons from an STL file
pub fn read_stl(path: &Path) -> Result<PolygonSet> {
    let mut file = File::open(path).with_context(|| format!("Failed to open STL file: {}", path.display()))?;
    parse_stl(&mut file).with_context(|| format!("Failed to parse STL file: {}", path.display()))
}

/// Write every face as a fan of binary STL triangles
pub fn write_stl<W: Write>(out: &mut W, meshes: &MeshSet) -> Result<()> {
    let soup = meshes.soup();
    let to_vertex = |p: &Point3<f64>| Vertex::new([p.x as f32, p.y as f32, p.z as f32]);

    let mut triangles = Vec::new();
    for face in soup.face_ids() {
        let n = soup.face(face).plane.normal;
        let normal = Normal::new([n.x as f32, n.y as f32, n.z as f32]);
        let points = soup.face_points(face);
        for pair in points[1..].windows(2) {
            triangles.push(Triangle {
                normal,
                vertices: [to_vertex(&points[0]), to_vertex(&pair[0]), to_vertex(&pair[1])],
            });
        }
    }

    stl_io::write_stl(out, triangles.iter()).context("Failed to write STL contents")?;
    Ok(())
}

/// Write a binary STL file for `meshes`
pub fn save_stl(path: &Path, meshes: &MeshSet) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("Failed to create STL file: {}", path.display()))?;
    write_stl(&mut file, meshes).with_context(|| format!("Failed to write STL file: {}", path.display()))
}
