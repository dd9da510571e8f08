// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Wavefront OBJ polygons

use crate::mesh::{MeshSet, PolygonSet};
use anyhow::{bail, Context, Result};
use nalgebra::Point3;
use std::io::Write;
use std::path::Path;

/// Parse the `v` and `f` records of an OBJ document.
///
/// Face corners may be `i`, `i/t`, `i//n` or `i/t/n`; negative indices
/// count back from the latest vertex. Every other record is ignored.
pub fn parse_obj(source: &str) -> Result<PolygonSet> {
    let mut set = PolygonSet::new();

    for (number, line) in source.lines().enumerate() {
        let number = number + 1;
        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("v") => {
                let coords = fields
                    .take(3)
                    .map(|f| f.parse::<f64>())
                    .collect::<Result<Vec<_>, _>>()
                    .with_context(|| format!("line {}: invalid vertex coordinate", number))?;
                if coords.len() != 3 {
                    bail!("line {}: vertex needs 3 coordinates, found {}", number, coords.len());
                }
                set.add_vertex(Point3::new(coords[0], coords[1], coords[2]));
            }
            Some("f") => {
                let corners = fields
                    .map(|corner| resolve_index(corner, set.vertex_count()))
                    .collect::<Result<Vec<_>>>()
                    .with_context(|| format!("line {}: invalid face", number))?;
                if corners.len() < 3 {
                    bail!("line {}: face needs at least 3 corners, found {}", number, corners.len());
                }
                set.add_polygon(corners);
            }
            _ => {}
        }
    }

    Ok(set)
}

/// Zero-based vertex index of one face corner
fn resolve_index(corner: &str, vertex_count: usize) -> Result<usize> {
    let raw = corner.split('/').next().unwrap_or_default();
    let index: i64 = raw
        .parse()
        .with_context(|| format!("bad vertex index {:?}", raw))?;
    let resolved = match index {
        0 => bail!("vertex index 0 is not valid"),
        i if i > 0 => i - 1,
        i => vertex_count as i64 + i,
    };
    if resolved < 0 || resolved >= vertex_count as i64 {
        bail!(
            "vertex index {} out of range ({} vertices defined so far)",
            index,
            vertex_count
        );
    }
    Ok(resolved as usize)
}

/// Load polygons from an OBJ file
pub fn read_obj(path: &Path) -> Result<PolygonSet> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read OBJ file: {}", path.display()))?;
    parse_obj(&source).with_context(|| format!("Failed to parse OBJ file: {}", path.display()))
}

/// Write every vertex, then one `g mesh_N` group of faces per mesh
pub fn write_obj<W: Write>(out: &mut W, meshes: &MeshSet) -> Result<()> {
    let soup = meshes.soup();
    for v in soup.vertices() {
        writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for mesh in meshes.meshes() {
        writeln!(out, "g mesh_{}", mesh.id)?;
        for &face in &mesh.faces {
            let corners: Vec<String> = soup
                .face_vertices(face)
                .iter()
                .map(|v| (v.0 + 1).to_string())
                .collect();
            writeln!(out, "f {}", corners.join(" "))?;
        }
    }
    Ok(())
}

/// Write an OBJ file for `meshes`
pub fn save_obj(path: &Path, meshes: &MeshSet) -> Result<()> {
    let mut file = std::io::BufWriter::new(
        std::fs::File::create(path)
            .with_context(|| format!("Failed to create OBJ file: {}", path.display()))?,
    );
    write_obj(&mut file, meshes)?;
    file.flush()
        .with_context(|| format!("Failed to write OBJ file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StitchOptions;
    use crate::mesh::Primitive;

    const SQUARE: &str = "\
# two triangles
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1
f -4/1 -2/1 -1/1
";

    #[test]
    fn test_parse_index_forms() {
        let set = parse_obj(SQUARE).unwrap();
        assert_eq!(set.vertex_count(), 4);
        assert_eq!(set.polygons, vec![vec![0, 1, 2], vec![0, 2, 3]]);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = parse_obj("v 0 0 0\nv 1 0\n").unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));

        let err = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n").unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("line 4"));
        assert!(message.contains("out of range"));

        assert!(parse_obj("v 0 0 0\nf 0 1 1\n").is_err());
        assert!(parse_obj("v 0 0 0\nv 1 0 0\nf 1 2\n").is_err());
    }

    #[test]
    fn test_write_groups_per_mesh() {
        let mut polygons = Primitive::cube(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).to_polygons();
        polygons.merge(&Primitive::cube(Point3::new(3.0, 0.0, 0.0), Point3::new(4.0, 1.0, 1.0)).to_polygons());
        let meshes = MeshSet::from_polygons(&polygons, &StitchOptions::default()).unwrap();

        let mut out = Vec::new();
        write_obj(&mut out, &meshes).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("g mesh_0\n"));
        assert!(text.contains("g mesh_1\n"));

        let reread = parse_obj(&text).unwrap();
        assert_eq!(reread, polygons);
    }
}
