// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! File round trips through the public loaders and writers

use nalgebra::Point3;
use polystitch::{io, stitch_file, MeshSet, Primitive, StitchOptions};
use std::fs;
use tempfile::TempDir;

fn two_cubes() -> MeshSet {
    let mut polygons = Primitive::cube(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).to_polygons();
    polygons.merge(&Primitive::cube(Point3::new(2.0, 0.0, 0.0), Point3::new(3.0, 2.0, 1.0)).to_polygons());
    MeshSet::from_polygons(&polygons, &StitchOptions::default()).unwrap()
}

#[test]
fn test_obj_round_trip_keeps_meshes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cubes.obj");
    let meshes = two_cubes();
    io::save_meshes(&path, &meshes).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.matches("\ng mesh_").count(), 2);

    let restitched = stitch_file(&path, &StitchOptions::default()).unwrap();
    assert_eq!(restitched.mesh_count(), 2);
    assert_eq!(restitched.soup().face_count(), 12);
    let volumes: Vec<f64> = restitched.meshes().iter().map(|m| m.volume).collect();
    assert!((volumes[0] - 1.0).abs() < 1e-12);
    assert!((volumes[1] - 2.0).abs() < 1e-12);
}

#[test]
fn test_stl_round_trip_keeps_meshes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cubes.stl");
    io::save_meshes(&path, &two_cubes()).unwrap();

    let restitched = stitch_file(&path, &StitchOptions::default()).unwrap();
    assert_eq!(restitched.mesh_count(), 2);
    assert_eq!(restitched.soup().face_count(), 24);
    assert!(restitched.meshes().iter().all(|m| m.is_closed()));
    assert!((restitched.meshes()[1].volume - 2.0).abs() < 1e-6);
}

#[test]
fn test_malformed_obj_reports_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.obj");
    fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\n\nf 1 2 9\n").unwrap();

    let err = io::load_polygons(&path).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("broken.obj"), "{}", message);
    assert!(message.contains("line 5"), "{}", message);
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.ply");
    fs::write(&path, "ply\n").unwrap();

    let err = io::load_polygons(&path).unwrap_err();
    assert!(err.to_string().contains("Unsupported mesh format"));
    assert!(io::save_meshes(dir.path().join("out.gltf"), &two_cubes()).is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = stitch_file(dir.path().join("absent.obj"), &StitchOptions::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read OBJ file"));
}
