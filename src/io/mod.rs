// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - loading polygon soups and writing stitched meshes

mod obj;
mod stl;

pub use obj::{parse_obj, read_obj, save_obj, write_obj};
pub use stl::{parse_stl, read_stl, save_stl, write_stl};

use crate::mesh::{MeshSet, PolygonSet};
use anyhow::{bail, Result};
use std::path::Path;

/// Supported mesh file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Obj,
    Stl,
}

impl Format {
    /// Format named by the file extension, case-insensitive
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("obj") => Ok(Format::Obj),
            Some("stl") => Ok(Format::Stl),
            _ => bail!("Unsupported mesh format: {}", path.display()),
        }
    }
}

/// Load polygons from an OBJ or STL file
pub fn load_polygons(path: impl AsRef<Path>) -> Result<PolygonSet> {
    let path = path.as_ref();
    match Format::from_path(path)? {
        Format::Obj => read_obj(path),
        Format::Stl => read_stl(path),
    }
}

/// Write stitched meshes as OBJ or STL, chosen by extension
pub fn save_meshes(path: impl AsRef<Path>, meshes: &MeshSet) -> Result<()> {
    let path = path.as_ref();
    match Format::from_path(path)? {
        Format::Obj => save_obj(path, meshes),
        Format::Stl => save_stl(path, meshes),
    }
}
