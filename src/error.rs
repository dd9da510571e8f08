// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Library error type

use thiserror::Error;

/// Errors reported for malformed input and undecidable queries.
///
/// Broken internal invariants are not represented here; they panic.
#[derive(Debug, Error)]
pub enum Error {
    #[error("face {face} has {corners} corners, at least 3 are required")]
    TooFewCorners { face: usize, corners: usize },

    #[error("face {face} references vertex {vertex}, but only {vertex_count} vertices exist")]
    VertexOutOfRange {
        face: usize,
        vertex: usize,
        vertex_count: usize,
    },

    #[error("face {face} repeats vertex {vertex} on consecutive corners")]
    RepeatedVertex { face: usize, vertex: usize },

    #[error("face {face} encloses no area")]
    ZeroAreaFace { face: usize },

    #[error("mesh {mesh} does not exist (mesh set has {mesh_count} meshes)")]
    UnknownMesh { mesh: usize, mesh_count: usize },

    #[error("ray casting could not classify the point after {attempts} attempts")]
    Undecided { attempts: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
