// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh data structures

pub mod halfedge;
pub mod meshset;
pub mod polygons;

pub use halfedge::{Face, FaceId, FaceLoop, HalfEdge, HalfEdgeId, HalfEdgeSoup, VertexId};
pub use meshset::{Mesh, MeshSet, MeshSummary, StitchReport};
pub use polygons::{PolygonSet, Primitive};
