// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shared soups for the stitching tests

use super::edge_index::VertexPairIndex;
use super::simple::match_simple_edges;
use super::union_find::FaceGroups;
use crate::mesh::{HalfEdgeSoup, PolygonSet, Primitive, VertexId};
use nalgebra::Point3;

/// Welded index of (1, 1, 0), the lower end of the shared edge
pub(crate) const P: VertexId = VertexId(3);
/// Welded index of (1, 1, 1), the upper end
pub(crate) const Q: VertexId = VertexId(7);

/// Unit boxes [0,1]³ and [1,2]×[1,2]×[0,1], touching along x = y = 1.
///
/// With `split`, the shared edge gets an extra vertex at its midpoint in
/// all four faces that run along it.
pub(crate) fn boxes_sharing_edge(split: bool) -> HalfEdgeSoup {
    let mut set = Primitive::cube(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).to_polygons();
    set.merge(&Primitive::cube(Point3::new(1.0, 1.0, 0.0), Point3::new(2.0, 2.0, 1.0)).to_polygons());
    set.weld_vertices();
    if split {
        split_edge(&mut set, P.0, Q.0, Point3::new(1.0, 1.0, 0.5));
    }
    set.to_soup().unwrap()
}

/// Insert a new vertex at `mid` between `a` and `b` wherever a loop runs
/// along that edge
pub(crate) fn split_edge(set: &mut PolygonSet, a: usize, b: usize, mid: Point3<f64>) {
    let m = set.add_vertex(mid);
    for polygon in &mut set.polygons {
        let n = polygon.len();
        let hit = (0..n).find(|&i| {
            let (x, y) = (polygon[i], polygon[(i + 1) % n]);
            (x, y) == (a, b) || (x, y) == (b, a)
        });
        if let Some(i) = hit {
            polygon.insert(i + 1, m);
        }
    }
}

/// Run simple matching on `soup`, handing back the complex buckets
pub(crate) fn simple_complex(mut soup: HalfEdgeSoup) -> (HalfEdgeSoup, VertexPairIndex) {
    let mut groups = FaceGroups::new(soup.face_count());
    let edges = VertexPairIndex::from_open_half_edges(&soup);
    let complex = match_simple_edges(&mut soup, &edges, &mut groups).complex;
    (soup, complex)
}
