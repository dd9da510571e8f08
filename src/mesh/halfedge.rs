// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Half-edge soup: polygon faces that only know their own boundary loops.
//!
//! Records live in flat arenas and refer to each other by index. Faces are
//! immutable once added; the only mutable topology is the `rev` link of a
//! half-edge, which stitching fills in exactly once.

use crate::error::{Error, Result};
use crate::geometry::{
    point_in_polygon, BoundingBox, IntersectionClass, LineSegment, Plane, PlaneCrossing,
    PolygonPoint, Projection, EPSILON,
};
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// Index of a vertex slot; vertex identity is the slot, not the position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub usize);

/// Index of a half-edge slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HalfEdgeId(pub usize);

/// Index of a face slot, also its union-find key during stitching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FaceId(pub usize);

/// One directed traversal of a polygon edge
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge {
    /// Tail vertex
    pub vert: VertexId,
    /// Face whose loop owns this half-edge
    pub face: FaceId,
    /// Next half-edge in the same face loop
    pub next: HalfEdgeId,
    /// Previous half-edge in the same face loop
    pub prev: HalfEdgeId,
    /// Opposite half-edge in a neighbouring face, `None` while open
    pub rev: Option<HalfEdgeId>,
}

/// Planar polygon face
#[derive(Debug, Clone)]
pub struct Face {
    /// First half-edge of the loop
    pub edge: HalfEdgeId,
    /// Number of half-edges in the loop
    pub len: usize,
    pub plane: Plane,
    pub projection: Projection,
    pub bbox: BoundingBox,
}

/// Arena of vertices, half-edges and faces
#[derive(Debug, Clone, Default)]
pub struct HalfEdgeSoup {
    vertices: Vec<Point3<f64>>,
    half_edges: Vec<HalfEdge>,
    faces: Vec<Face>,
}

impl HalfEdgeSoup {
    /// Create a soup over the given vertex positions, with no faces yet
    pub fn new(vertices: Vec<Point3<f64>>) -> Self {
        Self {
            vertices,
            half_edges: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Build a soup from indexed polygon loops
    pub fn from_polygons(vertices: Vec<Point3<f64>>, polygons: &[Vec<usize>]) -> Result<Self> {
        let mut soup = Self::new(vertices);
        soup.half_edges.reserve(polygons.iter().map(Vec::len).sum());
        soup.faces.reserve(polygons.len());
        for polygon in polygons {
            soup.add_face(polygon)?;
        }
        Ok(soup)
    }

    /// Append a face whose loop visits `corners` in order
    pub fn add_face(&mut self, corners: &[usize]) -> Result<FaceId> {
        let face = FaceId(self.faces.len());
        let n = corners.len();
        if n < 3 {
            return Err(Error::TooFewCorners {
                face: face.0,
                corners: n,
            });
        }
        for (i, &v) in corners.iter().enumerate() {
            if v >= self.vertices.len() {
                return Err(Error::VertexOutOfRange {
                    face: face.0,
                    vertex: v,
                    vertex_count: self.vertices.len(),
                });
            }
            if corners[(i + 1) % n] == v {
                return Err(Error::RepeatedVertex {
                    face: face.0,
                    vertex: v,
                });
            }
        }

        let points: Vec<Point3<f64>> = corners.iter().map(|&v| self.vertices[v]).collect();
        let plane = Plane::fit(&points).ok_or(Error::ZeroAreaFace { face: face.0 })?;

        let base = self.half_edges.len();
        for (i, &v) in corners.iter().enumerate() {
            self.half_edges.push(HalfEdge {
                vert: VertexId(v),
                face,
                next: HalfEdgeId(base + (i + 1) % n),
                prev: HalfEdgeId(base + (i + n - 1) % n),
                rev: None,
            });
        }

        self.faces.push(Face {
            edge: HalfEdgeId(base),
            len: n,
            plane,
            projection: Projection::for_normal(&plane.normal),
            bbox: BoundingBox::from_points(&points),
        });
        Ok(face)
    }

    pub fn vertex(&self, v: VertexId) -> &Point3<f64> {
        &self.vertices[v.0]
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn half_edge(&self, e: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[e.0]
    }

    pub fn face(&self, f: FaceId) -> &Face {
        &self.faces[f.0]
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> {
        (0..self.faces.len()).map(FaceId)
    }

    pub fn half_edge_ids(&self) -> impl Iterator<Item = HalfEdgeId> {
        (0..self.half_edges.len()).map(HalfEdgeId)
    }

    /// Tail vertex of `e`
    pub fn v1(&self, e: HalfEdgeId) -> VertexId {
        self.half_edges[e.0].vert
    }

    /// Head vertex of `e`
    pub fn v2(&self, e: HalfEdgeId) -> VertexId {
        let next = self.half_edges[e.0].next;
        self.half_edges[next.0].vert
    }

    pub fn rev(&self, e: HalfEdgeId) -> Option<HalfEdgeId> {
        self.half_edges[e.0].rev
    }

    pub fn face_of(&self, e: HalfEdgeId) -> FaceId {
        self.half_edges[e.0].face
    }

    /// Half-edges of a face loop, starting at its first edge
    pub fn face_edges(&self, f: FaceId) -> FaceLoop<'_> {
        let face = &self.faces[f.0];
        FaceLoop {
            soup: self,
            current: face.edge,
            remaining: face.len,
        }
    }

    pub fn face_vertices(&self, f: FaceId) -> Vec<VertexId> {
        self.face_edges(f).map(|e| self.v1(e)).collect()
    }

    pub fn face_points(&self, f: FaceId) -> Vec<Point3<f64>> {
        self.face_edges(f).map(|e| *self.vertex(self.v1(e))).collect()
    }

    /// Face loop projected into the face's 2D frame
    pub fn projected_face(&self, f: FaceId) -> Vec<Point2<f64>> {
        let projection = self.faces[f.0].projection;
        self.face_edges(f)
            .map(|e| projection.project(self.vertex(self.v1(e))))
            .collect()
    }

    /// Half-edges with no reverse
    pub fn open_half_edges(&self) -> Vec<HalfEdgeId> {
        self.half_edge_ids()
            .filter(|&e| self.rev(e).is_none())
            .collect()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.faces
            .iter()
            .fold(BoundingBox::empty(), |acc, face| acc.union(&face.bbox))
    }

    /// Make `a` and `b` mutual reverses.
    ///
    /// Panics if they do not run between the same vertices in opposite
    /// directions, or if either one is already paired.
    pub(crate) fn link(&mut self, a: HalfEdgeId, b: HalfEdgeId) {
        assert!(
            self.v1(a) == self.v2(b) && self.v2(a) == self.v1(b),
            "half-edges {:?} and {:?} are not reverses of each other",
            a,
            b
        );
        assert!(
            self.rev(a).is_none() && self.rev(b).is_none(),
            "half-edge pairing is permanent: {:?} or {:?} is already paired",
            a,
            b
        );
        self.half_edges[a.0].rev = Some(b);
        self.half_edges[b.0].rev = Some(a);
    }

    /// Next open half-edge leaving the head of `e`, skipping across
    /// already-paired edges around that vertex.
    ///
    /// `None` when `e` itself is paired or no open edge is reachable.
    pub fn perim_next(&self, e: HalfEdgeId) -> Option<HalfEdgeId> {
        if self.rev(e).is_some() {
            return None;
        }
        let mut current = self.half_edges[e.0].next;
        for _ in 0..self.half_edges.len() {
            match self.half_edges[current.0].rev {
                None => return Some(current),
                Some(rev) => current = self.half_edges[rev.0].next,
            }
        }
        None
    }

    /// Previous open half-edge entering the tail of `e`; mirror of
    /// [`perim_next`](Self::perim_next).
    pub fn perim_prev(&self, e: HalfEdgeId) -> Option<HalfEdgeId> {
        if self.rev(e).is_some() {
            return None;
        }
        let mut current = self.half_edges[e.0].prev;
        for _ in 0..self.half_edges.len() {
            match self.half_edges[current.0].rev {
                None => return Some(current),
                Some(rev) => current = self.half_edges[rev.0].prev,
            }
        }
        None
    }

    /// True when `p` lies on the face's plane and inside or on its boundary
    pub fn face_contains_point(&self, f: FaceId, p: &Point3<f64>) -> bool {
        let face = &self.faces[f.0];
        if face.plane.signed_distance(p).abs() >= EPSILON {
            return false;
        }
        !point_in_polygon(&self.projected_face(f), &face.projection.project(p)).is_outside()
    }

    /// Classify how `segment` meets face `f`, with the contact point when
    /// there is one
    pub fn face_segment_intersection(
        &self,
        f: FaceId,
        segment: &LineSegment,
    ) -> (IntersectionClass, Option<Point3<f64>>) {
        if !segment.is_ok() {
            return (IntersectionClass::None, None);
        }
        let face = &self.faces[f.0];
        let point = match segment.intersect_plane(&face.plane) {
            PlaneCrossing::None => return (IntersectionClass::None, None),
            PlaneCrossing::Coplanar => return (IntersectionClass::Degenerate, None),
            PlaneCrossing::Point(p) => p,
        };
        let class = match point_in_polygon(&self.projected_face(f), &face.projection.project(&point)) {
            PolygonPoint::Outside => return (IntersectionClass::None, None),
            PolygonPoint::Inside => IntersectionClass::Face,
            PolygonPoint::OnVertex(_) => IntersectionClass::Vertex,
            PolygonPoint::OnEdge(_) => IntersectionClass::Edge,
        };
        (class, Some(point))
    }
}

/// Iterator over the half-edges of one face loop
pub struct FaceLoop<'a> {
    soup: &'a HalfEdgeSoup,
    current: HalfEdgeId,
    remaining: usize,
}

impl Iterator for FaceLoop<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<HalfEdgeId> {
        if self.remaining == 0 {
            return None;
        }
        let edge = self.current;
        self.current = self.soup.half_edges[edge.0].next;
        self.remaining -= 1;
        Some(edge)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for FaceLoop<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn unit_square_soup() -> HalfEdgeSoup {
        HalfEdgeSoup::from_polygons(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            &[vec![0, 1, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn test_face_loop_links() {
        let soup = unit_square_soup();
        let f = FaceId(0);
        let edges: Vec<_> = soup.face_edges(f).collect();
        assert_eq!(edges.len(), 4);
        for (i, &e) in edges.iter().enumerate() {
            let next = edges[(i + 1) % 4];
            assert_eq!(soup.half_edge(e).next, next);
            assert_eq!(soup.half_edge(next).prev, e);
            assert_eq!(soup.v2(e), soup.v1(next));
            assert_eq!(soup.face_of(e), f);
        }
        assert_eq!(
            soup.face_vertices(f),
            vec![VertexId(0), VertexId(1), VertexId(2), VertexId(3)]
        );
        assert!((soup.face(f).plane.normal - Vector3::z()).norm() < 1e-12);
        assert_eq!(soup.open_half_edges().len(), 4);
    }

    #[test]
    fn test_add_face_rejects_bad_input() {
        let mut soup = unit_square_soup();
        assert!(matches!(
            soup.add_face(&[0, 1]),
            Err(Error::TooFewCorners { corners: 2, .. })
        ));
        assert!(matches!(
            soup.add_face(&[0, 1, 9]),
            Err(Error::VertexOutOfRange { vertex: 9, .. })
        ));
        assert!(matches!(
            soup.add_face(&[0, 1, 1, 2]),
            Err(Error::RepeatedVertex { vertex: 1, .. })
        ));

        let mut line = HalfEdgeSoup::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ]);
        assert!(matches!(
            line.add_face(&[0, 1, 2]),
            Err(Error::ZeroAreaFace { face: 0 })
        ));
        // Failed insertions leave no half-edges behind
        assert_eq!(line.half_edge_count(), 0);
    }

    #[test]
    fn test_perim_next_skips_paired_edges() {
        // Two triangles sharing the diagonal 0-2 of a square
        let mut soup = HalfEdgeSoup::from_polygons(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            &[vec![0, 1, 2], vec![0, 2, 3]],
        )
        .unwrap();
        // 0->1, 1->2, 2->0 | 0->2, 2->3, 3->0
        soup.link(HalfEdgeId(2), HalfEdgeId(3));

        // After 1->2 the loop continues with 2->3 in the other triangle
        assert_eq!(soup.perim_next(HalfEdgeId(1)), Some(HalfEdgeId(4)));
        // Before 0->1 comes 3->0
        assert_eq!(soup.perim_prev(HalfEdgeId(0)), Some(HalfEdgeId(5)));
        // Paired edges have no perimeter neighbours
        assert_eq!(soup.perim_next(HalfEdgeId(2)), None);
    }

    #[test]
    #[should_panic(expected = "not reverses")]
    fn test_link_rejects_non_reverse_pair() {
        let mut soup = unit_square_soup();
        soup.link(HalfEdgeId(0), HalfEdgeId(1));
    }

    #[test]
    fn test_face_point_and_segment_queries() {
        let soup = unit_square_soup();
        let f = FaceId(0);
        assert!(soup.face_contains_point(f, &Point3::new(0.5, 0.5, 0.0)));
        assert!(soup.face_contains_point(f, &Point3::new(1.0, 1.0, 0.0)));
        assert!(!soup.face_contains_point(f, &Point3::new(0.5, 0.5, 0.1)));
        assert!(!soup.face_contains_point(f, &Point3::new(1.5, 0.5, 0.0)));

        let through = LineSegment::new(Point3::new(0.25, 0.5, -1.0), Point3::new(0.25, 0.5, 1.0));
        let (class, point) = soup.face_segment_intersection(f, &through);
        assert_eq!(class, IntersectionClass::Face);
        assert!((point.unwrap() - Point3::new(0.25, 0.5, 0.0)).norm() < 1e-12);

        let on_edge = LineSegment::new(Point3::new(0.5, 0.0, -1.0), Point3::new(0.5, 0.0, 1.0));
        assert_eq!(soup.face_segment_intersection(f, &on_edge).0, IntersectionClass::Edge);

        let on_vertex = LineSegment::new(Point3::new(0.0, 0.0, -1.0), Point3::new(0.0, 0.0, 1.0));
        assert_eq!(soup.face_segment_intersection(f, &on_vertex).0, IntersectionClass::Vertex);

        let coplanar = LineSegment::new(Point3::new(-1.0, 0.5, 0.0), Point3::new(2.0, 0.5, 0.0));
        assert_eq!(soup.face_segment_intersection(f, &coplanar).0, IntersectionClass::Degenerate);

        let miss = LineSegment::new(Point3::new(3.0, 0.5, -1.0), Point3::new(3.0, 0.5, 1.0));
        assert_eq!(soup.face_segment_intersection(f, &miss), (IntersectionClass::None, None));
    }
}
