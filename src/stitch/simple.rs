// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Pairing of unambiguous edges

use super::edge_index::{reversed, VertexPairIndex};
use super::union_find::FaceGroups;
use crate::mesh::{FaceId, HalfEdgeSoup};
use std::collections::BTreeSet;

/// What simple matching leaves behind
#[derive(Debug, Default)]
pub(crate) struct SimpleMatch {
    /// Buckets with more than one half-edge in either direction, both directions kept
    pub complex: VertexPairIndex,
    /// Faces owning at least one half-edge with no candidate reverse at all
    pub open_faces: BTreeSet<FaceId>,
    /// Pairs formed
    pub paired: usize,
}

/// Pair every directed edge that has exactly one half-edge each way.
///
/// Each pair is seen from both of its directions; it is only linked from
/// the direction whose half-edge has the smaller id.
pub(crate) fn match_simple_edges(
    soup: &mut HalfEdgeSoup,
    edges: &VertexPairIndex,
    groups: &mut FaceGroups,
) -> SimpleMatch {
    let mut result = SimpleMatch::default();

    for pair in edges.sorted_pairs() {
        let Some(bucket) = edges.get(&pair) else {
            continue;
        };
        match edges.get(&reversed(pair)) {
            None => {
                result
                    .open_faces
                    .extend(bucket.iter().map(|&e| soup.face_of(e)));
            }
            Some(mate) if bucket.len() != 1 || mate.len() != 1 => {
                result.complex.insert_bucket(pair, bucket.to_vec());
            }
            Some(mate) => {
                let (a, b) = (bucket[0], mate[0]);
                if a < b {
                    soup.link(a, b);
                    groups.union(soup.face_of(a).0, soup.face_of(b).0);
                    result.paired += 1;
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{HalfEdgeId, VertexId};
    use nalgebra::Point3;

    /// Two unit squares sharing the edge 1-2, wound so the shared edge runs
    /// opposite ways
    fn two_squares() -> HalfEdgeSoup {
        HalfEdgeSoup::from_polygons(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 1.0, 0.0),
            ],
            &[vec![0, 1, 2, 3], vec![1, 4, 5, 2]],
        )
        .unwrap()
    }

    #[test]
    fn test_shared_edge_pairs_and_rest_is_open() {
        let mut soup = two_squares();
        let mut groups = FaceGroups::new(soup.face_count());
        let edges = VertexPairIndex::from_open_half_edges(&soup);

        let result = match_simple_edges(&mut soup, &edges, &mut groups);
        assert_eq!(result.paired, 1);
        assert!(result.complex.is_empty());
        assert_eq!(
            result.open_faces.into_iter().collect::<Vec<_>>(),
            vec![FaceId(0), FaceId(1)]
        );

        // 1->2 in the first square, 2->1 in the second
        assert_eq!(soup.rev(HalfEdgeId(1)), Some(HalfEdgeId(7)));
        assert_eq!(soup.rev(HalfEdgeId(7)), Some(HalfEdgeId(1)));
        assert!(groups.same(0, 1));
        assert_eq!(soup.open_half_edges().len(), 6);
    }

    #[test]
    fn test_shared_direction_is_complex() {
        let mut soup = two_squares();
        // A third face running 1->2 again makes the edge ambiguous
        soup.add_face(&[1, 2, 3]).unwrap();
        let mut groups = FaceGroups::new(soup.face_count());
        let edges = VertexPairIndex::from_open_half_edges(&soup);

        let result = match_simple_edges(&mut soup, &edges, &mut groups);
        let forward = (VertexId(1), VertexId(2));
        assert_eq!(result.complex.bucket_len(&forward), 2);
        assert_eq!(result.complex.bucket_len(&reversed(forward)), 1);
        assert_eq!(result.complex.len(), 2);
        assert!(soup.rev(HalfEdgeId(1)).is_none());
    }
}
