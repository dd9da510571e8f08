// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Propagation of open face groups through the complex buckets

use super::edge_index::{reversed, VertexPairIndex};
use super::union_find::FaceGroups;
use crate::mesh::{FaceId, HalfEdgeSoup};
use std::collections::BTreeSet;
use tracing::trace;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenRegionStats {
    pub iterations: usize,
    pub paired: usize,
}

/// Strip open groups out of `complex` until nothing more resolves.
///
/// Buckets left with one half-edge pair with a singleton mate. Buckets left
/// empty open up whatever groups their mate still holds; an empty bucket
/// whose mate is already gone is dropped without further effect.
pub(crate) fn resolve_open_regions(
    soup: &mut HalfEdgeSoup,
    complex: &mut VertexPairIndex,
    groups: &mut FaceGroups,
    open_faces: &BTreeSet<FaceId>,
) -> OpenRegionStats {
    let mut stats = OpenRegionStats::default();
    let mut open: BTreeSet<usize> = open_faces.iter().map(|&f| groups.group_of(f)).collect();

    while !open.is_empty() && !complex.is_empty() {
        stats.iterations += 1;
        let before = (complex.len(), complex.half_edge_count());
        let pairs = complex.sorted_pairs();

        for pair in &pairs {
            if let Some(bucket) = complex.get_mut(pair) {
                bucket.retain(|&e| !open.contains(&groups.group_of(soup.face_of(e))));
            }
        }

        let mut exposed = BTreeSet::new();
        for &pair in &pairs {
            if !complex.contains(&pair) {
                continue;
            }
            let mate = reversed(pair);
            match (complex.get(&pair), complex.get(&mate)) {
                (Some([]), Some(mate_bucket)) => {
                    exposed.extend(mate_bucket.iter().map(|&e| soup.face_of(e)));
                    complex.remove(&pair);
                }
                (Some([]), None) => {
                    complex.remove(&pair);
                }
                (Some(&[a]), Some(&[b])) => {
                    soup.link(a, b);
                    groups.union(soup.face_of(a).0, soup.face_of(b).0);
                    stats.paired += 1;
                    complex.remove(&pair);
                    complex.remove(&mate);
                }
                _ => {}
            }
        }

        trace!(
            iteration = stats.iterations,
            buckets = complex.len(),
            exposed = exposed.len(),
            "Open-region pass"
        );

        if (complex.len(), complex.half_edge_count()) == before {
            break;
        }
        open = exposed.into_iter().map(|f| groups.group_of(f)).collect();
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{HalfEdgeId, VertexId};
    use nalgebra::Point3;

    /// Six triangles hanging off two edges (0,1) and (2,3)
    fn hanging_triangles() -> HalfEdgeSoup {
        HalfEdgeSoup::from_polygons(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 2.0, 0.0),
                Point3::new(1.0, 2.0, 0.0),
                Point3::new(0.5, -1.0, 0.0),
                Point3::new(0.5, 0.0, 1.0),
                Point3::new(0.5, 0.0, -1.0),
                Point3::new(0.5, 3.0, 0.0),
                Point3::new(0.5, 2.0, 1.0),
                Point3::new(0.5, 2.0, -1.0),
            ],
            &[
                vec![0, 1, 4], // F: open
                vec![0, 1, 5], // U
                vec![1, 0, 6], // V
                vec![2, 3, 7], // G: open
                vec![3, 2, 8], // W
                vec![3, 2, 9], // W2
            ],
        )
        .unwrap()
    }

    fn edge(soup: &HalfEdgeSoup, f: usize) -> HalfEdgeId {
        soup.face(FaceId(f)).edge
    }

    #[test]
    fn test_singletons_pair_and_empties_propagate() {
        let mut soup = hanging_triangles();
        let mut groups = FaceGroups::new(soup.face_count());
        let (v0, v1, v2, v3) = (VertexId(0), VertexId(1), VertexId(2), VertexId(3));

        let mut complex = VertexPairIndex::new();
        complex.insert_bucket((v0, v1), vec![edge(&soup, 0), edge(&soup, 1)]);
        complex.insert_bucket((v1, v0), vec![edge(&soup, 2)]);
        complex.insert_bucket((v2, v3), vec![edge(&soup, 3)]);
        complex.insert_bucket((v3, v2), vec![edge(&soup, 4), edge(&soup, 5)]);
        let open = BTreeSet::from([FaceId(0), FaceId(3)]);

        let stats = resolve_open_regions(&mut soup, &mut complex, &mut groups, &open);

        assert_eq!(stats, OpenRegionStats { iterations: 2, paired: 1 });
        assert!(complex.is_empty());
        assert_eq!(soup.rev(edge(&soup, 1)), Some(edge(&soup, 2)));
        assert!(groups.same(1, 2));
        // W and W2 were exposed and stripped; nothing paired them
        assert!(soup.rev(edge(&soup, 4)).is_none());
        assert!(soup.rev(edge(&soup, 5)).is_none());
        assert!(soup.rev(edge(&soup, 0)).is_none());
    }

    #[test]
    fn test_empty_bucket_with_missing_mate_is_skipped() {
        let mut soup = hanging_triangles();
        let mut groups = FaceGroups::new(soup.face_count());
        let (v0, v1) = (VertexId(0), VertexId(1));

        // Both directions empty out in the same pass; the second one finds
        // its mate already removed
        let mut complex = VertexPairIndex::new();
        complex.insert_bucket((v0, v1), vec![edge(&soup, 0)]);
        complex.insert_bucket((v1, v0), vec![edge(&soup, 2)]);
        let open = BTreeSet::from([FaceId(0), FaceId(2)]);

        let stats = resolve_open_regions(&mut soup, &mut complex, &mut groups, &open);

        assert_eq!(stats, OpenRegionStats { iterations: 1, paired: 0 });
        assert!(complex.is_empty());
        assert!(soup.rev(edge(&soup, 0)).is_none());
    }

    #[test]
    fn test_no_open_groups_leaves_buckets_alone() {
        let mut soup = hanging_triangles();
        let mut groups = FaceGroups::new(soup.face_count());
        let mut complex = VertexPairIndex::new();
        complex.insert_bucket((VertexId(0), VertexId(1)), vec![edge(&soup, 0), edge(&soup, 1)]);
        complex.insert_bucket((VertexId(1), VertexId(0)), vec![edge(&soup, 2)]);

        let stats = resolve_open_regions(&mut soup, &mut complex, &mut groups, &BTreeSet::new());
        assert_eq!(stats.iterations, 0);
        assert_eq!(complex.half_edge_count(), 3);
    }
}
