// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Angular ordering of bundles around a shared edge, and greedy fusing of
//! forward/reverse neighbours

use super::bundles::Bundles;
use super::union_find::FaceGroups;
use crate::geometry::EPSILON;
use crate::mesh::{HalfEdgeId, HalfEdgeSoup};
use ahash::{AHashMap, AHashSet};
use nalgebra::Vector3;
use std::cmp::Ordering;
use std::f64::consts::TAU;

/// One half-edge of a bundle at one position along the run
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EdgeOrderData {
    pub edge: HalfEdgeId,
    /// Index into `Bundles::fwd` or `Bundles::rev`, depending on `is_reversed`
    pub bundle: usize,
    /// Face normal, negated for reverse half-edges
    pub face_dir: Vector3<f64>,
    pub is_reversed: bool,
    /// Face group when the ordering was built; not updated by later unions
    pub group: usize,
}

impl EdgeOrderData {
    fn new(
        soup: &HalfEdgeSoup,
        groups: &mut FaceGroups,
        edge: HalfEdgeId,
        bundle: usize,
        is_reversed: bool,
    ) -> Self {
        let face = soup.face_of(edge);
        let normal = soup.face(face).plane.normal;
        Self {
            edge,
            bundle,
            face_dir: if is_reversed { -normal } else { normal },
            is_reversed,
            group: groups.group_of(face),
        }
    }

    fn belongs_to(&self, fwd: usize, rev: usize) -> bool {
        self.bundle == if self.is_reversed { rev } else { fwd }
    }
}

/// Counter-clockwise angle about `axis` from `base` to `dir`, both projected
/// onto the plane normal to `axis`, in `[0, 2π)`
pub(crate) fn ccw_angle(base: &Vector3<f64>, dir: &Vector3<f64>, axis: &Vector3<f64>) -> f64 {
    let axis = axis.normalize();
    let b = base - axis * axis.dot(base);
    let d = dir - axis * axis.dot(dir);
    let angle = axis.dot(&b.cross(&d)).atan2(b.dot(&d));
    if angle.abs() < EPSILON {
        0.0
    } else if angle < 0.0 {
        angle + TAU
    } else {
        angle
    }
}

/// Per-position cyclic orderings of every bundle around the edge
pub(crate) fn order_bundles(
    soup: &HalfEdgeSoup,
    groups: &mut FaceGroups,
    bundles: &Bundles,
    avoid_cavities: bool,
) -> Vec<Vec<EdgeOrderData>> {
    (0..bundles.run_len())
        .map(|i| {
            let mut ordering: Vec<EdgeOrderData> = Vec::with_capacity(bundles.fwd.len() + bundles.rev.len());
            for (j, chain) in bundles.fwd.iter().enumerate() {
                ordering.push(EdgeOrderData::new(soup, groups, chain[i], j, false));
            }
            for (j, chain) in bundles.rev.iter().enumerate() {
                ordering.push(EdgeOrderData::new(soup, groups, chain[i], j, true));
            }

            let reference = bundles.fwd[0][i];
            let (v1, v2) = (soup.vertex(soup.v1(reference)), soup.vertex(soup.v2(reference)));
            let axis = if avoid_cavities { v1 - v2 } else { v2 - v1 };
            let base = ordering[0].face_dir;

            let mut keyed: Vec<(f64, EdgeOrderData)> = ordering
                .into_iter()
                .map(|eo| (ccw_angle(&base, &eo.face_dir, &axis), eo))
                .collect();
            keyed.sort_by(|(angle_a, a), (angle_b, b)| {
                angle_a
                    .total_cmp(angle_b)
                    .then_with(|| reversed_first(a, b))
                    .then_with(|| a.group.cmp(&b.group))
                    .then_with(|| a.bundle.cmp(&b.bundle))
            });
            keyed.into_iter().map(|(_, eo)| eo).collect()
        })
        .collect()
}

fn reversed_first(a: &EdgeOrderData, b: &EdgeOrderData) -> Ordering {
    b.is_reversed.cmp(&a.is_reversed)
}

/// Fuse forward/reverse bundles that sit next to each other in the
/// orderings, most frequent pairing first.
///
/// Returns the number of half-edge pairs formed.
pub(crate) fn match_ordered(
    soup: &mut HalfEdgeSoup,
    groups: &mut FaceGroups,
    orderings: &mut [Vec<EdgeOrderData>],
) -> usize {
    let mut paired = 0;

    loop {
        let mut votes: AHashMap<(usize, usize), usize> = AHashMap::new();
        for ordering in orderings.iter() {
            let n = ordering.len();
            for (j, current) in ordering.iter().enumerate() {
                let following = &ordering[(j + 1) % n];
                if !current.is_reversed && following.is_reversed {
                    *votes.entry((current.bundle, following.bundle)).or_insert(0) += 1;
                }
            }
        }
        if votes.is_empty() {
            break;
        }

        let mut ranked: Vec<((usize, usize), usize)> = votes.into_iter().collect();
        ranked.sort_by(|(pair_a, count_a), (pair_b, count_b)| count_b.cmp(count_a).then(pair_a.cmp(pair_b)));

        let mut used_fwd = AHashSet::new();
        let mut used_rev = AHashSet::new();
        for ((f, r), _) in ranked {
            if used_fwd.contains(&f) || used_rev.contains(&r) {
                continue;
            }
            for ordering in orderings.iter_mut() {
                let fwd = ordering.iter().find(|eo| !eo.is_reversed && eo.bundle == f);
                let rev = ordering.iter().find(|eo| eo.is_reversed && eo.bundle == r);
                if let (Some(a), Some(b)) = (fwd.map(|eo| eo.edge), rev.map(|eo| eo.edge)) {
                    soup.link(a, b);
                    groups.union(soup.face_of(a).0, soup.face_of(b).0);
                    paired += 1;
                }
                ordering.retain(|eo| !eo.belongs_to(f, r));
            }
            used_fwd.insert(f);
            used_rev.insert(r);
        }
    }

    paired
}
