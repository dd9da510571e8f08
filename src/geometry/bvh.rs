// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding Volume Hierarchy (BVH) over mesh faces
//! Used to find candidate faces for point containment and ray queries

use super::{BoundingBox, LineSegment};
use crate::mesh::{FaceId, HalfEdgeSoup};
use nalgebra::Point3;

/// Candidate-face queries consumed by the point classifier
pub trait SpatialIndex {
    /// Box enclosing every indexed face
    fn bounds(&self) -> BoundingBox;

    /// Faces whose box overlaps `bbox`
    fn faces_in_box(&self, bbox: &BoundingBox) -> Vec<FaceId>;

    /// Faces whose segment-box test passes for `segment`
    fn faces_along_segment(&self, segment: &LineSegment) -> Vec<FaceId>;

    /// Faces whose box contains `point`
    fn faces_near_point(&self, point: &Point3<f64>) -> Vec<FaceId> {
        self.faces_in_box(&BoundingBox::new(*point, *point))
    }
}

/// BVH node
#[derive(Debug, Clone)]
pub struct BVHNode {
    /// Bounding box of this node
    pub bbox: BoundingBox,
    /// Left child (None for leaf)
    pub left: Option<Box<BVHNode>>,
    /// Right child (None for leaf)
    pub right: Option<Box<BVHNode>>,
    /// Faces with their own boxes (only for leaf nodes)
    pub faces: Vec<(FaceId, BoundingBox)>,
}

impl BVHNode {
    fn leaf(bbox: BoundingBox, faces: Vec<(FaceId, BoundingBox)>) -> Self {
        Self {
            bbox,
            left: None,
            right: None,
            faces,
        }
    }

    fn internal(bbox: BoundingBox, left: Box<BVHNode>, right: Box<BVHNode>) -> Self {
        Self {
            bbox,
            left: Some(left),
            right: Some(right),
            faces: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Bounding Volume Hierarchy for polygon faces
#[derive(Debug, Clone)]
pub struct FaceBvh {
    root: BVHNode,
}

impl FaceBvh {
    const MAX_DEPTH: usize = 32;
    const MAX_LEAF_FACES: usize = 4;

    /// Build from `(face, bbox)` pairs
    pub fn build(faces: Vec<(FaceId, BoundingBox)>) -> Self {
        if faces.is_empty() {
            return Self {
                root: BVHNode::leaf(BoundingBox::empty(), Vec::new()),
            };
        }
        Self {
            root: Self::build_recursive(faces, 0),
        }
    }

    /// Index every face of a soup
    pub fn from_soup(soup: &HalfEdgeSoup) -> Self {
        Self::build(soup.face_ids().map(|f| (f, soup.face(f).bbox)).collect())
    }

    fn build_recursive(mut faces: Vec<(FaceId, BoundingBox)>, depth: usize) -> BVHNode {
        let bbox = Self::compute_union_bbox(&faces);

        if faces.len() <= Self::MAX_LEAF_FACES || depth >= Self::MAX_DEPTH {
            return BVHNode::leaf(bbox, faces);
        }

        // Split along the longest axis at the median center
        let size = bbox.size();
        let axis = if size.x >= size.y && size.x >= size.z {
            0
        } else if size.y >= size.z {
            1
        } else {
            2
        };
        faces.sort_by(|(_, a), (_, b)| a.center()[axis].total_cmp(&b.center()[axis]));

        let right_faces = faces.split_off(faces.len() / 2);
        let left = Box::new(Self::build_recursive(faces, depth + 1));
        let right = Box::new(Self::build_recursive(right_faces, depth + 1));
        BVHNode::internal(left.bbox.union(&right.bbox), left, right)
    }

    fn compute_union_bbox(faces: &[(FaceId, BoundingBox)]) -> BoundingBox {
        faces
            .iter()
            .fold(BoundingBox::empty(), |acc, (_, bbox)| acc.union(bbox))
    }

    fn query<F>(&self, hit: F) -> Vec<FaceId>
    where
        F: Fn(&BoundingBox) -> bool,
    {
        let mut result = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            if node.bbox.is_empty() || !hit(&node.bbox) {
                continue;
            }
            if node.is_leaf() {
                result.extend(
                    node.faces
                        .iter()
                        .filter(|(_, bbox)| hit(bbox))
                        .map(|&(face, _)| face),
                );
            } else {
                stack.extend(node.right.as_deref());
                stack.extend(node.left.as_deref());
            }
        }
        result
    }

    /// Get root node (for testing)
    #[cfg(test)]
    pub fn root(&self) -> &BVHNode {
        &self.root
    }
}

impl SpatialIndex for FaceBvh {
    fn bounds(&self) -> BoundingBox {
        self.root.bbox
    }

    fn faces_in_box(&self, bbox: &BoundingBox) -> Vec<FaceId> {
        self.query(|node| node.intersects(bbox))
    }

    fn faces_along_segment(&self, segment: &LineSegment) -> Vec<FaceId> {
        self.query(|node| node.intersects_segment(&segment.v1, &segment.v2))
    }
}
