// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Disjoint-set forest over face ids

use crate::mesh::FaceId;

/// Face groups: faces joined transitively through paired half-edges
#[derive(Debug, Clone)]
pub struct FaceGroups {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl FaceGroups {
    /// Every face starts as its own root
    pub fn new(count: usize) -> Self {
        Self {
            parent: (0..count).collect(),
            size: vec![1; count],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Root of `x`, halving the path on the way up
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }

    pub fn group_of(&mut self, face: FaceId) -> usize {
        self.find(face.0)
    }

    /// Merge the sets of `a` and `b`, returning the surviving root
    pub fn union(&mut self, a: usize, b: usize) -> usize {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return ra;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        ra
    }

    pub fn same(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Renumber the sets densely, in order of their first member.
    ///
    /// Returns the dense set index of every element and the size of every set.
    pub fn collapse(&mut self) -> (Vec<usize>, Vec<usize>) {
        let mut dense = vec![usize::MAX; self.parent.len()];
        let mut index = Vec::with_capacity(self.parent.len());
        let mut sizes = Vec::new();
        for x in 0..self.parent.len() {
            let root = self.find(x);
            if dense[root] == usize::MAX {
                dense[root] = sizes.len();
                sizes.push(0);
            }
            index.push(dense[root]);
            sizes[dense[root]] += 1;
        }
        (index, sizes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_and_find() {
        let mut groups = FaceGroups::new(6);
        assert_eq!(groups.len(), 6);
        assert!(!groups.same(0, 1));

        groups.union(0, 1);
        groups.union(2, 3);
        groups.union(1, 3);
        assert!(groups.same(0, 2));
        assert!(!groups.same(0, 4));
        assert_eq!(groups.group_of(FaceId(3)), groups.find(0));

        // Joining members of one set is a no-op
        let root = groups.find(0);
        assert_eq!(groups.union(3, 0), root);
    }

    #[test]
    fn test_collapse_numbers_by_first_member() {
        let mut groups = FaceGroups::new(5);
        groups.union(4, 1);
        groups.union(3, 0);
        let (index, sizes) = groups.collapse();
        assert_eq!(index, vec![0, 1, 2, 0, 1]);
        assert_eq!(sizes, vec![2, 2, 1]);
    }
}
