use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Point, Real, DIM};
use alloc::vec::Vec;
use thiserror::Error;

/// Error raised when building a [`Bvt`] from invalid inputs.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BvtError {
    /// A tree cannot be built out of zero elements: there is nothing to
    /// bound.
    #[error("cannot build a bounding-volume tree out of zero elements")]
    EmptyElements,
}

/// One node of a [`Bvt`].
///
/// Leaves carry the opaque element handle they were built from; internal
/// nodes only carry their bounding box, their children being located by
/// index arithmetic.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BvtNode {
    /// The AABB bounding every leaf of the subtree rooted at this node.
    pub aabb: Aabb,
    /// For a leaf, the handle of the bounded element. Unused on internal
    /// nodes.
    pub data: u32,
}

/// A balanced bounding-volume tree over a fixed set of elements.
///
/// The tree is a complete binary tree stored as a flat array in heap order:
/// the children of the internal node `i` are the nodes `2 * i + 1` and
/// `2 * i + 2`, and for `n` leaves the array holds exactly `2 * n - 1` nodes
/// (the populated prefix of the next power-of-two-capacity layout). Leaves
/// are associated to opaque `u32` element handles equal to the element's
/// index in the build-time input.
///
/// Topology is fixed at build time. When elements move, update their leaf
/// boxes with [`Bvt::update_leaf`] and call [`Bvt::refit`] once before
/// issuing queries; membership changes require a rebuild. Refitting must not
/// run concurrently with queries on the same tree, which the `&mut self`
/// receiver enforces.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Bvt {
    pub(super) nodes: Vec<BvtNode>,
    // Node index of each leaf, indexed by element handle.
    pub(super) leaf_nodes: Vec<u32>,
}

impl Bvt {
    /// Builds a tree bounding the given set of elements.
    ///
    /// The `i`-th AABB is associated to the element handle `i`. Fails if
    /// `leaves` is empty.
    pub fn from_leaves(leaves: &[Aabb]) -> Result<Self, BvtError> {
        if leaves.is_empty() {
            return Err(BvtError::EmptyElements);
        }

        let n = leaves.len();
        let mut elements: Vec<(u32, Aabb, Point<Real>)> = leaves
            .iter()
            .enumerate()
            .map(|(i, aabb)| (i as u32, *aabb, aabb.center()))
            .collect();

        let mut result = Bvt {
            nodes: alloc::vec![
                BvtNode {
                    aabb: Aabb::new_invalid(),
                    data: 0,
                };
                2 * n - 1
            ],
            leaf_nodes: alloc::vec![0; n],
        };

        result.fill_node(0, &mut elements);
        Ok(result)
    }

    /// The number of leaves of this tree.
    #[inline]
    pub fn leaf_count(&self) -> usize {
        (self.nodes.len() + 1) / 2
    }

    /// The nodes of this tree, in heap order.
    #[inline]
    pub fn nodes(&self) -> &[BvtNode] {
        &self.nodes
    }

    /// Is the node `i` a leaf?
    #[inline]
    pub fn is_leaf(&self, i: usize) -> bool {
        2 * i + 1 >= self.nodes.len()
    }

    /// The AABB bounding all the elements of this tree.
    #[inline]
    pub fn root_aabb(&self) -> Aabb {
        self.nodes[0].aabb
    }

    /// The current AABB of the leaf associated to the element handle `leaf`.
    #[inline]
    pub fn leaf_aabb(&self, leaf: u32) -> Aabb {
        self.nodes[self.leaf_nodes[leaf as usize] as usize].aabb
    }

    /// Rewrites the box of one leaf, leaving the tree topology untouched.
    ///
    /// The ancestors' boxes become stale until the next call to
    /// [`Bvt::refit`].
    #[inline]
    pub fn update_leaf(&mut self, leaf: u32, aabb: Aabb) {
        let node = self.leaf_nodes[leaf as usize] as usize;
        self.nodes[node].aabb = aabb;
    }

    /// Recomputes every internal box, bottom-up, as the union of its
    /// children.
    ///
    /// This is `O(n)` and does not resize or re-sort anything: only the
    /// ancestor chains of moved leaves end up with different boxes.
    pub fn refit(&mut self) {
        let first_leaf = self.nodes.len() / 2;

        for i in (0..first_leaf).rev() {
            let left = self.nodes[2 * i + 1].aabb;
            let right = self.nodes[2 * i + 2].aabb;
            self.nodes[i].aabb = left.merged(&right);
        }
    }

    // Number of leaves the left subtree takes when a complete binary tree
    // is built over `n` leaves.
    fn num_left_leaves(n: usize) -> usize {
        let cap = n.next_power_of_two();
        let half = cap / 2;
        half.min(n - half / 2)
    }

    // Builds the subtree rooted at node `i` over the given elements,
    // recursively partitioning them along the axis their centers are most
    // spread along.
    fn fill_node(&mut self, i: usize, elements: &mut [(u32, Aabb, Point<Real>)]) {
        if elements.len() == 1 {
            self.nodes[i] = BvtNode {
                aabb: elements[0].1,
                data: elements[0].0,
            };
            self.leaf_nodes[elements[0].0 as usize] = i as u32;
            return;
        }

        // Bounds of the element centers.
        let mut center_aabb = Aabb::new_invalid();
        for (_, _, center) in elements.iter() {
            center_aabb.take_point(*center);
        }

        // Split along the longest extent.
        let extents = center_aabb.extents();
        let mut axis = 0;
        for d in 1..DIM {
            if extents[d] > extents[axis] {
                axis = d;
            }
        }

        // The comparator tolerates small coordinate differences so that
        // float noise between steps cannot flip the ordering of elements
        // that are essentially at the same position along the split axis.
        let threshold = extents[axis] * 1.0e-6;
        elements.sort_by(|a, b| {
            let ca = a.2[axis];
            let cb = b.2[axis];
            if (ca - cb).abs() <= threshold {
                std::cmp::Ordering::Equal
            } else {
                ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
            }
        });

        let nleft = Self::num_left_leaves(elements.len());
        let (left, right) = elements.split_at_mut(nleft);

        self.fill_node(2 * i + 1, left);
        self.fill_node(2 * i + 2, right);

        self.nodes[i].aabb = self.nodes[2 * i + 1]
            .aabb
            .merged(&self.nodes[2 * i + 2].aabb);
    }
}
