use crate::bounding_volume::{Aabb, BoundingSphere, BoundingVolume, Frustum};
use crate::math::{Isometry, Point, Real};
use crate::partitioning::Bvt;
use crate::query::{Ray, RayCast};
use crate::shape::HalfSpace;
use crate::utils::ScratchArena;
use alloc::vec::Vec;

impl Bvt {
    /// Collects the handles of every leaf whose box is hit by the given ray.
    pub fn cast_ray(
        &self,
        ray: &Ray,
        max_time_of_impact: Real,
        scratch: &ScratchArena,
        out: &mut Vec<u32>,
    ) {
        self.leaves_intersecting(
            |aabb| aabb.intersects_local_ray(ray, max_time_of_impact),
            scratch,
            out,
        )
    }

    /// Collects the handles of every leaf whose box intersects the given
    /// AABB.
    pub fn intersect_aabb(&self, aabb: &Aabb, scratch: &ScratchArena, out: &mut Vec<u32>) {
        self.leaves_intersecting(|node_aabb| node_aabb.intersects(aabb), scratch, out)
    }

    /// Collects the handles of every leaf whose box intersects the given
    /// sphere.
    pub fn intersect_sphere(
        &self,
        sphere: &BoundingSphere,
        scratch: &ScratchArena,
        out: &mut Vec<u32>,
    ) {
        self.leaves_intersecting(
            |aabb| aabb.distance_to_local_point(&sphere.center) <= sphere.radius,
            scratch,
            out,
        )
    }

    /// Collects the handles of every leaf whose box touches the negative
    /// side of the given halfspace's boundary plane.
    pub fn intersect_halfspace(
        &self,
        pos: &Isometry<Real>,
        halfspace: &HalfSpace,
        scratch: &ScratchArena,
        out: &mut Vec<u32>,
    ) {
        let normal = pos * halfspace.normal;
        let center = Point::from(pos.translation.vector);
        let plane_offset = normal.dot(&center.coords);

        self.leaves_intersecting(
            |aabb| -aabb.support_dot(&-*normal) <= plane_offset,
            scratch,
            out,
        )
    }

    /// Collects the handles of every leaf whose box may intersect the given
    /// frustum.
    pub fn intersect_frustum(&self, frustum: &Frustum, scratch: &ScratchArena, out: &mut Vec<u32>) {
        self.leaves_intersecting(|aabb| frustum.intersects_aabb(aabb), scratch, out)
    }

    /// Collects the handles of every leaf whose box passes the given volume
    /// test.
    ///
    /// The test must be conservative on internal boxes: if it rejects a box
    /// it must reject everything the box contains. Complexity is
    /// output-sensitive; broadly overlapping boxes degrade it toward a full
    /// scan.
    pub fn leaves_intersecting(
        &self,
        test: impl Fn(&Aabb) -> bool,
        scratch: &ScratchArena,
        out: &mut Vec<u32>,
    ) {
        let mut stack = scratch.index_buffers.acquire();
        stack.push(0);

        while let Some(i) = stack.pop() {
            let i = i as usize;
            let node = &self.nodes[i];

            if !test(&node.aabb) {
                continue;
            }

            if self.is_leaf(i) {
                out.push(node.data);
            } else {
                stack.push(2 * i as u32 + 1);
                stack.push(2 * i as u32 + 2);
            }
        }
    }

    /// Collects every pair of leaf handles `(a, b)`, with `a` from `self`
    /// and `b` from `other`, whose boxes overlap.
    ///
    /// The traversal descends both trees simultaneously: a pair of internal
    /// nodes expands to its four child pairs, a leaf paired with an internal
    /// node descends only the internal side, and a pair of leaves is emitted
    /// after a final box-overlap test.
    pub fn traverse_bvtt(
        &self,
        other: &Bvt,
        scratch: &ScratchArena,
        out: &mut Vec<(u32, u32)>,
    ) {
        let mut stack = scratch.pair_buffers.acquire();
        stack.push((0, 0));

        while let Some((i, j)) = stack.pop() {
            let (i, j) = (i as usize, j as usize);
            let node1 = &self.nodes[i];
            let node2 = &other.nodes[j];

            if !node1.aabb.intersects(&node2.aabb) {
                continue;
            }

            match (self.is_leaf(i), other.is_leaf(j)) {
                (true, true) => out.push((node1.data, node2.data)),
                (false, true) => {
                    stack.push((2 * i as u32 + 1, j as u32));
                    stack.push((2 * i as u32 + 2, j as u32));
                }
                (true, false) => {
                    stack.push((i as u32, 2 * j as u32 + 1));
                    stack.push((i as u32, 2 * j as u32 + 2));
                }
                (false, false) => {
                    stack.push((2 * i as u32 + 1, 2 * j as u32 + 1));
                    stack.push((2 * i as u32 + 1, 2 * j as u32 + 2));
                    stack.push((2 * i as u32 + 2, 2 * j as u32 + 1));
                    stack.push((2 * i as u32 + 2, 2 * j as u32 + 2));
                }
            }
        }
    }
}
