use crate::bounding_volume::{Aabb, BoundingSphere, BoundingVolume};
use crate::math::{Point, Real, Vector};
use crate::partitioning::{Bvt, BvtError};
use crate::query::Ray;
use crate::utils::ScratchArena;
use alloc::vec::Vec;

fn random_aabb(rng: &mut oorandom::Rand32) -> Aabb {
    let mut coord = |scale: Real| rng.rand_float() as Real * scale;
    let center = Point::new(coord(20.0) - 10.0, coord(20.0) - 10.0, coord(20.0) - 10.0);
    let half_extents = Vector::new(
        coord(1.5) + 0.05,
        coord(1.5) + 0.05,
        coord(1.5) + 0.05,
    );
    Aabb::from_half_extents(center, half_extents)
}

fn random_leaves(seed: u64, len: usize) -> Vec<Aabb> {
    let mut rng = oorandom::Rand32::new(seed);
    (0..len).map(|_| random_aabb(&mut rng)).collect()
}

#[test]
fn build_from_zero_elements_fails() {
    assert_eq!(Bvt::from_leaves(&[]), Err(BvtError::EmptyElements));
}

#[test]
fn tree_is_complete_and_bounds_its_leaves() {
    for len in 1..=64 {
        let leaves = random_leaves(len as u64, len);
        let bvt = Bvt::from_leaves(&leaves).unwrap();

        assert_eq!(bvt.nodes().len(), 2 * len - 1);
        assert_eq!(bvt.leaf_count(), len);

        // Every internal box contains its children's boxes.
        for i in 0..bvt.nodes().len() {
            if !bvt.is_leaf(i) {
                assert!(bvt.nodes()[i].aabb.contains(&bvt.nodes()[2 * i + 1].aabb));
                assert!(bvt.nodes()[i].aabb.contains(&bvt.nodes()[2 * i + 2].aabb));
            }
        }

        // Every element box is the box of its leaf.
        for (handle, aabb) in leaves.iter().enumerate() {
            assert_eq!(bvt.leaf_aabb(handle as u32), *aabb);
        }
    }
}

#[test]
fn aabb_query_matches_brute_force() {
    let leaves = random_leaves(42, 100);
    let bvt = Bvt::from_leaves(&leaves).unwrap();
    let scratch = ScratchArena::new();
    let mut rng = oorandom::Rand32::new(1337);

    for _ in 0..100 {
        let test_aabb = random_aabb(&mut rng);

        let mut result = Vec::new();
        bvt.intersect_aabb(&test_aabb, &scratch, &mut result);
        result.sort_unstable();

        let expected: Vec<u32> = leaves
            .iter()
            .enumerate()
            .filter(|(_, leaf)| leaf.intersects(&test_aabb))
            .map(|(i, _)| i as u32)
            .collect();

        // No false negatives, and every returned leaf really overlaps.
        assert_eq!(result, expected);
    }
}

#[test]
fn sphere_query_matches_brute_force() {
    let leaves = random_leaves(7, 80);
    let bvt = Bvt::from_leaves(&leaves).unwrap();
    let scratch = ScratchArena::new();
    let mut rng = oorandom::Rand32::new(7331);

    for _ in 0..100 {
        let center = random_aabb(&mut rng).center();
        let sphere = BoundingSphere::new(center, rng.rand_float() as Real * 4.0 + 0.1);

        let mut result = Vec::new();
        bvt.intersect_sphere(&sphere, &scratch, &mut result);
        result.sort_unstable();

        let expected: Vec<u32> = leaves
            .iter()
            .enumerate()
            .filter(|(_, leaf)| leaf.distance_to_local_point(&sphere.center) <= sphere.radius)
            .map(|(i, _)| i as u32)
            .collect();

        assert_eq!(result, expected);
    }
}

#[test]
fn ray_query_has_no_false_negatives() {
    let leaves = random_leaves(99, 60);
    let bvt = Bvt::from_leaves(&leaves).unwrap();
    let scratch = ScratchArena::new();
    let mut rng = oorandom::Rand32::new(2024);

    for _ in 0..100 {
        let origin = random_aabb(&mut rng).center();
        let target = random_aabb(&mut rng).center();
        let ray = Ray::new(origin, target - origin);

        let mut result = Vec::new();
        bvt.cast_ray(&ray, 1000.0, &scratch, &mut result);

        for (i, leaf) in leaves.iter().enumerate() {
            if crate::query::RayCast::intersects_local_ray(leaf, &ray, 1000.0) {
                assert!(
                    result.contains(&(i as u32)),
                    "leaf {} hit by the ray but missing from the query result",
                    i
                );
            }
        }
    }
}

#[test]
fn refit_only_changes_the_ancestors_of_a_moved_leaf() {
    let leaves = random_leaves(5, 33);
    let mut bvt = Bvt::from_leaves(&leaves).unwrap();

    let moved: u32 = 17;
    let moved_node = bvt.leaf_nodes[moved as usize] as usize;

    // The ancestor chain of the moved leaf.
    let mut ancestors = Vec::new();
    let mut curr = moved_node;
    while curr != 0 {
        curr = (curr - 1) / 2;
        ancestors.push(curr);
    }

    let before = bvt.nodes().to_vec();

    let new_aabb = Aabb::from_half_extents(
        Point::new(40.0, 40.0, 40.0),
        Vector::new(1.0, 1.0, 1.0),
    );
    bvt.update_leaf(moved, new_aabb);
    bvt.refit();

    for i in 0..bvt.nodes().len() {
        if i == moved_node {
            assert_eq!(bvt.nodes()[i].aabb, new_aabb);
        } else if ancestors.contains(&i) {
            // The moved leaf went far away: every ancestor must have grown.
            assert!(bvt.nodes()[i].aabb.contains(&new_aabb));
        } else {
            assert_eq!(
                bvt.nodes()[i], before[i],
                "node {} changed but is not an ancestor of the moved leaf",
                i
            );
        }
    }
}

#[test]
fn tree_vs_tree_matches_brute_force() {
    let leaves1 = random_leaves(11, 40);
    let leaves2 = random_leaves(22, 55);
    let bvt1 = Bvt::from_leaves(&leaves1).unwrap();
    let bvt2 = Bvt::from_leaves(&leaves2).unwrap();
    let scratch = ScratchArena::new();

    let mut pairs = Vec::new();
    bvt1.traverse_bvtt(&bvt2, &scratch, &mut pairs);
    pairs.sort_unstable();

    let mut expected = Vec::new();
    for (i, leaf1) in leaves1.iter().enumerate() {
        for (j, leaf2) in leaves2.iter().enumerate() {
            if leaf1.intersects(leaf2) {
                expected.push((i as u32, j as u32));
            }
        }
    }

    assert_eq!(pairs, expected);
}

#[test]
fn single_leaf_tree() {
    let aabb = Aabb::from_half_extents(Point::origin(), Vector::new(1.0, 1.0, 1.0));
    let bvt = Bvt::from_leaves(&[aabb]).unwrap();
    let scratch = ScratchArena::new();

    assert_eq!(bvt.leaf_count(), 1);
    assert_eq!(bvt.root_aabb(), aabb);

    let mut result = Vec::new();
    bvt.intersect_aabb(&aabb, &scratch, &mut result);
    assert_eq!(result, alloc::vec![0]);
}

#[test]
fn halfspace_query_matches_brute_force() {
    use crate::math::Isometry;
    use crate::shape::HalfSpace;
    use na::Unit;

    let leaves = random_leaves(3, 50);
    let bvt = Bvt::from_leaves(&leaves).unwrap();
    let scratch = ScratchArena::new();

    let normal = Unit::new_normalize(Vector::new(1.0, 0.5, -0.25));
    let halfspace = HalfSpace::new(normal);
    let pos = Isometry::translation(1.0, -2.0, 0.5);

    let mut result = Vec::new();
    bvt.intersect_halfspace(&pos, &halfspace, &scratch, &mut result);
    result.sort_unstable();

    let plane_offset = normal.dot(&(pos.translation.vector));
    let expected: Vec<u32> = leaves
        .iter()
        .enumerate()
        .filter(|(_, leaf)| -leaf.support_dot(&-*normal) <= plane_offset)
        .map(|(i, _)| i as u32)
        .collect();

    assert_eq!(result, expected);
}

#[test]
fn frustum_query_has_no_false_negatives() {
    use crate::bounding_volume::Frustum;
    use na::Unit;

    let leaves = random_leaves(13, 70);
    let bvt = Bvt::from_leaves(&leaves).unwrap();
    let scratch = ScratchArena::new();

    // An axis-aligned box frustum: |x| <= 4, |y| <= 4, |z| <= 4.
    let frustum = Frustum::from_planes([
        (Unit::new_normalize(Vector::x()), -4.0),
        (Unit::new_normalize(-Vector::x()), -4.0),
        (Unit::new_normalize(Vector::y()), -4.0),
        (Unit::new_normalize(-Vector::y()), -4.0),
        (Unit::new_normalize(Vector::z()), -4.0),
        (Unit::new_normalize(-Vector::z()), -4.0),
    ]);

    let mut result = Vec::new();
    bvt.intersect_frustum(&frustum, &scratch, &mut result);

    let volume = Aabb::from_half_extents(Point::origin(), Vector::new(4.0, 4.0, 4.0));
    for (i, leaf) in leaves.iter().enumerate() {
        if leaf.intersects(&volume) {
            assert!(
                result.contains(&(i as u32)),
                "leaf {} intersects the frustum volume but was not returned",
                i
            );
        }
    }

    // Returned leaves at least touch the frustum's bounding box.
    for handle in &result {
        assert!(leaves[*handle as usize].intersects(&volume));
    }
}
