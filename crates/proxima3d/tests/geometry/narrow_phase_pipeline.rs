use approx::assert_relative_eq;
use proxima3d::bounding_volume::BoundingVolume;
use proxima3d::math::{Isometry, Real, Vector};
use proxima3d::na::Unit;
use proxima3d::partitioning::Bvt;
use proxima3d::query::{
    contact_manifold_primitive_primitive, ContactManifold, PenetrationEstimator, QueryError,
    TriangleTriangleState,
};
use proxima3d::shape::{Ball, Cuboid, Primitive, SupportMap, TriangleFlags};
use proxima3d::utils::ScratchArena;

const PREDICTION: Real = 0.1;

// A depth estimator resolving overlaps along the x axis, enough for the
// axis-aligned shapes of this scene.
struct AxisAlignedEstimator;

impl PenetrationEstimator for AxisAlignedEstimator {
    fn estimate_conservative_separation(
        &self,
        pos12: &Isometry<Real>,
        g1: &dyn SupportMap,
        g2: &dyn SupportMap,
    ) -> Option<(Real, Unit<Vector<Real>>)> {
        let n = Vector::x_axis();
        let s1_max = g1.local_support_point(&n).x;
        let s2_min = g2.support_point(pos12, &-*n).x;
        Some((s2_min - s1_max, n))
    }
}

#[test]
fn tree_gjk_manifold_pipeline() {
    // A small scene: two nearly-touching balls, and a ball resting on a
    // cuboid far away from them.
    let shapes = [
        Primitive::from(Ball::new(1.0)),
        Primitive::from(Ball::new(1.0)),
        Primitive::from(Cuboid::new(Vector::new(0.5, 0.5, 0.5))),
        Primitive::from(Ball::new(0.5)),
    ];
    let poses = [
        Isometry::identity(),
        Isometry::translation(2.05, 0.0, 0.0),
        Isometry::translation(10.0, 0.0, 0.0),
        Isometry::translation(10.0, 0.0, 1.02),
    ];

    // Broad phase: the tree prunes the candidate pairs.
    let aabbs: Vec<_> = shapes
        .iter()
        .zip(poses.iter())
        .map(|(shape, pose)| shape.aabb(pose).loosened(PREDICTION))
        .collect();

    let bvt = Bvt::from_leaves(&aabbs).unwrap();
    let scratch = ScratchArena::new();
    let mut candidates = Vec::new();
    bvt.traverse_bvtt(&bvt, &scratch, &mut candidates);

    let mut pairs: Vec<_> = candidates.into_iter().filter(|(a, b)| a < b).collect();
    pairs.sort_unstable();
    assert_eq!(pairs, vec![(0, 1), (2, 3)]);

    // Narrow phase: each candidate pair gets a manifold.
    let mut state = TriangleTriangleState::default();

    for (a, b) in pairs {
        let pos12 = poses[a as usize].inv_mul(&poses[b as usize]);
        let mut manifold = ContactManifold::<(), ()>::new();

        contact_manifold_primitive_primitive(
            &pos12,
            &shapes[a as usize],
            TriangleFlags::empty(),
            &shapes[b as usize],
            TriangleFlags::empty(),
            PREDICTION,
            &mut manifold,
            Some(&AxisAlignedEstimator),
            &mut state,
        )
        .unwrap();

        assert_eq!(manifold.points.len(), 1);

        match (a, b) {
            (0, 1) => assert_relative_eq!(manifold.points[0].dist, 0.05, epsilon = 1.0e-3),
            (2, 3) => assert_relative_eq!(manifold.points[0].dist, 0.02, epsilon = 1.0e-3),
            _ => unreachable!(),
        }
    }
}

#[test]
fn deep_overlap_consults_the_estimator() {
    let cuboid1 = Primitive::from(Cuboid::new(Vector::new(1.0, 1.0, 1.0)));
    let cuboid2 = Primitive::from(Cuboid::new(Vector::new(1.0, 1.0, 1.0)));
    let pos12 = Isometry::translation(1.5, 0.0, 0.0);

    let mut manifold = ContactManifold::<(), ()>::new();
    let mut state = TriangleTriangleState::default();

    contact_manifold_primitive_primitive(
        &pos12,
        &cuboid1,
        TriangleFlags::empty(),
        &cuboid2,
        TriangleFlags::empty(),
        PREDICTION,
        &mut manifold,
        Some(&AxisAlignedEstimator),
        &mut state,
    )
    .unwrap();

    assert_eq!(manifold.points.len(), 1);
    assert_relative_eq!(manifold.points[0].dist, -0.5, epsilon = 1.0e-3);
    assert_relative_eq!(manifold.local_n1.x, 1.0, epsilon = 1.0e-6);
}

#[test]
fn negative_prediction_fails_fast() {
    let ball = Primitive::from(Ball::new(1.0));
    let mut manifold = ContactManifold::<(), ()>::new();
    let mut state = TriangleTriangleState::default();

    let result = contact_manifold_primitive_primitive(
        &Isometry::identity(),
        &ball,
        TriangleFlags::empty(),
        &ball,
        TriangleFlags::empty(),
        -1.0,
        &mut manifold,
        None,
        &mut state,
    );

    assert_eq!(result, Err(QueryError::InvalidPrediction(-1.0)));
}
