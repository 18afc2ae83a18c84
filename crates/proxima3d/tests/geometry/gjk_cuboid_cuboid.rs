use approx::assert_relative_eq;
use proxima3d::math::{Isometry, Real, Vector};
use proxima3d::query;
use proxima3d::query::gjk::{self, CsoPoint, GjkResult, VoronoiSimplex};
use proxima3d::shape::Cuboid;

#[test]
fn separated_cuboids_report_their_distance() {
    // Two boxes of side 2, one centered at the origin and one at (3, 0, 0):
    // the gap between them is exactly 1.
    let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
    let pos1 = Isometry::identity();
    let pos2 = Isometry::translation(3.0, 0.0, 0.0);

    let contact = query::contact(&pos1, &cuboid, &pos2, &cuboid, Real::MAX).unwrap();

    assert_relative_eq!(contact.dist, 1.0, epsilon = 1.0e-4);
    assert_relative_eq!(contact.normal1.x, 1.0, epsilon = 1.0e-4);

    // The witness points live on the two facing faces...
    assert_relative_eq!(contact.point1.x, 1.0, epsilon = 1.0e-4);
    assert_relative_eq!(contact.point2.x, 2.0, epsilon = 1.0e-4);

    // ... and the segment between them realizes the distance, along the
    // separation axis.
    let segment = contact.point2 - contact.point1;
    assert_relative_eq!(segment.norm(), contact.dist, epsilon = 1.0e-4);
    assert_relative_eq!(segment.x, 1.0, epsilon = 1.0e-4);
    assert_relative_eq!(segment.y, 0.0, epsilon = 1.0e-4);
    assert_relative_eq!(segment.z, 0.0, epsilon = 1.0e-4);
}

#[test]
fn overlapping_cuboids_report_intersection() {
    let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
    let pos12 = Isometry::translation(1.0, 0.0, 0.0);

    let mut simplex = VoronoiSimplex::new();
    simplex.reset(CsoPoint::from_shapes(&pos12, &cuboid, &cuboid, &Vector::x()));

    let result = gjk::closest_points(&pos12, &cuboid, &cuboid, Real::MAX, &mut simplex);
    assert_eq!(result, GjkResult::Intersection);
}

#[test]
fn touching_cuboids_report_a_tiny_distance() {
    let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
    let pos1 = Isometry::identity();
    let pos2 = Isometry::translation(2.0 + 1.0e-3, 0.0, 0.0);

    let contact = query::contact(&pos1, &cuboid, &pos2, &cuboid, Real::MAX).unwrap();
    assert_relative_eq!(contact.dist, 1.0e-3, epsilon = 1.0e-4);
}
