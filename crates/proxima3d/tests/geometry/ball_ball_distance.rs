use approx::assert_relative_eq;
use proxima3d::math::{Isometry, Point, Real, Vector};
use proxima3d::query;
use proxima3d::shape::{Ball, SupportMap};

fn random_unit(rng: &mut oorandom::Rand32) -> Vector<Real> {
    loop {
        let v = Vector::new(
            rng.rand_float() as Real * 2.0 - 1.0,
            rng.rand_float() as Real * 2.0 - 1.0,
            rng.rand_float() as Real * 2.0 - 1.0,
        );
        let sq = v.norm_squared();
        if sq > 1.0e-4 && sq <= 1.0 {
            return v / sq.sqrt();
        }
    }
}

#[test]
fn sampled_disjoint_balls_agree_with_the_analytic_distance() {
    let mut rng = oorandom::Rand32::new(8);

    for _ in 0..200 {
        let r1 = rng.rand_float() as Real * 2.0 + 0.1;
        let r2 = rng.rand_float() as Real * 2.0 + 0.1;
        let gap = rng.rand_float() as Real * 3.0 + 0.05;

        let c1 = Point::from(random_unit(&mut rng) * (rng.rand_float() as Real * 5.0));
        let dir = random_unit(&mut rng);
        let c2 = c1 + dir * (r1 + r2 + gap);

        let ball1 = Ball::new(r1);
        let ball2 = Ball::new(r2);
        let pos1 = Isometry::translation(c1.x, c1.y, c1.z);
        let pos2 = Isometry::translation(c2.x, c2.y, c2.z);

        let contact = query::contact(&pos1, &ball1, &pos2, &ball2, Real::MAX).unwrap();

        // The reported distance is the analytic one.
        assert_relative_eq!(contact.dist, gap, epsilon = 1.0e-3);

        // The segment between the witness points realizes that distance.
        let segment = contact.point2 - contact.point1;
        assert_relative_eq!(segment.norm(), contact.dist, epsilon = 1.0e-3);

        // Neither shape pokes through the planes supporting the witness
        // points: the segment crosses no surface.
        let n = *contact.normal1;
        let s1_max = n.dot(&ball1.support_point(&pos1, &n).coords);
        let s2_min = n.dot(&ball2.support_point(&pos2, &-n).coords);
        assert!(s1_max <= n.dot(&contact.point1.coords) + 1.0e-3);
        assert!(s2_min >= n.dot(&contact.point2.coords) - 1.0e-3);
    }
}
