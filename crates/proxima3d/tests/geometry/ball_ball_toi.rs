use proxima3d::math::{Isometry, Vector};
use proxima3d::query::{self, ShapeCastOptions, ShapeCastStatus};
use proxima3d::shape::Ball;

#[test]
fn ball_ball_toi() {
    let b = Ball::new(0.5);
    let m1 = Isometry::identity();
    let m2 = Isometry::translation(0.0, 10.0, 0.0);
    let vel1 = Vector::new(0.0, 10.0, 0.0);
    let vel2 = Vector::zeros();

    let cast = query::cast_shapes(
        &m1,
        &vel1,
        &b,
        &m2,
        &vel2,
        &b,
        ShapeCastOptions::default(),
    )
    .unwrap();

    approx::assert_relative_eq!(cast.time_of_impact, 0.9, epsilon = 1.0e-4);
    assert_eq!(cast.status, ShapeCastStatus::Converged);
}

#[test]
fn receding_balls_never_hit() {
    let b = Ball::new(0.5);
    let m1 = Isometry::identity();
    let m2 = Isometry::translation(0.0, 10.0, 0.0);
    let vel1 = Vector::new(0.0, -10.0, 0.0);
    let vel2 = Vector::zeros();

    let cast = query::cast_shapes(
        &m1,
        &vel1,
        &b,
        &m2,
        &vel2,
        &b,
        ShapeCastOptions::default(),
    );
    assert!(cast.is_none());
}

#[test]
fn toi_beyond_the_limit_is_a_miss() {
    let b = Ball::new(0.5);
    let m1 = Isometry::identity();
    let m2 = Isometry::translation(0.0, 10.0, 0.0);
    let vel1 = Vector::new(0.0, 10.0, 0.0);
    let vel2 = Vector::zeros();

    let cast = query::cast_shapes(
        &m1,
        &vel1,
        &b,
        &m2,
        &vel2,
        &b,
        ShapeCastOptions::with_max_time_of_impact(0.5),
    );
    assert!(cast.is_none());
}
