use approx::assert_relative_eq;
use proxima3d::math::{Point, Vector};
use proxima3d::query::{Ray, RayCast};
use proxima3d::shape::{Ball, Cuboid};

#[test]
fn ray_hits_the_facing_side_of_a_cuboid() {
    let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
    let ray = Ray::new(Point::new(-5.0, 0.5, 0.25), Vector::x());

    let inter = cuboid
        .cast_local_ray_and_get_normal(&ray, 100.0, true)
        .unwrap();

    assert_relative_eq!(inter.time_of_impact, 4.0, epsilon = 1.0e-3);
    assert!(inter.normal.x < -0.99);
}

#[test]
fn ray_starting_inside_a_solid_cuboid_hits_immediately() {
    let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
    let ray = Ray::new(Point::origin(), Vector::x());

    let toi = cuboid.cast_local_ray(&ray, 100.0, true).unwrap();
    assert_relative_eq!(toi, 0.0);
}

#[test]
fn ray_missing_a_cuboid() {
    let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
    let ray = Ray::new(Point::new(-5.0, 2.5, 0.0), Vector::x());

    assert!(cuboid.cast_local_ray(&ray, 100.0, true).is_none());
}

#[test]
fn ray_hits_a_ball() {
    let ball = Ball::new(1.0);
    let ray = Ray::new(Point::new(0.0, 0.0, -5.0), Vector::z());

    let toi = ball.cast_local_ray(&ray, 100.0, true).unwrap();
    assert_relative_eq!(toi, 4.0, epsilon = 1.0e-6);
}
