mod ball_ball_distance;
mod ball_ball_toi;
mod cuboid_ray_cast;
mod gjk_cuboid_cuboid;
mod narrow_phase_pipeline;
