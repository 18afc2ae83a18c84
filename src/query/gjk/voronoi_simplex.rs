use crate::math::{Point, Real};
use crate::query::gjk::{self, CsoPoint};
use crate::query::PointQueryWithLocation;
use crate::shape::{
    Segment, SegmentPointLocation, Tetrahedron, TetrahedronPointLocation, Triangle,
    TrianglePointLocation,
};

/// A simplex of dimension up to 3 that uses Voronoï regions for computing
/// point projections.
///
/// This is the scratch state of one GJK query: up to four points of the
/// Minkowski difference, reduced after every projection to the minimal
/// sub-simplex (vertex, edge, or face) containing the point of the simplex
/// closest to the origin. The state preceding the last reduction is kept so
/// an iteration that made things worse can still report the previous, better,
/// answer.
#[derive(Clone, Debug)]
pub struct VoronoiSimplex {
    prev_vertices: [usize; 4],
    prev_dim: usize,
    prev_proj: [Real; 3],

    vertices: [CsoPoint; 4],
    proj: [Real; 3],
    dim: usize,
}

impl Default for VoronoiSimplex {
    fn default() -> Self {
        Self::new()
    }
}

impl VoronoiSimplex {
    /// Creates a new empty simplex.
    pub fn new() -> VoronoiSimplex {
        VoronoiSimplex {
            prev_vertices: [0, 1, 2, 3],
            prev_proj: [0.0; 3],
            prev_dim: 0,
            vertices: [CsoPoint::origin(); 4],
            proj: [0.0; 3],
            dim: 0,
        }
    }

    /// Swap two vertices of this simplex.
    pub fn swap(&mut self, i1: usize, i2: usize) {
        self.vertices.swap(i1, i2);
        self.prev_vertices.swap(i1, i2);
    }

    /// Resets this simplex to a single point.
    pub fn reset(&mut self, pt: CsoPoint) {
        self.prev_dim = 0;
        self.dim = 0;
        self.vertices[0] = pt;
    }

    /// Add a point to this simplex.
    ///
    /// Coincident points are rejected (and `false` is returned) so the
    /// projection code never sees affinely dependent inputs.
    pub fn add_point(&mut self, pt: CsoPoint) -> bool {
        self.prev_dim = self.dim;
        self.prev_proj = self.proj;
        self.prev_vertices = [0, 1, 2, 3];

        for i in 0..self.dim + 1 {
            if (self.vertices[i].point - pt.point).norm_squared() < gjk::eps_tol() {
                return false;
            }
        }

        self.dim += 1;
        self.vertices[self.dim] = pt;
        true
    }

    /// Retrieves the barycentric coordinate associated to the `i`-th vertex
    /// by the last call to `project_origin_and_reduce`.
    pub fn proj_coord(&self, i: usize) -> Real {
        assert!(i <= self.dim, "Index out of bounds.");
        self.proj[i]
    }

    /// The i-th point of this simplex.
    pub fn point(&self, i: usize) -> &CsoPoint {
        assert!(i <= self.dim, "Index out of bounds.");
        &self.vertices[i]
    }

    /// Retrieves the barycentric coordinate associated to the `i`-th vertex
    /// before the last call to `project_origin_and_reduce`.
    pub fn prev_proj_coord(&self, i: usize) -> Real {
        assert!(i <= self.prev_dim, "Index out of bounds.");
        self.prev_proj[i]
    }

    /// The i-th point of the simplex before the last call to
    /// `project_origin_and_reduce`.
    pub fn prev_point(&self, i: usize) -> &CsoPoint {
        assert!(i <= self.prev_dim, "Index out of bounds.");
        &self.vertices[self.prev_vertices[i]]
    }

    /// Projects the origin on the boundary of this simplex and reduces
    /// `self` to the smallest sub-simplex containing the projection.
    ///
    /// Returns the result of the projection, or `Point::origin()` if the
    /// origin lies inside of the simplex. The state of the simplex before
    /// the projection is saved, and can be retrieved using the methods
    /// prefixed by `prev_`.
    pub fn project_origin_and_reduce(&mut self) -> Point<Real> {
        if self.dim == 0 {
            self.proj[0] = 1.0;
            self.vertices[0].point
        } else if self.dim == 1 {
            let (proj, location) = {
                let seg = Segment::new(self.vertices[0].point, self.vertices[1].point);
                seg.project_local_point_and_get_location(&Point::<Real>::origin(), true)
            };

            match location {
                SegmentPointLocation::OnVertex(0) => {
                    self.proj[0] = 1.0;
                    self.dim = 0;
                }
                SegmentPointLocation::OnVertex(_) => {
                    self.proj[0] = 1.0;
                    self.swap(0, 1);
                    self.dim = 0;
                }
                SegmentPointLocation::OnEdge(coords) => {
                    self.proj[0] = coords[0];
                    self.proj[1] = coords[1];
                }
            }

            proj.point
        } else if self.dim == 2 {
            let (proj, location) = {
                let tri = Triangle::new(
                    self.vertices[0].point,
                    self.vertices[1].point,
                    self.vertices[2].point,
                );
                tri.project_local_point_and_get_location(&Point::<Real>::origin(), true)
            };

            match location {
                TrianglePointLocation::OnVertex(i) => {
                    self.swap(0, i as usize);
                    self.proj[0] = 1.0;
                    self.dim = 0;
                }
                TrianglePointLocation::OnEdge(0, coords) => {
                    self.proj[0] = coords[0];
                    self.proj[1] = coords[1];
                    self.dim = 1;
                }
                TrianglePointLocation::OnEdge(1, coords) => {
                    self.swap(0, 2);
                    self.proj[0] = coords[1];
                    self.proj[1] = coords[0];
                    self.dim = 1;
                }
                TrianglePointLocation::OnEdge(2, coords) => {
                    self.swap(1, 2);
                    self.proj[0] = coords[0];
                    self.proj[1] = coords[1];
                    self.dim = 1;
                }
                _ => {}
            }

            proj.point
        } else {
            assert!(self.dim == 3);
            let (proj, location) = {
                let tetr = Tetrahedron::new(
                    self.vertices[0].point,
                    self.vertices[1].point,
                    self.vertices[2].point,
                    self.vertices[3].point,
                );
                tetr.project_local_point_and_get_location(&Point::<Real>::origin(), true)
            };

            match location {
                TetrahedronPointLocation::OnVertex(i) => {
                    self.swap(0, i as usize);
                    self.proj[0] = 1.0;
                    self.dim = 0;
                }
                TetrahedronPointLocation::OnEdge(i, coords) => {
                    let (i0, i1) = Tetrahedron::edge_ids(i);
                    let i0 = i0 as usize;
                    let mut i1 = i1 as usize;

                    self.swap(0, i0);
                    if i1 == 0 {
                        i1 = i0;
                    }
                    self.swap(1, i1);

                    self.proj[0] = coords[0];
                    self.proj[1] = coords[1];
                    self.dim = 1;
                }
                TetrahedronPointLocation::OnFace(i, coords) => {
                    let (i0, i1, i2) = Tetrahedron::face_ids(i);
                    let i0 = i0 as usize;
                    let mut i1 = i1 as usize;
                    let mut i2 = i2 as usize;

                    self.swap(0, i0);
                    if i1 == 0 {
                        i1 = i0;
                    }
                    if i2 == 0 {
                        i2 = i0;
                    }
                    self.swap(1, i1);
                    if i2 == 1 {
                        i2 = i1;
                    }
                    self.swap(2, i2);

                    self.proj = coords;
                    self.dim = 2;
                }
                TetrahedronPointLocation::OnSolid => {}
            }

            proj.point
        }
    }

    /// Computes the projection of the origin on the boundary of this simplex,
    /// without reducing it.
    pub fn project_origin(&self) -> Point<Real> {
        if self.dim == 0 {
            self.vertices[0].point
        } else if self.dim == 1 {
            let seg = Segment::new(self.vertices[0].point, self.vertices[1].point);
            seg.project_local_point_and_get_location(&Point::<Real>::origin(), true)
                .0
                .point
        } else if self.dim == 2 {
            let tri = Triangle::new(
                self.vertices[0].point,
                self.vertices[1].point,
                self.vertices[2].point,
            );
            tri.project_local_point_and_get_location(&Point::<Real>::origin(), true)
                .0
                .point
        } else {
            let tetr = Tetrahedron::new(
                self.vertices[0].point,
                self.vertices[1].point,
                self.vertices[2].point,
                self.vertices[3].point,
            );
            tetr.project_local_point_and_get_location(&Point::<Real>::origin(), true)
                .0
                .point
        }
    }

    /// Tests if the given point is already a vertex of this simplex.
    pub fn contains_point(&self, pt: &Point<Real>) -> bool {
        for i in 0..self.dim + 1 {
            if self.vertices[i].point == *pt {
                return true;
            }
        }

        false
    }

    /// The dimension of the smallest subspace that can contain this simplex.
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// The dimension of the simplex before the last call to
    /// `project_origin_and_reduce`.
    pub fn prev_dimension(&self) -> usize {
        self.prev_dim
    }

    /// The maximum squared length of the vertices of this simplex.
    pub fn max_sq_len(&self) -> Real {
        let mut max_sq_len = 0.0;

        for i in 0..self.dim + 1 {
            let norm = self.vertices[i].point.coords.norm_squared();

            if norm > max_sq_len {
                max_sq_len = norm
            }
        }

        max_sq_len
    }

    /// Apply a function to all the vertices of this simplex.
    pub fn modify_pnts(&mut self, f: &dyn Fn(&mut CsoPoint)) {
        for i in 0..self.dim + 1 {
            f(&mut self.vertices[i])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::VoronoiSimplex;
    use crate::math::Point;
    use crate::query::gjk::CsoPoint;

    fn simplex_of(points: &[Point<crate::math::Real>]) -> VoronoiSimplex {
        let mut simplex = VoronoiSimplex::new();
        simplex.reset(CsoPoint::single_point(points[0]));

        for pt in &points[1..] {
            assert!(simplex.add_point(CsoPoint::single_point(*pt)));
        }

        simplex
    }

    #[test]
    fn rejects_coincident_points() {
        let mut simplex = VoronoiSimplex::new();
        simplex.reset(CsoPoint::single_point(Point::new(1.0, 2.0, 3.0)));
        assert!(!simplex.add_point(CsoPoint::single_point(Point::new(1.0, 2.0, 3.0))));
        assert_eq!(simplex.dimension(), 0);
    }

    #[test]
    fn project_and_reduce_is_idempotent() {
        // Re-running the reduction on the sub-simplex it returned must
        // yield the same projection.
        let cases: &[&[Point<crate::math::Real>]] = &[
            &[Point::new(1.0, 1.0, 1.0), Point::new(2.0, 1.0, 1.0)],
            &[
                Point::new(1.0, -1.0, 0.5),
                Point::new(1.0, 1.0, 0.5),
                Point::new(2.0, 0.0, 0.5),
            ],
            &[
                Point::new(1.0, -1.0, -1.0),
                Point::new(1.0, 1.0, -1.0),
                Point::new(2.0, 0.0, -1.0),
                Point::new(1.5, 0.0, 1.0),
            ],
        ];

        for pts in cases {
            let mut simplex = simplex_of(pts);
            let proj = simplex.project_origin_and_reduce();

            let reduced: alloc::vec::Vec<_> = (0..simplex.dimension() + 1)
                .map(|i| simplex.point(i).point)
                .collect();

            let mut reduced_simplex = simplex_of(&reduced);
            let reproj = reduced_simplex.project_origin_and_reduce();

            assert_relative_eq!(proj, reproj, epsilon = 1.0e-5);

            // The barycentric weights sum to 1 on the reduced simplex.
            let mut sum = 0.0;
            for i in 0..simplex.dimension() + 1 {
                sum += simplex.proj_coord(i);
            }
            assert_relative_eq!(sum, 1.0, epsilon = 1.0e-5);
        }
    }

    #[test]
    fn tetrahedron_containing_origin_is_not_reduced() {
        let mut simplex = simplex_of(&[
            Point::new(1.0, -1.0, -1.0),
            Point::new(-1.0, 1.0, -1.0),
            Point::new(-1.0, -1.0, 1.0),
            Point::new(1.0, 1.0, 1.0),
        ]);

        let proj = simplex.project_origin_and_reduce();
        assert_eq!(simplex.dimension(), 3);
        assert_relative_eq!(proj, Point::origin(), epsilon = 1.0e-6);
    }
}
