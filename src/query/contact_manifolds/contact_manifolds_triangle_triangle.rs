use crate::math::{Isometry, Point, Real, Vector};
use crate::query::details::closest_points_segment_segment_with_locations_nD;
use crate::query::{ContactManifold, PointQueryWithLocation, QueryError, TrackedContact};
use crate::shape::{PackedFeatureId, Triangle, TriangleFlags};
use na::Unit;
use smallvec::SmallVec;

/// Persistent state of the triangle-triangle contact generator.
///
/// Deep-overlap classification involves tie-breaks between two nearly
/// equivalent configurations. Remembering which side won on the previous
/// step keeps the selected contact from flickering between steps while the
/// depths stay within tolerance of one another.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TriangleTriangleState {
    /// Did the previous run of the generator detect a deep overlap?
    pub deep_on_prev_step: bool,
    /// For full-overlap chords, was the second chord endpoint selected as
    /// the primary contact?
    pub prev_full_side_right: bool,
}

// Ordering of the part of the plane-crossing chord lying inside the
// reference triangle ([t_in, t_out]) relative to the chord itself ([0, 1]).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum IntervalOrdering {
    DisjointLeft,
    DisjointRight,
    PartialLeft,
    PartialRight,
    FullLeft,
    FullRight,
}

// One face-vertex contact candidate, with both points expressed in the
// local-space of the first triangle.
struct FaceVertexCandidate {
    p1: Point<Real>,
    p2_1: Point<Real>,
    fid1: PackedFeatureId,
    fid2: PackedFeatureId,
}

/// Computes the contact manifold between two triangles.
///
/// The generation proceeds by:
/// 1. calibrating each face normal against the opposing triangle's centroid
///    (unless the triangle is one-sided, in which case its winding normal is
///    authoritative);
/// 2. coarse rejection on the signed vertex/plane distances;
/// 3. face-vertex contacts for vertices within the prediction distance of
///    the opposing plane, filtered by barycentric containment;
/// 4. for non-intersecting pairs, the nine edge-edge closest-point tests,
///    keeping the single globally closest pair unless a face contact is
///    deeper;
/// 5. for interpenetrating pairs, classification of the plane-crossing
///    chord against the reference triangle to recover the true edge-edge
///    contact, falling back to face contacts along the least-penetration
///    face normal;
/// 6. discarding manifolds whose normal opposes a one-sided triangle's
///    winding.
pub fn contact_manifold_triangle_triangle<ManifoldData, ContactData>(
    pos12: &Isometry<Real>,
    triangle1: &Triangle,
    flags1: TriangleFlags,
    triangle2: &Triangle,
    flags2: TriangleFlags,
    prediction: Real,
    manifold: &mut ContactManifold<ManifoldData, ContactData>,
    state: &mut TriangleTriangleState,
) -> Result<(), QueryError>
where
    ContactData: Default + Copy,
{
    if prediction < 0.0 {
        return Err(QueryError::InvalidPrediction(prediction));
    }

    if manifold.try_update_contacts(pos12) {
        return Ok(());
    }

    let pos21 = pos12.inverse();
    let triangle2_1 = triangle2.transformed(pos12);

    let eps = crate::math::DEFAULT_EPSILON * 100.0;

    let old_points = manifold.points.clone();
    manifold.clear();

    let (w1, w2_1) = match (triangle1.normal(), triangle2_1.normal()) {
        (Some(w1), Some(w2_1)) => (w1, w2_1),
        // A degenerate triangle has no face: only its edges can touch the
        // other triangle.
        _ => {
            degenerate_edge_contact(
                &pos21,
                triangle1,
                &triangle2_1,
                prediction,
                manifold,
            );
            state.deep_on_prev_step = false;
            manifold.match_contacts(&old_points);
            return Ok(());
        }
    };

    let center1 = triangle1.center();
    let center2_1 = triangle2_1.center();

    // Calibrate the normals so they face the opposing triangle. One-sided
    // triangles keep their winding normal.
    let mut n1 = w1;
    if !flags1.contains(TriangleFlags::ONE_SIDED) && n1.dot(&(center2_1 - center1)) < 0.0 {
        n1 = -n1;
    }

    let mut n2_1 = w2_1;
    if !flags2.contains(TriangleFlags::ONE_SIDED) && n2_1.dot(&(center1 - center2_1)) < 0.0 {
        n2_1 = -n2_1;
    }

    let vtx1 = triangle1.vertices();
    let vtx2_1 = triangle2_1.vertices();

    // Signed distances of each triangle's vertices to the other's plane.
    let mut d2 = [0.0; 3];
    let mut d1 = [0.0; 3];
    for i in 0..3 {
        d2[i] = n1.dot(&(vtx2_1[i] - triangle1.a));
        d1[i] = n2_1.dot(&(vtx1[i] - triangle2_1.a));
    }

    // Coarse rejection: everything strictly beyond the prediction distance
    // on the positive side cannot produce contacts.
    if d2.iter().all(|d| *d > prediction) || d1.iter().all(|d| *d > prediction) {
        state.deep_on_prev_step = false;
        return Ok(());
    }

    // Everything strictly on the negative side is incompatible with the
    // calibrated normals. This, not the margin test, is what rejects
    // contacts against the back of one-sided geometry.
    if d2.iter().all(|d| *d < 0.0) || d1.iter().all(|d| *d < 0.0) {
        state.deep_on_prev_step = false;
        return Ok(());
    }

    let min_d2 = d2.iter().fold(Real::MAX, |a, b| a.min(*b));
    let min_d1 = d1.iter().fold(Real::MAX, |a, b| a.min(*b));

    // A strictly positive minimum on either side is a separating axis: the
    // pair cannot be interpenetrating, whatever the other side looks like.
    let overlapping = min_d2 < 0.0 && min_d1 < 0.0;

    /*
     * Face-vertex contacts.
     */
    let mut candidates: SmallVec<[FaceVertexCandidate; 8]> = SmallVec::new();
    let mut deepest_vs_plane1 = Real::MAX;
    let mut deepest_vs_plane2 = Real::MAX;

    for i in 0..3 {
        if d2[i] >= 0.0 && d2[i] < prediction {
            let (proj, loc) = triangle1.project_local_point_and_get_location(&vtx2_1[i], true);
            if loc.is_on_face() {
                deepest_vs_plane1 = deepest_vs_plane1.min(d2[i]);
                candidates.push(FaceVertexCandidate {
                    p1: proj.point,
                    p2_1: vtx2_1[i],
                    fid1: PackedFeatureId::face(0),
                    fid2: PackedFeatureId::vertex(i as u32),
                });
            }
        }

        if d1[i] >= 0.0 && d1[i] < prediction {
            let (proj, loc) = triangle2_1.project_local_point_and_get_location(&vtx1[i], true);
            if loc.is_on_face() {
                deepest_vs_plane2 = deepest_vs_plane2.min(d1[i]);
                candidates.push(FaceVertexCandidate {
                    p1: vtx1[i],
                    p2_1: proj.point,
                    fid1: PackedFeatureId::vertex(i as u32),
                    fid2: PackedFeatureId::face(0),
                });
            }
        }
    }

    // The reference normal is the calibrated plane normal whose deepest
    // accepted contact is the shallowest: the axis of least commitment.
    // A plane without any accepted contact does not compete.
    let has_contacts_vs_plane1 = deepest_vs_plane1 != Real::MAX;
    let has_contacts_vs_plane2 = deepest_vs_plane2 != Real::MAX;
    let mut ref_normal1 = if has_contacts_vs_plane2
        && (!has_contacts_vs_plane1 || deepest_vs_plane2 > deepest_vs_plane1)
    {
        -n2_1
    } else {
        n1
    };

    for candidate in &candidates {
        let dist = (candidate.p2_1 - candidate.p1).dot(&ref_normal1);
        manifold.push_contact(TrackedContact::new(
            candidate.p1,
            pos21 * candidate.p2_1,
            candidate.fid1,
            candidate.fid2,
            dist,
        ));
    }

    if !overlapping {
        /*
         * Edge-edge contacts, only meaningful while the triangles do not
         * interpenetrate.
         */
        let edges1 = triangle1.edges();
        let edges2_1 = triangle2_1.edges();
        let mut best = None;
        let mut best_dist_sq = Real::MAX;

        for (i, e1) in edges1.iter().enumerate() {
            for (j, e2) in edges2_1.iter().enumerate() {
                let (loc1, loc2) = closest_points_segment_segment_with_locations_nD(
                    (&e1.a, &e1.b),
                    (&e2.a, &e2.b),
                );
                let pa = e1.point_at(&loc1);
                let pb = e2.point_at(&loc2);
                let dist_sq = (pb - pa).norm_squared();

                if dist_sq < best_dist_sq {
                    best_dist_sq = dist_sq;
                    best = Some((i, j, pa, pb));
                }
            }
        }

        if let Some((i, j, pa, pb)) = best {
            let dist = na::ComplexField::sqrt(best_dist_sq);

            // Face contacts take priority: the edge pair is kept only when
            // it is no deeper than every face contact found above.
            if dist < prediction && manifold.points.iter().all(|c| dist >= c.dist) {
                let normal = edge_edge_normal(
                    &pb,
                    &pa,
                    &(edges1[i].b - edges1[i].a),
                    &(edges2_1[j].b - edges2_1[j].a),
                    &(center2_1 - center1),
                    &n1,
                    eps,
                );

                if manifold.points.is_empty() {
                    ref_normal1 = normal;
                }

                manifold.push_contact(TrackedContact::new(
                    pa,
                    pos21 * pb,
                    PackedFeatureId::edge(i as u32),
                    PackedFeatureId::edge(j as u32),
                    dist,
                ));
            }
        }

        state.deep_on_prev_step = false;
    } else {
        /*
         * The triangles may be overlapping: recover a deep contact from the
         * plane-crossing chord.
         */
        let mixed2 = d2.iter().any(|d| *d < 0.0) && d2.iter().any(|d| *d > 0.0);
        let mixed1 = d1.iter().any(|d| *d < 0.0) && d1.iter().any(|d| *d > 0.0);

        let deep_done = if mixed2 {
            deep_chord_contact(
                triangle1,
                &triangle2_1,
                &pos21,
                &vtx2_1,
                &d2,
                &n1,
                &(center2_1 - center1),
                false,
                eps,
                manifold,
                state,
                &mut ref_normal1,
            )
        } else if mixed1 {
            deep_chord_contact(
                &triangle2_1,
                triangle1,
                &pos21,
                &vtx1,
                &d1,
                &n2_1,
                &(center1 - center2_1),
                true,
                eps,
                manifold,
                state,
                &mut ref_normal1,
            )
        } else {
            false
        };

        if !deep_done {
            // No edge case applies: deepest-penetration face normal.
            face_fallback_contacts(
                triangle1,
                &triangle2_1,
                &pos21,
                &vtx1,
                &vtx2_1,
                &d1,
                &d2,
                &n1,
                &n2_1,
                manifold,
                &mut ref_normal1,
            );
        }

        state.deep_on_prev_step = true;
    }

    if !manifold.points.is_empty() {
        manifold.local_n1 = *ref_normal1;
        manifold.local_n2 = pos21 * -*ref_normal1;
    }

    /*
     * One-sided filtering.
     */
    if flags1.contains(TriangleFlags::ONE_SIDED)
        && !manifold.points.is_empty()
        && manifold.local_n1.dot(&w1) < 0.0
    {
        manifold.clear();
    }

    if flags2.contains(TriangleFlags::ONE_SIDED) && !manifold.points.is_empty() {
        if let Some(w2) = triangle2.normal() {
            if manifold.local_n2.dot(&w2) < 0.0 {
                manifold.clear();
            }
        }
    }

    manifold.match_contacts(&old_points);
    Ok(())
}

// The unit normal of an edge-edge contact, pointing from the first shape
// toward the second. Falls back to the face normal when the edges are
// parallel or the contact points coincide.
fn edge_edge_normal(
    pb: &Point<Real>,
    pa: &Point<Real>,
    dir1: &Vector<Real>,
    dir2: &Vector<Real>,
    centers_dir: &Vector<Real>,
    face_normal: &Unit<Vector<Real>>,
    eps: Real,
) -> Unit<Vector<Real>> {
    if let Some(normal) = Unit::try_new(pb - pa, eps) {
        return normal;
    }

    if let Some(mut normal) = Unit::try_new(dir1.cross(dir2), eps) {
        if normal.dot(centers_dir) < 0.0 {
            normal = -normal;
        }
        return normal;
    }

    *face_normal
}

// Deep contact from the chord traced by `incident` (vertices `vtx`, plane
// distances `d`) across the plane of `reference`. Returns `false` when no
// edge case applies and the caller must use the face-normal fallback.
//
// When `flipped` is true, `reference` is the second shape: the emitted
// contact has its points and feature ids swapped and its normal negated so
// it is still expressed with regard to the first shape.
#[allow(clippy::too_many_arguments)]
fn deep_chord_contact<ManifoldData, ContactData: Default + Copy>(
    reference: &Triangle,
    incident: &Triangle,
    pos21: &Isometry<Real>,
    vtx: &[Point<Real>; 3],
    d: &[Real; 3],
    ref_n: &Unit<Vector<Real>>,
    centers_dir: &Vector<Real>,
    flipped: bool,
    eps: Real,
    manifold: &mut ContactManifold<ManifoldData, ContactData>,
    state: &mut TriangleTriangleState,
    ref_normal1: &mut Unit<Vector<Real>>,
) -> bool {
    // The two points where the incident triangle's edges pierce the
    // reference plane.
    let mut chord = [Point::origin(); 2];
    let mut chord_edges = [0usize; 2];
    let mut count = 0;

    for i in 0..3 {
        let j = (i + 1) % 3;
        if d[i] * d[j] < 0.0 {
            if count == 2 {
                break;
            }
            let t = d[i] / (d[i] - d[j]);
            chord[count] = vtx[i] + (vtx[j] - vtx[i]) * t;
            chord_edges[count] = i;
            count += 1;
        }
    }

    if count != 2 {
        // A vertex lies exactly on the plane: no clean chord.
        return false;
    }

    let (s0, s1) = (chord[0], chord[1]);

    // Clip the chord against the reference triangle's edges, tracking which
    // edge bounds the inside interval on each side.
    let scaled_n = reference.scaled_normal();
    let ref_vtx = reference.vertices();

    let mut t_in: Real = 0.0 - 1.0e6;
    let mut t_out: Real = 1.0e6;
    let mut e_in = 0usize;
    let mut e_out = 0usize;
    let mut empty = false;

    for k in 0..3 {
        let a = ref_vtx[k];
        let b = ref_vtx[(k + 1) % 3];
        let edge = b - a;

        let f0 = edge.cross(&(s0 - a)).dot(&scaled_n);
        let f1 = edge.cross(&(s1 - a)).dot(&scaled_n);
        let df = f1 - f0;

        if df.abs() <= eps {
            if f0 < 0.0 {
                empty = true;
                break;
            }
            continue;
        }

        let t = f0 / (f0 - f1);

        if df < 0.0 {
            // Inside to outside: upper bound.
            if t < t_out {
                t_out = t;
                e_out = k;
            }
        } else {
            // Outside to inside: lower bound.
            if t > t_in {
                t_in = t;
                e_in = k;
            }
        }
    }

    let ordering = if empty || t_in > t_out {
        if (t_in + t_out) * 0.5 < 0.5 {
            IntervalOrdering::DisjointLeft
        } else {
            IntervalOrdering::DisjointRight
        }
    } else if t_out < 0.0 {
        IntervalOrdering::DisjointLeft
    } else if t_in > 1.0 {
        IntervalOrdering::DisjointRight
    } else if t_in <= 0.0 && t_out >= 1.0 {
        // The chord is entirely inside the reference triangle. The primary
        // endpoint is the deeper one; reuse the previous step's choice when
        // the depths are too close to call.
        let depth0 = edge_min_depth(d, chord_edges[0]);
        let depth1 = edge_min_depth(d, chord_edges[1]);

        let right = if (depth0 - depth1).abs() <= 1.0e-6 && state.deep_on_prev_step {
            state.prev_full_side_right
        } else {
            depth1 < depth0
        };

        if right {
            IntervalOrdering::FullRight
        } else {
            IntervalOrdering::FullLeft
        }
    } else if t_in <= 0.0 {
        IntervalOrdering::PartialLeft
    } else if t_out >= 1.0 {
        IntervalOrdering::PartialRight
    } else if t_in >= 1.0 - t_out {
        IntervalOrdering::PartialRight
    } else {
        IntervalOrdering::PartialLeft
    };

    match ordering {
        IntervalOrdering::DisjointLeft | IntervalOrdering::DisjointRight => false,
        IntervalOrdering::FullLeft | IntervalOrdering::FullRight => {
            state.prev_full_side_right = ordering == IntervalOrdering::FullRight;
            // Both piercing edges traverse the reference face interior: no
            // reference edge is involved, so this is a face-normal case.
            false
        }
        IntervalOrdering::PartialLeft | IntervalOrdering::PartialRight => {
            // A reference edge is crossed: the true contact is between that
            // edge and the incident edge piercing nearest to the crossing.
            let (t, ref_edge) = if ordering == IntervalOrdering::PartialLeft {
                (t_out, e_out)
            } else {
                (t_in, e_in)
            };

            let incident_edge = if t <= 0.5 {
                chord_edges[0]
            } else {
                chord_edges[1]
            };

            let e1 = reference.edges()[ref_edge];
            let e2 = incident.edges()[incident_edge];

            let (loc1, loc2) =
                closest_points_segment_segment_with_locations_nD((&e1.a, &e1.b), (&e2.a, &e2.b));
            let pa = e1.point_at(&loc1);
            let pb = e2.point_at(&loc2);

            let normal = edge_edge_normal(
                &pb,
                &pa,
                &(e1.b - e1.a),
                &(e2.b - e2.a),
                centers_dir,
                ref_n,
                eps,
            );

            let dist = (pb - pa).dot(&normal);

            let (normal1, contact) = if !flipped {
                (
                    normal,
                    TrackedContact::new(
                        pa,
                        pos21 * pb,
                        PackedFeatureId::edge(ref_edge as u32),
                        PackedFeatureId::edge(incident_edge as u32),
                        dist,
                    ),
                )
            } else {
                // The reference triangle is the second shape: swap roles.
                (
                    -normal,
                    TrackedContact::new(
                        pb,
                        pos21 * pa,
                        PackedFeatureId::edge(incident_edge as u32),
                        PackedFeatureId::edge(ref_edge as u32),
                        dist,
                    ),
                )
            };

            *ref_normal1 = normal1;
            manifold.push_contact(contact);
            true
        }
    }
}

// The depth of the most penetrating endpoint of the `edge`-th edge.
fn edge_min_depth(d: &[Real; 3], edge: usize) -> Real {
    d[edge].min(d[(edge + 1) % 3])
}

// Deep contacts along the least-penetration face normal: penetrating
// vertices projected onto the opposing face.
#[allow(clippy::too_many_arguments)]
fn face_fallback_contacts<ManifoldData, ContactData: Default + Copy>(
    triangle1: &Triangle,
    triangle2_1: &Triangle,
    pos21: &Isometry<Real>,
    vtx1: &[Point<Real>; 3],
    vtx2_1: &[Point<Real>; 3],
    d1: &[Real; 3],
    d2: &[Real; 3],
    n1: &Unit<Vector<Real>>,
    n2_1: &Unit<Vector<Real>>,
    manifold: &mut ContactManifold<ManifoldData, ContactData>,
    ref_normal1: &mut Unit<Vector<Real>>,
) {
    let penetration1 = -d2.iter().fold(Real::MAX, |a, b| a.min(*b));
    let penetration2 = -d1.iter().fold(Real::MAX, |a, b| a.min(*b));

    // The axis with the smaller penetration bounds the true depth: contacts
    // along the other axis would overstate how far the shapes must move to
    // separate.
    if penetration1 <= penetration2 {
        *ref_normal1 = *n1;

        for i in 0..3 {
            if d2[i] < 0.0 {
                let (proj, loc) =
                    triangle1.project_local_point_and_get_location(&vtx2_1[i], true);
                if loc.is_on_face() {
                    manifold.push_contact(TrackedContact::new(
                        proj.point,
                        pos21 * vtx2_1[i],
                        PackedFeatureId::face(0),
                        PackedFeatureId::vertex(i as u32),
                        d2[i],
                    ));
                }
            }
        }

        if manifold.points.is_empty() {
            // No penetrating vertex projects inside the face: report the
            // deepest vertex anyway so the solver gets something to push on.
            let mut deepest = 0;
            for i in 1..3 {
                if d2[i] < d2[deepest] {
                    deepest = i;
                }
            }

            manifold.push_contact(TrackedContact::new(
                vtx2_1[deepest] - **n1 * d2[deepest],
                pos21 * vtx2_1[deepest],
                PackedFeatureId::face(0),
                PackedFeatureId::vertex(deepest as u32),
                d2[deepest],
            ));
        }
    } else {
        *ref_normal1 = -*n2_1;

        for i in 0..3 {
            if d1[i] < 0.0 {
                let (proj, loc) =
                    triangle2_1.project_local_point_and_get_location(&vtx1[i], true);
                if loc.is_on_face() {
                    manifold.push_contact(TrackedContact::new(
                        vtx1[i],
                        pos21 * proj.point,
                        PackedFeatureId::vertex(i as u32),
                        PackedFeatureId::face(0),
                        d1[i],
                    ));
                }
            }
        }

        if manifold.points.is_empty() {
            let mut deepest = 0;
            for i in 1..3 {
                if d1[i] < d1[deepest] {
                    deepest = i;
                }
            }

            manifold.push_contact(TrackedContact::new(
                vtx1[deepest],
                pos21 * (vtx1[deepest] - **n2_1 * d1[deepest]),
                PackedFeatureId::vertex(deepest as u32),
                PackedFeatureId::face(0),
                d1[deepest],
            ));
        }
    }
}

// A degenerate (zero-area) triangle is handled as its closest edge pair.
fn degenerate_edge_contact<ManifoldData, ContactData: Default + Copy>(
    pos21: &Isometry<Real>,
    triangle1: &Triangle,
    triangle2_1: &Triangle,
    prediction: Real,
    manifold: &mut ContactManifold<ManifoldData, ContactData>,
) {
    let edges1 = triangle1.edges();
    let edges2_1 = triangle2_1.edges();
    let mut best = None;
    let mut best_dist_sq = Real::MAX;

    for (i, e1) in edges1.iter().enumerate() {
        for (j, e2) in edges2_1.iter().enumerate() {
            let (loc1, loc2) =
                closest_points_segment_segment_with_locations_nD((&e1.a, &e1.b), (&e2.a, &e2.b));
            let pa = e1.point_at(&loc1);
            let pb = e2.point_at(&loc2);
            let dist_sq = (pb - pa).norm_squared();

            if dist_sq < best_dist_sq {
                best_dist_sq = dist_sq;
                best = Some((i, j, pa, pb));
            }
        }
    }

    if let Some((i, j, pa, pb)) = best {
        let dist = na::ComplexField::sqrt(best_dist_sq);

        if dist < prediction {
            if let Some(normal) = Unit::try_new(pb - pa, crate::math::DEFAULT_EPSILON) {
                manifold.local_n1 = *normal;
                manifold.local_n2 = pos21 * -*normal;
                manifold.push_contact(TrackedContact::new(
                    pa,
                    pos21 * pb,
                    PackedFeatureId::edge(i as u32),
                    PackedFeatureId::edge(j as u32),
                    dist,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{contact_manifold_triangle_triangle, TriangleTriangleState};
    use crate::math::{Isometry, Point, Real};
    use crate::query::{ContactManifold, QueryError};
    use crate::shape::{PackedFeatureId, Triangle, TriangleFlags};

    fn manifold() -> ContactManifold<(), ()> {
        ContactManifold::new()
    }

    fn generate(
        pos12: &Isometry<Real>,
        tri1: &Triangle,
        flags1: TriangleFlags,
        tri2: &Triangle,
        flags2: TriangleFlags,
        prediction: Real,
    ) -> ContactManifold<(), ()> {
        let mut result = manifold();
        let mut state = TriangleTriangleState::default();
        contact_manifold_triangle_triangle(
            pos12,
            tri1,
            flags1,
            tri2,
            flags2,
            prediction,
            &mut result,
            &mut state,
        )
        .unwrap();
        result
    }

    #[test]
    fn negative_prediction_is_rejected() {
        let tri = Triangle::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        );
        let mut result = manifold();
        let mut state = TriangleTriangleState::default();

        assert_eq!(
            contact_manifold_triangle_triangle(
                &Isometry::identity(),
                &tri,
                TriangleFlags::empty(),
                &tri,
                TriangleFlags::empty(),
                -0.1,
                &mut result,
                &mut state,
            ),
            Err(QueryError::InvalidPrediction(-0.1))
        );
    }

    #[test]
    fn coplanar_overlapping_triangles_touch() {
        let tri1 = Triangle::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
            Point::new(0.0, 2.0, 0.0),
        );
        let tri2 = Triangle::new(
            Point::new(1.0, 0.0, 0.0),
            Point::new(3.0, 0.0, 0.0),
            Point::new(1.0, 2.0, 0.0),
        );

        let prediction = 0.1;
        let result = generate(
            &Isometry::identity(),
            &tri1,
            TriangleFlags::empty(),
            &tri2,
            TriangleFlags::empty(),
            prediction,
        );

        assert!(!result.points.is_empty());

        // The normal is perpendicular to the shared plane.
        assert!(result.local_n1.z.abs() > 0.99);
        assert!(result.local_n1.x.abs() < 1.0e-4 && result.local_n1.y.abs() < 1.0e-4);

        for pt in &result.points {
            assert!(pt.dist.abs() <= prediction);
        }
    }

    #[test]
    fn parallel_faces_within_margin() {
        let tri1 = Triangle::new(
            Point::new(-3.0, -3.0, 0.0),
            Point::new(3.0, -3.0, 0.0),
            Point::new(0.0, 3.0, 0.0),
        );
        let tri2 = Triangle::new(
            Point::new(0.0, 0.0, 0.05),
            Point::new(1.0, 0.0, 0.05),
            Point::new(0.0, 1.0, 0.05),
        );

        let result = generate(
            &Isometry::identity(),
            &tri1,
            TriangleFlags::empty(),
            &tri2,
            TriangleFlags::empty(),
            0.1,
        );

        // All three vertices of the small triangle are face contacts.
        assert!(result.points.len() >= 3);
        assert!(result.local_n1.z > 0.99);

        let mut vertex_fids = 0;
        for pt in &result.points {
            assert_relative_eq!(pt.dist, 0.05, epsilon = 1.0e-4);
            if pt.fid2.is_vertex() {
                assert_eq!(pt.fid1, PackedFeatureId::face(0));
                vertex_fids += 1;
            }
        }
        assert_eq!(vertex_fids, 3);
    }

    #[test]
    fn crossed_edges_within_margin() {
        // An horizontal edge at z = 0 and a perpendicular edge hovering
        // 0.1 above it.
        let tri1 = Triangle::new(
            Point::new(-1.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, -2.0, 0.0),
        );
        let tri2 = Triangle::new(
            Point::new(0.0, -1.0, 0.1),
            Point::new(0.0, 1.0, 0.1),
            Point::new(0.0, 0.0, 1.1),
        );

        let result = generate(
            &Isometry::identity(),
            &tri1,
            TriangleFlags::empty(),
            &tri2,
            TriangleFlags::empty(),
            0.15,
        );

        assert!(!result.points.is_empty());
        assert!(result.local_n1.z > 0.99);

        let deepest = result.find_deepest_contact().unwrap();
        assert_relative_eq!(deepest.dist, 0.1, epsilon = 1.0e-4);
    }

    #[test]
    fn interpenetrating_triangles_have_negative_depth() {
        let tri1 = Triangle::new(
            Point::new(-2.0, -2.0, 0.0),
            Point::new(2.0, -2.0, 0.0),
            Point::new(0.0, 2.0, 0.0),
        );
        // A vertical triangle piercing 0.5 deep through the face of `tri1`.
        let tri2 = Triangle::new(
            Point::new(0.0, -1.0, -0.5),
            Point::new(0.0, 1.0, -0.5),
            Point::new(0.0, 0.0, 1.0),
        );

        let mut result = manifold();
        let mut state = TriangleTriangleState::default();
        contact_manifold_triangle_triangle(
            &Isometry::identity(),
            &tri1,
            TriangleFlags::empty(),
            &tri2,
            TriangleFlags::empty(),
            0.05,
            &mut result,
            &mut state,
        )
        .unwrap();

        assert!(state.deep_on_prev_step);
        assert_eq!(result.points.len(), 2);
        assert!(result.local_n1.z > 0.99);

        for pt in &result.points {
            assert_relative_eq!(pt.dist, -0.5, epsilon = 1.0e-4);
            assert!(pt.fid2.is_vertex());
            assert_eq!(pt.fid1, PackedFeatureId::face(0));
        }
    }

    #[test]
    fn one_sided_back_face_is_rejected() {
        let tri1 = Triangle::new(
            Point::new(-2.0, -2.0, 0.0),
            Point::new(2.0, -2.0, 0.0),
            Point::new(0.0, 2.0, 0.0),
        );
        // A small triangle brushing the back side of `tri1`.
        let below = Triangle::new(
            Point::new(0.0, 0.0, -0.05),
            Point::new(1.0, 0.0, -0.05),
            Point::new(0.0, 1.0, -0.05),
        );
        let above = Triangle::new(
            Point::new(0.0, 0.0, 0.05),
            Point::new(1.0, 0.0, 0.05),
            Point::new(0.0, 1.0, 0.05),
        );

        let rejected = generate(
            &Isometry::identity(),
            &tri1,
            TriangleFlags::ONE_SIDED,
            &below,
            TriangleFlags::empty(),
            0.1,
        );
        assert!(rejected.points.is_empty());

        let accepted = generate(
            &Isometry::identity(),
            &tri1,
            TriangleFlags::ONE_SIDED,
            &above,
            TriangleFlags::empty(),
            0.1,
        );
        assert!(!accepted.points.is_empty());
    }

    #[test]
    fn feature_ids_are_stable() {
        let tri1 = Triangle::new(
            Point::new(-3.0, -3.0, 0.0),
            Point::new(3.0, -3.0, 0.0),
            Point::new(0.0, 3.0, 0.0),
        );
        let tri2 = Triangle::new(
            Point::new(0.0, 0.0, 0.05),
            Point::new(1.0, 0.0, 0.05),
            Point::new(0.0, 1.0, 0.05),
        );

        let result1 = generate(
            &Isometry::identity(),
            &tri1,
            TriangleFlags::empty(),
            &tri2,
            TriangleFlags::empty(),
            0.1,
        );
        // The same configuration, slightly translated within the plane.
        let result2 = generate(
            &Isometry::translation(0.01, 0.01, 0.0),
            &tri1,
            TriangleFlags::empty(),
            &tri2,
            TriangleFlags::empty(),
            0.1,
        );

        let mut fids1: alloc::vec::Vec<_> =
            result1.points.iter().map(|pt| (pt.fid1, pt.fid2)).collect();
        let mut fids2: alloc::vec::Vec<_> =
            result2.points.iter().map(|pt| (pt.fid1, pt.fid2)).collect();
        fids1.sort_unstable_by_key(|(f1, f2)| (f1.0, f2.0));
        fids2.sort_unstable_by_key(|(f1, f2)| (f1.0, f2.0));
        assert_eq!(fids1, fids2);
    }
}
