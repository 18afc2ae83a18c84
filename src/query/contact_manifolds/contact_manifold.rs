use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::PackedFeatureId;
use arrayvec::ArrayVec;
use na;

/// The maximum number of contact points a manifold may hold.
pub const MAX_MANIFOLD_POINTS: usize = 4;

/// A single contact point between two shapes.
///
/// The contact positions are stored in the local-space of each shape so that
/// they remain meaningful while the shapes move. The signed distance is
/// negative when the shapes penetrate, in which case its absolute value is
/// the penetration depth. The feature ids identify the geometric regions
/// (vertex/edge/face) that produced the contact; they are the key used to
/// match contacts across simulation steps, e.g., for warm-starting a
/// constraint solver.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TrackedContact<Data> {
    /// The contact point in the local-space of the first shape.
    pub local_p1: Point<Real>,
    /// The contact point in the local-space of the second shape.
    pub local_p2: Point<Real>,
    /// The signed distance between the two contact points.
    pub dist: Real,
    /// The feature id of the first shape involved in the contact.
    pub fid1: PackedFeatureId,
    /// The feature id of the second shape involved in the contact.
    pub fid2: PackedFeatureId,
    /// User-data associated to this contact.
    pub data: Data,
}

impl<Data: Default + Copy> TrackedContact<Data> {
    /// Creates a new tracked contact.
    pub fn new(
        local_p1: Point<Real>,
        local_p2: Point<Real>,
        fid1: PackedFeatureId,
        fid2: PackedFeatureId,
        dist: Real,
    ) -> Self {
        Self {
            local_p1,
            local_p2,
            fid1,
            fid2,
            dist,
            data: Data::default(),
        }
    }

    /// Creates a new tracked contact where its input may need to be flipped.
    pub fn flipped(
        local_p1: Point<Real>,
        local_p2: Point<Real>,
        fid1: PackedFeatureId,
        fid2: PackedFeatureId,
        dist: Real,
        flipped: bool,
    ) -> Self {
        if !flipped {
            Self::new(local_p1, local_p2, fid1, fid2, dist)
        } else {
            Self::new(local_p2, local_p1, fid2, fid1, dist)
        }
    }
}

/// A contact manifold between two shapes.
///
/// A contact manifold describes a set of contacts between two shapes. All
/// the contacts of this manifold share a common contact normal, expressed in
/// the local-space of each shape (`local_n1`, `local_n2`).
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ContactManifold<ManifoldData, ContactData> {
    /// The contact points.
    ///
    /// At most [`MAX_MANIFOLD_POINTS`] contacts are kept; the generators
    /// replace the shallowest point when a deeper one shows up on a full
    /// manifold.
    pub points: ArrayVec<TrackedContact<ContactData>, MAX_MANIFOLD_POINTS>,
    /// The contact normal of all the contacts of this manifold, expressed in
    /// the local space of the first shape, pointing toward the second shape.
    pub local_n1: Vector<Real>,
    /// The contact normal of all the contacts of this manifold, expressed in
    /// the local space of the second shape, pointing toward the first shape.
    pub local_n2: Vector<Real>,
    /// Additional tracked data associated to this contact manifold.
    pub data: ManifoldData,
}

impl<ManifoldData, ContactData: Default + Copy> ContactManifold<ManifoldData, ContactData> {
    /// Creates a new empty contact-manifold.
    pub fn new() -> Self
    where
        ManifoldData: Default,
    {
        Self::with_data(ManifoldData::default())
    }

    /// Creates a new empty contact-manifold with the given associated data.
    pub fn with_data(data: ManifoldData) -> Self {
        Self {
            points: ArrayVec::new(),
            local_n1: Vector::zeros(),
            local_n2: Vector::zeros(),
            data,
        }
    }

    /// Returns a slice of all the contact points of this manifold.
    #[inline]
    pub fn contacts(&self) -> &[TrackedContact<ContactData>] {
        &self.points
    }

    /// Removes all the contacts from `self`.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Pushes a contact, replacing the shallowest existing point if the
    /// manifold is full.
    pub fn push_contact(&mut self, contact: TrackedContact<ContactData>) {
        if self.points.is_full() {
            let mut shallowest = 0;

            for (i, pt) in self.points.iter().enumerate() {
                if pt.dist > self.points[shallowest].dist {
                    shallowest = i;
                }
            }

            if contact.dist < self.points[shallowest].dist {
                self.points[shallowest] = contact;
            }
        } else {
            self.points.push(contact);
        }
    }

    /// Attempts to use spatial coherence to update the contact points with
    /// the new relative pose of the shapes, without running the full contact
    /// generation.
    ///
    /// Returns `true` in case of success, `false` if the full contact
    /// generation must be run again (the shapes moved or rotated too much,
    /// or a contact switched between penetrating and non-penetrating).
    #[inline]
    pub fn try_update_contacts(&mut self, pos12: &Isometry<Real>) -> bool {
        const DOT_THRESHOLD: Real = crate::utils::COS_1_DEGREES;
        const DIST_SQ_THRESHOLD: Real = 1.0e-6;
        self.try_update_contacts_eps(pos12, DOT_THRESHOLD, DIST_SQ_THRESHOLD)
    }

    /// Attempts to use spatial coherence to update the contact points, using
    /// user-defined tolerances.
    #[inline]
    pub fn try_update_contacts_eps(
        &mut self,
        pos12: &Isometry<Real>,
        angle_dot_threshold: Real,
        dist_sq_threshold: Real,
    ) -> bool {
        if self.points.is_empty() {
            return false;
        }

        let local_n2 = pos12 * self.local_n2;

        if -self.local_n1.dot(&local_n2) < angle_dot_threshold {
            return false;
        }

        for pt in &mut self.points {
            let local_p2 = pos12 * pt.local_p2;
            let dpt = local_p2 - pt.local_p1;
            let dist = dpt.dot(&self.local_n1);

            if dist * pt.dist < 0.0 {
                // We switched between penetrating/non-penetrating.
                // This may result in other contacts to appear.
                return false;
            }
            let new_local_p1 = local_p2 - self.local_n1 * dist;

            if na::distance_squared(&pt.local_p1, &new_local_p1) > dist_sq_threshold {
                return false;
            }

            pt.dist = dist;
            pt.local_p1 = new_local_p1;
        }

        true
    }

    /// Transfers the user-data of `old_contacts` to the new contacts of
    /// `self`, matching contacts by feature ids.
    pub fn match_contacts(&mut self, old_contacts: &[TrackedContact<ContactData>]) {
        for contact in &mut self.points {
            for old_contact in old_contacts {
                if contact.fid1 == old_contact.fid1 && contact.fid2 == old_contact.fid2 {
                    // Transfer the tracked data.
                    contact.data = old_contact.data;
                }
            }
        }
    }

    /// Transfers the user-data of `old_contacts` to the new contacts of
    /// `self`, matching contacts by positions closer than `dist_threshold`.
    pub fn match_contacts_using_positions(
        &mut self,
        old_contacts: &[TrackedContact<ContactData>],
        dist_threshold: Real,
    ) {
        let sq_threshold = dist_threshold * dist_threshold;
        for contact in &mut self.points {
            for old_contact in old_contacts {
                if na::distance_squared(&contact.local_p1, &old_contact.local_p1) < sq_threshold
                    && na::distance_squared(&contact.local_p2, &old_contact.local_p2) < sq_threshold
                {
                    // Transfer the tracked data.
                    contact.data = old_contact.data;
                }
            }
        }
    }

    /// Returns the contact with the smallest signed distance, i.e., the
    /// deepest penetration.
    pub fn find_deepest_contact(&self) -> Option<&TrackedContact<ContactData>> {
        let mut deepest = self.points.first()?;

        for pt in &self.points {
            if pt.dist < deepest.dist {
                deepest = pt;
            }
        }

        Some(deepest)
    }
}
