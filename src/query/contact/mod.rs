//! Single contact-point computation.

pub use self::contact::Contact;
pub use self::contact_ball_ball::contact_ball_ball;
pub use self::contact_support_map_support_map::{
    contact_support_map_support_map, contact_support_map_support_map_with_params,
};

use crate::math::{Isometry, Real};
use crate::shape::SupportMap;

mod contact;
mod contact_ball_ball;
mod contact_support_map_support_map;

/// Computes one pair of contact points between two support-mapped shapes.
///
/// Returns `None` if the shapes are separated by a distance larger than
/// `prediction`.
pub fn contact<G1: ?Sized, G2: ?Sized>(
    pos1: &Isometry<Real>,
    g1: &G1,
    pos2: &Isometry<Real>,
    g2: &G2,
    prediction: Real,
) -> Option<Contact>
where
    G1: SupportMap,
    G2: SupportMap,
{
    let pos12 = pos1.inv_mul(pos2);
    contact_support_map_support_map(&pos12, g1, g2, prediction)
        .map(|contact| contact.transform_by(pos1))
}
