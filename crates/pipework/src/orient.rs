//! Placing a cross-section at a point on a path, facing along it.

use pipework_math::{angle_between, Dir3, Point3, Transform, Vec3};

use crate::profile::Profile;

/// Extra turn about the tangent applied after the frame rotation, in
/// degrees.
///
/// With it, the profile's local Y (a rectangle's height) ends up vertical
/// on horizontal runs.
pub const BASIS_CORRECTION_DEG: f64 = 90.0;

/// Rotation taking a profile drawn in the XY plane to one facing along
/// `tangent`, pivoting about `point`.
///
/// The up reference is +Z, or +Y when the tangent lies within
/// `up_threshold` radians of ±Z. The frame keeps the tangent exact, then the
/// axis `up × tangent`, and completes itself right-handed.
pub fn orientation(point: &Point3, tangent: &Dir3, up_threshold: f64) -> Transform {
    let z = tangent.as_ref();
    let near_vertical = angle_between(z, &Vec3::z()) <= up_threshold
        || angle_between(z, &-Vec3::z()) <= up_threshold;
    let up = if near_vertical { Vec3::y() } else { Vec3::z() };

    let secondary = Dir3::new_normalize(up.cross(z));
    let primary = Dir3::new_normalize(secondary.cross(z));
    let frame = Transform::from_axes(&primary, &secondary, tangent);

    let correction = Transform::rotation_about_axis(tangent, BASIS_CORRECTION_DEG.to_radians());
    Transform::translation_by(&point.coords)
        .then(&correction)
        .then(&frame)
        .then(&Transform::translation_by(&-point.coords))
}

/// Move a profile's centroid onto `point` and turn it to face along
/// `tangent`.
pub fn orient(profile: &Profile, point: &Point3, tangent: &Dir3, up_threshold: f64) -> Profile {
    let delta = point - profile.centroid();
    let placed = profile.transform(&Transform::translation_by(&delta));
    placed.transform(&orientation(point, tangent, up_threshold))
}
