//! Extrude operation: create a solid by sweeping a profile along a direction.

use pipework_math::{Point3, Vec3};

use crate::solid::{solid_from_rings, RingClosure, Solid};
use crate::{KernelError, Wire};

/// Extrude a closed wire along a direction to create a solid.
///
/// # Arguments
///
/// * `profile` - The closed wire to extrude
/// * `direction` - The extrusion direction vector (magnitude = distance)
/// * `arc_segments` - Segments per full circle when sampling arcs
///
/// # Errors
///
/// Returns an error if the direction vector is zero, the wire is open, or
/// the direction lies in the profile plane.
///
/// # Example
///
/// ```
/// use pipework_kernel::{extrude, Wire};
/// use pipework_math::{Point3, Vec3};
///
/// let profile = Wire::rectangle(Point3::origin(), 10.0, 5.0).unwrap();
/// let solid = extrude(&profile, Vec3::new(0.0, 0.0, 20.0), 32).unwrap();
/// assert!((solid.volume() - 1000.0).abs() < 1e-6);
/// ```
pub fn extrude(profile: &Wire, direction: Vec3, arc_segments: u32) -> Result<Solid, KernelError> {
    if direction.norm() < 1e-12 {
        return Err(KernelError::ZeroExtrusion);
    }
    if !profile.is_closed() {
        let gap = (profile.last_vertex() - profile.first_vertex()).norm();
        return Err(KernelError::NotClosed(gap));
    }
    let bottom = profile.tessellate(arc_segments);
    let top: Vec<Point3> = bottom.iter().map(|p| p + direction).collect();
    solid_from_rings(&[bottom, top], RingClosure::Capped)
}
