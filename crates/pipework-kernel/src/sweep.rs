//! Sweep operation: create a solid by moving a profile along a path.
//!
//! The profile keeps the orientation it was placed with; at each path
//! vertex the section is carried onto the plane bisecting the incoming and
//! outgoing directions, giving mitred ("right corner") joints.

use pipework_math::{Point3, Tolerance, Vec3};
use tracing::debug;

use crate::solid::{solid_from_rings, RingClosure, Solid};
use crate::{KernelError, Wire};

/// Options for the sweep operation.
#[derive(Debug, Clone)]
pub struct SweepOptions {
    /// Number of line segments per full circle when sampling arcs, in both
    /// the profile and the path. Default: 32.
    pub arc_segments: u32,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self { arc_segments: 32 }
    }
}

/// Sweep a closed profile along a path wire to create a solid.
///
/// The profile should already sit at the start of the path; it is not
/// re-oriented.
///
/// # Errors
///
/// - `NotClosed` if the profile is open
/// - `ZeroLengthPath` if the path has no extent
/// - `PathReversal` if the path doubles back on itself at a vertex
pub fn sweep(profile: &Wire, path: &Wire, options: &SweepOptions) -> Result<Solid, KernelError> {
    if !profile.is_closed() {
        let gap = (profile.last_vertex() - profile.first_vertex()).norm();
        return Err(KernelError::NotClosed(gap));
    }

    let tol = Tolerance::DEFAULT;
    let mut points = path.tessellate(options.arc_segments);
    if path.is_closed() {
        points.push(points[0]);
    }
    points.dedup_by(|b, a| (*b - *a).norm() < tol.linear);
    if points.len() < 2 {
        return Err(KernelError::ZeroLengthPath);
    }
    let dirs: Vec<Vec3> = points.windows(2).map(|w| (w[1] - w[0]).normalize()).collect();
    debug!(
        path_points = points.len(),
        profile_points = profile.tessellate(options.arc_segments).len(),
        "sweeping profile"
    );

    let mut rings: Vec<Vec<Point3>> = Vec::with_capacity(points.len());
    rings.push(profile.tessellate(options.arc_segments));
    for i in 1..points.len() {
        let incoming = dirs[i - 1];
        let bisector = match dirs.get(i) {
            Some(outgoing) => incoming + outgoing,
            None => incoming,
        };
        if bisector.norm() < 1e-9 {
            return Err(KernelError::PathReversal(i));
        }
        let m = bisector.normalize();
        let denom = incoming.dot(&m);
        if denom.abs() < 1e-9 {
            return Err(KernelError::PathReversal(i));
        }
        let vertex = points[i];
        let next: Vec<Point3> = rings[i - 1]
            .iter()
            .map(|q| q + incoming * ((vertex - q).dot(&m) / denom))
            .collect();
        rings.push(next);
    }

    solid_from_rings(&rings, RingClosure::Capped)
}
