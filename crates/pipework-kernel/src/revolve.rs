//! Revolve operation: create a solid by rotating a profile around an axis.

use pipework_math::{Dir3, Point3, Tolerance, Transform, Vec3};
use tracing::debug;

use crate::solid::{solid_from_rings, RingClosure, Solid};
use crate::{KernelError, Wire};

/// Revolve a closed wire around an axis.
///
/// # Arguments
///
/// * `profile` - The closed wire to revolve
/// * `axis_point` - A point on the axis of revolution
/// * `axis_dir` - Direction of the axis; rotation is right-handed about it
/// * `angle_deg` - Angle of revolution in degrees, in (0, 360]
/// * `arc_segments` - Angular steps for a full turn
///
/// # Errors
///
/// - `ZeroAxis` if the axis direction is zero
/// - `InvalidAngle` if the angle is outside (0, 360]
/// - `AxisIntersection` if the profile touches or crosses the axis
pub fn revolve(
    profile: &Wire,
    axis_point: Point3,
    axis_dir: Vec3,
    angle_deg: f64,
    arc_segments: u32,
) -> Result<Solid, KernelError> {
    if axis_dir.norm() < 1e-12 {
        return Err(KernelError::ZeroAxis);
    }
    let axis = Dir3::new_normalize(axis_dir);
    if angle_deg <= 0.0 || angle_deg > 360.0 + 1e-9 {
        return Err(KernelError::InvalidAngle(angle_deg));
    }
    if !profile.is_closed() {
        let gap = (profile.last_vertex() - profile.first_vertex()).norm();
        return Err(KernelError::NotClosed(gap));
    }

    let ring = profile.tessellate(arc_segments);
    let tol = Tolerance::DEFAULT;
    let radial = |p: &Point3| {
        let d = p - axis_point;
        d - axis.as_ref() * d.dot(axis.as_ref())
    };
    let centroid = ring.iter().fold(Vec3::zeros(), |acc, p| acc + p.coords) / ring.len() as f64;
    let outward = Dir3::try_new(radial(&Point3::from(centroid)), tol.linear)
        .ok_or(KernelError::AxisIntersection)?;
    if ring.iter().any(|p| radial(p).dot(outward.as_ref()) < tol.linear) {
        return Err(KernelError::AxisIntersection);
    }

    let is_full = (angle_deg - 360.0).abs() < 1e-9;
    let steps = ((arc_segments.max(3) as f64) * angle_deg / 360.0)
        .ceil()
        .max(1.0) as usize;
    let step = angle_deg.to_radians() / steps as f64;
    let count = if is_full { steps } else { steps + 1 };
    debug!(angle_deg, steps, "revolving profile");

    let rings: Vec<Vec<Point3>> = (0..count)
        .map(|k| {
            let t = Transform::rotation_about_point(&axis_point, &axis, step * k as f64);
            ring.iter().map(|p| t.apply_point(p)).collect()
        })
        .collect();
    let closure = if is_full {
        RingClosure::Periodic
    } else {
        RingClosure::Capped
    };
    solid_from_rings(&rings, closure)
}
