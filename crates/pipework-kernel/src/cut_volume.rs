//! Half-space cutting volumes derived from a planar face.

use pipework_math::Point3;

use crate::edge::plane_axes;
use crate::solid::{solid_from_rings, RingClosure, Solid};
use crate::{Face, KernelError};

/// The two half-space blocks on either side of a face plane.
#[derive(Debug, Clone)]
pub struct CutVolumes {
    /// Block on the side the face normal points to.
    pub volume: Solid,
    /// Block on the opposite side.
    pub complement: Solid,
}

/// Build blocks on both sides of `face`'s plane, each large enough to
/// swallow the part of `solid` on its side.
pub fn cut_volume(face: &Face, solid: &Solid) -> Result<CutVolumes, KernelError> {
    let bb = solid.bounding_box();
    if bb.is_empty() {
        return Err(KernelError::EmptySolid);
    }
    let normal = face.normal();
    let origin = face.outer_wire().first_vertex();
    let center = bb.center();
    let along = (center - origin).dot(normal.as_ref());
    let foot = center - normal.as_ref() * along;
    let extent = bb.diagonal() * 2.0 + along.abs() + (foot - origin).norm() + 1.0;

    let (u, v) = plane_axes(normal.as_ref());
    let (u, v) = (u.into_inner() * extent, v.into_inner() * extent);
    let base: Vec<Point3> = vec![foot - u - v, foot + u - v, foot + u + v, foot - u + v];
    let offset = normal.into_inner() * extent;

    let above: Vec<Point3> = base.iter().map(|p| p + offset).collect();
    let below: Vec<Point3> = base.iter().map(|p| p - offset).collect();
    Ok(CutVolumes {
        volume: solid_from_rings(&[base.clone(), above], RingClosure::Capped)?,
        complement: solid_from_rings(&[base, below], RingClosure::Capped)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{extrude, Wire};
    use pipework_math::Vec3;

    #[test]
    fn test_halves_of_a_bar() {
        // bar along Y from -1 to 1
        let bar = extrude(
            &Wire::polygon(&[
                Point3::new(-0.5, -1.0, -0.5),
                Point3::new(0.5, -1.0, -0.5),
                Point3::new(0.5, -1.0, 0.5),
                Point3::new(-0.5, -1.0, 0.5),
            ])
            .unwrap(),
            Vec3::new(0.0, 2.0, 0.0),
            32,
        )
        .unwrap();
        assert!((bar.volume() - 2.0).abs() < 1e-9);

        // plane y = 0 with normal +Y
        let face = Face::from_wire(
            Wire::polygon(&[
                Point3::origin(),
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(1.0, 0.0, 0.0),
            ])
            .unwrap(),
        )
        .unwrap();
        assert!((face.normal().as_ref() - Vec3::y()).norm() < 1e-12);

        let cut = cut_volume(&face, &bar).unwrap();
        let kept = bar.difference(&cut.volume);
        assert!((kept.volume() - 1.0).abs() < 1e-6, "volume {}", kept.volume());
        assert!(kept.bounding_box().max.y.abs() < 1e-9);

        let other = bar.difference(&cut.complement);
        assert!(other.bounding_box().min.y.abs() < 1e-9);
    }
}
