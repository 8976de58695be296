//! Closed polygon-mesh solids.

use pipework_math::{Point3, Tolerance, Transform, Vec3};

use crate::bbox::Aabb3;
use crate::csg::{self, Polygon};
use crate::triangulate::triangulate;
use crate::wire::newell_normal;
use crate::KernelError;

/// A closed solid bounded by planar polygons with outward winding.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Solid {
    polygons: Vec<Polygon>,
}

impl Solid {
    /// Wrap a list of outward-facing polygons.
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    /// The boundary polygons.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// True when the solid has no boundary.
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Enclosed volume, via the divergence theorem over fan triangles.
    pub fn volume(&self) -> f64 {
        let mut total = 0.0;
        for poly in &self.polygons {
            let v0 = poly.vertices[0].coords;
            for w in poly.vertices[1..].windows(2) {
                total += v0.dot(&w[0].coords.cross(&w[1].coords));
            }
        }
        total / 6.0
    }

    /// Axis-aligned bounds of all vertices.
    pub fn bounding_box(&self) -> Aabb3 {
        Aabb3::from_points(self.polygons.iter().flat_map(|p| p.vertices.iter()))
    }

    /// Apply a transform; mirrored transforms keep outward winding.
    pub fn transform(&self, t: &Transform) -> Solid {
        let mirrored = t.determinant() < 0.0;
        let polygons = self
            .polygons
            .iter()
            .filter_map(|p| {
                let mut vertices: Vec<Point3> =
                    p.vertices.iter().map(|v| t.apply_point(v)).collect();
                if mirrored {
                    vertices.reverse();
                }
                Polygon::new(vertices)
            })
            .collect();
        Solid { polygons }
    }

    /// Boolean union.
    pub fn union(&self, other: &Solid) -> Solid {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() || !self.bounding_box().overlaps(&other.bounding_box()) {
            let mut polygons = self.polygons.clone();
            polygons.extend(other.polygons.iter().cloned());
            return Solid { polygons };
        }
        Solid {
            polygons: csg::union(self.polygons.clone(), other.polygons.clone()),
        }
    }

    /// Boolean difference `self \ other`.
    pub fn difference(&self, other: &Solid) -> Solid {
        if self.is_empty()
            || other.is_empty()
            || !self.bounding_box().overlaps(&other.bounding_box())
        {
            return self.clone();
        }
        Solid {
            polygons: csg::difference(self.polygons.clone(), other.polygons.clone()),
        }
    }
}

/// How the last ring of a ring stack connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RingClosure {
    /// Close both ends with planar caps.
    Capped,
    /// Join the last ring back to the first, with no caps.
    Periodic,
}

/// Build a solid by skinning a stack of matching rings.
///
/// Every ring has the same vertex count and ring `k + 1` follows ring `k`
/// along the direction of travel.
pub(crate) fn solid_from_rings(
    rings: &[Vec<Point3>],
    closure: RingClosure,
) -> Result<Solid, KernelError> {
    if rings.len() < 2 {
        return Err(KernelError::TooFewPoints(rings.len()));
    }
    let n = rings[0].len();
    if n < 3 {
        return Err(KernelError::TooFewPoints(n));
    }
    if rings.iter().any(|r| r.len() != n) {
        return Err(KernelError::RingMismatch);
    }

    // wind each ring counter-clockwise about the direction of travel
    let normal = newell_normal(&rings[0]).ok_or(KernelError::DegenerateFace)?;
    let advance = centroid(&rings[1]) - centroid(&rings[0]);
    let rings: Vec<Vec<Point3>> = if normal.dot(&advance) < 0.0 {
        rings.iter().map(|r| r.iter().rev().copied().collect()).collect()
    } else {
        rings.to_vec()
    };

    let mut polygons = Vec::new();
    let steps = match closure {
        RingClosure::Capped => rings.len() - 1,
        RingClosure::Periodic => rings.len(),
    };
    for k in 0..steps {
        let a = &rings[k];
        let b = &rings[(k + 1) % rings.len()];
        for i in 0..n {
            let j = (i + 1) % n;
            polygons.extend(Polygon::new(vec![a[i], a[j], b[j]]));
            polygons.extend(Polygon::new(vec![a[i], b[j], b[i]]));
        }
    }

    if closure == RingClosure::Capped {
        let first = &rings[0];
        let last = &rings[rings.len() - 1];
        let first_normal = newell_normal(first).ok_or(KernelError::DegenerateFace)?;
        for [a, b, c] in triangulate(first, &first_normal) {
            polygons.extend(Polygon::new(vec![first[c], first[b], first[a]]));
        }
        let last_normal = newell_normal(last).ok_or(KernelError::DegenerateFace)?;
        for [a, b, c] in triangulate(last, &last_normal) {
            polygons.extend(Polygon::new(vec![last[a], last[b], last[c]]));
        }
    }

    if polygons.is_empty() {
        return Err(KernelError::DegenerateFace);
    }
    let solid = Solid { polygons };
    if solid.volume() < Tolerance::DEFAULT.linear {
        return Err(KernelError::DegenerateFace);
    }
    Ok(solid)
}

fn centroid(points: &[Point3]) -> Point3 {
    let sum = points.iter().fold(Vec3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / points.len() as f64)
}
