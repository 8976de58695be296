//! Planar faces bounded by an outer wire, with optional holes.

use pipework_math::{Dir3, Point2, Point3, Tolerance, Transform, Vec2, Vec3};

use crate::bbox::Aabb3;
use crate::edge::{plane_axes, Edge};
use crate::wire::{Wire, MEASURE_SEGMENTS};
use crate::KernelError;

/// A planar face.
///
/// The outer wire runs counter-clockwise about `normal`; hole wires run
/// clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    outer: Wire,
    inners: Vec<Wire>,
    normal: Dir3,
}

impl Face {
    /// Make a face bounded by a closed planar wire.
    ///
    /// The face normal follows the wire's winding.
    pub fn from_wire(wire: Wire) -> Result<Self, KernelError> {
        if !wire.is_closed() {
            let gap = (wire.last_vertex() - wire.first_vertex()).norm();
            return Err(KernelError::NotClosed(gap));
        }
        if !wire.is_planar() {
            return Err(KernelError::NotPlanar);
        }
        let normal = wire.plane_normal().ok_or(KernelError::DegenerateFace)?;
        let face = Self {
            outer: wire,
            inners: Vec::new(),
            normal,
        };
        if face.area() < Tolerance::DEFAULT.linear {
            return Err(KernelError::DegenerateFace);
        }
        Ok(face)
    }

    /// Subtract a coplanar face lying inside this one, leaving a hole.
    ///
    /// # Errors
    ///
    /// - `NotCoplanar` if the tool lies in another plane
    /// - `FaceNotContained` if the tool crosses this face's boundary or an
    ///   existing hole
    /// - `UnsupportedCut` if the tool has holes of its own
    pub fn cut(&self, tool: &Face) -> Result<Face, KernelError> {
        if !tool.inners.is_empty() {
            return Err(KernelError::UnsupportedCut);
        }
        let tol = Tolerance::DEFAULT.linear * 10.0;
        let parallel = self.normal.dot(tool.normal.as_ref()).abs() > 1.0 - 1e-9;
        let offset =
            (tool.outer.first_vertex() - self.outer.first_vertex()).dot(self.normal.as_ref());
        if !parallel || offset.abs() > tol {
            return Err(KernelError::NotCoplanar);
        }

        let frame = PlaneFrame::new(self.outer.first_vertex(), &self.normal);
        let outer = frame.project_all(&self.outer.tessellate(MEASURE_SEGMENTS));
        let holes: Vec<Vec<Point2>> = self
            .inners
            .iter()
            .map(|w| frame.project_all(&w.tessellate(MEASURE_SEGMENTS)))
            .collect();
        let tool_pts = frame.project_all(&tool.outer.tessellate(MEASURE_SEGMENTS));
        let contained = tool_pts.iter().all(|p| {
            point_in_polygon(p, &outer) && !holes.iter().any(|h| point_in_polygon(p, h))
        });
        if !contained {
            return Err(KernelError::FaceNotContained);
        }

        let hole = if tool.normal.dot(self.normal.as_ref()) > 0.0 {
            tool.outer.reversed()
        } else {
            tool.outer.clone()
        };
        let mut inners = self.inners.clone();
        inners.push(hole);
        Ok(Face {
            outer: self.outer.clone(),
            inners,
            normal: self.normal,
        })
    }

    /// The outer boundary.
    pub fn outer_wire(&self) -> &Wire {
        &self.outer
    }

    /// Hole boundaries.
    pub fn inner_wires(&self) -> &[Wire] {
        &self.inners
    }

    /// Unit normal of the face plane.
    pub fn normal(&self) -> Dir3 {
        self.normal
    }

    /// Exact area enclosed by the outer wire minus the holes.
    pub fn area(&self) -> f64 {
        let frame = PlaneFrame::new(self.outer.first_vertex(), &self.normal);
        let outer = frame.signed_area(&self.outer).abs();
        let holes: f64 = self
            .inners
            .iter()
            .map(|w| frame.signed_area(w).abs())
            .sum();
        outer - holes
    }

    /// Area centroid of the face, or `None` when the face has no area.
    pub fn center_of_mass(&self) -> Option<Point3> {
        let frame = PlaneFrame::new(self.outer.first_vertex(), &self.normal);
        let mut area = 0.0;
        let mut moment = Vec2::zeros();
        for (i, wire) in std::iter::once(&self.outer).chain(&self.inners).enumerate() {
            let pts = frame.project_all(&wire.tessellate(MEASURE_SEGMENTS));
            let (mut a, mut m) = polygon_moments(&pts);
            // outer counts positive, holes negative, whatever their winding
            if (a >= 0.0) != (i == 0) {
                a = -a;
                m = -m;
            }
            area += a;
            moment += m;
        }
        if area.abs() < Tolerance::DEFAULT.linear {
            return None;
        }
        let c = moment / area;
        Some(frame.unproject(&Point2::new(c.x, c.y)))
    }

    /// Axis-aligned bounds of the outer wire.
    pub fn bounding_box(&self) -> Aabb3 {
        self.outer.bounding_box()
    }

    /// The same face with the opposite normal.
    pub fn reversed(&self) -> Face {
        Face {
            outer: self.outer.reversed(),
            inners: self.inners.iter().map(Wire::reversed).collect(),
            normal: -self.normal,
        }
    }

    /// Apply a rigid transform.
    pub fn transform(&self, t: &Transform) -> Face {
        let outer = self.outer.transform(t);
        let normal = outer
            .plane_normal()
            .unwrap_or_else(|| t.apply_dir(&self.normal));
        Face {
            outer,
            inners: self.inners.iter().map(|w| w.transform(t)).collect(),
            normal,
        }
    }
}

/// A 2D coordinate frame on a plane.
pub(crate) struct PlaneFrame {
    origin: Point3,
    u: Vec3,
    v: Vec3,
}

impl PlaneFrame {
    pub(crate) fn new(origin: Point3, normal: &Dir3) -> Self {
        let (u, v) = plane_axes(normal.as_ref());
        Self {
            origin,
            u: u.into_inner(),
            v: v.into_inner(),
        }
    }

    pub(crate) fn project(&self, p: &Point3) -> Point2 {
        let d = p - self.origin;
        Point2::new(d.dot(&self.u), d.dot(&self.v))
    }

    fn project_all(&self, pts: &[Point3]) -> Vec<Point2> {
        pts.iter().map(|p| self.project(p)).collect()
    }

    fn unproject(&self, p: &Point2) -> Point3 {
        self.origin + p.x * self.u + p.y * self.v
    }

    /// Signed area of a closed wire, positive for counter-clockwise winding.
    ///
    /// Line edges use the shoelace term; arcs integrate exactly.
    fn signed_area(&self, wire: &Wire) -> f64 {
        let twice: f64 = wire
            .edges()
            .iter()
            .map(|edge| match edge {
                Edge::Line { start, end } => {
                    cross2(&self.project(start).coords, &self.project(end).coords)
                }
                Edge::Arc {
                    center,
                    x_dir,
                    y_dir,
                    radius,
                    start_angle,
                    end_angle,
                } => {
                    let c = self.project(center).coords;
                    let a = Vec2::new(x_dir.dot(&self.u), x_dir.dot(&self.v));
                    let b = Vec2::new(y_dir.dot(&self.u), y_dir.dot(&self.v));
                    let chord = self.project(&edge.end()) - self.project(&edge.start());
                    let sector = radius * radius * cross2(&a, &b) * (end_angle - start_angle);
                    cross2(&c, &chord) + sector
                }
            })
            .sum();
        twice / 2.0
    }
}

fn cross2(a: &Vec2, b: &Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Signed area and first moment of a closed polygon.
fn polygon_moments(pts: &[Point2]) -> (f64, Vec2) {
    let n = pts.len();
    let mut area = 0.0;
    let mut moment = Vec2::zeros();
    for i in 0..n {
        let p = pts[i].coords;
        let q = pts[(i + 1) % n].coords;
        let c = cross2(&p, &q);
        area += c;
        moment += (p + q) * c;
    }
    (area / 2.0, moment / 6.0)
}

/// Even-odd ray cast; points on the boundary may land either side.
pub(crate) fn point_in_polygon(p: &Point2, poly: &[Point2]) -> bool {
    let n = poly.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (poly[i], poly[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
