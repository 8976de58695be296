//! Wires: connected chains of edges.

use pipework_math::{Dir3, Point3, Tolerance, Transform, Vec3};

use crate::bbox::Aabb3;
use crate::edge::Edge;
use crate::KernelError;

/// Segment count used when a wire is sampled for measurements.
pub(crate) const MEASURE_SEGMENTS: u32 = 256;

/// A connected sequence of edges, open or closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    edges: Vec<Edge>,
}

impl Wire {
    /// Create a wire from edges.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The wire has no edges
    /// - Any edge is degenerate
    /// - Consecutive edges do not meet
    pub fn new(edges: Vec<Edge>) -> Result<Self, KernelError> {
        if edges.is_empty() {
            return Err(KernelError::EmptyWire);
        }
        for (i, edge) in edges.iter().enumerate() {
            if edge.is_degenerate() {
                return Err(KernelError::DegenerateEdge(i));
            }
        }
        let tol = Tolerance::DEFAULT;
        for (i, pair) in edges.windows(2).enumerate() {
            let gap = (pair[1].start() - pair[0].end()).norm();
            if gap > tol.linear {
                return Err(KernelError::Discontinuous { index: i + 1, gap });
            }
        }
        Ok(Self { edges })
    }

    /// A single straight edge.
    pub fn line(start: Point3, end: Point3) -> Result<Self, KernelError> {
        Self::new(vec![Edge::line(start, end)])
    }

    /// An open polyline through the given points.
    pub fn polyline(points: &[Point3]) -> Result<Self, KernelError> {
        if points.len() < 2 {
            return Err(KernelError::TooFewPoints(points.len()));
        }
        let edges = points
            .windows(2)
            .map(|w| Edge::line(w[0], w[1]))
            .collect();
        Self::new(edges)
    }

    /// A closed polygon through the given points.
    ///
    /// The closing edge back to the first point is added automatically.
    pub fn polygon(points: &[Point3]) -> Result<Self, KernelError> {
        if points.len() < 3 {
            return Err(KernelError::TooFewPoints(points.len()));
        }
        let n = points.len();
        let edges = (0..n)
            .map(|i| Edge::line(points[i], points[(i + 1) % n]))
            .collect();
        Self::new(edges)
    }

    /// A full circle in the plane with the given normal.
    pub fn circle(center: Point3, normal: Vec3, radius: f64) -> Result<Self, KernelError> {
        if normal.norm() < Tolerance::DEFAULT.linear {
            return Err(KernelError::ZeroNormal);
        }
        Self::new(vec![Edge::circle(center, normal, radius)])
    }

    /// An axis-aligned rectangle in the XY plane, centred on `center`.
    ///
    /// Edges run counter-clockwise seen from +Z.
    pub fn rectangle(center: Point3, width: f64, height: f64) -> Result<Self, KernelError> {
        let (hw, hh) = (width / 2.0, height / 2.0);
        Self::polygon(&[
            center + Vec3::new(-hw, -hh, 0.0),
            center + Vec3::new(hw, -hh, 0.0),
            center + Vec3::new(hw, hh, 0.0),
            center + Vec3::new(-hw, hh, 0.0),
        ])
    }

    /// The edges of this wire, in order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Consume the wire, returning its edges.
    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }

    /// Ordered vertices.
    ///
    /// For an open wire this includes both ends; a closed wire does not
    /// repeat its first vertex.
    pub fn vertices(&self) -> Vec<Point3> {
        let mut out: Vec<Point3> = self.edges.iter().map(Edge::start).collect();
        if !self.is_closed() {
            out.push(self.last_vertex());
        }
        out
    }

    /// Start of the first edge.
    pub fn first_vertex(&self) -> Point3 {
        self.edges[0].start()
    }

    /// End of the last edge.
    pub fn last_vertex(&self) -> Point3 {
        self.edges[self.edges.len() - 1].end()
    }

    /// Check if the wire ends where it starts.
    pub fn is_closed(&self) -> bool {
        Tolerance::DEFAULT.points_equal(&self.first_vertex(), &self.last_vertex())
    }

    /// Total length of all edges.
    pub fn length(&self) -> f64 {
        self.edges.iter().map(Edge::length).sum()
    }

    /// Sample the wire as points.
    ///
    /// A closed wire yields a ring without a repeated end point. An open wire
    /// includes its last vertex.
    pub fn tessellate(&self, arc_segments: u32) -> Vec<Point3> {
        let mut out: Vec<Point3> = self
            .edges
            .iter()
            .flat_map(|e| e.tessellate(arc_segments))
            .collect();
        if !self.is_closed() {
            out.push(self.last_vertex());
        }
        out
    }

    /// Unit normal of the plane the wire lies in (Newell's method).
    ///
    /// The normal follows the right-hand rule for closed wires. Returns `None`
    /// for wires that enclose no area, such as straight open chains.
    pub fn plane_normal(&self) -> Option<Dir3> {
        newell_normal(&self.tessellate(MEASURE_SEGMENTS))
    }

    /// Check whether every point of the wire lies in a single plane.
    pub fn is_planar(&self) -> bool {
        let pts = self.tessellate(MEASURE_SEGMENTS);
        let normal = match newell_normal(&pts) {
            Some(n) => n,
            None => match chain_normal(&pts) {
                Some(n) => n,
                // every point on one line
                None => return true,
            },
        };
        let tol = Tolerance::DEFAULT.linear * 10.0;
        let origin = pts[0];
        pts.iter()
            .all(|p| (p - origin).dot(normal.as_ref()).abs() < tol * (1.0 + (p - origin).norm()))
    }

    /// Length-weighted centre of the wire's edges.
    pub fn center_of_mass(&self) -> Point3 {
        let mut pts = self.tessellate(MEASURE_SEGMENTS);
        if self.is_closed() {
            pts.push(pts[0]);
        }
        let mut total = 0.0;
        let mut acc = Vec3::zeros();
        for w in pts.windows(2) {
            let len = (w[1] - w[0]).norm();
            acc += len * (w[0].coords + w[1].coords) / 2.0;
            total += len;
        }
        if total < Tolerance::DEFAULT.linear {
            return pts[0];
        }
        Point3::from(acc / total)
    }

    /// Axis-aligned bounds of the sampled wire.
    pub fn bounding_box(&self) -> Aabb3 {
        Aabb3::from_points(&self.tessellate(MEASURE_SEGMENTS))
    }

    /// The same wire traversed backwards.
    pub fn reversed(&self) -> Wire {
        Wire {
            edges: self.edges.iter().rev().map(Edge::reversed).collect(),
        }
    }

    /// Apply a rigid transform.
    pub fn transform(&self, t: &Transform) -> Wire {
        Wire {
            edges: self.edges.iter().map(|e| e.transform(t)).collect(),
        }
    }
}

/// Newell normal of a closed polygon; `None` when it encloses no area.
pub(crate) fn newell_normal(points: &[Point3]) -> Option<Dir3> {
    let n = points.len();
    if n < 3 {
        return None;
    }
    let mut normal = Vec3::zeros();
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    Dir3::try_new(normal, 1e-12)
}

/// Normal of the plane spanned by an open chain; `None` if all points are collinear.
fn chain_normal(points: &[Point3]) -> Option<Dir3> {
    let origin = points.first()?;
    let dir = points
        .iter()
        .map(|p| p - origin)
        .find(|v| v.norm() > Tolerance::DEFAULT.linear)?;
    points
        .iter()
        .map(|p| dir.cross(&(p - origin)))
        .find_map(|n| Dir3::try_new(n, 1e-9))
}
