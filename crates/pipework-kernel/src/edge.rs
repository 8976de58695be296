//! Edge types: the curved and straight pieces wires are made of.

use std::f64::consts::PI;

use pipework_math::{Dir3, Point3, Tolerance, Transform, Vec3};

/// A single edge of a wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Edge {
    /// A straight segment from start to end.
    Line {
        /// Start point.
        start: Point3,
        /// End point.
        end: Point3,
    },
    /// A circular arc `center + radius * (cos θ · x_dir + sin θ · y_dir)`
    /// for θ running from `start_angle` up to `end_angle`.
    Arc {
        /// Center of the arc.
        center: Point3,
        /// Local X axis of the arc plane (θ = 0).
        x_dir: Dir3,
        /// Local Y axis of the arc plane (θ = π/2).
        y_dir: Dir3,
        /// Radius of the arc.
        radius: f64,
        /// Start parameter in radians.
        start_angle: f64,
        /// End parameter in radians; always greater than `start_angle`.
        end_angle: f64,
    },
}

impl Edge {
    /// Create a line segment.
    pub fn line(start: Point3, end: Point3) -> Self {
        Edge::Line { start, end }
    }

    /// Create an arc lying in the plane with the given normal.
    ///
    /// The arc runs counter-clockwise when viewed from the +normal side.
    pub fn arc(
        center: Point3,
        normal: Vec3,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Self {
        let (x_dir, y_dir) = plane_axes(&normal);
        Edge::Arc {
            center,
            x_dir,
            y_dir,
            radius,
            start_angle,
            end_angle,
        }
    }

    /// Create a full circle as a single closed edge.
    pub fn circle(center: Point3, normal: Vec3, radius: f64) -> Self {
        Self::arc(center, normal, radius, 0.0, 2.0 * PI)
    }

    /// Get the start point of this edge.
    pub fn start(&self) -> Point3 {
        match self {
            Edge::Line { start, .. } => *start,
            Edge::Arc { start_angle, .. } => self.arc_point(*start_angle),
        }
    }

    /// Get the end point of this edge.
    pub fn end(&self) -> Point3 {
        match self {
            Edge::Line { end, .. } => *end,
            Edge::Arc { end_angle, .. } => self.arc_point(*end_angle),
        }
    }

    /// Get the length of this edge.
    pub fn length(&self) -> f64 {
        match self {
            Edge::Line { start, end } => (end - start).norm(),
            Edge::Arc {
                radius,
                start_angle,
                end_angle,
                ..
            } => radius * (end_angle - start_angle),
        }
    }

    /// Check if this edge is degenerate (zero length).
    pub fn is_degenerate(&self) -> bool {
        let tol = Tolerance::DEFAULT;
        match self {
            Edge::Line { start, end } => (end - start).norm() < tol.linear,
            Edge::Arc {
                radius,
                start_angle,
                end_angle,
                ..
            } => *radius < tol.linear || (end_angle - start_angle) * radius < tol.linear,
        }
    }

    /// Unit tangent at the start of the edge, in the direction of travel.
    pub fn start_tangent(&self) -> Option<Dir3> {
        let v = match self {
            Edge::Line { start, end } => end - start,
            Edge::Arc {
                x_dir,
                y_dir,
                start_angle,
                ..
            } => {
                let (s, c) = start_angle.sin_cos();
                -s * x_dir.as_ref() + c * y_dir.as_ref()
            }
        };
        Dir3::try_new(v, 1e-12)
    }

    /// Sample the edge as a polyline.
    ///
    /// Returns the start point and interior samples, but not the end point,
    /// so consecutive edges can be concatenated without duplicates.
    /// `arc_segments` is the segment count for a full circle.
    pub fn tessellate(&self, arc_segments: u32) -> Vec<Point3> {
        match self {
            Edge::Line { start, .. } => vec![*start],
            Edge::Arc {
                start_angle,
                end_angle,
                ..
            } => {
                let sweep = end_angle - start_angle;
                let n = ((arc_segments.max(3) as f64) * sweep / (2.0 * PI))
                    .ceil()
                    .max(1.0) as usize;
                (0..n)
                    .map(|i| self.arc_point(start_angle + sweep * i as f64 / n as f64))
                    .collect()
            }
        }
    }

    /// Return the same edge traversed in the opposite direction.
    pub fn reversed(&self) -> Edge {
        match self {
            Edge::Line { start, end } => Edge::Line {
                start: *end,
                end: *start,
            },
            Edge::Arc {
                center,
                x_dir,
                y_dir,
                radius,
                start_angle,
                end_angle,
            } => Edge::Arc {
                center: *center,
                x_dir: *x_dir,
                y_dir: -*y_dir,
                radius: *radius,
                start_angle: -end_angle,
                end_angle: -start_angle,
            },
        }
    }

    /// Apply a rigid transform.
    pub fn transform(&self, t: &Transform) -> Edge {
        match self {
            Edge::Line { start, end } => Edge::Line {
                start: t.apply_point(start),
                end: t.apply_point(end),
            },
            Edge::Arc {
                center,
                x_dir,
                y_dir,
                radius,
                start_angle,
                end_angle,
            } => Edge::Arc {
                center: t.apply_point(center),
                x_dir: t.apply_dir(x_dir),
                y_dir: t.apply_dir(y_dir),
                radius: *radius,
                start_angle: *start_angle,
                end_angle: *end_angle,
            },
        }
    }

    fn arc_point(&self, theta: f64) -> Point3 {
        match self {
            Edge::Line { start, .. } => *start,
            Edge::Arc {
                center,
                x_dir,
                y_dir,
                radius,
                ..
            } => {
                let (s, c) = theta.sin_cos();
                center + *radius * (c * x_dir.as_ref() + s * y_dir.as_ref())
            }
        }
    }
}

/// Pick two in-plane axes `(x, y)` for a plane with the given normal,
/// such that `x × y` points along the normal.
pub fn plane_axes(normal: &Vec3) -> (Dir3, Dir3) {
    let n = Dir3::new_normalize(*normal);
    let arbitrary = if n.as_ref().x.abs() < 0.9 {
        Vec3::x()
    } else {
        Vec3::y()
    };
    let y_dir = Dir3::new_normalize(n.as_ref().cross(&arbitrary));
    let x_dir = Dir3::new_normalize(y_dir.as_ref().cross(n.as_ref()));
    (x_dir, y_dir)
}
