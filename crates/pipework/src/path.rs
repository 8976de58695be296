//! Pipe paths: resolving the centre-line wire, trimming its ends and
//! reading directions off it.

use pipework_kernel::{Edge, Wire};
use pipework_math::{Dir3, Point3};

use crate::connector::PipeEnd;
use crate::error::PipeError;

/// Where a pipe's centre line comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSpec {
    /// An external curve.
    Base(BaseCurve),
    /// A straight run of this length up the Z axis from the origin.
    Length(f64),
}

impl Default for PathSpec {
    fn default() -> Self {
        PathSpec::Length(0.0)
    }
}

/// An external curve used as a pipe path.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseCurve {
    /// Wires of the external shape; a usable base has exactly one.
    pub wires: Vec<Wire>,
    /// Control points in world coordinates when the curve is a Bezier.
    pub bezier_poles: Option<Vec<Point3>>,
}

impl BaseCurve {
    /// A base made of one wire.
    pub fn from_wire(wire: Wire) -> Self {
        Self {
            wires: vec![wire],
            bezier_poles: None,
        }
    }

    /// A base made of several wires.
    pub fn from_wires(wires: Vec<Wire>) -> Self {
        Self {
            wires,
            bezier_poles: None,
        }
    }

    /// A Bezier base: its sampled wire plus its control points.
    pub fn bezier(wire: Wire, poles: Vec<Point3>) -> Self {
        Self {
            wires: vec![wire],
            bezier_poles: Some(poles),
        }
    }
}

/// Resolve a path spec to a single open wire, before any trimming.
pub fn resolve_path(spec: &PathSpec) -> Result<Wire, PipeError> {
    let wire = match spec {
        PathSpec::Base(base) => {
            let wire = match base.wires.as_slice() {
                [] => return Err(PipeError::NoBase),
                [wire] => wire.clone(),
                wires => return Err(PipeError::BadWireCount(wires.len())),
            };
            if wire.is_closed() {
                return Err(PipeError::ClosedWire);
            }
            wire
        }
        PathSpec::Length(length) => {
            if *length <= 0.0 {
                return Err(PipeError::ZeroLength);
            }
            Wire::line(Point3::origin(), Point3::new(0.0, 0.0, *length))
                .map_err(|_| PipeError::ZeroLength)?
        }
    };
    let count = wire.vertices().len();
    if count < 2 {
        return Err(PipeError::TooFewVertices(count));
    }
    Ok(wire)
}

/// Shorten a path at both ends.
///
/// A non-zero offset replaces the end edge with a straight line along the
/// edge's chord, moved inward by the offset. The far vertex of that edge
/// stays fixed.
pub fn trim_path(wire: &Wire, offset_start: f64, offset_end: f64) -> Result<Wire, PipeError> {
    let mut edges = wire.edges().to_vec();
    if offset_start != 0.0 {
        let first = &edges[0];
        let line = trimmed_line(first.start(), first.end(), offset_start, PipeEnd::Start)?;
        edges[0] = line;
    }
    if offset_end != 0.0 {
        let last_index = edges.len() - 1;
        let last = &edges[last_index];
        let line = trimmed_line(last.end(), last.start(), offset_end, PipeEnd::End)?;
        edges[last_index] = line.reversed();
    }
    Wire::new(edges).map_err(PipeError::Sweep)
}

/// Line from `moved + dir * offset` to `fixed`, where `dir` points from
/// `moved` towards `fixed`.
fn trimmed_line(
    moved: Point3,
    fixed: Point3,
    offset: f64,
    end: PipeEnd,
) -> Result<Edge, PipeError> {
    if offset < 0.0 {
        return Err(PipeError::NegativeOffset { end, offset });
    }
    let chord = fixed - moved;
    let available = chord.norm();
    if offset >= available {
        return Err(PipeError::OffsetTooLarge {
            end,
            offset,
            available,
        });
    }
    Ok(Edge::line(moved + chord / available * offset, fixed))
}

/// Direction the profile is oriented along at the start of the path.
///
/// For a Bezier base the direction runs from the first vertex to the
/// second control point, otherwise to the second vertex.
pub fn initial_direction(spec: &PathSpec, wire: &Wire) -> Option<Dir3> {
    let first = wire.first_vertex();
    if let PathSpec::Base(BaseCurve {
        bezier_poles: Some(poles),
        ..
    }) = spec
    {
        if let Some(dir) = poles.get(1).and_then(|p| Dir3::try_new(p - first, 1e-12)) {
            return Some(dir);
        }
    }
    let vertices = wire.vertices();
    Dir3::try_new(vertices.get(1)? - first, 1e-12)
}

/// The vertex at one end of a path.
pub fn end_point(wire: &Wire, end: PipeEnd) -> Point3 {
    match end {
        PipeEnd::Start => wire.first_vertex(),
        PipeEnd::End => wire.last_vertex(),
    }
}

/// Unit direction from an end vertex towards its neighbour.
pub fn end_tangent(wire: &Wire, end: PipeEnd) -> Option<Dir3> {
    let vertices = wire.vertices();
    let n = vertices.len();
    if n < 2 {
        return None;
    }
    let (from, to) = match end {
        PipeEnd::Start => (vertices[0], vertices[1]),
        PipeEnd::End => (vertices[n - 1], vertices[n - 2]),
    };
    Dir3::try_new(to - from, 1e-12)
}
