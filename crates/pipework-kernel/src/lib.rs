#![warn(missing_docs)]

//! Reference geometry kernel for pipework.
//!
//! Profiles are kept analytic (line and arc edges, planar faces with holes)
//! so areas and centroids are exact. Solids are closed planar-polygon
//! meshes combined with BSP-tree booleans.
//!
//! # Example
//!
//! ```
//! use pipework_kernel::{sweep, SweepOptions, Wire};
//! use pipework_math::{Point3, Vec3};
//!
//! let profile = Wire::rectangle(Point3::origin(), 2.0, 2.0).unwrap();
//! let path = Wire::line(Point3::origin(), Point3::new(0.0, 0.0, 10.0)).unwrap();
//! let solid = sweep(&profile, &path, &SweepOptions::default()).unwrap();
//! assert!((solid.volume() - 40.0).abs() < 1e-9);
//! ```

mod bbox;
mod csg;
mod cut_volume;
mod edge;
mod extrude;
mod face;
mod revolve;
mod shape;
mod solid;
mod sweep;
mod triangulate;
mod wire;

pub use bbox::Aabb3;
pub use csg::{Plane, Polygon};
pub use cut_volume::{cut_volume, CutVolumes};
pub use edge::{plane_axes, Edge};
pub use extrude::extrude;
pub use face::Face;
pub use revolve::revolve;
pub use shape::Shape;
pub use solid::Solid;
pub use sweep::{sweep, SweepOptions};
pub use wire::Wire;

use thiserror::Error;

/// Errors from kernel operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    /// A wire was built with no edges.
    #[error("wire has no edges")]
    EmptyWire,

    /// An edge is degenerate (zero length).
    #[error("degenerate edge at index {0}")]
    DegenerateEdge(usize),

    /// Consecutive edges do not meet.
    #[error("edge {index} does not start where the previous one ends: gap of {gap:.6} mm")]
    Discontinuous {
        /// Index of the edge that fails to connect.
        index: usize,
        /// Distance between the two endpoints.
        gap: f64,
    },

    /// Not enough points to build the requested geometry.
    #[error("too few points: {0}")]
    TooFewPoints(usize),

    /// A plane normal has zero length.
    #[error("plane normal is zero")]
    ZeroNormal,

    /// The wire is not closed (gap between last and first vertex).
    #[error("wire is not closed: gap of {0:.6} mm")]
    NotClosed(f64),

    /// The wire does not lie in a single plane.
    #[error("wire is not planar")]
    NotPlanar,

    /// The face or solid encloses no area or volume.
    #[error("degenerate face: no enclosed area")]
    DegenerateFace,

    /// Two faces that must share a plane do not.
    #[error("faces are not coplanar")]
    NotCoplanar,

    /// A cutting face is not strictly inside the face being cut.
    #[error("cutting face is not contained in the target face")]
    FaceNotContained,

    /// The cutting face has holes of its own.
    #[error("cutting with a face that has holes is not supported")]
    UnsupportedCut,

    /// Rings of a skinned solid have different vertex counts.
    #[error("rings have mismatched vertex counts")]
    RingMismatch,

    /// Extrusion direction has zero length.
    #[error("extrusion direction is zero")]
    ZeroExtrusion,

    /// Revolution axis has zero length.
    #[error("revolution axis is zero")]
    ZeroAxis,

    /// Revolution angle is invalid (must be in (0, 360] degrees).
    #[error("invalid revolution angle: {0} degrees")]
    InvalidAngle(f64),

    /// Profile touches the revolution axis.
    #[error("profile intersects the revolution axis")]
    AxisIntersection,

    /// The sweep path has zero length.
    #[error("sweep path has zero length")]
    ZeroLengthPath,

    /// The sweep path turns back on itself at the given vertex.
    #[error("sweep path reverses direction at vertex {0}")]
    PathReversal(usize),

    /// An operation needed a non-empty solid.
    #[error("solid is empty")]
    EmptySolid,
}

/// Result type for kernel operations.
pub type Result<T> = std::result::Result<T, KernelError>;
