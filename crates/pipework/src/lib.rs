#![warn(missing_docs)]

//! Solid geometry for pipe runs and the fittings between them.
//!
//! A [`Pipe`] sweeps a cross-section along a path. A [`Connector`] joins two
//! pipes with a bend or three with a tee, and decides how far each pipe end
//! must be cut back. [`Document`] holds both and replays those cut-backs as
//! rebuilds until everything agrees.
//!
//! # Example
//!
//! ```
//! use pipework::{BuildSettings, PathSpec, Pipe, PipeBuilder, ProfileSpec};
//!
//! let settings = BuildSettings::default();
//! let pipe = Pipe::new(
//!     PathSpec::Length(1000.0),
//!     ProfileSpec::Circle { diameter: 100.0, wall_thickness: 5.0 },
//! );
//! let geometry = PipeBuilder::new(&settings).build(&pipe).unwrap();
//! assert!(geometry.shape.volume() > 0.0);
//! ```

mod connector;
mod document;
mod error;
mod orient;
mod path;
mod pipe;
mod profile;
mod settings;

pub use connector::{
    BuildStage, Connector, ConnectorBuild, ConnectorBuilder, ConnectorType, OffsetUpdate, PipeEnd,
    CONNECTOR_IFC_TYPE,
};
pub use document::{
    BuildFailure, ConnectorEntry, ConnectorId, Document, PipeEntry, PipeId, RebuildRequest,
    RecomputeReport,
};
pub use error::{ConnectorError, DocumentError, ErrorKind, PipeError, SettingsError};
pub use orient::{orient, orientation, BASIS_CORRECTION_DEG};
pub use path::{
    end_point, end_tangent, initial_direction, resolve_path, trim_path, BaseCurve, PathSpec,
};
pub use pipe::{Pipe, PipeBuilder, PipeGeometry, PIPE_IFC_TYPE};
pub use profile::{resolve_profile, ExternalProfile, Profile, ProfileSpec};
pub use settings::BuildSettings;
