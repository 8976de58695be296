//! Error types for pipe and connector builds.

use pipework_kernel::KernelError;
use thiserror::Error;

use crate::connector::{BuildStage, OffsetUpdate, PipeEnd};
use crate::document::{ConnectorId, PipeId};

/// How a failed build should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Inputs are incomplete; nothing to build yet. Not reported to the user.
    Skipped,
    /// The user's inputs are invalid.
    UserInput,
    /// The inputs are valid but describe an impossible arrangement.
    Geometric,
    /// The geometry kernel failed.
    Kernel,
}

/// Errors from building a single pipe.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipeError {
    /// The base curve has no wires.
    #[error("the base object has no wires")]
    NoBase,

    /// The base curve must be exactly one wire.
    #[error("too many wires in the base shape: expected 1, found {0}")]
    BadWireCount(usize),

    /// The base wire closes on itself.
    #[error("the base wire is closed")]
    ClosedWire,

    /// No base curve and no length.
    #[error("pipe length is zero")]
    ZeroLength,

    /// The path has fewer than two vertices.
    #[error("the base path needs at least 2 vertices, found {0}")]
    TooFewVertices(usize),

    /// An end offset is negative.
    #[error("offset at {end:?} is negative: {offset}")]
    NegativeOffset {
        /// Which end.
        end: PipeEnd,
        /// The rejected value.
        offset: f64,
    },

    /// An end offset would consume the whole end edge.
    #[error("offset {offset} at {end:?} does not fit on an edge of length {available:.6}")]
    OffsetTooLarge {
        /// Which end.
        end: PipeEnd,
        /// The rejected value.
        offset: f64,
        /// Length of the edge being trimmed.
        available: f64,
    },

    /// The path starts with a zero-length direction.
    #[error("the path has no initial direction")]
    ZeroTangent,

    /// The profile outline is not a flat 2D shape.
    #[error("the profile is not a 2D shape")]
    NotA2dProfile,

    /// The profile outline is open.
    #[error("the profile is not closed")]
    ProfileNotClosed,

    /// A required profile dimension is zero.
    #[error("a required profile dimension is zero")]
    ZeroDimension,

    /// The kernel could not build the profile face.
    #[error("unable to build the profile: {0}")]
    Profile(#[source] KernelError),

    /// The kernel could not sweep the profile.
    #[error("unable to build the pipe: {0}")]
    Sweep(#[source] KernelError),
}

impl PipeError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipeError::ZeroLength | PipeError::ZeroDimension => ErrorKind::Skipped,
            PipeError::NoBase
            | PipeError::BadWireCount(_)
            | PipeError::ClosedWire
            | PipeError::TooFewVertices(_)
            | PipeError::NegativeOffset { .. }
            | PipeError::OffsetTooLarge { .. }
            | PipeError::NotA2dProfile
            | PipeError::ProfileNotClosed => ErrorKind::UserInput,
            PipeError::ZeroTangent => ErrorKind::Geometric,
            PipeError::Profile(_) | PipeError::Sweep(_) => ErrorKind::Kernel,
        }
    }
}

/// Errors from building a connector.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConnectorError {
    /// Fewer than two pipes are attached.
    #[error("a connector needs at least 2 pipes, found {0}")]
    NotEnoughPipes(usize),

    /// The bend radius is zero.
    #[error("connector radius is zero")]
    ZeroRadius,

    /// A referenced pipe does not exist.
    #[error("connector references a missing pipe")]
    MissingPipe(PipeId),

    /// A participating pipe has no usable path.
    #[error("unable to resolve the path of a connected pipe: {source}")]
    Path {
        /// The pipe whose path failed.
        pipe: PipeId,
        /// Why.
        #[source]
        source: PipeError,
    },

    /// The first pipe has no usable profile.
    #[error("unable to resolve the connector profile: {0}")]
    Profile(#[source] PipeError),

    /// The pipes do not share an endpoint.
    #[error("common vertex not found")]
    CommonVertexNotFound,

    /// A pipe end has no direction away from the junction.
    #[error("pipe has no direction at the junction")]
    ZeroTangent(PipeId),

    /// Two pipes of a corner are collinear.
    #[error("pipes are already aligned")]
    AlreadyAligned,

    /// No two pipes of a tee are collinear.
    #[error("at least 2 pipes must align")]
    NoAlignedPair,

    /// More than one pair of a tee is collinear.
    #[error("more than one pair of pipes is aligned")]
    AmbiguousAlignment,

    /// Another connector already trims this pipe end.
    #[error("pipe end {end:?} is already joined by another connector")]
    EndClaimed {
        /// The contested pipe.
        pipe: PipeId,
        /// The contested end.
        end: PipeEnd,
        /// The connector holding the end.
        by: ConnectorId,
    },

    /// The kernel failed after the offsets were decided.
    ///
    /// The offsets still apply to the pipes.
    #[error("unable to build the connector geometry: {source}")]
    Geometry {
        /// Pipe ends joined by this connector.
        joints: Vec<(PipeId, PipeEnd)>,
        /// Offset changes decided before the failure.
        offsets: Vec<OffsetUpdate>,
        /// Kernel failure.
        #[source]
        source: KernelError,
    },
}

impl ConnectorError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConnectorError::NotEnoughPipes(_) | ConnectorError::ZeroRadius => ErrorKind::Skipped,
            ConnectorError::MissingPipe(_) => ErrorKind::UserInput,
            ConnectorError::Path { source, .. } | ConnectorError::Profile(source) => source.kind(),
            ConnectorError::CommonVertexNotFound
            | ConnectorError::ZeroTangent(_)
            | ConnectorError::AlreadyAligned
            | ConnectorError::NoAlignedPair
            | ConnectorError::AmbiguousAlignment
            | ConnectorError::EndClaimed { .. } => ErrorKind::Geometric,
            ConnectorError::Geometry { .. } => ErrorKind::Kernel,
        }
    }

    /// The last stage the build completed before failing.
    pub fn stage(&self) -> BuildStage {
        match self {
            ConnectorError::NotEnoughPipes(_)
            | ConnectorError::ZeroRadius
            | ConnectorError::MissingPipe(_)
            | ConnectorError::Path { .. } => BuildStage::Init,
            ConnectorError::CommonVertexNotFound | ConnectorError::ZeroTangent(_) => {
                BuildStage::PathResolved
            }
            ConnectorError::Profile(_)
            | ConnectorError::AlreadyAligned
            | ConnectorError::NoAlignedPair
            | ConnectorError::AmbiguousAlignment
            | ConnectorError::EndClaimed { .. } => BuildStage::JunctionFound,
            ConnectorError::Geometry { .. } => BuildStage::OffsetsApplied,
        }
    }
}

/// Errors from document edits and recomputes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DocumentError {
    /// No pipe with this id.
    #[error("unknown pipe")]
    UnknownPipe(PipeId),

    /// No connector with this id.
    #[error("unknown connector")]
    UnknownConnector(ConnectorId),

    /// Offsets must be zero or positive.
    #[error("offset must not be negative: {0}")]
    NegativeOffset(f64),

    /// A recompute processed more requests than allowed.
    #[error("rebuild cascade exceeded {limit} requests")]
    CascadeLimit {
        /// The configured cap.
        limit: usize,
    },
}

/// Errors from loading build settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The TOML text could not be parsed.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// A tolerance is zero or negative.
    #[error("{field} must be positive, got {value}")]
    NonPositive {
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Arcs need at least three segments.
    #[error("arc_segments must be at least 3, got {0}")]
    TooFewArcSegments(u32),

    /// The cascade cap must allow at least one request.
    #[error("max_cascade must be at least 1")]
    ZeroCascade,
}
