//! Straight and curved pipe segments.

use pipework_kernel::{sweep, Shape, SweepOptions, Wire};
use pipework_math::Transform;

use crate::connector::PipeEnd;
use crate::error::PipeError;
use crate::orient::orient;
use crate::path::{initial_direction, resolve_path, trim_path, PathSpec};
use crate::profile::{resolve_profile, Profile, ProfileSpec};
use crate::settings::BuildSettings;

/// Classification passed through to IFC export for pipes.
pub const PIPE_IFC_TYPE: &str = "Pipe Segment";

/// A pipe: a profile swept along a path, optionally shortened at each end.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pipe {
    /// Centre line.
    pub path: PathSpec,
    /// Cross-section.
    pub profile: ProfileSpec,
    /// Distance cut from the start of the path.
    pub offset_start: f64,
    /// Distance cut from the end of the path.
    pub offset_end: f64,
    /// Position of a straight-length pipe; pipes on a base curve are built
    /// where the curve lies and ignore it.
    pub placement: Transform,
}

impl Pipe {
    /// A pipe with no end offsets.
    pub fn new(path: PathSpec, profile: ProfileSpec) -> Self {
        Self {
            path,
            profile,
            offset_start: 0.0,
            offset_end: 0.0,
            placement: Transform::identity(),
        }
    }

    /// The same pipe moved to `placement`.
    pub fn with_placement(mut self, placement: Transform) -> Self {
        self.placement = placement;
        self
    }

    /// The offset stored for one end.
    pub fn offset(&self, end: PipeEnd) -> f64 {
        match end {
            PipeEnd::Start => self.offset_start,
            PipeEnd::End => self.offset_end,
        }
    }

    /// Mutable access to one end's offset.
    pub fn offset_mut(&mut self, end: PipeEnd) -> &mut f64 {
        match end {
            PipeEnd::Start => &mut self.offset_start,
            PipeEnd::End => &mut self.offset_end,
        }
    }
}

/// Output of a successful pipe build.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeGeometry {
    /// The swept solid, or a compound of several.
    pub shape: Shape,
    /// Length of the trimmed path; only set for pipes on a base curve.
    pub length: Option<f64>,
}

/// Builds pipe solids.
#[derive(Debug, Clone, Copy)]
pub struct PipeBuilder<'a> {
    settings: &'a BuildSettings,
}

impl<'a> PipeBuilder<'a> {
    /// Create a builder using these settings.
    pub fn new(settings: &'a BuildSettings) -> Self {
        Self { settings }
    }

    /// The untrimmed centre line of a pipe, without its placement.
    pub fn get_path(&self, pipe: &Pipe) -> Result<Wire, PipeError> {
        resolve_path(&pipe.path)
    }

    /// The pipe's cross-section, centred on the origin in the XY plane
    /// for built-in shapes.
    pub fn get_profile(&self, pipe: &Pipe) -> Result<Profile, PipeError> {
        resolve_profile(&pipe.profile)
    }

    /// Build the pipe solid.
    ///
    /// # Example
    ///
    /// ```
    /// use pipework::{BuildSettings, PathSpec, Pipe, PipeBuilder, ProfileSpec};
    ///
    /// let settings = BuildSettings::default();
    /// let pipe = Pipe::new(PathSpec::Length(100.0), ProfileSpec::circle(20.0));
    /// let geometry = PipeBuilder::new(&settings).build(&pipe).unwrap();
    /// let bb = geometry.shape.bounding_box();
    /// assert!((bb.size().z - 100.0).abs() < 1e-9);
    /// assert!(geometry.length.is_none());
    /// ```
    pub fn build(&self, pipe: &Pipe) -> Result<PipeGeometry, PipeError> {
        let path = self.get_path(pipe)?;
        let path = trim_path(&path, pipe.offset_start, pipe.offset_end)?;
        let profile = self.get_profile(pipe)?;

        let start = path.first_vertex();
        let tangent = initial_direction(&pipe.path, &path).ok_or(PipeError::ZeroTangent)?;
        let placed = orient(
            &profile,
            &start,
            &tangent,
            self.settings.up_vector_threshold,
        );

        let options = SweepOptions {
            arc_segments: self.settings.arc_segments,
        };
        let mut solid = sweep(placed.outer_wire(), &path, &options).map_err(PipeError::Sweep)?;
        for inner in placed.inner_wires() {
            let bore = sweep(inner, &path, &options).map_err(PipeError::Sweep)?;
            solid = solid.difference(&bore);
        }
        tracing::debug!(
            hollow = placed.is_hollow(),
            path_length = path.length(),
            "built pipe"
        );

        let shape = Shape::from_solids(vec![solid]);
        let (shape, length) = match pipe.path {
            PathSpec::Base(_) => (shape, Some(path.length())),
            PathSpec::Length(_) => (shape.transform(&pipe.placement), None),
        };
        Ok(PipeGeometry { shape, length })
    }
}
