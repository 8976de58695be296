//! Pipe cross-sections.

use pipework_kernel::{Face, Wire};
use pipework_math::{Point3, Transform, Vec3};

use crate::error::PipeError;

/// Where a pipe's cross-section comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileSpec {
    /// A user-drawn 2D outline.
    Outline(ExternalProfile),
    /// Round section.
    Circle {
        /// Outer diameter.
        diameter: f64,
        /// Wall thickness; solid when zero or too thick.
        wall_thickness: f64,
    },
    /// Square section.
    Square {
        /// Outer side length.
        width: f64,
        /// Wall thickness; solid when zero or too thick.
        wall_thickness: f64,
    },
    /// Rectangular section.
    Rectangle {
        /// Outer width.
        width: f64,
        /// Outer height.
        height: f64,
        /// Wall thickness; solid when zero or too thick.
        wall_thickness: f64,
    },
}

impl ProfileSpec {
    /// A solid round section.
    pub fn circle(diameter: f64) -> Self {
        ProfileSpec::Circle {
            diameter,
            wall_thickness: 0.0,
        }
    }
}

impl Default for ProfileSpec {
    fn default() -> Self {
        ProfileSpec::circle(0.0)
    }
}

/// Wires of an external 2D outline.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalProfile {
    /// The outline's wires; the first one bounds the section.
    pub wires: Vec<Wire>,
}

/// A resolved cross-section: one planar face, possibly with holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    face: Face,
}

impl Profile {
    /// Wrap a face.
    pub fn new(face: Face) -> Self {
        Self { face }
    }

    /// The section face.
    pub fn face(&self) -> &Face {
        &self.face
    }

    /// Outer boundary.
    pub fn outer_wire(&self) -> &Wire {
        self.face.outer_wire()
    }

    /// Hole boundaries.
    pub fn inner_wires(&self) -> &[Wire] {
        self.face.inner_wires()
    }

    /// True when the section has at least one hole.
    pub fn is_hollow(&self) -> bool {
        !self.face.inner_wires().is_empty()
    }

    /// Section area.
    pub fn area(&self) -> f64 {
        self.face.area()
    }

    /// Area centroid, or the bounding-box centre when the area is zero.
    pub fn centroid(&self) -> Point3 {
        self.face
            .center_of_mass()
            .unwrap_or_else(|| self.face.bounding_box().center())
    }

    /// The same section without its holes.
    pub fn outer_only(&self) -> Result<Profile, PipeError> {
        let face = Face::from_wire(self.outer_wire().clone()).map_err(PipeError::Profile)?;
        Ok(Profile { face })
    }

    /// Apply a rigid transform.
    pub fn transform(&self, t: &Transform) -> Profile {
        Profile {
            face: self.face.transform(t),
        }
    }
}

/// Resolve a profile spec to a section face.
pub fn resolve_profile(spec: &ProfileSpec) -> Result<Profile, PipeError> {
    match spec {
        ProfileSpec::Outline(outline) => {
            let first = outline.wires.first().ok_or(PipeError::NotA2dProfile)?;
            if !outline.wires.iter().all(Wire::is_planar) {
                return Err(PipeError::NotA2dProfile);
            }
            if !first.is_closed() {
                return Err(PipeError::ProfileNotClosed);
            }
            Face::from_wire(first.clone())
                .map(Profile::new)
                .map_err(PipeError::Profile)
        }
        ProfileSpec::Circle {
            diameter,
            wall_thickness,
        } => {
            if *diameter == 0.0 {
                return Err(PipeError::ZeroDimension);
            }
            let radius = diameter / 2.0;
            let outer = disk(radius)?;
            if *wall_thickness > 0.0 && *wall_thickness < radius {
                let inner = disk(radius - wall_thickness)?;
                return cut(&outer, &inner);
            }
            Ok(Profile::new(outer))
        }
        ProfileSpec::Square {
            width,
            wall_thickness,
        } => {
            if *width == 0.0 {
                return Err(PipeError::ZeroDimension);
            }
            let outer = plate(*width, *width)?;
            if *wall_thickness > 0.0 && *wall_thickness < width / 2.0 {
                let side = width - 2.0 * wall_thickness;
                let inner = plate(side, side)?;
                return cut(&outer, &inner);
            }
            Ok(Profile::new(outer))
        }
        ProfileSpec::Rectangle {
            width,
            height,
            wall_thickness,
        } => {
            if *width == 0.0 || *height == 0.0 {
                return Err(PipeError::ZeroDimension);
            }
            let outer = plate(*width, *height)?;
            let t = *wall_thickness;
            if t > 0.0 && t < height / 2.0 && t < width / 2.0 {
                let inner = plate(width - 2.0 * t, height - 2.0 * t)?;
                return cut(&outer, &inner);
            }
            Ok(Profile::new(outer))
        }
    }
}

/// Disk in the XY plane centred on the origin.
fn disk(radius: f64) -> Result<Face, PipeError> {
    Wire::circle(Point3::origin(), Vec3::z(), radius)
        .and_then(Face::from_wire)
        .map_err(PipeError::Profile)
}

/// Rectangle in the XY plane centred on the origin.
fn plate(width: f64, height: f64) -> Result<Face, PipeError> {
    Wire::rectangle(Point3::origin(), width, height)
        .and_then(Face::from_wire)
        .map_err(PipeError::Profile)
}

fn cut(outer: &Face, inner: &Face) -> Result<Profile, PipeError> {
    outer.cut(inner).map(Profile::new).map_err(PipeError::Profile)
}
