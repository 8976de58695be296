//! Result shapes: a single solid or a compound of several.

use pipework_math::Transform;

use crate::bbox::Aabb3;
use crate::solid::Solid;

/// A built shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// One solid.
    Solid(Solid),
    /// Several independent solids kept together.
    Compound(Vec<Solid>),
}

impl Shape {
    /// Wrap solids, collapsing a single solid to `Shape::Solid`.
    pub fn from_solids(mut solids: Vec<Solid>) -> Shape {
        if solids.len() == 1 {
            Shape::Solid(solids.remove(0))
        } else {
            Shape::Compound(solids)
        }
    }

    /// The solids making up this shape.
    pub fn solids(&self) -> &[Solid] {
        match self {
            Shape::Solid(s) => std::slice::from_ref(s),
            Shape::Compound(solids) => solids,
        }
    }

    /// True for `Shape::Compound`.
    pub fn is_compound(&self) -> bool {
        matches!(self, Shape::Compound(_))
    }

    /// Total volume of all solids.
    pub fn volume(&self) -> f64 {
        self.solids().iter().map(Solid::volume).sum()
    }

    /// Bounds enclosing every solid.
    pub fn bounding_box(&self) -> Aabb3 {
        self.solids()
            .iter()
            .fold(Aabb3::empty(), |acc, s| acc.merge(&s.bounding_box()))
    }

    /// Apply a transform to every solid.
    pub fn transform(&self, t: &Transform) -> Shape {
        match self {
            Shape::Solid(s) => Shape::Solid(s.transform(t)),
            Shape::Compound(solids) => {
                Shape::Compound(solids.iter().map(|s| s.transform(t)).collect())
            }
        }
    }
}

impl From<Solid> for Shape {
    fn from(solid: Solid) -> Self {
        Shape::Solid(solid)
    }
}
