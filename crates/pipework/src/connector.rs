//! Fittings joining two or three pipes at a shared endpoint.
//!
//! A corner bends between two pipes with a torus section. A tee joins a
//! through pair with a branch. Both trim the adjoining pipe ends so the
//! assembly closes up; the trims come back as [`OffsetUpdate`]s for the
//! caller to apply.

use std::f64::consts::{FRAC_PI_2, PI};

use pipework_kernel::{cut_volume, extrude, revolve, Face, KernelError, Shape, Solid, Wire};
use pipework_math::{angle_between, round_to, Dir3, Point3};

use crate::document::PipeId;
use crate::error::ConnectorError;
use crate::orient::orient;
use crate::path::{end_point, end_tangent, resolve_path};
use crate::pipe::Pipe;
use crate::profile::{resolve_profile, Profile};
use crate::settings::BuildSettings;

/// Classification passed through to IFC export for connectors.
pub const CONNECTOR_IFC_TYPE: &str = "Pipe Fitting";

/// Kind of fitting, derived from the number of attached pipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorType {
    /// Two pipes.
    Corner,
    /// Three pipes.
    Tee,
}

/// One end of a pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipeEnd {
    /// The first vertex of the path.
    Start,
    /// The last vertex of the path.
    End,
}

/// A fitting between pipes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Connector {
    /// Attached pipes; only the first three take part.
    pub pipes: Vec<PipeId>,
    /// Bend radius.
    pub radius: f64,
}

impl Connector {
    /// A connector on these pipes.
    pub fn new(pipes: Vec<PipeId>, radius: f64) -> Self {
        Self { pipes, radius }
    }

    /// `Corner` for two pipes, `Tee` for three or more, `None` otherwise.
    pub fn connector_type(&self) -> Option<ConnectorType> {
        match self.pipes.len() {
            0 | 1 => None,
            2 => Some(ConnectorType::Corner),
            _ => Some(ConnectorType::Tee),
        }
    }
}

/// A new offset for one pipe end, decided by a connector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetUpdate {
    /// Pipe to trim.
    pub pipe: PipeId,
    /// End to trim.
    pub end: PipeEnd,
    /// New offset value.
    pub offset: f64,
}

/// Progress of a connector build, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuildStage {
    /// Inputs checked.
    Init,
    /// Pipe paths resolved.
    PathResolved,
    /// Shared vertex and end tangents found.
    JunctionFound,
    /// Offsets decided.
    OffsetsApplied,
    /// Solid built.
    GeometryBuilt,
}

/// Output of a successful connector build.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorBuild {
    /// The fitting solid.
    pub shape: Shape,
    /// Which fitting was built.
    pub connector_type: ConnectorType,
    /// Offsets that differ from the pipes' stored values.
    pub offsets: Vec<OffsetUpdate>,
    /// Every pipe end this fitting joins, changed or not.
    pub joints: Vec<(PipeId, PipeEnd)>,
    /// True when pipes beyond the third were ignored.
    pub truncated: bool,
}

/// A participating pipe with its resolved, untrimmed path.
struct Leg<'p> {
    id: PipeId,
    pipe: &'p Pipe,
    wire: Wire,
}

/// Builds connector solids.
#[derive(Debug, Clone, Copy)]
pub struct ConnectorBuilder<'a> {
    settings: &'a BuildSettings,
}

impl<'a> ConnectorBuilder<'a> {
    /// Create a builder using these settings.
    pub fn new(settings: &'a BuildSettings) -> Self {
        Self { settings }
    }

    /// Build the fitting for `connector`, looking its pipes up through
    /// `resolve`.
    ///
    /// Pipes are read, never written. Offset changes are returned in the
    /// result, or in [`ConnectorError::Geometry`] when the solid itself
    /// fails.
    ///
    /// # Errors
    ///
    /// See [`ConnectorError`]; [`ConnectorError::stage`] tells how far the
    /// build got.
    pub fn build<'p, F>(
        &self,
        connector: &Connector,
        resolve: F,
    ) -> Result<ConnectorBuild, ConnectorError>
    where
        F: Fn(PipeId) -> Option<&'p Pipe>,
    {
        let count = connector.pipes.len();
        if count < 2 {
            return Err(ConnectorError::NotEnoughPipes(count));
        }
        let radius = connector.radius;
        if radius.is_nan() || radius <= 0.0 {
            return Err(ConnectorError::ZeroRadius);
        }
        let truncated = count > 3;
        if truncated {
            tracing::warn!(
                pipes = count,
                "connector has more than 3 pipes, using the first 3"
            );
        }

        let mut legs = Vec::with_capacity(3);
        for &id in connector.pipes.iter().take(3) {
            let pipe = resolve(id).ok_or(ConnectorError::MissingPipe(id))?;
            let wire = resolve_path(&pipe.path)
                .map_err(|source| ConnectorError::Path { pipe: id, source })?;
            legs.push(Leg { id, pipe, wire });
        }

        let (junction, ends) = self.find_junction(&legs)?;
        let mut tangents = Vec::with_capacity(legs.len());
        for (leg, &end) in legs.iter().zip(&ends) {
            let tangent = end_tangent(&leg.wire, end).ok_or(ConnectorError::ZeroTangent(leg.id))?;
            tangents.push(tangent);
        }
        let joints: Vec<(PipeId, PipeEnd)> = legs
            .iter()
            .map(|l| l.id)
            .zip(ends.iter().copied())
            .collect();

        let profile = resolve_profile(&legs[0].pipe.profile)
            .and_then(|p| p.outer_only())
            .map_err(ConnectorError::Profile)?;

        let (connector_type, offset, geometry) = if legs.len() == 2 {
            let (t1, t2) = (tangents[0], tangents[1]);
            if self.aligned(&t1, &t2) {
                return Err(ConnectorError::AlreadyAligned);
            }
            let angle = angle_between(t1.as_ref(), t2.as_ref());
            let offset = (FRAC_PI_2 - angle / 2.0).tan() * radius;
            let geometry = self.corner(&profile, junction, t1, t2, angle, offset, radius);
            (ConnectorType::Corner, offset, geometry)
        } else {
            let (a, b, c) = self.through_and_branch(&tangents)?;
            let geometry = self.tee(&profile, junction, a, b, c, radius);
            (ConnectorType::Tee, radius, geometry)
        };

        let offsets: Vec<OffsetUpdate> = legs
            .iter()
            .zip(&ends)
            .filter(|&(leg, &end)| leg.pipe.offset(end) != offset)
            .map(|(leg, &end)| OffsetUpdate {
                pipe: leg.id,
                end,
                offset,
            })
            .collect();

        let solid = match geometry {
            Ok(solid) => solid,
            Err(source) => {
                return Err(ConnectorError::Geometry {
                    joints,
                    offsets,
                    source,
                });
            }
        };
        tracing::debug!(
            ?connector_type,
            offset,
            changed = offsets.len(),
            "built connector"
        );
        Ok(ConnectorBuild {
            shape: Shape::from_solids(vec![solid]),
            connector_type,
            offsets,
            joints,
            truncated,
        })
    }

    /// The vertex shared by the first two pipes, and which end of each leg
    /// touches it.
    fn find_junction(&self, legs: &[Leg<'_>]) -> Result<(Point3, Vec<PipeEnd>), ConnectorError> {
        use PipeEnd::{End, Start};

        let tol = self.settings.coincidence_tolerance;
        let near = |a: Point3, b: Point3| (a - b).norm() <= tol;
        let (w0, w1) = (&legs[0].wire, &legs[1].wire);

        let (junction, e0, e1) = [(Start, Start), (Start, End), (End, End), (End, Start)]
            .into_iter()
            .find(|&(a, b)| near(end_point(w0, a), end_point(w1, b)))
            .map(|(a, b)| (end_point(w0, a), a, b))
            .ok_or(ConnectorError::CommonVertexNotFound)?;

        let mut ends = vec![e0, e1];
        if let Some(third) = legs.get(2) {
            let end = [Start, End]
                .into_iter()
                .find(|&e| near(end_point(&third.wire, e), junction))
                .ok_or(ConnectorError::CommonVertexNotFound)?;
            ends.push(end);
        }
        Ok((junction, ends))
    }

    /// True when two directions are parallel or opposite at the configured
    /// angular precision.
    fn aligned(&self, a: &Dir3, b: &Dir3) -> bool {
        let decimals = self.settings.alignment_decimals;
        let angle = round_to(angle_between(a.as_ref(), b.as_ref()), decimals);
        angle == 0.0 || angle == round_to(PI, decimals)
    }

    /// Split three tangents into the aligned through pair and the branch.
    fn through_and_branch(&self, t: &[Dir3]) -> Result<(Dir3, Dir3, Dir3), ConnectorError> {
        let candidates = [(0, 1, 2), (0, 2, 1), (1, 2, 0)];
        let mut found = candidates
            .iter()
            .filter(|&&(i, j, _)| self.aligned(&t[i], &t[j]));
        let &(i, j, k) = found.next().ok_or(ConnectorError::NoAlignedPair)?;
        if found.next().is_some() {
            return Err(ConnectorError::AmbiguousAlignment);
        }
        Ok((t[i], t[j], t[k]))
    }

    /// Torus section from the trimmed end of the first pipe round to the
    /// second.
    #[allow(clippy::too_many_arguments)]
    fn corner(
        &self,
        profile: &Profile,
        junction: Point3,
        t1: Dir3,
        t2: Dir3,
        angle: f64,
        offset: f64,
        radius: f64,
    ) -> Result<Solid, KernelError> {
        let normal = t2.cross(t1.as_ref());
        let inward = Dir3::try_new(t1.cross(&normal), 1e-12).ok_or(KernelError::ZeroNormal)?;
        let start = junction + t1.into_inner() * offset;
        let center = start + inward.into_inner() * radius;

        let placed = orient(profile, &start, &t1, self.settings.up_vector_threshold);
        revolve(
            placed.outer_wire(),
            center,
            normal,
            (PI - angle).to_degrees(),
            self.settings.arc_segments,
        )
    }

    /// Through tube plus the branch tube cut back to the branch side.
    fn tee(
        &self,
        profile: &Profile,
        junction: Point3,
        a: Dir3,
        b: Dir3,
        c: Dir3,
        radius: f64,
    ) -> Result<Solid, KernelError> {
        let threshold = self.settings.up_vector_threshold;
        let segments = self.settings.arc_segments;
        let normal = Dir3::try_new(a.cross(c.as_ref()), 1e-12).ok_or(KernelError::ZeroNormal)?;

        let through_start = orient(
            profile,
            &(junction + a.into_inner() * radius),
            &a,
            threshold,
        );
        let through = extrude(
            through_start.outer_wire(),
            b.into_inner() * (2.0 * radius),
            segments,
        )?;

        let branch_start = orient(
            profile,
            &(junction + c.into_inner() * radius),
            &c,
            threshold,
        );
        let branch = extrude(
            branch_start.outer_wire(),
            c.into_inner() * (-2.0 * radius),
            segments,
        )?;

        let corners = [
            junction,
            junction + a.into_inner() * radius,
            junction + normal.into_inner() * radius,
        ];
        let mut cut_face = Face::from_wire(Wire::polygon(&corners)?)?;
        if cut_face.normal().dot(c.as_ref()) > 0.0 {
            cut_face = cut_face.reversed();
        }
        let halves = cut_volume(&cut_face, &branch)?;
        let branch = branch.difference(&halves.volume);
        Ok(through.union(&branch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::path::{BaseCurve, PathSpec};
    use crate::profile::ProfileSpec;
    use slotmap::SlotMap;

    fn straight(from: Point3, to: Point3, diameter: f64) -> Pipe {
        let wire = Wire::line(from, to).unwrap();
        Pipe::new(
            PathSpec::Base(BaseCurve::from_wire(wire)),
            ProfileSpec::circle(diameter),
        )
    }

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn build(
        pipes: &SlotMap<PipeId, Pipe>,
        ids: Vec<PipeId>,
        radius: f64,
    ) -> Result<ConnectorBuild, ConnectorError> {
        let settings = BuildSettings::default();
        ConnectorBuilder::new(&settings).build(&Connector::new(ids, radius), |id| pipes.get(id))
    }

    #[test]
    fn test_connector_type() {
        let mut pipes: SlotMap<PipeId, Pipe> = SlotMap::with_key();
        let ids: Vec<PipeId> = (0..4).map(|_| pipes.insert(Pipe::default())).collect();
        assert_eq!(
            Connector::new(ids[..1].to_vec(), 1.0).connector_type(),
            None
        );
        assert_eq!(
            Connector::new(ids[..2].to_vec(), 1.0).connector_type(),
            Some(ConnectorType::Corner)
        );
        assert_eq!(
            Connector::new(ids, 1.0).connector_type(),
            Some(ConnectorType::Tee)
        );
    }

    #[test]
    fn test_right_angle_corner() {
        let mut pipes = SlotMap::with_key();
        let a = pipes.insert(straight(p(10.0, 0.0, 0.0), p(0.0, 0.0, 0.0), 0.5));
        let b = pipes.insert(straight(p(0.0, 0.0, 0.0), p(0.0, 10.0, 0.0), 0.5));
        let built = build(&pipes, vec![a, b], 1.0).unwrap();

        assert_eq!(built.connector_type, ConnectorType::Corner);
        assert!(!built.truncated);
        assert_eq!(built.joints, vec![(a, PipeEnd::End), (b, PipeEnd::Start)]);
        assert_eq!(built.offsets.len(), 2);
        assert_eq!(built.offsets[0].pipe, a);
        assert_eq!(built.offsets[0].end, PipeEnd::End);
        assert_eq!(built.offsets[1].end, PipeEnd::Start);
        for update in &built.offsets {
            assert!((update.offset - 1.0).abs() < 1e-12);
        }

        let bb = built.shape.bounding_box();
        let r = 0.25;
        assert!((bb.min - p(-r, -r, -r)).norm() < 1e-6, "{bb:?}");
        assert!((bb.max - p(1.0, 1.0, r)).norm() < 1e-6, "{bb:?}");

        // Pappus: section area times the path of its centroid
        let expected = PI * r * r * FRAC_PI_2;
        let volume = built.shape.volume();
        assert!((volume - expected).abs() / expected < 0.03, "volume {volume}");
    }

    #[test]
    fn test_obtuse_corner_offset() {
        // 135 degrees between the legs
        let mut pipes = SlotMap::with_key();
        let a = pipes.insert(straight(p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0), 0.5));
        let b = pipes.insert(straight(p(0.0, 0.0, 0.0), p(-10.0, 10.0, 0.0), 0.5));
        let built = build(&pipes, vec![a, b], 2.0).unwrap();
        let expected = (FRAC_PI_2 - 0.75 * PI / 2.0).tan() * 2.0;
        assert!((built.offsets[0].offset - expected).abs() < 1e-12);
        assert!(built.shape.volume() > 0.0);
    }

    #[test]
    fn test_collinear_corner_is_rejected() {
        let mut pipes = SlotMap::with_key();
        let a = pipes.insert(straight(p(-10.0, 0.0, 0.0), p(0.0, 0.0, 0.0), 0.5));
        let b = pipes.insert(straight(p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0), 0.5));
        let err = build(&pipes, vec![a, b], 1.0).unwrap_err();
        assert_eq!(err, ConnectorError::AlreadyAligned);
        assert_eq!(err.stage(), BuildStage::JunctionFound);
    }

    #[test]
    fn test_nearly_collinear_rounds_to_aligned() {
        let mut pipes = SlotMap::with_key();
        let a = pipes.insert(straight(p(-10.0, 0.0, 0.0), p(0.0, 0.0, 0.0), 0.5));
        let b = pipes.insert(straight(p(0.0, 0.0, 0.0), p(10.0, 0.3, 0.0), 0.5));
        assert_eq!(
            build(&pipes, vec![a, b], 1.0),
            Err(ConnectorError::AlreadyAligned)
        );
    }

    #[test]
    fn test_zero_radius_is_skipped() {
        let mut pipes = SlotMap::with_key();
        let a = pipes.insert(straight(p(10.0, 0.0, 0.0), p(0.0, 0.0, 0.0), 0.5));
        let b = pipes.insert(straight(p(0.0, 0.0, 0.0), p(0.0, 10.0, 0.0), 0.5));
        let err = build(&pipes, vec![a, b], 0.0).unwrap_err();
        assert_eq!(err, ConnectorError::ZeroRadius);
        assert_eq!(err.kind(), ErrorKind::Skipped);
        assert_eq!(
            build(&pipes, vec![a], 1.0),
            Err(ConnectorError::NotEnoughPipes(1))
        );
    }

    #[test]
    fn test_disjoint_pipes() {
        let mut pipes = SlotMap::with_key();
        let a = pipes.insert(straight(p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0), 0.5));
        let b = pipes.insert(straight(p(0.0, 5.0, 0.0), p(0.0, 10.0, 0.0), 0.5));
        let err = build(&pipes, vec![a, b], 1.0).unwrap_err();
        assert_eq!(err, ConnectorError::CommonVertexNotFound);
        assert_eq!(err.stage(), BuildStage::PathResolved);
    }

    #[test]
    fn test_junction_tolerance_is_inclusive() {
        let tol = BuildSettings::default().coincidence_tolerance;
        let mut pipes = SlotMap::with_key();
        let a = pipes.insert(straight(p(10.0, 0.0, 0.0), p(0.0, 0.0, 0.0), 0.5));
        let b = pipes.insert(straight(p(0.0, tol, 0.0), p(0.0, 10.0, 0.0), 0.5));
        let built = build(&pipes, vec![a, b], 1.0).unwrap();
        assert_eq!(built.joints, vec![(a, PipeEnd::End), (b, PipeEnd::Start)]);

        let c = pipes.insert(straight(p(0.0, 2.0 * tol, 0.0), p(0.0, 10.0, 0.0), 0.5));
        assert_eq!(
            build(&pipes, vec![a, c], 1.0),
            Err(ConnectorError::CommonVertexNotFound)
        );
    }

    #[test]
    fn test_missing_pipe() {
        let mut pipes = SlotMap::with_key();
        let a = pipes.insert(straight(p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0), 0.5));
        let gone = pipes.insert(Pipe::default());
        pipes.remove(gone);
        assert_eq!(
            build(&pipes, vec![a, gone], 1.0),
            Err(ConnectorError::MissingPipe(gone))
        );
    }

    fn tee_pipes(pipes: &mut SlotMap<PipeId, Pipe>) -> Vec<PipeId> {
        vec![
            pipes.insert(straight(p(-10.0, 0.0, 0.0), p(0.0, 0.0, 0.0), 0.5)),
            pipes.insert(straight(p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0), 0.5)),
            pipes.insert(straight(p(0.0, 0.0, 0.0), p(0.0, 10.0, 0.0), 0.5)),
        ]
    }

    #[test]
    fn test_tee_geometry() {
        let mut pipes = SlotMap::with_key();
        let ids = tee_pipes(&mut pipes);
        let built = build(&pipes, ids.clone(), 1.0).unwrap();

        assert_eq!(built.connector_type, ConnectorType::Tee);
        assert_eq!(
            built.joints,
            vec![
                (ids[0], PipeEnd::End),
                (ids[1], PipeEnd::Start),
                (ids[2], PipeEnd::Start)
            ]
        );
        assert_eq!(built.offsets.len(), 3);
        assert!(built.offsets.iter().all(|u| u.offset == 1.0));

        let r = 0.25;
        let bb = built.shape.bounding_box();
        assert!((bb.min - p(-1.0, -r, -r)).norm() < 1e-6, "{bb:?}");
        assert!((bb.max - p(1.0, 1.0, r)).norm() < 1e-6, "{bb:?}");
    }

    #[test]
    fn test_tee_order_does_not_matter() {
        // branch listed first; the through pair is found among the others
        let mut pipes = SlotMap::with_key();
        let ids = tee_pipes(&mut pipes);
        let built = build(&pipes, vec![ids[2], ids[0], ids[1]], 1.0).unwrap();
        let r = 0.25;
        let bb = built.shape.bounding_box();
        assert!((bb.min - p(-1.0, -r, -r)).norm() < 1e-6, "{bb:?}");
        assert!((bb.max - p(1.0, 1.0, r)).norm() < 1e-6, "{bb:?}");
    }

    #[test]
    fn test_tee_alignment_errors() {
        let mut pipes = SlotMap::with_key();
        let x = pipes.insert(straight(p(10.0, 0.0, 0.0), p(0.0, 0.0, 0.0), 0.5));
        let y = pipes.insert(straight(p(0.0, 0.0, 0.0), p(0.0, 10.0, 0.0), 0.5));
        let z = pipes.insert(straight(p(0.0, 0.0, 0.0), p(0.0, 0.0, 10.0), 0.5));
        assert_eq!(
            build(&pipes, vec![x, y, z], 1.0),
            Err(ConnectorError::NoAlignedPair)
        );

        let minus_x = pipes.insert(straight(p(0.0, 0.0, 0.0), p(-10.0, 0.0, 0.0), 0.5));
        let plus_x = pipes.insert(straight(p(0.0, 0.0, 0.0), p(5.0, 0.0, 0.0), 0.5));
        assert_eq!(
            build(&pipes, vec![x, minus_x, plus_x], 1.0),
            Err(ConnectorError::AmbiguousAlignment)
        );
    }

    #[test]
    fn test_tee_third_pipe_must_touch() {
        let mut pipes = SlotMap::with_key();
        let mut ids = tee_pipes(&mut pipes);
        ids[2] = pipes.insert(straight(p(0.0, 1.0, 0.0), p(0.0, 10.0, 0.0), 0.5));
        assert_eq!(
            build(&pipes, ids, 1.0),
            Err(ConnectorError::CommonVertexNotFound)
        );
    }

    #[test]
    fn test_offsets_already_applied_are_not_reported() {
        let mut pipes = SlotMap::with_key();
        let ids = tee_pipes(&mut pipes);
        let first = build(&pipes, ids.clone(), 1.0).unwrap();
        for update in &first.offsets {
            *pipes[update.pipe].offset_mut(update.end) = update.offset;
        }
        let second = build(&pipes, ids, 1.0).unwrap();
        assert!(second.offsets.is_empty());
        assert_eq!(second.joints, first.joints);
        assert_eq!(second.shape, first.shape);
    }

    #[test]
    fn test_extra_pipes_are_ignored() {
        let mut pipes = SlotMap::with_key();
        let mut ids = tee_pipes(&mut pipes);
        let up = pipes.insert(straight(p(0.0, 0.0, 0.0), p(0.0, 0.0, 10.0), 0.5));
        ids.push(up);
        let built = build(&pipes, ids, 1.0).unwrap();
        assert!(built.truncated);
        assert_eq!(built.joints.len(), 3);
    }

    #[test]
    fn test_profile_comes_from_first_pipe() {
        let mut pipes = SlotMap::with_key();
        let line = Wire::line(p(10.0, 0.0, 0.0), p(0.0, 0.0, 0.0)).unwrap();
        let a = pipes.insert(Pipe::new(
            PathSpec::Base(BaseCurve::from_wire(line)),
            ProfileSpec::Circle {
                diameter: 1.0,
                wall_thickness: 0.1,
            },
        ));
        let b = pipes.insert(straight(p(0.0, 0.0, 0.0), p(0.0, 10.0, 0.0), 0.2));
        let built = build(&pipes, vec![a, b], 2.0).unwrap();
        // outer boundary only, so the fitting is solid at the full diameter
        let bb = built.shape.bounding_box();
        assert!((bb.size().z - 1.0).abs() < 1e-6);
        assert!((bb.max - p(2.0, 2.0, 0.5)).norm() < 1e-6, "{bb:?}");

        let mut empty = pipes[a].clone();
        empty.profile = ProfileSpec::circle(0.0);
        let c = pipes.insert(empty);
        let err = build(&pipes, vec![c, b], 2.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Skipped);
    }

    #[test]
    fn test_revolve_failure_keeps_offsets() {
        // bend radius smaller than the section: the profile crosses the axis
        let mut pipes = SlotMap::with_key();
        let a = pipes.insert(straight(p(10.0, 0.0, 0.0), p(0.0, 0.0, 0.0), 4.0));
        let b = pipes.insert(straight(p(0.0, 0.0, 0.0), p(0.0, 10.0, 0.0), 4.0));
        match build(&pipes, vec![a, b], 1.0) {
            Err(ConnectorError::Geometry {
                joints,
                offsets,
                source,
            }) => {
                assert_eq!(joints.len(), 2);
                assert_eq!(offsets.len(), 2);
                assert_eq!(source, KernelError::AxisIntersection);
            }
            other => panic!("expected a geometry failure, got {other:?}"),
        }
    }
}
