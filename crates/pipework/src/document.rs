//! Pipe and connector records, and the rebuild queue that keeps them
//! consistent.
//!
//! Edits only mark entities dirty. [`Document::recompute`] drains the queue
//! in order; a connector that trims a pipe queues that pipe again, and the
//! cascade stops once no stored offset changes.

use std::collections::{HashMap, VecDeque};

use pipework_kernel::Shape;
use pipework_math::Transform;
use slotmap::{new_key_type, SlotMap};

use crate::connector::{Connector, ConnectorBuilder, OffsetUpdate, PipeEnd, CONNECTOR_IFC_TYPE};
use crate::error::{ConnectorError, DocumentError, ErrorKind, PipeError, SettingsError};
use crate::path::PathSpec;
use crate::pipe::{Pipe, PipeBuilder, PIPE_IFC_TYPE};
use crate::profile::ProfileSpec;
use crate::settings::BuildSettings;

new_key_type! {
    /// Handle to a pipe in a [`Document`].
    pub struct PipeId;

    /// Handle to a connector in a [`Document`].
    pub struct ConnectorId;
}

/// A pipe and what was last built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeEntry {
    /// Inputs.
    pub pipe: Pipe,
    /// Last successfully built shape.
    pub shape: Option<Shape>,
    /// Trimmed path length from the last successful build.
    pub length: Option<f64>,
    /// When set, this entry mirrors another pipe's result.
    pub clone_of: Option<PipeId>,
    /// IFC classification.
    pub ifc_type: &'static str,
    /// Error from the most recent build, cleared on success.
    pub last_error: Option<PipeError>,
}

/// A connector and what was last built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorEntry {
    /// Inputs.
    pub connector: Connector,
    /// Last successfully built shape.
    pub shape: Option<Shape>,
    /// When set, this entry mirrors another connector's result.
    pub clone_of: Option<ConnectorId>,
    /// IFC classification.
    pub ifc_type: &'static str,
    /// Error from the most recent build, cleared on success.
    pub last_error: Option<ConnectorError>,
}

/// An entity waiting to be rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RebuildRequest {
    /// Rebuild a pipe.
    Pipe(PipeId),
    /// Rebuild a connector.
    Connector(ConnectorId),
}

/// A build that failed during a recompute.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildFailure {
    /// A pipe failed.
    Pipe {
        /// Which pipe.
        id: PipeId,
        /// Why.
        error: PipeError,
    },
    /// A connector failed.
    Connector {
        /// Which connector.
        id: ConnectorId,
        /// Why.
        error: ConnectorError,
    },
}

impl BuildFailure {
    /// Classification of the underlying error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BuildFailure::Pipe { error, .. } => error.kind(),
            BuildFailure::Connector { error, .. } => error.kind(),
        }
    }
}

/// What a recompute did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecomputeReport {
    /// Requests taken off the queue.
    pub processed: usize,
    /// Pipes given a new shape, in order, with repeats.
    pub rebuilt_pipes: Vec<PipeId>,
    /// Connectors given a new shape, in order, with repeats.
    pub rebuilt_connectors: Vec<ConnectorId>,
    /// Builds that failed; their entities kept their previous shapes.
    pub failures: Vec<BuildFailure>,
    /// Offsets written by connectors.
    pub offset_updates: Vec<OffsetUpdate>,
}

/// Owns pipes and connectors and rebuilds them on demand.
///
/// # Example
///
/// ```
/// use pipework::{BaseCurve, Connector, Document, PathSpec, Pipe, PipeEnd, ProfileSpec};
/// use pipework_kernel::Wire;
/// use pipework_math::Point3;
///
/// let leg = |a: Point3, b: Point3| {
///     let path = PathSpec::Base(BaseCurve::from_wire(Wire::line(a, b).unwrap()));
///     Pipe::new(path, ProfileSpec::circle(1.0))
/// };
///
/// let mut doc = Document::default();
/// let a = doc.add_pipe(leg(Point3::new(20.0, 0.0, 0.0), Point3::origin()));
/// let b = doc.add_pipe(leg(Point3::origin(), Point3::new(0.0, 20.0, 0.0)));
/// doc.add_connector(Connector::new(vec![a, b], 2.0)).unwrap();
///
/// let report = doc.recompute().unwrap();
/// assert!(report.failures.is_empty());
/// assert!((doc.pipe(a).unwrap().offset(PipeEnd::End) - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Document {
    settings: BuildSettings,
    pipes: SlotMap<PipeId, PipeEntry>,
    connectors: SlotMap<ConnectorId, ConnectorEntry>,
    queue: VecDeque<RebuildRequest>,
    claims: HashMap<(PipeId, PipeEnd), ConnectorId>,
}

impl Document {
    /// An empty document using these settings.
    ///
    /// # Errors
    ///
    /// Whatever [`BuildSettings::validate`] rejects.
    pub fn new(settings: BuildSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            settings,
            ..Self::default()
        })
    }

    /// Build settings.
    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    /// Number of requests waiting for the next recompute.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Add a pipe and queue its first build.
    pub fn add_pipe(&mut self, pipe: Pipe) -> PipeId {
        let id = self.pipes.insert(PipeEntry {
            pipe,
            shape: None,
            length: None,
            clone_of: None,
            ifc_type: PIPE_IFC_TYPE,
            last_error: None,
        });
        self.enqueue(RebuildRequest::Pipe(id));
        id
    }

    /// Add a connector and queue its first build.
    ///
    /// # Errors
    ///
    /// `UnknownPipe` if the connector references a pipe not in this
    /// document.
    pub fn add_connector(&mut self, connector: Connector) -> Result<ConnectorId, DocumentError> {
        self.check_pipes(&connector.pipes)?;
        let id = self.connectors.insert(ConnectorEntry {
            connector,
            shape: None,
            clone_of: None,
            ifc_type: CONNECTOR_IFC_TYPE,
            last_error: None,
        });
        self.enqueue(RebuildRequest::Connector(id));
        Ok(id)
    }

    /// A pipe's inputs.
    pub fn pipe(&self, id: PipeId) -> Option<&Pipe> {
        self.pipes.get(id).map(|e| &e.pipe)
    }

    /// A connector's inputs.
    pub fn connector(&self, id: ConnectorId) -> Option<&Connector> {
        self.connectors.get(id).map(|e| &e.connector)
    }

    /// A pipe with its build results.
    pub fn pipe_entry(&self, id: PipeId) -> Option<&PipeEntry> {
        self.pipes.get(id)
    }

    /// A connector with its build results.
    pub fn connector_entry(&self, id: ConnectorId) -> Option<&ConnectorEntry> {
        self.connectors.get(id)
    }

    /// All pipes.
    pub fn pipes(&self) -> impl Iterator<Item = (PipeId, &PipeEntry)> {
        self.pipes.iter()
    }

    /// All connectors.
    pub fn connectors(&self) -> impl Iterator<Item = (ConnectorId, &ConnectorEntry)> {
        self.connectors.iter()
    }

    /// The connector currently trimming a pipe end, if any.
    pub fn claimant(&self, pipe: PipeId, end: PipeEnd) -> Option<ConnectorId> {
        self.claims.get(&(pipe, end)).copied()
    }

    /// Replace a pipe's path. Queues the pipe and every connector on it.
    pub fn set_path(&mut self, id: PipeId, path: PathSpec) -> Result<(), DocumentError> {
        self.pipe_mut(id)?.path = path;
        self.pipe_shape_changed(id);
        Ok(())
    }

    /// Replace a pipe's profile. Queues the pipe and every connector on it.
    pub fn set_profile(&mut self, id: PipeId, profile: ProfileSpec) -> Result<(), DocumentError> {
        self.pipe_mut(id)?.profile = profile;
        self.pipe_shape_changed(id);
        Ok(())
    }

    /// Move a pipe. Connectors read the unplaced path, so only the pipe is
    /// queued.
    pub fn set_placement(&mut self, id: PipeId, placement: Transform) -> Result<(), DocumentError> {
        self.pipe_mut(id)?.placement = placement;
        self.enqueue(RebuildRequest::Pipe(id));
        Ok(())
    }

    /// Set one end's offset. Returns whether the value changed; only a
    /// change queues the pipe.
    ///
    /// # Errors
    ///
    /// `UnknownPipe`, or `NegativeOffset` for values below zero.
    pub fn set_offset(
        &mut self,
        id: PipeId,
        end: PipeEnd,
        offset: f64,
    ) -> Result<bool, DocumentError> {
        if offset.is_nan() || offset < 0.0 {
            return Err(DocumentError::NegativeOffset(offset));
        }
        let slot = self.pipe_mut(id)?.offset_mut(end);
        if *slot == offset {
            return Ok(false);
        }
        *slot = offset;
        self.enqueue(RebuildRequest::Pipe(id));
        Ok(true)
    }

    /// Replace the pipes a connector joins. Releases the ends it held.
    pub fn set_connector_pipes(
        &mut self,
        id: ConnectorId,
        pipes: Vec<PipeId>,
    ) -> Result<(), DocumentError> {
        self.check_pipes(&pipes)?;
        self.connector_mut(id)?.pipes = pipes;
        self.release_claims(id);
        self.enqueue(RebuildRequest::Connector(id));
        Ok(())
    }

    /// Set a connector's bend radius.
    pub fn set_connector_radius(
        &mut self,
        id: ConnectorId,
        radius: f64,
    ) -> Result<(), DocumentError> {
        self.connector_mut(id)?.radius = radius;
        self.enqueue(RebuildRequest::Connector(id));
        Ok(())
    }

    /// Add a pipe that mirrors `source`'s shape.
    pub fn clone_pipe(&mut self, source: PipeId) -> Result<PipeId, DocumentError> {
        let pipe = self
            .pipes
            .get(source)
            .ok_or(DocumentError::UnknownPipe(source))?
            .pipe
            .clone();
        let id = self.pipes.insert(PipeEntry {
            pipe,
            shape: None,
            length: None,
            clone_of: Some(source),
            ifc_type: PIPE_IFC_TYPE,
            last_error: None,
        });
        self.enqueue(RebuildRequest::Pipe(id));
        Ok(id)
    }

    /// Add a connector that mirrors `source`'s shape.
    pub fn clone_connector(&mut self, source: ConnectorId) -> Result<ConnectorId, DocumentError> {
        let connector = self
            .connectors
            .get(source)
            .ok_or(DocumentError::UnknownConnector(source))?
            .connector
            .clone();
        let id = self.connectors.insert(ConnectorEntry {
            connector,
            shape: None,
            clone_of: Some(source),
            ifc_type: CONNECTOR_IFC_TYPE,
            last_error: None,
        });
        self.enqueue(RebuildRequest::Connector(id));
        Ok(id)
    }

    /// Drain the rebuild queue.
    ///
    /// Build failures do not stop the recompute; they are logged and listed
    /// in the report, and the failing entity keeps its previous shape.
    ///
    /// # Errors
    ///
    /// `CascadeLimit` once `max_cascade` requests have been processed with
    /// more still queued. The remaining requests stay queued.
    pub fn recompute(&mut self) -> Result<RecomputeReport, DocumentError> {
        let mut report = RecomputeReport::default();
        while let Some(request) = self.queue.pop_front() {
            if report.processed >= self.settings.max_cascade {
                self.queue.push_front(request);
                tracing::error!(
                    limit = self.settings.max_cascade,
                    pending = self.queue.len(),
                    "rebuild cascade limit reached"
                );
                return Err(DocumentError::CascadeLimit {
                    limit: self.settings.max_cascade,
                });
            }
            report.processed += 1;
            match request {
                RebuildRequest::Pipe(id) => self.rebuild_pipe(id, &mut report),
                RebuildRequest::Connector(id) => self.rebuild_connector(id, &mut report),
            }
        }
        Ok(report)
    }

    fn enqueue(&mut self, request: RebuildRequest) {
        if !self.queue.contains(&request) {
            self.queue.push_back(request);
        }
    }

    fn pipe_mut(&mut self, id: PipeId) -> Result<&mut Pipe, DocumentError> {
        self.pipes
            .get_mut(id)
            .map(|e| &mut e.pipe)
            .ok_or(DocumentError::UnknownPipe(id))
    }

    fn connector_mut(&mut self, id: ConnectorId) -> Result<&mut Connector, DocumentError> {
        self.connectors
            .get_mut(id)
            .map(|e| &mut e.connector)
            .ok_or(DocumentError::UnknownConnector(id))
    }

    fn check_pipes(&self, pipes: &[PipeId]) -> Result<(), DocumentError> {
        match pipes.iter().find(|&&id| !self.pipes.contains_key(id)) {
            Some(&missing) => Err(DocumentError::UnknownPipe(missing)),
            None => Ok(()),
        }
    }

    /// Queue a pipe whose path or profile changed, plus the connectors that
    /// read it.
    fn pipe_shape_changed(&mut self, id: PipeId) {
        self.enqueue(RebuildRequest::Pipe(id));
        let users: Vec<ConnectorId> = self
            .connectors
            .iter()
            .filter(|(_, e)| e.connector.pipes.contains(&id))
            .map(|(cid, _)| cid)
            .collect();
        for cid in users {
            self.enqueue(RebuildRequest::Connector(cid));
        }
    }

    fn rebuild_pipe(&mut self, id: PipeId, report: &mut RecomputeReport) {
        let Some(entry) = self.pipes.get(id) else {
            return;
        };
        if let Some(source) = entry.clone_of {
            let (shape, length) = self
                .pipes
                .get(source)
                .map(|s| (s.shape.clone(), s.length))
                .unwrap_or((None, None));
            let entry = &mut self.pipes[id];
            entry.shape = shape;
            entry.length = length;
            report.rebuilt_pipes.push(id);
            return;
        }

        let result = PipeBuilder::new(&self.settings).build(&entry.pipe);
        match result {
            Ok(geometry) => {
                let entry = &mut self.pipes[id];
                entry.shape = Some(geometry.shape);
                entry.length = geometry.length;
                entry.last_error = None;
                report.rebuilt_pipes.push(id);

                let clones: Vec<PipeId> = self
                    .pipes
                    .iter()
                    .filter(|(_, e)| e.clone_of == Some(id))
                    .map(|(cid, _)| cid)
                    .collect();
                for clone in clones {
                    self.enqueue(RebuildRequest::Pipe(clone));
                }
            }
            Err(error) => {
                log_failure(error.kind(), "pipe", &error);
                self.pipes[id].last_error = Some(error.clone());
                report.failures.push(BuildFailure::Pipe { id, error });
            }
        }
    }

    fn rebuild_connector(&mut self, id: ConnectorId, report: &mut RecomputeReport) {
        let Some(entry) = self.connectors.get(id) else {
            return;
        };
        if let Some(source) = entry.clone_of {
            let shape = self.connectors.get(source).and_then(|s| s.shape.clone());
            self.connectors[id].shape = shape;
            report.rebuilt_connectors.push(id);
            return;
        }

        let pipes = &self.pipes;
        let mut result = ConnectorBuilder::new(&self.settings)
            .build(&entry.connector, |pid| pipes.get(pid).map(|e| &e.pipe));

        let joints = match &result {
            Ok(built) => Some(built.joints.as_slice()),
            Err(ConnectorError::Geometry { joints, .. }) => Some(joints.as_slice()),
            Err(_) => None,
        };
        if let Some(conflict) = joints.and_then(|j| self.find_conflict(id, j)) {
            result = Err(conflict);
        }

        match result {
            Ok(built) => {
                self.take_claims(id, &built.joints);
                self.apply_offsets(&built.offsets, report);
                let entry = &mut self.connectors[id];
                entry.shape = Some(built.shape);
                entry.last_error = None;
                report.rebuilt_connectors.push(id);

                let clones: Vec<ConnectorId> = self
                    .connectors
                    .iter()
                    .filter(|(_, e)| e.clone_of == Some(id))
                    .map(|(cid, _)| cid)
                    .collect();
                for clone in clones {
                    self.enqueue(RebuildRequest::Connector(clone));
                }
            }
            Err(error) => {
                match &error {
                    ConnectorError::Geometry { joints, offsets, .. } => {
                        self.take_claims(id, joints);
                        self.apply_offsets(offsets, report);
                    }
                    _ => self.release_claims(id),
                }
                log_failure(error.kind(), "connector", &error);
                self.connectors[id].last_error = Some(error.clone());
                report.failures.push(BuildFailure::Connector { id, error });
            }
        }
    }

    /// The first joint already held by a different connector.
    fn find_conflict(
        &self,
        id: ConnectorId,
        joints: &[(PipeId, PipeEnd)],
    ) -> Option<ConnectorError> {
        for &(pipe, end) in joints {
            match self.claims.get(&(pipe, end)) {
                Some(&by) if by != id => {
                    return Some(ConnectorError::EndClaimed { pipe, end, by });
                }
                _ => {}
            }
        }
        None
    }

    fn release_claims(&mut self, id: ConnectorId) {
        self.claims.retain(|_, holder| *holder != id);
    }

    fn take_claims(&mut self, id: ConnectorId, joints: &[(PipeId, PipeEnd)]) {
        self.release_claims(id);
        for &joint in joints {
            self.claims.insert(joint, id);
        }
    }

    fn apply_offsets(&mut self, updates: &[OffsetUpdate], report: &mut RecomputeReport) {
        for update in updates {
            let Some(entry) = self.pipes.get_mut(update.pipe) else {
                continue;
            };
            let slot = entry.pipe.offset_mut(update.end);
            if *slot != update.offset {
                *slot = update.offset;
                self.enqueue(RebuildRequest::Pipe(update.pipe));
                report.offset_updates.push(*update);
            }
        }
    }
}

fn log_failure(kind: ErrorKind, what: &str, error: &dyn std::error::Error) {
    match kind {
        ErrorKind::Skipped => tracing::debug!(%error, "{what} skipped"),
        ErrorKind::UserInput | ErrorKind::Geometric => tracing::warn!(%error, "{what} not built"),
        ErrorKind::Kernel => tracing::error!(%error, "{what} build failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::BaseCurve;
    use approx::assert_relative_eq;
    use pipework_kernel::Wire;
    use pipework_math::Point3;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn leg(from: Point3, to: Point3) -> Pipe {
        Pipe::new(
            PathSpec::Base(BaseCurve::from_wire(Wire::line(from, to).unwrap())),
            ProfileSpec::circle(0.5),
        )
    }

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    /// Two pipes meeting at the origin at a right angle, joined by a corner.
    fn elbow(doc: &mut Document) -> (PipeId, PipeId, ConnectorId) {
        let a = doc.add_pipe(leg(p(10.0, 0.0, 0.0), Point3::origin()));
        let b = doc.add_pipe(leg(Point3::origin(), p(0.0, 10.0, 0.0)));
        let c = doc.add_connector(Connector::new(vec![a, b], 1.0)).unwrap();
        (a, b, c)
    }

    #[test]
    fn test_cascade_terminates() {
        init_tracing();
        let mut doc = Document::default();
        let (a, b, c) = elbow(&mut doc);
        assert_eq!(doc.pending(), 3);

        let report = doc.recompute().unwrap();
        // a, b, the corner, then a and b again with their new offsets
        assert_eq!(report.processed, 5);
        assert_eq!(report.rebuilt_pipes, vec![a, b, a, b]);
        assert_eq!(report.rebuilt_connectors, vec![c]);
        assert_eq!(report.offset_updates.len(), 2);
        assert!(report.failures.is_empty());
        assert_eq!(doc.pending(), 0);

        assert_relative_eq!(doc.pipe(a).unwrap().offset_end, 1.0, epsilon = 1e-12);
        assert_relative_eq!(doc.pipe(b).unwrap().offset_start, 1.0, epsilon = 1e-12);
        let entry = doc.pipe_entry(a).unwrap();
        let bb = entry.shape.as_ref().unwrap().bounding_box();
        assert_relative_eq!(bb.min.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(entry.length.unwrap(), 9.0, epsilon = 1e-9);
        assert!(doc.connector_entry(c).unwrap().shape.is_some());

        let again = doc.recompute().unwrap();
        assert_eq!(again.processed, 0);
    }

    #[test]
    fn test_radius_change_retrims_pipes() {
        let mut doc = Document::default();
        let (a, b, c) = elbow(&mut doc);
        doc.recompute().unwrap();

        doc.set_connector_radius(c, 2.0).unwrap();
        let report = doc.recompute().unwrap();
        assert_eq!(report.processed, 3);
        assert_relative_eq!(doc.pipe(a).unwrap().offset_end, 2.0, epsilon = 1e-12);
        assert_relative_eq!(doc.pipe(b).unwrap().offset_start, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_offset_edit_does_not_touch_connectors() {
        let mut doc = Document::default();
        let (a, _, _) = elbow(&mut doc);
        doc.recompute().unwrap();

        assert_eq!(doc.set_offset(a, PipeEnd::Start, 0.0), Ok(false));
        assert_eq!(doc.pending(), 0);
        assert_eq!(doc.set_offset(a, PipeEnd::Start, 2.0), Ok(true));
        assert_eq!(
            doc.set_offset(a, PipeEnd::Start, -1.0),
            Err(DocumentError::NegativeOffset(-1.0))
        );
        let report = doc.recompute().unwrap();
        assert_eq!(report.processed, 1);
        assert_eq!(report.rebuilt_pipes, vec![a]);
    }

    #[test]
    fn test_path_edit_queues_connectors() {
        let mut doc = Document::default();
        let (a, _, c) = elbow(&mut doc);
        doc.recompute().unwrap();

        let longer = Wire::line(p(20.0, 0.0, 0.0), Point3::origin()).unwrap();
        let path = PathSpec::Base(BaseCurve::from_wire(longer));
        doc.set_path(a, path).unwrap();
        let report = doc.recompute().unwrap();
        assert_eq!(report.rebuilt_pipes, vec![a]);
        assert_eq!(report.rebuilt_connectors, vec![c]);
        assert!(report.offset_updates.is_empty());
        assert_relative_eq!(
            doc.pipe_entry(a).unwrap().length.unwrap(),
            19.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_placement_edit_rebuilds_only_the_pipe() {
        let mut doc = Document::default();
        let post = doc.add_pipe(Pipe::new(PathSpec::Length(5.0), ProfileSpec::circle(0.5)));
        let arm = doc.add_pipe(leg(Point3::origin(), p(10.0, 0.0, 0.0)));
        doc.add_connector(Connector::new(vec![post, arm], 1.0)).unwrap();
        let report = doc.recompute().unwrap();
        assert!(report.failures.is_empty(), "{:?}", report.failures);

        doc.set_placement(post, Transform::translation(4.0, 0.0, 0.0)).unwrap();
        assert_eq!(doc.pending(), 1);
        let report = doc.recompute().unwrap();
        assert_eq!(report.rebuilt_pipes, vec![post]);
        assert!(report.rebuilt_connectors.is_empty());
        let shape = doc.pipe_entry(post).unwrap().shape.as_ref().unwrap();
        assert_relative_eq!(shape.bounding_box().center().x, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_requests_are_coalesced() {
        let mut doc = Document::default();
        let a = doc.add_pipe(leg(Point3::origin(), p(0.0, 0.0, 5.0)));
        doc.set_profile(a, ProfileSpec::circle(1.0)).unwrap();
        doc.set_profile(a, ProfileSpec::circle(2.0)).unwrap();
        assert_eq!(doc.pending(), 1);
    }

    #[test]
    fn test_shared_end_conflict() {
        init_tracing();
        let mut doc = Document::default();
        let (a, b, first) = elbow(&mut doc);
        let d = doc.add_pipe(leg(Point3::origin(), p(0.0, 0.0, 10.0)));
        let second = doc.add_connector(Connector::new(vec![a, d], 1.0)).unwrap();

        let report = doc.recompute().unwrap();
        assert_eq!(
            report.failures,
            vec![BuildFailure::Connector {
                id: second,
                error: ConnectorError::EndClaimed {
                    pipe: a,
                    end: PipeEnd::End,
                    by: first,
                },
            }]
        );
        assert_eq!(report.failures[0].kind(), ErrorKind::Geometric);
        assert_eq!(doc.claimant(a, PipeEnd::End), Some(first));
        assert_eq!(doc.claimant(b, PipeEnd::Start), Some(first));
        assert_eq!(doc.pipe(d).unwrap().offset_start, 0.0);
        assert!(doc.connector_entry(second).unwrap().shape.is_none());

        // moving the first connector elsewhere frees the end
        let e = doc.add_pipe(leg(Point3::origin(), p(0.0, 0.0, -10.0)));
        doc.set_connector_pipes(first, vec![b, e]).unwrap();
        doc.set_connector_radius(second, 1.0).unwrap();
        let report = doc.recompute().unwrap();
        assert!(report.failures.is_empty(), "{:?}", report.failures);
        assert_eq!(doc.claimant(a, PipeEnd::End), Some(second));
        assert_eq!(doc.claimant(e, PipeEnd::Start), Some(first));
        assert_relative_eq!(doc.pipe(d).unwrap().offset_start, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_failed_connector_releases_its_ends() {
        let mut doc = Document::default();
        let (a, b, first) = elbow(&mut doc);
        doc.recompute().unwrap();
        assert_eq!(doc.claimant(a, PipeEnd::End), Some(first));

        doc.set_connector_radius(first, 0.0).unwrap();
        let report = doc.recompute().unwrap();
        assert_eq!(report.failures[0].kind(), ErrorKind::Skipped);
        assert_eq!(doc.claimant(a, PipeEnd::End), None);
        assert_eq!(doc.claimant(b, PipeEnd::Start), None);

        let d = doc.add_pipe(leg(Point3::origin(), p(0.0, 0.0, 10.0)));
        let second = doc.add_connector(Connector::new(vec![a, d], 1.0)).unwrap();
        let report = doc.recompute().unwrap();
        assert!(report.failures.is_empty(), "{:?}", report.failures);
        assert_eq!(doc.claimant(a, PipeEnd::End), Some(second));
        assert_eq!(doc.claimant(d, PipeEnd::Start), Some(second));
    }

    #[test]
    fn test_zero_radius_leaves_pipes_untouched() {
        let mut doc = Document::default();
        let a = doc.add_pipe(leg(p(10.0, 0.0, 0.0), Point3::origin()));
        let b = doc.add_pipe(leg(Point3::origin(), p(0.0, 10.0, 0.0)));
        let c = doc.add_connector(Connector::new(vec![a, b], 0.0)).unwrap();

        let report = doc.recompute().unwrap();
        assert_eq!(
            report.failures,
            vec![BuildFailure::Connector {
                id: c,
                error: ConnectorError::ZeroRadius,
            }]
        );
        assert!(report.offset_updates.is_empty());
        assert!(doc.connector_entry(c).unwrap().shape.is_none());
        for id in [a, b] {
            let pipe = doc.pipe(id).unwrap();
            assert_eq!(pipe.offset_start, 0.0);
            assert_eq!(pipe.offset_end, 0.0);
        }
        assert_eq!(report.rebuilt_pipes, vec![a, b]);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = BuildSettings {
            coincidence_tolerance: 0.0,
            ..BuildSettings::default()
        };
        assert!(matches!(
            Document::new(settings),
            Err(SettingsError::NonPositive {
                field: "coincidence_tolerance",
                ..
            })
        ));
        assert!(Document::new(BuildSettings::default()).is_ok());
    }

    #[test]
    fn test_clone_passthrough() {
        let mut doc = Document::default();
        let (a, _, c) = elbow(&mut doc);
        let pipe_copy = doc.clone_pipe(a).unwrap();
        let fitting_copy = doc.clone_connector(c).unwrap();
        doc.recompute().unwrap();

        let source = doc.pipe_entry(a).unwrap();
        let copy = doc.pipe_entry(pipe_copy).unwrap();
        assert_eq!(copy.clone_of, Some(a));
        assert_eq!(copy.shape, source.shape);
        assert_eq!(copy.length, source.length);
        assert_eq!(
            doc.connector_entry(fitting_copy).unwrap().shape,
            doc.connector_entry(c).unwrap().shape
        );

        doc.set_profile(a, ProfileSpec::circle(0.8)).unwrap();
        doc.recompute().unwrap();
        assert_eq!(
            doc.pipe_entry(pipe_copy).unwrap().shape,
            doc.pipe_entry(a).unwrap().shape
        );
        assert_eq!(
            doc.clone_pipe(PipeId::default()),
            Err(DocumentError::UnknownPipe(PipeId::default()))
        );
    }

    #[test]
    fn test_failed_build_keeps_last_shape() {
        init_tracing();
        let mut doc = Document::default();
        let a = doc.add_pipe(leg(Point3::origin(), p(0.0, 0.0, 5.0)));
        doc.recompute().unwrap();
        let good = doc.pipe_entry(a).unwrap().shape.clone();
        assert!(good.is_some());

        doc.set_profile(a, ProfileSpec::circle(0.0)).unwrap();
        let report = doc.recompute().unwrap();
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].kind(), ErrorKind::Skipped);
        let entry = doc.pipe_entry(a).unwrap();
        assert_eq!(entry.shape, good);
        assert_eq!(entry.last_error, Some(PipeError::ZeroDimension));
        assert_eq!(entry.ifc_type, "Pipe Segment");
    }

    #[test]
    fn test_cascade_limit() {
        let settings = BuildSettings {
            max_cascade: 1,
            ..BuildSettings::default()
        };
        let mut doc = Document::new(settings).unwrap();
        doc.add_pipe(leg(Point3::origin(), p(0.0, 0.0, 5.0)));
        doc.add_pipe(leg(Point3::origin(), p(5.0, 0.0, 0.0)));
        assert_eq!(
            doc.recompute(),
            Err(DocumentError::CascadeLimit { limit: 1 })
        );
        assert_eq!(doc.pending(), 1);
        assert_eq!(doc.settings().max_cascade, 1);
    }

    #[test]
    fn test_unknown_ids() {
        let mut doc = Document::default();
        let missing = PipeId::default();
        assert_eq!(
            doc.add_connector(Connector::new(vec![missing], 1.0)),
            Err(DocumentError::UnknownPipe(missing))
        );
        assert_eq!(
            doc.set_connector_radius(ConnectorId::default(), 1.0),
            Err(DocumentError::UnknownConnector(ConnectorId::default()))
        );
        let c = doc.add_connector(Connector::new(vec![], 1.0)).unwrap();
        let report = doc.recompute().unwrap();
        assert_eq!(
            report.failures,
            vec![BuildFailure::Connector {
                id: c,
                error: ConnectorError::NotEnoughPipes(0),
            }]
        );
        assert_eq!(doc.connector_entry(c).unwrap().ifc_type, "Pipe Fitting");
    }
}
