//! Off-thread execution of lookups.
//!
//! A lookup is requested from latency-sensitive code (a touch handler on the
//! render thread), so [`FaceQuery`] runs each search as one task on a rayon
//! pool and hands back the result through a one-shot callback or a
//! [`QueryHandle`].
//!
//! Each request is independent. Nothing is cancelled or debounced, and two
//! requests may complete in either order. A caller that no longer wants a
//! result drops it (or the handle); the search itself always runs to the end.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use nalgebra::Point3;
use rayon::ThreadPool;
use tracing::debug;

use crate::config::QueryConfig;
use crate::error::{QueryError, Result};
use crate::index::{Snapshot, SnapshotSource};
use crate::result::QueryResult;
use crate::search::search;

/// Where lookup tasks run.
#[derive(Debug, Clone, Default)]
pub enum Executor {
    /// The process-wide rayon pool.
    #[default]
    Global,
    /// A caller-owned rayon pool.
    Pool(Arc<ThreadPool>),
}

impl Executor {
    fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        match self {
            Self::Global => rayon::spawn(job),
            Self::Pool(pool) => pool.spawn(job),
        }
    }
}

/// Asynchronous front end for nearest classified face lookups.
///
/// # Example
///
/// ```
/// use scene_query::{FaceQuery, QueryConfig, Snapshot};
/// use scene_types::{Classification, ClassifiedFace, FragmentId, MeshFragment, Point3};
/// use nalgebra::Matrix4;
///
/// let floor = MeshFragment::new(FragmentId::new(1), Matrix4::identity())
///     .with_faces(vec![ClassifiedFace::new(Point3::origin(), Classification::Floor)]);
/// let snapshot = Snapshot::from_fragments([floor]);
///
/// let query = FaceQuery::new(QueryConfig::default()).unwrap();
/// let handle = query.spawn(Point3::new(0.0, 0.01, 0.0), Some(snapshot));
///
/// let result = handle.wait().unwrap();
/// assert_eq!(result.classification(), Classification::Floor);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FaceQuery {
    config: QueryConfig,
    executor: Executor,
}

impl FaceQuery {
    /// Create a query front end running on the global rayon pool.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidConfig`] if the config fails validation.
    pub fn new(config: QueryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            executor: Executor::Global,
        })
    }

    /// Run lookups on a caller-owned pool instead of the global one.
    #[must_use]
    pub fn with_thread_pool(mut self, pool: Arc<ThreadPool>) -> Self {
        self.executor = Executor::Pool(pool);
        self
    }

    /// The thresholds used for every lookup.
    #[must_use]
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// The executor lookups are spawned on.
    #[must_use]
    pub const fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Look up the face nearest `point` and pass the result to `on_complete`.
    ///
    /// With no snapshot, `on_complete` receives [`QueryResult::NotFound`]
    /// immediately on the calling thread. Otherwise the search runs on the
    /// executor and `on_complete` is called exactly once on the worker thread;
    /// marshaling the result to another context is up to the callback.
    pub fn find<F>(&self, point: Point3<f64>, snapshot: Option<Snapshot>, on_complete: F)
    where
        F: FnOnce(QueryResult) + Send + 'static,
    {
        let Some(snapshot) = snapshot else {
            debug!("no frame available, resolving lookup as not found");
            on_complete(QueryResult::NotFound);
            return;
        };

        let config = self.config;
        debug!(
            x = point.x,
            y = point.y,
            z = point.z,
            fragments = snapshot.len(),
            generation = snapshot.generation(),
            "dispatching classified face lookup"
        );
        self.executor.spawn(move || {
            let result = search(&point, &snapshot, &config);
            on_complete(result);
        });
    }

    /// Like [`find`](Self::find), taking the snapshot from `source` now.
    pub fn find_in<S, F>(&self, source: &S, point: Point3<f64>, on_complete: F)
    where
        S: SnapshotSource + ?Sized,
        F: FnOnce(QueryResult) + Send + 'static,
    {
        self.find(point, source.current_snapshot(), on_complete);
    }

    /// Start a lookup and return a handle to its eventual result.
    #[must_use = "dropping the handle discards the result"]
    pub fn spawn(&self, point: Point3<f64>, snapshot: Option<Snapshot>) -> QueryHandle {
        let (tx, rx) = mpsc::sync_channel(1);
        self.find(point, snapshot, move |result| {
            // The receiver may already be gone; the result is then discarded.
            let _ = tx.send(result);
        });
        QueryHandle { rx }
    }

    /// Like [`spawn`](Self::spawn), taking the snapshot from `source` now.
    #[must_use = "dropping the handle discards the result"]
    pub fn spawn_in<S>(&self, source: &S, point: Point3<f64>) -> QueryHandle
    where
        S: SnapshotSource + ?Sized,
    {
        self.spawn(point, source.current_snapshot())
    }
}

/// Start a lookup on the global pool with the given thresholds.
///
/// # Errors
///
/// Returns [`QueryError::InvalidConfig`] if the config fails validation.
pub fn find_nearest_classified_face(
    point: Point3<f64>,
    snapshot: Option<Snapshot>,
    config: QueryConfig,
) -> Result<QueryHandle> {
    Ok(FaceQuery::new(config)?.spawn(point, snapshot))
}

/// Pending result of one lookup.
///
/// The result can be taken once. Later calls report
/// [`QueryError::Disconnected`].
#[derive(Debug)]
pub struct QueryHandle {
    rx: Receiver<QueryResult>,
}

impl QueryHandle {
    /// Block until the result arrives.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Disconnected`] if the worker went away without
    /// delivering, or the result was already taken.
    pub fn wait(self) -> Result<QueryResult> {
        self.rx.recv().map_err(|_| QueryError::Disconnected)
    }

    /// Block for at most `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Timeout`] if nothing arrived in time, or
    /// [`QueryError::Disconnected`] as for [`wait`](Self::wait).
    pub fn wait_timeout(&self, timeout: Duration) -> Result<QueryResult> {
        self.rx.recv_timeout(timeout).map_err(|e| match e {
            RecvTimeoutError::Timeout => QueryError::timeout(timeout),
            RecvTimeoutError::Disconnected => QueryError::Disconnected,
        })
    }

    /// Take the result if it is ready, without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Disconnected`] as for [`wait`](Self::wait).
    pub fn try_result(&self) -> Result<Option<QueryResult>> {
        match self.rx.try_recv() {
            Ok(result) => Ok(Some(result)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(QueryError::Disconnected),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::index::FragmentIndex;
    use nalgebra::{Matrix4, Vector3};
    use scene_types::{Classification, ClassifiedFace, FragmentId, MeshFragment};
    use std::sync::{Barrier, Mutex};
    use std::thread::{self, ThreadId};

    const WAIT: Duration = Duration::from_secs(10);

    fn wall_snapshot() -> Snapshot {
        Snapshot::from_fragments([MeshFragment::new(FragmentId::new(1), Matrix4::identity())
            .with_faces(vec![ClassifiedFace::new(
                Point3::origin(),
                Classification::Wall,
            )])])
    }

    #[test]
    fn rejects_invalid_config() {
        let config = QueryConfig::default().with_match_radius(f64::NAN);
        assert!(matches!(
            FaceQuery::new(config),
            Err(QueryError::InvalidConfig(_))
        ));
        assert!(find_nearest_classified_face(Point3::origin(), None, config).is_err());
    }

    #[test]
    fn match_radius_wider_than_cutoff_still_finds_face() {
        let config = QueryConfig::default()
            .with_cutoff_distance(0.03)
            .with_match_radius(0.05);
        let point = Point3::new(0.02, 0.0, 0.0);
        assert_eq!(
            search(&point, &wall_snapshot(), &config).classification(),
            Classification::Wall
        );

        let handle = find_nearest_classified_face(point, Some(wall_snapshot()), config).unwrap();
        let result = handle.wait_timeout(WAIT).unwrap();
        assert_eq!(result.classification(), Classification::Wall);

        let query = FaceQuery::new(config).unwrap();
        assert!(query.spawn(point, Some(wall_snapshot())).wait().unwrap().is_found());
    }

    #[test]
    fn missing_snapshot_resolves_immediately_on_caller_thread() {
        let query = FaceQuery::default();
        let caller = thread::current().id();
        let seen: Arc<Mutex<Option<(ThreadId, QueryResult)>>> = Arc::default();

        let sink = Arc::clone(&seen);
        query.find(Point3::origin(), None, move |result| {
            *sink.lock().unwrap() = Some((thread::current().id(), result));
        });

        let (thread_id, result) = seen.lock().unwrap().take().expect("callback not invoked");
        assert_eq!(thread_id, caller);
        assert_eq!(result, QueryResult::NotFound);
    }

    #[test]
    fn callback_runs_once_with_found_result() {
        let query = FaceQuery::default();
        let (tx, rx) = mpsc::channel();
        query.find(Point3::new(0.0, 0.0, 0.03), Some(wall_snapshot()), move |result| {
            tx.send(result).unwrap();
        });

        let result = rx.recv_timeout(WAIT).unwrap();
        assert_eq!(result.classification(), Classification::Wall);
        // Sender dropped after the single delivery.
        assert!(rx.recv_timeout(WAIT).is_err());
    }

    #[test]
    fn handle_delivers_result() {
        let query = FaceQuery::default();
        let handle = query.spawn(Point3::new(0.01, 0.0, 0.0), Some(wall_snapshot()));
        let result = handle.wait_timeout(WAIT).unwrap();
        assert!(result.is_found());
        // Only one result is ever sent.
        assert!(!matches!(handle.try_result(), Ok(Some(_))));
    }

    #[test]
    fn handle_without_snapshot_is_ready_at_once() {
        let handle = FaceQuery::default().spawn(Point3::origin(), None);
        assert_eq!(handle.try_result().unwrap(), Some(QueryResult::NotFound));
    }

    #[test]
    fn find_in_reads_source_at_call_time() {
        let index = Arc::new(FragmentIndex::new());
        let query = FaceQuery::default();

        let before_frame = query.spawn_in(&index, Point3::origin());
        assert_eq!(before_frame.wait().unwrap(), QueryResult::NotFound);

        index.upsert(
            MeshFragment::new(FragmentId::new(3), Matrix4::identity()).with_faces(vec![
                ClassifiedFace::new(Point3::origin(), Classification::Seat),
            ]),
        );
        index.mark_frame_available();

        let (tx, rx) = mpsc::channel();
        query.find_in(index.as_ref(), Point3::origin(), move |result| {
            tx.send(result).unwrap();
        });
        // Mutating after dispatch does not affect the running lookup.
        index.clear();

        let result = rx.recv_timeout(WAIT).unwrap();
        assert_eq!(result.classification(), Classification::Seat);
    }

    #[test]
    fn result_keeps_snapshot_fragment_after_index_update() {
        let index = FragmentIndex::new();
        index.upsert(
            MeshFragment::new(FragmentId::new(8), Matrix4::identity()).with_faces(vec![
                ClassifiedFace::new(Point3::origin(), Classification::Table),
            ]),
        );
        index.mark_frame_available();

        let handle = FaceQuery::default().spawn_in(&index, Point3::origin());
        index.update_transform(
            FragmentId::new(8),
            Matrix4::new_translation(&Vector3::new(5.0, 0.0, 0.0)),
        );

        let result = handle.wait().unwrap();
        let fragment = result.fragment().unwrap();
        assert_eq!(fragment.origin(), Point3::origin());
        assert_eq!(
            index.get(FragmentId::new(8)).unwrap().origin(),
            Point3::new(5.0, 0.0, 0.0)
        );
    }

    #[test]
    fn overlapping_queries_both_complete() {
        let pool = Arc::new(
            rayon::ThreadPoolBuilder::new()
                .num_threads(2)
                .build()
                .unwrap(),
        );
        let query = FaceQuery::default().with_thread_pool(Arc::clone(&pool));
        assert!(matches!(query.executor(), Executor::Pool(_)));

        // Hold both workers until both lookups are in flight.
        let gate = Arc::new(Barrier::new(3));
        let (tx, rx) = mpsc::channel();
        for (i, point) in [Point3::origin(), Point3::new(3.0, 0.0, 0.0)]
            .into_iter()
            .enumerate()
        {
            let gate = Arc::clone(&gate);
            let tx = tx.clone();
            query.find(point, Some(wall_snapshot()), move |result| {
                gate.wait();
                tx.send((i, result)).unwrap();
            });
        }
        drop(tx);
        gate.wait();

        let mut results: Vec<_> = rx.iter().collect();
        results.sort_by_key(|(i, _)| *i);
        assert_eq!(results.len(), 2);
        assert!(results[0].1.is_found());
        assert!(!results[1].1.is_found());
    }
}
