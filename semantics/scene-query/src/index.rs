//! Live fragment collection with copy-on-read snapshots.
//!
//! The reconstruction side mutates a [`FragmentIndex`] as it adds, refines and
//! drops fragments. Lookups never touch that live state: they take a
//! [`Snapshot`], which is a list of shared fragment handles. Mutations replace
//! or clone a fragment instead of editing it in place, so a snapshot taken
//! before an update keeps seeing the old data.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use hashbrown::HashMap;
use nalgebra::Matrix4;
use scene_types::{FragmentId, MeshFragment};
use tracing::{debug, info, warn};

/// Immutable, point-in-time view of the fragment collection.
///
/// Cloning a snapshot clones the handle list, not the fragments.
///
/// # Example
///
/// ```
/// use scene_query::Snapshot;
/// use scene_types::{FragmentId, MeshFragment};
/// use nalgebra::Matrix4;
///
/// let snapshot = Snapshot::from_fragments([
///     MeshFragment::new(FragmentId::new(1), Matrix4::identity()),
///     MeshFragment::new(FragmentId::new(2), Matrix4::identity()),
/// ]);
/// assert_eq!(snapshot.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    fragments: Vec<Arc<MeshFragment>>,
    generation: u64,
}

impl Snapshot {
    /// Create a snapshot from shared fragment handles.
    #[must_use]
    pub const fn new(fragments: Vec<Arc<MeshFragment>>) -> Self {
        Self {
            fragments,
            generation: 0,
        }
    }

    /// Create a snapshot that owns the given fragments.
    #[must_use]
    pub fn from_fragments(fragments: impl IntoIterator<Item = MeshFragment>) -> Self {
        Self::new(fragments.into_iter().map(Arc::new).collect())
    }

    /// Fragments in index order.
    #[must_use]
    pub fn fragments(&self) -> &[Arc<MeshFragment>] {
        &self.fragments
    }

    /// Iterate fragments in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<MeshFragment>> {
        self.fragments.iter()
    }

    /// Number of fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the snapshot holds no fragments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Total number of faces across all fragments.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.fragments.iter().map(|f| f.face_count()).sum()
    }

    /// Index generation the snapshot was taken at.
    ///
    /// Every mutation of a [`FragmentIndex`] bumps its generation. Snapshots
    /// built directly from fragments report generation 0.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Arc<MeshFragment>;
    type IntoIter = std::slice::Iter<'a, Arc<MeshFragment>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.iter()
    }
}

/// Something that can hand out the current fragment set.
///
/// `None` means no frame is available yet, a normal transient state while
/// tracking starts up. Lookups resolve it to "not found".
pub trait SnapshotSource {
    /// The current snapshot, if a frame is available.
    fn current_snapshot(&self) -> Option<Snapshot>;
}

impl SnapshotSource for Snapshot {
    fn current_snapshot(&self) -> Option<Snapshot> {
        Some(self.clone())
    }
}

impl<T: SnapshotSource + ?Sized> SnapshotSource for Arc<T> {
    fn current_snapshot(&self) -> Option<Snapshot> {
        (**self).current_snapshot()
    }
}

#[derive(Debug, Default)]
struct IndexState {
    fragments: HashMap<FragmentId, Arc<MeshFragment>>,
    /// Ids in order of first insertion.
    order: Vec<FragmentId>,
    frame_available: bool,
    generation: u64,
}

impl IndexState {
    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

/// The authoritative, shared collection of live mesh fragments.
///
/// Single writer (the reconstruction), many readers (lookups). Readers only
/// ever hold the lock long enough to clone the handle list.
///
/// # Example
///
/// ```
/// use scene_query::{FragmentIndex, SnapshotSource};
/// use scene_types::{FragmentId, MeshFragment};
/// use nalgebra::Matrix4;
///
/// let index = FragmentIndex::new();
/// assert!(index.current_snapshot().is_none()); // no frame yet
///
/// index.upsert(MeshFragment::new(FragmentId::new(1), Matrix4::identity()));
/// index.mark_frame_available();
///
/// let snapshot = index.current_snapshot().unwrap();
/// assert_eq!(snapshot.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct FragmentIndex {
    state: RwLock<IndexState>,
}

impl FragmentIndex {
    /// Create an empty index with no frame available.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, IndexState> {
        self.state.read().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("fragment index lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexState> {
        self.state.write().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("fragment index lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Take a snapshot of the current fragment set, in insertion order.
    ///
    /// Valid whether or not a frame has been marked available.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let state = self.read();
        let fragments = state
            .order
            .iter()
            .filter_map(|id| state.fragments.get(id).cloned())
            .collect();
        Snapshot {
            fragments,
            generation: state.generation,
        }
    }

    /// Add a fragment, or replace the one with the same id.
    ///
    /// A replaced fragment keeps its position in snapshot order.
    /// Returns `true` if the id was new.
    pub fn upsert(&self, fragment: MeshFragment) -> bool {
        let id = fragment.id();
        let mut state = self.write();
        let is_new = state.fragments.insert(id, Arc::new(fragment)).is_none();
        if is_new {
            state.order.push(id);
        }
        state.bump();
        debug!(%id, is_new, generation = state.generation, "fragment upserted");
        is_new
    }

    /// Replace the transform of an existing fragment.
    ///
    /// Snapshots already holding the fragment are unaffected. Returns `false`
    /// if no fragment has this id.
    pub fn update_transform(&self, id: FragmentId, transform: Matrix4<f64>) -> bool {
        let mut state = self.write();
        let Some(fragment) = state.fragments.get_mut(&id) else {
            return false;
        };
        Arc::make_mut(fragment).set_transform(transform);
        state.bump();
        true
    }

    /// Remove a fragment. Returns the removed fragment, if any.
    pub fn remove(&self, id: FragmentId) -> Option<Arc<MeshFragment>> {
        let mut state = self.write();
        let removed = state.fragments.remove(&id)?;
        state.order.retain(|other| *other != id);
        state.bump();
        debug!(%id, generation = state.generation, "fragment removed");
        Some(removed)
    }

    /// Drop every fragment and forget the current frame.
    ///
    /// This is what a full reconstruction reset does.
    pub fn clear(&self) {
        let mut state = self.write();
        let dropped = state.fragments.len();
        state.fragments.clear();
        state.order.clear();
        state.frame_available = false;
        state.bump();
        info!(dropped, "fragment index reset");
    }

    /// Record that a tracking frame is available.
    pub fn mark_frame_available(&self) {
        self.write().frame_available = true;
    }

    /// Whether a tracking frame has been recorded since creation or the last
    /// [`clear`](Self::clear).
    #[must_use]
    pub fn has_frame(&self) -> bool {
        self.read().frame_available
    }

    /// Look up a fragment by id.
    #[must_use]
    pub fn get(&self, id: FragmentId) -> Option<Arc<MeshFragment>> {
        self.read().fragments.get(&id).cloned()
    }

    /// Number of live fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().fragments.len()
    }

    /// Whether there are no live fragments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().fragments.is_empty()
    }

    /// Current mutation generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.read().generation
    }
}

impl SnapshotSource for FragmentIndex {
    fn current_snapshot(&self) -> Option<Snapshot> {
        self.has_frame().then(|| self.snapshot())
    }
}
