//! Nearest classified face lookup over live mesh fragments.
//!
//! Given a world-space point (typically where a tap ray hit the reconstructed
//! surface) and the current set of mesh fragments, find a classified face whose
//! centroid lies within a small radius of that point:
//!
//! - [`FragmentIndex`] - Live fragment collection, mutated by the reconstruction
//! - [`Snapshot`] - Immutable view of the collection taken at query start
//! - [`search`] / [`search_with_stats`] - Synchronous nearest-fragment-first,
//!   first-match search
//! - [`FaceQuery`] / [`QueryHandle`] - The same search run on a rayon pool with
//!   one-shot delivery
//! - [`QueryConfig`] - Cutoff distance and match radius
//! - [`LabelCache`] - Per-classification memo for rendered labels
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. Tracking, mesh
//! reconstruction, ray casting and rendering stay with the host.
//!
//! # Example
//!
//! ```
//! use scene_query::{FaceQuery, FragmentIndex, QueryConfig};
//! use scene_types::{Classification, ClassifiedFace, FragmentId, MeshFragment, Point3};
//! use nalgebra::{Matrix4, Vector3};
//!
//! let index = FragmentIndex::new();
//! index.upsert(
//!     MeshFragment::new(FragmentId::new(1), Matrix4::new_translation(&Vector3::new(0.0, 0.0, -1.0)))
//!         .with_faces(vec![
//!             ClassifiedFace::new(Point3::new(0.0, 0.0, 0.0), Classification::Wall),
//!             ClassifiedFace::new(Point3::new(0.0, -1.0, 0.5), Classification::Floor),
//!         ]),
//! );
//! index.mark_frame_available();
//!
//! let query = FaceQuery::new(QueryConfig::default()).unwrap();
//! let result = query.spawn_in(&index, Point3::new(0.0, -1.0, -0.49)).wait().unwrap();
//!
//! assert_eq!(result.classification(), Classification::Floor);
//! assert_eq!(result.face_index(), Some(1));
//! ```
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod dispatch;
mod error;
mod index;
mod label_cache;
mod result;
mod search;

pub use config::{DEFAULT_CUTOFF_DISTANCE, DEFAULT_MATCH_RADIUS, QueryConfig};
pub use dispatch::{Executor, FaceQuery, QueryHandle, find_nearest_classified_face};
pub use error::{QueryError, Result};
pub use index::{FragmentIndex, Snapshot, SnapshotSource};
pub use label_cache::LabelCache;
pub use result::{QueryResult, ScanStats};
pub use search::{search, search_with_stats};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        FaceQuery, FragmentIndex, QueryConfig, QueryError, QueryHandle, QueryResult, ScanStats,
        Snapshot, SnapshotSource, search, search_with_stats,
    };
}
