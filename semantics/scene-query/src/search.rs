//! Nearest classified face search.
//!
//! The search is nearest-fragment-first and stops at the first match:
//!
//! 1. Measure each fragment's origin distance to the query point.
//! 2. Drop fragments farther than the cutoff distance.
//! 3. Stable-sort the rest by that distance (ties keep snapshot order).
//! 4. Scan fragments in that order and faces in stored order, mapping each
//!    face centroid to world space.
//! 5. Return the first face within the match radius.
//!
//! The answer is not a global minimum. A closer face later in scan order is
//! never considered once an earlier face matched. Fragment origins stand in
//! for fragment extent, so a large fragment whose origin is beyond the cutoff
//! is skipped even if its surface passes near the query point.

use std::sync::Arc;

use nalgebra::Point3;
use scene_types::MeshFragment;
use tracing::{debug, trace};

use crate::config::QueryConfig;
use crate::index::Snapshot;
use crate::result::{QueryResult, ScanStats};

/// Run a lookup on the calling thread.
///
/// # Example
///
/// ```
/// use scene_query::{search, QueryConfig, Snapshot};
/// use scene_types::{Classification, ClassifiedFace, FragmentId, MeshFragment, Point3};
/// use nalgebra::Matrix4;
///
/// let wall = MeshFragment::new(FragmentId::new(1), Matrix4::identity())
///     .with_faces(vec![ClassifiedFace::new(Point3::origin(), Classification::Wall)]);
/// let snapshot = Snapshot::from_fragments([wall]);
///
/// let result = search(&Point3::new(0.02, 0.0, 0.0), &snapshot, &QueryConfig::default());
/// assert_eq!(result.classification(), Classification::Wall);
/// assert_eq!(result.position(), Some(Point3::origin()));
/// ```
#[must_use]
pub fn search(point: &Point3<f64>, snapshot: &Snapshot, config: &QueryConfig) -> QueryResult {
    search_with_stats(point, snapshot, config).0
}

/// Run a lookup on the calling thread and report how much work it did.
#[must_use]
pub fn search_with_stats(
    point: &Point3<f64>,
    snapshot: &Snapshot,
    config: &QueryConfig,
) -> (QueryResult, ScanStats) {
    let (result, stats) = scan(point, snapshot, config);
    debug!(
        found = result.is_found(),
        classification = %result.classification(),
        fragments_total = stats.fragments_total,
        fragments_in_range = stats.fragments_in_range,
        fragments_scanned = stats.fragments_scanned,
        faces_examined = stats.faces_examined,
        "classified face search finished"
    );
    (result, stats)
}

/// Fragments within the cutoff, nearest origin first.
///
/// NaN distances (from malformed transforms) are dropped with the out-of-range
/// fragments.
fn candidates<'a>(
    point: &Point3<f64>,
    snapshot: &'a Snapshot,
    cutoff_distance: f64,
) -> Vec<(f64, &'a Arc<MeshFragment>)> {
    let mut in_range: Vec<_> = snapshot
        .iter()
        .map(|fragment| (nalgebra::distance(&fragment.origin(), point), fragment))
        .filter(|(distance, _)| *distance <= cutoff_distance)
        .collect();
    // `sort_by` is stable, so equal distances keep snapshot order.
    in_range.sort_by(|a, b| a.0.total_cmp(&b.0));
    in_range
}

fn scan(
    point: &Point3<f64>,
    snapshot: &Snapshot,
    config: &QueryConfig,
) -> (QueryResult, ScanStats) {
    let mut stats = ScanStats {
        fragments_total: snapshot.len(),
        ..ScanStats::default()
    };

    let ordered = candidates(point, snapshot, config.cutoff_distance);
    stats.fragments_in_range = ordered.len();

    for (origin_distance, fragment) in ordered {
        stats.fragments_scanned += 1;
        trace!(
            id = %fragment.id(),
            origin_distance,
            faces = fragment.face_count(),
            "scanning fragment"
        );

        for (face_index, (position, face)) in fragment.world_faces().enumerate() {
            stats.faces_examined += 1;
            if nalgebra::distance(&position, point) <= config.match_radius {
                let result = QueryResult::Found {
                    position,
                    classification: face.classification,
                    fragment: Arc::clone(fragment),
                    face_index,
                };
                return (result, stats);
            }
        }
    }

    (QueryResult::NotFound, stats)
}
