//! Lookup outcomes and scan instrumentation.

use std::sync::Arc;

use nalgebra::Point3;
use scene_types::{Classification, FragmentId, MeshFragment};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of a nearest classified face lookup.
///
/// `NotFound` is an ordinary answer: no classified face was close enough, or
/// there was nothing to search.
#[derive(Debug, Clone)]
pub enum QueryResult {
    /// A face within the match radius.
    Found {
        /// World-space centroid of the matched face.
        position: Point3<f64>,
        /// Label of the matched face.
        classification: Classification,
        /// The fragment owning the face, as it was in the snapshot.
        fragment: Arc<MeshFragment>,
        /// Index of the face within the fragment's scan order.
        face_index: usize,
    },
    /// No face within the match radius.
    NotFound,
}

impl QueryResult {
    /// Whether a face was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// World-space position of the matched face.
    #[must_use]
    pub const fn position(&self) -> Option<Point3<f64>> {
        match self {
            Self::Found { position, .. } => Some(*position),
            Self::NotFound => None,
        }
    }

    /// Label of the matched face, [`Classification::None`] when not found.
    #[must_use]
    pub const fn classification(&self) -> Classification {
        match self {
            Self::Found { classification, .. } => *classification,
            Self::NotFound => Classification::None,
        }
    }

    /// The owning fragment, if found.
    #[must_use]
    pub fn fragment(&self) -> Option<&Arc<MeshFragment>> {
        match self {
            Self::Found { fragment, .. } => Some(fragment),
            Self::NotFound => None,
        }
    }

    /// Id of the owning fragment, if found.
    #[must_use]
    pub fn fragment_id(&self) -> Option<FragmentId> {
        self.fragment().map(|f| f.id())
    }

    /// Index of the matched face within its fragment, if found.
    #[must_use]
    pub const fn face_index(&self) -> Option<usize> {
        match self {
            Self::Found { face_index, .. } => Some(*face_index),
            Self::NotFound => None,
        }
    }
}

impl PartialEq for QueryResult {
    /// Two results are equal when they name the same face of the same
    /// fragment (by id) at the same position.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Found {
                    position: p1,
                    classification: c1,
                    fragment: f1,
                    face_index: i1,
                },
                Self::Found {
                    position: p2,
                    classification: c2,
                    fragment: f2,
                    face_index: i2,
                },
            ) => p1 == p2 && c1 == c2 && f1.id() == f2.id() && i1 == i2,
            (Self::NotFound, Self::NotFound) => true,
            _ => false,
        }
    }
}

/// Counters describing how much work a lookup did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanStats {
    /// Fragments in the snapshot.
    pub fragments_total: usize,
    /// Fragments whose origin was within the cutoff distance.
    pub fragments_in_range: usize,
    /// Fragments whose faces were (at least partly) scanned.
    pub fragments_scanned: usize,
    /// Faces whose distance to the query point was computed.
    pub faces_examined: usize,
}

impl ScanStats {
    /// Fragments skipped by the cutoff prefilter.
    #[must_use]
    pub const fn fragments_pruned(&self) -> usize {
        self.fragments_total.saturating_sub(self.fragments_in_range)
    }
}
