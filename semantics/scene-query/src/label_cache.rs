//! Per-classification memo for generated label assets.
//!
//! Building a text mesh for a label is expensive, and there are only a handful
//! of classifications. Renderers keep one asset per [`Classification`] and hand
//! out clones of it.

use hashbrown::HashMap;
use scene_types::Classification;

/// Lazily populated map from classification to a rendered asset.
///
/// # Example
///
/// ```
/// use scene_query::LabelCache;
/// use scene_types::Classification;
///
/// let mut cache = LabelCache::new();
/// let mut builds = 0;
///
/// for _ in 0..3 {
///     let text = cache.get_or_insert_with(Classification::Wall, |c| {
///         builds += 1;
///         format!("label:{}", c.name())
///     });
///     assert_eq!(text, "label:Wall");
/// }
/// assert_eq!(builds, 1);
/// ```
#[derive(Debug, Clone)]
pub struct LabelCache<T> {
    entries: HashMap<Classification, T>,
}

impl<T> Default for LabelCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T: Clone> LabelCache<T> {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a clone of the cached asset, building it on first use.
    pub fn get_or_insert_with<F>(&mut self, classification: Classification, build: F) -> T
    where
        F: FnOnce(Classification) -> T,
    {
        self.entries
            .entry(classification)
            .or_insert_with(|| build(classification))
            .clone()
    }

    /// The cached asset, if built.
    #[must_use]
    pub fn get(&self, classification: Classification) -> Option<&T> {
        self.entries.get(&classification)
    }

    /// Whether an asset is cached for this classification.
    #[must_use]
    pub fn contains(&self, classification: Classification) -> bool {
        self.entries.contains_key(&classification)
    }

    /// Number of cached assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached asset.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
