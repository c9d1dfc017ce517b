//! Dense indexing for sparse integer ids.
//!
//! Node and job ids arrive as arbitrary `i64` values. Every algorithm in the
//! crate works on dense `usize` indices instead, so adjacency lists, distance
//! vectors and DP tables can be addressed by position.

use rustc_hash::FxHashMap;

/// Bidirectional mapping between external ids and dense indices.
///
/// Indices are assigned in ascending id order, which makes "lowest index"
/// and "lowest id" the same tie-break everywhere.
#[derive(Debug, Clone, Default)]
pub struct IdIndex {
    to_index: FxHashMap<i64, usize>,
    ids: Vec<i64>,
}

impl IdIndex {
    /// Build an index from ids in any order. Duplicates collapse.
    pub fn from_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        let mut ids: Vec<i64> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();

        let mut to_index = FxHashMap::with_capacity_and_hasher(ids.len(), Default::default());
        for (idx, &id) in ids.iter().enumerate() {
            to_index.insert(id, idx);
        }
        Self { to_index, ids }
    }

    /// Dense index for an id, if present.
    #[inline]
    pub fn get(&self, id: i64) -> Option<usize> {
        self.to_index.get(&id).copied()
    }

    /// External id for a dense index.
    ///
    /// Panics if `idx` is out of range; indices only ever come from this index.
    #[inline]
    pub fn id(&self, idx: usize) -> i64 {
        self.ids[idx]
    }

    #[inline]
    pub fn contains(&self, id: i64) -> bool {
        self.to_index.contains_key(&id)
    }

    /// All ids in ascending order (equivalently, in index order).
    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
