// src/grid/sparse.rs
/*
    An ordered sparse N-D grid with a per-instance default value.
        - Storage: `BTreeMap<Position<DIM>, T>`; cells equal to the default are implicit (not stored).
        - Iteration follows coordinate order (lexicographic), never insertion order.
        - Reads and writes take all `DIM` coordinates at once; no write handles are produced.
*/

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::iter::FusedIterator;

use num_traits::Zero;

use super::position::Position;



// ===================================================================
// --------------------------- Struct Def ----------------------------
// ===================================================================

/// Direct-access sparse grid.
///
/// # Invariants
/// - `data` never holds a value equal to `default`.
#[derive(Clone, PartialEq)]
pub struct SparseGrid<T, const DIM: usize> {
    default: T,
    data: BTreeMap<Position<DIM>, T>, // position -> value (non-default)
}





// ===================================================================
// ----------------------------- Basics ------------------------------
// ===================================================================

impl<T: Clone + PartialEq, const DIM: usize> SparseGrid<T, DIM> {
    /// Create an empty grid whose absent cells read as `default`.
    pub fn with_default(default: T) -> Self {
        assert!(DIM >= 1, "grid rank must be >= 1");
        Self { default, data: BTreeMap::new() }
    }

    /// Create an empty grid using `T::default()` as the absent value.
    #[inline]
    pub fn new() -> Self
    where
        T: Default,
    {
        Self::with_default(T::default())
    }

    /// Create an empty grid using `T::zero()` as the absent value.
    #[inline]
    pub fn zeroed() -> Self
    where
        T: Zero,
    {
        Self::with_default(T::zero())
    }

    /// Rank (number of coordinate components).
    #[inline] pub fn rank(&self) -> usize { DIM }

    /// The value every absent cell reads as.
    #[inline] pub fn default_value(&self) -> &T { &self.default }

    /// Number of live (non-default) entries.
    #[inline] pub fn size(&self) -> usize { self.data.len() }

    #[inline] pub fn len(&self) -> usize { self.data.len() }

    /// True if no live entry is stored.
    #[inline] pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// Value at `pos`, or the default if absent.
    #[inline]
    pub fn get_at(&self, pos: &Position<DIM>) -> &T {
        self.data.get(pos).unwrap_or(&self.default)
    }

    /// Value at `coords`, or the default if absent.
    #[inline]
    pub fn get(&self, coords: [isize; DIM]) -> &T {
        self.get_at(&Position::new(coords))
    }

    /// Set value at `pos`. Writing the default removes the entry.
    pub fn set_at(&mut self, pos: Position<DIM>, val: T) {
        if val == self.default { self.data.remove(&pos); }
        else { self.data.insert(pos, val); }
    }

    /// Set value at `coords`. Writing the default removes the entry.
    #[inline]
    pub fn set(&mut self, coords: [isize; DIM], val: T) {
        self.set_at(Position::new(coords), val);
    }

    /// True if a live entry is stored at `coords`.
    #[inline]
    pub fn contains(&self, coords: [isize; DIM]) -> bool {
        self.data.contains_key(&Position::new(coords))
    }

    /// Drop every entry. The default value is kept.
    pub fn clear(&mut self) {
        tracing::debug!(entries = self.data.len(), "clearing sparse grid");
        self.data.clear();
    }

    /// Iterate over `(position, &value)` of live entries in coordinate order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, DIM> {
        Iter { inner: self.data.iter() }
    }
}

impl<T: Clone + PartialEq + Default, const DIM: usize> Default for SparseGrid<T, DIM> {
    fn default() -> Self {
        Self::new()
    }
}





// ===================================================================
// ------------------------- Raw Slot Access -------------------------
// ===================================================================
// Used by `ProxyGrid` to keep a held cell's slot alive while it reads as the
// default. These bypass the elision invariant; the caller restores it.

impl<T: Clone + PartialEq, const DIM: usize> SparseGrid<T, DIM> {
    /// Stored slot at `pos`, inserting the default if absent.
    pub(crate) fn slot_mut(&mut self, pos: Position<DIM>) -> &mut T {
        let default = &self.default;
        self.data.entry(pos).or_insert_with(|| default.clone())
    }

    /// Store `val` at `pos` even if it equals the default.
    pub(crate) fn store_raw(&mut self, pos: Position<DIM>, val: T) {
        self.data.insert(pos, val);
    }

    /// Remove the slot at `pos` if it holds the default. Returns true on removal.
    pub(crate) fn discard_if_default(&mut self, pos: &Position<DIM>) -> bool {
        match self.data.get(pos) {
            Some(v) if *v == self.default => {
                self.data.remove(pos);
                true
            }
            _ => false,
        }
    }

    /// Stored slot at `pos`, default-valued or not.
    #[inline]
    pub(crate) fn raw_get(&self, pos: &Position<DIM>) -> Option<&T> {
        self.data.get(pos)
    }

    /// Number of physically stored slots.
    #[inline]
    pub(crate) fn physical_len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub(crate) fn entries(&self) -> &BTreeMap<Position<DIM>, T> {
        &self.data
    }

    /// Drop every default-valued slot.
    pub(crate) fn prune_defaults(&mut self) {
        let default = &self.default;
        self.data.retain(|_, v| v != default);
    }
}





// ===================================================================
// ---------------------- Convenience Constructors -------------------
// ===================================================================

impl<T: Clone + PartialEq, const DIM: usize> SparseGrid<T, DIM> {
    /// Build from `(coords, value)` pairs; default values are skipped and later
    /// pairs overwrite earlier ones at the same coordinate.
    pub fn from_entries(default: T, entries: impl IntoIterator<Item = ([isize; DIM], T)>) -> Self {
        let mut grid = Self::with_default(default);
        for (coords, v) in entries {
            grid.set(coords, v);
        }
        grid
    }
}





// ===================================================================
// ----------------------------- Iteration ---------------------------
// ===================================================================

/// Borrowing iterator over the live entries of a [`SparseGrid`].
pub struct Iter<'a, T, const DIM: usize> {
    inner: btree_map::Iter<'a, Position<DIM>, T>,
}

impl<'a, T, const DIM: usize> Iterator for Iter<'a, T, DIM> {
    type Item = (Position<DIM>, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(pos, v)| (*pos, v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T, const DIM: usize> ExactSizeIterator for Iter<'_, T, DIM> {}

impl<T, const DIM: usize> FusedIterator for Iter<'_, T, DIM> {}

impl<'a, T: Clone + PartialEq, const DIM: usize> IntoIterator for &'a SparseGrid<T, DIM> {
    type Item = (Position<DIM>, &'a T);
    type IntoIter = Iter<'a, T, DIM>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, const DIM: usize> fmt::Debug for SparseGrid<T, DIM> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparseGrid")
            .field("default", &self.default)
            .field("entries", &DebugEntries(&self.data))
            .finish()
    }
}

pub(crate) struct DebugEntries<'a, T, const DIM: usize>(pub(crate) &'a BTreeMap<Position<DIM>, T>);

impl<T: fmt::Debug, const DIM: usize> fmt::Debug for DebugEntries<'_, T, DIM> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter().map(|(p, v)| (p.coords(), v))).finish()
    }
}
