// src/grid/proxy.rs
/*!
A sparse N-D grid addressed through **chained indexing** and **write cells**.

`ProxyGrid<T, DIM>` stores the same data as [`SparseGrid`], but instead of
handing out `&mut T` into its map it hands out [`Cell`]s: handles that hold a
working copy of one cell's value and write it back when dropped.

Semantics
- `grid.index(i).index(j).cell()` binds one axis per step and acquires a `Cell`.
- Acquiring a `Cell` bumps a per-position liveness count and makes sure a slot
  exists (default-valued if the cell was absent).
- Dropping a `Cell` writes its working value into the slot and releases the
  count. The release that brings the count to zero removes the slot if it
  holds the default.
- While a position is held its slot may physically hold the default. `size()`,
  `get()`, `contains()` and `iter()` treat such slots as absent.

All methods take `&self`: cells borrow the grid immutably so several of them
(even for the same position) can be open alongside reads and iteration. State
lives in `RefCell`s and no dynamic borrow outlives a method call, so the grid
is single-threaded (`!Sync`).
*/

use std::cell::RefCell;
use std::fmt;

use ahash::AHashMap;
use num_traits::Zero;

use super::cell::Cell;
use super::position::Position;
use super::sparse::{DebugEntries, SparseGrid};
use super::view::View;

// ============================================================================
// ------------------------------- Struct Def ---------------------------------
// ============================================================================

/// Chained-index sparse grid with commit-on-drop write cells.
pub struct ProxyGrid<T: Clone + PartialEq, const DIM: usize> {
    /// Backing store; may hold default-valued slots for held positions only.
    store: RefCell<SparseGrid<T, DIM>>,
    /// Outstanding cell count per held position (always > 0).
    held: RefCell<AHashMap<Position<DIM>, usize>>,
}

// ============================================================================
// ------------------------------ Constructors --------------------------------
// ============================================================================

impl<T: Clone + PartialEq, const DIM: usize> ProxyGrid<T, DIM> {
    /// Create an empty grid whose absent cells read as `default`.
    pub fn with_default(default: T) -> Self {
        Self::from(SparseGrid::with_default(default))
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

    /// Unwrap into the direct-access grid holding the committed live entries.
    pub fn into_inner(self) -> SparseGrid<T, DIM> {
        let mut store = self.store.into_inner();
        // Leaked cells can leave held default slots behind.
        store.prune_defaults();
        store
    }
}

impl<T: Clone + PartialEq, const DIM: usize> From<SparseGrid<T, DIM>> for ProxyGrid<T, DIM> {
    fn from(grid: SparseGrid<T, DIM>) -> Self {
        Self {
            store: RefCell::new(grid),
            held: RefCell::new(AHashMap::default()),
        }
    }
}

impl<T: Clone + PartialEq + Default, const DIM: usize> Default for ProxyGrid<T, DIM> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// ------------------------------ Write Cells ---------------------------------
// ============================================================================

impl<T: Clone + PartialEq, const DIM: usize> ProxyGrid<T, DIM> {
    /// Start a chained index by binding the first axis.
    #[inline]
    pub fn index(&self, first: isize) -> View<'_, T, DIM> {
        View::start(self, first)
    }

    /// Acquire a write cell for `coords`.
    #[inline]
    pub fn cell(&self, coords: [isize; DIM]) -> Cell<'_, T, DIM> {
        self.cell_at(Position::new(coords))
    }

    /// Acquire a write cell for `pos`.
    ///
    /// The position is held until the returned cell (and every other cell for
    /// it) is dropped.
    pub fn cell_at(&self, pos: Position<DIM>) -> Cell<'_, T, DIM> {
        let outstanding = {
            let mut held = self.held.borrow_mut();
            let count = held.entry(pos).or_insert(0);
            *count += 1;
            *count
        };
        let value = self.store.borrow_mut().slot_mut(pos).clone();
        tracing::trace!(position = %pos, outstanding, "cell acquired");
        Cell::new(self, pos, value)
    }

    /// Write a cell's working value back and release its hold on `pos`.
    ///
    /// The working value is swapped into the slot; `value` receives the
    /// previous slot contents.
    pub(crate) fn commit(&self, pos: Position<DIM>, value: &mut T) {
        let mut store = self.store.borrow_mut();
        std::mem::swap(store.slot_mut(pos), value);

        let mut held = self.held.borrow_mut();
        let remaining = match held.get_mut(&pos) {
            Some(count) => {
                *count -= 1;
                *count
            }
            None => 0,
        };
        tracing::trace!(position = %pos, outstanding = remaining, "cell committed");

        if remaining == 0 {
            held.remove(&pos);
            if store.discard_if_default(&pos) {
                tracing::debug!(position = %pos, "released cell holds default, slot elided");
            }
        }
    }

    /// Number of cells currently open for `coords`.
    pub fn outstanding(&self, coords: [isize; DIM]) -> usize {
        self.held.borrow().get(&Position::new(coords)).copied().unwrap_or(0)
    }

    /// Number of positions with at least one open cell.
    pub fn held(&self) -> usize {
        self.held.borrow().len()
    }
}

// ============================================================================
// ---------------------------- Direct Access ---------------------------------
// ============================================================================

impl<T: Clone + PartialEq, const DIM: usize> ProxyGrid<T, DIM> {
    /// Rank (number of coordinate components).
    #[inline] pub fn rank(&self) -> usize { DIM }

    /// The value every absent cell reads as.
    pub fn default_value(&self) -> T {
        self.store.borrow().default_value().clone()
    }

    /// Committed value at `coords`, or the default if absent.
    pub fn get(&self, coords: [isize; DIM]) -> T {
        self.store.borrow().get(coords).clone()
    }

    /// Committed value at `pos`, or the default if absent.
    pub fn get_at(&self, pos: &Position<DIM>) -> T {
        self.store.borrow().get_at(pos).clone()
    }

    /// Write `val` at `coords` without a cell.
    ///
    /// On a held position the slot is kept even for the default value; the
    /// last cell released there decides whether it stays.
    pub fn set(&self, coords: [isize; DIM], val: T) {
        self.set_at(Position::new(coords), val);
    }

    pub fn set_at(&self, pos: Position<DIM>, val: T) {
        let mut store = self.store.borrow_mut();
        if self.held.borrow().contains_key(&pos) {
            store.store_raw(pos, val);
        } else {
            store.set_at(pos, val);
        }
    }

    /// True if a live (non-default) value is committed at `coords`.
    pub fn contains(&self, coords: [isize; DIM]) -> bool {
        let store = self.store.borrow();
        store
            .raw_get(&Position::new(coords))
            .is_some_and(|v| v != store.default_value())
    }

    /// Number of live entries.
    ///
    /// Held slots that currently hold the default are not counted, so this is
    /// O(held positions) on top of the map's own length.
    pub fn size(&self) -> usize {
        let store = self.store.borrow();
        let held = self.held.borrow();
        let default = store.default_value();
        let held_default = held
            .keys()
            .filter(|pos| store.raw_get(pos).is_some_and(|v| v == default))
            .count();
        store.physical_len() - held_default
    }

    #[inline] pub fn len(&self) -> usize { self.size() }

    #[inline] pub fn is_empty(&self) -> bool { self.size() == 0 }

    /// Drop every committed entry.
    ///
    /// Held positions keep a default-valued slot so their open cells can still
    /// commit into it.
    pub fn clear(&self) {
        let mut store = self.store.borrow_mut();
        store.clear();
        let default = store.default_value().clone();
        for pos in self.held.borrow().keys() {
            store.store_raw(*pos, default.clone());
        }
    }

    /// Snapshot of the live entries at call time, in coordinate order.
    ///
    /// The returned iterator owns its items, so the grid may be written to or
    /// have cells opened while it is being consumed.
    pub fn iter(&self) -> LiveEntries<T, DIM> {
        let store = self.store.borrow();
        let default = store.default_value();
        let items: Vec<(Position<DIM>, T)> = store
            .iter()
            .filter(|(_, v)| *v != default)
            .map(|(pos, v)| (pos, v.clone()))
            .collect();
        LiveEntries { inner: items.into_iter() }
    }

    /// Copy of the committed live state as a direct-access grid.
    pub fn to_sparse(&self) -> SparseGrid<T, DIM> {
        let mut grid = self.store.borrow().clone();
        grid.prune_defaults();
        grid
    }
}

// ============================================================================
// ------------------------------- Iteration ----------------------------------
// ============================================================================

/// Owned snapshot iterator over the live entries of a [`ProxyGrid`].
pub struct LiveEntries<T, const DIM: usize> {
    inner: std::vec::IntoIter<(Position<DIM>, T)>,
}

impl<T, const DIM: usize> Iterator for LiveEntries<T, DIM> {
    type Item = (Position<DIM>, T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T, const DIM: usize> ExactSizeIterator for LiveEntries<T, DIM> {}

impl<T, const DIM: usize> std::iter::FusedIterator for LiveEntries<T, DIM> {}

impl<T: Clone + PartialEq, const DIM: usize> IntoIterator for &ProxyGrid<T, DIM> {
    type Item = (Position<DIM>, T);
    type IntoIter = LiveEntries<T, DIM>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// ------------------------------ Std Traits ----------------------------------
// ============================================================================

/// Clones the committed live state. Open cells stay bound to the source grid.
impl<T: Clone + PartialEq, const DIM: usize> Clone for ProxyGrid<T, DIM> {
    fn clone(&self) -> Self {
        Self::from(self.to_sparse())
    }
}

impl<T: Clone + PartialEq + fmt::Debug, const DIM: usize> fmt::Debug for ProxyGrid<T, DIM> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let live = self.to_sparse();
        let held = self.held.borrow();
        let mut held: Vec<_> = held.iter().map(|(p, n)| (*p.coords(), *n)).collect();
        held.sort_unstable();
        f.debug_struct("ProxyGrid")
            .field("default", live.default_value())
            .field("entries", &DebugEntries(live.entries()))
            .field("held", &held)
            .finish()
    }
}
