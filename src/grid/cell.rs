// src/grid/cell.rs
//! Write handle for one position of a [`ProxyGrid`].
//!
//! A `Cell` owns a working copy of the value taken when it was acquired.
//! Reads and writes go to that copy only; nothing is visible through the grid
//! until the cell is dropped (or [`Cell::commit`]ted), at which point the
//! working value is written back exactly once and the position's hold is
//! released.

use std::fmt;

use super::position::Position;
use super::proxy::ProxyGrid;

/// Pending write to a single grid position. Commits on drop.
#[must_use = "a cell commits its value when dropped; dropping it immediately writes back the current value"]
pub struct Cell<'a, T: Clone + PartialEq, const DIM: usize> {
    grid: &'a ProxyGrid<T, DIM>,
    pos: Position<DIM>,
    value: T,
}

impl<'a, T: Clone + PartialEq, const DIM: usize> Cell<'a, T, DIM> {
    #[inline]
    pub(crate) fn new(grid: &'a ProxyGrid<T, DIM>, pos: Position<DIM>, value: T) -> Self {
        Self { grid, pos, value }
    }

    /// Position this cell writes to.
    #[inline] pub fn position(&self) -> Position<DIM> { self.pos }

    /// Current working value.
    #[inline] pub fn get(&self) -> &T { &self.value }

    #[inline] pub fn get_mut(&mut self) -> &mut T { &mut self.value }

    /// Replace the working value.
    #[inline]
    pub fn set(&mut self, val: T) {
        self.value = val;
    }

    /// Replace the working value, returning the previous one.
    #[inline]
    pub fn replace(&mut self, val: T) -> T {
        std::mem::replace(&mut self.value, val)
    }

    /// Recompute the working value from the current one.
    #[inline]
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) {
        self.value = f(&self.value);
    }

    /// Write the working value back now. Same as dropping the cell.
    #[inline]
    pub fn commit(self) {}
}

impl<T: Clone + PartialEq, const DIM: usize> Drop for Cell<'_, T, DIM> {
    fn drop(&mut self) {
        self.grid.commit(self.pos, &mut self.value);
    }
}

impl<T: Clone + PartialEq + fmt::Debug, const DIM: usize> fmt::Debug for Cell<'_, T, DIM> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("position", self.pos.coords())
            .field("value", &self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn working_value_starts_from_committed_state() {
        let g = ProxyGrid::<i32, 2>::with_default(-1);
        g.set([0, 0], 7);
        let c = g.cell([0, 0]);
        assert_eq!(*c.get(), 7);
        let d = g.cell([5, 5]);
        assert_eq!(*d.get(), -1);
    }

    #[test]
    fn only_the_last_write_is_committed() {
        let g = ProxyGrid::<i32, 2>::new();
        let mut c = g.cell([1, 1]);
        c.set(1);
        assert_eq!(c.replace(2), 1);
        *c.get_mut() += 10;
        c.update(|v| v * 2);
        assert_eq!(g.get([1, 1]), 0);
        c.commit();
        assert_eq!(g.get([1, 1]), 24);
    }

    #[test]
    fn commit_runs_during_unwind() {
        let g = ProxyGrid::<i32, 1>::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut c = g.cell([3]);
            c.set(42);
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(g.get([3]), 42);
        assert_eq!(g.held(), 0);
    }
}
