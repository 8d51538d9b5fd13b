// src/grid/view.rs
//! Chained single-axis indexing into a [`ProxyGrid`].
//!
//! A `View` carries a fixed `[isize; DIM]` buffer and the number of axes
//! bound so far. Each `index` call binds the next axis; once all `DIM` axes are
//! bound, `cell` acquires the write handle. Nothing touches the grid before
//! that point.

use std::fmt;

use crate::error::{GridError, Result};

use super::cell::Cell;
use super::proxy::ProxyGrid;

/// Partially bound coordinate on its way to a [`Cell`].
#[must_use = "a view does nothing until `cell` is called"]
pub struct View<'a, T: Clone + PartialEq, const DIM: usize> {
    grid: &'a ProxyGrid<T, DIM>,
    coords: [isize; DIM],
    bound: usize,
}

impl<'a, T: Clone + PartialEq, const DIM: usize> View<'a, T, DIM> {
    pub(crate) fn start(grid: &'a ProxyGrid<T, DIM>, first: isize) -> Self {
        View { grid, coords: [0; DIM], bound: 0 }.index(first)
    }

    /// Bind the next axis to `component`.
    ///
    /// # Panics
    /// Panics if all `DIM` axes are already bound.
    pub fn index(mut self, component: isize) -> Self {
        assert!(
            self.bound < DIM,
            "chained index overflow: grid rank is {DIM}, got a component for axis {}",
            self.bound
        );
        self.coords[self.bound] = component;
        self.bound += 1;
        self
    }

    /// Number of axes bound so far.
    #[inline] pub fn bound(&self) -> usize { self.bound }

    /// True once every axis is bound.
    #[inline] pub fn is_complete(&self) -> bool { self.bound == DIM }

    /// Acquire the write cell for the bound coordinate.
    pub fn try_cell(self) -> Result<Cell<'a, T, DIM>> {
        if !self.is_complete() {
            return Err(GridError::IncompleteIndex { bound: self.bound, rank: DIM });
        }
        Ok(self.grid.cell(self.coords))
    }

    /// Acquire the write cell for the bound coordinate, panicking if the chain
    /// is incomplete.
    #[inline]
    pub fn cell(self) -> Cell<'a, T, DIM> {
        self.try_cell().unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<T: Clone + PartialEq, const DIM: usize> fmt::Debug for View<'_, T, DIM> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("bound", &&self.coords[..self.bound])
            .field("rank", &DIM)
            .finish()
    }
}
