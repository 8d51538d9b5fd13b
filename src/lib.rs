//! Sparse N-dimensional grids that store only cells differing from a
//! per-grid default value.
//!
//! ```
//! use sparse_grid::{ProxyGrid, SparseGrid};
//!
//! let mut g = SparseGrid::<i32, 3>::new();
//! g.set([0, 1, 2], 9);
//! assert_eq!(*g.get([0, 1, 2]), 9);
//! g.set([0, 1, 2], 0);
//! assert!(g.is_empty());
//!
//! let p = ProxyGrid::<i32, 2>::new();
//! let mut cell = p.index(1).index(2).cell();
//! cell.set(28);
//! assert_eq!(p.size(), 0); // not committed yet
//! drop(cell);
//! assert_eq!(p.get([1, 2]), 28);
//! ```

pub mod error;
pub mod grid;

pub use error::{GridError, Result};
pub use grid::{Cell, Iter, LiveEntries, Position, ProxyGrid, Snapshot, SparseGrid, View};
