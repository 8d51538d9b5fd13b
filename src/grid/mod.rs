// src/grid/mod.rs
//! Sparse fixed-rank grids.
//!
//! - [`SparseGrid`]: direct `get`/`set` over full coordinates.
//! - [`ProxyGrid`]: chained indexing through [`View`]s ending in a [`Cell`]
//!   that commits on drop.

pub mod cell;
pub mod position;
pub mod proxy;
pub mod snapshot;
pub mod sparse;
pub mod view;

pub use cell::Cell;
pub use position::Position;
pub use proxy::{LiveEntries, ProxyGrid};
pub use snapshot::Snapshot;
pub use sparse::{Iter, SparseGrid};
pub use view::View;
