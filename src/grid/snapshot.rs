// src/grid/snapshot.rs
/*!
Serde exchange form for grids.

`Snapshot<T>` records the rank, the default value and the live entries with
coordinates as plain `Vec<isize>`, so it serializes for any `DIM`. Restoring
checks every coordinate against the target rank and drops default-valued
entries, so a restored grid always satisfies the elision invariant.
*/

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

use super::position::Position;
use super::proxy::ProxyGrid;
use super::sparse::SparseGrid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    pub rank: usize,
    pub default: T,
    /// Live entries in coordinate order.
    pub entries: Vec<(Vec<isize>, T)>,
}

impl<T: Clone + PartialEq, const DIM: usize> SparseGrid<T, DIM> {
    pub fn to_snapshot(&self) -> Snapshot<T> {
        Snapshot {
            rank: DIM,
            default: self.default_value().clone(),
            entries: self
                .iter()
                .map(|(pos, v)| (pos.coords().to_vec(), v.clone()))
                .collect(),
        }
    }

    /// Rebuild a grid from a snapshot, checking every coordinate's rank.
    pub fn from_snapshot(snapshot: Snapshot<T>) -> Result<Self> {
        if snapshot.rank != DIM {
            return Err(GridError::RankMismatch { expected: DIM, found: snapshot.rank });
        }
        let mut grid = Self::with_default(snapshot.default);
        for (coords, v) in snapshot.entries {
            grid.set_at(Position::try_from_slice(&coords)?, v);
        }
        tracing::debug!(entries = grid.size(), rank = DIM, "grid restored from snapshot");
        Ok(grid)
    }

    pub fn to_json_string(&self) -> Result<String>
    where
        T: Serialize,
    {
        Ok(serde_json::to_string(&self.to_snapshot())?)
    }

    pub fn from_json_str(json: &str) -> Result<Self>
    where
        T: for<'de> Deserialize<'de>,
    {
        let snapshot: Snapshot<T> = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }
}

impl<T: Clone + PartialEq, const DIM: usize> ProxyGrid<T, DIM> {
    /// Snapshot of the committed live state; open cells are not included.
    pub fn to_snapshot(&self) -> Snapshot<T> {
        self.to_sparse().to_snapshot()
    }

    pub fn from_snapshot(snapshot: Snapshot<T>) -> Result<Self> {
        SparseGrid::from_snapshot(snapshot).map(Self::from)
    }
}
