// src/error.rs
//! Error type for the runtime-ranked edges of the crate.
//!
//! Grid reads, writes, iteration and cell commits are total; only slice-based
//! coordinates, incomplete index chains and snapshot decoding can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    /// A coordinate carried the wrong number of components for the grid's rank.
    #[error("coordinate rank mismatch: expected {expected} components, found {found}")]
    RankMismatch { expected: usize, found: usize },

    /// A chained index was finished before every axis was bound.
    #[error("chained index incomplete: {bound} of {rank} components bound")]
    IncompleteIndex { bound: usize, rank: usize },

    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GridError>;
