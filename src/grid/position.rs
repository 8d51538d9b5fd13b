// src/grid/position.rs
/*!
Fixed-rank integer coordinates.

`Position<DIM>` wraps a `[isize; DIM]`. Ordering is lexicographic over the
components (the derived array ordering), which is what the ordered backing
store of every grid iterates by.
*/

use std::fmt;

use crate::error::{GridError, Result};

// ===================================================================
// --------------------------- Struct Def ----------------------------
// ===================================================================

/// A cell coordinate with exactly `DIM` signed components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position<const DIM: usize>([isize; DIM]);

impl<const DIM: usize> Position<DIM> {
    #[inline]
    pub const fn new(coords: [isize; DIM]) -> Self {
        Self(coords)
    }

    /// Rank of the coordinate (always `DIM`).
    #[inline] pub const fn rank(&self) -> usize { DIM }

    #[inline] pub fn coords(&self) -> &[isize; DIM] { &self.0 }

    #[inline] pub fn into_coords(self) -> [isize; DIM] { self.0 }

    /// Build from a runtime-sized slice, checking its length against `DIM`.
    pub fn try_from_slice(coords: &[isize]) -> Result<Self> {
        let arr: [isize; DIM] = coords.try_into().map_err(|_| GridError::RankMismatch {
            expected: DIM,
            found: coords.len(),
        })?;
        Ok(Self(arr))
    }
}

// ===================================================================
// ---------------------------- Conversions --------------------------
// ===================================================================

impl<const DIM: usize> From<[isize; DIM]> for Position<DIM> {
    #[inline]
    fn from(coords: [isize; DIM]) -> Self {
        Self(coords)
    }
}

impl<const DIM: usize> From<Position<DIM>> for [isize; DIM] {
    #[inline]
    fn from(pos: Position<DIM>) -> Self {
        pos.0
    }
}

impl<const DIM: usize> TryFrom<&[isize]> for Position<DIM> {
    type Error = GridError;

    fn try_from(coords: &[isize]) -> Result<Self> {
        Self::try_from_slice(coords)
    }
}

impl<const DIM: usize> std::ops::Index<usize> for Position<DIM> {
    type Output = isize;

    #[inline]
    fn index(&self, axis: usize) -> &isize {
        &self.0[axis]
    }
}

impl<const DIM: usize> fmt::Display for Position<DIM> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (axis, c) in self.0.iter().enumerate() {
            if axis > 0 { write!(f, ", ")?; }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_lexicographic() {
        let mut v = vec![
            Position::new([1, 0, 0]),
            Position::new([0, 5, 9]),
            Position::new([0, 5, -1]),
            Position::new([-3, 7, 7]),
        ];
        v.sort();
        assert_eq!(
            v.iter().map(|p| *p.coords()).collect::<Vec<_>>(),
            vec![[-3, 7, 7], [0, 5, -1], [0, 5, 9], [1, 0, 0]]
        );
    }

    #[test]
    fn slice_rank_is_checked() {
        let ok = Position::<2>::try_from_slice(&[4, -2]).unwrap();
        assert_eq!(ok, Position::new([4, -2]));

        let err = Position::<3>::try_from(&[1isize, 2][..]).unwrap_err();
        assert!(matches!(err, GridError::RankMismatch { expected: 3, found: 2 }));
    }

    #[test]
    fn axis_index_and_array_conversion() {
        let p = Position::from([3, -8]);
        assert_eq!((p[0], p[1]), (3, -8));

        let arr: [isize; 2] = p.into();
        assert_eq!(arr, [3, -8]);
    }

    #[test]
    fn display_lists_components() {
        assert_eq!(Position::new([0, -1, 2]).to_string(), "(0, -1, 2)");
        assert_eq!(Position::new([7]).to_string(), "(7)");
    }
}
