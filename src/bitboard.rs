//! A fixed-size cell set using const generics.
//!
//! The type is `no_std` friendly and avoids heap allocations. An `N×N`
//! grid is packed into an unsigned integer `T`, one bit per cell in
//! row-major order. Boards use it for ship occupancy, per-ship hits and
//! the shots they have received.

use core::ops::{BitAnd, BitOr};
use core::{any, fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::common::Coord;
use crate::config::GRID_SIZE;

/// Cell set sized for the game grid.
pub type Cells = BitBoard<u64, GRID_SIZE>;

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitBoardError {
    /// Requested board size N*N exceeds capacity of `T::BITS`.
    SizeTooLarge { n: usize, capacity: usize },
    /// Coordinate lies outside [0..N)×[0..N).
    OutOfBounds(Coord),
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::SizeTooLarge { n, capacity } => {
                write!(f, "SizeTooLarge: N*N={} exceeds T::BITS={}", n * n, capacity)
            }
            BitBoardError::OutOfBounds(at) => {
                write!(f, "OutOfBounds: row={}, col={}", at.row, at.col)
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitBoard<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const N: usize> BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    const BOARD_BITS: usize = N * N;

    #[inline]
    fn mask() -> T {
        if Self::BOARD_BITS >= mem::size_of::<T>() * 8 {
            !T::zero()
        } else {
            (T::one() << Self::BOARD_BITS) - T::one()
        }
    }

    #[inline]
    fn index(coord: Coord) -> Option<usize> {
        (coord.row < N && coord.col < N).then(|| coord.row * N + coord.col)
    }

    /// Create an empty set without the capacity check.
    #[inline]
    pub fn new() -> Self {
        BitBoard { bits: T::zero() }
    }

    /// Fallible constructor: returns `Err(SizeTooLarge)` if N*N > T::BITS.
    pub fn try_new() -> Result<Self, BitBoardError> {
        let capacity = mem::size_of::<T>() * 8;
        if Self::BOARD_BITS > capacity {
            Err(BitBoardError::SizeTooLarge { n: N, capacity })
        } else {
            Ok(Self::new())
        }
    }

    /// Builds a set from cells, rejecting any that fall off the grid.
    pub fn from_cells<I>(cells: I) -> Result<Self, BitBoardError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut set = Self::new();
        for cell in cells {
            set.insert(cell)?;
        }
        Ok(set)
    }

    /// Off-grid coordinates are never contained.
    pub fn contains(&self, coord: Coord) -> bool {
        match Self::index(coord) {
            Some(idx) => ((self.bits >> idx) & T::one()) != T::zero(),
            None => false,
        }
    }

    /// Adds `coord`; returns `true` if it was not present before.
    pub fn insert(&mut self, coord: Coord) -> Result<bool, BitBoardError> {
        let idx = Self::index(coord).ok_or(BitBoardError::OutOfBounds(coord))?;
        let bit = T::one() << idx;
        let fresh = (self.bits & bit).is_zero();
        self.bits = self.bits | bit;
        Ok(fresh)
    }

    /// Number of cells in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        (self.bits & other.bits).is_zero()
    }

    pub fn is_superset(&self, other: &Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    #[inline]
    pub fn into_raw(self) -> T {
        self.bits
    }

    /// Creates a set from the raw integer, masking out bits past `N*N`.
    #[inline]
    pub fn from_raw(raw: T) -> Self {
        BitBoard {
            bits: raw & Self::mask(),
        }
    }

    /// Cells of the set in row-major order.
    #[inline]
    pub fn iter(&self) -> SetCells<'_, T, N> {
        SetCells { board: self, idx: 0 }
    }
}

impl<T, const N: usize> Default for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}, {}>:", any::type_name::<T>(), N)?;
        for row in 0..N {
            for col in 0..N {
                let bit = if self.contains(Coord::new(row, col)) { '■' } else { '□' };
                write!(f, "{} ", bit)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the cells of a bitboard.
#[derive(Clone, Copy)]
pub struct SetCells<'a, T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    board: &'a BitBoard<T, N>,
    idx: usize,
}

impl<'a, T, const N: usize> Iterator for SetCells<'a, T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < N * N {
            let idx = self.idx;
            self.idx += 1;
            if ((self.board.bits >> idx) & T::one()) != T::zero() {
                return Some(Coord::new(idx / N, idx % N));
            }
        }
        None
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = Coord;
    type IntoIter = SetCells<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Intersection.
impl<T, const N: usize> BitAnd for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        BitBoard::from_raw(self.bits & rhs.bits)
    }
}

/// Union.
impl<T, const N: usize> BitOr for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        BitBoard::from_raw(self.bits | rhs.bits)
    }
}
