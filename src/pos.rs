use std::{
    cmp::Ordering,
    ops::{Add, Sub},
};

/// Offsets of the 8 cells surrounding a cell
pub const NEIGHBOR_OFFSETS: [Pos2; 8] = [
    Pos2 { x: -1, y: -1 },
    Pos2 { x: 0, y: -1 },
    Pos2 { x: 1, y: -1 },
    Pos2 { x: -1, y: 0 },
    Pos2 { x: 1, y: 0 },
    Pos2 { x: -1, y: 1 },
    Pos2 { x: 0, y: 1 },
    Pos2 { x: 1, y: 1 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos2 {
    pub x: i32,
    pub y: i32,
}
impl Pos2 {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
    #[inline]
    pub fn zero() -> Self {
        Self { x: 0, y: 0 }
    }
    #[inline]
    pub fn one() -> Self {
        Self { x: 1, y: 1 }
    }

    /// Adds `rhs`, or [`None`] if either coordinate leaves the `i32` range
    #[inline]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(rhs.x)?,
            y: self.y.checked_add(rhs.y)?,
        })
    }

    /// Adds `rhs`, clamping each coordinate to the `i32` range
    #[inline]
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self {
            x: self.x.saturating_add(rhs.x),
            y: self.y.saturating_add(rhs.y),
        }
    }

    /// The geometric neighbors of this position on an unbounded plane
    ///
    /// Cells past the `i32` range do not exist, so positions on its edge
    /// have fewer than 8 neighbors.
    #[inline]
    pub fn neighbors(self) -> impl Iterator<Item = Pos2> + Clone {
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |offset| self.checked_add(offset))
    }

    /// Whether this position lies within `[0, side) x [0, side)`
    #[inline]
    pub fn within(self, side: usize) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < side && (self.y as usize) < side
    }
}
impl Default for Pos2 {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}
impl PartialOrd for Pos2 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Pos2 {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // rows first, then columns
        Ord::cmp(&self.y, &other.y).then(Ord::cmp(&self.x, &other.x))
    }
}
impl Add for Pos2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
impl Sub for Pos2 {
    type Output = Pos2;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
