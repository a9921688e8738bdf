use super::{Automaton, rule};
use crate::pos::{NEIGHBOR_OFFSETS, Pos2};

const WORD_BITS: usize = u64::BITS as usize;

/// Largest supported grid side, `MAX_SIDE²` bits take 512 MiB
pub const MAX_SIDE: usize = 1 << 16;

/// A fixed `side x side` grid stored as a row-major bit vector
///
/// Bit `y * side + x` is set iff cell `(x, y)` is alive. Bits past
/// `side * side` in the final word are never set. Cells outside the grid
/// do not exist and count as dead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseLife {
    side: usize,
    words: Box<[u64]>,
}

impl DenseLife {
    /// Creates an empty grid, [`None`] if `side` exceeds [`MAX_SIDE`]
    pub fn try_new(side: usize) -> Option<Self> {
        if side > MAX_SIDE {
            return None;
        }
        let words = vec![0; side.checked_mul(side)?.div_ceil(WORD_BITS)];
        Some(Self {
            side,
            words: words.into_boxed_slice(),
        })
    }

    /// Creates an empty grid
    ///
    /// # Panics
    /// If `side` exceeds [`MAX_SIDE`]
    pub fn new(side: usize) -> Self {
        Self::try_new(side).expect("grid side exceeds MAX_SIDE")
    }

    /// Creates a grid with the given cells alive
    ///
    /// Returns [`None`] if any cell lies outside the grid or the grid is too large
    pub fn from_alive<I: IntoIterator<Item = Pos2>>(side: usize, alive: I) -> Option<Self> {
        let mut grid = Self::try_new(side)?;
        for pos in alive {
            if !grid.set(pos) {
                return None;
            }
        }
        Some(grid)
    }

    #[inline]
    fn index(&self, pos: Pos2) -> Option<usize> {
        pos.within(self.side)
            .then(|| pos.y as usize * self.side + pos.x as usize)
    }

    #[inline]
    fn bit(&self, i: usize) -> bool {
        self.words[i / WORD_BITS] >> (i % WORD_BITS) & 1 != 0
    }
    #[inline]
    fn set_bit(&mut self, i: usize) {
        debug_assert!(i < self.side * self.side, "bit {i} is outside the grid");
        self.words[i / WORD_BITS] |= 1 << (i % WORD_BITS);
    }
    #[inline]
    fn clear_bit(&mut self, i: usize) {
        self.words[i / WORD_BITS] &= !(1 << (i % WORD_BITS));
    }

    /// Marks a cell alive, returns `false` if it lies outside the grid
    pub fn set(&mut self, pos: Pos2) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.set_bit(i);
                true
            }
            None => false,
        }
    }

    /// Marks a cell dead, returns `false` if it lies outside the grid
    pub fn clear(&mut self, pos: Pos2) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.clear_bit(i);
                true
            }
            None => false,
        }
    }

    /// Flips a cell and returns its new state
    ///
    /// Cells outside the grid stay dead
    pub fn toggle(&mut self, pos: Pos2) -> bool {
        let Some(i) = self.index(pos) else {
            return false;
        };
        self.words[i / WORD_BITS] ^= 1 << (i % WORD_BITS);
        self.bit(i)
    }

    /// Linear indices of the neighbors of bit `i` that exist on the grid
    ///
    /// The column is derived from the index so that the first and last
    /// columns of adjacent rows are never treated as neighbors.
    fn neighbor_indices(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        let x = (i % self.side) as isize;
        let y = (i / self.side) as isize;
        let side = self.side as isize;
        NEIGHBOR_OFFSETS.iter().filter_map(move |offset| {
            let nx = x + offset.x as isize;
            let ny = y + offset.y as isize;
            if (0..side).contains(&nx) && (0..side).contains(&ny) {
                Some((ny * side + nx) as usize)
            } else {
                None
            }
        })
    }

    fn count_at(&self, i: usize) -> u8 {
        self.neighbor_indices(i).filter(|&n| self.bit(n)).count() as u8
    }

    /// Linear indices of the live cells, lowest first
    #[inline]
    fn live_indices(&self) -> LiveBits<'_> {
        LiveBits::new(&self.words)
    }
}

impl Automaton for DenseLife {
    type Cells<'a> = DenseCells<'a>;

    #[inline]
    fn is_alive(&self, pos: Pos2) -> bool {
        self.index(pos).is_some_and(|i| self.bit(i))
    }

    fn live_neighbor_count(&self, pos: Pos2) -> u8 {
        match self.index(pos) {
            Some(i) => self.count_at(i),
            None => pos.neighbors().filter(|&n| self.is_alive(n)).count() as u8,
        }
    }

    /// Computes the next generation by visiting only the live cells and
    /// their neighborhoods
    fn step(&self) -> Self {
        let mut next = self.clone();
        for i in self.live_indices() {
            if !rule::next_state(true, self.count_at(i)) {
                next.clear_bit(i);
            }

            // only a neighbor of a live cell can have 3 live neighbors
            for n in self.neighbor_indices(i) {
                if !self.bit(n) && rule::next_state(false, self.count_at(n)) {
                    next.set_bit(n);
                }
            }
        }
        next
    }

    #[inline]
    fn live_cells(&self) -> Self::Cells<'_> {
        DenseCells {
            bits: self.live_indices(),
            side: self.side,
        }
    }

    #[inline]
    fn alive_count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

/// Iterates the set bits of a word slice by repeatedly extracting the lowest
/// set bit
#[derive(Debug, Clone)]
struct LiveBits<'a> {
    words: &'a [u64],
    word_idx: usize,
    current: u64,
}
impl<'a> LiveBits<'a> {
    fn new(words: &'a [u64]) -> Self {
        Self {
            words,
            word_idx: 0,
            current: words.first().copied().unwrap_or(0),
        }
    }
}
impl Iterator for LiveBits<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current == 0 {
            self.word_idx += 1;
            self.current = *self.words.get(self.word_idx)?;
        }
        let bit = self.current.trailing_zeros() as usize;
        // clear the lowest set bit
        self.current &= self.current - 1;
        Some(self.word_idx * WORD_BITS + bit)
    }
}

/// Live cells of a [`DenseLife`] in row-major order
#[derive(Debug, Clone)]
pub struct DenseCells<'a> {
    bits: LiveBits<'a>,
    side: usize,
}
impl Iterator for DenseCells<'_> {
    type Item = Pos2;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let i = self.bits.next()?;
        Some(Pos2 {
            x: (i % self.side) as i32,
            y: (i / self.side) as i32,
        })
    }
}
