mod dense;
pub mod rule;
mod sparse;
mod window;

pub use self::dense::{DenseCells, DenseLife};
pub use self::sparse::{SparseCells, SparseLife};
pub use self::window::GameEngineWindow;
use crate::Pos2;

/// A two-state cellular automaton evolving under the B3/S23 rule
///
/// `step` is pure: it reads one generation and returns the next one without
/// touching `self`, so a driver can call it once per tick without locking.
pub trait Automaton: Clone {
    /// Live cells of one generation, in unspecified order
    ///
    /// Calling [`Automaton::live_cells`] again yields the same cells.
    type Cells<'a>: Iterator<Item = Pos2> + Clone
    where
        Self: 'a;

    fn is_alive(&self, pos: Pos2) -> bool;

    /// Number of live cells among the 8 neighbors of `pos`
    fn live_neighbor_count(&self, pos: Pos2) -> u8 {
        pos.neighbors().filter(|&n| self.is_alive(n)).count() as u8
    }

    /// Computes the next generation
    fn step(&self) -> Self;

    /// Computes the next generation using the rayon thread pool
    ///
    /// Produces exactly the same generation as [`Automaton::step`].
    fn step_parallel(&self) -> Self {
        self.step()
    }

    fn live_cells(&self) -> Self::Cells<'_>;

    fn alive_count(&self) -> usize;

    /// A rectangular view into the live cells, see [`GameEngineWindow`]
    fn window(&self, top_left: Pos2, bottom_right: Pos2) -> GameEngineWindow<'_, Self>
    where
        Self: Sized,
    {
        GameEngineWindow::new(self, top_left, bottom_right)
    }
}

/// Either engine strategy, picked at construction time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Engine {
    Dense(DenseLife),
    Sparse(SparseLife),
}
impl Engine {
    /// Flips a cell and returns its new state
    pub fn toggle(&mut self, pos: Pos2) -> bool {
        match self {
            Self::Dense(e) => e.toggle(pos),
            Self::Sparse(e) => e.toggle(pos),
        }
    }
}
impl From<DenseLife> for Engine {
    fn from(engine: DenseLife) -> Self {
        Self::Dense(engine)
    }
}
impl From<SparseLife> for Engine {
    fn from(engine: SparseLife) -> Self {
        Self::Sparse(engine)
    }
}

impl Automaton for Engine {
    type Cells<'a> = EngineCells<'a>;

    fn is_alive(&self, pos: Pos2) -> bool {
        match self {
            Self::Dense(e) => e.is_alive(pos),
            Self::Sparse(e) => e.is_alive(pos),
        }
    }
    fn live_neighbor_count(&self, pos: Pos2) -> u8 {
        match self {
            Self::Dense(e) => e.live_neighbor_count(pos),
            Self::Sparse(e) => e.live_neighbor_count(pos),
        }
    }
    fn step(&self) -> Self {
        match self {
            Self::Dense(e) => Self::Dense(e.step()),
            Self::Sparse(e) => Self::Sparse(e.step()),
        }
    }
    fn step_parallel(&self) -> Self {
        match self {
            Self::Dense(e) => Self::Dense(e.step_parallel()),
            Self::Sparse(e) => Self::Sparse(e.step_parallel()),
        }
    }
    fn live_cells(&self) -> Self::Cells<'_> {
        match self {
            Self::Dense(e) => EngineCells::Dense(e.live_cells()),
            Self::Sparse(e) => EngineCells::Sparse(e.live_cells()),
        }
    }
    fn alive_count(&self) -> usize {
        match self {
            Self::Dense(e) => e.alive_count(),
            Self::Sparse(e) => e.alive_count(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum EngineCells<'a> {
    Dense(DenseCells<'a>),
    Sparse(SparseCells<'a>),
}
impl Iterator for EngineCells<'_> {
    type Item = Pos2;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Dense(cells) => cells.next(),
            Self::Sparse(cells) => cells.next(),
        }
    }
}
