//! Core library for Conway's Game of Life.
//!
//! Two interchangeable engines share the [`Automaton`] contract: a dense
//! bitset over a fixed square grid and a sparse set of live cells on an
//! unbounded plane.

pub mod enc;
pub mod engine;
pub mod error;
pub mod game;
pub mod pattern;
pub mod pos;

pub use enc::{PatternDecoder, RunLengthEncoded};
pub use engine::{Automaton, DenseLife, Engine, GameEngineWindow, SparseLife};
pub use error::PatternError;
pub use game::{Game, RunState};
pub use pattern::Pattern;
pub use pos::Pos2;
