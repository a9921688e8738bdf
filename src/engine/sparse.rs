use super::{Automaton, rule};
use crate::pos::Pos2;
use rayon::prelude::*;
use std::collections::{HashSet, hash_set};
use std::iter;

/// An unbounded grid stored as the set of its live cells
///
/// An optional `bounds` clamps the plane to `[0, bounds) x [0, bounds)` for
/// front-ends with a finite canvas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseLife {
    alive: HashSet<Pos2>,
    bounds: Option<usize>,
}

impl SparseLife {
    pub fn new(bounds: Option<usize>) -> Self {
        Self {
            alive: HashSet::new(),
            bounds,
        }
    }

    /// Creates a plane with the given cells alive
    ///
    /// Returns [`None`] if any cell lies outside the bounds
    pub fn from_alive<I: IntoIterator<Item = Pos2>>(bounds: Option<usize>, alive: I) -> Option<Self> {
        let mut plane = Self::new(bounds);
        for pos in alive {
            if !plane.insert(pos) {
                return None;
            }
        }
        Some(plane)
    }

    #[inline]
    fn in_bounds(&self, pos: Pos2) -> bool {
        self.bounds.is_none_or(|side| pos.within(side))
    }

    /// Marks a cell alive, returns `false` if it lies outside the bounds
    pub fn insert(&mut self, pos: Pos2) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        self.alive.insert(pos);
        true
    }

    /// Marks a cell dead, returns whether it was alive
    pub fn remove(&mut self, pos: Pos2) -> bool {
        self.alive.remove(&pos)
    }

    /// Flips a cell and returns its new state
    ///
    /// Cells outside the bounds stay dead
    pub fn toggle(&mut self, pos: Pos2) -> bool {
        if self.alive.remove(&pos) {
            false
        } else {
            self.insert(pos)
        }
    }

    /// Every cell whose state may change: the live cells and their neighbors
    fn candidates(&self) -> HashSet<Pos2> {
        self.alive
            .iter()
            .flat_map(|&pos| iter::once(pos).chain(pos.neighbors()))
            .filter(|&pos| self.in_bounds(pos))
            .collect()
    }

    #[inline]
    fn survives(&self, pos: Pos2) -> bool {
        rule::next_state(self.alive.contains(&pos), self.live_neighbor_count(pos))
    }
}

impl Automaton for SparseLife {
    type Cells<'a> = SparseCells<'a>;

    #[inline]
    fn is_alive(&self, pos: Pos2) -> bool {
        self.alive.contains(&pos)
    }

    fn step(&self) -> Self {
        let alive = self
            .candidates()
            .into_iter()
            .filter(|&pos| self.survives(pos))
            .collect();
        Self {
            alive,
            bounds: self.bounds,
        }
    }

    /// Evaluates the candidates on the rayon thread pool
    ///
    /// Each candidate only reads the previous generation, so the new set is
    /// swapped in once every worker has finished.
    fn step_parallel(&self) -> Self {
        if self.alive.is_empty() {
            return self.clone();
        }

        let candidates: Vec<Pos2> = self.candidates().into_iter().collect();
        let alive = candidates
            .into_par_iter()
            .filter(|&pos| self.survives(pos))
            .collect();
        Self {
            alive,
            bounds: self.bounds,
        }
    }

    #[inline]
    fn live_cells(&self) -> Self::Cells<'_> {
        self.alive.iter().copied()
    }

    #[inline]
    fn alive_count(&self) -> usize {
        self.alive.len()
    }
}

/// Live cells of a [`SparseLife`], in no particular order
pub type SparseCells<'a> = iter::Copied<hash_set::Iter<'a, Pos2>>;

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i32, y: i32) -> Pos2 {
        Pos2 { x, y }
    }

    fn sorted_cells(plane: &SparseLife) -> Vec<Pos2> {
        let mut cells: Vec<_> = plane.live_cells().collect();
        cells.sort();
        cells
    }

    #[test]
    fn toggle_inserts_and_removes() {
        let mut plane = SparseLife::new(None);

        assert!(plane.toggle(pos(-4, 7)));
        assert!(plane.is_alive(pos(-4, 7)));
        assert!(!plane.toggle(pos(-4, 7)));
        assert_eq!(plane.alive_count(), 0);
    }

    #[test]
    fn bounds_refuse_outside_cells() {
        let mut plane = SparseLife::new(Some(3));

        assert!(!plane.insert(pos(3, 0)));
        assert!(!plane.toggle(pos(0, -1)));
        assert!(plane.insert(pos(2, 2)));
        assert!(SparseLife::from_alive(Some(3), [pos(5, 5)]).is_none());
    }

    #[test]
    fn blinker_crosses_negative_coordinates() {
        let plane = SparseLife::from_alive(None, [pos(0, -1), pos(0, 0), pos(0, 1)]).unwrap();

        let next = plane.step();
        assert_eq!(sorted_cells(&next), vec![pos(-1, 0), pos(0, 0), pos(1, 0)]);
    }

    #[test]
    fn bounded_blinker_on_edge_is_clipped() {
        let plane = SparseLife::from_alive(Some(4), [pos(0, 0), pos(0, 1), pos(0, 2)]).unwrap();

        let next = plane.step();
        assert_eq!(sorted_cells(&next), vec![pos(0, 1), pos(1, 1)]);
    }

    #[test]
    fn block_on_coordinate_edge_is_still_life() {
        let (max, min) = (i32::MAX, i32::MIN);
        let block = [pos(max - 1, min), pos(max, min), pos(max - 1, min + 1), pos(max, min + 1)];
        let plane = SparseLife::from_alive(None, block).unwrap();

        assert_eq!(plane.step(), plane);
        assert_eq!(plane.step_parallel(), plane);
    }

    #[test]
    fn lone_cell_on_coordinate_edge_dies() {
        let plane = SparseLife::from_alive(None, [pos(i32::MAX, 0)]).unwrap();

        assert_eq!(plane.live_neighbor_count(pos(i32::MAX, 0)), 0);
        assert_eq!(plane.step().alive_count(), 0);
    }

    #[test]
    fn parallel_step_matches_serial() {
        let alive = (0..40)
            .flat_map(|y| (0..40).map(move |x| pos(x, y)))
            .filter(|p| (p.x * 7 + p.y * 3) % 5 < 2);
        let mut serial = SparseLife::from_alive(None, alive).unwrap();
        let mut parallel = serial.clone();

        for _ in 0..8 {
            serial = serial.step();
            parallel = parallel.step_parallel();
            assert_eq!(serial, parallel);
        }
    }

    #[test]
    fn parallel_step_on_empty_plane() {
        let plane = SparseLife::new(Some(8));

        assert_eq!(plane.step_parallel().alive_count(), 0);
    }
}
