use crate::{Pos2, engine::Automaton};

/// Run state of an automatically ticking front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Not started yet, or just reset
    #[default]
    Idle,
    Running,
    Stopped,
}

/// Drives an automaton one generation at a time
///
/// Keeps the seeded state around so it can be reinstated by [`Game::reset`].
#[derive(Debug, Clone)]
pub struct Game<A> {
    initial: A,
    current: A,
    generation: u64,
    state: RunState,
    parallel: bool,
}

impl<A: Automaton> Game<A> {
    pub fn new(initial: A) -> Self {
        Self {
            current: initial.clone(),
            initial,
            generation: 0,
            state: RunState::default(),
            parallel: false,
        }
    }

    /// Computes generations on the rayon thread pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Advances one generation regardless of the run state
    pub fn step(&mut self) {
        self.current = if self.parallel {
            self.current.step_parallel()
        } else {
            self.current.step()
        };
        self.generation += 1;
    }

    /// Advances one generation if running
    ///
    /// Stops once every cell has died. Returns whether a generation was computed.
    pub fn tick(&mut self) -> bool {
        if self.state != RunState::Running {
            return false;
        }
        if self.current.alive_count() == 0 {
            self.state = RunState::Stopped;
            return false;
        }
        self.step();
        true
    }

    /// Reinstates the seeded state and zeroes the generation counter
    pub fn reset(&mut self) {
        self.current = self.initial.clone();
        self.generation = 0;
        self.state = RunState::Idle;
    }

    pub fn start(&mut self) {
        self.state = RunState::Running;
    }
    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Stopped;
        }
    }
    /// Starts a paused game or pauses a running one
    pub fn toggle_running(&mut self) {
        match self.state {
            RunState::Running => self.stop(),
            RunState::Idle | RunState::Stopped => self.start(),
        }
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
    #[inline]
    pub fn current(&self) -> &A {
        &self.current
    }
    /// Mutable access for interactive editing of the current generation
    #[inline]
    pub fn current_mut(&mut self) -> &mut A {
        &mut self.current
    }

    #[inline]
    pub fn live_cells(&self) -> A::Cells<'_> {
        self.current.live_cells()
    }
    #[inline]
    pub fn alive_count(&self) -> usize {
        self.current.alive_count()
    }
    #[inline]
    pub fn is_alive(&self, pos: Pos2) -> bool {
        self.current.is_alive(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{DenseLife, Engine, SparseLife};

    fn pos(x: i32, y: i32) -> Pos2 {
        Pos2 { x, y }
    }

    fn blinker() -> Game<Engine> {
        Game::new(DenseLife::from_alive(5, [pos(2, 1), pos(2, 2), pos(2, 3)]).unwrap().into())
    }

    #[test]
    fn step_counts_generations() {
        let mut game = blinker();
        game.step();
        game.step();
        game.step();

        assert_eq!(game.generation(), 3);
        assert!(game.is_alive(pos(1, 2)));
        assert!(!game.is_alive(pos(2, 1)));
    }

    #[test]
    fn reset_restores_seed() {
        let mut game = blinker();
        let seed = game.current().clone();
        game.start();
        game.tick();
        game.reset();

        assert_eq!(game.current(), &seed);
        assert_eq!(game.generation(), 0);
        assert_eq!(game.state(), RunState::Idle);
    }

    #[test]
    fn tick_only_advances_while_running() {
        let mut game = blinker();

        assert!(!game.tick());
        game.toggle_running();
        assert!(game.tick());
        game.toggle_running();
        assert_eq!(game.state(), RunState::Stopped);
        assert!(!game.tick());
        assert_eq!(game.generation(), 1);
    }

    #[test]
    fn tick_stops_on_extinction() {
        let mut game = Game::new(SparseLife::from_alive(None, [pos(0, 0)]).unwrap());
        game.start();

        assert!(game.tick());
        assert_eq!(game.alive_count(), 0);
        assert!(!game.tick());
        assert_eq!(game.state(), RunState::Stopped);
    }

    #[test]
    fn parallel_game_matches_serial() {
        let seed: Engine = SparseLife::from_alive(None, [pos(0, 0), pos(1, 0), pos(2, 0), pos(2, -1)])
            .unwrap()
            .into();
        let mut serial = Game::new(seed.clone());
        let mut parallel = Game::new(seed).with_parallel(true);
        for _ in 0..6 {
            serial.step();
            parallel.step();
        }

        assert_eq!(serial.current(), parallel.current());
    }

    #[test]
    fn edits_apply_to_current_generation_only() {
        let mut game = blinker();
        game.current_mut().toggle(pos(0, 0));
        assert!(game.is_alive(pos(0, 0)));

        game.reset();
        assert!(!game.is_alive(pos(0, 0)));
    }
}
