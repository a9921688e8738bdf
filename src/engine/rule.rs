use std::sync::OnceLock;

/// Neighbor counts range over `0..=8`
const COUNTS: usize = 9;
type TransitionTable = [[bool; COUNTS]; 2];

/// Returns whether a cell is alive in the next generation (B3/S23)
///
/// `neighbors` is the number of live cells among the 8 surrounding cells
/// of the previous generation.
#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    get_transition_table()[alive as usize]
        .get(neighbors as usize)
        .copied()
        .unwrap_or(false)
}

/// Returns a Singleton lookup table for the Game of Life ruleset
///
/// Equivalent to calling [`generate_transition_table`] once and storing the result
fn get_transition_table() -> &'static TransitionTable {
    static CELL: OnceLock<TransitionTable> = OnceLock::new();
    CELL.get_or_init(generate_transition_table)
}

/// Creates a lookup table for the Game of Life ruleset
///
/// The table is indexed first by the current state of the cell (`0` dead,
/// `1` alive) and then by its live neighbor count.
fn generate_transition_table() -> TransitionTable {
    let mut table = [[false; COUNTS]; 2];
    for (alive, row) in table.iter_mut().enumerate() {
        for (neighbors, next) in row.iter_mut().enumerate() {
            *next = matches!((alive == 1, neighbors), (true, 2) | (_, 3));
        }
    }
    table
}
