use super::Automaton;
use crate::Pos2;

/// The live cells of an automaton inside `[top_left, bottom_right)`
pub struct GameEngineWindow<'a, A> {
    tl: Pos2,
    br: Pos2,
    engine: &'a A,
}
impl<'a, A: Automaton> GameEngineWindow<'a, A> {
    pub fn new(engine: &'a A, top_left: Pos2, bottom_right: Pos2) -> Self {
        Self {
            tl: top_left,
            br: bottom_right,
            engine,
        }
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Pos2> + '_ {
        let rx = self.tl.x..self.br.x;
        let ry = self.tl.y..self.br.y;
        self.engine
            .live_cells()
            .filter(move |pos| rx.contains(&pos.x) && ry.contains(&pos.y))
    }

    /// Visible cells in row-major order
    pub fn sorted(&self) -> Vec<Pos2> {
        let mut cells: Vec<_> = self.iter().collect();
        cells.sort_unstable();
        cells
    }
}

impl<A: Automaton> std::fmt::Display for GameEngineWindow<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // widened so windows on the edge of the plane cannot overflow
        let (left, mut last_x, mut last_y) = (self.tl.x as i64, self.tl.x as i64 - 1, self.tl.y as i64);
        for alive in self.sorted() {
            let (x, y) = (alive.x as i64, alive.y as i64);
            // determine the number of lines to print
            let lines = y - last_y;
            // determine the number of padding spaces to print
            let padding = match lines {
                0 => x - last_x - 1,
                _ => x - left,
            };
            write!(
                f,
                "{0:\n<1$}{0: <2$}█",
                "", lines as usize, padding as usize
            )?;
            (last_x, last_y) = (x, y);
        }
        Ok(())
    }
}
