//! Seed patterns: textual grids of alive/dead glyphs turned into an initial state.

use std::path::Path;

use crate::{
    engine::{DenseLife, SparseLife},
    enc::{PatternDecoder, RunLengthEncoded},
    error::PatternError,
    pos::Pos2,
};

/// The glyph marking a live cell unless configured otherwise
pub const DEFAULT_ALIVE_GLYPH: char = 'O';

/// Gosper's glider gun, the default seed
const GLIDER_GUN: &str = "\
........................O...........
......................O.O...........
............OO......OO............OO
...........O...O....OO............OO
OO........O.....O...OO..............
OO........O...O.OO....O.O...........
..........O.....O.......O...........
...........O...O....................
............OO......................
";

const GLIDER: &str = "\
.O.
..O
OOO
";

/// A parsed seed pattern
///
/// Cells are relative to the pattern's top-left corner and sorted row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    cells: Vec<Pos2>,
    row_width: Option<usize>,
    width: usize,
    height: usize,
}

impl Pattern {
    /// Parses rows of glyphs where only `alive` marks a live cell
    ///
    /// Lines may differ in length. The length of the first line, if a line
    /// break exists at all, is the declared row width.
    pub fn parse(text: &str, alive: char) -> Self {
        let row_width = text
            .find('\n')
            .map(|end| text[..end].trim_end_matches('\r').chars().count());

        let mut cells = Vec::new();
        let mut width = 0;
        let mut height = 0;
        for (y, line) in text.lines().enumerate() {
            width = width.max(line.chars().count());
            height = y + 1;
            cells.extend(
                line.chars()
                    .enumerate()
                    .filter(|&(_, glyph)| glyph == alive)
                    .map(|(x, _)| Pos2 {
                        x: x as i32,
                        y: y as i32,
                    }),
            );
        }

        Self {
            cells,
            row_width,
            width,
            height,
        }
    }

    /// Builds a pattern from cells already known to lie in `width x height`
    pub fn from_cells(mut cells: Vec<Pos2>, width: usize, height: usize) -> Self {
        cells.sort_unstable();
        cells.dedup();
        Self {
            cells,
            row_width: Some(width),
            width,
            height,
        }
    }

    /// Reads a pattern file
    ///
    /// Files with an `.rle` extension are run-length decoded, everything
    /// else is read as rows of glyphs.
    pub fn load<P: AsRef<Path>>(path: P, alive: char) -> Result<Self, PatternError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PatternError::NotFound {
            path: path.to_owned(),
            source,
        })?;

        let is_rle = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("rle"));
        if is_rle {
            RunLengthEncoded.decode(&text)
        } else {
            Ok(Self::parse(&text, alive))
        }
    }

    pub fn glider_gun() -> Self {
        Self::parse(GLIDER_GUN, DEFAULT_ALIVE_GLYPH)
    }

    pub fn glider() -> Self {
        Self::parse(GLIDER, DEFAULT_ALIVE_GLYPH)
    }

    #[inline]
    pub fn cells(&self) -> &[Pos2] {
        &self.cells
    }
    #[inline]
    pub fn row_width(&self) -> Option<usize> {
        self.row_width
    }
    /// Length of the longest row
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    fn too_large(&self, side: usize) -> PatternError {
        PatternError::TooLarge {
            width: self.width,
            height: self.height,
            side,
        }
    }

    /// Places the pattern in the top-left corner of a `side x side` grid
    ///
    /// Fails if the row width is unknown or the pattern does not fit.
    pub fn to_dense(&self, side: usize) -> Result<DenseLife, PatternError> {
        let Some(row_width) = self.row_width else {
            return Err(PatternError::Malformed(
                "no row separator, cannot determine the pattern width".to_owned(),
            ));
        };
        if row_width.max(self.width) > side || self.height > side {
            return Err(self.too_large(side));
        }
        DenseLife::from_alive(side, self.cells.iter().copied()).ok_or_else(|| self.too_large(side))
    }

    /// Places the pattern with its top-left corner at `origin`
    ///
    /// With `bounds` every cell must land inside `[0, bounds)²`, without it
    /// every cell must stay within the `i32` coordinate range.
    pub fn to_sparse(&self, origin: Pos2, bounds: Option<usize>) -> Result<SparseLife, PatternError> {
        let side = bounds.unwrap_or(i32::MAX as usize);
        let cells = self
            .cells
            .iter()
            .map(|&pos| pos.checked_add(origin).ok_or_else(|| self.too_large(side)))
            .collect::<Result<Vec<_>, _>>()?;
        SparseLife::from_alive(bounds, cells).ok_or_else(|| self.too_large(side))
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::glider_gun()
    }
}
