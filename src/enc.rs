use std::sync::LazyLock;

use regex::Regex;

use crate::{error::PatternError, pattern::Pattern, pos::Pos2};

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*x\s*=\s*(\d+)\s*,\s*y\s*=\s*(\d+)").expect("valid header regex")
});
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d*)([bo$!])|(\S)").expect("valid token regex"));

pub trait PatternDecoder {
    fn decode(self, value: &str) -> Result<Pattern, PatternError>;
}

/// Decoder for the run-length encoded (`.rle`) pattern format
///
/// Only the two-state B3/S23 alphabet is understood: `b` dead, `o` alive,
/// `$` end of row and `!` end of pattern. The `x = W, y = H` header, when
/// present, fixes the pattern's width and height.
#[derive(Debug, Default)]
pub struct RunLengthEncoded;

impl RunLengthEncoded {
    fn run(run_str: &str) -> Result<i32, PatternError> {
        if run_str.is_empty() {
            return Ok(1);
        }
        run_str
            .parse::<i32>()
            .map_err(|_| PatternError::Malformed(format!("run length {run_str} is too long")))
    }

    /// Moves `coord` by `run`, failing when it leaves the pattern
    ///
    /// `limit` is the header's extent along that axis; without a header the
    /// only limit is the `i32` range.
    fn advance(coord: i32, run: i32, limit: Option<usize>) -> Result<i32, PatternError> {
        let next = coord
            .checked_add(run)
            .ok_or_else(|| PatternError::Malformed(format!("run of {run} leaves the coordinate range")))?;
        match limit {
            Some(limit) if next as usize > limit => Err(PatternError::Malformed(format!(
                "run of {run} passes the declared extent {limit}"
            ))),
            _ => Ok(next),
        }
    }
}

impl PatternDecoder for RunLengthEncoded {
    fn decode(self, value: &str) -> Result<Pattern, PatternError> {
        let mut header: Option<(usize, usize)> = None;
        let mut alive = Vec::new();
        let mut cursor = Pos2 { x: 0, y: 0 };
        'lines_loop: for line in value.lines() {
            if line.trim_start().starts_with('#') {
                continue;
            }
            if let Some(caps) = HEADER.captures(line) {
                let size = |i: usize| caps[i].parse::<usize>().ok();
                header = size(1).zip(size(2));
                if header.is_none() {
                    return Err(PatternError::Malformed(format!("bad header {line:?}")));
                }
                continue;
            }

            let width = header.map(|(w, _)| w);
            // rows are 0-based, so the last row starts at `height - 1`
            let last_row = header.map(|(_, h)| h.saturating_sub(1));
            for caps in TOKEN.captures_iter(line) {
                let (Some(run_str), Some(state)) = (caps.get(1), caps.get(2)) else {
                    return Err(PatternError::Malformed(format!(
                        "unexpected {:?} in {line:?}",
                        &caps[0]
                    )));
                };
                let run = Self::run(run_str.as_str())?;
                match state.as_str() {
                    "!" => break 'lines_loop,
                    "o" => {
                        let end = Self::advance(cursor.x, run, width)?;
                        alive.extend((cursor.x..end).map(|x| Pos2 { x, y: cursor.y }));
                        cursor.x = end;
                    }
                    "b" => cursor.x = Self::advance(cursor.x, run, width)?,
                    "$" => {
                        cursor.x = 0;
                        cursor.y = Self::advance(cursor.y, run, last_row)?;
                    }
                    _ => unreachable!(),
                }
            }
        }

        let (width, height) = match header {
            Some(size) => size,
            None => (
                alive.iter().map(|p| p.x as usize + 1).max().unwrap_or_default(),
                alive.iter().map(|p| p.y as usize + 1).max().unwrap_or_default(),
            ),
        };
        Ok(Pattern::from_cells(alive, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i32, y: i32) -> Pos2 {
        Pos2 { x, y }
    }

    #[test]
    fn decodes_glider_with_header() {
        let text = "#N Glider\n#C a comment\nx = 3, y = 3, rule = B3/S23\nbob$2bo$3o!\n";
        let pattern = RunLengthEncoded.decode(text).unwrap();

        let expected = vec![pos(1, 0), pos(2, 1), pos(0, 2), pos(1, 2), pos(2, 2)];
        assert_eq!(pattern.cells(), expected.as_slice());
        assert_eq!(pattern.row_width(), Some(3));
        assert_eq!(pattern.height(), 3);
    }

    #[test]
    fn body_may_span_lines_and_skip_rows() {
        let text = "2o\n2$o!";
        let pattern = RunLengthEncoded.decode(text).unwrap();

        assert_eq!(pattern.cells(), [pos(0, 0), pos(1, 0), pos(0, 2)].as_slice());
        assert_eq!(pattern.width(), 2);
        assert_eq!(pattern.height(), 3);
    }

    #[test]
    fn stops_at_terminator() {
        let pattern = RunLengthEncoded.decode("o!\n3o!").unwrap();

        assert_eq!(pattern.cells(), [pos(0, 0)].as_slice());
    }

    #[test]
    fn rejects_unknown_states() {
        let err = RunLengthEncoded.decode("x = 2, y = 1\n2A!").unwrap_err();

        assert!(matches!(err, PatternError::Malformed(_)));
    }

    #[test]
    fn rejects_runs_past_coordinate_range() {
        let err = RunLengthEncoded.decode("2147483647b2147483647bo!").unwrap_err();

        assert!(matches!(err, PatternError::Malformed(_)));
        let rows = RunLengthEncoded.decode("2147483647$2147483647$o!").unwrap_err();
        assert!(matches!(rows, PatternError::Malformed(_)));
    }

    #[test]
    fn rejects_runs_past_header_extent() {
        let wide = RunLengthEncoded.decode("x = 2, y = 1\n5o!").unwrap_err();
        let tall = RunLengthEncoded.decode("x = 2, y = 2\no$o$o!").unwrap_err();

        assert!(matches!(wide, PatternError::Malformed(_)));
        assert!(matches!(tall, PatternError::Malformed(_)));
    }

    #[test]
    fn runs_may_fill_header_extent() {
        let pattern = RunLengthEncoded.decode("x = 3, y = 2\n3o$b2o!").unwrap();

        let expected = [pos(0, 0), pos(1, 0), pos(2, 0), pos(1, 1), pos(2, 1)];
        assert_eq!(pattern.cells(), expected.as_slice());
    }
}
