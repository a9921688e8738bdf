use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while turning a seed pattern into an initial state
///
/// Once a state exists, stepping it cannot fail.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The seed path does not resolve to a readable file
    #[error("pattern {} not found", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The pattern cannot be parsed into a width and height
    #[error("malformed pattern: {0}")]
    Malformed(String),
    /// The pattern does not fit into the fixed grid
    #[error("pattern of {width}x{height} cells does not fit a {side}x{side} grid")]
    TooLarge {
        width: usize,
        height: usize,
        side: usize,
    },
}
