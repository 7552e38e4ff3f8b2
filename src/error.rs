use thiserror::Error;

use crate::board::{Pos, Symbol};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("board size {size} is too small, the smallest supported board is 3x3")]
    BoardTooSmall { size: usize },

    #[error("win streak {streak} does not fit a {size}x{size} board (need 3 <= streak <= size)")]
    StreakOutOfRange { streak: usize, size: usize },

    #[error("no canonical win streak for a {size}x{size} board, pass one explicitly")]
    NoCanonicalStreak { size: usize },

    #[error("cell grid has {got} cells, expected {expected} for a {size}x{size} board")]
    ShapeMismatch {
        got: usize,
        expected: usize,
        size: usize,
    },

    #[error("position {pos} is outside the {size}x{size} board")]
    OutOfBounds { pos: Pos, size: usize },

    #[error("cell {pos} is already occupied")]
    Occupied { pos: Pos },

    #[error("game is already decided, {winner} has a completed streak")]
    GameOver { winner: Symbol },

    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),
}
