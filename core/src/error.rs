use thiserror::Error;

use crate::{BombId, BombState, Position};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Position {0} is outside the board")]
    OutOfBounds(Position),
    #[error("No active bomb with id {0}")]
    UnknownBomb(BombId),
    #[error("Bomb {id} cannot go from {from:?} to {to:?}")]
    InvalidBombTransition {
        id: BombId,
        from: BombState,
        to: BombState,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
