use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BombId(pub u32);

impl fmt::Display for BombId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BombState {
    #[default]
    Armed,
    Detonated,
    Cleared,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bomb {
    id: BombId,
    position: Position,
    state: BombState,
    placed_at: Millis,
}

impl Bomb {
    pub fn new(id: BombId, position: Position, placed_at: Millis) -> Self {
        Self {
            id,
            position,
            state: Default::default(),
            placed_at,
        }
    }

    pub fn id(&self) -> BombId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn state(&self) -> BombState {
        self.state
    }

    pub fn placed_at(&self) -> Millis {
        self.placed_at
    }

    pub(crate) fn detonate(&mut self) -> Result<()> {
        self.transition(BombState::Armed, BombState::Detonated)
    }

    pub(crate) fn clear(&mut self) -> Result<()> {
        self.transition(BombState::Detonated, BombState::Cleared)
    }

    fn transition(&mut self, expected: BombState, next: BombState) -> Result<()> {
        if self.state != expected {
            return Err(GameError::InvalidBombTransition {
                id: self.id,
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bomb() -> Bomb {
        Bomb::new(BombId(7), Position::new(1, 2), 0)
    }

    #[test]
    fn lifecycle_runs_armed_detonated_cleared() {
        let mut bomb = bomb();
        assert_eq!(bomb.state(), BombState::Armed);

        bomb.detonate().unwrap();
        assert_eq!(bomb.state(), BombState::Detonated);

        bomb.clear().unwrap();
        assert_eq!(bomb.state(), BombState::Cleared);
    }

    #[test]
    fn clearing_an_armed_bomb_is_rejected() {
        let mut bomb = bomb();

        assert_eq!(
            bomb.clear(),
            Err(GameError::InvalidBombTransition {
                id: BombId(7),
                from: BombState::Armed,
                to: BombState::Cleared,
            })
        );
        assert_eq!(bomb.state(), BombState::Armed);
    }

    #[test]
    fn detonating_twice_is_rejected() {
        let mut bomb = bomb();
        bomb.detonate().unwrap();

        assert!(bomb.detonate().is_err());
        assert_eq!(bomb.state(), BombState::Detonated);
    }
}
