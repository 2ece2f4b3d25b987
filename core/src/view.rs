use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only snapshot of everything a renderer needs to draw a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub size: Coord,
    pub player: Position,
    pub game_over: bool,
    pub bombs: Array2<bool>,
    pub explosions: Array2<bool>,
    pub time: Millis,
}

impl Observation {
    pub fn from_engine(engine: &GameEngine) -> Self {
        let board = engine.board();
        Self {
            size: board.size(),
            player: engine.player_position(),
            game_over: engine.is_game_over(),
            bombs: board.mask(CellFlags::BOMB),
            explosions: board.mask(CellFlags::EXPLOSION),
            time: engine.now(),
        }
    }

    pub fn has_player_at(&self, position: Position) -> bool {
        self.player == position
    }

    pub fn has_bomb_at(&self, position: Position) -> bool {
        self.bombs.get(position.to_nd_index()).copied().unwrap_or(false)
    }

    pub fn has_explosion_at(&self, position: Position) -> bool {
        self.explosions
            .get(position.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    pub fn rows(&self) -> impl Iterator<Item = Coord> + use<> {
        0..self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_engine_maps_bombs_explosions_and_player() {
        let mut engine = GameEngine::new(GameConfig::new(4), 0);
        engine.place_bomb_at(Position::new(3, 3)).unwrap();
        engine.place_bomb_at(Position::new(0, 3)).unwrap();
        engine.move_in(Direction::Down);
        engine.detonate_bomb(BombId(1)).unwrap();

        let obs = Observation::from_engine(&engine);

        assert_eq!(obs.size, 4);
        assert!(obs.has_player_at(Position::new(1, 0)));
        assert!(!obs.game_over);
        assert!(obs.has_bomb_at(Position::new(3, 3)));
        assert!(!obs.has_bomb_at(Position::new(0, 3)));
        assert!(obs.has_explosion_at(Position::new(0, 3)));
        assert!(obs.has_explosion_at(Position::new(1, 3)));
        assert!(obs.has_explosion_at(Position::new(0, 2)));
        assert!(!obs.has_explosion_at(Position::new(3, 3)));
        assert_eq!(obs.explosions.iter().filter(|&&hit| hit).count(), 3);
    }

    #[test]
    fn lookups_outside_the_board_are_empty() {
        let mut engine = GameEngine::new(GameConfig::new(2), 0);
        engine.place_bomb_at(Position::new(1, 1)).unwrap();

        let obs = Observation::from_engine(&engine);

        assert!(obs.has_bomb_at(Position::new(1, 1)));
        assert!(!obs.has_bomb_at(Position::new(2, 1)));
        assert!(!obs.has_explosion_at(Position::new(1, 2)));
        assert!(!obs.has_explosion_at(Position::new(200, 200)));
    }

    #[test]
    fn snapshot_reports_game_over() {
        let mut engine = GameEngine::new(GameConfig::new(3), 0);
        engine.place_bomb_at(Position::ORIGIN).unwrap();
        engine.advance(3000);

        let obs = Observation::from_engine(&engine);

        assert!(obs.game_over);
        assert_eq!(obs.time, 3000);
    }
}
