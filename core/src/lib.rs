#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use bomb::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use schedule::*;
pub use types::*;
pub use view::*;

mod board;
mod bomb;
mod cell;
mod engine;
mod error;
mod schedule;
mod types;
mod view;

pub const DEFAULT_BOARD_SIZE: Coord = 10;
pub const DEFAULT_FUSE_MS: Millis = 3000;
pub const DEFAULT_BLAST_MS: Millis = 500;
pub const DEFAULT_SPAWN_PERIOD_MS: Millis = 2000;

/// What happens to already scheduled detonations and clears once the game is over.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerPolicy {
    /// Pending bomb timers are dropped, the board freezes as it was at the moment of loss.
    #[default]
    CancelOnGameOver,
    /// Pending bomb timers keep firing and mutating the board after the loss.
    RunToCompletion,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub fuse_ms: Millis,
    pub blast_ms: Millis,
    pub spawn_period_ms: Millis,
    pub timer_policy: TimerPolicy,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord) -> Self {
        Self {
            size,
            fuse_ms: DEFAULT_FUSE_MS,
            blast_ms: DEFAULT_BLAST_MS,
            spawn_period_ms: DEFAULT_SPAWN_PERIOD_MS,
            timer_policy: TimerPolicy::CancelOnGameOver,
        }
    }

    pub fn new(size: Coord) -> Self {
        Self::new_unchecked(size.max(1))
    }

    /// Zero delays are bumped to 1ms so every timer lands strictly after the event that scheduled it.
    pub fn with_timings(self, fuse_ms: Millis, blast_ms: Millis, spawn_period_ms: Millis) -> Self {
        Self {
            fuse_ms: fuse_ms.max(1),
            blast_ms: blast_ms.max(1),
            spawn_period_ms: spawn_period_ms.max(1),
            ..self
        }
    }

    pub const fn with_timer_policy(self, timer_policy: TimerPolicy) -> Self {
        Self {
            timer_policy,
            ..self
        }
    }

    /// Applies the same clamping as [`GameConfig::new`] and [`GameConfig::with_timings`].
    pub fn sanitized(self) -> Self {
        Self::new(self.size)
            .with_timings(self.fuse_ms, self.blast_ms, self.spawn_period_ms)
            .with_timer_policy(self.timer_policy)
    }

    pub const fn total_cells(&self) -> u16 {
        (self.size as u16) * (self.size as u16)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_BOARD_SIZE)
    }
}

/// Input the engine accepts from the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    PlaceBomb,
    Reset,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    NoChange,
    Changed,
    GameOver,
}

impl StepOutcome {
    pub const fn has_update(self) -> bool {
        use StepOutcome::*;
        match self {
            NoChange => false,
            Changed => true,
            GameOver => true,
        }
    }

    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::GameOver)
    }
}

impl BitOr for StepOutcome {
    type Output = StepOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use StepOutcome::*;
        match (self, rhs) {
            (GameOver, _) => GameOver,
            (_, GameOver) => GameOver,
            (Changed, _) => Changed,
            (_, Changed) => Changed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_degenerate_values() {
        let config = GameConfig::new(0).with_timings(0, 0, 0);

        assert_eq!(config.size, 1);
        assert_eq!(config.fuse_ms, 1);
        assert_eq!(config.blast_ms, 1);
        assert_eq!(config.spawn_period_ms, 1);
    }

    #[test]
    fn sanitized_repairs_hand_built_configs() {
        let config = GameConfig {
            size: 0,
            fuse_ms: 0,
            blast_ms: 0,
            spawn_period_ms: 0,
            timer_policy: TimerPolicy::RunToCompletion,
        }
        .sanitized();

        assert_eq!(config.size, 1);
        assert_eq!((config.fuse_ms, config.blast_ms, config.spawn_period_ms), (1, 1, 1));
        assert_eq!(config.timer_policy, TimerPolicy::RunToCompletion);
        assert_eq!(GameConfig::default().sanitized(), GameConfig::default());
    }

    #[test]
    fn default_config_uses_arcade_timings() {
        let config = GameConfig::default();

        assert_eq!(config.size, 10);
        assert_eq!(config.total_cells(), 100);
        assert_eq!(
            (config.fuse_ms, config.blast_ms, config.spawn_period_ms),
            (3000, 500, 2000)
        );
        assert_eq!(config.timer_policy, TimerPolicy::CancelOnGameOver);
    }

    #[test]
    fn game_over_dominates_combined_outcomes() {
        use StepOutcome::*;

        assert_eq!(NoChange | NoChange, NoChange);
        assert_eq!(NoChange | Changed, Changed);
        assert_eq!(Changed | GameOver, GameOver);
        assert_eq!(GameOver | NoChange, GameOver);
        assert!(!NoChange.has_update());
    }
}
