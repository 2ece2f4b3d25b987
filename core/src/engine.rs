use alloc::collections::BTreeMap;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    Running,
    Over,
}

impl EngineState {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Over)
    }
}

/// Everything that is thrown away on reset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    player: Position,
    bombs: BTreeMap<BombId, Bomb>,
    state: EngineState,
}

impl GameState {
    pub fn new(size: Coord) -> Self {
        Self {
            board: Board::new(size),
            player: Position::ORIGIN,
            bombs: BTreeMap::new(),
            state: Default::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player_position(&self) -> Position {
        self.player
    }

    pub fn bombs(&self) -> impl Iterator<Item = &Bomb> {
        self.bombs.values()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_over()
    }
}

/// The whole game: board, player, bombs, and the logical clock that drives them.
#[derive(Clone, Debug)]
pub struct GameEngine {
    config: GameConfig,
    game: GameState,
    timeline: Timeline,
    spawner: PeriodicTask,
    rng: SmallRng,
    next_bomb_id: u32,
}

impl GameEngine {
    /// Creates a running game; the first automatic bomb arrives one spawn period from now.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let config = config.sanitized();
        let mut timeline = Timeline::new();
        let mut spawner = PeriodicTask::new(config.spawn_period_ms, TimerEvent::SpawnBomb);
        spawner.start(&mut timeline);

        Self {
            config,
            game: GameState::new(config.size),
            timeline,
            spawner,
            rng: SmallRng::seed_from_u64(seed),
            next_bomb_id: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn board(&self) -> &Board {
        &self.game.board
    }

    pub fn size(&self) -> Coord {
        self.game.board.size()
    }

    pub fn state(&self) -> EngineState {
        self.game.state
    }

    pub fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    pub fn player_position(&self) -> Position {
        self.game.player
    }

    pub fn cell_at(&self, position: Position) -> Result<CellFlags> {
        self.game.board.cell_at(position)
    }

    pub fn bomb(&self, id: BombId) -> Option<&Bomb> {
        self.game.bombs.get(&id)
    }

    pub fn bombs(&self) -> impl Iterator<Item = &Bomb> {
        self.game.bombs()
    }

    pub fn now(&self) -> Millis {
        self.timeline.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.timeline.len()
    }

    pub fn is_spawning(&self) -> bool {
        self.spawner.is_running()
    }

    pub fn apply(&mut self, command: Command) -> StepOutcome {
        use Command::*;
        match command {
            Move(direction) => self.move_in(direction),
            PlaceBomb => self.place_bomb(),
            Reset if self.is_game_over() => {
                self.reset_game();
                StepOutcome::Changed
            }
            Reset => StepOutcome::NoChange,
        }
    }

    pub fn move_in(&mut self, direction: Direction) -> StepOutcome {
        let (row_delta, column_delta) = direction.delta();
        self.move_player(row_delta, column_delta)
    }

    /// Moves the player by the given delta; moves that would leave the board are ignored.
    pub fn move_player(&mut self, row_delta: isize, column_delta: isize) -> StepOutcome {
        if self.is_game_over() {
            return StepOutcome::NoChange;
        }

        let Some(next) = self
            .game
            .player
            .offset((row_delta, column_delta), self.size())
        else {
            log::trace!("move ({}, {}) blocked at the edge", row_delta, column_delta);
            return StepOutcome::NoChange;
        };

        self.game.player = next;
        StepOutcome::Changed | self.check_collision()
    }

    /// Drops a bomb on a uniformly random cell; an occupied cell swallows the placement.
    pub fn place_bomb(&mut self) -> StepOutcome {
        if self.is_game_over() {
            return StepOutcome::NoChange;
        }

        let size = self.size();
        let position = Position::new(
            self.rng.random_range(0..size),
            self.rng.random_range(0..size),
        );
        self.arm_bomb(position)
    }

    pub fn place_bomb_at(&mut self, position: Position) -> Result<StepOutcome> {
        let position = self.game.board.validate(position)?;
        if self.is_game_over() {
            return Ok(StepOutcome::NoChange);
        }
        Ok(self.arm_bomb(position))
    }

    fn arm_bomb(&mut self, position: Position) -> StepOutcome {
        let cell = &mut self.game.board[position];
        if cell.has_bomb() {
            log::debug!("bomb at {} dropped, cell already armed", position);
            return StepOutcome::NoChange;
        }
        cell.insert(CellFlags::BOMB);

        let id = BombId(self.next_bomb_id);
        self.next_bomb_id = self.next_bomb_id.wrapping_add(1);
        self.game
            .bombs
            .insert(id, Bomb::new(id, position, self.timeline.now()));
        self.schedule_bomb_timer(self.config.fuse_ms, TimerEvent::Detonate(id));

        log::debug!("bomb {} armed at {}", id, position);
        StepOutcome::Changed
    }

    pub fn detonate_bomb(&mut self, id: BombId) -> Result<StepOutcome> {
        let bomb = self
            .game
            .bombs
            .get_mut(&id)
            .ok_or(GameError::UnknownBomb(id))?;
        bomb.detonate()?;
        let origin = bomb.position();

        self.game.board.mark_blast(origin);
        log::debug!("bomb {} detonated at {}", id, origin);

        let outcome = StepOutcome::Changed | self.check_collision();
        self.schedule_bomb_timer(self.config.blast_ms, TimerEvent::Clear(id));
        Ok(outcome)
    }

    pub fn clear_bomb(&mut self, id: BombId) -> Result<StepOutcome> {
        let bomb = self
            .game
            .bombs
            .get_mut(&id)
            .ok_or(GameError::UnknownBomb(id))?;
        bomb.clear()?;
        let origin = bomb.position();

        self.game.bombs.remove(&id);
        self.game.board.clear_blast(origin);
        log::trace!("bomb {} cleared", id);
        Ok(StepOutcome::Changed)
    }

    /// Ends the game if the player stands in an explosion. Armed bombs are harmless.
    pub fn check_collision(&mut self) -> StepOutcome {
        if self.is_game_over() {
            return StepOutcome::NoChange;
        }

        if self.game.board[self.game.player].has_explosion() {
            self.end_game()
        } else {
            StepOutcome::NoChange
        }
    }

    pub fn end_game(&mut self) -> StepOutcome {
        if self.is_game_over() {
            return StepOutcome::NoChange;
        }

        self.game.state = EngineState::Over;
        self.spawner.stop(&mut self.timeline);
        if self.config.timer_policy == TimerPolicy::CancelOnGameOver {
            let cancelled = self.timeline.cancel_bomb_timers();
            log::debug!("cancelled {} pending bomb timers", cancelled);
        }

        log::info!(
            "game over at {}ms, player caught at {}",
            self.timeline.now(),
            self.game.player
        );
        StepOutcome::GameOver
    }

    pub fn reset_game(&mut self) {
        self.game = GameState::new(self.config.size);
        self.timeline.cancel_bomb_timers();
        self.spawner.start(&mut self.timeline);
        log::info!("game reset at {}ms", self.timeline.now());
    }

    /// Moves the logical clock forward by `elapsed`, firing every timer that comes due on the way.
    pub fn advance(&mut self, elapsed: Millis) -> StepOutcome {
        let until = self.timeline.now().saturating_add(elapsed);
        let mut outcome = StepOutcome::NoChange;
        while let Some(event) = self.timeline.pop_due(until) {
            outcome = outcome | self.fire(event);
        }
        self.timeline.settle(until);
        outcome
    }

    fn fire(&mut self, event: TimerEvent) -> StepOutcome {
        use TimerEvent::*;

        let result = match event {
            SpawnBomb => {
                self.spawner.rearm(&mut self.timeline);
                Ok(self.place_bomb())
            }
            Detonate(id) => self.detonate_bomb(id),
            Clear(id) => self.clear_bomb(id),
        };

        result.unwrap_or_else(|err| {
            log::warn!("timer {:?} ignored: {}", event, err);
            StepOutcome::NoChange
        })
    }

    fn schedule_bomb_timer(&mut self, delay: Millis, event: TimerEvent) {
        if self.is_game_over() && self.config.timer_policy == TimerPolicy::CancelOnGameOver {
            return;
        }
        self.timeline.schedule(delay, event);
    }
}
