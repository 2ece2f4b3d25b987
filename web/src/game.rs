use crate::utils::*;
use fusebox_core as game;
use game::{Command, Direction, GameConfig, GameEngine, Observation, Position};
use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use wasm_bindgen::JsCast;
use web_time::Instant;
use yew::prelude::*;

/// How often the wall clock is fed into the engine.
const TICK_MS: u32 = 50;

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCellState {
    Empty,
    Bomb,
    Explosion,
    Player,
    PlayerOnBomb,
    PlayerCaught,
}

impl ViewCellState {
    fn from_observation(obs: &Observation, position: Position) -> Self {
        use ViewCellState::*;
        match (
            obs.has_player_at(position),
            obs.has_explosion_at(position),
            obs.has_bomb_at(position),
        ) {
            (true, true, _) => PlayerCaught,
            (true, false, true) => PlayerOnBomb,
            (true, false, false) => Player,
            (false, true, _) => Explosion,
            (false, false, true) => Bomb,
            (false, false, false) => Empty,
        }
    }

    fn classes(self) -> Classes {
        use ViewCellState::*;
        classes!(
            "cell",
            match self {
                Empty => classes!(),
                Bomb => classes!("bomb"),
                Explosion => classes!("explosion"),
                Player => classes!("player"),
                PlayerOnBomb => classes!("player", "bomb"),
                PlayerCaught => classes!("player", "explosion"),
            }
        )
    }
}

/// Keyboard binding: arrows move, space drops a bomb.
fn command_for_key(key: &str) -> Option<Command> {
    Some(match key {
        "ArrowUp" => Command::Move(Direction::Up),
        "ArrowDown" => Command::Move(Direction::Down),
        "ArrowLeft" => Command::Move(Direction::Left),
        "ArrowRight" => Command::Move(Direction::Right),
        " " => Command::PlaceBomb,
        _ => return None,
    })
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Tick,
    Command(Command),
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    cell_state: ViewCellState,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    html! {
        <td class={props.cell_state.classes()}/>
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub config: GameConfig,
    /// Force a seed instead of random
    #[prop_or_default]
    pub seed: Option<u64>,
}

pub(crate) struct GameView {
    engine: GameEngine,
    started_at: Instant,
    _timer_interval: Interval,
    _keydown: EventListener,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(TICK_MS, move || link.send_message(Msg::Tick))
    }

    fn create_key_listener(ctx: &Context<Self>) -> EventListener {
        use gloo::utils::document;

        let link = ctx.link().clone();
        EventListener::new(&document(), "keydown", move |event| {
            let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                return;
            };
            if let Some(command) = command_for_key(&event.key()) {
                event.prevent_default();
                log::trace!("key {:?} -> {:?}", event.key(), command);
                link.send_message(Msg::Command(command));
            }
        })
    }

    /// Brings the engine's logical clock up to the wall clock.
    fn catch_up(&mut self) -> game::StepOutcome {
        let wall_ms = u64::try_from(self.started_at.elapsed().as_millis()).unwrap_or(u64::MAX);
        let elapsed = wall_ms.saturating_sub(self.engine.now());
        self.engine.advance(elapsed)
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let GameProps { config, seed } = ctx.props().clone();
        let seed = seed.unwrap_or_else(js_random_seed);
        log::debug!("new game {:?} with seed {}", config, seed);

        Self {
            engine: GameEngine::new(config, seed),
            started_at: Instant::now(),
            _timer_interval: GameView::create_timer(ctx),
            _keydown: GameView::create_key_listener(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        let outcome = match msg {
            Msg::Tick => self.catch_up(),
            Msg::Command(command) => self.catch_up() | self.engine.apply(command),
        };

        if outcome.is_game_over() {
            log::info!("You lose after {}ms", self.engine.now());
        }
        outcome.has_update()
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let obs = Observation::from_engine(&self.engine);
        let cb_reset = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::Command(Command::Reset)
        });

        html! {
            <div class="fusebox">
                <table class={(!obs.game_over).then_some("playable")}>
                    {
                        for obs.rows().map(|row| html! {
                            <tr>
                                {
                                    for obs.rows().map(|column| {
                                        let cell_state = ViewCellState::from_observation(
                                            &obs,
                                            Position::new(row, column),
                                        );
                                        html! { <CellView {cell_state}/> }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                if obs.game_over {
                    <Modal>
                        <div class="game-over">
                            <p>{"You Lose!"}</p>
                            <button onclick={cb_reset}>{"Play Again?"}</button>
                        </div>
                    </Modal>
                }
            </div>
        }
    }
}
