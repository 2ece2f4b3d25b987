use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Board width and height
    #[arg(long, default_value_t = fusebox_core::DEFAULT_BOARD_SIZE)]
    size: u8,

    /// Keep detonating already placed bombs after the player loses
    #[arg(long)]
    drift: bool,
}

impl Args {
    fn game_props(&self) -> game::GameProps {
        use fusebox_core::{GameConfig, TimerPolicy};

        let timer_policy = if self.drift {
            TimerPolicy::RunToCompletion
        } else {
            TimerPolicy::CancelOnGameOver
        };
        game::GameProps {
            config: GameConfig::new(self.size).with_timer_policy(timer_policy),
            seed: self.seed,
        }
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, args.game_props()).render();
}
