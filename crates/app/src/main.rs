mod frame_input;
mod ui_render;

use std::env;
use std::process;

use app::app_loop::AppState;
use app::launch::{generate_runtime_seed, parse_launch_args};
use app::save_slot::FileSaveStore;
use dungeon::{Game, Rules, Session};
use macroquad::prelude::*;
use macroquad::window::Conf;

fn window_conf() -> Conf {
    Conf {
        window_title: "Devs Dungeon".to_owned(),
        window_width: 1280,
        window_height: 900,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_launch_args(&args, generate_runtime_seed()) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };
    let seed = options.seed.value();
    let rules = Rules::default();
    let game = match options.class {
        Some(class) => Game::new_with_class(seed, &rules, class),
        None => Game::new(seed, &rules),
    };
    let store = FileSaveStore::at_default_location();
    log::info!("seed {seed} ({:?}), save slot at {}", options.seed, store.path().display());

    let mut app = AppState::new(Session::new(game, store));
    loop {
        let keys = frame_input::capture_frame_input();
        let elapsed_ms = (get_frame_time() * 1000.0).round() as u64;
        app.frame(&keys, elapsed_ms);

        clear_background(BLACK);
        ui_render::draw_frame(&app);
        next_frame().await
    }
}
