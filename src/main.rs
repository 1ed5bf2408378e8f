//! Headless shell: runs the campaign on the autopilot at full speed and
//! logs the outcome. Rendering and real input are external concerns; this
//! binary exists to exercise the whole simulation end to end.

use starfall::audio::{AudioMixer, LogBackend};
use starfall::consts::SIM_DT;
use starfall::game::{autopilot, Game, Phase};
use starfall::levels;
use starfall::settings::Settings;

/// Hard stop for the demo loop (an hour of simulated play)
const MAX_TICKS: u64 = 60 * 60 * 60;

fn main() {
    env_logger::init();

    let settings = Settings::load(Settings::DEFAULT_PATH);
    let mut mixer = AudioMixer::new(Box::new(LogBackend), &settings);
    let mut game = Game::new(levels::campaign(), settings.demo_seed);

    log::info!("demo run, seed {}", settings.demo_seed);

    let mut ticks: u64 = 0;
    while ticks < MAX_TICKS {
        let mut input = autopilot(game.current_level(), &game.player);
        // The menus want a click, the game wants the stick
        input.click = game.phase == Phase::Start;
        game.update(&input, SIM_DT, &mut mixer);
        ticks += 1;
        if matches!(game.phase, Phase::GameOver | Phase::GameCleared) {
            break;
        }
    }

    let minutes = ticks as f32 * SIM_DT / 60.0;
    match game.phase {
        Phase::GameCleared => {
            log::info!("campaign cleared in {minutes:.1} min, score {}", game.last_score)
        }
        Phase::GameOver => {
            log::info!("shot down after {minutes:.1} min, score {}", game.last_score)
        }
        _ => log::warn!("demo hit the tick limit after {minutes:.1} min"),
    }
}
