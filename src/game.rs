//! Screen state machine: owns the player, the campaign and the RNG, and
//! drives one level at a time through the simulation tick

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioMixer, SoundCue};
use crate::consts::*;
use crate::sim::{tick, GameEvent, Level, Player, TickInput};

/// Which screen is in front
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Playing,
    /// Interstitial after a cleared level
    LevelCleared,
    GameCleared,
    GameOver,
}

/// Input sampled by the shell each frame
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellInput {
    pub pointer_x: f32,
    pub fire: bool,
    /// Primary click edge, used by the menu screens
    pub click: bool,
}

pub struct Game {
    levels: Vec<Level>,
    current: usize,
    pub phase: Phase,
    pub player: Player,
    /// Score of the last finished run, for the end screens
    pub last_score: u32,
    rng: Pcg32,
    /// Shell-global clock for interstitial timing
    time: f32,
    phase_at: f32,
}

impl Game {
    pub fn new(levels: Vec<Level>, seed: u64) -> Self {
        assert!(!levels.is_empty(), "a campaign needs at least one level");
        Self {
            levels,
            current: 0,
            phase: Phase::Start,
            player: Player::new(),
            last_score: 0,
            rng: Pcg32::seed_from_u64(seed),
            time: 0.0,
            phase_at: 0.0,
        }
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.current]
    }

    /// Advance the whole game by one fixed timestep
    pub fn update(&mut self, input: &ShellInput, dt: f32, mixer: &mut AudioMixer) {
        self.time += dt;
        match self.phase {
            Phase::Start => {
                if input.click {
                    mixer.play(SoundCue::Click);
                    mixer.music(true);
                    self.current = 0;
                    self.start_current_level();
                }
            }

            Phase::Playing => {
                let tick_input = TickInput {
                    pointer_x: input.pointer_x,
                    fire: input.fire,
                };
                let mut events = Vec::new();
                tick(
                    &mut self.levels[self.current],
                    &mut self.player,
                    &tick_input,
                    dt,
                    &mut self.rng,
                    &mut events,
                );
                for event in events {
                    match event {
                        GameEvent::Sound(cue) => mixer.play(cue),
                        GameEvent::LevelCleared => {
                            log::info!(
                                "level {} cleared, score {}",
                                self.levels[self.current].number,
                                self.player.score
                            );
                            self.levels[self.current].clear();
                            self.phase = Phase::LevelCleared;
                            self.phase_at = self.time;
                            break;
                        }
                        GameEvent::PlayerDestroyed => {
                            log::info!("game over, score {}", self.player.score);
                            self.levels[self.current].clear();
                            self.last_score = self.player.score;
                            self.player.reset();
                            mixer.music(false);
                            mixer.play(SoundCue::PlayerDeath);
                            self.phase = Phase::GameOver;
                            break;
                        }
                    }
                }
            }

            Phase::LevelCleared => {
                if self.time - self.phase_at >= LEVEL_CLEARED_DURATION {
                    if self.current + 1 < self.levels.len() {
                        self.current += 1;
                        self.start_current_level();
                    } else {
                        log::info!("campaign cleared, score {}", self.player.score);
                        self.last_score = self.player.score;
                        self.player.reset();
                        mixer.music(false);
                        mixer.play(SoundCue::GameCleared);
                        self.phase = Phase::GameCleared;
                    }
                }
            }

            Phase::GameOver | Phase::GameCleared => {
                if input.click {
                    mixer.play(SoundCue::Click);
                    self.phase = Phase::Start;
                }
            }
        }
    }

    fn start_current_level(&mut self) {
        self.levels[self.current].start(&mut self.player);
        self.phase = Phase::Playing;
        self.phase_at = self.time;
    }
}

/// Derive shell input from the simulation state: sidestep the nearest
/// incoming bullet, otherwise line up under the closest enemy. Fires
/// continuously. Good enough to demo the game without a window.
pub fn autopilot(level: &Level, player: &Player) -> ShellInput {
    let ship_x = player.rect.center.x;
    let ship_top = player.rect.top();

    // The most pressing bullet: above us, descending, roughly in our lane
    let threat = level
        .enemy_bullets
        .iter()
        .filter(|b| {
            b.dir.y > 0.0 && b.rect.center.y < ship_top && (b.rect.center.x - ship_x).abs() < 50.0
        })
        .min_by(|a, b| {
            let da = ship_top - a.rect.center.y;
            let db = ship_top - b.rect.center.y;
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });

    let pointer_x = if let Some(bullet) = threat {
        if bullet.rect.center.x >= ship_x {
            ship_x - 70.0
        } else {
            ship_x + 70.0
        }
    } else if let Some(enemy) = level.enemies.iter().min_by(|a, b| {
        let da = (a.rect.center.x - ship_x).abs();
        let db = (b.rect.center.x - ship_x).abs();
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    }) {
        enemy.rect.center.x
    } else {
        FIELD_WIDTH / 2.0
    };

    ShellInput {
        pointer_x: pointer_x.clamp(0.0, FIELD_WIDTH),
        fire: true,
        click: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullBackend;
    use crate::settings::Settings;
    use crate::sim::SpawnRecord;

    fn mixer() -> AudioMixer {
        AudioMixer::new(Box::new(NullBackend), &Settings::default())
    }

    // A single stationary flooder: the autopilot parks under it and kills
    // it with certainty before its firing window opens
    fn tiny_level(number: u32) -> Level {
        let mut level = Level::new(number, "t", "t", 0);
        level.schedule(0.1, SpawnRecord::FlooderDown { x: 100.0, y: 50.0 });
        level
    }

    fn click() -> ShellInput {
        ShellInput {
            pointer_x: FIELD_WIDTH / 2.0,
            fire: false,
            click: true,
        }
    }

    #[test]
    fn click_starts_the_first_level() {
        let mut game = Game::new(vec![tiny_level(1)], 1);
        let mut mixer = mixer();
        game.update(&ShellInput::default(), SIM_DT, &mut mixer);
        assert_eq!(game.phase, Phase::Start);
        game.update(&click(), SIM_DT, &mut mixer);
        assert_eq!(game.phase, Phase::Playing);
    }

    #[test]
    fn cleared_level_advances_after_the_interstitial() {
        let mut game = Game::new(vec![tiny_level(1), tiny_level(2)], 1);
        let mut mixer = mixer();
        game.update(&click(), SIM_DT, &mut mixer);

        // The autopilot lines up under the lone flooder and shoots it down
        let mut guard = 0;
        while game.phase == Phase::Playing {
            let input = autopilot(game.current_level(), &game.player);
            game.update(&input, SIM_DT, &mut mixer);
            guard += 1;
            assert!(guard < 60 * 120, "level one never cleared");
        }
        assert_eq!(game.phase, Phase::LevelCleared);
        assert_eq!(game.current_level().number, 1);

        // Interstitial holds, then level two starts
        let idle = ShellInput::default();
        for _ in 0..((LEVEL_CLEARED_DURATION / SIM_DT) as u32 + 2) {
            game.update(&idle, SIM_DT, &mut mixer);
        }
        assert_eq!(game.phase, Phase::Playing);
        assert_eq!(game.current_level().number, 2);
        // Run progress persists between levels
        assert!(game.player.score > 0);
    }

    #[test]
    fn game_over_wipes_the_run_and_keeps_last_score() {
        let mut game = Game::new(vec![tiny_level(1)], 1);
        let mut mixer = mixer();
        game.update(&click(), SIM_DT, &mut mixer);
        game.player.score = 123;
        game.player.lives = 1;

        // Force a ram: park the enemy on the ship once it exists
        let idle = ShellInput {
            pointer_x: FIELD_WIDTH / 2.0,
            fire: false,
            click: false,
        };
        let mut guard = 0;
        while game.phase == Phase::Playing {
            if let Some(enemy) = game.levels[game.current].enemies.first_mut() {
                enemy.rect.center = game.player.rect.center;
            }
            game.update(&idle, SIM_DT, &mut mixer);
            guard += 1;
            assert!(guard < 600, "ram never registered");
        }
        assert_eq!(game.phase, Phase::GameOver);
        assert_eq!(game.last_score, 123 + FLOODER_SCORE_KILL);
        assert_eq!(game.player.score, 0);
        assert_eq!(game.player.lives, PLAYER_LIVES);

        // Click returns to the start screen
        game.update(&click(), SIM_DT, &mut mixer);
        assert_eq!(game.phase, Phase::Start);
    }

    #[test]
    fn autopilot_stays_on_the_field() {
        let level = tiny_level(1);
        let player = Player::new();
        let input = autopilot(&level, &player);
        assert!((0.0..=FIELD_WIDTH).contains(&input.pointer_x));
        assert!(input.fire);
    }
}
