//! Starfall - a vertically scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, wave scheduling, collisions)
//! - `levels`: Authored campaign tables fed to the wave scheduler
//! - `game`: Screen state machine driving the simulation
//! - `audio`: Sound cue routing over a fire-and-forget backend
//! - `settings`: Player preferences

pub mod audio;
pub mod game;
pub mod levels;
pub mod settings;
pub mod sim;

pub use audio::{AudioMixer, SoundCue};
pub use game::{Game, Phase};
pub use settings::Settings;

/// Game tuning constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Playfield dimensions (the HUD column lives outside these bounds)
    pub const FIELD_WIDTH: f32 = 540.0;
    pub const FIELD_HEIGHT: f32 = 480.0;

    /// Player defaults
    pub const PLAYER_SIZE: Vec2 = Vec2::new(34.0, 26.0);
    /// Gap between the ship's bottom edge and the bottom of the playfield
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;
    pub const PLAYER_FIRE_DELAY: f32 = 0.3;
    pub const PLAYER_LIVES: i32 = 3;
    /// Invulnerability window after taking a hit (doubles as the hit flash)
    pub const PLAYER_HIT_DURATION: f32 = 0.5;
    pub const MAX_BULLET_TIER: u8 = 2;
    /// Horizontal offset of the side bullets in the tier-2 fan
    pub const BULLET_FAN_SPREAD: f32 = 12.0;

    /// Bullet defaults
    pub const BULLET_LIGHT_SPEED: f32 = 360.0;
    pub const BULLET_LIGHT_DAMAGE: i32 = 1;
    pub const BULLET_LIGHT_SIZE: Vec2 = Vec2::new(6.0, 14.0);
    pub const BULLET_HEAVY_SPEED: f32 = 360.0;
    pub const BULLET_HEAVY_DAMAGE: i32 = 2;
    pub const BULLET_HEAVY_SIZE: Vec2 = Vec2::new(10.0, 10.0);

    /// Collectible defaults
    pub const COLLECTIBLE_SPEED: f32 = 60.0;
    pub const COLLECTIBLE_SIZE: Vec2 = Vec2::new(18.0, 18.0);
    pub const EXTRA_SCORE_BONUS: u32 = 20;
    pub const POWER_UP_BONUS: u32 = 10;
    /// Probability that a kill drops anything at all
    pub const DROP_PROBABILITY: f32 = 0.35;
    /// Probability that a drop is a power-up rather than extra score
    pub const POWER_UP_PROBABILITY: f32 = 0.3;

    /// Enemy defaults
    pub const ENEMY_ENTRANCE_SPEED: f32 = 180.0;
    pub const ENEMY_HIT_FLASH: f32 = 0.2;

    pub const PARASITE_SIZE: Vec2 = Vec2::new(28.0, 22.0);
    pub const PARASITE_SPEED: f32 = 120.0;
    pub const PARASITE_DOWN_SPEED: f32 = 6.0;
    pub const PARASITE_BASE_FIRE_DELAY: f32 = 5.0;
    /// Uniform jitter added to the base delay, re-rolled after every shot
    pub const PARASITE_FIRE_JITTER: f32 = 5.0;
    pub const PARASITE_LIVES: i32 = 2;
    pub const PARASITE_SCORE_KILL: u32 = 10;

    pub const FLOODER_SIZE: Vec2 = Vec2::new(26.0, 26.0);
    pub const FLOODER_SPEED: f32 = 180.0;
    pub const FLOODER_LIVES: i32 = 4;
    pub const FLOODER_SCORE_KILL: u32 = 20;
    /// Firing window of the descending flooder, measured from spawn
    pub const FLOODER_DOWN_FIRE_START: f32 = 3.0;
    pub const FLOODER_DOWN_FIRE_STOP: f32 = 3.5;
    pub const FLOODER_DOWN_FIRE_DELAY: f32 = 0.05;
    /// Once this deadline passes the flooder moves instead of firing
    pub const FLOODER_DOWN_MOVE_TIME: f32 = 4.5;
    pub const FLOODER_U_SPEED: f32 = 180.0;
    /// Dwell time at an anchor before each sweep leg
    pub const FLOODER_U_MOVE_TIME: f32 = 2.0;
    /// Inset of the two sweep anchors from the playfield border
    pub const FLOODER_U_INSET: f32 = 20.0;

    pub const GEAR_SIZE: Vec2 = Vec2::new(30.0, 30.0);
    pub const GEAR_SPEED: f32 = 60.0;
    pub const GEAR_FIRE_DELAY: f32 = 5.0;
    pub const GEAR_LIVES: i32 = 10;
    pub const GEAR_SCORE_KILL: u32 = 40;
    /// Sprite animation cadence (two frames)
    pub const GEAR_FRAME_DURATION: f32 = 0.2;
    pub const GEAR_WAVE_AMP: f32 = 40.0;
    /// Vertical wave frequency in rad/s
    pub const GEAR_WAVE_FREQ: f32 = 3.0;
    /// Bullets per radial ring
    pub const GEAR_RING_BULLETS: u32 = 16;

    pub const BEAST_SIZE: Vec2 = Vec2::new(64.0, 56.0);
    /// Firing window measured from spawn; both marks re-arm when the stop
    /// mark passes, so the burst cycle is periodic
    pub const BEAST_FIRE_START: f32 = 2.5;
    pub const BEAST_FIRE_STOP: f32 = 3.5;
    pub const BEAST_FIRE_DELAY: f32 = 0.3;
    /// Half the distance between the two aimed bullets
    pub const BEAST_BULLET_SEPARATION: f32 = 10.0;
    pub const BEAST_LIVES: i32 = 60;
    pub const BEAST_SCORE_KILL: u32 = 100;
    pub const BEAST_ORBIT_AMP: f32 = 30.0;
    /// Orbit frequency in revolutions per second
    pub const BEAST_ORBIT_FREQ: f32 = 0.2;

    /// Interstitial shown between a cleared level and the next
    pub const LEVEL_CLEARED_DURATION: f32 = 1.5;
}
