//! Nova Strike - a vertical space shooter for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game state)
//! - `renderer`: Canvas-2d rendering collaborator
//! - `assets`: Sprite loading with placeholder fallback
//! - `settings`: Display preferences
//! - `highscores`: LocalStorage leaderboard

pub mod assets;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz, matching the host's animation rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Play field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Entities this far outside the field are culled
    pub const OFFSCREEN_MARGIN: f32 = 40.0;

    /// Player ship
    pub const PLAYER_SIZE: Vec2 = Vec2::new(48.0, 48.0);
    pub const PLAYER_SPEED: f32 = 300.0;
    /// Minimum interval between player shots (seconds)
    pub const FIRE_COOLDOWN: f32 = 0.2;
    pub const START_LIVES: u32 = 3;

    /// Shots
    pub const PLAYER_SHOT_SIZE: Vec2 = Vec2::new(6.0, 18.0);
    pub const PLAYER_SHOT_SPEED: f32 = 480.0;
    pub const ENEMY_SHOT_SIZE: Vec2 = Vec2::new(8.0, 14.0);
    pub const ENEMY_SHOT_SPEED: f32 = 240.0;

    /// Enemies
    pub const ENEMY_SIZE: Vec2 = Vec2::new(44.0, 40.0);
    pub const ENEMY_MIN_SPEED: f32 = 60.0;
    pub const ENEMY_MAX_SPEED: f32 = 180.0;
    /// Per-tick Bernoulli chance that an enemy fires
    pub const ENEMY_FIRE_CHANCE: f64 = 0.008;
    /// Fraction of spawns that take two hits
    pub const ARMORED_CHANCE: f64 = 0.15;

    /// Spawn pacing (seconds)
    pub const SPAWN_DELAY_START: f32 = 1.5;
    pub const SPAWN_DELAY_MIN: f32 = 0.5;

    /// Points per destroyed enemy
    pub const KILL_SCORE: u32 = 100;
}
