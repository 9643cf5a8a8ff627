//! Game state and core simulation types
//!
//! Everything the simulation owns lives here; a serialized `GameState` is a
//! complete snapshot of a run (minus the transient event queue).

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start command; no entities exist yet
    NotStarted,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Who fired a shot (decides direction, size, and which collisions apply)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOwner {
    Player,
    Enemy,
}

/// A projectile entity
///
/// Shots travel vertically; the sign of `vy` is the direction (negative =
/// toward the top edge).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shot {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity in px/s
    pub vy: f32,
    pub owner: ShotOwner,
}

impl Shot {
    pub fn size(&self) -> Vec2 {
        match self.owner {
            ShotOwner::Player => PLAYER_SHOT_SIZE,
            ShotOwner::Enemy => ENEMY_SHOT_SIZE,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size())
    }
}

/// An enemy ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Downward speed in px/s, fixed at spawn
    pub speed: f32,
    /// Remaining hit points
    pub hp: u8,
}

impl Enemy {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, ENEMY_SIZE)
    }

    /// Where this enemy's shots appear (bottom center)
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + (ENEMY_SIZE.x - ENEMY_SHOT_SIZE.x) / 2.0,
            self.pos.y + ENEMY_SIZE.y,
        )
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Seconds until the next shot is allowed
    pub fire_cooldown: f32,
}

impl Player {
    /// Starting position: horizontally centered, just above the bottom edge
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(
                (FIELD_WIDTH - PLAYER_SIZE.x) / 2.0,
                FIELD_HEIGHT - PLAYER_SIZE.y - 24.0,
            ),
            fire_cooldown: 0.0,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, PLAYER_SIZE)
    }

    /// Where player shots appear (nose of the ship)
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + (PLAYER_SIZE.x - PLAYER_SHOT_SIZE.x) / 2.0,
            self.pos.y - PLAYER_SHOT_SIZE.y,
        )
    }
}

/// Things that happened during a tick, for the HUD and logging.
/// Drained by the front end each frame; never read back by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ShotFired { owner: ShotOwner },
    EnemySpawned { id: u32 },
    EnemyDestroyed { id: u32 },
    PlayerHit { lives_left: u32 },
    GameOver { score: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG stream; serialized so a snapshot resumes at the same position
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Score (+100 per destroyed enemy)
    pub score: u32,
    /// Enemies destroyed this run
    pub kills: u32,
    /// Remaining lives
    pub lives: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seconds since the last enemy spawn
    pub spawn_timer: f32,
    /// Player ship
    pub player: Player,
    /// Live shots, both owners (stable push order)
    pub shots: Vec<Shot>,
    /// Live enemies (stable push order)
    pub enemies: Vec<Enemy>,
    /// Events emitted by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh state with the given seed, waiting for start
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            score: 0,
            kills: 0,
            lives: START_LIVES,
            time_ticks: 0,
            spawn_timer: 0.0,
            player: Player::spawn(),
            shots: Vec::new(),
            enemies: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Full reset for the restart command: score 0, lives 3, collections
    /// empty, timers zeroed. The next run's seed comes from the current RNG
    /// stream so scripted input traces stay deterministic across restarts.
    pub fn reset(&mut self) {
        use rand::RngCore;
        let seed = self.rng.next_u64();
        *self = GameState::new(seed);
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
