//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, owned by the state
//! - Stable iteration order (push order, stable entity IDs)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use state::{Enemy, GameEvent, GamePhase, GameState, Player, Shot, ShotOwner};
pub use tick::{TickInput, spawn_delay_for_score, tick};
