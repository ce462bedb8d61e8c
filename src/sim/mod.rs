//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (60 Hz)
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! Per-tick order: drain control input -> player integrates -> enemy
//! advances its behavior state and integrates -> collisions are resolved
//! against post-movement positions.

pub mod body;
pub mod collision;
pub mod ring;
pub mod state;
pub mod tick;

pub use body::KinematicBody;
pub use collision::{projectile_hits_enemy, resolve};
pub use ring::ShockwaveRing;
pub use state::{
    BehaviorState, ControlSignal, EnemyCraft, EnemyView, FieldConfig, PlayerCraft, PlayerView,
    Projectile, RenderSnapshot, RingView, SimPhase, SimState,
};
pub use tick::{ControlCommand, ControlState, TickInput, tick};
