//! Pulsewave - a two-craft shockwave duel
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, behavior, collisions)
//!
//! Rendering, input devices, and UI are external collaborators. Input
//! arrives as control commands drained once per tick (see [`sim::tick`]),
//! and the renderer reads a [`sim::RenderSnapshot`] after each tick. The
//! core never draws.

pub mod sim;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Wall-clock milliseconds per tick; timed events count against this
    pub const TICK_MS: f32 = 1000.0 / 60.0;

    /// Player craft defaults
    pub const PLAYER_DIAMETER_FRAC: f32 = 0.05; // of field width
    pub const PLAYER_LIVES: u8 = 5;
    pub const PLAYER_MAX_SPEED: f32 = 10.0;
    pub const PLAYER_FRICTION: f32 = 0.5;
    /// Vertical spawn lane (fraction of field height)
    pub const PLAYER_SPAWN_Y_FRAC: f32 = 0.9;
    /// Horizontal control force from buttons (tilt scales 0..=this)
    pub const CONTROL_FORCE: f32 = 4.0;
    /// Playable horizontal band (fractions of field width)
    pub const EDGE_INSET_MIN: f32 = 0.10;
    pub const EDGE_INSET_MAX: f32 = 0.90;
    /// Inward corrective force at or beyond the band edge
    pub const SOFT_WALL_FORCE: f32 = 8.0;
    /// Supplementary friction coefficient while the soft wall pushes back
    pub const SOFT_WALL_FRICTION: f32 = 2.0;
    /// Invulnerability window after a hit (ms)
    pub const INVULN_MS: f32 = 1000.0;

    /// Projectile launch impulse (upward)
    pub const PROJECTILE_IMPULSE: f32 = 10.0;
    /// Expiry threshold above the top field edge
    pub const PROJECTILE_OFFSCREEN: f32 = 50.0;

    /// Enemy craft defaults
    pub const ENEMY_DIAMETER_FRAC: f32 = 0.08;
    pub const ENEMY_LIVES: u8 = 5;
    /// Velocity cap while actively seeking
    pub const ENEMY_MAX_SPEED: f32 = 20.0;
    /// Steering force toward the current objective
    pub const SEEK_FORCE: f32 = 2.0;
    /// Seeking -> Braking when closer to the objective than this fraction
    /// of the enemy diameter
    pub const BRAKE_DISTANCE_FRAC: f32 = 0.2;
    /// Hard-stop once speed falls below this while braking
    pub const BRAKE_SPEED_EPSILON: f32 = 0.5;
    /// Brake friction is current speed times this factor
    pub const BRAKE_FRICTION_FACTOR: f32 = 0.4;
    /// Objective sub-rectangle, keeps the enemy off the edges and out of
    /// the player's lane (fractions of field size)
    pub const OBJECTIVE_X_MIN: f32 = 0.15;
    pub const OBJECTIVE_X_MAX: f32 = 0.75;
    pub const OBJECTIVE_Y_MIN: f32 = 0.15;
    pub const OBJECTIVE_Y_MAX: f32 = 0.55;
    /// Rings per volley (inclusive bounds)
    pub const VOLLEY_MIN: u8 = 2;
    pub const VOLLEY_MAX: u8 = 6;
    /// Randomized inter-ring delay (ms)
    pub const VOLLEY_DELAY_MIN_MS: f32 = 500.0;
    pub const VOLLEY_DELAY_MAX_MS: f32 = 2000.0;
    /// Fixed tail delay for the last rings of a volley (ms)
    pub const VOLLEY_TAIL_MS: f32 = 20.0;
    /// Death fade rate (opacity units per tick, from 255 down to 0)
    pub const FADE_PER_TICK: u8 = 4;

    /// Shockwave ring base growth (diameter units per frame, scaled by the
    /// ring's stroke multiplier)
    pub const RING_BASE_GROWTH: f32 = 4.0;
    /// Ring thickness as a fraction of outer diameter, per stroke unit
    pub const RING_THICKNESS_RATIO: f32 = 0.05;
    /// Random stroke multiplier bounds, fixed per ring at creation
    pub const RING_STROKE_MIN: f32 = 1.0;
    pub const RING_STROKE_MAX: f32 = 3.0;
    /// Rings are dropped once outer diameter exceeds this many times the
    /// larger field dimension
    pub const RING_CUTOFF_FACTOR: f32 = 2.5;

    /// Projectile-vs-enemy hit radius factor
    pub const ENEMY_HIT_FACTOR: f32 = 0.95;
    /// Ring-vs-player hit edge factor
    pub const RING_HIT_FACTOR: f32 = 0.97;
}
