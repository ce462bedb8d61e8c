//! Simulation state and entity types
//!
//! Both crafts, their owned sub-entities, and the session wrapper live
//! here. Ownership is strictly tree-shaped: the session owns the crafts,
//! crafts own their projectiles/rings, and nothing points back up.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::KinematicBody;
use super::ring::ShockwaveRing;
use crate::consts::*;

/// Play-field geometry, supplied once at session start. All fractional
/// thresholds (edge insets, objective rectangle) derive from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
}

impl FieldConfig {
    /// Larger dimension, used for off-field cutoffs
    pub fn extent(&self) -> f32 {
        self.width.max(self.height)
    }
}

/// Session outcome. A terminal phase is normal state, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimPhase {
    Running,
    /// Enemy fully faded out
    Victory,
    /// Player craft destroyed
    Defeat,
}

/// Per-frame control signal after input mapping
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ControlSignal {
    MoveLeft,
    MoveRight,
    /// Motion-sensor axis, -1..1
    TiltAxis(f32),
    #[default]
    None,
}

/// A fired projectile. Owned by the player craft; no friction, constant
/// upward velocity from the launch impulse.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub body: KinematicBody,
}

impl Projectile {
    pub fn launch(position: Vec2) -> Self {
        let mut body = KinematicBody::new(position, 1.0, 0.0);
        body.apply_force(Vec2::new(0.0, -PROJECTILE_IMPULSE));
        Self { body }
    }

    pub fn update(&mut self) {
        self.body.integrate(PROJECTILE_IMPULSE);
    }

    /// Past the off-field threshold above the top edge
    pub fn expired(&self) -> bool {
        self.body.position.y < -PROJECTILE_OFFSCREEN
    }
}

/// The player-controlled craft
#[derive(Debug, Clone)]
pub struct PlayerCraft {
    pub body: KinematicBody,
    pub diameter: f32,
    pub lives: u8,
    /// Held defensive stance; absorbs damage and disallows firing
    pub hard_invulnerable: bool,
    /// Post-hit invulnerability window countdown (ms); > 0 means active
    invuln_ms: f32,
    pub projectiles: Vec<Projectile>,
}

impl PlayerCraft {
    /// Spawn at the canonical point (horizontal center, 90% height) or at
    /// a carried-over position from a previous session.
    pub fn new(field: &FieldConfig, carry_over: Option<Vec2>) -> Self {
        let spawn = carry_over.unwrap_or_else(|| {
            Vec2::new(field.width * 0.5, field.height * PLAYER_SPAWN_Y_FRAC)
        });
        Self {
            body: KinematicBody::new(spawn, 1.0, PLAYER_FRICTION),
            diameter: field.width * PLAYER_DIAMETER_FRAC,
            lives: PLAYER_LIVES,
            hard_invulnerable: false,
            invuln_ms: 0.0,
            projectiles: Vec::new(),
        }
    }

    /// Invulnerable through either the timed window or the held stance
    pub fn is_invulnerable(&self) -> bool {
        self.invuln_ms > 0.0 || self.hard_invulnerable
    }

    pub fn destroyed(&self) -> bool {
        self.lives == 0
    }

    /// Map one control signal to a horizontal force. Inside the 10%-90%
    /// inset band the signal applies directly; at or beyond a band edge the
    /// signal is dropped and the soft wall takes over: an inward corrective
    /// force plus temporarily raised friction.
    pub fn apply_control_signal(&mut self, signal: ControlSignal, field: &FieldConfig) {
        let x = self.body.position.x;
        let min = field.width * EDGE_INSET_MIN;
        let max = field.width * EDGE_INSET_MAX;

        if x <= min || x >= max {
            let inward = if x <= min { 1.0 } else { -1.0 };
            self.body.apply_force(Vec2::new(inward * SOFT_WALL_FORCE, 0.0));
            let extra = self.body.friction_force(SOFT_WALL_FRICTION);
            self.body.apply_force(extra);
            return;
        }

        let force = match signal {
            ControlSignal::MoveLeft => -CONTROL_FORCE,
            ControlSignal::MoveRight => CONTROL_FORCE,
            ControlSignal::TiltAxis(v) => v.clamp(-1.0, 1.0) * CONTROL_FORCE,
            ControlSignal::None => 0.0,
        };
        if force != 0.0 {
            self.body.apply_force(Vec2::new(force, 0.0));
        }
    }

    /// Append a projectile at the craft's position. No-op while the
    /// defensive stance is held: stance and offense are mutually exclusive.
    pub fn fire(&mut self) {
        if self.hard_invulnerable {
            return;
        }
        self.projectiles.push(Projectile::launch(self.body.position));
        log::debug!("projectile fired from {:?}", self.body.position);
    }

    /// Apply one hit. Absorbed entirely while invulnerable (either kind);
    /// otherwise costs a life and opens the 1000 ms window. A re-hit while
    /// the window is open neither stacks nor extends it. Returns whether
    /// damage was actually applied.
    pub fn take_damage(&mut self) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives > 0 {
            self.invuln_ms = INVULN_MS;
        }
        true
    }

    /// One frame: advance the invulnerability window, apply friction then
    /// the control signal, integrate, then advance owned projectiles and
    /// compact expired ones once.
    pub fn update(&mut self, signal: ControlSignal, field: &FieldConfig, tick_ms: f32) {
        if self.invuln_ms > 0.0 {
            self.invuln_ms = (self.invuln_ms - tick_ms).max(0.0);
        }
        self.body.apply_friction();
        self.apply_control_signal(signal, field);
        self.body.integrate(PLAYER_MAX_SPEED);

        for projectile in &mut self.projectiles {
            projectile.update();
        }
        self.projectiles.retain(|p| !p.expired());
    }
}

/// Enemy behavior cycle. Seeking -> Braking -> EmittingVolley -> Seeking
/// repeats while alive; Dying is entered from any state at zero lives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BehaviorState {
    /// Steering toward the current objective
    Seeking,
    /// Decelerating near the objective
    Braking,
    /// Motion paused, releasing rings on a countdown
    EmittingVolley { remaining: u8, next_ring_ms: f32 },
    /// Fading out; no steering, no rings
    Dying,
}

/// The autonomous enemy craft
#[derive(Debug, Clone)]
pub struct EnemyCraft {
    pub body: KinematicBody,
    pub diameter: f32,
    pub lives: u8,
    /// 0-255; doubles as the death-fade signal
    pub fill_opacity: u8,
    pub objective: Vec2,
    pub behavior: BehaviorState,
    pub rings: Vec<ShockwaveRing>,
}

impl EnemyCraft {
    pub fn new(field: &FieldConfig, rng: &mut Pcg32) -> Self {
        let spawn = Vec2::new(field.width * 0.5, field.height * 0.25);
        Self {
            body: KinematicBody::new(spawn, 1.0, 0.0),
            diameter: field.width * ENEMY_DIAMETER_FRAC,
            lives: ENEMY_LIVES,
            fill_opacity: 255,
            objective: Self::random_objective(field, rng),
            behavior: BehaviorState::Seeking,
            rings: Vec::new(),
        }
    }

    /// Fresh objective inside the 15%-75% x 15%-55% sub-rectangle
    fn random_objective(field: &FieldConfig, rng: &mut Pcg32) -> Vec2 {
        Vec2::new(
            rng.random_range(field.width * OBJECTIVE_X_MIN..field.width * OBJECTIVE_X_MAX),
            rng.random_range(field.height * OBJECTIVE_Y_MIN..field.height * OBJECTIVE_Y_MAX),
        )
    }

    /// One projectile hit. At zero lives the craft stops and starts the
    /// death fade; an in-flight volley is aborted with it.
    pub fn take_damage(&mut self) {
        if self.behavior == BehaviorState::Dying {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        log::info!("enemy hit, {} lives left", self.lives);
        if self.lives == 0 {
            self.body.halt();
            self.behavior = BehaviorState::Dying;
            log::info!("enemy destroyed, fading out");
        }
    }

    fn begin_volley(&mut self, rng: &mut Pcg32) {
        let count = rng.random_range(VOLLEY_MIN..=VOLLEY_MAX);
        log::info!("emitting volley of {count} rings");
        self.behavior = BehaviorState::EmittingVolley {
            remaining: count,
            next_ring_ms: 0.0,
        };
    }

    fn release_ring(&mut self, rng: &mut Pcg32) {
        let stroke = rng.random_range(RING_STROKE_MIN..RING_STROKE_MAX);
        self.rings
            .push(ShockwaveRing::new(self.body.position, self.diameter, stroke));
        log::debug!(
            "ring released at {:?}, stroke {stroke:.2}",
            self.body.position
        );
    }

    /// Advance one frame: behavior state, motion, owned rings. Returns true
    /// once the death fade has completed and the craft should be removed.
    pub fn update(&mut self, field: &FieldConfig, rng: &mut Pcg32, tick_ms: f32) -> bool {
        match self.behavior {
            BehaviorState::Seeking => {
                self.body.apply_friction();
                let dir = (self.objective - self.body.position).normalize_or_zero();
                self.body.apply_force(dir * SEEK_FORCE);
                self.body.integrate(ENEMY_MAX_SPEED);
                if self.body.position.distance(self.objective)
                    < self.diameter * BRAKE_DISTANCE_FRAC
                {
                    self.behavior = BehaviorState::Braking;
                }
            }
            BehaviorState::Braking => {
                let brake = self
                    .body
                    .friction_force(self.body.speed() * BRAKE_FRICTION_FACTOR);
                self.body.apply_force(brake);
                self.body.integrate(ENEMY_MAX_SPEED);
                if self.body.speed() < BRAKE_SPEED_EPSILON {
                    self.body.halt();
                    self.begin_volley(rng);
                }
            }
            BehaviorState::EmittingVolley {
                remaining,
                next_ring_ms,
            } => {
                let mut remaining = remaining;
                let mut next_ms = next_ring_ms - tick_ms;
                while next_ms <= 0.0 && remaining > 0 {
                    self.release_ring(rng);
                    remaining -= 1;
                    if remaining == 0 {
                        break;
                    }
                    // Staccato tail: the last rings follow almost instantly
                    next_ms += if remaining <= 2 {
                        VOLLEY_TAIL_MS
                    } else {
                        rng.random_range(VOLLEY_DELAY_MIN_MS..VOLLEY_DELAY_MAX_MS)
                    };
                }
                if remaining == 0 {
                    self.objective = Self::random_objective(field, rng);
                    log::debug!("volley complete, new objective {:?}", self.objective);
                    self.behavior = BehaviorState::Seeking;
                } else {
                    self.behavior = BehaviorState::EmittingVolley {
                        remaining,
                        next_ring_ms: next_ms,
                    };
                }
            }
            BehaviorState::Dying => {
                self.fill_opacity = self.fill_opacity.saturating_sub(FADE_PER_TICK);
            }
        }

        // Rings keep expanding in every state, including the death fade
        for ring in &mut self.rings {
            ring.grow();
        }
        let extent = field.extent();
        self.rings.retain(|r| !r.expired(extent));

        self.behavior == BehaviorState::Dying && self.fill_opacity == 0
    }
}

/// Complete session state, advanced by [`super::tick::tick`]
#[derive(Debug, Clone)]
pub struct SimState {
    pub field: FieldConfig,
    /// Session seed; all randomness flows through the one RNG below
    pub seed: u64,
    pub rng: Pcg32,
    pub time_ticks: u64,
    /// Accumulated wall-clock time at the fixed tick rate
    pub time_ms: f64,
    pub phase: SimPhase,
    /// Absent once destroyed; callers variant-check before use
    pub player: Option<PlayerCraft>,
    pub enemy: Option<EnemyCraft>,
}

impl SimState {
    pub fn new(field: FieldConfig, seed: u64) -> Self {
        Self::with_carry_over(field, seed, None)
    }

    /// Start a session, optionally placing the player at a carried-over
    /// position instead of the canonical spawn point.
    pub fn with_carry_over(field: FieldConfig, seed: u64, carry_over: Option<Vec2>) -> Self {
        log::info!(
            "session start: field {}x{}, seed {seed:#x}",
            field.width,
            field.height
        );
        let mut rng = Pcg32::seed_from_u64(seed);
        let enemy = EnemyCraft::new(&field, &mut rng);
        Self {
            field,
            seed,
            rng,
            time_ticks: 0,
            time_ms: 0.0,
            phase: SimPhase::Running,
            player: Some(PlayerCraft::new(&field, carry_over)),
            enemy: Some(enemy),
        }
    }

    /// Read-only per-frame view for the rendering collaborator
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            phase: self.phase,
            player: self.player.as_ref().map(|p| PlayerView {
                position: p.body.position,
                diameter: p.diameter,
                lives: p.lives,
                invulnerable: p.is_invulnerable(),
                stance: p.hard_invulnerable,
            }),
            projectiles: self
                .player
                .as_ref()
                .map(|p| p.projectiles.iter().map(|b| b.body.position).collect())
                .unwrap_or_default(),
            enemy: self.enemy.as_ref().map(|e| EnemyView {
                position: e.body.position,
                diameter: e.diameter,
                fill_opacity: e.fill_opacity,
            }),
            rings: self
                .enemy
                .as_ref()
                .map(|e| {
                    e.rings
                        .iter()
                        .map(|r| RingView {
                            center: r.center,
                            outer_diameter: r.outer_diameter,
                            thickness: r.thickness,
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

/// What the renderer gets to see, once per tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub phase: SimPhase,
    pub player: Option<PlayerView>,
    pub projectiles: Vec<Vec2>,
    pub enemy: Option<EnemyView>,
    pub rings: Vec<RingView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub diameter: f32,
    pub lives: u8,
    pub invulnerable: bool,
    pub stance: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub position: Vec2,
    pub diameter: f32,
    pub fill_opacity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingView {
    pub center: Vec2,
    pub outer_diameter: f32,
    pub thickness: f32,
}
