//! Fixed timestep simulation tick and control-input plumbing
//!
//! Input devices (keys, touch buttons, motion sensor) are external
//! collaborators. They push [`ControlCommand`]s; the simulation drains them
//! once per tick into a persistent [`ControlState`], which produces the
//! [`TickInput`] consumed by [`tick`]. Fire requests are edge-triggered:
//! consuming the tick input clears them.

use crate::consts::*;

use super::collision;
use super::state::{ControlSignal, SimPhase, SimState};

/// Discrete events emitted by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlCommand {
    MoveLeftStart,
    MoveLeftStop,
    MoveRightStart,
    MoveRightStop,
    Fire,
    StanceStart,
    StanceStop,
    /// Motion-sensor axis, -1..1
    TiltAxis(f32),
}

/// Held-input state accumulated from control commands
#[derive(Debug, Clone, Default)]
pub struct ControlState {
    left_held: bool,
    right_held: bool,
    stance_held: bool,
    tilt: Option<f32>,
    fire_requested: bool,
}

impl ControlState {
    /// Fold one command into the held state
    pub fn push(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::MoveLeftStart => self.left_held = true,
            ControlCommand::MoveLeftStop => self.left_held = false,
            ControlCommand::MoveRightStart => self.right_held = true,
            ControlCommand::MoveRightStop => self.right_held = false,
            ControlCommand::Fire => self.fire_requested = true,
            ControlCommand::StanceStart => self.stance_held = true,
            ControlCommand::StanceStop => self.stance_held = false,
            ControlCommand::TiltAxis(v) => self.tilt = Some(v.clamp(-1.0, 1.0)),
        }
    }

    /// Drain a queue of commands, in arrival order
    pub fn drain(&mut self, commands: impl IntoIterator<Item = ControlCommand>) {
        for command in commands {
            self.push(command);
        }
    }

    /// Current movement signal. Buttons win over the tilt axis; opposing
    /// buttons cancel out.
    pub fn signal(&self) -> ControlSignal {
        match (self.left_held, self.right_held) {
            (true, false) => ControlSignal::MoveLeft,
            (false, true) => ControlSignal::MoveRight,
            (true, true) => ControlSignal::None,
            (false, false) => match self.tilt {
                Some(v) => ControlSignal::TiltAxis(v),
                None => ControlSignal::None,
            },
        }
    }

    /// Produce this tick's input. Consumes the pending fire request
    /// (edge-triggered); held state is left as is.
    pub fn tick_input(&mut self) -> TickInput {
        TickInput {
            signal: self.signal(),
            fire: std::mem::take(&mut self.fire_requested),
            stance: self.stance_held,
        }
    }
}

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub signal: ControlSignal,
    /// One-shot fire request
    pub fire: bool,
    /// Held defensive stance
    pub stance: bool,
}

/// Advance the session by one fixed timestep.
///
/// Order within a tick: player consumes its control signal and integrates,
/// the enemy advances its behavior state and integrates, then collisions
/// are resolved against the post-movement positions. Terminal phases
/// freeze the session.
pub fn tick(state: &mut SimState, input: &TickInput) {
    if state.phase != SimPhase::Running {
        return;
    }

    state.time_ticks += 1;
    state.time_ms += TICK_MS as f64;

    if let Some(player) = state.player.as_mut() {
        player.hard_invulnerable = input.stance;
        if input.fire {
            player.fire();
        }
        player.update(input.signal, &state.field, TICK_MS);
    }

    let mut enemy_gone = false;
    if let Some(enemy) = state.enemy.as_mut() {
        enemy_gone = enemy.update(&state.field, &mut state.rng, TICK_MS);
    }
    if enemy_gone {
        state.enemy = None;
        state.phase = SimPhase::Victory;
        log::info!("enemy fade complete, session won");
    }

    collision::resolve(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BehaviorState, FieldConfig};
    use glam::Vec2;

    const FIELD: FieldConfig = FieldConfig {
        width: 1000.0,
        height: 1000.0,
    };

    #[test]
    fn fire_request_is_edge_triggered() {
        let mut controls = ControlState::default();
        controls.push(ControlCommand::Fire);
        assert!(controls.tick_input().fire);
        // Consumed: the next tick must not fire again
        assert!(!controls.tick_input().fire);
    }

    #[test]
    fn held_buttons_persist_across_ticks() {
        let mut controls = ControlState::default();
        controls.drain([ControlCommand::MoveLeftStart, ControlCommand::StanceStart]);
        let first = controls.tick_input();
        assert_eq!(first.signal, ControlSignal::MoveLeft);
        assert!(first.stance);

        let second = controls.tick_input();
        assert_eq!(second.signal, ControlSignal::MoveLeft);
        assert!(second.stance);

        controls.push(ControlCommand::MoveLeftStop);
        assert_eq!(controls.tick_input().signal, ControlSignal::None);
    }

    #[test]
    fn buttons_override_tilt() {
        let mut controls = ControlState::default();
        controls.push(ControlCommand::TiltAxis(0.5));
        assert_eq!(controls.signal(), ControlSignal::TiltAxis(0.5));

        controls.push(ControlCommand::MoveRightStart);
        assert_eq!(controls.signal(), ControlSignal::MoveRight);

        // Opposing buttons cancel
        controls.push(ControlCommand::MoveLeftStart);
        assert_eq!(controls.signal(), ControlSignal::None);

        // Out-of-range sensor values are clamped
        controls.drain([
            ControlCommand::MoveLeftStop,
            ControlCommand::MoveRightStop,
            ControlCommand::TiltAxis(3.0),
        ]);
        assert_eq!(controls.signal(), ControlSignal::TiltAxis(1.0));
    }

    #[test]
    fn determinism_same_seed_same_stream() {
        let mut a = SimState::new(FIELD, 0xFEED);
        let mut b = SimState::new(FIELD, 0xFEED);
        let mut controls_a = ControlState::default();
        let mut controls_b = ControlState::default();

        for t in 0..600u32 {
            if t % 45 == 0 {
                controls_a.push(ControlCommand::Fire);
                controls_b.push(ControlCommand::Fire);
            }
            if t == 100 {
                controls_a.push(ControlCommand::MoveRightStart);
                controls_b.push(ControlCommand::MoveRightStart);
            }
            tick(&mut a, &controls_a.tick_input());
            tick(&mut b, &controls_b.tick_input());
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn terminal_phase_freezes_the_session() {
        let mut state = SimState::new(FIELD, 3);
        state.phase = SimPhase::Victory;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 0);
    }

    /// End to end: five projectiles into a stationary enemy drive it
    /// through Dying to complete fade-out and a won session.
    #[test]
    fn enemy_falls_to_five_shots_and_fades() {
        let mut state = SimState::new(FIELD, 42);

        // Park the enemy in the player's firing lane: objective reached,
        // speed zero, so it brakes straight into stationary volleys
        {
            let player_x = state.player.as_ref().unwrap().body.position.x;
            let enemy = state.enemy.as_mut().unwrap();
            enemy.body.position = Vec2::new(player_x, 300.0);
            enemy.objective = enemy.body.position;
            // Rings will sweep the player's lane; give the player slack so
            // the session outcome is decided by the enemy's demise
            state.player.as_mut().unwrap().lives = 200;
        }

        let mut controls = ControlState::default();
        let mut fired = 0u8;
        let mut saw_dying = false;
        for t in 0..3_000u32 {
            if fired < 5 && t % 30 == 0 {
                controls.push(ControlCommand::Fire);
                fired += 1;
            }
            // Keep the enemy parked: re-anchoring the objective makes each
            // seek cycle brake on the spot instead of wandering off
            if let Some(enemy) = state.enemy.as_mut() {
                if enemy.behavior == BehaviorState::Seeking {
                    enemy.objective = enemy.body.position;
                }
            }
            tick(&mut state, &controls.tick_input());
            if let Some(enemy) = state.enemy.as_ref() {
                if enemy.behavior == BehaviorState::Dying {
                    saw_dying = true;
                }
            }
            if state.phase == SimPhase::Victory {
                break;
            }
        }

        assert!(saw_dying);
        assert_eq!(state.phase, SimPhase::Victory);
        assert!(state.enemy.is_none());
    }

    /// End to end: a ring sweeping over the player costs exactly one life
    /// and opens the 1000 ms window.
    #[test]
    fn ring_hit_opens_invulnerability_window() {
        use crate::sim::ring::ShockwaveRing;

        let mut state = SimState::new(FIELD, 9);
        let player_pos = state.player.as_ref().unwrap().body.position;
        {
            let enemy = state.enemy.as_mut().unwrap();
            // Park the enemy mid-volley with the next release a minute out,
            // so only the injected ring acts
            enemy.behavior = BehaviorState::EmittingVolley {
                remaining: 1,
                next_ring_ms: 60_000.0,
            };
            // A ring about to sweep the player's position
            enemy
                .rings
                .push(ShockwaveRing::new(player_pos + Vec2::new(120.0, 0.0), 80.0, 2.0));
        }

        let mut hit_tick = None;
        for t in 0..200u32 {
            tick(&mut state, &TickInput::default());
            let player = state.player.as_ref().expect("player survives one sweep");
            if hit_tick.is_none() && player.lives < PLAYER_LIVES {
                hit_tick = Some(t);
                assert!(player.is_invulnerable());
            }
        }

        assert!(hit_tick.is_some(), "ring never reached the player");
        let player = state.player.as_ref().unwrap();
        // The expanding band crosses the craft while invulnerable, so the
        // single sweep costs exactly one life
        assert_eq!(player.lives, PLAYER_LIVES - 1);
        // 200 ticks is well past the 1000 ms window
        assert!(!player.is_invulnerable());
    }
}
