//! Pulsewave headless driver
//!
//! Stands in for the real front end: seeds a session, feeds a scripted
//! control stream at the fixed tick rate, and prints the final render
//! snapshot as JSON. Pass a seed as the first argument to vary the run.

use pulsewave::sim::{ControlCommand, ControlState, FieldConfig, SimPhase, SimState, tick};

const DEFAULT_SEED: u64 = 0xC0FFEE;
const SESSION_TICKS: u32 = 60 * 60; // one minute of play

fn main() {
    env_logger::init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            log::warn!("invalid seed {arg:?}, using default");
            DEFAULT_SEED
        }),
        None => DEFAULT_SEED,
    };

    let field = FieldConfig {
        width: 1000.0,
        height: 1000.0,
    };
    let mut state = SimState::new(field, seed);
    let mut controls = ControlState::default();

    // Scripted session: strafe back and forth, firing twice a second
    controls.push(ControlCommand::MoveRightStart);
    for t in 0..SESSION_TICKS {
        if t % 30 == 0 {
            controls.push(ControlCommand::Fire);
        }
        if t % 240 == 120 {
            controls.drain([
                ControlCommand::MoveRightStop,
                ControlCommand::MoveLeftStart,
            ]);
        } else if t % 240 == 0 && t > 0 {
            controls.drain([
                ControlCommand::MoveLeftStop,
                ControlCommand::MoveRightStart,
            ]);
        }

        tick(&mut state, &controls.tick_input());

        if state.phase != SimPhase::Running {
            log::info!("session ended after {} ticks: {:?}", state.time_ticks, state.phase);
            break;
        }
    }

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("snapshot serialization failed: {err}"),
    }
}
