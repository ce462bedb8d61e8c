//! Kinematic body: force accumulation and Euler integration
//!
//! Every moving entity owns one of these. Forces accumulate as acceleration
//! within a single frame and are cleared by `integrate`, so they never
//! carry over to the next one.

use glam::Vec2;

/// Position/velocity/acceleration/mass aggregate with force-accumulation
/// semantics. Integration uses a unit timestep (one frame).
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// Mass (> 0); applied forces are divided by this
    pub mass: f32,
    /// Friction coefficient (>= 0)
    pub friction: f32,
}

impl KinematicBody {
    pub fn new(position: Vec2, mass: f32, friction: f32) -> Self {
        debug_assert!(mass > 0.0);
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            mass,
            friction,
        }
    }

    /// Accumulate a force for this frame
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force / self.mass;
    }

    /// Friction force opposite to the current velocity, scaled by the given
    /// coefficient. A motionless body gets a zero force (`normalize_or_zero`
    /// keeps the degenerate case safe).
    pub fn friction_force(&self, coefficient: f32) -> Vec2 {
        -self.velocity.normalize_or_zero() * coefficient
    }

    /// Apply the body's own friction for this frame. Must run before control
    /// forces so they can override it.
    pub fn apply_friction(&mut self) {
        let f = self.friction_force(self.friction);
        self.apply_force(f);
    }

    /// One Euler step: fold acceleration into velocity, velocity into
    /// position, clear the accumulator, then clamp speed to `max_speed`.
    pub fn integrate(&mut self, max_speed: f32) {
        self.velocity += self.acceleration;
        self.position += self.velocity;
        self.acceleration = Vec2::ZERO;
        self.velocity = self.velocity.clamp_length_max(max_speed);
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Hard stop: zero out velocity and any pending acceleration
    pub fn halt(&mut self) {
        self.velocity = Vec2::ZERO;
        self.acceleration = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn force_divided_by_mass() {
        let mut body = KinematicBody::new(Vec2::ZERO, 2.0, 0.0);
        body.apply_force(Vec2::new(4.0, -6.0));
        body.integrate(100.0);
        assert_eq!(body.velocity, Vec2::new(2.0, -3.0));
        assert_eq!(body.position, Vec2::new(2.0, -3.0));
    }

    #[test]
    fn acceleration_cleared_each_step() {
        let mut body = KinematicBody::new(Vec2::ZERO, 1.0, 0.0);
        body.apply_force(Vec2::new(3.0, 0.0));
        body.integrate(100.0);
        assert_eq!(body.acceleration, Vec2::ZERO);

        // No new force: velocity must stay constant, not double
        body.integrate(100.0);
        assert_eq!(body.velocity, Vec2::new(3.0, 0.0));
        assert_eq!(body.position, Vec2::new(6.0, 0.0));
    }

    #[test]
    fn zero_velocity_gives_zero_friction() {
        let body = KinematicBody::new(Vec2::ZERO, 1.0, 5.0);
        assert_eq!(body.friction_force(5.0), Vec2::ZERO);
    }

    #[test]
    fn friction_opposes_motion() {
        let mut body = KinematicBody::new(Vec2::ZERO, 1.0, 0.5);
        body.apply_force(Vec2::new(4.0, 0.0));
        body.integrate(100.0);
        body.apply_friction();
        body.integrate(100.0);
        assert!((body.velocity.x - 3.5).abs() < 1e-5);
    }

    #[test]
    fn speed_clamped_to_cap() {
        let mut body = KinematicBody::new(Vec2::ZERO, 1.0, 0.0);
        for _ in 0..50 {
            body.apply_force(Vec2::new(7.0, 7.0));
            body.integrate(10.0);
        }
        assert!(body.speed() <= 10.0 + 1e-4);
    }

    proptest! {
        #[test]
        fn cap_holds_for_any_force_sequence(
            forces in prop::collection::vec((-100.0f32..100.0, -100.0f32..100.0), 1..64)
        ) {
            let mut body = KinematicBody::new(Vec2::ZERO, 1.0, 0.0);
            for (fx, fy) in forces {
                body.apply_force(Vec2::new(fx, fy));
                body.integrate(10.0);
                prop_assert!(body.speed() <= 10.0 + 1e-3);
            }
        }

        #[test]
        fn single_force_changes_velocity_by_f_over_m(
            fx in -4.0f32..4.0,
            fy in -4.0f32..4.0,
            mass in 0.5f32..8.0,
        ) {
            let mut body = KinematicBody::new(Vec2::ZERO, mass, 0.0);
            body.apply_force(Vec2::new(fx, fy));
            body.integrate(100.0);
            prop_assert!((body.velocity - Vec2::new(fx, fy) / mass).length() < 1e-5);
        }
    }
}
