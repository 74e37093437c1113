//! Player entity: kinematics, impulses, and elastic collision response
//!
//! Velocity is stored in polar form (speed scalar + heading angle) and every
//! motion change except the elastic solver routes through `apply_impulse`.
//! The facing angle is decoupled from the heading: it tracks the last nonzero
//! stick direction and aims skill effects.

use smallvec::SmallVec;
use thiserror::Error;

use crate::game::constants::{collision, player as tuning};
use crate::game::controller::ControllerState;
use crate::game::skill::Skill;
use crate::util::vec2::Vec2;

/// Opaque player identifier handed in by the transport (socket id)
pub type PlayerId = String;

/// Entity construction errors. Physics invariant violations are rejected here
/// rather than guarded per tick.
#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("player mass must be positive, got {0}")]
    NonPositiveMass(f32),
    #[error("friction must be in [0, 1), got {0}")]
    FrictionOutOfRange(f32),
}

/// One circular avatar in the arena
#[derive(Debug, Clone)]
pub struct Player {
    // Kinematic state, touched every tick
    pub position: Vec2,
    /// Speed scalar (display units per frame)
    pub speed: f32,
    /// Direction of travel in radians
    pub heading: f32,
    /// Last nonzero stick direction; aims skill impulses
    pub facing: f32,

    // Physical constants, fixed at spawn
    pub mass: f32,
    pub radius: f32,
    pub friction: f32,
    pub acceleration: f32,

    /// Registry indices of partners already resolved this tick. Cleared at
    /// the start of every tick so each overlapping pair resolves exactly once.
    resolved: SmallVec<[usize; 8]>,

    /// Input snapshot owned 1:1 by this player
    pub controller: ControllerState,
    skills: Vec<Skill>,

    /// Palette slot chosen at spawn
    pub color_index: u8,
    pub id: PlayerId,
}

impl Player {
    /// Spawn a player with the standard tuning at `position`
    pub fn new(id: PlayerId, position: Vec2, color_index: u8) -> Self {
        // Standard tuning is statically valid, so this cannot fail
        Self::with_mass(id, position, color_index, tuning::MASS)
            .unwrap_or_else(|_| unreachable!("standard tuning is valid"))
    }

    /// Spawn with an explicit mass. Rejects non-positive mass up front since
    /// the impulse and collision math divide by it unguarded.
    pub fn with_mass(
        id: PlayerId,
        position: Vec2,
        color_index: u8,
        mass: f32,
    ) -> Result<Self, GameError> {
        if !(mass > 0.0) {
            return Err(GameError::NonPositiveMass(mass));
        }
        if !(0.0..1.0).contains(&tuning::FRICTION) {
            return Err(GameError::FrictionOutOfRange(tuning::FRICTION));
        }
        Ok(Self {
            position,
            speed: 0.0,
            heading: 0.0,
            facing: 0.0,
            mass,
            radius: tuning::RADIUS,
            friction: tuning::FRICTION,
            acceleration: tuning::ACCELERATION,
            resolved: SmallVec::new(),
            controller: ControllerState::new(),
            skills: vec![Skill::dash()],
            color_index,
            id,
        })
    }

    /// Clear per-tick transient state; called once at the start of every tick
    pub fn begin_tick(&mut self) {
        self.resolved.clear();
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Cartesian velocity derived from the polar state
    pub fn velocity(&self) -> Vec2 {
        Vec2::from_angle(self.heading) * self.speed
    }

    /// Assign velocity directly, reconverting to polar via atan2/hypot
    pub fn set_velocity(&mut self, v: Vec2) {
        self.heading = v.y.atan2(v.x);
        self.speed = v.length();
    }

    /// The single motion-change primitive: add an impulse of `magnitude`
    /// along `angle`, scaled by 1/mass
    pub fn apply_impulse(&mut self, magnitude: f32, angle: f32) {
        let v = self.velocity() + Vec2::from_angle(angle) * (magnitude / self.mass);
        self.set_velocity(v);
    }

    /// Per-tick update stages 1-4: damping, integration, stick drive, skills.
    /// Collision resolution and boundary clamping run in the world loop.
    /// `dt_ms` feeds skill cooldowns only; kinematics advance per frame.
    pub fn integrate(&mut self, dt_ms: f32) {
        // 1. damping
        self.speed *= 1.0 - self.friction;

        // 2. semi-implicit Euler: velocity from start of tick moves the body
        self.position += Vec2::from_angle(self.heading) * self.speed;

        // 3. stick drive; facing persists through idle ticks
        let magnitude = self.controller.stick_magnitude();
        let angle = self.controller.stick_angle();
        self.apply_impulse(self.acceleration * magnitude, angle);
        if magnitude > 0.0 {
            self.facing = angle;
        }

        // 4. skills, in insertion order
        for i in 0..self.skills.len() {
            self.skills[i].update_cooldown(dt_ms);
            let level = self.controller.button(self.skills[i].bind());
            if self.skills[i].can_trigger(level) {
                let impulse = self.skills[i].trigger();
                let facing = self.facing;
                self.apply_impulse(impulse, facing);
            }
        }
    }

    /// Whether two avatars overlap enough to count as a collision. The
    /// tolerance keeps exactly-tangent circles from jittering.
    pub fn touches(&self, other: &Player) -> bool {
        let dist = self.position.distance_to(other.position);
        dist < self.radius + other.radius - collision::TOUCH_TOLERANCE
    }

    pub fn already_resolved(&self, partner: usize) -> bool {
        self.resolved.contains(&partner)
    }

    pub fn mark_resolved(&mut self, partner: usize) {
        self.resolved.push(partner);
    }

    /// Elastic collision along the line of centers, plus positional overlap
    /// correction. Both velocities are assigned directly, bypassing
    /// `apply_impulse`.
    pub fn collide(&mut self, other: &mut Player) {
        let delta = other.position - self.position;
        let phi = delta.angle();
        let dist = delta.length();

        let (m1, m2) = (self.mass, other.mass);

        // Decompose each velocity into along-phi and perpendicular components
        let along1 = self.speed * (self.heading - phi).cos();
        let along2 = other.speed * (other.heading - phi).cos();
        let perp1 = self.speed * (self.heading - phi).sin();
        let perp2 = other.speed * (other.heading - phi).sin();

        // 1D elastic collision on the along-phi components; perpendicular
        // components carry over unchanged
        let post1 = (along1 * (m1 - m2) + 2.0 * m2 * along2) / (m1 + m2);
        let post2 = (along2 * (m2 - m1) + 2.0 * m1 * along1) / (m1 + m2);

        let (sin_phi, cos_phi) = phi.sin_cos();
        self.set_velocity(Vec2::new(
            post1 * cos_phi - perp1 * sin_phi,
            post1 * sin_phi + perp1 * cos_phi,
        ));
        other.set_velocity(Vec2::new(
            post2 * cos_phi - perp2 * sin_phi,
            post2 * sin_phi + perp2 * cos_phi,
        ));

        // Push both circles apart by the penetration depth, unconditionally;
        // even separating pairs get corrected to avoid embedding
        let cr = self.radius + other.radius - dist;
        let axis = Vec2::from_angle(phi);
        self.position -= axis * cr;
        other.position += axis * cr;
    }

    /// Hard-clamp the center into the display bounds. Velocity is untouched;
    /// this is containment, not a bounce.
    pub fn clamp_to_bounds(&mut self, width: f32, height: f32) {
        self.position.x = self.position.x.clamp(self.radius, width - self.radius);
        self.position.y = self.position.y.clamp(self.radius, height - self.radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::constants::dash;
    use std::f32::consts::PI;

    const EPSILON: f32 = 1e-3;

    fn player_at(x: f32, y: f32) -> Player {
        Player::new("p".to_string(), Vec2::new(x, y), 0)
    }

    fn kinetic_energy(p: &Player) -> f32 {
        0.5 * p.mass * p.speed * p.speed
    }

    #[test]
    fn test_rejects_non_positive_mass() {
        let err = Player::with_mass("p".into(), Vec2::ZERO, 0, 0.0).unwrap_err();
        assert_eq!(err, GameError::NonPositiveMass(0.0));
        assert!(Player::with_mass("p".into(), Vec2::ZERO, 0, -1.0).is_err());
        assert!(Player::with_mass("p".into(), Vec2::ZERO, 0, f32::NAN).is_err());
    }

    #[test]
    fn test_apply_impulse_from_rest() {
        let mut p = player_at(0.0, 0.0);
        p.apply_impulse(2.0, PI / 2.0);
        assert!((p.speed - 2.0).abs() < EPSILON);
        assert!((p.heading - PI / 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_apply_impulse_divides_by_mass() {
        let mut heavy = Player::with_mass("p".into(), Vec2::ZERO, 0, 4.0).unwrap();
        heavy.apply_impulse(2.0, 0.0);
        assert!((heavy.speed - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_apply_impulse_adds_vectorially() {
        let mut p = player_at(0.0, 0.0);
        p.apply_impulse(1.0, 0.0);
        p.apply_impulse(1.0, PI / 2.0);
        // Two unit impulses at right angles: speed sqrt(2), heading 45 deg
        assert!((p.speed - 2.0_f32.sqrt()).abs() < EPSILON);
        assert!((p.heading - PI / 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_friction_decay_matches_closed_form() {
        let mut p = player_at(500.0, 500.0);
        let v0 = 10.0;
        p.speed = v0;
        let n = 100;
        for _ in 0..n {
            p.integrate(16.0);
        }
        let expected = v0 * (1.0 - p.friction).powi(n);
        assert!(
            (p.speed - expected).abs() < 1e-4,
            "speed {} vs expected {}",
            p.speed,
            expected
        );
    }

    #[test]
    fn test_facing_persists_through_idle() {
        let mut p = player_at(100.0, 100.0);
        p.controller.set_stick(1.2, 0.8);
        p.integrate(16.0);
        assert_eq!(p.facing, 1.2);

        // Idle stick: facing must not reset
        p.controller.set_stick(0.0, 0.0);
        p.integrate(16.0);
        assert_eq!(p.facing, 1.2);
    }

    #[test]
    fn test_dash_applies_impulse_along_facing() {
        let mut p = player_at(500.0, 500.0);
        p.controller.set_stick(PI / 2.0, 1.0);
        p.integrate(16.0);
        p.controller.set_stick(0.0, 0.0);

        // Let the dash charge, then press its bind
        p.integrate(dash::COOLDOWN_MS + 1.0);
        p.controller.set_button(dash::BIND, 1.0);
        let speed_before = p.speed;
        p.integrate(16.0);
        assert!(p.speed > speed_before);
        assert_eq!(p.skills()[0].charges(), 0);
    }

    #[test]
    fn test_dash_not_fired_without_charge() {
        let mut p = player_at(500.0, 500.0);
        // Button held from the start, but the dash begins uncharged: the very
        // first cooldown step grants the charge, so the earliest trigger
        // happens on the first tick and the second tick must not fire again
        p.controller.set_button(dash::BIND, 1.0);
        p.integrate(16.0);
        assert_eq!(p.skills()[0].charges(), 0);
        let speed_after_first = p.speed;
        p.integrate(16.0);
        // Speed only decays (no new dash within the cooldown window)
        assert!(p.speed <= speed_after_first);
    }

    #[test]
    fn test_clamp_preserves_velocity() {
        let mut p = player_at(5.0, 2000.0);
        p.speed = 7.0;
        p.heading = 1.0;
        p.clamp_to_bounds(1280.0, 720.0);
        assert_eq!(p.position.x, p.radius);
        assert_eq!(p.position.y, 720.0 - p.radius);
        assert_eq!(p.speed, 7.0);
        assert_eq!(p.heading, 1.0);
    }

    #[test]
    fn test_equal_mass_head_on_swaps_velocities() {
        // Two r=48 players 50 units apart, closing at speed 2 each
        let mut a = player_at(0.0, 0.0);
        let mut b = player_at(50.0, 0.0);
        a.speed = 2.0;
        a.heading = 0.0;
        b.speed = 2.0;
        b.heading = PI;

        a.collide(&mut b);

        // Along-line velocities swap for equal masses
        assert!(a.velocity().approx_eq(Vec2::new(-2.0, 0.0), EPSILON));
        assert!(b.velocity().approx_eq(Vec2::new(2.0, 0.0), EPSILON));

        // Overlap correction separates them past touching
        let dist = a.position.distance_to(b.position);
        assert!(dist >= a.radius + b.radius, "distance after correction: {dist}");
    }

    #[test]
    fn test_collision_conserves_momentum_and_energy() {
        let mut a = Player::with_mass("a".into(), Vec2::new(0.0, 0.0), 0, 1.0).unwrap();
        let mut b = Player::with_mass("b".into(), Vec2::new(60.0, 30.0), 1, 3.0).unwrap();
        a.set_velocity(Vec2::new(3.0, 1.0));
        b.set_velocity(Vec2::new(-1.5, 0.5));

        let phi_axis = (b.position - a.position).normalize();
        let perp_axis = Vec2::new(-phi_axis.y, phi_axis.x);

        let p_along_before =
            a.mass * a.velocity().dot(phi_axis) + b.mass * b.velocity().dot(phi_axis);
        let perp_a_before = a.velocity().dot(perp_axis);
        let perp_b_before = b.velocity().dot(perp_axis);
        let energy_before = kinetic_energy(&a) + kinetic_energy(&b);

        a.collide(&mut b);

        let p_along_after =
            a.mass * a.velocity().dot(phi_axis) + b.mass * b.velocity().dot(phi_axis);
        let energy_after = kinetic_energy(&a) + kinetic_energy(&b);

        assert!(
            (p_along_before - p_along_after).abs() < EPSILON,
            "momentum along line of centers: {p_along_before} vs {p_along_after}"
        );
        // Perpendicular components individually unchanged
        assert!((a.velocity().dot(perp_axis) - perp_a_before).abs() < EPSILON);
        assert!((b.velocity().dot(perp_axis) - perp_b_before).abs() < EPSILON);
        assert!(
            (energy_before - energy_after).abs() < EPSILON,
            "kinetic energy: {energy_before} vs {energy_after}"
        );
    }

    #[test]
    fn test_touches_tolerance() {
        let a = player_at(0.0, 0.0);
        let mut b = player_at(95.5, 0.0);
        // 95.5 > 96 - 1, so tangent-ish contact is ignored
        assert!(!a.touches(&b));
        b.position.x = 94.0;
        assert!(a.touches(&b));
    }

    #[test]
    fn test_begin_tick_clears_resolved() {
        let mut p = player_at(0.0, 0.0);
        p.mark_resolved(3);
        assert!(p.already_resolved(3));
        p.begin_tick();
        assert!(!p.already_resolved(3));
    }
}
