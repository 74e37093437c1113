//! Skill/ability subsystem
//!
//! Each skill is a cooldown- and charge-gated effect bound to a controller
//! button. The state machine is driven by `update_cooldown` every tick:
//! a full cooldown cycle regenerates exactly one charge (no catch-up when a
//! large `dt` spans several cycles), capped at `max_charges`. Triggering
//! consumes a charge, resets the cooldown and yields an impulse the owner
//! applies along its facing angle.

use crate::game::constants::dash;

/// Skill kinds. New abilities extend this enum rather than carrying ad hoc
/// closures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillKind {
    /// Burst of speed along the facing angle
    Dash,
}

/// Cooldown/charge state for one skill instance
#[derive(Debug, Clone)]
pub struct Skill {
    kind: SkillKind,
    /// Remaining cooldown in milliseconds (counts down, may go negative)
    cooldown: f32,
    max_cooldown: f32,
    charges: u32,
    max_charges: u32,
    /// One-shot impulse magnitude applied on trigger
    impulse: f32,
    /// Controller button that fires this skill
    bind: &'static str,
}

impl Skill {
    /// Reference dash skill: starts uncharged, ready after one cooldown cycle
    pub fn dash() -> Self {
        Self {
            kind: SkillKind::Dash,
            cooldown: 0.0,
            max_cooldown: dash::COOLDOWN_MS,
            charges: 0,
            max_charges: dash::MAX_CHARGES,
            impulse: dash::IMPULSE,
            bind: dash::BIND,
        }
    }

    pub fn kind(&self) -> SkillKind {
        self.kind
    }

    pub fn bind(&self) -> &str {
        self.bind
    }

    pub fn charges(&self) -> u32 {
        self.charges
    }

    pub fn max_charges(&self) -> u32 {
        self.max_charges
    }

    /// Advance the cooldown by `dt_ms`. When the cycle completes and a charge
    /// slot is free, grant one charge and restart the cycle. At most one
    /// charge is granted per call regardless of how large `dt_ms` is.
    pub fn update_cooldown(&mut self, dt_ms: f32) {
        self.cooldown -= dt_ms;
        if self.charges < self.max_charges && self.cooldown < 0.0 {
            self.cooldown = self.max_cooldown;
            self.charges += 1;
        }
    }

    /// Whether the bound input level fires this skill right now
    pub fn can_trigger(&self, input: f32) -> bool {
        input == crate::game::controller::PRESSED && self.charges > 0
    }

    /// Consume a charge, reset the cooldown, and return the impulse magnitude
    /// to apply to the owner. Callers must check `can_trigger` first.
    pub fn trigger(&mut self) -> f32 {
        debug_assert!(self.charges > 0);
        self.charges = self.charges.saturating_sub(1);
        self.cooldown = self.max_cooldown;
        self.impulse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_starts_uncharged() {
        let skill = Skill::dash();
        assert_eq!(skill.charges(), 0);
        assert!(!skill.can_trigger(1.0));
    }

    #[test]
    fn test_charge_regenerates_after_cooldown() {
        let mut skill = Skill::dash();
        skill.update_cooldown(dash::COOLDOWN_MS + 1.0);
        assert_eq!(skill.charges(), 1);
    }

    #[test]
    fn test_charges_capped_at_max() {
        let mut skill = Skill::dash();
        for _ in 0..50 {
            skill.update_cooldown(dash::COOLDOWN_MS + 1.0);
            assert!(skill.charges() <= skill.max_charges());
        }
        assert_eq!(skill.charges(), skill.max_charges());
    }

    #[test]
    fn test_no_catchup_on_large_dt() {
        // A frame spike spanning many cooldown cycles still grants one charge
        let mut skill = Skill::dash();
        skill.update_cooldown(dash::COOLDOWN_MS * 100.0);
        assert_eq!(skill.charges(), 1);
    }

    #[test]
    fn test_trigger_requires_exact_press_level() {
        let mut skill = Skill::dash();
        skill.update_cooldown(dash::COOLDOWN_MS + 1.0);
        assert!(skill.can_trigger(1.0));
        assert!(!skill.can_trigger(0.0));
        assert!(!skill.can_trigger(0.5));
    }

    #[test]
    fn test_trigger_consumes_charge_and_resets_cooldown() {
        let mut skill = Skill::dash();
        skill.update_cooldown(dash::COOLDOWN_MS + 1.0);
        assert_eq!(skill.charges(), 1);

        let impulse = skill.trigger();
        assert_eq!(impulse, dash::IMPULSE);
        assert_eq!(skill.charges(), 0);
        assert!(!skill.can_trigger(1.0));

        // Not ready again until a full cooldown elapses
        skill.update_cooldown(dash::COOLDOWN_MS * 0.5);
        assert_eq!(skill.charges(), 0);
        skill.update_cooldown(dash::COOLDOWN_MS);
        assert_eq!(skill.charges(), 1);
    }

    #[test]
    fn test_charge_monotonicity() {
        // Charges only decrease via trigger, only increase via regen, and
        // never exceed max
        let mut skill = Skill::dash();
        let mut prev = skill.charges();
        for step in 0..200 {
            skill.update_cooldown(16.0);
            let now = skill.charges();
            assert!(now <= skill.max_charges());
            assert!(now >= prev, "charge dropped without trigger at step {step}");
            prev = now;
            if skill.can_trigger(1.0) && step % 17 == 0 {
                skill.trigger();
                prev = skill.charges();
            }
        }
    }
}
