//! Per-player controller state
//!
//! Holds the latest input snapshot for one player: a continuous stick channel
//! (polar, with derived Cartesian components) and a map of named button
//! levels. Mutated only by inbound events routed to the owning player; the
//! simulation reads it once per tick.

use hashbrown::HashMap;

use crate::util::vec2::Vec2;

/// Button level that counts as "pressed" for skill triggers
pub const PRESSED: f32 = 1.0;

/// Input snapshot for one player's phone controller
#[derive(Debug, Clone, Default)]
pub struct ControllerState {
    stick_magnitude: f32,
    stick_angle: f32,
    /// Cartesian stick components, derived on every stick update
    stick: Vec2,
    /// Named button levels; unknown names are accepted as-is
    buttons: HashMap<String, f32>,
}

impl ControllerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a stick sample. Magnitude is passed through unclamped: the
    /// transport promises [0, 1] but the sim tolerates anything.
    pub fn set_stick(&mut self, angle: f32, magnitude: f32) {
        self.stick_angle = angle;
        self.stick_magnitude = magnitude;
        self.stick = Vec2::from_angle(angle) * magnitude;
    }

    /// Store a button level verbatim under `name`
    pub fn set_button(&mut self, name: &str, status: f32) {
        self.buttons.insert(name.to_string(), status);
    }

    #[inline]
    pub fn stick_magnitude(&self) -> f32 {
        self.stick_magnitude
    }

    #[inline]
    pub fn stick_angle(&self) -> f32 {
        self.stick_angle
    }

    /// Cartesian stick vector (magnitude * direction)
    #[inline]
    pub fn stick(&self) -> Vec2 {
        self.stick
    }

    /// Current level of a named button; 0.0 if never set
    pub fn button(&self, name: &str) -> f32 {
        self.buttons.get(name).copied().unwrap_or(0.0)
    }

    /// Whether a named button reads exactly the pressed level this tick
    pub fn is_pressed(&self, name: &str) -> bool {
        self.button(name) == PRESSED
    }
}
