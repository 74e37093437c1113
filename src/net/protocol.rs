//! Wire format for inbound controller events
//!
//! The relay delivers JSON payloads per connected phone. Decoding failures
//! surface as `EventError` so the caller can drop the event without touching
//! the simulation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::player::PlayerId;

/// Structured input event addressed to one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// A phone connected; creates the player on first sight
    Join { id: PlayerId },
    /// Analog stick sample: angle in radians, magnitude nominally in [0, 1]
    /// (passed through unclamped)
    Stick {
        id: PlayerId,
        angle: f32,
        magnitude: f32,
    },
    /// Named button level change
    Button {
        id: PlayerId,
        button: String,
        status: f32,
    },
}

impl InputEvent {
    /// Player this event is addressed to
    pub fn player_id(&self) -> &str {
        match self {
            InputEvent::Join { id } => id,
            InputEvent::Stick { id, .. } => id,
            InputEvent::Button { id, .. } => id,
        }
    }

    /// Decode one JSON payload
    pub fn from_json(payload: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn to_json(&self) -> Result<String, EventError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Event decode errors
#[derive(Debug, Error)]
pub enum EventError {
    #[error("malformed event payload: {0}")]
    Malformed(#[from] serde_json::Error),
}
