/// Display host configuration
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Arena width in pixels (matches the shared display surface)
    pub width: f32,
    /// Arena height in pixels
    pub height: f32,
    /// Target simulation and render rate in frames per second
    pub frame_rate: u32,
    /// Bound of the inbound event buffer
    pub event_buffer_capacity: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            frame_rate: crate::game::constants::frame::RATE,
            event_buffer_capacity: 1024,
        }
    }
}

impl DisplayConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        let mut config = Self::default();

        if let Ok(width) = std::env::var("DISPLAY_WIDTH") {
            if let Ok(parsed) = width.parse::<f32>() {
                if parsed > 0.0 {
                    config.width = parsed;
                } else {
                    tracing::warn!("DISPLAY_WIDTH must be > 0, using default");
                }
            } else {
                tracing::warn!("Invalid DISPLAY_WIDTH '{}', using default", width);
            }
        }

        if let Ok(height) = std::env::var("DISPLAY_HEIGHT") {
            if let Ok(parsed) = height.parse::<f32>() {
                if parsed > 0.0 {
                    config.height = parsed;
                } else {
                    tracing::warn!("DISPLAY_HEIGHT must be > 0, using default");
                }
            } else {
                tracing::warn!("Invalid DISPLAY_HEIGHT '{}', using default", height);
            }
        }

        if let Ok(rate) = std::env::var("FRAME_RATE") {
            if let Ok(parsed) = rate.parse::<u32>() {
                if parsed > 0 && parsed <= 240 {
                    config.frame_rate = parsed;
                } else {
                    tracing::warn!("FRAME_RATE must be 1-240, using default");
                }
            } else {
                tracing::warn!("Invalid FRAME_RATE '{}', using default", rate);
            }
        }

        if let Ok(capacity) = std::env::var("EVENT_BUFFER_CAPACITY") {
            if let Ok(parsed) = capacity.parse::<usize>() {
                if parsed > 0 {
                    config.event_buffer_capacity = parsed;
                } else {
                    tracing::warn!("EVENT_BUFFER_CAPACITY must be > 0, using default");
                }
            } else {
                tracing::warn!("Invalid EVENT_BUFFER_CAPACITY '{}', using default", capacity);
            }
        }

        config
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), String> {
        let diameter = crate::game::constants::player::RADIUS * 2.0;
        if self.width <= diameter {
            return Err(format!("width must exceed one avatar diameter ({diameter})"));
        }
        if self.height <= diameter {
            return Err(format!("height must exceed one avatar diameter ({diameter})"));
        }
        if self.frame_rate == 0 {
            return Err("frame_rate cannot be 0".to_string());
        }
        if self.event_buffer_capacity == 0 {
            return Err("event_buffer_capacity must be at least 1".to_string());
        }
        Ok(())
    }

    /// Nominal frame duration at the configured rate
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(1000 / self.frame_rate as u64)
    }
}
