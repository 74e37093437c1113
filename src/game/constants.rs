/// Player physics constants - CRITICAL: FRICTION is an exponential decay
/// factor applied per tick (speed *= 1 - FRICTION), not a velocity subtraction
pub mod player {
    /// Avatar collision/draw radius in display units (fixed, mass-independent)
    pub const RADIUS: f32 = 48.0;
    /// Player mass (uniform for now; collisions support heterogeneous masses)
    pub const MASS: f32 = 1.0;
    /// Friction coefficient in [0, 1), applied once per tick
    pub const FRICTION: f32 = 0.1;
    /// Drive impulse per unit of stick deflection
    pub const ACCELERATION: f32 = 1.0;
}

/// Collision resolution constants
pub mod collision {
    /// Overlap tolerance in units: contact only counts when circles overlap by
    /// more than this, which prevents jitter at exact tangency
    pub const TOUCH_TOLERANCE: f32 = 1.0;
}

/// Dash skill tuning
pub mod dash {
    /// Cooldown in milliseconds
    pub const COOLDOWN_MS: f32 = 100.0;
    /// Impulse magnitude applied along the facing angle on trigger
    pub const IMPULSE: f32 = 3.0;
    /// Maximum stored charges
    pub const MAX_CHARGES: u32 = 1;
    /// Controller button that triggers the dash
    pub const BIND: &str = "down";
}

/// Frame loop constants
pub mod frame {
    /// Default display refresh rate in Hz
    pub const RATE: u32 = 60;
    /// Frame duration in milliseconds at the default rate
    pub const DURATION_MS: u64 = 1000 / RATE as u64;
}
