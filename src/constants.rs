//! Engine constants - single source of truth.
//!
//! Tuning values live here and nowhere else; modules pull them in through
//! their group path (`constants::collision::CONTACT_EPSILON`).

/// Collision sweep constants
pub mod collision {
    /// Gaps smaller than this count as contact. Keeps floating point noise
    /// from jittering a box that rests flush against a surface.
    pub const CONTACT_EPSILON: f64 = 1.0e-7;

    /// Default ledge height a grounded mover climbs in one motion
    pub const DEFAULT_STEP_HEIGHT: f64 = 0.6;
}

/// Push resolution constants
pub mod push {
    /// Default cap on how many cells one push may relocate
    pub const DEFAULT_PUSH_LIMIT: usize = 12;
}

/// Bit flags for grid writes
pub mod notify {
    /// No observers are told about the write
    pub const SILENT: u8 = 0;
    /// Neighboring cells observe the change
    pub const UPDATE_NEIGHBORS: u8 = 1 << 0;
    /// The change is forwarded to connected clients
    pub const SEND_TO_CLIENTS: u8 = 1 << 1;
}
