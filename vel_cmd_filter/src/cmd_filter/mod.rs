//! Command filter module
//!
//! Clamps the latest velocity command to the rover's safety limits before it is sent to the
//! actuators.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

// These are just here for safety and do not reflect the actual limits of the platform.

/// Maximum absolute forward velocity that will be commanded.
///
/// Units: meters/second
pub const MAX_VELOCITY_CMD_MS: f64 = 3.0;

/// Maximum absolute turn rate that will be commanded.
///
/// Units: radians/second
pub const MAX_TURN_RATE_CMD_RADS: f64 = 1.0;

/// Forward velocity used when no command is present.
///
/// Units: meters/second
pub const DEFAULT_VELOCITY_CMD_MS: f64 = 0.0;

/// Turn rate used when no command is present.
///
/// Units: radians/second
pub const DEFAULT_TURN_RATE_CMD_RADS: f64 = 0.0;
