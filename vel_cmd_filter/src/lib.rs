//! # Velocity command filter library
//!
//! Relays velocity commands from an upstream source to the actuator interface, saturating the
//! forward velocity and turn rate to fixed safety limits on the way.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// Velocity command type
pub mod cmd;

/// Latest received command, shared between the receive thread and the publish loop
pub mod cmd_ingest;

/// Command filter module
pub mod cmd_filter;

/// Subscriber for upstream commands
pub mod cmd_sub;

/// Publisher for actuator commands
pub mod cmd_pub;

/// Executable parameters
pub mod params;

/// One publish cycle of the relay
pub mod relay;

/// Relay statistics
pub mod stats;
