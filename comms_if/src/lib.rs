//! # Communications interface crate.
//!
//! Provides the wire types and networking layer shared by the velocity command filter and its
//! test tools.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Velocity command message definitions and framing
pub mod vel_cmd;

/// Network module
pub mod net;
