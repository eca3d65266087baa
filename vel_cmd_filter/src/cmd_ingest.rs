//! # Command Ingest
//!
//! Holds the most recently received velocity command. The receive thread writes to it and the
//! publish loop reads from it, the last write always wins.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::trace;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::cmd::VelocityCommand;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Shared slot for the last received command.
///
/// Clones share the same slot. Reads and writes are of the whole record so a reader never sees
/// one axis from one command and the other axis from another.
#[derive(Clone, Default)]
pub struct CmdIngest {
    last_received: Arc<Mutex<VelocityCommand>>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl CmdIngest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a newly received command, replacing the previous one.
    pub fn on_cmd_received(&self, cmd: VelocityCommand) {
        trace!("Heard velocity: {:.6}", cmd.linear_x);
        trace!("Heard rotation: {:.6}", cmd.angular_z);

        *self.lock() = cmd;
    }

    /// Snapshot of the last received command.
    ///
    /// Before any command has been received this is the all zero command.
    pub fn latest(&self) -> VelocityCommand {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, VelocityCommand> {
        // The slot holds plain data, a panic while holding the lock cannot leave it half written
        match self.last_received.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
