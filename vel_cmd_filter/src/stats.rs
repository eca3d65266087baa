//! Relay statistics
//!
//! Counters kept by the main loop, logged and saved to the session on exit.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use crate::{cmd_filter::StatusReport, cmd_pub::PublishOutcome};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Running totals of relay activity, saved as `relay_stats.json` at shutdown.
#[derive(Debug, Default, Clone, Serialize, PartialEq)]
pub struct RelayStats {
    /// Number of publish cycles run
    pub num_cycles: u64,

    /// Commands sent to the actuator interface
    pub num_sent: u64,

    /// All zero commands which were not sent
    pub num_suppressed: u64,

    /// Commands which could not be sent
    pub num_publish_errors: u64,

    /// Cycles on which the forward velocity was saturated
    pub num_linear_x_limited: u64,

    /// Cycles on which the turn rate was saturated
    pub num_angular_z_limited: u64,

    /// Cycles which took longer than the cycle period
    pub num_cycle_overruns: u64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RelayStats {
    /// Record the result of one publish cycle.
    pub fn record_cycle<E>(&mut self, report: &StatusReport, outcome: &Result<PublishOutcome, E>) {
        self.num_cycles += 1;

        if report.linear_x_limited {
            self.num_linear_x_limited += 1;
        }
        if report.angular_z_limited {
            self.num_angular_z_limited += 1;
        }

        match outcome {
            Ok(PublishOutcome::Sent) => self.num_sent += 1,
            Ok(PublishOutcome::Suppressed) => self.num_suppressed += 1,
            Err(_) => self.num_publish_errors += 1,
        }
    }
}
