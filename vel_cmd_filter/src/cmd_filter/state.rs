//! Implementations for the CmdFilter state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, warn};
use serde::Serialize;

// Internal
use super::{
    DEFAULT_TURN_RATE_CMD_RADS, DEFAULT_VELOCITY_CMD_MS,
    MAX_TURN_RATE_CMD_RADS, MAX_VELOCITY_CMD_MS};
use crate::cmd::VelocityCommand;
use util::{
    maths::clamp_abs,
    module::State};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Command filter module state
#[derive(Default)]
pub struct CmdFilter {
    pub(crate) report: StatusReport,
}

/// Status report for CmdFilter processing.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct StatusReport {
    /// The forward velocity was saturated to the limit on this cycle
    pub linear_x_limited: bool,

    /// The turn rate was saturated to the limit on this cycle
    pub angular_z_limited: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl CmdFilter {
    /// Compute the command to send downstream from the last received command.
    ///
    /// Each axis is saturated independently. An axis which is exactly zero in the last received
    /// command is set to its default instead. NaN has no place in the limit range and is also
    /// replaced by the default.
    pub fn compute_outbound_cmd(&mut self, last: &VelocityCommand) -> VelocityCommand {
        let mut outbound = VelocityCommand::new(
            DEFAULT_VELOCITY_CMD_MS,
            DEFAULT_TURN_RATE_CMD_RADS
        );
        let mut report = StatusReport::default();

        if last.linear_x.is_nan() || last.angular_z.is_nan() {
            warn!("Received NaN in velocity command {:?}, using defaults for NaN axes", last);
        }

        if last.linear_x != 0.0 && !last.linear_x.is_nan() {
            let (v, limited) = clamp_abs(last.linear_x, MAX_VELOCITY_CMD_MS);
            outbound.linear_x = v;
            report.linear_x_limited = limited;
        }

        if last.angular_z != 0.0 && !last.angular_z.is_nan() {
            let (v, limited) = clamp_abs(last.angular_z, MAX_TURN_RATE_CMD_RADS);
            outbound.angular_z = v;
            report.angular_z_limited = limited;
        }

        // Only log when saturation starts or stops, a held command would otherwise log every cycle
        if report.linear_x_limited != self.report.linear_x_limited {
            match report.linear_x_limited {
                true => debug!(
                    "Forward velocity {:.3} m/s limited to {:.3} m/s",
                    last.linear_x, outbound.linear_x
                ),
                false => debug!("Forward velocity back within limits")
            }
        }
        if report.angular_z_limited != self.report.angular_z_limited {
            match report.angular_z_limited {
                true => debug!(
                    "Turn rate {:.3} rad/s limited to {:.3} rad/s",
                    last.angular_z, outbound.angular_z
                ),
                false => debug!("Turn rate back within limits")
            }
        }

        self.report = report;

        outbound
    }
}

impl State for CmdFilter {
    type InputData = VelocityCommand;
    type OutputData = VelocityCommand;
    type StatusReport = StatusReport;

    /// Perform cyclic processing of the command filter.
    fn proc(&mut self, input_data: &Self::InputData)
        -> (Self::OutputData, Self::StatusReport)
    {
        let output = self.compute_outbound_cmd(input_data);

        (output, self.report)
    }

    fn status_report(&self) -> Self::StatusReport {
        self.report
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn filter(linear_x: f64, angular_z: f64) -> VelocityCommand {
        CmdFilter::default().compute_outbound_cmd(&VelocityCommand::new(linear_x, angular_z))
    }

    #[test]
    fn test_linear_saturation() {
        for v in [3.0001, 5.0, 100.0, f64::MAX, f64::INFINITY].iter() {
            assert_eq!(filter(*v, 0.0).linear_x, MAX_VELOCITY_CMD_MS);
            assert_eq!(filter(-*v, 0.0).linear_x, -MAX_VELOCITY_CMD_MS);
        }
    }

    #[test]
    fn test_angular_saturation() {
        for v in [1.0001, 2.0, 50.0, f64::INFINITY].iter() {
            assert_eq!(filter(0.0, *v).angular_z, MAX_TURN_RATE_CMD_RADS);
            assert_eq!(filter(0.0, -*v).angular_z, -MAX_TURN_RATE_CMD_RADS);
        }
    }

    #[test]
    fn test_pass_through() {
        for v in [1e-9, 0.1, 1.5, 2.999, 3.0].iter() {
            assert_eq!(filter(*v, 0.0).linear_x, *v);
            assert_eq!(filter(-*v, 0.0).linear_x, -*v);
        }
        for v in [1e-9, 0.3, 0.999, 1.0].iter() {
            assert_eq!(filter(0.0, *v).angular_z, *v);
            assert_eq!(filter(0.0, -*v).angular_z, -*v);
        }
    }

    #[test]
    fn test_zero_input_gives_default() {
        let mut f = CmdFilter::default();

        // Saturate first, then check a zero input doesn't carry the previous value
        f.compute_outbound_cmd(&VelocityCommand::new(10.0, 10.0));
        let out = f.compute_outbound_cmd(&VelocityCommand::new(0.0, 0.0));

        assert_eq!(out, VelocityCommand::new(DEFAULT_VELOCITY_CMD_MS, DEFAULT_TURN_RATE_CMD_RADS));
        assert_eq!(f.status_report(), StatusReport::default());
    }

    #[test]
    fn test_nan_gives_default() {
        assert_eq!(filter(f64::NAN, 0.5), VelocityCommand::new(DEFAULT_VELOCITY_CMD_MS, 0.5));
        assert_eq!(filter(5.0, f64::NAN), VelocityCommand::new(3.0, DEFAULT_TURN_RATE_CMD_RADS));
    }

    #[test]
    fn test_axes_independent() {
        assert_eq!(filter(5.0, 2.0), VelocityCommand::new(3.0, 1.0));
        assert_eq!(filter(5.0, 0.5), VelocityCommand::new(3.0, 0.5));
        assert_eq!(filter(-1.0, -2.0), VelocityCommand::new(-1.0, -1.0));
        assert_eq!(filter(0.0, -2.0), VelocityCommand::new(0.0, -1.0));
        assert_eq!(filter(-4.0, 0.0), VelocityCommand::new(-3.0, 0.0));
    }

    #[test]
    fn test_status_report() {
        let mut f = CmdFilter::default();

        let (out, rpt) = f.proc(&VelocityCommand::new(5.0, 0.5));
        assert_eq!(out, VelocityCommand::new(3.0, 0.5));
        assert_eq!(rpt, StatusReport { linear_x_limited: true, angular_z_limited: false });

        let (_, rpt) = f.proc(&VelocityCommand::new(1.0, -3.0));
        assert_eq!(rpt, StatusReport { linear_x_limited: false, angular_z_limited: true });
    }
}
