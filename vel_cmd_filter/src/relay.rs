//! # Relay cycle
//!
//! One tick of the relay: read the latest command from the ingest, filter it, and hand it to the
//! publisher. The main loop calls [`relay_tick`] once per cycle.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{trace, warn};

use crate::{
    cmd::VelocityCommand,
    cmd_filter::{CmdFilter, StatusReport},
    cmd_ingest::CmdIngest,
    cmd_pub::{CmdPublisher, CmdPublisherError, PublishOutcome},
};
use util::module::State;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Everything that happened on one relay tick.
#[derive(Debug)]
pub struct RelayTick {
    /// The filtered command handed to the publisher
    pub cmd: VelocityCommand,

    /// Which axes were saturated
    pub report: StatusReport,

    /// Whether the command was sent, suppressed, or failed to send
    pub outcome: Result<PublishOutcome, CmdPublisherError>,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Run one tick of the relay.
///
/// Publish errors are logged and returned in the tick, they never stop the relay.
pub fn relay_tick(
    ingest: &CmdIngest,
    filter: &mut CmdFilter,
    publisher: &CmdPublisher
) -> RelayTick {
    let (cmd, report) = filter.proc(&ingest.latest());

    trace!(
        "Sending velocity command: {{{:.6}, {:.6}}}",
        cmd.linear_x, cmd.angular_z
    );

    let outcome = publisher.publish(&cmd);
    if let Err(ref e) = outcome {
        warn!("Could not publish velocity command: {}", e);
    }

    RelayTick { cmd, report, outcome }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::params::VelCmdFilterParams;
    use comms_if::{net::zmq, vel_cmd::VelCmdFrame};
    use std::time::{Duration, Instant};

    fn publisher(ctx: &zmq::Context, endpoint: &str) -> CmdPublisher {
        CmdPublisher::new(ctx, &VelCmdFilterParams {
            cmd_vel_endpoint: "inproc://unused".into(),
            cmd_vel_topic: "cmd_vel".into(),
            actuator_endpoint: endpoint.into(),
            actuator_topic: "j5_cmd".into(),
            recv_timeout_ms: 10
        }).unwrap()
    }

    fn subscriber(ctx: &zmq::Context, endpoint: &str) -> zmq::Socket {
        let sub = ctx.socket(zmq::SUB).unwrap();
        sub.set_linger(0).unwrap();
        sub.set_rcvtimeo(10).unwrap();
        sub.connect(endpoint).unwrap();
        sub.set_subscribe(b"j5_cmd").unwrap();
        sub
    }

    #[test]
    fn test_tick_follows_latest_command() {
        let ctx = zmq::Context::new();
        let publisher = publisher(&ctx, "inproc://relay_tick_latest");
        let ingest = CmdIngest::new();
        let mut filter = CmdFilter::default();

        ingest.on_cmd_received(VelocityCommand::new(5.0, 2.0));
        let tick = relay_tick(&ingest, &mut filter, &publisher);
        assert_eq!(tick.cmd, VelocityCommand::new(3.0, 1.0));
        assert_eq!(tick.report, StatusReport { linear_x_limited: true, angular_z_limited: true });
        assert_eq!(tick.outcome.unwrap(), PublishOutcome::Sent);

        // A later command replaces the earlier one on the very next tick
        ingest.on_cmd_received(VelocityCommand::new(-0.5, 0.25));
        let tick = relay_tick(&ingest, &mut filter, &publisher);
        assert_eq!(tick.cmd, VelocityCommand::new(-0.5, 0.25));
        assert_eq!(tick.report, StatusReport::default());
        assert_eq!(tick.outcome.unwrap(), PublishOutcome::Sent);

        ingest.on_cmd_received(VelocityCommand::new(0.0, 0.0));
        let tick = relay_tick(&ingest, &mut filter, &publisher);
        assert_eq!(tick.cmd, VelocityCommand::default());
        assert_eq!(tick.outcome.unwrap(), PublishOutcome::Suppressed);
    }

    #[test]
    fn test_zero_command_never_reaches_actuator() {
        let ctx = zmq::Context::new();
        let publisher = publisher(&ctx, "inproc://relay_tick_zero");
        let sub = subscriber(&ctx, "inproc://relay_tick_zero");
        let ingest = CmdIngest::new();
        let mut filter = CmdFilter::default();

        // Tick until the subscription has propagated, then drain anything left in flight
        ingest.on_cmd_received(VelocityCommand::new(1.0, 0.0));
        let start = Instant::now();
        loop {
            assert!(start.elapsed() < Duration::from_secs(5), "command never recieved");
            relay_tick(&ingest, &mut filter, &publisher);

            if sub.recv_string(0).is_ok() {
                break
            }
        }
        while sub.recv_string(0).is_ok() {}

        // Zero command is not sent
        ingest.on_cmd_received(VelocityCommand::new(0.0, 0.0));
        let tick = relay_tick(&ingest, &mut filter, &publisher);
        assert_eq!(tick.outcome.unwrap(), PublishOutcome::Suppressed);
        assert!(matches!(sub.recv_string(0), Err(zmq::Error::EAGAIN)));

        // The next message on the wire is the next non-zero command
        ingest.on_cmd_received(VelocityCommand::new(0.0, -4.0));
        let tick = relay_tick(&ingest, &mut filter, &publisher);
        assert_eq!(tick.outcome.unwrap(), PublishOutcome::Sent);

        let start = Instant::now();
        let frame = loop {
            assert!(start.elapsed() < Duration::from_secs(5), "command never recieved");
            if let Ok(Ok(s)) = sub.recv_string(0) {
                break s
            }
        };
        let (_, twist) = VelCmdFrame::from_frame(&frame).unwrap();
        assert_eq!(VelocityCommand::from(&twist), VelocityCommand::new(0.0, -1.0));
    }
}
