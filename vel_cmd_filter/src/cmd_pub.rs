//! # Command Publisher
//!
//! Sends filtered velocity commands to the downstream actuator interface.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{
    net::{zmq, MonitoredSocket, MonitoredSocketError, SocketOptions},
    vel_cmd::{Twist, VelCmdFrame, VelCmdFrameError}
};

use crate::{cmd::VelocityCommand, params::VelCmdFilterParams};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Actuator command publisher
pub struct CmdPublisher {
    socket: MonitoredSocket,

    topic: String
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// What happened to a command passed to [`CmdPublisher::publish`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The command was sent to the actuator interface
    Sent,

    /// The command was all zero and was not sent
    Suppressed
}

#[derive(Debug, thiserror::Error)]
pub enum CmdPublisherError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not frame the command: {0}")]
    FrameError(VelCmdFrameError),

    #[error("Could not send the command: {0}")]
    SendError(zmq::Error)
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl CmdPublisher {
    /// Create a new instance of the command publisher.
    ///
    /// This function will not wait for a subscriber to connect.
    pub fn new(
        ctx: &zmq::Context,
        params: &VelCmdFilterParams
    ) -> Result<Self, CmdPublisherError> {
        let socket_options = SocketOptions {
            bind: true,
            block_on_first_connect: false,
            linger: 0,
            send_timeout: 10,
            ..Default::default()
        };

        let socket = MonitoredSocket::new(
            ctx,
            zmq::PUB,
            socket_options,
            &params.actuator_endpoint
        ).map_err(CmdPublisherError::SocketError)?;

        Ok(Self {
            socket,
            topic: params.actuator_topic.clone()
        })
    }

    /// Publish the command to the actuator interface.
    ///
    /// An all zero command is not sent, see [`should_publish`].
    pub fn publish(&self, cmd: &VelocityCommand) -> Result<PublishOutcome, CmdPublisherError> {
        if !should_publish(cmd) {
            return Ok(PublishOutcome::Suppressed)
        }

        let frame = VelCmdFrame::to_frame(&self.topic, &Twist::from(*cmd))
            .map_err(CmdPublisherError::FrameError)?;

        self.socket.send(&frame, 0)
            .map_err(CmdPublisherError::SendError)?;

        Ok(PublishOutcome::Sent)
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Commands are only sent downstream if at least one axis is non-zero.
pub fn should_publish(cmd: &VelocityCommand) -> bool {
    !cmd.is_zero()
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_should_publish() {
        assert!(!should_publish(&VelocityCommand::new(0.0, 0.0)));
        assert!(should_publish(&VelocityCommand::new(0.1, 0.0)));
        assert!(should_publish(&VelocityCommand::new(0.0, -0.1)));
        assert!(should_publish(&VelocityCommand::new(3.0, 1.0)));
    }

    #[test]
    fn test_publish() {
        let ctx = zmq::Context::new();

        let publisher = CmdPublisher::new(&ctx, &VelCmdFilterParams {
            cmd_vel_endpoint: "inproc://unused".into(),
            cmd_vel_topic: "cmd_vel".into(),
            actuator_endpoint: "inproc://cmd_pub_test".into(),
            actuator_topic: "j5_cmd".into(),
            recv_timeout_ms: 10
        }).unwrap();

        let sub = ctx.socket(zmq::SUB).unwrap();
        sub.set_linger(0).unwrap();
        sub.set_rcvtimeo(10).unwrap();
        sub.connect("inproc://cmd_pub_test").unwrap();
        sub.set_subscribe(b"j5_cmd").unwrap();

        assert_eq!(
            publisher.publish(&VelocityCommand::default()).unwrap(),
            PublishOutcome::Suppressed
        );

        // Keep publishing until the subscription has propagated
        let cmd = VelocityCommand::new(3.0, -1.0);
        let start = Instant::now();
        let frame = loop {
            assert!(start.elapsed() < Duration::from_secs(5), "command never recieved");
            assert_eq!(publisher.publish(&cmd).unwrap(), PublishOutcome::Sent);

            if let Ok(Ok(s)) = sub.recv_string(0) {
                break s
            }
        };

        let (topic, twist) = VelCmdFrame::from_frame(&frame).unwrap();
        assert_eq!(topic, "j5_cmd");
        assert_eq!(VelocityCommand::from(&twist), cmd);
    }
}
