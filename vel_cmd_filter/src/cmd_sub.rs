//! # Command Subscriber
//!
//! Receives velocity commands from the upstream publisher and hands them to the
//! [`CmdIngest`](crate::cmd_ingest::CmdIngest). Runs as a background dispatcher thread for the
//! life of the executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{
    net::{is_no_message, zmq, MonitoredSocket, MonitoredSocketError, SocketOptions},
    vel_cmd::{VelCmdFrame, VelCmdFrameError}
};
use log::{debug, info, warn};
use std::{
    sync::{Arc, atomic::{AtomicBool, Ordering}},
    thread
};

use crate::{
    cmd::VelocityCommand,
    cmd_ingest::CmdIngest,
    params::VelCmdFilterParams
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Velocity command subscriber
pub struct CmdSubscriber {
    socket: MonitoredSocket,

    topic: String,

    ingest: CmdIngest
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CmdSubscriberError {
    #[error(
        "The receive timeout must be positive so the dispatcher can see shutdown requests, \
         found {0} ms"
    )]
    InvalidRecvTimeout(i32),

    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not subscribe to the \"{0}\" topic: {1}")]
    SubscribeError(String, zmq::Error),

    #[error("Could not recieve a message from the publisher: {0}")]
    RecvError(zmq::Error),

    #[error("The publisher sent a message which was not valid UTF-8")]
    NonUtf8Message,

    #[error("Could not parse the recieved command: {0}")]
    FrameError(VelCmdFrameError)
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl CmdSubscriber {

    /// Create a new instance of the command subscriber.
    ///
    /// This function will not block until the publisher is available.
    ///
    /// `params.recv_timeout_ms` must be positive. Zero would make the dispatcher spin and a
    /// negative timeout blocks until a message arrives, so a quiet publisher would stop the
    /// dispatcher from ever shutting down.
    pub fn new(
        ctx: &zmq::Context,
        params: &VelCmdFilterParams,
        ingest: CmdIngest
    ) -> Result<Self, CmdSubscriberError> {
        if params.recv_timeout_ms <= 0 {
            return Err(CmdSubscriberError::InvalidRecvTimeout(params.recv_timeout_ms))
        }

        let socket_options = SocketOptions {
            block_on_first_connect: false,
            linger: 0,
            recv_timeout: params.recv_timeout_ms,
            ..Default::default()
        };

        let socket = MonitoredSocket::new(
            ctx,
            zmq::SUB,
            socket_options,
            &params.cmd_vel_endpoint
        ).map_err(CmdSubscriberError::SocketError)?;

        socket.set_subscribe(params.cmd_vel_topic.as_bytes())
            .map_err(|e| CmdSubscriberError::SubscribeError(params.cmd_vel_topic.clone(), e))?;

        Ok(Self {
            socket,
            topic: params.cmd_vel_topic.clone(),
            ingest
        })
    }

    /// Check if the subscriber is connected to the publisher
    pub fn is_connected(&self) -> bool {
        self.socket.connected()
    }

    /// Recieve a single command from the publisher.
    ///
    /// `Ok(None)` is returned if no command arrived within the receive timeout, or if the message
    /// was for a different topic which only shares a prefix with ours.
    pub fn recieve_cmd(&self) -> Result<Option<VelocityCommand>, CmdSubscriberError> {
        let frame = match self.socket.recv_string(0) {
            Ok(Ok(s)) => s,
            Ok(Err(_)) => return Err(CmdSubscriberError::NonUtf8Message),
            Err(ref e) if is_no_message(e) => return Ok(None),
            Err(e) => return Err(CmdSubscriberError::RecvError(e))
        };

        let (topic, twist) = VelCmdFrame::from_frame(&frame)
            .map_err(CmdSubscriberError::FrameError)?;

        if topic != self.topic {
            debug!("Ignoring message on topic \"{}\"", topic);
            return Ok(None)
        }

        Ok(Some(VelocityCommand::from(&twist)))
    }

    /// Start the dispatcher thread.
    ///
    /// Every recieved command is passed to the ingest. The thread exits once `stop` is raised,
    /// within one receive timeout.
    pub fn spawn(self, stop: Arc<AtomicBool>) -> thread::JoinHandle<()> {
        thread::spawn(move || self.run(stop))
    }

    fn run(self, stop: Arc<AtomicBool>) {
        info!("Command dispatcher started on topic \"{}\"", self.topic);

        let mut was_connected = false;

        while !stop.load(Ordering::Relaxed) {
            let connected = self.is_connected();
            if connected != was_connected {
                match connected {
                    true => info!("Connected to the velocity command publisher"),
                    false => warn!("Connection to the velocity command publisher lost")
                }
                was_connected = connected;
            }

            match self.recieve_cmd() {
                Ok(Some(cmd)) => self.ingest.on_cmd_received(cmd),
                Ok(None) => (),
                Err(e) => warn!("Could not recieve velocity command: {}", e)
            }
        }

        info!("Command dispatcher stopped");
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::vel_cmd::Twist;
    use std::time::{Duration, Instant};

    fn test_params(endpoint: &str) -> VelCmdFilterParams {
        VelCmdFilterParams {
            cmd_vel_endpoint: endpoint.into(),
            cmd_vel_topic: "cmd_vel".into(),
            actuator_endpoint: "inproc://unused".into(),
            actuator_topic: "j5_cmd".into(),
            recv_timeout_ms: 10
        }
    }

    fn bind_pub(ctx: &zmq::Context, endpoint: &str) -> zmq::Socket {
        let socket = ctx.socket(zmq::PUB).unwrap();
        socket.set_linger(0).unwrap();
        socket.bind(endpoint).unwrap();
        socket
    }

    #[test]
    fn test_non_positive_recv_timeout_refused() {
        let ctx = zmq::Context::new();

        for timeout_ms in [0, -1, -100].iter() {
            let mut params = test_params("inproc://cmd_sub_bad_timeout");
            params.recv_timeout_ms = *timeout_ms;

            match CmdSubscriber::new(&ctx, &params, CmdIngest::new()) {
                Err(CmdSubscriberError::InvalidRecvTimeout(t)) => assert_eq!(t, *timeout_ms),
                Err(e) => panic!("Expected InvalidRecvTimeout, got {}", e),
                Ok(_) => panic!("Subscriber created with a {} ms timeout", timeout_ms)
            }
        }
    }

    #[test]
    fn test_recieve_timeout() {
        let ctx = zmq::Context::new();
        let _pub_socket = bind_pub(&ctx, "inproc://cmd_sub_timeout");

        let sub = CmdSubscriber::new(
            &ctx,
            &test_params("inproc://cmd_sub_timeout"),
            CmdIngest::new()
        ).unwrap();

        assert!(matches!(sub.recieve_cmd(), Ok(None)));
    }

    #[test]
    fn test_dispatcher_ingests_commands() {
        let ctx = zmq::Context::new();
        let pub_socket = bind_pub(&ctx, "inproc://cmd_sub_dispatch");

        let ingest = CmdIngest::new();
        let sub = CmdSubscriber::new(
            &ctx,
            &test_params("inproc://cmd_sub_dispatch"),
            ingest.clone()
        ).unwrap();

        let stop = Arc::new(AtomicBool::new(false));
        let handle = sub.spawn(stop.clone());

        let twist: Twist = VelocityCommand::new(1.25, -0.5).into();
        let frame = VelCmdFrame::to_frame("cmd_vel", &twist).unwrap();
        let other = VelCmdFrame::to_frame("cmd_vel_other", &Twist::default()).unwrap();

        // PUB/SUB drops messages until the subscription has propagated, so keep sending
        let start = Instant::now();
        while ingest.latest() != VelocityCommand::new(1.25, -0.5) {
            assert!(start.elapsed() < Duration::from_secs(5), "command never ingested");
            pub_socket.send(&other, 0).unwrap();
            pub_socket.send("cmd_vel garbage", 0).unwrap();
            pub_socket.send(&frame, 0).unwrap();
            thread::sleep(Duration::from_millis(10));
        }

        stop.store(true, Ordering::Relaxed);
        handle.join().unwrap();
    }
}
