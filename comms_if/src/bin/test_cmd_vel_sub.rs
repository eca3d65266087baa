//! Actuator-side listener for manually testing the filter
//!
//! Prints every command the filter sends to the actuator interface.

use comms_if::{
    net::{zmq, MonitoredSocket, SocketOptions},
    vel_cmd::VelCmdFrame
};
use chrono::Utc;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "test_cmd_vel_sub")]
struct Opt {
    /// Endpoint of the filter's actuator publisher
    #[structopt(long, default_value = "tcp://localhost:5021")]
    endpoint: String,

    /// Topic to subscribe to
    #[structopt(long, default_value = "j5_cmd")]
    topic: String
}

fn main() -> Result<(), Box<dyn std::error::Error>> {

    let opt = Opt::from_args();

    // Create context
    let ctx = zmq::Context::new();

    // Create socket
    let socket = MonitoredSocket::new(
        &ctx,
        zmq::SUB,
        SocketOptions::default(),
        &opt.endpoint
    )?;

    // Only actuator commands are of interest
    socket.set_subscribe(opt.topic.as_bytes())?;

    println!("Listening on {} topic \"{}\"", opt.endpoint, opt.topic);

    // Recieve messages from publisher
    loop {
        let msg = socket.recv_msg(0)?;

        let now = Utc::now().format("%H:%M:%S%.3f");

        match msg.as_str().map(VelCmdFrame::from_frame) {
            Some(Ok((_, twist))) => println!(
                "[{}] linear.x = {:.3} m/s, angular.z = {:.3} rad/s",
                now, twist.linear.x, twist.angular.z
            ),
            Some(Err(e)) => println!("[{}] Invalid frame: {}", now, e),
            None => println!("[{}] Non UTF-8 frame", now)
        }
    }
}
