//! Velocity command source for manually testing the filter
//!
//! Publishes a fixed twist on the command topic at a fixed rate, standing in for a teleop or
//! navigation stack upstream of the filter.

use comms_if::{
    net::{zmq, MonitoredSocket, SocketOptions},
    vel_cmd::{Twist, Vector3, VelCmdFrame}
};
use chrono::Utc;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "test_cmd_vel_pub")]
struct Opt {
    /// Forward speed to command in meters/second
    #[structopt(long, default_value = "0.0", allow_hyphen_values = true)]
    linear_x: f64,

    /// Turn rate to command in radians/second
    #[structopt(long, default_value = "0.0", allow_hyphen_values = true)]
    angular_z: f64,

    /// Endpoint to bind the publisher to
    #[structopt(long, default_value = "tcp://*:5020")]
    endpoint: String,

    /// Topic to publish on
    #[structopt(long, default_value = "cmd_vel")]
    topic: String,

    /// Publish rate in Hz
    #[structopt(long, default_value = "5.0")]
    rate_hz: f64
}

fn main() -> Result<(), Box<dyn std::error::Error>> {

    let opt = Opt::from_args();

    // Create zmq context
    let ctx = zmq::Context::new();

    // Create socket options
    let socket_options = SocketOptions {
        bind: true,
        block_on_first_connect: false,
        ..Default::default()
    };

    // Create the socket
    let socket = MonitoredSocket::new(
        &ctx,
        zmq::PUB,
        socket_options,
        &opt.endpoint
    )?;

    println!("Publishing on {} topic \"{}\"", opt.endpoint, opt.topic);

    let twist = Twist {
        linear: Vector3 { x: opt.linear_x, ..Default::default() },
        angular: Vector3 { z: opt.angular_z, ..Default::default() }
    };
    let frame = VelCmdFrame::to_frame(&opt.topic, &twist)?;

    let period = std::time::Duration::from_secs_f64(1.0 / opt.rate_hz);

    loop {
        match socket.send(&frame, 0) {
            Ok(_) => println!("[{}] {}", Utc::now().format("%H:%M:%S%.3f"), frame),
            Err(e) => println!("Failed to send command: {}", e)
        }

        std::thread::sleep(period);
    }
}
