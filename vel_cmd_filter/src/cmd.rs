//! Velocity command passed through the filter

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::vel_cmd::{Twist, Vector3};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A two-axis velocity command for the rover body.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityCommand {
    /// Forward linear velocity.
    ///
    /// Units: meters/second
    pub linear_x: f64,

    /// Turn rate about the rover's Z+ (upwards) axis.
    ///
    /// Units: radians/second
    pub angular_z: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl VelocityCommand {
    pub fn new(linear_x: f64, angular_z: f64) -> Self {
        Self {
            linear_x,
            angular_z,
        }
    }

    /// True if both axes are exactly zero.
    pub fn is_zero(&self) -> bool {
        self.linear_x == 0.0 && self.angular_z == 0.0
    }
}

/// Only the forward and turn rate components of the twist are kept.
impl From<&Twist> for VelocityCommand {
    fn from(twist: &Twist) -> Self {
        Self {
            linear_x: twist.linear.x,
            angular_z: twist.angular.z,
        }
    }
}

impl From<VelocityCommand> for Twist {
    fn from(cmd: VelocityCommand) -> Self {
        Twist {
            linear: Vector3 {
                x: cmd.linear_x,
                ..Default::default()
            },
            angular: Vector3 {
                z: cmd.angular_z,
                ..Default::default()
            },
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_twist_ignores_other_axes() {
        let twist = Twist {
            linear: Vector3 { x: 1.0, y: 2.0, z: 3.0 },
            angular: Vector3 { x: 4.0, y: 5.0, z: 6.0 },
        };

        assert_eq!(VelocityCommand::from(&twist), VelocityCommand::new(1.0, 6.0));
    }

    #[test]
    fn test_into_twist() {
        let twist: Twist = VelocityCommand::new(-0.5, 0.25).into();

        assert_eq!(twist.linear, Vector3 { x: -0.5, y: 0.0, z: 0.0 });
        assert_eq!(twist.angular, Vector3 { x: 0.0, y: 0.0, z: 0.25 });
    }

    #[test]
    fn test_is_zero() {
        assert!(VelocityCommand::default().is_zero());
        assert!(VelocityCommand::new(-0.0, 0.0).is_zero());
        assert!(!VelocityCommand::new(0.0, 0.1).is_zero());
        assert!(!VelocityCommand::new(0.1, 0.0).is_zero());
    }
}
