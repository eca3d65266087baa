//! # Velocity command messages
//!
//! The velocity structure exchanged with the upstream command source and the downstream actuator
//! interface, and the framing used to carry it over a ZMQ PUB/SUB pair.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Serialize, Deserialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Separator between the topic and the payload of a frame.
///
/// ZMQ subscribers filter on a byte prefix, so the topic must come first.
pub const TOPIC_SEPARATOR: char = ' ';

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A three element vector.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64
}

/// Linear and angular velocity of the rover body.
///
/// Only `linear.x` (forward speed) and `angular.z` (turn rate) are meaningful to a ground
/// vehicle, the remaining fields are carried so that any upstream twist source can be accepted.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Twist {
    /// Linear velocity.
    ///
    /// Units: meters/second,
    /// Frame: Rover body
    pub linear: Vector3,

    /// Angular velocity.
    ///
    /// Units: radians/second,
    /// Frame: Rover body
    pub angular: Vector3
}

/// Framing of a [`Twist`] into a single ZMQ message, `"<topic> <json>"`.
pub struct VelCmdFrame;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum VelCmdFrameError {
    #[error("Topic \"{0}\" must not be empty or contain the topic separator")]
    InvalidTopic(String),

    #[error("Frame has no separator between the topic and the payload")]
    MissingSeparator,

    #[error("Could not (de)serialize the twist: {0}")]
    Json(serde_json::Error)
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl VelCmdFrame {
    /// Build a frame for the given topic.
    pub fn to_frame(topic: &str, twist: &Twist) -> Result<String, VelCmdFrameError> {
        if topic.is_empty() || topic.contains(TOPIC_SEPARATOR) {
            return Err(VelCmdFrameError::InvalidTopic(topic.into()))
        }

        let payload = serde_json::to_string(twist)
            .map_err(VelCmdFrameError::Json)?;

        Ok(format!("{}{}{}", topic, TOPIC_SEPARATOR, payload))
    }

    /// Split a frame into its topic and twist.
    pub fn from_frame(frame: &str) -> Result<(String, Twist), VelCmdFrameError> {
        let mut parts = frame.splitn(2, TOPIC_SEPARATOR);

        let topic = parts.next().unwrap_or("");
        let payload = match parts.next() {
            Some(p) => p,
            None => return Err(VelCmdFrameError::MissingSeparator)
        };

        let twist = serde_json::from_str(payload)
            .map_err(VelCmdFrameError::Json)?;

        Ok((topic.to_string(), twist))
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_frame_layout() {
        let twist = Twist {
            linear: Vector3 { x: 1.5, ..Default::default() },
            angular: Vector3 { z: -0.5, ..Default::default() }
        };

        let frame = VelCmdFrame::to_frame("j5_cmd", &twist).unwrap();

        assert!(frame.starts_with("j5_cmd {"));

        let (topic, decoded) = VelCmdFrame::from_frame(&frame).unwrap();
        assert_eq!(topic, "j5_cmd");
        assert_eq!(decoded, twist);
    }

    #[test]
    fn test_partial_twist_fields_default_to_zero() {
        let (topic, twist) = VelCmdFrame::from_frame(
            r#"cmd_vel {"linear": {"x": 2.0}, "angular": {"z": 0.25}}"#
        ).unwrap();

        assert_eq!(topic, "cmd_vel");
        assert_eq!(twist.linear, Vector3 { x: 2.0, y: 0.0, z: 0.0 });
        assert_eq!(twist.angular, Vector3 { x: 0.0, y: 0.0, z: 0.25 });
    }

    #[test]
    fn test_frame_errors() {
        assert!(matches!(
            VelCmdFrame::from_frame("cmd_vel"),
            Err(VelCmdFrameError::MissingSeparator)
        ));
        assert!(matches!(
            VelCmdFrame::from_frame("cmd_vel not_json"),
            Err(VelCmdFrameError::Json(_))
        ));
        assert!(matches!(
            VelCmdFrame::to_frame("bad topic", &Twist::default()),
            Err(VelCmdFrameError::InvalidTopic(_))
        ));
        assert!(matches!(
            VelCmdFrame::to_frame("", &Twist::default()),
            Err(VelCmdFrameError::InvalidTopic(_))
        ));
    }
}
