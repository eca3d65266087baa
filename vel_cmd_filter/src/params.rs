//! # Velocity Command Filter Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Transport parameters for the filter.
///
/// The velocity limits are not parameters, see [`crate::cmd_filter`].
#[derive(Debug, Clone, Deserialize)]
pub struct VelCmdFilterParams {

    /// Endpoint of the upstream velocity command publisher
    pub cmd_vel_endpoint: String,

    /// Topic the upstream commands are published on
    pub cmd_vel_topic: String,

    /// Endpoint the actuator command publisher binds to
    pub actuator_endpoint: String,

    /// Topic the filtered commands are published on
    pub actuator_topic: String,

    /// Receive timeout of the command subscriber, which is also how quickly it notices shutdown.
    /// Must be greater than zero.
    ///
    /// Units: milliseconds
    pub recv_timeout_ms: i32,
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_shipped_params_parse() {
        let params: VelCmdFilterParams = util::params::from_str(
            include_str!("../../params/vel_cmd_filter.toml")
        ).unwrap();

        assert_eq!(params.cmd_vel_topic, "cmd_vel");
        assert_eq!(params.actuator_topic, "j5_cmd");
        assert_eq!(params.recv_timeout_ms, 100);
    }
}
