//! Host platform (linux for example) utility functions

use std::path::PathBuf;
use uname;

/// Environment variable holding the software root directory.
///
/// The root contains the `params` and `sessions` directories.
pub const SW_ROOT_ENV_VAR: &str = "VEL_CMD_FILTER_ROOT";

/// Retrieve uname information.
pub fn get_uname() -> std::io::Result<uname::Info> {
    uname::uname()
}

/// Get the path to the software root directory from the environment.
pub fn get_sw_root() -> Result<PathBuf, std::env::VarError> {
    std::env::var(SW_ROOT_ENV_VAR).map(PathBuf::from)
}
