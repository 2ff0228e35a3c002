//! Process exit codes. Part of the CLI contract.

pub const SUCCESS: i32 = 0;
pub const CONFIG_ERROR: i32 = 2; // Bad flags, env config, unknown suite, unreadable data
pub const RUNTIME_ERROR: i32 = 3; // Failure while running or writing reports
