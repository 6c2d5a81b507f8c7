//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Configuration error - invalid repository setup (missing url, bad refid, unknown layout)
pub const CONFIG_ERROR: i32 = 2;

/// No match - the queried repository has no mirror
pub const NO_MATCH: i32 = 3;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;
