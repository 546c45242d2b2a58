//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Codes
//!
//! | Code | Description                                        |
//! |------|----------------------------------------------------|
//! | 0    | Success                                            |
//! | 1    | General error (unspecified)                        |
//! | 2    | Usage error (missing or extra input argument)      |
//! | 3    | IO error (input unreadable, output unwritable)     |
//! | 4    | Config error (unreadable or invalid config file)   |
//!
//! Unparseable input lines are not an error: they are skipped and logged.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required input.
pub const EXIT_USAGE: u8 = 2;

/// Input file missing/unreadable, or output file cannot be created/written.
pub const EXIT_IO: u8 = 3;

/// Config file unreadable, malformed, or failing validation.
pub const EXIT_CONFIG: u8 = 4;
