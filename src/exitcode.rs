//! Standard exit codes (BSD sysexits.h compatible where it matters)

/// Successful termination
pub const OK: i32 = 0;

/// Generic failure raised by a command (e.g. toolchain could not start)
pub const FAILURE: i32 = 1;

/// Command line usage error, unknown command or help topic
pub const USAGE: i32 = 2;

/// Data format error (malformed locale files)
pub const DATAERR: i32 = 65;

/// Cannot open input (locale files)
pub const NOINPUT: i32 = 66;

/// Internal software error (broken template)
pub const SOFTWARE: i32 = 70;

/// Can't create output directory
pub const CANTCREAT: i32 = 73;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
