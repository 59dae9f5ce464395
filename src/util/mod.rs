//! Small helpers shared by the binary and the tests

pub mod path;
pub mod testing;
