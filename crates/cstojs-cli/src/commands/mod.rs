//! CLI command implementations

pub mod init;
pub mod translate;
pub mod validate;
pub mod watch;
