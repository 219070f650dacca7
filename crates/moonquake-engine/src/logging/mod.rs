//! Logging utilities.
//!
//! Logger initialization lives here so the studio binary and tests share the
//! same filter defaults. Library code only talks to the `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig};
