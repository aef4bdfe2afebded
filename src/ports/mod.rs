//! Port traits between the assembler and the outside world.

pub mod artifact_port;
pub mod config_port;
pub mod report_port;
