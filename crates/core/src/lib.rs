//! Domain logic for the execution bridge.
//!
//! Everything here is free of HTTP concerns: staging of submitted code into
//! scoped temporary directories, spawning the interpreter, and classifying
//! the outcome into an [`ExecutionResult`](scripting::result::ExecutionResult).
//! The logging setup both binaries share lives in [`telemetry`].

pub mod error;
pub mod scripting;
pub mod telemetry;
