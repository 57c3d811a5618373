//! Support library for the `cactus` binary.
//!
//! Exposes the command pipeline and logging set-up so tests and doctests can
//! drive a realization without spawning a subprocess.

pub mod cli;
pub mod logging;
