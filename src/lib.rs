//! # Library Crate Root
//!
//! Declares the module structure shared by the `pylauncher` binary and its tests:
//! `cli` for argument parsing and dispatch, `core` for the bootstrap sequence,
//! and `utils` for configuration, errors and logging.

#[macro_use]
extern crate log;

pub mod cli;
pub mod core;
pub mod utils;
