//! CLI command handlers for `coursereturn`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod config;
pub mod evaluate;
pub mod gap;
