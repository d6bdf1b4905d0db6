//! Shared library for `coursereturn`
//! Contains the semester model, the return-to-course rules and the ambient
//! configuration and logging used by the CLI.

pub mod config;
pub mod core;
pub mod logger;

pub use crate::core::get_version;
