//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads the
//! configuration once, applies the global flag overrides and routes the
//! subcommand to its implementation.

pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod list;
pub mod show;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, EXIT_UNKNOWN_KERNEL};
