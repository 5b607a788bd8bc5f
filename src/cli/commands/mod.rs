//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Every level command loads its
//! manifest the same way, through [`common::load_level`].

pub mod check;
pub mod common;
pub mod completions;
pub mod dispatcher;
pub mod dump;
pub mod lookup;
pub mod resolve;
pub mod schema;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
