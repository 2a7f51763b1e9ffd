//! `appstore` command line
//!
//! Drives the entry generator and the site behaviors from a terminal.

#![warn(unreachable_pub)]

pub mod cli;
pub mod commands;

pub use cli::build_cli;
pub use commands::{run, Status};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
