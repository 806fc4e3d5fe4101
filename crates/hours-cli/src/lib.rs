//! Calendar hours CLI library.
//!
//! This crate provides the CLI interface for the hours aggregator.

mod cli;
pub mod commands;
mod config;
pub mod source;

pub use cli::{Cli, Commands, ReportArgs};
pub use config::Config;
