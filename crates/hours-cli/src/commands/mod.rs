//! CLI subcommand implementations.

pub mod report;
pub mod split;
pub mod util;
