//! CLI subcommand implementations.

pub mod listing;
pub mod person;
pub mod search;
pub mod serve;
