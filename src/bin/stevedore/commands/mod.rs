//! Command implementations

pub mod aliases;
pub mod completions;
pub mod generate;
