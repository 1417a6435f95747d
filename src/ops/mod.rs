//! High-level operations behind the CLI commands.

pub mod generate;
pub mod resolve;

pub use generate::{generate, GenerateOptions, GeneratedPackage};
pub use resolve::{resolve_aliases, ResolveOptions};
