//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod fs;

pub use config::SuiteConfig;
pub use diagnostic::Diagnostic;
