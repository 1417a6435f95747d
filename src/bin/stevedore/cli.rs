//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Stevedore - vendor package generation and alias resolution for
/// versioned library suites
#[derive(Parser)]
#[command(name = "stevedore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a vendor package from an upstream description
    Generate(GenerateArgs),

    /// Resolve a package's alias set against an installed registry
    Aliases(AliasesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Path to the upstream package description
    pub manifest: PathBuf,

    /// Output directory (defaults to the vendor package name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct AliasesArgs {
    /// Versioned package name to locate (e.g. gz-math7)
    pub package: String,

    /// Path to the installed-registry description
    #[arg(long, default_value = "registry.toml")]
    pub registry: PathBuf,

    /// Version requirement the installed package must satisfy
    #[arg(long, default_value = "*")]
    pub requirement: String,

    /// Required component (repeatable)
    #[arg(long = "component")]
    pub components: Vec<String>,

    /// Alias namespace root (defaults to the unversioned package name)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Emit the alias report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
