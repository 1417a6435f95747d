//! `stevedore generate` command

use std::env;

use anyhow::{Context, Result};

use crate::cli::GenerateArgs;
use stevedore::ops::generate::{generate, GenerateOptions};
use stevedore::util::config::SuiteConfig;

pub fn execute(args: GenerateArgs) -> Result<()> {
    let cwd = env::current_dir().context("failed to determine current directory")?;
    let config = SuiteConfig::load(&cwd)?;

    let options = GenerateOptions {
        manifest_path: args.manifest,
        output_dir: args.output,
    };

    let generated = generate(&config, &options)?;

    println!(
        "generated `{}` ({} files)",
        generated.vendor_name,
        generated.files.len()
    );
    for file in &generated.files {
        println!("  {}", file.display());
    }

    Ok(())
}
