//! `stevedore aliases` command

use anyhow::{Context, Result};
use semver::VersionReq;

use crate::cli::AliasesArgs;
use stevedore::ops::resolve::{resolve_aliases, ResolveOptions};
use stevedore::resolve::ResolveError;
use stevedore::util::diagnostic;
use stevedore::PackageName;

pub fn execute(args: AliasesArgs, no_color: bool) -> Result<()> {
    let requirement: VersionReq = args
        .requirement
        .parse()
        .with_context(|| format!("invalid version requirement: {}", args.requirement))?;

    let prefix = match args.prefix {
        Some(prefix) => prefix,
        None => PackageName::new(&args.package)
            .unversioned()
            .with_context(|| format!("cannot derive alias prefix from `{}`", args.package))?
            .as_str()
            .to_string(),
    };

    let options = ResolveOptions {
        registry_path: args.registry,
        package: args.package,
        requirement,
        components: args.components,
        prefix,
    };

    let report = match resolve_aliases(&options) {
        Ok(report) => report,
        Err(e) => {
            if let Some(resolve_error) = e.downcast_ref::<ResolveError>() {
                diagnostic::emit(&resolve_error.to_diagnostic(), !no_color);
                std::process::exit(1);
            }
            return Err(e);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} {}", report.package, report.version);
        for alias in &report.aliases {
            println!("  {} -> {}", alias.name, alias.target);
        }
    }

    Ok(())
}
