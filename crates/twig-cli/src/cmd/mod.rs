pub mod build;
pub mod config;
pub mod expand;
pub mod parse;
pub mod scaffold;
pub mod tree;

use anyhow::Context;
use clap::Args;
use std::io::Read;
use std::path::Path;
use twig_core::builder::BuildOptions;
use twig_core::expander::ExpandLimits;

/// Overrides for the configured expansion limits.
#[derive(Args, Debug, Default)]
pub struct LimitArgs {
    /// Deepest brace nesting accepted
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Largest number of expanded paths (0 = unlimited)
    #[arg(long, value_name = "N")]
    pub max_results: Option<usize>,
}

impl LimitArgs {
    pub fn apply(&self, mut limits: ExpandLimits) -> ExpandLimits {
        if let Some(depth) = self.max_depth {
            limits.max_depth = depth;
        }
        if let Some(results) = self.max_results {
            limits.max_results = results;
        }
        limits
    }
}

/// Flags that switch on build policies on top of the configured ones.
#[derive(Args, Debug, Default)]
pub struct BuildFlags {
    /// Show what would be created without writing anything
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Replace existing files
    #[arg(long)]
    pub overwrite: bool,

    /// Leave every existing entry untouched
    #[arg(long)]
    pub skip_existing: bool,

    /// Fail before writing if any entry already exists
    #[arg(long)]
    pub abort_on_conflict: bool,
}

impl BuildFlags {
    pub fn apply(&self, base: BuildOptions) -> BuildOptions {
        BuildOptions {
            dry_run: base.dry_run || self.dry_run,
            overwrite: base.overwrite || self.overwrite,
            skip_existing: base.skip_existing || self.skip_existing,
            abort_on_conflict: base.abort_on_conflict || self.abort_on_conflict,
        }
    }
}

/// Read a whole file, or stdin when `path` is absent or `-`.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
