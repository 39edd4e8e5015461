use crate::output::print_json;
use clap::Subcommand;
use std::path::Path;
use twig_core::config::{TwigConfig, WarnLevel};

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective configuration and where it came from
    Show,

    /// Validate the configuration for common mistakes
    Validate,
}

pub fn run(
    config: &TwigConfig,
    source: Option<&Path>,
    subcmd: ConfigSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(config, source, json),
        ConfigSubcommand::Validate => validate(config, json),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(config: &TwigConfig, source: Option<&Path>, json: bool) -> anyhow::Result<()> {
    if json {
        let value = serde_json::json!({
            "source": source.map(|p| p.display().to_string()),
            "config": config,
        });
        print_json(&value)?;
        return Ok(());
    }

    match source {
        Some(p) => println!("# source: {}", p.display()),
        None => println!("# source: built-in defaults"),
    }
    print!("{}", config.to_yaml()?);
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(config: &TwigConfig, json: bool) -> anyhow::Result<()> {
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    let has_errors = warnings.iter().any(|w| w.level == WarnLevel::Error);
    if has_errors {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}
