use serde::Serialize;
use twig_core::builder::BuildReport;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a build report and fail if any entry could not be created.
pub fn finish_build(report: &BuildReport, json: bool) -> anyhow::Result<()> {
    if json {
        print_json(report)?;
    } else {
        let verb = if report.dry_run { "would create" } else { "created" };
        for path in &report.created {
            println!("{verb}  {}", path.display());
        }
        for path in &report.overwritten {
            println!("overwrote  {}", path.display());
        }
        for path in &report.skipped {
            println!("skipped  {}", path.display());
        }

        println!();
        if report.dry_run {
            println!("Dry run: no changes were made.");
        }
        println!(
            "{} created, {} overwritten, {} skipped, {} errors",
            report.created.len(),
            report.overwritten.len(),
            report.skipped.len(),
            report.errors.len()
        );
        for err in &report.errors {
            eprintln!("  ✗ {err}");
        }
    }

    if !report.is_clean() {
        anyhow::bail!("{} entries could not be created", report.errors.len());
    }
    Ok(())
}
