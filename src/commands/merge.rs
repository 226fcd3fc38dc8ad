//! The `merge` command: read a ZIP archive from disk, merge split chapter
//! pairs, and write the result next to the input.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use crate::error::Error;
use crate::merge::{merge_archive, MergeAction};

/// Machine-readable report emitted by `--json`.
#[derive(Serialize)]
struct Report<'a> {
    input: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a Path>,
    dry_run: bool,
    actions: &'a [MergeAction],
}

/// Execute the merge command.
pub fn execute(input: PathBuf, output: Option<PathBuf>, dry_run: bool, json: bool) -> Result<()> {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if !is_zip_name(name) {
        return Err(Error::InvalidInputFormat(input.display().to_string()).into());
    }

    let bytes =
        fs::read(&input).with_context(|| format!("Failed to read {}", input.display()))?;

    if !json {
        println!(
            "{}",
            format!("Processing {name} ({:.2} KB)...", bytes.len() as f64 / 1024.0).blue()
        );
    }

    let (merged, log) =
        merge_archive(&bytes).with_context(|| format!("Failed to merge {}", input.display()))?;

    let output_path = output.unwrap_or_else(|| input.with_file_name(merged_name(name)));

    if !dry_run {
        fs::write(&output_path, &merged)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
    }

    if json {
        let report = Report {
            input: &input,
            output: (!dry_run).then_some(output_path.as_path()),
            dry_run,
            actions: &log,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for action in &log {
        match action {
            MergeAction::Merged { .. } => println!("  {} {action}", "✓".green()),
            MergeAction::KeptSingle { .. } => println!("  {} {action}", "⚠".yellow()),
            MergeAction::KeptUnchanged { .. } => println!("  {} {action}", "→".dimmed()),
        }
    }

    if dry_run {
        println!(
            "{} Dry run, nothing written (would write {})",
            "✓".green().bold(),
            output_path.display()
        );
    } else {
        println!(
            "{} Wrote {} ({:.2} KB)",
            "✓".green().bold(),
            output_path.display(),
            merged.len() as f64 / 1024.0
        );
    }

    Ok(())
}

/// Input validation: extension check only, case-insensitive.
fn is_zip_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".zip")
}

/// Default output naming: substitute `_merged` before the first literal
/// `.zip`. A name that passed the case-insensitive extension check but
/// contains no lowercase `.zip` (e.g. `Book.ZIP`) is left unchanged.
fn merged_name(name: &str) -> String {
    name.replacen(".zip", "_merged.zip", 1)
}
