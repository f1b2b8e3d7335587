//! `generate` command: one context package per root operation field.

use anyhow::{Context, Result};
use colored::Colorize;
use graphql_scaffold_engine::{
    enumerate_operations, generate_artifacts, GenerateLimits, OperationField,
};
use graphql_schema_model::SchemaModel;
use std::fs;
use std::path::{Path, PathBuf};

const SDL_FILE: &str = "operation.sdl.graphql";
const DOCUMENT_FILE: &str = "operation.graphql";
const CONTEXT_FILE: &str = "context.json";

pub fn run(schema_path: &Path, out_dir: &Path, limits: &GenerateLimits, quiet: bool) -> Result<()> {
    let schema = super::load_schema(schema_path)?;
    let operations = enumerate_operations(&schema);
    if operations.is_empty() {
        anyhow::bail!(
            "schema at {} defines no root operation fields",
            schema_path.display()
        );
    }

    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    let mut written = 0usize;
    let mut failed = 0usize;
    for op in &operations {
        match write_context_package(&schema, op, limits, out_dir) {
            Ok(_) => {
                written += 1;
                if !quiet {
                    println!("  {} {}", "✓".green(), op.qualified_name());
                }
            }
            // One field's failure must not abort its siblings.
            Err(err) => {
                failed += 1;
                tracing::warn!(
                    operation = %op.qualified_name(),
                    error = %err,
                    "skipping operation"
                );
                if !quiet {
                    eprintln!("  {} {}: {err:#}", "✗".red(), op.qualified_name());
                }
            }
        }
    }

    if !quiet {
        println!();
        let summary = format!("{written} context packages written to {}", out_dir.display());
        if failed > 0 {
            println!("{} ({} failed)", summary.bold(), failed.to_string().red());
        } else {
            println!("{}", summary.bold());
        }
    }

    if failed > 0 && written == 0 {
        anyhow::bail!("all {failed} operations failed");
    }
    Ok(())
}

/// Writes `contexts/<Parent.field>/{operation.sdl.graphql, operation.graphql,
/// context.json}` for one field.
fn write_context_package(
    schema: &SchemaModel,
    op: &OperationField,
    limits: &GenerateLimits,
    out_dir: &Path,
) -> Result<PathBuf> {
    let artifacts = generate_artifacts(schema, op, limits);
    let dir = out_dir.join(op.qualified_name());
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    fs::write(dir.join(SDL_FILE), &artifacts.sdl)
        .with_context(|| format!("failed to write {SDL_FILE}"))?;
    fs::write(dir.join(DOCUMENT_FILE), &artifacts.document)
        .with_context(|| format!("failed to write {DOCUMENT_FILE}"))?;

    let mut json = serde_json::to_string_pretty(&artifacts.context)
        .context("failed to serialize context.json")?;
    json.push('\n');
    fs::write(dir.join(CONTEXT_FILE), json)
        .with_context(|| format!("failed to write {CONTEXT_FILE}"))?;

    tracing::debug!(operation = %op.qualified_name(), dir = %dir.display(), "context package written");
    Ok(dir)
}
