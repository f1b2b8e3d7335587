//! `operations` command: list every root operation field in a schema.

use crate::OutputFormat;
use anyhow::{Context, Result};
use colored::Colorize;
use graphql_scaffold_engine::enumerate_operations;
use std::path::Path;

pub fn run(schema_path: &Path, format: OutputFormat) -> Result<()> {
    let schema = super::load_schema(schema_path)?;
    let operations = enumerate_operations(&schema);

    match format {
        OutputFormat::Human => {
            for op in &operations {
                println!(
                    "{:>12} {}: {}",
                    op.kind.as_str().cyan(),
                    op.qualified_name().bold(),
                    op.return_type
                );
            }
            println!();
            println!("{} operations", operations.len().to_string().bold());
        }
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = operations
                .iter()
                .map(|op| {
                    serde_json::json!({
                        "kind": op.kind,
                        "parentType": op.parent_type.as_ref(),
                        "fieldName": op.field_name.as_ref(),
                        "returnType": op.return_type.to_string(),
                    })
                })
                .collect();
            let rendered = serde_json::to_string_pretty(&entries)
                .context("failed to serialize operation list")?;
            println!("{rendered}");
        }
    }
    Ok(())
}
