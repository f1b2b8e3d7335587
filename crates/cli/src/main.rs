mod commands;
mod config;

use clap::{Parser, Subcommand};
use config::LimitOverrides;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "graphql-scaffold")]
#[command(about = "Generate per-operation schema and document scaffolding", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a scaffold.toml config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a context package for every root operation field
    ///
    /// Writes contexts/<ParentType.fieldName>/ with a pruned schema
    /// (operation.sdl.graphql), an operation document (operation.graphql),
    /// and machine-readable metadata (context.json).
    Generate {
        /// Schema source: a directory (introspection JSON preferred over
        /// SDL) or a single schema file
        schema: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "contexts")]
        out: PathBuf,

        /// Selection-set depth for the operation document
        #[arg(long, value_name = "N")]
        selection_depth: Option<u32>,

        /// Max fields per selection level
        #[arg(long, value_name = "N")]
        max_fields: Option<usize>,

        /// Composite depth for the return tree
        #[arg(long, value_name = "N")]
        return_tree_depth: Option<u32>,

        /// Max fields per return-tree level
        #[arg(long, value_name = "N")]
        return_tree_max_fields: Option<usize>,
    },

    /// List the root operation fields of a schema
    Operations {
        /// Schema source: a directory or a single schema file
        schema: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON output for tooling
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let base_dir = std::env::current_dir()?;
    let file_config = config::Config::load(cli.config.as_deref(), &base_dir)?;

    match cli.command {
        Commands::Generate {
            schema,
            out,
            selection_depth,
            max_fields,
            return_tree_depth,
            return_tree_max_fields,
        } => {
            let overrides = LimitOverrides {
                selection_depth,
                max_fields_per_level: max_fields,
                return_tree_depth,
                return_tree_max_fields,
            };
            let limits = config::resolve_limits(&file_config.limits, &overrides);
            commands::generate::run(&schema, &out, &limits, cli.quiet)
        }
        Commands::Operations { schema, format } => commands::operations::run(&schema, format),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Color priority: `--color`, then `--no-color`, then the `NO_COLOR` and
/// `CLICOLOR_FORCE` environment variables, then TTY detection.
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color || std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    }
}
