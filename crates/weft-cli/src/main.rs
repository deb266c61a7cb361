//! Weft - registry-driven UI artifact installer
//!
//! Usage:
//!   weft add button card     # install artifacts and their dependencies
//!   weft remove button
//!   weft list
//!   weft status --all

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weft_core::commands::{
    AddCommand, AddOptions, ListCommand, ListOptions, RemoveCommand, RemoveOptions,
};
use weft_core::config::WeftConfig;
use weft_core::install::orchestrator::InstallResult;
use weft_core::registry::schema::ItemKind;
use weft_core::status::{EntryState, StatusCommand, StatusOptions};

#[derive(Parser)]
#[command(name = "weft")]
#[command(about = "Pull UI components, blocks, and themes into your project", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install artifacts and their registry dependencies
    Add {
        /// Artifact names to install
        names: Vec<String>,

        /// Install every artifact of this kind from the primary catalog
        #[arg(long)]
        all: bool,

        /// Artifact kind
        #[arg(long, short, default_value = "component")]
        kind: KindArg,

        /// Overwrite existing files (a backup is taken first)
        #[arg(long, short)]
        force: bool,

        /// Alias for --force
        #[arg(long)]
        overwrite: bool,

        /// Target directory (default: configured path per kind)
        #[arg(long, short)]
        path: Option<PathBuf>,

        /// Style variant selector
        #[arg(long)]
        style: Option<String>,

        /// Forward dependency specs (logged, not executed)
        #[arg(long)]
        deps: bool,
    },

    /// Remove installed artifacts
    #[command(alias = "rm")]
    Remove {
        /// Artifact names to remove
        names: Vec<String>,

        /// Artifact kind
        #[arg(long, short, default_value = "component")]
        kind: KindArg,

        /// Target directory (default: configured path per kind)
        #[arg(long, short)]
        path: Option<PathBuf>,
    },

    /// List artifacts available in the primary catalog
    List {
        /// Restrict to one kind
        #[arg(long, short)]
        kind: Option<KindArg>,
    },

    /// Show installed/missing state for artifacts
    Status {
        /// Artifact names to check
        names: Vec<String>,

        /// Check every artifact of this kind
        #[arg(long)]
        all: bool,

        /// Artifact kind
        #[arg(long, short, default_value = "component")]
        kind: KindArg,

        /// Target directory (default: configured path per kind)
        #[arg(long, short)]
        path: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Component,
    Block,
    Primitive,
    Theme,
}

impl From<KindArg> for ItemKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Component => ItemKind::Component,
            KindArg::Block => ItemKind::Block,
            KindArg::Primitive => ItemKind::Primitive,
            KindArg::Theme => ItemKind::Theme,
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weft=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    run_cli(cli.command)
}

fn run_cli(command: Commands) -> Result<()> {
    match command {
        Commands::Add {
            names,
            all,
            kind,
            force,
            overwrite,
            path,
            style,
            deps,
        } => run_add(names, all, kind, force || overwrite, path, style, deps),
        Commands::Remove { names, kind, path } => run_remove(names, kind, path),
        Commands::List { kind } => run_list(kind),
        Commands::Status {
            names,
            all,
            kind,
            path,
            format,
        } => run_status(names, all, kind, path, format),
    }
}

fn load_config(style: Option<String>) -> Result<WeftConfig> {
    let cwd = std::env::current_dir()?;
    let mut config = WeftConfig::load(&cwd)?;
    if let Some(style) = style {
        config.style = style;
    }
    tracing::debug!(
        "using primary registry {} (style: {})",
        config.registry.primary_url,
        config.style
    );
    Ok(config)
}

#[allow(clippy::too_many_arguments)]
fn run_add(
    names: Vec<String>,
    all: bool,
    kind: KindArg,
    force: bool,
    path: Option<PathBuf>,
    style: Option<String>,
    deps: bool,
) -> Result<()> {
    if names.is_empty() && !all {
        anyhow::bail!("Nothing to install: pass artifact names or --all");
    }

    let config = load_config(style)?;
    let mut options = AddOptions::new(kind.into())
        .with_names(names)
        .with_all(all)
        .with_force(force)
        .with_dependencies(deps);
    if let Some(path) = path {
        options = options.with_path(path);
    }

    let report = AddCommand::new(config).execute(&options)?;

    for result in &report.results {
        print_result(result);
    }
    println!(
        "{} requested, {} resolved, {} installed",
        report.requested,
        report.resolved,
        report.results.iter().filter(|r| r.success).count()
    );

    if !report.all_succeeded() {
        std::process::exit(1);
    }
    Ok(())
}

fn run_remove(names: Vec<String>, kind: KindArg, path: Option<PathBuf>) -> Result<()> {
    if names.is_empty() {
        anyhow::bail!("Nothing to remove: pass artifact names");
    }

    let config = load_config(None)?;
    let mut options = RemoveOptions::new(kind.into()).with_names(names);
    if let Some(path) = path {
        options = options.with_path(path);
    }

    let report = RemoveCommand::new(config).execute(&options)?;

    for result in &report.results {
        print_result(result);
    }

    if !report.all_succeeded() {
        std::process::exit(1);
    }
    Ok(())
}

fn run_list(kind: Option<KindArg>) -> Result<()> {
    let config = load_config(None)?;
    let mut options = ListOptions::default();
    if let Some(kind) = kind {
        options = options.with_kind(kind.into());
    }

    let report = ListCommand::new(config).execute(&options)?;

    for (kind, entries) in &report.groups {
        println!("{}", style(kind.label()).bold());
        for entry in entries {
            if entry.registry_dependencies.is_empty() {
                println!("  {}", entry.name);
            } else {
                println!(
                    "  {} {}",
                    entry.name,
                    style(format!("({})", entry.registry_dependencies.join(", "))).dim()
                );
            }
        }
    }
    println!("{} artifact(s)", report.total());
    Ok(())
}

fn run_status(
    names: Vec<String>,
    all: bool,
    kind: KindArg,
    path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    if names.is_empty() && !all {
        anyhow::bail!("Nothing to check: pass artifact names or --all");
    }

    let config = load_config(None)?;
    let mut options = StatusOptions::new(kind.into())
        .with_names(names)
        .with_all(all);
    if let Some(path) = path {
        options = options.with_path(path);
    }

    let report = StatusCommand::new(config).execute(&options)?;

    if matches!(format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for item in &report.items {
        let state = match item.state {
            EntryState::Installed => style("installed").green(),
            EntryState::Partial => style("partial").yellow(),
            EntryState::Missing => style("missing").red(),
            EntryState::Unknown => style("unknown").dim(),
        };
        if item.missing_files.is_empty() {
            println!("{:<24} {}", item.name, state);
        } else {
            println!(
                "{:<24} {} ({} file(s) missing)",
                item.name,
                state,
                item.missing_files.len()
            );
        }
    }
    println!(
        "{} total, {} installed, {} not installed",
        report.summary.total, report.summary.installed, report.summary.missing
    );
    Ok(())
}

fn print_result(result: &InstallResult) {
    let marker = if result.success {
        style("+").green()
    } else {
        style("x").red()
    };
    match &result.message {
        Some(message) => println!("{} {}: {}", marker, result.name, message),
        None => println!("{} {}", marker, result.name),
    }
}
