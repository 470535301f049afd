//! `cayley` — run a command script against a fresh workbench and print
//! both tables, their duplicate flags and the law report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cayley_engine::TableKind;
use cayley_runtime::commands::{apply_sequence, Outcome};
use cayley_runtime::render::render_table;
use cayley_runtime::replay::load_script;
use cayley_runtime::{Workbench, WorkbenchConfig};

#[derive(Debug, Parser)]
#[command(name = "cayley", about = "Explore finite addition/multiplication tables")]
struct Cli {
    /// Table order; overrides the config file.
    #[arg(long)]
    order: Option<usize>,

    /// JSON workbench configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON array of commands to apply.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print the final snapshot as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => WorkbenchConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => WorkbenchConfig::default(),
    };
    if let Some(order) = cli.order {
        config = config.resized(order);
        config.validate().context("invalid --order")?;
    }

    let mut workbench = Workbench::new(config).context("building workbench")?;

    if let Some(path) = &cli.script {
        let commands = load_script(path)
            .with_context(|| format!("loading script {}", path.display()))?;
        let outcomes = apply_sequence(&mut workbench, &commands).context("applying script")?;
        let ignored = outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Ignored(_)))
            .count();
        info!(commands = commands.len(), ignored, "script applied");
    }

    if cli.json {
        let snapshot = serde_json::to_string_pretty(&workbench.snapshot())?;
        println!("{}", snapshot);
        return Ok(());
    }

    for kind in [TableKind::Addition, TableKind::Multiplication] {
        let table = workbench.table(kind);
        println!("{} table ({} duplicate cell(s))", kind, table.errors().len());
        println!("{}", render_table(table));
    }
    print!("{}", workbench.report());
    println!("fingerprint: {}", workbench.fingerprint());
    Ok(())
}
