//! Component Block Loader - Entry Point
//!
//! | Command | Description |
//! |---------|-------------|
//! | `cbl render HERO --variant dark --props '{"title":"Hi"}'` | Load and render one component |
//! | `cbl preload HERO FOOTER:compact` | Warm the cache and report failures |
//! | `cbl invalidate HERO` | Drop cached entries and notify the source |
//! | `cbl config` | Print the effective configuration |

use anyhow::Context;
use cbl_domain::render::RenderScope;
use cbl_domain::value_objects::ComponentId;
use cbl_infrastructure::config::{AppConfig, ConfigLoader, Environment};
use cbl_infrastructure::{build_loader, logging};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command line interface for the component block loader
#[derive(Parser, Debug)]
#[command(name = "cbl")]
#[command(about = "Component Block Loader - fetch, cache and render component blocks")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Configuration preset (development, production, test)
    #[arg(short, long, global = true)]
    pub env: Option<Environment>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a component and print its rendered markup
    Render {
        /// Component kind, optionally `KIND:variant`
        id: String,

        /// Variant to load
        #[arg(long)]
        variant: Option<String>,

        /// Props as a JSON object
        #[arg(long, default_value = "{}")]
        props: String,
    },
    /// Preload components and print the report
    Preload {
        /// Components to warm
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Invalidate a component kind and its variants
    Invalidate {
        /// Component kind
        id: String,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    logging::init_logging(&config.logging)?;

    match cli.command {
        Command::Render { id, variant, props } => render(&config, &id, variant, &props).await,
        Command::Preload { ids } => preload(&config, &ids).await,
        Command::Invalidate { id } => invalidate(&config, &id).await,
        Command::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    if let Some(environment) = cli.env {
        loader = loader.with_environment(environment);
    }
    Ok(loader.load()?)
}

async fn render(
    config: &AppConfig,
    id: &str,
    variant: Option<String>,
    props: &str,
) -> anyhow::Result<()> {
    let props: serde_json::Value =
        serde_json::from_str(props).context("--props must be a JSON object")?;
    let id = ComponentId::parse(id)?;
    let id = match variant {
        Some(variant) => ComponentId::with_variant(id.kind(), variant),
        None => id,
    };

    let loader = build_loader(config)?;
    let component = loader.load_id(&id).await?;
    let scope = RenderScope::new();
    println!("{}", component.render(&props, &scope)?);

    for effect in scope.take_effects() {
        eprintln!("effect: {effect}");
    }
    Ok(())
}

async fn preload(config: &AppConfig, ids: &[String]) -> anyhow::Result<()> {
    let loader = build_loader(config)?;
    let report = loader.preload_with_report(ids).await;

    println!("{}", serde_json::to_string_pretty(&report)?);
    if !report.is_complete() {
        anyhow::bail!("{} of {} components failed to load", report.failed.len(), report.total());
    }
    Ok(())
}

async fn invalidate(config: &AppConfig, kind: &str) -> anyhow::Result<()> {
    let loader = build_loader(config)?;
    let outcome = loader.invalidate(kind).await?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
