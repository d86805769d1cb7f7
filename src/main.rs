use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use propath::config::Config;
use propath::expression::{AccessorKind, Expression, Parser as PathParser};

/// Marker root for expressions built from the command line.
enum Root {}

/// propath - Build canonical property path expressions
#[derive(Parser)]
#[command(name = "propath")]
#[command(version)]
#[command(about = "Build canonical property path expressions for fixture generation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file (default: ~/.config/propath/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print the expression as a JSON string
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Build an expression from accessor names, e.g. `getDog.getLoves[1][*]`
    Build {
        /// Dotted accessor path; getter names are normalized
        path: String,

        /// Treat `isX` methods as getters for `x`
        #[arg(long)]
        boolean_getters: bool,
    },
    /// Validate a canonical expression and print it back
    Check {
        /// Canonical expression, e.g. `dog.loves[1]`
        expression: String,
    },
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build(path: &str, config: &Config, boolean_getters: bool) -> Result<Expression<Root>> {
    let mut options = config.resolver_options();
    options.boolean_getters |= boolean_getters;

    let segments =
        PathParser::parse(path).with_context(|| format!("Failed to parse path '{}'", path))?;
    let mut exp = Expression::<Root>::with_resolver(options);
    for segment in segments {
        debug!(segment = %segment.name, "building segment");
        exp = exp.select(segment.into_selector(AccessorKind::Method))?;
    }
    Ok(exp)
}

/// Picks the configuration: an explicit file must load, while a broken
/// default file falls back to the defaults and yields a warning to report
/// once logging is up.
fn resolve_config<F>(explicit: Option<&Path>, load_default: F) -> Result<(Config, Option<String>)>
where
    F: FnOnce() -> Result<Config>,
{
    if let Some(path) = explicit {
        return Ok((Config::load_from(path)?, None));
    }
    Ok(match load_default() {
        Ok(config) => (config, None),
        Err(err) => (
            Config::default(),
            Some(format!("Using default settings: {:#}", err)),
        ),
    })
}

/// Executes the selected command and returns the text to print.
fn run(cli: &Cli, config: &Config) -> Result<String> {
    let exp = match &cli.command {
        Command::Build {
            path,
            boolean_getters,
        } => build(path, config, *boolean_getters)?,
        Command::Check { expression } => expression
            .parse::<Expression<Root>>()
            .with_context(|| format!("Invalid expression '{}'", expression))?,
    };

    if cli.json {
        serde_json::to_string(&exp).context("Failed to serialize expression")
    } else {
        Ok(exp.render()?)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_warning) = resolve_config(cli.config.as_deref(), Config::load)?;
    init_logging(&config);
    if let Some(warning) = config_warning {
        warn!("{}", warning);
    }

    println!("{}", run(&cli, &config)?);

    Ok(())
}
