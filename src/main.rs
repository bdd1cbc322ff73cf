use anyhow::Result;
use clap::{Parser, Subcommand};
use dinnerplan::cli::{GenerateArgs, check, generate};
use std::path::PathBuf;

/// dinnerplan - Weekday dinner planner and shopping list generator
#[derive(Parser)]
#[command(name = "dinnerplan")]
#[command(about = "Weekday dinner planning with weekly shopping lists", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a dinner plan, shopping lists and report
    Generate(GenerateArgs),
    /// Summarize a dish catalog and report missing categories
    Check {
        /// Dish catalog CSV (overrides config file)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = dinnerplan::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    dinnerplan::observability::init_observability(
        "dinnerplan",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Generate(args) => generate(config, args),
        Commands::Check { input } => check(config, input),
    }
}
