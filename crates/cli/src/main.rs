mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use flora_codec::Format;
use flora_observability::LogFormat;
use flora_plants::{AgeCategory, PlantType};

use commands::SearchFilter;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "flora", about = "Validate, inspect and convert plant catalogs")]
struct Cli {
    /// Catalog capacity (overrides FLORA_MAX_CAPACITY env var)
    #[arg(long, global = true)]
    max_capacity: Option<usize>,

    /// Log output: pretty or json (overrides FLORA_LOG_FORMAT env var)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a catalog file and write it out again, possibly in the other format
    Convert {
        input: PathBuf,
        output: PathBuf,
        /// Input format (csv or json); inferred from the extension by default
        #[arg(long)]
        from: Option<Format>,
        /// Output format (csv or json); inferred from the extension by default
        #[arg(long)]
        to: Option<Format>,
    },
    /// Show count, average height and per-type / per-age breakdowns
    Stats {
        input: PathBuf,
        #[arg(long)]
        from: Option<Format>,
    },
    /// List plants matching every given filter
    Search {
        input: PathBuf,
        #[arg(long)]
        from: Option<Format>,
        /// Case-insensitive name substring
        #[arg(long)]
        name: Option<String>,
        /// Exact plant type (Tree, Shrub, Flower, Grass, Fern, Cactus, Vine)
        #[arg(long = "type")]
        plant_type: Option<PlantType>,
        /// young, adult or old
        #[arg(long)]
        age_category: Option<AgeCategory>,
    },
    /// Strictly parse one record line and describe it
    Check {
        /// e.g. "Rose,Flower,2,0.5,2023-05-15,true"
        line: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::resolve(cli.max_capacity, cli.log_format)?;
    flora_observability::init(config.log_format);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Convert {
            input,
            output,
            from,
            to,
        } => commands::convert(&input, &output, from, to, config.max_capacity, &mut out),
        Commands::Stats { input, from } => {
            commands::stats(&input, from, config.max_capacity, &mut out)
        }
        Commands::Search {
            input,
            from,
            name,
            plant_type,
            age_category,
        } => {
            let filter = SearchFilter {
                name,
                plant_type,
                age_category,
            };
            commands::search(&input, from, &filter, config.max_capacity, &mut out)
        }
        Commands::Check { line } => commands::check(&line, &mut out),
    }
}
