use crate::app::output::OutputFormat;
use crate::domain::model::PreferenceSet;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "house-price-engine")]
#[command(about = "Estimate house prices per region and recommend regions that fit a budget")]
pub struct CliConfig {
    /// Path to a TOML configuration file; built-in defaults when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed the price source for reproducible output
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON on stderr")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Default, Args)]
pub struct PreferenceArgs {
    /// Require public transport nearby
    #[arg(long)]
    pub near_transport: bool,

    /// Require pet friendly housing
    #[arg(long)]
    pub pet_friendly: bool,

    /// Prefer a low crime area
    #[arg(long)]
    pub low_crime: bool,
}

impl From<&PreferenceArgs> for PreferenceSet {
    fn from(args: &PreferenceArgs) -> Self {
        Self {
            near_transport: args.near_transport,
            pet_friendly: args.pet_friendly,
            low_crime: args.low_crime,
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the catalog with its reference markers
    Regions,

    /// Predict a price for one region
    Estimate {
        region: String,

        #[arg(long, default_value_t = 1)]
        rooms: u32,

        #[command(flatten)]
        preferences: PreferenceArgs,

        /// Also report whether the prediction fits this budget
        #[arg(long)]
        budget: Option<u64>,
    },

    /// Price two regions side by side
    Compare {
        first: String,
        second: String,

        #[arg(long, default_value_t = 1)]
        rooms: u32,
    },

    /// Simulated price history for a region
    Trend { region: String },

    /// Rank every region against a budget
    Recommend {
        #[arg(long)]
        budget: u64,

        #[arg(long, default_value_t = 1)]
        rooms: u32,

        #[command(flatten)]
        preferences: PreferenceArgs,

        /// Number of regions to show; configured top_k when omitted
        #[arg(long, conflicts_with = "all")]
        top: Option<usize>,

        /// Show the full ranking
        #[arg(long)]
        all: bool,
    },

    /// Run every component once, like a single page refresh
    Report {
        /// Defaults to the first catalog region
        #[arg(long)]
        region: Option<String>,

        #[arg(long, default_value_t = 1)]
        rooms: u32,

        #[arg(long, default_value_t = 300_000)]
        budget: u64,

        #[command(flatten)]
        preferences: PreferenceArgs,

        #[arg(long)]
        compare_first: Option<String>,

        #[arg(long)]
        compare_second: Option<String>,
    },
}
